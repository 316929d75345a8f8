//! Assembles the drawer menu

use sketch_cache::CacheKind;

use super::entry::MenuEntry;
use super::page::Page;
use crate::config::ConfigKey;

/// Build the full drawer menu in display order
pub fn build_menu() -> Vec<MenuEntry> {
    let mut menu = Vec::with_capacity(64);

    menu.push(MenuEntry::title("Sample Page"));
    menu.extend(
        Page::NORMAL
            .into_iter()
            .filter(|page| !page.is_disable())
            .map(MenuEntry::Page),
    );

    menu.push(MenuEntry::title("Test Page"));
    menu.extend(
        Page::TEST
            .into_iter()
            .filter(|page| !page.is_disable())
            .map(MenuEntry::Page),
    );

    menu.push(MenuEntry::title("Cache Menu"));
    menu.push(MenuEntry::cache_info("Memory Cache (Click Clean)", CacheKind::Memory));
    menu.push(MenuEntry::cache_info("Bitmap Pool (Click Clean)", CacheKind::BitmapPool));
    menu.push(MenuEntry::cache_info("Disk Cache (Click Clean)", CacheKind::Disk));
    menu.push(MenuEntry::check("Disable Memory Cache", ConfigKey::GlobalDisableCacheInMemory));
    menu.push(MenuEntry::check("Disable Bitmap Pool", ConfigKey::GlobalDisableBitmapPool));
    menu.push(MenuEntry::check("Disable Disk Cache", ConfigKey::GlobalDisableCacheInDisk));

    menu.push(MenuEntry::title("Gesture Zoom Menu"));
    menu.push(MenuEntry::check("Enabled Gesture Zoom In Detail Page", ConfigKey::SupportZoom));
    menu.push(MenuEntry::check("Enabled Read Mode In Detail Page", ConfigKey::ReadMode));
    menu.push(MenuEntry::check(
        "Enabled Location Animation In Detail Page",
        ConfigKey::LocationAnimate,
    ));
    menu.push(MenuEntry::check(
        "Pause Block Display When Page Not Visible In Detail Page",
        ConfigKey::PauseBlockDisplayWhenPageNotVisible,
    ));
    menu.push(MenuEntry::check("Fixed Three Level Zoom Mode", ConfigKey::FixedThreeLevelZoomMode));

    menu.push(MenuEntry::title("GIF Menu"));
    menu.push(MenuEntry::check("Auto Play GIF In List", ConfigKey::PlayGifOnList));
    menu.push(MenuEntry::check("Click Play GIF In List", ConfigKey::ClickPlayGif));
    menu.push(MenuEntry::check("Show GIF Flag In List", ConfigKey::ShowGifFlag));

    menu.push(MenuEntry::title("Decode Menu"));
    menu.push(MenuEntry::check(
        "In Prefer Quality Over Speed",
        ConfigKey::GlobalInPreferQualityOverSpeed,
    ));
    menu.push(MenuEntry::check("Low Quality Bitmap", ConfigKey::GlobalLowQualityImage));
    menu.push(MenuEntry::check("Enabled Thumbnail Mode In List", ConfigKey::ThumbnailMode));
    menu.push(MenuEntry::check("Cache Processed Image In Disk", ConfigKey::CacheProcessedImage));
    menu.push(MenuEntry::check(
        "Disabled Correct Image Orientation",
        ConfigKey::DisableCorrectImageOrientation,
    ));

    menu.push(MenuEntry::title("Other Menu"));
    menu.push(MenuEntry::check("Show Round Rect In Photo List", ConfigKey::ShowRoundRectInPhotoList));
    menu.push(MenuEntry::check(
        "Show Unsplash Raw Image In Detail Page",
        ConfigKey::ShowUnsplashRawImage,
    ));
    menu.push(MenuEntry::check(
        "Show Mapping Thumbnail In Detail Page",
        ConfigKey::ShowToolsInImageDetail,
    ));
    menu.push(MenuEntry::check("Show Press Status In List", ConfigKey::ClickShowPressedStatus));
    menu.push(MenuEntry::check("Show Image From Corner Mark", ConfigKey::ShowImageFromFlag));
    menu.push(MenuEntry::check(
        "Show Download Progress In List",
        ConfigKey::ShowImageDownloadProgress,
    ));
    menu.push(MenuEntry::check(
        "Click Show Image On Pause Download In List",
        ConfigKey::ClickRetryOnPauseDownload,
    ));
    menu.push(MenuEntry::check("Click Retry On Error In List", ConfigKey::ClickRetryOnFailed));
    menu.push(MenuEntry::check("Scrolling Pause Load Image In List", ConfigKey::ScrollingPauseLoad));
    menu.push(MenuEntry::check(
        "Mobile Data Pause Download Image",
        ConfigKey::MobileNetworkPauseDownload,
    ));
    menu.push(MenuEntry::check("Long Clock Show Image Info", ConfigKey::LongClickShowImageInfo));

    menu.push(MenuEntry::title("Log Menu"));
    menu.push(MenuEntry::log_level_info("Log Level"));
    menu.push(MenuEntry::check("Output Flow Log", ConfigKey::LogRequest));
    menu.push(MenuEntry::check("Output Cache Log", ConfigKey::LogCache));
    menu.push(MenuEntry::check("Output Zoom Log", ConfigKey::LogZoom));
    menu.push(MenuEntry::check("Output Zoom Block Display Log", ConfigKey::LogZoomBlockDisplay));
    menu.push(MenuEntry::check("Output Used Time Log", ConfigKey::LogTime));
    menu.push(MenuEntry::check(
        "Sync Output Log To Disk (cache/sketch_log)",
        ConfigKey::OutLog2Sdcard,
    ));

    menu
}
