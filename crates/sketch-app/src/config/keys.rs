//! Configuration keys bound to drawer rows

use std::fmt;

use sketch_core::logging::targets;
use sketch_core::LogLevel;

/// Every stored setting. Boolean keys back a toggle row; `LogLevel` backs the
/// log-level picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ConfigKey {
    // ─────────────────────────────────────────────────────────
    // Cache
    // ─────────────────────────────────────────────────────────
    GlobalDisableCacheInMemory,
    GlobalDisableBitmapPool,
    GlobalDisableCacheInDisk,

    // ─────────────────────────────────────────────────────────
    // Gesture Zoom
    // ─────────────────────────────────────────────────────────
    SupportZoom,
    ReadMode,
    LocationAnimate,
    PauseBlockDisplayWhenPageNotVisible,
    FixedThreeLevelZoomMode,

    // ─────────────────────────────────────────────────────────
    // GIF
    // ─────────────────────────────────────────────────────────
    PlayGifOnList,
    ClickPlayGif,
    ShowGifFlag,

    // ─────────────────────────────────────────────────────────
    // Decode
    // ─────────────────────────────────────────────────────────
    GlobalInPreferQualityOverSpeed,
    GlobalLowQualityImage,
    ThumbnailMode,
    CacheProcessedImage,
    DisableCorrectImageOrientation,

    // ─────────────────────────────────────────────────────────
    // Other
    // ─────────────────────────────────────────────────────────
    ShowRoundRectInPhotoList,
    ShowUnsplashRawImage,
    ShowToolsInImageDetail,
    ClickShowPressedStatus,
    ShowImageFromFlag,
    ShowImageDownloadProgress,
    ClickRetryOnPauseDownload,
    ClickRetryOnFailed,
    ScrollingPauseLoad,
    MobileNetworkPauseDownload,
    LongClickShowImageInfo,

    // ─────────────────────────────────────────────────────────
    // Log
    // ─────────────────────────────────────────────────────────
    LogLevel,
    LogRequest,
    LogCache,
    LogZoom,
    LogZoomBlockDisplay,
    LogTime,
    OutLog2Sdcard,
}

impl ConfigKey {
    pub const ALL: [ConfigKey; 34] = [
        ConfigKey::GlobalDisableCacheInMemory,
        ConfigKey::GlobalDisableBitmapPool,
        ConfigKey::GlobalDisableCacheInDisk,
        ConfigKey::SupportZoom,
        ConfigKey::ReadMode,
        ConfigKey::LocationAnimate,
        ConfigKey::PauseBlockDisplayWhenPageNotVisible,
        ConfigKey::FixedThreeLevelZoomMode,
        ConfigKey::PlayGifOnList,
        ConfigKey::ClickPlayGif,
        ConfigKey::ShowGifFlag,
        ConfigKey::GlobalInPreferQualityOverSpeed,
        ConfigKey::GlobalLowQualityImage,
        ConfigKey::ThumbnailMode,
        ConfigKey::CacheProcessedImage,
        ConfigKey::DisableCorrectImageOrientation,
        ConfigKey::ShowRoundRectInPhotoList,
        ConfigKey::ShowUnsplashRawImage,
        ConfigKey::ShowToolsInImageDetail,
        ConfigKey::ClickShowPressedStatus,
        ConfigKey::ShowImageFromFlag,
        ConfigKey::ShowImageDownloadProgress,
        ConfigKey::ClickRetryOnPauseDownload,
        ConfigKey::ClickRetryOnFailed,
        ConfigKey::ScrollingPauseLoad,
        ConfigKey::MobileNetworkPauseDownload,
        ConfigKey::LongClickShowImageInfo,
        ConfigKey::LogLevel,
        ConfigKey::LogRequest,
        ConfigKey::LogCache,
        ConfigKey::LogZoom,
        ConfigKey::LogZoomBlockDisplay,
        ConfigKey::LogTime,
        ConfigKey::OutLog2Sdcard,
    ];

    /// Name used in `config.toml`
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigKey::GlobalDisableCacheInMemory => "global_disable_cache_in_memory",
            ConfigKey::GlobalDisableBitmapPool => "global_disable_bitmap_pool",
            ConfigKey::GlobalDisableCacheInDisk => "global_disable_cache_in_disk",
            ConfigKey::SupportZoom => "support_zoom",
            ConfigKey::ReadMode => "read_mode",
            ConfigKey::LocationAnimate => "location_animate",
            ConfigKey::PauseBlockDisplayWhenPageNotVisible => {
                "pause_block_display_when_page_not_visible"
            }
            ConfigKey::FixedThreeLevelZoomMode => "fixed_three_level_zoom_mode",
            ConfigKey::PlayGifOnList => "play_gif_on_list",
            ConfigKey::ClickPlayGif => "click_play_gif",
            ConfigKey::ShowGifFlag => "show_gif_flag",
            ConfigKey::GlobalInPreferQualityOverSpeed => "global_in_prefer_quality_over_speed",
            ConfigKey::GlobalLowQualityImage => "global_low_quality_image",
            ConfigKey::ThumbnailMode => "thumbnail_mode",
            ConfigKey::CacheProcessedImage => "cache_processed_image",
            ConfigKey::DisableCorrectImageOrientation => "disable_correct_image_orientation",
            ConfigKey::ShowRoundRectInPhotoList => "show_round_rect_in_photo_list",
            ConfigKey::ShowUnsplashRawImage => "show_unsplash_raw_image",
            ConfigKey::ShowToolsInImageDetail => "show_tools_in_image_detail",
            ConfigKey::ClickShowPressedStatus => "click_show_pressed_status",
            ConfigKey::ShowImageFromFlag => "show_image_from_flag",
            ConfigKey::ShowImageDownloadProgress => "show_image_download_progress",
            ConfigKey::ClickRetryOnPauseDownload => "click_retry_on_pause_download",
            ConfigKey::ClickRetryOnFailed => "click_retry_on_failed",
            ConfigKey::ScrollingPauseLoad => "scrolling_pause_load",
            ConfigKey::MobileNetworkPauseDownload => "mobile_network_pause_download",
            ConfigKey::LongClickShowImageInfo => "long_click_show_image_info",
            ConfigKey::LogLevel => "log_level",
            ConfigKey::LogRequest => "log_request",
            ConfigKey::LogCache => "log_cache",
            ConfigKey::LogZoom => "log_zoom",
            ConfigKey::LogZoomBlockDisplay => "log_zoom_block_display",
            ConfigKey::LogTime => "log_time",
            ConfigKey::OutLog2Sdcard => "out_log_2_sdcard",
        }
    }

    /// Whether the key holds a string rather than a boolean
    pub fn is_string(&self) -> bool {
        matches!(self, ConfigKey::LogLevel)
    }

    /// Default for boolean keys. `false` for string keys.
    pub fn default_bool(&self) -> bool {
        matches!(
            self,
            ConfigKey::SupportZoom
                | ConfigKey::ReadMode
                | ConfigKey::LocationAnimate
                | ConfigKey::PauseBlockDisplayWhenPageNotVisible
                | ConfigKey::ShowGifFlag
                | ConfigKey::ThumbnailMode
                | ConfigKey::CacheProcessedImage
                | ConfigKey::ClickShowPressedStatus
                | ConfigKey::ShowImageDownloadProgress
                | ConfigKey::ClickRetryOnFailed
                | ConfigKey::MobileNetworkPauseDownload
                | ConfigKey::LongClickShowImageInfo
        )
    }

    /// Default for string keys
    pub fn default_string(&self) -> Option<&'static str> {
        match self {
            ConfigKey::LogLevel => Some(LogLevel::default().label()),
            _ => None,
        }
    }

    /// The tracing target a log-category toggle switches, if any
    pub fn log_target(&self) -> Option<&'static str> {
        match self {
            ConfigKey::LogRequest => Some(targets::FLOW),
            ConfigKey::LogCache => Some(targets::CACHE),
            ConfigKey::LogZoom => Some(targets::ZOOM),
            ConfigKey::LogZoomBlockDisplay => Some(targets::ZOOM_BLOCK),
            ConfigKey::LogTime => Some(targets::TIME),
            _ => None,
        }
    }

    /// Whether changing this key requires the log filters to be re-applied
    pub fn affects_logging(&self) -> bool {
        self.log_target().is_some()
            || matches!(self, ConfigKey::LogLevel | ConfigKey::OutLog2Sdcard)
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.as_str() == name)
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
