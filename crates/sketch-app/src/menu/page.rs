//! Pages reachable from the drawer

use std::fmt;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Page {
    // Sample pages
    #[default]
    Unsplash,
    GifSearch,
    MyPhotos,
    MyVideos,
    AppList,
    About,

    // Test pages
    BlockDisplayTest,
    ImageProcessorTest,
    ImageShaperTest,
    RepeatLoadOrDownloadTest,
    InBitmapTest,
    ImageOrientationTest,
    Base64ImageTest,
    OtherTest,
}

impl Page {
    pub const NORMAL: [Page; 6] = [
        Page::Unsplash,
        Page::GifSearch,
        Page::MyPhotos,
        Page::MyVideos,
        Page::AppList,
        Page::About,
    ];

    pub const TEST: [Page; 8] = [
        Page::BlockDisplayTest,
        Page::ImageProcessorTest,
        Page::ImageShaperTest,
        Page::RepeatLoadOrDownloadTest,
        Page::InBitmapTest,
        Page::ImageOrientationTest,
        Page::Base64ImageTest,
        Page::OtherTest,
    ];

    pub fn title(&self) -> &'static str {
        match self {
            Page::Unsplash => "Unsplash",
            Page::GifSearch => "GIF Search",
            Page::MyPhotos => "My Photos",
            Page::MyVideos => "My Videos",
            Page::AppList => "App List",
            Page::About => "About",
            Page::BlockDisplayTest => "Block Display",
            Page::ImageProcessorTest => "Image Processor",
            Page::ImageShaperTest => "Image Shaper",
            Page::RepeatLoadOrDownloadTest => "Repeat Load Or Download",
            Page::InBitmapTest => "In Bitmap",
            Page::ImageOrientationTest => "Image Orientation",
            Page::Base64ImageTest => "Base64 Image",
            Page::OtherTest => "Other",
        }
    }

    /// Disabled pages are left out of the drawer
    pub fn is_disable(&self) -> bool {
        // Video playback has no terminal counterpart
        matches!(self, Page::MyVideos)
    }

    pub fn is_test(&self) -> bool {
        Self::TEST.contains(self)
    }

    /// Cover image announced as the main-page background when the page opens
    pub fn background_url(&self) -> Option<&'static str> {
        match self {
            Page::Unsplash => {
                Some("https://images.unsplash.com/photo-1469474968028-56623f02e42e")
            }
            Page::GifSearch => Some("https://media.giphy.com/media/l0MYt5jPR6QX5pnqM/giphy.gif"),
            Page::MyPhotos => {
                Some("https://images.unsplash.com/photo-1501785888041-af3ef285b470")
            }
            Page::BlockDisplayTest => {
                Some("https://images.unsplash.com/photo-1470071459604-3b5ec3a7fe05")
            }
            _ => None,
        }
    }

    pub fn from_title(title: &str) -> Option<Self> {
        Self::NORMAL
            .into_iter()
            .chain(Self::TEST)
            .find(|page| page.title().eq_ignore_ascii_case(title))
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}
