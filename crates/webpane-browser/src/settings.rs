/// Process-wide engine settings, passed to [`crate::BrowserEngine::initialize`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppSettings {
    /// `0` disables remote debugging.
    pub remote_debugging_port: u16,
    pub context_menu_enabled: bool,
    /// ARGB.
    pub background_color: u32,
    pub windowless_rendering_enabled: bool,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            remote_debugging_port: 0,
            context_menu_enabled: false,
            background_color: 0xFFFF_FFFF,
            windowless_rendering_enabled: true,
        }
    }
}

/// Per-browser settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BrowserSettings {
    pub file_access_from_file_urls_allowed: bool,
    pub universal_access_from_file_urls_allowed: bool,
    /// Upper bound on paint notifications per second for off-screen browsers.
    pub windowless_frame_rate: u32,
    /// ARGB.
    pub background_color: u32,
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            file_access_from_file_urls_allowed: true,
            universal_access_from_file_urls_allowed: true,
            windowless_frame_rate: 60,
            background_color: 0xFFFF_FFFF,
        }
    }
}

/// How a browser is hosted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct WindowInfo {
    /// Render into a [`crate::RenderHandler`] instead of a native child window.
    pub offscreen: bool,
    /// Keep the page background's alpha instead of forcing it opaque.
    pub transparent_painting: bool,
}

impl WindowInfo {
    pub fn offscreen() -> Self {
        Self {
            offscreen: true,
            transparent_painting: false,
        }
    }

    pub fn with_transparent_painting(mut self, transparent: bool) -> Self {
        self.transparent_painting = transparent;
        self
    }
}
