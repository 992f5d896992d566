use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use url::Url;

/// Demo settings. `Default` is what runs without any flags.
#[derive(Debug, Clone, PartialEq)]
pub struct DemoConfig {
    /// HTML page shown by the browser.
    pub page: PathBuf,
    /// Window and browser view width in logical pixels.
    pub width: u32,
    pub height: u32,
    /// Wheel distance sent per wheel notch.
    pub scroll_delta: i32,
    /// Presentation rate of the window.
    pub fps: u32,
    /// `env_logger` filter; `None` falls back to `RUST_LOG`.
    pub log_filter: Option<String>,
}

impl Default for DemoConfig {
    fn default() -> Self {
        Self {
            page: PathBuf::from("ui/example.html"),
            width: 800,
            height: 600,
            scroll_delta: 120,
            fps: 60,
            log_filter: None,
        }
    }
}

impl DemoConfig {
    /// Absolute `file://` URL of the page.
    pub fn page_url(&self) -> Result<Url> {
        let path = std::path::absolute(&self.page)
            .with_context(|| format!("cannot resolve page path {}", self.page.display()))?;
        if !path.exists() {
            log::warn!("page {} does not exist", path.display());
        }
        Url::from_file_path(&path).map_err(|()| anyhow!("cannot express {} as a file URL", path.display()))
    }
}

/// Off-screen browser surface composited with an animated shape.
#[derive(Debug, Parser)]
#[command(name = "webpane-demo", version)]
pub struct Cli {
    /// HTML page to load.
    #[arg(default_value = "ui/example.html")]
    pub page: PathBuf,

    #[arg(long, default_value_t = 800)]
    pub width: u32,

    #[arg(long, default_value_t = 600)]
    pub height: u32,

    /// Wheel delta per notch.
    #[arg(long = "scroll-delta", default_value_t = 120)]
    pub scroll_delta: i32,

    #[arg(long, default_value_t = 60)]
    pub fps: u32,

    /// Log filter, e.g. "debug" or "webpane_demo=trace".
    #[arg(long = "log")]
    pub log_filter: Option<String>,
}

impl From<Cli> for DemoConfig {
    fn from(cli: Cli) -> Self {
        Self {
            page: cli.page,
            width: cli.width.max(1),
            height: cli.height.max(1),
            scroll_delta: cli.scroll_delta,
            fps: cli.fps,
            log_filter: cli.log_filter,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_defaults_match_config_defaults() {
        let cli = Cli::try_parse_from(["webpane-demo"]).unwrap();
        assert_eq!(DemoConfig::from(cli), DemoConfig::default());
    }

    #[test]
    fn cli_overrides() {
        let cli = Cli::try_parse_from([
            "webpane-demo",
            "page.html",
            "--width",
            "640",
            "--scroll-delta",
            "53",
            "--log",
            "debug",
        ])
        .unwrap();
        let cfg = DemoConfig::from(cli);
        assert_eq!(cfg.page, PathBuf::from("page.html"));
        assert_eq!(cfg.width, 640);
        assert_eq!(cfg.height, 600);
        assert_eq!(cfg.scroll_delta, 53);
        assert_eq!(cfg.log_filter.as_deref(), Some("debug"));
    }

    #[test]
    fn zero_sizes_are_bumped() {
        let cli = Cli::try_parse_from(["webpane-demo", "--width", "0"]).unwrap();
        assert_eq!(DemoConfig::from(cli).width, 1);
    }

    #[test]
    fn page_url_is_absolute_file_url() {
        let url = DemoConfig::default().page_url().unwrap();
        assert_eq!(url.scheme(), "file");
        assert!(url.path().ends_with("/ui/example.html"));
        let cwd = std::env::current_dir().unwrap();
        assert_eq!(url.to_file_path().unwrap(), cwd.join("ui/example.html"));
    }
}
