//! Shows an off-screen browser page in a window, with a triangle drawn on top
//! whose rotation, scale and fill are controlled from the page.

mod app;
mod bindings;
mod client;
mod compositor;
mod config;
mod frame;
mod input_relay;
mod paint_relay;
mod shape;

#[cfg(test)]
mod testing;

use anyhow::Result;
use clap::Parser;
use webpane_browser::soft::SoftEngine;
use webpane_engine::device::GpuInit;
use webpane_engine::logging::{LoggingConfig, init_logging};
use webpane_engine::window::{Runtime, RuntimeConfig};
use winit::dpi::LogicalSize;

use crate::app::DemoApp;
use crate::config::{Cli, DemoConfig};

fn main() -> Result<()> {
    let config = DemoConfig::from(Cli::parse());

    init_logging(LoggingConfig {
        env_filter: config.log_filter.clone(),
        ..LoggingConfig::default()
    });

    let app = DemoApp::start(&config, Box::new(SoftEngine::new()))?;

    Runtime::run(
        RuntimeConfig {
            title: "Webpane".to_string(),
            initial_size: LogicalSize::new(config.width as f64, config.height as f64),
            resizable: false,
            target_fps: config.fps,
        },
        GpuInit::default(),
        app,
    )
}
