mod app;
mod color;
mod config;
mod data;
mod pipeline;
mod render;
mod state;
mod ui;

use clap::Parser;

use config::{Args, PlotConfig};

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let config = PlotConfig::from(Args::parse());
    let mut renderer = pipeline::renderer_for(&config);
    pipeline::run(&config, renderer.as_mut())
}
