//! Spinning mesh rendered by the scanline rasterizer as shade characters.
//!
//! Usage: tmesh-raster <MESH> [--width N] [--height N] [--fps N] ...
//! Press q, Esc or Ctrl-C to quit.
use anyhow::Context;
use clap::Parser;
use log::info;
use tmesh_core::load_obj;
use tmesh_terminal::args::RasterArgs;
use tmesh_terminal::{LoopOptions, RasterScene, TerminalApp};

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = RasterArgs::parse();

    let config = args.config();
    config.validate().context("invalid rasterizer settings")?;

    let mesh = load_obj(&args.common.mesh_path)
        .with_context(|| format!("failed to load {}", args.common.mesh_path.display()))?;
    info!(
        "Loaded {} vertices and {} faces",
        mesh.vertices.len(),
        mesh.faces.len()
    );

    let options = LoopOptions {
        frame_interval: args.common.frame_interval(),
        max_frames: args.common.frames,
    };
    let mut app = TerminalApp::new(RasterScene::new(mesh, config), options);
    app.run().context("terminal output failed")?;

    Ok(())
}
