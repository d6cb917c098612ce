//! Spinning mesh rendered by the ray caster, in 24-bit color or as text.
//!
//! Usage: tmesh-cast <MESH> [--ascii] [--nearest] [--distance Z] ...
//! Press q, Esc or Ctrl-C to quit.
use anyhow::Context;
use clap::Parser;
use log::info;
use tmesh_core::{load_obj, Mesh};
use tmesh_terminal::args::CastArgs;
use tmesh_terminal::{CastScene, LoopOptions, TerminalApp};

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = CastArgs::parse();

    let config = args.config();
    config.validate().context("invalid ray caster settings")?;

    let mesh = load_obj(&args.common.mesh_path)
        .with_context(|| format!("failed to load {}", args.common.mesh_path.display()))?;
    let mesh = Mesh::from(mesh);
    info!(
        "Loaded {} triangles, hit policy {:?}",
        mesh.triangles.len(),
        config.hit_policy
    );

    let options = LoopOptions {
        frame_interval: args.common.frame_interval(),
        max_frames: args.common.frames,
    };
    let scene = CastScene::new(mesh, config, args.output());
    let mut app = TerminalApp::new(scene, options);
    app.run().context("terminal output failed")?;

    Ok(())
}
