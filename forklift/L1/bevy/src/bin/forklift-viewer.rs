//! Interactive forklift viewer.
//!
//! Run with: `cargo run -p forklift-bevy --bin forklift-viewer -- --scene arena`

use anyhow::{Context, Result};
use bevy::log::LogPlugin;
use bevy::prelude::*;
use clap::{Parser, ValueEnum};
use forklift_bevy::prelude::*;
use forklift_core::{ForkliftConfig, SceneVariant, Simulation};

/// Mecanum forklift with a lead-screw lift and load cell.
#[derive(Parser)]
#[command(name = "forklift-viewer")]
#[command(about = "Drive the forklift rig around an arena or warehouse", long_about = None)]
#[command(version)]
struct Cli {
    /// Scene to load
    #[arg(long, value_enum, default_value_t = SceneArg::Warehouse)]
    scene: SceneArg,

    /// Seed for the load-cell noise and warehouse shelf contents
    #[arg(long)]
    seed: Option<u64>,

    /// Log filter (e.g. "info,forklift_core=debug")
    #[arg(long, default_value = "info,wgpu=error")]
    log: String,
}

#[derive(Clone, Copy, ValueEnum)]
enum SceneArg {
    /// Open floor with a grid
    Arena,
    /// Walled warehouse with shelves
    Warehouse,
}

impl From<SceneArg> for SceneVariant {
    fn from(arg: SceneArg) -> Self {
        match arg {
            SceneArg::Arena => Self::Arena,
            SceneArg::Warehouse => Self::Warehouse,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = ForkliftConfig::for_variant(cli.scene.into());
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }
    let simulation = Simulation::new(config).context("failed to build the forklift simulation")?;

    App::new()
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Forklift".into(),
                        ..default()
                    }),
                    ..default()
                })
                .set(LogPlugin {
                    filter: cli.log,
                    ..default()
                }),
        )
        .insert_resource(ClearColor(Color::srgb(0.1, 0.1, 0.1)))
        .add_plugins(ForkliftViewerPlugin::new(simulation))
        .run();

    Ok(())
}
