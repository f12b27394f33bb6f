mod anim;
mod app;
mod engine;
mod graph;
mod interaction;
mod physics;

use std::path::PathBuf;

use anyhow::{Result, anyhow};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::engine::Engine;
use crate::graph::{GraphStore, default_sample, read_sample, seed_store};
use crate::physics::PhysicsConfig;

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Args {
    /// JSON file of `{id, label, url?, connections}` records to seed the graph.
    /// Defaults to the bundled sample.
    #[arg(long)]
    data: Option<PathBuf>,

    /// Seed for random spawn positions, for reproducible layouts.
    #[arg(long)]
    seed: Option<u64>,

    #[arg(long)]
    repulsion: Option<f32>,

    #[arg(long)]
    attraction: Option<f32>,

    #[arg(long)]
    centering: Option<f32>,

    /// Scroll zoom speed of the orbit camera.
    #[arg(long, default_value_t = 1.2)]
    zoom_speed: f32,
}

impl Args {
    fn physics(&self) -> PhysicsConfig {
        let mut config = PhysicsConfig::default();
        if let Some(repulsion) = self.repulsion {
            config.set_repulsion(repulsion);
        }
        if let Some(attraction) = self.attraction {
            config.set_attraction(attraction);
        }
        if let Some(centering) = self.centering {
            config.set_centering(centering);
        }
        config
    }
}

fn build_engine(args: &Args) -> Result<Engine> {
    let records = match &args.data {
        Some(path) => read_sample(path)?,
        None => default_sample()?,
    };

    let mut store = match args.seed {
        Some(seed) => GraphStore::with_seed(seed),
        None => GraphStore::new(),
    };
    seed_store(&mut store, &records);

    Ok(Engine::new(store, args.physics()))
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();
    let engine = build_engine(&args)?;
    tracing::info!(
        nodes = engine.store().len(),
        edges = engine.store().edges().len(),
        "starting editor"
    );

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default().with_inner_size([1440.0, 920.0]),
        ..Default::default()
    };

    let zoom_speed = args.zoom_speed;
    eframe::run_native(
        "graph3d-editor",
        options,
        Box::new(move |_cc| Ok(Box::new(app::GraphEditorApp::new(engine, zoom_speed)))),
    )
    .map_err(|error| anyhow!("failed to run the editor window: {error}"))
}
