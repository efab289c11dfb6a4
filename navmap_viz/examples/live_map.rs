// navmap_viz/examples/live_map.rs

//! Live navigation map with a synthetic vehicle and a drifting buoy.
//!
//! Press `Enter` to start tracking, `R` to reset, `+`/`-` to zoom.
//!
//! To run this example:
//! `cargo run --example live_map -- --auto-start`

use bevy::{log::LogPlugin, prelude::*};
use clap::Parser;

use navmap_viz::cli::Cli;
use navmap_viz::visualization::core::config::VizConfig;
use navmap_viz::NavigationMapVizPlugin;

fn main() {
    let cli = Cli::parse();

    // --- 1. Load Map Configuration ---
    println!("Loading map configuration from: {}", cli.config.display());
    let mut config = match VizConfig::load(&cli.config) {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Failed to load map configuration at '{}': {}",
                cli.config.display(),
                e
            );
            std::process::exit(1);
        }
    };
    if let Err(e) = cli.apply_overrides(&mut config) {
        eprintln!("Invalid command line: {}", e);
        std::process::exit(2);
    }

    let mut app = App::new();

    // --- 2. Add Core Bevy Plugins & Resources ---
    app.add_plugins(DefaultPlugins.set(LogPlugin {
        level: bevy::log::Level::INFO,
        filter: config.log.filter.clone(),
        ..default()
    }))
    .insert_resource(config)
    .insert_resource(cli);

    // --- 3. Add the Navigation Map ---
    app.add_plugins(NavigationMapVizPlugin);

    // --- 4. Run the App ---
    app.run();
}
