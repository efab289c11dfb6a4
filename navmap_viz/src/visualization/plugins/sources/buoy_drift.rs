// navmap_viz/src/visualization/plugins/sources/buoy_drift.rs

use bevy::prelude::*;
use rand::Rng;
use std::f64::consts::TAU;
use std::time::Duration;

use crate::visualization::core::{
    app_state::{AppState, MapSet},
    config::{BuoyDriftConfig, VizConfig},
    events::BuoyFixEvent,
    prng::MapRng,
};

use navmap_core::types::BuoyFixInput;

/// Lets the buoy wander: every tick it reports a random bearing and distance
/// from wherever it was last.
#[derive(Resource)]
pub struct BuoyDrift {
    pub timer: Timer,
}

pub struct BuoyDriftPlugin;

impl Plugin for BuoyDriftPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_buoy_drift).add_systems(
            Update,
            buoy_drift_system
                .in_set(MapSet::Sources)
                .run_if(in_state(AppState::Tracking))
                .run_if(resource_exists::<BuoyDrift>),
        );
    }
}

fn setup_buoy_drift(mut commands: Commands, config: Res<VizConfig>) {
    if !config.buoy_drift.enabled {
        info!("[SOURCE] Buoy drift disabled.");
        return;
    }
    commands.insert_resource(BuoyDrift {
        timer: Timer::new(
            Duration::from_secs_f32(1.0 / config.buoy_drift.rate_hz),
            TimerMode::Repeating,
        ),
    });
}

/// Builds one bearing/distance fix within the configured drift radius.
pub fn drift_fix<R: Rng>(config: &BuoyDriftConfig, rng: &mut R) -> BuoyFixInput {
    let bearing = rng.gen_range(0.0..TAU);
    let distance = rng.gen_range(0.0..=config.max_distance);
    let fix = BuoyFixInput::relative(bearing, distance);
    match config.accuracy {
        Some(accuracy) => fix.with_accuracy(accuracy),
        None => fix,
    }
}

fn buoy_drift_system(
    mut fix_writer: EventWriter<BuoyFixEvent>,
    time: Res<Time>,
    config: Res<VizConfig>,
    mut rng: ResMut<MapRng>,
    mut drift: ResMut<BuoyDrift>,
) {
    drift.timer.tick(time.delta());
    if !drift.timer.just_finished() {
        return;
    }
    fix_writer.write(BuoyFixEvent(drift_fix(&config.buoy_drift, &mut rng.0)));
}
