// navmap_viz/src/visualization/plugins/sources/navigation.rs

use bevy::prelude::*;
use rand_chacha::ChaCha8Rng;
use rand_distr::{Distribution, Normal};
use std::time::Duration;

use crate::visualization::core::{
    app_state::{AppState, MapSet},
    config::{NavigationSourceConfig, VizConfig},
    events::NavigationSampleEvent,
    prng::MapRng,
};

use navmap_core::types::RelativePose;

// =========================================================================
// == Navigation Source Resource & Plugin ==
// =========================================================================

/// A synthetic vehicle that turns slowly and dives while cruising forward.
#[derive(Resource)]
pub struct NavigationSource {
    pub timer: Timer,
    /// Absolute heading (yaw) reported with the next sample.
    heading: f64,
    /// The next sample anchors a new trajectory.
    anchor_pending: bool,
    attitude_noise: Option<Normal<f64>>,
    translation_noise: Option<Normal<f64>>,
}

impl NavigationSource {
    pub fn from_config(config: &NavigationSourceConfig) -> Self {
        Self {
            timer: Timer::new(
                Duration::from_secs_f32(1.0 / config.rate_hz),
                TimerMode::Repeating,
            ),
            heading: 0.0,
            anchor_pending: true,
            attitude_noise: noise_distribution("attitude", config.attitude_noise_stddev),
            translation_noise: noise_distribution("translation", config.translation_noise_stddev),
        }
    }

    pub fn restart(&mut self) {
        self.timer.reset();
        self.heading = 0.0;
        self.anchor_pending = true;
    }

    /// Produces the next sample. The first one after a restart only carries
    /// the starting depth.
    pub fn next_sample(
        &mut self,
        config: &NavigationSourceConfig,
        dt: f64,
        rng: &mut ChaCha8Rng,
    ) -> RelativePose {
        if self.anchor_pending {
            self.anchor_pending = false;
            return RelativePose::at_depth(config.initial_depth);
        }

        self.heading += config.turn_rate * dt;
        let attitude_noise = self.attitude_noise.as_ref();
        let translation_noise = self.translation_noise.as_ref();

        RelativePose {
            roll: sample(attitude_noise, rng),
            pitch: config.dive_pitch + sample(attitude_noise, rng),
            yaw: self.heading + sample(attitude_noise, rng),
            trans_x: config.forward_speed * dt + sample(translation_noise, rng),
            trans_y: sample(translation_noise, rng),
            trans_z: sample(translation_noise, rng),
            depth: config.initial_depth,
        }
    }
}

fn noise_distribution(label: &str, stddev: f64) -> Option<Normal<f64>> {
    match Normal::new(0.0, stddev) {
        Ok(dist) => Some(dist),
        Err(e) => {
            warn!(
                "[SOURCE] Ignoring {} noise (stddev {}): {}",
                label, stddev, e
            );
            None
        }
    }
}

fn sample(dist: Option<&Normal<f64>>, rng: &mut ChaCha8Rng) -> f64 {
    dist.map_or(0.0, |d| d.sample(rng))
}

pub struct NavigationSourcePlugin;

impl Plugin for NavigationSourcePlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, setup_navigation_source)
            .add_systems(OnEnter(AppState::Tracking), restart_navigation_source)
            .add_systems(
                Update,
                navigation_source_system
                    .in_set(MapSet::Sources)
                    .run_if(in_state(AppState::Tracking)),
            );
    }
}

// =========================================================================
// == Systems ==
// =========================================================================

fn setup_navigation_source(mut commands: Commands, config: Res<VizConfig>) {
    info!(
        "[SOURCE] Synthetic navigation at {} Hz (seed: {:?})",
        config.source.rate_hz, config.source.seed
    );
    commands.insert_resource(MapRng::from_seed(config.source.seed));
    commands.insert_resource(NavigationSource::from_config(&config.source));
}

fn restart_navigation_source(mut source: ResMut<NavigationSource>) {
    source.restart();
}

/// Emits one navigation sample every time the source timer fires.
fn navigation_source_system(
    mut sample_writer: EventWriter<NavigationSampleEvent>,
    time: Res<Time>,
    config: Res<VizConfig>,
    mut rng: ResMut<MapRng>,
    mut source: ResMut<NavigationSource>,
) {
    source.timer.tick(time.delta());
    if !source.timer.just_finished() {
        return;
    }
    let dt = source.timer.duration().as_secs_f64();
    let sample = source.next_sample(&config.source, dt, &mut rng.0);
    sample_writer.write(NavigationSampleEvent(sample));
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use rand::SeedableRng;

    fn quiet_config() -> NavigationSourceConfig {
        NavigationSourceConfig {
            attitude_noise_stddev: 0.0,
            translation_noise_stddev: 0.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_first_sample_anchors_at_initial_depth() {
        let config = quiet_config();
        let mut source = NavigationSource::from_config(&config);
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let first = source.next_sample(&config, 0.1, &mut rng);
        assert_eq!(first, RelativePose::at_depth(config.initial_depth));
    }

    #[test]
    fn test_heading_turns_and_vehicle_moves_forward() {
        let config = quiet_config();
        let mut source = NavigationSource::from_config(&config);
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        source.next_sample(&config, 0.1, &mut rng);
        let second = source.next_sample(&config, 0.1, &mut rng);
        let third = source.next_sample(&config, 0.1, &mut rng);

        assert_abs_diff_eq!(second.trans_x, config.forward_speed * 0.1, epsilon = 1e-12);
        assert_abs_diff_eq!(second.pitch, config.dive_pitch, epsilon = 1e-12);
        assert_abs_diff_eq!(third.yaw - second.yaw, config.turn_rate * 0.1, epsilon = 1e-12);
        assert!(second.validate().is_ok());
    }

    #[test]
    fn test_restart_reanchors() {
        let config = quiet_config();
        let mut source = NavigationSource::from_config(&config);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        source.next_sample(&config, 0.1, &mut rng);
        source.next_sample(&config, 0.1, &mut rng);

        source.restart();
        let sample = source.next_sample(&config, 0.1, &mut rng);
        assert_eq!(sample, RelativePose::at_depth(config.initial_depth));
    }

    #[test]
    fn test_negative_stddev_disables_noise() {
        let config = NavigationSourceConfig {
            attitude_noise_stddev: -1.0,
            translation_noise_stddev: 0.0,
            ..Default::default()
        };
        let mut source = NavigationSource::from_config(&config);
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        source.next_sample(&config, 0.1, &mut rng);
        let sample = source.next_sample(&config, 0.1, &mut rng);
        assert_eq!(sample.roll, 0.0);
    }
}
