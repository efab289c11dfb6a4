// navmap_viz/src/visualization/plugins/input.rs

use crate::prelude::*;

/// Keyboard session control:
/// - `Enter` starts (or restarts) tracking at the configured start point.
/// - `R` clears both trails.
/// - `+` / `-` move the follow camera closer or further away.
pub struct MapInputPlugin;

impl Plugin for MapInputPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, auto_start_system)
            .add_systems(
                Update,
                (session_keys_system, zoom_keys_system).in_set(MapSet::Input),
            );
    }
}

/// Starts tracking right away when `--auto-start` was given.
fn auto_start_system(
    cli: Option<Res<Cli>>,
    config: Res<VizConfig>,
    mut start_writer: EventWriter<StartTrackingEvent>,
) {
    if cli.is_some_and(|cli| cli.auto_start) {
        info!("[INPUT] Auto-starting tracking.");
        start_writer.write(StartTrackingEvent(config.start_anchor()));
    }
}

fn session_keys_system(
    keys: Res<ButtonInput<KeyCode>>,
    config: Res<VizConfig>,
    mut start_writer: EventWriter<StartTrackingEvent>,
    mut reset_writer: EventWriter<ResetMapEvent>,
) {
    if keys.just_pressed(KeyCode::Enter) || keys.just_pressed(KeyCode::NumpadEnter) {
        let anchor = config.start_anchor();
        info!(
            "[INPUT] Start tracking at lat {:.6}, lon {:.6}",
            anchor.lat, anchor.lon
        );
        start_writer.write(StartTrackingEvent(anchor));
    }
    if keys.just_pressed(KeyCode::KeyR) {
        reset_writer.write(ResetMapEvent);
    }
}

fn zoom_keys_system(keys: Res<ButtonInput<KeyCode>>, mut map: ResMut<MapController>) {
    if keys.just_pressed(KeyCode::Equal) || keys.just_pressed(KeyCode::NumpadAdd) {
        map.0.zoom_in();
        debug!("[INPUT] Camera distance {:.2} m", map.0.camera_distance());
    }
    if keys.just_pressed(KeyCode::Minus) || keys.just_pressed(KeyCode::NumpadSubtract) {
        map.0.zoom_out();
        debug!("[INPUT] Camera distance {:.2} m", map.0.camera_distance());
    }
}
