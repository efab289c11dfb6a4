// navmap_viz/src/visualization/plugins/tracking.rs

use crate::prelude::*;

/// The whole navigation map as one resource. Its scene is a command queue
/// that the scene plugin drains every frame.
#[derive(Resource, Debug)]
pub struct MapController(pub NavigationMap<SceneCommandQueue>);

impl MapController {
    pub fn from_config(config: &VizConfig) -> Self {
        Self(NavigationMap::new(
            config.map.clone(),
            SceneCommandQueue::new(),
            Box::new(LocalTangentPlane::new(config.map.origin)),
            Box::new(NoFilter),
        ))
    }
}

pub struct TrackingPlugin;

impl Plugin for TrackingPlugin {
    fn build(&self, app: &mut App) {
        app.add_event::<NavigationSampleEvent>()
            .add_event::<BuoyFixEvent>()
            .add_event::<StartTrackingEvent>()
            .add_event::<ResetMapEvent>()
            .add_systems(Startup, init_navigation_map)
            .add_systems(
                Update,
                (
                    reset_map_system,
                    start_tracking_system,
                    navigation_sample_system,
                    buoy_fix_system,
                    render_tick_system,
                )
                    .chain()
                    .in_set(MapSet::Tracking),
            );
    }
}

fn init_navigation_map(mut commands: Commands, config: Res<VizConfig>) {
    info!(
        "[MAP] Local origin at lat {:.6}, lon {:.6}",
        config.map.origin.lat, config.map.origin.lon
    );
    commands.insert_resource(MapController::from_config(&config));
}

fn reset_map_system(
    mut reset_reader: EventReader<ResetMapEvent>,
    mut map: ResMut<MapController>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    // Several resets in one frame are the same as one.
    if reset_reader.read().count() == 0 {
        return;
    }
    map.0.reset();
    map.0.scene_mut().clear();
    next_state.set(AppState::Idle);
    info!("[MAP] Map reset, waiting for a start point.");
}

fn start_tracking_system(
    mut start_reader: EventReader<StartTrackingEvent>,
    mut map: ResMut<MapController>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    for event in start_reader.read() {
        let fix = map.0.start_tracking(event.0);
        info!(
            "[MAP] Tracking started, buoy seeded at ({:.2}, {:.2})",
            fix.x, fix.y
        );
        next_state.set(AppState::Tracking);
    }
}

fn navigation_sample_system(
    mut sample_reader: EventReader<NavigationSampleEvent>,
    mut map: ResMut<MapController>,
) {
    for event in sample_reader.read() {
        match map.0.on_navigation_sample(&event.0) {
            Ok(Some(pose)) => debug!(
                "[MAP] Vehicle at ({:.2}, {:.2}, {:.2})",
                pose.x, pose.y, pose.z
            ),
            // Not tracking yet.
            Ok(None) => {}
            Err(e) => warn!("[MAP] Dropped navigation sample: {}", e),
        }
    }
}

fn buoy_fix_system(mut fix_reader: EventReader<BuoyFixEvent>, mut map: ResMut<MapController>) {
    for event in fix_reader.read() {
        let mut input = event.0;
        match map.0.on_buoy_fix_request(&mut input) {
            Ok(fix) => debug!(
                "[MAP] Buoy at ({:.2}, {:.2}), accuracy {:.2} m",
                fix.x, fix.y, fix.accuracy
            ),
            Err(e) => warn!("[MAP] Dropped buoy fix: {}", e),
        }
    }
}

fn render_tick_system(mut map: ResMut<MapController>) {
    map.0.render_tick();
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .add_plugins(bevy::state::app::StatesPlugin)
            .init_state::<AppState>()
            .insert_resource(VizConfig::default())
            .add_plugins(TrackingPlugin);
        app.update();
        app
    }

    #[test]
    fn test_samples_before_start_are_ignored() {
        let mut app = test_app();
        app.world_mut()
            .send_event(NavigationSampleEvent(RelativePose::at_depth(2.0)));
        app.update();

        let map = app.world().resource::<MapController>();
        assert!(!map.0.is_tracking());
        assert!(map.0.pose_tracker().is_empty());
    }

    #[test]
    fn test_start_then_samples_reach_the_map() {
        let mut app = test_app();
        let origin = VizConfig::default().map.origin;
        app.world_mut().send_event(StartTrackingEvent(origin));
        app.update();

        app.world_mut()
            .send_event(NavigationSampleEvent(RelativePose::at_depth(2.0)));
        app.world_mut()
            .send_event(NavigationSampleEvent(RelativePose::translation_only(1.0, 0.0, 0.0)));
        app.world_mut()
            .send_event(BuoyFixEvent(BuoyFixInput::relative(0.0, 2.0)));
        app.update();

        let map = app.world().resource::<MapController>();
        assert!(map.0.is_tracking());
        assert_eq!(map.0.pose_tracker().len(), 2);
        assert_eq!(map.0.buoy_resolver().len(), 2);
        assert!(map
            .0
            .scene()
            .commands()
            .iter()
            .any(|c| matches!(c, SceneCommand::FollowCamera { .. })));
    }

    #[test]
    fn test_reset_clears_the_map() {
        let mut app = test_app();
        let origin = VizConfig::default().map.origin;
        app.world_mut().send_event(StartTrackingEvent(origin));
        app.update();
        app.world_mut()
            .send_event(NavigationSampleEvent(RelativePose::at_depth(2.0)));
        app.update();

        app.world_mut().send_event(ResetMapEvent);
        app.update();

        let map = app.world().resource::<MapController>();
        assert!(!map.0.is_tracking());
        assert!(map.0.pose_tracker().is_empty());
        assert!(map.0.buoy_resolver().is_empty());
    }
}
