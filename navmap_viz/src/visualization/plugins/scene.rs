// navmap_viz/src/visualization/plugins/scene.rs

use bevy::prelude::*;
use nalgebra::{Point3, UnitQuaternion, Vector3};
use std::f32::consts::FRAC_PI_2;

use crate::visualization::core::{
    app_state::MapSet,
    config::VizConfig,
    events::{ResetMapEvent, StartTrackingEvent},
    transforms::{map_point_to_bevy, map_pose_to_bevy_transform, map_vector_to_bevy},
};
use crate::visualization::plugins::tracking::MapController;

use navmap_core::prelude::{SceneColor, SceneCommand};

// =========================================================================
// == Components & Resources ==
// =========================================================================

/// Anything spawned on behalf of the map. Despawned on reset and restart.
#[derive(Component)]
pub struct MapMarker;

#[derive(Component)]
pub struct VehicleMarker;

#[derive(Component)]
pub struct BuoyMarker;

#[derive(Component)]
pub struct GhostMarker;

#[derive(Component)]
pub struct MapCamera;

#[derive(Debug, Clone, Copy)]
pub struct TrailSegment {
    pub start: Vec3,
    pub end: Vec3,
    pub color: Color,
}

/// Every segment the map has drawn so far. Gizmos are immediate mode, so the
/// trails are re-drawn from here each frame.
#[derive(Resource, Default, Debug)]
pub struct TrailSegments(pub Vec<TrailSegment>);

#[derive(Resource)]
struct MarkerAssets {
    vehicle_mesh: Handle<Mesh>,
    vehicle_material: Handle<StandardMaterial>,
    ghost_vehicle_material: Handle<StandardMaterial>,
    buoy_mesh: Handle<Mesh>,
    buoy_material: Handle<StandardMaterial>,
    ghost_buoy_material: Handle<StandardMaterial>,
}

const GRID_HALF_EXTENT: f32 = 20.0;
const GRID_SPACING: f32 = 1.0;
const NORTH_ARROW_LENGTH: f32 = 1.5;

pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<TrailSegments>()
            .insert_resource(ClearColor(Color::srgb(0.02, 0.08, 0.15)))
            .add_systems(Startup, (spawn_lighting_and_camera, load_marker_assets))
            .add_systems(
                Update,
                (
                    clear_scene_on_new_run,
                    apply_scene_commands,
                    draw_trail_segments,
                    draw_water_grid,
                    draw_north_indicator,
                )
                    .chain()
                    .in_set(MapSet::Render),
            );
    }
}

// =========================================================================
// == Setup ==
// =========================================================================

fn spawn_lighting_and_camera(mut commands: Commands) {
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 300.0,
        ..default()
    });
    commands.spawn((
        Name::new("Sun"),
        DirectionalLight {
            illuminance: 8_000.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_xyz(4.0, 10.0, 4.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    commands.spawn((
        Name::new("Map Camera"),
        MapCamera,
        Camera3d::default(),
        Transform::from_xyz(0.0, 5.0, 5.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

fn load_marker_assets(
    mut commands: Commands,
    config: Res<VizConfig>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    // Meshes are authored in Bevy axes with the vehicle's nose along +X.
    let vehicle_mesh = if config.map.orientation_mode {
        // A flat arrowhead makes the heading readable from any camera angle.
        Mesh::from(Cone {
            radius: 0.4,
            height: 1.2,
        })
        .rotated_by(Quat::from_rotation_z(-FRAC_PI_2))
        .scaled_by(Vec3::new(1.0, 0.25, 1.0))
    } else {
        Mesh::from(Cuboid::new(0.6, 0.2, 0.3))
    };

    let translucent = |color: Color| StandardMaterial {
        base_color: color,
        alpha_mode: AlphaMode::Blend,
        unlit: true,
        double_sided: true,
        cull_mode: None,
        ..default()
    };

    commands.insert_resource(MarkerAssets {
        vehicle_mesh: meshes.add(vehicle_mesh),
        vehicle_material: materials.add(StandardMaterial {
            base_color: Color::srgb(1.0, 0.55, 0.0),
            ..default()
        }),
        ghost_vehicle_material: materials.add(translucent(Color::srgba(1.0, 0.55, 0.0, 0.25))),
        // Unit disc in the XY plane, scaled to the accuracy radius per fix.
        buoy_mesh: meshes.add(Circle::new(1.0)),
        buoy_material: materials.add(translucent(Color::srgba(0.1, 0.9, 0.3, 0.6))),
        ghost_buoy_material: materials.add(translucent(Color::srgba(0.1, 0.9, 0.3, 0.15))),
    });
}

// =========================================================================
// == Runtime Systems ==
// =========================================================================

/// Both a reset and a (re)start begin an empty map, so every marker and
/// trail segment from the previous run goes.
fn clear_scene_on_new_run(
    mut commands: Commands,
    mut reset_reader: EventReader<ResetMapEvent>,
    mut start_reader: EventReader<StartTrackingEvent>,
    mut trail: ResMut<TrailSegments>,
    marker_query: Query<Entity, With<MapMarker>>,
) {
    let resets = reset_reader.read().count();
    let starts = start_reader.read().count();
    if resets + starts == 0 {
        return;
    }
    for entity in &marker_query {
        commands.entity(entity).despawn();
    }
    trail.0.clear();
}

/// Lays a buoy disc flat on the water, scaled to its accuracy radius.
fn buoy_transform(position: &Point3<f64>, radius: f64) -> Transform {
    let radius = radius as f32;
    Transform::from_translation(map_point_to_bevy(position))
        .with_rotation(Quat::from_rotation_x(-FRAC_PI_2))
        .with_scale(Vec3::new(radius, radius, 1.0))
}

fn scene_color(color: SceneColor) -> Color {
    Color::srgb(color.r, color.g, color.b)
}

/// Turns every queued scene command into entities, trail segments or a camera
/// move. The live vehicle and buoy markers are singletons that get moved; ghost
/// markers stay where they were spawned.
fn apply_scene_commands(
    mut commands: Commands,
    mut map: ResMut<MapController>,
    assets: Res<MarkerAssets>,
    mut trail: ResMut<TrailSegments>,
    vehicle_query: Query<Entity, With<VehicleMarker>>,
    buoy_query: Query<Entity, With<BuoyMarker>>,
    mut camera_query: Query<&mut Transform, With<MapCamera>>,
) {
    let mut vehicle = vehicle_query.iter().next();
    let mut buoy = buoy_query.iter().next();

    for command in map.0.scene_mut().drain() {
        match command {
            SceneCommand::VehicleMarker {
                position,
                orientation,
            } => {
                let transform = map_pose_to_bevy_transform(&position, &orientation);
                match vehicle {
                    Some(entity) => {
                        commands.entity(entity).insert(transform);
                    }
                    None => {
                        let entity = commands
                            .spawn((
                                Name::new("Vehicle"),
                                VehicleMarker,
                                MapMarker,
                                Mesh3d(assets.vehicle_mesh.clone()),
                                MeshMaterial3d(assets.vehicle_material.clone()),
                                transform,
                            ))
                            .id();
                        vehicle = Some(entity);
                    }
                }
            }
            SceneCommand::GhostVehicleMarker {
                position,
                orientation,
            } => {
                spawn_ghost_vehicle(&mut commands, &assets, &position, &orientation);
            }
            SceneCommand::BuoyMarker { position, radius } => {
                let transform = buoy_transform(&position, radius);
                match buoy {
                    Some(entity) => {
                        commands.entity(entity).insert(transform);
                    }
                    None => {
                        let entity = commands
                            .spawn((
                                Name::new("Buoy"),
                                BuoyMarker,
                                MapMarker,
                                Mesh3d(assets.buoy_mesh.clone()),
                                MeshMaterial3d(assets.buoy_material.clone()),
                                transform,
                            ))
                            .id();
                        buoy = Some(entity);
                    }
                }
            }
            SceneCommand::GhostBuoyMarker { position, radius } => {
                commands.spawn((
                    Name::new("Ghost Buoy"),
                    GhostMarker,
                    MapMarker,
                    Mesh3d(assets.buoy_mesh.clone()),
                    MeshMaterial3d(assets.ghost_buoy_material.clone()),
                    buoy_transform(&position, radius),
                ));
            }
            SceneCommand::Segment { a, b, color } => {
                trail.0.push(TrailSegment {
                    start: map_point_to_bevy(&a),
                    end: map_point_to_bevy(&b),
                    color: scene_color(color),
                });
            }
            SceneCommand::FollowCamera { target, eye } => {
                if let Ok(mut camera_transform) = camera_query.single_mut() {
                    *camera_transform = Transform::from_translation(map_point_to_bevy(&eye))
                        .looking_at(map_point_to_bevy(&target), Vec3::Y);
                }
            }
        }
    }
}

fn spawn_ghost_vehicle(
    commands: &mut Commands,
    assets: &MarkerAssets,
    position: &Point3<f64>,
    orientation: &UnitQuaternion<f64>,
) {
    commands.spawn((
        Name::new("Ghost Vehicle"),
        GhostMarker,
        MapMarker,
        Mesh3d(assets.vehicle_mesh.clone()),
        MeshMaterial3d(assets.ghost_vehicle_material.clone()),
        map_pose_to_bevy_transform(position, orientation),
    ));
}

fn draw_trail_segments(mut gizmos: Gizmos, trail: Res<TrailSegments>) {
    for segment in &trail.0 {
        gizmos.line(segment.start, segment.end, segment.color);
    }
}

/// A square grid on the water surface, centre lines in red.
fn draw_water_grid(mut gizmos: Gizmos) {
    let line_color = Color::srgba(0.6, 0.6, 0.6, 0.4);
    let center_color = Color::srgb(0.9, 0.1, 0.1);
    let steps = (GRID_HALF_EXTENT / GRID_SPACING) as i32;

    for i in -steps..=steps {
        let offset = i as f32 * GRID_SPACING;
        let color = if i == 0 { center_color } else { line_color };
        gizmos.line(
            Vec3::new(offset, 0.0, -GRID_HALF_EXTENT),
            Vec3::new(offset, 0.0, GRID_HALF_EXTENT),
            color,
        );
        gizmos.line(
            Vec3::new(-GRID_HALF_EXTENT, 0.0, offset),
            Vec3::new(GRID_HALF_EXTENT, 0.0, offset),
            color,
        );
    }
}

/// Where the north arrow starts: on the surface next to the vehicle.
fn north_arrow_start(vehicle: Option<&Transform>) -> Vec3 {
    let beside = Vec3::new(1.0, 0.0, 0.0);
    match vehicle {
        Some(transform) => Vec3::new(transform.translation.x, 0.0, transform.translation.z) + beside,
        None => beside,
    }
}

/// A compass arrow on the water surface pointing to map north.
fn draw_north_indicator(
    mut gizmos: Gizmos,
    vehicle_query: Query<&Transform, With<VehicleMarker>>,
) {
    let start = north_arrow_start(vehicle_query.iter().next());
    let north = map_vector_to_bevy(&Vector3::y()) * NORTH_ARROW_LENGTH;
    gizmos.arrow(start, start + north, Color::srgb(0.2, 0.6, 1.0));
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_buoy_disc_lies_flat_on_the_water() {
        let transform = buoy_transform(&Point3::new(2.0, 1.0, 0.01), 1.5);
        // The circle's normal (+Z) must end up pointing up.
        let normal = transform.rotation * Vec3::Z;
        assert_abs_diff_eq!(normal.y, 1.0, epsilon = 1e-5);
        assert_abs_diff_eq!(transform.scale.x, 1.5);
        assert_abs_diff_eq!(transform.translation.x, 2.0);
        assert_abs_diff_eq!(transform.translation.z, -1.0);
    }

    #[test]
    fn test_north_arrow_follows_the_vehicle_on_the_surface() {
        let vehicle = Transform::from_xyz(3.0, -2.0, -4.0);
        let start = north_arrow_start(Some(&vehicle));
        assert_abs_diff_eq!(start.x, 4.0);
        assert_abs_diff_eq!(start.y, 0.0);
        assert_abs_diff_eq!(start.z, -4.0);

        let north = map_vector_to_bevy(&Vector3::y());
        assert_abs_diff_eq!(north.z, -1.0);
    }

    fn run_app() -> App {
        let mut app = App::new();
        app.add_plugins(MinimalPlugins)
            .add_plugins(bevy::state::app::StatesPlugin)
            .init_state::<crate::visualization::core::app_state::AppState>()
            .insert_resource(VizConfig::default())
            .init_resource::<TrailSegments>()
            .add_plugins(crate::visualization::plugins::tracking::TrackingPlugin)
            .add_systems(Update, clear_scene_on_new_run.after(MapSet::Tracking));
        app.update();
        app
    }

    fn leave_previous_run_on_screen(app: &mut App) {
        app.world_mut().spawn((GhostMarker, MapMarker));
        app.world_mut()
            .resource_mut::<TrailSegments>()
            .0
            .push(TrailSegment {
                start: Vec3::ZERO,
                end: Vec3::X,
                color: Color::WHITE,
            });
    }

    fn marker_count(app: &mut App) -> usize {
        app.world_mut()
            .query_filtered::<Entity, With<MapMarker>>()
            .iter(app.world())
            .count()
    }

    #[test]
    fn test_restart_clears_the_previous_run() {
        let mut app = run_app();
        let origin = VizConfig::default().map.origin;
        app.world_mut().send_event(StartTrackingEvent(origin));
        app.update();

        leave_previous_run_on_screen(&mut app);
        app.world_mut().send_event(StartTrackingEvent(origin));
        app.update();

        assert!(app.world().resource::<TrailSegments>().0.is_empty());
        assert_eq!(marker_count(&mut app), 0);
    }

    #[test]
    fn test_reset_clears_the_scene() {
        let mut app = run_app();
        leave_previous_run_on_screen(&mut app);
        app.world_mut().send_event(ResetMapEvent);
        app.update();

        assert!(app.world().resource::<TrailSegments>().0.is_empty());
        assert_eq!(marker_count(&mut app), 0);
    }

    #[test]
    fn test_scene_color_is_carried_over() {
        let color = scene_color(SceneColor::VEHICLE_TRAIL).to_srgba();
        assert_abs_diff_eq!(color.red, 1.0);
        assert_abs_diff_eq!(color.green, 1.0);
        assert_abs_diff_eq!(color.blue, 0.0);
    }
}
