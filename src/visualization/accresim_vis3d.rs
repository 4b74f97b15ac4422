use bevy::log::LogPlugin;
use bevy::math::primitives::{Cuboid, InfinitePlane3d, Sphere};
use bevy::prelude::*;
use bevy::utils::HashMap;
use bevy::window::PrimaryWindow;

use crate::simulation::bounds::Ray;
use crate::simulation::geometry::GeometryHandle;
use crate::simulation::registry::Tier;
use crate::simulation::sandbox::Sandbox;
use crate::simulation::states::NVec3;

/// Component tagging each scene entity with the geometry it renders
#[derive(Component)]
struct BodyHandle3(pub GeometryHandle);

/// Reverse index from geometry handles to their scene entities, kept in
/// lockstep with the pool by the advance system
#[derive(Resource, Default)]
struct SceneIndex {
    entities: HashMap<GeometryHandle, Entity>,
}

/// World position of the sun
const SUN_POSITION: Vec3 = Vec3::new(100.0, 0.0, 0.0);

/// Visual radius of the sun sphere
const SUN_RADIUS: f32 = 4.0;

/// Closest the camera tether ever gets to the origin
const CAMERA_DISTANCE_MINIMUM: f32 = 5.0;

/// Entrypoint: hand a built sandbox to the Bevy 3D viewer
pub fn run_3d(sandbox: Sandbox) {
    log::info!(
        "run_3d: starting viewer with {} loose bodies and {} planet members",
        sandbox.pool.len(),
        sandbox.planet.len()
    );

    App::new()
        .insert_resource(sandbox)
        .init_resource::<SceneIndex>()
        // env_logger already owns log output, so Bevy's own LogPlugin stays off
        .add_plugins(DefaultPlugins.build().disable::<LogPlugin>())
        .add_systems(Startup, setup_3d)
        .add_systems(
            Update,
            (
                drag_input_3d,
                advance_sandbox_3d,
                sync_transforms_3d,
                camera_tether_3d,
            )
                .chain(),
        )
        .run();
}

/// Startup system: camera, sun, lights, and one entity per body already in
/// the scene (the planet seed plus the scenario's fixed placements)
fn setup_3d(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    sandbox: Res<Sandbox>,
    mut index: ResMut<SceneIndex>,
) {
    // Camera looking at the origin from just outside the starting planet
    commands.spawn(Camera3dBundle {
        camera: Camera {
            clear_color: ClearColorConfig::Custom(Color::srgb(0.0, 0.0, 0.0)), // pure black
            ..Default::default()
        },
        transform: Transform::from_xyz(0.0, 1.5, CAMERA_DISTANCE_MINIMUM)
            .looking_at(Vec3::ZERO, Vec3::Y),
        ..Default::default()
    });

    // The sun: an emissive sphere off along +X with a point light inside it
    commands.spawn(PbrBundle {
        mesh: meshes.add(Sphere::new(SUN_RADIUS).mesh()),
        material: materials.add(StandardMaterial {
            base_color: Color::srgb(1.0, 0.82, 0.39),
            emissive: LinearRgba::rgb(8.0, 6.0, 2.4),
            ..Default::default()
        }),
        transform: Transform::from_translation(SUN_POSITION),
        ..Default::default()
    });
    commands.spawn(PointLightBundle {
        point_light: PointLight {
            intensity: 1.0e8,
            range: 500.0,
            ..Default::default()
        },
        transform: Transform::from_translation(SUN_POSITION),
        ..Default::default()
    });
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 150.0,
    });

    // One entity per geometry already registered in the scene
    for member in sandbox.planet.members() {
        let entity = spawn_body_entity(
            &mut commands,
            &mut meshes,
            &mut materials,
            &sandbox,
            member.geometry,
            member.position,
            member.rotation,
        );
        index.entities.insert(member.geometry, entity);
    }
    for body in &sandbox.pool.bodies {
        let entity = spawn_body_entity(
            &mut commands,
            &mut meshes,
            &mut materials,
            &sandbox,
            body.geometry,
            body.position,
            body.rotation,
        );
        index.entities.insert(body.geometry, entity);
    }
}

/// Mouse input → drag state. Left press picks the nearest loose body under
/// the cursor, movement retargets it on the plane through the origin facing
/// the camera, release lets go.
fn drag_input_3d(
    buttons: Res<ButtonInput<MouseButton>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    cameras: Query<(&Camera, &GlobalTransform)>,
    mut sandbox: ResMut<Sandbox>,
) {
    let Ok(window) = windows.get_single() else {
        return;
    };
    let Ok((camera, camera_transform)) = cameras.get_single() else {
        return;
    };
    let sb = &mut *sandbox;

    if buttons.just_released(MouseButton::Left) {
        sb.drag.end();
    }
    let Some(cursor) = window.cursor_position() else {
        return;
    };
    let Some(ray) = camera.viewport_to_world(camera_transform, cursor) else {
        return;
    };

    if buttons.just_pressed(MouseButton::Left) {
        let pick = Ray {
            origin: to_sim(ray.origin),
            direction: to_sim(*ray.direction),
        };
        sb.drag.begin(&pick, &sb.pool, &sb.geometry);
    }
    if sb.drag.mouse_down {
        let view = camera_transform.compute_transform();
        if let Some(t) = ray.intersect_plane(Vec3::ZERO, InfinitePlane3d::new(view.forward())) {
            sb.drag.set_target(to_sim(ray.get_point(t)));
        }
    }
}

/// Per-frame sandbox advancement, mirrored into entity spawns/despawns
fn advance_sandbox_3d(
    time: Res<Time>,
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    mut sandbox: ResMut<Sandbox>,
    mut index: ResMut<SceneIndex>,
) {
    let report = sandbox.update(time.delta_seconds() as f64);

    let sb = &*sandbox;
    for &(id, handle) in &report.spawned {
        // A body can merge on the very frame it spawned, in which case its
        // transform now lives on the planet.
        let placed = sb
            .pool
            .get(id)
            .map(|b| (b.position, b.rotation))
            .or_else(|| {
                sb.planet
                    .members()
                    .iter()
                    .find(|m| m.geometry == handle)
                    .map(|m| (m.position, m.rotation))
            });
        if let Some((position, rotation)) = placed {
            let entity = spawn_body_entity(
                &mut commands,
                &mut meshes,
                &mut materials,
                sb,
                handle,
                position,
                rotation,
            );
            index.entities.insert(handle, entity);
        }
    }
    for &(_, handle) in &report.despawned {
        if let Some(entity) = index.entities.remove(&handle) {
            commands.entity(entity).despawn();
        }
    }
    // Merged bodies keep their entity; it simply stops moving because the
    // body left the pool.
}

/// Copy pool transforms onto scene entities. Entities whose geometry is no
/// longer in the pool (planet members) stay where they froze.
fn sync_transforms_3d(sandbox: Res<Sandbox>, mut query: Query<(&BodyHandle3, &mut Transform)>) {
    let mut live: HashMap<GeometryHandle, (NVec3, NVec3)> = HashMap::default();
    for body in &sandbox.pool.bodies {
        live.insert(body.geometry, (body.position, body.rotation));
    }
    for (BodyHandle3(handle), mut transform) in &mut query {
        if let Some(&(position, rotation)) = live.get(handle) {
            *transform = body_transform(position, rotation);
        }
    }
}

/// Back the camera off as the planet grows, following the drag tether
/// distance of three planet radii.
fn camera_tether_3d(sandbox: Res<Sandbox>, mut cameras: Query<&mut Transform, With<Camera>>) {
    let tether = (sandbox.drag.max_drag_distance as f32).max(CAMERA_DISTANCE_MINIMUM);
    for mut transform in &mut cameras {
        let direction = transform.translation.normalize_or_zero();
        if direction != Vec3::ZERO {
            transform.translation = direction * tether;
        }
    }
}

fn spawn_body_entity(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    sandbox: &Sandbox,
    handle: GeometryHandle,
    position: NVec3,
    rotation: NVec3,
) -> Entity {
    // Bodies render as proxy boxes matching their collision bounds; asset
    // meshes are outside this viewer's job.
    let size = sandbox.geometry.local_bounds(handle).size();
    commands
        .spawn((
            PbrBundle {
                mesh: meshes.add(Cuboid::new(size.x as f32, size.y as f32, size.z as f32).mesh()),
                material: materials.add(StandardMaterial {
                    base_color: tier_color(sandbox.geometry.tier(handle)),
                    ..Default::default()
                }),
                transform: body_transform(position, rotation),
                ..Default::default()
            },
            BodyHandle3(handle),
        ))
        .id()
}

fn body_transform(position: NVec3, rotation: NVec3) -> Transform {
    Transform {
        translation: to_render(position),
        rotation: Quat::from_euler(
            EulerRot::XYZ,
            rotation.x as f32,
            rotation.y as f32,
            rotation.z as f32,
        ),
        ..Default::default()
    }
}

fn tier_color(tier: Tier) -> Color {
    match tier {
        Tier::Small => Color::srgb(0.78, 0.72, 0.58),
        Tier::Medium => Color::srgb(0.62, 0.54, 0.44),
        Tier::Large => Color::srgb(0.52, 0.47, 0.52),
        Tier::ExtraLarge => Color::srgb(0.44, 0.53, 0.64),
    }
}

fn to_sim(v: Vec3) -> NVec3 {
    NVec3::new(v.x as f64, v.y as f64, v.z as f64)
}

fn to_render(v: NVec3) -> Vec3 {
    Vec3::new(v.x as f32, v.y as f32, v.z as f32)
}
