use anyhow::Context;
use bevy::{app::AppExit, prelude::*, window::PrimaryWindow};

use island_walk::{
    grid::ElevationGrid,
    meshing::build_terrain_mesh,
    nav::{Command as NavCommand, Walker},
    sky::{build_ornament_mesh, sky_color, OrnamentSpin, Sun, ORNAMENT_SPIN_STEP},
};

/// Whitespace-separated `width height` header followed by row-major integer
/// elevation samples.
const ELEVATION_FILE: &str = "honolulu.raw";

#[derive(Component)]
struct WalkerCamera;

#[derive(Component)]
struct SunLight;

fn main() -> anyhow::Result<()> {
    let grid = ElevationGrid::from_path(ELEVATION_FILE)
        .with_context(|| format!("loading elevation grid from {ELEVATION_FILE}"))?;

    print_directions();

    let walker = Walker::new(grid.width());
    let sun = Sun::new(grid.width());

    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Island Walk".into(),
                resolution: (512.0, 512.0).into(),
                ..default()
            }),
            ..default()
        }))
        .insert_resource(ClearColor(sky_color(sun.position.z)))
        .insert_resource(grid)
        .insert_resource(walker)
        .insert_resource(sun)
        .add_startup_system(setup_scene)
        .add_system(keyboard_input)
        .add_system(sync_camera.after(keyboard_input))
        .add_system(spin_ornament)
        .add_system(orbit_sun)
        .run();

    Ok(())
}

fn setup_scene(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    grid: Res<ElevationGrid>,
    walker: Res<Walker>,
    sun: Res<Sun>,
) {
    let terrain = build_terrain_mesh(&grid).into_render_mesh();
    commands.spawn(PbrBundle {
        mesh: meshes.add(terrain),
        material: materials.add(StandardMaterial {
            base_color: Color::WHITE,
            perceptual_roughness: 0.9,
            ..default()
        }),
        ..default()
    });

    let ornament = build_ornament_mesh(&mut rand::thread_rng());
    commands.spawn((
        PbrBundle {
            mesh: meshes.add(ornament),
            material: materials.add(StandardMaterial {
                base_color: Color::WHITE,
                unlit: true,
                ..default()
            }),
            ..default()
        },
        OrnamentSpin::default(),
    ));

    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 0.3,
    });
    commands.spawn((
        PointLightBundle {
            point_light: PointLight {
                intensity: 800.0,
                range: 40.0,
                shadows_enabled: false,
                ..default()
            },
            transform: Transform::from_translation(sun.position),
            ..default()
        },
        SunLight,
    ));

    commands.spawn((
        Camera3dBundle {
            projection: Projection::Perspective(PerspectiveProjection {
                fov: 45.0_f32.to_radians(),
                near: 0.002,
                far: 20.0,
                ..default()
            }),
            transform: camera_transform(&walker),
            ..default()
        },
        WalkerCamera,
    ));
}

fn camera_transform(walker: &Walker) -> Transform {
    Transform::from_translation(walker.eye).looking_at(walker.at, walker.up)
}

/// One key press is one discrete navigation command; the eye re-snaps to the
/// ground after every key event, mapped or not.
fn keyboard_input(
    keys: Res<Input<KeyCode>>,
    windows: Query<&Window, With<PrimaryWindow>>,
    grid: Res<ElevationGrid>,
    mut walker: ResMut<Walker>,
    mut exit: EventWriter<AppExit>,
) {
    if keys.just_pressed(KeyCode::Q) || keys.just_pressed(KeyCode::Escape) {
        exit.send(AppExit);
        return;
    }

    let window = windows.single();
    let size = (window.width(), window.height());

    for key in keys.get_just_pressed() {
        match NavCommand::from_key(*key) {
            Some(command) => walker.apply(command, size, &grid),
            None => walker.snap_to_ground(&grid),
        }
    }
}

fn sync_camera(walker: Res<Walker>, mut cameras: Query<&mut Transform, With<WalkerCamera>>) {
    if !walker.is_changed() {
        return;
    }
    for mut transform in &mut cameras {
        *transform = camera_transform(&walker);
    }
}

fn spin_ornament(mut ornaments: Query<(&mut OrnamentSpin, &mut Transform)>) {
    for (mut spin, mut transform) in &mut ornaments {
        spin.angle += ORNAMENT_SPIN_STEP;
        transform.rotation = Quat::from_rotation_z(spin.angle);
    }
}

fn orbit_sun(
    mut sun: ResMut<Sun>,
    mut clear_color: ResMut<ClearColor>,
    mut lights: Query<&mut Transform, With<SunLight>>,
) {
    sun.advance();
    clear_color.0 = sky_color(sun.position.z);
    for mut transform in &mut lights {
        transform.translation = sun.position;
    }
}

fn print_directions() {
    println!();
    println!("Welcome to the island!");
    println!("Keyboard Controls:");
    println!("I - Walk Forward");
    println!("K - Walk Backward");
    println!("J - Rotate Left");
    println!("L - Rotate Right");
    println!();
    println!("W - Look Up");
    println!("S - Look Down");
    println!("A - Turn Left");
    println!("D - Turn Right");
    println!();
    println!("Space Bar Resets the Scene");
    println!("Q or Esc Quits the Program");
}
