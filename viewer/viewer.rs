use bevy::{
    app::AppExit,
    core_pipeline::tonemapping::Tonemapping,
    diagnostic::{
        DiagnosticsStore,
        FrameTimeDiagnosticsPlugin,
    },
    prelude::*,
};
use bevy_args::{
    Deserialize,
    Parser,
    Serialize,
    parse_args,
};
use bevy_inspector_egui::quick::WorldInspectorPlugin;

use bevy_cloud_backdrop::{
    CloudBackdropPlugin,
    OrbitInputEnabled,
    OrbitRig,
    PointCloud,
    PointCloudBackdrop,
    PointCloudLoaderSettings,
    SyntheticCloudConfig,
    choose_candidate,
    random_ring_cloud,
    target_extent_for_viewport,
    utils::{
        setup_hooks,
        surface_present,
    },
};


/// the two scan candidates shipped with the viewer, sampled at each launch
const CLOUD_CANDIDATES: [&str; 2] = [
    "clouds/atrium.ply",
    "clouds/plaza.ply",
];


#[derive(
    Clone,
    Debug,
    Resource,
    Serialize,
    Deserialize,
    Parser,
)]
#[command(about = "bevy_cloud_backdrop viewer", version, long_about = None)]
pub struct BackdropViewer {
    #[arg(long, default_value = "true")]
    pub editor: bool,

    #[arg(long, default_value = "true")]
    pub press_esc_close: bool,

    #[arg(long, default_value = "true")]
    pub show_fps: bool,

    #[arg(long, default_value = "1280.0")]
    pub width: f32,

    #[arg(long, default_value = "720.0")]
    pub height: f32,

    #[arg(long, default_value = "bevy_cloud_backdrop")]
    pub name: String,

    #[arg(long, default_value = "")]
    pub input_file: String,

    /// force a synthetic ring with this many points instead of loading a file
    #[arg(long, default_value = "0")]
    pub point_count: usize,

    #[arg(long, default_value = "#backdrop")]
    pub canvas: String,
}

impl Default for BackdropViewer {
    fn default() -> BackdropViewer {
        BackdropViewer {
            editor: true,
            press_esc_close: true,
            show_fps: true,
            width: 1280.0,
            height: 720.0,
            name: "bevy_cloud_backdrop".to_string(),
            input_file: "".to_string(),
            point_count: 0,
            canvas: "#backdrop".to_string(),
        }
    }
}


fn setup_backdrop(
    mut commands: Commands,
    args: Res<BackdropViewer>,
    asset_server: Res<AssetServer>,
    mut clouds: ResMut<Assets<PointCloud>>,
) {
    let cloud: Handle<PointCloud>;

    if args.point_count > 0 {
        info!("generating {} synthetic points", args.point_count);
        cloud = clouds.add(random_ring_cloud(&SyntheticCloudConfig {
            count: args.point_count,
            ..default()
        }));
    } else if !args.input_file.is_empty() {
        info!("loading {}", args.input_file);
        cloud = load_normalized(&asset_server, &args.input_file, args.width);
    } else {
        let mut rng = rand::thread_rng();
        let path = choose_candidate(&mut rng, &CLOUD_CANDIDATES).unwrap_or(CLOUD_CANDIDATES[0]);
        info!("loading {}", path);
        cloud = load_normalized(&asset_server, path, args.width);
    }

    commands.spawn((
        PointCloudBackdrop {
            cloud,
            ..default()
        },
        Name::new("backdrop_cloud"),
    ));

    commands.spawn((
        Camera3d::default(),
        Tonemapping::None,
        Projection::from(PerspectiveProjection {
            fov: 55.0_f32.to_radians(),
            near: 0.1,
            far: 400.0,
            ..default()
        }),
        OrbitRig::default(),
        Name::new("backdrop_camera"),
    ));
}

fn load_normalized(
    asset_server: &AssetServer,
    path: &str,
    viewport_width: f32,
) -> Handle<PointCloud> {
    let target_extent = target_extent_for_viewport(viewport_width);

    asset_server.load_with_settings(
        path.to_string(),
        move |settings: &mut PointCloudLoaderSettings| {
            settings.target_extent = target_extent;
        },
    )
}


/// Stand-in for the page's section tracker: Space toggles whether the
/// backdrop accepts orbit input.
fn toggle_orbit_input(
    keys: Res<ButtonInput<KeyCode>>,
    mut enabled: ResMut<OrbitInputEnabled>,
) {
    if keys.just_pressed(KeyCode::Space) {
        let next = !enabled.0;
        enabled.set(next);
        info!("orbit input {}", if next { "enabled" } else { "suspended" });
    }
}


fn viewer_app() {
    let args = parse_args::<BackdropViewer>();

    // no backdrop surface on the host page: degrade to nothing at all
    if !surface_present(&args.canvas) {
        return;
    }

    let mut app = App::new();

    #[cfg(target_arch = "wasm32")]
    let primary_window = Some(Window {
        canvas: Some(args.canvas.clone()),
        fit_canvas_to_parent: true,
        mode: bevy::window::WindowMode::Windowed,
        present_mode: bevy::window::PresentMode::AutoVsync,
        prevent_default_event_handling: true,
        title: args.name.clone(),
        ..default()
    });

    #[cfg(not(target_arch = "wasm32"))]
    let primary_window = Some(Window {
        fit_canvas_to_parent: true,
        mode: bevy::window::WindowMode::Windowed,
        present_mode: bevy::window::PresentMode::AutoVsync,
        prevent_default_event_handling: false,
        resolution: (args.width, args.height).into(),
        title: args.name.clone(),
        ..default()
    });

    app.insert_resource(ClearColor(Color::srgb_u8(9, 12, 18)));

    // must come before the asset plugin to claim the http(s) sources
    #[cfg(feature = "web_asset")]
    app.add_plugins(bevy_web_asset::WebAssetPlugin::default());

    app.add_plugins(
        DefaultPlugins
            .set(ImagePlugin::default_nearest())
            .set(WindowPlugin {
                primary_window,
                ..default()
            }),
    );

    if args.editor {
        app.add_plugins(WorldInspectorPlugin::new());
    }

    if args.press_esc_close {
        app.add_systems(Update, esc_close);
    }

    if args.show_fps {
        app.add_plugins(FrameTimeDiagnosticsPlugin::default());
        app.add_systems(Startup, fps_display_setup);
        app.add_systems(Update, fps_update_system);
    }

    app.insert_resource(args);

    app.add_plugins(CloudBackdropPlugin);
    app.add_systems(Startup, setup_backdrop);
    app.add_systems(Update, toggle_orbit_input);

    app.run();
}


pub fn esc_close(
    keys: Res<ButtonInput<KeyCode>>,
    mut exit: EventWriter<AppExit>,
) {
    if keys.just_pressed(KeyCode::Escape) {
        exit.write(AppExit::Success);
    }
}

fn fps_display_setup(mut commands: Commands) {
    commands.spawn((
        Text::new("fps: "),
        TextFont {
            font_size: 24.0,
            ..default()
        },
        TextColor(Color::WHITE),
        Node {
            position_type: PositionType::Absolute,
            bottom: Val::Px(5.0),
            left: Val::Px(15.0),
            ..default()
        },
        FpsText,
    ));
}

#[derive(Component)]
struct FpsText;

fn fps_update_system(
    diagnostics: Res<DiagnosticsStore>,
    mut query: Query<&mut Text, With<FpsText>>,
) {
    for mut text in &mut query {
        if let Some(value) = diagnostics
            .get(&FrameTimeDiagnosticsPlugin::FPS)
            .and_then(|fps| fps.smoothed())
        {
            text.0 = format!("fps: {value:.2}");
        }
    }
}


pub fn main() {
    setup_hooks();
    viewer_app();
}
