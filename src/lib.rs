use bevy::prelude::*;

pub use camera::{
    OrbitInputEnabled,
    OrbitRig,
    OrbitSettings,
};
pub use cloud::{
    PointCloud,
    SyntheticCloudConfig,
    random_ring_cloud,
    synthetic_ring_cloud,
    target_extent_for_viewport,
};
pub use io::{
    PlyCloudError,
    choose_candidate,
};
#[cfg(feature = "io_ply")]
pub use io::loader::{
    PointCloudLoader,
    PointCloudLoaderSettings,
};
pub use render::{
    PointCloudBackdrop,
    point_mesh,
};

pub mod camera;
pub mod cloud;
pub mod io;
pub mod render;
pub mod utils;


pub struct CloudBackdropPlugin;

impl Plugin for CloudBackdropPlugin {
    fn build(&self, app: &mut App) {
        app.init_asset::<PointCloud>();
        app.register_asset_reflect::<PointCloud>();

        #[cfg(feature = "io_ply")]
        app.init_asset_loader::<PointCloudLoader>();

        app.init_resource::<OrbitInputEnabled>();
        app.register_type::<OrbitInputEnabled>();
        app.register_type::<OrbitRig>();
        app.register_type::<PointCloudBackdrop>();

        app.add_systems(
            Update,
            (
                camera::controller::sync_orbit_enabled,
                camera::controller::orbit_pointer_input,
                camera::controller::orbit_touch_input,
                camera::controller::orbit_wheel_zoom,
                camera::controller::handle_viewport_resize,
                camera::controller::orbit_update,
            )
                .chain(),
        );

        app.add_systems(
            Update,
            (
                render::substitute_failed_clouds,
                render::attach_cloud_meshes,
                render::pulse_backdrop_opacity,
            )
                .chain(),
        );
    }
}


/// Removes every backdrop entity in one pass; the asset system drops the
/// geometry and material with the last handle. Safe to run when nothing was
/// ever spawned.
pub fn despawn_backdrop(
    mut commands: Commands,
    backdrops: Query<Entity, With<PointCloudBackdrop>>,
    rigs: Query<Entity, With<OrbitRig>>,
) {
    for entity in backdrops.iter().chain(rigs.iter()) {
        commands.entity(entity).despawn();
    }
}
