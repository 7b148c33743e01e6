use bevy::{
    asset::LoadState,
    prelude::*,
    render::{
        mesh::PrimitiveTopology,
        render_asset::RenderAssetUsages,
    },
};

use crate::cloud::{
    PointCloud,
    SyntheticCloudConfig,
    random_ring_cloud,
};


/// Marks an entity as the point-cloud backdrop. The mesh and material are
/// attached once the referenced cloud is available.
#[derive(Component, Clone, Debug, Reflect)]
#[reflect(Component)]
#[require(Transform, Visibility)]
pub struct PointCloudBackdrop {
    pub cloud: Handle<PointCloud>,
    /// uniform tint applied when the asset carries no vertex colors
    pub tint: Color,
    pub base_alpha: f32,
    pub pulse_amplitude: f32,
    /// opacity oscillation rate, radians per second
    pub pulse_rate: f32,
}

impl Default for PointCloudBackdrop {
    fn default() -> Self {
        Self {
            cloud: Handle::default(),
            tint: Color::srgb(0.62, 0.66, 0.74),
            base_alpha: 0.85,
            pulse_amplitude: 0.08,
            pulse_rate: 0.4,
        }
    }
}


/// Builds a point-list mesh from a cloud; vertex colors are attached when
/// present.
pub fn point_mesh(cloud: &PointCloud) -> Mesh {
    let mut mesh = Mesh::new(PrimitiveTopology::PointList, RenderAssetUsages::default());

    let positions: Vec<[f32; 3]> = cloud
        .positions
        .iter()
        .map(|position| position.to_array())
        .collect();
    mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);

    if let Some(colors) = &cloud.colors {
        let colors: Vec<[f32; 4]> = colors
            .iter()
            .map(|color| [color[0], color[1], color[2], 1.0])
            .collect();
        mesh.insert_attribute(Mesh::ATTRIBUTE_COLOR, colors);
    }

    mesh
}

pub(crate) fn attach_cloud_meshes(
    mut commands: Commands,
    mut events: EventReader<AssetEvent<PointCloud>>,
    clouds: Res<Assets<PointCloud>>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    backdrops: Query<(Entity, &PointCloudBackdrop)>,
) {
    for event in events.read() {
        let (AssetEvent::Added { id } | AssetEvent::Modified { id }) = event else {
            continue;
        };

        for (entity, backdrop) in &backdrops {
            if backdrop.cloud.id() != *id {
                continue;
            }
            let Some(cloud) = clouds.get(*id) else {
                continue;
            };

            // vertex colors multiply base_color, so tint only colorless clouds
            let base_color = if cloud.colors.is_some() {
                Color::WHITE
            } else {
                backdrop.tint
            };

            info!("backdrop cloud ready: {} points", cloud.len());

            commands.entity(entity).insert((
                Mesh3d(meshes.add(point_mesh(cloud))),
                MeshMaterial3d(materials.add(StandardMaterial {
                    base_color: base_color.with_alpha(backdrop.base_alpha),
                    unlit: true,
                    alpha_mode: AlphaMode::Blend,
                    ..default()
                })),
            ));
        }
    }
}

/// A failed fetch is substituted, not retried: the backdrop degrades to the
/// synthetic ring without surfacing an error.
pub(crate) fn substitute_failed_clouds(
    asset_server: Res<AssetServer>,
    mut clouds: ResMut<Assets<PointCloud>>,
    mut backdrops: Query<&mut PointCloudBackdrop>,
) {
    for mut backdrop in &mut backdrops {
        let id = backdrop.cloud.id();
        if clouds.contains(id) {
            continue;
        }

        if matches!(asset_server.get_load_state(id), Some(LoadState::Failed(_))) {
            warn!("point-cloud asset failed to load, substituting synthetic ring");
            backdrop.cloud = clouds.add(random_ring_cloud(&SyntheticCloudConfig::default()));
        }
    }
}

pub(crate) fn pulse_backdrop_opacity(
    time: Res<Time>,
    backdrops: Query<(&PointCloudBackdrop, &MeshMaterial3d<StandardMaterial>)>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    for (backdrop, material_handle) in &backdrops {
        if backdrop.pulse_amplitude == 0.0 {
            continue;
        }
        let Some(material) = materials.get_mut(&material_handle.0) else {
            continue;
        };

        let alpha = backdrop.base_alpha
            + backdrop.pulse_amplitude * (time.elapsed_secs() * backdrop.pulse_rate).sin();
        material.base_color.set_alpha(alpha.clamp(0.0, 1.0));
    }
}
