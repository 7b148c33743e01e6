use std::io::{
    BufReader,
    Cursor,
};

use bevy::{
    asset::{
        AssetLoader,
        LoadContext,
        io::Reader,
    },
    log::debug,
};
use serde::{
    Deserialize,
    Serialize,
};

use crate::{
    cloud::{
        DESKTOP_TARGET_EXTENT,
        PointCloud,
    },
    io::PlyCloudError,
};


/// Per-load normalization settings, picked by the host from its device-class
/// heuristic.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct PointCloudLoaderSettings {
    /// largest bounding dimension after normalization, scene units
    pub target_extent: f32,
    /// source uses the scanner Z-up convention and needs the one-time axis
    /// rotation into Y-up
    pub z_up: bool,
}

impl Default for PointCloudLoaderSettings {
    fn default() -> Self {
        Self {
            target_extent: DESKTOP_TARGET_EXTENT,
            z_up: true,
        }
    }
}


#[derive(Default)]
pub struct PointCloudLoader;

impl AssetLoader for PointCloudLoader {
    type Asset = PointCloud;
    type Settings = PointCloudLoaderSettings;
    type Error = PlyCloudError;

    async fn load(
        &self,
        reader: &mut dyn Reader,
        settings: &Self::Settings,
        load_context: &mut LoadContext<'_>,
    ) -> Result<Self::Asset, Self::Error> {
        let mut bytes = Vec::new();
        reader.read_to_end(&mut bytes).await?;

        match load_context.path().extension().and_then(|ext| ext.to_str()) {
            Some("ply") => {
                let cursor = Cursor::new(bytes);
                let mut buffered = BufReader::new(cursor);

                let mut cloud = crate::io::ply::parse_ply(&mut buffered)?;
                cloud.normalize_to_extent(settings.target_extent);
                if settings.z_up {
                    cloud.swap_z_up_to_y_up();
                }

                debug!(
                    "loaded {} points from {}",
                    cloud.len(),
                    load_context.path().display(),
                );

                Ok(cloud)
            }
            other => Err(PlyCloudError::UnsupportedFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }

    fn extensions(&self) -> &[&str] {
        &["ply"]
    }
}
