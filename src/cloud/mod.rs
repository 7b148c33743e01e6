use bevy::prelude::*;

pub mod synthetic;

pub use synthetic::{
    SyntheticCloudConfig,
    random_ring_cloud,
    synthetic_ring_cloud,
};


/// normalization target for narrow (mobile-class) viewports, scene units
pub const MOBILE_TARGET_EXTENT: f32 = 18.0;
/// normalization target for desktop-class viewports, scene units
pub const DESKTOP_TARGET_EXTENT: f32 = 26.0;

/// viewports narrower than this are treated as mobile-class
const MOBILE_VIEWPORT_WIDTH: f32 = 768.0;


/// Immutable point set in scene coordinates, with optional per-point linear
/// rgb. Built once by the loader or the synthetic generator, never mutated
/// afterwards.
#[derive(Asset, Clone, Debug, Reflect)]
pub struct PointCloud {
    pub positions: Vec<Vec3>,
    pub colors: Option<Vec<[f32; 3]>>,
}

impl PointCloud {
    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }

    /// center of mass of the point set
    pub fn centroid(&self) -> Vec3 {
        if self.positions.is_empty() {
            return Vec3::ZERO;
        }

        self.positions.iter().sum::<Vec3>() / self.positions.len() as f32
    }

    /// axis-aligned bounding box dimensions
    pub fn extents(&self) -> Vec3 {
        let Some(first) = self.positions.first() else {
            return Vec3::ZERO;
        };

        let mut min = *first;
        let mut max = *first;
        for position in &self.positions {
            min = min.min(*position);
            max = max.max(*position);
        }

        max - min
    }

    /// Translates the cloud to its centroid and uniformly rescales the
    /// largest bounding dimension to `target_extent`.
    pub fn normalize_to_extent(&mut self, target_extent: f32) {
        let centroid = self.centroid();
        let largest = self.extents().max_element();

        let scale = if largest > f32::EPSILON {
            target_extent / largest
        } else {
            1.0
        };

        for position in &mut self.positions {
            *position = (*position - centroid) * scale;
        }
    }

    /// One-time rotation reconciling scanner convention (lateral, forward,
    /// up) with the render convention (lateral, up, forward).
    pub fn swap_z_up_to_y_up(&mut self) {
        for position in &mut self.positions {
            *position = Vec3::new(position.x, position.z, -position.y);
        }
    }
}


/// Coarse device-class heuristic: narrow viewports trade cloud scale for
/// performance.
pub fn target_extent_for_viewport(width: f32) -> f32 {
    if width < MOBILE_VIEWPORT_WIDTH {
        MOBILE_TARGET_EXTENT
    } else {
        DESKTOP_TARGET_EXTENT
    }
}
