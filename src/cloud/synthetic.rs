use std::f32::consts::TAU;

use bevy::prelude::*;
use rand::Rng;

use crate::cloud::PointCloud;


/// Shape of the procedural substitute cloud: an annular band around the
/// vertical axis with a height-based gradient between two accent colors.
#[derive(Clone, Debug, Reflect)]
pub struct SyntheticCloudConfig {
    pub count: usize,
    pub min_radius: f32,
    pub max_radius: f32,
    pub height: f32,
    pub lower_color: [f32; 3],
    pub upper_color: [f32; 3],
}

impl Default for SyntheticCloudConfig {
    fn default() -> Self {
        Self {
            count: 2400,
            min_radius: 14.0,
            max_radius: 26.0,
            height: 10.0,
            lower_color: [0.13, 0.72, 0.68],
            upper_color: [0.91, 0.34, 0.50],
        }
    }
}


/// Generates the fallback ring with an injected generator, so tests can pin
/// the distribution with a seeded rng.
pub fn synthetic_ring_cloud<R: Rng + ?Sized>(
    config: &SyntheticCloudConfig,
    rng: &mut R,
) -> PointCloud {
    let mut positions = Vec::with_capacity(config.count);
    let mut colors = Vec::with_capacity(config.count);

    for _ in 0..config.count {
        let angle = rng.gen_range(0.0..TAU);
        let radius = rng.gen_range(config.min_radius..=config.max_radius);
        let y = rng.gen_range(-config.height * 0.5..=config.height * 0.5);

        positions.push(Vec3::new(radius * angle.cos(), y, radius * angle.sin()));

        let t = (y / config.height) + 0.5;
        let blend = |low: f32, high: f32| low + (high - low) * t;
        colors.push([
            blend(config.lower_color[0], config.upper_color[0]),
            blend(config.lower_color[1], config.upper_color[1]),
            blend(config.lower_color[2], config.upper_color[2]),
        ]);
    }

    PointCloud {
        positions,
        colors: Some(colors),
    }
}

pub fn random_ring_cloud(config: &SyntheticCloudConfig) -> PointCloud {
    let mut rng = rand::thread_rng();

    synthetic_ring_cloud(config, &mut rng)
}


#[cfg(test)]
mod tests {
    use rand::{
        SeedableRng,
        rngs::StdRng,
    };

    use super::*;

    #[test]
    fn fallback_has_exact_count_and_radial_band() {
        let config = SyntheticCloudConfig::default();
        let mut rng = StdRng::seed_from_u64(7);
        let cloud = synthetic_ring_cloud(&config, &mut rng);

        assert_eq!(cloud.len(), config.count);

        for position in &cloud.positions {
            let radial = Vec2::new(position.x, position.z).length();
            assert!(radial >= config.min_radius - 1e-4);
            assert!(radial <= config.max_radius + 1e-4);
        }
    }

    #[test]
    fn gradient_stays_between_accent_colors() {
        let config = SyntheticCloudConfig::default();
        let mut rng = StdRng::seed_from_u64(11);
        let cloud = synthetic_ring_cloud(&config, &mut rng);

        let colors = cloud.colors.as_ref().unwrap();
        assert_eq!(colors.len(), config.count);

        for color in colors {
            for channel in 0..3 {
                let low = config.lower_color[channel].min(config.upper_color[channel]);
                let high = config.lower_color[channel].max(config.upper_color[channel]);
                assert!(color[channel] >= low - 1e-4);
                assert!(color[channel] <= high + 1e-4);
            }
        }
    }

    #[test]
    fn seeded_generation_is_deterministic() {
        let config = SyntheticCloudConfig::default();

        let mut a = StdRng::seed_from_u64(42);
        let mut b = StdRng::seed_from_u64(42);

        let first = synthetic_ring_cloud(&config, &mut a);
        let second = synthetic_ring_cloud(&config, &mut b);

        assert_eq!(first.positions, second.positions);
        assert_eq!(first.colors, second.colors);
    }
}
