use rand::{
    Rng,
    seq::SliceRandom,
};
use thiserror::Error;

#[cfg(feature = "io_ply")]
pub mod loader;
#[cfg(feature = "io_ply")]
pub mod ply;


#[derive(Debug, Error)]
pub enum PlyCloudError {
    #[error("io error while reading point cloud: {0}")]
    Io(#[from] std::io::Error),

    #[error("vertex element is missing x/y/z position properties")]
    MissingProperties,

    #[error("unsupported point-cloud format: {0}")]
    UnsupportedFormat(String),
}


/// One source asset is sampled uniformly from the candidate list at each
/// load.
pub fn choose_candidate<'a, R: Rng + ?Sized>(
    rng: &mut R,
    candidates: &[&'a str],
) -> Option<&'a str> {
    candidates.choose(rng).copied()
}
