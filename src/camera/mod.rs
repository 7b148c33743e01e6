pub mod controller;
pub mod rig;

pub use controller::OrbitInputEnabled;
pub use rig::{
    OrbitRig,
    OrbitSettings,
};
