//! Lighting Rig
//!
//! Moving-head and laser fixture animation plus the shared per-frame
//! energy ("drop") state that keeps crowd and lighting intensity
//! correlated. Fixture state is plain data; the renderer reads it,
//! nothing here owns GPU resources.

pub mod energy;
pub mod rig;

pub use energy::EnergyState;
pub use rig::{Laser, LightingRig, MovingHead};
