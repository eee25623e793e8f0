//! Crowd Simulation
//!
//! Procedural placement and per-frame animation of thousands of
//! audience members. Population happens once per venue/quality change
//! and fixes each instance's identity (position, scale, tones, phase);
//! the per-frame update derives transforms and accessory colors from
//! elapsed time alone, so any frame is reproducible from
//! `(instance id, time, frame index)`.

pub mod flicker;
pub mod palette;
pub mod record;
pub mod simulator;

pub use record::InstanceRecord;
pub use simulator::CrowdSimulator;
