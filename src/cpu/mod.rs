//! CPU opponent for vs-cpu games.
//!
//! - `CpuMemory`: bounded recollection of revealed cards
//! - `CpuAgent`: picks reveals from memory with a configurable failure rate

pub mod memory;
pub mod agent;

pub use memory::CpuMemory;
pub use agent::{CpuAgent, CpuPlan};
