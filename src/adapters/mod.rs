//! Adapter implementations for port traits
//!
//! - `memory/` - In-process runtime holding projects and settings in memory

pub mod memory;
