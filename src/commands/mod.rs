//! Command implementations

mod serve;

pub use serve::serve;
