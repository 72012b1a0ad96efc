//! Shared gitlink data models consumed by the core library and effect crates.

pub mod link;
pub mod repository;

pub use link::*;
pub use repository::*;
