//! Filesystem layer for the scaffold generator
//!
//! Provides normalized paths, atomic writes for synthesized artifacts,
//! content checksums and format-agnostic config loading.

pub mod checksum;
pub mod config;
pub mod constants;
pub mod error;
pub mod io;
pub mod path;

pub use config::ConfigStore;
pub use constants::ScaffoldPath;
pub use error::{Error, Result};
pub use io::WriteOutcome;
pub use path::NormalizedPath;
