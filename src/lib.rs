//! Bookshelf application library
//!
//! Hosts the application modules mounted by the `bookshelf` binary.

pub mod modules;

/// Re-export commonly used types
pub use modules::*;
