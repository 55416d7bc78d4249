//! Page sequencing for saddle-stitch booklets
//!
//! This module holds the pure calculations of the pipeline:
//! - Padding (cover blanks and tail blanks)
//! - Block partitioning
//! - Signature ordering (which page goes on which sheet face)

mod blocks;
mod padding;
mod signature;
mod types;

pub use blocks::*;
pub use padding::*;
pub use signature::*;
pub use types::*;
