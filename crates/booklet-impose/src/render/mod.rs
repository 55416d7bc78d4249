//! PDF assembly for imposed blocks
//!
//! This module handles all PDF-specific operations:
//! - Deep copying source pages into block documents
//! - Creating blank padding pages
//! - Reading page dimensions

mod copy;
mod page;

pub use copy::get_page_dimensions;
pub use page::assemble_block;
