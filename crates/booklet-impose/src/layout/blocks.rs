//! Block partitioning

use super::{Block, PageSlot};
use crate::types::{ImposeError, Result};

/// Split a padded slot sequence into consecutive blocks of `block_size`.
///
/// The sequence must already be padded; a trailing partial block is an
/// error, never silently dropped.
pub fn partition<P>(slots: &[PageSlot<P>], block_size: usize) -> Result<Vec<Block<'_, P>>> {
    if block_size == 0 {
        return Err(ImposeError::Config(
            "Block size must be greater than zero".to_string(),
        ));
    }

    if slots.len() % block_size != 0 {
        return Err(ImposeError::PartitionInvariant {
            slots: slots.len(),
            block_size,
        });
    }

    Ok(slots
        .chunks_exact(block_size)
        .enumerate()
        .map(|(index, slots)| Block { index, slots })
        .collect())
}
