//! Saddle-stitch page ordering
//!
//! A block of `n` pages is printed on `n / 4` sheets that are stacked,
//! folded in half and stitched along the fold. Each sheet carries two
//! pages from the outside of the block and two from the inside:
//!
//! **One sheet (4 pages):**
//! - Front: [4, 1] (left=4, right=1)
//! - Back: [2, 3] (left=2, right=3)
//!
//! **Two sheets (8 pages):**
//! - Sheet 1 front: [8, 1], back: [2, 7]
//! - Sheet 2 front: [6, 3], back: [4, 5]
//!
//! The order is produced by walking one pointer forward from the first
//! page and one backward from the last, one sheet per step.

use crate::constants::PAGES_PER_SHEET;
use crate::types::{ImposeError, Result};

use super::{Block, PageSlot, SheetFaces};

// =============================================================================
// Page Ordering
// =============================================================================

/// Calculate the print order for a block of `len` pages.
///
/// Returns 0-based indices into the block. For example, 4 pages yield
/// `[3, 0, 1, 2]`: the front of the sheet carries page 4 on the left and
/// page 1 on the right, the back carries pages 2 and 3.
pub fn imposition_order(len: usize) -> Result<Vec<usize>> {
    if len % PAGES_PER_SHEET != 0 {
        return Err(ImposeError::InvalidBlockLength { len });
    }

    let mut order = Vec::with_capacity(len);
    let mut left = 0;
    let mut right = len.saturating_sub(1);

    for _ in 0..len / PAGES_PER_SHEET {
        // Front: outer left, outer right
        order.push(right);
        order.push(left);
        left += 1;
        right -= 1;

        // Back: inner left, inner right
        order.push(left);
        order.push(right);
        left += 1;
        right -= 1;
    }

    Ok(order)
}

/// Rearrange a block into physical print order.
///
/// The result is a permutation of `block`: nothing is dropped or duplicated.
pub fn impose<T: Clone>(block: &[T]) -> Result<Vec<T>> {
    Ok(imposition_order(block.len())?
        .into_iter()
        .map(|index| block[index].clone())
        .collect())
}

impl<P: Clone> Block<'_, P> {
    /// Slots of this block in print order
    pub fn impose(&self) -> Result<Vec<PageSlot<P>>> {
        impose(self.slots)
    }
}

/// Group the print order of a block into sheets.
///
/// Useful for showing a binder which pages land on which sheet.
pub fn sheet_layout(len: usize) -> Result<Vec<SheetFaces<usize>>> {
    let order = imposition_order(len)?;
    Ok(order
        .chunks_exact(PAGES_PER_SHEET)
        .enumerate()
        .map(|(sheet, faces)| SheetFaces {
            sheet,
            front: [faces[0], faces[1]],
            back: [faces[2], faces[3]],
        })
        .collect())
}
