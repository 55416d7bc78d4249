//! Blank-page padding
//!
//! Every block must hold exactly the same number of pages, so the page
//! sequence is extended with blanks until its length is a multiple of the
//! block size. Cover blanks, if any, are added by the caller first.

use std::iter;

use super::{Block, PageSlot, partition};
use crate::types::{ImposeError, Result};

/// Wrap source pages as slots, surrounded by `front` and `back` blanks.
///
/// The blanks reserve room for a hardcover glued to the first and last pages.
pub fn with_cover_blanks<P>(
    pages: impl IntoIterator<Item = P>,
    front: usize,
    back: usize,
) -> Vec<PageSlot<P>> {
    iter::repeat_with(|| PageSlot::Blank)
        .take(front)
        .chain(pages.into_iter().map(PageSlot::Page))
        .chain(iter::repeat_with(|| PageSlot::Blank).take(back))
        .collect()
}

/// Number of blanks needed to bring `len` up to a multiple of `block_size`
pub fn padding_needed(len: usize, block_size: usize) -> usize {
    if block_size == 0 {
        return 0;
    }
    match len % block_size {
        0 => 0,
        remainder => block_size - remainder,
    }
}

/// Append blanks so the length is an exact multiple of `block_size`.
///
/// Sequences that already fit are returned unchanged, which makes padding
/// idempotent. Only the tail is extended.
pub fn pad<P>(mut slots: Vec<PageSlot<P>>, block_size: usize) -> Vec<PageSlot<P>> {
    let missing = padding_needed(slots.len(), block_size);
    slots.extend(iter::repeat_with(|| PageSlot::Blank).take(missing));
    slots
}

fn too_many_slots(source_pages: usize, front: usize, back: usize) -> ImposeError {
    ImposeError::Config(format!(
        "Too many slots: {} pages with {} front and {} back cover blanks",
        source_pages, front, back
    ))
}

/// The padded page sequence of a run, with the counts that produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaddingPlan {
    /// Cover blanks, source pages and tail padding, in reading order
    pub slots: Vec<PageSlot<usize>>,
    /// Pages per block
    pub block_size: usize,
    /// Pages in the source document
    pub source_pages: usize,
    /// Blanks reserved at the front and back for the cover
    pub cover_blanks: usize,
    /// Blanks appended to complete the last block
    pub padding_blanks: usize,
}

impl PaddingPlan {
    /// Plan the slots for `source_pages` pages split into blocks of `block_size`.
    ///
    /// Fails with [`ImposeError::Config`] when the padded length does not fit
    /// in memory addressing.
    pub fn new(source_pages: usize, block_size: usize, front: usize, back: usize) -> Result<Self> {
        let cover_blanks = front
            .checked_add(back)
            .ok_or_else(|| too_many_slots(source_pages, front, back))?;
        let before = source_pages
            .checked_add(cover_blanks)
            .ok_or_else(|| too_many_slots(source_pages, front, back))?;
        let padding_blanks = padding_needed(before, block_size);
        let total = before
            .checked_add(padding_blanks)
            .ok_or_else(|| too_many_slots(source_pages, front, back))?;

        let slots = pad(with_cover_blanks(0..source_pages, front, back), block_size);
        debug_assert_eq!(slots.len(), total);

        log::debug!(
            "Planned {} slots for {} pages ({} cover blanks, {} padding blanks, block size {})",
            slots.len(),
            source_pages,
            cover_blanks,
            padding_blanks,
            block_size
        );

        Ok(Self {
            slots,
            block_size,
            source_pages,
            cover_blanks,
            padding_blanks,
        })
    }

    pub fn block_count(&self) -> usize {
        if self.block_size == 0 {
            return 0;
        }
        self.slots.len() / self.block_size
    }

    pub fn blocks(&self) -> Result<Vec<Block<'_, usize>>> {
        partition(&self.slots, self.block_size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cover_blanks_surround_pages() {
        let slots = with_cover_blanks(['a', 'b'], 2, 1);
        assert_eq!(
            slots,
            vec![
                PageSlot::Blank,
                PageSlot::Blank,
                PageSlot::Page('a'),
                PageSlot::Page('b'),
                PageSlot::Blank,
            ]
        );
    }

    #[test]
    fn test_padding_needed() {
        assert_eq!(padding_needed(0, 20), 0);
        assert_eq!(padding_needed(20, 20), 0);
        assert_eq!(padding_needed(21, 20), 19);
        assert_eq!(padding_needed(46, 20), 14);
        assert_eq!(padding_needed(7, 0), 0);
    }

    #[test]
    fn test_plan_counts() {
        // 42 pages + 2 + 2 cover blanks = 46, padded to 60
        let plan = PaddingPlan::new(42, 20, 2, 2).unwrap();
        assert_eq!(plan.slots.len(), 60);
        assert_eq!(plan.cover_blanks, 4);
        assert_eq!(plan.padding_blanks, 14);
        assert_eq!(plan.block_count(), 3);
        assert_eq!(plan.slots[2], PageSlot::Page(0));
        assert_eq!(plan.slots[43], PageSlot::Page(41));
        assert!(plan.slots[44..].iter().all(PageSlot::is_blank));
    }

    #[test]
    fn test_plan_rejects_overflowing_counts() {
        assert!(matches!(
            PaddingPlan::new(10, 20, usize::MAX, 0),
            Err(ImposeError::Config(_))
        ));
        assert!(matches!(
            PaddingPlan::new(10, 20, 1, usize::MAX),
            Err(ImposeError::Config(_))
        ));
        assert!(matches!(
            PaddingPlan::new(usize::MAX - 3, 20, 2, 0),
            Err(ImposeError::Config(_))
        ));
    }
}
