//! Layout data types for imposition
//!
//! These types represent the page sequence between loading the source
//! document and assembling the output blocks.

/// One position in the padded page sequence
///
/// `P` identifies a source page; in the imposition pipeline it is the
/// 0-based page index into the source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PageSlot<P> {
    /// A real page from the source document
    Page(P),
    /// A placeholder, replaced by an empty page of the document's size when assembled
    Blank,
}

impl<P> PageSlot<P> {
    pub fn is_blank(&self) -> bool {
        matches!(self, PageSlot::Blank)
    }

    /// The source page, if this slot holds one
    pub fn page(&self) -> Option<&P> {
        match self {
            PageSlot::Page(page) => Some(page),
            PageSlot::Blank => None,
        }
    }
}

/// A fixed-length run of slots that is folded and bound as one unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block<'a, P> {
    /// 0-based position of the block in the document
    pub index: usize,
    /// Slots of the block in reading order
    pub slots: &'a [PageSlot<P>],
}

impl<'a, P> Block<'a, P> {
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// 1-based block number, as used in output file names
    pub fn number(&self) -> usize {
        self.index + 1
    }

    pub fn blank_count(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_blank()).count()
    }
}

/// Which physical side of the printed sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SheetSide {
    /// Front of the sheet (printed first in duplex)
    Front,
    /// Back of the sheet (printed second in duplex)
    Back,
}

/// The four faces of one physical sheet, as `[left, right]` pairs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SheetFaces<T> {
    /// 0-based sheet number, outermost sheet first
    pub sheet: usize,
    pub front: [T; 2],
    pub back: [T; 2],
}

impl<T> SheetFaces<T> {
    pub fn side(&self, side: SheetSide) -> &[T; 2] {
        match side {
            SheetSide::Front => &self.front,
            SheetSide::Back => &self.back,
        }
    }
}
