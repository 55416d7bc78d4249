//! Shared constants for booklet imposition
//!
//! This module centralizes magic numbers and defaults used throughout
//! the padding, imposition and reporting stages.

// =============================================================================
// Sheet Geometry
// =============================================================================

/// Printable faces per physical sheet (front-left, front-right, back-left, back-right)
pub const PAGES_PER_SHEET: usize = 4;

// =============================================================================
// Unit Conversion
// =============================================================================

/// Millimeters per typographic point, as used in the binding report
pub const MM_PER_POINT: f32 = 0.3528;

/// Convert points to millimeters
#[inline]
pub fn pt_to_mm(pt: f32) -> f32 {
    pt * MM_PER_POINT
}

// =============================================================================
// Defaults
// =============================================================================

/// Sheets folded together into one block
pub const DEFAULT_SHEETS_PER_BLOCK: usize = 5;

/// File name prefix for generated blocks and the info file
pub const DEFAULT_PREFIX: &str = "fascicolo";

/// Blank pages reserved at each end of the document for the hardcover
pub const DEFAULT_COVER_BLANKS: usize = 2;

/// Estimated thickness of one sheet of paper (millimeters)
pub const DEFAULT_SHEET_THICKNESS_MM: f32 = 0.1;

/// Fallback page size in points when a page has no usable MediaBox (US Letter)
pub const DEFAULT_PAGE_DIMENSIONS: (f32, f32) = (612.0, 792.0);

// =============================================================================
// Output Naming
// =============================================================================

/// Extension of every generated block document
pub const BLOCK_FILE_EXTENSION: &str = "pdf";

/// Suffix appended to the prefix for the binding report
pub const INFO_FILE_SUFFIX: &str = "info";

/// Extension of the binding report
pub const INFO_FILE_EXTENSION: &str = "txt";

/// Extension used while a block is being written, before it is renamed into place
pub const PARTIAL_FILE_EXTENSION: &str = "part";
