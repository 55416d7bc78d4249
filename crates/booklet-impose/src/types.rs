use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ImposeError {
    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Task join error: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),
    #[error("No pages to impose")]
    NoPages,
    #[error("Access denied: {0}")]
    AccessDenied(String),
    #[error("{slots} padded pages cannot be split into blocks of {block_size}")]
    PartitionInvariant { slots: usize, block_size: usize },
    #[error("Block length {len} is not a multiple of 4")]
    InvalidBlockLength { len: usize },
    #[error("Failed to write block {block} to {}: {source}", .path.display())]
    Assembly {
        /// 1-based block number
        block: usize,
        path: PathBuf,
        #[source]
        source: Box<ImposeError>,
    },
    #[error("Cancelled after {completed} of {total} blocks")]
    Cancelled { completed: usize, total: usize },
}

pub type Result<T> = std::result::Result<T, ImposeError>;

/// Page size of the source document in points
///
/// Taken from the first page; all pages are assumed to share it.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PageDimensions {
    pub width_pt: f32,
    pub height_pt: f32,
}

impl PageDimensions {
    pub fn new(width_pt: f32, height_pt: f32) -> Self {
        Self {
            width_pt,
            height_pt,
        }
    }
}

/// Physical summary of a booklet run, used to size the cover
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutReport {
    /// Pages in the source document, without any blanks
    pub original_pages: usize,
    /// Estimated number of blocks, from the original page count
    pub block_count: usize,
    /// Estimated sheets of paper for all blocks
    pub total_sheets: usize,
    pub page_width_mm: f32,
    pub page_height_mm: f32,
    pub spine_thickness_mm: f32,
}

/// Statistics about a planned run
#[derive(Debug, Clone, PartialEq)]
pub struct ImpositionStatistics {
    /// Binding report for the run
    pub report: LayoutReport,
    /// Pages per block (sheets per block × 4)
    pub pages_per_block: usize,
    /// Blocks that will actually be written, cover blanks included
    pub planned_blocks: usize,
    /// Total slots after cover blanks and tail padding
    pub padded_pages: usize,
    /// Blank pages reserved for the cover
    pub cover_blanks: usize,
    /// Blank pages appended to complete the last block
    pub padding_blanks: usize,
}

impl ImpositionStatistics {
    pub fn blank_pages_added(&self) -> usize {
        self.cover_blanks + self.padding_blanks
    }
}
