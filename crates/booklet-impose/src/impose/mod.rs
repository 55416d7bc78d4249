//! Booklet generation - splitting a document into printable blocks
//!
//! This module orchestrates a run:
//! 1. Plan the padded page sequence (cover blanks, tail blanks)
//! 2. Partition it into blocks
//! 3. For each block, in order: impose, assemble and write the PDF
//! 4. Write the binding report

mod io;

pub use io::{load_pdf, save_block, save_info_file, save_pdf};

use crate::layout::{PaddingPlan, PageSlot};
use crate::options::BookletOptions;
use crate::render::assemble_block;
use crate::source::SourceDocument;
use crate::stats::{layout_report, render_info};
use crate::types::*;
use lopdf::{Document, ObjectId};
use std::ops::ControlFlow;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Progress of a run, reported after each block is written
#[derive(Debug, Clone, Copy)]
pub struct Progress<'a> {
    /// Blocks written so far
    pub completed: usize,
    /// Blocks in the run
    pub total: usize,
    /// File just written
    pub path: &'a Path,
}

/// Observes a run between blocks and may stop it
pub trait ProgressObserver {
    fn block_written(&mut self, progress: Progress<'_>) -> ControlFlow<()>;
}

impl<F> ProgressObserver for F
where
    F: FnMut(Progress<'_>) -> ControlFlow<()>,
{
    fn block_written(&mut self, progress: Progress<'_>) -> ControlFlow<()> {
        self(progress)
    }
}

/// Observer that never stops a run
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {
    fn block_written(&mut self, _progress: Progress<'_>) -> ControlFlow<()> {
        ControlFlow::Continue(())
    }
}

/// Files produced by a run
#[derive(Debug, Clone, PartialEq)]
pub struct BookletOutput {
    /// One document per block, in block order
    pub block_files: Vec<PathBuf>,
    pub info_file: PathBuf,
    pub report: LayoutReport,
}

/// Plan the padded page sequence for a source document
pub fn plan_blocks(source: &SourceDocument, options: &BookletOptions) -> Result<PaddingPlan> {
    options.validate()?;
    source.ensure_unlocked()?;

    let source_pages = source.page_count();
    if source_pages == 0 {
        return Err(ImposeError::NoPages);
    }

    PaddingPlan::new(
        source_pages,
        options.pages_per_block(),
        options.front_cover_blanks,
        options.back_cover_blanks,
    )
}

/// Generate one imposed PDF per block plus the binding report.
///
/// Blocks are written strictly in order. The first failure stops the run;
/// blocks written before it are left intact. `observer` is consulted after
/// every block and may cancel the rest of the run.
pub async fn generate_booklets(
    source: &SourceDocument,
    options: &BookletOptions,
    observer: &mut impl ProgressObserver,
) -> Result<BookletOutput> {
    let plan = plan_blocks(source, options)?;
    let blocks = plan.blocks()?;
    let total = blocks.len();
    let dimensions = source.page_dimensions()?;
    let page_ids = source.page_ids();

    log::info!(
        "Imposing {} pages of {} into {} block(s) of {} sheets",
        plan.source_pages,
        source.name(),
        total,
        options.sheets_per_block
    );

    let mut block_files = Vec::with_capacity(total);
    for block in &blocks {
        let path = options.block_path(block.number());
        let imposed = block.impose()?;
        log::debug!("Block {} print order: {:?}", block.number(), imposed);

        let written = write_block(
            source.shared_document(),
            page_ids.clone(),
            imposed,
            dimensions,
            &path,
        )
        .await;

        if let Err(e) = written {
            log::error!("Block {} failed: {}", block.number(), e);
            return Err(ImposeError::Assembly {
                block: block.number(),
                path,
                source: Box::new(e),
            });
        }

        log::info!(
            "Wrote block {}/{} ({} blank pages) to {}",
            block.number(),
            total,
            block.blank_count(),
            path.display()
        );
        let flow = observer.block_written(Progress {
            completed: block.number(),
            total,
            path: &path,
        });
        block_files.push(path);

        if flow.is_break() && block.number() < total {
            log::warn!("Run cancelled after block {}/{}", block.number(), total);
            return Err(ImposeError::Cancelled {
                completed: block.number(),
                total,
            });
        }
    }

    let report = layout_report(
        plan.source_pages,
        options.sheets_per_block,
        dimensions.width_pt,
        dimensions.height_pt,
        options.sheet_thickness_mm,
    )?;
    let info_file = options.info_path();
    save_info_file(&render_info(&report, source.name()), &info_file).await?;
    log::info!("Wrote binding report to {}", info_file.display());

    Ok(BookletOutput {
        block_files,
        info_file,
        report,
    })
}

/// Assemble one imposed block and write it to `path`
async fn write_block(
    document: Arc<Document>,
    page_ids: Vec<ObjectId>,
    imposed: Vec<PageSlot<usize>>,
    dimensions: PageDimensions,
    path: &Path,
) -> Result<()> {
    let doc = tokio::task::spawn_blocking(move || {
        assemble_block(&document, &page_ids, &imposed, dimensions)
    })
    .await??;
    save_block(doc, path).await
}
