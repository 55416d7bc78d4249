use crate::constants::{PAGES_PER_SHEET, pt_to_mm};
use crate::layout::PaddingPlan;
use crate::options::BookletOptions;
use crate::source::SourceDocument;
use crate::types::*;
use std::fmt::Write;

/// Compute the binding report for a document.
///
/// The block count is estimated from the original page count alone, so
/// cover blanks do not change the sheet estimate or the spine thickness.
pub fn layout_report(
    total_original_pages: usize,
    sheets_per_block: usize,
    page_width_pt: f32,
    page_height_pt: f32,
    thickness_per_sheet_mm: f32,
) -> Result<LayoutReport> {
    let too_large = || {
        ImposeError::Config(format!(
            "Sheets per block is too large: {}",
            sheets_per_block
        ))
    };
    let pages_per_block = sheets_per_block
        .checked_mul(PAGES_PER_SHEET)
        .ok_or_else(too_large)?;
    let block_count = if pages_per_block == 0 {
        0
    } else {
        total_original_pages.div_ceil(pages_per_block)
    };
    let total_sheets = block_count
        .checked_mul(sheets_per_block)
        .ok_or_else(too_large)?;

    Ok(LayoutReport {
        original_pages: total_original_pages,
        block_count,
        total_sheets,
        page_width_mm: pt_to_mm(page_width_pt),
        page_height_mm: pt_to_mm(page_height_pt),
        spine_thickness_mm: total_sheets as f32 * thickness_per_sheet_mm,
    })
}

/// Calculate statistics for booklet generation
pub fn calculate_statistics(
    source: &SourceDocument,
    options: &BookletOptions,
) -> Result<ImpositionStatistics> {
    options.validate()?;

    let source_pages = source.page_count();
    if source_pages == 0 {
        return Err(ImposeError::NoPages);
    }

    let dimensions = source.page_dimensions()?;
    let report = layout_report(
        source_pages,
        options.sheets_per_block,
        dimensions.width_pt,
        dimensions.height_pt,
        options.sheet_thickness_mm,
    )?;

    let plan = PaddingPlan::new(
        source_pages,
        options.pages_per_block(),
        options.front_cover_blanks,
        options.back_cover_blanks,
    )?;

    Ok(ImpositionStatistics {
        report,
        pages_per_block: options.pages_per_block(),
        planned_blocks: plan.block_count(),
        padded_pages: plan.slots.len(),
        cover_blanks: plan.cover_blanks,
        padding_blanks: plan.padding_blanks,
    })
}

/// Render the binding report written next to the blocks
pub fn render_info(report: &LayoutReport, source_name: &str) -> String {
    let mut text = String::new();
    // Writing to a String cannot fail
    let _ = writeln!(text, "Source file: {}", source_name);
    let _ = writeln!(text, "Total pages: {}", report.original_pages);
    let _ = writeln!(text, "Estimated sheets: {}", report.total_sheets);
    let _ = writeln!(
        text,
        "Page size: {:.2} x {:.2} mm",
        report.page_width_mm, report.page_height_mm
    );
    let _ = writeln!(text, "Spine thickness: {:.2} mm", report.spine_thickness_mm);
    text
}
