pub mod constants;
pub mod impose;
pub mod layout;
mod options;
mod render;
mod source;
mod stats;
mod types;

pub use impose::{
    BookletOutput, NoProgress, Progress, ProgressObserver, generate_booklets, load_pdf,
    plan_blocks, save_pdf,
};
pub use layout::{
    Block, PaddingPlan, PageSlot, SheetFaces, SheetSide, impose, imposition_order, pad,
    partition, sheet_layout, with_cover_blanks,
};
pub use options::*;
pub use render::{assemble_block, get_page_dimensions};
pub use source::{PasswordProvider, SourceDocument, UnlockOutcome, load_source};
pub use stats::{calculate_statistics, layout_report, render_info};
pub use types::*;
