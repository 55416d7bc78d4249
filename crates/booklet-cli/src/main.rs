use anyhow::{Context, Result, bail};
use booklet_impose::{
    BookletOptions, ImposeError, PasswordProvider, Progress, SourceDocument, UnlockOutcome,
};
use clap::{Args, Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::{BufRead, Write};
use std::ops::ControlFlow;
use std::path::{Path, PathBuf};

/// Password attempts before giving up on an encrypted input
const MAX_PASSWORD_ATTEMPTS: usize = 3;

#[derive(Parser)]
#[command(name = "booklet", about = "Split a PDF into saddle-stitch booklets", version)]
struct Cli {
    /// Show debug output (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write one imposed PDF per block plus a binding report
    Impose {
        #[command(flatten)]
        source: SourceArgs,

        /// Output folder (must exist)
        #[arg(short, long)]
        output: PathBuf,

        #[command(flatten)]
        layout: LayoutArgs,

        /// Save the effective options as JSON
        #[arg(long)]
        save_config: Option<PathBuf>,

        /// Show statistics only, don't generate PDFs
        #[arg(long)]
        stats_only: bool,
    },

    /// Show sheet count, page size and spine thickness
    Stats {
        #[command(flatten)]
        source: SourceArgs,

        #[command(flatten)]
        layout: LayoutArgs,
    },

    /// Print which pages land on which sheet for a block
    Order {
        /// Sheets per block
        #[arg(long, default_value = "5")]
        sheets: usize,
    },
}

#[derive(Args)]
struct SourceArgs {
    /// Input PDF file
    #[arg(short, long)]
    input: PathBuf,

    /// Password for an encrypted PDF (prompted for when missing)
    #[arg(long, env = "BOOKLET_PASSWORD", hide_env_values = true)]
    password: Option<String>,
}

#[derive(Args)]
struct LayoutArgs {
    /// Load options from a JSON file before applying flags
    #[arg(long)]
    config: Option<PathBuf>,

    /// Sheets per block (each sheet carries 4 pages)
    #[arg(long)]
    sheets: Option<usize>,

    /// File name prefix for blocks and the info file
    #[arg(long)]
    prefix: Option<String>,

    /// Blank pages before the first page, reserved for the cover
    #[arg(long)]
    front_blanks: Option<usize>,

    /// Blank pages after the last page, reserved for the cover
    #[arg(long)]
    back_blanks: Option<usize>,

    /// Thickness of one sheet in mm, for the spine estimate
    #[arg(long)]
    sheet_thickness: Option<f32>,
}

impl LayoutArgs {
    async fn to_options(&self) -> Result<BookletOptions> {
        let mut options = match &self.config {
            Some(path) => BookletOptions::load(path)
                .await
                .with_context(|| format!("loading options from {}", path.display()))?,
            None => BookletOptions::default(),
        };

        if let Some(sheets) = self.sheets {
            options.sheets_per_block = sheets;
        }
        if let Some(prefix) = &self.prefix {
            options.prefix = prefix.clone();
        }
        if let Some(front) = self.front_blanks {
            options.front_cover_blanks = front;
        }
        if let Some(back) = self.back_blanks {
            options.back_cover_blanks = back;
        }
        if let Some(thickness) = self.sheet_thickness {
            options.sheet_thickness_mm = thickness;
        }

        options.validate()?;
        Ok(options)
    }
}

/// Hands out the `--password` value first, then asks on the terminal
struct PromptPassword {
    preset: Option<String>,
}

impl PasswordProvider for PromptPassword {
    fn password(&mut self, attempt: usize) -> Option<String> {
        if let Some(password) = self.preset.take() {
            return Some(password);
        }

        eprint!("Password ({attempt}/{MAX_PASSWORD_ATTEMPTS}, empty to cancel): ");
        std::io::stderr().flush().ok()?;

        let mut line = String::new();
        std::io::stdin().lock().read_line(&mut line).ok()?;
        let password = line.trim_end_matches(['\r', '\n']).to_string();
        (!password.is_empty()).then_some(password)
    }
}

fn check_input(path: &Path) -> Result<()> {
    let is_pdf = path
        .extension()
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));
    if !is_pdf || !path.is_file() {
        bail!("{} is not a PDF file", path.display());
    }
    Ok(())
}

async fn open_source(args: &SourceArgs) -> Result<SourceDocument> {
    check_input(&args.input)?;
    let mut source = booklet_impose::load_source(&args.input)
        .await
        .with_context(|| format!("loading {}", args.input.display()))?;

    if source.is_locked() {
        let mut provider = PromptPassword {
            preset: args.password.clone(),
        };
        for attempt in 1..=MAX_PASSWORD_ATTEMPTS {
            match source.unlock(&mut provider)? {
                UnlockOutcome::Unlocked => break,
                UnlockOutcome::Rejected => {
                    eprintln!("Wrong password ({attempt}/{MAX_PASSWORD_ATTEMPTS})");
                }
            }
        }
        if source.is_locked() {
            return Err(ImposeError::AccessDenied(format!(
                "no valid password for {} after {} attempts",
                source.name(),
                MAX_PASSWORD_ATTEMPTS
            ))
            .into());
        }
    }

    Ok(source)
}

fn print_statistics(source: &SourceDocument, options: &BookletOptions) -> Result<()> {
    let stats = booklet_impose::calculate_statistics(source, options)?;
    println!("Booklet Statistics:");
    println!("  Source file: {}", source.name());
    println!("  Source pages: {}", stats.report.original_pages);
    println!("  Pages per block: {}", stats.pages_per_block);
    println!("  Blocks: {}", stats.planned_blocks);
    println!("  Blank pages added: {}", stats.blank_pages_added());
    println!("  Estimated sheets: {}", stats.report.total_sheets);
    println!(
        "  Page size: {:.2} x {:.2} mm",
        stats.report.page_width_mm, stats.report.page_height_mm
    );
    println!("  Spine thickness: {:.2} mm", stats.report.spine_thickness_mm);
    Ok(())
}

/// Progress bar sized to the number of blocks in the run
fn block_progress_bar(total: usize) -> Result<ProgressBar> {
    let bar = ProgressBar::new(total as u64);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("[{bar:40.cyan/blue}] {pos}/{len} blocks {msg}")
            .context("progress bar template")?
            .progress_chars("=> "),
    );
    Ok(bar)
}

fn print_order(sheets: usize) -> Result<()> {
    if sheets == 0 {
        bail!("a block needs at least one sheet");
    }
    let Some(pages) = sheets.checked_mul(booklet_impose::constants::PAGES_PER_SHEET) else {
        bail!("{sheets} sheets per block is too large");
    };
    println!("Block of {} sheets ({} pages):", sheets, pages);
    for faces in booklet_impose::sheet_layout(pages)? {
        println!(
            "  Sheet {:>2}: front [{:>3}, {:>3}]  back [{:>3}, {:>3}]",
            faces.sheet + 1,
            faces.front[0] + 1,
            faces.front[1] + 1,
            faces.back[0] + 1,
            faces.back[1] + 1,
        );
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    match cli.command {
        Commands::Impose {
            source,
            output,
            layout,
            save_config,
            stats_only,
        } => {
            if !output.is_dir() {
                bail!("output folder {} does not exist", output.display());
            }

            let mut options = layout.to_options().await?;
            options.output_dir = output;

            if let Some(path) = &save_config {
                options
                    .save(path)
                    .await
                    .with_context(|| format!("saving options to {}", path.display()))?;
                log::info!("Saved options to {}", path.display());
            }

            let source = open_source(&source).await?;
            print_statistics(&source, &options)?;

            if stats_only {
                return Ok(());
            }

            let total = booklet_impose::plan_blocks(&source, &options)?.block_count();
            let bar = block_progress_bar(total)?;

            let mut observer = |progress: Progress<'_>| {
                bar.set_position(progress.completed as u64);
                bar.set_message(progress.path.display().to_string());
                ControlFlow::Continue(())
            };
            let result =
                booklet_impose::generate_booklets(&source, &options, &mut observer).await;
            bar.finish_and_clear();

            let output = result?;
            for path in &output.block_files {
                println!("Block → {}", path.display());
            }
            println!("Info  → {}", output.info_file.display());
        }

        Commands::Stats { source, layout } => {
            let options = layout.to_options().await?;
            let source = open_source(&source).await?;
            print_statistics(&source, &options)?;
        }

        Commands::Order { sheets } => print_order(sheets)?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_print_order_rejects_bad_sheet_counts() {
        assert!(print_order(0).is_err());
        assert!(print_order(usize::MAX).is_err());
        assert!(print_order(2).is_ok());
    }

    #[test]
    fn test_progress_bar_sized_up_front() {
        let bar = block_progress_bar(3).unwrap();
        assert_eq!(bar.length(), Some(3));
        assert_eq!(bar.position(), 0);
    }
}
