use crate::constants::*;
use crate::types::*;
use std::path::PathBuf;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Booklet generation configuration
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct BookletOptions {
    // Output
    pub output_dir: PathBuf,
    pub prefix: String,

    // Block structure
    pub sheets_per_block: usize,

    // Cover blanks
    pub front_cover_blanks: usize,
    pub back_cover_blanks: usize,

    // Binding report
    pub sheet_thickness_mm: f32,
}

impl Default for BookletOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            prefix: DEFAULT_PREFIX.to_string(),
            sheets_per_block: DEFAULT_SHEETS_PER_BLOCK,
            front_cover_blanks: DEFAULT_COVER_BLANKS,
            back_cover_blanks: DEFAULT_COVER_BLANKS,
            sheet_thickness_mm: DEFAULT_SHEET_THICKNESS_MM,
        }
    }
}

impl BookletOptions {
    /// Load options from JSON file
    #[cfg(feature = "serde")]
    pub async fn load(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let bytes = tokio::fs::read(path).await?;
        let options = serde_json::from_slice(&bytes)
            .map_err(|e| ImposeError::Config(format!("Failed to parse config: {}", e)))?;
        Ok(options)
    }

    /// Save options to JSON file
    #[cfg(feature = "serde")]
    pub async fn save(&self, path: impl AsRef<std::path::Path>) -> Result<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| ImposeError::Config(format!("Failed to serialize config: {}", e)))?;
        tokio::fs::write(path, json).await?;
        Ok(())
    }

    /// Pages in every block (each sheet carries 4 pages)
    pub fn pages_per_block(&self) -> usize {
        self.sheets_per_block * PAGES_PER_SHEET
    }

    /// Validate the options
    pub fn validate(&self) -> Result<()> {
        if self.sheets_per_block == 0 {
            return Err(ImposeError::Config(
                "Sheets per block must be at least 1".to_string(),
            ));
        }

        if self.sheets_per_block.checked_mul(PAGES_PER_SHEET).is_none() {
            return Err(ImposeError::Config(format!(
                "Sheets per block is too large: {}",
                self.sheets_per_block
            )));
        }

        // Cover blanks beyond one block would only produce empty blocks
        let pages_per_block = self.pages_per_block();
        for (side, blanks) in [
            ("Front", self.front_cover_blanks),
            ("Back", self.back_cover_blanks),
        ] {
            if blanks > pages_per_block {
                return Err(ImposeError::Config(format!(
                    "{} cover blanks must not exceed {} pages per block, got {}",
                    side, pages_per_block, blanks
                )));
            }
        }

        if self.prefix.trim().is_empty() {
            return Err(ImposeError::Config("File prefix must not be empty".to_string()));
        }

        // The prefix becomes a file name inside output_dir
        if self.prefix.contains(['/', '\\']) || self.prefix == "." || self.prefix == ".." {
            return Err(ImposeError::Config(format!(
                "File prefix must be a plain file name, got {:?}",
                self.prefix
            )));
        }

        if !self.sheet_thickness_mm.is_finite() || self.sheet_thickness_mm <= 0.0 {
            return Err(ImposeError::Config(format!(
                "Sheet thickness must be a positive number of millimeters, got {}",
                self.sheet_thickness_mm
            )));
        }

        Ok(())
    }

    /// Path of the document written for the 1-based block `number`
    pub fn block_path(&self, number: usize) -> PathBuf {
        self.output_dir
            .join(format!("{}_{}.{}", self.prefix, number, BLOCK_FILE_EXTENSION))
    }

    /// Path of the binding report
    pub fn info_path(&self) -> PathBuf {
        self.output_dir.join(format!(
            "{}_{}.{}",
            self.prefix, INFO_FILE_SUFFIX, INFO_FILE_EXTENSION
        ))
    }
}
