//! Document I/O operations for booklet generation

use crate::constants::PARTIAL_FILE_EXTENSION;
use crate::types::*;
use lopdf::Document;
use std::path::{Path, PathBuf};

/// Load a single PDF document
pub async fn load_pdf(path: impl AsRef<Path>) -> Result<Document> {
    let path = path.as_ref().to_owned();
    let bytes = tokio::fs::read(&path).await?;
    let doc = tokio::task::spawn_blocking(move || Document::load_mem(&bytes)).await??;
    Ok(doc)
}

/// Serialize a document to PDF bytes
async fn serialize_pdf(mut doc: Document) -> Result<Vec<u8>> {
    tokio::task::spawn_blocking(move || {
        let mut writer = Vec::new();
        doc.save_to(&mut writer)?;
        Ok::<_, ImposeError>(writer)
    })
    .await?
}

/// Save a document
pub async fn save_pdf(doc: Document, path: impl AsRef<Path>) -> Result<()> {
    let bytes = serialize_pdf(doc).await?;
    tokio::fs::write(path, bytes).await?;
    Ok(())
}

/// Save a block document without ever leaving a half-written file at `path`.
///
/// The bytes go to a sibling `.part` file first, which is renamed into place
/// once complete. On failure the partial file is removed.
pub async fn save_block(doc: Document, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let partial = partial_path(path);
    let bytes = serialize_pdf(doc).await?;

    let written = write_then_rename(&partial, path, bytes).await;

    if let Err(e) = written {
        if let Err(cleanup) = tokio::fs::remove_file(&partial).await {
            log::debug!("Could not remove {}: {}", partial.display(), cleanup);
        }
        return Err(e.into());
    }
    Ok(())
}

/// Write the binding report
pub async fn save_info_file(text: &str, path: impl AsRef<Path>) -> Result<()> {
    tokio::fs::write(path, text).await?;
    Ok(())
}

async fn write_then_rename(partial: &Path, path: &Path, bytes: Vec<u8>) -> std::io::Result<()> {
    tokio::fs::write(partial, bytes).await?;
    tokio::fs::rename(partial, path).await
}

fn partial_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_owned();
    name.push(".");
    name.push(PARTIAL_FILE_EXTENSION);
    PathBuf::from(name)
}
