//! Source document loading and password unlocking
//!
//! Unlocking is one attempt per call. Whoever holds the password (a
//! prompt, a flag, an environment variable) decides whether to retry.

use crate::render::get_page_dimensions;
use crate::types::*;
use lopdf::{Document, ObjectId};
use std::path::Path;
use std::sync::Arc;

/// Supplies a password for a locked document
pub trait PasswordProvider {
    /// Return the password for `attempt` (1-based), or `None` to give up
    fn password(&mut self, attempt: usize) -> Option<String>;
}

impl<F> PasswordProvider for F
where
    F: FnMut(usize) -> Option<String>,
{
    fn password(&mut self, attempt: usize) -> Option<String> {
        self(attempt)
    }
}

/// Result of a single unlock attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnlockOutcome {
    /// The document is readable
    Unlocked,
    /// The password was wrong; the document stays locked
    Rejected,
}

/// A loaded PDF whose pages feed the imposition
#[derive(Debug, Clone)]
pub struct SourceDocument {
    name: String,
    document: Arc<Document>,
    locked: bool,
    attempts: usize,
}

impl SourceDocument {
    /// Wrap an already parsed document. `name` is shown in the binding report.
    pub fn from_document(name: impl Into<String>, document: Document) -> Self {
        let locked = document.is_encrypted();
        Self {
            name: name.into(),
            document: Arc::new(document),
            locked,
            attempts: 0,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    pub(crate) fn shared_document(&self) -> Arc<Document> {
        Arc::clone(&self.document)
    }

    /// Object IDs of all pages in reading order
    pub fn page_ids(&self) -> Vec<ObjectId> {
        self.document.get_pages().values().copied().collect()
    }

    pub fn page_count(&self) -> usize {
        self.document.get_pages().len()
    }

    /// Page size of the first page; every page is assumed to share it
    pub fn page_dimensions(&self) -> Result<PageDimensions> {
        self.ensure_unlocked()?;
        let first = self
            .document
            .get_pages()
            .values()
            .next()
            .copied()
            .ok_or(ImposeError::NoPages)?;
        let (width_pt, height_pt) = get_page_dimensions(&self.document, first)?;
        Ok(PageDimensions::new(width_pt, height_pt))
    }

    /// Try one password. Unlocked documents report success without trying.
    pub fn try_password(&mut self, password: &str) -> Result<UnlockOutcome> {
        if !self.locked {
            return Ok(UnlockOutcome::Unlocked);
        }

        self.attempts += 1;
        let mut candidate = (*self.document).clone();
        match candidate.decrypt(password) {
            Ok(()) => {
                log::info!("Unlocked {} after {} attempt(s)", self.name, self.attempts);
                self.document = Arc::new(candidate);
                self.locked = false;
                Ok(UnlockOutcome::Unlocked)
            }
            Err(e) => {
                log::warn!("Password rejected for {}: {}", self.name, e);
                Ok(UnlockOutcome::Rejected)
            }
        }
    }

    /// Ask `provider` for one password and try it.
    ///
    /// A provider that gives up yields `AccessDenied`.
    pub fn unlock(&mut self, provider: &mut impl PasswordProvider) -> Result<UnlockOutcome> {
        if !self.locked {
            return Ok(UnlockOutcome::Unlocked);
        }

        match provider.password(self.attempts + 1) {
            Some(password) => self.try_password(&password),
            None => Err(ImposeError::AccessDenied(format!(
                "password entry for {} was cancelled",
                self.name
            ))),
        }
    }

    pub(crate) fn ensure_unlocked(&self) -> Result<()> {
        if self.locked {
            return Err(ImposeError::AccessDenied(format!(
                "{} is password protected",
                self.name
            )));
        }
        Ok(())
    }
}

/// Load a PDF file as an imposition source
pub async fn load_source(path: impl AsRef<Path>) -> Result<SourceDocument> {
    let path = path.as_ref();
    let document = crate::impose::load_pdf(path).await?;
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let source = SourceDocument::from_document(name, document);
    log::info!(
        "Loaded {} ({} pages{})",
        source.name(),
        source.page_count(),
        if source.is_locked() { ", encrypted" } else { "" }
    );
    Ok(source)
}
