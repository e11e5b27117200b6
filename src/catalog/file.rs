//! The catalog handle: create, load, persist, enumerate, iterate.

use crate::catalog::model::{DEFAULT_DOMAIN, SharedStore, Store};
use crate::catalog::{parse, render};
use crate::error::{CatalogError, Diagnostic};
use crate::iter::MessageIterator;
use crate::message::Message;
use log::{debug, warn};
use std::cell::RefCell;
use std::fs;
use std::io::Write;
use std::path::Path;
use std::rc::Rc;
use tempfile::NamedTempFile;

/// One open PO catalog.
///
/// The catalog holds a reference-counted handle to its entry table; every
/// [`Message`] and [`MessageIterator`] produced from it holds its own handle
/// to the same table. Reloading or dropping the catalog therefore never
/// invalidates outstanding messages — they keep the table they were created
/// against alive until the last of them drops.
#[derive(Debug)]
pub struct Catalog {
    store: SharedStore,
    diagnostics: Vec<Diagnostic>,
}

impl Catalog {
    /// A new, empty catalog. Never fails.
    pub fn new() -> Self {
        Self {
            store: Rc::new(RefCell::new(Store::new())),
            diagnostics: Vec::new(),
        }
    }

    /// Parse the PO file at `path` and replace this catalog's contents.
    ///
    /// The swap happens only on success: a missing file or a syntax error
    /// leaves the previous contents untouched. Diagnostics collected during
    /// the attempt — including warnings on a successful parse — stay
    /// available through [`Catalog::diagnostics`].
    pub fn read(&mut self, path: impl AsRef<Path>) -> Result<(), CatalogError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                CatalogError::NotFound {
                    path: path.to_path_buf(),
                }
            } else {
                CatalogError::Io {
                    path: path.to_path_buf(),
                    source,
                }
            }
        })?;
        self.read_text(&text, &path.display().to_string())
    }

    /// [`Catalog::read`], from an in-memory string.
    pub fn read_str(&mut self, text: &str) -> Result<(), CatalogError> {
        self.read_text(text, "<string>")
    }

    fn read_text(&mut self, text: &str, origin: &str) -> Result<(), CatalogError> {
        let mut diagnostics = Vec::new();
        let result = parse::parse(text, origin, &mut diagnostics);
        if !diagnostics.is_empty() {
            warn!("{origin}: {} parse diagnostic(s)", diagnostics.len());
        }
        self.diagnostics = diagnostics;
        let store = result?;
        self.store = Rc::new(RefCell::new(store));
        Ok(())
    }

    /// Serialize the catalog to `path`.
    ///
    /// The write is atomic: the text lands in a temporary file in the target
    /// directory and is renamed over `path` once complete.
    pub fn write(&self, path: impl AsRef<Path>) -> Result<(), CatalogError> {
        let path = path.as_ref();
        let text = self.render();
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let io_error = |source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        };
        let mut tmp = NamedTempFile::new_in(dir).map_err(io_error)?;
        tmp.write_all(text.as_bytes()).map_err(io_error)?;
        tmp.persist(path).map_err(|err| io_error(err.error))?;
        debug!("wrote catalog to {}", path.display());
        Ok(())
    }

    /// The catalog serialized as PO text.
    pub fn render(&self) -> String {
        render::render(&self.store.borrow())
    }

    /// Domain names in first-encounter order. The default domain is always
    /// present and always first.
    pub fn domains(&self) -> Vec<String> {
        self.store.borrow().domains.clone()
    }

    /// A fresh cursor over the default domain's messages.
    ///
    /// Each call starts a new pass; cursors are single-use and never resume.
    pub fn messages(&self) -> MessageIterator {
        self.messages_in(DEFAULT_DOMAIN)
    }

    /// A fresh cursor over one domain's messages.
    pub fn messages_in(&self, domain: &str) -> MessageIterator {
        MessageIterator::new(self.store.clone(), domain)
    }

    /// Diagnostics from the most recent `read`/`read_str` attempt.
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = Message;
    type IntoIter = MessageIterator;

    fn into_iter(self) -> MessageIterator {
        self.messages()
    }
}
