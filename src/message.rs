//! Message handles over shared catalog entries.
//!
//! A `Message` is produced by iteration, never constructed directly, so every
//! handle is backed by a live entry. Handles hold the entry table itself
//! alive, and setters mutate the shared entry in place: a change made through
//! one handle is immediately visible through every other handle to the same
//! entry and through later iteration passes.

use crate::catalog::model::{MAX_PLURAL_FORMS, SharedEntry, SharedStore};
use crate::error::CatalogError;
use serde::Serialize;

/// A handle to one entry of a catalog.
#[derive(Debug, Clone)]
pub struct Message {
    store: SharedStore,
    entry: SharedEntry,
}

impl Message {
    pub(crate) fn new(store: SharedStore, entry: SharedEntry) -> Self {
        Self { store, entry }
    }

    /// The domain this message belongs to.
    pub fn domain(&self) -> String {
        self.entry.borrow().domain.clone()
    }

    /// The disambiguating context, or `None` when the message has none.
    /// An explicit empty context reads back as `Some("")`, not `None`.
    pub fn msgctxt(&self) -> Option<String> {
        self.entry.borrow().msgctxt.clone()
    }

    /// The untranslated string — the lookup key.
    pub fn msgid(&self) -> String {
        self.entry.borrow().msgid.clone()
    }

    /// The untranslated plural string; present exactly when the message is
    /// plural.
    pub fn msgid_plural(&self) -> Option<String> {
        self.entry.borrow().msgid_plural.clone()
    }

    /// The singular translation (empty when untranslated).
    pub fn msgstr(&self) -> String {
        self.entry.borrow().msgstr.clone()
    }

    /// The translation for plural form `index`.
    ///
    /// Out-of-range indices — and any index on a non-plural message — are
    /// absent, not an error.
    pub fn msgstr_plural(&self, index: usize) -> Option<String> {
        self.entry
            .borrow()
            .msgstr_plural
            .get(index)
            .cloned()
            .flatten()
    }

    /// Translator comments, newline-joined, without the `# ` markers.
    pub fn comments(&self) -> String {
        self.entry.borrow().comments.clone()
    }

    pub fn is_plural(&self) -> bool {
        self.entry.borrow().is_plural()
    }

    /// Whether every required translation slot is non-empty.
    pub fn is_translated(&self) -> bool {
        let entry = self.entry.borrow();
        if entry.is_plural() {
            !entry.msgstr_plural.is_empty()
                && entry
                    .msgstr_plural
                    .iter()
                    .all(|slot| slot.as_deref().is_some_and(|s| !s.is_empty()))
        } else {
            !entry.msgstr.is_empty()
        }
    }

    pub fn is_fuzzy(&self) -> bool {
        self.entry.borrow().flags.iter().any(|flag| flag == "fuzzy")
    }

    /// Set or clear the context. Fails with [`CatalogError::DuplicateKey`]
    /// when the new `(msgctxt, msgid)` pair is already taken in this domain.
    pub fn set_msgctxt(&self, msgctxt: Option<&str>) -> Result<(), CatalogError> {
        let msgid = self.entry.borrow().msgid.clone();
        self.ensure_key_free(msgctxt, &msgid)?;
        self.entry.borrow_mut().msgctxt = msgctxt.map(str::to_string);
        Ok(())
    }

    /// Set the untranslated string. The msgid must be non-empty and must not
    /// collide with another entry's key.
    pub fn set_msgid(&self, msgid: &str) -> Result<(), CatalogError> {
        if msgid.is_empty() {
            return Err(CatalogError::InvalidArgument(
                "msgid must not be empty".to_string(),
            ));
        }
        let msgctxt = self.entry.borrow().msgctxt.clone();
        self.ensure_key_free(msgctxt.as_deref(), msgid)?;
        self.entry.borrow_mut().msgid = msgid.to_string();
        Ok(())
    }

    /// Set the untranslated plural string; a singular message becomes plural.
    pub fn set_msgid_plural(&self, msgid_plural: &str) -> Result<(), CatalogError> {
        if msgid_plural.is_empty() {
            return Err(CatalogError::InvalidArgument(
                "msgid_plural must not be empty".to_string(),
            ));
        }
        self.entry.borrow_mut().msgid_plural = Some(msgid_plural.to_string());
        Ok(())
    }

    /// Set the singular translation. Empty text marks the message
    /// untranslated; plural messages are rejected — their translations live
    /// in the indexed slots.
    pub fn set_msgstr(&self, msgstr: &str) -> Result<(), CatalogError> {
        let mut entry = self.entry.borrow_mut();
        if entry.is_plural() {
            return Err(CatalogError::InvalidArgument(
                "message has plural forms; use set_msgstr_plural".to_string(),
            ));
        }
        entry.msgstr = msgstr.to_string();
        Ok(())
    }

    /// Set or clear (`None`) the translation for plural form `index`.
    ///
    /// Clearing a slot that was never set is a no-op. Setting a slot beyond
    /// the current width grows the message's slot vector, up to
    /// [`MAX_PLURAL_FORMS`].
    pub fn set_msgstr_plural(&self, index: usize, msgstr: Option<&str>) -> Result<(), CatalogError> {
        let mut entry = self.entry.borrow_mut();
        if !entry.is_plural() {
            return Err(CatalogError::InvalidArgument(
                "message has no msgid_plural; use set_msgstr".to_string(),
            ));
        }
        match msgstr {
            Some(value) => {
                if index >= MAX_PLURAL_FORMS {
                    return Err(CatalogError::InvalidArgument(format!(
                        "plural index {index} exceeds the supported maximum of {MAX_PLURAL_FORMS}"
                    )));
                }
                if entry.msgstr_plural.len() <= index {
                    entry.msgstr_plural.resize(index + 1, None);
                }
                entry.msgstr_plural[index] = Some(value.to_string());
            }
            None => {
                if let Some(slot) = entry.msgstr_plural.get_mut(index) {
                    *slot = None;
                }
            }
        }
        Ok(())
    }

    /// Replace the translator comments blob.
    pub fn set_comments(&self, comments: &str) {
        self.entry.borrow_mut().comments = comments.to_string();
    }

    /// A serializable snapshot of the current field values.
    pub fn to_record(&self) -> MessageRecord {
        let translated = self.is_translated();
        let fuzzy = self.is_fuzzy();
        let entry = self.entry.borrow();
        MessageRecord {
            domain: entry.domain.clone(),
            msgctxt: entry.msgctxt.clone(),
            msgid: entry.msgid.clone(),
            msgid_plural: entry.msgid_plural.clone(),
            msgstr: entry.msgstr.clone(),
            msgstr_plural: entry.msgstr_plural.clone(),
            comments: entry.comments.clone(),
            flags: entry.flags.clone(),
            translated,
            fuzzy,
        }
    }

    fn ensure_key_free(&self, msgctxt: Option<&str>, msgid: &str) -> Result<(), CatalogError> {
        let domain = self.entry.borrow().domain.clone();
        if self
            .store
            .borrow()
            .occupied(Some(&self.entry), &domain, msgctxt, msgid)
        {
            return Err(CatalogError::DuplicateKey {
                domain,
                msgctxt: msgctxt.map(str::to_string),
                msgid: msgid.to_string(),
            });
        }
        Ok(())
    }
}

/// Serializable snapshot of one message, as emitted by `po-inspect`.
#[derive(Debug, Clone, Serialize)]
pub struct MessageRecord {
    pub domain: String,
    pub msgctxt: Option<String>,
    pub msgid: String,
    pub msgid_plural: Option<String>,
    pub msgstr: String,
    pub msgstr_plural: Vec<Option<String>>,
    pub comments: String,
    pub flags: Vec<String>,
    pub translated: bool,
    pub fuzzy: bool,
}
