//! The in-memory entry table behind a catalog.
//!
//! A `Store` is the single owner of every entry parsed from (or destined for)
//! one PO file. Handle types share it through `Rc<RefCell<Store>>`, so the
//! table outlives the `Catalog` that produced it for as long as any message
//! or iterator still points into it.

use std::cell::RefCell;
use std::rc::Rc;

/// The domain messages belong to when no `domain` directive names one.
pub const DEFAULT_DOMAIN: &str = "messages";

/// Upper bound on plural-form slots per message. No gettext plural formula
/// in circulation needs more than six forms.
pub const MAX_PLURAL_FORMS: usize = 8;

pub(crate) type SharedStore = Rc<RefCell<Store>>;
pub(crate) type SharedEntry = Rc<RefCell<Entry>>;

/// One catalog entry. Optional fields distinguish "absent" from "empty":
/// an entry with no msgctxt carries `None`, never `""`.
#[derive(Debug, Clone, Default)]
pub(crate) struct Entry {
    pub domain: String,
    pub msgctxt: Option<String>,
    pub msgid: String,
    pub msgid_plural: Option<String>,
    pub msgstr: String,
    /// Slot `i` holds the translation for plural form `i`, or `None` when
    /// that slot has been cleared. Empty for singular messages.
    pub msgstr_plural: Vec<Option<String>>,
    /// Translator comments (`# `), newline-joined, without the markers.
    pub comments: String,
    /// Extracted comments (`#. `), newline-joined.
    pub extracted: String,
    /// Source reference lines (`#: `), one element per line.
    pub references: Vec<String>,
    /// Flags (`#, `), split on commas (`fuzzy`, `c-format`, ...).
    pub flags: Vec<String>,
    /// Previous-string lines (`#| `), kept verbatim for round-tripping.
    pub previous: Vec<String>,
}

impl Entry {
    /// The identity of this entry inside its catalog.
    pub fn key(&self) -> (&str, Option<&str>, &str) {
        (
            self.domain.as_str(),
            self.msgctxt.as_deref(),
            self.msgid.as_str(),
        )
    }

    pub fn is_plural(&self) -> bool {
        self.msgid_plural.is_some()
    }
}

/// Ordered entry table plus the domain-name list in first-encounter order.
#[derive(Debug)]
pub(crate) struct Store {
    pub entries: Vec<SharedEntry>,
    pub domains: Vec<String>,
}

impl Default for Store {
    fn default() -> Self {
        // The default domain always exists, mirroring how a freshly created
        // native catalog already owns a "messages" message list.
        Self {
            entries: Vec::new(),
            domains: vec![DEFAULT_DOMAIN.to_string()],
        }
    }
}

impl Store {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a domain name the first time it is seen.
    pub fn note_domain(&mut self, domain: &str) {
        if !self.domains.iter().any(|d| d == domain) {
            self.domains.push(domain.to_string());
        }
    }

    pub fn push(&mut self, entry: Entry) {
        self.note_domain(&entry.domain);
        self.entries.push(Rc::new(RefCell::new(entry)));
    }

    /// Whether an entry other than `skip` already occupies the given key.
    pub fn occupied(
        &self,
        skip: Option<&SharedEntry>,
        domain: &str,
        msgctxt: Option<&str>,
        msgid: &str,
    ) -> bool {
        self.entries.iter().any(|candidate| {
            if let Some(skip) = skip {
                if Rc::ptr_eq(candidate, skip) {
                    return false;
                }
            }
            candidate.borrow().key() == (domain, msgctxt, msgid)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(domain: &str, msgctxt: Option<&str>, msgid: &str) -> Entry {
        Entry {
            domain: domain.to_string(),
            msgctxt: msgctxt.map(str::to_string),
            msgid: msgid.to_string(),
            ..Entry::default()
        }
    }

    #[test]
    fn default_domain_always_listed_first() {
        let mut store = Store::new();
        assert_eq!(store.domains, vec![DEFAULT_DOMAIN.to_string()]);
        store.push(entry("errors", None, "oops"));
        store.push(entry(DEFAULT_DOMAIN, None, "hi"));
        assert_eq!(store.domains, vec!["messages", "errors"]);
    }

    #[test]
    fn occupied_distinguishes_context_from_empty_context() {
        let mut store = Store::new();
        store.push(entry(DEFAULT_DOMAIN, None, "Open"));
        store.push(entry(DEFAULT_DOMAIN, Some(""), "Open"));
        assert!(store.occupied(None, DEFAULT_DOMAIN, None, "Open"));
        assert!(store.occupied(None, DEFAULT_DOMAIN, Some(""), "Open"));
        assert!(!store.occupied(None, DEFAULT_DOMAIN, Some("menu"), "Open"));
    }

    #[test]
    fn occupied_skips_the_entry_being_edited() {
        let mut store = Store::new();
        store.push(entry(DEFAULT_DOMAIN, None, "Open"));
        let own = store.entries[0].clone();
        assert!(!store.occupied(Some(&own), DEFAULT_DOMAIN, None, "Open"));
    }
}
