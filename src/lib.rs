//! Gettext PO catalog toolkit.
//!
//! Opens, edits, and writes `.po` translation catalogs through three
//! cooperating handle types:
//!
//! - [`Catalog`] — one open catalog: create empty, load from a path,
//!   persist to a path, enumerate domains, start iteration.
//! - [`Message`] — a handle to a single entry with get/set accessors for
//!   msgctxt, msgid, msgid_plural, msgstr, the indexed plural slots, and
//!   translator comments. Mutations apply in place.
//! - [`MessageIterator`] — a forward-only, single-pass cursor over one
//!   domain's messages; request a fresh cursor to iterate again.
//!
//! The entry table behind a catalog is reference-counted: messages and
//! cursors keep it alive even after the catalog that produced them is
//! reloaded or dropped, so stale handles read stale data instead of freed
//! memory. Unset optional fields are `None`, never `""` — a message whose
//! msgctxt was explicitly set to the empty string is distinct from one that
//! has no msgctxt at all.
//!
//! ```no_run
//! use pocat::Catalog;
//!
//! # fn demo() -> Result<(), pocat::CatalogError> {
//! let mut catalog = Catalog::new();
//! catalog.read("de.po")?;
//! for message in &catalog {
//!     if !message.is_translated() {
//!         println!("untranslated: {}", message.msgid());
//!     }
//! }
//! catalog.write("de.po")?;
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod error;
pub mod iter;
pub mod message;

pub use catalog::{Catalog, DEFAULT_DOMAIN, MAX_PLURAL_FORMS};
pub use error::{CatalogError, Diagnostic, Severity};
pub use iter::MessageIterator;
pub use message::{Message, MessageRecord};
