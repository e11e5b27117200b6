//! PO catalog wiring.
//!
//! This module wraps gettext PO catalogs on disk so callers can load a
//! validated entry table and edit it through shared handles. `model` holds
//! the table itself, `parse` and `render` convert it to and from PO text,
//! and `file` exposes the public [`Catalog`] handle.

pub(crate) mod model;
pub(crate) mod parse;
pub(crate) mod render;

mod file;

pub use file::Catalog;
pub use model::{DEFAULT_DOMAIN, MAX_PLURAL_FORMS};
