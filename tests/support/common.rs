#![allow(dead_code)]

// Shared fixtures and helpers for the integration suites.

use anyhow::Result;
use pocat::{Catalog, Message};
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

/// Header plus singular, context-bearing, empty-context, plural, fuzzy, and
/// untranslated entries — one of each shape the accessors distinguish.
pub const SAMPLE: &str = concat!(
    "msgid \"\"\n",
    "msgstr \"\"\n",
    "\"Project-Id-Version: demo 1.0\\n\"\n",
    "\"Content-Type: text/plain; charset=UTF-8\\n\"\n",
    "\"Plural-Forms: nplurals=2; plural=(n != 1);\\n\"\n",
    "\n",
    "# greeting shown on the landing page\n",
    "#: src/ui.rs:42\n",
    "msgid \"Hello, world!\"\n",
    "msgstr \"Hallo, Welt!\"\n",
    "\n",
    "msgctxt \"menu\"\n",
    "msgid \"Open\"\n",
    "msgstr \"Öffnen\"\n",
    "\n",
    "msgctxt \"\"\n",
    "msgid \"Close\"\n",
    "msgstr \"Schließen\"\n",
    "\n",
    "#, fuzzy\n",
    "msgid \"One file\"\n",
    "msgid_plural \"{n} files\"\n",
    "msgstr[0] \"Eine Datei\"\n",
    "msgstr[1] \"{n} Dateien\"\n",
    "\n",
    "msgid \"Untranslated\"\n",
    "msgstr \"\"\n",
);

/// Number of messages in [`SAMPLE`]'s default domain, header included.
pub const SAMPLE_MESSAGE_COUNT: usize = 6;

/// Entries split across the default domain and an `errors` domain.
pub const MULTI_DOMAIN: &str = concat!(
    "msgid \"shared\"\n",
    "msgstr \"gemeinsam\"\n",
    "\n",
    "domain \"errors\"\n",
    "\n",
    "msgid \"file missing\"\n",
    "msgstr \"Datei fehlt\"\n",
    "\n",
    "msgid \"shared\"\n",
    "msgstr \"\"\n",
);

pub fn sample_catalog() -> Result<Catalog> {
    let mut catalog = Catalog::new();
    catalog.read_str(SAMPLE)?;
    Ok(catalog)
}

pub fn multi_domain_catalog() -> Result<Catalog> {
    let mut catalog = Catalog::new();
    catalog.read_str(MULTI_DOMAIN)?;
    Ok(catalog)
}

/// Drop `content` into `dir` under `name` and return the full path.
pub fn write_fixture(dir: &TempDir, name: &str, content: &str) -> Result<PathBuf> {
    let path = dir.path().join(name);
    fs::write(&path, content)?;
    Ok(path)
}

/// All msgids of the default domain, in iteration order.
pub fn msgids(catalog: &Catalog) -> Vec<String> {
    catalog.messages().map(|m| m.msgid()).collect()
}

/// The default-domain message with the given msgid, if any.
pub fn find_message(catalog: &Catalog, msgid: &str) -> Option<Message> {
    catalog.messages().find(|m| m.msgid() == msgid)
}
