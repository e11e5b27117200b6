//! PO text -> entry table.
//!
//! The parser is line-oriented and recovers where it can: every problem is
//! recorded in the caller-supplied diagnostics sink, and the whole input is
//! scanned even when an early line is fatal. `read` only fails afterwards,
//! with the first error-severity diagnostic, so callers see the complete
//! picture instead of one message per attempt.

use crate::catalog::model::{DEFAULT_DOMAIN, Entry, MAX_PLURAL_FORMS, Store};
use crate::error::{CatalogError, Diagnostic, Severity};
use log::debug;
use std::collections::HashSet;
use std::mem;

/// Parse `text` into a store, accumulating diagnostics into `diagnostics`.
///
/// `origin` labels errors (a path for files, `"<string>"` for in-memory
/// input).
pub(crate) fn parse(
    text: &str,
    origin: &str,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<Store, CatalogError> {
    let mut parser = Parser {
        store: Store::new(),
        domain: DEFAULT_DOMAIN.to_string(),
        draft: Draft::default(),
        target: Target::None,
        seen_keys: HashSet::new(),
        obsolete_block: false,
        diagnostics,
    };

    for (idx, raw) in text.lines().enumerate() {
        let line_no = idx + 1;
        let mut line = raw.strip_suffix('\r').unwrap_or(raw);
        if line_no == 1 {
            line = line.strip_prefix('\u{feff}').unwrap_or(line);
        }
        parser.consume(line_no, line);
    }
    let final_line = text.lines().count() + 1;
    parser.flush(final_line);

    let first_error = parser
        .diagnostics
        .iter()
        .find(|d| d.severity == Severity::Error)
        .cloned();
    match first_error {
        Some(diag) => Err(CatalogError::Parse {
            origin: origin.to_string(),
            line: diag.line,
            message: diag.message,
        }),
        None => {
            debug!(
                "parsed {} message(s) across {} domain(s) from {origin}",
                parser.store.entries.len(),
                parser.store.domains.len()
            );
            Ok(parser.store)
        }
    }
}

/// Which string field continuation lines append to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Target {
    None,
    Msgctxt,
    Msgid,
    MsgidPlural,
    Msgstr,
    Plural(usize),
}

/// Accumulated fields of the entry currently being read.
#[derive(Debug, Default)]
struct Draft {
    started: bool,
    line: usize,
    comments: Vec<String>,
    extracted: Vec<String>,
    references: Vec<String>,
    flags: Vec<String>,
    previous: Vec<String>,
    msgctxt: Option<String>,
    msgid: Option<String>,
    msgid_plural: Option<String>,
    msgstr: Option<String>,
    plural: Vec<(usize, String)>,
}

impl Draft {
    fn has_strings(&self) -> bool {
        self.msgctxt.is_some()
            || self.msgid.is_some()
            || self.msgid_plural.is_some()
            || self.msgstr.is_some()
            || !self.plural.is_empty()
    }
}

struct Parser<'a> {
    store: Store,
    domain: String,
    draft: Draft,
    target: Target,
    seen_keys: HashSet<(String, Option<String>, String)>,
    obsolete_block: bool,
    diagnostics: &'a mut Vec<Diagnostic>,
}

impl Parser<'_> {
    fn consume(&mut self, line_no: usize, line: &str) {
        let trimmed = line.trim_start();
        if trimmed.is_empty() {
            self.obsolete_block = false;
            if self.draft.has_strings() {
                self.flush(line_no);
            }
            return;
        }

        if let Some(rest) = trimmed.strip_prefix('#') {
            self.consume_comment(line_no, rest);
            return;
        }
        self.obsolete_block = false;

        if trimmed.starts_with('"') {
            self.consume_continuation(line_no, trimmed);
            return;
        }
        self.consume_keyword(line_no, trimmed);
    }

    fn consume_comment(&mut self, line_no: usize, rest: &str) {
        if rest.starts_with('~') {
            // Obsolete entries carry no accessor in the message API, so
            // keeping them would make them invisible and unwritable.
            if self.draft.has_strings() {
                self.flush(line_no);
            }
            if !self.obsolete_block {
                self.warn(line_no, "obsolete entry skipped");
                self.obsolete_block = true;
            }
            return;
        }
        self.obsolete_block = false;

        // Comments always introduce the next entry; a comment after string
        // fields closes the entry in progress.
        if self.draft.has_strings() {
            self.flush(line_no);
        }
        self.touch(line_no);

        match rest.chars().next() {
            Some('.') => self
                .draft
                .extracted
                .push(strip_marker_space(&rest[1..]).to_string()),
            Some(':') => {
                let refs = rest[1..].trim();
                if !refs.is_empty() {
                    self.draft.references.push(refs.to_string());
                }
            }
            Some(',') => {
                for flag in rest[1..].split(',') {
                    let flag = flag.trim();
                    if !flag.is_empty() {
                        self.draft.flags.push(flag.to_string());
                    }
                }
            }
            Some('|') => self
                .draft
                .previous
                .push(strip_marker_space(&rest[1..]).to_string()),
            _ => self
                .draft
                .comments
                .push(strip_marker_space(rest).to_string()),
        }
    }

    fn consume_continuation(&mut self, line_no: usize, line: &str) {
        let Some(chunk) = self.parse_quoted(line_no, line) else {
            return;
        };
        match self.target {
            Target::None => {
                self.error(line_no, "string continuation without a preceding keyword");
            }
            Target::Msgctxt => append(&mut self.draft.msgctxt, &chunk),
            Target::Msgid => append(&mut self.draft.msgid, &chunk),
            Target::MsgidPlural => append(&mut self.draft.msgid_plural, &chunk),
            Target::Msgstr => append(&mut self.draft.msgstr, &chunk),
            Target::Plural(index) => {
                if let Some((_, value)) = self.draft.plural.iter_mut().find(|(i, _)| *i == index) {
                    value.push_str(&chunk);
                }
            }
        }
    }

    fn consume_keyword(&mut self, line_no: usize, line: &str) {
        let split = line
            .find(|c: char| c.is_whitespace() || c == '"')
            .unwrap_or(line.len());
        let (keyword, rest) = line.split_at(split);

        match keyword {
            "domain" => {
                if self.draft.has_strings() {
                    self.flush(line_no);
                }
                if let Some(name) = self.parse_quoted(line_no, rest) {
                    if name.is_empty() {
                        self.error(line_no, "domain name must not be empty");
                    } else {
                        self.store.note_domain(&name);
                        self.domain = name;
                    }
                }
            }
            "msgctxt" => {
                if self.draft.msgid.is_some() {
                    self.flush(line_no);
                }
                self.touch(line_no);
                if self.draft.msgctxt.is_some() {
                    self.error(line_no, "duplicate msgctxt in one entry");
                }
                if let Some(value) = self.parse_quoted(line_no, rest) {
                    self.draft.msgctxt = Some(value);
                    self.target = Target::Msgctxt;
                }
            }
            "msgid" => {
                if self.draft.msgid.is_some() {
                    self.flush(line_no);
                }
                self.touch(line_no);
                if let Some(value) = self.parse_quoted(line_no, rest) {
                    self.draft.msgid = Some(value);
                    self.target = Target::Msgid;
                }
            }
            "msgid_plural" => {
                if self.draft.msgid.is_none() {
                    self.error(line_no, "msgid_plural before msgid");
                }
                if let Some(value) = self.parse_quoted(line_no, rest) {
                    self.draft.msgid_plural = Some(value);
                    self.target = Target::MsgidPlural;
                }
            }
            "msgstr" => {
                if self.draft.msgid.is_none() {
                    self.error(line_no, "msgstr before msgid");
                }
                if self.draft.msgstr.is_some() {
                    self.error(line_no, "duplicate msgstr in one entry");
                }
                if let Some(value) = self.parse_quoted(line_no, rest) {
                    self.draft.msgstr = Some(value);
                    self.target = Target::Msgstr;
                }
            }
            _ if keyword.starts_with("msgstr[") => {
                let Some(index) = parse_plural_index(keyword) else {
                    self.error(line_no, format!("malformed plural keyword '{keyword}'"));
                    return;
                };
                if self.draft.msgid.is_none() {
                    self.error(line_no, "msgstr[..] before msgid");
                }
                if self.draft.msgid_plural.is_none() {
                    self.error(line_no, "msgstr[..] on a message without msgid_plural");
                }
                if index >= MAX_PLURAL_FORMS {
                    self.error(
                        line_no,
                        format!("plural index {index} exceeds the supported maximum"),
                    );
                    return;
                }
                if self.draft.plural.iter().any(|(i, _)| *i == index) {
                    self.error(line_no, format!("duplicate msgstr[{index}]"));
                    return;
                }
                if let Some(value) = self.parse_quoted(line_no, rest) {
                    self.draft.plural.push((index, value));
                    self.target = Target::Plural(index);
                }
            }
            _ => {
                self.error(line_no, format!("unknown keyword '{keyword}'"));
            }
        }
    }

    /// Parse the single quoted string on a line, unescaping as it goes.
    fn parse_quoted(&mut self, line_no: usize, raw: &str) -> Option<String> {
        let raw = raw.trim();
        let Some(body) = raw.strip_prefix('"') else {
            self.error(line_no, "expected a double-quoted string");
            return None;
        };

        let mut value = String::with_capacity(body.len());
        let mut chars = body.char_indices();
        loop {
            let Some((pos, c)) = chars.next() else {
                self.error(line_no, "unterminated string");
                return None;
            };
            match c {
                '"' => {
                    let tail = body[pos + 1..].trim();
                    if !tail.is_empty() {
                        self.error(line_no, "trailing content after closing quote");
                        return None;
                    }
                    return Some(value);
                }
                '\\' => {
                    let Some((_, esc)) = chars.next() else {
                        self.error(line_no, "dangling backslash");
                        return None;
                    };
                    match esc {
                        'n' => value.push('\n'),
                        't' => value.push('\t'),
                        'r' => value.push('\r'),
                        '"' => value.push('"'),
                        '\\' => value.push('\\'),
                        'a' => value.push('\u{7}'),
                        'b' => value.push('\u{8}'),
                        'f' => value.push('\u{c}'),
                        'v' => value.push('\u{b}'),
                        '0' => value.push('\0'),
                        other => {
                            self.warn(line_no, format!("unknown escape sequence '\\{other}'"));
                            value.push(other);
                        }
                    }
                }
                other => value.push(other),
            }
        }
    }

    /// Close the entry in progress and move it into the store.
    fn flush(&mut self, boundary_line: usize) {
        let mut draft = mem::take(&mut self.draft);
        self.target = Target::None;
        if !draft.started {
            return;
        }
        let entry_line = draft.line;

        let Some(msgid) = draft.msgid.take() else {
            if draft.has_strings() {
                self.error(entry_line, "entry without msgid");
            } else {
                // Trailing comments with no entry attached; nothing to keep.
                debug!("dropping stray comment block ending at line {boundary_line}");
            }
            return;
        };

        let msgstr = match (&draft.msgid_plural, draft.msgstr, draft.plural.is_empty()) {
            (Some(_), Some(_), _) => {
                self.error(entry_line, "plural message with non-indexed msgstr");
                String::new()
            }
            (Some(_), None, true) => {
                self.error(entry_line, "plural message without msgstr[..] forms");
                String::new()
            }
            (None, None, _) => {
                self.error(entry_line, "message without msgstr");
                String::new()
            }
            (None, Some(s), _) => s,
            (Some(_), None, false) => String::new(),
        };

        let msgstr_plural = if draft.plural.is_empty() {
            Vec::new()
        } else {
            let width = draft.plural.iter().map(|(i, _)| *i).max().unwrap_or(0) + 1;
            let mut slots = vec![None; width];
            for (index, value) in draft.plural {
                slots[index] = Some(value);
            }
            if slots.iter().any(Option::is_none) {
                self.warn(entry_line, "non-contiguous msgstr[..] indices");
            }
            slots
        };

        let key = (
            self.domain.clone(),
            draft.msgctxt.clone(),
            msgid.clone(),
        );
        if !self.seen_keys.insert(key) {
            self.error(
                entry_line,
                format!("duplicate message definition for msgid {msgid:?}"),
            );
            return;
        }

        self.store.push(Entry {
            domain: self.domain.clone(),
            msgctxt: draft.msgctxt,
            msgid,
            msgid_plural: draft.msgid_plural,
            msgstr,
            msgstr_plural,
            comments: draft.comments.join("\n"),
            extracted: draft.extracted.join("\n"),
            references: draft.references,
            flags: draft.flags,
            previous: draft.previous,
        });
    }

    fn touch(&mut self, line_no: usize) {
        if !self.draft.started {
            self.draft.started = true;
            self.draft.line = line_no;
        }
    }

    fn warn(&mut self, line: usize, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::warning(line, message));
    }

    fn error(&mut self, line: usize, message: impl Into<String>) {
        self.diagnostics.push(Diagnostic::error(line, message));
    }
}

fn append(slot: &mut Option<String>, chunk: &str) {
    if let Some(value) = slot {
        value.push_str(chunk);
    }
}

/// `msgstr[3]` -> `3`.
fn parse_plural_index(keyword: &str) -> Option<usize> {
    keyword
        .strip_prefix("msgstr[")?
        .strip_suffix(']')?
        .parse()
        .ok()
}

/// Comment markers conventionally carry one space before the text.
fn strip_marker_space(rest: &str) -> &str {
    rest.strip_prefix(' ').unwrap_or(rest)
}
