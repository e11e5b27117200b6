//! Entry table -> PO text.
//!
//! Output is deterministic: comment block, then `msgctxt`/`msgid`/
//! `msgid_plural`, then `msgstr` or `msgstr[..]` slots, entries separated by
//! blank lines and grouped per domain under a `domain` directive. A rendered
//! catalog re-reads field-for-field identical to the table it came from.

use crate::catalog::model::{DEFAULT_DOMAIN, Entry, Store};
use std::fmt::Write;

pub(crate) fn render(store: &Store) -> String {
    let mut out = String::new();
    let mut first = true;
    for domain in &store.domains {
        let entries: Vec<_> = store
            .entries
            .iter()
            .filter(|e| e.borrow().domain == *domain)
            .collect();
        if entries.is_empty() && domain != DEFAULT_DOMAIN {
            continue;
        }
        if domain != DEFAULT_DOMAIN {
            if !first {
                out.push('\n');
            }
            let _ = writeln!(out, "domain \"{}\"", escape(domain));
            first = false;
        }
        for entry in entries {
            if !first {
                out.push('\n');
            }
            render_entry(&mut out, &entry.borrow());
            first = false;
        }
    }
    out
}

fn render_entry(out: &mut String, entry: &Entry) {
    if !entry.comments.is_empty() {
        for line in entry.comments.split('\n') {
            push_comment(out, "#", line);
        }
    }
    if !entry.extracted.is_empty() {
        for line in entry.extracted.split('\n') {
            push_comment(out, "#.", line);
        }
    }
    for reference in &entry.references {
        push_comment(out, "#:", reference);
    }
    if !entry.flags.is_empty() {
        let _ = writeln!(out, "#, {}", entry.flags.join(", "));
    }
    for line in &entry.previous {
        push_comment(out, "#|", line);
    }

    if let Some(msgctxt) = &entry.msgctxt {
        push_field(out, "msgctxt", msgctxt);
    }
    push_field(out, "msgid", &entry.msgid);
    if let Some(plural) = &entry.msgid_plural {
        push_field(out, "msgid_plural", plural);
    }

    if entry.is_plural() {
        let last_set = entry
            .msgstr_plural
            .iter()
            .rposition(Option::is_some);
        match last_set {
            // The format cannot express "no slot at all"; an empty first
            // slot is the closest well-formed rendering.
            None => push_field(out, "msgstr[0]", ""),
            Some(last) => {
                for (index, slot) in entry.msgstr_plural.iter().take(last + 1).enumerate() {
                    let keyword = format!("msgstr[{index}]");
                    push_field(out, &keyword, slot.as_deref().unwrap_or(""));
                }
            }
        }
    } else {
        push_field(out, "msgstr", &entry.msgstr);
    }
}

/// Write one `keyword "value"` field, splitting embedded newlines into the
/// conventional multi-line form (`keyword ""` followed by one quoted segment
/// per line).
fn push_field(out: &mut String, keyword: &str, value: &str) {
    let segments: Vec<&str> = value.split_inclusive('\n').collect();
    if segments.len() <= 1 {
        let _ = writeln!(out, "{keyword} \"{}\"", escape(value));
        return;
    }
    let _ = writeln!(out, "{keyword} \"\"");
    for segment in segments {
        let _ = writeln!(out, "\"{}\"", escape(segment));
    }
}

fn push_comment(out: &mut String, marker: &str, line: &str) {
    if line.is_empty() {
        let _ = writeln!(out, "{marker}");
    } else {
        let _ = writeln!(out, "{marker} {line}");
    }
}

fn escape(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '"' => escaped.push_str("\\\""),
            '\\' => escaped.push_str("\\\\"),
            '\n' => escaped.push_str("\\n"),
            '\t' => escaped.push_str("\\t"),
            '\r' => escaped.push_str("\\r"),
            '\u{7}' => escaped.push_str("\\a"),
            '\u{8}' => escaped.push_str("\\b"),
            '\u{c}' => escaped.push_str("\\f"),
            '\u{b}' => escaped.push_str("\\v"),
            '\0' => escaped.push_str("\\0"),
            other => escaped.push(other),
        }
    }
    escaped
}
