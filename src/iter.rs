//! Single-pass cursors over a catalog's messages.

use crate::catalog::model::SharedStore;
use crate::message::Message;
use std::iter::FusedIterator;

/// A forward-only cursor over the messages of one domain.
///
/// Cursors are single-use: once the end is reached the cursor is exhausted
/// permanently, and further advances keep yielding `None`. Restarting means
/// asking the catalog for a fresh cursor. A cursor holds its own handle to
/// the entry table, so it stays valid if the catalog is reloaded or dropped
/// mid-pass — it simply finishes walking the table it started on.
#[derive(Debug)]
pub struct MessageIterator {
    store: SharedStore,
    domain: String,
    pos: usize,
    exhausted: bool,
}

impl MessageIterator {
    pub(crate) fn new(store: SharedStore, domain: &str) -> Self {
        Self {
            store,
            domain: domain.to_string(),
            pos: 0,
            exhausted: false,
        }
    }

    /// The domain this cursor walks.
    pub fn domain(&self) -> &str {
        &self.domain
    }
}

impl Iterator for MessageIterator {
    type Item = Message;

    fn next(&mut self) -> Option<Message> {
        if self.exhausted {
            return None;
        }
        loop {
            let candidate = self.store.borrow().entries.get(self.pos).cloned();
            let Some(entry) = candidate else {
                self.exhausted = true;
                return None;
            };
            self.pos += 1;
            if entry.borrow().domain == self.domain {
                return Some(Message::new(self.store.clone(), entry));
            }
        }
    }
}

impl FusedIterator for MessageIterator {}
