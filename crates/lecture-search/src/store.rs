//! Where trigram postings come from.
//!
//! The searcher only needs "postings for this trigram". The in-memory
//! [`TrigramIndex`] is the usual store; anything slower (a file, a browser
//! database behind the WASM bindings) implements the same trait and is put
//! behind a [`TrigramCache`](crate::cache::TrigramCache).

use crate::error::Result;
use crate::index::{Postings, TrigramIndex};

/// A source of trigram postings.
pub trait TrigramStore {
    /// Postings of `trigram`, or `None` if no lecture emitted it.
    fn postings(&self, trigram: &str) -> Result<Option<Postings>>;
}

impl TrigramStore for TrigramIndex {
    fn postings(&self, trigram: &str) -> Result<Option<Postings>> {
        Ok(self.get(trigram).cloned())
    }
}

impl<S: TrigramStore + ?Sized> TrigramStore for &S {
    fn postings(&self, trigram: &str) -> Result<Option<Postings>> {
        (**self).postings(trigram)
    }
}

impl<S: TrigramStore + ?Sized> TrigramStore for Box<S> {
    fn postings(&self, trigram: &str) -> Result<Option<Postings>> {
        (**self).postings(trigram)
    }
}
