//! Ordered key pool with a rotation cursor
//!
//! The pool is owned by whoever drives the fetch loop and passed by `&mut`;
//! nothing in it is shared across threads. Keys keep the order they were
//! loaded in, and rotation always moves to the next index modulo the pool size.

use common::Secret;
use tracing::{info, warn};

use crate::error::{Error, Result};

/// Non-empty, ordered set of API keys plus the index of the key in use.
#[derive(Debug)]
pub struct CredentialPool {
    keys: Vec<Secret<String>>,
    cursor: usize,
}

impl CredentialPool {
    /// Build a pool from keys in priority order.
    ///
    /// Empty strings are dropped. Returns `Error::Empty` if nothing is left.
    pub fn new<I>(keys: I) -> Result<Self>
    where
        I: IntoIterator<Item = String>,
    {
        let keys: Vec<Secret<String>> = keys
            .into_iter()
            .filter(|k| !k.is_empty())
            .map(Secret::new)
            .collect();
        if keys.is_empty() {
            return Err(Error::Empty);
        }
        info!(keys = keys.len(), "credential pool initialized");
        Ok(Self { keys, cursor: 0 })
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    /// Always false for a constructed pool.
    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Index of the key currently in use.
    pub fn cursor(&self) -> usize {
        self.cursor
    }

    /// The key to attach to the next request.
    pub fn current(&self) -> &Secret<String> {
        &self.keys[self.cursor]
    }

    /// Advance to the next key, wrapping around. Returns the new cursor.
    pub fn rotate(&mut self) -> usize {
        self.cursor = (self.cursor + 1) % self.keys.len();
        self.cursor
    }

    /// Rotate away from a key whose quota is spent.
    ///
    /// `attempts` is the number of quota failures seen so far on the current
    /// page, including this one. The cursor always advances; once `attempts`
    /// reaches the pool size every key has been tried on this page and
    /// `Error::Exhausted` is returned.
    pub fn rotate_after_quota(&mut self, attempts: usize) -> Result<()> {
        let spent = self.cursor;
        let hint = self.current().hint();
        let next = self.rotate();
        warn!(
            key_index = spent,
            key_hint = %hint,
            next_index = next,
            attempts,
            "api key quota exceeded, switching api key"
        );
        if attempts >= self.keys.len() {
            return Err(Error::Exhausted {
                attempts,
                keys: self.keys.len(),
            });
        }
        Ok(())
    }
}
