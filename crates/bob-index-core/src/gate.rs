//! Existence check used to admit or deny a new release name.

use crate::error::Result;
use crate::index::IndexStore;

/// Outcome of an admission check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// No release with that name is indexed.
    Allow,
    /// A release with that name already exists.
    Deny,
}

pub struct AdmissionGate<'a, S: IndexStore + ?Sized> {
    store: &'a S,
}

impl<'a, S: IndexStore + ?Sized> AdmissionGate<'a, S> {
    pub fn new(store: &'a S) -> Self {
        Self { store }
    }

    pub fn exists(&self, name: &str, case_sensitive: bool) -> Result<bool> {
        Ok(self.store.find_exact(name, case_sensitive)?.is_some())
    }

    pub fn check(&self, name: &str, case_sensitive: bool) -> Result<Admission> {
        Ok(if self.exists(name, case_sensitive)? {
            Admission::Deny
        } else {
            Admission::Allow
        })
    }
}
