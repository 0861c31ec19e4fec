//! Name-to-ID resolution.
//!
//! One parameterized lookup shared by both tools. The first listed match
//! is authoritative; there is no disambiguation between duplicates.

use tracing::debug;

use crate::error::{ReconcileError, Result};

use super::api::RancherApi;
use super::types::Lookup;

/// Resolves resource names to Rancher IDs.
pub struct Resolver<'a, A: RancherApi + ?Sized> {
    /// API used for listings.
    api: &'a A,
}

impl<'a, A: RancherApi + ?Sized> Resolver<'a, A> {
    /// Creates a new resolver.
    #[must_use]
    pub const fn new(api: &'a A) -> Self {
        Self { api }
    }

    /// Returns the ID of the first match, or `None` if nothing matches.
    ///
    /// # Errors
    ///
    /// Returns an error if the listing call fails.
    pub async fn find(&self, lookup: &Lookup) -> Result<Option<String>> {
        let found = self.api.list(lookup).await?;
        let id = found.into_iter().next().map(|r| r.id);

        match &id {
            Some(id) => debug!("{} '{}' resolved to {id}", lookup.kind(), lookup.name()),
            None => debug!("{} '{}' does not exist", lookup.kind(), lookup.name()),
        }

        Ok(id)
    }

    /// Returns the ID of the first match.
    ///
    /// # Errors
    ///
    /// Returns [`ReconcileError::NotFound`] if nothing matches, or an error
    /// if the listing call fails.
    pub async fn require(&self, lookup: &Lookup) -> Result<String> {
        self.find(lookup).await?.ok_or_else(|| {
            ReconcileError::NotFound {
                kind: lookup.kind(),
                name: lookup.name().to_string(),
            }
            .into()
        })
    }
}
