//! Role and institution scoped visibility.
//!
//! A director sees every identity in its own institution. Everyone else,
//! including a director with no institution, sees only itself.

use std::sync::Arc;

use crate::auth::store::CredentialStore;
use crate::error::CoreResult;
use crate::identity::Identity;

#[derive(Clone)]
pub struct AccessScoper {
    store: Arc<dyn CredentialStore>,
}

impl AccessScoper {
    pub fn new(store: Arc<dyn CredentialStore>) -> Self {
        Self { store }
    }

    /// Identities `requester` may view, ordered by id.
    pub async fn visible_set(&self, requester: &Identity) -> CoreResult<Vec<Identity>> {
        match (requester.is_director(), requester.institution_id) {
            (true, Some(institution_id)) => self.store.list_by_institution(institution_id).await,
            _ => Ok(vec![requester.clone()]),
        }
    }
}

/// Whether `requester` may view `target`.
pub fn can_view(requester: &Identity, target: &Identity) -> bool {
    if requester.id == target.id {
        return true;
    }
    requester.is_director()
        && requester.institution_id.is_some()
        && requester.institution_id == target.institution_id
}
