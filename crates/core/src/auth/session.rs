//! Session orchestration: login, logout, refresh, self-view, list, retrieve.
//!
//! Every operation returns a [`CoreResult`]; callers render the error kind.
//! Responses only ever carry [`PublicIdentity`] values.

use std::sync::Arc;

use serde::Serialize;

use crate::auth::authenticator::{Authenticator, Credentials};
use crate::auth::scope::{can_view, AccessScoper};
use crate::auth::store::{CredentialStore, RevocationStore};
use crate::auth::token::{TokenConfig, TokenPair, TokenService};
use crate::error::{CoreError, CoreResult};
use crate::identity::{Identity, PublicIdentity};
use crate::types::DbId;

/// Result of a successful login.
#[derive(Debug, Clone, Serialize)]
pub struct LoginOutcome {
    #[serde(flatten)]
    pub tokens: TokenPair,
    pub user: PublicIdentity,
}

#[derive(Clone)]
pub struct SessionController {
    authenticator: Authenticator,
    tokens: TokenService,
    scoper: AccessScoper,
    credentials: Arc<dyn CredentialStore>,
}

impl SessionController {
    pub fn new(
        config: TokenConfig,
        credentials: Arc<dyn CredentialStore>,
        revocations: Arc<dyn RevocationStore>,
    ) -> Self {
        Self {
            authenticator: Authenticator::new(Arc::clone(&credentials)),
            tokens: TokenService::new(config, Arc::clone(&credentials), revocations),
            scoper: AccessScoper::new(Arc::clone(&credentials)),
            credentials,
        }
    }

    pub async fn login(&self, credentials: Credentials<'_>) -> CoreResult<LoginOutcome> {
        let identity = self.authenticator.authenticate(credentials).await?;
        let tokens = self.tokens.issue(&identity)?;
        tracing::info!(user_id = identity.id, role = %identity.role, "User logged in");

        Ok(LoginOutcome {
            tokens,
            user: identity.public_view(),
        })
    }

    /// Revoke `refresh_token` if one was supplied.
    ///
    /// An absent or empty token is a successful no-op. Store failures are
    /// logged with their cause and surface only as [`CoreError::LogoutFailed`].
    pub async fn logout(&self, refresh_token: Option<&str>) -> CoreResult<()> {
        let Some(token) = refresh_token.filter(|t| !t.is_empty()) else {
            return Ok(());
        };

        match self.tokens.revoke(token).await {
            Ok(()) => Ok(()),
            Err(e @ (CoreError::TokenInvalid | CoreError::TokenExpired)) => Err(e),
            Err(e) => {
                tracing::error!(error = %e, "Logout failed");
                Err(CoreError::LogoutFailed)
            }
        }
    }

    pub async fn refresh(&self, refresh_token: &str) -> CoreResult<TokenPair> {
        self.tokens.refresh(refresh_token).await
    }

    /// Resolve the bearer of an access token.
    pub async fn authenticate_access(&self, access_token: &str) -> CoreResult<Identity> {
        self.tokens.validate_access(access_token).await
    }

    pub fn whoami(&self, requester: &Identity) -> PublicIdentity {
        requester.public_view()
    }

    pub async fn list_visible(&self, requester: &Identity) -> CoreResult<Vec<PublicIdentity>> {
        let visible = self.scoper.visible_set(requester).await?;
        Ok(visible.iter().map(PublicIdentity::from).collect())
    }

    /// Fetch one identity if `requester` may see it.
    ///
    /// Nonexistent and invisible ids fail with the same [`CoreError::NotFound`].
    pub async fn retrieve(&self, requester: &Identity, id: DbId) -> CoreResult<PublicIdentity> {
        if id == requester.id {
            return Ok(requester.public_view());
        }
        match self.credentials.find_by_id(id).await? {
            Some(target) if can_view(requester, &target) => Ok(target.public_view()),
            _ => Err(CoreError::NotFound { entity: "User", id }),
        }
    }
}
