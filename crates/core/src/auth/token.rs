//! Access/refresh token issuance, validation and revocation.
//!
//! Both tokens are HS256-signed JWTs carrying a [`Claims`] payload; the
//! `token_type` claim keeps one from being accepted in place of the other.
//! Access tokens are stateless. Refresh tokens can be revoked by recording
//! their `jti` in a [`RevocationStore`].

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::auth::store::{CredentialStore, RevocationStore};
use crate::error::{CoreError, CoreResult};
use crate::identity::Identity;
use crate::types::{DbId, Timestamp};

/// Default access token expiry in minutes.
pub const DEFAULT_ACCESS_EXPIRY_MINS: i64 = 15;
/// Default refresh token expiry in days.
pub const DEFAULT_REFRESH_EXPIRY_DAYS: i64 = 7;

/// Configuration for token generation and validation.
#[derive(Debug, Clone)]
pub struct TokenConfig {
    /// HMAC-SHA256 secret used to sign and verify tokens.
    pub secret: String,
    /// Access token lifetime in minutes (default: 15).
    pub access_token_expiry_mins: i64,
    /// Refresh token lifetime in days (default: 7).
    pub refresh_token_expiry_days: i64,
}

impl TokenConfig {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: secret.into(),
            access_token_expiry_mins: DEFAULT_ACCESS_EXPIRY_MINS,
            refresh_token_expiry_days: DEFAULT_REFRESH_EXPIRY_DAYS,
        }
    }

    fn lifetime(&self, token_type: TokenType) -> Duration {
        match token_type {
            TokenType::Access => Duration::minutes(self.access_token_expiry_mins),
            TokenType::Refresh => Duration::days(self.refresh_token_expiry_days),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenType {
    Access,
    Refresh,
}

/// JWT claims embedded in every token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject -- the identity's id.
    pub sub: DbId,
    pub token_type: TokenType,
    /// Expiration time (UTC Unix timestamp).
    pub exp: i64,
    /// Issued-at time (UTC Unix timestamp).
    pub iat: i64,
    /// Unique token identifier (UUID v4), the revocation key.
    pub jti: String,
}

impl Claims {
    pub fn expires_at(&self) -> CoreResult<Timestamp> {
        DateTime::from_timestamp(self.exp, 0).ok_or(CoreError::TokenInvalid)
    }
}

/// A freshly issued access/refresh pair.
#[derive(Debug, Clone, Serialize)]
pub struct TokenPair {
    pub access: String,
    pub refresh: String,
}

/// Issues, validates, rotates and revokes tokens.
#[derive(Clone)]
pub struct TokenService {
    config: TokenConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    credentials: Arc<dyn CredentialStore>,
    revocations: Arc<dyn RevocationStore>,
}

impl TokenService {
    pub fn new(
        config: TokenConfig,
        credentials: Arc<dyn CredentialStore>,
        revocations: Arc<dyn RevocationStore>,
    ) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(config.secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
            config,
            credentials,
            revocations,
        }
    }

    /// Issue a new access/refresh pair for `identity`.
    pub fn issue(&self, identity: &Identity) -> CoreResult<TokenPair> {
        Ok(TokenPair {
            access: self.sign(identity.id, TokenType::Access)?,
            refresh: self.sign(identity.id, TokenType::Refresh)?,
        })
    }

    /// Resolve an access token to the active identity it was issued for.
    pub async fn validate_access(&self, token: &str) -> CoreResult<Identity> {
        let claims = self.decode(token, TokenType::Access)?;
        self.active_subject(claims.sub).await
    }

    /// Decode a refresh token and check it has not been revoked.
    pub async fn validate_refresh(&self, token: &str) -> CoreResult<Claims> {
        let claims = self.decode(token, TokenType::Refresh)?;
        if self.revocations.is_revoked(&claims.jti).await? {
            return Err(CoreError::TokenInvalid);
        }
        Ok(claims)
    }

    /// Exchange a refresh token for a new pair, revoking the presented one.
    ///
    /// A refresh token yields at most one new pair: if another request
    /// revoked it first, this fails with [`CoreError::TokenInvalid`].
    pub async fn refresh(&self, token: &str) -> CoreResult<TokenPair> {
        let claims = self.validate_refresh(token).await?;

        let newly_revoked = self
            .revocations
            .revoke(&claims.jti, claims.expires_at()?)
            .await?;
        if !newly_revoked {
            return Err(CoreError::TokenInvalid);
        }

        let identity = self.active_subject(claims.sub).await?;
        tracing::debug!(user_id = identity.id, "Refresh token rotated");
        self.issue(&identity)
    }

    /// Blacklist a refresh token. Revoking an already revoked token succeeds.
    ///
    /// Malformed tokens fail with [`CoreError::TokenInvalid`] and expired ones
    /// with [`CoreError::TokenExpired`]; neither is recorded.
    pub async fn revoke(&self, token: &str) -> CoreResult<()> {
        let claims = self.decode(token, TokenType::Refresh)?;
        let newly_revoked = self
            .revocations
            .revoke(&claims.jti, claims.expires_at()?)
            .await?;
        tracing::debug!(user_id = claims.sub, newly_revoked, "Refresh token revoked");
        Ok(())
    }

    fn sign(&self, subject: DbId, token_type: TokenType) -> CoreResult<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: subject,
            token_type,
            exp: (now + self.config.lifetime(token_type)).timestamp(),
            iat: now.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| CoreError::Internal(format!("Token generation error: {e}")))
    }

    fn decode(&self, token: &str, expected: TokenType) -> CoreResult<Claims> {
        let data = decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
            match e.kind() {
                ErrorKind::ExpiredSignature => CoreError::TokenExpired,
                _ => CoreError::TokenInvalid,
            }
        })?;

        if data.claims.token_type != expected {
            return Err(CoreError::TokenInvalid);
        }
        Ok(data.claims)
    }

    async fn active_subject(&self, id: DbId) -> CoreResult<Identity> {
        match self.credentials.find_by_id(id).await? {
            Some(identity) if identity.is_active => Ok(identity),
            _ => Err(CoreError::TokenInvalid),
        }
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use super::*;
    use crate::auth::memory::{MemoryCredentialStore, MemoryRevocationStore};
    use crate::roles::Role;

    fn identity(id: DbId, is_active: bool) -> Identity {
        Identity {
            id,
            username: format!("user{id}"),
            email: format!("user{id}@example.edu"),
            password_hash: String::new(),
            role: Role::Teacher,
            institution_id: Some(1),
            is_active,
        }
    }

    fn test_config() -> TokenConfig {
        TokenConfig::new("test-secret-that-is-long-enough-for-hmac")
    }

    fn service_with(config: TokenConfig) -> (TokenService, Arc<MemoryRevocationStore>) {
        let credentials = Arc::new(MemoryCredentialStore::with_identities([
            identity(42, true),
            identity(43, false),
        ]));
        let revocations = Arc::new(MemoryRevocationStore::new());
        let service = TokenService::new(config, credentials, revocations.clone());
        (service, revocations)
    }

    fn service() -> (TokenService, Arc<MemoryRevocationStore>) {
        service_with(test_config())
    }

    #[tokio::test]
    async fn issued_access_token_resolves_to_same_identity() {
        let (tokens, _) = service();
        let pair = tokens.issue(&identity(42, true)).unwrap();

        let resolved = tokens.validate_access(&pair.access).await.unwrap();
        assert_eq!(resolved.id, 42);
    }

    #[tokio::test]
    async fn token_types_are_not_interchangeable() {
        let (tokens, _) = service();
        let pair = tokens.issue(&identity(42, true)).unwrap();

        assert_matches!(
            tokens.validate_access(&pair.refresh).await,
            Err(CoreError::TokenInvalid)
        );
        assert_matches!(
            tokens.validate_refresh(&pair.access).await,
            Err(CoreError::TokenInvalid)
        );
        assert_matches!(tokens.revoke(&pair.access).await, Err(CoreError::TokenInvalid));
    }

    #[tokio::test]
    async fn expired_access_token_reports_expiry() {
        let mut config = test_config();
        config.access_token_expiry_mins = -5;
        let (tokens, _) = service_with(config);
        let pair = tokens.issue(&identity(42, true)).unwrap();

        assert_matches!(
            tokens.validate_access(&pair.access).await,
            Err(CoreError::TokenExpired)
        );
    }

    #[tokio::test]
    async fn token_signed_with_other_secret_is_invalid() {
        let (tokens_a, _) = service_with(TokenConfig::new("secret-alpha"));
        let (tokens_b, _) = service_with(TokenConfig::new("secret-bravo"));
        let pair = tokens_a.issue(&identity(42, true)).unwrap();

        assert_matches!(
            tokens_b.validate_access(&pair.access).await,
            Err(CoreError::TokenInvalid)
        );
    }

    #[tokio::test]
    async fn access_token_for_inactive_subject_is_invalid() {
        let (tokens, _) = service();
        let pair = tokens.issue(&identity(43, false)).unwrap();

        assert_matches!(
            tokens.validate_access(&pair.access).await,
            Err(CoreError::TokenInvalid)
        );
    }

    #[tokio::test]
    async fn revoked_refresh_token_cannot_be_exchanged() {
        let (tokens, _) = service();
        let pair = tokens.issue(&identity(42, true)).unwrap();

        tokens.revoke(&pair.refresh).await.unwrap();

        assert_matches!(tokens.refresh(&pair.refresh).await, Err(CoreError::TokenInvalid));
    }

    #[tokio::test]
    async fn revoke_is_idempotent() {
        let (tokens, revocations) = service();
        let pair = tokens.issue(&identity(42, true)).unwrap();

        tokens.revoke(&pair.refresh).await.unwrap();
        tokens.revoke(&pair.refresh).await.unwrap();

        assert_eq!(revocations.len().await, 1);
    }

    #[tokio::test]
    async fn revoke_rejects_malformed_token_without_recording() {
        let (tokens, revocations) = service();

        assert_matches!(tokens.revoke("not.a.jwt").await, Err(CoreError::TokenInvalid));
        assert_matches!(tokens.revoke("").await, Err(CoreError::TokenInvalid));
        assert!(revocations.is_empty().await);
    }

    #[tokio::test]
    async fn revoke_rejects_expired_token_without_recording() {
        let mut config = test_config();
        config.refresh_token_expiry_days = -1;
        let (tokens, revocations) = service_with(config);
        let pair = tokens.issue(&identity(42, true)).unwrap();

        assert_matches!(tokens.revoke(&pair.refresh).await, Err(CoreError::TokenExpired));
        assert!(revocations.is_empty().await);
    }

    #[tokio::test]
    async fn refresh_rotates_and_retires_the_old_token() {
        let (tokens, _) = service();
        let pair = tokens.issue(&identity(42, true)).unwrap();

        let rotated = tokens.refresh(&pair.refresh).await.unwrap();
        assert_ne!(rotated.refresh, pair.refresh);
        assert_eq!(tokens.validate_access(&rotated.access).await.unwrap().id, 42);

        assert_matches!(tokens.refresh(&pair.refresh).await, Err(CoreError::TokenInvalid));
        assert!(tokens.refresh(&rotated.refresh).await.is_ok());
    }

    #[tokio::test]
    async fn refresh_for_deactivated_subject_fails() {
        let (tokens, _) = service();
        let pair = tokens.issue(&identity(43, false)).unwrap();

        assert_matches!(tokens.refresh(&pair.refresh).await, Err(CoreError::TokenInvalid));
    }
}
