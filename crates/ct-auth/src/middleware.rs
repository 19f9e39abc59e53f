//! Authentication Middleware
//!
//! Resolves the opaque token in the `Authorization` header to a user.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;

use crate::current_user::CurrentUser;

/// Authentication errors
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Authentication required")]
    Required,
    #[error("Invalid credentials")]
    InvalidCredentials,
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Authentication result
#[derive(Debug)]
pub enum AuthResult {
    Authenticated(CurrentUser),
    Failed(AuthError),
}

/// Looks up the user a token was issued to
#[async_trait]
pub trait TokenResolver: Send + Sync {
    /// `Ok(None)` when no user holds the token
    async fn resolve_token(&self, token: &str) -> Result<Option<CurrentUser>, AuthError>;
}

/// Authenticator for validating requests
#[derive(Clone)]
pub struct Authenticator {
    resolver: Arc<dyn TokenResolver>,
}

impl Authenticator {
    pub fn new(resolver: Arc<dyn TokenResolver>) -> Self {
        Self { resolver }
    }

    /// Authenticate a request using available headers
    pub async fn authenticate(&self, headers: &RequestHeaders) -> AuthResult {
        let Some(token) = headers.authorization.as_deref().and_then(extract_token) else {
            return AuthResult::Failed(AuthError::Required);
        };

        match self.resolver.resolve_token(token).await {
            Ok(Some(user)) => AuthResult::Authenticated(user),
            Ok(None) => {
                tracing::debug!("Unknown token presented");
                AuthResult::Failed(AuthError::InvalidCredentials)
            }
            Err(e) => AuthResult::Failed(e),
        }
    }
}

/// The token is the raw header value; a `Bearer ` prefix is accepted too.
pub fn extract_token(auth_header: &str) -> Option<&str> {
    let value = auth_header.trim_start();
    let token = match value.get(..7) {
        Some(prefix) if prefix.eq_ignore_ascii_case("bearer ") => value[7..].trim(),
        _ => value.trim(),
    };
    if token.is_empty() {
        None
    } else {
        Some(token)
    }
}

/// Request headers relevant for authentication
#[derive(Debug, Default)]
pub struct RequestHeaders {
    pub authorization: Option<String>,
}

impl RequestHeaders {
    /// Create from a list of header key-value pairs
    pub fn from_pairs(pairs: &[(impl AsRef<str>, impl AsRef<str>)]) -> Self {
        let mut headers = Self::default();

        for (name, value) in pairs {
            if name.as_ref().eq_ignore_ascii_case("authorization") {
                headers.authorization = Some(value.as_ref().to_string());
            }
        }

        headers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedResolver;

    #[async_trait]
    impl TokenResolver for FixedResolver {
        async fn resolve_token(&self, token: &str) -> Result<Option<CurrentUser>, AuthError> {
            Ok((token == "test").then(|| CurrentUser::new(1, "test", "Test User")))
        }
    }

    fn authenticator() -> Authenticator {
        Authenticator::new(Arc::new(FixedResolver))
    }

    #[tokio::test]
    async fn test_raw_token_authenticates() {
        let headers = RequestHeaders::from_pairs(&[("Authorization", "test")]);
        match authenticator().authenticate(&headers).await {
            AuthResult::Authenticated(user) => assert_eq!(user.id, 1),
            other => panic!("Expected authenticated result, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_bearer_prefix_is_accepted() {
        let headers = RequestHeaders::from_pairs(&[("authorization", "Bearer test")]);
        assert!(matches!(
            authenticator().authenticate(&headers).await,
            AuthResult::Authenticated(_)
        ));
    }

    #[tokio::test]
    async fn test_missing_header_requires_auth() {
        let headers = RequestHeaders::default();
        assert!(matches!(
            authenticator().authenticate(&headers).await,
            AuthResult::Failed(AuthError::Required)
        ));
    }

    #[tokio::test]
    async fn test_unknown_token_is_rejected() {
        let headers = RequestHeaders::from_pairs(&[("Authorization", "salah")]);
        assert!(matches!(
            authenticator().authenticate(&headers).await,
            AuthResult::Failed(AuthError::InvalidCredentials)
        ));
    }

    #[test]
    fn test_extract_token() {
        assert_eq!(extract_token("abc"), Some("abc"));
        assert_eq!(extract_token("bearer abc"), Some("abc"));
        assert_eq!(extract_token("   "), None);
        assert_eq!(extract_token("Bearer "), None);
    }
}
