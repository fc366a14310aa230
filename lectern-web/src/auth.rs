//! Request authentication.
//!
//! Lectern does not mint identities; an external auth service does. This
//! module only resolves a bearer token into an `Identity` through the
//! `AuthProvider` collaborator. Anonymous and unrecognized callers get no
//! identity, which the pipeline turns into 401 before any asset lookup.

use std::collections::HashMap;

use async_trait::async_trait;
use axum::http::{HeaderMap, header};
use lectern_core::entitlement::Identity;

/// Resolves bearer tokens to authenticated identities.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// Returns the identity the token belongs to, if any.
    async fn identity(&self, token: &str) -> Option<Identity>;
}

/// Fixed token table, issued out-of-band (library manifest or an auth
/// service export).
#[derive(Debug, Default)]
pub struct StaticTokenAuth {
    tokens: HashMap<String, Identity>,
}

impl StaticTokenAuth {
    pub fn new(tokens: HashMap<String, Identity>) -> Self {
        Self { tokens }
    }
}

#[async_trait]
impl AuthProvider for StaticTokenAuth {
    async fn identity(&self, token: &str) -> Option<Identity> {
        self.tokens.get(token).copied()
    }
}

/// Extracts and resolves the caller's identity from request headers.
pub async fn authenticate(provider: &dyn AuthProvider, headers: &HeaderMap) -> Option<Identity> {
    let token = bearer_token(headers)?;
    provider.identity(token).await
}

fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    headers
        .get(header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}

#[cfg(test)]
mod tests {
    use axum::http::HeaderValue;
    use lectern_core::entitlement::{Role, UserId};

    use super::*;

    fn provider() -> StaticTokenAuth {
        let mut tokens = HashMap::new();
        tokens.insert(
            "alice-token".to_string(),
            Identity {
                user_id: UserId(42),
                role: Role::User,
            },
        );
        StaticTokenAuth::new(tokens)
    }

    fn headers_with_auth(value: &'static str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_static(value));
        headers
    }

    #[tokio::test]
    async fn resolves_known_bearer_token() {
        let identity = authenticate(&provider(), &headers_with_auth("Bearer alice-token")).await;
        assert_eq!(identity.unwrap().user_id, UserId(42));
    }

    #[tokio::test]
    async fn unknown_token_is_anonymous() {
        let identity = authenticate(&provider(), &headers_with_auth("Bearer wrong")).await;
        assert!(identity.is_none());
    }

    #[tokio::test]
    async fn missing_header_is_anonymous() {
        let identity = authenticate(&provider(), &HeaderMap::new()).await;
        assert!(identity.is_none());
    }

    #[tokio::test]
    async fn non_bearer_scheme_is_anonymous() {
        let identity = authenticate(&provider(), &headers_with_auth("Basic alice-token")).await;
        assert!(identity.is_none());
    }
}
