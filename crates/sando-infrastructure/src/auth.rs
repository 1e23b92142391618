//! Auth token store
//!
//! Process-wide set of valid opaque bearer tokens shared by the router guard
//! and every client of a factory. Membership is the whole check.

use crate::constants::DEV_AUTH_TOKEN;
use dashmap::DashSet;
use sando_domain::constants::{AUTHORIZATION_HEADER, BEARER_SCHEME};
use sando_domain::{ApiError, ApiResult, Headers};
use std::sync::Arc;
use tracing::debug;

/// Shared set of accepted tokens
///
/// Cloning yields a handle to the same set.
#[derive(Clone, Debug)]
pub struct AuthTokenStore {
    tokens: Arc<DashSet<String>>,
}

impl AuthTokenStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self {
            tokens: Arc::new(DashSet::new()),
        }
    }

    /// Create a store pre-seeded with the given tokens
    pub fn with_tokens<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let store = Self::new();
        for token in tokens {
            store.insert(token);
        }
        store
    }

    /// Issue and register a fresh random token
    pub fn issue(&self) -> String {
        let token = format!("sando-{}", uuid::Uuid::new_v4().simple());
        self.tokens.insert(token.clone());
        debug!(active = self.tokens.len(), "Issued auth token");
        token
    }

    /// Register an existing token
    pub fn insert<S: Into<String>>(&self, token: S) {
        self.tokens.insert(token.into());
    }

    /// Remove a token; returns whether it was present
    pub fn revoke(&self, token: &str) -> bool {
        let removed = self.tokens.remove(token).is_some();
        if removed {
            debug!(active = self.tokens.len(), "Revoked auth token");
        }
        removed
    }

    /// Whether the token is accepted
    pub fn contains(&self, token: &str) -> bool {
        self.tokens.contains(token)
    }

    /// Number of accepted tokens
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Whether no token is accepted
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Check the `Authorization` header and return the accepted token
    pub fn authorize(&self, headers: &Headers) -> ApiResult<String> {
        let token = bearer_token(headers)
            .ok_or_else(|| ApiError::unauthorized("Missing bearer token"))?;
        if self.contains(token) {
            Ok(token.to_string())
        } else {
            Err(ApiError::unauthorized("Invalid or expired token"))
        }
    }
}

impl Default for AuthTokenStore {
    fn default() -> Self {
        Self::with_tokens([DEV_AUTH_TOKEN])
    }
}

/// Extract the token from an `Authorization: Bearer <token>` header
///
/// The scheme is matched case-insensitively; an empty token counts as absent.
pub fn bearer_token(headers: &Headers) -> Option<&str> {
    let value = headers.get(AUTHORIZATION_HEADER)?;
    let (scheme, token) = value.trim().split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case(BEARER_SCHEME) && !token.is_empty()).then_some(token)
}

/// `Authorization` header value for a token
pub fn bearer_header_value(token: &str) -> String {
    format!("{BEARER_SCHEME} {token}")
}
