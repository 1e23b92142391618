//! Logical service names

use crate::error::ApiError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// One of the fixed set of backend services a factory manages
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ServiceName {
    Content,
    Community,
    Analytics,
    Admin,
    Search,
}

impl ServiceName {
    /// All services, in construction order
    pub const ALL: [ServiceName; 5] = [
        ServiceName::Content,
        ServiceName::Community,
        ServiceName::Analytics,
        ServiceName::Admin,
        ServiceName::Search,
    ];

    /// Lowercase service identifier
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Content => "content",
            Self::Community => "community",
            Self::Analytics => "analytics",
            Self::Admin => "admin",
            Self::Search => "search",
        }
    }
}

impl fmt::Display for ServiceName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ServiceName {
    type Err = ApiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|name| name.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| ApiError::not_found(format!("Unknown service: {s}")))
    }
}
