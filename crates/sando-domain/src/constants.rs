//! Domain layer constants
//!
//! Protocol-level names shared by the router and the clients.
//! Infrastructure defaults remain in `sando_infrastructure::constants`.

/// Authorization header name
pub const AUTHORIZATION_HEADER: &str = "authorization";

/// Bearer token scheme
pub const BEARER_SCHEME: &str = "Bearer";

/// Header carrying the calling service name
pub const SERVICE_HEADER: &str = "x-sando-service";

/// Path prefix of per-service health endpoints
pub const HEALTH_PATH_PREFIX: &str = "/health";
