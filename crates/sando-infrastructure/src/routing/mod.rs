//! Request routing
//!
//! Path templates, endpoint registrations, the response middleware pipeline
//! and the router that ties them together.

pub mod endpoint;
pub mod middleware;
pub mod router;
pub mod template;

pub use endpoint::{Endpoint, EndpointHandler, EndpointInfo, HandlerFuture};
pub use middleware::{
    DelayMiddleware, DispatchContext, FailureInjectionMiddleware, MiddlewarePipeline,
    RateLimitMiddleware, ResponseMiddleware,
};
pub use router::{MockRouter, RouterBuilder};
pub use template::{
    PathTemplate, Segment, decode_segment, encode_segment, parse_query, split_path, split_url,
};
