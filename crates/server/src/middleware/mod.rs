//! HTTP middleware stack.
//!
//! # Middleware Order (bottom to top in Router)
//!
//! 1. Sentry layer (capture errors)
//! 2. `TraceLayer` (request tracing)
//! 3. Request ID (add unique ID to each request)
//!
//! Authentication is not a layer: handlers opt in through the
//! [`RequireAuth`] extractor.

pub mod auth;
pub mod request_id;
pub mod session;

pub use auth::RequireAuth;
pub use request_id::request_id_middleware;
pub use session::{
    SESSION_COOKIE_NAME, build_session_cookie, clear_session_cookie, parse_session_cookie,
};
