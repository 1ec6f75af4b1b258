//! HTTP route handlers.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                          - Liveness check
//! GET  /health/ready                    - Readiness check (pings the database)
//!
//! # Auth
//! POST /api/auth/signup                 - Stage a signup, email a code
//! POST /api/auth/signup/resend          - Resend the verification code
//! POST /api/auth/signup/confirm         - Confirm the code, create the account
//! POST /api/auth/signin                 - Sign in, install session cookie
//! POST /api/auth/signout                - Sign out, clear session cookie
//! GET  /api/auth/me                     - Current seller profile
//!
//! # Inventory
//! GET  /api/inventory                   - List products
//! POST /api/inventory                   - Add a product
//! GET  /api/inventory/stats             - Aggregated inventory figures
//! PUT  /api/inventory/{id}              - Update a product
//! DELETE /api/inventory/{id}            - Remove a product
//!
//! # Orders
//! GET  /api/orders                      - List orders (status/limit/offset)
//! POST /api/orders                      - Place an order
//! GET  /api/orders/stats                - Aggregated order figures
//! GET  /api/orders/{id}                 - One order
//! PATCH /api/orders/{id}/status         - Move an order to a new status
//!
//! # Notifications
//! GET  /api/notifications               - Notification feed (unread/limit/offset)
//! GET  /api/notifications/unread-count  - Unread entry count
//! POST /api/notifications/read-all      - Mark the whole feed read
//! PATCH /api/notifications/{id}/read    - Mark one entry read
//! DELETE /api/notifications/{id}        - Remove one entry
//!
//! # Settings
//! GET  /api/settings/store              - Store settings
//! PUT  /api/settings/store              - Save store settings
//!
//! # Services
//! GET  /api/services                    - List services
//! POST /api/services                    - Add a service
//! PUT  /api/services/{id}               - Update a service
//! DELETE /api/services/{id}             - Remove a service
//!
//! # Uploads
//! POST /api/uploads                     - Store a file (multipart, 5 MB cap)
//! GET  /api/uploads/presign             - Presign a stored object
//! ```

pub mod auth;
pub mod inventory;
pub mod notifications;
pub mod orders;
pub mod services;
pub mod settings;
pub mod uploads;

use axum::Router;
use axum::extract::DefaultBodyLimit;
use axum::routing::{delete, get, patch, post, put};

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/signup", post(auth::signup))
        .route("/signup/resend", post(auth::resend_code))
        .route("/signup/confirm", post(auth::confirm_signup))
        .route("/signin", post(auth::signin))
        .route("/signout", post(auth::signout))
        .route("/me", get(auth::me))
}

/// Create the inventory routes router.
pub fn inventory_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(inventory::list).post(inventory::create))
        .route("/stats", get(inventory::stats))
        .route(
            "/{id}",
            put(inventory::update).delete(inventory::delete),
        )
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(orders::list).post(orders::create))
        .route("/stats", get(orders::stats))
        .route("/{id}", get(orders::get))
        .route("/{id}/status", patch(orders::update_status))
}

/// Create the notification routes router.
pub fn notification_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(notifications::list))
        .route("/unread-count", get(notifications::unread_count))
        .route("/read-all", post(notifications::mark_all_read))
        .route("/{id}/read", patch(notifications::mark_read))
        .route("/{id}", delete(notifications::delete))
}

/// Create the settings routes router.
pub fn settings_routes() -> Router<AppState> {
    Router::new().route("/store", get(settings::get).put(settings::save))
}

/// Create the service catalog routes router.
pub fn service_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(services::list).post(services::create))
        .route("/{id}", put(services::update).delete(services::delete))
}

/// Create the upload routes router.
pub fn upload_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(uploads::upload))
        .route("/presign", get(uploads::presign))
        // Leave headroom above the payload cap for multipart framing.
        .layer(DefaultBodyLimit::max(uploads::MAX_UPLOAD_BYTES + 64 * 1024))
}

/// Create all API routes.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/api/auth", auth_routes())
        .nest("/api/inventory", inventory_routes())
        .nest("/api/orders", order_routes())
        .nest("/api/notifications", notification_routes())
        .nest("/api/settings", settings_routes())
        .nest("/api/services", service_routes())
        .nest("/api/uploads", upload_routes())
}
