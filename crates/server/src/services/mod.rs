//! Business logic and outbound clients.

pub mod auth;
pub mod mailer;
pub mod storage;

pub use auth::{AuthError, AuthService};
pub use mailer::{MailerClient, MailerError};
pub use storage::{StorageClient, StorageError};
