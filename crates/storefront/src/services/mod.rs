//! External service clients.

mod mail;

pub use mail::{ContactMessage, MailClient, MailError, is_valid_email};
