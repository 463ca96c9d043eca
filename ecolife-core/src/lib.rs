pub mod aggregate;
pub mod climatiq;
pub mod error;
pub mod mail;
pub mod progress;

pub use error::{ClimatiqError, MailError};
