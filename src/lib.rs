pub mod auth;
pub mod cli;
pub mod client;
pub mod contacts;
pub mod customers;
pub mod error;
pub mod export;
pub mod paginate;
pub mod response;

// Re-export commonly used types
pub use auth::{ApiKey, Credentials, Subdomain};
pub use cli::Cli;
pub use client::{build_client, SyncroClient};
pub use contacts::{ContactField, NewContact};
pub use error::{Error, Result};
pub use export::{export_contacts, ExportSummary};
pub use paginate::{paginate, Page, Record};
