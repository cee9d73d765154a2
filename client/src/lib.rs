pub mod models;
pub mod config;
pub mod backend_client;
pub mod answer_stream;
pub mod session;
pub mod upload_service;
pub mod query_service;

#[cfg(test)]
mod testing;

pub use models::*;
pub use config::{Config, ConfigError};
pub use backend_client::{Backend, HttpBackend, QueryError, UploadError};
pub use session::{SessionState, Transcript};
pub use upload_service::UploadService;
pub use query_service::{QueryEvent, QueryOutcome, QueryPhase, QueryService, ValidationError};
