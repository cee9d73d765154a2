use crate::config::Config;
use crate::models::*;
use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::BoxStream;
use futures::StreamExt;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, StatusCode};

pub const PDF_MEDIA_TYPE: &str = "application/pdf";
pub const UPLOAD_FIELD: &str = "pdf_file";

/// Raw response body of a query, chunk by chunk in arrival order.
pub type ByteStream = BoxStream<'static, Result<Bytes, QueryError>>;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct UploadError {
    pub message: String,
}

impl From<reqwest::Error> for UploadError {
    fn from(err: reqwest::Error) -> Self {
        Self {
            message: err.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    /// The backend answered with something other than 200.
    #[error("{message}")]
    Backend { status: u16, message: String },
    /// The request never completed: refused, unreachable, reset mid-stream.
    #[error("connection error")]
    Connection { reason: String },
}

impl From<reqwest::Error> for QueryError {
    fn from(err: reqwest::Error) -> Self {
        QueryError::Connection {
            reason: err.to_string(),
        }
    }
}

/// The two calls the client makes against the processing backend.
#[async_trait]
pub trait Backend: Send + Sync {
    async fn upload(&self, file_name: &str, file_bytes: Vec<u8>) -> Result<UploadAck, UploadError>;

    async fn query(&self, collection_name: &str, query: &str) -> Result<ByteStream, QueryError>;
}

pub struct HttpBackend {
    client: Client,
    config: Config,
}

impl HttpBackend {
    pub fn new(config: Config) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

#[async_trait]
impl Backend for HttpBackend {
    async fn upload(&self, file_name: &str, file_bytes: Vec<u8>) -> Result<UploadAck, UploadError> {
        log::info!("Uploading {} ({} bytes)", file_name, file_bytes.len());

        let part = Part::bytes(file_bytes)
            .file_name(file_name.to_string())
            .mime_str(PDF_MEDIA_TYPE)?;
        let form = Form::new().part(UPLOAD_FIELD, part);

        let response = self
            .client
            .post(self.config.upload_url())
            .multipart(form)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if status != StatusCode::OK {
            log::warn!("Upload of {} rejected with {}", file_name, status);
            return Err(UploadError { message: body });
        }

        Ok(UploadAck {
            status: status.as_u16(),
            body,
        })
    }

    async fn query(&self, collection_name: &str, query: &str) -> Result<ByteStream, QueryError> {
        let request = QueryRequest {
            collection_name,
            query,
        };

        let response = self
            .client
            .post(self.config.query_url())
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            let message = response.text().await?;
            log::warn!("Query on {} failed with {}: {}", collection_name, status, message);
            return Err(QueryError::Backend {
                status: status.as_u16(),
                message,
            });
        }

        log::debug!("Streaming answer for collection {}", collection_name);
        Ok(response
            .bytes_stream()
            .map(|chunk| chunk.map_err(QueryError::from))
            .boxed())
    }
}
