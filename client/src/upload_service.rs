use crate::backend_client::{Backend, UploadError};
use crate::models::*;
use crate::session::SessionState;
use std::sync::Arc;

pub struct UploadService {
    backend: Arc<dyn Backend>,
}

impl UploadService {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        Self { backend }
    }

    /// Sends the whole document in one request and, once the backend accepts it,
    /// points the session at the collection named after the file.
    pub async fn upload(
        &self,
        session: &mut SessionState,
        file_name: &str,
        file_bytes: Vec<u8>,
    ) -> Result<CollectionName, UploadError> {
        let collection_name = CollectionName::from_file_name(file_name);

        match self.backend.upload(file_name, file_bytes).await {
            Ok(ack) => {
                log::info!(
                    "Backend accepted {} ({}) as collection `{}`",
                    file_name,
                    ack.status,
                    collection_name
                );
                session.set_collection_name(collection_name.clone());
                Ok(collection_name)
            }
            Err(err) => {
                log::error!("Upload of {} failed: {}", file_name, err);
                Err(err)
            }
        }
    }
}
