use crate::backend_client::{Backend, ByteStream, QueryError, UploadError};
use crate::models::UploadAck;
use async_trait::async_trait;
use bytes::Bytes;
use futures::stream;
use futures::StreamExt;
use std::collections::VecDeque;
use std::sync::Mutex;

pub enum Reply {
    Stream(Vec<Result<&'static str, QueryError>>),
    Fail(QueryError),
}

/// Backend double that plays back canned replies and records every call.
#[derive(Default)]
pub struct ScriptedBackend {
    upload_results: Mutex<VecDeque<Result<String, String>>>,
    replies: Mutex<VecDeque<Reply>>,
    pub uploads: Mutex<Vec<(String, usize)>>,
    pub queries: Mutex<Vec<(String, String)>>,
}

impl ScriptedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_upload(self, result: Result<&str, &str>) -> Self {
        self.upload_results
            .lock()
            .unwrap()
            .push_back(result.map(str::to_string).map_err(str::to_string));
        self
    }

    pub fn with_reply(self, reply: Reply) -> Self {
        self.replies.lock().unwrap().push_back(reply);
        self
    }

    pub fn query_count(&self) -> usize {
        self.queries.lock().unwrap().len()
    }
}

#[async_trait]
impl Backend for ScriptedBackend {
    async fn upload(&self, file_name: &str, file_bytes: Vec<u8>) -> Result<UploadAck, UploadError> {
        self.uploads
            .lock()
            .unwrap()
            .push((file_name.to_string(), file_bytes.len()));
        let result = self.upload_results.lock().unwrap().pop_front();
        match result {
            Some(Err(message)) => Err(UploadError { message }),
            Some(Ok(body)) => Ok(UploadAck { status: 200, body }),
            None => Ok(UploadAck {
                status: 200,
                body: String::new(),
            }),
        }
    }

    async fn query(&self, collection_name: &str, query: &str) -> Result<ByteStream, QueryError> {
        self.queries
            .lock()
            .unwrap()
            .push((collection_name.to_string(), query.to_string()));
        let reply = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .expect("no scripted reply left");
        match reply {
            Reply::Stream(chunks) => Ok(stream::iter(
                chunks
                    .into_iter()
                    .map(|chunk| chunk.map(|text| Bytes::from_static(text.as_bytes())))
                    .collect::<Vec<_>>(),
            )
            .boxed()),
            Reply::Fail(err) => Err(err),
        }
    }
}
