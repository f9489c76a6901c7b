use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::multipart::{Form, Part};
use reqwest::{Body, Url};

use pdfchat_logging::{chat_debug, chat_info};

use crate::upload::progress_stream;
use crate::wire::{interpret_reply, AskPayload, BackendReply};
use crate::{BackendError, EngineEvent, RequestId, UploadFile};

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000";

#[derive(Debug, Clone)]
pub struct BackendSettings {
    pub base_url: String,
    pub connect_timeout: Duration,
    /// Whole-request limit. `None` leaves it to the transport.
    pub request_timeout: Option<Duration>,
    pub upload_chunk_bytes: usize,
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: None,
            upload_chunk_bytes: 64 * 1024,
        }
    }
}

pub trait ProgressSink: Send + Sync {
    fn emit(&self, event: EngineEvent);
}

pub struct ChannelProgressSink {
    tx: std::sync::mpsc::Sender<EngineEvent>,
}

impl ChannelProgressSink {
    pub fn new(tx: std::sync::mpsc::Sender<EngineEvent>) -> Self {
        Self { tx }
    }
}

impl ProgressSink for ChannelProgressSink {
    fn emit(&self, event: EngineEvent) {
        let _ = self.tx.send(event);
    }
}

/// The three calls the chat client makes against the question-answering service.
#[async_trait::async_trait]
pub trait Backend: Send + Sync {
    async fn upload(
        &self,
        request_id: RequestId,
        file: UploadFile,
        sink: Arc<dyn ProgressSink>,
    ) -> Result<(), BackendError>;

    async fn ask(&self, question: &str, context: Option<&str>) -> Result<String, BackendError>;

    async fn clear(&self, context: &str) -> Result<(), BackendError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestBackend {
    settings: BackendSettings,
    base_url: Url,
    client: reqwest::Client,
}

impl ReqwestBackend {
    /// Builds the HTTP client once so the cookie store is shared by every call.
    pub fn new(settings: BackendSettings) -> Result<Self, BackendError> {
        let base_url = Url::parse(settings.base_url.trim_end_matches('/'))
            .map_err(|err| BackendError::InvalidUrl(format!("{}: {err}", settings.base_url)))?;

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let mut builder = reqwest::Client::builder()
            .default_headers(headers)
            .cookie_store(true)
            .connect_timeout(settings.connect_timeout);
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build()?;

        Ok(Self {
            settings,
            base_url,
            client,
        })
    }

    fn endpoint(&self, name: &str) -> Result<Url, BackendError> {
        let raw = format!("{}/{}", self.base_url.as_str().trim_end_matches('/'), name);
        Url::parse(&raw).map_err(|err| BackendError::InvalidUrl(format!("{raw}: {err}")))
    }

    async fn finish(&self, request: reqwest::RequestBuilder) -> Result<BackendReply, BackendError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        chat_debug!("Backend replied status={} body_len={}", status, body.len());
        interpret_reply(status, &body)
    }
}

#[async_trait::async_trait]
impl Backend for ReqwestBackend {
    async fn upload(
        &self,
        request_id: RequestId,
        file: UploadFile,
        sink: Arc<dyn ProgressSink>,
    ) -> Result<(), BackendError> {
        let url = self.endpoint("upload")?;
        chat_info!(
            "Uploading request_id={} file={} bytes={}",
            request_id,
            file.file_name,
            file.len()
        );

        let stream = progress_stream(request_id, &file, self.settings.upload_chunk_bytes, sink);
        let part = Part::stream_with_length(Body::wrap_stream(stream), file.len())
            .file_name(file.file_name.clone())
            .mime_str("application/pdf")?;
        let form = Form::new().part("file", part);

        self.finish(self.client.post(url).multipart(form)).await?;
        Ok(())
    }

    async fn ask(&self, question: &str, context: Option<&str>) -> Result<String, BackendError> {
        let url = self.endpoint("ask")?;
        let payload = AskPayload { question, context };
        let body = serde_json::to_vec(&payload)
            .map_err(|err| BackendError::Encode(err.to_string()))?;
        chat_info!(
            "Asking question_len={} context={:?}",
            question.len(),
            context
        );

        let request = self
            .client
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(body);
        self.finish(request).await?.into_answer()
    }

    async fn clear(&self, context: &str) -> Result<(), BackendError> {
        let mut url = self.endpoint("clear")?;
        url.query_pairs_mut().append_pair("context", context);
        chat_info!("Clearing context={}", context);

        self.finish(self.client.get(url)).await?;
        Ok(())
    }
}
