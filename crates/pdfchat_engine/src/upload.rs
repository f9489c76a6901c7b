use std::path::{Path, PathBuf};
use std::sync::Arc;

use bytes::Bytes;
use futures_util::stream::{self, Stream};

use crate::{BackendError, EngineEvent, ProgressSink, RequestId};

/// A document read into memory, ready to be sent as the multipart `file` field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub file_name: String,
    pub bytes: Bytes,
}

impl UploadFile {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
        }
    }

    pub async fn read(path: &Path, file_name: impl Into<String>) -> Result<Self, BackendError> {
        let bytes = tokio::fs::read(path).await.map_err(|err| BackendError::File {
            path: PathBuf::from(path),
            message: err.to_string(),
        })?;
        Ok(Self::new(file_name, bytes))
    }

    pub fn len(&self) -> u64 {
        self.bytes.len() as u64
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// `round(sent * 100 / total)`, clamped to 100. An empty body is complete.
pub fn upload_percent(sent: u64, total: u64) -> u8 {
    if total == 0 {
        return 100;
    }
    let sent = sent.min(total) as u128;
    let total = total as u128;
    ((sent * 100 + total / 2) / total) as u8
}

/// Splits the file into chunks and reports progress as each one is handed to the transport.
pub(crate) fn progress_stream(
    request_id: RequestId,
    file: &UploadFile,
    chunk_bytes: usize,
    sink: Arc<dyn ProgressSink>,
) -> impl Stream<Item = Result<Bytes, std::io::Error>> + Send + Sync + 'static {
    let total = file.len();
    let chunk_bytes = chunk_bytes.max(1);
    let chunks: Vec<Bytes> = (0..file.bytes.len())
        .step_by(chunk_bytes)
        .map(|start| {
            let end = (start + chunk_bytes).min(file.bytes.len());
            file.bytes.slice(start..end)
        })
        .collect();

    let mut sent = 0u64;
    let mut last_percent = 0u8;
    stream::iter(chunks.into_iter().map(move |chunk| {
        sent += chunk.len() as u64;
        let percent = upload_percent(sent, total);
        if percent != last_percent {
            last_percent = percent;
            sink.emit(EngineEvent::UploadProgress {
                request_id,
                percent,
            });
        }
        Ok(chunk)
    }))
}
