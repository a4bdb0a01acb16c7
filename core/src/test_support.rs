use crate::client::{GenerationRequest, ModelBackend};
use crate::error::{ClipboardError, GenerationError};
use crate::clipboard::ClipboardSource;
use async_trait::async_trait;
use std::sync::Mutex;

/// Backend that answers every request with the same result and records it.
pub struct ScriptedBackend {
    reply: Result<String, GenerationError>,
    requests: Mutex<Vec<GenerationRequest>>,
}

impl ScriptedBackend {
    pub fn replying(reply: Result<String, GenerationError>) -> Self {
        Self {
            reply,
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn requests(&self) -> Vec<GenerationRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl ModelBackend for ScriptedBackend {
    async fn complete(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        self.requests.lock().unwrap().push(request.clone());
        self.reply.clone()
    }
}

pub struct FakeClipboard(pub Result<String, ClipboardError>);

#[async_trait]
impl ClipboardSource for FakeClipboard {
    async fn read_text(&self) -> Result<String, ClipboardError> {
        self.0.clone()
    }
}
