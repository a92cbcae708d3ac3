use super::{ExtractionRequest, TextExtractionService};
use crate::models::Extraction;
use crate::{Error, Result};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
enum MockReply {
    Outcome(Extraction),
    Status(u16, String),
}

/// Scripted extraction service; replies cycle through the configured list.
#[derive(Clone)]
pub struct MockTextExtractionClient {
    replies: Arc<Mutex<Vec<MockReply>>>,
    requests: Arc<Mutex<Vec<ExtractionRequest>>>,
}

impl MockTextExtractionClient {
    pub fn new() -> Self {
        Self {
            replies: Arc::new(Mutex::new(Vec::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    pub fn with_text(self, text: &str) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push(MockReply::Outcome(Extraction::Text(text.to_string())));
        self
    }

    pub fn with_empty(self) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push(MockReply::Outcome(Extraction::Empty));
        self
    }

    pub fn with_status_error(self, status: u16, body: &str) -> Self {
        self.replies
            .lock()
            .unwrap()
            .push(MockReply::Status(status, body.to_string()));
        self
    }

    pub fn get_call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Every request received so far, oldest first.
    pub fn requests(&self) -> Vec<ExtractionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Default for MockTextExtractionClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TextExtractionService for MockTextExtractionClient {
    async fn extract_text(&self, request: &ExtractionRequest) -> Result<Extraction> {
        let count = {
            let mut requests = self.requests.lock().unwrap();
            requests.push(request.clone());
            requests.len()
        };

        let replies = self.replies.lock().unwrap();
        if replies.is_empty() {
            // Default mock response
            return Ok(Extraction::Text(format!(
                "Receipt text ({})",
                request.mime_type
            )));
        }

        match &replies[(count - 1) % replies.len()] {
            MockReply::Outcome(outcome) => Ok(outcome.clone()),
            MockReply::Status(status, body) => Err(Error::HttpStatus {
                status: *status,
                body: body.clone(),
            }),
        }
    }
}
