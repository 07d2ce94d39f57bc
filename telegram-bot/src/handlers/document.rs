//! PDF documents: extract text, summarize, record file metadata. Other documents are rejected.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use llm_client::LlmClient;
use storage::{BotStore, FileArtifact, FileKind};
use tracing::{error, info, instrument, warn};

use super::{generate_bounded, replies};
use crate::core::{Bot, Handler, HandlerResponse, Message, MessagePayload, Result};

pub const PDF_MIME: &str = "application/pdf";

/// Extracted text beyond this many chars is dropped before prompting.
pub const MAX_DOCUMENT_CHARS: usize = 30_000;

/// Text extractor; [`pdf_text`] in production.
pub type ExtractText = fn(&[u8]) -> std::result::Result<String, String>;

/// Extracts text from PDF bytes.
pub fn pdf_text(bytes: &[u8]) -> std::result::Result<String, String> {
    pdf_extract::extract_text_from_mem(bytes).map_err(|e| e.to_string())
}

fn is_pdf(file_name: Option<&str>, mime_type: Option<&str>) -> bool {
    match mime_type {
        Some(mime) => mime.eq_ignore_ascii_case(PDF_MIME),
        None => file_name
            .map(|name| name.to_ascii_lowercase().ends_with(".pdf"))
            .unwrap_or(false),
    }
}

fn truncate_chars(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

pub struct DocumentHandler {
    bot: Arc<dyn Bot>,
    llm: Arc<dyn LlmClient>,
    store: Arc<dyn BotStore>,
    timeout: Duration,
    extract: ExtractText,
    max_chars: usize,
}

impl DocumentHandler {
    pub fn new(
        bot: Arc<dyn Bot>,
        llm: Arc<dyn LlmClient>,
        store: Arc<dyn BotStore>,
        timeout: Duration,
    ) -> Self {
        Self {
            bot,
            llm,
            store,
            timeout,
            extract: pdf_text,
            max_chars: MAX_DOCUMENT_CHARS,
        }
    }

    pub fn with_extractor(mut self, extract: ExtractText) -> Self {
        self.extract = extract;
        self
    }

    pub fn with_max_chars(mut self, max_chars: usize) -> Self {
        self.max_chars = max_chars;
        self
    }

    async fn extract_text(&self, bytes: Vec<u8>) -> std::result::Result<String, String> {
        let extract = self.extract;
        tokio::task::spawn_blocking(move || extract(&bytes))
            .await
            .map_err(|e| e.to_string())?
    }
}

#[async_trait]
impl Handler for DocumentHandler {
    #[instrument(skip(self, message), fields(chat_id = message.chat.id))]
    async fn handle(&self, message: &Message) -> Result<HandlerResponse> {
        let MessagePayload::Document {
            file_id,
            file_name,
            mime_type,
        } = &message.payload
        else {
            return Ok(HandlerResponse::Ignore);
        };
        let chat_id = message.session_id();

        if !is_pdf(file_name.as_deref(), mime_type.as_deref()) {
            info!(chat_id, mime_type = ?mime_type, "Rejected non-PDF document");
            self.bot
                .send_message(&message.chat, replies::UNSUPPORTED_FILE)
                .await?;
            return Ok(HandlerResponse::Reply(replies::UNSUPPORTED_FILE.to_string()));
        }

        let bytes = match self.bot.download_file(file_id).await {
            Ok(bytes) => bytes,
            Err(e) => {
                error!(chat_id, file_id = %file_id, error = %e, "Failed to download document");
                self.bot
                    .send_message(&message.chat, &replies::document_failed(&e))
                    .await?;
                return Ok(HandlerResponse::Stop);
            }
        };

        let text = match self.extract_text(bytes).await {
            Ok(text) => text,
            Err(e) => {
                error!(chat_id, error = %e, "PDF text extraction failed");
                self.bot
                    .send_message(&message.chat, &replies::document_failed(&e))
                    .await?;
                return Ok(HandlerResponse::Stop);
            }
        };
        let text = text.trim();
        if text.is_empty() {
            self.bot
                .send_message(&message.chat, replies::EMPTY_DOCUMENT)
                .await?;
            return Ok(HandlerResponse::Reply(replies::EMPTY_DOCUMENT.to_string()));
        }

        let capped = truncate_chars(text, self.max_chars);
        if capped.len() < text.len() {
            warn!(chat_id, max_chars = self.max_chars, "Document text truncated");
        }
        info!(chat_id, text_len = capped.len(), "step: document extracted, summarizing");

        let summary = match generate_bounded(
            self.timeout,
            self.llm.generate(&prompt::format_document_prompt(capped)),
        )
        .await
        {
            Ok(summary) => summary,
            Err(e) => {
                error!(chat_id, error = %e, "Document summary failed");
                self.bot
                    .send_message(&message.chat, &replies::document_failed(&e))
                    .await?;
                return Ok(HandlerResponse::Stop);
            }
        };

        let name = file_name
            .clone()
            .unwrap_or_else(|| format!("{}.pdf", file_id));
        let artifact = FileArtifact::new(chat_id, FileKind::Document, name, summary.clone());
        if let Err(e) = self.store.append_file_metadata(&artifact).await {
            error!(chat_id, error = %e, "Failed to persist document metadata");
        }

        let reply = replies::model_reply(&summary).to_string();
        self.bot.send_message(&message.chat, &reply).await?;

        Ok(HandlerResponse::Reply(reply))
    }
}
