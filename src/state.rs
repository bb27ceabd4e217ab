use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::Serialize;
use thiserror::Error;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::gemini::{ContentGenerator, GenerationFailed};
use crate::models::{MarketingContent, ProductDetails};
use crate::render::{self, Block, BlockBody};

pub const VALIDATION_MESSAGE: &str = "الرجاء إدخال اسم المنتج والفئة على الأقل.";
pub const GENERATION_FAILED_MESSAGE: &str = "حدث خطأ أثناء توليد المحتوى. يرجى المحاولة مرة أخرى.";
pub const COPY_ACK_WINDOW: Duration = Duration::from_secs(2);

/// How an accepted submission ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Generated,
    Failed,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SubmitRejected {
    #[error("a generation request is already in flight")]
    Busy,
    #[error("product name and category are required")]
    Invalid,
}

/// State of the single form instance.
#[derive(Debug, Default)]
pub struct FormState {
    details: ProductDetails,
    content: Option<MarketingContent>,
    loading: bool,
    error: Option<String>,
    generation_id: Option<Uuid>,
    generated_at: Option<DateTime<Utc>>,
    copied: HashMap<Block, Instant>,
}

impl FormState {
    pub fn content(&self) -> Option<&MarketingContent> { self.content.as_ref() }
    pub fn error(&self) -> Option<&str> { self.error.as_deref() }
    pub fn is_loading(&self) -> bool { self.loading }

    /// Validates and enters the loading state. On rejection nothing but the error
    /// message changes; previous content stays visible.
    pub fn begin_submit(&mut self, details: ProductDetails) -> Result<ProductDetails, SubmitRejected> {
        if self.loading {
            return Err(SubmitRejected::Busy);
        }
        self.details = details;
        if !self.details.has_required_fields() {
            self.error = Some(VALIDATION_MESSAGE.to_string());
            return Err(SubmitRejected::Invalid);
        }
        self.loading = true;
        self.error = None;
        self.content = None;
        self.copied.clear();
        Ok(self.details.clone())
    }

    pub fn finish_submit(&mut self, result: Result<MarketingContent, GenerationFailed>) {
        self.loading = false;
        self.copied.clear();
        match result {
            Ok(content) => {
                self.content = Some(content);
                self.error = None;
                self.generation_id = Some(Uuid::new_v4());
                self.generated_at = Some(Utc::now());
            }
            Err(GenerationFailed) => {
                self.content = None;
                self.error = Some(GENERATION_FAILED_MESSAGE.to_string());
                self.generation_id = None;
                self.generated_at = None;
            }
        }
    }

    /// Records a copy of `block` and returns the text for the clipboard, or
    /// `None` when there is nothing to copy.
    pub fn mark_copied(&mut self, block: Block, now: Instant) -> Option<String> {
        let text = render::copy_text(self.content.as_ref()?, block);
        self.copied.insert(block, now);
        Some(text)
    }

    pub fn is_copied(&self, block: Block, now: Instant) -> bool {
        self.copied
            .get(&block)
            .is_some_and(|at| now.saturating_duration_since(*at) < COPY_ACK_WINDOW)
    }

    pub fn view(&self, now: Instant) -> FormView<'_> {
        let cards: Vec<CardView<'_>> = self.content.as_ref().map(|content| {
            Block::FIELDS
                .iter()
                .enumerate()
                .filter_map(|(index, &block)| {
                    let body = render::body(content, block)?;
                    Some(CardView {
                        key: block.key(),
                        title: block.title(),
                        plain_text: body.plain_text(),
                        body,
                        copied: self.is_copied(block, now),
                        color_index: index,
                    })
                })
                .collect()
        }).unwrap_or_default();

        FormView {
            loading: self.loading,
            error: self.error.as_deref(),
            details: &self.details,
            content: self.content.as_ref(),
            cards,
            copy_all: self.content.as_ref().map(render::copy_all),
            copy_all_copied: self.is_copied(Block::All, now),
            generation_id: self.generation_id,
            generated_at: self.generated_at,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CardView<'a> {
    pub key: &'static str,
    pub title: &'static str,
    pub body: BlockBody<'a>,
    pub plain_text: String,
    pub copied: bool,
    pub color_index: usize,
}

/// Snapshot handed to the page.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FormView<'a> {
    pub loading: bool,
    pub error: Option<&'a str>,
    pub details: &'a ProductDetails,
    pub content: Option<&'a MarketingContent>,
    pub cards: Vec<CardView<'a>>,
    pub copy_all: Option<String>,
    pub copy_all_copied: bool,
    pub generation_id: Option<Uuid>,
    pub generated_at: Option<DateTime<Utc>>,
}

/// Runs one submission. The lock is never held across the remote call, and the
/// generation runs on its own task so the form leaves the loading state even when
/// the caller stops waiting.
pub async fn submit(
    state: Arc<RwLock<FormState>>,
    generator: Arc<dyn ContentGenerator>,
    details: ProductDetails,
) -> Result<Outcome, SubmitRejected> {
    let details = {
        let mut guard = state.write();
        match guard.begin_submit(details) {
            Ok(details) => details,
            Err(rejected) => {
                warn!("⚠️ Submission rejected: {}", rejected);
                return Err(rejected);
            }
        }
    };

    info!("🚀 Generating marketing content for product: {}", details.product_name);
    let task = tokio::spawn({
        let state = Arc::clone(&state);
        async move {
            let result = generator.generate(&details).await;
            let outcome = if result.is_ok() { Outcome::Generated } else { Outcome::Failed };
            state.write().finish_submit(result);
            outcome
        }
    });

    match task.await {
        Ok(outcome) => Ok(outcome),
        Err(e) => {
            error!("❌ Generation task ended abnormally: {}", e);
            state.write().finish_submit(Err(GenerationFailed));
            Ok(Outcome::Failed)
        }
    }
}
