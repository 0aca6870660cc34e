//! Query Classifier: asks the model to summarise and categorise a student's query.
//!
//! The reply is decoded strictly into [`Classification`]. A reply missing
//! `user_query_summary` or `query_category` is an error, not a default.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::llm_client::{strip_json_fences, ChatModel, LlmError};
use crate::mentoring::prompts::{classification_prompt, CLASSIFICATION_PROMPT_VERSION};

#[derive(Debug, Error)]
pub enum ClassificationError {
    #[error("{0}")]
    Remote(#[from] LlmError),

    #[error("classifier reply is not a valid classification: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Structured result of classifying one query.
///
/// `query_category` is kept as the raw label the model produced. The dispatcher decides
/// what to do with labels outside the known taxonomy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    pub user_query_summary: String,
    #[serde(default)]
    pub error_description: Option<String>,
    pub query_category: String,
}

/// Classifies `user_query` with a single model call.
pub async fn classify(
    model: &dyn ChatModel,
    user_query: &str,
) -> Result<Classification, ClassificationError> {
    let reply = model.complete(&classification_prompt(), user_query).await?;
    let classification = parse_classification(&reply)?;

    info!(
        prompt_version = CLASSIFICATION_PROMPT_VERSION,
        category = %classification.query_category,
        has_error = classification.error_description.is_some(),
        "Query classified"
    );

    Ok(classification)
}

/// Decodes a classifier reply, with or without a surrounding markdown code fence.
pub fn parse_classification(reply: &str) -> Result<Classification, ClassificationError> {
    Ok(serde_json::from_str(strip_json_fences(reply))?)
}
