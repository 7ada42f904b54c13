//! Turns free-form model replies into the structures the client expects.
//!
//! The model is asked for JSON but may wrap it in a markdown code fence, add
//! stray whitespace, or return something else entirely. [`normalize`] strips
//! at most one fence pair, decodes, and checks the shape; anything it cannot
//! accept comes back as a [`NormalizeError`].

use super::types::{
    QUIZ_LENGTH, QUIZ_OPTION_COUNT, QuizItem, SCENARIO_OPTION_COUNT, Scenario,
};
use serde_json::Value;
use thiserror::Error;
use tracing::warn;

const FENCE: &str = "```";

#[derive(Debug, Error)]
pub enum NormalizeError {
    #[error("model returned an empty response")]
    EmptyResponse,

    #[error("model response is not valid JSON: {source}")]
    MalformedJson {
        raw: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("model response does not match the expected shape: {0}")]
    SchemaMismatch(String),
}

impl NormalizeError {
    fn schema(msg: impl Into<String>) -> Self {
        Self::SchemaMismatch(msg.into())
    }
}

/// A structure that can be validated out of decoded model JSON.
pub trait ExpectedShape: Sized {
    fn from_json(value: Value) -> Result<Self, NormalizeError>;
}

/// Removes one leading fence and its language tag, or returns `None` when the
/// text does not open with a fence. A tag must end the fence line or run
/// straight into a JSON value; otherwise the word belongs to the body.
fn strip_opening_fence(text: &str) -> Option<&str> {
    let rest = text.strip_prefix(FENCE)?;
    let tag_len = rest
        .find(|c: char| !(c.is_ascii_alphanumeric() || c == '-' || c == '_'))
        .unwrap_or(rest.len());
    let after = &rest[tag_len..];

    let next = after.trim_start_matches([' ', '\t']);
    let is_tag = tag_len > 0 && (next.is_empty() || next.starts_with(['\n', '\r', '{', '[']));

    Some(if is_tag { after } else { rest })
}

fn strip_closing_fence(text: &str) -> Option<&str> {
    text.trim_end().strip_suffix(FENCE)
}

/// Removes one optional leading fence (with its language tag) and one optional
/// trailing fence. Text without fences is returned trimmed and otherwise
/// unchanged.
pub fn strip_code_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    let body = strip_opening_fence(trimmed).unwrap_or(trimmed);
    strip_closing_fence(body).unwrap_or(body).trim()
}

/// Prose only loses fences that wrap the whole reply. Markdown that opens or
/// ends with its own code block is kept intact.
fn strip_wrapping_fence(raw: &str) -> &str {
    let trimmed = raw.trim();
    strip_opening_fence(trimmed)
        .and_then(strip_closing_fence)
        .map(str::trim)
        .unwrap_or(trimmed)
}

pub fn normalize<T: ExpectedShape>(raw: &str) -> Result<T, NormalizeError> {
    if raw.trim().is_empty() {
        return Err(NormalizeError::EmptyResponse);
    }

    let body = strip_code_fence(raw);
    let value: Value =
        serde_json::from_str(body).map_err(|source| NormalizeError::MalformedJson {
            raw: raw.to_string(),
            source,
        })?;

    T::from_json(value)
}

/// Normalizes a prose reply (feedback, lesson markdown).
pub fn normalize_text(raw: &str) -> Result<String, NormalizeError> {
    let body = strip_wrapping_fence(raw);
    if body.is_empty() {
        return Err(NormalizeError::EmptyResponse);
    }
    Ok(body.to_string())
}

fn trim_all(options: Vec<String>) -> Vec<String> {
    options.into_iter().map(|o| o.trim().to_string()).collect()
}

impl ExpectedShape for Scenario {
    fn from_json(value: Value) -> Result<Self, NormalizeError> {
        let scenario: Scenario = serde_json::from_value(value)
            .map_err(|e| NormalizeError::schema(format!("scenario: {}", e)))?;

        let text = scenario.text.trim().to_string();
        if text.is_empty() {
            return Err(NormalizeError::schema("scenario text is empty"));
        }

        if scenario.options.len() != SCENARIO_OPTION_COUNT {
            return Err(NormalizeError::schema(format!(
                "expected {} options, got {}",
                SCENARIO_OPTION_COUNT,
                scenario.options.len()
            )));
        }

        Ok(Scenario {
            text,
            options: trim_all(scenario.options),
        })
    }
}

impl ExpectedShape for QuizItem {
    fn from_json(value: Value) -> Result<Self, NormalizeError> {
        let item: QuizItem =
            serde_json::from_value(value).map_err(|e| NormalizeError::schema(e.to_string()))?;

        if item.options.len() != QUIZ_OPTION_COUNT {
            return Err(NormalizeError::schema(format!(
                "expected {} options, got {}",
                QUIZ_OPTION_COUNT,
                item.options.len()
            )));
        }

        let item = QuizItem {
            question: item.question.trim().to_string(),
            options: trim_all(item.options),
            correct_answer: item.correct_answer.trim().to_string(),
        };

        // Accepted as-is; models sometimes answer with a letter or paraphrase.
        if !item.options.contains(&item.correct_answer) {
            warn!(
                "Quiz answer '{}' is not one of the options for question: {}",
                item.correct_answer, item.question
            );
        }

        Ok(item)
    }
}

impl ExpectedShape for Vec<QuizItem> {
    fn from_json(value: Value) -> Result<Self, NormalizeError> {
        let Value::Array(items) = value else {
            return Err(NormalizeError::schema("expected a JSON array of quiz items"));
        };

        if items.len() != QUIZ_LENGTH {
            return Err(NormalizeError::schema(format!(
                "expected {} quiz items, got {}",
                QUIZ_LENGTH,
                items.len()
            )));
        }

        items
            .into_iter()
            .enumerate()
            .map(|(i, item)| {
                QuizItem::from_json(item).map_err(|e| match e {
                    NormalizeError::SchemaMismatch(msg) => {
                        NormalizeError::schema(format!("quiz item {}: {}", i, msg))
                    }
                    other => other,
                })
            })
            .collect()
    }
}
