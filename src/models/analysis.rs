use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{AppError, Result};

/// Inbound payload as sent by the caller. Fields stay loosely typed until
/// [`AnalysisRequest::validate`] has checked the required ones.
#[derive(Deserialize, Debug, Default)]
#[serde(default, rename_all = "camelCase")]
pub struct AnalysisRequest {
    pub story_topic: Value,
    pub data_needed: Value,
    pub timeframe: Value,
    pub sources: Value,
    pub deadline: Value,
}

/// A request that passed validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResearchBrief {
    pub story_topic: String,
    pub data_needed: String,
    pub timeframe: String,
    pub sources: Vec<String>,
    pub deadline: Option<String>,
}

impl AnalysisRequest {
    /// Unparsable bytes and a bare `null` are a malformed body. Any other
    /// non-object JSON carries no fields and fails validation.
    pub fn from_slice(body: &[u8]) -> Result<Self> {
        let value: Value =
            serde_json::from_slice(body).map_err(|e| AppError::MalformedBody(e.to_string()))?;
        match value {
            Value::Null => Err(AppError::MalformedBody("body is null".into())),
            Value::Object(_) => {
                serde_json::from_value(value).map_err(|e| AppError::InvalidField(e.to_string()))
            }
            _ => Ok(Self::default()),
        }
    }

    /// Required fields are checked for presence before any field is type-checked.
    pub fn validate(self) -> Result<ResearchBrief> {
        if !(truthy(&self.story_topic) && truthy(&self.data_needed) && truthy(&self.timeframe)) {
            return Err(AppError::MissingFields);
        }
        Ok(ResearchBrief {
            story_topic: scalar_text("storyTopic", &self.story_topic)?,
            data_needed: scalar_text("dataNeeded", &self.data_needed)?,
            timeframe: scalar_text("timeframe", &self.timeframe)?,
            sources: source_list(&self.sources)?,
            deadline: if truthy(&self.deadline) {
                Some(scalar_text("deadline", &self.deadline)?)
            } else {
                None
            },
        })
    }
}

fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn scalar_text(field: &str, value: &Value) -> Result<String> {
    match value {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::Null => Ok(String::new()),
        Value::Array(_) | Value::Object(_) => {
            Err(AppError::InvalidField(format!("{field}: expected a string")))
        }
    }
}

fn source_list(value: &Value) -> Result<Vec<String>> {
    match value {
        Value::Null => Ok(Vec::new()),
        Value::Array(items) => items.iter().map(|item| scalar_text("sources[]", item)).collect(),
        _ => Err(AppError::InvalidField("sources: expected an array of strings".into())),
    }
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisMetadata {
    pub story_topic: String,
    pub timeframe: String,
    pub generated_at: String,
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct AnalysisResponse {
    pub analysis: String,
    pub metadata: AnalysisMetadata,
}

impl AnalysisResponse {
    pub fn new(analysis: String, brief: ResearchBrief, generated_at: DateTime<Utc>) -> Self {
        Self {
            analysis,
            metadata: AnalysisMetadata {
                story_topic: brief.story_topic,
                timeframe: brief.timeframe,
                generated_at: iso_timestamp(generated_at),
            },
        }
    }
}

/// UTC, millisecond precision, `Z` suffix.
pub fn iso_timestamp(at: DateTime<Utc>) -> String {
    at.to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self { error: message.into() }
    }
}
