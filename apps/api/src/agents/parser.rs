//! Structured-output parser: turns raw model text into an artifact.
//!
//! The model is asked for JSON but is not trusted to comply. Only the JSON
//! decode decides the outcome: any object is kept verbatim as
//! `Artifact::Parsed`, anything else becomes `Artifact::Unparsed`, which
//! downstream code treats as a valid, degraded result. Typed report views
//! are read from the kept document on demand and never demote it.

use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{debug, warn};

/// Names of the fallback wrapper fields for one artifact type.
///
/// A degraded artifact renders as `{RAW_FIELD: raw_text, RAW_FLAG: true}`.
pub trait ArtifactKind {
    const LABEL: &'static str;
    const RAW_FIELD: &'static str;
    const RAW_FLAG: &'static str;
}

/// Result of one structured generation call.
///
/// `T` only names the report type used to read `doc`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", bound = "")]
pub enum Artifact<T> {
    Parsed {
        doc: Map<String, Value>,
        #[serde(skip)]
        kind: PhantomData<T>,
    },
    Unparsed {
        raw: String,
    },
}

impl<T> Artifact<T> {
    pub fn from_doc(doc: Map<String, Value>) -> Self {
        Artifact::Parsed {
            doc,
            kind: PhantomData,
        }
    }

    /// The decoded object exactly as the model returned it.
    pub fn doc(&self) -> Option<&Map<String, Value>> {
        match self {
            Artifact::Parsed { doc, .. } => Some(doc),
            Artifact::Unparsed { .. } => None,
        }
    }

    pub fn is_raw(&self) -> bool {
        matches!(self, Artifact::Unparsed { .. })
    }

    /// Parsed, but the model returned `{}`.
    pub fn is_empty_doc(&self) -> bool {
        self.doc().is_some_and(Map::is_empty)
    }
}

impl<T: DeserializeOwned + ArtifactKind> Artifact<T> {
    /// Typed view of the document. `None` when the document does not fit `T`;
    /// the artifact itself stays parsed.
    pub fn report(&self) -> Option<T> {
        let doc = self.doc()?;
        match serde_json::from_value::<T>(Value::Object(doc.clone())) {
            Ok(report) => Some(report),
            Err(e) => {
                debug!("{} document does not fit the report shape: {e}", T::LABEL);
                None
            }
        }
    }
}

impl<T: ArtifactKind> Artifact<T> {
    /// JSON view handed back to the model and shown to API consumers.
    pub fn to_value(&self) -> Value {
        match self {
            Artifact::Parsed { doc, .. } => Value::Object(doc.clone()),
            Artifact::Unparsed { raw } => {
                let mut wrapper = Map::new();
                wrapper.insert(T::RAW_FIELD.to_string(), Value::String(raw.clone()));
                wrapper.insert(T::RAW_FLAG.to_string(), Value::Bool(true));
                Value::Object(wrapper)
            }
        }
    }
}

/// Decodes `text` as a JSON object, falling back to the raw text otherwise.
pub fn parse_artifact<T: ArtifactKind>(text: &str) -> Artifact<T> {
    let body = strip_json_fences(text);

    match serde_json::from_str::<Value>(body) {
        Ok(Value::Object(doc)) => Artifact::from_doc(doc),
        Ok(other) => {
            warn!(
                "{} output was {}, not an object; keeping raw text",
                T::LABEL,
                json_kind(&other)
            );
            Artifact::Unparsed {
                raw: text.to_string(),
            }
        }
        Err(e) => {
            warn!("{} output was not JSON ({e}); keeping raw text", T::LABEL);
            Artifact::Unparsed {
                raw: text.to_string(),
            }
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
pub fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    if let Some(stripped) = text.strip_prefix("```json") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else if let Some(stripped) = text.strip_prefix("```") {
        stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start())
    } else {
        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default, Serialize, Deserialize, PartialEq)]
    #[serde(default)]
    struct Sample {
        score: Option<f64>,
        #[serde(flatten)]
        extra: Map<String, Value>,
    }

    impl ArtifactKind for Sample {
        const LABEL: &'static str = "sample";
        const RAW_FIELD: &'static str = "analysis";
        const RAW_FLAG: &'static str = "raw_analysis";
    }

    #[test]
    fn test_strip_json_fences_with_json_tag() {
        let input = "```json\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_without_tag() {
        let input = "```\n{\"key\": \"value\"}\n```";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_strip_json_fences_no_fences() {
        let input = "{\"key\": \"value\"}";
        assert_eq!(strip_json_fences(input), "{\"key\": \"value\"}");
    }

    #[test]
    fn test_object_parses_and_renders_unchanged() {
        let text = r#"{"score": 7, "note": "kept", "nested": {"title": null}}"#;
        let artifact: Artifact<Sample> = parse_artifact(text);
        assert!(!artifact.is_raw());
        assert_eq!(artifact.report().unwrap().score, Some(7.0));

        let input: Value = serde_json::from_str(text).unwrap();
        assert_eq!(artifact.to_value(), input);
        assert_eq!(artifact.to_value()["score"], serde_json::json!(7));
    }

    #[test]
    fn test_fenced_object_parses() {
        let artifact: Artifact<Sample> = parse_artifact("```json\n{\"score\": 3}\n```");
        assert!(!artifact.is_raw());
    }

    #[test]
    fn test_prose_falls_back_to_exact_raw_text() {
        let text = "  Your profile looks great!\n";
        let artifact: Artifact<Sample> = parse_artifact(text);
        assert_eq!(
            artifact,
            Artifact::Unparsed {
                raw: text.to_string()
            }
        );

        let value = artifact.to_value();
        assert_eq!(value["analysis"], text);
        assert_eq!(value["raw_analysis"], true);
    }

    #[test]
    fn test_json_array_is_not_a_document() {
        let artifact: Artifact<Sample> = parse_artifact("[1, 2, 3]");
        assert!(artifact.is_raw());
    }

    #[test]
    fn test_wrong_field_type_stays_parsed() {
        let artifact: Artifact<Sample> = parse_artifact(r#"{"score": "high"}"#);
        assert!(!artifact.is_raw());
        assert!(artifact.report().is_none());
        assert_eq!(artifact.to_value()["score"], "high");
    }

    #[test]
    fn test_empty_object_is_an_empty_doc() {
        let artifact: Artifact<Sample> = parse_artifact("{}");
        assert!(artifact.is_empty_doc());
        assert!(!parse_artifact::<Sample>(r#"{"score": 1}"#).is_empty_doc());
        assert!(!parse_artifact::<Sample>("nope").is_empty_doc());
    }

    #[test]
    fn test_parsed_doc_survives_persistence() {
        let artifact: Artifact<Sample> = parse_artifact(r#"{"score": 72, "extra": [1]}"#);
        let stored = serde_json::to_string(&artifact).unwrap();
        let restored: Artifact<Sample> = serde_json::from_str(&stored).unwrap();
        assert_eq!(restored, artifact);
    }
}
