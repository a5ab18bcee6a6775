use std::path::Path;

use serde::{Deserialize, Deserializer, Serialize};

mod error;
pub use error::*;

/// A single timed unit of transcript text.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Segment {
    #[serde(default)]
    pub id: u32,
    #[serde(default)]
    pub start: f64,
    #[serde(default)]
    pub end: f64,
    #[serde(default)]
    pub text: String,
}

impl Segment {
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }
}

/// Whisper-shaped transcription record: a language tag, the flattened text,
/// and the ordered segment list. This is the interchange format between the
/// timeline synthesizer, the HTML exporter, and any real transcriber.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Transcription {
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub text: String,
    #[serde(default, deserialize_with = "segments_or_empty")]
    pub segments: Vec<Segment>,
}

impl Transcription {
    /// Assemble a record from an ordered segment list. The flattened `text`
    /// field is the space-joined concatenation of every segment text.
    pub fn from_segments(language: impl Into<String>, segments: Vec<Segment>) -> Self {
        let text = segments
            .iter()
            .map(|s| s.text.as_str())
            .collect::<Vec<_>>()
            .join(" ");

        Self {
            language: Some(language.into()),
            text,
            segments,
        }
    }

    pub fn from_json_str(raw: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, Error> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&raw)
    }

    /// Whole-document write, pretty-printed. Parent directories are created.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), Error> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|source| Error::Io {
                    path: parent.to_path_buf(),
                    source,
                })?;
            }
        }

        let raw = serde_json::to_string_pretty(self)?;
        std::fs::write(path, raw).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })
    }
}

// Real transcriber output is not always well-formed. A `segments` value that
// is not a list degrades to an empty one, and malformed entries are skipped,
// so a renderer downstream never crashes on a structurally broken record.
fn segments_or_empty<'de, D>(deserializer: D) -> Result<Vec<Segment>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    match value {
        serde_json::Value::Array(items) => Ok(items
            .into_iter()
            .filter_map(|item| match serde_json::from_value::<Segment>(item) {
                Ok(segment) => Some(segment),
                Err(err) => {
                    tracing::warn!(%err, "skipping malformed segment");
                    None
                }
            })
            .collect()),
        _ => {
            tracing::warn!("`segments` is not a list, treating as empty");
            Ok(Vec::new())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_whisper_output_with_extra_fields() {
        let raw = r#"{
            "text": "Hola mundo.",
            "language": "es",
            "segments": [
                {
                    "id": 0,
                    "seek": 0,
                    "start": 0.0,
                    "end": 2.4,
                    "text": "Hola mundo.",
                    "tokens": [50364, 2425],
                    "temperature": 0.0,
                    "avg_logprob": -0.27,
                    "compression_ratio": 1.1,
                    "no_speech_prob": 0.01
                }
            ]
        }"#;

        let transcription = Transcription::from_json_str(raw).unwrap();
        assert_eq!(transcription.language.as_deref(), Some("es"));
        assert_eq!(transcription.segments.len(), 1);
        assert_eq!(transcription.segments[0].text, "Hola mundo.");
        assert_eq!(transcription.segments[0].duration(), 2.4);
    }

    #[test]
    fn missing_segments_key_is_empty() {
        let transcription = Transcription::from_json_str(r#"{"text": "algo"}"#).unwrap();
        assert!(transcription.segments.is_empty());
    }

    #[test]
    fn non_list_segments_is_empty() {
        let transcription =
            Transcription::from_json_str(r#"{"segments": "corrupted"}"#).unwrap();
        assert!(transcription.segments.is_empty());

        let transcription = Transcription::from_json_str(r#"{"segments": null}"#).unwrap();
        assert!(transcription.segments.is_empty());
    }

    #[test]
    fn malformed_entries_are_skipped() {
        let raw = r#"{"segments": [{"id": 0, "start": 0.0, "end": 1.0, "text": "ok"}, 42]}"#;
        let transcription = Transcription::from_json_str(raw).unwrap();
        assert_eq!(transcription.segments.len(), 1);
        assert_eq!(transcription.segments[0].text, "ok");
    }

    #[test]
    fn from_segments_flattens_text() {
        let segments = vec![
            Segment {
                id: 0,
                start: 0.0,
                end: 3.0,
                text: "Capítulo 1".to_string(),
            },
            Segment {
                id: 1,
                start: 3.0,
                end: 5.0,
                text: "Hola.".to_string(),
            },
        ];

        let transcription = Transcription::from_segments("es", segments);
        assert_eq!(transcription.text, "Capítulo 1 Hola.");
    }

    #[test]
    fn save_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("out.json");

        let original = Transcription::from_segments(
            "es",
            vec![Segment {
                id: 0,
                start: 0.0,
                end: 2.5,
                text: "Una frase.".to_string(),
            }],
        );

        original.save(&path).unwrap();
        let loaded = Transcription::load(&path).unwrap();
        assert_eq!(loaded.segments, original.segments);
        assert_eq!(loaded.text, original.text);
    }
}
