use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::Error;

/// A titled, ordered group of sentences. Consumed once by the synthesizer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Chapter {
    pub title: String,
    pub sentences: Vec<String>,
}

/// On-disk shape of a text corpus: the chapters of a known narration plus
/// the real duration of its audio track.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
    pub title: String,
    #[serde(default = "default_language")]
    pub language: String,
    pub audio_duration: f64,
    pub chapters: Vec<Chapter>,
}

fn default_language() -> String {
    "es".to_string()
}

impl Book {
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
}
