use lector_transcript::Segment;

mod book;
pub use book::{Book, Chapter};

mod error;
pub use error::*;

/// Tuning constants for synthetic timestamp generation.
#[derive(Debug, Clone)]
pub struct SynthesisConfig {
    /// Narration speed in characters per second.
    pub reading_speed: f64,
    /// Floor for a single sentence, in seconds.
    pub min_sentence: f64,
    /// Fixed duration of a chapter-heading segment, in seconds.
    pub heading: f64,
    /// Pause inserted after every sentence, in seconds.
    pub gap: f64,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        Self {
            reading_speed: 12.0,
            min_sentence: 2.0,
            heading: 3.0,
            gap: 0.5,
        }
    }
}

/// Assign plausible start/end times to every chapter title and sentence.
///
/// Emits, in order, one heading segment per chapter followed by one segment
/// per sentence. Sentence time is proportional to character count, floored
/// at `min_sentence`. The cumulative time is a deterministic function of the
/// text and the config; it approximates `total_duration` but is not forced
/// to match it.
pub fn synthesize(
    chapters: &[Chapter],
    total_duration: f64,
    config: &SynthesisConfig,
) -> Vec<Segment> {
    let total_chars: usize = chapters
        .iter()
        .flat_map(|c| &c.sentences)
        .map(|s| s.chars().count())
        .sum();

    let mut segments: Vec<Segment> = Vec::new();
    let mut cursor = 0.0_f64;

    for chapter in chapters {
        let chapter_chars: usize = chapter.sentences.iter().map(|s| s.chars().count()).sum();
        // Character-weighted share of the target duration. The cursor below
        // advances per sentence, so the final total may drift from it.
        let chapter_share = if total_chars == 0 {
            0.0
        } else {
            (chapter_chars as f64 / total_chars as f64) * total_duration
        };
        tracing::debug!(chapter = %chapter.title, share_secs = chapter_share, "chapter share");

        segments.push(Segment {
            id: segments.len() as u32,
            start: cursor,
            end: cursor + config.heading,
            text: chapter.title.clone(),
        });
        cursor += config.heading;

        for sentence in &chapter.sentences {
            let duration = (sentence.chars().count() as f64 / config.reading_speed)
                .max(config.min_sentence);

            segments.push(Segment {
                id: segments.len() as u32,
                start: cursor,
                end: cursor + duration,
                text: sentence.clone(),
            });
            cursor += duration + config.gap;
        }
    }

    segments
}
