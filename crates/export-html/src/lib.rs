use std::sync::OnceLock;

use lector_transcript::Segment;

mod error;
pub use error::*;

mod filters;

mod heading;
pub use heading::{normalize_title, HeadingMatcher};

pub use minijinja;

#[derive(Debug, strum::AsRefStr, strum::Display)]
pub enum Template {
    #[strum(serialize = "book.html")]
    Book,
}

pub const BOOK_TPL: &str = include_str!("../assets/book.html.jinja");

static GLOBAL_ENV: OnceLock<minijinja::Environment<'static>> = OnceLock::new();

fn init_environment() -> minijinja::Environment<'static> {
    let mut env = minijinja::Environment::new();
    env.set_unknown_method_callback(minijinja_contrib::pycompat::unknown_method_callback);

    env.add_template(Template::Book.as_ref(), BOOK_TPL).unwrap();
    env.add_filter("clock", filters::clock);

    env
}

pub fn get_environment() -> &'static minijinja::Environment<'static> {
    GLOBAL_ENV.get_or_init(init_environment)
}

pub fn render(
    template: Template,
    ctx: &serde_json::Map<String, serde_json::Value>,
) -> Result<String, crate::Error> {
    let env = get_environment();
    let tpl = env.get_template(template.as_ref())?;
    Ok(tpl.render(ctx)?)
}

pub struct RenderOptions {
    /// Page title, shown in `<title>` and as the top heading.
    pub title: String,
    /// BCP-47-ish language tag for the `lang` attribute.
    pub language: String,
    pub heading: HeadingMatcher,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            title: "Audiolibro".to_string(),
            language: "es".to_string(),
            heading: HeadingMatcher::default(),
        }
    }
}

#[derive(serde::Serialize)]
struct TocEntry {
    anchor: String,
    title: String,
    start: f64,
}

#[derive(serde::Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
enum Block {
    Heading {
        anchor: String,
        title: String,
    },
    Line {
        // Pre-formatted so whole seconds render as "0", not "0.0".
        start: String,
        end: String,
        text: String,
    },
}

/// Render an ordered segment list as a single static HTML document: audio
/// player, table of contents, and one timing-tagged paragraph per segment.
/// Heading segments become anchored `<h2>` elements; anchors come from a
/// monotonic counter, so duplicate chapter titles stay unique.
pub fn render_document(
    segments: &[Segment],
    audio_src: &str,
    opts: &RenderOptions,
) -> Result<String, Error> {
    let mut toc: Vec<TocEntry> = Vec::new();
    let mut blocks: Vec<Block> = Vec::new();

    for segment in segments {
        let text = segment.text.trim();
        if opts.heading.is_heading(text) {
            let anchor = format!("capitulo_{}", toc.len() + 1);
            let title = heading::normalize_title(text);
            toc.push(TocEntry {
                anchor: anchor.clone(),
                title: title.clone(),
                start: segment.start,
            });
            blocks.push(Block::Heading { anchor, title });
        } else {
            blocks.push(Block::Line {
                start: segment.start.to_string(),
                end: segment.end.to_string(),
                text: text.to_string(),
            });
        }
    }

    if segments.is_empty() {
        tracing::warn!("rendering an empty segment list");
    }

    let mut ctx = serde_json::Map::new();
    ctx.insert("title".into(), serde_json::Value::from(opts.title.as_str()));
    ctx.insert(
        "language".into(),
        serde_json::Value::from(opts.language.as_str()),
    );
    ctx.insert("audio_src".into(), serde_json::Value::from(audio_src));
    ctx.insert(
        "audio_mime".into(),
        serde_json::Value::from(audio_mime(audio_src)),
    );
    ctx.insert("toc".into(), serde_json::to_value(&toc)?);
    ctx.insert("blocks".into(), serde_json::to_value(&blocks)?);

    render(Template::Book, &ctx)
}

/// `type` attribute for the `<audio>` source, from the file extension.
pub fn audio_mime(src: &str) -> &'static str {
    let ext = src
        .rsplit('.')
        .next()
        .map(|e| e.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "m4a" | "mp4" => "audio/mp4",
        "ogg" => "audio/ogg",
        "wav" => "audio/wav",
        _ => "audio/mpeg",
    }
}
