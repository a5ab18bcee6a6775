//! Lector CLI: synthetic timestamped transcriptions and audio-synced HTML.
//!
//! Usage:
//!   lector synth [--book chapters.json] [--duration 6150] transcriptions/out.json
//!   lector export transcriptions/out.json book.html audio/book.m4a [--title "El Principito"]

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use lector_export_html::{render_document, RenderOptions};
use lector_timeline::{synthesize, Book, SynthesisConfig};
use lector_transcript::Transcription;
use tracing::{info, warn};

fn usage() {
    println!("lector — audiobook transcript toolkit");
    println!();
    println!("  lector synth [--book <book.json>] [--duration <secs>] <out.json>");
    println!("      Generate a synthetic timestamped transcription for a known text.");
    println!("      Defaults to the bundled El Principito chapters and their 6150s audio.");
    println!();
    println!("  lector export <in.json> <out.html> <audio> [--title <title>]");
    println!("      Render a transcription as a static HTML page synced to <audio>.");
}

fn main() -> ExitCode {
    tracing_subscriber::fmt::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let result = match args.first().map(String::as_str) {
        Some("synth") => run_synth(&args[1..]),
        Some("export") => run_export(&args[1..]),
        _ => {
            usage();
            return ExitCode::FAILURE;
        }
    };

    match result {
        Ok(code) => code,
        Err(err) => {
            eprintln!("lector: {err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run_synth(args: &[String]) -> anyhow::Result<ExitCode> {
    let mut book_path: Option<PathBuf> = None;
    let mut duration_override: Option<f64> = None;
    let mut output: Option<PathBuf> = None;

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--book" => book_path = iter.next().map(PathBuf::from),
            "--duration" => duration_override = iter.next().and_then(|d| d.parse().ok()),
            _ => output = Some(PathBuf::from(arg)),
        }
    }

    let Some(output) = output else {
        usage();
        return Ok(ExitCode::FAILURE);
    };

    let book = match &book_path {
        Some(path) => Book::load(path)?,
        None => lector_data::el_principito(),
    };
    let duration = duration_override.unwrap_or(book.audio_duration);

    let segments = synthesize(&book.chapters, duration, &SynthesisConfig::default());
    let elapsed = segments.last().map(|s| s.end).unwrap_or(0.0);
    let transcription = Transcription::from_segments(&book.language, segments);
    transcription.save(&output)?;

    info!(
        segments = transcription.segments.len(),
        elapsed_secs = format!("{elapsed:.1}").as_str(),
        path = %output.display(),
        "transcription written"
    );
    Ok(ExitCode::SUCCESS)
}

fn run_export(args: &[String]) -> anyhow::Result<ExitCode> {
    let mut title: Option<String> = None;
    let mut positional: Vec<&String> = Vec::new();

    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--title" => title = iter.next().cloned(),
            _ => positional.push(arg),
        }
    }

    let (input, output, audio) = match positional.as_slice() {
        [input, output, audio] => (Path::new(input.as_str()), Path::new(output.as_str()), audio.as_str()),
        _ => {
            usage();
            return Ok(ExitCode::FAILURE);
        }
    };

    // A missing or malformed transcription still yields a complete, empty
    // document. Retrying until the file is ready is the watcher's job, not
    // ours.
    let transcription = match Transcription::load(input) {
        Ok(t) => t,
        Err(err) => {
            warn!(%err, path = %input.display(), "unreadable transcription, exporting empty document");
            Transcription::default()
        }
    };

    let opts = RenderOptions {
        title: title.unwrap_or_else(|| title_from_path(input)),
        language: transcription
            .language
            .clone()
            .unwrap_or_else(|| "es".to_string()),
        ..RenderOptions::default()
    };

    let html = render_document(&transcription.segments, audio, &opts)?;
    if let Some(parent) = output.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(output, html)?;

    info!(path = %output.display(), "html written");
    Ok(ExitCode::SUCCESS)
}

/// "transcriptions/el-principito.json" → "El Principito".
fn title_from_path(path: &Path) -> String {
    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("audiolibro");

    stem.split(['-', '_'])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
