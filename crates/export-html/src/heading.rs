use regex::Regex;

/// Decides whether a segment text is a chapter heading. The predicate runs
/// against the trimmed, lowercased text, so patterns can assume lowercase
/// input. Callers supply their own pattern for other languages.
pub struct HeadingMatcher {
    re: Regex,
}

impl HeadingMatcher {
    pub fn new(pattern: &str) -> Result<Self, crate::Error> {
        Ok(Self {
            re: Regex::new(pattern)?,
        })
    }

    /// Spanish chapter headings: "capítulo N" with or without the accent,
    /// numbered either in digits or as a word ("capitulo dos").
    pub fn spanish() -> Self {
        Self {
            re: Regex::new(r"^cap[ií]tulo\s+(\d+|[a-záéíóú]+)").unwrap(),
        }
    }

    pub fn is_heading(&self, text: &str) -> bool {
        self.re.is_match(&text.trim().to_lowercase())
    }
}

impl Default for HeadingMatcher {
    fn default() -> Self {
        Self::spanish()
    }
}

/// Display form of a heading: first letter upper, rest lower, and the
/// accent restored when a transcriber emitted the bare "Capitulo".
pub fn normalize_title(text: &str) -> String {
    let mut chars = text.trim().chars();
    let capitalized: String = match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    };

    match capitalized.strip_prefix("Capitulo") {
        Some(rest) => format!("Capítulo{rest}"),
        None => capitalized,
    }
}
