#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Template(#[from] minijinja::Error),
    #[error(transparent)]
    Context(#[from] serde_json::Error),
    #[error("invalid heading pattern: {0}")]
    HeadingPattern(#[from] regex::Error),
}
