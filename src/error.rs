use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum PaintError {
    #[error("failed to read config {path}: {source}")]
    ConfigRead { path: PathBuf, source: std::io::Error },
    #[error("failed to parse config {path}: {source}")]
    ConfigParse { path: PathBuf, source: serde_json::Error },
    #[error("failed to write config {path}: {source}")]
    ConfigWrite { path: PathBuf, source: std::io::Error },
    #[error("failed to serialize config: {0}")]
    ConfigSerialize(#[from] serde_json::Error),
    #[error("window startup failed: {0}")]
    Startup(#[from] eframe::Error),
}
