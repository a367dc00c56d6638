use std::path::PathBuf;

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    FileRead {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse TOML: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("config validation error: {0}")]
    Validation(String),
}

/// Errors that can occur while packing host-side observations into tensors.
#[derive(Debug, thiserror::Error)]
pub enum EncodingError {
    #[error("cannot encode an empty batch")]
    EmptyBatch,

    #[error("sample {sample} has {actual} agents, expected {expected}")]
    AgentCount {
        sample: usize,
        expected: usize,
        actual: usize,
    },

    #[error("sample {sample}, row {row} has width {actual}, expected {expected}")]
    FeatureWidth {
        sample: usize,
        row: usize,
        expected: usize,
        actual: usize,
    },

    #[error("sample {sample} adjacency is not {nodes}x{nodes}")]
    AdjacencyShape { sample: usize, nodes: usize },
}
