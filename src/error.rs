#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("unknown field '{token}' in format")]
    UnknownField { token: String },

    #[error("unknown color '{name}'")]
    UnknownColor { name: String },

    #[error("invalid trigger pattern '{pattern}': {source}")]
    InvalidTrigger {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("number of triggers ({triggers}) does not match number of commands ({commands})")]
    TriggerCommandMismatch { triggers: usize, commands: usize },
}

#[derive(Debug, thiserror::Error)]
pub enum ProcessingError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("CSV encoding error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("output error: {0}")]
    OutputError(String),
}
