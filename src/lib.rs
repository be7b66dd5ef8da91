// src/lib.rs
pub mod color;
pub mod entry;
pub mod error;
pub mod format;
pub mod parser;
pub mod pipeline;
pub mod trigger;
pub mod tty;

pub use color::{Color, ColorMap, Colorizer};
pub use entry::{Entry, Field, Level};
pub use error::{ConfigError, ProcessingError};
pub use format::{
    CsvFormatter, EntryFormatter, FormatPlan, TextFormatter, ALL_FORMAT, DEFAULT_FORMAT,
};
pub use parser::{ParseError, Parser};
pub use pipeline::{Pipeline, PipelineStats};
pub use trigger::{build_executors, CommandExecutor, Executor, NoopExecutor};
