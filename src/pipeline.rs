// src/pipeline.rs
use crate::color::Colorizer;
use crate::error::ProcessingError;
use crate::format::EntryFormatter;
use crate::parser::Parser;
use crate::trigger::Executor;
use std::io::{BufRead, ErrorKind, Write};

/// Counters reported after a stream ends.
#[derive(Debug, Default, Clone)]
pub struct PipelineStats {
    pub lines_read: usize,
    pub lines_rendered: usize,
    pub parse_failures: usize,
    pub commands_run: usize,
}

/// Per-line driver.
///
/// For each line, in order: parse, render + colorize + write on success,
/// then offer the raw line to every executor. No buffering across lines and
/// no cross-line state; an unparseable line yields no rendered output but is
/// still trigger-tested.
pub struct Pipeline {
    parser: Parser,
    formatter: Box<dyn EntryFormatter>,
    colorizer: Colorizer,
    executors: Vec<Box<dyn Executor>>,
    debug: bool,
}

impl Pipeline {
    pub fn new(
        parser: Parser,
        formatter: Box<dyn EntryFormatter>,
        colorizer: Colorizer,
        executors: Vec<Box<dyn Executor>>,
        debug: bool,
    ) -> Self {
        Pipeline {
            parser,
            formatter,
            colorizer,
            executors,
            debug,
        }
    }

    /// Process a stream to completion. End of input terminates normally;
    /// any other read error is fatal. Per-line conditions (parse failures,
    /// command failures) are absorbed locally and reported as diagnostics.
    pub fn process_stream<R: BufRead, W: Write, D: Write>(
        &self,
        input: R,
        output: &mut W,
        diag: &mut D,
    ) -> Result<PipelineStats, ProcessingError> {
        let mut stats = PipelineStats::default();

        for line_result in input.lines() {
            let line = match line_result {
                Ok(line) => line,
                Err(e) => {
                    if e.kind() == ErrorKind::UnexpectedEof {
                        break;
                    }
                    return Err(ProcessingError::IoError(e));
                }
            };
            stats.lines_read += 1;

            let entry = match self.parser.parse(&line) {
                Ok(entry) => Some(entry),
                Err(e) => {
                    stats.parse_failures += 1;
                    if self.debug {
                        let _ = writeln!(diag, "lcfmt: line {}: {}", stats.lines_read, e);
                    }
                    None
                }
            };

            if let Some(ref entry) = entry {
                let rendered = self.formatter.render(entry)?;
                if let Err(e) = self
                    .colorizer
                    .write_colored(output, &rendered, entry)
                    .and_then(|_| output.flush())
                {
                    if e.kind() == ErrorKind::BrokenPipe {
                        break;
                    }
                    return Err(ProcessingError::IoError(e));
                }
                stats.lines_rendered += 1;
            }

            for executor in &self.executors {
                if executor.matches(&line) {
                    stats.commands_run += 1;
                    executor.execute(entry.as_ref(), diag);
                }
            }
        }

        Ok(stats)
    }
}
