use clap::{ArgAction, Parser};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Write};
use std::path::PathBuf;

use anyhow::Context;
use lcfmt::color::{Color, ColorMap, Colorizer};
use lcfmt::format::{CsvFormatter, EntryFormatter, FormatPlan, TextFormatter, ALL_FORMAT, DEFAULT_FORMAT};
use lcfmt::parser::Parser as LogcatParser;
use lcfmt::pipeline::Pipeline;
use lcfmt::trigger::build_executors;
use lcfmt::ConfigError;

#[derive(Parser)]
#[command(name = "lcfmt")]
#[command(about = "Reformat Android logcat output, with per-line command triggers")]
#[command(version)]
struct Args {
    /// Output format: %t %i %I %p %a %m or long names (%time, %tag, ...);
    /// %{color} placeholders are expanded when --color is on
    #[arg(value_name = "FORMAT", default_value = DEFAULT_FORMAT)]
    format: String,

    /// Trigger pattern tested against every raw line (repeatable)
    #[arg(short = 'o', long = "on", value_name = "REGEX", action = ArgAction::Append)]
    triggers: Vec<String>,

    /// Command run when the matching trigger fires (repeatable, paired with --on)
    #[arg(short = 'c', long = "command", value_name = "CMD", action = ArgAction::Append)]
    commands: Vec<String>,

    /// Emit CSV instead of templated text (defaults to all fields)
    #[arg(long = "to-csv")]
    to_csv: bool,

    /// Colorize output by severity
    #[arg(long)]
    color: bool,

    /// Override the verbose color
    #[arg(long = "color-v", value_name = "COLOR", value_enum)]
    color_v: Option<Color>,

    /// Override the debug color
    #[arg(long = "color-d", value_name = "COLOR", value_enum)]
    color_d: Option<Color>,

    /// Override the info color
    #[arg(long = "color-i", value_name = "COLOR", value_enum)]
    color_i: Option<Color>,

    /// Override the warning color
    #[arg(long = "color-w", value_name = "COLOR", value_enum)]
    color_w: Option<Color>,

    /// Override the error color
    #[arg(long = "color-e", value_name = "COLOR", value_enum)]
    color_e: Option<Color>,

    /// Override the fatal color
    #[arg(long = "color-f", value_name = "COLOR", value_enum)]
    color_f: Option<Color>,

    /// Show processing details
    #[arg(long)]
    debug: bool,

    /// Input file (default: stdin)
    #[arg(short = 'i', long = "input")]
    input_file: Option<PathBuf>,

    /// Output file (default: stdout)
    #[arg(long = "output")]
    output_file: Option<PathBuf>,
}

fn main() {
    let args = Args::parse();

    // everything configurable is verified here, before any input is read
    let pipeline = match build_pipeline(&args) {
        Ok(pipeline) => pipeline,
        Err(e) => {
            eprintln!("lcfmt: {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = run(&args, &pipeline) {
        eprintln!("lcfmt: {:#}", e);
        std::process::exit(1);
    }
}

fn build_pipeline(args: &Args) -> Result<Pipeline, ConfigError> {
    let map = ColorMap {
        verbose: args.color_v,
        debug: args.color_d,
        info: args.color_i,
        warn: args.color_w,
        error: args.color_e,
        fatal: args.color_f,
    };
    let colorizer = Colorizer::new(args.color, map);

    let formatter: Box<dyn EntryFormatter> = if args.to_csv {
        let format = if args.format == DEFAULT_FORMAT {
            ALL_FORMAT
        } else {
            args.format.as_str()
        };
        let plan = FormatPlan::compile(format);
        plan.verify()?;
        Box::new(CsvFormatter::new(&plan))
    } else {
        let format = colorizer.expand_placeholders(&args.format)?;
        let plan = FormatPlan::compile(&format);
        plan.verify()?;
        Box::new(TextFormatter::new(plan))
    };

    let executors = build_executors(&args.triggers, &args.commands, args.debug)?;

    Ok(Pipeline::new(
        LogcatParser::new(),
        formatter,
        colorizer,
        executors,
        args.debug,
    ))
}

fn run(args: &Args, pipeline: &Pipeline) -> anyhow::Result<()> {
    let input: Box<dyn BufRead> = if let Some(path) = &args.input_file {
        let file = File::open(path)
            .with_context(|| format!("failed to open input file '{}'", path.display()))?;
        Box::new(BufReader::new(file))
    } else {
        if args.debug && lcfmt::tty::stdin_is_terminal() {
            eprintln!("lcfmt: reading from a terminal; expecting piped logcat input");
        }
        Box::new(BufReader::new(io::stdin()))
    };

    let mut output: Box<dyn Write> = if let Some(path) = &args.output_file {
        let file = File::create(path)
            .with_context(|| format!("failed to create output file '{}'", path.display()))?;
        Box::new(io::BufWriter::new(file))
    } else {
        Box::new(io::BufWriter::new(io::stdout()))
    };

    let mut diag = io::stderr();
    let stats = pipeline.process_stream(input, &mut output, &mut diag)?;
    output.flush()?;

    if args.debug {
        eprintln!("lcfmt: lines read: {}", stats.lines_read);
        eprintln!("lcfmt: lines rendered: {}", stats.lines_rendered);
        eprintln!("lcfmt: parse failures: {}", stats.parse_failures);
        eprintln!("lcfmt: commands run: {}", stats.commands_run);
    }

    Ok(())
}
