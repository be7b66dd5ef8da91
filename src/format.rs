use crate::entry::{Entry, Field};
use crate::error::{ConfigError, ProcessingError};

/// Output format used when none is given on the command line.
pub const DEFAULT_FORMAT: &str = "%t %p/%a(%i): %m";

/// Every known field in canonical order; the CSV default.
pub const ALL_FORMAT: &str = "%t,%i,%I,%p,%a,%m";

/// One compiled piece of a format string.
#[derive(Debug, Clone, PartialEq)]
pub enum Segment {
    /// Literal text, passed through unchanged.
    Literal(String),
    /// A field reference, substituted per entry at render time.
    Field(Field),
    /// An unrecognized `%` token, kept verbatim so `verify()` can name it.
    Unknown(String),
}

/// Ordered render plan compiled once at startup and shared read-only across
/// all lines.
#[derive(Debug, Clone, PartialEq)]
pub struct FormatPlan {
    segments: Vec<Segment>,
}

impl FormatPlan {
    /// Compile a format string into segments. Long field names (`%tag`) are
    /// normalized to their short codes (`%a`) here; `%%` and a trailing lone
    /// `%` are literal percent signs.
    pub fn compile(format: &str) -> FormatPlan {
        let mut segments = Vec::new();
        let mut literal = String::new();
        let mut rest = format;

        while let Some(pos) = rest.find('%') {
            literal.push_str(&rest[..pos]);
            rest = &rest[pos + 1..];

            if rest.is_empty() {
                literal.push('%');
                break;
            }
            if let Some(after) = rest.strip_prefix('%') {
                literal.push('%');
                rest = after;
                continue;
            }

            if let Some((field, len)) = match_token(rest) {
                if !literal.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut literal)));
                }
                segments.push(Segment::Field(field));
                rest = &rest[len..];
            } else {
                let next = rest.chars().next().unwrap();
                if next.is_ascii_alphanumeric() {
                    if !literal.is_empty() {
                        segments.push(Segment::Literal(std::mem::take(&mut literal)));
                    }
                    segments.push(Segment::Unknown(format!("%{}", next)));
                    rest = &rest[next.len_utf8()..];
                } else {
                    // "% " and similar are not field references
                    literal.push('%');
                }
            }
        }

        literal.push_str(rest);
        if !literal.is_empty() {
            segments.push(Segment::Literal(literal));
        }
        FormatPlan { segments }
    }

    /// Reject plans that reference unknown fields, naming the offending
    /// token. Runs once at startup, before any line is processed.
    pub fn verify(&self) -> Result<(), ConfigError> {
        for segment in &self.segments {
            if let Segment::Unknown(token) = segment {
                return Err(ConfigError::UnknownField {
                    token: token.clone(),
                });
            }
        }
        Ok(())
    }

    /// Field references of this plan, in plan order.
    pub fn fields(&self) -> Vec<Field> {
        self.segments
            .iter()
            .filter_map(|segment| match segment {
                Segment::Field(field) => Some(*field),
                _ => None,
            })
            .collect()
    }

    /// Render against an entry that may be absent (trigger commands run on
    /// unparseable lines too). Absent fields render empty; unknown tokens
    /// pass through so shell text like `date +%s` survives in command
    /// templates.
    pub fn render(&self, entry: Option<&Entry>) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Field(field) => {
                    if let Some(value) = entry.and_then(|e| e.get(*field)) {
                        out.push_str(value);
                    }
                }
                Segment::Unknown(token) => out.push_str(token),
            }
        }
        out
    }
}

fn match_token(rest: &str) -> Option<(Field, usize)> {
    for field in Field::ALL {
        let name = field.name();
        if rest.starts_with(name) {
            return Some((field, name.len()));
        }
    }
    let first = rest.chars().next()?;
    Field::from_code(first).map(|field| (field, first.len_utf8()))
}

/// Trait for rendering a parsed entry to one output line.
pub trait EntryFormatter {
    fn render(&self, entry: &Entry) -> Result<String, ProcessingError>;
}

/// Templated text output: literal text plus field substitutions.
pub struct TextFormatter {
    plan: FormatPlan,
}

impl TextFormatter {
    pub fn new(plan: FormatPlan) -> Self {
        TextFormatter { plan }
    }
}

impl EntryFormatter for TextFormatter {
    fn render(&self, entry: &Entry) -> Result<String, ProcessingError> {
        Ok(self.plan.render(Some(entry)))
    }
}

/// CSV output: one column per field reference of the plan, in plan order.
/// Values containing the delimiter, a quote, or a newline are quoted with
/// embedded quotes doubled.
pub struct CsvFormatter {
    columns: Vec<Field>,
}

impl CsvFormatter {
    pub fn new(plan: &FormatPlan) -> Self {
        CsvFormatter {
            columns: plan.fields(),
        }
    }
}

impl EntryFormatter for CsvFormatter {
    fn render(&self, entry: &Entry) -> Result<String, ProcessingError> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(Vec::new());
        let record: Vec<&str> = self
            .columns
            .iter()
            .map(|field| entry.get(*field).unwrap_or(""))
            .collect();
        writer.write_record(&record)?;
        let bytes = writer
            .into_inner()
            .map_err(|e| ProcessingError::OutputError(e.to_string()))?;
        let mut line = String::from_utf8(bytes).map_err(|e| ProcessingError::OutputError(e.to_string()))?;
        // the driver writes its own line terminator
        while line.ends_with('\n') || line.ends_with('\r') {
            line.pop();
        }
        Ok(line)
    }
}
