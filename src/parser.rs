use crate::entry::{Entry, Level};
use once_cell::sync::Lazy;
use regex::{Captures, Regex};

#[derive(Debug, thiserror::Error)]
#[error("line matches no known logcat syntax: {line}")]
pub struct ParseError {
    pub line: String,
}

struct Syntax {
    name: &'static str,
    re: Regex,
}

/// Known logcat line syntaxes, most field-rich first. The first shape that
/// matches wins and its capture groups populate the entry.
static SYNTAXES: Lazy<Vec<Syntax>> = Lazy::new(|| {
    vec![
        Syntax {
            name: "threadtime",
            re: Regex::new(
                r"^(?P<time>\d{2}-\d{2} \d{2}:\d{2}:\d{2}\.\d+)\s+(?P<pid>\d+)\s+(?P<tid>\d+)\s+(?P<priority>[VDIWEF])\s+(?P<tag>.*?)\s*: (?P<message>.*)$",
            )
            .unwrap(),
        },
        Syntax {
            name: "time",
            re: Regex::new(
                r"^(?P<time>\d{2}-\d{2} \d{2}:\d{2}:\d{2}\.\d+)\s+(?P<priority>[VDIWEF])/(?P<tag>.*?)\s*\(\s*(?P<pid>\d+)\): (?P<message>.*)$",
            )
            .unwrap(),
        },
        Syntax {
            name: "brief",
            re: Regex::new(
                r"^(?P<priority>[VDIWEF])/(?P<tag>.*?)\s*\(\s*(?P<pid>\d+)\): (?P<message>.*)$",
            )
            .unwrap(),
        },
        Syntax {
            name: "process",
            re: Regex::new(
                r"^(?P<priority>[VDIWEF])\(\s*(?P<pid>\d+)\) (?P<message>.*?)\s*\((?P<tag>.*)\)$",
            )
            .unwrap(),
        },
        Syntax {
            name: "thread",
            re: Regex::new(r"^(?P<priority>[VDIWEF])\(\s*(?P<pid>\d+):(?P<tid>\S+)\) (?P<message>.*)$")
                .unwrap(),
        },
        Syntax {
            name: "tag",
            re: Regex::new(r"^(?P<priority>[VDIWEF])/(?P<tag>.*?)\s*: (?P<message>.*)$").unwrap(),
        },
    ]
});

/// Stateless logcat line parser. No field of an entry depends on any prior
/// line; the same line always parses the same way.
#[derive(Debug, Default)]
pub struct Parser;

impl Parser {
    pub fn new() -> Self {
        Parser
    }

    pub fn parse(&self, line: &str) -> Result<Entry, ParseError> {
        for syntax in SYNTAXES.iter() {
            if let Some(caps) = syntax.re.captures(line) {
                return Ok(entry_from_captures(&caps));
            }
        }
        Err(ParseError {
            line: line.to_string(),
        })
    }

    /// Name of the first syntax that matches, if any.
    pub fn identify(&self, line: &str) -> Option<&'static str> {
        SYNTAXES
            .iter()
            .find(|syntax| syntax.re.is_match(line))
            .map(|syntax| syntax.name)
    }
}

fn entry_from_captures(caps: &Captures) -> Entry {
    let text = |name: &str| caps.name(name).map(|m| m.as_str().to_string());
    Entry {
        time: text("time"),
        pid: text("pid"),
        tid: text("tid"),
        priority: caps
            .name("priority")
            .and_then(|m| m.as_str().chars().next())
            .and_then(Level::from_char),
        tag: text("tag"),
        message: text("message"),
    }
}
