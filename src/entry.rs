use std::fmt;

/// Severity of a logcat line, from `V` (verbose) to `F` (fatal).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Level {
    Verbose,
    Debug,
    Info,
    Warn,
    Error,
    Fatal,
}

impl Level {
    pub const ALL: [Level; 6] = [
        Level::Verbose,
        Level::Debug,
        Level::Info,
        Level::Warn,
        Level::Error,
        Level::Fatal,
    ];

    /// The single-letter label logcat prints for this level.
    pub fn label(&self) -> &'static str {
        match self {
            Level::Verbose => "V",
            Level::Debug => "D",
            Level::Info => "I",
            Level::Warn => "W",
            Level::Error => "E",
            Level::Fatal => "F",
        }
    }

    pub fn from_char(c: char) -> Option<Level> {
        match c {
            'V' => Some(Level::Verbose),
            'D' => Some(Level::Debug),
            'I' => Some(Level::Info),
            'W' => Some(Level::Warn),
            'E' => Some(Level::Error),
            'F' => Some(Level::Fatal),
            _ => None,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// The known field vocabulary, in canonical column order.
///
/// Each field has a short code (`%t`) and a long token (`%time`); format
/// strings may use either and long tokens are normalized to short codes at
/// compile time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Time,
    Pid,
    Tid,
    Priority,
    Tag,
    Message,
}

impl Field {
    pub const ALL: [Field; 6] = [
        Field::Time,
        Field::Pid,
        Field::Tid,
        Field::Priority,
        Field::Tag,
        Field::Message,
    ];

    pub fn code(&self) -> char {
        match self {
            Field::Time => 't',
            Field::Pid => 'i',
            Field::Tid => 'I',
            Field::Priority => 'p',
            Field::Tag => 'a',
            Field::Message => 'm',
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Field::Time => "time",
            Field::Pid => "pid",
            Field::Tid => "tid",
            Field::Priority => "priority",
            Field::Tag => "tag",
            Field::Message => "message",
        }
    }

    pub fn from_code(c: char) -> Option<Field> {
        Field::ALL.iter().copied().find(|f| f.code() == c)
    }
}

/// One parsed logcat line.
///
/// Different logcat syntaxes carry different subsets of fields, so every
/// field is explicitly optional; an absent field is distinct from an empty
/// value. Entries are read-only and independent of each other.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Entry {
    pub time: Option<String>,
    pub pid: Option<String>,
    pub tid: Option<String>,
    pub priority: Option<Level>,
    pub tag: Option<String>,
    pub message: Option<String>,
}

impl Entry {
    /// Field access used by rendering and command substitution.
    pub fn get(&self, field: Field) -> Option<&str> {
        match field {
            Field::Time => self.time.as_deref(),
            Field::Pid => self.pid.as_deref(),
            Field::Tid => self.tid.as_deref(),
            Field::Priority => self.priority.map(|l| l.label()),
            Field::Tag => self.tag.as_deref(),
            Field::Message => self.message.as_deref(),
        }
    }
}
