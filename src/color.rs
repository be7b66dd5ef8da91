use crate::entry::{Entry, Level};
use crate::error::ConfigError;
use std::io::{self, Write};

/// ANSI reset sequence appended after every colored line.
pub const RESET: &str = "\x1b[0m";

/// Named colors accepted by the `--color-*` overrides and by `%{name}`
/// placeholders in format strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Color {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    Gray,
}

impl Color {
    /// Escape sequence that starts this color.
    pub fn code(&self) -> &'static str {
        match self {
            Color::Black => "\x1b[30m",
            Color::Red => "\x1b[31m",
            Color::Green => "\x1b[32m",
            Color::Yellow => "\x1b[33m",
            Color::Blue => "\x1b[34m",
            Color::Magenta => "\x1b[35m",
            Color::Cyan => "\x1b[36m",
            Color::White => "\x1b[37m",
            Color::Gray => "\x1b[90m",
        }
    }

    fn from_name(name: &str) -> Option<Color> {
        match name {
            "black" => Some(Color::Black),
            "red" => Some(Color::Red),
            "green" => Some(Color::Green),
            "yellow" => Some(Color::Yellow),
            "blue" => Some(Color::Blue),
            "magenta" => Some(Color::Magenta),
            "cyan" => Some(Color::Cyan),
            "white" => Some(Color::White),
            "gray" => Some(Color::Gray),
            _ => None,
        }
    }
}

/// Severity-to-color mapping. A level without a configured override falls
/// back to its built-in default; an unset override never means "no color".
#[derive(Debug, Clone, Copy, Default)]
pub struct ColorMap {
    pub verbose: Option<Color>,
    pub debug: Option<Color>,
    pub info: Option<Color>,
    pub warn: Option<Color>,
    pub error: Option<Color>,
    pub fatal: Option<Color>,
}

impl ColorMap {
    pub fn color_for(&self, level: Level) -> Color {
        let (configured, default) = match level {
            Level::Verbose => (self.verbose, Color::Gray),
            Level::Debug => (self.debug, Color::Cyan),
            Level::Info => (self.info, Color::Green),
            Level::Warn => (self.warn, Color::Yellow),
            Level::Error => (self.error, Color::Red),
            Level::Fatal => (self.fatal, Color::Red),
        };
        configured.unwrap_or(default)
    }
}

/// Wraps rendered lines in severity colors and expands `%{name}` color
/// placeholders embedded in format strings.
#[derive(Debug, Clone)]
pub struct Colorizer {
    enabled: bool,
    map: ColorMap,
}

impl Colorizer {
    pub fn new(enabled: bool, map: ColorMap) -> Self {
        Colorizer { enabled, map }
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    /// Expand `%{name}` placeholders (including `%{reset}`) to concrete
    /// escape sequences. Runs before format compilation, so the per-line
    /// render path never looks up colors for literal text. With color
    /// disabled the placeholders expand to empty strings. Applying this to
    /// an already-expanded string is a no-op.
    pub fn expand_placeholders(&self, format: &str) -> Result<String, ConfigError> {
        let mut out = String::with_capacity(format.len());
        let mut rest = format;
        while let Some(pos) = rest.find("%{") {
            out.push_str(&rest[..pos]);
            rest = &rest[pos + 2..];
            let Some(end) = rest.find('}') else {
                out.push_str("%{");
                break;
            };
            let name = &rest[..end];
            let code = if name == "reset" {
                Some(RESET)
            } else {
                Color::from_name(name).map(|color| color.code())
            };
            let Some(code) = code else {
                return Err(ConfigError::UnknownColor {
                    name: name.to_string(),
                });
            };
            if self.enabled {
                out.push_str(code);
            }
            rest = &rest[end + 1..];
        }
        out.push_str(rest);
        Ok(out)
    }

    /// Write one rendered line, wrapped in the start/reset codes for the
    /// entry's severity. Disabled color, or an entry without a severity,
    /// writes the line unmodified.
    pub fn write_colored<W: Write>(&self, out: &mut W, line: &str, entry: &Entry) -> io::Result<()> {
        match entry.priority {
            Some(level) if self.enabled => {
                writeln!(out, "{}{}{}", self.map.color_for(level).code(), line, RESET)
            }
            _ => writeln!(out, "{}", line),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_and_overrides() {
        let map = ColorMap {
            error: Some(Color::Magenta),
            ..Default::default()
        };
        assert_eq!(map.color_for(Level::Error), Color::Magenta);
        assert_eq!(map.color_for(Level::Warn), Color::Yellow);
        assert_eq!(map.color_for(Level::Info), Color::Green);
        assert_eq!(map.color_for(Level::Fatal), Color::Red);
    }

    #[test]
    fn test_expand_placeholders_enabled() {
        let colorizer = Colorizer::new(true, ColorMap::default());
        let expanded = colorizer.expand_placeholders("%{red}%m%{reset}").unwrap();
        assert_eq!(expanded, "\x1b[31m%m\x1b[0m");
    }

    #[test]
    fn test_expand_placeholders_disabled_strips_tokens() {
        let colorizer = Colorizer::new(false, ColorMap::default());
        let expanded = colorizer.expand_placeholders("%{red}%m%{reset}").unwrap();
        assert_eq!(expanded, "%m");
    }

    #[test]
    fn test_expand_is_idempotent() {
        let colorizer = Colorizer::new(true, ColorMap::default());
        let once = colorizer.expand_placeholders("%{cyan}%a%{reset}: %m").unwrap();
        let twice = colorizer.expand_placeholders(&once).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_expand_rejects_unknown_color() {
        let colorizer = Colorizer::new(true, ColorMap::default());
        let err = colorizer.expand_placeholders("%{chartreuse}%m").unwrap_err();
        assert!(err.to_string().contains("chartreuse"));
    }

    #[test]
    fn test_expand_leaves_unterminated_brace() {
        let colorizer = Colorizer::new(true, ColorMap::default());
        let expanded = colorizer.expand_placeholders("100%{nope").unwrap();
        assert_eq!(expanded, "100%{nope");
    }

    #[test]
    fn test_write_colored_wraps_by_level() {
        let colorizer = Colorizer::new(true, ColorMap::default());
        let entry = Entry {
            priority: Some(Level::Error),
            ..Default::default()
        };
        let mut out = Vec::new();
        colorizer.write_colored(&mut out, "boom", &entry).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "\x1b[31mboom\x1b[0m\n");
    }

    #[test]
    fn test_write_colored_disabled_passthrough() {
        let colorizer = Colorizer::new(false, ColorMap::default());
        let entry = Entry {
            priority: Some(Level::Error),
            ..Default::default()
        };
        let mut out = Vec::new();
        colorizer.write_colored(&mut out, "boom", &entry).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "boom\n");
    }

    #[test]
    fn test_write_colored_without_level() {
        let colorizer = Colorizer::new(true, ColorMap::default());
        let mut out = Vec::new();
        colorizer
            .write_colored(&mut out, "plain", &Entry::default())
            .unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "plain\n");
    }
}
