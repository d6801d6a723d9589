//! Template-based record formatting.
//!
//! Templates use `{asctime}`, `{name}`, `{levelname}` and `{message}`
//! placeholders. Anything else, including unknown or unterminated
//! placeholders, is copied through verbatim.

use super::record::LogRecord;

pub const DEFAULT_FORMAT: &str = "{asctime} - {name} - {levelname} - {message}";

const ASCTIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S,%3f";

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    AscTime,
    Name,
    LevelName,
    Message,
}

impl Segment {
    fn from_placeholder(placeholder: &str) -> Option<Self> {
        match placeholder {
            "asctime" => Some(Self::AscTime),
            "name" => Some(Self::Name),
            "levelname" => Some(Self::LevelName),
            "message" => Some(Self::Message),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Formatter {
    template: String,
    segments: Vec<Segment>,
}

impl Default for Formatter {
    fn default() -> Self {
        Self::new(DEFAULT_FORMAT)
    }
}

impl Formatter {
    pub fn new(template: &str) -> Self {
        Self {
            template: template.to_string(),
            segments: compile(template),
        }
    }

    pub fn template(&self) -> &str {
        &self.template
    }

    pub fn format(&self, record: &LogRecord) -> String {
        let mut out = String::with_capacity(self.template.len() + record.message().len() + 32);
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::AscTime => {
                    out.push_str(&record.timestamp().format(ASCTIME_FORMAT).to_string())
                }
                Segment::Name => out.push_str(record.logger()),
                Segment::LevelName => out.push_str(record.level().as_str()),
                Segment::Message => out.push_str(record.message()),
            }
        }
        out
    }
}

fn compile(template: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        let after = &rest[open + 1..];
        let Some(close) = after.find('}') else {
            break;
        };
        let name = &after[..close];

        // Only the innermost `{` can start a placeholder.
        if let Some(inner) = name.rfind('{') {
            let restart = open + 1 + inner;
            literal.push_str(&rest[..restart]);
            rest = &rest[restart..];
            continue;
        }

        literal.push_str(&rest[..open]);
        match Segment::from_placeholder(name) {
            Some(segment) => {
                if !literal.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut literal)));
                }
                segments.push(segment);
            }
            None => literal.push_str(&rest[open..open + close + 2]),
        }
        rest = &after[close + 1..];
    }

    // Trailing text, including any unterminated placeholder.
    literal.push_str(rest);
    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }
    segments
}
