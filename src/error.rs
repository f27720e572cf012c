use std::fmt::Display;

/// A pattern segment could not be compiled into a regular expression.
#[derive(Debug)]
pub struct PatternError {
    pub pattern: String,
    pub segment: String,
    pub source: regex::Error,
}

impl Display for PatternError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Invalid segment {:?} in pattern {:?}: {}",
            self.segment, self.pattern, self.source
        )
    }
}

impl std::error::Error for PatternError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

/// The request path is not valid percent-encoded UTF-8.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DecodeError {
    /// A `%` not followed by two hex digits, at the given byte offset of the raw path.
    MalformedEscape(usize),
    /// The decoded bytes of a segment are not UTF-8.
    InvalidUtf8(String),
}

impl Display for DecodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedEscape(offset) => {
                write!(f, "Malformed percent-encoding at offset {}", offset)
            }
            Self::InvalidUtf8(segment) => {
                write!(f, "Segment {:?} does not decode to UTF-8", segment)
            }
        }
    }
}

impl std::error::Error for DecodeError {}
