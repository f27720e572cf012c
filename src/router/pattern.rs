use regex::{Regex, RegexBuilder};

use crate::error::PatternError;

use super::{params::Params, path};

/// A single compiled piece of a route pattern.
#[derive(Debug, Clone)]
pub enum Segment {
    /// Anchored, case-insensitive regex over the whole segment.
    Static(Regex),
    /// Named parameter, the name is stored lowercased.
    Param(String),
    /// Positional wildcard.
    Splat,
}

impl Segment {
    fn compile(piece: &str) -> Result<Self, regex::Error> {
        if let Some(name) = piece.strip_prefix(':') {
            return Ok(Self::Param(name.to_lowercase()));
        }
        if piece == "*" {
            return Ok(Self::Splat);
        }
        RegexBuilder::new(&format!("^(?:{})$", piece.to_lowercase()))
            .case_insensitive(true)
            .build()
            .map(Self::Static)
    }
}

/// Values captured while matching a request against a [`Pattern`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Captures {
    pub params: Params,
    pub splats: Vec<String>,
}

/// A route pattern compiled into per-segment matchers.
///
/// Syntax, one rule per `/`-separated piece:
/// - `:name` binds the segment to `name` (names are case-insensitive),
/// - `*` captures the segment positionally,
/// - anything else is a regular expression that must match the whole segment,
///   ignoring case.
///
/// Because literal pieces are regular expressions, metacharacters such as `.` or `+`
/// must be escaped to be matched literally. Pieces are lowercased before they are
/// compiled, so case-sensitive escapes like `\D` or `\W` turn into `\d` and `\w`.
/// A single trailing `/` is ignored.
#[derive(Debug, Clone)]
pub struct Pattern {
    text: String,
    segments: Vec<Segment>,
}

impl Pattern {
    pub fn compile(text: &str) -> Result<Self, PatternError> {
        let segments = path::split(text)
            .into_iter()
            .map(|piece| {
                Segment::compile(piece).map_err(|source| PatternError {
                    pattern: text.to_string(),
                    segment: piece.to_string(),
                    source,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self {
            text: text.to_string(),
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Matches normalized request segments position by position.
    pub fn captures(&self, segments: &[String]) -> Option<Captures> {
        if segments.len() != self.segments.len() {
            return None;
        }
        let mut captures = Captures::default();
        for (matcher, segment) in self.segments.iter().zip(segments) {
            match matcher {
                Segment::Static(regex) => {
                    if !regex.is_match(segment) {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    if segment.is_empty() {
                        return None;
                    }
                    captures.params.insert(name.clone(), segment.clone());
                }
                Segment::Splat => captures.splats.push(segment.clone()),
            }
        }
        Some(captures)
    }
}
