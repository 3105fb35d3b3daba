//! Route pattern module
//!
//! A pattern is a slash-separated list of segments. Each segment is either a
//! literal or a typed placeholder written `<type:name>`:
//! - `<str:name>` matches any non-empty segment
//! - `<int:name>` matches ASCII digits and binds a `u64`
//! - `<name>` is shorthand for `<str:name>`
//!
//! Leading and trailing slashes are not significant, so `pet_type/<str:kind>/`
//! and `/pet_type/<str:kind>` describe the same route. Request segments are
//! percent-decoded before they are compared or converted.

use std::borrow::Cow;
use std::fmt;

use crate::error::ConfigurationError;

/// Placeholder type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Converter {
    Str,
    Int,
}

impl Converter {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "str" => Some(Self::Str),
            "int" => Some(Self::Int),
            _ => None,
        }
    }

    fn convert(self, segment: &str) -> Option<ParamValue> {
        match self {
            Self::Str => Some(ParamValue::Str(segment.to_string())),
            Self::Int => {
                if !segment.bytes().all(|b| b.is_ascii_digit()) {
                    return None;
                }
                segment.parse().ok().map(ParamValue::Int)
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Literal(String),
    Param { name: String, converter: Converter },
}

/// Value bound to a placeholder
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParamValue {
    Str(String),
    Int(u64),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Str(s) => f.write_str(s),
            Self::Int(n) => write!(f, "{n}"),
        }
    }
}

/// Parameters extracted from a matched path, in pattern order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params(Vec<(String, ParamValue)>);

impl Params {
    pub const fn new() -> Self {
        Self(Vec::new())
    }

    pub fn insert(&mut self, name: impl Into<String>, value: ParamValue) {
        let name = name.into();
        if let Some(slot) = self.0.iter_mut().find(|(n, _)| *n == name) {
            slot.1 = value;
        } else {
            self.0.push((name, value));
        }
    }

    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: ParamValue) -> Self {
        self.insert(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.0.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn str(&self, name: &str) -> Option<&str> {
        match self.get(name)? {
            ParamValue::Str(s) => Some(s),
            ParamValue::Int(_) => None,
        }
    }

    pub fn int(&self, name: &str) -> Option<u64> {
        match self.get(name)? {
            ParamValue::Int(n) => Some(*n),
            ParamValue::Str(_) => None,
        }
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Split a request path into segments.
///
/// Returns `None` when the path contains an empty interior segment (`/a//b`),
/// which never matches any pattern.
pub fn split_path(path: &str) -> Option<Vec<&str>> {
    if path.is_empty() || path == "/" {
        return Some(Vec::new());
    }
    let trimmed = path.strip_prefix('/').unwrap_or(path);
    let trimmed = trimmed.strip_suffix('/').unwrap_or(trimmed);
    let segments: Vec<&str> = trimmed.split('/').collect();
    if segments.iter().any(|s| s.is_empty()) {
        return None;
    }
    Some(segments)
}

/// Split a request path and percent-decode each segment.
///
/// Returns `None` for an empty interior segment or a segment that does not
/// decode to valid UTF-8.
pub fn decode_path(path: &str) -> Option<Vec<Cow<'_, str>>> {
    split_path(path)?
        .into_iter()
        .map(|segment| urlencoding::decode(segment).ok())
        .collect()
}

/// Parsed route pattern
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    source: String,
    segments: Vec<Segment>,
}

impl RoutePattern {
    pub fn parse(pattern: &str) -> Result<Self, ConfigurationError> {
        let invalid = |reason: &str| ConfigurationError::InvalidPattern {
            pattern: pattern.to_string(),
            reason: reason.to_string(),
        };

        let raw = split_path(pattern).ok_or_else(|| invalid("empty segment"))?;
        let mut segments = Vec::with_capacity(raw.len());

        for part in raw {
            if let Some(inner) = part.strip_prefix('<') {
                let inner = inner
                    .strip_suffix('>')
                    .ok_or_else(|| invalid("unterminated placeholder"))?;
                let (converter, name) = match inner.split_once(':') {
                    Some((conv, name)) => (
                        Converter::from_name(conv)
                            .ok_or_else(|| invalid(&format!("unknown converter '{conv}'")))?,
                        name,
                    ),
                    None => (Converter::Str, inner),
                };
                if name.is_empty() || !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
                {
                    return Err(invalid(&format!("bad placeholder name '{name}'")));
                }
                if segments
                    .iter()
                    .any(|s| matches!(s, Segment::Param { name: n, .. } if n == name))
                {
                    return Err(invalid(&format!("placeholder '{name}' used twice")));
                }
                segments.push(Segment::Param {
                    name: name.to_string(),
                    converter,
                });
            } else if part.contains(['<', '>']) {
                return Err(invalid("placeholder must span a whole segment"));
            } else {
                segments.push(Segment::Literal(part.to_string()));
            }
        }

        Ok(Self {
            source: pattern.to_string(),
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Two patterns have the same shape when they match exactly the same
    /// paths: same literals, same converters at the same positions.
    pub fn same_shape(&self, other: &Self) -> bool {
        self.segments.len() == other.segments.len()
            && self
                .segments
                .iter()
                .zip(&other.segments)
                .all(|pair| match pair {
                    (Segment::Literal(a), Segment::Literal(b)) => a == b,
                    (
                        Segment::Param { converter: a, .. },
                        Segment::Param { converter: b, .. },
                    ) => a == b,
                    _ => false,
                })
    }

    /// Match pre-split, decoded path segments against the whole pattern
    pub fn match_segments<S: AsRef<str>>(&self, segments: &[S]) -> Option<Params> {
        if segments.len() != self.segments.len() {
            return None;
        }

        let mut params = Params::new();
        for (segment, part) in self.segments.iter().zip(segments) {
            let part = part.as_ref();
            match segment {
                Segment::Literal(lit) => {
                    if lit != part {
                        return None;
                    }
                }
                Segment::Param { name, converter } => {
                    params.insert(name.clone(), converter.convert(part)?);
                }
            }
        }
        Some(params)
    }

    pub fn match_path(&self, path: &str) -> Option<Params> {
        self.match_segments(&decode_path(path)?)
    }

    /// Build the canonical path (leading and trailing slash) for this pattern.
    ///
    /// Returns `None` when a placeholder has no value of the right type or an
    /// empty string value. String values are percent-encoded.
    pub fn build(&self, params: &Params) -> Option<String> {
        let mut path = String::from("/");
        for segment in &self.segments {
            match segment {
                Segment::Literal(lit) => path.push_str(lit),
                Segment::Param { name, converter } => match (converter, params.get(name)?) {
                    (Converter::Str, ParamValue::Str(s)) if !s.is_empty() => {
                        path.push_str(&urlencoding::encode(s));
                    }
                    (Converter::Int, ParamValue::Int(n)) => path.push_str(&n.to_string()),
                    _ => return None,
                },
            }
            path.push('/');
        }
        Some(path)
    }
}
