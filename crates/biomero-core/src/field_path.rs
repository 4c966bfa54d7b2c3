use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::CharIndices;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum FieldPathSegment {
    Key(String),
    Index(usize),
}

/// Location of a value inside a manifest, rendered as `inputs[2].format`.
///
/// Keys always use the canonical (hyphenated) spelling of a field, whatever
/// spelling the document itself used.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct FieldPath {
    segments: Vec<FieldPathSegment>,
}

impl FieldPath {
    pub fn root() -> Self {
        Self { segments: Vec::new() }
    }

    pub fn from_segments(segments: Vec<FieldPathSegment>) -> Self {
        Self { segments }
    }

    pub fn key(&self, key: impl Into<String>) -> Self {
        let mut child = self.clone();
        child.segments.push(FieldPathSegment::Key(key.into()));
        child
    }

    pub fn index(&self, index: usize) -> Self {
        let mut child = self.clone();
        child.segments.push(FieldPathSegment::Index(index));
        child
    }

    pub fn segments(&self) -> &[FieldPathSegment] {
        &self.segments
    }

    pub fn is_root(&self) -> bool {
        self.segments.is_empty()
    }

    /// Last key segment, if the path ends in one.
    pub fn leaf_key(&self) -> Option<&str> {
        match self.segments.last() {
            Some(FieldPathSegment::Key(key)) => Some(key.as_str()),
            _ => None,
        }
    }
}

impl Default for FieldPath {
    fn default() -> Self {
        Self::root()
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum FieldPathParseError {
    #[error("field path is empty")]
    Empty,
    #[error("empty key segment at offset {0}")]
    EmptyKey(usize),
    #[error("invalid index segment at offset {0}")]
    InvalidIndex(usize),
    #[error("invalid quoted key at offset {0}")]
    InvalidQuotedKey(usize),
    #[error("unexpected character '{found}' at offset {offset}")]
    UnexpectedChar { found: char, offset: usize },
}

impl std::str::FromStr for FieldPath {
    type Err = FieldPathParseError;

    /// Accepts `inputs[0].sub-type` as well as the `$`-rooted form
    /// `$.inputs[0].sub-type`; a lone `$` is the root. Keys outside
    /// `[A-Za-z0-9_-]` appear as JSON strings in brackets: `extra["a.b"]`.
    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let body = match input.strip_prefix('$') {
            Some("") => return Ok(FieldPath::root()),
            Some(rest) => rest.strip_prefix('.').unwrap_or(rest),
            None if input.is_empty() => return Err(FieldPathParseError::Empty),
            None => input,
        };
        let offset_base = input.len() - body.len();

        let mut segments = Vec::new();
        let mut chars = body.char_indices();
        let mut key = String::new();
        let mut key_start = 0;
        let mut after_index = false;

        while let Some((offset, character)) = chars.next() {
            match character {
                '.' => {
                    if !after_index {
                        if key.is_empty() {
                            return Err(FieldPathParseError::EmptyKey(offset_base + key_start));
                        }
                        segments.push(FieldPathSegment::Key(std::mem::take(&mut key)));
                    }
                    after_index = false;
                    key_start = offset + 1;
                }
                '[' => {
                    let quoted = matches!(chars.clone().next(), Some((_, '"')));
                    if !key.is_empty() {
                        segments.push(FieldPathSegment::Key(std::mem::take(&mut key)));
                    } else if !after_index && !(quoted && offset == 0) {
                        return Err(FieldPathParseError::InvalidIndex(offset_base + offset));
                    }
                    if quoted {
                        let quoted_key = read_quoted_key(&mut chars)
                            .ok_or(FieldPathParseError::InvalidQuotedKey(offset_base + offset))?;
                        segments.push(FieldPathSegment::Key(quoted_key));
                        after_index = true;
                        continue;
                    }
                    let mut digits = String::new();
                    let mut closed = false;
                    for (_, inner) in chars.by_ref() {
                        if inner == ']' {
                            closed = true;
                            break;
                        }
                        digits.push(inner);
                    }
                    let index = digits
                        .parse::<usize>()
                        .ok()
                        .filter(|_| closed)
                        .ok_or(FieldPathParseError::InvalidIndex(offset_base + offset))?;
                    segments.push(FieldPathSegment::Index(index));
                    after_index = true;
                }
                c if c.is_ascii_alphanumeric() || c == '_' || c == '-' => {
                    if after_index {
                        return Err(FieldPathParseError::UnexpectedChar {
                            found: c,
                            offset: offset_base + offset,
                        });
                    }
                    key.push(c);
                }
                other => {
                    return Err(FieldPathParseError::UnexpectedChar {
                        found: other,
                        offset: offset_base + offset,
                    })
                }
            }
        }

        if !key.is_empty() {
            segments.push(FieldPathSegment::Key(key));
        } else if !after_index {
            return Err(FieldPathParseError::EmptyKey(offset_base + key_start));
        }

        Ok(FieldPath::from_segments(segments))
    }
}

/// Consumes `"..."]` and decodes the JSON string literal.
fn read_quoted_key(chars: &mut CharIndices<'_>) -> Option<String> {
    let mut literal = String::new();
    let mut escaped = false;
    for (_, character) in chars.by_ref() {
        literal.push(character);
        if escaped {
            escaped = false;
            continue;
        }
        match character {
            '\\' => escaped = true,
            '"' if literal.len() > 1 => break,
            _ => {}
        }
    }
    match chars.next() {
        Some((_, ']')) => serde_json::from_str(&literal).ok(),
        _ => None,
    }
}

fn is_plain_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
}

impl Display for FieldPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.segments.is_empty() {
            return write!(f, "$");
        }
        for (position, segment) in self.segments.iter().enumerate() {
            match segment {
                FieldPathSegment::Key(key) if !is_plain_key(key) => {
                    write!(f, "[{}]", serde_json::Value::from(key.as_str()))?
                }
                FieldPathSegment::Key(key) if position == 0 => write!(f, "{key}")?,
                FieldPathSegment::Key(key) => write!(f, ".{key}")?,
                FieldPathSegment::Index(index) => write!(f, "[{index}]")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "field_path_test.rs"]
mod tests;
