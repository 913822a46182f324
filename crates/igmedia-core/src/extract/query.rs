//! A small path query language over JSON trees.
//!
//! Grammar: `$` followed by any of `.key`, `..key` (search anywhere below),
//! `[n]` (array index), `.*` / `[*]` (every child). Results of `..` come in
//! pre-order, document order.

use serde_json::Value;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueryError {
    #[error("query must start with '$'")]
    MissingRoot,
    #[error("empty key at offset {0}")]
    EmptyKey(usize),
    #[error("bad index at offset {0}")]
    BadIndex(usize),
    #[error("unexpected '{ch}' at offset {pos}")]
    Unexpected { ch: char, pos: usize },
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Child(String),
    Descendant(String),
    Index(usize),
    Wildcard,
}

/// A parsed path query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Query {
    text: String,
    segments: Vec<Segment>,
}

impl Query {
    pub fn parse(text: &str) -> Result<Self, QueryError> {
        let bytes = text.as_bytes();
        if bytes.first() != Some(&b'$') {
            return Err(QueryError::MissingRoot);
        }
        let mut segments = Vec::new();
        let mut pos = 1;
        while pos < bytes.len() {
            match bytes[pos] {
                b'.' if bytes.get(pos + 1) == Some(&b'.') => {
                    let (key, next) = read_key(text, pos + 2)?;
                    segments.push(Segment::Descendant(key));
                    pos = next;
                }
                b'.' if bytes.get(pos + 1) == Some(&b'*') => {
                    segments.push(Segment::Wildcard);
                    pos += 2;
                }
                b'.' => {
                    let (key, next) = read_key(text, pos + 1)?;
                    segments.push(Segment::Child(key));
                    pos = next;
                }
                b'[' => {
                    let close = text[pos..]
                        .find(']')
                        .map(|i| pos + i)
                        .ok_or(QueryError::BadIndex(pos))?;
                    let inner = &text[pos + 1..close];
                    if inner == "*" {
                        segments.push(Segment::Wildcard);
                    } else {
                        let n = inner.parse().map_err(|_| QueryError::BadIndex(pos))?;
                        segments.push(Segment::Index(n));
                    }
                    pos = close + 1;
                }
                _ => {
                    let ch = text[pos..].chars().next().unwrap_or('?');
                    return Err(QueryError::Unexpected { ch, pos });
                }
            }
        }
        Ok(Self {
            text: text.to_string(),
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// All nodes the query selects, in order.
    pub fn eval<'v>(&self, root: &'v Value) -> Vec<&'v Value> {
        let mut current = vec![root];
        for segment in &self.segments {
            let mut next = Vec::new();
            for node in current {
                match segment {
                    Segment::Child(key) => next.extend(node.get(key.as_str())),
                    Segment::Index(i) => next.extend(node.as_array().and_then(|a| a.get(*i))),
                    Segment::Wildcard => match node {
                        Value::Array(items) => next.extend(items.iter()),
                        Value::Object(map) => next.extend(map.values()),
                        _ => {}
                    },
                    Segment::Descendant(key) => collect_descendants(node, key, &mut next),
                }
            }
            if next.is_empty() {
                return next;
            }
            current = next;
        }
        current
    }

    /// First selected node, if any.
    pub fn first<'v>(&self, root: &'v Value) -> Option<&'v Value> {
        self.eval(root).into_iter().next()
    }
}

impl FromStr for Query {
    type Err = QueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Query::parse(s)
    }
}

impl fmt::Display for Query {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

fn read_key(text: &str, start: usize) -> Result<(String, usize), QueryError> {
    let end = text[start..]
        .find(|c| c == '.' || c == '[')
        .map_or(text.len(), |i| start + i);
    if end == start {
        return Err(QueryError::EmptyKey(start));
    }
    Ok((text[start..end].to_string(), end))
}

fn collect_descendants<'v>(node: &'v Value, key: &str, out: &mut Vec<&'v Value>) {
    match node {
        Value::Object(map) => {
            if let Some(v) = map.get(key) {
                out.push(v);
            }
            for child in map.values() {
                collect_descendants(child, key, out);
            }
        }
        Value::Array(items) => {
            for child in items {
                collect_descendants(child, key, out);
            }
        }
        _ => {}
    }
}

/// JavaScript-style truthiness of a JSON value.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
