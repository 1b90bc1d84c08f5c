use std::{iter::Peekable, str::Chars};

use regex::Regex;

use crate::{Error, Result};

const SEGMENT: &str = "[^/]+";

/// Outcome of a successful [PathPattern::matches].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathMatch {
    /// Length of the matched prefix, never including the `/` that starts the
    /// following segment.
    pub consumed: usize,
    /// Named captures in pattern order.
    pub params: Vec<(String, String)>,
}

/// Compiled path pattern.
///
/// Grammar: literal text, `:name` (one segment), `:name(regex)` (a segment
/// constrained by a custom expression) and a `?` suffix making the parameter
/// optional together with the slash in front of it.
///
/// Exact patterns must consume the whole path (a trailing slash is
/// tolerated). Prefix patterns stop at a segment boundary.
#[derive(Debug, Clone)]
pub struct PathPattern {
    source: String,
    regex: Regex,
    names: Vec<String>,
    exact: bool,
}

impl PathPattern {
    pub fn compile(pattern: &str, exact: bool) -> Result<Self> {
        let invalid = |reason: &str| Error::InvalidPattern {
            pattern: pattern.to_string(),
            reason: reason.to_string(),
        };

        let trimmed = pattern.trim_end_matches('/');
        let mut body = String::new();
        let mut literal = String::new();
        let mut names: Vec<String> = Vec::new();
        if !trimmed.is_empty() && !trimmed.starts_with('/') {
            literal.push('/');
        }

        let mut chars = trimmed.chars().peekable();
        while let Some(c) = chars.next() {
            if c != ':' {
                literal.push(c);
                continue;
            }
            let name = read_name(&mut chars);
            if name.is_empty() {
                return Err(invalid("parameter name is missing"));
            }
            if name.starts_with(|c: char| c.is_ascii_digit()) {
                return Err(invalid("parameter name must not start with a digit"));
            }
            if names.contains(&name) {
                return Err(invalid(&format!("parameter `{name}` is declared twice")));
            }
            let constraint = match chars.peek() {
                Some('(') => {
                    chars.next();
                    read_group(&mut chars).ok_or_else(|| invalid("unbalanced parenthesis"))?
                }
                _ => SEGMENT.to_string(),
            };
            let group = format!("(?P<{name}>{constraint})");
            if chars.peek() == Some(&'?') {
                chars.next();
                let slash = literal.ends_with('/');
                if slash {
                    literal.pop();
                }
                body.push_str(&regex::escape(&literal));
                literal.clear();
                if slash {
                    body.push_str(&format!("(?:/{group})?"));
                } else {
                    body.push_str(&format!("{group}?"));
                }
            } else {
                body.push_str(&regex::escape(&literal));
                literal.clear();
                body.push_str(&group);
            }
            names.push(name);
        }
        body.push_str(&regex::escape(&literal));

        let expression = if exact {
            format!("^{body}/?$")
        } else {
            format!("^{body}(?:/|$)")
        };
        let regex = Regex::new(&expression).map_err(|e| invalid(&e.to_string()))?;
        Ok(Self {
            source: pattern.to_string(),
            regex,
            names,
            exact,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn is_exact(&self) -> bool {
        self.exact
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn matches(&self, path: &str) -> Option<PathMatch> {
        let captures = self.regex.captures(path)?;
        let whole = captures.get(0)?.as_str();
        let consumed = whole.strip_suffix('/').unwrap_or(whole).len();
        let params = self
            .names
            .iter()
            .filter_map(|name| {
                captures
                    .name(name)
                    .map(|value| (name.clone(), value.as_str().to_string()))
            })
            .collect();
        Some(PathMatch { consumed, params })
    }
}

fn read_name(chars: &mut Peekable<Chars>) -> String {
    let mut name = String::new();
    while let Some(&c) = chars.peek() {
        if !(c.is_ascii_alphanumeric() || c == '_') {
            break;
        }
        name.push(c);
        chars.next();
    }
    name
}

/// Reads up to the parenthesis closing an already consumed `(`.
fn read_group(chars: &mut Peekable<Chars>) -> Option<String> {
    let mut group = String::new();
    let mut depth = 1;
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                group.push(c);
                group.push(chars.next()?);
                continue;
            }
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth == 0 {
                    return Some(group);
                }
            }
            _ => {}
        }
        group.push(c);
    }
    None
}
