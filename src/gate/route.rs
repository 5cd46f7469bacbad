use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Static(String),
    Param(String),
}

/// A compiled URL path pattern such as `/users/:id` or `/admin/*`.
///
/// Matching is segment by segment. Empty segments are ignored on both sides,
/// so `/users/` and `//users` match the same patterns as `/users`. A trailing
/// `*` matches the pattern's prefix and anything below it. A `:name` parameter
/// matches any one non-empty segment, the same as the router's path params.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutePattern {
    segments: Vec<Segment>,
    prefix: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PatternError {
    #[error("route pattern '{0}' must start with '/'")]
    NotAbsolute(String),
    #[error("route pattern '{0}' has an unnamed parameter")]
    UnnamedParam(String),
    #[error("route pattern '{0}' may only use '*' as its last segment")]
    MisplacedWildcard(String),
}

impl RoutePattern {
    pub fn parse(pattern: &str) -> Result<Self, PatternError> {
        if !pattern.starts_with('/') {
            return Err(PatternError::NotAbsolute(pattern.to_string()));
        }

        let raw: Vec<&str> = split_path(pattern).collect();
        let mut segments = Vec::with_capacity(raw.len());
        let mut prefix = false;

        for (i, part) in raw.iter().enumerate() {
            if *part == "*" {
                if i + 1 != raw.len() {
                    return Err(PatternError::MisplacedWildcard(pattern.to_string()));
                }
                prefix = true;
            } else if let Some(name) = part.strip_prefix(':') {
                if name.is_empty() {
                    return Err(PatternError::UnnamedParam(pattern.to_string()));
                }
                segments.push(Segment::Param(name.to_string()));
            } else {
                segments.push(Segment::Static(part.to_string()));
            }
        }

        Ok(Self { segments, prefix })
    }

    pub fn matches(&self, path: &str) -> bool {
        let mut parts = split_path(path);

        for segment in &self.segments {
            let Some(part) = parts.next() else {
                return false;
            };
            if let Segment::Static(expected) = segment {
                if expected != part {
                    return false;
                }
            }
        }

        self.prefix || parts.next().is_none()
    }
}

impl FromStr for RoutePattern {
    type Err = PatternError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for RoutePattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            match segment {
                Segment::Static(s) => write!(f, "/{}", s)?,
                Segment::Param(name) => write!(f, "/:{}", name)?,
            }
        }
        if self.prefix {
            f.write_str("/*")
        } else if self.segments.is_empty() {
            f.write_str("/")
        } else {
            Ok(())
        }
    }
}

fn split_path(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}
