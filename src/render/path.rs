use std::fmt;

use crate::error::{RenderError, RenderErrorKind};

/// Location inside the value tree, printed as `$.forecast.days[2]`.
///
/// Frames live on the stack of the recursive render calls and point at their
/// parent, so building a child path never allocates.
#[derive(Debug, Clone, Copy)]
pub struct ValuePath<'p> {
    parent: Option<&'p ValuePath<'p>>,
    segment: Option<Segment<'p>>,
}

#[derive(Debug, Clone, Copy)]
enum Segment<'p> {
    Key(&'p str),
    Index(usize),
}

impl<'p> ValuePath<'p> {
    pub fn root() -> Self {
        Self { parent: None, segment: None }
    }

    pub fn key(&'p self, key: &'p str) -> ValuePath<'p> {
        Self { parent: Some(self), segment: Some(Segment::Key(key)) }
    }

    pub fn index(&'p self, index: usize) -> ValuePath<'p> {
        Self { parent: Some(self), segment: Some(Segment::Index(index)) }
    }

    pub fn error(&self, kind: RenderErrorKind) -> RenderError {
        RenderError { path: self.to_string(), kind }
    }

    fn write_segments(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(parent) = self.parent {
            parent.write_segments(f)?;
        }
        match self.segment {
            None => Ok(()),
            Some(Segment::Index(i)) => write!(f, "[{i}]"),
            Some(Segment::Key(k)) if is_plain(k) => write!(f, ".{k}"),
            Some(Segment::Key(k)) => write!(f, "[{k:?}]"),
        }
    }
}

fn is_plain(key: &str) -> bool {
    !key.is_empty()
        && !key.starts_with(|c: char| c.is_ascii_digit())
        && key.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
}

impl fmt::Display for ValuePath<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("$")?;
        self.write_segments(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_print_keys_and_indexes() {
        let root = ValuePath::root();
        let days = root.key("days");
        let second = days.index(2);
        let odd = second.key("max temp");
        assert_eq!(root.to_string(), "$");
        assert_eq!(second.to_string(), "$.days[2]");
        assert_eq!(odd.to_string(), "$.days[2][\"max temp\"]");
    }
}
