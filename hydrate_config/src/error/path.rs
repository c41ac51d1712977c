//! Field-path trail carried by hydration errors.

use std::fmt;

/// One step on the path from the destination root to a failing value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathSegment {
    /// Named struct field.
    Field(&'static str),
    /// Position within a sequence or fixed array.
    Index(usize),
    /// Entry key within a map.
    Key(String),
}

impl fmt::Display for PathSegment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Field(name) => f.write_str(name),
            Self::Index(index) => write!(f, "[{index}]"),
            Self::Key(key) => write!(f, "[{key:?}]"),
        }
    }
}

/// Segments are stored innermost-first so prepending on unwind is a push.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(super) struct Trail(Vec<PathSegment>);

impl Trail {
    pub(super) fn prepend(&mut self, segment: PathSegment) {
        self.0.push(segment);
    }

    pub(super) fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Segments ordered from the root outwards.
    pub(super) fn iter(&self) -> impl Iterator<Item = &PathSegment> {
        self.0.iter().rev()
    }
}

impl fmt::Display for Trail {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (position, segment) in self.iter().enumerate() {
            if position > 0 && matches!(segment, PathSegment::Field(_)) {
                f.write_str(".")?;
            }
            write!(f, "{segment}")?;
        }
        Ok(())
    }
}
