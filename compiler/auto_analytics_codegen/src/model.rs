//! Front-end independent declaration model.
//!
//! The source front end lowers annotated items into [`Declaration`]s and the
//! discovery engine only ever looks at this model. Keeping the two apart lets
//! discovery be tested without going through `syn`.

use std::fmt;
use std::path::PathBuf;

/// A `::`-separated path such as `crate::events::Lifecycle`.
#[derive(Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
pub struct QualifiedName {
    segments: Vec<String>,
}

impl QualifiedName {
    pub fn new<I, S>(segments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        QualifiedName {
            segments: segments.into_iter().map(Into::into).collect(),
        }
    }

    /// The crate root, `crate`.
    pub fn crate_root() -> Self {
        Self::new(["crate"])
    }

    /// Parse a `::`-separated path.
    pub fn parse(path: &str) -> Self {
        Self::new(path.split("::").filter(|s| !s.is_empty()))
    }

    #[must_use]
    pub fn child(&self, name: impl Into<String>) -> Self {
        let mut segments = self.segments.clone();
        segments.push(name.into());
        QualifiedName { segments }
    }

    pub fn parent(&self) -> Option<Self> {
        let (_, rest) = self.segments.split_last()?;
        if rest.is_empty() {
            return None;
        }
        Some(QualifiedName {
            segments: rest.to_vec(),
        })
    }

    /// Last path segment.
    pub fn simple_name(&self) -> &str {
        self.segments.last().map_or("", String::as_str)
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

impl fmt::Display for QualifiedName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("::"))
    }
}

/// Where a declaration was found.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct Location {
    pub file: PathBuf,
    /// 1-based line of the marker attribute.
    pub line: usize,
}

/// What kind of item a marked declaration is.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum DeclKind {
    /// A type declaration whose shape is known.
    ///
    /// `closed` is true when the set of variants is fixed and can be matched
    /// exhaustively (an `enum`).
    Class { closed: bool, item: &'static str },
    /// An item without structural metadata (`fn`, `const`, `mod`, ...).
    Opaque { item: &'static str },
}

impl DeclKind {
    /// Item keyword, for messages.
    pub fn item(self) -> &'static str {
        match self {
            DeclKind::Class { item, .. } | DeclKind::Opaque { item } => item,
        }
    }
}

/// A marked declaration as seen by discovery.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Declaration {
    pub name: QualifiedName,
    pub kind: DeclKind,
    /// Number of lifetime parameters.
    pub lifetimes: usize,
    /// Whether the declaration has type or const parameters.
    pub has_type_params: bool,
    /// Enclosed member declarations, in source order.
    pub members: Vec<Member>,
    pub location: Location,
}

/// Whether a member's shape is known from source.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum MemberKind {
    Class,
    /// Wraps a type no scanned source declares.
    Opaque,
}

/// How a variant is written, which decides the generated match pattern.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum VariantShape {
    /// `Created`
    Unit,
    /// `Clicked { label }`
    Braced,
    /// `Clicked(Clicked)`, fields are read through the wrapped value.
    Newtype,
    /// `Pair(a, b)`, fields are bound positionally.
    Tuple,
}

/// A constructor signature: parameter names in declaration order.
#[derive(Clone, Eq, PartialEq, Hash, Debug, Default)]
pub struct Constructor {
    pub params: Vec<String>,
}

impl Constructor {
    pub fn new<I, S>(params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Constructor {
            params: params.into_iter().map(Into::into).collect(),
        }
    }
}

/// A declaration enclosed by a marked declaration.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct Member {
    pub name: QualifiedName,
    pub kind: MemberKind,
    pub shape: VariantShape,
    pub direct_supertypes: Vec<QualifiedName>,
    pub constructors: Vec<Constructor>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qualified_name_parse_and_display() {
        let name = QualifiedName::parse("crate::events::Lifecycle");
        assert_eq!(name.segments().len(), 3);
        assert_eq!(name.simple_name(), "Lifecycle");
        assert_eq!(name.to_string(), "crate::events::Lifecycle");
    }

    #[test]
    fn test_qualified_name_child_and_parent() {
        let group = QualifiedName::crate_root().child("Lifecycle");
        let variant = group.child("Created");
        assert_eq!(variant.to_string(), "crate::Lifecycle::Created");
        assert_eq!(variant.parent(), Some(group));
        assert_eq!(QualifiedName::crate_root().parent(), None);
    }

    #[test]
    fn test_decl_kind_item() {
        let closed = DeclKind::Class {
            closed: true,
            item: "enum",
        };
        assert_eq!(closed.item(), "enum");
        assert_eq!(DeclKind::Opaque { item: "fn" }.item(), "fn");
    }
}
