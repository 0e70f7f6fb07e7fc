//! Discovery: from a marked declaration to a [`ClosedEventGroup`].
//!
//! ```text
//! Declaration
//!     │ analytics_element  (has metadata? closed? not generic?)  → Skip + warning
//!     ▼
//! members
//!     │ valid_member       (class? direct subtype?)              → note, excluded
//!     │ declared_events    (has a constructor?)                  → note, excluded
//!     ▼
//! VariantRegistry          (empty?)                              → Skip + warning
//! ```
//!
//! Nothing here is fatal. A declaration that cannot be processed produces a
//! [`Skip`] and the pass moves on to the next one.

use std::fmt;

use indexmap::IndexMap;

use crate::diagnostic::{Diagnostic, DiagnosticSink, Step};
use crate::model::{
    DeclKind, Declaration, Location, Member, MemberKind, QualifiedName, VariantShape,
};

/// One event variant of a group.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct EventVariant {
    pub name: QualifiedName,
    pub shape: VariantShape,
    /// Constructor parameter names, in declaration order.
    pub fields: Vec<String>,
}

impl EventVariant {
    pub fn simple_name(&self) -> &str {
        self.name.simple_name()
    }
}

/// Variants of one group keyed by qualified name, in declaration order.
#[derive(Clone, Eq, PartialEq, Debug, Default)]
pub struct VariantRegistry {
    variants: IndexMap<QualifiedName, EventVariant>,
}

impl VariantRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a variant. A repeated name replaces the earlier entry in place.
    pub fn insert(&mut self, variant: EventVariant) {
        self.variants.insert(variant.name.clone(), variant);
    }

    pub fn get(&self, name: &QualifiedName) -> Option<&EventVariant> {
        self.variants.get(name)
    }

    /// Field names of a registered variant.
    pub fn fields(&self, name: &QualifiedName) -> Option<&[String]> {
        self.variants.get(name).map(|v| v.fields.as_slice())
    }

    pub fn iter(&self) -> impl Iterator<Item = &EventVariant> {
        self.variants.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &QualifiedName> {
        self.variants.keys()
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }
}

/// A validated event group, ready for code generation.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct ClosedEventGroup {
    pub name: QualifiedName,
    /// Lifetime parameters of the group type, rendered as `'_`.
    pub lifetimes: usize,
    pub location: Location,
    pub registry: VariantRegistry,
    /// Direct variants left out of the registry, in declaration order.
    ///
    /// The generated `match` has no arm for them, so it only compiles once
    /// this list is empty.
    pub excluded: Vec<QualifiedName>,
}

impl ClosedEventGroup {
    pub fn simple_name(&self) -> &str {
        self.name.simple_name()
    }
}

/// Why a marked declaration produced no group.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub enum Skip {
    /// Not a type declaration.
    NoMetadata { item: &'static str },
    /// A type declaration, but not a closed one.
    NotClosed { item: &'static str },
    /// Has type or const parameters.
    Generic,
    /// No member qualified as an event variant.
    NoVariants,
}

impl fmt::Display for Skip {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Skip::NoMetadata { item } => write!(f, "`{item}` item is not a type declaration"),
            Skip::NotClosed { item } => {
                write!(f, "`{item}` is not a closed type, expected an enum")
            }
            Skip::Generic => write!(f, "generic event groups are not supported"),
            Skip::NoVariants => write!(f, "no valid variants"),
        }
    }
}

/// Discover the event group declared by `decl`.
///
/// Skips are reported to `sink` as warnings, excluded members as notes.
pub fn discover(
    decl: &Declaration,
    sink: &mut dyn DiagnosticSink,
) -> Result<ClosedEventGroup, Skip> {
    if let Err(skip) = analytics_element(decl) {
        sink.emit(
            Diagnostic::warning(
                Step::AnalyticsElement,
                format!("`{}`: {skip}, skipping", decl.name),
            )
            .at(&decl.location.file, decl.location.line),
        );
        return Err(skip);
    }

    let (registry, excluded) = declared_events(decl, sink);
    if registry.is_empty() {
        sink.emit(
            Diagnostic::warning(
                Step::Process,
                format!("`{}` has no valid variants, skipping", decl.name),
            )
            .at(&decl.location.file, decl.location.line),
        );
        return Err(Skip::NoVariants);
    }

    Ok(ClosedEventGroup {
        name: decl.name.clone(),
        lifetimes: decl.lifetimes,
        location: decl.location.clone(),
        registry,
        excluded,
    })
}

/// Eligibility: a closed type declaration without type parameters.
fn analytics_element(decl: &Declaration) -> Result<(), Skip> {
    match decl.kind {
        DeclKind::Opaque { item } => Err(Skip::NoMetadata { item }),
        DeclKind::Class { closed: false, item } => Err(Skip::NotClosed { item }),
        DeclKind::Class { closed: true, .. } if decl.has_type_params => Err(Skip::Generic),
        DeclKind::Class { closed: true, .. } => Ok(()),
    }
}

/// Build the registry from the members that qualify as event variants,
/// along with the direct members that did not.
fn declared_events(
    decl: &Declaration,
    sink: &mut dyn DiagnosticSink,
) -> (VariantRegistry, Vec<QualifiedName>) {
    let mut registry = VariantRegistry::new();
    let mut excluded = Vec::new();
    for member in &decl.members {
        let direct = member.direct_supertypes.contains(&decl.name);
        if !is_valid_member(member, decl, sink) {
            if direct {
                excluded.push(member.name.clone());
            }
            continue;
        }

        let Some(constructor) = member.constructors.first() else {
            sink.emit(
                Diagnostic::note(
                    Step::DeclaredEvents,
                    format!("`{}` has no named constructor, skipping", member.name),
                )
                .at(&decl.location.file, decl.location.line),
            );
            excluded.push(member.name.clone());
            continue;
        };

        tracing::debug!(variant = %member.name, fields = constructor.params.len(), "registered");
        registry.insert(EventVariant {
            name: member.name.clone(),
            shape: member.shape,
            fields: constructor.params.clone(),
        });
    }
    (registry, excluded)
}

/// A member qualifies when it is a class declaration whose direct
/// supertypes include the group itself.
fn is_valid_member(member: &Member, decl: &Declaration, sink: &mut dyn DiagnosticSink) -> bool {
    let message = if member.kind == MemberKind::Opaque {
        format!("`{}` has no structural metadata, skipping", member.name)
    } else if !member.direct_supertypes.contains(&decl.name) {
        format!("`{}` does not extend `{}`, skipping", member.name, decl.name)
    } else {
        return true;
    };

    sink.emit(
        Diagnostic::note(Step::ValidMember, message).at(&decl.location.file, decl.location.line),
    );
    false
}
