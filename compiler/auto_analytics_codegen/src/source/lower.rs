//! Lowering of `syn` items into the declaration model.

use std::path::Path;

use rustc_hash::FxHashMap;
use syn::ext::IdentExt;
use syn::{Fields, Item};

use super::SourceFile;
use crate::model::{
    Constructor, DeclKind, Declaration, Location, Member, MemberKind, QualifiedName, VariantShape,
};

/// Name of the attribute that marks an event group.
///
/// Matched on the last path segment, so both `#[auto_analytics_event]` and
/// `#[auto_analytics::auto_analytics_event]` count.
pub const MARKER: &str = "auto_analytics_event";

enum FieldsShape {
    Named(Vec<String>),
    Unnamed,
    Unit,
}

enum IndexedShape {
    Struct(FieldsShape),
    /// An enum wrapped by a variant: an intermediate group, no fields.
    Enum,
}

struct IndexedType {
    name: QualifiedName,
    shape: IndexedShape,
}

/// Names bound by the `use` items of one module, mapped to the imported path.
type Imports = FxHashMap<String, Vec<String>>;

/// Every struct and enum of the tree, keyed by simple name.
pub(crate) struct TypeIndex {
    types: FxHashMap<String, Vec<IndexedType>>,
    imports: FxHashMap<QualifiedName, Imports>,
}

impl TypeIndex {
    pub(crate) fn build(files: &[SourceFile]) -> Self {
        let mut types: FxHashMap<String, Vec<IndexedType>> = FxHashMap::default();
        let mut imports: FxHashMap<QualifiedName, Imports> = FxHashMap::default();
        for file in files {
            walk_items(&file.syntax.items, &file.module, &mut |module, item| {
                let (ident, shape) = match item {
                    Item::Struct(s) => (&s.ident, IndexedShape::Struct(fields_shape(&s.fields))),
                    Item::Enum(e) => (&e.ident, IndexedShape::Enum),
                    Item::Use(u) => {
                        let bound = imports.entry(module.clone()).or_default();
                        collect_use(&u.tree, &mut Vec::new(), bound);
                        return;
                    }
                    _ => return,
                };
                let simple = ident_name(ident);
                types.entry(simple.clone()).or_default().push(IndexedType {
                    name: module.child(simple),
                    shape,
                });
            });
        }
        TypeIndex { types, imports }
    }

    /// Resolve a type written in module `from`.
    ///
    /// `Box<T>` resolves to `T`. A leading name bound by a `use` in `from` is
    /// replaced by the imported path first. Paths starting at `crate`, `self`
    /// or `super` must match exactly and `::`-rooted paths never match; other
    /// paths match by suffix. Among several suffix matches the one declared
    /// in `from` wins, anything still ambiguous is unresolved.
    fn resolve(&self, ty: &syn::Type, from: &QualifiedName) -> Option<&IndexedType> {
        let syn::Type::Path(type_path) = ty else {
            return None;
        };
        if type_path.qself.is_some() {
            return None;
        }
        let last = type_path.path.segments.last()?;

        if last.ident == "Box" {
            let syn::PathArguments::AngleBracketed(args) = &last.arguments else {
                return None;
            };
            return match args.args.first() {
                Some(syn::GenericArgument::Type(inner)) => self.resolve(inner, from),
                _ => None,
            };
        }

        if type_path.path.leading_colon.is_some() {
            return None;
        }

        let mut written: Vec<String> =
            type_path.path.segments.iter().map(|s| ident_name(&s.ident)).collect();
        let imported = self
            .imports
            .get(from)
            .and_then(|bound| bound.get(written.first()?));
        if let Some(imported) = imported {
            let rest = written.split_off(1);
            written.clone_from(imported);
            written.extend(rest);
        }

        let candidates = self.types.get(written.last()?)?;
        if let Some(absolute) = absolute_path(&written, from) {
            return unique(candidates.iter().filter(|c| c.name.segments() == absolute.as_slice()));
        }

        let matching: Vec<&IndexedType> = candidates
            .iter()
            .filter(|c| c.name.segments().ends_with(&written))
            .collect();
        match matching.as_slice() {
            [only] => Some(*only),
            _ => unique(
                matching
                    .into_iter()
                    .filter(|c| c.name.parent().as_ref() == Some(from)),
            ),
        }
    }
}

/// Anchor a path that starts at `crate`, `self` or `super`.
fn absolute_path(path: &[String], from: &QualifiedName) -> Option<Vec<String>> {
    let (first, rest) = path.split_first()?;
    let mut module = match first.as_str() {
        "crate" => return Some(path.to_vec()),
        "self" => from.clone(),
        "super" => from.parent()?,
        _ => return None,
    };
    let mut rest = rest;
    while let Some((segment, tail)) = rest.split_first() {
        if segment != "super" {
            break;
        }
        module = module.parent()?;
        rest = tail;
    }
    let mut absolute = module.segments().to_vec();
    absolute.extend(rest.iter().cloned());
    Some(absolute)
}

/// Record the names bound by one `use` tree. Globs bind nothing.
fn collect_use(tree: &syn::UseTree, prefix: &mut Vec<String>, out: &mut Imports) {
    match tree {
        syn::UseTree::Path(path) => {
            prefix.push(ident_name(&path.ident));
            collect_use(&path.tree, prefix, out);
            prefix.pop();
        }
        syn::UseTree::Name(name) => {
            if name.ident == "self" {
                if let Some(last) = prefix.last() {
                    out.insert(last.clone(), prefix.clone());
                }
            } else {
                let mut path = prefix.clone();
                path.push(ident_name(&name.ident));
                out.insert(ident_name(&name.ident), path);
            }
        }
        syn::UseTree::Rename(rename) => {
            if rename.rename == "_" {
                return;
            }
            let mut path = prefix.clone();
            if rename.ident != "self" {
                path.push(ident_name(&rename.ident));
            }
            out.insert(ident_name(&rename.rename), path);
        }
        syn::UseTree::Group(group) => {
            for tree in &group.items {
                collect_use(tree, prefix, out);
            }
        }
        syn::UseTree::Glob(_) => {}
    }
}

fn unique<'a>(mut found: impl Iterator<Item = &'a IndexedType>) -> Option<&'a IndexedType> {
    let first = found.next()?;
    found.next().is_none().then_some(first)
}

/// Lower every marked item of `file` into `out`.
pub(crate) fn collect_marked(file: &SourceFile, index: &TypeIndex, out: &mut Vec<Declaration>) {
    walk_items(&file.syntax.items, &file.module, &mut |module, item| {
        if let Some(line) = marker_line(item_attrs(item)) {
            out.push(lower_item(item, module, &file.path, line, index));
        }
    });
}

/// Visit `items` and the items of every inline `mod` below them.
fn walk_items<'a, F>(items: &'a [Item], module: &QualifiedName, visit: &mut F)
where
    F: FnMut(&QualifiedName, &'a Item),
{
    for item in items {
        visit(module, item);
        if let Item::Mod(m) = item {
            if let Some((_, inner)) = &m.content {
                walk_items(inner, &module.child(ident_name(&m.ident)), visit);
            }
        }
    }
}

fn marker_line(attrs: &[syn::Attribute]) -> Option<usize> {
    attrs.iter().find_map(|attr| {
        let last = attr.path().segments.last()?;
        (last.ident == MARKER).then(|| last.ident.span().start().line)
    })
}

fn lower_item(
    item: &Item,
    module: &QualifiedName,
    file: &Path,
    line: usize,
    index: &TypeIndex,
) -> Declaration {
    let class = |closed, item| DeclKind::Class { closed, item };
    let (ident, kind) = match item {
        Item::Enum(i) => (Some(&i.ident), class(true, "enum")),
        Item::Struct(i) => (Some(&i.ident), class(false, "struct")),
        Item::Union(i) => (Some(&i.ident), class(false, "union")),
        Item::Trait(i) => (Some(&i.ident), class(false, "trait")),
        Item::TraitAlias(i) => (Some(&i.ident), class(false, "trait alias")),
        Item::Type(i) => (Some(&i.ident), class(false, "type")),
        other => (
            opaque_ident(other),
            DeclKind::Opaque {
                item: item_kind(other),
            },
        ),
    };
    let name = module.child(ident.map_or_else(|| format!("<{}>", item_kind(item)), ident_name));

    let mut decl = Declaration {
        name,
        kind,
        lifetimes: 0,
        has_type_params: false,
        members: Vec::new(),
        location: Location {
            file: file.to_path_buf(),
            line,
        },
    };

    if let Item::Enum(e) = item {
        decl.lifetimes = e.generics.lifetimes().count();
        decl.has_type_params = e.generics.type_params().next().is_some()
            || e.generics.const_params().next().is_some();
        decl.members = e
            .variants
            .iter()
            .map(|v| lower_variant(&decl.name, module, v, index))
            .collect();
    }
    decl
}

fn lower_variant(
    group: &QualifiedName,
    module: &QualifiedName,
    variant: &syn::Variant,
    index: &TypeIndex,
) -> Member {
    let (kind, shape, constructors) = match &variant.fields {
        Fields::Unit => (MemberKind::Class, VariantShape::Unit, vec![Constructor::default()]),
        Fields::Named(named) => (
            MemberKind::Class,
            VariantShape::Braced,
            vec![Constructor::new(
                named.named.iter().filter_map(|f| f.ident.as_ref()).map(ident_name),
            )],
        ),
        Fields::Unnamed(unnamed) => {
            let mut fields = unnamed.unnamed.iter();
            match (fields.next(), fields.next()) {
                (Some(field), None) => lower_newtype(&field.ty, module, index),
                (None, _) => (MemberKind::Class, VariantShape::Tuple, vec![Constructor::default()]),
                (Some(_), Some(_)) => (MemberKind::Class, VariantShape::Tuple, Vec::new()),
            }
        }
    };

    Member {
        name: group.child(ident_name(&variant.ident)),
        kind,
        shape,
        direct_supertypes: vec![group.clone()],
        constructors,
    }
}

/// A one-field variant takes its constructor from the wrapped type.
fn lower_newtype(
    ty: &syn::Type,
    module: &QualifiedName,
    index: &TypeIndex,
) -> (MemberKind, VariantShape, Vec<Constructor>) {
    let Some(target) = index.resolve(ty, module) else {
        return (MemberKind::Opaque, VariantShape::Newtype, Vec::new());
    };
    let constructors = match &target.shape {
        IndexedShape::Struct(FieldsShape::Named(names)) => {
            vec![Constructor::new(names.iter().cloned())]
        }
        IndexedShape::Struct(FieldsShape::Unit) | IndexedShape::Enum => {
            vec![Constructor::default()]
        }
        IndexedShape::Struct(FieldsShape::Unnamed) => Vec::new(),
    };
    tracing::trace!(wrapped = %target.name, "resolved newtype variant");
    (MemberKind::Class, VariantShape::Newtype, constructors)
}

fn fields_shape(fields: &Fields) -> FieldsShape {
    match fields {
        Fields::Named(named) => FieldsShape::Named(
            named.named.iter().filter_map(|f| f.ident.as_ref()).map(ident_name).collect(),
        ),
        Fields::Unnamed(_) => FieldsShape::Unnamed,
        Fields::Unit => FieldsShape::Unit,
    }
}

/// Identifier text without the `r#` prefix.
fn ident_name(ident: &syn::Ident) -> String {
    ident.unraw().to_string()
}

fn item_attrs(item: &Item) -> &[syn::Attribute] {
    match item {
        Item::Const(i) => &i.attrs,
        Item::Enum(i) => &i.attrs,
        Item::ExternCrate(i) => &i.attrs,
        Item::Fn(i) => &i.attrs,
        Item::ForeignMod(i) => &i.attrs,
        Item::Impl(i) => &i.attrs,
        Item::Macro(i) => &i.attrs,
        Item::Mod(i) => &i.attrs,
        Item::Static(i) => &i.attrs,
        Item::Struct(i) => &i.attrs,
        Item::Trait(i) => &i.attrs,
        Item::TraitAlias(i) => &i.attrs,
        Item::Type(i) => &i.attrs,
        Item::Union(i) => &i.attrs,
        Item::Use(i) => &i.attrs,
        _ => &[],
    }
}

fn opaque_ident(item: &Item) -> Option<&syn::Ident> {
    match item {
        Item::Const(i) => Some(&i.ident),
        Item::ExternCrate(i) => Some(&i.ident),
        Item::Fn(i) => Some(&i.sig.ident),
        Item::Macro(i) => i.ident.as_ref(),
        Item::Mod(i) => Some(&i.ident),
        Item::Static(i) => Some(&i.ident),
        _ => None,
    }
}

fn item_kind(item: &Item) -> &'static str {
    match item {
        Item::Const(_) => "const",
        Item::Enum(_) => "enum",
        Item::ExternCrate(_) => "extern crate",
        Item::Fn(_) => "fn",
        Item::ForeignMod(_) => "extern block",
        Item::Impl(_) => "impl",
        Item::Macro(_) => "macro",
        Item::Mod(_) => "mod",
        Item::Static(_) => "static",
        Item::Struct(_) => "struct",
        Item::Trait(_) => "trait",
        Item::TraitAlias(_) => "trait alias",
        Item::Type(_) => "type",
        Item::Union(_) => "union",
        Item::Use(_) => "use",
        _ => "item",
    }
}
