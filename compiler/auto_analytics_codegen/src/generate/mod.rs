//! Rust source generation for discovered event groups.
//!
//! Each [`ClosedEventGroup`] becomes one file holding one `track_*` function:
//! an exhaustive `match` over the group that assigns an event name and a
//! payload per variant, followed by a single `tracker.track(name, payload)`.

mod writer;

use crate::casing::{to_screaming_snake_case, to_snake_case};
use crate::discovery::{ClosedEventGroup, EventVariant};
use crate::model::{QualifiedName, VariantShape};

use writer::CodeWriter;

/// Prefix of every generated file name.
pub const FILE_PREFIX: &str = "auto_analytics_";

/// Locals assigned by every arm; field bindings must not shadow them.
const RESERVED_BINDINGS: [&str; 2] = ["name", "payload"];

/// Settings that change the text of generated code.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct CodegenOptions {
    /// Path of the runtime crate as seen from the generated code's crate.
    ///
    /// A bare crate name is made absolute (`::auto_analytics`); a path such
    /// as `crate::analytics` or `my_app::analytics` is used as written.
    pub runtime_crate: String,
}

impl Default for CodegenOptions {
    fn default() -> Self {
        CodegenOptions {
            runtime_crate: "auto_analytics".to_owned(),
        }
    }
}

impl CodegenOptions {
    fn runtime_path(&self) -> String {
        let krate = self.runtime_crate.trim();
        if krate == "crate" || krate.contains("::") {
            krate.to_owned()
        } else {
            format!("::{krate}")
        }
    }
}

/// One generated source file.
#[derive(Clone, Eq, PartialEq, Debug)]
pub struct GeneratedArtifact {
    pub group: QualifiedName,
    pub file_name: String,
    pub contents: String,
}

/// `crate::events::Interactive` → `auto_analytics_interactive.rs`.
pub fn artifact_file_name(group: &QualifiedName) -> String {
    format!("{FILE_PREFIX}{}.rs", to_snake_case(group.simple_name()))
}

/// `crate::events::Interactive` → `track_interactive`.
pub fn function_name(group: &QualifiedName) -> String {
    format!("track_{}", to_snake_case(group.simple_name()))
}

/// Generate the tracking function for `group`.
///
/// Output depends only on `group` and `options`.
pub fn generate(group: &ClosedEventGroup, options: &CodegenOptions) -> GeneratedArtifact {
    let runtime = options.runtime_path();
    let group_path = render_path(&group.name);
    let group_type = if group.lifetimes == 0 {
        group_path.clone()
    } else {
        format!("{group_path}<{}>", vec!["'_"; group.lifetimes].join(", "))
    };

    let mut w = CodeWriter::new();
    w.writeln(&format!(
        "// @generated by auto-analytics from `{}`. Do not edit.",
        group.name
    ));
    if !group.excluded.is_empty() {
        let names: Vec<_> = group
            .excluded
            .iter()
            .map(|name| format!("`{}`", name.simple_name()))
            .collect();
        w.writeln(&format!(
            "// No fields could be read for {}, so this match has no arm for them.",
            names.join(", ")
        ));
    }
    w.writeln("");
    w.writeln(&format!(
        "/// Converts `{}` to a name and payload and delegates it to `AutoAnalytics::track`.",
        group.name
    ));
    w.writeln("///");
    w.writeln("/// This is a generated function. Do not edit.");
    w.writeln("#[allow(clippy::needless_late_init)]");
    w.writeln(&format!(
        "pub fn {}<T>(tracker: &T, event: &{group_type})",
        function_name(&group.name)
    ));
    w.writeln("where");
    w.indent();
    w.writeln(&format!("T: {runtime}::AutoAnalytics + ?Sized,"));
    w.dedent();
    w.writeln("{");
    w.indent();
    w.writeln("let name: &'static str;");
    w.writeln(&format!("let payload: {runtime}::Payload;"));
    w.block("match event", |w| {
        for variant in group.registry.iter() {
            write_arm(w, &group_path, variant, &runtime);
        }
    });
    w.writeln("tracker.track(name, payload);");
    w.dedent();
    w.writeln("}");

    tracing::debug!(group = %group.name, arms = group.registry.len(), "generated");
    GeneratedArtifact {
        group: group.name.clone(),
        file_name: artifact_file_name(&group.name),
        contents: w.finish(),
    }
}

/// How a field is bound in the arm pattern and read in the payload.
struct Binding {
    field: String,
    /// Local name inside the arm, or `None` when read through `event`.
    local: Option<String>,
}

impl Binding {
    fn pattern(&self) -> String {
        let field = render_ident(&self.field);
        match &self.local {
            Some(local) if *local != field => format!("{field}: {local}"),
            _ => field,
        }
    }

    fn read(&self) -> String {
        match &self.local {
            Some(local) => local.clone(),
            None => format!("&event.{}", render_ident(&self.field)),
        }
    }
}

fn write_arm(w: &mut CodeWriter, group_path: &str, variant: &EventVariant, runtime: &str) {
    let bindings = bindings(variant);
    let variant_path = format!("{group_path}::{}", render_ident(variant.simple_name()));
    let pattern = match (variant.shape, bindings.is_empty()) {
        (VariantShape::Unit, _) => variant_path,
        (VariantShape::Braced, true) => format!("{variant_path} {{ .. }}"),
        (VariantShape::Braced, false) => format!(
            "{variant_path} {{ {} }}",
            bindings.iter().map(Binding::pattern).collect::<Vec<_>>().join(", ")
        ),
        (VariantShape::Newtype, true) => format!("{variant_path}(_)"),
        (VariantShape::Newtype, false) => format!("{variant_path}(event)"),
        (VariantShape::Tuple, true) => format!("{variant_path}(..)"),
        (VariantShape::Tuple, false) => format!(
            "{variant_path}({})",
            bindings.iter().map(Binding::read).collect::<Vec<_>>().join(", ")
        ),
    };

    w.block(&format!("{pattern} =>"), |w| {
        w.writeln(&format!(
            "name = {:?};",
            to_screaming_snake_case(variant.simple_name())
        ));
        if bindings.is_empty() {
            w.writeln(&format!("payload = {runtime}::Payload::new();"));
            return;
        }
        w.writeln(&format!("payload = {runtime}::Payload::from(["));
        w.indent();
        for binding in &bindings {
            w.writeln(&format!(
                "({:?}.to_owned(), {runtime}::to_value({})),",
                to_snake_case(&binding.field),
                binding.read()
            ));
        }
        w.dedent();
        w.writeln("]);");
    });
}

fn bindings(variant: &EventVariant) -> Vec<Binding> {
    variant
        .fields
        .iter()
        .map(|field| {
            let local = match variant.shape {
                VariantShape::Newtype => None,
                VariantShape::Unit | VariantShape::Braced | VariantShape::Tuple => {
                    Some(local_name(field, &variant.fields))
                }
            };
            Binding {
                field: field.clone(),
                local,
            }
        })
        .collect()
}

/// Binding for `field`, renamed with trailing `_` while it collides with a
/// reserved local or another field.
fn local_name(field: &str, fields: &[String]) -> String {
    if !RESERVED_BINDINGS.contains(&field) {
        return render_ident(field);
    }
    let mut local = format!("{field}_");
    while RESERVED_BINDINGS.contains(&local.as_str()) || fields.iter().any(|f| *f == local) {
        local.push('_');
    }
    local
}

/// Render a path, escaping every segment after the leading `crate`.
fn render_path(name: &QualifiedName) -> String {
    let segments = name.segments();
    let mut rendered = Vec::with_capacity(segments.len());
    for (i, segment) in segments.iter().enumerate() {
        if i == 0 && segment == "crate" {
            rendered.push(segment.clone());
        } else {
            rendered.push(render_ident(segment));
        }
    }
    rendered.join("::")
}

/// `type` → `r#type`; anything already a valid identifier is unchanged.
fn render_ident(name: &str) -> String {
    if syn::parse_str::<syn::Ident>(name).is_ok() {
        name.to_owned()
    } else {
        format!("r#{name}")
    }
}

#[cfg(test)]
mod tests;
