//! Rust source generation.
//!
//! [`emit`] turns a schema into a standalone module: a plain struct with one
//! public field per schema field (sorted by name), a `parse_args` constructor
//! backed by `argbind_parser`, field-by-field equality and a
//! `<Struct name=value ...>` rendering in declaration order.

use std::sync::LazyLock;

use argbind_core::{FieldKind, FieldSchema, Schema, Value, ValueType};
use regex::Regex;
use tracing::debug;

use crate::error::{GenError, Result};
use crate::fingerprint::{FINGERPRINT_PREFIX, fingerprint};

static STRUCT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z][A-Za-z0-9]*$").expect("static regex must compile"));

/// Identifiers that need the `r#` prefix to be used as field names.
const RAW_KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "do",
    "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl", "in",
    "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "static", "struct", "trait", "true", "try", "type", "typeof", "unsafe", "unsized",
    "use", "virtual", "where", "while", "yield",
];

/// Identifiers that cannot be field names even as raw identifiers.
const RESERVED: &[&str] = &["_", "crate", "self", "Self", "super"];

/// Derives a struct name from a schema name: `my-option` becomes `MyOption`.
///
/// # Errors
///
/// Returns [`GenError::InvalidIdentifier`] if the result is not a valid
/// type name, e.g. when the schema name starts with a digit.
pub fn struct_name(schema_name: &str) -> Result<String> {
    let name: String = schema_name
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + chars.as_str(),
                None => String::new(),
            }
        })
        .collect();
    if STRUCT_RE.is_match(&name) {
        Ok(name)
    } else {
        Err(GenError::InvalidIdentifier(schema_name.to_string()))
    }
}

/// Generates a module for `schema` with a struct named after the schema.
pub fn emit(schema: &Schema) -> Result<String> {
    emit_as(schema, &struct_name(schema.name())?)
}

/// Generates a module for `schema` with an explicit struct name.
///
/// # Errors
///
/// Returns [`GenError::InvalidIdentifier`] for an unusable struct or field
/// name.
pub fn emit_as(schema: &Schema, struct_name: &str) -> Result<String> {
    if !STRUCT_RE.is_match(struct_name) {
        return Err(GenError::InvalidIdentifier(struct_name.to_string()));
    }

    let declared: Vec<(String, &FieldSchema)> = schema
        .fields()
        .iter()
        .map(|field| field_ident(&field.name).map(|ident| (ident, field)))
        .collect::<Result<_>>()?;
    let mut sorted = declared.clone();
    sorted.sort_by(|a, b| a.1.name.cmp(&b.1.name));

    let mut out = String::new();
    header(&mut out, schema, struct_name)?;
    schema_static(&mut out, schema);
    struct_def(&mut out, schema.description(), struct_name, &sorted);
    constructors(&mut out, struct_name, &sorted);
    equality(&mut out, struct_name, &sorted);
    display(&mut out, struct_name, &declared);

    debug!(schema = schema.name(), struct_name, bytes = out.len(), "emitted module");
    Ok(out)
}

fn field_ident(name: &str) -> Result<String> {
    if RESERVED.contains(&name) {
        Err(GenError::InvalidIdentifier(name.to_string()))
    } else if RAW_KEYWORDS.contains(&name) {
        Ok(format!("r#{name}"))
    } else {
        Ok(name.to_string())
    }
}

fn header(out: &mut String, schema: &Schema, struct_name: &str) -> Result<()> {
    let needs_value = schema.fields().iter().any(|f| f.default.is_some());
    let needs_value_type = schema
        .fields()
        .iter()
        .any(|f| matches!(f.kind, FieldKind::Valued(_) | FieldKind::PositionalSingle(_)));

    let mut imports = Vec::new();
    if !schema.is_empty() {
        imports.push("FieldSchema");
    }
    imports.push("Schema");
    if needs_value {
        imports.push("Value");
    }
    if needs_value_type {
        imports.push("ValueType");
    }

    out.push_str(&format!(
        "// @generated by argbind from schema `{}`. Do not edit by hand.\n",
        schema.name()
    ));
    out.push_str(&format!(
        "{FINGERPRINT_PREFIX}{}\n\n",
        fingerprint(schema, struct_name)?
    ));
    out.push_str("use std::fmt;\nuse std::sync::LazyLock;\n\n");
    out.push_str(&format!("use argbind_core::{{{}}};\n", imports.join(", ")));
    out.push_str("use argbind_parser::ArgError;\n\n");
    Ok(())
}

fn schema_static(out: &mut String, schema: &Schema) {
    out.push_str("static SCHEMA: LazyLock<Schema> = LazyLock::new(|| {\n");
    out.push_str(&format!("    Schema::builder({:?})\n", schema.name()));
    if let Some(desc) = schema.description() {
        out.push_str(&format!("        .description({desc:?})\n"));
    }
    for field in schema.fields() {
        out.push_str(&format!("        .field({})\n", field_expr(field)));
    }
    out.push_str("        .build()\n");
    out.push_str("        .expect(\"generated schema must be valid\")\n");
    out.push_str("});\n\n");
}

fn struct_def(
    out: &mut String,
    description: Option<&str>,
    struct_name: &str,
    fields: &[(String, &FieldSchema)],
) {
    if let Some(desc) = description {
        doc_comment(out, "", desc);
    }
    out.push_str("#[derive(Debug, Clone)]\n");
    out.push_str(&format!("pub struct {struct_name} {{\n"));
    for (ident, field) in fields {
        if let Some(desc) = &field.description {
            doc_comment(out, "    ", desc);
        }
        out.push_str(&format!("    pub {ident}: {},\n", rust_type(field.kind)));
    }
    out.push_str("}\n\n");
}

/// Writes `text` as `///` lines; every line of a multi-line description is
/// commented.
fn doc_comment(out: &mut String, indent: &str, text: &str) {
    for line in text.lines() {
        if line.trim().is_empty() {
            out.push_str(&format!("{indent}///\n"));
        } else {
            out.push_str(&format!("{indent}/// {}\n", line.trim_end()));
        }
    }
}

fn constructors(out: &mut String, struct_name: &str, fields: &[(String, &FieldSchema)]) {
    out.push_str(&format!("impl {struct_name} {{\n"));
    out.push_str("    /// Schema the struct is parsed against.\n");
    out.push_str("    pub fn schema() -> &'static Schema {\n");
    out.push_str("        &SCHEMA\n");
    out.push_str("    }\n\n");
    out.push_str("    /// Parses command line tokens, excluding the program name.\n");
    out.push_str("    pub fn parse_args<S: AsRef<str>>(tokens: &[S]) -> Result<Self, ArgError> {\n");
    if fields.is_empty() {
        out.push_str("        argbind_parser::parse(tokens, Self::schema())?;\n");
        out.push_str("        Ok(Self {})\n");
    } else {
        out.push_str("        let args = argbind_parser::parse(tokens, Self::schema())?;\n");
        out.push_str("        Ok(Self {\n");
        for (ident, field) in fields {
            out.push_str(&format!("            {ident}: {},\n", accessor(field)));
        }
        out.push_str("        })\n");
    }
    out.push_str("    }\n");
    out.push_str("}\n\n");
}

fn equality(out: &mut String, struct_name: &str, fields: &[(String, &FieldSchema)]) {
    out.push_str(&format!("impl PartialEq for {struct_name} {{\n"));
    if fields.is_empty() {
        out.push_str("    fn eq(&self, _other: &Self) -> bool {\n");
        out.push_str("        true\n");
    } else {
        out.push_str("    fn eq(&self, other: &Self) -> bool {\n");
        for (idx, (ident, _)) in fields.iter().enumerate() {
            let lead = if idx == 0 { "        " } else { "            && " };
            out.push_str(&format!("{lead}self.{ident} == other.{ident}\n"));
        }
    }
    out.push_str("    }\n");
    out.push_str("}\n\n");
    out.push_str(&format!("impl Eq for {struct_name} {{}}\n\n"));
}

fn display(out: &mut String, struct_name: &str, fields: &[(String, &FieldSchema)]) {
    out.push_str(&format!("impl fmt::Display for {struct_name} {{\n"));
    out.push_str("    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {\n");
    out.push_str(&format!("        write!(f, \"<{struct_name}\")?;\n"));
    for (ident, field) in fields {
        let spec = match field.kind {
            FieldKind::Flag
            | FieldKind::Counter
            | FieldKind::Valued(ValueType::Int)
            | FieldKind::PositionalSingle(ValueType::Int) => "{}",
            _ => "{:?}",
        };
        out.push_str(&format!(
            "        write!(f, \" {}={spec}\", self.{ident})?;\n",
            field.name
        ));
    }
    out.push_str("        write!(f, \">\")\n");
    out.push_str("    }\n");
    out.push_str("}\n");
}

fn rust_type(kind: FieldKind) -> &'static str {
    match kind {
        FieldKind::Flag => "bool",
        FieldKind::Counter => "u32",
        FieldKind::Valued(ValueType::Int) | FieldKind::PositionalSingle(ValueType::Int) => "i64",
        FieldKind::Valued(ValueType::String) | FieldKind::PositionalSingle(ValueType::String) => {
            "String"
        }
        FieldKind::PositionalList => "Vec<String>",
    }
}

fn accessor(field: &FieldSchema) -> String {
    let name = &field.name;
    match field.kind {
        FieldKind::Flag => format!("args.flag({name:?})"),
        FieldKind::Counter => format!("args.count({name:?})"),
        FieldKind::Valued(ValueType::Int) | FieldKind::PositionalSingle(ValueType::Int) => {
            format!("args.int({name:?}).unwrap_or_default()")
        }
        FieldKind::Valued(ValueType::String) | FieldKind::PositionalSingle(ValueType::String) => {
            format!("args.string({name:?}).unwrap_or_default().to_string()")
        }
        FieldKind::PositionalList => format!("args.list({name:?}).unwrap_or_default().to_vec()"),
    }
}

fn field_expr(field: &FieldSchema) -> String {
    let short = match field.short {
        Some(c) => format!("Some({c:?})"),
        None => "None".to_string(),
    };
    let long = match &field.long {
        Some(l) => format!("Some({l:?})"),
        None => "None".to_string(),
    };

    let (mut expr, derived, required_by_default) = match field.kind {
        FieldKind::Flag => (
            format!("FieldSchema::flag({short}, {long})"),
            FieldSchema::flag(field.short, field.long.as_deref()).name,
            false,
        ),
        FieldKind::Counter => (
            format!("FieldSchema::counter({short}, {long})"),
            FieldSchema::counter(field.short, field.long.as_deref()).name,
            false,
        ),
        FieldKind::Valued(ty) => (
            format!("FieldSchema::valued({short}, {long}, {})", value_type_expr(ty)),
            FieldSchema::valued(field.short, field.long.as_deref(), ty).name,
            true,
        ),
        FieldKind::PositionalSingle(ty) => (
            format!(
                "FieldSchema::positional({:?}, {})",
                field.name,
                value_type_expr(ty)
            ),
            field.name.clone(),
            true,
        ),
        FieldKind::PositionalList => (
            format!("FieldSchema::positional_list({:?})", field.name),
            field.name.clone(),
            false,
        ),
    };

    if derived != field.name {
        expr.push_str(&format!(".with_name({:?})", field.name));
    }
    match &field.default {
        Some(default) => expr.push_str(&format!(".with_default({})", value_expr(default))),
        None if field.required && !required_by_default => expr.push_str(".required()"),
        None if !field.required && required_by_default => expr.push_str(".optional()"),
        None => {}
    }
    if let Some(desc) = &field.description {
        expr.push_str(&format!(".with_description({desc:?})"));
    }
    expr
}

fn value_type_expr(ty: ValueType) -> &'static str {
    match ty {
        ValueType::Int => "ValueType::Int",
        ValueType::String => "ValueType::String",
    }
}

fn value_expr(value: &Value) -> String {
    match value {
        Value::Bool(it) => format!("Value::Bool({it})"),
        Value::Int(it) => format!("Value::Int({it})"),
        Value::Count(it) => format!("Value::Count({it})"),
        Value::Str(it) => format!("Value::Str({it:?}.to_string())"),
        Value::List(items) => {
            let items: Vec<String> = items.iter().map(|it| format!("{it:?}.to_string()")).collect();
            format!("Value::List(vec![{}])", items.join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_struct_name() {
        assert_eq!(struct_name("my-option").unwrap(), "MyOption");
        assert_eq!(struct_name("git_commit").unwrap(), "GitCommit");
        assert_eq!(struct_name("ls").unwrap(), "Ls");
        assert!(matches!(
            struct_name("2fa"),
            Err(GenError::InvalidIdentifier(_))
        ));
        assert!(struct_name("--").is_err());
    }

    #[test]
    fn test_keyword_field_uses_raw_identifier() {
        let schema = Schema::new(
            "t",
            vec![FieldSchema::valued(Some('t'), Some("type"), ValueType::String).optional()],
        )
        .unwrap();
        let source = emit(&schema).unwrap();
        assert!(source.contains("    pub r#type: String,\n"));
        assert!(source.contains("r#type: args.string(\"type\").unwrap_or_default().to_string(),"));
        assert!(source.contains("write!(f, \" type={:?}\", self.r#type)?;"));
        assert!(source.contains(".field(FieldSchema::valued(Some('t'), Some(\"type\"), ValueType::String).optional())"));
    }

    #[test]
    fn test_renamed_and_described_fields() {
        let schema = Schema::new(
            "t",
            vec![
                FieldSchema::counter(Some('v'), None)
                    .with_name("verbosity")
                    .with_description("More output"),
                FieldSchema::positional_list("files").required(),
            ],
        )
        .unwrap();
        let source = emit(&schema).unwrap();
        assert!(source.contains(
            ".field(FieldSchema::counter(Some('v'), None).with_name(\"verbosity\").with_description(\"More output\"))"
        ));
        assert!(source.contains(".field(FieldSchema::positional_list(\"files\").required())"));
        assert!(source.contains("    /// More output\n    pub verbosity: u32,\n"));
        assert!(source.contains("use argbind_core::{FieldSchema, Schema};\n"));
    }

    #[test]
    fn test_multiline_descriptions_stay_in_doc_comments() {
        let schema = Schema::builder("t")
            .description("first line\nsecond line")
            .field(FieldSchema::flag(Some('a'), Some("all")).with_description("a\n\nb"))
            .build()
            .unwrap();
        let source = emit(&schema).unwrap();
        assert!(source.contains("/// first line\n/// second line\n#[derive(Debug, Clone)]\n"));
        assert!(source.contains("    /// a\n    ///\n    /// b\n    pub all: bool,\n"));
        assert!(source.contains(".with_description(\"a\\n\\nb\")"));

        let struct_body = &source[source.find("#[derive").unwrap()..source.find("impl T").unwrap()];
        for line in struct_body.lines().map(str::trim_start) {
            let allowed = ["///", "#[", "pub ", "}"];
            assert!(
                line.is_empty() || allowed.iter().any(|prefix| line.starts_with(prefix)),
                "stray line in struct: {line:?}"
            );
        }
    }

    #[test]
    fn test_display_follows_declaration_order() {
        let schema = Schema::new(
            "t",
            vec![
                FieldSchema::flag(Some('z'), Some("zeta")),
                FieldSchema::counter(Some('a'), Some("alpha")),
            ],
        )
        .unwrap();
        let source = emit(&schema).unwrap();

        let struct_alpha = source.find("    pub alpha: u32,").unwrap();
        let struct_zeta = source.find("    pub zeta: bool,").unwrap();
        assert!(struct_alpha < struct_zeta);

        let display_zeta = source.find("write!(f, \" zeta={}\", self.zeta)?;").unwrap();
        let display_alpha = source.find("write!(f, \" alpha={}\", self.alpha)?;").unwrap();
        assert!(display_zeta < display_alpha);
    }

    #[test]
    fn test_struct_name_is_part_of_fingerprint() {
        let schema =
            Schema::new("my-option", vec![FieldSchema::flag(Some('f'), Some("foo"))]).unwrap();
        let default = emit(&schema).unwrap();
        let renamed = emit_as(&schema, "Other").unwrap();
        assert_ne!(
            crate::embedded_fingerprint(&default),
            crate::embedded_fingerprint(&renamed)
        );
        assert!(crate::is_stale(&renamed, &schema, "MyOption").unwrap());
        assert!(!crate::is_stale(&renamed, &schema, "Other").unwrap());
    }

    #[test]
    fn test_empty_schema() {
        let schema = Schema::new("nothing", Vec::new()).unwrap();
        let source = emit(&schema).unwrap();
        assert!(source.contains("pub struct Nothing {\n}\n"));
        assert!(source.contains("Ok(Self {})"));
        assert!(source.contains("fn eq(&self, _other: &Self) -> bool {\n        true\n"));
    }

    #[test]
    fn test_value_expressions() {
        assert_eq!(value_expr(&Value::Int(-5)), "Value::Int(-5)");
        assert_eq!(
            value_expr(&Value::Str("a\"b".into())),
            "Value::Str(\"a\\\"b\".to_string())"
        );
        assert_eq!(
            value_expr(&Value::List(vec!["x".into()])),
            "Value::List(vec![\"x\".to_string()])"
        );
    }
}
