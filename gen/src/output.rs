//! Output formatting for schemas and parse results.

use argbind_core::{FieldKind, Schema};
use argbind_parser::ParsedArgs;

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum OutputFormat {
    Json,
    Yaml,
    Text,
}

/// Formats a schema in the requested output format.
pub fn format_schema(schema: &Schema, format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(schema)
            .map_err(|e| format!("JSON serialization failed: {e}")),
        OutputFormat::Yaml => {
            serde_yaml::to_string(schema).map_err(|e| format!("YAML serialization failed: {e}"))
        }
        OutputFormat::Text => Ok(schema_to_text(schema)),
    }
}

/// Formats a parse result in the requested output format.
///
/// `Text` is the `<schema name=value ...>` diagnostic rendering.
pub fn format_args(args: &ParsedArgs, format: OutputFormat) -> Result<String, String> {
    match format {
        OutputFormat::Json => serde_json::to_string_pretty(args)
            .map_err(|e| format!("JSON serialization failed: {e}")),
        OutputFormat::Yaml => {
            serde_yaml::to_string(args).map_err(|e| format!("YAML serialization failed: {e}"))
        }
        OutputFormat::Text => Ok(args.to_string()),
    }
}

fn schema_to_text(schema: &Schema) -> String {
    let mut out = String::new();

    out.push_str(&format!("Schema: {}  Fields: {}\n", schema.name(), schema.len()));
    if let Some(desc) = schema.description() {
        out.push_str(&format!("  {desc}\n"));
    }

    for field in schema.fields() {
        let spelling = match (field.short, &field.long) {
            (Some(s), Some(l)) => format!("-{s}, --{l}"),
            (Some(s), None) => format!("-{s}"),
            (None, Some(l)) => format!("    --{l}"),
            (None, None) => format!("<{}>", field.name),
        };
        let kind = match field.kind {
            FieldKind::Flag => "flag".to_string(),
            FieldKind::Counter => "count".to_string(),
            FieldKind::Valued(ty) => ty.to_string(),
            FieldKind::PositionalSingle(ty) => format!("{ty}, positional"),
            FieldKind::PositionalList => "list, positional".to_string(),
        };

        let mut line = format!("  {spelling:<24} {kind}");
        if field.required {
            line.push_str(", required");
        }
        if let Some(default) = &field.default {
            line.push_str(&format!(", default {default}"));
        }
        if let Some(desc) = &field.description {
            line.push_str(&format!("  {desc}"));
        }
        out.push_str(line.trim_end());
        out.push('\n');
    }

    out
}
