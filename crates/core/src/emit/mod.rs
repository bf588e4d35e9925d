//! Rendering of labeled records into the files the frontend consumes.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::OutputConfig;
use crate::model::OutputRecord;

/// Output file flavor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TableFormat {
    /// TypeScript module exporting a typed array (what the frontend imports).
    #[default]
    Ts,
    /// Pretty-printed JSON array of records.
    Json,
}

impl FromStr for TableFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "ts" => Ok(TableFormat::Ts),
            "json" => Ok(TableFormat::Json),
            other => Err(format!("Invalid format '{}'. Allowed: ts, json", other)),
        }
    }
}

/// Render `records` in `format`.
pub fn render(
    records: &[OutputRecord],
    format: TableFormat,
    output: &OutputConfig,
) -> Result<String, serde_json::Error> {
    match format {
        TableFormat::Ts => Ok(render_typescript(records, output)),
        TableFormat::Json => {
            let mut body = serde_json::to_string_pretty(records)?;
            body.push('\n');
            Ok(body)
        }
    }
}

/// Render the TypeScript table module.
///
/// One record per line with fields in `id, name, view, points` order and
/// single-quoted values; downstream tools may parse this layout.
pub fn render_typescript(records: &[OutputRecord], output: &OutputConfig) -> String {
    let mut ts = String::new();
    ts.push('\n');
    ts.push_str(&format!("export interface {} {{\n", output.interface_name));
    ts.push_str("    id: string;\n");
    ts.push_str("    name: string;\n");
    ts.push_str("    points: string;\n");
    ts.push_str("    view: 'front' | 'back';\n");
    ts.push_str("}\n\n");
    ts.push_str(&format!(
        "export const {}: {}[] = [\n",
        output.const_name, output.interface_name
    ));
    for record in records {
        ts.push_str(&format!(
            "    {{ id: '{}', name: '{}', view: '{}', points: '{}' }},\n",
            quote(&record.id),
            quote(&record.name),
            record.view,
            quote(&record.points)
        ));
    }
    ts.push_str("];\n");
    ts
}

/// Escape a value for a single-quoted TypeScript string.
fn quote(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '\'' => out.push_str("\\'"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            other => out.push(other),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::Document;
    use crate::model::View;

    fn chest_r() -> OutputRecord {
        OutputRecord {
            id: "chest_r".into(),
            name: "右胸部".into(),
            view: View::Front,
            points: "10 10 20 10".into(),
        }
    }

    #[test]
    fn typescript_layout_is_stable() {
        let ts = render_typescript(&[chest_r()], &OutputConfig::default());
        let expected = "
export interface BodyPartPath {
    id: string;
    name: string;
    points: string;
    view: 'front' | 'back';
}

export const BODY_PATHS: BodyPartPath[] = [
    { id: 'chest_r', name: '右胸部', view: 'front', points: '10 10 20 10' },
];
";
        assert_eq!(ts, expected);
    }

    #[test]
    fn empty_table_still_declares_the_array() {
        let ts = render_typescript(&[], &OutputConfig::default());
        assert!(ts.ends_with("export const BODY_PATHS: BodyPartPath[] = [\n];\n"));
    }

    #[test]
    fn quotes_survive_a_read_back() {
        let mut record = chest_r();
        record.name = "it's \\ odd".into();
        let ts = render_typescript(&[record.clone()], &OutputConfig::default());
        let table = Document::parse(&ts).read_table("BODY_PATHS").unwrap();
        assert_eq!(table.records, vec![record]);
    }

    #[test]
    fn json_uses_lowercase_views() {
        let body = render(&[chest_r()], TableFormat::Json, &OutputConfig::default()).unwrap();
        assert!(body.contains("\"view\": \"front\""));
        let parsed: Vec<OutputRecord> = serde_json::from_str(&body).unwrap();
        assert_eq!(parsed, vec![chest_r()]);
    }

    #[test]
    fn parses_format_names() {
        assert_eq!("json".parse::<TableFormat>(), Ok(TableFormat::Json));
        assert!("xml".parse::<TableFormat>().is_err());
    }
}
