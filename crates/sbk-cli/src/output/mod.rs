use serde::Serialize;
use serde_json::Value;

use crate::cli::OutputFormat;

pub mod table;

/// Render a serializable response to a string in the requested format.
pub fn render<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(value)?),
        OutputFormat::Table => render_table(value),
        OutputFormat::Raw => Ok(serde_json::to_string(value)?),
    }
}

/// Print a serializable response in the requested format.
pub fn output<T: Serialize>(value: &T, format: OutputFormat) -> anyhow::Result<()> {
    let rendered = render(value, format)?;
    println!("{rendered}");
    Ok(())
}

fn render_table<T: Serialize>(value: &T) -> anyhow::Result<String> {
    let width = table::terminal_width();
    match serde_json::to_value(value)? {
        Value::Array(items) => Ok(render_rows(&items, width)),
        // A single-key object wrapping a list renders as that list
        Value::Object(map) if map.len() == 1 && map.values().all(Value::is_array) => {
            let items = map.into_iter().next().map(|(_, v)| v);
            match items {
                Some(Value::Array(items)) => Ok(render_rows(&items, width)),
                _ => Ok(String::from("(no rows)")),
            }
        }
        Value::Object(map) => {
            let rows = map
                .into_iter()
                .map(|(key, value)| vec![key, cell(&value)])
                .collect::<Vec<_>>();
            Ok(table::render(&["key", "value"], &rows, width))
        }
        scalar => Ok(table::render(&["value"], &[vec![cell(&scalar)]], width)),
    }
}

fn render_rows(items: &[Value], width: Option<usize>) -> String {
    if items.is_empty() {
        return String::from("(no rows)");
    }
    if !items.iter().all(Value::is_object) {
        let rows = items.iter().map(|item| vec![cell(item)]).collect::<Vec<_>>();
        return table::render(&["value"], &rows, width);
    }

    // Column order follows the first row, then any keys seen later
    let mut headers = Vec::<String>::new();
    for map in items.iter().filter_map(Value::as_object) {
        for key in map.keys() {
            if !headers.contains(key) {
                headers.push(key.clone());
            }
        }
    }

    let rows = items
        .iter()
        .filter_map(Value::as_object)
        .map(|map| {
            headers
                .iter()
                .map(|header| map.get(header).map_or_else(|| String::from("-"), cell))
                .collect::<Vec<_>>()
        })
        .collect::<Vec<_>>();
    let header_refs = headers.iter().map(String::as_str).collect::<Vec<_>>();
    table::render(&header_refs, &rows, width)
}

fn cell(value: &Value) -> String {
    match value {
        Value::Null => String::from("-"),
        Value::Bool(v) => v.to_string(),
        Value::Number(v) => v
            .as_f64()
            .filter(|_| v.is_f64())
            .map_or_else(|| v.to_string(), |f| format!("{f:.2}")),
        Value::String(v) => v.clone(),
        Value::Array(items) => format!("[{} items]", items.len()),
        other => serde_json::to_string(other).unwrap_or_else(|_| String::from("<invalid-json>")),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde::Serialize;
    use serde_json::json;

    use super::render;
    use crate::cli::OutputFormat;

    #[derive(Serialize)]
    struct Example {
        id: &'static str,
        grand_total: f64,
    }

    #[test]
    fn json_render_is_valid_json() {
        let value = Example { id: "dsh-1", grand_total: 28_360.0 };
        let out = render(&value, OutputFormat::Json).expect("json render should work");
        let parsed: serde_json::Value = serde_json::from_str(&out).expect("json should parse");
        assert_eq!(parsed["id"], "dsh-1");
        assert_eq!(parsed["grand_total"], 28_360.0);
    }

    #[test]
    fn raw_render_is_single_line_json() {
        let value = Example { id: "dsh-1", grand_total: 1.0 };
        let out = render(&value, OutputFormat::Raw).expect("raw render should work");
        assert!(!out.contains('\n'));
    }

    #[test]
    fn table_render_for_object_is_key_value() {
        let value = Example { id: "dsh-1", grand_total: 28_360.0 };
        let out = render(&value, OutputFormat::Table).expect("table render should work");
        assert!(out.lines().next().is_some_and(|line| line.contains("key")));
        assert!(out.contains("28360.00"));
    }

    #[test]
    fn wrapped_list_renders_as_rows() {
        let value = json!({ "snapshots": [
            { "id": "dsh-1", "name": "Q1" },
            { "id": "dsh-2", "name": "Q2", "status": "final" },
        ]});
        let out = render(&value, OutputFormat::Table).expect("table render should work");
        let lines: Vec<&str> = out.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("id"));
        assert!(lines[0].contains("status"));
        assert!(lines[2].contains('-'));
    }

    #[test]
    fn empty_list_says_so() {
        let out = render(&json!([]), OutputFormat::Table).expect("table render should work");
        assert_eq!(out, "(no rows)");
    }
}
