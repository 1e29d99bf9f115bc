use sbk_core::enums::RateKind;
use sbk_engine::catalog::RateEntry;
use serde_json::{Map, Value};

use crate::cli::GlobalFlags;
use crate::cli::subcommands::RatesCommands;
use crate::commands::shared::parse::parse_enum;
use crate::context::AppContext;
use crate::output::output;

/// Handle `sbk rates`.
pub fn handle(action: &RatesCommands, ctx: &AppContext, flags: &GlobalFlags) -> anyhow::Result<()> {
    let catalog = ctx.engine.catalog();
    match action {
        RatesCommands::List { kind } => {
            let kinds = match kind {
                Some(kind) => vec![parse_enum::<RateKind>(kind, "rate kind")?],
                None => RateKind::ALL.to_vec(),
            };
            let rows = kinds
                .into_iter()
                .flat_map(|kind| catalog.entries(kind))
                .map(|entry| flatten_entry(&entry))
                .collect::<anyhow::Result<Vec<_>>>()?;
            output(&rows, flags.format)
        }
        RatesCommands::Lookup { kind, key } => {
            let rate_kind = parse_enum::<RateKind>(kind, "rate kind")?;
            let entry = catalog
                .lookup(rate_kind, key)
                .ok_or_else(|| anyhow::anyhow!("no {rate_kind} rate for '{key}'"))?;
            output(&flatten_entry(&entry)?, flags.format)
        }
    }
}

/// `{kind, key, rate: {..}}` becomes `{kind, key, ..}` so every catalog
/// row is one flat record.
fn flatten_entry(entry: &RateEntry) -> anyhow::Result<Value> {
    let Value::Object(mut map) = serde_json::to_value(entry)? else {
        anyhow::bail!("rate entry did not serialize to an object");
    };
    let mut flat = Map::new();
    for field in ["kind", "key"] {
        if let Some(value) = map.remove(field) {
            flat.insert(field.to_string(), value);
        }
    }
    if let Some(Value::Object(rate)) = map.remove("rate") {
        flat.extend(rate);
    }
    Ok(Value::Object(flat))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use sbk_core::enums::RateKind;
    use sbk_engine::RateCatalog;

    use super::flatten_entry;

    #[test]
    fn tool_entry_flattens_to_one_record() {
        let entry = RateCatalog::builtin()
            .lookup(RateKind::Tool, "dump truck")
            .expect("dump truck should be priced");
        let flat = flatten_entry(&entry).expect("entry should flatten");

        assert_eq!(flat["kind"], "tool");
        assert_eq!(flat["key"], "Dump Truck");
        assert!(flat["daily_rate"].is_number());
        assert!(flat.get("rate").is_none());
    }
}
