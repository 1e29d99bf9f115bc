//! Material, tool and expense pricing for one timeline entry.

use sbk_core::entities::{
    DiagnosticKind, ExpenseItem, MaterialLine, MaterialUsage, ToolLine, ToolUsage,
};
use sbk_core::enums::RateKind;

use crate::catalog::RateCatalog;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MaterialCost {
    pub total: f64,
    pub lines: Vec<MaterialLine>,
    pub degraded: Vec<DiagnosticKind>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ToolCost {
    pub total: f64,
    pub lines: Vec<ToolLine>,
    pub degraded: Vec<DiagnosticKind>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExpenseCost {
    pub total: f64,
    pub degraded: Vec<DiagnosticKind>,
}

fn malformed(
    degraded: &mut Vec<DiagnosticKind>,
    field: impl FnOnce() -> String,
    raw: Option<&str>,
) {
    if let Some(raw) = raw {
        degraded.push(DiagnosticKind::MalformedNumber {
            field: field(),
            raw: raw.to_string(),
        });
    }
}

/// Price materials. A catalog entry wins; otherwise an explicit cost on the
/// usage is taken as-is; otherwise the material contributes nothing.
#[must_use]
pub fn material_cost(catalog: &RateCatalog, usages: &[MaterialUsage]) -> MaterialCost {
    let mut cost = MaterialCost::default();

    for (i, usage) in usages.iter().enumerate() {
        malformed(
            &mut cost.degraded,
            || format!("materials[{i}].quantity"),
            usage.quantity.malformed(),
        );
        let quantity = usage.quantity.or_zero();

        if let Some((key, rate)) = catalog.material(&usage.name) {
            let line_cost = quantity * rate.unit_cost;
            cost.total += line_cost;
            cost.lines.push(MaterialLine {
                name: key.as_str().to_string(),
                quantity,
                unit_cost: rate.unit_cost,
                cost: line_cost,
                custom: false,
            });
            continue;
        }

        malformed(
            &mut cost.degraded,
            || format!("materials[{i}].cost"),
            usage.cost.malformed(),
        );
        match usage.cost.value() {
            Some(explicit) => {
                let unit_cost = if quantity > 0.0 { explicit / quantity } else { 0.0 };
                cost.total += explicit;
                cost.lines.push(MaterialLine {
                    name: usage.name.clone(),
                    quantity,
                    unit_cost,
                    cost: explicit,
                    custom: true,
                });
            }
            None => cost.degraded.push(DiagnosticKind::UnknownRate {
                rate_kind: RateKind::Material,
                key: usage.name.clone(),
            }),
        }
    }

    cost
}

/// Price tool rentals at one day per unit. Uncataloged tools are skipped.
#[must_use]
pub fn tool_cost(catalog: &RateCatalog, usages: &[ToolUsage]) -> ToolCost {
    let mut cost = ToolCost::default();

    for (i, usage) in usages.iter().enumerate() {
        malformed(
            &mut cost.degraded,
            || format!("tools[{i}].quantity"),
            usage.quantity.malformed(),
        );
        let Some((key, rate)) = catalog.tool(&usage.name) else {
            cost.degraded.push(DiagnosticKind::UnknownRate {
                rate_kind: RateKind::Tool,
                key: usage.name.clone(),
            });
            continue;
        };
        let quantity = usage.quantity.or_zero();
        let line_cost = quantity * rate.daily_rate;
        cost.total += line_cost;
        cost.lines.push(ToolLine {
            name: key.as_str().to_string(),
            quantity,
            daily_rate: rate.daily_rate,
            cost: line_cost,
            status: usage.status.clone(),
        });
    }

    cost
}

#[must_use]
pub fn expense_cost(expenses: &[ExpenseItem]) -> ExpenseCost {
    let mut cost = ExpenseCost::default();
    for (i, expense) in expenses.iter().enumerate() {
        malformed(
            &mut cost.degraded,
            || format!("expenses[{i}].amount"),
            expense.amount.malformed(),
        );
        cost.total += expense.amount.or_zero();
    }
    cost
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use sbk_core::measure::Measure;

    fn usage(name: &str, quantity: Measure, cost: Measure) -> MaterialUsage {
        MaterialUsage {
            name: name.into(),
            quantity,
            cost,
        }
    }

    #[test]
    fn cataloged_material_uses_unit_cost() {
        let catalog = RateCatalog::builtin();
        let cost = material_cost(
            &catalog,
            &[usage("concrete", Measure::Value(3.0), Measure::Absent)],
        );
        assert_eq!(cost.total, 450.0);
        assert_eq!(cost.lines[0].name, "Concrete");
        assert!(!cost.lines[0].custom);
    }

    #[test]
    fn catalog_price_wins_over_explicit_cost() {
        let catalog = RateCatalog::builtin();
        let cost = material_cost(
            &catalog,
            &[usage("Brick", Measure::Value(1000.0), Measure::Value(999_999.0))],
        );
        assert_eq!(cost.total, 600.0);
    }

    #[test]
    fn custom_material_takes_explicit_cost() {
        let catalog = RateCatalog::builtin();
        let cost = material_cost(
            &catalog,
            &[
                usage("Granite Slab", Measure::Value(4.0), Measure::Value(1200.0)),
                usage("Marble Chips", Measure::Value(0.0), Measure::Value(80.0)),
            ],
        );
        assert_eq!(cost.total, 1280.0);
        assert_eq!(cost.lines[0].unit_cost, 300.0);
        assert!(cost.lines[0].custom);
        assert_eq!(cost.lines[1].unit_cost, 0.0);
    }

    #[test]
    fn unknown_material_without_cost_is_skipped() {
        let catalog = RateCatalog::builtin();
        let cost = material_cost(
            &catalog,
            &[usage("Unobtainium", Measure::Value(2.0), Measure::Absent)],
        );
        assert_eq!(cost.total, 0.0);
        assert!(cost.lines.is_empty());
        assert_eq!(cost.degraded.len(), 1);
    }

    #[test]
    fn tools_rent_one_day_per_unit() {
        let catalog = RateCatalog::builtin();
        let cost = tool_cost(
            &catalog,
            &[
                ToolUsage {
                    name: "Crane".into(),
                    quantity: Measure::Value(2.0),
                    status: Some("in_use".into()),
                },
                ToolUsage {
                    name: "Teleporter".into(),
                    quantity: Measure::Value(1.0),
                    status: None,
                },
            ],
        );
        assert_eq!(cost.total, 2400.0);
        assert_eq!(cost.lines.len(), 1);
        assert_eq!(cost.lines[0].status.as_deref(), Some("in_use"));
        assert_eq!(
            cost.degraded,
            vec![DiagnosticKind::UnknownRate {
                rate_kind: RateKind::Tool,
                key: "Teleporter".into(),
            }]
        );
    }

    #[test]
    fn expenses_sum_parsed_amounts() {
        let expenses = [
            ExpenseItem {
                description: "Permit".into(),
                amount: Measure::Value(250.0),
                date: None,
            },
            ExpenseItem {
                description: "Fuel".into(),
                amount: Measure::from_text("forty"),
                date: None,
            },
            ExpenseItem::default(),
        ];
        let cost = expense_cost(&expenses);
        assert_eq!(cost.total, 250.0);
        assert_eq!(cost.degraded.len(), 1);
    }
}
