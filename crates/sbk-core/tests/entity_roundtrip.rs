//! Serde roundtrip and JsonSchema validation tests for the domain types.

use std::collections::BTreeMap;

use chrono::{NaiveDate, TimeZone, Utc};
use schemars::schema_for;
use sbk_core::entities::*;
use sbk_core::enums::*;
use sbk_core::measure::Measure;
use sbk_core::request::CalculationRequest;

/// Validate a JSON value against a schemars-generated schema.
fn validate_against_schema(
    schema: &serde_json::Value,
    instance: &serde_json::Value,
) -> Vec<String> {
    let validator = jsonschema::validator_for(schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

macro_rules! roundtrip_and_validate {
    ($name:ident, $ty:ty, $instance:expr) => {
        #[test]
        fn $name() {
            let val: $ty = $instance;

            let json_str = serde_json::to_string_pretty(&val).unwrap();
            let recovered: $ty = serde_json::from_str(&json_str).unwrap();
            assert_eq!(
                recovered,
                val,
                "serde roundtrip failed for {}",
                stringify!($ty)
            );

            let schema = serde_json::to_value(schema_for!($ty)).unwrap();
            let instance = serde_json::to_value(&val).unwrap();
            let errors = validate_against_schema(&schema, &instance);
            assert!(
                errors.is_empty(),
                "Schema validation failed for {}: {:?}",
                stringify!($ty),
                errors
            );
        }
    };
}

fn day(d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 6, d).unwrap()
}

roundtrip_and_validate!(
    project_record_roundtrip,
    ProjectRecord,
    ProjectRecord {
        code: "BRG-001".into(),
        name: "River Crossing".into(),
        project_type: "Bridge Construction".into(),
        priority: "Critical".into(),
        created_at: Utc.with_ymd_and_hms(2024, 1, 15, 9, 30, 0).unwrap(),
    }
);

roundtrip_and_validate!(
    timeline_entry_roundtrip,
    TimelineEntry,
    TimelineEntry {
        id: "tle-0a1b2c3d".into(),
        project_code: "BRG-001".into(),
        date: day(3),
        workers: vec![WorkerAssignment {
            name: "Ana".into(),
            role: "General Laborer".into(),
            hours_worked: Measure::Value(8.0),
        }],
        engineers: vec![SpecialistAssignment {
            name: "Bo".into(),
            specialty: "Structural".into(),
            hours_worked: Measure::Malformed("half day".into()),
        }],
        architects: vec![],
        project_managers: vec![ManagerAssignment { name: "Cy".into() }],
        materials: vec![MaterialUsage {
            name: "Granite Slab".into(),
            quantity: Measure::Value(4.0),
            cost: Measure::Value(1200.0),
        }],
        tools: vec![ToolUsage {
            name: "Crane".into(),
            quantity: Measure::Value(1.0),
            status: Some("in_use".into()),
        }],
        expenses: vec![ExpenseItem {
            description: "Permit".into(),
            amount: Measure::Value(250.0),
            date: Some(day(3)),
        }],
        notes: Some("Pour delayed by rain".into()),
    }
);

roundtrip_and_validate!(
    calculation_request_roundtrip,
    CalculationRequest,
    CalculationRequest::new("June review")
        .with_projects(["BRG-001", "RES-004"])
        .with_range(Some(day(1)), Some(day(30)))
);

roundtrip_and_validate!(
    dashboard_snapshot_roundtrip,
    DashboardSnapshot,
    DashboardSnapshot {
        id: "dsh-a3f8b2c1".into(),
        name: "June review".into(),
        status: SnapshotStatus::Final,
        calculated_at: Utc.with_ymd_and_hms(2024, 7, 1, 8, 0, 0).unwrap(),
        criteria: SelectionCriteria {
            project_codes: vec!["BRG-001".into()],
            date_from: Some(day(1)),
            date_to: None,
        },
        totals: CostTotals {
            total_project_cost: 28_360.0,
            total_base_cost: 28_000.0,
            total_labor_cost: 360.0,
            total_material_cost: 0.0,
            total_tool_cost: 0.0,
            total_expense_cost: 0.0,
        },
        projects: vec![ProjectBreakdown {
            project_code: "BRG-001".into(),
            project_name: "River Crossing".into(),
            project_type: "Bridge Construction".into(),
            priority: "Critical".into(),
            base_cost: 28_000.0,
            multiplier: 3.0,
            labor_cost: 360.0,
            material_cost: 0.0,
            tool_cost: 0.0,
            expense_cost: 0.0,
            total_cost: 28_360.0,
            timeline_entries: 1,
            staffing: StaffingCounts {
                workers: 1,
                ..StaffingCounts::default()
            },
            labor_hours: 8.0,
            daily_costs: vec![DailyCost {
                date: day(3),
                entry_id: "tle-0a1b2c3d".into(),
                daily_cost: 360.0,
                labor_cost: 360.0,
                material_cost: 0.0,
                tool_cost: 0.0,
                expense_cost: 0.0,
                workers: 1,
                engineers: 0,
                architects: 0,
                project_managers: 0,
                labor: vec![LaborLine {
                    labor_type: LaborType::Worker,
                    name: "Ana".into(),
                    role: "General Laborer".into(),
                    hours: 8.0,
                    rate: 15.0,
                    cost: 120.0,
                }],
                materials: vec![],
                tools: vec![],
            }],
        }],
        analytics: Analytics {
            labor: LaborAnalytics {
                total_hours: 8.0,
                hours_by_role: BTreeMap::from([("General Laborer".to_string(), 8.0)]),
                cost_by_role: BTreeMap::from([("General Laborer".to_string(), 360.0)]),
                staffing: StaffingCounts {
                    workers: 1,
                    ..StaffingCounts::default()
                },
            },
            materials: MaterialAnalytics::default(),
            tools: ToolAnalytics::default(),
        },
        summary: FinancialSummary {
            grand_total: 28_360.0,
            project_count: 1,
            timeline_entry_count: 1,
            average_project_cost: 28_360.0,
            profit_margin: 4_254.0,
            roi: 15.0,
        },
        missing_projects: vec!["GONE-9".into()],
        diagnostics: vec![Diagnostic {
            project_code: "BRG-001".into(),
            entry_id: Some("tle-0a1b2c3d".into()),
            date: Some(day(3)),
            kind: DiagnosticKind::MalformedNumber {
                field: "engineers[0].hours_worked".into(),
                raw: "half day".into(),
            },
        }],
    }
);

#[test]
fn snapshot_without_metadata_defaults_to_draft() {
    let json = serde_json::json!({
        "id": "dsh-00000000",
        "name": "bare",
        "calculated_at": "2024-07-01T08:00:00Z",
        "criteria": {"project_codes": [], "date_from": null, "date_to": null},
        "totals": CostTotals::default(),
        "projects": [],
        "analytics": Analytics::default(),
        "summary": FinancialSummary::default(),
    });
    let snapshot: DashboardSnapshot = serde_json::from_value(json).unwrap();
    assert_eq!(snapshot.status, SnapshotStatus::Draft);
    assert!(snapshot.missing_projects.is_empty());
    assert!(snapshot.diagnostics.is_empty());
}
