//! Aggregation properties over generated portfolios.

use chrono::{NaiveDate, TimeZone, Utc};
use rstest::rstest;
use sbk_core::entities::{
    ExpenseItem, ManagerAssignment, MaterialUsage, ProjectRecord, SpecialistAssignment,
    TimelineEntry, ToolUsage, WorkerAssignment,
};
use sbk_core::measure::Measure;
use sbk_core::request::CalculationRequest;
use sbk_engine::catalog::keys::{
    ArchitectSpecialty, EngineerSpecialty, MaterialKind, ProjectPriority, ProjectType, ToolKind,
    WorkerRole,
};
use sbk_engine::{ComputeBudget, CostEngine, EngineOptions, RateCatalog, SnapshotStamp};

/// Small deterministic generator so failures reproduce from the seed.
struct Lcg(u64);

impl Lcg {
    fn next(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        self.0 >> 33
    }

    fn below(&mut self, n: usize) -> usize {
        (self.next() % n as u64) as usize
    }

    fn hours(&mut self) -> Measure {
        match self.below(10) {
            0 => Measure::Absent,
            1 => Measure::Malformed("n/a".into()),
            _ => Measure::Value(self.below(24) as f64 * 0.5),
        }
    }

    fn pick<'a>(&mut self, labels: &[&'a str]) -> &'a str {
        labels[self.below(labels.len())]
    }
}

fn labels<T: Copy>(
    all: &[T],
    as_str: fn(T) -> &'static str,
    extra: &'static str,
) -> Vec<&'static str> {
    all.iter().map(|k| as_str(*k)).chain([extra]).collect()
}

fn generate(
    seed: u64,
    project_count: usize,
    entries_per_project: usize,
) -> (Vec<ProjectRecord>, Vec<TimelineEntry>) {
    let mut rng = Lcg(seed);
    let types = labels(ProjectType::ALL, ProjectType::as_str, "Moonbase");
    let priorities = labels(ProjectPriority::ALL, ProjectPriority::as_str, "Whenever");
    let roles = labels(WorkerRole::ALL, WorkerRole::as_str, "Juggler");
    let engineers = labels(EngineerSpecialty::ALL, EngineerSpecialty::as_str, "Rocket");
    let architects = labels(ArchitectSpecialty::ALL, ArchitectSpecialty::as_str, "Gothic");
    let materials = labels(MaterialKind::ALL, MaterialKind::as_str, "Granite Slab");
    let tools = labels(ToolKind::ALL, ToolKind::as_str, "Teleporter");

    let mut projects = Vec::new();
    let mut entries = Vec::new();
    for p in 0..project_count {
        let code = format!("PRJ-{p:03}");
        projects.push(ProjectRecord {
            code: code.clone(),
            name: format!("Project {p}"),
            project_type: rng.pick(&types).to_string(),
            priority: rng.pick(&priorities).to_string(),
            created_at: Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap(),
        });

        for e in 0..entries_per_project {
            let date = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap()
                + chrono::Days::new(rng.below(60) as u64);
            let mut entry = TimelineEntry::empty(code.clone(), date);
            entry.id = format!("tle-{p:04x}{e:04x}");
            for _ in 0..rng.below(5) {
                entry.workers.push(WorkerAssignment {
                    name: "w".into(),
                    role: rng.pick(&roles).to_string(),
                    hours_worked: rng.hours(),
                });
            }
            for _ in 0..rng.below(2) {
                entry.engineers.push(SpecialistAssignment {
                    name: "e".into(),
                    specialty: rng.pick(&engineers).to_string(),
                    hours_worked: rng.hours(),
                });
                entry.architects.push(SpecialistAssignment {
                    name: "a".into(),
                    specialty: rng.pick(&architects).to_string(),
                    hours_worked: rng.hours(),
                });
            }
            if rng.below(3) == 0 {
                entry.project_managers.push(ManagerAssignment { name: "pm".into() });
            }
            for _ in 0..rng.below(3) {
                entry.materials.push(MaterialUsage {
                    name: rng.pick(&materials).to_string(),
                    quantity: rng.hours(),
                    cost: Measure::Value(rng.below(500) as f64),
                });
            }
            for _ in 0..rng.below(2) {
                entry.tools.push(ToolUsage {
                    name: rng.pick(&tools).to_string(),
                    quantity: Measure::Value(rng.below(3) as f64),
                    status: None,
                });
            }
            if rng.below(4) == 0 {
                entry.expenses.push(ExpenseItem {
                    description: "misc".into(),
                    amount: Measure::Value(rng.below(1000) as f64 / 4.0),
                    date: Some(date),
                });
            }
            entries.push(entry);
        }
    }
    (projects, entries)
}

fn engine(parallel: bool) -> CostEngine {
    CostEngine::new(
        RateCatalog::builtin(),
        EngineOptions {
            parallel,
            budget: ComputeBudget::default(),
        },
    )
}

fn stamp(id: &str) -> SnapshotStamp {
    SnapshotStamp {
        id: id.into(),
        calculated_at: Utc.with_ymd_and_hms(2024, 7, 1, 0, 0, 0).unwrap(),
    }
}

fn close(a: f64, b: f64) -> bool {
    (a - b).abs() <= 1e-6 * a.abs().max(1.0)
}

#[rstest]
#[case(1, 0, 0)]
#[case(2, 1, 12)]
#[case(3, 7, 30)]
#[case(4, 25, 8)]
fn project_totals_sum_to_grand_total(
    #[case] seed: u64,
    #[case] project_count: usize,
    #[case] entries_per_project: usize,
) {
    let (projects, entries) = generate(seed, project_count, entries_per_project);
    let snapshot = engine(true)
        .calculate(&CalculationRequest::new("prop"), &projects, &entries, stamp("dsh-00000000"))
        .unwrap();

    let sum: f64 = snapshot.projects.iter().map(|p| p.total_cost).sum();
    assert!(close(sum, snapshot.totals.total_project_cost));
    assert!(close(sum, snapshot.summary.grand_total));

    for project in &snapshot.projects {
        let parts = project.base_cost
            + project.labor_cost
            + project.material_cost
            + project.tool_cost
            + project.expense_cost;
        assert!(close(parts, project.total_cost), "{}", project.project_code);
    }
    assert_eq!(snapshot.projects.len(), project_count);
}

#[rstest]
#[case(5, 10, 20)]
#[case(6, 3, 50)]
fn analytics_spend_matches_totals(
    #[case] seed: u64,
    #[case] project_count: usize,
    #[case] entries_per_project: usize,
) {
    let (projects, entries) = generate(seed, project_count, entries_per_project);
    let snapshot = engine(false)
        .calculate(&CalculationRequest::new("prop"), &projects, &entries, stamp("dsh-00000000"))
        .unwrap();
    let analytics = &snapshot.analytics;

    let labor: f64 = analytics.labor.cost_by_role.values().sum();
    let materials: f64 = analytics.materials.spend_by_material.values().sum();
    let tools: f64 = analytics.tools.spend_by_tool.values().sum();
    assert!(close(labor, snapshot.totals.total_labor_cost));
    assert!(close(materials, snapshot.totals.total_material_cost));
    assert!(close(tools, snapshot.totals.total_tool_cost));

    let staffed: u64 = snapshot.projects.iter().map(|p| p.staffing.total()).sum();
    assert_eq!(analytics.labor.staffing.total(), staffed);
}

#[test]
fn parallel_and_sequential_agree_exactly() {
    let (projects, entries) = generate(7, 40, 15);
    let request = CalculationRequest::new("prop");
    let parallel = engine(true)
        .calculate(&request, &projects, &entries, stamp("dsh-00000000"))
        .unwrap();
    let sequential = engine(false)
        .calculate(&request, &projects, &entries, stamp("dsh-00000000"))
        .unwrap();
    assert_eq!(parallel, sequential);
}

#[test]
fn identical_inputs_differ_only_in_identity() {
    let (projects, entries) = generate(8, 6, 10);
    let request = CalculationRequest::new("prop").with_projects(["PRJ-004", "PRJ-001", "NOPE"]);
    let engine = engine(true);
    let first = engine
        .calculate(&request, &projects, &entries, stamp("dsh-00000001"))
        .unwrap();
    let mut second = engine
        .calculate(
            &request,
            &projects,
            &entries,
            SnapshotStamp {
                id: "dsh-00000002".into(),
                calculated_at: Utc.with_ymd_and_hms(2025, 1, 1, 0, 0, 0).unwrap(),
            },
        )
        .unwrap();
    assert_ne!(first.id, second.id);

    second.id.clone_from(&first.id);
    second.calculated_at = first.calculated_at;
    assert_eq!(first, second);
    assert_eq!(first.missing_projects, vec!["NOPE".to_string()]);
    assert_eq!(first.projects[0].project_code, "PRJ-004");
}

#[test]
fn entry_budget_stops_large_portfolios() {
    let (projects, entries) = generate(9, 5, 10);
    let engine = CostEngine::new(
        RateCatalog::builtin(),
        EngineOptions {
            parallel: true,
            budget: ComputeBudget {
                max_timeline_entries: 49,
                ..ComputeBudget::default()
            },
        },
    );
    let err = engine
        .calculate(&CalculationRequest::new("prop"), &projects, &entries, stamp("dsh-00000000"))
        .unwrap_err();
    assert!(err.to_string().contains("50 timeline entries exceeds the limit of 49"));
}
