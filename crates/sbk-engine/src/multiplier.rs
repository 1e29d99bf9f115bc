use sbk_core::entities::DiagnosticKind;

use crate::catalog::RateCatalog;

/// Per-project pricing factors: a one-off base cost and the factor applied
/// to every daily cost component.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectMultiplier {
    pub base_cost: f64,
    pub multiplier: f64,
    pub degraded: Vec<DiagnosticKind>,
}

/// Combine a project type and priority. An unknown type or priority adds no
/// base cost and a neutral factor of 1.
#[must_use]
pub fn resolve_multiplier(
    catalog: &RateCatalog,
    project_type: &str,
    priority: &str,
) -> ProjectMultiplier {
    let mut resolved = ProjectMultiplier {
        base_cost: 0.0,
        multiplier: 1.0,
        degraded: Vec::new(),
    };

    match catalog.project_type(project_type) {
        Some(rate) => {
            resolved.base_cost += rate.base_cost;
            resolved.multiplier *= rate.multiplier;
        }
        None => resolved.degraded.push(DiagnosticKind::UnknownProjectType {
            key: project_type.to_string(),
        }),
    }

    match catalog.priority(priority) {
        Some(rate) => {
            resolved.base_cost += rate.urgency_fee;
            resolved.multiplier *= rate.multiplier;
        }
        None => resolved.degraded.push(DiagnosticKind::UnknownPriority {
            key: priority.to_string(),
        }),
    }

    resolved
}
