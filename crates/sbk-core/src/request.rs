//! Dashboard calculation requests.

use chrono::NaiveDate;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::entities::SelectionCriteria;
use crate::errors::CoreError;

/// Ask for a new dashboard snapshot.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
pub struct CalculationRequest {
    pub dashboard_name: String,
    /// Project codes to include. Empty means every known project.
    #[serde(default)]
    pub selected_projects: Vec<String>,
    #[serde(default)]
    pub date_from: Option<NaiveDate>,
    #[serde(default)]
    pub date_to: Option<NaiveDate>,
}

impl CalculationRequest {
    #[must_use]
    pub fn new(dashboard_name: impl Into<String>) -> Self {
        Self {
            dashboard_name: dashboard_name.into(),
            ..Self::default()
        }
    }

    #[must_use]
    pub fn with_projects<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected_projects = codes.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub const fn with_range(mut self, from: Option<NaiveDate>, to: Option<NaiveDate>) -> Self {
        self.date_from = from;
        self.date_to = to;
        self
    }

    /// Reject requests no calculation should be attempted for.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::Validation` when the dashboard name is blank or
    /// `date_from` is after `date_to`.
    pub fn validate(&self) -> Result<(), CoreError> {
        if self.dashboard_name.trim().is_empty() {
            return Err(CoreError::Validation("dashboard name is required".into()));
        }
        if let (Some(from), Some(to)) = (self.date_from, self.date_to) {
            if from > to {
                return Err(CoreError::Validation(format!(
                    "date range is inverted: {from} is after {to}"
                )));
            }
        }
        Ok(())
    }

    /// Requested codes, trimmed, blanks dropped, first occurrence kept.
    #[must_use]
    pub fn normalized_projects(&self) -> Vec<String> {
        let mut codes: Vec<String> = Vec::with_capacity(self.selected_projects.len());
        for code in &self.selected_projects {
            let code = code.trim();
            if !code.is_empty() && !codes.iter().any(|seen| seen == code) {
                codes.push(code.to_string());
            }
        }
        codes
    }

    #[must_use]
    pub fn criteria(&self) -> SelectionCriteria {
        SelectionCriteria {
            project_codes: self.normalized_projects(),
            date_from: self.date_from,
            date_to: self.date_to,
        }
    }
}
