//! The rate catalog: seven read-only pricing tables loaded once per process.
//!
//! Lookups never fail; a key the catalog does not price comes back as `None`
//! and callers contribute zero for it.
//!
//! A deployment may override prices from a TOML file shaped like the
//! serialized catalog:
//!
//! ```toml
//! [worker_roles."General Laborer"]
//! hourly_rate = 16.0
//! overtime_rate = 24.0
//!
//! [priorities.Critical]
//! urgency_fee = 3500.0
//! multiplier = 1.5
//! ```
//!
//! Keys an override file does not name keep their built-in prices. A key the
//! catalog does not know is a parse error.

mod builtin;
pub mod keys;

use std::collections::BTreeMap;
use std::path::Path;

use sbk_core::enums::RateKind;
use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use keys::{
    ArchitectSpecialty, EngineerSpecialty, MaterialKind, ProjectPriority, ProjectType, RateKey,
    ToolKind, WorkerRole,
};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LaborRate {
    pub hourly_rate: f64,
    pub overtime_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MaterialRate {
    pub unit_cost: f64,
    #[serde(default)]
    pub unit: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ToolRate {
    pub daily_rate: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectTypeRate {
    pub base_cost: f64,
    pub multiplier: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriorityRate {
    pub urgency_fee: f64,
    pub multiplier: f64,
}

/// A catalog hit: the resolved key and its pricing fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RateEntry {
    WorkerRole { key: WorkerRole, rate: LaborRate },
    EngineerSpecialty { key: EngineerSpecialty, rate: LaborRate },
    ArchitectSpecialty { key: ArchitectSpecialty, rate: LaborRate },
    Material { key: MaterialKind, rate: MaterialRate },
    Tool { key: ToolKind, rate: ToolRate },
    ProjectType { key: ProjectType, rate: ProjectTypeRate },
    ProjectPriority { key: ProjectPriority, rate: PriorityRate },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RateCatalog {
    #[serde(default)]
    pub worker_roles: BTreeMap<WorkerRole, LaborRate>,
    #[serde(default)]
    pub engineer_specialties: BTreeMap<EngineerSpecialty, LaborRate>,
    #[serde(default)]
    pub architect_specialties: BTreeMap<ArchitectSpecialty, LaborRate>,
    #[serde(default)]
    pub materials: BTreeMap<MaterialKind, MaterialRate>,
    #[serde(default)]
    pub tools: BTreeMap<ToolKind, ToolRate>,
    #[serde(default)]
    pub project_types: BTreeMap<ProjectType, ProjectTypeRate>,
    #[serde(default)]
    pub priorities: BTreeMap<ProjectPriority, PriorityRate>,
}

impl RateCatalog {
    /// The built-in price list.
    #[must_use]
    pub fn builtin() -> Self {
        builtin::catalog()
    }

    /// Built-in prices with the overrides in `path` applied on top.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` if the file cannot be read, is not a valid
    /// catalog document, or names a negative or non-finite price.
    pub fn builtin_with_overrides(path: &Path) -> Result<Self, CatalogError> {
        let raw = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let overrides = Self::from_toml_str(&raw)?;
        let mut catalog = Self::builtin();
        catalog.apply_overrides(overrides);
        Ok(catalog)
    }

    /// Parse and validate a catalog document.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::Parse` for malformed TOML or unknown keys and
    /// `CatalogError::InvalidRate` for negative or non-finite prices.
    pub fn from_toml_str(raw: &str) -> Result<Self, CatalogError> {
        let catalog: Self = toml::from_str(raw)?;
        catalog.validate()?;
        Ok(catalog)
    }

    /// Replace prices for every key `overrides` names.
    pub fn apply_overrides(&mut self, overrides: Self) {
        self.worker_roles.extend(overrides.worker_roles);
        self.engineer_specialties.extend(overrides.engineer_specialties);
        self.architect_specialties.extend(overrides.architect_specialties);
        self.materials.extend(overrides.materials);
        self.tools.extend(overrides.tools);
        self.project_types.extend(overrides.project_types);
        self.priorities.extend(overrides.priorities);
    }

    /// Check that every price is a finite, non-negative number.
    ///
    /// # Errors
    ///
    /// Returns the first offending entry as `CatalogError::InvalidRate`.
    pub fn validate(&self) -> Result<(), CatalogError> {
        fn check(kind: RateKind, key: &str, field: &str, value: f64) -> Result<(), CatalogError> {
            if value.is_finite() && value >= 0.0 {
                Ok(())
            } else {
                Err(CatalogError::InvalidRate {
                    kind,
                    key: key.to_string(),
                    reason: format!("{field} must be a non-negative number, got {value}"),
                })
            }
        }

        for (key, rate) in &self.worker_roles {
            check(RateKind::WorkerRole, key.as_str(), "hourly_rate", rate.hourly_rate)?;
            check(RateKind::WorkerRole, key.as_str(), "overtime_rate", rate.overtime_rate)?;
        }
        for (key, rate) in &self.engineer_specialties {
            check(RateKind::EngineerSpecialty, key.as_str(), "hourly_rate", rate.hourly_rate)?;
            check(RateKind::EngineerSpecialty, key.as_str(), "overtime_rate", rate.overtime_rate)?;
        }
        for (key, rate) in &self.architect_specialties {
            check(RateKind::ArchitectSpecialty, key.as_str(), "hourly_rate", rate.hourly_rate)?;
            check(RateKind::ArchitectSpecialty, key.as_str(), "overtime_rate", rate.overtime_rate)?;
        }
        for (key, rate) in &self.materials {
            check(RateKind::Material, key.as_str(), "unit_cost", rate.unit_cost)?;
        }
        for (key, rate) in &self.tools {
            check(RateKind::Tool, key.as_str(), "daily_rate", rate.daily_rate)?;
        }
        for (key, rate) in &self.project_types {
            check(RateKind::ProjectType, key.as_str(), "base_cost", rate.base_cost)?;
            check(RateKind::ProjectType, key.as_str(), "multiplier", rate.multiplier)?;
        }
        for (key, rate) in &self.priorities {
            check(RateKind::ProjectPriority, key.as_str(), "urgency_fee", rate.urgency_fee)?;
            check(RateKind::ProjectPriority, key.as_str(), "multiplier", rate.multiplier)?;
        }
        Ok(())
    }

    /// Look up a typed key.
    #[must_use]
    pub fn get(&self, key: RateKey) -> Option<RateEntry> {
        match key {
            RateKey::WorkerRole(key) => self
                .worker_roles
                .get(&key)
                .map(|rate| RateEntry::WorkerRole { key, rate: *rate }),
            RateKey::EngineerSpecialty(key) => self
                .engineer_specialties
                .get(&key)
                .map(|rate| RateEntry::EngineerSpecialty { key, rate: *rate }),
            RateKey::ArchitectSpecialty(key) => self
                .architect_specialties
                .get(&key)
                .map(|rate| RateEntry::ArchitectSpecialty { key, rate: *rate }),
            RateKey::Material(key) => self.materials.get(&key).map(|rate| RateEntry::Material {
                key,
                rate: rate.clone(),
            }),
            RateKey::Tool(key) => self
                .tools
                .get(&key)
                .map(|rate| RateEntry::Tool { key, rate: *rate }),
            RateKey::ProjectType(key) => self
                .project_types
                .get(&key)
                .map(|rate| RateEntry::ProjectType { key, rate: *rate }),
            RateKey::ProjectPriority(key) => self
                .priorities
                .get(&key)
                .map(|rate| RateEntry::ProjectPriority { key, rate: *rate }),
        }
    }

    /// Resolve free text against one table and look it up.
    #[must_use]
    pub fn lookup(&self, kind: RateKind, raw_key: &str) -> Option<RateEntry> {
        RateKey::parse(kind, raw_key).and_then(|key| self.get(key))
    }

    /// Hourly rate for a labor key of any of the three staffing tables.
    #[must_use]
    pub fn hourly_rate(&self, kind: RateKind, raw_key: &str) -> Option<(&'static str, f64)> {
        match self.lookup(kind, raw_key)? {
            RateEntry::WorkerRole { key, rate } => Some((key.as_str(), rate.hourly_rate)),
            RateEntry::EngineerSpecialty { key, rate } => Some((key.as_str(), rate.hourly_rate)),
            RateEntry::ArchitectSpecialty { key, rate } => Some((key.as_str(), rate.hourly_rate)),
            _ => None,
        }
    }

    #[must_use]
    pub fn material(&self, raw_key: &str) -> Option<(MaterialKind, &MaterialRate)> {
        let key = MaterialKind::from_key(raw_key)?;
        self.materials.get(&key).map(|rate| (key, rate))
    }

    #[must_use]
    pub fn tool(&self, raw_key: &str) -> Option<(ToolKind, ToolRate)> {
        let key = ToolKind::from_key(raw_key)?;
        self.tools.get(&key).map(|rate| (key, *rate))
    }

    #[must_use]
    pub fn project_type(&self, raw_key: &str) -> Option<ProjectTypeRate> {
        ProjectType::from_key(raw_key).and_then(|key| self.project_types.get(&key).copied())
    }

    #[must_use]
    pub fn priority(&self, raw_key: &str) -> Option<PriorityRate> {
        ProjectPriority::from_key(raw_key).and_then(|key| self.priorities.get(&key).copied())
    }

    /// Every entry of one table, in key order.
    #[must_use]
    pub fn entries(&self, kind: RateKind) -> Vec<RateEntry> {
        fn collect<K: Copy, R: Clone>(
            table: &BTreeMap<K, R>,
            wrap: impl Fn(K, R) -> RateEntry,
        ) -> Vec<RateEntry> {
            table.iter().map(|(key, rate)| wrap(*key, rate.clone())).collect()
        }

        match kind {
            RateKind::WorkerRole => collect(&self.worker_roles, |key, rate| {
                RateEntry::WorkerRole { key, rate }
            }),
            RateKind::EngineerSpecialty => collect(&self.engineer_specialties, |key, rate| {
                RateEntry::EngineerSpecialty { key, rate }
            }),
            RateKind::ArchitectSpecialty => collect(&self.architect_specialties, |key, rate| {
                RateEntry::ArchitectSpecialty { key, rate }
            }),
            RateKind::Material => {
                collect(&self.materials, |key, rate| RateEntry::Material { key, rate })
            }
            RateKind::Tool => collect(&self.tools, |key, rate| RateEntry::Tool { key, rate }),
            RateKind::ProjectType => collect(&self.project_types, |key, rate| {
                RateEntry::ProjectType { key, rate }
            }),
            RateKind::ProjectPriority => collect(&self.priorities, |key, rate| {
                RateEntry::ProjectPriority { key, rate }
            }),
        }
    }
}
