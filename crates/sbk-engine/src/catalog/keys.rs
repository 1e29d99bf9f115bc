//! Typed keys for every rate table.
//!
//! Timeline entries carry roles, specialties and names as free text. They are
//! resolved to one of these enums before any price is looked up, so a typo
//! shows up as an unknown key (and a diagnostic) instead of a silent miss on
//! a string-keyed map.

use std::fmt;

use sbk_core::enums::RateKind;
use serde::{Deserialize, Serialize};

macro_rules! catalog_keys {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $label:literal),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [Self] = &[$(Self::$variant),+];

            /// Display name, which is also the key used in timeline records.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(Self::$variant => $label,)+
                }
            }

            /// Resolve free text (case-insensitive, surrounding whitespace ignored).
            #[must_use]
            pub fn from_key(raw: &str) -> Option<Self> {
                let raw = raw.trim();
                Self::ALL
                    .iter()
                    .copied()
                    .find(|key| key.as_str().eq_ignore_ascii_case(raw))
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

catalog_keys! {
    WorkerRole {
        GeneralLaborer => "General Laborer",
        Carpenter => "Carpenter",
        Electrician => "Electrician",
        Plumber => "Plumber",
        Mason => "Mason",
        Welder => "Welder",
        HeavyEquipmentOperator => "Heavy Equipment Operator",
        Painter => "Painter",
        Roofer => "Roofer",
        Foreman => "Foreman",
    }
}

catalog_keys! {
    EngineerSpecialty {
        Civil => "Civil",
        Structural => "Structural",
        Electrical => "Electrical",
        Mechanical => "Mechanical",
        Geotechnical => "Geotechnical",
        Environmental => "Environmental",
    }
}

catalog_keys! {
    ArchitectSpecialty {
        Residential => "Residential",
        Commercial => "Commercial",
        Landscape => "Landscape",
        Interior => "Interior",
        UrbanDesign => "Urban Design",
    }
}

catalog_keys! {
    MaterialKind {
        Concrete => "Concrete",
        SteelBeam => "Steel Beam",
        Rebar => "Rebar",
        Brick => "Brick",
        Lumber => "Lumber",
        Cement => "Cement",
        Sand => "Sand",
        Gravel => "Gravel",
        Asphalt => "Asphalt",
        GlassPanel => "Glass Panel",
        Drywall => "Drywall",
        Paint => "Paint",
        PvcPipe => "PVC Pipe",
        CopperWire => "Copper Wire",
        RoofingShingles => "Roofing Shingles",
        Insulation => "Insulation",
    }
}

catalog_keys! {
    ToolKind {
        Excavator => "Excavator",
        Bulldozer => "Bulldozer",
        Crane => "Crane",
        ConcreteMixer => "Concrete Mixer",
        Jackhammer => "Jackhammer",
        Scaffolding => "Scaffolding",
        Generator => "Generator",
        Forklift => "Forklift",
        WeldingMachine => "Welding Machine",
        Compactor => "Compactor",
        PowerDrill => "Power Drill",
        CircularSaw => "Circular Saw",
        Ladder => "Ladder",
        DumpTruck => "Dump Truck",
    }
}

catalog_keys! {
    ProjectType {
        ResidentialBuilding => "Residential Building",
        CommercialBuilding => "Commercial Building",
        BridgeConstruction => "Bridge Construction",
        RoadConstruction => "Road Construction",
        IndustrialFacility => "Industrial Facility",
        Renovation => "Renovation",
        Infrastructure => "Infrastructure",
        Landscaping => "Landscaping",
    }
}

catalog_keys! {
    ProjectPriority {
        Low => "Low",
        Medium => "Medium",
        High => "High",
        Critical => "Critical",
    }
}

/// A key into exactly one rate table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RateKey {
    WorkerRole(WorkerRole),
    EngineerSpecialty(EngineerSpecialty),
    ArchitectSpecialty(ArchitectSpecialty),
    Material(MaterialKind),
    Tool(ToolKind),
    ProjectType(ProjectType),
    ProjectPriority(ProjectPriority),
}

impl RateKey {
    /// Resolve free text against the table for `kind`.
    #[must_use]
    pub fn parse(kind: RateKind, raw: &str) -> Option<Self> {
        match kind {
            RateKind::WorkerRole => WorkerRole::from_key(raw).map(Self::WorkerRole),
            RateKind::EngineerSpecialty => {
                EngineerSpecialty::from_key(raw).map(Self::EngineerSpecialty)
            }
            RateKind::ArchitectSpecialty => {
                ArchitectSpecialty::from_key(raw).map(Self::ArchitectSpecialty)
            }
            RateKind::Material => MaterialKind::from_key(raw).map(Self::Material),
            RateKind::Tool => ToolKind::from_key(raw).map(Self::Tool),
            RateKind::ProjectType => ProjectType::from_key(raw).map(Self::ProjectType),
            RateKind::ProjectPriority => ProjectPriority::from_key(raw).map(Self::ProjectPriority),
        }
    }

    #[must_use]
    pub const fn kind(self) -> RateKind {
        match self {
            Self::WorkerRole(_) => RateKind::WorkerRole,
            Self::EngineerSpecialty(_) => RateKind::EngineerSpecialty,
            Self::ArchitectSpecialty(_) => RateKind::ArchitectSpecialty,
            Self::Material(_) => RateKind::Material,
            Self::Tool(_) => RateKind::Tool,
            Self::ProjectType(_) => RateKind::ProjectType,
            Self::ProjectPriority(_) => RateKind::ProjectPriority,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::WorkerRole(key) => key.as_str(),
            Self::EngineerSpecialty(key) => key.as_str(),
            Self::ArchitectSpecialty(key) => key.as_str(),
            Self::Material(key) => key.as_str(),
            Self::Tool(key) => key.as_str(),
            Self::ProjectType(key) => key.as_str(),
            Self::ProjectPriority(key) => key.as_str(),
        }
    }
}

impl fmt::Display for RateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind(), self.as_str())
    }
}
