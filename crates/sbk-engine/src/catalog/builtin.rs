//! Built-in rate tables.

use std::collections::BTreeMap;

use super::keys::{
    ArchitectSpecialty, EngineerSpecialty, MaterialKind, ProjectPriority, ProjectType, ToolKind,
    WorkerRole,
};
use super::{LaborRate, MaterialRate, PriorityRate, ProjectTypeRate, RateCatalog, ToolRate};

const fn labor(hourly_rate: f64, overtime_rate: f64) -> LaborRate {
    LaborRate {
        hourly_rate,
        overtime_rate,
    }
}

/// Specialists bill overtime at time and a half.
fn specialist(hourly_rate: f64) -> LaborRate {
    labor(hourly_rate, hourly_rate * 1.5)
}

fn material(unit_cost: f64, unit: &str) -> MaterialRate {
    MaterialRate {
        unit_cost,
        unit: unit.to_string(),
    }
}

pub(super) fn catalog() -> RateCatalog {
    use ArchitectSpecialty as A;
    use EngineerSpecialty as E;
    use MaterialKind as M;
    use ProjectPriority as P;
    use ProjectType as T;
    use ToolKind as K;
    use WorkerRole as W;

    let worker_roles = BTreeMap::from([
        (W::GeneralLaborer, labor(15.0, 22.5)),
        (W::Carpenter, labor(25.0, 37.5)),
        (W::Electrician, labor(30.0, 45.0)),
        (W::Plumber, labor(28.0, 42.0)),
        (W::Mason, labor(24.0, 36.0)),
        (W::Welder, labor(27.0, 40.5)),
        (W::HeavyEquipmentOperator, labor(32.0, 48.0)),
        (W::Painter, labor(20.0, 30.0)),
        (W::Roofer, labor(22.0, 33.0)),
        (W::Foreman, labor(35.0, 52.5)),
    ]);

    let engineer_specialties = BTreeMap::from([
        (E::Civil, specialist(55.0)),
        (E::Structural, specialist(65.0)),
        (E::Electrical, specialist(60.0)),
        (E::Mechanical, specialist(58.0)),
        (E::Geotechnical, specialist(62.0)),
        (E::Environmental, specialist(52.0)),
    ]);

    let architect_specialties = BTreeMap::from([
        (A::Residential, specialist(50.0)),
        (A::Commercial, specialist(60.0)),
        (A::Landscape, specialist(45.0)),
        (A::Interior, specialist(48.0)),
        (A::UrbanDesign, specialist(58.0)),
    ]);

    let materials = BTreeMap::from([
        (M::Concrete, material(150.0, "cubic meter")),
        (M::SteelBeam, material(450.0, "beam")),
        (M::Rebar, material(25.0, "bar")),
        (M::Brick, material(0.6, "brick")),
        (M::Lumber, material(8.0, "board")),
        (M::Cement, material(12.0, "bag")),
        (M::Sand, material(35.0, "ton")),
        (M::Gravel, material(40.0, "ton")),
        (M::Asphalt, material(95.0, "ton")),
        (M::GlassPanel, material(180.0, "panel")),
        (M::Drywall, material(15.0, "sheet")),
        (M::Paint, material(35.0, "gallon")),
        (M::PvcPipe, material(12.0, "length")),
        (M::CopperWire, material(3.5, "meter")),
        (M::RoofingShingles, material(28.0, "bundle")),
        (M::Insulation, material(22.0, "roll")),
    ]);

    let tools = BTreeMap::from([
        (K::Excavator, ToolRate { daily_rate: 450.0 }),
        (K::Bulldozer, ToolRate { daily_rate: 500.0 }),
        (K::Crane, ToolRate { daily_rate: 1200.0 }),
        (K::ConcreteMixer, ToolRate { daily_rate: 120.0 }),
        (K::Jackhammer, ToolRate { daily_rate: 65.0 }),
        (K::Scaffolding, ToolRate { daily_rate: 40.0 }),
        (K::Generator, ToolRate { daily_rate: 90.0 }),
        (K::Forklift, ToolRate { daily_rate: 220.0 }),
        (K::WeldingMachine, ToolRate { daily_rate: 75.0 }),
        (K::Compactor, ToolRate { daily_rate: 110.0 }),
        (K::PowerDrill, ToolRate { daily_rate: 15.0 }),
        (K::CircularSaw, ToolRate { daily_rate: 20.0 }),
        (K::Ladder, ToolRate { daily_rate: 10.0 }),
        (K::DumpTruck, ToolRate { daily_rate: 350.0 }),
    ]);

    let project_types = BTreeMap::from([
        (T::ResidentialBuilding, ProjectTypeRate { base_cost: 10_000.0, multiplier: 1.0 }),
        (T::CommercialBuilding, ProjectTypeRate { base_cost: 20_000.0, multiplier: 1.3 }),
        (T::BridgeConstruction, ProjectTypeRate { base_cost: 25_000.0, multiplier: 2.0 }),
        (T::RoadConstruction, ProjectTypeRate { base_cost: 15_000.0, multiplier: 1.5 }),
        (T::IndustrialFacility, ProjectTypeRate { base_cost: 35_000.0, multiplier: 1.7 }),
        (T::Renovation, ProjectTypeRate { base_cost: 5_000.0, multiplier: 0.9 }),
        (T::Infrastructure, ProjectTypeRate { base_cost: 30_000.0, multiplier: 1.8 }),
        (T::Landscaping, ProjectTypeRate { base_cost: 3_000.0, multiplier: 0.8 }),
    ]);

    let priorities = BTreeMap::from([
        (P::Low, PriorityRate { urgency_fee: 0.0, multiplier: 1.0 }),
        (P::Medium, PriorityRate { urgency_fee: 500.0, multiplier: 1.1 }),
        (P::High, PriorityRate { urgency_fee: 1_500.0, multiplier: 1.25 }),
        (P::Critical, PriorityRate { urgency_fee: 3_000.0, multiplier: 1.5 }),
    ]);

    RateCatalog {
        worker_roles,
        engineer_specialties,
        architect_specialties,
        materials,
        tools,
        project_types,
        priorities,
    }
}
