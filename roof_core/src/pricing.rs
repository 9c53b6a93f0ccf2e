//! # Cost Estimate
//!
//! Prices a built frame and its roofing layers against a resolved price table.
//! Fetching and parsing the price sheet happens elsewhere; this module only
//! sees the finished `material id -> unit price` mapping.
//!
//! ## Material IDs
//!
//! | ID                   | Quantity                   | Units        |
//! |----------------------|----------------------------|--------------|
//! | `timber`             | frame timber volume        | m3           |
//! | `membrane`           | roof surface               | m2           |
//! | `counter_batten`     | counter batten length      | m            |
//! | `roof_batten`        | roof batten length         | m            |
//! | `roofing`            | roof surface               | m2           |
//! | `flashing_*`         | pieces or sheet area       | pc, m2       |
//! | `lamberia`           | planks or plank area       | pc, m2       |
//!
//! ## Example
//!
//! ```rust
//! use roof_core::params::InputParams;
//! use roof_core::pricing::{estimate_cost, PriceEntry, PriceTable, PriceUnit};
//! use roof_core::roofing::{build_roofing, RoofingOptions};
//! use roof_core::structure::build_structure;
//!
//! let options = RoofingOptions { membrane: false, roofing: false, lamberia: false };
//! let frame = build_structure(&InputParams::default()).unwrap();
//! let roofing = build_roofing(&frame, &options).unwrap();
//!
//! let mut prices = PriceTable::default();
//! prices.insert("timber", PriceEntry::new(PriceUnit::CubicMeter, 180_000.0, "Timber"));
//!
//! let estimate = estimate_cost(&frame, &roofing, &options, &prices).unwrap();
//! assert_eq!(estimate.items.len(), 1);
//! ```

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{RoofError, RoofResult};
use crate::metrics::compute_metrics;
use crate::params::InputParams;
use crate::roofing::{
    counter_batten_total_length, roof_batten_total_length, FlashingKind, RoofingModel, RoofingOptions,
};
use crate::structure::StructureModel;

/// Unit a price is quoted in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PriceUnit {
    #[serde(rename = "m3")]
    CubicMeter,
    #[serde(rename = "m2")]
    SquareMeter,
    #[serde(rename = "m")]
    Meter,
    #[serde(rename = "pc")]
    Piece,
}

impl PriceUnit {
    pub fn symbol(&self) -> &'static str {
        match self {
            PriceUnit::CubicMeter => "m3",
            PriceUnit::SquareMeter => "m2",
            PriceUnit::Meter => "m",
            PriceUnit::Piece => "pc",
        }
    }
}

/// One row of the price table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PriceEntry {
    pub unit: PriceUnit,
    pub price: f64,
    pub category: String,
}

impl PriceEntry {
    pub fn new(unit: PriceUnit, price: f64, category: impl Into<String>) -> Self {
        PriceEntry {
            unit,
            price,
            category: category.into(),
        }
    }
}

/// Unit prices keyed by material id.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PriceTable(BTreeMap<String, PriceEntry>);

impl PriceTable {
    pub fn insert(&mut self, material_id: impl Into<String>, entry: PriceEntry) {
        self.0.insert(material_id.into(), entry);
    }

    /// Look up a material, failing with `PriceNotFound`.
    pub fn get(&self, material_id: &str) -> RoofResult<&PriceEntry> {
        self.0
            .get(material_id)
            .ok_or_else(|| RoofError::price_not_found(material_id))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Parse a JSON object of `{ "id": { "unit", "price", "category" } }`.
    pub fn from_json(json: &str) -> RoofResult<Self> {
        let table: PriceTable = serde_json::from_str(json)?;
        for (id, entry) in &table.0 {
            if !entry.price.is_finite() || entry.price < 0.0 {
                return Err(RoofError::invalid_input(
                    format!("{}.price", id),
                    entry.price.to_string(),
                    "Price must be a non-negative number",
                ));
            }
        }
        Ok(table)
    }
}

/// A priced quantity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub material_id: String,
    pub description: String,
    pub quantity: f64,
    pub unit: PriceUnit,
    pub unit_price: f64,
    pub total: f64,
    pub category: String,
}

/// Priced bill of materials.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostEstimate {
    pub items: Vec<LineItem>,
    pub totals_by_category: BTreeMap<String, f64>,
    pub total: f64,
}

/// Quantities a material can be priced by. A material lists only the units
/// it is actually measured in.
struct Measured {
    material_id: &'static str,
    description: &'static str,
    quantities: Vec<(PriceUnit, f64)>,
}

fn measured_materials(structure: &StructureModel, roofing: &RoofingModel, options: &RoofingOptions) -> Vec<Measured> {
    let metrics = compute_metrics(structure);
    let mut out = vec![Measured {
        material_id: "timber",
        description: "Frame timber",
        quantities: vec![(PriceUnit::CubicMeter, metrics.timber_volume)],
    }];

    if options.membrane {
        out.push(Measured {
            material_id: "membrane",
            description: "Roof membrane",
            quantities: vec![(PriceUnit::SquareMeter, metrics.roof_surface)],
        });
        out.push(Measured {
            material_id: "counter_batten",
            description: "Counter battens",
            quantities: vec![(PriceUnit::Meter, counter_batten_total_length(roofing))],
        });
    }

    if options.roofing {
        out.push(Measured {
            material_id: "roof_batten",
            description: "Roof battens",
            quantities: vec![(PriceUnit::Meter, roof_batten_total_length(roofing))],
        });
        out.push(Measured {
            material_id: "roofing",
            description: "Roof covering",
            quantities: vec![(PriceUnit::SquareMeter, metrics.roof_surface)],
        });
        if let Some(flashings) = &roofing.flashings {
            for kind in FlashingKind::ALL {
                let group = flashings.group(kind);
                out.push(Measured {
                    material_id: kind.material_id(),
                    description: kind.display_name(),
                    quantities: vec![
                        (PriceUnit::Piece, group.count as f64),
                        (PriceUnit::SquareMeter, group.surface),
                    ],
                });
            }
        }
    }

    if let Some(lamberia) = &roofing.lamberia {
        out.push(Measured {
            material_id: "lamberia",
            description: "Lamberia cladding",
            quantities: vec![
                (PriceUnit::Piece, lamberia.total_planks as f64),
                (PriceUnit::SquareMeter, lamberia.surface),
            ],
        });
    }

    out
}

/// Price every active material.
///
/// # Returns
///
/// * `Ok(CostEstimate)` - One line item per active material
/// * `Err(RoofError::PriceNotFound)` - An active material has no price
/// * `Err(RoofError::InvalidInput)` - A price is quoted in a unit the material is not measured in
pub fn estimate_cost(
    structure: &StructureModel,
    roofing: &RoofingModel,
    options: &RoofingOptions,
    prices: &PriceTable,
) -> RoofResult<CostEstimate> {
    let mut items = Vec::new();
    for material in measured_materials(structure, roofing, options) {
        let entry = prices.get(material.material_id)?;
        let quantity = material
            .quantities
            .iter()
            .find(|(unit, _)| *unit == entry.unit)
            .map(|(_, q)| *q)
            .ok_or_else(|| {
                RoofError::invalid_input(
                    format!("{}.unit", material.material_id),
                    entry.unit.symbol(),
                    "Material is not measured in this unit",
                )
            })?;

        items.push(LineItem {
            material_id: material.material_id.to_string(),
            description: material.description.to_string(),
            quantity,
            unit: entry.unit,
            unit_price: entry.price,
            total: quantity * entry.price,
            category: entry.category.clone(),
        });
    }

    let mut totals_by_category = BTreeMap::new();
    for item in &items {
        *totals_by_category.entry(item.category.clone()).or_insert(0.0) += item.total;
    }
    let total = items.iter().map(|i| i.total).sum();

    Ok(CostEstimate {
        items,
        totals_by_category,
        total,
    })
}

/// A priced configuration ready to hand to a lead-capture form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quote {
    pub id: Uuid,
    pub created: DateTime<Utc>,
    pub params: InputParams,
    pub options: RoofingOptions,
    pub estimate: CostEstimate,
}

impl Quote {
    /// Stamp an estimate with a fresh id and the current time.
    pub fn new(params: InputParams, options: RoofingOptions, estimate: CostEstimate) -> Self {
        Quote {
            id: Uuid::new_v4(),
            created: Utc::now(),
            params,
            options,
            estimate,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::roofing::build_roofing;
    use crate::structure::build_structure;
    use approx::assert_relative_eq;

    fn full_table() -> PriceTable {
        let mut prices = PriceTable::default();
        prices.insert("timber", PriceEntry::new(PriceUnit::CubicMeter, 200_000.0, "Timber"));
        prices.insert("membrane", PriceEntry::new(PriceUnit::SquareMeter, 900.0, "Roofing"));
        prices.insert("counter_batten", PriceEntry::new(PriceUnit::Meter, 250.0, "Timber"));
        prices.insert("roof_batten", PriceEntry::new(PriceUnit::Meter, 250.0, "Timber"));
        prices.insert("roofing", PriceEntry::new(PriceUnit::SquareMeter, 6_500.0, "Roofing"));
        for kind in FlashingKind::ALL {
            prices.insert(kind.material_id(), PriceEntry::new(PriceUnit::Piece, 4_000.0, "Metal"));
        }
        prices.insert("lamberia", PriceEntry::new(PriceUnit::SquareMeter, 5_000.0, "Cladding"));
        prices
    }

    fn all_on() -> RoofingOptions {
        RoofingOptions {
            membrane: true,
            roofing: true,
            lamberia: true,
        }
    }

    #[test]
    fn test_estimate_full() {
        let frame = build_structure(&InputParams::default()).unwrap();
        let options = all_on();
        let roofing = build_roofing(&frame, &options).unwrap();
        let estimate = estimate_cost(&frame, &roofing, &options, &full_table()).unwrap();

        // timber, membrane, counter battens, roof battens, roofing, 4 flashings, lamberia
        assert_eq!(estimate.items.len(), 10);

        let timber = &estimate.items[0];
        assert_relative_eq!(timber.quantity, compute_metrics(&frame).timber_volume);
        assert_relative_eq!(timber.total, timber.quantity * 200_000.0);

        let sum: f64 = estimate.items.iter().map(|i| i.total).sum();
        assert_eq!(estimate.total, sum);
        let by_category: f64 = estimate.totals_by_category.values().sum();
        assert_relative_eq!(by_category, estimate.total, epsilon = 1e-6);
        assert_eq!(estimate.totals_by_category.len(), 4);
    }

    #[test]
    fn test_flashings_priced_per_piece() {
        let frame = build_structure(&InputParams::default()).unwrap();
        let options = RoofingOptions::default();
        let roofing = build_roofing(&frame, &options).unwrap();
        let estimate = estimate_cost(&frame, &roofing, &options, &full_table()).unwrap();
        let eaves = estimate
            .items
            .iter()
            .find(|i| i.material_id == "flashing_eaves")
            .unwrap();
        assert_eq!(eaves.quantity, 5.0);
        assert_eq!(eaves.total, 20_000.0);
    }

    #[test]
    fn test_missing_price() {
        let frame = build_structure(&InputParams::default()).unwrap();
        let options = RoofingOptions::default();
        let roofing = build_roofing(&frame, &options).unwrap();
        let mut prices = PriceTable::default();
        prices.insert("timber", PriceEntry::new(PriceUnit::CubicMeter, 1.0, "Timber"));

        let err = estimate_cost(&frame, &roofing, &options, &prices).unwrap_err();
        assert_eq!(err, RoofError::price_not_found("membrane"));
    }

    #[test]
    fn test_unit_mismatch() {
        let frame = build_structure(&InputParams::default()).unwrap();
        let options = RoofingOptions {
            membrane: false,
            roofing: false,
            lamberia: false,
        };
        let roofing = build_roofing(&frame, &options).unwrap();
        let mut prices = PriceTable::default();
        prices.insert("timber", PriceEntry::new(PriceUnit::Piece, 1.0, "Timber"));

        let err = estimate_cost(&frame, &roofing, &options, &prices).unwrap_err();
        assert_eq!(err.error_code(), "INVALID_INPUT");
    }

    #[test]
    fn test_price_table_json() {
        let json = r#"{
            "timber": { "unit": "m3", "price": 185000.0, "category": "Timber" },
            "flashing_ridge": { "unit": "pc", "price": 4200.0, "category": "Metal" }
        }"#;
        let table = PriceTable::from_json(json).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("timber").unwrap().unit, PriceUnit::CubicMeter);
        assert!(table.get("roofing").is_err());
    }

    #[test]
    fn test_price_table_rejects_negative() {
        let json = r#"{ "timber": { "unit": "m3", "price": -1.0, "category": "Timber" } }"#;
        assert!(PriceTable::from_json(json).is_err());
    }

    #[test]
    fn test_quote_ids_unique() {
        let estimate = CostEstimate {
            items: Vec::new(),
            totals_by_category: BTreeMap::new(),
            total: 0.0,
        };
        let a = Quote::new(InputParams::default(), RoofingOptions::default(), estimate.clone());
        let b = Quote::new(InputParams::default(), RoofingOptions::default(), estimate);
        assert_ne!(a.id, b.id);
        let json = serde_json::to_string(&a).unwrap();
        assert!(json.contains(&a.id.to_string()));
    }
}
