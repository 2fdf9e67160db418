use bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// A single storage-location / on-hand-count pair nested inside a
/// trademark record.
///
/// `qty` is signed: adjustments carry no floor, so a location can go
/// negative (treated as a backorder signal).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LocationQty {
    pub location: String,
    pub qty: i64,
}

/// Per-manufacturer pricing and stock-location block nested inside a
/// product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrademarkRecord {
    pub trademark: String,
    #[serde(rename = "costPrice", default)]
    pub cost_price: f64,
    #[serde(rename = "salePrice", default)]
    pub sale_price: f64,
    #[serde(default)]
    pub loc_qty: Vec<LocationQty>,
}

impl TrademarkRecord {
    /// Location names already stored under this trademark that reappear in
    /// `incoming`.
    pub fn duplicate_locations(&self, incoming: &[LocationQty]) -> Vec<String> {
        incoming
            .iter()
            .filter(|entry| self.loc_qty.iter().any(|cur| cur.location == entry.location))
            .map(|entry| entry.location.clone())
            .collect()
    }
}

/// A spare part, identified by `code`, stocked per trademark per location.
///
/// `code` is the external identity; updates never re-key a document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub code: String,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub info: Vec<TrademarkRecord>,
    #[serde(default)]
    pub replacement: Vec<String>,
    #[serde(default)]
    pub measurement: String,
    #[serde(default)]
    pub status: String,
}

impl Product {
    /// The first trademark record and its first location entry. Create
    /// submissions must carry both.
    pub fn first_stock_entry(&self) -> Option<(&TrademarkRecord, &LocationQty)> {
        let record = self.info.first()?;
        let entry = record.loc_qty.first()?;
        Some((record, entry))
    }

    pub fn trademark(&self, name: &str) -> Option<&TrademarkRecord> {
        self.info.iter().find(|record| record.trademark == name)
    }
}

/// The three-way branch of create-or-merge, decided up front rather than
/// inferred after the fact from message text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StockPlan {
    /// No document for the code yet; insert the whole product.
    NewProduct,
    /// The code exists but the trademark is new; append a trademark record.
    NewTrademark,
    /// Code and trademark both exist; append location entries.
    NewLocations,
}

/// Decide which branch a create submission takes against the stored
/// document for its code (if any).
pub fn plan_stock_merge(existing: Option<&Product>, incoming_trademark: &str) -> StockPlan {
    match existing {
        None => StockPlan::NewProduct,
        Some(product) if product.trademark(incoming_trademark).is_some() => StockPlan::NewLocations,
        Some(_) => StockPlan::NewTrademark,
    }
}

/// What to do when a submission repeats a location name the trademark
/// already stocks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DuplicateLocationPolicy {
    /// Append anyway, yielding two entries for the same location
    /// (historical behavior).
    #[default]
    Append,
    /// Refuse the submission with a conflict.
    Reject,
}

impl DuplicateLocationPolicy {
    pub fn parse(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "append" => Some(Self::Append),
            "reject" => Some(Self::Reject),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(trademark: &str, locations: &[(&str, i64)]) -> TrademarkRecord {
        TrademarkRecord {
            trademark: trademark.to_string(),
            cost_price: 7.0,
            sale_price: 22.0,
            loc_qty: locations
                .iter()
                .map(|(location, qty)| LocationQty {
                    location: location.to_string(),
                    qty: *qty,
                })
                .collect(),
        }
    }

    fn product(code: &str, info: Vec<TrademarkRecord>) -> Product {
        Product {
            id: None,
            code: code.to_string(),
            category: "FILTER".to_string(),
            title: "FUEL-FILTER".to_string(),
            info,
            replacement: vec![],
            measurement: String::new(),
            status: String::new(),
        }
    }

    #[test]
    fn absent_code_plans_a_new_product() {
        assert_eq!(plan_stock_merge(None, "CAT"), StockPlan::NewProduct);
    }

    #[test]
    fn known_trademark_plans_location_append() {
        let stored = product("P1", vec![record("CAT", &[("A1", 5)])]);
        assert_eq!(plan_stock_merge(Some(&stored), "CAT"), StockPlan::NewLocations);
    }

    #[test]
    fn new_trademark_plans_trademark_append() {
        let stored = product("P1", vec![record("CAT", &[("A1", 5)])]);
        assert_eq!(plan_stock_merge(Some(&stored), "DONALDSON"), StockPlan::NewTrademark);
    }

    #[test]
    fn duplicate_locations_reports_only_overlaps() {
        let stored = record("CAT", &[("A1", 5), ("A2", 3)]);
        let incoming = vec![
            LocationQty { location: "A2".to_string(), qty: 1 },
            LocationQty { location: "B7".to_string(), qty: 4 },
        ];
        assert_eq!(stored.duplicate_locations(&incoming), vec!["A2".to_string()]);
    }

    #[test]
    fn first_stock_entry_requires_both_levels() {
        let no_info = product("P1", vec![]);
        assert!(no_info.first_stock_entry().is_none());

        let empty_locations = product("P1", vec![record("CAT", &[])]);
        assert!(empty_locations.first_stock_entry().is_none());

        let complete = product("P1", vec![record("CAT", &[("A1", 5)])]);
        let (record, entry) = complete.first_stock_entry().unwrap();
        assert_eq!(record.trademark, "CAT");
        assert_eq!(entry.location, "A1");
    }

    #[test]
    fn wire_field_names_match_the_stored_documents() {
        let value = serde_json::to_value(record("CAT", &[("A1", 5)])).unwrap();
        assert_eq!(value["trademark"], "CAT");
        assert_eq!(value["costPrice"], 7.0);
        assert_eq!(value["salePrice"], 22.0);
        assert_eq!(value["loc_qty"][0]["location"], "A1");
        assert_eq!(value["loc_qty"][0]["qty"], 5);
    }

    #[test]
    fn missing_id_is_not_serialized() {
        let value = serde_json::to_value(product("P1", vec![])).unwrap();
        assert!(value.get("_id").is_none());
    }
}
