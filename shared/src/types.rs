use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::coerce;

// ============================================================================
// Enums
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StockStatus {
    #[serde(rename = "OK")]
    Ok,
    #[serde(rename = "Low stock")]
    LowStock,
}

impl StockStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            StockStatus::Ok => "OK",
            StockStatus::LowStock => "Low stock",
        }
    }

    pub fn all() -> &'static [StockStatus] {
        &[StockStatus::Ok, StockStatus::LowStock]
    }

    pub fn parse(s: &str) -> Option<StockStatus> {
        Self::all().iter().copied().find(|st| st.as_str() == s)
    }

    /// A part is low on stock strictly below its minimum.
    pub fn for_levels(quantity: i32, min_stock: i32) -> StockStatus {
        if quantity < min_stock {
            StockStatus::LowStock
        } else {
            StockStatus::Ok
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeliveryStatus {
    Ordered,
    #[serde(rename = "In transit")]
    InTransit,
    Delayed,
    Delivered,
}

impl DeliveryStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeliveryStatus::Ordered => "Ordered",
            DeliveryStatus::InTransit => "In transit",
            DeliveryStatus::Delayed => "Delayed",
            DeliveryStatus::Delivered => "Delivered",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
        }
    }
}

// ============================================================================
// API Request Types
// ============================================================================

/// Body of `POST /api/magazyn/update_stock`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UpdateStock {
    #[serde(deserialize_with = "coerce::int")]
    pub id: i32,
    #[serde(deserialize_with = "coerce::int")]
    pub change: i32,
}

/// Body of `POST /api/magazyn/add`. Keys follow the table columns; the
/// English names are accepted as aliases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatePart {
    #[serde(rename = "nazwa", alias = "name")]
    pub name: String,
    #[serde(rename = "kategoria", alias = "category")]
    pub category: String,
    #[serde(rename = "ilosc", alias = "quantity", deserialize_with = "coerce::int")]
    pub quantity: i32,
    #[serde(
        rename = "min_stan",
        alias = "min_threshold",
        deserialize_with = "coerce::int"
    )]
    pub min_stock: i32,
}

/// Body of `POST /api/magazyn/delete`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeletePart {
    #[serde(deserialize_with = "coerce::int")]
    pub id: i32,
}

// ============================================================================
// API Response Types
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiError {
    pub error: ApiErrorBody,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiErrorBody {
    pub code: String,
    pub message: String,
}

impl ApiError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: ApiErrorBody {
                code: code.into(),
                message: message.into(),
            },
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new("NOT_FOUND", message)
    }

    pub fn validation_error(message: impl Into<String>) -> Self {
        Self::new("VALIDATION_ERROR", message)
    }

    pub fn internal_error(message: impl Into<String>) -> Self {
        Self::new("INTERNAL_ERROR", message)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    pub active_deliveries: i64,
    pub warehouse_utilization: i64,
    pub critical_items: i64,
    pub inventory_value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PartResponse {
    pub id: i32,
    #[serde(rename = "nazwa")]
    pub name: String,
    #[serde(rename = "kategoria")]
    pub category: String,
    #[serde(rename = "ilosc")]
    pub quantity: i32,
    #[serde(rename = "zarezerwowane")]
    pub reserved: i32,
    #[serde(rename = "min_stan")]
    pub min_stock: i32,
    pub status: String,
    #[serde(rename = "dostepne")]
    pub available: i32,
    pub progress: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryResponse {
    pub id: i32,
    #[serde(rename = "dostawca")]
    pub supplier: String,
    /// Name of the delivered part.
    #[serde(rename = "czesc")]
    pub part: String,
    #[serde(rename = "ilosc")]
    pub quantity: i32,
    #[serde(rename = "termin")]
    pub due_date: NaiveDate,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleEntryResponse {
    pub id: i32,
    #[serde(rename = "zadanie")]
    pub task: String,
    #[serde(rename = "lokalizacja")]
    pub location: String,
    #[serde(rename = "zasob_id")]
    pub resource_id: String,
    #[serde(rename = "priorytet")]
    pub priority: String,
    #[serde(rename = "godzina")]
    pub start_time: String,
    #[serde(rename = "czas_trwania")]
    pub duration: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockUpdateResponse {
    pub success: bool,
    pub new_qty: i32,
    pub status: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreatePartResponse {
    pub success: bool,
    pub id: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub success: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_part_accepts_both_key_sets() {
        let polish: CreatePart = serde_json::from_str(
            r#"{"nazwa": "Sprzęgło", "kategoria": "Napęd", "ilosc": "12", "min_stan": 4}"#,
        )
        .unwrap();
        let english: CreatePart = serde_json::from_str(
            r#"{"name": "Sprzęgło", "category": "Napęd", "quantity": 12, "min_threshold": "4"}"#,
        )
        .unwrap();
        assert_eq!(polish, english);
        assert_eq!(polish.quantity, 12);
        assert_eq!(polish.min_stock, 4);
    }

    #[test]
    fn create_part_missing_field_is_an_error() {
        let err = serde_json::from_str::<CreatePart>(r#"{"nazwa": "x", "ilosc": 1, "min_stan": 1}"#)
            .unwrap_err();
        assert!(err.to_string().contains("kategoria"));
    }

    #[test]
    fn part_response_uses_column_keys() {
        let part = PartResponse {
            id: 1,
            name: "Hamulce tarczowe".to_string(),
            category: "Układ hamulcowy".to_string(),
            quantity: 245,
            reserved: 40,
            min_stock: 150,
            status: StockStatus::Ok.as_str().to_string(),
            available: 205,
            progress: 65.33,
        };
        let json = serde_json::to_value(&part).unwrap();
        assert_eq!(json["nazwa"], "Hamulce tarczowe");
        assert_eq!(json["dostepne"], 205);
        assert_eq!(json["min_stan"], 150);
        assert_eq!(json["status"], "OK");
    }

    #[test]
    fn status_labels_round_trip_through_parse() {
        for status in StockStatus::all() {
            assert_eq!(StockStatus::parse(status.as_str()), Some(*status));
        }
        assert_eq!(StockStatus::parse("Niski stan"), None);
        assert_eq!(
            serde_json::to_string(&DeliveryStatus::InTransit).unwrap(),
            "\"In transit\""
        );
    }

    #[test]
    fn api_error_shape() {
        let json = serde_json::to_value(ApiError::not_found("Part 9 not found")).unwrap();
        assert_eq!(json["error"]["code"], "NOT_FOUND");
        assert_eq!(json["error"]["message"], "Part 9 not found");
    }
}
