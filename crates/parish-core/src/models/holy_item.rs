use serde::{Deserialize, Serialize};

use super::RequestStatus;

/// An item in the parish's devotional inventory (rosaries, candles, ...).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HolyItem {
    pub id: i64,
    #[serde(rename = "itemName")]
    pub item_name: String,
    #[serde(default)]
    pub stock: i64,
    #[serde(default)]
    pub available: bool,
    #[serde(rename = "availabilityDate", default)]
    pub availability_date: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "createdAt", default)]
    pub created_at: Option<String>,
}

impl HolyItem {
    /// An item can be ordered when it is flagged available and has stock left
    pub fn can_order(&self, quantity: i64) -> bool {
        self.available && quantity > 0 && quantity <= self.stock
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewHolyItem {
    #[serde(rename = "itemName")]
    pub item_name: String,
    pub stock: i64,
    pub available: bool,
    #[serde(rename = "availabilityDate", skip_serializing_if = "Option::is_none")]
    pub availability_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderRequest {
    #[serde(rename = "holyItemId")]
    pub holy_item_id: i64,
    pub quantity: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HolyItemOrder {
    pub id: i64,
    #[serde(rename = "holyItem", default)]
    pub holy_item: Option<HolyItem>,
    #[serde(default)]
    pub quantity: i64,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(rename = "orderedAt", default)]
    pub ordered_at: Option<String>,
}

impl HolyItemOrder {
    pub fn item_name(&self) -> &str {
        self.holy_item
            .as_ref()
            .map(|item| item.item_name.as_str())
            .unwrap_or("Unknown item")
    }

    pub fn status_kind(&self) -> RequestStatus {
        RequestStatus::parse(self.status.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_holy_item_with_missing_optionals() {
        let json = r#"{"id": 3, "itemName": "Rosary", "stock": 12, "available": true}"#;
        let item: HolyItem = serde_json::from_str(json).unwrap();
        assert_eq!(item.item_name, "Rosary");
        assert_eq!(item.stock, 12);
        assert!(item.description.is_none());
        assert!(item.can_order(12));
        assert!(!item.can_order(13));
        assert!(!item.can_order(0));
    }

    #[test]
    fn test_unavailable_item_cannot_be_ordered() {
        let json = r#"{"id": 4, "itemName": "Candle", "stock": 5, "available": false, "availabilityDate": "2025-12-01"}"#;
        let item: HolyItem = serde_json::from_str(json).unwrap();
        assert!(!item.can_order(1));
        assert_eq!(item.availability_date.as_deref(), Some("2025-12-01"));
    }

    #[test]
    fn test_new_item_omits_absent_fields() {
        let item = NewHolyItem {
            item_name: "Scapular".to_string(),
            stock: 10,
            available: true,
            availability_date: None,
            description: None,
        };
        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(
            value,
            serde_json::json!({"itemName": "Scapular", "stock": 10, "available": true})
        );
    }

    #[test]
    fn test_parse_order_with_nested_item() {
        let json = r#"{"id": 9, "quantity": 2, "status": "PENDING", "orderedAt": "2025-03-01T10:00:00Z",
            "holyItem": {"id": 3, "itemName": "Rosary", "stock": 10, "available": true}}"#;
        let order: HolyItemOrder = serde_json::from_str(json).unwrap();
        assert_eq!(order.item_name(), "Rosary");
        assert_eq!(order.status_kind(), RequestStatus::Pending);
    }
}
