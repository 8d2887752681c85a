use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An order held by exactly one store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    /// Assigned by the store on insert, starting at 1.
    pub id: u32,
    pub product_name: String,
    pub quantity: i32,
    pub date: DateTime<Utc>,
}

/// Body of an order submission.
///
/// Any client-supplied `id` is ignored; the store assigns ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewOrder {
    pub product_name: String,
    pub quantity: i32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
}

impl NewOrder {
    pub fn new(product_name: impl Into<String>, quantity: i32) -> Self {
        Self {
            product_name: product_name.into(),
            quantity,
            date: None,
        }
    }

    /// Pins the order timestamp instead of stamping it on insert.
    pub fn at(mut self, date: DateTime<Utc>) -> Self {
        self.date = Some(date);
        self
    }

    pub(crate) fn into_order(self, id: u32) -> Order {
        Order {
            id,
            product_name: self.product_name,
            quantity: self.quantity,
            date: self.date.unwrap_or_else(Utc::now),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn order_serializes_in_camel_case() {
        let date = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap();
        let order = NewOrder::new("Widget", 3).at(date).into_order(1);

        let value = serde_json::to_value(&order).unwrap();
        assert_eq!(
            value,
            json!({
                "id": 1,
                "productName": "Widget",
                "quantity": 3,
                "date": "2024-05-01T12:30:00Z",
            })
        );
    }

    #[test]
    fn submission_ignores_id_and_defaults_date() {
        let body = json!({"id": 99, "productName": "Gadget", "quantity": 1});
        let submission: NewOrder = serde_json::from_value(body).unwrap();
        assert_eq!(submission, NewOrder::new("Gadget", 1));

        let before = Utc::now();
        let order = submission.into_order(4);
        assert_eq!(order.id, 4);
        assert!(order.date >= before);
    }

    #[test]
    fn submission_requires_shape() {
        let missing = serde_json::from_value::<NewOrder>(json!({"productName": "Gadget"}));
        assert!(missing.is_err());

        let wrong_type = serde_json::from_value::<NewOrder>(json!({"productName": "Gadget", "quantity": "two"}));
        assert!(wrong_type.is_err());
    }
}
