//! Response normalization
//!
//! Turns a decoded response body into a typed entity. The gateway already
//! returns the final shape, so this is deserialization plus a sanity check.

use crate::error::RequestFailure;
use crate::payments::types::{ListResult, Payment, Receipt, Refund};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Value};

/// Entity that can be built from a raw gateway response
pub trait Normalize: DeserializeOwned {
    /// Resource name used in log lines and error text
    const RESOURCE: &'static str;

    fn check(&self) -> Result<(), String> {
        Ok(())
    }
}

fn require_id(resource: &str, id: &str) -> Result<(), String> {
    if id.trim().is_empty() {
        return Err(format!("{} without id", resource));
    }
    Ok(())
}

impl Normalize for Payment {
    const RESOURCE: &'static str = "payment";

    fn check(&self) -> Result<(), String> {
        require_id(Self::RESOURCE, &self.id)
    }
}

impl Normalize for Refund {
    const RESOURCE: &'static str = "refund";

    fn check(&self) -> Result<(), String> {
        require_id(Self::RESOURCE, &self.id)?;
        require_id("refunded payment", &self.payment_id)
    }
}

impl Normalize for Receipt {
    const RESOURCE: &'static str = "receipt";

    fn check(&self) -> Result<(), String> {
        require_id(Self::RESOURCE, &self.id)
    }
}

pub fn normalize<T: Normalize>(raw: Value) -> Result<T, RequestFailure> {
    let entity: T = serde_json::from_value(raw)?;
    entity.check().map_err(RequestFailure::Normalize)?;
    Ok(entity)
}

#[derive(Deserialize)]
struct RawList {
    items: Vec<Value>,
    #[serde(default)]
    next_cursor: Option<String>,
    #[serde(default)]
    limit: Option<u32>,
    #[serde(flatten)]
    extra: Map<String, Value>,
}

/// Normalize every element of `items` in order; the rest of the envelope is
/// carried over untouched.
pub fn normalize_list<T: Normalize>(raw: Value) -> Result<ListResult<T>, RequestFailure> {
    let list: RawList = serde_json::from_value(raw)?;
    let items = list
        .items
        .into_iter()
        .map(normalize::<T>)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(ListResult {
        items,
        next_cursor: list.next_cursor,
        limit: list.limit,
        extra: list.extra,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payments::types::{PaymentStatus, RefundStatus};
    use serde_json::json;

    fn payment_json(id: &str, status: &str) -> Value {
        json!({
            "id": id,
            "status": status,
            "paid": status == "succeeded",
            "amount": {"value": "2.00", "currency": "RUB"},
            "created_at": "2024-01-15T10:20:30.000Z",
            "description": "Order 37",
            "metadata": {"order_id": "37"},
            "recipient": {"account_id": "100500", "gateway_id": "100700"},
            "refundable": false,
            "test": true
        })
    }

    #[test]
    fn test_normalize_payment() {
        let raw = payment_json("2d9f1c3e-000f-5000-9000-1b2c3d4e5f60", "pending");
        let payment: Payment = normalize(raw).unwrap();
        assert_eq!(payment.status, PaymentStatus::Pending);
        assert_eq!(payment.amount.to_string(), "2.00 RUB");
        assert_eq!(
            payment.metadata.as_ref().and_then(|m| m.get("order_id")),
            Some(&json!("37"))
        );
        assert!(payment.test);
    }

    #[test]
    fn test_normalize_rejects_empty_id() {
        let result = normalize::<Payment>(payment_json("", "pending"));
        assert!(matches!(result, Err(RequestFailure::Normalize(_))));
    }

    #[test]
    fn test_normalize_rejects_wrong_shape() {
        let result = normalize::<Refund>(json!({"id": "rf-1"}));
        assert!(matches!(result, Err(RequestFailure::Decode(_))));
    }

    #[test]
    fn test_list_keeps_order_and_envelope() {
        let raw = json!({
            "type": "list",
            "items": [payment_json("a", "succeeded"), payment_json("b", "canceled")],
            "next_cursor": "37a5c87d-3984-51e8-a7f3-8de646d39ec15"
        });

        let list: ListResult<Payment> = normalize_list(raw).unwrap();
        let ids: Vec<&str> = list.items.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b"]);
        assert_eq!(list.items[1].status, PaymentStatus::Canceled);
        assert_eq!(
            list.next_cursor.as_deref(),
            Some("37a5c87d-3984-51e8-a7f3-8de646d39ec15")
        );
        assert_eq!(list.extra.get("type"), Some(&json!("list")));
    }

    #[test]
    fn test_refund_list_uses_refund_shape() {
        let raw = json!({
            "type": "list",
            "items": [{
                "id": "rf-1",
                "payment_id": "pm-1",
                "status": "succeeded",
                "amount": {"value": "1.00", "currency": "RUB"},
                "created_at": "2024-01-15T10:20:30.000Z"
            }]
        });

        let list: ListResult<Refund> = normalize_list(raw).unwrap();
        assert_eq!(list.items.len(), 1);
        assert_eq!(list.items[0].status, RefundStatus::Succeeded);
        assert_eq!(list.items[0].payment_id, "pm-1");
        assert!(!list.has_more());
    }

    #[test]
    fn test_list_fails_when_one_item_is_malformed() {
        let raw = json!({"items": [payment_json("a", "pending"), {"id": "b"}]});
        assert!(normalize_list::<Payment>(raw).is_err());
    }
}
