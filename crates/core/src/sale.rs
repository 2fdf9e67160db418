use bson::{Document, oid::ObjectId};
use serde::{Deserialize, Serialize};

/// Customer snapshot embedded in a sale invoice. At least `name` is
/// present; anything else rides along in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaleCustomer {
    pub name: String,
    #[serde(flatten)]
    pub extra: Document,
}

/// A sales invoice, unique per `invoice_number`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Sale {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    #[serde(rename = "invoiceNumber")]
    pub invoice_number: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    pub customer: SaleCustomer,
    #[serde(flatten)]
    pub extra: Document,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invoice_number_uses_the_stored_field_name() {
        let json = serde_json::json!({
            "invoiceNumber": 1042,
            "customer": { "name": "ACME", "taxId": "J-1234" },
            "total": 250
        });
        let sale: Sale = serde_json::from_value(json).unwrap();
        assert_eq!(sale.invoice_number, 1042);
        assert_eq!(sale.customer.extra.get_str("taxId").unwrap(), "J-1234");

        let back = serde_json::to_value(&sale).unwrap();
        assert_eq!(back["invoiceNumber"], 1042);
        assert_eq!(back["total"], 250);
    }
}
