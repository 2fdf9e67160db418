//! MongoDB-backed repositories for products, customers, and sales.
//!
//! Every operation touches a single document; uniqueness of `code` and
//! `invoiceNumber` is backed by unique indexes created at startup, which
//! is the only guard against the check-then-insert race on create.

pub mod customers;
pub mod error;
pub mod products;
pub mod sales;

use bson::{Document, doc};
use mongodb::{Client, options::ClientOptions};

pub use customers::CustomerStore;
pub use error::{StoreError, StoreResult};
pub use mongodb::Database;
pub use products::{ProductStore, QtyAdjusted, StockUpdate};
pub use sales::SaleStore;

/// Connect to MongoDB and select the database.
pub async fn connect(uri: &str, db_name: &str) -> StoreResult<Database> {
    let mut options = ClientOptions::parse(uri).await?;
    options.app_name = Some("stockroom".to_string());
    let client = Client::with_options(options)?;
    tracing::info!(db = db_name, "connected to mongodb");
    Ok(client.database(db_name))
}

/// Drop `_id` and the unique business key from a patch so an update can
/// never re-key a document.
pub(crate) fn sanitize_patch(mut patch: Document, unique_key: &str) -> Document {
    patch.remove("_id");
    patch.remove(unique_key);
    patch
}

/// Anchored `^prefix` regex filter on `code`, case sensitive.
pub(crate) fn code_prefix_filter(prefix: &str) -> Document {
    doc! { "code": { "$regex": format!("^{prefix}") } }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitize_patch_strips_id_and_unique_key() {
        let patch = doc! {
            "_id": "64ab00000000000000000000",
            "code": "P999",
            "title": "OIL-FILTER",
        };
        let clean = sanitize_patch(patch, "code");
        assert_eq!(clean, doc! { "title": "OIL-FILTER" });
    }

    #[test]
    fn sanitize_patch_can_empty_a_patch() {
        let patch = doc! { "invoiceNumber": 10 };
        assert!(sanitize_patch(patch, "invoiceNumber").is_empty());
    }

    #[test]
    fn code_prefix_filter_is_anchored_and_case_sensitive() {
        // No `$options: "i"`: code matching stays case sensitive.
        assert_eq!(
            code_prefix_filter("P55"),
            doc! { "code": { "$regex": "^P55" } }
        );
    }
}
