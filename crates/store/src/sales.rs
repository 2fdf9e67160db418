use bson::{Document, doc, oid::ObjectId};
use futures_util::TryStreamExt;
use mongodb::{
    Collection, Database, IndexModel,
    options::{FindOneAndUpdateOptions, FindOptions, IndexOptions, ReturnDocument},
};

use stockroom_core::Sale;

use crate::error::{StoreError, StoreResult};
use crate::{code_prefix_filter, sanitize_patch};

const SEARCH_LIMIT: i64 = 10;

/// Sales collection, keyed by `invoiceNumber`.
#[derive(Clone)]
pub struct SaleStore {
    coll: Collection<Sale>,
}

impl SaleStore {
    pub fn new(db: &Database) -> Self {
        Self {
            coll: db.collection("sales"),
        }
    }

    pub async fn ensure_indexes(&self) -> StoreResult<()> {
        let index = IndexModel::builder()
            .keys(doc! { "invoiceNumber": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        self.coll.create_index(index, None).await?;
        Ok(())
    }

    /// Insert a sale; conflicts when the invoice number is already taken.
    pub async fn create(&self, sale: Sale) -> StoreResult<Sale> {
        if self
            .coll
            .find_one(doc! { "invoiceNumber": sale.invoice_number }, None)
            .await?
            .is_some()
        {
            return Err(StoreError::Conflict(format!(
                "Sale {} for customer {} already exists",
                sale.invoice_number, sale.customer.name
            )));
        }

        let inserted = self.coll.insert_one(&sale, None).await?;
        let mut stored = sale;
        stored.id = inserted.inserted_id.as_object_id();
        Ok(stored)
    }

    /// All sales, newest invoice first.
    pub async fn list(&self) -> StoreResult<Vec<Sale>> {
        let options = FindOptions::builder().sort(doc! { "invoiceNumber": -1 }).build();
        let cursor = self.coll.find(None, options).await?;
        Ok(cursor.try_collect().await?)
    }

    pub async fn get(&self, id: ObjectId) -> StoreResult<Sale> {
        self.coll
            .find_one(doc! { "_id": id }, None)
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("sale with id: {id}")))
    }

    /// Case-sensitive prefix match on `code`; rows carry `_id`, `code`,
    /// and the customer snapshot, capped at 10.
    pub async fn find_by_code_prefix(&self, prefix: &str) -> StoreResult<Vec<Document>> {
        let options = FindOptions::builder()
            .projection(doc! { "_id": 1, "code": 1, "customer": 1 })
            .limit(SEARCH_LIMIT)
            .build();
        let cursor = self
            .coll
            .clone_with_type::<Document>()
            .find(code_prefix_filter(prefix), options)
            .await?;
        Ok(cursor.try_collect().await?)
    }

    /// Patch arbitrary fields; `_id` and the business key `invoiceNumber`
    /// are stripped from the patch first.
    pub async fn update_fields(&self, id: ObjectId, patch: Document) -> StoreResult<Sale> {
        let current = self.get(id).await?;
        let patch = sanitize_patch(patch, "invoiceNumber");
        if patch.is_empty() {
            return Ok(current);
        }

        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();
        self.coll
            .find_one_and_update(doc! { "_id": id }, doc! { "$set": patch }, options)
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("sale with id: {id}")))
    }

    pub async fn delete(&self, id: ObjectId) -> StoreResult<()> {
        let result = self.coll.delete_one(doc! { "_id": id }, None).await?;
        if result.deleted_count == 0 {
            return Err(StoreError::NotFound(format!("sale with id: {id}")));
        }
        Ok(())
    }
}
