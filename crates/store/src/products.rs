use bson::{Document, doc, oid::ObjectId};
use futures_util::TryStreamExt;
use mongodb::{
    Collection, Database, IndexModel,
    options::{FindOneAndUpdateOptions, FindOptions, IndexOptions, ReturnDocument, UpdateOptions},
};

use stockroom_core::{DuplicateLocationPolicy, Product, StockPlan, plan_stock_merge};

use crate::error::{StoreError, StoreResult};
use crate::{code_prefix_filter, sanitize_patch};

/// Outcome of a create-or-merge submission, tagged by which branch fired.
#[derive(Debug, Clone, PartialEq)]
pub enum StockUpdate {
    /// No document existed for the code; the payload is the stored
    /// document.
    Created(Product),
    /// Code and trademark already existed; the trademark's `loc_qty`
    /// gained these entries.
    LocationsAppended {
        code: String,
        trademark: String,
        locations: Vec<String>,
        matched: u64,
        modified: u64,
    },
    /// The code existed but the trademark was new.
    TrademarkAppended {
        code: String,
        trademark: String,
        matched: u64,
        modified: u64,
    },
}

/// Acknowledgement of a quantity adjustment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QtyAdjusted {
    pub matched: u64,
    pub modified: u64,
}

/// Products collection: spare parts with nested trademark/location stock.
#[derive(Clone)]
pub struct ProductStore {
    coll: Collection<Product>,
    policy: DuplicateLocationPolicy,
}

impl ProductStore {
    pub fn new(db: &Database, policy: DuplicateLocationPolicy) -> Self {
        Self {
            coll: db.collection("products"),
            policy,
        }
    }

    /// Unique index on `code`: the storage-level guard for the
    /// check-then-insert race in [`create_or_merge`](Self::create_or_merge).
    pub async fn ensure_indexes(&self) -> StoreResult<()> {
        let index = IndexModel::builder()
            .keys(doc! { "code": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        self.coll.create_index(index, None).await?;
        Ok(())
    }

    pub async fn list(&self) -> StoreResult<Vec<Product>> {
        let cursor = self.coll.find(None, None).await?;
        Ok(cursor.try_collect().await?)
    }

    /// Create a product, or merge the submission into the existing
    /// document for its code.
    ///
    /// Exactly one of three branches fires: insert the whole document,
    /// append the incoming location entries to an existing trademark, or
    /// append a new trademark record. Only the first trademark record of
    /// the submission is considered for the merge branches; sibling
    /// trademarks and locations in the stored document are never touched.
    pub async fn create_or_merge(&self, product: Product) -> StoreResult<StockUpdate> {
        if product.first_stock_entry().is_none() {
            return Err(StoreError::Validation(
                "a product submission needs at least one trademark with one location entry".to_string(),
            ));
        }

        let existing = self.coll.find_one(doc! { "code": &product.code }, None).await?;
        let incoming = &product.info[0];

        match plan_stock_merge(existing.as_ref(), &incoming.trademark) {
            StockPlan::NewProduct => {
                let inserted = self.coll.insert_one(&product, None).await?;
                let mut stored = product;
                stored.id = inserted.inserted_id.as_object_id();
                Ok(StockUpdate::Created(stored))
            }
            StockPlan::NewLocations => {
                if self.policy == DuplicateLocationPolicy::Reject {
                    let stored_record = existing
                        .as_ref()
                        .and_then(|stored| stored.trademark(&incoming.trademark));
                    if let Some(record) = stored_record {
                        let duplicates = record.duplicate_locations(&incoming.loc_qty);
                        if !duplicates.is_empty() {
                            return Err(StoreError::Conflict(format!(
                                "location(s) {} already exist under trademark {} of code {}",
                                duplicates.join(", "),
                                incoming.trademark,
                                product.code,
                            )));
                        }
                    }
                }

                let entries = incoming
                    .loc_qty
                    .iter()
                    .map(bson::to_bson)
                    .collect::<Result<Vec<_>, _>>()?;
                let update = doc! { "$push": { "info.$[tm].loc_qty": { "$each": entries } } };
                let options = UpdateOptions::builder()
                    .array_filters(vec![doc! { "tm.trademark": &incoming.trademark }])
                    .build();
                let result = self
                    .coll
                    .update_one(doc! { "code": &product.code }, update, options)
                    .await?;

                Ok(StockUpdate::LocationsAppended {
                    code: product.code.clone(),
                    trademark: incoming.trademark.clone(),
                    locations: incoming.loc_qty.iter().map(|entry| entry.location.clone()).collect(),
                    matched: result.matched_count,
                    modified: result.modified_count,
                })
            }
            StockPlan::NewTrademark => {
                let record = bson::to_bson(incoming)?;
                let result = self
                    .coll
                    .update_one(
                        doc! { "code": &product.code },
                        doc! { "$push": { "info": record } },
                        None,
                    )
                    .await?;

                Ok(StockUpdate::TrademarkAppended {
                    code: product.code.clone(),
                    trademark: incoming.trademark.clone(),
                    matched: result.matched_count,
                    modified: result.modified_count,
                })
            }
        }
    }

    /// Apply a signed delta to the `qty` of the single entry matched by
    /// both trademark and location; every sibling entry is untouched.
    ///
    /// No floor is enforced: the resulting quantity may go negative.
    pub async fn adjust_qty(
        &self,
        code: &str,
        trademark: &str,
        location: &str,
        delta: i64,
    ) -> StoreResult<QtyAdjusted> {
        if self.coll.find_one(doc! { "code": code }, None).await?.is_none() {
            return Err(StoreError::NotFound(format!("product with code: {code}")));
        }

        let update = doc! { "$inc": { "info.$[tm].loc_qty.$[loc].qty": delta } };
        let options = UpdateOptions::builder()
            .array_filters(vec![
                doc! { "tm.trademark": trademark },
                doc! { "loc.location": location },
            ])
            .build();
        let result = self.coll.update_one(doc! { "code": code }, update, options).await?;

        Ok(QtyAdjusted {
            matched: result.matched_count,
            modified: result.modified_count,
        })
    }

    pub async fn get(&self, id: ObjectId) -> StoreResult<Product> {
        self.coll
            .find_one(doc! { "_id": id }, None)
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("product with id: {id}")))
    }

    /// Case-sensitive prefix match on `code`. With `field` set, the rows
    /// carry only that field plus the identifier; otherwise full
    /// documents.
    pub async fn find_by_code_prefix(
        &self,
        prefix: &str,
        field: Option<&str>,
    ) -> StoreResult<Vec<Document>> {
        let options = match single_field_projection(field) {
            Some(projection) => FindOptions::builder().projection(projection).build(),
            None => FindOptions::default(),
        };
        let cursor = self
            .coll
            .clone_with_type::<Document>()
            .find(code_prefix_filter(prefix), options)
            .await?;
        Ok(cursor.try_collect().await?)
    }

    /// Patch arbitrary fields on a product. `_id` and the business key
    /// `code` are stripped from the patch first.
    pub async fn update_fields(&self, id: ObjectId, patch: Document) -> StoreResult<Product> {
        let current = self.get(id).await?;
        let patch = sanitize_patch(patch, "code");
        if patch.is_empty() {
            return Ok(current);
        }

        let options = FindOneAndUpdateOptions::builder()
            .return_document(ReturnDocument::After)
            .build();
        self.coll
            .find_one_and_update(doc! { "_id": id }, doc! { "$set": patch }, options)
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("product with id: {id}")))
    }

    pub async fn delete(&self, id: ObjectId) -> StoreResult<()> {
        let result = self.coll.delete_one(doc! { "_id": id }, None).await?;
        if result.deleted_count == 0 {
            return Err(StoreError::NotFound(format!("product with id: {id}")));
        }
        Ok(())
    }
}

/// Projection for the out-of-band field selector: the named field plus
/// the identifier, or full documents when no selector was supplied.
fn single_field_projection(field: Option<&str>) -> Option<Document> {
    field.map(|name| doc! { name: 1 })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_selector_projects_the_field_plus_the_identifier() {
        let projection = single_field_projection(Some("title")).unwrap();
        assert_eq!(projection, doc! { "title": 1 });
        // `_id` is never excluded, so the identifier rides along.
        assert!(!projection.contains_key("_id"));
    }

    #[test]
    fn absent_selector_means_full_documents() {
        assert!(single_field_projection(None).is_none());
    }
}
