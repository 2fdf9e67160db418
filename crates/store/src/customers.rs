use bson::{Document, doc, oid::ObjectId};
use futures_util::TryStreamExt;
use mongodb::{
    Collection, Database, IndexModel,
    options::{FindOneAndUpdateOptions, FindOptions, IndexOptions, ReturnDocument},
};

use stockroom_core::Customer;

use crate::error::{StoreError, StoreResult};
use crate::{code_prefix_filter, sanitize_patch};

/// Search results are capped at this many rows.
const SEARCH_LIMIT: i64 = 10;

/// Customers collection, keyed by `code`.
#[derive(Clone)]
pub struct CustomerStore {
    coll: Collection<Customer>,
}

impl CustomerStore {
    pub fn new(db: &Database) -> Self {
        Self {
            coll: db.collection("customers"),
        }
    }

    pub async fn ensure_indexes(&self) -> StoreResult<()> {
        let index = IndexModel::builder()
            .keys(doc! { "code": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();
        self.coll.create_index(index, None).await?;
        Ok(())
    }

    /// Insert a customer; conflicts when the code is already taken.
    pub async fn create(&self, customer: Customer) -> StoreResult<Customer> {
        if self
            .coll
            .find_one(doc! { "code": &customer.code }, None)
            .await?
            .is_some()
        {
            return Err(StoreError::Conflict(format!(
                "Customer already exists: {}",
                customer.name
            )));
        }

        let inserted = self.coll.insert_one(&customer, None).await?;
        let mut stored = customer;
        stored.id = inserted.inserted_id.as_object_id();
        Ok(stored)
    }

    pub async fn list(&self) -> StoreResult<Vec<Customer>> {
        let cursor = self.coll.find(None, None).await?;
        Ok(cursor.try_collect().await?)
    }

    pub async fn get(&self, id: ObjectId) -> StoreResult<Customer> {
        self.coll
            .find_one(doc! { "_id": id }, None)
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("customer with id: {id}")))
    }

    /// Uppercased prefix match on `code`; only when that yields nothing,
    /// fall back to a case-insensitive substring match on `name`. Rows
    /// carry `_id`, `code`, and `name`, capped at 10.
    pub async fn search(&self, term: &str) -> StoreResult<Vec<Document>> {
        let (code_filter, name_filter) = search_filters(term);
        let options = || {
            FindOptions::builder()
                .projection(doc! { "_id": 1, "code": 1, "name": 1 })
                .limit(SEARCH_LIMIT)
                .build()
        };

        let by_code: Vec<Document> = self
            .coll
            .clone_with_type::<Document>()
            .find(code_filter, options())
            .await?
            .try_collect()
            .await?;
        if !by_code.is_empty() {
            return Ok(by_code);
        }

        let by_name = self
            .coll
            .clone_with_type::<Document>()
            .find(name_filter, options())
            .await?
            .try_collect()
            .await?;
        Ok(by_name)
    }

    /// Patch arbitrary fields; `_id` and the business key `code` are
    /// stripped from the patch first.
    pub async fn update_fields(&self, id: ObjectId, patch: Document) -> StoreResult<Customer> {
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
            .ok_or_else(|| StoreError::NotFound(format!("customer with id: {id}")))
    }

    /// Remove the customer, returning the removed document (the handler
    /// reports its name).
    pub async fn delete(&self, id: ObjectId) -> StoreResult<Customer> {
        self.coll
            .find_one_and_delete(doc! { "_id": id }, None)
            .await?
            .ok_or_else(|| StoreError::NotFound(format!("customer with id: {id}")))
    }
}

/// The two search branches: uppercased anchored prefix on `code`, and
/// the case-insensitive substring fallback on `name`.
fn search_filters(term: &str) -> (Document, Document) {
    let term = term.to_uppercase();
    let by_code = code_prefix_filter(&term);
    let by_name = doc! { "name": { "$regex": term, "$options": "i" } };
    (by_code, by_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn code_branch_uppercases_and_anchors_the_prefix() {
        let (by_code, _) = search_filters("ac");
        assert_eq!(by_code, doc! { "code": { "$regex": "^AC" } });
    }

    #[test]
    fn name_fallback_is_a_case_insensitive_substring_match() {
        let (_, by_name) = search_filters("ac");
        // Substring, not prefix: no `^` anchor on the name branch.
        assert_eq!(by_name, doc! { "name": { "$regex": "AC", "$options": "i" } });
    }
}
