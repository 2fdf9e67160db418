use stockroom_core::DuplicateLocationPolicy;
use stockroom_store::{CustomerStore, Database, ProductStore, SaleStore, StoreResult};

/// Store handles shared by all handlers.
pub struct AppServices {
    pub products: ProductStore,
    pub customers: CustomerStore,
    pub sales: SaleStore,
}

impl AppServices {
    pub fn new(db: &Database, policy: DuplicateLocationPolicy) -> Self {
        Self {
            products: ProductStore::new(db, policy),
            customers: CustomerStore::new(db),
            sales: SaleStore::new(db),
        }
    }

    /// Create the unique indexes backing the create-time uniqueness
    /// checks. Run once at startup.
    pub async fn ensure_indexes(&self) -> StoreResult<()> {
        self.products.ensure_indexes().await?;
        self.customers.ensure_indexes().await?;
        self.sales.ensure_indexes().await?;
        Ok(())
    }
}
