//! Domain model for the spare-parts inventory: products with nested
//! trademark/location stock records, customers, and sales invoices.
//!
//! This crate is pure data plus merge planning; no I/O.

pub mod customer;
pub mod product;
pub mod sale;

pub use customer::Customer;
pub use product::{
    DuplicateLocationPolicy, LocationQty, Product, StockPlan, TrademarkRecord, plan_stock_merge,
};
pub use sale::{Sale, SaleCustomer};
