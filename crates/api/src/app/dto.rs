use serde::Deserialize;

/// Body of `PUT /products/qty/:id`. `qty` is a signed delta, not an
/// absolute value.
#[derive(Debug, Deserialize)]
pub struct AdjustQtyRequest {
    pub code: String,
    pub trademark: String,
    pub location: String,
    pub qty: i64,
}
