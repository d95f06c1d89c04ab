use chrono::DateTime;
use chrono::NaiveDate;
use chrono::Utc;
use serde::Deserialize;
use serde::Serialize;

use crate::domain::product::errors::ProductError;
use crate::domain::product::models::Product;
use crate::domain::product::models::ProductInput;

pub mod create_product;
pub mod delete_product;
pub mod get_product;
pub mod list_products;
pub mod update_product;

pub use create_product::create_product;
pub use delete_product::delete_product;
pub use get_product::get_product;
pub use list_products::list_products;
pub use update_product::update_product;

/// HTTP request body shared by create and update. Prices are in cents.
#[derive(Debug, Clone, Deserialize)]
pub struct ProductRequest {
    pub name: String,
    pub category: String,
    pub original_price: i64,
    pub new_price: i64,
    pub offer_expires_on: Option<NaiveDate>,
}

impl ProductRequest {
    fn try_into_input(self) -> Result<ProductInput, ProductError> {
        ProductInput::new(
            self.name,
            self.category,
            self.original_price,
            self.new_price,
            self.offer_expires_on,
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProductData {
    pub id: i64,
    pub business_id: i64,
    pub name: String,
    pub category: String,
    pub original_price: i64,
    pub new_price: i64,
    pub percentage_discount: i32,
    pub offer_expires_on: NaiveDate,
    pub image: String,
    pub published_at: DateTime<Utc>,
}

impl From<&Product> for ProductData {
    fn from(product: &Product) -> Self {
        Self {
            id: product.id.0,
            business_id: product.business_id.0,
            name: product.name.clone(),
            category: product.category.clone(),
            original_price: product.original_price,
            new_price: product.new_price,
            percentage_discount: product.percentage_discount,
            offer_expires_on: product.offer_expires_on,
            image: product.image.clone(),
            published_at: product.published_at,
        }
    }
}
