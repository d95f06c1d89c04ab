use async_trait::async_trait;

use crate::domain::product::errors::ProductError;
use crate::domain::product::models::NewProduct;
use crate::domain::product::models::Product;
use crate::domain::product::models::ProductDetails;
use crate::domain::product::models::ProductId;
use crate::domain::product::models::ProductInput;
use crate::domain::user::models::UserId;

/// Port for product domain service operations.
///
/// Mutations take the acting user; acting on someone else's product yields
/// `NotFound` so ownership is not disclosed.
#[async_trait]
pub trait ProductServicePort: Send + Sync + 'static {
    /// Publish a product in the owner's business.
    ///
    /// # Errors
    /// * `NoBusiness` - User owns no business
    /// * `DatabaseError` - Database operation failed
    async fn create_product(
        &self,
        owner_id: &UserId,
        input: ProductInput,
    ) -> Result<Product, ProductError>;

    async fn list_products(&self) -> Result<Vec<Product>, ProductError>;

    /// Retrieve a product with its business and owner.
    ///
    /// # Errors
    /// * `NotFound` - Product does not exist
    /// * `DatabaseError` - Database operation failed
    async fn get_product_details(&self, id: &ProductId) -> Result<ProductDetails, ProductError>;

    /// # Errors
    /// * `NotFound` - Product does not exist or is not the caller's
    /// * `DatabaseError` - Database operation failed
    async fn update_product(
        &self,
        id: &ProductId,
        owner_id: &UserId,
        input: ProductInput,
    ) -> Result<Product, ProductError>;

    /// # Errors
    /// * `NotFound` - Product does not exist or is not the caller's
    /// * `DatabaseError` - Database operation failed
    async fn delete_product(&self, id: &ProductId, owner_id: &UserId) -> Result<(), ProductError>;
}

/// Persistence operations for products.
#[async_trait]
pub trait ProductRepository: Send + Sync + 'static {
    async fn create(&self, product: NewProduct) -> Result<Product, ProductError>;

    async fn list_all(&self) -> Result<Vec<Product>, ProductError>;

    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, ProductError>;

    /// # Errors
    /// * `NotFound` - Product does not exist
    async fn update(&self, product: Product) -> Result<Product, ProductError>;

    /// # Errors
    /// * `NotFound` - Product does not exist
    async fn delete(&self, id: &ProductId) -> Result<(), ProductError>;
}
