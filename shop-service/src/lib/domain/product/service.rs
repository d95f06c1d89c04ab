use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::business::ports::BusinessRepository;
use crate::domain::product::errors::ProductError;
use crate::domain::product::models::NewProduct;
use crate::domain::product::models::Product;
use crate::domain::product::models::ProductDetails;
use crate::domain::product::models::ProductId;
use crate::domain::product::models::ProductInput;
use crate::domain::product::ports::ProductRepository;
use crate::domain::product::ports::ProductServicePort;
use crate::domain::user::models::UserId;
use crate::domain::user::ports::UserRepository;

/// Domain service for the product catalogue.
///
/// Products belong to a business; a user acts on a product only through the
/// business they own.
pub struct ProductService<PR, BR, UR>
where
    PR: ProductRepository,
    BR: BusinessRepository,
    UR: UserRepository,
{
    products: Arc<PR>,
    businesses: Arc<BR>,
    users: Arc<UR>,
}

impl<PR, BR, UR> ProductService<PR, BR, UR>
where
    PR: ProductRepository,
    BR: BusinessRepository,
    UR: UserRepository,
{
    pub fn new(products: Arc<PR>, businesses: Arc<BR>, users: Arc<UR>) -> Self {
        Self {
            products,
            businesses,
            users,
        }
    }

    /// Load a product if `owner_id` owns the business selling it.
    async fn owned_product(
        &self,
        id: &ProductId,
        owner_id: &UserId,
    ) -> Result<Product, ProductError> {
        let refused = || {
            tracing::warn!(product_id = %id, user_id = %owner_id, "Product access refused");
            ProductError::NotFound(id.to_string())
        };

        let product = self.products.find_by_id(id).await?.ok_or_else(refused)?;

        self.businesses
            .find_by_id(&product.business_id)
            .await?
            .filter(|business| business.is_owned_by(owner_id))
            .ok_or_else(refused)?;

        Ok(product)
    }
}

#[async_trait]
impl<PR, BR, UR> ProductServicePort for ProductService<PR, BR, UR>
where
    PR: ProductRepository,
    BR: BusinessRepository,
    UR: UserRepository,
{
    async fn create_product(
        &self,
        owner_id: &UserId,
        input: ProductInput,
    ) -> Result<Product, ProductError> {
        let business = self
            .businesses
            .find_by_owner(owner_id)
            .await?
            .ok_or(ProductError::NoBusiness(owner_id.to_string()))?;

        let product = self
            .products
            .create(NewProduct::new(business.id, input, Utc::now()))
            .await?;

        tracing::info!(
            product_id = %product.id,
            business_id = %business.id,
            "Product published"
        );
        Ok(product)
    }

    async fn list_products(&self) -> Result<Vec<Product>, ProductError> {
        self.products.list_all().await
    }

    async fn get_product_details(&self, id: &ProductId) -> Result<ProductDetails, ProductError> {
        let product = self
            .products
            .find_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id.to_string()))?;

        let business = self
            .businesses
            .find_by_id(&product.business_id)
            .await?
            .ok_or_else(|| {
                ProductError::DatabaseError(format!(
                    "product {} references missing business {}",
                    product.id, product.business_id
                ))
            })?;

        let owner = self
            .users
            .find_by_id(&business.owner_id)
            .await?
            .ok_or_else(|| {
                ProductError::DatabaseError(format!(
                    "business {} references missing owner {}",
                    business.id, business.owner_id
                ))
            })?;

        Ok(ProductDetails {
            product,
            business,
            owner,
        })
    }

    async fn update_product(
        &self,
        id: &ProductId,
        owner_id: &UserId,
        input: ProductInput,
    ) -> Result<Product, ProductError> {
        let mut product = self.owned_product(id, owner_id).await?;
        product.apply(input, Utc::now());

        let updated = self.products.update(product).await?;
        tracing::info!(product_id = %updated.id, "Product updated");
        Ok(updated)
    }

    async fn delete_product(&self, id: &ProductId, owner_id: &UserId) -> Result<(), ProductError> {
        self.owned_product(id, owner_id).await?;
        self.products.delete(id).await?;

        tracing::info!(product_id = %id, "Product deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use mockall::mock;

    use super::*;
    use crate::domain::business::errors::BusinessError;
    use crate::domain::business::models::Business;
    use crate::domain::business::models::BusinessId;
    use crate::domain::business::models::BusinessName;
    use crate::domain::user::errors::UserError;
    use crate::domain::user::models::EmailAddress;
    use crate::domain::user::models::NewUser;
    use crate::domain::user::models::User;
    use crate::domain::user::models::Username;

    mock! {
        pub TestProductRepository {}

        #[async_trait]
        impl ProductRepository for TestProductRepository {
            async fn create(&self, product: NewProduct) -> Result<Product, ProductError>;
            async fn list_all(&self) -> Result<Vec<Product>, ProductError>;
            async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, ProductError>;
            async fn update(&self, product: Product) -> Result<Product, ProductError>;
            async fn delete(&self, id: &ProductId) -> Result<(), ProductError>;
        }
    }

    mock! {
        pub TestBusinessRepository {}

        #[async_trait]
        impl BusinessRepository for TestBusinessRepository {
            async fn find_by_id(&self, id: &BusinessId) -> Result<Option<Business>, BusinessError>;
            async fn find_by_owner(&self, owner_id: &UserId) -> Result<Option<Business>, BusinessError>;
            async fn update(&self, business: Business) -> Result<Business, BusinessError>;
        }
    }

    mock! {
        pub TestUserRepository {}

        #[async_trait]
        impl UserRepository for TestUserRepository {
            async fn create(&self, user: NewUser) -> Result<User, UserError>;
            async fn find_by_id(&self, id: &UserId) -> Result<Option<User>, UserError>;
            async fn find_by_username(&self, username: &Username) -> Result<Option<User>, UserError>;
            async fn mark_verified(&self, id: &UserId) -> Result<bool, UserError>;
        }
    }

    fn business() -> Business {
        Business {
            id: BusinessId(10),
            name: BusinessName::new("alice".to_string()).unwrap(),
            city: Business::DEFAULT_LOCATION.to_string(),
            region: Business::DEFAULT_LOCATION.to_string(),
            description: None,
            logo: Business::DEFAULT_LOGO.to_string(),
            owner_id: UserId(1),
        }
    }

    fn owner() -> User {
        User {
            id: UserId(1),
            username: Username::new("alice".to_string()).unwrap(),
            email: EmailAddress::new("alice@example.com".to_string()).unwrap(),
            password_hash: "$argon2id$test_hash".to_string(),
            is_verified: true,
            joined_at: Utc::now(),
        }
    }

    fn product() -> Product {
        Product {
            id: ProductId(7),
            business_id: BusinessId(10),
            name: "Mango".to_string(),
            category: "fruit".to_string(),
            original_price: 200,
            new_price: 150,
            percentage_discount: 25,
            offer_expires_on: NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(),
            image: Product::DEFAULT_IMAGE.to_string(),
            published_at: Utc::now(),
        }
    }

    fn stored(new: NewProduct) -> Product {
        Product {
            id: ProductId(7),
            business_id: new.business_id,
            name: new.name,
            category: new.category,
            original_price: new.original_price,
            new_price: new.new_price,
            percentage_discount: new.percentage_discount,
            offer_expires_on: new.offer_expires_on,
            image: new.image,
            published_at: new.published_at,
        }
    }

    fn input(new_price: i64) -> ProductInput {
        ProductInput::new("Mango".to_string(), "fruit".to_string(), 200, new_price, None).unwrap()
    }

    fn service(
        products: MockTestProductRepository,
        businesses: MockTestBusinessRepository,
        users: MockTestUserRepository,
    ) -> ProductService<MockTestProductRepository, MockTestBusinessRepository, MockTestUserRepository>
    {
        ProductService::new(Arc::new(products), Arc::new(businesses), Arc::new(users))
    }

    #[tokio::test]
    async fn test_create_product_in_owned_business() {
        let mut products = MockTestProductRepository::new();
        let mut businesses = MockTestBusinessRepository::new();

        businesses
            .expect_find_by_owner()
            .withf(|owner| *owner == UserId(1))
            .times(1)
            .returning(|_| Ok(Some(business())));
        products
            .expect_create()
            .withf(|p| p.business_id == BusinessId(10) && p.percentage_discount == 50)
            .times(1)
            .returning(|p| Ok(stored(p)));

        let service = service(products, businesses, MockTestUserRepository::new());

        let product = service.create_product(&UserId(1), input(100)).await.unwrap();
        assert_eq!(product.business_id, BusinessId(10));
        assert_eq!(product.image, Product::DEFAULT_IMAGE);
    }

    #[tokio::test]
    async fn test_create_product_without_business() {
        let mut products = MockTestProductRepository::new();
        let mut businesses = MockTestBusinessRepository::new();

        businesses
            .expect_find_by_owner()
            .times(1)
            .returning(|_| Ok(None));
        products.expect_create().times(0);

        let service = service(products, businesses, MockTestUserRepository::new());

        let result = service.create_product(&UserId(1), input(100)).await;
        assert!(matches!(result, Err(ProductError::NoBusiness(_))));
    }

    #[tokio::test]
    async fn test_get_product_details() {
        let mut products = MockTestProductRepository::new();
        let mut businesses = MockTestBusinessRepository::new();
        let mut users = MockTestUserRepository::new();

        products
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(Some(product())));
        businesses
            .expect_find_by_id()
            .withf(|id| *id == BusinessId(10))
            .times(1)
            .returning(|_| Ok(Some(business())));
        users
            .expect_find_by_id()
            .withf(|id| *id == UserId(1))
            .times(1)
            .returning(|_| Ok(Some(owner())));

        let service = service(products, businesses, users);

        let details = service.get_product_details(&ProductId(7)).await.unwrap();
        assert_eq!(details.product.id, ProductId(7));
        assert_eq!(details.business.name.as_str(), "alice");
        assert_eq!(details.owner.username.as_str(), "alice");
    }

    #[tokio::test]
    async fn test_get_missing_product() {
        let mut products = MockTestProductRepository::new();
        products
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(None));

        let service = service(
            products,
            MockTestBusinessRepository::new(),
            MockTestUserRepository::new(),
        );

        let result = service.get_product_details(&ProductId(99)).await;
        assert!(matches!(result, Err(ProductError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_update_product_by_owner() {
        let mut products = MockTestProductRepository::new();
        let mut businesses = MockTestBusinessRepository::new();

        products
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(Some(product())));
        businesses
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(Some(business())));
        products
            .expect_update()
            .withf(|p| p.new_price == 100 && p.percentage_discount == 50)
            .times(1)
            .returning(|p| Ok(p));

        let service = service(products, businesses, MockTestUserRepository::new());

        let updated = service
            .update_product(&ProductId(7), &UserId(1), input(100))
            .await
            .unwrap();
        assert_eq!(updated.percentage_discount, 50);
    }

    #[tokio::test]
    async fn test_update_product_by_stranger_is_not_found() {
        let mut products = MockTestProductRepository::new();
        let mut businesses = MockTestBusinessRepository::new();

        products
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(Some(product())));
        businesses
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(Some(business())));
        products.expect_update().times(0);

        let service = service(products, businesses, MockTestUserRepository::new());

        let result = service
            .update_product(&ProductId(7), &UserId(2), input(100))
            .await;
        assert!(matches!(result, Err(ProductError::NotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_product_by_owner() {
        let mut products = MockTestProductRepository::new();
        let mut businesses = MockTestBusinessRepository::new();

        products
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(Some(product())));
        businesses
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(Some(business())));
        products
            .expect_delete()
            .withf(|id| *id == ProductId(7))
            .times(1)
            .returning(|_| Ok(()));

        let service = service(products, businesses, MockTestUserRepository::new());

        assert!(service
            .delete_product(&ProductId(7), &UserId(1))
            .await
            .is_ok());
    }

    #[tokio::test]
    async fn test_delete_product_by_stranger_is_not_found() {
        let mut products = MockTestProductRepository::new();
        let mut businesses = MockTestBusinessRepository::new();

        products
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(Some(product())));
        businesses
            .expect_find_by_id()
            .times(1)
            .returning(|_| Ok(Some(business())));
        products.expect_delete().times(0);

        let service = service(products, businesses, MockTestUserRepository::new());

        let result = service.delete_product(&ProductId(7), &UserId(2)).await;
        assert!(matches!(result, Err(ProductError::NotFound(_))));
    }
}
