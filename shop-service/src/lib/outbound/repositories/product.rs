use async_trait::async_trait;
use chrono::DateTime;
use chrono::NaiveDate;
use chrono::Utc;
use sqlx::PgPool;

use crate::domain::business::models::BusinessId;
use crate::domain::product::errors::ProductError;
use crate::domain::product::models::NewProduct;
use crate::domain::product::models::Product;
use crate::domain::product::models::ProductId;
use crate::domain::product::ports::ProductRepository;

#[derive(sqlx::FromRow)]
struct ProductRow {
    id: i64,
    business_id: i64,
    name: String,
    category: String,
    original_price: i64,
    new_price: i64,
    percentage_discount: i32,
    offer_expires_on: NaiveDate,
    image: String,
    published_at: DateTime<Utc>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: ProductId(row.id),
            business_id: BusinessId(row.business_id),
            name: row.name,
            category: row.category,
            original_price: row.original_price,
            new_price: row.new_price,
            percentage_discount: row.percentage_discount,
            offer_expires_on: row.offer_expires_on,
            image: row.image,
            published_at: row.published_at,
        }
    }
}

pub struct PostgresProductRepository {
    pool: PgPool,
}

impl PostgresProductRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProductRepository for PostgresProductRepository {
    async fn create(&self, product: NewProduct) -> Result<Product, ProductError> {
        let row: ProductRow = sqlx::query_as(
            r#"
            INSERT INTO products (
                business_id, name, category, original_price, new_price,
                percentage_discount, offer_expires_on, image, published_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING id, business_id, name, category, original_price, new_price,
                      percentage_discount, offer_expires_on, image, published_at
            "#,
        )
        .bind(product.business_id.0)
        .bind(&product.name)
        .bind(&product.category)
        .bind(product.original_price)
        .bind(product.new_price)
        .bind(product.percentage_discount)
        .bind(product.offer_expires_on)
        .bind(&product.image)
        .bind(product.published_at)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| ProductError::DatabaseError(e.to_string()))?;

        Ok(row.into())
    }

    async fn list_all(&self) -> Result<Vec<Product>, ProductError> {
        let rows: Vec<ProductRow> = sqlx::query_as(
            r#"
            SELECT id, business_id, name, category, original_price, new_price,
                   percentage_discount, offer_expires_on, image, published_at
            FROM products
            ORDER BY published_at DESC, id DESC
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(|e| ProductError::DatabaseError(e.to_string()))?;

        Ok(rows.into_iter().map(Product::from).collect())
    }

    async fn find_by_id(&self, id: &ProductId) -> Result<Option<Product>, ProductError> {
        let row: Option<ProductRow> = sqlx::query_as(
            r#"
            SELECT id, business_id, name, category, original_price, new_price,
                   percentage_discount, offer_expires_on, image, published_at
            FROM products
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| ProductError::DatabaseError(e.to_string()))?;

        Ok(row.map(Product::from))
    }

    async fn update(&self, product: Product) -> Result<Product, ProductError> {
        let result = sqlx::query(
            r#"
            UPDATE products
            SET name = $2, category = $3, original_price = $4, new_price = $5,
                percentage_discount = $6, offer_expires_on = $7, published_at = $8
            WHERE id = $1
            "#,
        )
        .bind(product.id.0)
        .bind(&product.name)
        .bind(&product.category)
        .bind(product.original_price)
        .bind(product.new_price)
        .bind(product.percentage_discount)
        .bind(product.offer_expires_on)
        .bind(product.published_at)
        .execute(&self.pool)
        .await
        .map_err(|e| ProductError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(ProductError::NotFound(product.id.to_string()));
        }

        Ok(product)
    }

    async fn delete(&self, id: &ProductId) -> Result<(), ProductError> {
        let result = sqlx::query(
            r#"
            DELETE FROM products
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .execute(&self.pool)
        .await
        .map_err(|e| ProductError::DatabaseError(e.to_string()))?;

        if result.rows_affected() == 0 {
            return Err(ProductError::NotFound(id.to_string()));
        }

        Ok(())
    }
}
