use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::business::errors::BusinessError;
use crate::domain::business::models::Business;
use crate::domain::business::models::BusinessId;
use crate::domain::business::models::BusinessName;
use crate::domain::business::ports::BusinessRepository;
use crate::domain::user::models::UserId;

#[derive(sqlx::FromRow)]
struct BusinessRow {
    id: i64,
    name: String,
    city: String,
    region: String,
    description: Option<String>,
    logo: String,
    owner_id: i64,
}

impl TryFrom<BusinessRow> for Business {
    type Error = BusinessError;

    fn try_from(row: BusinessRow) -> Result<Self, Self::Error> {
        Ok(Business {
            id: BusinessId(row.id),
            name: BusinessName::new(row.name)?,
            city: row.city,
            region: row.region,
            description: row.description,
            logo: row.logo,
            owner_id: UserId(row.owner_id),
        })
    }
}

pub struct PostgresBusinessRepository {
    pool: PgPool,
}

impl PostgresBusinessRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BusinessRepository for PostgresBusinessRepository {
    async fn find_by_id(&self, id: &BusinessId) -> Result<Option<Business>, BusinessError> {
        let row: Option<BusinessRow> = sqlx::query_as(
            r#"
            SELECT id, name, city, region, description, logo, owner_id
            FROM businesses
            WHERE id = $1
            "#,
        )
        .bind(id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| BusinessError::DatabaseError(e.to_string()))?;

        row.map(Business::try_from).transpose()
    }

    async fn find_by_owner(&self, owner_id: &UserId) -> Result<Option<Business>, BusinessError> {
        let row: Option<BusinessRow> = sqlx::query_as(
            r#"
            SELECT id, name, city, region, description, logo, owner_id
            FROM businesses
            WHERE owner_id = $1
            "#,
        )
        .bind(owner_id.0)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| BusinessError::DatabaseError(e.to_string()))?;

        row.map(Business::try_from).transpose()
    }

    async fn update(&self, business: Business) -> Result<Business, BusinessError> {
        let result = sqlx::query(
            r#"
            UPDATE businesses
            SET name = $2, city = $3, region = $4, description = $5
            WHERE id = $1
            "#,
        )
        .bind(business.id.0)
        .bind(business.name.as_str())
        .bind(&business.city)
        .bind(&business.region)
        .bind(&business.description)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation()
                    && db_err.constraint() == Some("businesses_name_key")
                {
                    return BusinessError::NameAlreadyExists(business.name.as_str().to_string());
                }
            }
            BusinessError::DatabaseError(e.to_string())
        })?;

        if result.rows_affected() == 0 {
            return Err(BusinessError::NotFound(business.id.to_string()));
        }

        Ok(business)
    }
}
