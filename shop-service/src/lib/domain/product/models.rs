use std::fmt;

use chrono::DateTime;
use chrono::NaiveDate;
use chrono::Utc;

use crate::domain::business::models::Business;
use crate::domain::business::models::BusinessId;
use crate::domain::product::errors::ProductError;
use crate::domain::user::models::User;

/// Product listed by a business. Prices are in minor currency units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: ProductId,
    pub business_id: BusinessId,
    pub name: String,
    pub category: String,
    pub original_price: i64,
    pub new_price: i64,
    pub percentage_discount: i32,
    pub offer_expires_on: NaiveDate,
    pub image: String,
    pub published_at: DateTime<Utc>,
}

impl Product {
    pub const DEFAULT_IMAGE: &'static str = "productDefault.jpg";

    /// Replace the editable fields and mark the product as republished.
    pub fn apply(&mut self, input: ProductInput, now: DateTime<Utc>) {
        self.percentage_discount = input.pricing.percentage_discount();
        self.name = input.name;
        self.category = input.category;
        self.original_price = input.pricing.original_price;
        self.new_price = input.pricing.new_price;
        if let Some(date) = input.offer_expires_on {
            self.offer_expires_on = date;
        }
        self.published_at = now;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ProductId(pub i64);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Original and discounted price pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pricing {
    original_price: i64,
    new_price: i64,
    percentage_discount: i32,
}

impl Pricing {
    /// # Errors
    /// * `InvalidPrice` - Original price is not positive, new price is negative,
    ///   or the markup is too large to express as an `i32` percentage
    pub fn new(original_price: i64, new_price: i64) -> Result<Self, ProductError> {
        if original_price <= 0 {
            return Err(ProductError::InvalidPrice(
                "original price must be greater than zero".to_string(),
            ));
        }
        if new_price < 0 {
            return Err(ProductError::InvalidPrice(
                "new price must not be negative".to_string(),
            ));
        }

        // Discount as a whole percentage, rounded half away from zero.
        // Negative when the new price is a markup.
        let saved = (original_price - new_price) as f64;
        let percentage = (saved / original_price as f64 * 100.0).round();
        if !(f64::from(i32::MIN)..=f64::from(i32::MAX)).contains(&percentage) {
            return Err(ProductError::InvalidPrice(format!(
                "new price {} is out of range for original price {}",
                new_price, original_price
            )));
        }

        Ok(Self {
            original_price,
            new_price,
            percentage_discount: percentage as i32,
        })
    }

    pub fn original_price(&self) -> i64 {
        self.original_price
    }

    pub fn new_price(&self) -> i64 {
        self.new_price
    }

    pub fn percentage_discount(&self) -> i32 {
        self.percentage_discount
    }
}

/// Validated product fields supplied on create and update.
#[derive(Debug, Clone)]
pub struct ProductInput {
    pub name: String,
    pub category: String,
    pub pricing: Pricing,
    pub offer_expires_on: Option<NaiveDate>,
}

impl ProductInput {
    const MAX_NAME_LENGTH: usize = 100;
    const MAX_CATEGORY_LENGTH: usize = 30;

    /// # Errors
    /// * `InvalidField` - Blank or oversized name or category
    /// * `InvalidPrice` - See [`Pricing::new`]
    pub fn new(
        name: String,
        category: String,
        original_price: i64,
        new_price: i64,
        offer_expires_on: Option<NaiveDate>,
    ) -> Result<Self, ProductError> {
        let name = Self::bounded("name", name, Self::MAX_NAME_LENGTH)?;
        let category = Self::bounded("category", category, Self::MAX_CATEGORY_LENGTH)?;
        let pricing = Pricing::new(original_price, new_price)?;

        Ok(Self {
            name,
            category,
            pricing,
            offer_expires_on,
        })
    }

    fn bounded(field: &str, value: String, max: usize) -> Result<String, ProductError> {
        let value = value.trim().to_string();
        let length = value.chars().count();

        if length == 0 {
            Err(ProductError::InvalidField(format!("{} must not be blank", field)))
        } else if length > max {
            Err(ProductError::InvalidField(format!(
                "{} longer than {} characters",
                field, max
            )))
        } else {
            Ok(value)
        }
    }
}

/// Product ready to be persisted; storage assigns the id.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub business_id: BusinessId,
    pub name: String,
    pub category: String,
    pub original_price: i64,
    pub new_price: i64,
    pub percentage_discount: i32,
    pub offer_expires_on: NaiveDate,
    pub image: String,
    pub published_at: DateTime<Utc>,
}

impl NewProduct {
    /// Offer expiry defaults to the publication day.
    pub fn new(business_id: BusinessId, input: ProductInput, now: DateTime<Utc>) -> Self {
        Self {
            business_id,
            percentage_discount: input.pricing.percentage_discount(),
            name: input.name,
            category: input.category,
            original_price: input.pricing.original_price(),
            new_price: input.pricing.new_price(),
            offer_expires_on: input.offer_expires_on.unwrap_or(now.date_naive()),
            image: Product::DEFAULT_IMAGE.to_string(),
            published_at: now,
        }
    }
}

/// Product together with the business selling it and that business's owner.
#[derive(Debug, Clone)]
pub struct ProductDetails {
    pub product: Product,
    pub business: Business,
    pub owner: User,
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    #[test]
    fn test_percentage_discount() {
        assert_eq!(Pricing::new(10_000, 7_500).unwrap().percentage_discount(), 25);
        assert_eq!(Pricing::new(300, 200).unwrap().percentage_discount(), 33);
        assert_eq!(Pricing::new(300, 100).unwrap().percentage_discount(), 67);
        assert_eq!(Pricing::new(500, 500).unwrap().percentage_discount(), 0);
        assert_eq!(Pricing::new(100, 0).unwrap().percentage_discount(), 100);
        assert_eq!(Pricing::new(100, 120).unwrap().percentage_discount(), -20);
    }

    #[test]
    fn test_pricing_rejects_non_positive_original() {
        assert!(matches!(
            Pricing::new(0, 0),
            Err(ProductError::InvalidPrice(_))
        ));
        assert!(matches!(
            Pricing::new(-5, 0),
            Err(ProductError::InvalidPrice(_))
        ));
        assert!(matches!(
            Pricing::new(100, -1),
            Err(ProductError::InvalidPrice(_))
        ));
    }

    #[test]
    fn test_pricing_rejects_unrepresentable_markup() {
        assert!(matches!(
            Pricing::new(1, i64::MAX),
            Err(ProductError::InvalidPrice(_))
        ));
        assert!(matches!(
            Pricing::new(100, 100 * i64::from(i32::MAX)),
            Err(ProductError::InvalidPrice(_))
        ));

        let steep = Pricing::new(1, 20_000_000).unwrap();
        assert_eq!(steep.percentage_discount(), -1_999_999_900);
    }

    #[test]
    fn test_product_input_validation() {
        assert!(ProductInput::new("Mango".into(), "fruit".into(), 100, 80, None).is_ok());
        assert!(matches!(
            ProductInput::new("  ".into(), "fruit".into(), 100, 80, None),
            Err(ProductError::InvalidField(_))
        ));
        assert!(matches!(
            ProductInput::new("Mango".into(), "c".repeat(31), 100, 80, None),
            Err(ProductError::InvalidField(_))
        ));
    }

    #[test]
    fn test_new_product_defaults() {
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let input = ProductInput::new("Mango".into(), "fruit".into(), 200, 150, None).unwrap();

        let product = NewProduct::new(BusinessId(3), input, now);

        assert_eq!(product.percentage_discount, 25);
        assert_eq!(product.image, Product::DEFAULT_IMAGE);
        assert_eq!(
            product.offer_expires_on,
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap()
        );
        assert_eq!(product.published_at, now);
    }

    #[test]
    fn test_apply_refreshes_publication() {
        let published = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let mut product = Product {
            id: ProductId(1),
            business_id: BusinessId(3),
            name: "Mango".to_string(),
            category: "fruit".to_string(),
            original_price: 200,
            new_price: 150,
            percentage_discount: 25,
            offer_expires_on: NaiveDate::from_ymd_opt(2024, 5, 10).unwrap(),
            image: Product::DEFAULT_IMAGE.to_string(),
            published_at: published,
        };

        let later = published + chrono::Duration::days(2);
        let input = ProductInput::new("Mango".into(), "fruit".into(), 200, 100, None).unwrap();
        product.apply(input, later);

        assert_eq!(product.percentage_discount, 50);
        assert_eq!(product.published_at, later);
        assert_eq!(
            product.offer_expires_on,
            NaiveDate::from_ymd_opt(2024, 5, 10).unwrap()
        );
    }
}
