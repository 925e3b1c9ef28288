use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::{Validate, ValidationError};

/// Image path stored when a product is created without one
pub const PLACEHOLDER_IMAGE: &str = "/placeholder.png";

/// Price constraints: NUMERIC(5,2)
const PRICE_MAX_DIGITS: u32 = 5;
const PRICE_DECIMAL_PLACES: u32 = 2;

/// Validate that a price fits NUMERIC(5,2): at most 2 decimal places and
/// at most 5 significant digits in total.
fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    if price.scale() > PRICE_DECIMAL_PLACES {
        let mut err = ValidationError::new("price_decimal_places");
        err.message = Some("Ensure that there are no more than 2 decimal places.".into());
        return Err(err);
    }

    // Count total digits once rescaled to two decimal places
    let mut rescaled = *price;
    rescaled.rescale(PRICE_DECIMAL_PLACES);
    let digits = rescaled.mantissa().abs().to_string().len() as u32;
    if digits > PRICE_MAX_DIGITS {
        let mut err = ValidationError::new("price_digits");
        err.message = Some("Ensure that there are no more than 5 digits in total.".into());
        return Err(err);
    }

    Ok(())
}

/// Product entity - a catalog record plus the owner's email, derived
/// from the related user at read time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    /// Unique identifier
    pub id: i64,
    /// Owning user id (a user owns at most one product)
    pub user: Option<i64>,
    /// Short description
    pub desc: Option<String>,
    /// Price, at most 5 digits with 2 decimal places
    #[schema(value_type = String, example = "9.99")]
    pub price: Decimal,
    /// Creation timestamp, assigned once at insert
    #[serde(rename = "createdTime")]
    pub created_time: DateTime<Utc>,
    /// Image path or URL
    pub image: String,
    /// Owning user's email (read-only, null when unowned)
    pub email: Option<String>,
}

/// DTO for creating a new product
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct CreateProduct {
    /// Owner; defaults to the authenticated caller when omitted
    pub user: Option<i64>,
    #[validate(length(max = 50))]
    pub desc: Option<String>,
    #[validate(custom(function = "validate_price"))]
    #[schema(value_type = String, example = "9.99")]
    pub price: Decimal,
    pub image: Option<String>,
}

/// DTO for partially updating an existing product
///
/// Omitted fields keep their prior values.
#[derive(Debug, Clone, Default, Deserialize, Validate, ToSchema)]
pub struct UpdateProduct {
    pub user: Option<i64>,
    #[validate(length(max = 50))]
    pub desc: Option<String>,
    #[validate(custom(function = "validate_price"))]
    #[schema(value_type = Option<String>, example = "19.99")]
    pub price: Option<Decimal>,
    pub image: Option<String>,
}

impl Product {
    /// Build a product from a CreateProduct DTO and a resolved owner email.
    ///
    /// The id comes from the store; `created_time` is stamped here and
    /// never changes afterwards.
    pub fn new(id: i64, input: CreateProduct, email: Option<String>) -> Self {
        Self {
            id,
            user: input.user,
            desc: input.desc,
            price: input.price,
            created_time: Utc::now(),
            image: input.image.unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string()),
            email,
        }
    }

    /// Apply a partial update. Fields absent from the DTO are untouched;
    /// `id` and `created_time` are never written.
    pub fn apply_update(&mut self, update: UpdateProduct) {
        if let Some(user) = update.user {
            self.user = Some(user);
        }
        if let Some(desc) = update.desc {
            self.desc = Some(desc);
        }
        if let Some(price) = update.price {
            self.price = price;
        }
        if let Some(image) = update.image {
            self.image = image;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn price(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn create_input(p: &str) -> CreateProduct {
        CreateProduct {
            user: None,
            desc: Some("Widget".to_string()),
            price: price(p),
            image: None,
        }
    }

    #[test]
    fn test_valid_prices_pass() {
        for p in ["9.99", "999.99", "0.01", "-999.99", "0", "1", "42.5"] {
            assert!(
                create_input(p).validate().is_ok(),
                "price {} should be valid",
                p
            );
        }
    }

    #[test]
    fn test_price_with_three_decimal_places_fails() {
        let result = create_input("1.999").validate();
        let err = result.unwrap_err();
        assert!(err.field_errors().contains_key("price"));
    }

    #[test]
    fn test_price_with_too_many_digits_fails() {
        for p in ["1000.00", "9999", "12345.67"] {
            assert!(
                create_input(p).validate().is_err(),
                "price {} should be rejected",
                p
            );
        }
    }

    #[test]
    fn test_desc_over_50_chars_fails() {
        let mut input = create_input("9.99");
        input.desc = Some("x".repeat(51));
        assert!(input.validate().is_err());

        input.desc = Some("x".repeat(50));
        assert!(input.validate().is_ok());
    }

    #[test]
    fn test_new_product_defaults_placeholder_image() {
        let product = Product::new(1, create_input("9.99"), None);
        assert_eq!(product.image, PLACEHOLDER_IMAGE);
        assert_eq!(product.id, 1);
        assert!(product.email.is_none());
    }

    #[test]
    fn test_new_product_keeps_explicit_image() {
        let mut input = create_input("9.99");
        input.image = Some("/widget.png".to_string());
        let product = Product::new(1, input, None);
        assert_eq!(product.image, "/widget.png");
    }

    #[test]
    fn test_apply_update_changes_only_supplied_fields() {
        let mut product = Product::new(1, create_input("9.99"), None);
        let created = product.created_time;

        product.apply_update(UpdateProduct {
            desc: Some("Gadget".to_string()),
            ..Default::default()
        });

        assert_eq!(product.desc.as_deref(), Some("Gadget"));
        assert_eq!(product.price, price("9.99"));
        assert_eq!(product.created_time, created);
        assert_eq!(product.image, PLACEHOLDER_IMAGE);
    }

    #[test]
    fn test_serialized_shape_uses_camel_case_created_time() {
        let product = Product::new(7, create_input("9.99"), Some("a@x.com".to_string()));
        let json = serde_json::to_value(&product).unwrap();

        assert_eq!(json["id"], 7);
        assert!(json.get("createdTime").is_some());
        assert!(json.get("created_time").is_none());
        assert_eq!(json["email"], "a@x.com");
        assert_eq!(json["price"], "9.99");
    }
}
