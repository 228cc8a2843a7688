//! Products Data

use crate::domain::products::{errors::ProductsServiceError, records::ProductUuid};

/// Maximum product name length in characters.
pub const MAX_PRODUCT_NAME_CHARS: usize = 100;

/// Maximum product description length in characters.
pub const MAX_PRODUCT_DESCRIPTION_CHARS: usize = 255;

/// New Product Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub uuid: ProductUuid,
    pub name: String,
    pub price: u64,
    pub description: Option<String>,
}

/// Product Update Data
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductUpdate {
    pub name: String,
    pub price: u64,
    pub description: Option<String>,
}

/// Product fields shared by create and update, checked before any storage access.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ProductFields {
    pub name: String,
    pub price: u64,
    pub description: Option<String>,
}

impl ProductFields {
    pub(crate) fn validate(
        name: &str,
        price: u64,
        description: Option<&str>,
    ) -> Result<Self, ProductsServiceError> {
        let name = name.trim();

        if name.is_empty() {
            return Err(ProductsServiceError::Validation("name is required"));
        }

        if name.chars().count() > MAX_PRODUCT_NAME_CHARS {
            return Err(ProductsServiceError::Validation("name is too long"));
        }

        if price == 0 {
            return Err(ProductsServiceError::Validation("price must be positive"));
        }

        if description.is_some_and(|d| d.chars().count() > MAX_PRODUCT_DESCRIPTION_CHARS) {
            return Err(ProductsServiceError::Validation("description is too long"));
        }

        Ok(Self {
            name: name.to_string(),
            price,
            description: description.map(str::to_string),
        })
    }
}

impl TryFrom<&NewProduct> for ProductFields {
    type Error = ProductsServiceError;

    fn try_from(product: &NewProduct) -> Result<Self, Self::Error> {
        Self::validate(&product.name, product.price, product.description.as_deref())
    }
}

impl TryFrom<&ProductUpdate> for ProductFields {
    type Error = ProductsServiceError;

    fn try_from(update: &ProductUpdate) -> Result<Self, Self::Error> {
        Self::validate(&update.name, update.price, update.description.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use super::*;

    #[test]
    fn validate_trims_name() -> TestResult {
        let fields = ProductFields::validate("  Laptop ", 1000, Some("fast"))?;

        assert_eq!(fields.name, "Laptop");
        assert_eq!(fields.description.as_deref(), Some("fast"));

        Ok(())
    }

    #[test]
    fn validate_rejects_zero_price() {
        assert!(matches!(
            ProductFields::validate("Laptop", 0, None),
            Err(ProductsServiceError::Validation(_))
        ));
    }

    #[test]
    fn validate_rejects_blank_name() {
        assert!(matches!(
            ProductFields::validate("  ", 100, None),
            Err(ProductsServiceError::Validation(_))
        ));
    }

    #[test]
    fn validate_rejects_oversized_fields() {
        let long_name = "n".repeat(MAX_PRODUCT_NAME_CHARS + 1);
        let long_description = "d".repeat(MAX_PRODUCT_DESCRIPTION_CHARS + 1);

        assert!(matches!(
            ProductFields::validate(&long_name, 100, None),
            Err(ProductsServiceError::Validation(_))
        ));
        assert!(matches!(
            ProductFields::validate("Laptop", 100, Some(&long_description)),
            Err(ProductsServiceError::Validation(_))
        ));
    }
}
