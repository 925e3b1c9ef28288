//! Product Service - business logic layer

use std::sync::Arc;
use tracing::instrument;
use validator::Validate;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, Product, UpdateProduct};
use crate::repository::ProductRepository;

/// Product service providing business logic operations
///
/// The service layer handles validation, the one-product-per-owner rule,
/// and orchestrates repository operations.
pub struct ProductService<R: ProductRepository> {
    repository: Arc<R>,
}

impl<R: ProductRepository> ProductService<R> {
    /// Create a new ProductService with the given repository
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    /// Create a new product
    #[instrument(skip(self, input))]
    pub async fn create_product(&self, input: CreateProduct) -> ProductResult<Product> {
        input
            .validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;

        // A user owns at most one product
        if let Some(owner) = input.user {
            if self.repository.exists_by_owner(owner, None).await? {
                return Err(ProductError::OwnerConflict(owner));
            }
        }

        self.repository.create(input).await
    }

    /// Get a product by ID
    #[instrument(skip(self))]
    pub async fn get_product(&self, id: i64) -> ProductResult<Product> {
        self.repository
            .get_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    /// List all products
    #[instrument(skip(self))]
    pub async fn list_products(&self) -> ProductResult<Vec<Product>> {
        self.repository.list().await
    }

    /// Apply a partial update to an existing product
    #[instrument(skip(self, input))]
    pub async fn update_product(&self, id: i64, input: UpdateProduct) -> ProductResult<Product> {
        input
            .validate()
            .map_err(|e| ProductError::Validation(e.to_string()))?;

        let existing = self
            .repository
            .get_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))?;

        // Check the one-product-per-owner rule if the owner is changing
        if let Some(new_owner) = input.user {
            if existing.user != Some(new_owner)
                && self.repository.exists_by_owner(new_owner, Some(id)).await?
            {
                return Err(ProductError::OwnerConflict(new_owner));
            }
        }

        self.repository.update(id, input).await
    }

    /// Delete a product
    #[instrument(skip(self))]
    pub async fn delete_product(&self, id: i64) -> ProductResult<()> {
        if !self.repository.delete(id).await? {
            return Err(ProductError::NotFound(id));
        }

        Ok(())
    }
}

impl<R: ProductRepository> Clone for ProductService<R> {
    fn clone(&self) -> Self {
        Self {
            repository: Arc::clone(&self.repository),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repository::{InMemoryProductRepository, MockProductRepository};
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn create_input(user: Option<i64>, price: &str) -> CreateProduct {
        CreateProduct {
            user,
            desc: Some("Widget".to_string()),
            price: Decimal::from_str(price).unwrap(),
            image: None,
        }
    }

    #[tokio::test]
    async fn test_create_rejects_invalid_price() {
        let service = ProductService::new(InMemoryProductRepository::new());

        let result = service.create_product(create_input(None, "1.999")).await;
        assert!(matches!(result, Err(ProductError::Validation(_))));
    }

    #[tokio::test]
    async fn test_create_second_product_for_owner_conflicts() {
        let service = ProductService::new(InMemoryProductRepository::new());

        service
            .create_product(create_input(Some(1), "9.99"))
            .await
            .unwrap();
        let result = service.create_product(create_input(Some(1), "5.00")).await;
        assert!(matches!(result, Err(ProductError::OwnerConflict(1))));
    }

    #[tokio::test]
    async fn test_get_missing_product_not_found() {
        let service = ProductService::new(InMemoryProductRepository::new());

        let result = service.get_product(42).await;
        assert!(matches!(result, Err(ProductError::NotFound(42))));
    }

    #[tokio::test]
    async fn test_partial_update_keeps_other_fields() {
        let service = ProductService::new(InMemoryProductRepository::new());

        let created = service
            .create_product(create_input(None, "9.99"))
            .await
            .unwrap();

        let updated = service
            .update_product(
                created.id,
                UpdateProduct {
                    price: Some(Decimal::from_str("19.99").unwrap()),
                    ..Default::default()
                },
            )
            .await
            .unwrap();

        assert_eq!(updated.price, Decimal::from_str("19.99").unwrap());
        assert_eq!(updated.desc, created.desc);
        assert_eq!(updated.created_time, created.created_time);
    }

    #[tokio::test]
    async fn test_update_to_taken_owner_conflicts() {
        let service = ProductService::new(InMemoryProductRepository::new());

        service
            .create_product(create_input(Some(1), "9.99"))
            .await
            .unwrap();
        let other = service
            .create_product(create_input(Some(2), "5.00"))
            .await
            .unwrap();

        let result = service
            .update_product(
                other.id,
                UpdateProduct {
                    user: Some(1),
                    ..Default::default()
                },
            )
            .await;
        assert!(matches!(result, Err(ProductError::OwnerConflict(1))));
    }

    #[tokio::test]
    async fn test_delete_missing_product_not_found() {
        let service = ProductService::new(InMemoryProductRepository::new());

        let result = service.delete_product(42).await;
        assert!(matches!(result, Err(ProductError::NotFound(42))));
    }

    #[tokio::test]
    async fn test_delete_propagates_repository_errors() {
        let mut repo = MockProductRepository::new();
        repo.expect_delete()
            .returning(|_| Err(ProductError::Database("connection lost".to_string())));

        let service = ProductService::new(repo);
        let result = service.delete_product(1).await;
        assert!(matches!(result, Err(ProductError::Database(_))));
    }
}
