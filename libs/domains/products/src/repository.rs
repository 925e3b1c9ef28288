use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, Product, UpdateProduct};

/// Repository trait for Product persistence
///
/// Implementations resolve the derived `email` field from the owning
/// user at read time.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductRepository: Send + Sync {
    /// Insert a new product
    async fn create(&self, input: CreateProduct) -> ProductResult<Product>;

    /// Get a product by ID
    async fn get_by_id(&self, id: i64) -> ProductResult<Option<Product>>;

    /// List all products, ordered by id
    async fn list(&self) -> ProductResult<Vec<Product>>;

    /// Apply a partial update to an existing product
    async fn update(&self, id: i64, input: UpdateProduct) -> ProductResult<Product>;

    /// Delete a product by ID
    async fn delete(&self, id: i64) -> ProductResult<bool>;

    /// Check whether a user already owns a product, optionally ignoring
    /// one product id (for updates)
    async fn exists_by_owner(&self, user_id: i64, exclude_id: Option<i64>) -> ProductResult<bool>;
}

/// In-memory implementation of ProductRepository (for development/testing)
///
/// Owner emails are kept in a side map so the derived `email` field can
/// be resolved without a user store; seed it with [`Self::insert_owner`].
#[derive(Debug, Default, Clone)]
pub struct InMemoryProductRepository {
    products: Arc<RwLock<HashMap<i64, Product>>>,
    owner_emails: Arc<RwLock<HashMap<i64, String>>>,
    next_id: Arc<AtomicI64>,
}

impl InMemoryProductRepository {
    pub fn new() -> Self {
        Self {
            products: Arc::new(RwLock::new(HashMap::new())),
            owner_emails: Arc::new(RwLock::new(HashMap::new())),
            next_id: Arc::new(AtomicI64::new(1)),
        }
    }

    /// Register a user id → email mapping for derived-email resolution.
    pub async fn insert_owner(&self, user_id: i64, email: impl Into<String>) {
        self.owner_emails.write().await.insert(user_id, email.into());
    }

    async fn email_for(&self, user: Option<i64>) -> Option<String> {
        match user {
            Some(id) => self.owner_emails.read().await.get(&id).cloned(),
            None => None,
        }
    }
}

#[async_trait]
impl ProductRepository for InMemoryProductRepository {
    async fn create(&self, input: CreateProduct) -> ProductResult<Product> {
        let email = self.email_for(input.user).await;
        let mut products = self.products.write().await;

        if let Some(owner) = input.user {
            let owner_taken = products.values().any(|p| p.user == Some(owner));
            if owner_taken {
                return Err(ProductError::OwnerConflict(owner));
            }
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let product = Product::new(id, input, email);
        products.insert(id, product.clone());

        tracing::info!(product_id = %id, "Created product");
        Ok(product)
    }

    async fn get_by_id(&self, id: i64) -> ProductResult<Option<Product>> {
        let products = self.products.read().await;
        Ok(products.get(&id).cloned())
    }

    async fn list(&self) -> ProductResult<Vec<Product>> {
        let products = self.products.read().await;

        let mut result: Vec<Product> = products.values().cloned().collect();
        result.sort_by_key(|p| p.id);

        Ok(result)
    }

    async fn update(&self, id: i64, input: UpdateProduct) -> ProductResult<Product> {
        let email = self.email_for(input.user).await;
        let mut products = self.products.write().await;

        if let Some(owner) = input.user {
            let owner_taken = products
                .values()
                .any(|p| p.id != id && p.user == Some(owner));
            if owner_taken {
                return Err(ProductError::OwnerConflict(owner));
            }
        }

        let product = products.get_mut(&id).ok_or(ProductError::NotFound(id))?;
        let owner_changed = input.user.is_some();
        product.apply_update(input);
        if owner_changed {
            product.email = email;
        }
        let updated = product.clone();

        tracing::info!(product_id = %id, "Updated product");
        Ok(updated)
    }

    async fn delete(&self, id: i64) -> ProductResult<bool> {
        let mut products = self.products.write().await;

        if products.remove(&id).is_some() {
            tracing::info!(product_id = %id, "Deleted product");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn exists_by_owner(&self, user_id: i64, exclude_id: Option<i64>) -> ProductResult<bool> {
        let products = self.products.read().await;
        let exists = products
            .values()
            .any(|p| p.user == Some(user_id) && Some(p.id) != exclude_id);
        Ok(exists)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn create_input(user: Option<i64>) -> CreateProduct {
        CreateProduct {
            user,
            desc: Some("Widget".to_string()),
            price: Decimal::from_str("9.99").unwrap(),
            image: None,
        }
    }

    #[tokio::test]
    async fn test_create_and_get_product() {
        let repo = InMemoryProductRepository::new();
        repo.insert_owner(1, "a@x.com").await;

        let product = repo.create(create_input(Some(1))).await.unwrap();
        assert_eq!(product.user, Some(1));
        assert_eq!(product.email.as_deref(), Some("a@x.com"));

        let fetched = repo.get_by_id(product.id).await.unwrap();
        assert_eq!(fetched.unwrap(), product);
    }

    #[tokio::test]
    async fn test_create_without_owner_has_no_email() {
        let repo = InMemoryProductRepository::new();

        let product = repo.create(create_input(None)).await.unwrap();
        assert!(product.user.is_none());
        assert!(product.email.is_none());
    }

    #[tokio::test]
    async fn test_second_product_for_same_owner_conflicts() {
        let repo = InMemoryProductRepository::new();

        repo.create(create_input(Some(1))).await.unwrap();
        let result = repo.create(create_input(Some(1))).await;
        assert!(matches!(result, Err(ProductError::OwnerConflict(1))));
    }

    #[tokio::test]
    async fn test_list_is_ordered_by_id() {
        let repo = InMemoryProductRepository::new();

        let a = repo.create(create_input(None)).await.unwrap();
        let b = repo.create(create_input(None)).await.unwrap();

        let all = repo.list().await.unwrap();
        assert_eq!(all.iter().map(|p| p.id).collect::<Vec<_>>(), vec![a.id, b.id]);
    }

    #[tokio::test]
    async fn test_update_missing_product_not_found() {
        let repo = InMemoryProductRepository::new();

        let result = repo.update(99, UpdateProduct::default()).await;
        assert!(matches!(result, Err(ProductError::NotFound(99))));
    }

    #[tokio::test]
    async fn test_delete_then_get_returns_none() {
        let repo = InMemoryProductRepository::new();

        let product = repo.create(create_input(None)).await.unwrap();
        assert!(repo.delete(product.id).await.unwrap());
        assert!(repo.get_by_id(product.id).await.unwrap().is_none());
        assert!(!repo.delete(product.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_exists_by_owner_respects_exclusion() {
        let repo = InMemoryProductRepository::new();

        let product = repo.create(create_input(Some(1))).await.unwrap();
        assert!(repo.exists_by_owner(1, None).await.unwrap());
        assert!(!repo.exists_by_owner(1, Some(product.id)).await.unwrap());
        assert!(!repo.exists_by_owner(2, None).await.unwrap());
    }
}
