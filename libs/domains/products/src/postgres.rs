use async_trait::async_trait;
use sea_orm::{ConnectionTrait, DbBackend, FromQueryResult, Statement};

use crate::error::{ProductError, ProductResult};
use crate::models::{CreateProduct, Product, UpdateProduct, PLACEHOLDER_IMAGE};
use crate::repository::ProductRepository;

/// PostgreSQL implementation of ProductRepository using SeaORM
///
/// Reads join the users table so the derived `email` field comes back
/// with the row.
#[derive(Clone)]
pub struct PgProductRepository {
    db: sea_orm::DatabaseConnection,
}

impl PgProductRepository {
    pub fn new(db: sea_orm::DatabaseConnection) -> Self {
        Self { db }
    }
}

const SELECT_PRODUCT: &str = r#"
    SELECT p.id, p.user_id, p."desc", p.price, p.created_time, p.image, u.email
    FROM products p
    LEFT JOIN users u ON u.id = p.user_id
"#;

/// Helper struct for deserializing joined product rows
#[derive(Debug, FromQueryResult)]
struct ProductRow {
    id: i64,
    user_id: Option<i64>,
    desc: Option<String>,
    price: rust_decimal::Decimal,
    created_time: chrono::DateTime<chrono::Utc>,
    image: String,
    email: Option<String>,
}

impl From<ProductRow> for Product {
    fn from(row: ProductRow) -> Self {
        Product {
            id: row.id,
            user: row.user_id,
            desc: row.desc,
            price: row.price,
            created_time: row.created_time,
            image: row.image,
            email: row.email,
        }
    }
}

#[async_trait]
impl ProductRepository for PgProductRepository {
    async fn create(&self, input: CreateProduct) -> ProductResult<Product> {
        let sql = r#"
            INSERT INTO products (user_id, "desc", price, image)
            VALUES ($1, $2, $3, $4)
            RETURNING id
        "#;

        let image = input
            .image
            .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string());

        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            sql,
            [
                input.user.into(),
                input.desc.into(),
                input.price.into(),
                image.into(),
            ],
        );

        #[derive(FromQueryResult)]
        struct InsertedId {
            id: i64,
        }

        let inserted = InsertedId::find_by_statement(stmt)
            .one(&self.db)
            .await
            .map_err(|e| match e.sql_err() {
                Some(sea_orm::SqlErr::UniqueConstraintViolation(_)) => {
                    ProductError::OwnerConflict(input.user.unwrap_or_default())
                }
                Some(sea_orm::SqlErr::ForeignKeyConstraintViolation(_)) => {
                    ProductError::Validation("Referenced user does not exist".to_string())
                }
                _ => ProductError::Database(format!("Database error: {}", e)),
            })?
            .ok_or_else(|| ProductError::Internal("Failed to create product".to_string()))?;

        tracing::info!(product_id = %inserted.id, "Created product");

        self.get_by_id(inserted.id)
            .await?
            .ok_or_else(|| ProductError::Internal("Created product vanished".to_string()))
    }

    async fn get_by_id(&self, id: i64) -> ProductResult<Option<Product>> {
        let sql = format!("{} WHERE p.id = $1", SELECT_PRODUCT);

        let stmt = Statement::from_sql_and_values(DbBackend::Postgres, sql, [id.into()]);

        let row = ProductRow::find_by_statement(stmt)
            .one(&self.db)
            .await
            .map_err(|e| ProductError::Database(format!("Database error: {}", e)))?;

        Ok(row.map(|r| r.into()))
    }

    async fn list(&self) -> ProductResult<Vec<Product>> {
        let sql = format!("{} ORDER BY p.id", SELECT_PRODUCT);

        let stmt = Statement::from_sql_and_values(DbBackend::Postgres, sql, []);

        let rows = ProductRow::find_by_statement(stmt)
            .all(&self.db)
            .await
            .map_err(|e| ProductError::Database(format!("Database error: {}", e)))?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    async fn update(&self, id: i64, input: UpdateProduct) -> ProductResult<Product> {
        // Fetch, apply the partial update in the domain model, write back.
        // created_time is deliberately not part of the UPDATE.
        let mut product = self
            .get_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))?;

        product.apply_update(input);

        let sql = r#"
            UPDATE products
            SET user_id = $2, "desc" = $3, price = $4, image = $5
            WHERE id = $1
        "#;

        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            sql,
            [
                id.into(),
                product.user.into(),
                product.desc.clone().into(),
                product.price.into(),
                product.image.clone().into(),
            ],
        );

        self.db
            .execute_raw(stmt)
            .await
            .map_err(|e| match e.sql_err() {
                Some(sea_orm::SqlErr::UniqueConstraintViolation(_)) => {
                    ProductError::OwnerConflict(product.user.unwrap_or_default())
                }
                Some(sea_orm::SqlErr::ForeignKeyConstraintViolation(_)) => {
                    ProductError::Validation("Referenced user does not exist".to_string())
                }
                _ => ProductError::Database(format!("Database error: {}", e)),
            })?;

        tracing::info!(product_id = %id, "Updated product");

        // Re-read for a fresh joined row (the owner may have changed)
        self.get_by_id(id)
            .await?
            .ok_or(ProductError::NotFound(id))
    }

    async fn delete(&self, id: i64) -> ProductResult<bool> {
        let sql = "DELETE FROM products WHERE id = $1";

        let stmt = Statement::from_sql_and_values(DbBackend::Postgres, sql, [id.into()]);

        let result = self
            .db
            .execute_raw(stmt)
            .await
            .map_err(|e| ProductError::Database(format!("Database error: {}", e)))?;

        if result.rows_affected() > 0 {
            tracing::info!(product_id = %id, "Deleted product");
            Ok(true)
        } else {
            Ok(false)
        }
    }

    async fn exists_by_owner(&self, user_id: i64, exclude_id: Option<i64>) -> ProductResult<bool> {
        let sql = r#"
            SELECT EXISTS(
                SELECT 1 FROM products
                WHERE user_id = $1 AND ($2::BIGINT IS NULL OR id <> $2)
            ) as exists
        "#;

        let stmt = Statement::from_sql_and_values(
            DbBackend::Postgres,
            sql,
            [user_id.into(), exclude_id.into()],
        );

        #[derive(FromQueryResult)]
        struct ExistsResult {
            exists: bool,
        }

        let result = ExistsResult::find_by_statement(stmt)
            .one(&self.db)
            .await
            .map_err(|e| ProductError::Database(format!("Database error: {}", e)))?;

        Ok(result.map(|r| r.exists).unwrap_or(false))
    }
}
