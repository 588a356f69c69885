//! Categories service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::categories::{
        errors::CategoriesServiceError,
        models::{Category, CategoryId, CategoryUpdate, NewCategory},
        repository::PgCategoriesRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgCategoriesService {
    db: Db,
    repository: PgCategoriesRepository,
}

impl PgCategoriesService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgCategoriesRepository::new(),
        }
    }
}

#[async_trait]
impl CategoriesService for PgCategoriesService {
    async fn list_categories(&self) -> Result<Vec<Category>, CategoriesServiceError> {
        let mut tx = self.db.begin().await?;

        let categories = self.repository.list_categories(&mut tx).await?;

        tx.commit().await?;

        Ok(categories)
    }

    async fn get_category(
        &self,
        category: CategoryId,
    ) -> Result<Option<Category>, CategoriesServiceError> {
        let mut tx = self.db.begin().await?;

        let category = self.repository.get_category(&mut tx, category).await?;

        tx.commit().await?;

        Ok(category)
    }

    async fn create_category(
        &self,
        category: NewCategory,
    ) -> Result<Category, CategoriesServiceError> {
        let mut tx = self.db.begin().await?;

        let created = self.repository.create_category(&mut tx, &category).await?;

        tx.commit().await?;

        Ok(created)
    }

    async fn update_category(
        &self,
        category: CategoryId,
        update: CategoryUpdate,
    ) -> Result<Category, CategoriesServiceError> {
        let mut tx = self.db.begin().await?;

        let updated = self
            .repository
            .update_category(&mut tx, category, &update)
            .await?;

        tx.commit().await?;

        Ok(updated)
    }

    async fn delete_category(&self, category: CategoryId) -> Result<(), CategoriesServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_category(&mut tx, category).await?;

        if rows_affected == 0 {
            return Err(CategoriesServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait CategoriesService: Send + Sync {
    /// Retrieves all live categories, oldest first.
    async fn list_categories(&self) -> Result<Vec<Category>, CategoriesServiceError>;

    /// Retrieve a single category.
    async fn get_category(
        &self,
        category: CategoryId,
    ) -> Result<Option<Category>, CategoriesServiceError>;

    /// Creates a new category.
    async fn create_category(
        &self,
        category: NewCategory,
    ) -> Result<Category, CategoriesServiceError>;

    /// Overwrites the supplied fields of a category.
    async fn update_category(
        &self,
        category: CategoryId,
        update: CategoryUpdate,
    ) -> Result<Category, CategoriesServiceError>;

    /// Soft-deletes a category.
    async fn delete_category(&self, category: CategoryId) -> Result<(), CategoriesServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::TestContext;

    use super::*;

    fn new_category(name: &str) -> NewCategory {
        NewCategory {
            name: name.to_string(),
        }
    }

    #[tokio::test]
    async fn create_category_returns_name() -> TestResult {
        let ctx = TestContext::new().await;

        let category = ctx.categories.create_category(new_category("Kaos")).await?;

        assert_eq!(category.name, "Kaos");
        assert!(category.deleted_at.is_none());

        Ok(())
    }

    #[tokio::test]
    async fn update_category_keeps_unsupplied_fields() -> TestResult {
        let ctx = TestContext::new().await;
        let category = ctx.categories.create_category(new_category("Kaos")).await?;

        let unchanged = ctx
            .categories
            .update_category(category.id, CategoryUpdate::default())
            .await?;

        assert_eq!(unchanged.name, "Kaos");

        let renamed = ctx
            .categories
            .update_category(
                category.id,
                CategoryUpdate {
                    name: Some("Kemeja".to_string()),
                },
            )
            .await?;

        assert_eq!(renamed.name, "Kemeja");

        Ok(())
    }

    #[tokio::test]
    async fn update_category_unknown_id_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx
            .categories
            .update_category(CategoryId::from_i64(404), CategoryUpdate::default())
            .await;

        assert!(
            matches!(result, Err(CategoriesServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn deleted_category_is_hidden() -> TestResult {
        let ctx = TestContext::new().await;
        let category = ctx.categories.create_category(new_category("Kaos")).await?;

        ctx.categories.delete_category(category.id).await?;

        assert!(ctx.categories.get_category(category.id).await?.is_none());
        assert!(ctx.categories.list_categories().await?.is_empty());

        let again = ctx.categories.delete_category(category.id).await;

        assert!(
            matches!(again, Err(CategoriesServiceError::NotFound)),
            "expected NotFound on second delete, got {again:?}"
        );

        Ok(())
    }
}
