//! Products service.

use async_trait::async_trait;
use mockall::automock;
use tracing::info;

use crate::{
    database::Db,
    domain::products::{
        errors::ProductsServiceError,
        models::{NewProduct, ProductDetail, ProductId, ProductListQuery, ProductSummary, ProductUpdate},
        repository::PgProductsRepository,
    },
    listing::Page,
};

#[derive(Debug, Clone)]
pub struct PgProductsService {
    db: Db,
    repository: PgProductsRepository,
}

impl PgProductsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgProductsRepository::new(),
        }
    }
}

#[async_trait]
impl ProductsService for PgProductsService {
    async fn list_products(
        &self,
        list: ProductListQuery,
    ) -> Result<Page<ProductSummary>, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let page = self.repository.list_products(&mut tx, &list).await?;

        tx.commit().await?;

        Ok(page)
    }

    async fn get_product(
        &self,
        product: ProductId,
    ) -> Result<Option<ProductDetail>, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let product = self.repository.get_product(&mut tx, product).await?;

        tx.commit().await?;

        Ok(product)
    }

    #[tracing::instrument(
        name = "products.service.create_product",
        skip(self, product),
        fields(
            category_id = %product.category_id,
            seller_id = %product.seller_id,
            image_count = product.images.len()
        ),
        err
    )]
    async fn create_product(
        &self,
        product: NewProduct,
    ) -> Result<ProductDetail, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let id = self.repository.create_product(&mut tx, &product).await?;

        let created = self
            .repository
            .get_product(&mut tx, id)
            .await?
            .ok_or(ProductsServiceError::NotFound)?;

        tx.commit().await?;

        info!(product_id = %id, "created product");

        Ok(created)
    }

    #[tracing::instrument(
        name = "products.service.update_product",
        skip(self, update),
        fields(product_id = %product),
        err
    )]
    async fn update_product(
        &self,
        product: ProductId,
        update: ProductUpdate,
    ) -> Result<ProductDetail, ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let id = self
            .repository
            .update_product(&mut tx, product, &update)
            .await?;

        let updated = self
            .repository
            .get_product(&mut tx, id)
            .await?
            .ok_or(ProductsServiceError::NotFound)?;

        tx.commit().await?;

        Ok(updated)
    }

    #[tracing::instrument(
        name = "products.service.delete_product",
        skip(self),
        fields(product_id = %product),
        err
    )]
    async fn delete_product(&self, product: ProductId) -> Result<(), ProductsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.repository.delete_product(&mut tx, product).await?;

        if rows_affected == 0 {
            return Err(ProductsServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait ProductsService: Send + Sync {
    /// Retrieves one page of products matching the filter.
    async fn list_products(
        &self,
        list: ProductListQuery,
    ) -> Result<Page<ProductSummary>, ProductsServiceError>;

    /// Retrieve a single product with its images, sizes and colors.
    async fn get_product(
        &self,
        product: ProductId,
    ) -> Result<Option<ProductDetail>, ProductsServiceError>;

    /// Creates a product together with its images, sizes and colors.
    async fn create_product(&self, product: NewProduct)
    -> Result<ProductDetail, ProductsServiceError>;

    /// Overwrites the supplied fields of a product.
    async fn update_product(
        &self,
        product: ProductId,
        update: ProductUpdate,
    ) -> Result<ProductDetail, ProductsServiceError>;

    /// Erases a product and all of its child rows.
    async fn delete_product(&self, product: ProductId) -> Result<(), ProductsServiceError>;
}

#[cfg(test)]
mod tests {
    use sqlx::query_scalar;
    use testresult::TestResult;

    use crate::{
        domain::{
            categories::models::CategoryId,
            products::models::{Condition, ProductFilter, ProductSortField},
            sellers::models::SellerId,
        },
        listing::{ListQuery, Pagination, Sort, SortDirection},
        test::TestContext,
    };

    use super::*;

    fn new_product(category_id: CategoryId, seller_id: SellerId, name: &str) -> NewProduct {
        NewProduct {
            category_id,
            seller_id,
            name: name.to_string(),
            price: 125_000,
            stock: 12,
            condition: Condition::New,
            rating: 4,
            description: "Kaos katun combed 30s".to_string(),
            images: vec![
                "https://img.example.com/1.png".to_string(),
                "https://img.example.com/2.png".to_string(),
            ],
            sizes: vec!["M".to_string(), "L".to_string()],
            colors: vec!["black".to_string()],
        }
    }

    async fn seed(ctx: &TestContext) -> (CategoryId, SellerId) {
        (
            ctx.create_category("Kaos").await,
            ctx.create_seller("Toko Satu").await,
        )
    }

    #[tokio::test]
    async fn create_then_get_returns_matching_product() -> TestResult {
        let ctx = TestContext::new().await;
        let (category, seller) = seed(&ctx).await;

        let created = ctx
            .products
            .create_product(new_product(category, seller, "Kaos Polos"))
            .await?;

        let fetched = ctx.products.get_product(created.product.id).await?;

        let Some(fetched) = fetched else {
            return Err("created product was not found".into());
        };

        assert_eq!(fetched, created);
        assert_eq!(fetched.product.name, "Kaos Polos");
        assert_eq!(fetched.product.price, 125_000);
        assert_eq!(fetched.category_name, "Kaos");
        assert_eq!(fetched.seller_name, "Toko Satu");

        let images: Vec<&str> = fetched.images.iter().map(|i| i.value.as_str()).collect();

        assert_eq!(
            images,
            vec!["https://img.example.com/1.png", "https://img.example.com/2.png"]
        );
        assert_eq!(fetched.sizes.len(), 2);
        assert_eq!(fetched.colors.len(), 1);

        Ok(())
    }

    #[tokio::test]
    async fn create_with_missing_category_is_invalid_reference() -> TestResult {
        let ctx = TestContext::new().await;
        let (_, seller) = seed(&ctx).await;

        let result = ctx
            .products
            .create_product(new_product(CategoryId::from_i64(404), seller, "Kaos"))
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::InvalidReference)),
            "expected InvalidReference, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn second_page_of_ten_over_twenty_five_products() -> TestResult {
        let ctx = TestContext::new().await;
        let (category, seller) = seed(&ctx).await;

        let mut ids = Vec::new();

        for n in 0..25 {
            let created = ctx
                .products
                .create_product(new_product(category, seller, &format!("Produk {n:02}")))
                .await?;

            ids.push(created.product.id);
        }

        let page = ctx
            .products
            .list_products(ListQuery {
                filter: ProductFilter::default(),
                sort: Sort {
                    field: ProductSortField::Name,
                    direction: SortDirection::Asc,
                },
                pagination: Pagination::new(2, 10),
            })
            .await?;

        let listed: Vec<ProductId> = page.items.iter().map(|s| s.product.id).collect();

        assert_eq!(page.total, 25);
        assert_eq!(listed, ids.get(10..20).map(<[_]>::to_vec).unwrap_or_default());
        assert_eq!(Pagination::new(2, 10).total_pages(page.total), 3);

        Ok(())
    }

    #[tokio::test]
    async fn list_joins_names_and_first_image() -> TestResult {
        let ctx = TestContext::new().await;
        let (category, seller) = seed(&ctx).await;

        ctx.products
            .create_product(new_product(category, seller, "Kaos Polos"))
            .await?;

        let page = ctx.products.list_products(ListQuery::default()).await?;
        let summary = page.items.first();

        assert_eq!(summary.map(|s| s.category_name.as_str()), Some("Kaos"));
        assert_eq!(summary.map(|s| s.seller_name.as_str()), Some("Toko Satu"));
        assert_eq!(
            summary.and_then(|s| s.image.as_deref()),
            Some("https://img.example.com/1.png")
        );

        Ok(())
    }

    #[tokio::test]
    async fn list_filters_by_search_color_and_condition() -> TestResult {
        let ctx = TestContext::new().await;
        let (category, seller) = seed(&ctx).await;

        let black = ctx
            .products
            .create_product(new_product(category, seller, "Kaos Hitam"))
            .await?;

        let mut used = new_product(category, seller, "Kemeja Bekas");
        used.condition = Condition::Used;
        used.colors = vec!["white".to_string()];
        let used = ctx.products.create_product(used).await?;

        let by_search = ctx
            .products
            .list_products(ListQuery {
                filter: ProductFilter {
                    search: Some("kaos".to_string()),
                    ..ProductFilter::default()
                },
                ..ListQuery::default()
            })
            .await?;

        assert_eq!(by_search.total, 1);
        assert_eq!(by_search.items.first().map(|s| s.product.id), Some(black.product.id));

        let by_color = ctx
            .products
            .list_products(ListQuery {
                filter: ProductFilter {
                    color: Some("WHITE".to_string()),
                    ..ProductFilter::default()
                },
                ..ListQuery::default()
            })
            .await?;

        assert_eq!(by_color.items.first().map(|s| s.product.id), Some(used.product.id));

        let by_condition = ctx
            .products
            .list_products(ListQuery {
                filter: ProductFilter {
                    condition: Some(Condition::New),
                    ..ProductFilter::default()
                },
                ..ListQuery::default()
            })
            .await?;

        assert_eq!(by_condition.total, 1);

        Ok(())
    }

    #[tokio::test]
    async fn search_treats_wildcards_literally() -> TestResult {
        let ctx = TestContext::new().await;
        let (category, seller) = seed(&ctx).await;

        ctx.products
            .create_product(new_product(category, seller, "Kaos"))
            .await?;

        let page = ctx
            .products
            .list_products(ListQuery {
                filter: ProductFilter {
                    search: Some("%".to_string()),
                    ..ProductFilter::default()
                },
                ..ListQuery::default()
            })
            .await?;

        assert!(page.is_empty(), "expected no match, got {page:?}");

        Ok(())
    }

    #[tokio::test]
    async fn update_overwrites_only_supplied_fields() -> TestResult {
        let ctx = TestContext::new().await;
        let (category, seller) = seed(&ctx).await;

        let created = ctx
            .products
            .create_product(new_product(category, seller, "Kaos"))
            .await?;

        let updated = ctx
            .products
            .update_product(
                created.product.id,
                ProductUpdate {
                    price: Some(99_000),
                    sizes: Some(vec!["XL".to_string()]),
                    ..ProductUpdate::default()
                },
            )
            .await?;

        assert_eq!(updated.product.price, 99_000);
        assert_eq!(updated.product.name, "Kaos");
        assert_eq!(updated.images.len(), 2);

        let sizes: Vec<&str> = updated.sizes.iter().map(|s| s.value.as_str()).collect();

        assert_eq!(sizes, vec!["XL"]);

        Ok(())
    }

    #[tokio::test]
    async fn update_unknown_product_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx
            .products
            .update_product(ProductId::from_i64(404), ProductUpdate::default())
            .await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn delete_removes_product_and_child_rows() -> TestResult {
        let ctx = TestContext::new().await;
        let (category, seller) = seed(&ctx).await;

        let created = ctx
            .products
            .create_product(new_product(category, seller, "Kaos"))
            .await?;

        ctx.products.delete_product(created.product.id).await?;

        assert!(ctx.products.get_product(created.product.id).await?.is_none());

        for table in ["product_images", "product_sizes", "product_colors"] {
            let remaining: i64 = query_scalar(&format!(
                "SELECT COUNT(*) FROM {table} WHERE product_id = $1"
            ))
            .bind(created.product.id.into_i64())
            .fetch_one(ctx.db.pool())
            .await?;

            assert_eq!(remaining, 0, "{table} should have no orphaned rows");
        }

        Ok(())
    }

    #[tokio::test]
    async fn delete_unknown_product_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx.products.delete_product(ProductId::from_i64(404)).await;

        assert!(
            matches!(result, Err(ProductsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }
}
