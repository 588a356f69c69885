//! Sellers service.

use async_trait::async_trait;
use mockall::automock;

use crate::{
    database::Db,
    domain::sellers::{
        errors::SellersServiceError,
        models::{Seller, SellerId},
        repository::PgSellersRepository,
    },
};

#[derive(Debug, Clone)]
pub struct PgSellersService {
    db: Db,
    repository: PgSellersRepository,
}

impl PgSellersService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            repository: PgSellersRepository::new(),
        }
    }
}

#[async_trait]
impl SellersService for PgSellersService {
    async fn list_sellers(&self) -> Result<Vec<Seller>, SellersServiceError> {
        let mut tx = self.db.begin().await?;

        let sellers = self.repository.list_sellers(&mut tx).await?;

        tx.commit().await?;

        Ok(sellers)
    }

    async fn get_seller(&self, seller: SellerId) -> Result<Option<Seller>, SellersServiceError> {
        let mut tx = self.db.begin().await?;

        let seller = self.repository.get_seller(&mut tx, seller).await?;

        tx.commit().await?;

        Ok(seller)
    }
}

#[automock]
#[async_trait]
pub trait SellersService: Send + Sync {
    /// Retrieves all live sellers, oldest first.
    async fn list_sellers(&self) -> Result<Vec<Seller>, SellersServiceError>;

    /// Retrieve a single seller.
    async fn get_seller(&self, seller: SellerId) -> Result<Option<Seller>, SellersServiceError>;
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::test::TestContext;

    use super::*;

    #[tokio::test]
    async fn list_sellers_returns_seeded_sellers_in_id_order() -> TestResult {
        let ctx = TestContext::new().await;
        let first = ctx.create_seller("Toko Satu").await;
        let second = ctx.create_seller("Toko Dua").await;

        let ids: Vec<SellerId> = ctx
            .sellers
            .list_sellers()
            .await?
            .into_iter()
            .map(|seller| seller.id)
            .collect();

        assert_eq!(ids, vec![first, second]);

        Ok(())
    }

    #[tokio::test]
    async fn get_seller_returns_name() -> TestResult {
        let ctx = TestContext::new().await;
        let id = ctx.create_seller("Toko Satu").await;

        let seller = ctx.sellers.get_seller(id).await?;

        assert_eq!(seller.map(|s| s.name), Some("Toko Satu".to_string()));

        Ok(())
    }

    #[tokio::test]
    async fn get_seller_unknown_id_returns_none() -> TestResult {
        let ctx = TestContext::new().await;

        let seller = ctx.sellers.get_seller(SellerId::from_i64(99)).await?;

        assert!(seller.is_none(), "expected no seller, got {seller:?}");

        Ok(())
    }
}
