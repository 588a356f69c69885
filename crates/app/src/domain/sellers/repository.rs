//! Sellers Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query_as};

use crate::domain::{
    sellers::models::{Seller, SellerId},
    users::models::UserId,
};

const LIST_SELLERS_SQL: &str = include_str!("sql/list_sellers.sql");
const GET_SELLER_SQL: &str = include_str!("sql/get_seller.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgSellersRepository;

impl PgSellersRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_sellers(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<Seller>, sqlx::Error> {
        query_as::<Postgres, Seller>(LIST_SELLERS_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_seller(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        seller: SellerId,
    ) -> Result<Option<Seller>, sqlx::Error> {
        query_as::<Postgres, Seller>(GET_SELLER_SQL)
            .bind(seller.into_i64())
            .fetch_optional(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for Seller {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: SellerId::from_i64(row.try_get("id")?),
            user_id: row.try_get::<Option<i64>, _>("user_id")?.map(UserId::from_i64),
            name: row.try_get("name")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
            deleted_at: row
                .try_get::<Option<SqlxTimestamp>, _>("deleted_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}
