//! Addresses Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{FromRow, Postgres, Row, Transaction, postgres::PgRow, query, query_as};

use crate::domain::{
    addresses::models::{Address, AddressId, AddressUpdate, NewAddress, PrimaryFlag},
    users::models::UserId,
};

const LIST_ADDRESSES_SQL: &str = include_str!("sql/list_addresses.sql");
const LIST_USER_ADDRESSES_SQL: &str = include_str!("sql/list_user_addresses.sql");
const GET_ADDRESS_SQL: &str = include_str!("sql/get_address.sql");
const CREATE_ADDRESS_SQL: &str = include_str!("sql/create_address.sql");
const UPDATE_ADDRESS_SQL: &str = include_str!("sql/update_address.sql");
const DELETE_ADDRESS_SQL: &str = include_str!("sql/delete_address.sql");
const SET_OTHER_ADDRESSES_PRIMARY_OFF_SQL: &str =
    include_str!("sql/set_other_addresses_primary_off.sql");
const SET_PRIMARY_ON_FOR_FIRST_ADDRESS_SQL: &str =
    include_str!("sql/set_primary_on_for_first_address.sql");

#[derive(Debug, Clone, Default)]
pub(crate) struct PgAddressesRepository;

impl PgAddressesRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_addresses(
        &self,
        tx: &mut Transaction<'_, Postgres>,
    ) -> Result<Vec<Address>, sqlx::Error> {
        query_as::<Postgres, Address>(LIST_ADDRESSES_SQL)
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn list_user_addresses(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserId,
    ) -> Result<Vec<Address>, sqlx::Error> {
        query_as::<Postgres, Address>(LIST_USER_ADDRESSES_SQL)
            .bind(user.into_i64())
            .fetch_all(&mut **tx)
            .await
    }

    pub(crate) async fn get_address(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        address: AddressId,
    ) -> Result<Option<Address>, sqlx::Error> {
        query_as::<Postgres, Address>(GET_ADDRESS_SQL)
            .bind(address.into_i64())
            .fetch_optional(&mut **tx)
            .await
    }

    pub(crate) async fn create_address(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        address: &NewAddress,
    ) -> Result<Address, sqlx::Error> {
        query_as::<Postgres, Address>(CREATE_ADDRESS_SQL)
            .bind(address.user_id.into_i64())
            .bind(&address.name)
            .bind(&address.main_address)
            .bind(&address.detail_address)
            .bind(&address.phone)
            .bind(&address.postal_code)
            .bind(address.primary.as_str())
            .bind(&address.city)
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn update_address(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        address: AddressId,
        update: &AddressUpdate,
    ) -> Result<Address, sqlx::Error> {
        query_as::<Postgres, Address>(UPDATE_ADDRESS_SQL)
            .bind(address.into_i64())
            .bind(update.name.as_deref())
            .bind(update.main_address.as_deref())
            .bind(update.detail_address.as_deref())
            .bind(update.phone.as_deref())
            .bind(update.postal_code.as_deref())
            .bind(update.primary.map(PrimaryFlag::as_str))
            .bind(update.city.as_deref())
            .fetch_one(&mut **tx)
            .await
    }

    pub(crate) async fn delete_address(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        address: AddressId,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(DELETE_ADDRESS_SQL)
            .bind(address.into_i64())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// Turn every live address of `user` off, except `except` when given.
    pub(crate) async fn set_other_addresses_primary_off(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserId,
        except: Option<AddressId>,
    ) -> Result<u64, sqlx::Error> {
        let rows_affected = query(SET_OTHER_ADDRESSES_PRIMARY_OFF_SQL)
            .bind(user.into_i64())
            .bind(except.map(AddressId::into_i64))
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }

    /// Promote the user's lowest-id live address to primary.
    pub(crate) async fn set_primary_on_for_first_address(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        user: UserId,
    ) -> Result<Option<Address>, sqlx::Error> {
        query_as::<Postgres, Address>(SET_PRIMARY_ON_FOR_FIRST_ADDRESS_SQL)
            .bind(user.into_i64())
            .fetch_optional(&mut **tx)
            .await
    }
}

impl<'r> FromRow<'r, PgRow> for Address {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let primary = row
            .try_get::<String, _>("primary_flag")?
            .parse::<PrimaryFlag>()
            .map_err(|error| sqlx::Error::ColumnDecode {
                index: "primary_flag".to_string(),
                source: error.into(),
            })?;

        Ok(Self {
            id: AddressId::from_i64(row.try_get("id")?),
            user_id: UserId::from_i64(row.try_get("user_id")?),
            name: row.try_get("name")?,
            main_address: row.try_get("main_address")?,
            detail_address: row.try_get("detail_address")?,
            phone: row.try_get("phone")?,
            postal_code: row.try_get("postal_code")?,
            primary,
            city: row.try_get("city")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
            deleted_at: row
                .try_get::<Option<SqlxTimestamp>, _>("deleted_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}
