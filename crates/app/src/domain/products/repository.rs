//! Products Repository

use jiff_sqlx::Timestamp as SqlxTimestamp;
use sqlx::{
    FromRow, Postgres, QueryBuilder, Row, Transaction, postgres::PgRow, query, query_as,
    query_scalar,
};

use crate::{
    domain::{
        categories::models::CategoryId,
        products::models::{
            Color, Condition, Image, NewProduct, Product, ProductDetail, ProductFilter, ProductId,
            ProductListQuery, ProductSummary, ProductUpdate, ProductValue, ProductValueKind, Size,
        },
        sellers::models::SellerId,
    },
    ids::TypedId,
    listing::Page,
};

const LIST_PRODUCTS_SQL: &str = include_str!("sql/list_products.sql");
const COUNT_PRODUCTS_SQL: &str = include_str!("sql/count_products.sql");
const GET_PRODUCT_SQL: &str = include_str!("sql/get_product.sql");
const CREATE_PRODUCT_SQL: &str = include_str!("sql/create_product.sql");
const UPDATE_PRODUCT_SQL: &str = include_str!("sql/update_product.sql");
const DELETE_PRODUCT_SQL: &str = include_str!("sql/delete_product.sql");

/// Statements for one kind of product child row.
trait ValueQueries: ProductValueKind {
    const LIST_SQL: &'static str;
    const CREATE_SQL: &'static str;
    const DELETE_SQL: &'static str;
}

impl ValueQueries for Image {
    const LIST_SQL: &'static str = include_str!("sql/list_product_images.sql");
    const CREATE_SQL: &'static str = include_str!("sql/create_product_images.sql");
    const DELETE_SQL: &'static str = include_str!("sql/delete_product_images.sql");
}

impl ValueQueries for Size {
    const LIST_SQL: &'static str = include_str!("sql/list_product_sizes.sql");
    const CREATE_SQL: &'static str = include_str!("sql/create_product_sizes.sql");
    const DELETE_SQL: &'static str = include_str!("sql/delete_product_sizes.sql");
}

impl ValueQueries for Color {
    const LIST_SQL: &'static str = include_str!("sql/list_product_colors.sql");
    const CREATE_SQL: &'static str = include_str!("sql/create_product_colors.sql");
    const DELETE_SQL: &'static str = include_str!("sql/delete_product_colors.sql");
}

#[derive(Debug, Clone, Default)]
pub(crate) struct PgProductsRepository;

impl PgProductsRepository {
    #[must_use]
    pub(crate) fn new() -> Self {
        Self
    }

    pub(crate) async fn list_products(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        list: &ProductListQuery,
    ) -> Result<Page<ProductSummary>, sqlx::Error> {
        let mut count = QueryBuilder::<Postgres>::new(COUNT_PRODUCTS_SQL);

        push_filters(&mut count, &list.filter);

        let total: i64 = count.build_query_scalar().fetch_one(&mut **tx).await?;

        let mut select = QueryBuilder::<Postgres>::new(LIST_PRODUCTS_SQL);

        push_filters(&mut select, &list.filter);

        let direction = list.sort.direction.as_sql();

        select
            .push(" ORDER BY ")
            .push(list.sort.field.column())
            .push(" ")
            .push(direction)
            .push(", p.id ")
            .push(direction)
            .push(" LIMIT ")
            .push_bind(list.pagination.sql_limit())
            .push(" OFFSET ")
            .push_bind(list.pagination.sql_offset());

        let items = select
            .build_query_as::<ProductSummary>()
            .fetch_all(&mut **tx)
            .await?;

        Ok(Page {
            items,
            total: u64::try_from(total).unwrap_or_default(),
        })
    }

    pub(crate) async fn get_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductId,
    ) -> Result<Option<ProductDetail>, sqlx::Error> {
        let Some(row) = query(GET_PRODUCT_SQL)
            .bind(product.into_i64())
            .fetch_optional(&mut **tx)
            .await?
        else {
            return Ok(None);
        };

        let product = Product::from_row(&row)?;

        Ok(Some(ProductDetail {
            images: list_values::<Image>(tx, product.id).await?,
            sizes: list_values::<Size>(tx, product.id).await?,
            colors: list_values::<Color>(tx, product.id).await?,
            category_name: row.try_get("category_name")?,
            seller_name: row.try_get("seller_name")?,
            product,
        }))
    }

    pub(crate) async fn create_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: &NewProduct,
    ) -> Result<ProductId, sqlx::Error> {
        let id: i64 = query_scalar(CREATE_PRODUCT_SQL)
            .bind(product.category_id.into_i64())
            .bind(product.seller_id.into_i64())
            .bind(&product.name)
            .bind(encode_price(product.price)?)
            .bind(encode_stock(product.stock)?)
            .bind(product.condition.as_str())
            .bind(i16::from(product.rating))
            .bind(&product.description)
            .fetch_one(&mut **tx)
            .await?;

        let id = ProductId::from_i64(id);

        create_values::<Image>(tx, id, &product.images).await?;
        create_values::<Size>(tx, id, &product.sizes).await?;
        create_values::<Color>(tx, id, &product.colors).await?;

        Ok(id)
    }

    pub(crate) async fn update_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductId,
        update: &ProductUpdate,
    ) -> Result<ProductId, sqlx::Error> {
        let id: i64 = query_scalar(UPDATE_PRODUCT_SQL)
            .bind(product.into_i64())
            .bind(update.category_id.map(CategoryId::into_i64))
            .bind(update.seller_id.map(SellerId::into_i64))
            .bind(update.name.as_deref())
            .bind(update.price.map(encode_price).transpose()?)
            .bind(update.stock.map(encode_stock).transpose()?)
            .bind(update.condition.map(Condition::as_str))
            .bind(update.rating.map(i16::from))
            .bind(update.description.as_deref())
            .fetch_one(&mut **tx)
            .await?;

        let id = ProductId::from_i64(id);

        if let Some(images) = &update.images {
            replace_values::<Image>(tx, id, images).await?;
        }

        if let Some(sizes) = &update.sizes {
            replace_values::<Size>(tx, id, sizes).await?;
        }

        if let Some(colors) = &update.colors {
            replace_values::<Color>(tx, id, colors).await?;
        }

        Ok(id)
    }

    /// Erase the product's images, sizes and colors, then the product.
    pub(crate) async fn delete_product(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        product: ProductId,
    ) -> Result<u64, sqlx::Error> {
        delete_values::<Image>(tx, product).await?;
        delete_values::<Size>(tx, product).await?;
        delete_values::<Color>(tx, product).await?;

        let rows_affected = query(DELETE_PRODUCT_SQL)
            .bind(product.into_i64())
            .execute(&mut **tx)
            .await?
            .rows_affected();

        Ok(rows_affected)
    }
}

fn push_filters(builder: &mut QueryBuilder<'_, Postgres>, filter: &ProductFilter) {
    if let Some(search) = filter.search.as_deref().filter(|s| !s.is_empty()) {
        builder
            .push(" AND p.name ILIKE ")
            .push_bind(format!("%{}%", escape_like(search)));
    }

    if let Some(category) = filter.category {
        builder
            .push(" AND p.category_id = ")
            .push_bind(category.into_i64());
    }

    if let Some(seller) = filter.seller {
        builder.push(" AND p.seller_id = ").push_bind(seller.into_i64());
    }

    if let Some(condition) = filter.condition {
        builder
            .push(" AND p.condition = ")
            .push_bind(condition.as_str());
    }

    if let Some(color) = filter.color.as_deref().filter(|s| !s.is_empty()) {
        builder
            .push(
                " AND EXISTS (SELECT 1 FROM product_colors pc WHERE pc.product_id = p.id \
                 AND pc.deleted_at IS NULL AND LOWER(pc.value) = LOWER(",
            )
            .push_bind(color.to_string())
            .push("))");
    }

    if let Some(size) = filter.size.as_deref().filter(|s| !s.is_empty()) {
        builder
            .push(
                " AND EXISTS (SELECT 1 FROM product_sizes ps WHERE ps.product_id = p.id \
                 AND ps.deleted_at IS NULL AND LOWER(ps.value) = LOWER(",
            )
            .push_bind(size.to_string())
            .push("))");
    }
}

/// Escape `ILIKE` wildcards so a search term matches literally.
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());

    for ch in term.chars() {
        if matches!(ch, '%' | '_' | '\\') {
            escaped.push('\\');
        }

        escaped.push(ch);
    }

    escaped
}

fn encode_price(price: u64) -> Result<i64, sqlx::Error> {
    i64::try_from(price).map_err(|e| sqlx::Error::Encode(Box::new(e)))
}

fn encode_stock(stock: u32) -> Result<i32, sqlx::Error> {
    i32::try_from(stock).map_err(|e| sqlx::Error::Encode(Box::new(e)))
}

async fn list_values<K: ValueQueries>(
    tx: &mut Transaction<'_, Postgres>,
    product: ProductId,
) -> Result<Vec<ProductValue<K>>, sqlx::Error> {
    query_as::<Postgres, ProductValue<K>>(K::LIST_SQL)
        .bind(product.into_i64())
        .fetch_all(&mut **tx)
        .await
}

async fn create_values<K: ValueQueries>(
    tx: &mut Transaction<'_, Postgres>,
    product: ProductId,
    values: &[String],
) -> Result<(), sqlx::Error> {
    if values.is_empty() {
        return Ok(());
    }

    query(K::CREATE_SQL)
        .bind(product.into_i64())
        .bind(values)
        .execute(&mut **tx)
        .await?;

    Ok(())
}

async fn delete_values<K: ValueQueries>(
    tx: &mut Transaction<'_, Postgres>,
    product: ProductId,
) -> Result<(), sqlx::Error> {
    query(K::DELETE_SQL)
        .bind(product.into_i64())
        .execute(&mut **tx)
        .await?;

    Ok(())
}

async fn replace_values<K: ValueQueries>(
    tx: &mut Transaction<'_, Postgres>,
    product: ProductId,
    values: &[String],
) -> Result<(), sqlx::Error> {
    delete_values::<K>(tx, product).await?;

    create_values::<K>(tx, product, values).await
}

fn decode_error(index: &str, error: impl std::error::Error + Send + Sync + 'static) -> sqlx::Error {
    sqlx::Error::ColumnDecode {
        index: index.to_string(),
        source: Box::new(error),
    }
}

impl<'r> FromRow<'r, PgRow> for Product {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        let price = u64::try_from(row.try_get::<i64, _>("price")?)
            .map_err(|e| decode_error("price", e))?;

        let stock = u32::try_from(row.try_get::<i32, _>("stock")?)
            .map_err(|e| decode_error("stock", e))?;

        let rating = u8::try_from(row.try_get::<i16, _>("rating")?)
            .map_err(|e| decode_error("rating", e))?;

        let condition = row
            .try_get::<String, _>("condition")?
            .parse::<Condition>()
            .map_err(|error| sqlx::Error::ColumnDecode {
                index: "condition".to_string(),
                source: error.into(),
            })?;

        Ok(Self {
            id: ProductId::from_i64(row.try_get("id")?),
            category_id: CategoryId::from_i64(row.try_get("category_id")?),
            seller_id: SellerId::from_i64(row.try_get("seller_id")?),
            name: row.try_get("name")?,
            price,
            stock,
            condition,
            rating,
            description: row.try_get("description")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
            deleted_at: row
                .try_get::<Option<SqlxTimestamp>, _>("deleted_at")?
                .map(SqlxTimestamp::to_jiff),
        })
    }
}

impl<'r> FromRow<'r, PgRow> for ProductSummary {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            product: Product::from_row(row)?,
            category_name: row.try_get("category_name")?,
            seller_name: row.try_get("seller_name")?,
            image: row.try_get("image")?,
        })
    }
}

impl<'r, K: ProductValueKind> FromRow<'r, PgRow> for ProductValue<K> {
    fn from_row(row: &'r PgRow) -> sqlx::Result<Self> {
        Ok(Self {
            id: TypedId::from_i64(row.try_get("id")?),
            product_id: ProductId::from_i64(row.try_get("product_id")?),
            value: row.try_get("value")?,
            created_at: row.try_get::<SqlxTimestamp, _>("created_at")?.to_jiff(),
            updated_at: row.try_get::<SqlxTimestamp, _>("updated_at")?.to_jiff(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escape_like_escapes_wildcards() {
        assert_eq!(escape_like("50%_off\\"), "50\\%\\_off\\\\");
        assert_eq!(escape_like("kaos"), "kaos");
    }

    #[test]
    fn oversized_price_cannot_be_encoded() {
        assert!(encode_price(u64::MAX).is_err());
        assert_eq!(encode_price(15_000).ok(), Some(15_000));
    }
}
