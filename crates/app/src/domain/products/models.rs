//! Product Models

use std::{fmt, str::FromStr};

use jiff::Timestamp;

use crate::{
    domain::{categories::models::CategoryId, sellers::models::SellerId},
    ids::TypedId,
    listing::ListQuery,
};

/// Product ID
pub type ProductId = TypedId<Product>;

/// Item condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Condition {
    New,
    Used,
}

impl Condition {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::New => "new",
            Self::Used => "used",
        }
    }
}

impl fmt::Display for Condition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Condition {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "new" => Ok(Self::New),
            "used" => Ok(Self::Used),
            other => Err(format!("unknown condition: {other}")),
        }
    }
}

/// Product Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub id: ProductId,
    pub category_id: CategoryId,
    pub seller_id: SellerId,
    pub name: String,
    pub price: u64,
    pub stock: u32,
    pub condition: Condition,
    pub rating: u8,
    pub description: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
    pub deleted_at: Option<Timestamp>,
}

/// A product row as shown in listings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductSummary {
    pub product: Product,
    pub category_name: String,
    pub seller_name: String,

    /// URL of the first image, if the product has any.
    pub image: Option<String>,
}

/// A product with its display names and child collections.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductDetail {
    pub product: Product,
    pub category_name: String,
    pub seller_name: String,
    pub images: Vec<ProductImage>,
    pub sizes: Vec<ProductSize>,
    pub colors: Vec<ProductColor>,
}

/// Kind of single-value child row owned by a product.
pub trait ProductValueKind: fmt::Debug + Send + Sync + Unpin + 'static {}

/// Image marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Image;

/// Size marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Size;

/// Color marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color;

impl ProductValueKind for Image {}
impl ProductValueKind for Size {}
impl ProductValueKind for Color {}

/// A child row carrying one value: an image URL, a size or a color.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductValue<K: ProductValueKind> {
    pub id: TypedId<K>,
    pub product_id: ProductId,
    pub value: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

pub type ProductImage = ProductValue<Image>;
pub type ProductSize = ProductValue<Size>;
pub type ProductColor = ProductValue<Color>;

/// New Product Model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub category_id: CategoryId,
    pub seller_id: SellerId,
    pub name: String,
    pub price: u64,
    pub stock: u32,
    pub condition: Condition,
    pub rating: u8,
    pub description: String,
    pub images: Vec<String>,
    pub sizes: Vec<String>,
    pub colors: Vec<String>,
}

/// Product Update Model
///
/// `None` leaves a field unchanged. A supplied child list replaces the
/// existing one.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProductUpdate {
    pub category_id: Option<CategoryId>,
    pub seller_id: Option<SellerId>,
    pub name: Option<String>,
    pub price: Option<u64>,
    pub stock: Option<u32>,
    pub condition: Option<Condition>,
    pub rating: Option<u8>,
    pub description: Option<String>,
    pub images: Option<Vec<String>>,
    pub sizes: Option<Vec<String>>,
    pub colors: Option<Vec<String>>,
}

/// Product listing filter.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProductFilter {
    /// Case-insensitive substring of the name.
    pub search: Option<String>,
    pub category: Option<CategoryId>,
    pub seller: Option<SellerId>,
    pub condition: Option<Condition>,
    pub color: Option<String>,
    pub size: Option<String>,
}

/// Product listing sort field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProductSortField {
    #[default]
    CreatedAt,
    UpdatedAt,
    Name,
    Price,
    Rating,
    Stock,
}

impl ProductSortField {
    /// Parse a query-string value; unknown values fall back to `created_at`.
    #[must_use]
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("updated_at") => Self::UpdatedAt,
            Some("name") => Self::Name,
            Some("price") => Self::Price,
            Some("rating") => Self::Rating,
            Some("stock") => Self::Stock,
            _ => Self::CreatedAt,
        }
    }

    pub(crate) const fn column(self) -> &'static str {
        match self {
            Self::CreatedAt => "p.created_at",
            Self::UpdatedAt => "p.updated_at",
            Self::Name => "p.name",
            Self::Price => "p.price",
            Self::Rating => "p.rating",
            Self::Stock => "p.stock",
        }
    }
}

/// Product listing query.
pub type ProductListQuery = ListQuery<ProductFilter, ProductSortField>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sort_field_parses_known_columns() {
        assert_eq!(ProductSortField::parse(Some("price")), ProductSortField::Price);
        assert_eq!(ProductSortField::parse(Some(" name ")), ProductSortField::Name);
    }

    #[test]
    fn unknown_sort_field_falls_back_to_created_at() {
        assert_eq!(
            ProductSortField::parse(Some("id; DROP TABLE products")),
            ProductSortField::CreatedAt
        );
        assert_eq!(ProductSortField::parse(None), ProductSortField::CreatedAt);
    }

    #[test]
    fn condition_round_trips_through_text() {
        assert_eq!("used".parse::<Condition>(), Ok(Condition::Used));
        assert_eq!(Condition::New.to_string(), "new");
        assert!("mint".parse::<Condition>().is_err());
    }
}
