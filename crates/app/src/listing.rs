//! Pagination and sorting for list queries.

/// Page used when the request does not supply a usable one.
pub const DEFAULT_PAGE: u64 = 1;

/// Page size used when the request does not supply a usable one.
pub const DEFAULT_LIMIT: u64 = 10;

/// Largest page size a client may ask for.
pub const MAX_LIMIT: u64 = 100;

/// A one-based page number and a page size.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    page: u64,
    limit: u64,
}

impl Pagination {
    /// Build a pagination, clamping the page to at least 1 and the limit to
    /// `1..=MAX_LIMIT`.
    #[must_use]
    pub fn new(page: u64, limit: u64) -> Self {
        Self {
            page: page.max(1),
            limit: limit.clamp(1, MAX_LIMIT),
        }
    }

    /// Build a pagination from raw query-string values. Missing or
    /// non-numeric values fall back to the defaults.
    #[must_use]
    pub fn from_params(page: Option<&str>, limit: Option<&str>) -> Self {
        let page = page
            .and_then(|value| value.trim().parse::<u64>().ok())
            .unwrap_or(DEFAULT_PAGE);

        let limit = limit
            .and_then(|value| value.trim().parse::<u64>().ok())
            .unwrap_or(DEFAULT_LIMIT);

        Self::new(page, limit)
    }

    #[must_use]
    pub fn page(&self) -> u64 {
        self.page
    }

    #[must_use]
    pub fn limit(&self) -> u64 {
        self.limit
    }

    /// Number of rows skipped before this page.
    #[must_use]
    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.limit)
    }

    /// Number of pages needed to show `total` rows.
    #[must_use]
    pub fn total_pages(&self, total: u64) -> u64 {
        total.div_ceil(self.limit)
    }

    pub(crate) fn sql_limit(&self) -> i64 {
        i64::try_from(self.limit).unwrap_or(i64::MAX)
    }

    pub(crate) fn sql_offset(&self) -> i64 {
        i64::try_from(self.offset()).unwrap_or(i64::MAX)
    }
}

impl Default for Pagination {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE, DEFAULT_LIMIT)
    }
}

/// Sort direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    Asc,
    #[default]
    Desc,
}

impl SortDirection {
    /// Parse `asc`/`desc` (case-insensitive); anything else is the default.
    #[must_use]
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some(value) if value.eq_ignore_ascii_case("asc") => Self::Asc,
            _ => Self::Desc,
        }
    }

    pub(crate) fn as_sql(self) -> &'static str {
        match self {
            Self::Asc => "ASC",
            Self::Desc => "DESC",
        }
    }
}

/// A sort field paired with a direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Sort<F> {
    pub field: F,
    pub direction: SortDirection,
}

/// Filter, sort and pagination for a list query.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ListQuery<F, S> {
    pub filter: F,
    pub sort: Sort<S>,
    pub pagination: Pagination,
}

/// One page of results and the total number of matching rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub total: u64,
}

impl<T> Page<T> {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_page_of_ten_skips_the_first_ten_rows() {
        let pagination = Pagination::new(2, 10);

        assert_eq!(pagination.offset(), 10);
        assert_eq!(pagination.limit(), 10);
    }

    #[test]
    fn total_pages_rounds_up() {
        let pagination = Pagination::new(1, 10);

        assert_eq!(pagination.total_pages(25), 3);
        assert_eq!(pagination.total_pages(20), 2);
        assert_eq!(pagination.total_pages(1), 1);
        assert_eq!(pagination.total_pages(0), 0);
    }

    #[test]
    fn invalid_params_fall_back_to_defaults() {
        let pagination = Pagination::from_params(Some("abc"), None);

        assert_eq!(pagination.page(), DEFAULT_PAGE);
        assert_eq!(pagination.limit(), DEFAULT_LIMIT);
    }

    #[test]
    fn zero_values_are_clamped() {
        let pagination = Pagination::from_params(Some("0"), Some("0"));

        assert_eq!(pagination.page(), 1);
        assert_eq!(pagination.limit(), 1);
    }

    #[test]
    fn oversized_limit_is_clamped() {
        assert_eq!(Pagination::new(1, 10_000).limit(), MAX_LIMIT);
    }

    #[test]
    fn huge_page_does_not_overflow() {
        let pagination = Pagination::new(u64::MAX, MAX_LIMIT);

        assert_eq!(pagination.sql_offset(), i64::MAX);
    }

    #[test]
    fn sort_direction_parsing() {
        assert_eq!(SortDirection::parse(Some("ASC")), SortDirection::Asc);
        assert_eq!(SortDirection::parse(Some("desc")), SortDirection::Desc);
        assert_eq!(SortDirection::parse(Some("sideways")), SortDirection::Desc);
        assert_eq!(SortDirection::parse(None), SortDirection::Desc);
    }
}
