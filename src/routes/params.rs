use serde::Deserialize;
use utoipa::ToSchema;

use crate::models::OrderStatus;

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct Pagination {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}

impl Pagination {
    pub fn normalize(&self) -> (i64, i64, i64) {
        let page = self.page.unwrap_or(1).max(1);
        let per_page = self.per_page.unwrap_or(20).clamp(1, 100);
        let offset = (page - 1) * per_page;
        (page, per_page, offset)
    }

    /// The page window, or `None` when the caller asked for neither a page
    /// nor a page size.
    pub fn requested(&self) -> Option<(i64, i64, i64)> {
        if self.page.is_none() && self.per_page.is_none() {
            return None;
        }
        Some(self.normalize())
    }
}

#[derive(Debug, Clone, Copy, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum ProductSortBy {
    CreatedAt,
    Price,
    Name,
}

// Query strings are not flattened: serde_urlencoded hands flattened fields
// over as strings, which breaks the numeric ones.
#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct ProductQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    /// Matched against name and description, case-insensitive.
    pub q: Option<String>,
    pub category: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub sort_by: Option<ProductSortBy>,
    pub sort_order: Option<SortOrder>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct OrderListQuery {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub status: Option<OrderStatus>,
    pub sort_order: Option<SortOrder>,
}

impl ProductQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination {
            page: self.page,
            per_page: self.per_page,
        }
    }
}

impl OrderListQuery {
    pub fn pagination(&self) -> Pagination {
        Pagination {
            page: self.page,
            per_page: self.per_page,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pagination_defaults_and_clamps() {
        assert_eq!(Pagination::default().normalize(), (1, 20, 0));

        let p = Pagination {
            page: Some(3),
            per_page: Some(10),
        };
        assert_eq!(p.normalize(), (3, 10, 20));

        let wild = Pagination {
            page: Some(-4),
            per_page: Some(10_000),
        };
        assert_eq!(wild.normalize(), (1, 100, 0));
    }

    #[test]
    fn window_only_when_asked_for() {
        assert_eq!(Pagination::default().requested(), None);

        let sized = Pagination {
            page: None,
            per_page: Some(5),
        };
        assert_eq!(sized.requested(), Some((1, 5, 0)));

        let query = ProductQuery {
            page: Some(2),
            ..ProductQuery::default()
        };
        assert_eq!(query.pagination().requested(), Some((2, 20, 20)));
    }
}
