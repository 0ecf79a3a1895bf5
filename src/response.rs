use serde::Serialize;
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, ToSchema, Clone)]
pub struct Meta {
    pub page: Option<i64>,
    pub per_page: Option<i64>,
    pub total: Option<i64>,
}

impl Meta {
    pub fn new(page: i64, per_page: i64, total: i64) -> Self {
        Self {
            page: Some(page),
            per_page: Some(per_page),
            total: Some(total),
        }
    }

    /// A complete, unpaged listing: only the total is reported.
    pub fn unpaged(total: i64) -> Self {
        Self {
            page: None,
            per_page: None,
            total: Some(total),
        }
    }

    pub fn empty() -> Self {
        Self {
            page: None,
            per_page: None,
            total: None,
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    pub data: Option<T>,
    pub meta: Option<Meta>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn success(message: impl Into<String>, data: T, meta: Option<Meta>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            meta,
        }
    }

    pub fn failure(message: impl Into<String>, data: Option<T>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data,
            meta: Some(Meta::empty()),
        }
    }
}

/// Payload returned by delete endpoints.
#[derive(Debug, Serialize, ToSchema)]
pub struct Deleted {
    pub id: Uuid,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unpaged_reports_only_total() {
        let meta = Meta::unpaged(0);
        assert_eq!(meta.total, Some(0));
        assert_eq!(meta.page, None);
        assert_eq!(meta.per_page, None);
    }

    #[test]
    fn paged_meta_keeps_window() {
        let meta = Meta::new(2, 20, 45);
        assert_eq!((meta.page, meta.per_page, meta.total), (Some(2), Some(20), Some(45)));
    }
}
