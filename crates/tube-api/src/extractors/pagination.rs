//! Pagination extractor
//!
//! Extracts `page`/`limit` query parameters into a validated `PageRequest`.
//! The clamp (page >= 1, limit in 1..=50, defaults 1/10) is applied uniformly
//! to every paginated endpoint.

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::Deserialize;
use tube_core::pagination::PageRequest;

use crate::response::ApiError;

/// Raw pagination query parameters
#[derive(Debug, Deserialize)]
pub struct PageParams {
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub limit: Option<u32>,
}

/// Validated pagination extractor
#[derive(Debug, Clone, Copy)]
pub struct PageQuery(pub PageRequest);

#[async_trait]
impl<S> FromRequestParts<S> for PageQuery
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<PageParams>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_query(e.to_string()))?;

        Ok(PageQuery(PageRequest::from_raw(params.page, params.limit)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_applied() {
        let request = PageRequest::from_raw(None, None);
        assert_eq!(request.page(), 1);
        assert_eq!(request.per_page(), 10);
    }

    #[test]
    fn test_limit_clamped() {
        let request = PageRequest::from_raw(Some(2), Some(500));
        assert_eq!(request.per_page(), 50);
        assert_eq!(request.offset(), 50);
    }
}
