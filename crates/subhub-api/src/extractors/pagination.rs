//! Pagination extractor
//!
//! Extracts page-number pagination parameters from query strings.

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use serde::Deserialize;
use subhub_core::traits::PageRequest;

use crate::response::ApiError;

/// Default page size
const DEFAULT_PAGE_SIZE: i64 = 10;
/// Maximum page size
const MAX_PAGE_SIZE: i64 = 100;

/// Raw pagination query parameters
#[derive(Debug, Default, Deserialize)]
pub struct PageParams {
    #[serde(default)]
    pub page: Option<i64>,
    #[serde(default)]
    pub page_size: Option<i64>,
}

/// Validated page request (`page` from 1, `page_size` in 1..=100)
#[derive(Debug, Clone, Copy)]
pub struct PageQuery(pub PageRequest);

impl PageQuery {
    /// Page request with a fixed size, ignoring `page_size`
    pub fn with_page_size(self, page_size: i64) -> PageRequest {
        PageRequest::new(self.0.page, page_size)
    }
}

impl TryFrom<PageParams> for PageQuery {
    type Error = ApiError;

    fn try_from(params: PageParams) -> Result<Self, Self::Error> {
        let page = params.page.unwrap_or(1);
        if page < 1 {
            return Err(ApiError::invalid_query("Invalid page."));
        }

        let page_size = params
            .page_size
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE);

        Ok(PageQuery(PageRequest::new(page, page_size)))
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for PageQuery
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<PageParams>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_query(e.body_text()))?;

        PageQuery::try_from(params)
    }
}
