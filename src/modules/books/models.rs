use serde::{Deserialize, Serialize};
use serde_with::{serde_as, NoneAsEmptyString};
use utoipa::{IntoParams, ToSchema};

/// A book as returned by the API.
///
/// The book schema has not been settled yet, so the representation is carried
/// as free-form JSON.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = Object)]
pub struct Book(pub serde_json::Value);

/// Request body for creating or updating a book. Any JSON value is accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
#[schema(value_type = Object)]
pub struct BookRequest(pub serde_json::Value);

/// Pagination parameters accepted by the list endpoint.
///
/// Values are taken as-is, negative numbers included. An absent or empty
/// parameter (`?page=`) falls back to its default.
#[serde_as]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct Pagination {
    /// Page number (0-based)
    #[serde(default)]
    #[serde_as(as = "NoneAsEmptyString")]
    #[param(default = 0)]
    page: Option<i32>,
    /// Number of items per page
    #[serde(default)]
    #[serde_as(as = "NoneAsEmptyString")]
    #[param(default = 10)]
    size: Option<i32>,
}

impl Pagination {
    pub const DEFAULT_PAGE: i32 = 0;
    pub const DEFAULT_SIZE: i32 = 10;

    pub const fn new(page: i32, size: i32) -> Self {
        Self {
            page: Some(page),
            size: Some(size),
        }
    }

    pub fn page(&self) -> i32 {
        self.page.unwrap_or(Self::DEFAULT_PAGE)
    }

    pub fn size(&self) -> i32 {
        self.size.unwrap_or(Self::DEFAULT_SIZE)
    }
}
