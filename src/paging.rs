use mongodb::bson::{doc, Document};
use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum PagingError {
    #[error("Invalid page: {0}")]
    InvalidPage(String),

    #[error("Invalid limit: {0}")]
    InvalidLimit(String),
}

/// Validated pagination window. `skip` is page * limit, matching the
/// page-numbered listings the clients request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Pagination {
    pub skip: u64,
    pub limit: i64,
}

const DEFAULT_PAGE: i64 = 0;
const DEFAULT_LIMIT: i64 = 10;

impl Pagination {
    /// Parse raw query-string values. Page must be a non-negative integer
    /// and limit a positive integer; anything else is rejected before any
    /// store call is made.
    pub fn from_params(page: Option<&str>, limit: Option<&str>) -> Result<Self, PagingError> {
        let page = match page {
            None => DEFAULT_PAGE,
            Some(raw) => raw
                .parse::<i64>()
                .ok()
                .filter(|p| *p >= 0)
                .ok_or_else(|| PagingError::InvalidPage(raw.to_string()))?,
        };

        let limit = match limit {
            None => DEFAULT_LIMIT,
            Some(raw) => raw
                .parse::<i64>()
                .ok()
                .filter(|l| *l > 0)
                .ok_or_else(|| PagingError::InvalidLimit(raw.to_string()))?,
        };

        Ok(Self {
            skip: (page * limit) as u64,
            limit,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SortDirection {
    Asc,
    Desc,
}

/// Parse the `sortBy` query value for the price sort. Absent means
/// unsorted; a descending spelling sorts descending, anything else
/// ascending.
pub fn parse_price_sort(sort_by: Option<&str>) -> Option<SortDirection> {
    let raw = sort_by?.trim();
    if raw.is_empty() {
        return None;
    }
    if raw.eq_ignore_ascii_case("desc") || raw.eq_ignore_ascii_case("price_desc") {
        Some(SortDirection::Desc)
    } else {
        Some(SortDirection::Asc)
    }
}

pub fn price_sort_doc(direction: SortDirection) -> Document {
    match direction {
        SortDirection::Asc => doc! { "price": 1 },
        SortDirection::Desc => doc! { "price": -1 },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_when_absent() {
        let p = Pagination::from_params(None, None).unwrap();
        assert_eq!(p.skip, 0);
        assert_eq!(p.limit, 10);
    }

    #[test]
    fn test_skip_is_page_times_limit() {
        let p = Pagination::from_params(Some("3"), Some("6")).unwrap();
        assert_eq!(p.skip, 18);
        assert_eq!(p.limit, 6);
    }

    #[test]
    fn test_negative_page_rejected() {
        assert_eq!(
            Pagination::from_params(Some("-1"), Some("5")),
            Err(PagingError::InvalidPage("-1".to_string()))
        );
    }

    #[test]
    fn test_zero_limit_rejected() {
        assert_eq!(
            Pagination::from_params(Some("0"), Some("0")),
            Err(PagingError::InvalidLimit("0".to_string()))
        );
    }

    #[test]
    fn test_non_numeric_rejected() {
        assert!(Pagination::from_params(Some("abc"), None).is_err());
        assert!(Pagination::from_params(None, Some("ten")).is_err());
    }

    #[test]
    fn test_price_sort_parsing() {
        assert_eq!(parse_price_sort(None), None);
        assert_eq!(parse_price_sort(Some("")), None);
        assert_eq!(parse_price_sort(Some("asc")), Some(SortDirection::Asc));
        assert_eq!(parse_price_sort(Some("DESC")), Some(SortDirection::Desc));
        assert_eq!(
            parse_price_sort(Some("price_desc")),
            Some(SortDirection::Desc)
        );
        // lenient like the rest of the query surface
        assert_eq!(parse_price_sort(Some("anything")), Some(SortDirection::Asc));
    }

    #[test]
    fn test_price_sort_docs() {
        assert_eq!(price_sort_doc(SortDirection::Asc), doc! { "price": 1 });
        assert_eq!(price_sort_doc(SortDirection::Desc), doc! { "price": -1 });
    }
}
