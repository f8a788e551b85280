//! Pagination types for list endpoints.
//!
//! Query parameters follow the usual `page`/`size`/`sort` convention:
//! `page` is zero-based and `sort` may be repeated, each value being
//! `property[,property...][,asc|desc]`. Negative or unparseable `page`
//! resolves to the first page; `size` below 1 or unparseable resolves to
//! the default size.

use serde::Deserialize;
use utoipa::IntoParams;

use crate::config::{DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use crate::errors::{AppError, AppResult};

/// Raw pagination query parameters
#[derive(Debug, Clone, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PaginationParams {
    /// Zero-based page index
    #[param(value_type = Option<i64>, example = 0)]
    pub page: Option<String>,
    /// Page size
    #[param(value_type = Option<i64>, example = 20)]
    pub size: Option<String>,
    /// Sort criteria, e.g. `name,desc`
    #[serde(default)]
    #[param(example = "name,asc")]
    pub sort: Vec<String>,
}

/// Sortable user properties
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortProperty {
    Id,
    Name,
    Email,
    BirthDate,
}

impl SortProperty {
    fn parse(raw: &str) -> AppResult<Self> {
        match raw {
            "id" => Ok(SortProperty::Id),
            "name" => Ok(SortProperty::Name),
            "email" => Ok(SortProperty::Email),
            "birthDate" => Ok(SortProperty::BirthDate),
            other => Err(AppError::validation(format!(
                "No property '{}' found for type 'User'",
                other
            ))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Asc,
    Desc,
}

impl Direction {
    fn parse(raw: &str) -> Option<Self> {
        if raw.eq_ignore_ascii_case("asc") {
            Some(Direction::Asc)
        } else if raw.eq_ignore_ascii_case("desc") {
            Some(Direction::Desc)
        } else {
            None
        }
    }
}

/// A single ordering criterion
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOrder {
    pub property: SortProperty,
    pub direction: Direction,
}

impl SortOrder {
    pub fn asc(property: SortProperty) -> Self {
        Self {
            property,
            direction: Direction::Asc,
        }
    }

    pub fn desc(property: SortProperty) -> Self {
        Self {
            property,
            direction: Direction::Desc,
        }
    }
}

/// Resolved page specification handed to the persistence gateway
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u64,
    pub size: u64,
    pub sort: Vec<SortOrder>,
}

impl PageRequest {
    /// Unsorted page; `size` is clamped to `1..=MAX_PAGE_SIZE`.
    pub fn of(page: u64, size: u64) -> Self {
        let size = if size == 0 {
            DEFAULT_PAGE_SIZE
        } else {
            size.min(MAX_PAGE_SIZE)
        };

        Self {
            page,
            size,
            sort: Vec::new(),
        }
    }

    pub fn with_sort(mut self, sort: Vec<SortOrder>) -> Self {
        self.sort = sort;
        self
    }

    /// Calculate offset for database query
    pub fn offset(&self) -> u64 {
        self.page.saturating_mul(self.size)
    }

    pub fn limit(&self) -> u64 {
        self.size
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        PageRequest::of(DEFAULT_PAGE_NUMBER, DEFAULT_PAGE_SIZE)
    }
}

impl TryFrom<PaginationParams> for PageRequest {
    type Error = AppError;

    fn try_from(params: PaginationParams) -> AppResult<Self> {
        let mut sort = Vec::new();
        for criterion in &params.sort {
            sort.extend(parse_sort(criterion)?);
        }

        Ok(PageRequest::of(
            positive(params.page.as_deref()).unwrap_or(DEFAULT_PAGE_NUMBER),
            positive(params.size.as_deref()).unwrap_or(DEFAULT_PAGE_SIZE),
        )
        .with_sort(sort))
    }
}

/// Strictly positive integer value of a query parameter, if any.
fn positive(raw: Option<&str>) -> Option<u64> {
    raw.and_then(|v| v.trim().parse::<i64>().ok())
        .filter(|v| *v > 0)
        .and_then(|v| u64::try_from(v).ok())
}

/// Parse one `sort` value. A trailing `asc`/`desc` applies to every
/// property listed before it.
fn parse_sort(raw: &str) -> AppResult<Vec<SortOrder>> {
    let mut tokens: Vec<&str> = raw
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .collect();

    let direction = match tokens.last().and_then(|t| Direction::parse(t)) {
        Some(direction) => {
            tokens.pop();
            direction
        }
        None => Direction::Asc,
    };

    tokens
        .into_iter()
        .map(|t| {
            SortProperty::parse(t).map(|property| SortOrder {
                property,
                direction,
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(page: Option<&str>, size: Option<&str>, sort: &[&str]) -> PaginationParams {
        PaginationParams {
            page: page.map(str::to_string),
            size: size.map(str::to_string),
            sort: sort.iter().map(|s| s.to_string()).collect(),
        }
    }

    #[test]
    fn defaults_apply_when_params_missing() {
        let request = PageRequest::try_from(PaginationParams::default()).unwrap();
        assert_eq!(request.page, 0);
        assert_eq!(request.size, DEFAULT_PAGE_SIZE);
        assert!(request.sort.is_empty());
    }

    #[test]
    fn size_is_clamped() {
        assert_eq!(PageRequest::of(0, 0).size, DEFAULT_PAGE_SIZE);
        assert_eq!(PageRequest::of(0, MAX_PAGE_SIZE + 1).size, MAX_PAGE_SIZE);
        assert_eq!(PageRequest::of(0, 2).size, 2);
    }

    #[test]
    fn negative_or_garbage_page_resolves_to_first_page() {
        for raw in ["-1", "abc", ""] {
            let request = PageRequest::try_from(params(Some(raw), Some("2"), &[])).unwrap();
            assert_eq!(request.page, 0, "page={:?}", raw);
            assert_eq!(request.size, 2);
        }
    }

    #[test]
    fn size_below_one_or_garbage_resolves_to_default() {
        for raw in ["-5", "0", "ten", "2.5"] {
            let request = PageRequest::try_from(params(Some("1"), Some(raw), &[])).unwrap();
            assert_eq!(request.size, DEFAULT_PAGE_SIZE, "size={:?}", raw);
            assert_eq!(request.page, 1);
        }

        let request = PageRequest::try_from(params(None, Some("5000"), &[])).unwrap();
        assert_eq!(request.size, MAX_PAGE_SIZE);
    }

    #[test]
    fn offset_uses_zero_based_page() {
        assert_eq!(PageRequest::of(0, 2).offset(), 0);
        assert_eq!(PageRequest::of(3, 10).offset(), 30);
    }

    #[test]
    fn sort_direction_defaults_to_ascending() {
        let request = PageRequest::try_from(params(None, None, &["name"])).unwrap();
        assert_eq!(request.sort, vec![SortOrder::asc(SortProperty::Name)]);
    }

    #[test]
    fn trailing_direction_applies_to_all_listed_properties() {
        let request =
            PageRequest::try_from(params(Some("1"), Some("5"), &["name,email,DESC", "birthDate"]))
                .unwrap();

        assert_eq!(
            request.sort,
            vec![
                SortOrder::desc(SortProperty::Name),
                SortOrder::desc(SortProperty::Email),
                SortOrder::asc(SortProperty::BirthDate),
            ]
        );
        assert_eq!(request.page, 1);
        assert_eq!(request.size, 5);
    }

    #[test]
    fn unknown_sort_property_is_a_validation_error() {
        let err = PageRequest::try_from(params(None, None, &["password,asc"])).unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(err.to_string(), "No property 'password' found for type 'User'");
    }
}
