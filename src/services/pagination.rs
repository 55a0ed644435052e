//! Page-size resolution shared by every search.

use super::error::{ServiceError, ServiceResult};

/// Largest page the PSA API serves in one query.
pub const MAX_PAGE_SIZE: u32 = 500;

/// Caller sentinel requesting every matching record.
pub const UNLIMITED: i64 = -1;

/// Effective paging for one search call.
///
/// `page_size` is `None` exactly when `unlimited` is set; otherwise it is in
/// `1..=MAX_PAGE_SIZE`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationConfig {
    pub page_size: Option<u32>,
    pub unlimited: bool,
}

/// Resolve a requested page size against an entity default.
///
/// Absent or `0` uses the default, `-1` is unlimited, positive values are
/// clamped to [`MAX_PAGE_SIZE`]. Any other negative is rejected.
pub fn resolve(page_size: Option<i64>, default_page_size: u32) -> ServiceResult<PaginationConfig> {
    match page_size {
        None | Some(0) => Ok(PaginationConfig {
            page_size: Some(default_page_size.clamp(1, MAX_PAGE_SIZE)),
            unlimited: false,
        }),
        Some(UNLIMITED) => Ok(PaginationConfig {
            page_size: None,
            unlimited: true,
        }),
        Some(n) if n > 0 => Ok(PaginationConfig {
            page_size: Some(n.min(i64::from(MAX_PAGE_SIZE)) as u32),
            unlimited: false,
        }),
        Some(value) => Err(ServiceError::InvalidPageSize { value }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_absent_or_zero_uses_default() {
        for requested in [None, Some(0)] {
            assert_eq!(
                resolve(requested, 25).unwrap(),
                PaginationConfig {
                    page_size: Some(25),
                    unlimited: false
                }
            );
        }
    }

    #[test]
    fn test_positive_is_kept_below_ceiling() {
        assert_eq!(resolve(Some(40), 25).unwrap().page_size, Some(40));
        assert_eq!(resolve(Some(500), 25).unwrap().page_size, Some(500));
    }

    #[test]
    fn test_positive_is_clamped_to_ceiling() {
        let config = resolve(Some(1000), 25).unwrap();
        assert_eq!(config.page_size, Some(500));
        assert!(!config.unlimited);
    }

    #[test]
    fn test_minus_one_is_unlimited_regardless_of_default() {
        for default in [1, 25, 50, 500] {
            assert_eq!(
                resolve(Some(-1), default).unwrap(),
                PaginationConfig {
                    page_size: None,
                    unlimited: true
                }
            );
        }
    }

    #[test]
    fn test_other_negatives_are_rejected() {
        for value in [-7, -2, i64::MIN] {
            let err = resolve(Some(value), 25).unwrap_err();
            assert!(matches!(err, ServiceError::InvalidPageSize { value: v } if v == value));
        }
    }
}
