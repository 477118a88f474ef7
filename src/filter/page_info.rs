use serde::{Deserialize, Serialize};

use super::error::PaginationError;

/// Page metadata returned next to every paginated list.
///
/// Rendered by clients as e.g. "Showing 11 to 20 of 25 data".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    pub has_previous_page: bool,
    pub has_next_page: bool,
    pub current_page: i64,
    pub per_page: i64,
    pub total_data: i64,
    /// Total page count, which is also the number of the last page.
    pub last_page: i64,
    /// 1-based position of the first row on this page, 0 when the page is empty.
    pub from: i64,
    /// 1-based position of the last row on this page.
    pub to: i64,
    pub total_data_in_current_page: i64,
    pub style1: String,
    pub style2: String,
}

impl PageInfo {
    /// Computes page metadata for a page request, deriving the offset from
    /// `current_page` and `per_page`.
    pub fn compute(current_page: i64, per_page: i64, total_data: i64) -> Result<Self, PaginationError> {
        if current_page < 1 {
            return Err(PaginationError::InvalidCurrentPage(current_page));
        }
        if per_page <= 0 {
            return Err(PaginationError::InvalidPerPage(per_page));
        }
        let offset = (current_page - 1).saturating_mul(per_page);
        Self::new(current_page, per_page, offset, total_data)
    }

    /// Computes page metadata for an offset that was already used by the
    /// row query.
    ///
    /// `current_page` is clamped down to `last_page` in the metadata only;
    /// `from`, `to` and the row count keep following `offset`, so a request
    /// past the last page reports an empty page.
    pub fn new(current_page: i64, per_page: i64, offset: i64, total_data: i64) -> Result<Self, PaginationError> {
        if per_page <= 0 {
            return Err(PaginationError::InvalidPerPage(per_page));
        }
        if total_data < 0 {
            return Err(PaginationError::NegativeTotal(total_data));
        }

        let mut last_page = total_data / per_page;
        if total_data % per_page != 0 {
            last_page += 1;
        }

        let to = offset.saturating_add(per_page).min(total_data);
        let total_data_in_current_page = to - offset;
        let from = if total_data_in_current_page <= 0 { 0 } else { offset + 1 };

        let current_page = current_page.min(last_page);

        Ok(Self {
            has_previous_page: current_page > 1,
            has_next_page: current_page < last_page,
            current_page,
            per_page,
            total_data,
            last_page,
            from,
            to,
            total_data_in_current_page,
            style1: format!("Showing {} of {} data", from, total_data),
            style2: format!("Showing {} to {} of {} data", from, to, total_data),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn middle_page_of_three() {
        let info = PageInfo::compute(2, 10, 25).unwrap();
        assert_eq!(info.last_page, 3);
        assert_eq!(info.from, 11);
        assert_eq!(info.to, 20);
        assert_eq!(info.total_data_in_current_page, 10);
        assert!(info.has_previous_page);
        assert!(info.has_next_page);
        assert_eq!(info.current_page, 2);
        assert_eq!(info.style2, "Showing 11 to 20 of 25 data");
    }

    #[test]
    fn last_partial_page() {
        let info = PageInfo::compute(3, 10, 25).unwrap();
        assert_eq!(info.from, 21);
        assert_eq!(info.to, 25);
        assert_eq!(info.total_data_in_current_page, 5);
        assert!(info.has_previous_page);
        assert!(!info.has_next_page);
    }

    #[test]
    fn empty_result_set() {
        let info = PageInfo::compute(1, 50, 0).unwrap();
        assert_eq!(info.last_page, 0);
        assert_eq!(info.from, 0);
        assert_eq!(info.to, 0);
        assert_eq!(info.total_data_in_current_page, 0);
        // clamped down to last_page
        assert_eq!(info.current_page, 0);
        assert!(!info.has_previous_page);
        assert!(!info.has_next_page);
        assert_eq!(info.style1, "Showing 0 of 0 data");
    }

    #[test]
    fn last_page_is_ceiling_division() {
        for total in 0..=120 {
            for per_page in 1..=17 {
                let info = PageInfo::compute(1, per_page, total).unwrap();
                let expected = (total + per_page - 1) / per_page;
                assert_eq!(info.last_page, expected, "total={} per_page={}", total, per_page);
            }
        }
    }

    #[test]
    fn rows_in_page_never_exceed_per_page() {
        for total in 0..=60 {
            for per_page in 1..=9 {
                for page in 1..=8 {
                    let info = PageInfo::compute(page, per_page, total).unwrap();
                    let offset = (page - 1) * per_page;
                    assert_eq!(info.to - offset, info.total_data_in_current_page);
                    assert!(info.total_data_in_current_page <= per_page);
                }
            }
        }
    }

    #[test]
    fn page_past_the_end_clamps_metadata_only() {
        let info = PageInfo::compute(5, 10, 25).unwrap();
        assert_eq!(info.current_page, 3);
        assert_eq!(info.last_page, 3);
        assert!(!info.has_next_page);
        assert!(info.has_previous_page);
        // from/to still follow the requested offset (40)
        assert_eq!(info.from, 0);
        assert_eq!(info.to, 25);
        assert_eq!(info.total_data_in_current_page, -15);
    }

    #[test]
    fn exact_multiple_has_no_extra_page() {
        let info = PageInfo::compute(2, 10, 20).unwrap();
        assert_eq!(info.last_page, 2);
        assert!(!info.has_next_page);
        assert_eq!(info.to, 20);
    }

    #[test]
    fn compute_is_pure() {
        assert_eq!(PageInfo::compute(4, 7, 99).unwrap(), PageInfo::compute(4, 7, 99).unwrap());
    }

    #[test]
    fn rejects_invalid_input() {
        assert_eq!(PageInfo::compute(1, 0, 10).unwrap_err(), PaginationError::InvalidPerPage(0));
        assert_eq!(PageInfo::compute(1, -3, 10).unwrap_err(), PaginationError::InvalidPerPage(-3));
        assert_eq!(PageInfo::compute(0, 10, 10).unwrap_err(), PaginationError::InvalidCurrentPage(0));
        assert_eq!(PageInfo::compute(1, 10, -1).unwrap_err(), PaginationError::NegativeTotal(-1));
        assert_eq!(PageInfo::new(1, 0, 0, 10).unwrap_err(), PaginationError::InvalidPerPage(0));
    }
}
