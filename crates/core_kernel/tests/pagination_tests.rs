//! Property tests for page arithmetic

use core_kernel::Pagination;
use proptest::prelude::*;

proptest! {
    #[test]
    fn pages_cover_every_row(total in 0u64..10_000, limit in 1u32..=100) {
        let page = Pagination::new(Some(1), Some(limit), 100);
        let pages = page.total_pages(total);

        prop_assert!(pages * u64::from(limit) >= total);
        if total > 0 {
            prop_assert!((pages - 1) * u64::from(limit) < total);
        } else {
            prop_assert_eq!(pages, 0);
        }
    }

    #[test]
    fn offset_advances_by_limit(page in 1u32..1_000, limit in 1u32..=100) {
        let current = Pagination::new(Some(page), Some(limit), 100);
        let next = Pagination::new(Some(page + 1), Some(limit), 100);

        prop_assert_eq!(next.offset() - current.offset(), u64::from(limit));
    }

    #[test]
    fn limit_never_exceeds_max(limit in any::<u32>(), max in 1u32..500) {
        let page = Pagination::new(None, Some(limit), max);
        prop_assert!(page.limit() >= 1 && page.limit() <= max);
    }
}
