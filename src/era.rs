//! Linear conversions between Anno Domini, Chula Sakaraj and Buddhist Era
//! year numbers.
//!
//! These are plain offsets. They say nothing about *when* a Khmer year starts;
//! use [`crate::KhmerCalendar`] for the year actually in force on a date.

use crate::consts::{AD_BE_OFFSET, AD_JS_OFFSET, BE_JS_OFFSET};

/// Chula Sakaraj year numbered from Anno Domini year `ad`.
#[inline]
pub const fn ad_to_js(ad: i64) -> i64 {
    ad - AD_JS_OFFSET
}

/// Anno Domini year numbered from Chula Sakaraj year `js`.
#[inline]
pub const fn js_to_ad(js: i64) -> i64 {
    js + AD_JS_OFFSET
}

/// Buddhist Era year numbered from Anno Domini year `ad`.
#[inline]
pub const fn ad_to_be(ad: i64) -> i64 {
    ad + AD_BE_OFFSET
}

/// Anno Domini year numbered from Buddhist Era year `be`.
#[inline]
pub const fn be_to_ad(be: i64) -> i64 {
    be - AD_BE_OFFSET
}

/// Chula Sakaraj year numbered from Buddhist Era year `be`.
#[inline]
pub const fn be_to_js(be: i64) -> i64 {
    be - BE_JS_OFFSET
}

/// Buddhist Era year numbered from Chula Sakaraj year `js`.
#[inline]
pub const fn js_to_be(js: i64) -> i64 {
    js + BE_JS_OFFSET
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_known_offsets() {
        assert_eq!(ad_to_js(2024), 1386);
        assert_eq!(ad_to_be(2024), 2568);
        assert_eq!(be_to_js(2568), 1386);
        assert_eq!(js_to_be(1261), 2443);
        assert_eq!(be_to_ad(2443), 1899);
        assert_eq!(js_to_ad(1386), 2024);
    }

    #[test]
    fn test_offsets_agree() {
        // AD -> BE -> JS must equal AD -> JS
        for ad in [-1000, 0, 638, 1900, 2024] {
            assert_eq!(be_to_js(ad_to_be(ad)), ad_to_js(ad));
        }
    }

    proptest! {
        #[test]
        fn prop_offsets_are_inverse(y in -1_000_000i64..1_000_000) {
            prop_assert_eq!(be_to_ad(ad_to_be(y)), y);
            prop_assert_eq!(js_to_ad(ad_to_js(y)), y);
            prop_assert_eq!(js_to_be(be_to_js(y)), y);
        }
    }
}
