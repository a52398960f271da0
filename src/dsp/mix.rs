//! Saturating summing primitive.

/*
Saturating Sum
==============

Adding two signals can leave the [-1.0, +1.0] range. Instead of letting the
sum run off, each addition hard-clips:

    s = a + b
    s ≥  1.0  →  0.99999999
    s < -1.0  → -1.0

The ceiling is deliberately just under unity. Fixed-point hardware can
represent -1.0 but not +1.0, and this clamp keeps the same asymmetric range
so downstream integer conversion never overflows. -1.0 itself is in range
and passes through untouched.

The operation is stateless: the result depends only on the two operands.
*/

/// Largest value a saturating sum can produce.
pub const SUM_CEILING: f64 = 0.999_999_99;
/// Smallest value a saturating sum can produce.
pub const SUM_FLOOR: f64 = -1.0;

/// Add two samples, clipping to [`SUM_FLOOR`, `SUM_CEILING`].
#[inline]
pub fn sum(a: f64, b: f64) -> f64 {
    let s = a + b;
    if s >= 1.0 {
        SUM_CEILING
    } else if s < -1.0 {
        SUM_FLOOR
    } else {
        s
    }
}

/// Saturating-add signal B into signal A in place.
#[inline]
pub fn sum_in_place(a: &mut [f64], b: &[f64]) {
    debug_assert_eq!(a.len(), b.len());

    for (sa, &sb) in a.iter_mut().zip(b.iter()) {
        *sa = sum(*sa, sb);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_sum_in_range_is_plain_addition() {
        assert_eq!(sum(0.25, 0.5), 0.75);
        assert_eq!(sum(-0.25, 0.25), 0.0);
        assert_eq!(sum(-0.5, -0.5), -1.0);
    }

    #[test]
    fn test_unity_is_never_reached() {
        assert_eq!(sum(0.5, 0.5), 0.99999999);
        assert_eq!(sum(1.0, 1.0), 0.99999999);
    }

    #[test]
    fn test_negative_clamps_to_exactly_minus_one() {
        assert_eq!(sum(-0.6, -0.6), -1.0);
        assert_eq!(sum(-5.0, 1.0), -1.0);
    }

    #[test]
    fn test_sum_in_place() {
        let mut a = [0.5, -0.9, 0.1];
        let b = [0.6, -0.2, 0.1];
        sum_in_place(&mut a, &b);
        assert_eq!(a, [SUM_CEILING, SUM_FLOOR, 0.2]);
    }

    proptest! {
        #[test]
        fn prop_sum_stays_in_bounds(a in -1.0e6f64..1.0e6, b in -1.0e6f64..1.0e6) {
            let s = sum(a, b);
            prop_assert!(s >= SUM_FLOOR);
            prop_assert!(s <= SUM_CEILING);
        }
    }
}
