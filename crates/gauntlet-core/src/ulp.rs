//! Bit-level approximate equality for IEEE-754 floats.
//!
//! Fixed-epsilon comparisons break down because the gap between adjacent
//! representable floats grows with magnitude: an epsilon that is generous
//! near 1.0 is hopelessly strict near 1.0e12. Counting *units in the last
//! place* (ULPs) instead keeps the tolerance proportional everywhere on the
//! number line: two values are almost equal when at most `max_ulps`
//! representable values sit between them.
//!
//! The distance comes from reinterpreting each float's bit pattern as an
//! unsigned integer in a biased encoding whose ordering matches numeric
//! ordering. IEEE-754 stores sign-and-magnitude, so negative values order
//! backwards as raw bits; mapping negatives through two's-complement
//! negation and setting the sign bit on non-negatives yields a monotone
//! scale where the ULP distance is a plain unsigned subtraction. `+0.0` and
//! `-0.0` collapse onto the same biased point, so the two zeros are 0 ULPs
//! apart, and the largest finite values sit within a few ULPs of infinity.

/// Approximate equality measured in units in the last place.
///
/// Implemented for `f32` and `f64`. NaN never compares almost-equal to
/// anything, itself included.
pub trait UlpEq: Copy {
    /// Unsigned integer wide enough for this float's bit pattern.
    type Bits: Copy + PartialOrd + From<u32>;

    /// Number of representable values between `self` and `other`, or `None`
    /// when either operand is NaN.
    fn ulp_distance(self, other: Self) -> Option<Self::Bits>;

    /// `true` when `self` and `other` are at most `max_ulps` representable
    /// values apart. NaN operands always compare unequal.
    fn almost_equal(self, other: Self, max_ulps: u32) -> bool {
        match self.ulp_distance(other) {
            Some(distance) => distance <= Self::Bits::from(max_ulps),
            None => false,
        }
    }
}

macro_rules! impl_ulp_eq {
    ($float:ty, $bits:ty) => {
        impl UlpEq for $float {
            type Bits = $bits;

            fn ulp_distance(self, other: Self) -> Option<$bits> {
                const SIGN_MASK: $bits = 1 << (<$bits>::BITS - 1);
                const FRACTION_MASK: $bits =
                    <$bits>::MAX >> (<$bits>::BITS - (<$float>::MANTISSA_DIGITS - 1));
                const EXPONENT_MASK: $bits = !(SIGN_MASK | FRACTION_MASK);

                // Quiet and signalling NaNs alike: exponent all ones with a
                // non-zero fraction.
                let nan = |bits: $bits| {
                    bits & EXPONENT_MASK == EXPONENT_MASK && bits & FRACTION_MASK != 0
                };
                // Sign-and-magnitude to the monotone biased scale. Both
                // zeros land on SIGN_MASK.
                let biased = |bits: $bits| {
                    if bits & SIGN_MASK != 0 {
                        bits.wrapping_neg()
                    } else {
                        SIGN_MASK | bits
                    }
                };

                if nan(self.to_bits()) || nan(other.to_bits()) {
                    return None;
                }
                Some(biased(self.to_bits()).abs_diff(biased(other.to_bits())))
            }
        }
    };
}

impl_ulp_eq!(f32, u32);
impl_ulp_eq!(f64, u64);
