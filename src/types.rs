//! Core type definitions for the PDCP transmit plane.
//!
//! Provides zero-cost newtypes to prevent field mixups at compile time.
//! All types use `#[repr(transparent)]` for guaranteed zero runtime cost.

use std::fmt;
use std::ops::{Add, AddAssign, Deref};

use serde::{Deserialize, Serialize};

use crate::config::SnSize;

/// Macro to generate PDCP newtype wrappers with common implementations
macro_rules! pdcp_newtype {
    (
        $(#[$meta:meta])*
        $name:ident($inner:ty) => $prefix:literal
        $(, custom_methods: { $($custom:tt)* })?
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
        #[derive(Serialize, Deserialize)]
        #[repr(transparent)]
        pub struct $name(pub $inner);

        impl $name {
            /// Creates a new instance
            #[inline]
            pub const fn new(value: $inner) -> Self {
                Self(value)
            }

            /// Raw value
            #[inline]
            pub const fn value(self) -> $inner {
                self.0
            }

            /// Wrapping addition
            #[inline]
            pub const fn wrapping_add(self, rhs: $inner) -> Self {
                Self(self.0.wrapping_add(rhs))
            }

            /// Wrapping subtraction returning the inner type
            #[inline]
            pub const fn wrapping_sub(self, rhs: Self) -> $inner {
                self.0.wrapping_sub(rhs.0)
            }

            $($($custom)*)?
        }

        // Display with custom prefix
        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $prefix, self.0)
            }
        }

        // Deref for transparent access
        impl Deref for $name {
            type Target = $inner;

            #[inline]
            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        // From/Into conversions
        impl From<$inner> for $name {
            #[inline]
            fn from(value: $inner) -> Self {
                Self(value)
            }
        }

        impl From<$name> for $inner {
            #[inline]
            fn from(value: $name) -> Self {
                value.0
            }
        }

        // Enable direct comparisons with raw values
        impl PartialEq<$inner> for $name {
            #[inline]
            fn eq(&self, other: &$inner) -> bool {
                self.0 == *other
            }
        }

        impl PartialEq<$name> for $inner {
            #[inline]
            fn eq(&self, other: &$name) -> bool {
                *self == other.0
            }
        }

        impl PartialOrd<$inner> for $name {
            #[inline]
            fn partial_cmp(&self, other: &$inner) -> Option<std::cmp::Ordering> {
                self.0.partial_cmp(other)
            }
        }

        impl PartialOrd<$name> for $inner {
            #[inline]
            fn partial_cmp(&self, other: &$name) -> Option<std::cmp::Ordering> {
                self.partial_cmp(&other.0)
            }
        }

        // Arithmetic with raw values
        impl Add<$inner> for $name {
            type Output = Self;

            #[inline]
            fn add(self, rhs: $inner) -> Self::Output {
                self.wrapping_add(rhs)
            }
        }

        impl AddAssign<$inner> for $name {
            #[inline]
            fn add_assign(&mut self, rhs: $inner) {
                *self = self.wrapping_add(rhs);
            }
        }
    };
}

pdcp_newtype!(
    /// Per-bearer 32-bit COUNT: hyper-frame number in the high bits,
    /// sequence number in the low bits. Security input and discard-map key.
    Count(u32) => "COUNT",
    custom_methods: {
        /// Sequence-number part of this COUNT for the given SN length.
        #[inline]
        pub const fn sn(self, sn_size: SnSize) -> Sn {
            Sn::new(self.0 & sn_size.sn_mask())
        }

        /// Hyper-frame-number part of this COUNT for the given SN length.
        #[inline]
        pub const fn hfn(self, sn_size: SnSize) -> u32 {
            self.0 >> sn_size.bits()
        }

        /// Converts the COUNT to big-endian bytes.
        #[inline]
        pub const fn to_be_bytes(self) -> [u8; 4] {
            self.0.to_be_bytes()
        }
    }
);

pdcp_newtype!(
    /// PDCP sequence number, the low 12 or 18 bits of a COUNT.
    Sn(u32) => "SN"
);

pdcp_newtype!(
    /// Zero-based bearer identity fed to the NIA/NEA algorithms (5 bits).
    BearerId(u8) => "BEARER"
);

// Convenience constants
impl Count {
    /// The initial COUNT of a freshly established bearer
    pub const INITIAL: Self = Self::new(0);
    /// The last COUNT expressible before wrap-around
    pub const MAX: Self = Self::new(u32::MAX);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_projections() {
        let count = Count::new(0x0001_2345);
        assert_eq!(count.sn(SnSize::Size12), Sn::new(0x345));
        assert_eq!(count.hfn(SnSize::Size12), 0x123);
        assert_eq!(count.sn(SnSize::Size18), Sn::new(0x0001_2345 & 0x3FFFF));
        assert_eq!(count.hfn(SnSize::Size18), 0x0001_2345 >> 18);
        assert_eq!(format!("{}", count), "COUNT74565");
    }

    #[test]
    fn count_wrapping() {
        let count = Count::MAX;
        assert_eq!(count.wrapping_add(1), Count::INITIAL);

        let mut count = Count::new(41);
        count += 1;
        assert_eq!(count, 42u32);
    }

    #[test]
    fn direct_comparisons() {
        let count = Count::new(7);
        assert!(count >= 7u32);
        assert!(count < 8u32);
        assert!(8u32 > count);

        let bearer: BearerId = 3u8.into();
        assert_eq!(bearer, 3u8);
        assert_eq!(format!("{}", bearer), "BEARER3");
    }

    #[test]
    fn zero_cost_verification() {
        assert_eq!(std::mem::size_of::<Count>(), std::mem::size_of::<u32>());
        assert_eq!(std::mem::size_of::<Sn>(), std::mem::size_of::<u32>());
        assert_eq!(std::mem::size_of::<BearerId>(), std::mem::size_of::<u8>());
    }
}
