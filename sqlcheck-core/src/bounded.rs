use crate::{Error, Result};
use std::{
    cmp::Ordering,
    ffi::c_int,
    fmt::{self, Display},
};

/// Exclusive upper bound of every position accepted by a statement.
///
/// Positions stay below `c_int::MAX`, so the 1-based index handed to the engine always fits.
pub const POSITION_LIMIT: usize = c_int::MAX as usize;

/// Exclusive upper bound of the byte length of a bound text or blob value.
pub const TEXT_LENGTH_LIMIT: usize = c_int::MAX as usize + 1;

/// A 0-based parameter or column position.
pub type Position = BoundedIndex<POSITION_LIMIT>;

/// Byte length of a text or blob value passed to the engine.
pub type TextLength = BoundedIndex<TEXT_LENGTH_LIMIT>;

/// An integer known to lie in `[0, N)`.
///
/// There is no way to obtain an instance holding a value outside the range:
/// * `literal` checks the value when the crate is compiled.
/// * `new`, `within` and `try_from` check it at runtime and return `Error::OutOfRange`.
///
/// ```rust,ignore
/// let second = BoundedIndex::<4>::literal::<1>();
/// assert!(BoundedIndex::<4>::new(4).is_err());
/// // BoundedIndex::<4>::literal::<4>(); does not build
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct BoundedIndex<const N: usize>(usize);

impl<const N: usize> BoundedIndex<N> {
    /// Exclusive upper bound of the range.
    pub const BOUND: usize = N;

    /// Value known at compile time, an out of range `I` fails the build.
    pub const fn literal<const I: usize>() -> Self {
        const {
            assert!(I < N, "BoundedIndex literal is out of range");
        }
        Self(I)
    }

    /// Checked constructor from an arbitrary integer.
    pub fn new(raw: i64) -> Result<Self> {
        match usize::try_from(raw) {
            Ok(value) if value < N => Ok(Self(value)),
            _ => Err(Error::OutOfRange {
                value: raw,
                bound: N,
            }),
        }
    }

    /// Checked constructor against a bound only known at runtime, which is further restricted by `N`.
    pub fn within(raw: usize, count: usize) -> Result<Self> {
        if raw < count && raw < N {
            Ok(Self(raw))
        } else {
            Err(Error::OutOfRange {
                value: i64::try_from(raw).unwrap_or(i64::MAX),
                bound: count.min(N),
            })
        }
    }

    pub const fn get(self) -> usize {
        self.0
    }

    /// The value as a C integer, saturating when `N` is larger than the C integer range.
    pub fn as_c_int(self) -> c_int {
        c_int::try_from(self.0).unwrap_or(c_int::MAX)
    }

    /// Widens the bound, never fails.
    pub const fn widen<const M: usize>(self) -> BoundedIndex<M> {
        const {
            assert!(N <= M, "BoundedIndex can only be widened to a larger bound");
        }
        BoundedIndex(self.0)
    }
}

impl<const N: usize> TryFrom<usize> for BoundedIndex<N> {
    type Error = Error;

    fn try_from(value: usize) -> Result<Self> {
        Self::within(value, N)
    }
}

impl<const N: usize> From<BoundedIndex<N>> for usize {
    fn from(value: BoundedIndex<N>) -> Self {
        value.0
    }
}

impl<const N: usize> PartialEq<usize> for BoundedIndex<N> {
    fn eq(&self, other: &usize) -> bool {
        self.0 == *other
    }
}

impl<const N: usize> PartialOrd<usize> for BoundedIndex<N> {
    fn partial_cmp(&self, other: &usize) -> Option<Ordering> {
        self.0.partial_cmp(other)
    }
}

impl<const N: usize> Display for BoundedIndex<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checked_construction() {
        fn check<const N: usize>() {
            for i in 0..N as i64 {
                let index = BoundedIndex::<N>::new(i).expect("Value inside the range was rejected");
                assert_eq!(index.get() as i64, i);
            }
            for i in [N as i64, N as i64 + 1, N as i64 + 1000, -1, -2, i64::MIN] {
                assert_eq!(
                    BoundedIndex::<N>::new(i),
                    Err(Error::OutOfRange { value: i, bound: N })
                );
            }
        }
        check::<1>();
        check::<2>();
        check::<7>();
        check::<64>();
    }

    #[test]
    fn zero_bound_is_empty() {
        assert!(BoundedIndex::<0>::new(0).is_err());
        assert!(BoundedIndex::<0>::try_from(0usize).is_err());
    }

    #[test]
    fn literal() {
        let index = BoundedIndex::<3>::literal::<2>();
        assert_eq!(index.get(), 2);
        assert_eq!(index, BoundedIndex::<3>::new(2).unwrap());
        assert_eq!(Position::literal::<0>().as_c_int(), 0);
    }

    #[test]
    fn runtime_bound() {
        assert_eq!(Position::within(3, 4).unwrap(), 3);
        assert_eq!(
            Position::within(4, 4),
            Err(Error::OutOfRange { value: 4, bound: 4 })
        );
        assert_eq!(
            BoundedIndex::<2>::within(5, 10),
            Err(Error::OutOfRange { value: 5, bound: 2 })
        );
    }

    #[test]
    fn ordering() {
        let a = BoundedIndex::<10>::literal::<3>();
        let b = BoundedIndex::<10>::literal::<7>();
        assert!(a < b);
        assert!(a < 4);
        assert!(b >= 7);
        assert_eq!(a.max(b), b);
        let wide: Position = a.widen();
        assert_eq!(wide, 3);
    }

    #[test]
    fn limits() {
        assert!(TextLength::try_from(c_int::MAX as usize).is_ok());
        assert!(Position::try_from(c_int::MAX as usize).is_err());
        let last = Position::try_from(c_int::MAX as usize - 1).unwrap();
        assert!(last.as_c_int().checked_add(1).is_some());
    }
}
