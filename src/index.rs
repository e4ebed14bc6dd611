//! Type-level indices used to address the alternatives of a [`Variant`].
//!
//! An index is a Peano-style natural built from [`UTerm`] and [`UInt`]; its
//! numeric value is available as [`Index::TAG`] and is exactly the
//! discriminant stored by a variant holding that alternative.
//!
//! [`Variant`]: crate::Variant

use core::marker::PhantomData;

/// The largest number of alternatives a single variant may list.
///
/// ```rust
/// use tvariant::Variant;
///
/// type Full = Variant![
///     u8, u16, u32, u64, i8, i16, i32, i64,
///     u128, i128, f32, f64, bool, char, (), String,
/// ];
/// assert_eq!(Full::new(1i64).index(), 7);
/// ```
///
/// Building a variant with one more alternative is rejected at compile time:
///
/// ```rust,compile_fail
/// use tvariant::Variant;
///
/// type Overfull = Variant![
///     u8, u16, u32, u64, i8, i16, i32, i64,
///     u128, i128, f32, f64, bool, char, (), String, Vec<u8>,
/// ];
/// let v = Overfull::new(1i64);
/// ```
pub const MAX_ARITY: u8 = 16;

/// Index zero.
pub struct UTerm;

/// The successor of index `U`.
pub struct UInt<U>(PhantomData<U>);

/// A type-level index with a known discriminant value.
pub trait Index {
    /// The discriminant this index stands for.
    const TAG: u8;
}

impl Index for UTerm {
    const TAG: u8 = 0;
}

impl<U: Index> Index for UInt<U> {
    const TAG: u8 = 1 + U::TAG;
}

pub type U0 = UTerm;
pub type U1 = UInt<U0>;
pub type U2 = UInt<U1>;
pub type U3 = UInt<U2>;
pub type U4 = UInt<U3>;
pub type U5 = UInt<U4>;
pub type U6 = UInt<U5>;
pub type U7 = UInt<U6>;
pub type U8 = UInt<U7>;
pub type U9 = UInt<U8>;
pub type U10 = UInt<U9>;
pub type U11 = UInt<U10>;
pub type U12 = UInt<U11>;
pub type U13 = UInt<U12>;
pub type U14 = UInt<U13>;
pub type U15 = UInt<U14>;
