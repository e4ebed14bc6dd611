/// Constructs a [`struct@Variant`] type from a list of types.
///
/// # Examples
///
/// ```rust
/// use tvariant::Variant;
///
/// type MyVariant = Variant![i32, u32, f64];
/// let v: MyVariant = Variant::new(42u32);
/// assert!(v.is::<u32, _>());
/// ```
#[macro_export]
macro_rules! Variant {
    [$($t:ty),* $(,)?] => [$crate::Variant::<$crate::T![$($t,)*]>];
}

/// Constructs a tuple list (heterogeneous list) type from a list of types.
///
/// This is the shape every variant type list takes.
///
/// # Examples
///
/// ```rust
/// use tvariant::T;
///
/// type MyList = T![i32, u32, f64];
/// let list: MyList = (42i32, (42u32, (42.0f64, ())));
/// ```
#[macro_export]
macro_rules! T {
    [] => [()];
    [$head:ty $(, $t:ty)* $(,)?] => [($head, $crate::T!($($t,)*))];
}

/// Constructs a [`struct@Variant`] type padded with [`Empty`] markers up to
/// [`MAX_ARITY`] alternatives.
///
/// Listing more than [`MAX_ARITY`] types fails to expand.
///
/// # Examples
///
/// ```rust
/// use tvariant::{Padded, index::MAX_ARITY, marker::Empty};
///
/// type Wide = Padded![i32, String];
/// let v = Wide::new(7i32);
/// assert_eq!(Wide::arity(), MAX_ARITY);
/// assert!(!v.is::<Empty<2>, _>());
/// ```
///
/// Seventeen types do not fit:
///
/// ```rust,compile_fail
/// use tvariant::Padded;
///
/// type Overfull = Padded![
///     u8, u16, u32, u64, i8, i16, i32, i64,
///     u128, i128, f32, f64, bool, char, (), String, Vec<u8>,
/// ];
/// ```
///
/// [`Empty`]: crate::marker::Empty
/// [`MAX_ARITY`]: crate::index::MAX_ARITY
#[macro_export]
macro_rules! Padded {
    [$($t:ty),* $(,)?] => [
        $crate::__pad!([$($t,)*] [] [0 1 2 3 4 5 6 7 8 9 10 11 12 13 14 15])
    ];
}

#[doc(hidden)]
#[macro_export]
macro_rules! __pad {
    ([$head:ty, $($rest:ty,)*] [$($acc:ty,)*] [$slot:tt $($slots:tt)*]) => {
        $crate::__pad!([$($rest,)*] [$($acc,)* $head,] [$($slots)*])
    };
    ([] [$($acc:ty,)*] [$($slots:tt)*]) => {
        $crate::Variant::<$crate::T![$($acc,)* $($crate::marker::Empty<$slots>,)*]>
    };
}
