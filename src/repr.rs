//! The underlying storage of the [`Variant`] type and the type-index
//! registry built on top of it.
//!
//! # Implementation details
//!
//! A variant is a hand-written tagged union. Its memory layout resembles:
//!
//! ```rust,no_run
//! # use core::convert::Infallible;
//! # use core::mem::ManuallyDrop;
//!
//! struct Nil(Infallible);
//! union Cons<T, Next> {
//!     data: ManuallyDrop<T>,
//!     next: ManuallyDrop<Next>,
//! }
//!
//! // For example only. Not actually defined.
//! struct RawVariant2<T1, T2> {
//!     tag: u8,
//!     data: Cons<T1, Cons<T2, Nil>>,
//! }
//! ```
//!
//! Walking the type list one `Cons` at a time while counting the tag down to
//! zero reaches the active alternative. Every operation that touches the
//! union goes through such a walk, so no code ever reads the bytes of an
//! inactive alternative.
//!
//! The registry has two directions:
//!
//! - [`Contains<T, U>`] maps an alternative type `T` to its index `U`. The
//!   compiler infers `U`, so user code names only the type. If `T` is listed
//!   more than once the inference is ambiguous and is rejected; index-based
//!   access stays available for such lists.
//! - [`At<U>`] maps an index back to its alternative type, see [`TypeAt`].
//!
//! [`Variant`]: crate::Variant

use core::{any, convert::Infallible, mem::ManuallyDrop, ptr};

use crate::index::{Index, UInt, UTerm};

/// The terminator type of the underlying union of the [`Variant`] type.
///
/// [`Variant`]: crate::Variant
pub struct Nil(pub(crate) Infallible);

/// The accumulator type of the underlying union of the [`Variant`] type.
///
/// [`Variant`]: crate::Variant
pub union Cons<T, U> {
    pub(crate) data: ManuallyDrop<T>,
    pub(crate) next: ManuallyDrop<U>,
}

/// The trait that type lists implement to support their tagged union
/// representation.
pub trait SumList: Count {
    /// The underlying representation of the `Variant` type.
    type Repr;

    #[doc(hidden)]
    unsafe fn drop(this: &mut ManuallyDrop<Self::Repr>, tag: u8);

    #[doc(hidden)]
    fn type_name(tag: u8) -> &'static str;
}

impl SumList for () {
    type Repr = Nil;

    unsafe fn drop(this: &mut ManuallyDrop<Nil>, _: u8) {
        match this.0 {}
    }

    fn type_name(tag: u8) -> &'static str {
        unreachable!("tag {tag} is out of range")
    }
}

impl<Head, Tail> SumList for (Head, Tail)
where
    Tail: SumList,
{
    type Repr = Cons<Head, Tail::Repr>;

    unsafe fn drop(this: &mut ManuallyDrop<Self::Repr>, tag: u8) {
        if tag == 0 {
            unsafe { ManuallyDrop::drop(&mut this.data) };
        } else {
            unsafe { Tail::drop(&mut this.next, tag - 1) }
        }
    }

    fn type_name(tag: u8) -> &'static str {
        match tag {
            0 => any::type_name::<Head>(),
            _ => Tail::type_name(tag - 1),
        }
    }
}

/// Maps an alternative type `T` to its index `U` in the type list.
///
/// Only implemented when `T` is one of the alternatives, which makes every
/// typed constructor and accessor reject unregistered types at compile time.
#[diagnostic::on_unimplemented(
    message = "`{T}` is not an alternative of the type list `{Self}`",
    label = "unregistered alternative type",
    note = "a variant can only be built from or read as one of its listed alternative types"
)]
pub trait Contains<T, U: Index>: SumList {
    #[doc(hidden)]
    fn from_data(data: T) -> Self::Repr;

    #[doc(hidden)]
    unsafe fn into_data_unchecked(this: Self::Repr) -> T;

    #[doc(hidden)]
    fn as_ptr(this: &Self::Repr) -> *const T;

    #[doc(hidden)]
    fn as_mut_ptr(this: &mut Self::Repr) -> *mut T;
}

impl<Head, Tail> Contains<Head, UTerm> for (Head, Tail)
where
    Tail: SumList,
{
    fn from_data(data: Head) -> Self::Repr {
        Cons {
            data: ManuallyDrop::new(data),
        }
    }

    unsafe fn into_data_unchecked(this: Self::Repr) -> Head {
        unsafe { ManuallyDrop::into_inner(this.data) }
    }

    fn as_ptr(this: &Self::Repr) -> *const Head {
        let ptr = ptr::addr_of!(this.data).cast::<Head>();
        debug_assert_eq!(ptr.cast(), this as *const Self::Repr);
        ptr
    }

    fn as_mut_ptr(this: &mut Self::Repr) -> *mut Head {
        let ptr = ptr::addr_of_mut!(this.data).cast::<Head>();
        debug_assert_eq!(ptr.cast(), this as *mut Self::Repr);
        ptr
    }
}

impl<Head, Tail, T, U: Index> Contains<T, UInt<U>> for (Head, Tail)
where
    Tail: Contains<T, U>,
{
    fn from_data(data: T) -> Self::Repr {
        Cons {
            next: ManuallyDrop::new(Tail::from_data(data)),
        }
    }

    unsafe fn into_data_unchecked(this: Self::Repr) -> T {
        unsafe { Tail::into_data_unchecked(ManuallyDrop::into_inner(this.next)) }
    }

    fn as_ptr(this: &Self::Repr) -> *const T {
        let ptr = Tail::as_ptr(unsafe { &this.next });
        debug_assert_eq!(ptr.cast(), this as *const Self::Repr);
        ptr
    }

    fn as_mut_ptr(this: &mut Self::Repr) -> *mut T {
        let ptr = Tail::as_mut_ptr(unsafe { &mut this.next });
        debug_assert_eq!(ptr.cast(), this as *mut Self::Repr);
        ptr
    }
}

/// Maps an index `U` back to the alternative type stored at that slot.
pub trait At<U: Index>: SumList {
    /// The alternative type at index `U`.
    type Output;
}

impl<Head, Tail> At<UTerm> for (Head, Tail)
where
    Tail: SumList,
{
    type Output = Head;
}

impl<Head, Tail, U: Index> At<UInt<U>> for (Head, Tail)
where
    Tail: At<U>,
{
    type Output = Tail::Output;
}

/// The alternative type at index `U` of the type list `S`.
pub type TypeAt<S, U> = <S as At<U>>::Output;

/// Counts the number of elements in a type list using index tags.
pub trait Count {
    /// The number of elements in the type list, measured by index tags.
    type Count: Index;
}

impl Count for () {
    type Count = UTerm;
}

impl<Head, Tail> Count for (Head, Tail)
where
    Tail: Count,
{
    type Count = UInt<Tail::Count>;
}
