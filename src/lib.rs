#![doc = include_str!("../README.md")]
#![deny(future_incompatible)]
#![deny(rust_2018_idioms)]
#![deny(rust_2024_compatibility)]

use core::{
    fmt,
    hash::{Hash, Hasher},
    mem::ManuallyDrop,
};

mod derive;
pub mod dispatch;
pub mod error;
pub mod index;
mod macros;
pub mod marker;
pub mod repr;

use self::{
    dispatch::{Dispatch, Handlers, Slots},
    error::{WrongAlternativeAccessed, die},
    index::{Index, MAX_ARITY},
    repr::{At, Contains, TypeAt},
};

pub type Repr<S> = <S as repr::SumList>::Repr;

/// A value holding exactly one of the alternative types listed in `S`.
///
/// `S` is a type list built with [`T!`]; the [`Variant!`] macro spells the
/// whole type. The discriminant returned by [`index`](Self::index) records
/// which alternative is active, and only that alternative is ever
/// initialized, cloned, compared or dropped.
///
/// The active alternative is fixed at construction. Build a new variant to
/// hold a different one.
pub struct Variant<S: repr::SumList> {
    tag: u8,
    data: ManuallyDrop<Repr<S>>,
}

impl<T> From<T> for Variant![T] {
    /// Construct a `Variant` of one type from a value.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use tvariant::Variant;
    ///
    /// let v: Variant![i32] = 42.into();
    /// assert_eq!(v.into_inner(), 42);
    /// ```
    fn from(value: T) -> Self {
        Variant::new(value)
    }
}

impl<T> Variant![T] {
    pub fn into_inner(self) -> T {
        let mut this = ManuallyDrop::new(self);
        unsafe {
            <(T, ()) as Contains<T, index::UTerm>>::into_data_unchecked(ManuallyDrop::take(
                &mut this.data,
            ))
        }
    }
}

impl<S: repr::SumList> Variant<S> {
    const ARITY_CHECK: () = assert!(
        <S::Count as Index>::TAG <= MAX_ARITY,
        "a variant lists more alternatives than MAX_ARITY"
    );

    /// Constructs a variant holding `value`.
    ///
    /// Fails to compile when `T` is not one of the alternatives.
    ///
    /// ```rust,compile_fail
    /// use tvariant::Variant;
    ///
    /// let v: Variant![i32, String] = Variant::new(1.5f64);
    /// ```
    pub fn new<T, U>(value: T) -> Self
    where
        S: Contains<T, U>,
        U: Index,
    {
        #[allow(clippy::let_unit_value)]
        let () = Self::ARITY_CHECK;
        Variant {
            tag: U::TAG,
            data: ManuallyDrop::new(S::from_data(value)),
        }
    }

    /// Constructs a variant holding `value` in the slot at index `U`.
    ///
    /// Works for type lists that repeat an alternative type, where
    /// [`new`](Self::new) cannot tell the slots apart.
    pub fn new_at<U>(value: TypeAt<S, U>) -> Self
    where
        S: At<U> + Contains<TypeAt<S, U>, U>,
        U: Index,
    {
        Self::new::<TypeAt<S, U>, U>(value)
    }

    /// Constructs a variant after one conversion of `value` into the
    /// alternative type `T`.
    pub fn convert<T, U>(value: impl Into<T>) -> Self
    where
        S: Contains<T, U>,
        U: Index,
    {
        Self::new::<T, U>(value.into())
    }

    /// Constructs a variant holding a `String` alternative from a string
    /// slice.
    ///
    /// ```rust
    /// use tvariant::Variant;
    ///
    /// type V = Variant![i32, String];
    /// assert_eq!(V::from_text("abcd").get_or_die::<String, _>(), "abcd");
    /// ```
    ///
    /// Only available when `String` is one of the alternatives:
    ///
    /// ```rust,compile_fail
    /// use tvariant::Variant;
    ///
    /// type V = Variant![i32, f64];
    /// let v = V::from_text("abcd");
    /// ```
    pub fn from_text<U>(text: &str) -> Self
    where
        S: Contains<String, U>,
        U: Index,
    {
        Self::convert::<String, U>(text)
    }

    /// The number of alternatives of this variant type.
    pub fn arity() -> u8 {
        <S::Count as Index>::TAG
    }

    /// The index of alternative type `T`.
    ///
    /// Fails to compile when `T` is not one of the alternatives, or when it is
    /// listed more than once:
    ///
    /// ```rust,compile_fail
    /// use tvariant::Variant;
    ///
    /// type Twice = Variant![u32, u32];
    /// let index = Twice::index_of::<u32, _>();
    /// ```
    ///
    /// Type-based construction and membership tests are rejected the same way:
    ///
    /// ```rust,compile_fail
    /// use tvariant::Variant;
    ///
    /// type Twice = Variant![u32, u32];
    /// let v = Twice::new(1u32);
    /// ```
    ///
    /// ```rust,compile_fail
    /// use tvariant::{Variant, index::U1};
    ///
    /// type Twice = Variant![u32, u32];
    /// let v = Twice::new_at::<U1>(1);
    /// let yes = v.is::<u32, _>();
    /// ```
    ///
    /// Index-based operations keep working for such lists:
    ///
    /// ```rust
    /// use tvariant::{Variant, index::{U0, U1}};
    ///
    /// type Twice = Variant![u32, u32];
    /// let v = Twice::new_at::<U1>(1);
    /// assert!(v.is_at::<U1>() && !v.is_at::<U0>());
    /// assert_eq!(*v.get_at_or_die::<U1>(), 1);
    /// ```
    pub fn index_of<T, U>() -> u8
    where
        S: Contains<T, U>,
        U: Index,
    {
        U::TAG
    }

    /// The discriminant: the index of the active alternative.
    pub fn index(&self) -> u8 {
        self.tag
    }

    /// The name of the active alternative's type.
    pub fn type_name(&self) -> &'static str {
        S::type_name(self.tag)
    }

    /// Creates an empty handler table for [`dispatch_using`].
    ///
    /// [`dispatch_using`]: Self::dispatch_using
    pub fn handlers() -> Handlers<S, S::Unhandled>
    where
        S: Slots,
    {
        Handlers::new()
    }

    /// Runs the handler installed for the active alternative, if any.
    ///
    /// Alternatives without an installed handler are skipped silently.
    pub fn dispatch_using<H>(&self, handlers: &mut Handlers<S, H>)
    where
        S: Dispatch<H>,
    {
        unsafe { S::dispatch(&self.data, self.tag, &mut handlers.slots) }
    }
}

impl<S: repr::SumList> Variant<S> {
    pub fn is<T, U>(&self) -> bool
    where
        S: Contains<T, U>,
        U: Index,
    {
        self.tag == U::TAG
    }

    pub fn is_at<U>(&self) -> bool
    where
        S: At<U>,
        U: Index,
    {
        self.tag == U::TAG
    }

    pub fn get<T, U>(&self) -> Option<&T>
    where
        S: Contains<T, U>,
        U: Index,
    {
        (self.tag == U::TAG).then(|| unsafe { &*S::as_ptr(&self.data) })
    }

    pub fn get_mut<T, U>(&mut self) -> Option<&mut T>
    where
        S: Contains<T, U>,
        U: Index,
    {
        (self.tag == U::TAG).then(|| unsafe { &mut *S::as_mut_ptr(&mut self.data) })
    }

    pub fn try_get<T, U>(&self) -> Result<&T, WrongAlternativeAccessed>
    where
        S: Contains<T, U>,
        U: Index,
    {
        self.get().ok_or_else(|| self.mismatch::<T, U>())
    }

    pub fn try_get_mut<T, U>(&mut self) -> Result<&mut T, WrongAlternativeAccessed>
    where
        S: Contains<T, U>,
        U: Index,
    {
        if self.tag != U::TAG {
            return Err(self.mismatch::<T, U>());
        }
        Ok(unsafe { &mut *S::as_mut_ptr(&mut self.data) })
    }

    /// Returns the active value as a `T`.
    ///
    /// With an annotated binding this reads as a conversion to the target
    /// type, and it borrows, so it also works on elements of a slice:
    ///
    /// ```rust
    /// use tvariant::Variant;
    ///
    /// let vs: Vec<Variant![i32, f64]> = vec![Variant::new(1i32), Variant::new(2.5f64)];
    /// let x: &f64 = vs[1].get_or_die();
    /// assert_eq!(*x, 2.5);
    /// ```
    ///
    /// # Panics
    ///
    /// Panics with [`WrongAlternativeAccessed`] if `T` is not the active
    /// alternative. Check with [`is`](Self::is) first when unsure.
    #[track_caller]
    pub fn get_or_die<T, U>(&self) -> &T
    where
        S: Contains<T, U>,
        U: Index,
    {
        match self.get() {
            Some(value) => value,
            None => die(self.mismatch::<T, U>()),
        }
    }

    /// Mutable counterpart of [`get_or_die`](Self::get_or_die).
    ///
    /// # Panics
    ///
    /// Panics with [`WrongAlternativeAccessed`] if `T` is not the active
    /// alternative.
    #[track_caller]
    pub fn get_mut_or_die<T, U>(&mut self) -> &mut T
    where
        S: Contains<T, U>,
        U: Index,
    {
        if self.tag != U::TAG {
            die(self.mismatch::<T, U>());
        }
        unsafe { &mut *S::as_mut_ptr(&mut self.data) }
    }

    pub fn get_at<U>(&self) -> Option<&TypeAt<S, U>>
    where
        S: At<U> + Contains<TypeAt<S, U>, U>,
        U: Index,
    {
        self.get::<TypeAt<S, U>, U>()
    }

    /// Index-based counterpart of [`get_or_die`](Self::get_or_die).
    ///
    /// ```rust
    /// use tvariant::{Variant, index::U1};
    ///
    /// let v: Variant![i32, f64] = Variant::new(1.25f64);
    /// assert_eq!(*v.get_at_or_die::<U1>(), 1.25);
    /// ```
    ///
    /// # Panics
    ///
    /// Panics with [`WrongAlternativeAccessed`] if the alternative at `U` is
    /// not the active one.
    #[track_caller]
    pub fn get_at_or_die<U>(&self) -> &TypeAt<S, U>
    where
        S: At<U> + Contains<TypeAt<S, U>, U>,
        U: Index,
    {
        self.get_or_die::<TypeAt<S, U>, U>()
    }

    #[track_caller]
    pub fn get_at_mut_or_die<U>(&mut self) -> &mut TypeAt<S, U>
    where
        S: At<U> + Contains<TypeAt<S, U>, U>,
        U: Index,
    {
        self.get_mut_or_die::<TypeAt<S, U>, U>()
    }

    /// Moves the active value out, or gives the variant back if `T` is not
    /// the active alternative.
    pub fn try_into_alternative<T, U>(self) -> Result<T, Self>
    where
        S: Contains<T, U>,
        U: Index,
    {
        if self.tag != U::TAG {
            return Err(self);
        }
        let mut this = ManuallyDrop::new(self);
        Ok(unsafe { S::into_data_unchecked(ManuallyDrop::take(&mut this.data)) })
    }

    /// Converts the variant into its active value of type `T`.
    ///
    /// ```rust
    /// use tvariant::Variant;
    ///
    /// let v: Variant![i32, String] = Variant::new(7i32);
    /// let x: i32 = v.into_or_die();
    /// assert_eq!(x, 7);
    /// ```
    ///
    /// # Panics
    ///
    /// Panics with [`WrongAlternativeAccessed`] if `T` is not the active
    /// alternative. The variant is dropped normally while unwinding.
    #[track_caller]
    pub fn into_or_die<T, U>(self) -> T
    where
        S: Contains<T, U>,
        U: Index,
    {
        let error = self.mismatch::<T, U>();
        match self.try_into_alternative() {
            Ok(value) => value,
            Err(this) => {
                drop(this);
                die(error)
            }
        }
    }

    fn mismatch<T, U: Index>(&self) -> WrongAlternativeAccessed {
        WrongAlternativeAccessed {
            requested: core::any::type_name::<T>(),
            requested_index: U::TAG,
            active: self.type_name(),
            active_index: self.tag,
        }
    }
}

impl<S: derive::SumDebug> fmt::Debug for Variant<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(unsafe { S::debug(&self.data, self.tag) }, f)
    }
}

impl<S: derive::SumDisplay> fmt::Display for Variant<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(unsafe { S::display(&self.data, self.tag) }, f)
    }
}

impl<S: repr::SumList> Drop for Variant<S> {
    fn drop(&mut self) {
        unsafe { S::drop(&mut self.data, self.tag) }
    }
}

impl<S: derive::SumClone> Clone for Variant<S> {
    fn clone(&self) -> Self {
        Variant {
            tag: self.tag,
            data: unsafe { S::clone(&self.data, self.tag) },
        }
    }
}

impl<S: derive::SumPartialEq> PartialEq for Variant<S> {
    fn eq(&self, other: &Self) -> bool {
        self.tag == other.tag && unsafe { S::eq(&self.data, &other.data, self.tag) }
    }
}

impl<S: derive::SumPartialEq + Eq> Eq for Variant<S> {}

impl<S: derive::SumHash> Hash for Variant<S> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.tag.hash(state);
        unsafe { S::hash(&self.data, self.tag, state) }
    }
}

#[cfg(test)]
mod tests {
    use std::{
        cell::Cell,
        collections::hash_map::DefaultHasher,
        mem,
        rc::Rc,
    };

    use super::*;
    use crate::index::{U0, U1};

    type V = Variant![i32, String];

    #[test]
    fn basic() {
        let v = V::new(100i32);
        assert!(v.is::<i32, _>());
        assert!(!v.is::<String, _>());
        assert!(v.is_at::<U0>());
        assert!(!v.is_at::<U1>());
        assert_eq!(v.index(), 0);
        assert_eq!(v.type_name(), "i32");
        assert_eq!(v.get_or_die::<i32, _>(), &100);
        assert_eq!(v.get::<String, _>(), None);

        let v = V::from_text("abcd");
        assert_eq!(v.index(), 1);
        assert_eq!(v.get_at_or_die::<U1>(), "abcd");
        assert_eq!(v.get_at::<U0>(), None);
    }

    #[test]
    fn registry() {
        assert_eq!(V::index_of::<i32, _>(), 0);
        assert_eq!(V::index_of::<String, _>(), 1);
        assert_eq!(V::arity(), 2);
        assert_eq!(<Variant![u8]>::arity(), 1);
    }

    #[test]
    fn try_get_reports_both_sides() {
        let v = V::new(1i32);
        let err = v.try_get::<String, _>().unwrap_err();
        assert_eq!(err.requested_index, 1);
        assert_eq!(err.active_index, 0);
        assert_eq!(err.active, "i32");
        assert!(err.to_string().starts_with("wrong alternative accessed"));
        assert_eq!(v.try_get::<i32, _>(), Ok(&1));
    }

    #[test]
    #[should_panic(expected = "wrong alternative accessed")]
    fn get_or_die_on_mismatch() {
        let v = V::new(100i32);
        let _ = v.get_or_die::<String, _>();
    }

    #[test]
    #[should_panic(expected = "(index 0)")]
    fn get_at_or_die_on_mismatch() {
        let v = V::from_text("abcd");
        let _ = v.get_at_or_die::<U0>();
    }

    #[test]
    fn mutation() {
        let mut v = V::from_text("ab");
        v.get_mut_or_die::<String, _>().push_str("cd");
        assert_eq!(v.get_or_die::<String, _>(), "abcd");

        *v.get_at_mut_or_die::<U1>() = "x".to_string();
        assert_eq!(v.get::<String, _>().map(String::as_str), Some("x"));
        assert!(v.get_mut::<i32, _>().is_none());
        assert!(v.try_get_mut::<i32, _>().is_err());
    }

    #[test]
    fn try_get_mut_in_place() {
        let mut v = V::new(1i32);
        *v.try_get_mut::<i32, _>().unwrap() += 1;
        assert_eq!(v.try_get::<i32, _>(), Ok(&2));

        let err = v.try_get_mut::<String, _>().unwrap_err();
        assert_eq!((err.requested_index, err.active_index), (1, 0));
        assert_eq!(v.get_or_die::<i32, _>(), &2);
    }

    #[test]
    fn consume() {
        let v = V::new(7i32);
        let v = v.try_into_alternative::<String, _>().unwrap_err();
        assert_eq!(v.into_or_die::<i32, _>(), 7);

        let single: Variant![String] = String::from("solo").into();
        assert_eq!(single.into_inner(), "solo");
    }

    #[test]
    fn convert() {
        let v = <Variant![i64, String]>::convert::<i64, _>(3u8);
        assert_eq!(v.get_or_die::<i64, _>(), &3);
    }

    #[derive(Clone)]
    struct Tracked(Rc<Cell<usize>>);

    impl Drop for Tracked {
        fn drop(&mut self) {
            self.0.set(self.0.get() + 1);
        }
    }

    #[test]
    fn drops_exactly_the_active_alternative() {
        let drops = Rc::new(Cell::new(0));
        {
            let v: Variant![i32, Tracked] = Variant::new(Tracked(drops.clone()));
            let w = v.clone();
            assert_eq!(w.index(), v.index());
            assert_eq!(drops.get(), 0);
        }
        assert_eq!(drops.get(), 2);

        let v: Variant![Tracked, i32] = Variant::new(5i32);
        drop(v);
        assert_eq!(drops.get(), 2);

        let v: Variant![i32, Tracked] = Variant::new(Tracked(drops.clone()));
        let inner = v.into_or_die::<Tracked, _>();
        assert_eq!(drops.get(), 2);
        drop(inner);
        assert_eq!(drops.get(), 3);
    }

    #[test]
    fn clone_is_independent() {
        let mut v = V::from_text("abcd");
        let w = v.clone();
        v.get_mut_or_die::<String, _>().clear();
        assert_eq!(w.get_or_die::<String, _>(), "abcd");
        assert_eq!(v.get_or_die::<String, _>(), "");
    }

    #[test]
    fn equality() {
        let a = V::from_text("abcd");
        let b = V::from_text("abcd");
        let one = V::new(1i32);
        assert_eq!(a, b);
        assert_eq!(b, a);
        assert_eq!(a, a);
        assert_ne!(a, one);
        assert_ne!(V::new(0i32), V::new(1i32));
    }

    #[test]
    fn hash_follows_equality() {
        fn hash_of(v: &V) -> u64 {
            let mut hasher = DefaultHasher::new();
            v.hash(&mut hasher);
            hasher.finish()
        }

        assert_eq!(hash_of(&V::from_text("k")), hash_of(&V::from_text("k")));
        assert_ne!(hash_of(&V::new(1i32)), hash_of(&V::from_text("k")));
    }

    #[test]
    fn formatting() {
        assert_eq!(format!("{:?}", V::from_text("abcd")), "\"abcd\"");
        assert_eq!(V::new(42i32).to_string(), "42");
    }

    #[test]
    fn formatting_keeps_flags() {
        type F = Variant![f64, String];

        assert_eq!(format!("{:.2}", F::new(1.0f64)), "1.00");
        assert_eq!(format!("{:>6}", F::from_text("ab")), "    ab");
        assert_eq!(format!("{:*<4}", V::new(7i32)), "7***");
        assert_eq!(
            format!("{:#?}", <Variant![Vec<i32>]>::new(vec![1, 2])),
            format!("{:#?}", vec![1, 2])
        );
    }

    #[test]
    fn inline_storage() {
        assert_eq!(
            mem::size_of::<Variant![u8, u32]>(),
            2 * mem::size_of::<u32>()
        );
        assert!(mem::size_of::<V>() <= mem::size_of::<String>() + mem::align_of::<String>());
    }
}
