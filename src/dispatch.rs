//! Handler-table dispatch over the active alternative.
//!
//! A [`Handlers`] table has one slot per alternative of a type list. Every
//! slot starts out [`Unhandled`]; [`Handlers::on`] installs a closure in the
//! slot whose alternative type matches the closure's argument, and
//! [`Handlers::on_at`] does the same by index.
//! [`Variant::dispatch_using`] then runs the handler of the active slot and
//! nothing else.
//!
//! Dispatch is permissive rather than exhaustive: a table that leaves some
//! alternatives unhandled is still accepted, and dispatching a variant whose
//! active alternative is unhandled does nothing. Padding slots filled by
//! [`Empty`] markers behave the same way unless a handler is installed for
//! them. Use a plain `match` over [`Variant::index`] or the typed accessors
//! when every alternative must be handled.
//!
//! ```rust
//! use tvariant::Variant;
//!
//! type Value = Variant![i32, String, f64];
//!
//! let mut ints = 0;
//! let mut texts = Vec::new();
//!
//! let mut handlers = Value::handlers()
//!     .on(|x: &i32| ints += *x)
//!     .on(|s: &String| texts.push(s.clone()));
//!
//! for value in [Value::new(2i32), Value::from_text("two"), Value::new(2.0f64)] {
//!     value.dispatch_using(&mut handlers);
//! }
//! drop(handlers);
//!
//! assert_eq!(ints, 2);
//! assert_eq!(texts, ["two"]);
//! ```
//!
//! [`Variant::dispatch_using`]: crate::Variant::dispatch_using
//! [`Variant::index`]: crate::Variant::index
//! [`Empty`]: crate::marker::Empty

use core::marker::PhantomData;

use crate::{
    index::{Index, UInt, UTerm},
    repr::{At, Contains, Nil, SumList, TypeAt},
};

/// Handles values of the alternative type `T`.
pub trait Handler<T> {
    fn run(&mut self, value: &T);
}

/// A slot without a handler. Running it does nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct Unhandled;

impl<T> Handler<T> for Unhandled {
    fn run(&mut self, _: &T) {}
}

/// Adapts a closure into a [`Handler`].
#[derive(Debug, Clone, Copy)]
pub struct On<F>(pub F);

impl<T, F: FnMut(&T)> Handler<T> for On<F> {
    fn run(&mut self, value: &T) {
        (self.0)(value)
    }
}

/// The trait that type lists implement to build their empty handler table.
pub trait Slots: SumList {
    /// One [`Unhandled`] slot per alternative.
    type Unhandled;

    #[doc(hidden)]
    fn unhandled() -> Self::Unhandled;
}

impl Slots for () {
    type Unhandled = ();

    fn unhandled() -> Self::Unhandled {}
}

impl<Head, Tail: Slots> Slots for (Head, Tail) {
    type Unhandled = (Unhandled, Tail::Unhandled);

    fn unhandled() -> Self::Unhandled {
        (Unhandled, Tail::unhandled())
    }
}

/// Replaces the handler at index `U` of a handler list with `H`.
pub trait Replace<U: Index, H> {
    /// The handler list after the replacement.
    type Output;

    #[doc(hidden)]
    fn replace(self, handler: H) -> Self::Output;
}

impl<Slot, Rest, H> Replace<UTerm, H> for (Slot, Rest) {
    type Output = (H, Rest);

    fn replace(self, handler: H) -> Self::Output {
        (handler, self.1)
    }
}

impl<Slot, Rest, H, U: Index> Replace<UInt<U>, H> for (Slot, Rest)
where
    Rest: Replace<U, H>,
{
    type Output = (Slot, Rest::Output);

    fn replace(self, handler: H) -> Self::Output {
        (self.0, self.1.replace(handler))
    }
}

/// The trait that type lists implement to run the handler of the active
/// alternative out of a handler list `H`.
pub trait Dispatch<H>: SumList {
    #[doc(hidden)]
    unsafe fn dispatch(this: &Self::Repr, tag: u8, handlers: &mut H);
}

impl Dispatch<()> for () {
    unsafe fn dispatch(this: &Nil, _: u8, _: &mut ()) {
        match this.0 {}
    }
}

impl<Head, Tail, HeadHandler, TailHandlers> Dispatch<(HeadHandler, TailHandlers)> for (Head, Tail)
where
    Tail: Dispatch<TailHandlers>,
    HeadHandler: Handler<Head>,
{
    unsafe fn dispatch(this: &Self::Repr, tag: u8, handlers: &mut (HeadHandler, TailHandlers)) {
        if tag == 0 {
            let value: &Head = unsafe { &this.data };
            Handler::<Head>::run(&mut handlers.0, value);
        } else {
            unsafe { Tail::dispatch(&this.next, tag - 1, &mut handlers.1) }
        }
    }
}

/// A table of handlers for the alternatives of type list `S`.
///
/// Obtained from [`Variant::handlers`]. Installing a handler for a slot that
/// already has one replaces it.
///
/// [`Variant::handlers`]: crate::Variant::handlers
pub struct Handlers<S, H> {
    pub(crate) slots: H,
    marker: PhantomData<fn() -> S>,
}

impl<S: Slots> Handlers<S, S::Unhandled> {
    pub fn new() -> Self {
        Handlers {
            slots: S::unhandled(),
            marker: PhantomData,
        }
    }
}

impl<S: Slots> Default for Handlers<S, S::Unhandled> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: SumList, H> Handlers<S, H> {
    /// Installs `handler` in the slot of alternative type `T`.
    ///
    /// `T` usually has to be named, since a handler may accept several
    /// alternative types.
    pub fn install<T, U, X>(self, handler: X) -> Handlers<S, <H as Replace<U, X>>::Output>
    where
        S: Contains<T, U>,
        U: Index,
        X: Handler<T>,
        H: Replace<U, X>,
    {
        Handlers {
            slots: self.slots.replace(handler),
            marker: PhantomData,
        }
    }

    /// Installs a closure in the slot of the alternative type it accepts.
    pub fn on<T, U, F>(self, f: F) -> Handlers<S, <H as Replace<U, On<F>>>::Output>
    where
        S: Contains<T, U>,
        U: Index,
        F: FnMut(&T),
        H: Replace<U, On<F>>,
    {
        self.install::<T, U, On<F>>(On(f))
    }

    /// Installs a closure in the slot at index `U`.
    ///
    /// Unlike [`on`](Self::on) this works for type lists that repeat an
    /// alternative type.
    pub fn on_at<U, F>(self, f: F) -> Handlers<S, <H as Replace<U, On<F>>>::Output>
    where
        S: At<U>,
        U: Index,
        F: FnMut(&TypeAt<S, U>),
        H: Replace<U, On<F>>,
    {
        Handlers {
            slots: self.slots.replace(On(f)),
            marker: PhantomData,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use super::*;
    use crate::{Padded, Variant, index::U1, marker::Empty};

    type V = Variant![i32, String];

    #[test]
    fn runs_only_the_active_handler() {
        let ints = Cell::new(0);
        let texts = Cell::new(0);
        let mut handlers = V::handlers()
            .on(|_: &i32| ints.set(ints.get() + 1))
            .on(|_: &String| texts.set(texts.get() + 1));

        V::new(5i32).dispatch_using(&mut handlers);
        assert_eq!((ints.get(), texts.get()), (1, 0));

        V::from_text("abcd").dispatch_using(&mut handlers);
        assert_eq!((ints.get(), texts.get()), (1, 1));
    }

    #[test]
    fn unhandled_alternative_is_a_no_op() {
        let seen = Cell::new(None);
        let mut handlers = V::handlers().on(|x: &i32| seen.set(Some(*x)));

        let text = V::from_text("abcd");
        text.dispatch_using(&mut handlers);
        assert_eq!(seen.get(), None);
        assert_eq!(text.get_or_die::<String, _>(), "abcd");

        V::new(9i32).dispatch_using(&mut handlers);
        assert_eq!(seen.get(), Some(9));
    }

    #[test]
    fn empty_table() {
        let mut handlers = V::handlers();
        V::new(1i32).dispatch_using(&mut handlers);
        V::from_text("x").dispatch_using(&mut handlers);
    }

    #[test]
    fn later_install_replaces_earlier() {
        let last = Cell::new(0);
        let mut handlers = V::handlers()
            .on(|_: &i32| last.set(1))
            .on(|_: &i32| last.set(2));

        V::new(0i32).dispatch_using(&mut handlers);
        assert_eq!(last.get(), 2);
    }

    #[test]
    fn by_index_with_repeated_types() {
        type Twice = Variant![u32, u32];

        let seen = Cell::new(0);
        let mut handlers = Twice::handlers().on_at::<U1, _>(|x| seen.set(*x));

        Twice::new_at::<crate::index::U0>(3).dispatch_using(&mut handlers);
        assert_eq!(seen.get(), 0);
        Twice::new_at::<U1>(4).dispatch_using(&mut handlers);
        assert_eq!(seen.get(), 4);
    }

    struct Counter {
        ints: i64,
        texts: usize,
    }

    impl Handler<i32> for &mut Counter {
        fn run(&mut self, value: &i32) {
            self.ints += i64::from(*value);
        }
    }

    impl Handler<String> for &mut Counter {
        fn run(&mut self, value: &String) {
            self.texts += value.len();
        }
    }

    #[test]
    fn installed_handler_struct() {
        let mut counter = Counter { ints: 0, texts: 0 };
        let mut handlers = V::handlers().install::<i32, _, _>(&mut counter);

        V::new(40i32).dispatch_using(&mut handlers);
        V::from_text("ignored").dispatch_using(&mut handlers);
        drop(handlers);

        assert_eq!(counter.ints, 40);
        assert_eq!(counter.texts, 0);
    }

    #[test]
    fn padded_marker_slots() {
        type Wide = Padded![i32];

        let hits = Cell::new(0);
        let mut handlers = Wide::handlers().on(|_: &i32| hits.set(hits.get() + 1));
        Wide::new(Empty::<4>).dispatch_using(&mut handlers);
        assert_eq!(hits.get(), 0);

        let mut handlers = Wide::handlers().on(|_: &Empty<4>| hits.set(hits.get() + 10));
        Wide::new(Empty::<4>).dispatch_using(&mut handlers);
        Wide::new(1i32).dispatch_using(&mut handlers);
        assert_eq!(hits.get(), 10);
    }
}
