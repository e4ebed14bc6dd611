//! Per-alternative forwarding of the standard traits.
//!
//! Each trait walks the type list down to the active tag and applies the
//! alternative's own implementation there. A `Variant` gets the standard
//! trait exactly when every alternative has it.

use core::{
    fmt,
    hash::{Hash, Hasher},
    mem::ManuallyDrop,
};

use crate::repr::{Cons, Nil, SumList};

pub trait SumClone: SumList {
    #[doc(hidden)]
    unsafe fn clone(this: &Self::Repr, tag: u8) -> ManuallyDrop<Self::Repr>;
}

impl SumClone for () {
    unsafe fn clone(this: &Nil, _: u8) -> ManuallyDrop<Nil> {
        match this.0 {}
    }
}

impl<Head: Clone, Tail: SumClone> SumClone for (Head, Tail) {
    unsafe fn clone(this: &Self::Repr, tag: u8) -> ManuallyDrop<Self::Repr> {
        ManuallyDrop::new(if tag == 0 {
            Cons {
                data: ManuallyDrop::new(unsafe { Head::clone(&this.data) }),
            }
        } else {
            Cons {
                next: unsafe { Tail::clone(&this.next, tag - 1) },
            }
        })
    }
}

pub trait SumPartialEq: SumList {
    #[doc(hidden)]
    unsafe fn eq(this: &Self::Repr, other: &Self::Repr, tag: u8) -> bool;
}

impl SumPartialEq for () {
    unsafe fn eq(this: &Nil, _: &Nil, _: u8) -> bool {
        match this.0 {}
    }
}

impl<Head: PartialEq, Tail: SumPartialEq> SumPartialEq for (Head, Tail) {
    unsafe fn eq(this: &Self::Repr, other: &Self::Repr, tag: u8) -> bool {
        if tag == 0 {
            unsafe { *this.data == *other.data }
        } else {
            unsafe { Tail::eq(&this.next, &other.next, tag - 1) }
        }
    }
}

pub trait SumHash: SumList {
    #[doc(hidden)]
    unsafe fn hash<H: Hasher>(this: &Self::Repr, tag: u8, state: &mut H);
}

impl SumHash for () {
    unsafe fn hash<H: Hasher>(this: &Nil, _: u8, _: &mut H) {
        match this.0 {}
    }
}

impl<Head: Hash, Tail: SumHash> SumHash for (Head, Tail) {
    unsafe fn hash<H: Hasher>(this: &Self::Repr, tag: u8, state: &mut H) {
        if tag == 0 {
            unsafe { this.data.hash(state) }
        } else {
            unsafe { Tail::hash(&this.next, tag - 1, state) }
        }
    }
}

pub trait SumDebug: SumList {
    #[doc(hidden)]
    unsafe fn debug(this: &Self::Repr, tag: u8) -> &dyn fmt::Debug;
}

impl SumDebug for () {
    unsafe fn debug(this: &Nil, _: u8) -> &dyn fmt::Debug {
        match this.0 {}
    }
}

impl<Head: fmt::Debug, Tail: SumDebug> SumDebug for (Head, Tail) {
    unsafe fn debug(this: &Self::Repr, tag: u8) -> &dyn fmt::Debug {
        if tag == 0 {
            unsafe { &*this.data }
        } else {
            unsafe { Tail::debug(&this.next, tag - 1) }
        }
    }
}

pub trait SumDisplay: SumList {
    #[doc(hidden)]
    unsafe fn display(this: &Self::Repr, tag: u8) -> &dyn fmt::Display;
}

impl SumDisplay for () {
    unsafe fn display(this: &Nil, _: u8) -> &dyn fmt::Display {
        match this.0 {}
    }
}

impl<Head: fmt::Display, Tail: SumDisplay> SumDisplay for (Head, Tail) {
    unsafe fn display(this: &Self::Repr, tag: u8) -> &dyn fmt::Display {
        if tag == 0 {
            unsafe { &*this.data }
        } else {
            unsafe { Tail::display(&this.next, tag - 1) }
        }
    }
}
