//! Zero-sized filler alternatives.
//!
//! [`Padded!`] fills the unused slots of a variant with [`Empty`] markers up
//! to [`MAX_ARITY`], for code that wants every variant to expose the same
//! sixteen slots. Markers compare equal to themselves, format as nothing and
//! are skipped by dispatch unless a handler is installed for them.
//!
//! [`Padded!`]: crate::Padded
//! [`MAX_ARITY`]: crate::index::MAX_ARITY

use core::fmt;

/// An empty alternative occupying slot `N`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Empty<const N: u8>;

impl<const N: u8> Empty<N> {
    /// The slot this marker fills.
    pub const SLOT: u8 = N;
}

impl<const N: u8> fmt::Display for Empty<N> {
    fn fmt(&self, _: &mut fmt::Formatter<'_>) -> fmt::Result {
        Ok(())
    }
}
