use thiserror::Error;

/// A typed or indexed accessor asked for an alternative that is not the
/// active one.
///
/// Returned by the `try_*` accessors of [`Variant`]. The `*_or_die`
/// accessors panic with this error's message instead.
///
/// [`Variant`]: crate::Variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error(
    "wrong alternative accessed: requested `{requested}` (index {requested_index}), \
     but `{active}` (index {active_index}) is active"
)]
pub struct WrongAlternativeAccessed {
    pub requested: &'static str,
    pub requested_index: u8,
    pub active: &'static str,
    pub active_index: u8,
}

#[cold]
#[track_caller]
pub(crate) fn die(error: WrongAlternativeAccessed) -> ! {
    panic!("{error}")
}
