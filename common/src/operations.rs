//! Operation wrappers selecting a [`Handler`] implementation.
//!
//! [`Handler`]: crate::Handler

/// Operation of performing a remote call described by the wrapped value.
#[derive(Clone, Copy, Debug)]
pub struct Perform<T>(pub T);
