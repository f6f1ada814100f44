//! Marker types distinguishing [`DateTimeOf`]s of the same entity.
//!
//! [`DateTimeOf`]: crate::DateTimeOf

/// Moment a record was created at.
#[derive(Clone, Copy, Debug)]
pub struct Creation;

/// Moment a record was last updated at.
#[derive(Clone, Copy, Debug)]
pub struct Update;

/// Moment a record stops being valid at.
#[derive(Clone, Copy, Debug)]
pub struct Expiration;
