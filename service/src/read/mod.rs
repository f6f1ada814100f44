//! Read models of the listing endpoints.

pub mod client;
pub mod inventory;
pub mod product;
pub mod sale;
pub mod user;
