//! Identity entity and data carriers.

pub mod model;

pub use model::{CreateIdentity, Identity};
