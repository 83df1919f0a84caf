// src/domain/user/mod.rs
//! Identities are owned by the external identity provider; the domain only
//! models what a verified token tells us about the caller.
pub mod value_objects;

pub use value_objects::{Capability, Role, UserId, Username};
