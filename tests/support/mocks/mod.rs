// tests/support/mocks/mod.rs
#![allow(dead_code)]
#![allow(unused_imports)]

pub mod security;
pub mod time;
pub mod util;

pub use security::{
    ALICE_TOKEN, BOB_TOKEN, DummyTokenManager, EXPIRED_TOKEN, STAFF_TOKEN, alice, bob, staff,
};
pub use time::fixed_now;
pub use util::{DummyClock, DummySlug};
