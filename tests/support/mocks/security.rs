// tests/support/mocks/security.rs
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use gazette_core::application::{
    ApplicationResult,
    dto::{AuthTokenDto, AuthenticatedUser, TokenSubject},
    error::ApplicationError,
    ports::security::TokenManager,
};
use gazette_core::domain::user::{Role, UserId, Username};

pub const STAFF_TOKEN: &str = "staff-token";
pub const ALICE_TOKEN: &str = "alice-token";
pub const BOB_TOKEN: &str = "bob-token";
pub const EXPIRED_TOKEN: &str = "expired-token";

/// Resolves a fixed set of tokens to known callers.
#[derive(Clone, Debug, Default)]
pub struct DummyTokenManager;

#[async_trait]
impl TokenManager for DummyTokenManager {
    async fn issue(&self, _subject: TokenSubject) -> ApplicationResult<AuthTokenDto> {
        Err(ApplicationError::infrastructure("not implemented"))
    }

    async fn authenticate(&self, token: &str) -> ApplicationResult<AuthenticatedUser> {
        match token {
            STAFF_TOKEN => Ok(staff()),
            ALICE_TOKEN => Ok(alice()),
            BOB_TOKEN => Ok(bob()),
            EXPIRED_TOKEN => Err(ApplicationError::unauthorized("expired token")),
            _ => Err(ApplicationError::unauthorized("invalid token")),
        }
    }
}

fn user(id: i64, name: &str, role: Role, now: DateTime<Utc>) -> AuthenticatedUser {
    AuthenticatedUser {
        id: UserId::new(id).expect("invalid user id"),
        username: Username::new(name).expect("invalid username"),
        role,
        capabilities: role.default_capabilities(),
        issued_at: now,
        expires_at: now + Duration::hours(1),
    }
}

pub fn staff() -> AuthenticatedUser {
    user(1, "editor", Role::Staff, super::time::fixed_now())
}

pub fn alice() -> AuthenticatedUser {
    user(2, "alice", Role::Member, super::time::fixed_now())
}

pub fn bob() -> AuthenticatedUser {
    user(3, "bob", Role::Member, super::time::fixed_now())
}
