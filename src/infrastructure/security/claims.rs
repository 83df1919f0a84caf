// src/infrastructure/security/claims.rs
use crate::application::{
    dto::AuthenticatedUser,
    error::{ApplicationError, ApplicationResult},
};
use crate::domain::user::{Capability, Role, UserId, Username};
use biscuit_auth::builder::{Fact, Predicate, Term};
use chrono::{DateTime, Utc};
use std::collections::HashSet;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Turn the authority facts of a verified token into the caller identity.
///
/// Role capabilities are granted on top of any `right` facts in the token.
pub fn parse_claims(facts: Vec<Fact>) -> ApplicationResult<AuthenticatedUser> {
    let ctx = ClaimsContext::from_facts(facts);
    build_authenticated_user(ctx)
}

fn build_authenticated_user(ctx: ClaimsContext) -> ApplicationResult<AuthenticatedUser> {
    let missing = |what: &str| ApplicationError::unauthorized(format!("missing {what}"));

    let id = UserId::new(ctx.user_id.ok_or_else(|| missing("user id"))?)
        .map_err(|err| ApplicationError::unauthorized(err.to_string()))?;
    let username = Username::new(ctx.username.ok_or_else(|| missing("username"))?)
        .map_err(|err| ApplicationError::unauthorized(err.to_string()))?;
    let role = ctx.role.ok_or_else(|| missing("role"))?;
    let issued_at = ctx.issued_at.ok_or_else(|| missing("issued_at"))?;
    let expires_at = ctx.expires_at.ok_or_else(|| missing("expires_at"))?;

    let mut capabilities = role.default_capabilities();
    capabilities.extend(ctx.capabilities);

    Ok(AuthenticatedUser {
        id,
        username,
        role,
        capabilities,
        issued_at: DateTime::<Utc>::from(issued_at),
        expires_at: DateTime::<Utc>::from(expires_at),
    })
}

#[derive(Default)]
struct ClaimsContext {
    user_id: Option<i64>,
    username: Option<String>,
    role: Option<Role>,
    issued_at: Option<SystemTime>,
    expires_at: Option<SystemTime>,
    capabilities: HashSet<Capability>,
}

fn as_date(term: Option<&Term>) -> Option<SystemTime> {
    match term {
        Some(Term::Date(seconds)) => Some(UNIX_EPOCH + Duration::from_secs(*seconds)),
        _ => None,
    }
}

impl ClaimsContext {
    fn from_facts(facts: Vec<Fact>) -> Self {
        let mut ctx = ClaimsContext::default();
        for fact in facts {
            ctx.apply_predicate(fact.predicate);
        }
        ctx
    }

    fn apply_predicate(&mut self, predicate: Predicate) {
        let terms = predicate.terms.as_slice();
        match (predicate.name.as_str(), terms) {
            ("user", [Term::Integer(id), Term::Str(name)]) => {
                self.user_id = Some(*id);
                self.username = Some(name.clone());
            }
            ("role", [Term::Str(name)]) => {
                self.role = name.parse().ok();
            }
            ("issued_at", [date]) => self.issued_at = as_date(Some(date)),
            ("expires_at", [date]) => self.expires_at = as_date(Some(date)),
            ("right", [Term::Str(resource), Term::Str(action)]) => {
                self.capabilities
                    .insert(Capability::new(resource.clone(), action.clone()));
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fact(name: &str, terms: Vec<Term>) -> Fact {
        Fact::new(name.to_string(), terms)
    }

    fn base_facts() -> Vec<Fact> {
        vec![
            fact("user", vec![Term::Integer(7), Term::Str("bob".into())]),
            fact("role", vec![Term::Str("member".into())]),
            fact("issued_at", vec![Term::Date(1_700_000_000)]),
            fact("expires_at", vec![Term::Date(1_700_003_600)]),
        ]
    }

    #[test]
    fn member_claims_yield_member_capabilities() {
        let user = parse_claims(base_facts()).unwrap();
        assert_eq!(user.id, UserId(7));
        assert_eq!(user.role, Role::Member);
        assert!(user.has_capability("comments", "create"));
        assert!(!user.has_capability("comments", "moderate"));
    }

    #[test]
    fn explicit_rights_extend_role_defaults() {
        let mut facts = base_facts();
        facts.push(fact(
            "right",
            vec![Term::Str("comments".into()), Term::Str("moderate".into())],
        ));
        let user = parse_claims(facts).unwrap();
        assert!(user.has_capability("comments", "moderate"));
    }

    #[test]
    fn missing_role_is_unauthorized() {
        let facts: Vec<Fact> = base_facts()
            .into_iter()
            .filter(|f| f.predicate.name != "role")
            .collect();
        let err = parse_claims(facts).unwrap_err();
        assert!(matches!(err, ApplicationError::Unauthorized(_)));
    }
}
