// src/bin/mint_token.rs
//! Issue a bearer token for local testing:
//! `mint_token <user-id> <username> [staff|member]`.
use anyhow::{Context, Result, bail};
use gazette_core::application::{dto::TokenSubject, ports::security::TokenManager};
use gazette_core::config::AppConfig;
use gazette_core::domain::user::{Role, UserId, Username};
use gazette_core::infrastructure::security::token::BiscuitTokenManager;

#[tokio::main]
async fn main() -> Result<()> {
    let mut args = std::env::args().skip(1);
    let (Some(raw_id), Some(raw_name)) = (args.next(), args.next()) else {
        bail!("usage: mint_token <user-id> <username> [staff|member]");
    };
    let role: Role = args
        .next()
        .as_deref()
        .unwrap_or("member")
        .parse()
        .context("invalid role")?;

    let user_id = UserId::new(raw_id.parse().context("user id must be an integer")?)?;
    let username = Username::new(raw_name)?;

    let config = AppConfig::from_env()?;
    let manager = BiscuitTokenManager::new(config.biscuit_private_key(), config.token_ttl())?;

    let mut subject = TokenSubject::new(user_id, username, role);
    subject.capabilities = role.default_capabilities();
    let token = manager.issue(subject).await?;

    println!("{}", token.token);
    eprintln!("expires at {}", token.expires_at.to_rfc3339());
    Ok(())
}
