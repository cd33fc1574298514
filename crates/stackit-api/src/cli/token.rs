//! `stackit dev-token`: mint a bearer token for local testing.

use anyhow::Result;

use stackit_infra::token::TokenClaims;
use stackit_types::config::ServerConfig;

use crate::state::build_verifier;

/// Sign a token for `user` with the configured secret and print it.
pub fn print_dev_token(config: &ServerConfig, user: &str, ttl_secs: i64) -> Result<()> {
    let token = dev_token(config, user, ttl_secs)?;
    println!("{token}");
    Ok(())
}

fn dev_token(config: &ServerConfig, user: &str, ttl_secs: i64) -> Result<String> {
    if user.trim().is_empty() {
        anyhow::bail!("--user must not be empty");
    }
    let signer = build_verifier(config)?;
    Ok(signer.sign(&TokenClaims::for_user(user, ttl_secs)))
}
