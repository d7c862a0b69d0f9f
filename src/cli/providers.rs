//! `switchyard providers`

use crate::server::{build_registry, load_config};
use anyhow::Result;
use switchyard_llm::EnvCredentials;

/// Print each role's provider and whether it is live or simulated
pub fn run() -> Result<()> {
    let config = load_config()?;
    let registry = build_registry(&config, &EnvCredentials)?;

    println!("{:<10} {:<10} {:<10} FALLBACK", "ROLE", "PROVIDER", "KIND");
    for role in registry.list_roles() {
        let provider = registry.resolve(role);
        println!(
            "{:<10} {:<10} {:<10} {}",
            role.as_str(),
            provider.name(),
            kind(provider.is_simulated()),
            provider
                .fallback_role()
                .map_or_else(|| "-".to_string(), |r| r.to_string())
        );
    }

    match registry.premium() {
        Some(premium) => println!("\npremium: {} (general chat)", premium.name()),
        None => println!("\npremium: not configured"),
    }
    Ok(())
}

fn kind(simulated: bool) -> &'static str {
    if simulated {
        "simulated"
    } else {
        "live"
    }
}
