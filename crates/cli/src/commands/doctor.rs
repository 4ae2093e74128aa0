//! `deskhand doctor` — Diagnose system health.

use deskhand_config::AppConfig;
use deskhand_core::provider::Provider;

pub async fn run() -> Result<(), Box<dyn std::error::Error>> {
    println!("🩺 deskhand Doctor — System Diagnostics");
    println!("=======================================\n");

    let mut issues = 0;

    // Check config
    let config_path = AppConfig::config_dir().join("config.toml");
    let config = if config_path.exists() {
        match AppConfig::load() {
            Ok(config) => {
                println!("  ✅ Config file valid");
                Some(config)
            }
            Err(e) => {
                println!("  ❌ Config file invalid: {e}");
                issues += 1;
                None
            }
        }
    } else {
        println!("  ❌ No config file — run `deskhand onboard`");
        issues += 1;
        // Env-only setups still work; check what the defaults resolve to
        AppConfig::load().ok()
    };

    if let Some(config) = &config {
        // Check API key
        if config.api_key.is_some() || !config.providers.is_empty() {
            println!("  ✅ API key configured");
        } else {
            println!("  ⚠️  No API key configured — add api_key to config.toml");
            issues += 1;
        }

        // Check session storage
        let sessions_dir = config.sessions_dir();
        if sessions_dir.exists() {
            println!("  ✅ Sessions directory exists: {}", sessions_dir.display());
        } else {
            println!("  ⚠️  No sessions directory yet (created on first chat)");
        }

        // Check provider reachability
        let router = deskhand_providers::router::build_from_config(config);
        match router.default() {
            Some(provider) => match provider.health_check().await {
                Ok(true) => println!("  ✅ Provider '{}' reachable", provider.name()),
                Ok(false) => {
                    println!("  ⚠️  Provider '{}' responded unhealthy", provider.name());
                    issues += 1;
                }
                Err(e) => {
                    println!("  ❌ Provider '{}' unreachable: {e}", provider.name());
                    issues += 1;
                }
            },
            None => {
                println!("  ❌ No default provider configured");
                issues += 1;
            }
        }
    }

    // Summary
    println!();
    if issues == 0 {
        println!("  🎉 All checks passed!");
    } else {
        println!("  ⚠️  {issues} issue(s) found. See above for details.");
    }

    Ok(())
}
