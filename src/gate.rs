//! Display-mode gate: one best-effort outbound probe deciding whether the
//! game or an alternate surface should be shown.
//!
//! The engine is never involved in this decision; callers consult the gate
//! once at startup and only enter the game when it answers [`DisplayMode::Game`].
//! Every failure path (disabled, unreachable, timeout, bad status) fails
//! open to the game.

use crate::config::GateConfig;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayMode {
    Game,
    Alternate,
}

/// Resolve the display mode for this run.
pub async fn resolve(config: &GateConfig) -> DisplayMode {
    if !config.enabled || config.url.trim().is_empty() {
        return DisplayMode::Game;
    }

    #[cfg(feature = "gate")]
    {
        match probe(config).await {
            Ok(mode) => mode,
            Err(err) => {
                log::warn!("gate probe failed: {} (showing game)", err);
                DisplayMode::Game
            }
        }
    }

    #[cfg(not(feature = "gate"))]
    {
        log::debug!("gate support compiled out; showing game");
        DisplayMode::Game
    }
}

#[cfg(feature = "gate")]
async fn probe(config: &GateConfig) -> anyhow::Result<DisplayMode> {
    use anyhow::anyhow;
    use std::time::Duration;
    use tokio::time::timeout;

    let client = reqwest::Client::new();
    let request = client.get(&config.url);
    let timeout_duration = Duration::from_secs(config.timeout_seconds as u64);

    let response = timeout(timeout_duration, request.send())
        .await
        .map_err(|_| anyhow!("request timeout after {}s", config.timeout_seconds))?
        .map_err(|e| anyhow!("http request failed: {}", e))?;

    if !response.status().is_success() {
        return Err(anyhow!("gate returned status: {}", response.status()));
    }

    let body = response
        .text()
        .await
        .map_err(|e| anyhow!("failed to read gate body: {}", e))?;
    log::debug!("gate responded: {}", crate::logutil::escape_log(&body));
    Ok(mode_from_body(&body))
}

/// An empty or literal "game" body keeps the game; any other payload
/// (typically the alternate surface's address) switches away.
#[cfg_attr(not(feature = "gate"), allow(dead_code))]
fn mode_from_body(body: &str) -> DisplayMode {
    let trimmed = body.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("game") {
        DisplayMode::Game
    } else {
        DisplayMode::Alternate
    }
}
