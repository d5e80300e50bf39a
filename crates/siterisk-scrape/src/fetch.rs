//! Low-level HTTP helpers for scraped page sources.

use std::time::Duration;

use crate::error::ScrapeError;

const BROWSER_FALLBACK_UA: &str =
    "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0.0.0 Safari/537.36";
const PAGE_FETCH_ATTEMPTS: usize = 3;
const PAGE_FETCH_BACKOFF_MS: [u64; 3] = [0, 300, 900];

/// Build the shared `reqwest::Client` for page fetches.
///
/// # Errors
///
/// Returns [`ScrapeError::Http`] if the client cannot be constructed.
pub fn build_page_client(timeout_secs: u64) -> Result<reqwest::Client, ScrapeError> {
    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .connect_timeout(Duration::from_secs(10))
        .build()?;
    Ok(client)
}

/// Fetch the HTML body of a URL, trying the supplied user-agent first and
/// then a browser-profile fallback UA. Returns the first usable body.
///
/// Some data portals hide content or serve an interstitial to non-browser
/// user agents; a body that looks like a bot challenge is treated as
/// unusable and the next attempt proceeds after a short backoff.
///
/// # Errors
///
/// Returns [`ScrapeError::AllAttemptsFailed`] when every attempt returned a
/// non-2xx status or an unusable body.
pub async fn fetch_page(
    client: &reqwest::Client,
    url: &str,
    user_agent: &str,
) -> Result<String, ScrapeError> {
    for attempt in 0..PAGE_FETCH_ATTEMPTS {
        if let Some(delay_ms) = PAGE_FETCH_BACKOFF_MS.get(attempt).copied() {
            if delay_ms > 0 {
                tokio::time::sleep(Duration::from_millis(delay_ms)).await;
            }
        }

        let mut user_agents = vec![user_agent.to_string()];
        if user_agent != BROWSER_FALLBACK_UA {
            user_agents.push(BROWSER_FALLBACK_UA.to_string());
        }

        let mut last_error: Option<reqwest::Error> = None;

        for ua in user_agents {
            let response = match client
                .get(url)
                .header(reqwest::header::USER_AGENT, &ua)
                .header(reqwest::header::ACCEPT, "text/html,application/xhtml+xml")
                .send()
                .await
            {
                Ok(resp) => resp,
                Err(err) => {
                    last_error = Some(err);
                    continue;
                }
            };

            if response.status().is_success() {
                let body = response.text().await?;
                if is_usable_html(&body) {
                    return Ok(body);
                }
            }
        }

        if let Some(err) = last_error {
            tracing::debug!(url, attempt, error = %err, "page fetch failed; retrying");
        }
    }

    // Every attempt returned non-2xx or unusable HTML — surface the failure
    // so callers can distinguish "page unreachable" from "fields missing".
    Err(ScrapeError::AllAttemptsFailed {
        url: url.to_owned(),
    })
}

/// Perform a simple GET and parse the body as JSON.
///
/// # Errors
///
/// Returns [`ScrapeError::UnexpectedStatus`] for non-2xx responses and
/// [`ScrapeError::Http`] for network or body-parse failures.
pub async fn fetch_json(
    client: &reqwest::Client,
    url: &str,
    user_agent: &str,
) -> Result<serde_json::Value, ScrapeError> {
    let response = client
        .get(url)
        .header(reqwest::header::USER_AGENT, user_agent)
        .header(reqwest::header::ACCEPT, "application/json")
        .send()
        .await?;
    if !response.status().is_success() {
        return Err(ScrapeError::UnexpectedStatus {
            status: response.status().as_u16(),
            url: url.to_owned(),
        });
    }
    let value = response.json::<serde_json::Value>().await?;
    Ok(value)
}

fn is_usable_html(body: &str) -> bool {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return false;
    }
    !looks_like_bot_challenge(trimmed)
}

fn looks_like_bot_challenge(body: &str) -> bool {
    let lowered = body.to_ascii_lowercase();
    let has_cloudflare_banner = lowered.contains("attention required! | cloudflare");
    let has_challenge_platform = lowered.contains("/cdn-cgi/challenge-platform/");
    let has_just_a_moment = lowered.contains("just a moment...");
    let has_cookie_gate = lowered.contains("please enable cookies");
    let has_cf_chl = lowered.contains("cf-chl-");

    has_cloudflare_banner
        || has_challenge_platform
        || (has_just_a_moment && has_cookie_gate)
        || (has_just_a_moment && has_cf_chl)
}
