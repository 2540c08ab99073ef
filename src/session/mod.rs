//! Authenticated HTTP session
//!
//! This module owns the single authenticated session used by a run:
//! - Building the HTTP client with a cookie store and per-request timeout
//! - Login against the site's access-control endpoint
//! - Bounded-retry fetches that return a failure value instead of panicking
//! - Fire-and-forget logout at the end of a run

use crate::config::Config;
use crate::MarketError;
use reqwest::Client;
use std::time::Duration;
use url::Url;

/// Path of the login endpoint on the target site
pub const LOGIN_PATH: &str = "/accesscontrol.php";

/// Path of the logout endpoint on the target site
pub const LOGOUT_PATH: &str = "/logout.php";

/// Bounded retry policy applied to every fetch
///
/// Expressed as an explicit value so the attempt count and delay can be
/// configured independently of the call sites.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total number of attempts (not retries) per fetch
    pub max_attempts: u32,

    /// Fixed delay between attempts
    pub delay: Duration,
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts,
            delay,
        }
    }
}

/// What a fetch sends besides the URL
enum Payload<'a> {
    Get,
    Form(&'a [(&'a str, &'a str)]),
}

/// One authenticated session against the market site
///
/// Acquired once per run via [`Session::login`] and released once via
/// [`Session::logout`]; the reqwest cookie store carries the auth cookies
/// in between.
pub struct Session {
    client: Client,
    base: Url,
    game_id: String,
    user: String,
    password: String,
    retry: RetryPolicy,
}

impl Session {
    /// Creates a session from the configuration
    ///
    /// Builds the HTTP client (cookie store enabled, fixed timeout) but does
    /// not touch the network; call [`Session::login`] before fetching.
    pub fn new(config: &Config) -> Result<Self, MarketError> {
        let base = Url::parse(&config.site.base_url)?;

        let client = Client::builder()
            .cookie_store(true)
            .timeout(Duration::from_secs(config.http.request_timeout_secs))
            .user_agent(concat!("maxi-market/", env!("CARGO_PKG_VERSION")))
            .gzip(true)
            .brotli(true)
            .build()?;

        Ok(Self {
            client,
            base,
            game_id: config.site.game_id.clone(),
            user: config.credentials.user.clone(),
            password: config.credentials.password.clone(),
            retry: RetryPolicy::new(
                config.http.retry_attempts,
                Duration::from_millis(config.http.retry_delay_ms),
            ),
        })
    }

    /// Logs in, establishing the session cookies
    ///
    /// Issues a single POST to the access-control endpoint. Any success or
    /// redirect status counts as a successful login; everything else is
    /// [`MarketError::LoginFailed`] and fatal for the run.
    pub async fn login(&self) -> Result<(), MarketError> {
        let url = self.url(LOGIN_PATH)?;
        let form = [
            ("user", self.user.as_str()),
            ("password", self.password.as_str()),
            ("id_gioco", self.game_id.as_str()),
            ("user_control", "Login"),
        ];

        let response = self.client.post(url).form(&form).send().await?;
        let status = response.status();

        if status.is_success() || status.is_redirection() {
            tracing::info!("Login successful");
            Ok(())
        } else {
            tracing::error!("Login failed with HTTP status {}", status);
            Err(MarketError::LoginFailed {
                status: status.as_u16(),
            })
        }
    }

    /// Fetches a page by GET with bounded retry
    ///
    /// `path` is resolved against the configured base URL and may carry a
    /// query string. Returns the response body, or
    /// [`MarketError::RetriesExhausted`] once the retry budget is spent.
    pub async fn get(&self, path: &str) -> Result<String, MarketError> {
        let url = self.url(path)?;
        self.fetch(url, Payload::Get).await
    }

    /// Submits a form by POST with bounded retry and returns the body
    pub async fn post_form(
        &self,
        path: &str,
        fields: &[(&str, &str)],
    ) -> Result<String, MarketError> {
        let url = self.url(path)?;
        self.fetch(url, Payload::Form(fields)).await
    }

    /// Releases the session
    ///
    /// Fire-and-forget GET against the logout endpoint; failures are logged
    /// and otherwise ignored since the run is already over.
    pub async fn logout(&self) {
        match self.url(LOGOUT_PATH) {
            Ok(url) => {
                if let Err(e) = self.client.get(url).send().await {
                    tracing::debug!("Logout request failed: {}", e);
                } else {
                    tracing::info!("Logged out");
                }
            }
            Err(e) => tracing::debug!("Could not build logout URL: {}", e),
        }
    }

    /// Resolves a path (with optional query) against the site base URL
    fn url(&self, path: &str) -> Result<Url, MarketError> {
        Ok(self.base.join(path)?)
    }

    /// Sends one request per attempt until a 2xx response arrives
    ///
    /// Transport errors and non-2xx statuses both consume an attempt, with
    /// the configured fixed delay in between. The last error is carried in
    /// the failure value; this function never panics.
    async fn fetch(&self, url: Url, payload: Payload<'_>) -> Result<String, MarketError> {
        let mut last_error = String::new();

        for attempt in 1..=self.retry.max_attempts {
            let request = match payload {
                Payload::Get => self.client.get(url.clone()),
                Payload::Form(fields) => self.client.post(url.clone()).form(&fields),
            };

            match request.send().await {
                Ok(response) => match response.error_for_status() {
                    Ok(response) => match response.text().await {
                        Ok(body) => return Ok(body),
                        Err(e) => last_error = e.to_string(),
                    },
                    Err(e) => last_error = e.to_string(),
                },
                Err(e) => last_error = e.to_string(),
            }

            tracing::warn!(
                "Error fetching {} (attempt {}/{}): {}",
                url,
                attempt,
                self.retry.max_attempts,
                last_error
            );

            if attempt < self.retry.max_attempts {
                tokio::time::sleep(self.retry.delay).await;
            }
        }

        Err(MarketError::RetriesExhausted {
            url: url.to_string(),
            attempts: self.retry.max_attempts,
            last_error,
        })
    }
}
