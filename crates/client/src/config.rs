//! Client configuration.

/// Connection settings for the partner orders API.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    base_url: String,
    simulate_delay: bool,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            simulate_delay: false,
        }
    }

    /// Pause each outbound request for a random 0-3000 ms, so loading
    /// states can be exercised against a fast local backend. Off unless
    /// explicitly enabled.
    pub fn with_simulated_delay(mut self, enabled: bool) -> Self {
        self.simulate_delay = enabled;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn simulate_delay(&self) -> bool {
        self.simulate_delay
    }
}
