//! Network reachability, sampled once at startup.

use crate::constants::USER_AGENT;
use std::time::Duration;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NetworkStatus {
    Online,
    Offline,
}

impl NetworkStatus {
    /// Issues a single bounded GET to `url`.
    ///
    /// Any HTTP response counts as reachable; only transport failures mean offline.
    pub fn probe(url: &str, timeout: Duration) -> Self {
        let client = match reqwest::blocking::Client::builder()
            .timeout(timeout)
            .user_agent(USER_AGENT)
            .build()
        {
            Ok(client) => client,
            Err(e) => {
                debug!(error = %e, "failed to build probe client");
                return Self::Offline;
            }
        };

        match client.get(url).send() {
            Ok(response) => {
                debug!(url, status = %response.status(), "network probe succeeded");
                Self::Online
            }
            Err(e) => {
                debug!(url, error = %e, "network probe failed");
                Self::Offline
            }
        }
    }

    #[must_use]
    pub fn is_online(self) -> bool {
        self == Self::Online
    }
}
