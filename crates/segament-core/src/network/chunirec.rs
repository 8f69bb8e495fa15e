use tracing::{debug, info, warn};
use ureq::Agent;

use crate::chart::Song;
use crate::config::{Settings, api};
use crate::error::Result;
use crate::network::{MusicSource, build_agent, with_fallback};

/// Client for the chunirec `music/showall` endpoint.
pub struct ChunirecClient {
    agent: Agent,
    base_url: String,
    token: Option<String>,
    user_name: Option<String>,
    region: String,
}

impl ChunirecClient {
    pub fn new(settings: &Settings) -> Self {
        Self {
            agent: build_agent(api::REQUEST_TIMEOUT),
            base_url: api::BASE_URL.to_string(),
            token: settings.access_token.clone(),
            user_name: settings.user_name.clone(),
            region: settings.region.clone(),
        }
    }

    /// Point the client at another server (mirrors, local fixtures).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    fn showall_url(&self) -> String {
        format!("{}/music/showall.json", self.base_url.trim_end_matches('/'))
    }

    fn fetch_authenticated(&self) -> Result<Vec<Song>> {
        let mut request = self
            .agent
            .get(self.showall_url())
            .query("region", &self.region);
        if let Some(token) = &self.token {
            request = request.query("token", token);
        }
        if let Some(user_name) = &self.user_name {
            request = request.query("user_name", user_name);
        }

        let mut response = request.call()?;
        let songs: Vec<Song> = response.body_mut().read_json()?;
        Ok(songs)
    }

    fn fetch_public(&self) -> Result<Vec<Song>> {
        let mut response = self.agent.get(self.showall_url()).call()?;
        let songs: Vec<Song> = response.body_mut().read_json()?;
        Ok(songs)
    }
}

impl MusicSource for ChunirecClient {
    /// Fetch every song, falling back to the public endpoint on any failure.
    ///
    /// When both calls fail the authenticated error is returned. Note that the
    /// fallback also triggers on errors unrelated to authentication.
    fn fetch_all(&self) -> Result<Vec<Song>> {
        with_fallback(
            || {
                let songs = self.fetch_authenticated()?;
                info!("  - Fetched song data from the authenticated API");
                Ok(songs)
            },
            |auth_err| {
                warn!(
                    "  - Authenticated API failed ({}), trying the public API",
                    auth_err
                );
                let songs = self.fetch_public().inspect_err(|e| {
                    debug!("  - Public API failed as well: {}", e);
                })?;
                info!("  - Fetched song data from the public API");
                Ok(songs)
            },
        )
    }
}
