use anyhow::Result;
use log::debug;
use reqwest::Url;
use serde::{Deserialize, Deserializer, Serialize};
use std::time::Duration;

use crate::error::PlaylistError;

pub const DEFAULT_ENDPOINT: &str = "http://localhost:5001/generate-playlist";

/// Body of a playlist request, exactly as the user typed it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Query {
    pub city: String,
    pub mood: String,
}

impl Query {
    pub fn new(city: impl Into<String>, mood: impl Into<String>) -> Self {
        Self { city: city.into(), mood: mood.into() }
    }

    /// Both fields carry something other than whitespace.
    pub fn is_complete(&self) -> bool {
        !self.city.trim().is_empty() && !self.mood.trim().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PlaylistResult {
    pub embed_url: String,
    #[serde(default, deserialize_with = "deserialize_category")]
    pub weather_category: Option<String>,
    #[serde(default, deserialize_with = "deserialize_category")]
    pub emotion_category: Option<String>,
    #[serde(default)]
    pub playlist_url: Option<String>,
}

// Older service builds answer with only the URLs; blank categories count as absent too.
fn deserialize_category<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

/// Decode a success body into a playlist, checking that the embed URL is absolute.
pub fn parse_playlist_body(body: &[u8]) -> Result<PlaylistResult, PlaylistError> {
    let result: PlaylistResult =
        serde_json::from_slice(body).map_err(|e| PlaylistError::Parse(e.to_string()))?;

    if let Err(e) = Url::parse(&result.embed_url) {
        return Err(PlaylistError::Parse(format!(
            "embed_url {:?} is not a valid URL: {}",
            result.embed_url, e
        )));
    }

    Ok(result)
}

fn transport_error(err: reqwest::Error) -> PlaylistError {
    if err.is_timeout() {
        PlaylistError::Transport("request timed out".to_string())
    } else {
        PlaylistError::Transport(err.to_string())
    }
}

pub struct PlaylistClient {
    client: reqwest::Client,
    endpoint: Url,
}

impl PlaylistClient {
    pub fn new(endpoint: Url, timeout: Option<Duration>) -> Result<Self> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }

        Ok(Self {
            client: builder.build()?,
            endpoint,
        })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    pub async fn generate_playlist(&self, query: &Query) -> Result<PlaylistResult, PlaylistError> {
        debug!("POST {} city={:?} mood={:?}", self.endpoint, query.city, query.mood);

        let response = self
            .client
            .post(self.endpoint.clone())
            .json(query)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        if !status.is_success() {
            return Err(PlaylistError::Service { status: status.to_string() });
        }

        // Read raw bytes so malformed JSON is reported as Parse, not Transport
        let body = response.bytes().await.map_err(transport_error)?;
        debug!("Playlist service answered {} with {} bytes", status, body.len());

        parse_playlist_body(&body)
    }
}
