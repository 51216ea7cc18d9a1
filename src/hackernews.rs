use std::time::Duration;

use anyhow::{bail, Result};
use reqwest::blocking::Client as HttpClient;
use reqwest::header::USER_AGENT;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use tracing::debug;

use crate::category::Category;

pub const HN_API_BASE: &str = "https://api.hnpwa.com/v0";
pub const HN_SITE_URL: &str = "https://news.ycombinator.com/";

#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request to {url} failed")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} responded with status {status}")]
    Status {
        url: String,
        status: reqwest::StatusCode,
    },
    #[error("unexpected payload from {url}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Clone)]
pub struct ClientConfig {
    pub base_url: String,
    pub user_agent: String,
    pub timeout: Duration,
    pub http_client: Option<HttpClient>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: HN_API_BASE.to_string(),
            user_agent: format!("clx/{}", crate::VERSION),
            timeout: Duration::from_secs(20),
            http_client: None,
        }
    }
}

pub struct Client {
    http: HttpClient,
    user_agent: String,
    base_url: String,
}

impl Client {
    pub fn new(config: ClientConfig) -> Result<Self> {
        if config.user_agent.trim().is_empty() {
            bail!("hackernews client user agent required");
        }
        if config.base_url.trim().is_empty() {
            bail!("hackernews client base url required");
        }

        let http = match config.http_client {
            Some(client) => client,
            None => HttpClient::builder().timeout(config.timeout).build()?,
        };

        Ok(Client {
            http,
            user_agent: config.user_agent,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn page(&self, category: Category, page: usize) -> Result<Vec<Submission>, FetchError> {
        let url = format!("{}/{}/{}.json", self.base_url, category.endpoint(), page);
        self.get_json(&url)
    }

    pub fn thread(&self, id: i64) -> Result<Comment, FetchError> {
        let url = format!("{}/item/{}.json", self.base_url, id);
        self.get_json(&url)
    }

    fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, FetchError> {
        debug!(url, "fetching");
        let response = self
            .http
            .get(url)
            .header(USER_AGENT, &self.user_agent)
            .send()
            .map_err(|source| FetchError::Transport {
                url: url.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                url: url.to_string(),
                status,
            });
        }

        let body = response.text().map_err(|source| FetchError::Transport {
            url: url.to_string(),
            source,
        })?;
        decode(url, &body)
    }
}

fn decode<T: DeserializeOwned>(url: &str, body: &str) -> Result<T, FetchError> {
    serde_json::from_str(body).map_err(|source| FetchError::Decode {
        url: url.to_string(),
        source,
    })
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Option::unwrap_or_default)
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Submission {
    #[serde(default, deserialize_with = "null_as_default")]
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(rename = "points", default, deserialize_with = "null_as_default")]
    pub score: i64,
    #[serde(rename = "user", default, deserialize_with = "null_as_default")]
    pub author: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub time_ago: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub comments_count: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub url: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub domain: String,
    #[serde(rename = "type", default, deserialize_with = "null_as_default")]
    pub kind: String,
}

impl Submission {
    pub fn has_discussion(&self) -> bool {
        !self.author.is_empty()
    }

    /// Absolute link for the browser. Text posts link to `item?id=N` on the site.
    pub fn link(&self) -> String {
        if self.url.starts_with("item?id=") {
            format!("{}{}", HN_SITE_URL, self.url)
        } else if self.url.is_empty() {
            format!("{}item?id={}", HN_SITE_URL, self.id)
        } else {
            self.url.clone()
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    #[serde(rename = "user", default, deserialize_with = "null_as_default")]
    pub author: String,
    #[serde(rename = "content", default, deserialize_with = "null_as_default")]
    pub text: String,
    #[serde(rename = "comments", default, deserialize_with = "null_as_default")]
    pub replies: Vec<Comment>,
}

impl Comment {
    pub fn new(author: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            author: author.into(),
            text: text.into(),
            replies: Vec::new(),
        }
    }

    pub fn with_reply(mut self, reply: Comment) -> Self {
        self.replies.push(reply);
        self
    }
}
