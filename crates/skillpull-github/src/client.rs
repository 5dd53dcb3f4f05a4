//! GitHub REST client for repository snapshots
//!
//! Provides [`GitHubClient`], which downloads `/repos/{owner}/{repo}/tarball`
//! and decodes it into a [`FileSet`].

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::redirect::Policy;
use skillpull_types::FileSet;
use tracing::{debug, info};

use crate::config::GitHubConfig;
use crate::error::{FetchError, Result};

const GITHUB_MIME_TYPE: &str = "application/vnd.github+json";
const CLIENT_USER_AGENT: &str = concat!("skillpull/", env!("CARGO_PKG_VERSION"));
const MAX_REDIRECTS: usize = 10;

/// API path of a repository tarball, optionally at `git_ref`
#[must_use]
pub fn tarball_path(owner: &str, repo: &str, git_ref: Option<&str>) -> String {
    match git_ref {
        Some(git_ref) => format!("/repos/{owner}/{repo}/tarball/{git_ref}"),
        None => format!("/repos/{owner}/{repo}/tarball"),
    }
}

/// Handle for fetching repository snapshots
///
/// Wraps a `reqwest::Client`, which is `Clone + Send + Sync` and pools
/// connections, so one handle can serve many fetches.
#[derive(Debug, Clone)]
pub struct GitHubClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl GitHubClient {
    /// Build a client from configuration
    ///
    /// # Errors
    /// Returns [`FetchError::Http`] if the HTTP client cannot be built
    pub fn new(config: &GitHubConfig) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_MIME_TYPE));
        headers.insert(USER_AGENT, HeaderValue::from_static(CLIENT_USER_AGENT));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .redirect(Policy::limited(MAX_REDIRECTS))
            .timeout(config.timeout())
            .build()?;

        let base_url = config.resolved_base_url().to_string();
        debug!(
            base_url = %base_url,
            authenticated = config.token.as_deref().is_some_and(|t| !t.is_empty()),
            "GitHub client ready"
        );

        Ok(Self {
            http,
            base_url,
            token: config.token.clone().filter(|token| !token.is_empty()),
        })
    }

    /// API base URL in use
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Download the gzip tarball of a repository
    ///
    /// # Errors
    /// Returns [`FetchError::Status`] on HTTP 4xx/5xx and
    /// [`FetchError::Http`] on transport failure
    pub async fn fetch_tarball(
        &self,
        owner: &str,
        repo: &str,
        git_ref: Option<&str>,
    ) -> Result<Vec<u8>> {
        let path = tarball_path(owner, repo, git_ref);
        let url = format!("{}{}", self.base_url, path);
        info!("Fetching {}/{} tarball (ref: {})", owner, repo, git_ref.unwrap_or("default"));

        let mut request = self.http.get(&url);
        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }
        let response = request.send().await?;

        let status = response.status();
        debug!(%status, url = %response.url(), "GitHub response received");

        if status.is_client_error() || status.is_server_error() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                message: format!(
                    "GitHub API error: {} {} for {}",
                    status.as_u16(),
                    status.canonical_reason().unwrap_or_default(),
                    path
                ),
            });
        }

        let body = response.bytes().await?;
        debug!(bytes = body.len(), "Tarball downloaded");
        Ok(body.to_vec())
    }

    /// Download and decode a repository snapshot
    ///
    /// # Errors
    /// Returns any [`fetch_tarball`](Self::fetch_tarball) error, or
    /// [`FetchError::Archive`] if the body is not a valid tarball
    pub async fn fetch_repo(
        &self,
        owner: &str,
        repo: &str,
        git_ref: Option<&str>,
    ) -> Result<FileSet> {
        let tarball = self.fetch_tarball(owner, repo, git_ref).await?;
        let files = skillpull_archive::decode(&tarball)?;
        info!("Fetched {}/{}: {} files", owner, repo, files.len());
        Ok(files)
    }
}
