// ABOUTME: GitHub REST client for pull request metadata, commits, and changed files
// ABOUTME: Parses PR URLs and maps 401/404 responses to dedicated errors

use std::time::Duration;

use lazy_static::lazy_static;
use prdforge_core::types::{CommitSummary, FileChange, PullRequestData};
use regex::Regex;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tracing::{debug, info};

use crate::error::{IntegrationError, Result};

const GITHUB_API_URL: &str = "https://api.github.com";
const USER_AGENT: &str = concat!("prdforge/", env!("CARGO_PKG_VERSION"));
const MAX_FILES: u32 = 100;

lazy_static! {
    static ref PR_URL_RE: Regex =
        Regex::new(r"github\.com/([^/]+)/([^/]+)/pull/(\d+)").expect("valid PR URL regex");
}

/// Owner, repository, and number extracted from a pull request URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestRef {
    pub owner: String,
    pub repo: String,
    pub number: u64,
}

/// Parse `https://github.com/<owner>/<repo>/pull/<n>` (scheme and trailing path optional)
pub fn parse_pr_url(url: &str) -> Result<PullRequestRef> {
    let caps = PR_URL_RE
        .captures(url)
        .ok_or_else(|| IntegrationError::InvalidPrUrl(url.to_string()))?;

    let number = caps[3]
        .parse::<u64>()
        .map_err(|_| IntegrationError::InvalidPrUrl(url.to_string()))?;

    Ok(PullRequestRef {
        owner: caps[1].to_string(),
        repo: caps[2].to_string(),
        number,
    })
}

#[derive(Debug, Deserialize)]
struct GhPullRequest {
    title: String,
    body: Option<String>,
    user: Option<GhUser>,
    state: String,
    base: GhBranch,
    head: GhBranch,
    #[serde(default)]
    additions: u64,
    #[serde(default)]
    deletions: u64,
    created_at: Option<String>,
    updated_at: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GhUser {
    login: String,
}

#[derive(Debug, Deserialize)]
struct GhBranch {
    #[serde(rename = "ref")]
    ref_name: String,
}

#[derive(Debug, Deserialize)]
struct GhCommit {
    sha: String,
    commit: GhCommitDetail,
}

#[derive(Debug, Deserialize)]
struct GhCommitDetail {
    message: String,
    author: Option<GhCommitAuthor>,
}

#[derive(Debug, Deserialize)]
struct GhCommitAuthor {
    name: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GhFile {
    filename: String,
    status: String,
    #[serde(default)]
    additions: u64,
    #[serde(default)]
    deletions: u64,
    #[serde(default)]
    changes: u64,
}

#[derive(Debug, Deserialize)]
struct GhErrorBody {
    message: String,
}

pub struct GitHubClient {
    client: Client,
    token: Option<String>,
    base_url: String,
}

impl GitHubClient {
    /// Anonymous access works for public repositories; private ones need a token with `repo` scope
    pub fn new(token: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(USER_AGENT)
            .build()?;

        Ok(Self {
            client,
            token: token.filter(|t| !t.trim().is_empty()),
            base_url: GITHUB_API_URL.to_string(),
        })
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    fn get(&self, path: &str) -> RequestBuilder {
        let request = self
            .client
            .get(format!("{}{}", self.base_url, path))
            .header("Accept", "application/vnd.github+json");

        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder, url: &str) -> Result<T> {
        let response = request.send().await?;
        let response = check_status(response, url).await?;
        Ok(response.json::<T>().await?)
    }

    /// Fetch PR details, its commits, and up to 100 changed files
    pub async fn fetch_pull_request(&self, url: &str) -> Result<PullRequestData> {
        let pr_ref = parse_pr_url(url)?;
        info!(
            "Fetching pull request {}/{}#{}",
            pr_ref.owner, pr_ref.repo, pr_ref.number
        );

        let base_path = format!(
            "/repos/{}/{}/pulls/{}",
            pr_ref.owner, pr_ref.repo, pr_ref.number
        );

        let pr: GhPullRequest = self.send_json(self.get(&base_path), url).await?;

        let commits: Vec<GhCommit> = self
            .send_json(
                self.get(&format!("{}/commits", base_path))
                    .query(&[("per_page", MAX_FILES)]),
                url,
            )
            .await?;

        let files: Vec<GhFile> = self
            .send_json(
                self.get(&format!("{}/files", base_path))
                    .query(&[("per_page", MAX_FILES)]),
                url,
            )
            .await?;

        debug!(
            "Fetched {} commits and {} files for {}",
            commits.len(),
            files.len(),
            url
        );

        Ok(build_pull_request_data(url, pr_ref, pr, commits, files))
    }
}

async fn check_status(response: Response, url: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    match status {
        StatusCode::NOT_FOUND => Err(IntegrationError::PrNotFound(url.to_string())),
        StatusCode::UNAUTHORIZED => Err(IntegrationError::Unauthorized),
        _ => {
            let body = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<GhErrorBody>(&body)
                .map(|b| b.message)
                .unwrap_or_else(|_| format!("{} {}", status.as_u16(), body.trim()));
            Err(IntegrationError::GitHub(message))
        }
    }
}

fn build_pull_request_data(
    url: &str,
    pr_ref: PullRequestRef,
    pr: GhPullRequest,
    commits: Vec<GhCommit>,
    files: Vec<GhFile>,
) -> PullRequestData {
    let files: Vec<FileChange> = files
        .into_iter()
        .map(|f| FileChange {
            filename: f.filename,
            status: f.status,
            additions: f.additions,
            deletions: f.deletions,
            changes: f.changes,
        })
        .collect();

    let commits = commits
        .into_iter()
        .map(|c| CommitSummary {
            sha: c.sha,
            message: c.commit.message,
            author: c
                .commit
                .author
                .and_then(|a| a.name)
                .unwrap_or_else(|| "Unknown".to_string()),
        })
        .collect();

    PullRequestData {
        url: url.to_string(),
        owner: pr_ref.owner,
        repo: pr_ref.repo,
        pr_number: pr_ref.number,
        title: pr.title,
        description: pr.body,
        author: pr
            .user
            .map(|u| u.login)
            .unwrap_or_else(|| "Unknown".to_string()),
        state: pr.state,
        base: pr.base.ref_name,
        head: pr.head.ref_name,
        additions: pr.additions,
        deletions: pr.deletions,
        diff: format!(
            "{} files changed, +{} -{}",
            files.len(),
            pr.additions,
            pr.deletions
        ),
        commits,
        files,
        created_at: pr.created_at,
        updated_at: pr.updated_at,
    }
}
