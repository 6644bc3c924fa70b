//! Typed input model built from the raw argument mapping.
//!
//! Each structure is constructed through `from_arguments`, which walks
//! its fields in declaration order and fails on the first field that is
//! missing or unconvertible. Instances are immutable once built.

use crate::args::Arguments;
use crate::error::{EmbedError, Result};

/// Conclusion of a workflow run, with the fixed wording and embed color
/// attached to each outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkflowStatus {
    Success,
    Failure,
    Cancelled,
}

impl WorkflowStatus {
    /// Case-insensitive lookup against the three known status names.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.to_ascii_uppercase().as_str() {
            "SUCCESS" => Some(Self::Success),
            "FAILURE" => Some(Self::Failure),
            "CANCELLED" => Some(Self::Cancelled),
            _ => None,
        }
    }

    pub fn verb(&self) -> &'static str {
        match self {
            Self::Success => "succeeded",
            Self::Failure => "failed",
            Self::Cancelled => "was cancelled",
        }
    }

    pub fn adjective(&self) -> &'static str {
        match self {
            Self::Success => "Successful",
            Self::Failure => "Failed",
            Self::Cancelled => "Cancelled",
        }
    }

    pub fn color(&self) -> u32 {
        match self {
            Self::Success => 38912,
            Self::Failure => 16_525_609,
            Self::Cancelled => 6_702_148,
        }
    }
}

/// One execution of a GitHub Actions workflow.
#[derive(Debug, Clone)]
pub struct WorkflowRun {
    pub name: String,
    pub run_id: u64,
    pub run_number: u64,
    pub status: WorkflowStatus,
    pub repository: String,
    pub actor: String,
    pub git_ref: String,
    pub sha: String,
}

impl WorkflowRun {
    pub fn from_arguments(args: &Arguments) -> Result<Self> {
        let status_raw = args.required("status")?;
        let status =
            WorkflowStatus::parse(&status_raw).ok_or_else(|| EmbedError::InvalidArgument {
                field: "status".to_string(),
                value: status_raw,
            })?;

        Ok(Self {
            name: args.required("workflow_name")?,
            run_id: args.required_u64("run_id")?,
            run_number: args.required_u64("run_number")?,
            status,
            repository: args.required("repository")?,
            actor: args.required("actor")?,
            git_ref: args.required("ref")?,
            sha: args.required("sha")?,
        })
    }

    /// URL of the workflow run result page.
    pub fn url(&self) -> String {
        format!(
            "https://github.com/{}/actions/runs/{}",
            self.repository, self.run_id
        )
    }

    /// URL of the triggering actor's profile.
    pub fn actor_url(&self) -> String {
        format!("https://github.com/{}", self.actor)
    }

    /// First seven characters of the commit sha.
    pub fn short_sha(&self) -> &str {
        self.sha.get(..7).unwrap_or(&self.sha)
    }

    pub fn commit_url(&self) -> String {
        format!("https://github.com/{}/commits/{}", self.repository, self.sha)
    }

    /// Owner half of the `owner/name` repository identifier.
    pub fn repository_owner(&self) -> &str {
        self.repository
            .split_once('/')
            .map_or(self.repository.as_str(), |(owner, _)| owner)
    }

    /// Name half of the `owner/name` repository identifier.
    pub fn repository_name(&self) -> &str {
        self.repository
            .split_once('/')
            .map_or(self.repository.as_str(), |(_, name)| name)
    }
}

/// A pre-registered webhook endpoint: numeric id plus secret token.
#[derive(Clone)]
pub struct WebhookTarget {
    pub id: u64,
    token: String,
}

impl WebhookTarget {
    pub fn from_arguments(args: &Arguments) -> Result<Self> {
        Ok(Self {
            id: args.required_u64("webhook_id")?,
            token: args.required("webhook_token")?,
        })
    }

    /// Full delivery URL on the given webhook host.
    pub fn url(&self, host: &str) -> String {
        format!("{}/api/webhooks/{}/{}", host, self.id, self.token)
    }
}

// The token stays out of Debug output; the masking writer is the second
// line of defense, not the only one.
impl std::fmt::Debug for WebhookTarget {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WebhookTarget")
            .field("id", &self.id)
            .field("token", &"<masked>")
            .finish()
    }
}

/// Pull-request details, present only for pull-request-triggered runs.
///
/// The group is all-or-nothing: either every field was supplied and the
/// context is populated, or every field was empty and the context is
/// absent. Anything in between is a caller mistake and fails on the
/// first empty field.
#[derive(Debug, Clone)]
pub struct PullRequestContext {
    pub author: String,
    pub number: u64,
    pub title: String,
    pub source: String,
}

impl PullRequestContext {
    pub const FIELDS: [&'static str; 4] =
        ["pr_author_login", "pr_number", "pr_title", "pr_source"];

    pub fn from_arguments(args: &Arguments) -> Result<Option<Self>> {
        if args.group_is_absent(&Self::FIELDS) {
            return Ok(None);
        }

        Ok(Some(Self {
            author: args.required("pr_author_login")?,
            number: args.required_u64("pr_number")?,
            title: args.required("pr_title")?,
            source: args.required("pr_source")?,
        }))
    }

    pub fn author_url(&self) -> String {
        format!("https://github.com/{}", self.author)
    }

    /// URL of the pull request itself.
    pub fn url(&self, repository: &str) -> String {
        format!("https://github.com/{}/pull/{}", repository, self.number)
    }

    /// Length-bounded rendering of the source branch label.
    ///
    /// A leading `{owner}:` prefix means the branch lives in the same
    /// repository rather than a fork and carries no information, so it
    /// is stripped. Labels longer than the budget are cut and marked
    /// with an ellipsis.
    pub fn bounded_source(&self, owner: &str, budget: usize) -> String {
        let label = self
            .source
            .strip_prefix(&format!("{owner}:"))
            .unwrap_or(&self.source);

        if label.chars().count() > budget {
            let cut: String = label.chars().take(budget.saturating_sub(3)).collect();
            format!("{cut}...")
        } else {
            label.to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn workflow_args() -> Arguments {
        let mut args = Arguments::default();
        args.set("workflow_name", "Lint".to_string());
        args.set("run_id", "394929631".to_string());
        args.set("run_number", "71".to_string());
        args.set("status", "success".to_string());
        args.set("repository", "python-discord/sir-lancebot".to_string());
        args.set("actor", "sebastiaanz".to_string());
        args.set("ref", "refs/heads/main".to_string());
        args.set(
            "sha",
            "d4c8c0f7184e5d494136cc2b7fc670e8ab7a8f93".to_string(),
        );
        args
    }

    #[test]
    fn test_status_metadata_table() {
        let cases = [
            (WorkflowStatus::Success, "succeeded", "Successful", 38912),
            (WorkflowStatus::Failure, "failed", "Failed", 16_525_609),
            (
                WorkflowStatus::Cancelled,
                "was cancelled",
                "Cancelled",
                6_702_148,
            ),
        ];
        for (status, verb, adjective, color) in cases {
            assert_eq!(status.verb(), verb);
            assert_eq!(status.adjective(), adjective);
            assert_eq!(status.color(), color);
        }
    }

    #[test]
    fn test_status_parse_is_case_insensitive() {
        assert_eq!(WorkflowStatus::parse("Success"), Some(WorkflowStatus::Success));
        assert_eq!(WorkflowStatus::parse("FAILURE"), Some(WorkflowStatus::Failure));
        assert_eq!(
            WorkflowStatus::parse("cancelled"),
            Some(WorkflowStatus::Cancelled)
        );
        assert_eq!(WorkflowStatus::parse("skipped"), None);
    }

    #[test]
    fn test_workflow_run_derived_urls() {
        let run = WorkflowRun::from_arguments(&workflow_args()).unwrap();
        assert_eq!(
            run.url(),
            "https://github.com/python-discord/sir-lancebot/actions/runs/394929631"
        );
        assert_eq!(run.actor_url(), "https://github.com/sebastiaanz");
        assert_eq!(run.short_sha(), "d4c8c0f");
        assert_eq!(
            run.commit_url(),
            "https://github.com/python-discord/sir-lancebot/commits/d4c8c0f7184e5d494136cc2b7fc670e8ab7a8f93"
        );
        assert_eq!(run.repository_owner(), "python-discord");
        assert_eq!(run.repository_name(), "sir-lancebot");
    }

    #[test]
    fn test_workflow_run_rejects_unknown_status() {
        let mut args = workflow_args();
        args.set("status", "skipped".to_string());
        let err = WorkflowRun::from_arguments(&args).unwrap_err();
        assert!(matches!(
            err,
            EmbedError::InvalidArgument { ref field, .. } if field == "status"
        ));
    }

    #[test]
    fn test_webhook_target_url_and_masked_debug() {
        let mut args = Arguments::default();
        args.set("webhook_id", "1234".to_string());
        args.set("webhook_token", "s3cr3t-token".to_string());
        let target = WebhookTarget::from_arguments(&args).unwrap();
        assert_eq!(
            target.url("https://discord.com"),
            "https://discord.com/api/webhooks/1234/s3cr3t-token"
        );
        let debug = format!("{target:?}");
        assert!(!debug.contains("s3cr3t-token"));
        assert!(debug.contains("<masked>"));
    }

    fn pr_args() -> Arguments {
        let mut args = Arguments::default();
        args.set("pr_author_login", "sebastiaanz".to_string());
        args.set("pr_number", "535".to_string());
        args.set("pr_title", "Refactor background tasks".to_string());
        args.set("pr_source", "feature/refactor-tasks".to_string());
        args
    }

    #[test]
    fn test_pull_request_absent_when_all_fields_empty() {
        let mut args = Arguments::default();
        for field in PullRequestContext::FIELDS {
            args.set(field, String::new());
        }
        assert!(PullRequestContext::from_arguments(&args).unwrap().is_none());
    }

    #[test]
    fn test_pull_request_partial_input_is_rejected() {
        let mut args = pr_args();
        args.set("pr_title", String::new());
        let err = PullRequestContext::from_arguments(&args).unwrap_err();
        assert!(matches!(err, EmbedError::MissingArgument(field) if field == "pr_title"));
    }

    #[test]
    fn test_pull_request_populated() {
        let pr = PullRequestContext::from_arguments(&pr_args())
            .unwrap()
            .unwrap();
        assert_eq!(pr.number, 535);
        assert_eq!(pr.author_url(), "https://github.com/sebastiaanz");
        assert_eq!(
            pr.url("python-discord/sir-lancebot"),
            "https://github.com/python-discord/sir-lancebot/pull/535"
        );
    }

    #[test]
    fn test_bounded_source_strips_same_repo_prefix() {
        let mut pr = PullRequestContext::from_arguments(&pr_args())
            .unwrap()
            .unwrap();
        pr.source = "octocat:feature-x".to_string();
        assert_eq!(pr.bounded_source("octocat", 40), "feature-x");
        // A fork's label keeps its owner prefix.
        assert_eq!(pr.bounded_source("someone-else", 40), "octocat:feature-x");
    }

    #[test]
    fn test_bounded_source_truncates_over_budget() {
        let mut pr = PullRequestContext::from_arguments(&pr_args())
            .unwrap()
            .unwrap();
        pr.source = "a-very-long-branch-name-indeed".to_string();
        let bounded = pr.bounded_source("octocat", 20);
        assert_eq!(bounded, "a-very-long-branch-name-indeed"[..17].to_string() + "...");
        assert_eq!(bounded.chars().count(), 20);
    }
}
