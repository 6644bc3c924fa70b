//! Outbound message document and the rendering rules that build it.
//!
//! Rendering is pure: the same model always produces the same payload,
//! byte for byte. Delivery is someone else's problem.

use serde::{Deserialize, Serialize};

use crate::model::{PullRequestContext, WorkflowRun};

pub const SENDER_USERNAME: &str = "GitHub Actions";
pub const SENDER_AVATAR_URL: &str = "https://raw.githubusercontent.com/github/explore/2c7e603b797535e5ad8b4beb575ab3b7354666e1/topics/actions/actions.png";

/// Character budget for the source-branch field before subtracting the
/// space taken by the author login and the workflow-run label.
const SOURCE_BUDGET_BASE: usize = 60;
/// The budget never shrinks below this, however long the other fields are.
const SOURCE_BUDGET_FLOOR: usize = 20;

/// One named entry inside an embed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmbedField {
    pub name: String,
    pub value: String,
    pub inline: bool,
}

impl EmbedField {
    fn inline(name: &str, value: String) -> Self {
        Self {
            name: name.to_string(),
            value,
            inline: true,
        }
    }
}

/// A rich message body as the webhook endpoint understands it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Embed {
    pub title: String,
    pub description: String,
    pub url: String,
    pub color: u32,
    pub fields: Vec<EmbedField>,
}

/// The full wire payload: sender identity plus a single embed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WebhookPayload {
    pub username: String,
    pub avatar_url: String,
    pub embeds: Vec<Embed>,
}

/// Render the notification document for a run, as a pull-request embed
/// when the PR context is present and a generic run embed otherwise.
pub fn build_payload(run: &WorkflowRun, pull_request: Option<&PullRequestContext>) -> WebhookPayload {
    let embed = match pull_request {
        Some(pr) => pull_request_embed(run, pr),
        None => generic_run_embed(run),
    };

    WebhookPayload {
        username: SENDER_USERNAME.to_string(),
        avatar_url: SENDER_AVATAR_URL.to_string(),
        embeds: vec![embed],
    }
}

fn description(run: &WorkflowRun) -> String {
    format!(
        "GitHub Actions run [{}]({}) {}.",
        run.run_id,
        run.url(),
        run.status.verb()
    )
}

fn workflow_run_field(run: &WorkflowRun) -> EmbedField {
    EmbedField::inline(
        "Workflow Run",
        format!("[{} #{}]({})", run.name, run.run_number, run.url()),
    )
}

fn generic_run_embed(run: &WorkflowRun) -> Embed {
    Embed {
        title: format!("[{}] Workflow {}", run.repository, run.status.adjective()),
        description: description(run),
        url: run.url(),
        color: run.status.color(),
        fields: vec![
            EmbedField::inline("Actor", format!("[{}]({})", run.actor, run.actor_url())),
            workflow_run_field(run),
            EmbedField::inline(
                "Commit",
                format!("[{}]({})", run.short_sha(), run.commit_url()),
            ),
        ],
    }
}

fn pull_request_embed(run: &WorkflowRun, pr: &PullRequestContext) -> Embed {
    let source = pr.bounded_source(run.repository_owner(), source_budget(run, pr));

    Embed {
        title: format!(
            "[{}] Checks {} on PR: #{} {}",
            run.repository,
            run.status.adjective(),
            pr.number,
            pr.title
        ),
        description: description(run),
        url: pr.url(&run.repository),
        color: run.status.color(),
        fields: vec![
            EmbedField::inline("PR Author", format!("[{}]({})", pr.author, pr.author_url())),
            workflow_run_field(run),
            EmbedField::inline("Source Branch", source),
        ],
    }
}

/// Room left for the source-branch label once the author login and the
/// `{name} #{number}` run label have taken their share of the row.
fn source_budget(run: &WorkflowRun, pr: &PullRequestContext) -> usize {
    let run_label = format!("{} #{}", run.name, run.run_number);
    SOURCE_BUDGET_BASE
        .saturating_sub(pr.author.chars().count())
        .saturating_sub(run_label.chars().count())
        .max(SOURCE_BUDGET_FLOOR)
}
