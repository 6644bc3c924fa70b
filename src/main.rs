use gh_status_embed::args::Arguments;
use gh_status_embed::delivery::{self, DEFAULT_WEBHOOK_HOST, DeliveryClient};
use gh_status_embed::embed;
use gh_status_embed::error::Result;
use gh_status_embed::logging;
use gh_status_embed::model::{PullRequestContext, WebhookTarget, WorkflowRun};
use tracing::{error, info};

const WEBHOOK_HOST_ENV: &str = "WEBHOOK_HOST";
const DRY_RUN_ENV: &str = "DRY_RUN";
const EVENT_PAYLOAD_ENV: &str = "GITHUB_EVENT_PAYLOAD";

/// Read input -> render -> one POST -> exit.
async fn run(mut arguments: Arguments, host: String, dry_run: bool) -> Result<()> {
    // A raw pull-request event payload, when supplied, overrides the
    // positional PR arguments.
    if let Ok(raw) = std::env::var(EVENT_PAYLOAD_ENV) {
        if !raw.trim().is_empty() {
            arguments.apply_pull_request_payload(&raw)?;
        }
    }

    let workflow = WorkflowRun::from_arguments(&arguments)?;
    let webhook = WebhookTarget::from_arguments(&arguments)?;
    let pull_request = PullRequestContext::from_arguments(&arguments)?;

    info!(
        "Rendering status embed for {} run {} ({})",
        workflow.name,
        workflow.run_id,
        workflow.status.adjective()
    );
    let payload = embed::build_payload(&workflow, pull_request.as_ref());

    let client = DeliveryClient::new(host, dry_run)?;
    client.send(&webhook, &payload).await
}

#[tokio::main]
async fn main() {
    dotenv::dotenv().ok();

    let arguments = Arguments::from_argv(std::env::args().skip(1));

    // Mask the token before the first log line could leak it.
    let masked: Vec<String> = arguments
        .get("webhook_token")
        .map(str::to_string)
        .into_iter()
        .collect();
    logging::init(masked.clone());

    let host =
        std::env::var(WEBHOOK_HOST_ENV).unwrap_or_else(|_| DEFAULT_WEBHOOK_HOST.to_string());
    let dry_run = std::env::var(DRY_RUN_ENV)
        .map(|v| v == "true" || v == "1")
        .unwrap_or(false);

    if let Err(e) = run(arguments, host, dry_run).await {
        error!("{e}");
        // Annotations skip the tracing writer, so mask here as well.
        let annotation = delivery::error_annotation(&e);
        println!("{}", logging::mask_message(&masked, &annotation));
        std::process::exit(1);
    }
}
