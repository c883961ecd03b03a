//! Command handlers.

use crate::config::HookConfig;
use anyhow::{Context, Result};
use pushhook_core::ports::JobRegistry;
use pushhook_dispatch::scanner::push_trigger;
use pushhook_dispatch::{Dispatcher, ExtractorOptions, Receipt, ScmExtractor, WebhookReceiver};
use pushhook_registry::{AdapterRegistry, BuildQueue, BuildRequest, Catalog, InMemoryJobRegistry};
use std::path::Path;
use std::sync::Arc;
use tokio::io::AsyncReadExt;
use tracing::info;

/// One job as reported by `urls`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobUrls {
    pub name: String,
    pub bound: bool,
    pub urls: Vec<String>,
}

fn extractor(config: &HookConfig) -> ScmExtractor {
    ScmExtractor::with_options(ExtractorOptions {
        multi_scm: config.multi_scm,
    })
}

async fn read_payload(source: &str) -> Result<String> {
    if source == "-" {
        let mut payload = String::new();
        tokio::io::stdin()
            .read_to_string(&mut payload)
            .await
            .context("Failed to read payload from stdin")?;
        return Ok(payload);
    }

    tokio::fs::read_to_string(source)
        .await
        .with_context(|| format!("Failed to read payload file {source}"))
}

/// Run one payload through the receiver and collect the builds it queued.
pub async fn run_replay(
    config: &HookConfig,
    catalog: &Catalog,
    event: &str,
    payload: &str,
) -> Result<(Receipt, Vec<BuildRequest>)> {
    let (queue, mut requests) = BuildQueue::new();

    let receipt = {
        let registry =
            InMemoryJobRegistry::from_catalog(catalog, &AdapterRegistry::with_builtins(), &queue)?;
        let receiver = WebhookReceiver::new(Dispatcher::with_extractor(
            Arc::new(registry),
            extractor(config),
        ));
        receiver.receive(Some(event), Some(payload))?
    };
    // Every trigger has been dropped with the registry, so the queue drains.
    drop(queue);

    let mut queued = Vec::new();
    while let Some(request) = requests.recv().await {
        queued.push(request);
    }
    Ok((receipt, queued))
}

pub async fn replay(
    config: &HookConfig,
    payload: &str,
    event: &str,
    catalog: Option<&Path>,
) -> Result<()> {
    let catalog_path = config.catalog_path(catalog)?;
    let catalog = Catalog::load(&catalog_path)?;
    let payload = read_payload(payload).await?;

    let (receipt, queued) = run_replay(config, &catalog, event, &payload).await?;
    info!(queued = queued.len(), "Replay complete");

    println!("{}", serde_json::to_string_pretty(&receipt)?);
    for request in &queued {
        println!("{}", serde_json::to_string(request)?);
    }
    Ok(())
}

/// Every job in the catalog with its binding state and extracted URLs.
pub fn describe_jobs(config: &HookConfig, catalog: &Catalog) -> Result<Vec<JobUrls>> {
    let (queue, _requests) = BuildQueue::new();
    let registry =
        InMemoryJobRegistry::from_catalog(catalog, &AdapterRegistry::with_builtins(), &queue)?;
    let extractor = extractor(config);

    Ok(registry
        .all_jobs()?
        .iter()
        .map(|job| JobUrls {
            name: job.full_name().to_string(),
            bound: push_trigger(job.as_ref()).is_some(),
            urls: extractor
                .remote_urls(job.as_ref())
                .into_iter()
                .map(String::from)
                .collect(),
        })
        .collect())
}

pub fn urls(config: &HookConfig, catalog: Option<&Path>) -> Result<()> {
    let catalog = Catalog::load(&config.catalog_path(catalog)?)?;

    for job in describe_jobs(config, &catalog)? {
        let binding = if job.bound { "push" } else { "-" };
        if job.urls.is_empty() {
            println!("{}\t{}\t(no remote URLs)", job.name, binding);
        } else {
            println!("{}\t{}\t{}", job.name, binding, job.urls.join(" "));
        }
    }
    Ok(())
}

pub fn normalize(url: &str) {
    println!("{}", pushhook_core::normalize(url));
}

pub fn show_config(config: &HookConfig, explicit: Option<&Path>) -> Result<()> {
    println!("Current configuration:");
    print!("{}", serde_yaml::to_string(config)?);

    match explicit.map(Path::to_path_buf).or_else(HookConfig::config_path) {
        Some(path) => println!("\nConfig file: {}", path.display()),
        None => println!("\nConfig file: (none)"),
    }
    Ok(())
}
