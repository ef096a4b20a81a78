//! End-to-end import: IMDB list -> Plex library -> collection.

use log::{error, info, warn};

use crate::error::Result;
use crate::imdb::ImdbList;
use crate::matching::{reconcile_rows, MatchOptions};
use crate::models::MatchResult;
use crate::plan::{build_plan, UpdatePlan};
use crate::plex::PlexClient;
use crate::report::{build_rows, AdditionOutcome, ImportSummary, ReportRow};

/// Parameters of one import run
#[derive(Debug, Clone)]
pub struct ImportRequest {
    pub library: String,
    pub collection: String,
    pub options: MatchOptions,
    /// Compute and report the plan without touching the server
    pub dry_run: bool,
}

/// Everything an import produced, for reporting
#[derive(Debug, Clone)]
pub struct ImportReport {
    pub results: Vec<MatchResult>,
    pub plan: UpdatePlan,
    pub rows: Vec<ReportRow>,
    pub summary: ImportSummary,
}

/// Runs the import. Connection and library problems abort with an error;
/// problems adding single movies are recorded in the report.
pub async fn run_import(
    client: &PlexClient,
    list: &ImdbList,
    request: &ImportRequest,
) -> Result<ImportReport> {
    client.test_connection().await?;
    let section = client.find_section(&request.library).await?;

    let library = client.fetch_library(&section).await?;
    let members = client
        .fetch_collection_members(&section, &request.collection)
        .await?;

    info!(
        "Starting collection creation/update for '{}'",
        request.collection
    );
    let results = reconcile_rows(&list.rows, &library, &request.options);
    let plan = build_plan(&results, &members);

    let mut outcomes = Vec::with_capacity(plan.additions.len());
    for addition in &plan.additions {
        if request.dry_run {
            info!(
                "WOULD ADD: {} (matched by {})",
                addition.entry.label(),
                addition.method.as_str()
            );
            outcomes.push(AdditionOutcome::DryRun);
            continue;
        }

        match client
            .add_to_collection(&section, &addition.entry, &request.collection)
            .await
        {
            Ok(()) => {
                info!(
                    "ADDED: {} (matched by {})",
                    addition.entry.label(),
                    addition.method.as_str()
                );
                outcomes.push(AdditionOutcome::Added);
            }
            Err(e) => {
                error!("ERROR: {} - {}", addition.entry.label(), e);
                outcomes.push(AdditionOutcome::Failed(e.to_string()));
            }
        }
    }

    for result in &results {
        match result {
            MatchResult::Unmatched { item, reason } => {
                warn!("MISSING: {} - {}", item.title, reason.describe());
            }
            MatchResult::Ambiguous { item, candidates } => {
                warn!(
                    "AMBIGUOUS: {} - {} candidates, resolve manually",
                    item.title,
                    candidates.len()
                );
            }
            MatchResult::Matched { .. } => {}
        }
    }

    let rows = build_rows(&results, &plan, &outcomes);
    let summary = ImportSummary::from_rows(&rows);
    info!("Processing complete: {summary}");

    Ok(ImportReport {
        results,
        plan,
        rows,
        summary,
    })
}

#[cfg(test)]
#[path = "sync_tests.rs"]
mod tests;
