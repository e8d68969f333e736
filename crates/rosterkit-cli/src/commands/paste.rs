use std::path::Path;

use rosterkit_core::classify::is_decorative_rejection;
use rosterkit_core::{SetKind, StateStore};
use serde::Serialize;

use crate::commands::common::{format_rejection_lines, load_session, read_paste_input, save_session};
use crate::error::CliError;

#[derive(Debug, Serialize)]
struct PasteReport {
    set: SetKind,
    branch: String,
    accepted: usize,
    rejected: usize,
    flagged: usize,
    rejections: Vec<RejectionItem>,
}

#[derive(Debug, Serialize)]
struct RejectionItem {
    row: String,
    reasons: Vec<String>,
}

pub fn run_paste(
    store: &StateStore,
    kind: SetKind,
    file: Option<&Path>,
    branch: Option<&str>,
    as_json: bool,
) -> Result<(), CliError> {
    let text = read_paste_input(file)?;

    let mut session = load_session(store)?;
    if let Some(branch) = branch {
        session.set_branch(kind, branch);
    }
    let outcome = session.paste(kind, &text);
    save_session(store, &session)?;

    let informative: Vec<_> = outcome
        .rejected
        .iter()
        .filter(|entry| !is_decorative_rejection(entry))
        .collect();

    if as_json {
        let report = PasteReport {
            set: kind,
            branch: session.branch(kind).to_string(),
            accepted: outcome.accepted,
            rejected: informative.len(),
            flagged: outcome.summary.flagged,
            rejections: informative
                .iter()
                .map(|entry| RejectionItem {
                    row: entry.joined(),
                    reasons: entry.reasons.clone(),
                })
                .collect(),
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Accepted {} {} entries.", outcome.accepted, kind.label());
    if !session.branch(kind).is_empty() {
        println!("Branch: {}", session.branch(kind));
    }
    if !informative.is_empty() {
        println!("Rejected {} row(s):", informative.len());
        for line in format_rejection_lines(&informative) {
            println!("{line}");
        }
    }
    let summary = outcome.summary.message();
    if !summary.is_empty() {
        println!("{summary}");
    }

    Ok(())
}
