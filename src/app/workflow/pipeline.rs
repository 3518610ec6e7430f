use anyhow::Result;
use std::time::Duration;
use tracing::{info, warn};

use crate::app::error::{ParseError, ScrapeError};
use crate::app::parser::assemble::{GroupFragments, assemble_course, assemble_group_course};
use crate::app::state::AppState;
use crate::app::types::{RecordOutcome, ScrapeStats};
use crate::app::workflow::navigate::SubmitOutcome;
use crate::app::writer::JsonArrayWriter;
use crate::cli::{ScopeSelection, ScrapePlan};

/// Runs the whole scrape: resolve search scopes, query each one, assemble a
/// record per result link and stream it into the output array.
pub async fn run(state: &mut AppState, plan: &ScrapePlan) -> Result<ScrapeStats> {
    let config = state.config;
    let modal_wait = Duration::from_millis(config.modal_wait_ms);
    let results_wait = Duration::from_millis(config.results_wait_ms);
    let detail_wait = Duration::from_millis(config.detail_wait_ms);

    state.reg.open(&config.base_url).await?;
    let terms = resolve_scopes(&plan.scopes, state.reg.faculty_codes().await?)?;

    let mut writer = JsonArrayWriter::create(&plan.output)?;
    let mut stats = ScrapeStats::default();

    for (i, term) in terms.iter().enumerate() {
        info!("Scraping {term} ({}/{})", i + 1, terms.len());
        state
            .reg
            .fill_search(
                plan.program.code(),
                plan.semester.as_deref(),
                plan.year.as_deref(),
                plan.group_courses,
                term,
            )
            .await?;

        match state
            .reg
            .submit_query(modal_wait, config.max_modal_attempts)
            .await?
        {
            SubmitOutcome::NoData => {
                info!("No information is available for {term}");
                stats.empty_scopes += 1;
                continue;
            }
            SubmitOutcome::Completed => {}
        }

        let Some(links) = state.reg.result_links(results_wait).await? else {
            info!("No courses for {term}");
            stats.empty_scopes += 1;
            continue;
        };

        for (j, link_text) in links.iter().enumerate() {
            if state
                .reg
                .open_result(j, modal_wait, config.max_modal_attempts)
                .await?
                != SubmitOutcome::Completed
            {
                warn!("Result {link_text} reported no data, skipping");
                stats.add_record(RecordOutcome::Skipped);
                continue;
            }
            let outcome = if plan.group_courses {
                scrape_group_course(state, &mut writer, link_text, detail_wait).await?
            } else {
                scrape_course(state, &mut writer, link_text, detail_wait).await?
            };
            stats.add_record(outcome);
        }
    }

    writer.finalize()?;
    Ok(stats)
}

/// Maps CLI scope selection onto the query terms to cycle through the form.
/// Unknown faculty codes abort before any query is submitted.
fn resolve_scopes(
    scopes: &ScopeSelection,
    faculties: Vec<String>,
) -> Result<Vec<String>, ScrapeError> {
    match scopes {
        ScopeSelection::All => Ok(faculties),
        ScopeSelection::Faculties(codes) => {
            for code in codes {
                if !faculties.contains(code) {
                    return Err(ScrapeError::Configuration(format!(
                        "Faculty code {code} does not exist"
                    )));
                }
            }
            Ok(codes.clone())
        }
        ScopeSelection::Ids(ids) => {
            for id in ids {
                let prefix: String = id.chars().take(2).collect();
                if !faculties.contains(&prefix) {
                    return Err(ScrapeError::Configuration(format!(
                        "Faculty code {prefix} does not exist"
                    )));
                }
            }
            Ok(ids.clone())
        }
    }
}

async fn scrape_course(
    state: &mut AppState,
    writer: &mut JsonArrayWriter,
    link_text: &str,
    detail_wait: Duration,
) -> Result<RecordOutcome> {
    let Some(fragments) = state.reg.course_fragments(detail_wait).await? else {
        warn!(
            "{link_text}: {}",
            ParseError::DetailTimeout(detail_wait)
        );
        return Ok(RecordOutcome::Skipped);
    };
    match assemble_course(&fragments, state.config.apply_year_offset) {
        Ok(record) => {
            writer.append(&record)?;
            Ok(RecordOutcome::Written)
        }
        Err(e) => {
            warn!("{link_text}: {e}, record skipped");
            Ok(RecordOutcome::Skipped)
        }
    }
}

async fn scrape_group_course(
    state: &mut AppState,
    writer: &mut JsonArrayWriter,
    link_text: &str,
    detail_wait: Duration,
) -> Result<RecordOutcome> {
    let Some(rows) = state.reg.group_rows(detail_wait).await? else {
        warn!(
            "{link_text}: {}",
            ParseError::DetailTimeout(detail_wait)
        );
        return Ok(RecordOutcome::Skipped);
    };
    let fragments = GroupFragments {
        group_course_id: link_text.to_string(),
        rows,
    };
    match assemble_group_course(&fragments) {
        Ok(record) => {
            writer.append(&record)?;
            Ok(RecordOutcome::Written)
        }
        Err(e) => {
            warn!("{link_text}: {e}, record skipped");
            Ok(RecordOutcome::Skipped)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn faculties() -> Vec<String> {
        vec!["21".to_string(), "23".to_string(), "33".to_string()]
    }

    #[test]
    fn all_scope_uses_every_faculty() {
        let terms = resolve_scopes(&ScopeSelection::All, faculties()).unwrap();
        assert_eq!(terms, faculties());
    }

    #[test]
    fn id_prefixes_must_name_a_faculty() {
        let ok = resolve_scopes(
            &ScopeSelection::Ids(vec!["2110101".to_string(), "23".to_string()]),
            faculties(),
        )
        .unwrap();
        assert_eq!(ok, vec!["2110101".to_string(), "23".to_string()]);

        let bad = resolve_scopes(
            &ScopeSelection::Ids(vec!["9901".to_string()]),
            faculties(),
        );
        assert!(matches!(bad, Err(ScrapeError::Configuration(_))));
    }

    #[test]
    fn unknown_faculty_code_aborts() {
        let bad = resolve_scopes(
            &ScopeSelection::Faculties(vec!["21".to_string(), "99".to_string()]),
            faculties(),
        );
        assert!(matches!(bad, Err(ScrapeError::Configuration(_))));
    }
}
