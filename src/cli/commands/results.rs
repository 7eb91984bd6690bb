//! `flankci results`

use anyhow::Result;
use serde::Serialize;

use crate::cli::output::{
    create_spinner, list_table, output, render_list, truncate, CommandOutput, ProgressBarExt,
};
use crate::domain::models::{Config, TestResultModel};

use super::dashboard_service;

#[derive(Debug, Serialize)]
pub struct ResultsOutput {
    pub results: Vec<TestResultModel>,
    pub total: usize,
}

impl CommandOutput for ResultsOutput {
    fn to_human(&self) -> String {
        let mut table = list_table(&["Job", "Branch", "Status", "Triggered", "Finished", "URL"]);
        for result in &self.results {
            table.add_row(vec![
                result.job_name.clone().unwrap_or_else(|| "-".to_string()),
                truncate(&result.branch, 30),
                result.status.clone(),
                result
                    .triggered_at
                    .map_or_else(|| "-".to_string(), |t| t.format("%Y-%m-%d %H:%M").to_string()),
                result
                    .finished_at
                    .map_or_else(|| "-".to_string(), |t| t.format("%Y-%m-%d %H:%M").to_string()),
                result.ci_url.clone(),
            ]);
        }
        render_list("test run", &table, self.total)
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(config: &Config, json_mode: bool) -> Result<()> {
    let service = dashboard_service(config)?;

    let spinner = create_spinner("Fetching test runs", json_mode);
    let results = match service.test_results().await {
        Ok(results) => results,
        Err(err) => {
            spinner.finish_error("Failed to fetch test runs");
            return Err(err.into());
        }
    };
    spinner.finish_success(format!("{} test run(s)", results.len()));

    let total = results.len();
    output(&ResultsOutput { results, total }, json_mode);
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    #[test]
    fn test_human_output() {
        let results = vec![TestResultModel {
            branch: "main".to_string(),
            status: "failed".to_string(),
            commit_hash: "abc".to_string(),
            triggered_at: Some(Utc.with_ymd_and_hms(2024, 5, 1, 9, 30, 0).unwrap()),
            finished_at: None,
            build_slug: "b1".to_string(),
            job_name: Some("Nightly".to_string()),
            ci_url: "https://app.bitrise.io/build/b1".to_string(),
        }];

        let human = ResultsOutput { results, total: 1 }.to_human();
        assert!(human.starts_with("1 test run:"));
        assert!(human.contains("Nightly"));
        assert!(human.contains("2024-05-01 09:30"));
    }

    #[test]
    fn test_human_output_empty() {
        let human = ResultsOutput {
            results: Vec::new(),
            total: 0,
        }
        .to_human();
        assert_eq!(human, "No test runs found.");
    }
}
