//! `flankci builds`

use anyhow::Result;
use serde::Serialize;

use crate::cli::output::{create_spinner, list_table, output, render_list, CommandOutput, ProgressBarExt};
use crate::domain::models::{BuildHistory, Config};

use super::dashboard_service;

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct BuildsOutput {
    pub history: BuildHistory,
}

impl CommandOutput for BuildsOutput {
    fn to_human(&self) -> String {
        let mut table = list_table(&["Branch", "Build", "Status", "Commit", "Message"]);
        let mut total = 0;

        for branch in &self.history.branches {
            let Some(builds) = self.history.branch_builds.get(branch) else {
                continue;
            };
            for build in builds {
                total += 1;
                table.add_row(vec![
                    branch.clone(),
                    format!("#{}", build.build_number),
                    build.status.clone(),
                    build.commit_hash.chars().take(8).collect(),
                    build.commit_message.clone().unwrap_or_else(|| "-".to_string()),
                ]);
            }
        }

        render_list("build", &table, total)
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(config: &Config, json_mode: bool) -> Result<()> {
    let service = dashboard_service(config)?;

    let spinner = create_spinner("Fetching builds", json_mode);
    let history = match service.branch_builds().await {
        Ok(history) => history,
        Err(err) => {
            spinner.finish_error("Failed to fetch builds");
            return Err(err.into());
        }
    };
    spinner.finish_success(format!("{} branch(es)", history.branches.len()));

    output(&BuildsOutput { history }, json_mode);
    Ok(())
}
