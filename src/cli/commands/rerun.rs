//! `flankci rerun <build_slug>`

use anyhow::Result;
use serde::Serialize;

use crate::cli::output::{create_spinner, output, CommandOutput, ProgressBarExt};
use crate::cli::types::RerunArgs;
use crate::domain::models::{Config, RerunModel};

use super::dashboard_service;

#[derive(Debug, Serialize)]
pub struct RerunOutput {
    pub build_slug: String,
    #[serde(flatten)]
    pub rerun: RerunModel,
}

impl CommandOutput for RerunOutput {
    fn to_human(&self) -> String {
        let mut lines = vec![
            format!("Build: {}", self.build_slug),
            format!("Branch: {}", self.rerun.branch),
        ];

        if self.rerun.failed_tests.is_empty() {
            lines.push("No failed tests.".to_string());
        } else {
            lines.push(format!("Failed tests ({}):", self.rerun.failed_tests.len()));
            lines.extend(self.rerun.failed_tests.iter().map(|test| format!("  {test}")));
        }

        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(args: RerunArgs, config: &Config, json_mode: bool) -> Result<()> {
    let service = dashboard_service(config)?;

    let spinner = create_spinner(format!("Fetching results of {}", args.build_slug), json_mode);
    let rerun = match service.rerun(&args.build_slug).await {
        Ok(rerun) => rerun,
        Err(err) => {
            spinner.finish_error("Failed to fetch test results");
            return Err(err.into());
        }
    };
    spinner.finish_success(format!("{} failed test(s)", rerun.failed_tests.len()));

    output(
        &RerunOutput {
            build_slug: args.build_slug,
            rerun,
        },
        json_mode,
    );
    Ok(())
}
