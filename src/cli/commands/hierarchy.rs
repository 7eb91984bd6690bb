//! `flankci tests`: the selectable test hierarchy of an artifact

use anyhow::{bail, Result};
use serde::Serialize;

use crate::cli::output::{create_spinner, list_table, output, CommandOutput, ProgressBarExt};
use crate::cli::types::TestsArgs;
use crate::domain::models::{AnnotationGroup, Config, PathWithAnnotationGroups, TestHierarchyResult};
use crate::infrastructure::manifest::read_manifest;
use crate::services::TestHierarchyBuilder;

use super::dashboard_service;

#[derive(Debug, Serialize)]
#[serde(transparent)]
pub struct HierarchyOutput {
    pub hierarchy: TestHierarchyResult,
}

fn format_groups(groups: Option<&Vec<AnnotationGroup>>) -> String {
    groups.map_or_else(
        || "-".to_string(),
        |groups| {
            groups
                .iter()
                .map(|group| group.join(" + "))
                .collect::<Vec<_>>()
                .join(" | ")
        },
    )
}

fn node_table(header: &str, nodes: &[PathWithAnnotationGroups]) -> String {
    let mut table = list_table(&[header, "Annotation groups"]);
    for node in nodes {
        let path = if node.path.is_empty() { "(root)" } else { node.path.as_str() };
        table.add_row(vec![
            path.to_string(),
            format_groups(node.annotation_groups.as_ref()),
        ]);
    }
    table.to_string()
}

impl CommandOutput for HierarchyOutput {
    fn to_human(&self) -> String {
        let hierarchy = &self.hierarchy;
        if hierarchy.is_empty() {
            return "No tests found.".to_string();
        }

        let root = if hierarchy.root_package.is_empty() {
            "(none)"
        } else {
            hierarchy.root_package.as_str()
        };
        let annotations = if hierarchy.annotations.is_empty() {
            "-".to_string()
        } else {
            hierarchy.annotations.join(", ")
        };

        [
            format!("Root package: {root}"),
            format!("Annotations: {annotations}"),
            String::new(),
            node_table("Package", &hierarchy.packages),
            node_table("Class / method", &hierarchy.classes),
        ]
        .join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(args: TestsArgs, config: &Config, json_mode: bool) -> Result<()> {
    let hierarchy = match (args.manifest, args.build, args.artifact) {
        (Some(path), _, _) => {
            let methods = read_manifest(&path)?;
            TestHierarchyBuilder::new().build(&methods, &config.test_data.filter_config())?
        }
        (None, Some(build_slug), Some(artifact_slug)) => {
            let service = dashboard_service(config)?;
            let spinner = create_spinner("Fetching test metadata", json_mode);
            match service.test_metadata(&build_slug, &artifact_slug).await {
                Ok(hierarchy) => {
                    spinner.finish_success(format!("{} class node(s)", hierarchy.classes.len()));
                    hierarchy
                }
                Err(err) => {
                    spinner.finish_error("Failed to fetch test metadata");
                    return Err(err.into());
                }
            }
        }
        _ => bail!("Either --manifest or both --build and --artifact are required"),
    };

    output(&HierarchyOutput { hierarchy }, json_mode);
    Ok(())
}
