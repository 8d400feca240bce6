// Screen flow: sequences the menus top-down (project -> status filters ->
// deployment -> details -> action) and delegates every network call to the
// API client. Each screen blocks until the user commits or cancels;
// cancelling any menu ends the run gracefully.

use std::time::Duration;

use anyhow::{bail, Result};
use indicatif::{ProgressBar, ProgressStyle};

use crate::api::{format_state, Action, ApiClient, Deployment, DeploymentState};
use crate::config::Config;
use crate::menu::{display_info_table, InfoRow, Menu, MultiSelect, Selection};
use crate::util::elapsed_since;

const DEPLOYMENTS_LIMIT: u32 = 10;
const DEPLOYMENTS_WINDOW_HOURS: i64 = 24;

/// Run the interactive session. This call blocks until the user walks
/// through the flow or cancels out of it.
pub fn run(api: &ApiClient, cfg: &Config) -> Result<()> {
    let Some(project) = select_project(cfg)? else {
        return aborted();
    };
    let Some(states) = select_states()? else {
        return aborted();
    };

    let sp = spinner("Fetching deployments...");
    let deployments =
        api.list_deployments(&project, DEPLOYMENTS_LIMIT, DEPLOYMENTS_WINDOW_HOURS, &states);
    sp.finish_and_clear();
    let deployments = deployments?;

    if deployments.is_empty() {
        println!("No deployments to display");
        return Ok(());
    }

    let Some(deployment_id) = select_deployment(&deployments)? else {
        return aborted();
    };

    let sp = spinner("Fetching deployment...");
    let deployment = api.get_deployment(&deployment_id);
    sp.finish_and_clear();
    let deployment = deployment?;

    display_info_table(&deployment_rows(&deployment))?;

    let Some(action) = select_action()? else {
        return aborted();
    };
    perform_action(api, action, &deployment_id, &deployment)
}

fn aborted() -> Result<()> {
    println!("\nAborted");
    Ok(())
}

fn select_project(cfg: &Config) -> Result<Option<String>> {
    let mut menu = Menu::new("Select a project");
    for project in &cfg.projects {
        menu = menu.item(&project.name, &project.name);
    }
    menu.display()
}

/// Checkbox menu over all states, pre-seeded with READY and BUILDING.
/// Committing with nothing checked is a caller-policy error, not the
/// menu's concern.
fn select_states() -> Result<Option<Vec<DeploymentState>>> {
    let mut menu = Menu::new("Select deployment status filters");
    for state in DeploymentState::ALL {
        menu = menu.item(state.as_str(), state.as_str());
    }

    let mut selection = Selection::new(vec![
        DeploymentState::Ready.as_str().to_string(),
        DeploymentState::Building.as_str().to_string(),
    ]);
    if menu.display_multi(&mut selection)?.is_none() {
        return Ok(None);
    }
    if selection.is_empty() {
        bail!("must choose at least one deployment state");
    }

    let states = selection
        .selected()
        .iter()
        .map(|label| DeploymentState::parse(label))
        .collect::<Result<Vec<_>>>()?;
    Ok(Some(states))
}

fn select_deployment(deployments: &[Deployment]) -> Result<Option<String>> {
    let mut menu = Menu::new("Select a deployment");
    for deployment in deployments {
        menu = menu.item(&deployment.uid, deployment_row(deployment));
    }
    menu.display()
}

fn deployment_row(d: &Deployment) -> String {
    format!(
        "{:<20} {:<25} {:<12} {:<10} {}",
        d.name,
        d.creator.username,
        d.meta.commit_ref,
        elapsed_since((d.created / 1000) as i64),
        d.ready_state,
    )
}

fn select_action() -> Result<Option<Action>> {
    let mut menu = Menu::new("Deployment actions");
    for action in Action::ALL {
        menu = menu.item(action.id(), action.label());
    }
    let Some(id) = menu.display()? else {
        return Ok(None);
    };
    Ok(Action::from_id(&id))
}

fn deployment_rows(d: &Deployment) -> Vec<InfoRow> {
    let url = d.alias.first().cloned().unwrap_or_default();
    vec![
        InfoRow::new("ID", &d.id),
        InfoRow::new("Name", &d.name),
        InfoRow::new("Creator", &d.creator.username),
        InfoRow::new("State", format_state(&d.ready_state)),
        InfoRow::new("Started", elapsed_since((d.building_at / 1000) as i64)),
        InfoRow::new("URL", url),
        InfoRow::new("Branch", &d.git_source.branch),
        InfoRow::new("Commit SHA", &d.git_source.commit_sha),
    ]
}

fn perform_action(
    api: &ApiClient,
    action: Action,
    deployment_id: &str,
    deployment: &Deployment,
) -> Result<()> {
    match action {
        Action::Cancel => {
            let spinner = spinner("Cancelling deployment...");
            let cancelled = api.cancel_deployment(deployment_id);
            spinner.finish_and_clear();
            println!("Cancelling {}", cancelled?.id);
        }
        Action::Redeploy => {
            let spinner = spinner("Creating redeployment...");
            let redeployed = api.redeploy(deployment);
            spinner.finish_and_clear();
            println!("Redeploying {}", redeployed?.id);
        }
        Action::Exit => {}
    }
    Ok(())
}

fn spinner(msg: &str) -> ProgressBar {
    let pb = ProgressBar::new_spinner();
    pb.set_style(ProgressStyle::with_template("{spinner} {msg}").unwrap());
    pb.set_message(msg.to_string());
    pb.enable_steady_tick(Duration::from_millis(80));
    pb
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_deployment() -> Deployment {
        Deployment {
            id: "dpl_detail".into(),
            name: "web".into(),
            alias: vec!["web.example.com".into(), "old.example.com".into()],
            ready_state: "READY".into(),
            ..Deployment::default()
        }
    }

    #[test]
    fn info_rows_cover_the_documented_fields() {
        let rows = deployment_rows(&sample_deployment());
        let labels: Vec<_> = rows.iter().map(|r| r.label.as_str()).collect();
        assert_eq!(
            labels,
            ["ID", "Name", "Creator", "State", "Started", "URL", "Branch", "Commit SHA"]
        );
        assert_eq!(rows[0].value, "dpl_detail");
        // First alias wins as the URL.
        assert_eq!(rows[5].value, "web.example.com");
    }

    #[test]
    fn info_rows_tolerate_a_bare_deployment() {
        let rows = deployment_rows(&Deployment::default());
        assert_eq!(rows[5].value, "");
    }

    #[test]
    fn deployment_row_keeps_column_order() {
        let mut d = sample_deployment();
        d.creator.username = "ana".into();
        d.meta.commit_ref = "main".into();
        let row = deployment_row(&d);
        let name_at = row.find("web").unwrap();
        let creator_at = row.find("ana").unwrap();
        let ref_at = row.find("main").unwrap();
        let state_at = row.find("READY").unwrap();
        assert!(name_at < creator_at && creator_at < ref_at && ref_at < state_at);
    }
}
