// Configuration: credentials and the project table live in a dotenv-style
// file under the user's home directory. First run prompts for the values,
// writes the file and asks the user to rerun; later runs load it into a
// typed `Config`.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use dialoguer::{Input, Password};

const ENV_DIR: &str = ".vdeploy";
const ENV_FILE: &str = ".env";
const DEFAULT_ENDPOINT: &str = "https://api.vercel.com";

const VAR_ENDPOINT: &str = "VERCEL_ENDPOINT";
const VAR_AUTH_KEY: &str = "VERCEL_AUTH_KEY";
const VAR_TEAM_ID: &str = "VERCEL_TEAM_ID";
const VAR_PROJECTS: &str = "VERCEL_PROJECTS";

/// A project the tool can browse: display name and the platform's id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Project {
    pub name: String,
    pub id: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub endpoint: String,
    pub token: String,
    pub team_id: String,
    /// Ordered as configured, which is the order the project menu shows.
    pub projects: Vec<Project>,
}

pub fn env_file_path() -> Result<PathBuf> {
    let home = dirs::home_dir().context("could not determine home directory")?;
    Ok(home.join(ENV_DIR).join(ENV_FILE))
}

/// Load the config file, or run the one-time bootstrap when it is missing.
/// Returns `None` after a bootstrap: the file was written and the user was
/// told to rerun, so the caller should exit cleanly.
pub fn load_or_configure() -> Result<Option<Config>> {
    let path = env_file_path()?;
    if !path.exists() {
        println!("No config file found");
        configure(&path)?;
        return Ok(None);
    }

    println!("Loading config from {}", path.display());
    dotenvy::from_path(&path)
        .with_context(|| format!("failed to load config file {}", path.display()))?;
    from_env().map(Some)
}

fn from_env() -> Result<Config> {
    let endpoint = require_var(VAR_ENDPOINT)?;
    let token = require_var(VAR_AUTH_KEY)?;
    let team_id = require_var(VAR_TEAM_ID)?;
    let projects = parse_projects(&require_var(VAR_PROJECTS)?)?;
    Ok(Config {
        endpoint,
        token,
        team_id,
        projects,
    })
}

fn require_var(name: &str) -> Result<String> {
    let value = std::env::var(name).unwrap_or_default();
    if value.is_empty() {
        bail!("missing {name} in config; delete the config file and rerun to reconfigure");
    }
    Ok(value)
}

/// Parse the `name=id,name=id` project table.
pub fn parse_projects(raw: &str) -> Result<Vec<Project>> {
    let mut projects = Vec::new();
    for entry in raw.split(',').map(str::trim).filter(|e| !e.is_empty()) {
        let (name, id) = entry
            .split_once('=')
            .with_context(|| format!("invalid project entry {entry:?}, expected name=id"))?;
        let (name, id) = (name.trim(), id.trim());
        if name.is_empty() || id.is_empty() {
            bail!("invalid project entry {entry:?}, expected name=id");
        }
        projects.push(Project {
            name: name.to_string(),
            id: id.to_string(),
        });
    }
    if projects.is_empty() {
        bail!("no projects configured");
    }
    Ok(projects)
}

/// Interactive first-run setup: prompt for the credentials and project
/// table, then write the env file next to rerun instructions.
fn configure(path: &Path) -> Result<()> {
    let team_id: String = Input::new()
        .with_prompt("Vercel team ID")
        .interact_text()
        .context("failed to read team id")?;
    let token: String = Password::new()
        .with_prompt("Vercel auth token")
        .interact()
        .context("failed to read auth token")?;
    let endpoint: String = Input::new()
        .with_prompt("Vercel API endpoint")
        .default(DEFAULT_ENDPOINT.to_string())
        .interact_text()
        .context("failed to read endpoint")?;
    let projects: String = Input::new()
        .with_prompt("Projects (name=id, comma separated)")
        .validate_with(|input: &String| parse_projects(input).map(|_| ()).map_err(|e| e.to_string()))
        .interact_text()
        .context("failed to read projects")?;

    let dir = path
        .parent()
        .context("config file path has no parent directory")?;
    fs::create_dir_all(dir)
        .with_context(|| format!("failed to create config directory {}", dir.display()))?;
    fs::write(path, render_env(&endpoint, &token, &team_id, &projects))
        .with_context(|| format!("failed to write config file {}", path.display()))?;

    println!("Configuration written to {}", path.display());
    println!("Rerun vdeploy to continue");
    Ok(())
}

fn render_env(endpoint: &str, token: &str, team_id: &str, projects: &str) -> String {
    format!(
        "{VAR_ENDPOINT}={endpoint}\n{VAR_AUTH_KEY}={token}\n{VAR_TEAM_ID}={team_id}\n{VAR_PROJECTS}={projects}\n"
    )
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn parses_project_table() {
        let projects = parse_projects("web=prj_1, docs = prj_2 ,").unwrap();
        assert_eq!(
            projects,
            vec![
                Project {
                    name: "web".into(),
                    id: "prj_1".into()
                },
                Project {
                    name: "docs".into(),
                    id: "prj_2".into()
                },
            ]
        );
    }

    #[test]
    fn rejects_malformed_project_entries() {
        assert!(parse_projects("").is_err());
        assert!(parse_projects("just-a-name").is_err());
        assert!(parse_projects("=prj_1").is_err());
        assert!(parse_projects("web=").is_err());
    }

    #[test]
    fn renders_env_file_lines() {
        let rendered = render_env("https://api.vercel.com", "tok", "team_1", "web=prj_1");
        assert_eq!(
            rendered,
            "VERCEL_ENDPOINT=https://api.vercel.com\n\
             VERCEL_AUTH_KEY=tok\n\
             VERCEL_TEAM_ID=team_1\n\
             VERCEL_PROJECTS=web=prj_1\n"
        );
    }
}
