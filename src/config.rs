use crate::listing::Credentials;
use anyhow::{anyhow, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use url::Url;

/// The configuration file searched for by [`Config::from_directory`].
pub const CONFIG_FILE_NAME: &str = "config.yaml";

/// A repository location to be listed and published.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct Remote {
    pub url: Url,

    #[serde(default)]
    pub alias: Option<String>,

    #[serde(default)]
    pub username: Option<String>,

    #[serde(default)]
    pub password: Option<String>,
}

impl Remote {
    pub fn credentials(&self) -> Credentials {
        Credentials {
            username: self.username.clone(),
            password: self.password.clone(),
        }
    }
}

fn default_templates_directory() -> PathBuf {
    PathBuf::from("templates")
}

fn default_remotes_directory() -> PathBuf {
    PathBuf::from("remotes")
}

fn default_html_directory() -> PathBuf {
    PathBuf::from("html")
}

fn default_svn() -> String {
    String::from("svn")
}

#[derive(Deserialize)]
struct Project {
    remotes: Vec<Remote>,

    #[serde(default = "default_templates_directory")]
    templates_directory: PathBuf,

    #[serde(default = "default_remotes_directory")]
    remotes_directory: PathBuf,

    #[serde(default = "default_html_directory")]
    html_directory: PathBuf,

    #[serde(default = "default_svn")]
    svn: String,
}

/// Everything a run needs to know, with directories resolved against the
/// configuration file's directory.
#[derive(Clone, Debug)]
pub struct Config {
    /// The remotes to publish, in configuration order.
    pub remotes: Vec<Remote>,

    /// Holds `page.html.template` and `index.html.template`.
    pub templates_directory: PathBuf,

    /// Receives one `<id>.json` tree per remote.
    pub remotes_directory: PathBuf,

    /// Receives one `<id>.html` page per remote plus `index.html`.
    pub html_directory: PathBuf,

    /// The `svn` executable used for listing.
    pub svn: String,
}

impl Config {
    /// Looks for [`CONFIG_FILE_NAME`] in `dir` and then in each of its
    /// ancestors, loading the first one found.
    pub fn from_directory(dir: &Path) -> Result<Config> {
        let path = dir.join(CONFIG_FILE_NAME);
        if path.exists() {
            match Config::from_project_file(&path) {
                Ok(config) => Ok(config),
                Err(e) => Err(anyhow!("Loading configuration: {:?}", e)),
            }
        } else {
            match dir.parent() {
                Some(dir) => Config::from_directory(dir),
                None => Err(anyhow!(
                    "Could not find `{}` in any parent directory",
                    CONFIG_FILE_NAME
                )),
            }
        }
    }

    pub fn from_project_file(path: &Path) -> Result<Config> {
        use crate::util::open;
        let project: Project = serde_yaml::from_reader(open(path, "config")?)?;
        match path.parent() {
            None => Err(anyhow!(
                "Can't get parent directory for provided config file path '{:?}'",
                path
            )),
            Some(project_root) => Ok(Config::from_project(project, project_root)),
        }
    }

    /// Parses configuration from YAML text, resolving relative directories
    /// against `project_root`.
    pub fn from_yaml(yaml: &str, project_root: &Path) -> Result<Config> {
        let project: Project = serde_yaml::from_str(yaml)?;
        Ok(Config::from_project(project, project_root))
    }

    fn from_project(project: Project, project_root: &Path) -> Config {
        Config {
            remotes: project.remotes,
            templates_directory: project_root.join(project.templates_directory),
            remotes_directory: project_root.join(project.remotes_directory),
            html_directory: project_root.join(project.html_directory),
            svn: project.svn,
        }
    }
}
