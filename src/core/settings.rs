//! Run settings layered from command line, environment and config file

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};
use std::time::Duration;

use super::config::{get_sync_concurrency, CONFIG_DIR_NAME, CONFIG_FILE_NAME};
use crate::gitlab::GroupRef;
use crate::sync::RemoteProtocol;

/// Optional TOML config file contents
///
/// Every key may be omitted; command-line flags and environment variables
/// take precedence over anything set here.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub gitlab_url: Option<String>,
    pub token: Option<String>,
    pub group_ids: Option<Vec<String>>,
    pub dest: Option<PathBuf>,
    pub use_ssh: Option<bool>,
    pub jobs: Option<usize>,
    pub http_timeout_secs: Option<u64>,
    pub git_timeout_secs: Option<u64>,
}

impl FileConfig {
    pub fn parse(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        Self::parse(&content)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    /// `<config dir>/group-sync/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(CONFIG_DIR_NAME).join(CONFIG_FILE_NAME))
    }

    /// Loads the explicitly requested file, or the default file if it exists
    pub fn discover(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load(path);
        }
        match Self::default_path() {
            Some(path) if path.is_file() => Self::load(&path),
            _ => Ok(Self::default()),
        }
    }
}

/// Values collected from the command line (environment already folded in)
#[derive(Debug, Default, Clone)]
pub struct CliArgs {
    pub gitlab_url: Option<String>,
    pub token: Option<String>,
    pub group_ids: Vec<String>,
    pub dest: Option<PathBuf>,
    pub use_ssh: bool,
    pub jobs: Option<usize>,
    pub http_timeout_secs: Option<u64>,
    pub git_timeout_secs: Option<u64>,
    pub config: Option<PathBuf>,
}

/// Fully resolved settings for one run
#[derive(Clone)]
pub struct SyncSettings {
    pub gitlab_url: String,
    pub token: String,
    pub roots: Vec<GroupRef>,
    pub dest: PathBuf,
    pub protocol: RemoteProtocol,
    pub jobs: usize,
    pub http_timeout: Option<Duration>,
    pub git_timeout: Option<Duration>,
}

impl fmt::Debug for SyncSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyncSettings")
            .field("gitlab_url", &self.gitlab_url)
            .field("token", &"<redacted>")
            .field("roots", &self.roots)
            .field("dest", &self.dest)
            .field("protocol", &self.protocol)
            .field("jobs", &self.jobs)
            .field("http_timeout", &self.http_timeout)
            .field("git_timeout", &self.git_timeout)
            .finish()
    }
}

impl SyncSettings {
    /// Merges command line over config file and validates the result
    pub fn resolve(cli: CliArgs, file: FileConfig) -> Result<Self> {
        let gitlab_url = match non_empty(cli.gitlab_url).or(non_empty(file.gitlab_url)) {
            Some(url) => url,
            None => bail!(
                "missing GitLab URL: pass --gitlab-url, set GITLAB_URL or add gitlab_url to the config file"
            ),
        };
        let token = match non_empty(cli.token).or(non_empty(file.token)) {
            Some(token) => token,
            None => bail!(
                "missing access token: pass --token, set GITLAB_TOKEN or add token to the config file"
            ),
        };

        let raw_ids = if cli.group_ids.is_empty() {
            file.group_ids.unwrap_or_default()
        } else {
            cli.group_ids
        };
        if raw_ids.is_empty() {
            bail!("no groups to sync: pass --group-ids or add group_ids to the config file");
        }
        let mut roots: Vec<GroupRef> = Vec::with_capacity(raw_ids.len());
        for raw in &raw_ids {
            let group: GroupRef = raw.parse().map_err(anyhow::Error::msg)?;
            if !roots.contains(&group) {
                roots.push(group);
            }
        }

        let protocol = if cli.use_ssh || file.use_ssh.unwrap_or(false) {
            RemoteProtocol::Ssh
        } else {
            RemoteProtocol::Http
        };

        Ok(Self {
            gitlab_url,
            token,
            roots,
            dest: cli.dest.or(file.dest).unwrap_or_else(|| PathBuf::from(".")),
            protocol,
            jobs: get_sync_concurrency(cli.jobs.or(file.jobs)),
            http_timeout: cli
                .http_timeout_secs
                .or(file.http_timeout_secs)
                .map(Duration::from_secs),
            git_timeout: cli
                .git_timeout_secs
                .or(file.git_timeout_secs)
                .map(Duration::from_secs),
        })
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cli() -> CliArgs {
        CliArgs {
            gitlab_url: Some("https://gitlab.test".to_string()),
            token: Some("glpat-cli".to_string()),
            group_ids: vec!["123".to_string(), "team/sub".to_string()],
            ..CliArgs::default()
        }
    }

    #[test]
    fn test_defaults_when_only_required_values_given() {
        let settings = SyncSettings::resolve(cli(), FileConfig::default()).unwrap();
        assert_eq!(settings.gitlab_url, "https://gitlab.test");
        assert_eq!(
            settings.roots,
            vec![GroupRef::Id(123), GroupRef::Path("team/sub".to_string())]
        );
        assert_eq!(settings.dest, PathBuf::from("."));
        assert_eq!(settings.protocol, RemoteProtocol::Http);
        assert_eq!(settings.jobs, 1);
        assert_eq!(settings.http_timeout, None);
        assert_eq!(settings.git_timeout, None);
    }

    #[test]
    fn test_cli_overrides_config_file() {
        let file = FileConfig::parse(
            r#"
gitlab_url = "https://file.example"
token = "glpat-file"
group_ids = ["999"]
dest = "/srv/mirror"
use_ssh = true
jobs = 4
git_timeout_secs = 600
"#,
        )
        .unwrap();

        let settings = SyncSettings::resolve(cli(), file).unwrap();
        assert_eq!(settings.gitlab_url, "https://gitlab.test");
        assert_eq!(settings.token, "glpat-cli");
        assert_eq!(settings.roots.len(), 2);
        // Values absent from the command line fall back to the file
        assert_eq!(settings.dest, PathBuf::from("/srv/mirror"));
        assert_eq!(settings.protocol, RemoteProtocol::Ssh);
        assert_eq!(settings.jobs, 4);
        assert_eq!(settings.git_timeout, Some(Duration::from_secs(600)));
    }

    #[test]
    fn test_config_file_supplies_everything() {
        let file = FileConfig {
            gitlab_url: Some("https://file.example".to_string()),
            token: Some("glpat-file".to_string()),
            group_ids: Some(vec!["7".to_string()]),
            ..FileConfig::default()
        };
        let settings = SyncSettings::resolve(CliArgs::default(), file).unwrap();
        assert_eq!(settings.gitlab_url, "https://file.example");
        assert_eq!(settings.roots, vec![GroupRef::Id(7)]);
    }

    #[test]
    fn test_missing_required_values_are_fatal() {
        let no_url = CliArgs {
            gitlab_url: None,
            ..cli()
        };
        let err = SyncSettings::resolve(no_url, FileConfig::default()).unwrap_err();
        assert!(err.to_string().contains("--gitlab-url"));

        let blank_token = CliArgs {
            token: Some("  ".to_string()),
            ..cli()
        };
        let err = SyncSettings::resolve(blank_token, FileConfig::default()).unwrap_err();
        assert!(err.to_string().contains("--token"));

        let no_groups = CliArgs {
            group_ids: Vec::new(),
            ..cli()
        };
        let err = SyncSettings::resolve(no_groups, FileConfig::default()).unwrap_err();
        assert!(err.to_string().contains("--group-ids"));
    }

    #[test]
    fn test_duplicate_roots_are_collapsed() {
        let args = CliArgs {
            group_ids: vec!["5".to_string(), "team".to_string(), "5".to_string()],
            ..cli()
        };
        let settings = SyncSettings::resolve(args, FileConfig::default()).unwrap();
        assert_eq!(
            settings.roots,
            vec![GroupRef::Id(5), GroupRef::Path("team".to_string())]
        );
    }

    #[test]
    fn test_unknown_config_keys_are_rejected() {
        assert!(FileConfig::parse("gitlab_host = \"x\"").is_err());
    }

    #[test]
    fn test_debug_output_redacts_token() {
        let settings = SyncSettings::resolve(cli(), FileConfig::default()).unwrap();
        let debug = format!("{settings:?}");
        assert!(!debug.contains("glpat-cli"));
        assert!(debug.contains("<redacted>"));
    }

    #[test]
    fn test_load_reads_file_from_disk() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "token = \"abc\"\njobs = 0\n").unwrap();

        let file = FileConfig::discover(Some(&path)).unwrap();
        assert_eq!(file.token.as_deref(), Some("abc"));
        assert_eq!(file.jobs, Some(0));

        let missing = FileConfig::discover(Some(&dir.path().join("nope.toml")));
        assert!(missing.is_err());
    }
}
