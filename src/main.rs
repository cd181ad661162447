//! group-sync: clone or pull every project under one or more GitLab groups
//! into folders that mirror their namespaces.

use anyhow::Result;
use clap::{Arg, ArgAction, ArgMatches, Command as ClapCommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use group_sync::commands::handle_sync_command;
use group_sync::core::{CliArgs, FileConfig, SyncSettings, ENV_GITLAB_TOKEN, ENV_GITLAB_URL};

fn build_cli() -> ClapCommand {
    ClapCommand::new("group-sync")
        .version(env!("CARGO_PKG_VERSION"))
        .about(
            "Clone or pull all GitLab repos under one or more groups \
             (including nested subgroups) into folders by namespace",
        )
        .arg(
            Arg::new("gitlab-url")
                .long("gitlab-url")
                .env(ENV_GITLAB_URL)
                .help("Base GitLab URL, e.g. https://gitlab.com"),
        )
        .arg(
            Arg::new("token")
                .long("token")
                .env(ENV_GITLAB_TOKEN)
                .hide_env_values(true)
                .help("Personal Access Token with read_api/read_repository scope"),
        )
        .arg(
            Arg::new("group-ids")
                .long("group-ids")
                .num_args(1..)
                .action(ArgAction::Append)
                .help("One or more group IDs or full paths (e.g. 123 my-group/subgroup)"),
        )
        .arg(
            Arg::new("dest")
                .long("dest")
                .value_parser(clap::value_parser!(PathBuf))
                .help("Destination directory to clone into [default: .]"),
        )
        .arg(
            Arg::new("use-ssh")
                .long("use-ssh")
                .action(ArgAction::SetTrue)
                .help("Use SSH URLs instead of HTTP URLs"),
        )
        .arg(
            Arg::new("jobs")
                .long("jobs")
                .short('j')
                .value_parser(clap::value_parser!(usize))
                .help("Projects to sync at once (0 = auto; default: one at a time)"),
        )
        .arg(
            Arg::new("http-timeout")
                .long("http-timeout")
                .value_parser(clap::value_parser!(u64))
                .help("Timeout in seconds for each API request"),
        )
        .arg(
            Arg::new("git-timeout")
                .long("git-timeout")
                .value_parser(clap::value_parser!(u64))
                .help("Timeout in seconds for each clone or pull"),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .value_parser(clap::value_parser!(PathBuf))
                .help("Config file (default: <config dir>/group-sync/config.toml)"),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .action(ArgAction::SetTrue)
                .conflicts_with("quiet")
                .help("Log every API request"),
        )
        .arg(
            Arg::new("quiet")
                .long("quiet")
                .short('q')
                .action(ArgAction::SetTrue)
                .help("Only log warnings and errors; no progress output"),
        )
}

fn cli_args(matches: &ArgMatches) -> CliArgs {
    CliArgs {
        gitlab_url: matches.get_one::<String>("gitlab-url").cloned(),
        token: matches.get_one::<String>("token").cloned(),
        group_ids: matches
            .get_many::<String>("group-ids")
            .map(|ids| ids.cloned().collect())
            .unwrap_or_default(),
        dest: matches.get_one::<PathBuf>("dest").cloned(),
        use_ssh: matches.get_flag("use-ssh"),
        jobs: matches.get_one::<usize>("jobs").copied(),
        http_timeout_secs: matches.get_one::<u64>("http-timeout").copied(),
        git_timeout_secs: matches.get_one::<u64>("git-timeout").copied(),
        config: matches.get_one::<PathBuf>("config").cloned(),
    }
}

fn init_logging(verbose: bool, quiet: bool) {
    let default_level = if verbose {
        "debug"
    } else if quiet {
        "warn"
    } else {
        "info"
    };
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

async fn run(matches: ArgMatches) -> Result<()> {
    let quiet = matches.get_flag("quiet");
    let args = cli_args(&matches);
    let file = FileConfig::discover(args.config.as_deref())?;
    let settings = SyncSettings::resolve(args, file)?;

    // Recovered group and project failures are reported, not fatal
    handle_sync_command(settings, !quiet).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let matches = build_cli().get_matches();
    init_logging(matches.get_flag("verbose"), matches.get_flag("quiet"));

    tokio::select! {
        result = run(matches) => match result {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                error!("fatal error: {e:#}");
                ExitCode::FAILURE
            }
        },
        _ = tokio::signal::ctrl_c() => {
            info!("aborted by user");
            ExitCode::SUCCESS
        }
    }
}
