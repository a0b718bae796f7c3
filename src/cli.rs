use clap::Parser;

fn get_version() -> &'static str {
    const BASE_VERSION: &str = env!("CARGO_PKG_VERSION");

    if let Some(tag) = option_env!("AIUPDATE_GIT_TAG") {
        return tag;
    }

    let commit = option_env!("AIUPDATE_GIT_COMMIT").unwrap_or("unknown");
    let branch = option_env!("AIUPDATE_GIT_BRANCH").unwrap_or("unknown");

    // Leaked once at startup
    let version = format!("v{}-{} ({})", BASE_VERSION, commit, branch);
    Box::leak(version.into_boxed_str())
}

#[derive(Parser, Debug)]
#[command(name = "aiupdate")]
#[command(about = "Update all AI coding tools in parallel")]
#[command(version = get_version())]
#[command(after_help = "Examples:\n  aiupdate\n  aiupdate codex gemini\n  aiupdate --strict --json")]
pub struct Cli {
    /// Increase verbosity (use multiple times for more detail)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Reduce output to errors only
    #[arg(short, long)]
    pub quiet: bool,

    /// Seconds to wait for each version check before giving up
    #[arg(long, value_name = "SECS", default_value_t = crate::config::DEFAULT_PROBE_TIMEOUT_SECS)]
    pub probe_timeout: u64,

    /// Skip the version checks before and after updating
    #[arg(long)]
    pub no_version_check: bool,

    /// Exit with status 1 if any tool fails to update
    #[arg(long)]
    pub strict: bool,

    /// Print results as JSON instead of a table
    #[arg(long)]
    pub json: bool,

    /// List the configured tools and exit
    #[arg(long)]
    pub list: bool,

    /// Only update these tools (default: all)
    #[arg(value_name = "TOOL")]
    pub tools: Vec<String>,
}
