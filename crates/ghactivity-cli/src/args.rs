use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use clap::builder::TypedValueParser;
use clap::{crate_description, ArgAction, Args, Parser, Subcommand, ValueEnum};
use std::io::IsTerminal;
use std::path::PathBuf;
use url::Url;

use ghactivity::branch_selector::{BranchPolicy, IMPORTANT_BRANCHES};
use ghactivity::coordinator::DEFAULT_CONCURRENCY;

/// The number of days analyzed when `--since` is not given
pub const DEFAULT_LOOKBACK_DAYS: i64 = 30;

// -----------------------------------------------------------------------------
// command-line args
// -----------------------------------------------------------------------------
#[derive(Parser, Debug)]
#[command(
    name("ghactivity"),
    bin_name("ghactivity"),

    author,   // retrieved from Cargo.toml `authors`
    version,  // retrieved from Cargo.toml `version`
    about,    // retrieved from Cargo.toml `description`

    long_about = concat!(
        crate_description!(),
    ),
)]
#[deny(missing_docs)]
/// Report commit activity of a GitHub user or organization
pub struct CommandLineArgs {
    #[command(subcommand)]
    pub command: Command,

    #[command(flatten)]
    pub global_args: GlobalArgs,
}

impl CommandLineArgs {
    pub fn parse_args() -> Self {
        let mut args = Self::parse();

        // If `NO_COLOR` is set in the environment, disable colored output
        //
        // https://no-color.org/
        if std::env::var("NO_COLOR").is_ok() {
            args.global_args.color = Mode::Never
        }

        args
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Report per-contributor commit activity
    ///
    /// Every non-archived repository of the target is analyzed. For each repository, the commits
    /// within the time window on its default branch and its important branches are fetched, and
    /// then rolled up per contributor.
    ///
    /// Contributors are identified by their GitHub login if the commit is linked to an account,
    /// otherwise by their email, otherwise by their name.
    ///
    /// Repositories that cannot be analyzed are reported as warnings and left out of the report.
    ///
    /// By default, unauthenticated access is used.
    /// An optional personal access token can be specified using the `GITHUB_TOKEN` environment variable.
    /// Using a personal access token gives much higher rate limits and may make additional repositories accessible.
    #[command(display_order = 1)]
    Report(ReportArgs),

    /// Interact with repositories
    #[command(display_order = 2, subcommand)]
    Repos(ReposCommand),
}

// -----------------------------------------------------------------------------
// global options
// -----------------------------------------------------------------------------
#[derive(Args, Debug)]
#[command(next_help_heading = "Global Options")]
pub struct GlobalArgs {
    /// Enable verbose output
    ///
    /// This can be repeated up to 3 times to enable successively more output.
    #[arg(global=true, long, short, action=ArgAction::Count)]
    pub verbose: u8,

    /// Suppress non-error feedback messages
    ///
    /// This silences WARNING, INFO, DEBUG, and TRACE messages and disables progress bars.
    /// This overrides any provided verbosity and progress reporting options.
    #[arg(global=true, long, short)]
    pub quiet: bool,

    /// Enable or disable colored output
    ///
    /// When this is "auto", colors are enabled for stdout and stderr when they are terminals.
    ///
    /// If the `NO_COLOR` environment variable is set, it takes precedence and is equivalent to `--color=never`.
    #[arg(global=true, long, default_value_t=Mode::Auto, value_name="MODE")]
    pub color: Mode,

    /// Enable or disable progress bars
    ///
    /// When this is "auto", progress bars are enabled when stderr is a terminal.
    #[arg(global=true, long, default_value_t=Mode::Auto, value_name="MODE")]
    pub progress: Mode,
}

impl GlobalArgs {
    pub fn use_color<T: IsTerminal>(&self, out: T) -> bool {
        match self.color {
            Mode::Never => false,
            Mode::Always => true,
            Mode::Auto => out.is_terminal(),
        }
    }

    pub fn use_progress(&self) -> bool {
        if self.quiet {
            return false;
        }

        match self.progress {
            Mode::Never => false,
            Mode::Always => true,
            Mode::Auto => std::io::stderr().is_terminal(),
        }
    }
}

/// A generic auto/never/always mode value
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum Mode {
    Auto,
    Never,
    Always,
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Mode::Auto => "auto",
            Mode::Never => "never",
            Mode::Always => "always",
        };
        write!(f, "{s}")
    }
}

// -----------------------------------------------------------------------------
// GitHub connection options
// -----------------------------------------------------------------------------
#[derive(Args, Debug, Clone)]
#[command(next_help_heading = "GitHub Options")]
pub struct GitHubApiArgs {
    /// Use the specified URL for GitHub API access
    ///
    /// If accessing a GitHub Enterprise Server instance, this value should be the entire base URL
    /// include the `api/v3` portion, e.g., `https://github.example.com/api/v3`.
    #[arg(
        long,
        value_name = "URL",
        default_value = "https://api.github.com",
        visible_alias = "api-url"
    )]
    pub github_api_url: Url,

    /// Ignore validation of TLS certificates
    #[arg(long)]
    pub ignore_certs: bool,
}

// -----------------------------------------------------------------------------
// `report` command
// -----------------------------------------------------------------------------
#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Analyze the repositories of the specified GitHub organization or user
    ///
    /// The name is looked up as an organization first, then as a user.
    #[arg(long, short, value_name = "NAME")]
    pub target: String,

    /// Analyze commits authored on or after this date (YYYY-MM-DD, UTC)
    ///
    /// Defaults to 30 days before now.
    #[arg(long, value_name = "DATE", value_parser = parse_date)]
    pub since: Option<NaiveDate>,

    /// Analyze commits authored on or before this date (YYYY-MM-DD, UTC)
    ///
    /// The whole day is included. Defaults to now.
    #[arg(long, value_name = "DATE", value_parser = parse_date)]
    pub until: Option<NaiveDate>,

    /// Process up to N repositories concurrently
    #[arg(
        long,
        short,
        default_value_t = DEFAULT_CONCURRENCY,
        value_name = "N",
        value_parser = clap::value_parser!(u16).range(1..).map(usize::from),
    )]
    pub jobs: usize,

    #[command(flatten)]
    pub branch_args: BranchArgs,

    #[command(flatten)]
    pub github_args: GitHubApiArgs,

    #[command(flatten)]
    pub output_args: OutputArgs<ReportOutputFormat>,
}

impl ReportArgs {
    /// Resolve the time window to analyze, relative to `now`.
    pub fn period_bounds(&self, now: DateTime<Utc>) -> (DateTime<Utc>, DateTime<Utc>) {
        let since = match self.since {
            Some(date) => date.and_time(NaiveTime::MIN).and_utc(),
            None => now - Duration::days(DEFAULT_LOOKBACK_DAYS),
        };
        let until = match self.until {
            Some(date) => end_of_day(date),
            None => now,
        };
        (since, until)
    }
}

fn end_of_day(date: NaiveDate) -> DateTime<Utc> {
    let next = date.succ_opt().unwrap_or(NaiveDate::MAX);
    next.and_time(NaiveTime::MIN).and_utc() - Duration::seconds(1)
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|e| format!("expected a date of the form YYYY-MM-DD: {e}"))
}

#[derive(Args, Debug)]
#[command(next_help_heading = "Branch Options")]
pub struct BranchArgs {
    /// Analyze every branch of each repository
    ///
    /// By default only the default branch and the important branches are analyzed, which keeps
    /// the number of API requests bounded.
    #[arg(long, conflicts_with = "branch")]
    pub all_branches: bool,

    /// Treat the specified branch name as important
    ///
    /// This option can be repeated. Branches are analyzed in the given order, after the default
    /// branch. If not given, the important branches are `main`, `master`, `develop`, `dev`,
    /// `staging`, and `production`.
    #[arg(long, value_name = "NAME")]
    pub branch: Vec<String>,
}

impl BranchArgs {
    pub fn policy(&self) -> BranchPolicy {
        if self.all_branches {
            BranchPolicy::All
        } else if self.branch.is_empty() {
            BranchPolicy::Important(IMPORTANT_BRANCHES.iter().map(|s| s.to_string()).collect())
        } else {
            BranchPolicy::Important(self.branch.clone())
        }
    }
}

// -----------------------------------------------------------------------------
// `repos` command
// -----------------------------------------------------------------------------
#[derive(Subcommand, Debug)]
pub enum ReposCommand {
    /// List the repositories of a specific user or organization
    ///
    /// Archived repositories are not listed, as they are never analyzed.
    List(ReposListArgs),
}

#[derive(Args, Debug)]
pub struct ReposListArgs {
    /// List the repositories of the specified GitHub organization or user
    #[arg(long, short, value_name = "NAME")]
    pub target: String,

    #[command(flatten)]
    pub github_args: GitHubApiArgs,

    #[command(flatten)]
    pub output_args: OutputArgs<ReposOutputFormat>,
}

// -----------------------------------------------------------------------------
// output options
// -----------------------------------------------------------------------------
#[derive(Args, Debug)]
#[command(next_help_heading = "Output Options")]
pub struct OutputArgs<Format: ValueEnum + Send + Sync + 'static> {
    /// Write output to the specified path
    ///
    /// If this argument is not provided, stdout will be used.
    #[arg(long, short, value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Write output in the specified format
    // "human" is a valid value for every output format
    #[arg(long, short, value_name = "FORMAT", default_value = "human")]
    pub format: Format,
}

impl<Format: ValueEnum + Send + Sync> OutputArgs<Format> {
    /// Get a writer for the specified output destination.
    pub fn get_writer(&self) -> std::io::Result<Box<dyn std::io::Write>> {
        use std::fs::File;
        use std::io::BufWriter;

        match &self.output {
            None => Ok(Box::new(BufWriter::new(std::io::stdout()))),
            Some(p) => {
                let f = File::create(p)?;
                Ok(Box::new(BufWriter::new(f)))
            }
        }
    }
}

// -----------------------------------------------------------------------------
// report output format
// -----------------------------------------------------------------------------
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum ReportOutputFormat {
    /// A text-based format designed for humans
    #[value(alias = "human")]
    Text,

    /// Pretty-printed JSON format
    Json,

    /// CSV format, with one row per contributor and repository
    Csv,
}

// -----------------------------------------------------------------------------
// repos output format
// -----------------------------------------------------------------------------
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, ValueEnum)]
pub enum ReposOutputFormat {
    /// A text-based format designed for humans
    Human,

    /// Pretty-printed JSON format
    Json,

    /// JSON Lines format
    ///
    /// This is a sequence of JSON objects, one per line.
    Jsonl,
}
