use anyhow::{Context, Result};
use serde::Serialize;
use tracing::info;

use ghactivity::github::RepoEnumerator;
use ghactivity::model::Repository;
use progress::Progress;

use crate::args::{GlobalArgs, ReposCommand, ReposListArgs, ReposOutputFormat};
use crate::github_client::{build_client, build_runtime, check_connectivity, explain_rate_limit};
use crate::reportable::{write_report, Reportable};
use crate::util::Counted;

pub fn run(global_args: &GlobalArgs, args: &ReposCommand) -> Result<()> {
    match args {
        ReposCommand::List(args) => list_repos(global_args, args),
    }
}

fn list_repos(global_args: &GlobalArgs, args: &ReposListArgs) -> Result<()> {
    let client = build_client(&args.github_args)?;
    let runtime = build_runtime()?;

    let mut progress = Progress::new_spinner(
        format!("Listing repositories of {}...", args.target),
        global_args.use_progress(),
    );
    let result = runtime.block_on(async {
        check_connectivity(&client).await?;
        let repos = RepoEnumerator::new(&client)
            .enumerate_target_repos(&args.target)
            .await
            .with_context(|| format!("Failed to list repositories of {}", args.target))?;
        Ok::<_, anyhow::Error>(repos.into_iter().map(Repository::from).collect::<Vec<_>>())
    });
    let repos = match result {
        Ok(repos) => repos,
        Err(e) => {
            explain_rate_limit(&client, &*e);
            return Err(e);
        }
    };

    let message = format!(
        "Found {} belonging to {}",
        Counted::new(repos.len(), "repository", "repositories"),
        args.target
    );
    info!("{message}");
    progress.finish_with_message(message);

    let output = args
        .output_args
        .get_writer()
        .context("Failed to get output writer")?;
    write_report(&RepoReporter(repos), args.output_args.format, output)
}

#[derive(Serialize)]
struct RepoEntry<'a> {
    full_name: &'a str,
    default_branch: &'a str,
    url: &'a str,
}

impl<'a> From<&'a Repository> for RepoEntry<'a> {
    fn from(r: &'a Repository) -> Self {
        RepoEntry {
            full_name: &r.full_name,
            default_branch: &r.default_branch,
            url: &r.url,
        }
    }
}

struct RepoReporter(Vec<Repository>);

impl RepoReporter {
    fn repos_table(&self) -> prettytable::Table {
        use prettytable::format::{FormatBuilder, LinePosition, LineSeparator};
        use prettytable::row;

        let f = FormatBuilder::new()
            .column_separator(' ')
            .separators(&[LinePosition::Title], LineSeparator::new('─', '─', '─', '─'))
            .padding(1, 1)
            .build();

        let mut table: prettytable::Table = self
            .0
            .iter()
            .map(|r| row![l -> &r.full_name, l -> &r.default_branch, l -> &r.url])
            .collect();
        table.set_format(f);
        table.set_titles(row![lb -> "Repository", lb -> "Default Branch", lb -> "URL"]);
        table
    }
}

impl Reportable for RepoReporter {
    type Format = ReposOutputFormat;

    fn report<W: std::io::Write>(&self, format: Self::Format, mut writer: W) -> Result<()> {
        match format {
            ReposOutputFormat::Human => {
                self.repos_table().print(&mut writer)?;
            }

            ReposOutputFormat::Json => {
                let entries: Vec<RepoEntry> = self.0.iter().map(RepoEntry::from).collect();
                serde_json::to_writer_pretty(&mut writer, &entries)?;
                writeln!(&mut writer)?;
            }

            ReposOutputFormat::Jsonl => {
                for repo in &self.0 {
                    serde_json::to_writer(&mut writer, &RepoEntry::from(repo))?;
                    writeln!(&mut writer)?;
                }
            }
        }
        writer.flush()?;
        Ok(())
    }
}
