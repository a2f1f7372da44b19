use anyhow::{Context, Result};
use chrono::Utc;
use std::sync::Arc;
use tracing::{info, warn};

use ghactivity::branch_selector::BranchSelector;
use ghactivity::cancel::cancellation;
use ghactivity::coordinator::FetchOptions;
use ghactivity::generate_report;
use ghactivity::model::{ContributorStats, Period, Report};
use progress::Progress;

use crate::args::{GlobalArgs, Mode, ReportArgs, ReportOutputFormat};
use crate::github_client::{build_client, build_runtime, check_connectivity, explain_rate_limit};
use crate::reportable::{write_report, Reportable};
use crate::util::Counted;

mod csv_format;
mod styles;
mod text_format;

use styles::{StyledObject, Styles};

pub fn run(global_args: &GlobalArgs, args: &ReportArgs) -> Result<()> {
    let (since, until) = args.period_bounds(Utc::now());
    let period = Period::new(since, until).context("Invalid time window")?;

    let client = Arc::new(build_client(&args.github_args)?);
    let runtime = build_runtime()?;
    let options = FetchOptions {
        concurrency: args.jobs,
        selector: BranchSelector::new(args.branch_args.policy()),
    };
    let (cancel_handle, cancel) = cancellation();

    let mut progress = Progress::new_bar(0, "Analyzing repositories", global_args.use_progress());

    let result = runtime.block_on(async {
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Interrupted; cancelling outstanding requests");
                cancel_handle.cancel();
            }
        });

        check_connectivity(&client).await?;
        let result = generate_report(
            Arc::clone(&client),
            &args.target,
            period,
            &options,
            &cancel,
            Some(&mut progress),
        )
        .await
        .with_context(|| format!("Failed to generate report for {}", args.target))?;
        Ok::<_, anyhow::Error>(result)
    });

    let (report, failures) = match result {
        Ok(result) => result,
        Err(e) => {
            explain_rate_limit(&client, &*e);
            return Err(e);
        }
    };

    let num_commits = report.num_commits();
    progress.finish_with_message(format!(
        "Analyzed {} with {} from {}",
        Counted::new(report.repositories.len(), "repository", "repositories"),
        Counted::regular(num_commits, "commit"),
        Counted::regular(report.summary.len(), "contributor"),
    ));

    if !failures.is_empty() {
        warn!(
            "{} could not be analyzed and {} left out of the report",
            Counted::new(failures.len(), "repository", "repositories"),
            if failures.len() == 1 { "is" } else { "are" },
        );
        // one explanation is enough
        let _ = failures
            .iter()
            .any(|f| explain_rate_limit(&client, &f.error));
    }
    if cancel.is_cancelled() {
        warn!("The report is incomplete because the run was interrupted");
    }
    info!(
        "Analyzed {} and {}",
        Counted::new(report.repositories.len(), "repository", "repositories"),
        Counted::regular(num_commits, "commit")
    );

    // The output is only opened now, so that a failed run leaves an existing file untouched.
    let output = args
        .output_args
        .get_writer()
        .context("Failed to get output writer")?;

    // enable output styling:
    // - if the output destination is not explicitly specified and colors are not disabled
    // - if the output destination *is* explicitly specified and colors are forced on
    let styles_enabled = if args.output_args.output.is_none() {
        global_args.use_color(std::io::stdout())
    } else {
        global_args.color == Mode::Always
    };

    let reporter = ActivityReporter {
        report,
        styles: Styles::new(styles_enabled),
    };
    write_report(&reporter, args.output_args.format, output)
}

struct ActivityReporter {
    report: Report,
    styles: Styles,
}

impl ActivityReporter {
    /// Contributors ordered by changed lines, most first, with ties broken by identity key.
    fn ranked_contributors(&self) -> Vec<(&str, &ContributorStats)> {
        let mut contributors: Vec<(&str, &ContributorStats)> = self
            .report
            .summary
            .iter()
            .map(|(key, stats)| (key.as_str(), stats))
            .collect();
        contributors.sort_by(|(k1, s1), (k2, s2)| {
            s2.changed_lines()
                .cmp(&s1.changed_lines())
                .then_with(|| k1.cmp(k2))
        });
        contributors
    }

    fn json_format<W: std::io::Write>(&self, mut writer: W) -> Result<()> {
        serde_json::to_writer_pretty(&mut writer, &self.report)?;
        writeln!(writer)?;
        writer.flush()?;
        Ok(())
    }

    fn style_title<D>(&self, val: D) -> StyledObject<D> {
        self.styles.style_title.apply_to(val)
    }

    fn style_heading<D>(&self, val: D) -> StyledObject<D> {
        self.styles.style_heading.apply_to(val)
    }

    fn style_contributor<D>(&self, val: D) -> StyledObject<D> {
        self.styles.style_contributor.apply_to(val)
    }

    fn style_login<D>(&self, val: D) -> StyledObject<D> {
        self.styles.style_login.apply_to(val)
    }

    fn style_additions<D>(&self, val: D) -> StyledObject<D> {
        self.styles.style_additions.apply_to(val)
    }

    fn style_deletions<D>(&self, val: D) -> StyledObject<D> {
        self.styles.style_deletions.apply_to(val)
    }
}

impl Reportable for ActivityReporter {
    type Format = ReportOutputFormat;

    fn report<W: std::io::Write>(&self, format: Self::Format, writer: W) -> Result<()> {
        match format {
            ReportOutputFormat::Text => self.text_format(writer),
            ReportOutputFormat::Json => self.json_format(writer),
            ReportOutputFormat::Csv => self.csv_format(writer),
        }
    }
}
