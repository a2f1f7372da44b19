use super::*;

/// The number of repositories listed for each contributor
const TOP_REPOSITORIES: usize = 5;

const DATE_FORMAT: &str = "%Y-%m-%d";

impl ActivityReporter {
    pub fn text_format<W: std::io::Write>(&self, mut writer: W) -> Result<()> {
        let report = &self.report;

        writeln!(writer, "{} {}", self.style_title("GitHub Activity Report for:"), report.target)?;
        writeln!(
            writer,
            "{} {} to {}",
            self.style_heading("Period:"),
            report.period.since.format(DATE_FORMAT),
            report.period.until.format(DATE_FORMAT),
        )?;
        writeln!(writer, "{} {}", self.style_heading("Repositories analyzed:"), report.repositories.len())?;
        writeln!(writer)?;

        writeln!(writer, "{}", self.style_title("CONTRIBUTOR SUMMARY"))?;
        writeln!(writer, "{}", self.style_title("==================="))?;
        writeln!(writer)?;

        for (key, stats) in self.ranked_contributors() {
            self.write_contributor(&mut writer, key, stats)?;
        }

        writer.flush()?;
        Ok(())
    }

    fn write_contributor<W: std::io::Write>(
        &self,
        writer: &mut W,
        key: &str,
        stats: &ContributorStats,
    ) -> Result<()> {
        let name = if stats.name.is_empty() { key } else { stats.name.as_str() };
        write!(writer, "{}", self.style_contributor(name))?;
        match stats.login.as_deref() {
            Some(login) if !login.is_empty() => {
                writeln!(writer, " {}", self.style_login(format!("(@{login})")))?
            }
            _ => writeln!(writer)?,
        }
        if !stats.email.is_empty() {
            writeln!(writer, "  Email: {}", stats.email)?;
        }
        writeln!(writer, "  Total Commits: {}", stats.total_commits)?;
        writeln!(writer, "  Total Additions: {}", self.style_additions(stats.total_additions))?;
        writeln!(writer, "  Total Deletions: {}", self.style_deletions(stats.total_deletions))?;
        writeln!(writer, "  Repositories: {}", stats.repositories.len())?;

        let mut repos: Vec<_> = stats.repositories.iter().collect();
        repos.sort_by(|(n1, s1), (n2, s2)| {
            s2.changed_lines()
                .cmp(&s1.changed_lines())
                .then_with(|| n1.cmp(n2))
        });

        writeln!(writer, "  Top Repositories:")?;
        for (repo_name, repo_stats) in repos.into_iter().take(TOP_REPOSITORIES) {
            let commits = usize::try_from(repo_stats.commits).unwrap_or(usize::MAX);
            writeln!(
                writer,
                "    - {repo_name}: {} ({}/{})",
                Counted::regular(commits, "commit"),
                self.style_additions(format!("+{}", repo_stats.additions)),
                self.style_deletions(format!("-{}", repo_stats.deletions)),
            )?;
        }
        writeln!(writer)?;
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::super::test::{commit, render, repo, reporter};
    use crate::args::ReportOutputFormat;
    use pretty_assertions::assert_eq;

    #[test]
    fn text_report() {
        let reporter = reporter(vec![
            repo(
                "acme/widgets",
                vec![
                    commit(Some("johndoe"), "John Doe", 10, 5),
                    commit(Some("johndoe"), "John Doe", 20, 3),
                ],
            ),
            repo("acme/gadgets", vec![commit(None, "Jane", 1, 0)]),
        ]);

        let expected = "\
GitHub Activity Report for: acme
Period: 2024-01-01 to 2024-01-31
Repositories analyzed: 2

CONTRIBUTOR SUMMARY
===================

John Doe (@johndoe)
  Email: john doe@example.com
  Total Commits: 2
  Total Additions: 30
  Total Deletions: 8
  Repositories: 1
  Top Repositories:
    - acme/widgets: 2 commits (+30/-8)

Jane
  Email: jane@example.com
  Total Commits: 1
  Total Additions: 1
  Total Deletions: 0
  Repositories: 1
  Top Repositories:
    - acme/gadgets: 1 commit (+1/-0)

";
        assert_eq!(render(&reporter, ReportOutputFormat::Text), expected);
    }

    #[test]
    fn top_repositories_are_limited() {
        let repos = (0..7)
            .map(|i| repo(&format!("acme/r{i}"), vec![commit(Some("jd"), "J", i, 0)]))
            .collect();
        let text = render(&reporter(repos), ReportOutputFormat::Text);

        assert!(text.contains("  Repositories: 7\n"), "{text}");
        let listed: Vec<&str> = text.lines().filter(|l| l.starts_with("    - ")).collect();
        assert_eq!(
            listed,
            vec![
                "    - acme/r6: 1 commit (+6/-0)",
                "    - acme/r5: 1 commit (+5/-0)",
                "    - acme/r4: 1 commit (+4/-0)",
                "    - acme/r3: 1 commit (+3/-0)",
                "    - acme/r2: 1 commit (+2/-0)",
            ]
        );
    }

    #[test]
    fn empty_report() {
        let text = render(&reporter(vec![]), ReportOutputFormat::Text);
        assert!(text.contains("Repositories analyzed: 0\n"));
        assert!(text.ends_with("===================\n\n"));
    }
}
