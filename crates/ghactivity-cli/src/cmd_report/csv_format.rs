use super::*;

impl ActivityReporter {
    /// Write one row per contributor and repository, contributors in ranked order and each
    /// contributor's repositories by name.
    pub fn csv_format<W: std::io::Write>(&self, writer: W) -> Result<()> {
        let mut writer = csv::Writer::from_writer(writer);
        writer.write_record([
            "Author",
            "Login",
            "Email",
            "Repository",
            "Commits",
            "Additions",
            "Deletions",
        ])?;

        for (_key, stats) in self.ranked_contributors() {
            let login = stats.login.as_deref().unwrap_or_default();
            for (repo_name, repo_stats) in stats.repositories.iter() {
                let commits = repo_stats.commits.to_string();
                let additions = repo_stats.additions.to_string();
                let deletions = repo_stats.deletions.to_string();
                writer.write_record([
                    stats.name.as_str(),
                    login,
                    stats.email.as_str(),
                    repo_name.as_str(),
                    commits.as_str(),
                    additions.as_str(),
                    deletions.as_str(),
                ])?;
            }
        }

        writer.flush()?;
        Ok(())
    }
}
