use std::collections::HashSet;

use crate::model::Branch;

/// Names of the branches analyzed by default, in priority order.
pub const IMPORTANT_BRANCHES: &[&str] = &["main", "master", "develop", "dev", "staging", "production"];

// -------------------------------------------------------------------------------------------------
// BranchPolicy
// -------------------------------------------------------------------------------------------------
/// Which branches of a repository get their commits fetched.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BranchPolicy {
    /// The default branch, then the first branch matching each of these names, in this order.
    Important(Vec<String>),

    /// The default branch, then every other branch in listing order.
    All,
}

impl Default for BranchPolicy {
    fn default() -> Self {
        BranchPolicy::Important(IMPORTANT_BRANCHES.iter().map(|s| s.to_string()).collect())
    }
}

// -------------------------------------------------------------------------------------------------
// BranchSelector
// -------------------------------------------------------------------------------------------------
/// Picks the bounded subset of branches to analyze for a repository.
///
/// Selection is deterministic. The default branch always comes first if present, and a branch
/// name is never selected twice. An empty selection is not an error.
#[derive(Clone, Debug, Default)]
pub struct BranchSelector {
    policy: BranchPolicy,
}

impl BranchSelector {
    pub fn new(policy: BranchPolicy) -> Self {
        BranchSelector { policy }
    }

    pub fn select(&self, branches: &[Branch], default_branch: &str) -> Vec<Branch> {
        let mut seen: HashSet<&str> = HashSet::new();
        let mut selected = Vec::new();

        let mut take = |name: &str, selected: &mut Vec<Branch>| {
            if seen.contains(name) {
                return;
            }
            if let Some(b) = branches.iter().find(|b| b.name == name) {
                seen.insert(&b.name);
                selected.push(b.clone());
            }
        };

        take(default_branch, &mut selected);

        match &self.policy {
            BranchPolicy::Important(names) => {
                for name in names {
                    take(name, &mut selected);
                }
            }
            BranchPolicy::All => {
                for b in branches {
                    take(&b.name, &mut selected);
                }
            }
        }

        selected
    }
}

/// Select branches using the default priority list.
pub fn select_branches(branches: &[Branch], default_branch: &str) -> Vec<Branch> {
    BranchSelector::default().select(branches, default_branch)
}
