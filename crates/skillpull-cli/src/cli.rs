use std::fmt;
use std::str::FromStr;

use clap::{Parser, Subcommand};

/// Pull Agent Skills from GitHub repositories
#[derive(Parser, Debug)]
#[command(name = "skillpull")]
#[command(version, about)]
pub struct Args {
    /// Directory skills are stored in (overrides `[store] path`)
    #[arg(long, global = true, env = "SKILLPULL_STORE")]
    pub store: Option<String>,

    /// Print metadata listings as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// List the skills a repository offers
    ListRemote {
        /// Repository as owner/repo
        repo: RepoSlug,
        /// Branch, tag or commit
        #[arg(long = "ref")]
        git_ref: Option<String>,
    },
    /// Store the skills of a repository
    Pull {
        /// Repository as owner/repo
        repo: RepoSlug,
        /// Branch, tag or commit
        #[arg(long = "ref")]
        git_ref: Option<String>,
        /// Only the skill in this directory
        #[arg(long)]
        name: Option<String>,
    },
    /// List stored skills
    List,
    /// Print the SKILL.md of a stored skill
    Show {
        /// Skill name
        name: String,
    },
    /// Print a file stored with a skill
    Cat {
        /// Skill name
        name: String,
        /// Path relative to the skill directory
        path: String,
    },
    /// Remove a stored skill
    Remove {
        /// Skill name
        name: String,
    },
}

/// `owner/repo`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoSlug {
    pub owner: String,
    pub repo: String,
}

impl FromStr for RepoSlug {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('/') {
            Some((owner, repo)) if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') => {
                Ok(Self {
                    owner: owner.to_string(),
                    repo: repo.to_string(),
                })
            }
            _ => Err(format!("expected owner/repo, got {s:?}")),
        }
    }
}

impl fmt::Display for RepoSlug {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.owner, self.repo)
    }
}
