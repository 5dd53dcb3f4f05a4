//! Skill pulling and local skill management
//!
//! Provides [`Client`], which fetches a repository snapshot, discovers the
//! skills in it and writes them below a base path of a [`Store`]:
//!
//! ```text
//! <base>/<metadata.name>/SKILL.md
//! <base>/<metadata.name>/<file relative to the skill directory>
//! ```

use std::sync::Arc;

use skillpull_github::{GitHubClient, GitHubConfig};
use skillpull_persistence::Store;
use skillpull_skills::{discover_skills, parse_skill_md};
use skillpull_types::{DiscoveredSkill, FileSet, Metadata, SKILL_MD};
use tracing::{debug, info, warn};

use crate::error::{Result, SkillsError};
use crate::paths;

/// Options for [`Client::store`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StoreOptions {
    /// Only store the skill with this directory name
    pub name: Option<String>,
    /// Branch, tag or commit; the default branch when unset
    pub git_ref: Option<String>,
}

/// A discovered skill ready to be written
struct PlannedSkill {
    metadata: Metadata,
    skill_md: Vec<u8>,
    files: FileSet,
}

/// Skills client over a store and the GitHub API
pub struct Client {
    store: Arc<dyn Store>,
    base_path: String,
    github: GitHubClient,
}

impl std::fmt::Debug for Client {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Client")
            .field("base_path", &self.base_path)
            .field("github", &self.github.base_url())
            .finish_non_exhaustive()
    }
}

impl Client {
    /// Create a client storing skills below `base_path`
    ///
    /// Unset token and base URL in `config` fall back to the
    /// `SKILLS_GITHUB_TOKEN` and `SKILLS_GITHUB_URL` environment variables.
    ///
    /// # Errors
    /// Returns [`SkillsError::Fetch`] if the HTTP client cannot be built
    pub fn new(
        store: Arc<dyn Store>,
        base_path: impl Into<String>,
        config: GitHubConfig,
    ) -> Result<Self> {
        let github = GitHubClient::new(&config.with_env_fallback())?;
        Ok(Self {
            store,
            base_path: base_path.into(),
            github,
        })
    }

    /// Base path skills are stored below
    #[must_use]
    pub fn base_path(&self) -> &str {
        &self.base_path
    }

    /// Metadata of every skill in a repository, in discovery order
    ///
    /// # Errors
    /// Fails on fetch errors and on the first descriptor that does not parse
    pub async fn list_remote(
        &self,
        owner: &str,
        repo: &str,
        git_ref: Option<&str>,
    ) -> Result<Vec<Metadata>> {
        let files = self.github.fetch_repo(owner, repo, git_ref).await?;
        discover_skills(&files)
            .iter()
            .map(|skill| parse_descriptor(skill).map(|(metadata, _)| metadata))
            .collect()
    }

    /// Store the skills of a repository, returning their metadata
    ///
    /// Every selected descriptor is parsed and every path checked before
    /// anything is written.
    ///
    /// # Errors
    /// Returns [`SkillsError::SkillNotFound`] when `options.name` matches no
    /// discovered skill, [`SkillsError::UnsafePath`] for names or paths that
    /// would escape the skill directory, and any fetch, parse or store error
    pub async fn store(
        &self,
        owner: &str,
        repo: &str,
        options: &StoreOptions,
    ) -> Result<Vec<Metadata>> {
        let files = self
            .github
            .fetch_repo(owner, repo, options.git_ref.as_deref())
            .await?;
        let mut discovered = discover_skills(&files);

        if let Some(name) = &options.name {
            discovered.retain(|skill| &skill.directory_name == name);
            if discovered.is_empty() {
                return Err(SkillsError::SkillNotFound(name.clone()));
            }
        }

        let planned = discovered
            .into_iter()
            .map(plan_skill)
            .collect::<Result<Vec<_>>>()?;

        let mut stored = Vec::with_capacity(planned.len());
        for skill in planned {
            let skill_dir = paths::join(&self.base_path, &[skill.metadata.name.as_str()]);
            self.store
                .write(&paths::join(&skill_dir, &[SKILL_MD]), &skill.skill_md)
                .await?;
            for (rel_path, content) in skill.files.iter() {
                self.store
                    .write(&paths::join(&skill_dir, &[rel_path]), content)
                    .await?;
            }
            info!(
                "Stored skill '{}' ({} files) in {}",
                skill.metadata.name,
                skill.files.len() + 1,
                skill_dir
            );
            stored.push(skill.metadata);
        }

        Ok(stored)
    }

    /// Metadata of every stored skill
    ///
    /// Directories without a SKILL.md are ignored; unreadable or invalid
    /// descriptors are skipped with a warning.
    ///
    /// # Errors
    /// Fails only if the base path cannot be listed
    pub async fn list_local(&self) -> Result<Vec<Metadata>> {
        let dirs = self.store.list(&self.base_path).await?;
        let mut results = Vec::with_capacity(dirs.len());

        for dir in dirs {
            let skill_md_path = paths::join(&self.base_path, &[dir.as_str(), SKILL_MD]);
            match self.store.exists(&skill_md_path).await {
                Ok(true) => {}
                Ok(false) => {
                    debug!("Skipping {}: no {}", dir, SKILL_MD);
                    continue;
                }
                Err(e) => {
                    warn!("Skipping {}: {}", dir, e);
                    continue;
                }
            }

            match self.read_metadata(&skill_md_path).await {
                Ok(metadata) => results.push(metadata),
                Err(e) => warn!("Skipping invalid skill in {}: {}", dir, e),
            }
        }

        Ok(results)
    }

    /// Metadata of a stored skill
    ///
    /// # Errors
    /// Fails if the skill is not stored or its descriptor does not parse
    pub async fn get_metadata(&self, name: &str) -> Result<Metadata> {
        paths::check_name(name)?;
        self.read_metadata(&self.skill_md_path(name)).await
    }

    /// Raw SKILL.md of a stored skill
    ///
    /// # Errors
    /// Fails if the skill is not stored or its descriptor is not UTF-8
    pub async fn get_skill_md(&self, name: &str) -> Result<String> {
        paths::check_name(name)?;
        let path = self.skill_md_path(name);
        let content = self.store.read(&path).await?;
        String::from_utf8(content).map_err(|e| SkillsError::InvalidUtf8 {
            path,
            source: e.utf8_error(),
        })
    }

    /// Bytes of a file stored with a skill, by path relative to its directory
    ///
    /// # Errors
    /// Fails on unsafe names or paths and if the file is not stored
    pub async fn get_file(&self, name: &str, path: &str) -> Result<Vec<u8>> {
        paths::check_name(name)?;
        paths::check_relative(path)?;
        Ok(self
            .store
            .read(&paths::join(&self.base_path, &[name, path]))
            .await?)
    }

    /// Remove a stored skill and all its files
    ///
    /// # Errors
    /// Returns [`SkillsError::SkillNotFound`] if nothing is stored under `name`
    pub async fn remove(&self, name: &str) -> Result<()> {
        paths::check_name(name)?;
        let skill_dir = paths::join(&self.base_path, &[name]);
        if !self.store.exists(&skill_dir).await? {
            return Err(SkillsError::SkillNotFound(name.to_string()));
        }
        self.store.delete(&skill_dir).await?;
        info!("Removed skill '{}' from {}", name, skill_dir);
        Ok(())
    }

    fn skill_md_path(&self, name: &str) -> String {
        paths::join(&self.base_path, &[name, SKILL_MD])
    }

    async fn read_metadata(&self, skill_md_path: &str) -> Result<Metadata> {
        let content = self.store.read(skill_md_path).await?;
        let text = std::str::from_utf8(&content).map_err(|source| SkillsError::InvalidUtf8 {
            path: skill_md_path.to_string(),
            source,
        })?;
        let (metadata, _) = parse_skill_md(text)?;
        Ok(metadata)
    }
}

/// Parse a discovered descriptor into metadata and body
fn parse_descriptor(skill: &DiscoveredSkill) -> Result<(Metadata, String)> {
    let text = std::str::from_utf8(&skill.skill_md).map_err(|source| SkillsError::InvalidUtf8 {
        path: paths::join(&skill.path, &[SKILL_MD]),
        source,
    })?;
    Ok(parse_skill_md(text)?)
}

/// Parse and validate a discovered skill before anything is written
fn plan_skill(skill: DiscoveredSkill) -> Result<PlannedSkill> {
    let (metadata, _) = parse_descriptor(&skill)?;
    paths::check_name(&metadata.name)?;
    for rel_path in skill.files.paths() {
        paths::check_relative(rel_path)?;
    }
    debug!(
        "Planned skill '{}' from {} ({} files)",
        metadata.name,
        skill.path,
        skill.files.len()
    );
    Ok(PlannedSkill {
        metadata,
        skill_md: skill.skill_md,
        files: skill.files,
    })
}
