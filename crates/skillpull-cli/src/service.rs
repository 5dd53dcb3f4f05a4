use std::io::Write;
use std::sync::Arc;

use anyhow::{Context, Result};
use skillpull_client::{Client, StoreOptions};
use skillpull_persistence::FsStore;
use skillpull_types::Metadata;
use tracing::{debug, info};

use crate::cli::{Args, Command};
use crate::config::{Config, LogFormat};

/// Command runner over a [`Client`]
pub struct SkillPullService {
    client: Client,
    json: bool,
}

impl SkillPullService {
    /// Initialize logging and build a client over the filesystem store
    pub fn new(config: &Config, args: &Args) -> Result<Self> {
        match config.logging.format {
            LogFormat::Text => skillpull_logging::init_logging(&config.logging.level)?,
            LogFormat::Json => skillpull_logging::init_json_logging(&config.logging.level)?,
        }

        let base_path = args.store.clone().unwrap_or_else(|| config.store.path.clone());
        debug!("Using skill store at {}", base_path);

        let client = Client::new(Arc::new(FsStore::new()), base_path, config.github.clone())
            .context("Failed to create skills client")?;
        Ok(Self::with_client(client, args.json))
    }

    /// Wrap an existing client
    pub fn with_client(client: Client, json: bool) -> Self {
        Self { client, json }
    }

    /// Run a command, writing its output to stdout
    pub async fn run(&self, command: Command) -> Result<()> {
        let mut stdout = std::io::stdout();
        self.execute(command, &mut stdout).await?;
        stdout.flush()?;
        Ok(())
    }

    /// Run a command, writing its output to `out`
    pub async fn execute<W: Write>(&self, command: Command, out: &mut W) -> Result<()> {
        match command {
            Command::ListRemote { repo, git_ref } => {
                let skills = self
                    .client
                    .list_remote(&repo.owner, &repo.repo, git_ref.as_deref())
                    .await
                    .with_context(|| format!("Failed to list skills in {repo}"))?;
                self.print_metadata(out, &skills)?;
            }
            Command::Pull {
                repo,
                git_ref,
                name,
            } => {
                let options = StoreOptions { name, git_ref };
                let stored = self
                    .client
                    .store(&repo.owner, &repo.repo, &options)
                    .await
                    .with_context(|| format!("Failed to pull skills from {repo}"))?;
                info!("Pulled {} skills from {}", stored.len(), repo);

                if !self.json {
                    writeln!(
                        out,
                        "Stored {} skill(s) from {} in {}",
                        stored.len(),
                        repo,
                        self.client.base_path()
                    )?;
                }
                self.print_metadata(out, &stored)?;
            }
            Command::List => {
                let skills = self
                    .client
                    .list_local()
                    .await
                    .context("Failed to list stored skills")?;
                self.print_metadata(out, &skills)?;
            }
            Command::Show { name } => {
                let skill_md = self
                    .client
                    .get_skill_md(&name)
                    .await
                    .with_context(|| format!("Failed to read skill {name}"))?;
                out.write_all(skill_md.as_bytes())?;
            }
            Command::Cat { name, path } => {
                let content = self
                    .client
                    .get_file(&name, &path)
                    .await
                    .with_context(|| format!("Failed to read {path} of skill {name}"))?;
                out.write_all(&content)?;
            }
            Command::Remove { name } => {
                self.client
                    .remove(&name)
                    .await
                    .with_context(|| format!("Failed to remove skill {name}"))?;
                writeln!(out, "Removed {name}")?;
            }
        }
        Ok(())
    }

    fn print_metadata<W: Write>(&self, out: &mut W, skills: &[Metadata]) -> Result<()> {
        if self.json {
            serde_json::to_writer_pretty(&mut *out, skills)?;
            writeln!(out)?;
        } else if skills.is_empty() {
            writeln!(out, "No skills found")?;
        } else {
            for skill in skills {
                writeln!(out, "{}", skill.to_summary())?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use skillpull_github::GitHubConfig;
    use skillpull_persistence::{MemoryStore, Store};

    async fn service(json: bool) -> (Arc<MemoryStore>, SkillPullService) {
        let store = Arc::new(MemoryStore::new());
        store
            .write(
                "skills/pdf-tools/SKILL.md",
                b"---\nname: pdf-tools\ndescription: Work with PDFs\n---\n# PDF\n",
            )
            .await
            .unwrap();
        store
            .write("skills/pdf-tools/scripts/fill.py", b"print('fill')")
            .await
            .unwrap();
        let client = Client::new(store.clone(), "skills", GitHubConfig::default()).unwrap();
        (store, SkillPullService::with_client(client, json))
    }

    async fn output(service: &SkillPullService, command: Command) -> String {
        let mut out = Vec::new();
        service.execute(command, &mut out).await.unwrap();
        String::from_utf8(out).unwrap()
    }

    #[tokio::test]
    async fn test_list_text() {
        let (_store, service) = service(false).await;
        assert_eq!(output(&service, Command::List).await, "- pdf-tools: Work with PDFs\n");
    }

    #[tokio::test]
    async fn test_list_json() {
        let (_store, service) = service(true).await;

        let out = output(&service, Command::List).await;

        let parsed: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(parsed[0]["name"], "pdf-tools");
        assert_eq!(parsed[0]["description"], "Work with PDFs");
    }

    #[tokio::test]
    async fn test_list_empty() {
        let (store, service) = service(false).await;
        store.delete("skills").await.unwrap();
        assert_eq!(output(&service, Command::List).await, "No skills found\n");
    }

    #[tokio::test]
    async fn test_show_and_cat() {
        let (_store, service) = service(false).await;

        let show = output(&service, Command::Show { name: "pdf-tools".into() }).await;
        assert!(show.starts_with("---\nname: pdf-tools"));

        let cat = output(
            &service,
            Command::Cat {
                name: "pdf-tools".into(),
                path: "scripts/fill.py".into(),
            },
        )
        .await;
        assert_eq!(cat, "print('fill')");
    }

    #[tokio::test]
    async fn test_remove() {
        let (store, service) = service(false).await;

        let out = output(&service, Command::Remove { name: "pdf-tools".into() }).await;

        assert_eq!(out, "Removed pdf-tools\n");
        assert!(store.is_empty().await);
    }

    #[tokio::test]
    async fn test_missing_skill_error_has_context() {
        let (_store, service) = service(false).await;
        let mut out = Vec::new();

        let err = service
            .execute(Command::Show { name: "nope".into() }, &mut out)
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Failed to read skill nope");
        assert!(out.is_empty());
    }
}
