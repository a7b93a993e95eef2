use crate::git_ops::GitOps;
use crate::task::ReminderData;
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// TOML file storage for `ReminderData`, optionally synchronised through git
pub struct Storage {
    file_path: PathBuf,
    git_ops: Option<GitOps>,
}

impl Storage {
    /// # Arguments
    /// * `file_path` - Path of the TOML data file
    /// * `sync_git` - Pull on load, commit on save and push on shutdown
    pub fn new(file_path: impl AsRef<Path>, sync_git: bool) -> Self {
        let file_path = file_path.as_ref().to_path_buf();
        let git_ops = sync_git.then(|| GitOps::new(&file_path));
        if let Some(git) = &git_ops
            && !git.is_git_managed()
        {
            warn!(
                path = %file_path.display(),
                "git sync requested but the data file is not inside a git repository"
            );
        }
        Self { file_path, git_ops }
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }

    /// Load the data file; a missing file yields empty data
    pub fn load(&self) -> Result<ReminderData> {
        if let Some(git) = &self.git_ops
            && let Err(e) = git.pull()
        {
            warn!("git pull failed, continuing with local data: {:#}", e);
        }

        if !self.file_path.exists() {
            info!(path = %self.file_path.display(), "data file not found, starting empty");
            return Ok(ReminderData::new());
        }

        let content = fs::read_to_string(&self.file_path)
            .with_context(|| format!("Failed to read {}", self.file_path.display()))?;
        let data: ReminderData = toml::from_str(&content)
            .with_context(|| format!("Failed to parse {}", self.file_path.display()))?;
        Ok(data)
    }

    pub fn save(&self, data: &ReminderData) -> Result<()> {
        self.save_with_message(data, "Update reminders")
    }

    /// Write the data file and, with git sync enabled, commit it with `message`
    pub fn save_with_message(&self, data: &ReminderData, message: &str) -> Result<()> {
        let content = toml::to_string_pretty(data).context("Failed to serialize data")?;
        fs::write(&self.file_path, content)
            .with_context(|| format!("Failed to write {}", self.file_path.display()))?;

        if let Some(git) = &self.git_ops {
            git.commit(&self.file_path, message)
                .context("Failed to commit data file")?;
        }
        Ok(())
    }

    /// Push pending commits when git sync is enabled
    pub fn shutdown(&self) -> Result<()> {
        match &self.git_ops {
            Some(git) if git.is_git_managed() => git.push(),
            _ => Ok(()),
        }
    }
}
