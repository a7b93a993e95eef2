//! Git synchronisation of the reminder data file
//!
//! When the data file lives inside a git work tree, saves are committed and
//! the branch is pulled (fast-forward only) on startup and pushed on shutdown.
//! Outside a repository every operation is a no-op.

use anyhow::{Context, Result, anyhow};
use git2::{Repository, Signature, Time};
use std::path::Path;
use std::sync::Mutex;
use tracing::{debug, info};

const FALLBACK_NAME: &str = "Reminder MCP Server";
const FALLBACK_EMAIL: &str = "reminder-mcp@localhost";

pub struct GitOps {
    repo: Option<Mutex<Repository>>,
}

impl GitOps {
    /// Discover the repository that contains `file_path`, if any
    pub fn new(file_path: &Path) -> Self {
        let dir = match file_path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let repo = Repository::discover(dir).ok().map(Mutex::new);
        if repo.is_some() {
            debug!(path = %file_path.display(), "data file is under git control");
        }
        Self { repo }
    }

    pub fn is_git_managed(&self) -> bool {
        self.repo.is_some()
    }

    /// Stage `file_path` and commit it with `message`
    pub fn commit(&self, file_path: &Path, message: &str) -> Result<()> {
        let Some(repo) = &self.repo else {
            return Ok(());
        };
        let repo = repo.lock().map_err(|_| anyhow!("git repository lock poisoned"))?;

        let workdir = repo
            .workdir()
            .context("Repository has no working directory")?;
        let absolute = file_path
            .canonicalize()
            .with_context(|| format!("Failed to resolve {}", file_path.display()))?;
        let workdir = workdir.canonicalize().unwrap_or_else(|_| workdir.to_path_buf());
        let relative = absolute
            .strip_prefix(&workdir)
            .context("Data file is not inside the repository work tree")?;

        let mut index = repo.index()?;
        index.add_path(relative)?;
        index.write()?;
        let tree = repo.find_tree(index.write_tree()?)?;

        let parent = match repo.head() {
            Ok(head) => Some(head.peel_to_commit()?),
            Err(_) => None,
        };
        let signature = signature_for(&repo)?;
        let parents: Vec<_> = parent.iter().collect();
        repo.commit(Some("HEAD"), &signature, &signature, message, &tree, &parents)?;
        debug!(%message, "committed data file");
        Ok(())
    }

    /// Fetch `origin` and fast-forward the current branch
    pub fn pull(&self) -> Result<()> {
        let Some(repo) = &self.repo else {
            return Ok(());
        };
        let repo = repo.lock().map_err(|_| anyhow!("git repository lock poisoned"))?;

        let branch = current_branch(&repo)?;
        let mut remote = repo
            .find_remote("origin")
            .context("Failed to find remote 'origin'")?;
        remote
            .fetch(&[branch.as_str()], None, None)
            .context("Failed to fetch from origin")?;

        let fetch_head = repo.find_reference("FETCH_HEAD")?;
        let incoming = repo.reference_to_annotated_commit(&fetch_head)?;
        let (analysis, _) = repo.merge_analysis(&[&incoming])?;

        if analysis.is_up_to_date() {
            return Ok(());
        }
        if !analysis.is_fast_forward() {
            return Err(anyhow!(
                "Local and remote data files have diverged; merge them manually"
            ));
        }

        let refname = format!("refs/heads/{}", branch);
        repo.find_reference(&refname)?
            .set_target(incoming.id(), "reminder-mcp: fast-forward")?;
        repo.set_head(&refname)?;
        repo.checkout_head(Some(git2::build::CheckoutBuilder::default().force()))?;
        info!(%branch, "fast-forwarded data file from origin");
        Ok(())
    }

    /// Push the current branch to `origin`
    pub fn push(&self) -> Result<()> {
        let Some(repo) = &self.repo else {
            return Ok(());
        };
        let repo = repo.lock().map_err(|_| anyhow!("git repository lock poisoned"))?;

        let branch = current_branch(&repo)?;
        let mut remote = repo
            .find_remote("origin")
            .context("Failed to find remote 'origin'")?;
        remote.push(&[format!("refs/heads/{}", branch)], None)?;
        info!(%branch, "pushed data file to origin");
        Ok(())
    }
}

fn current_branch(repo: &Repository) -> Result<String> {
    let head = repo.head().context("Failed to get HEAD")?;
    head.shorthand()
        .map(str::to_string)
        .context("Failed to get branch name")
}

/// Configured user identity, or a fixed server identity
fn signature_for(repo: &Repository) -> Result<Signature<'static>> {
    let config = repo.config()?;
    let name = config
        .get_string("user.name")
        .unwrap_or_else(|_| FALLBACK_NAME.to_string());
    let email = config
        .get_string("user.email")
        .unwrap_or_else(|_| FALLBACK_EMAIL.to_string());

    Signature::now(&name, &email)
        .or_else(|_| Signature::new(&name, &email, &Time::new(1_700_000_000, 0)))
        .context("Failed to create commit signature")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn setup_test_repo() -> (TempDir, Repository) {
        let temp_dir = TempDir::new().unwrap();
        let repo = Repository::init(temp_dir.path()).unwrap();
        let mut config = repo.config().unwrap();
        config.set_str("user.name", "Test User").unwrap();
        config.set_str("user.email", "test@example.com").unwrap();
        (temp_dir, repo)
    }

    #[test]
    fn test_non_git_directory() {
        let temp_dir = TempDir::new().unwrap();
        let git_ops = GitOps::new(&temp_dir.path().join("reminders.toml"));
        assert!(!git_ops.is_git_managed());
        assert!(git_ops.commit(&temp_dir.path().join("reminders.toml"), "noop").is_ok());
        assert!(git_ops.pull().is_ok());
        assert!(git_ops.push().is_ok());
    }

    #[test]
    fn test_commit_creates_initial_and_follow_up_commits() {
        let (temp_dir, repo) = setup_test_repo();
        let file_path = temp_dir.path().join("reminders.toml");

        fs::write(&file_path, "task_counter = 0\n").unwrap();
        let git_ops = GitOps::new(&file_path);
        assert!(git_ops.is_git_managed());
        git_ops.commit(&file_path, "Initial reminders").unwrap();

        fs::write(&file_path, "task_counter = 1\n").unwrap();
        git_ops.commit(&file_path, "Add task #1").unwrap();

        let head = repo.head().unwrap().peel_to_commit().unwrap();
        assert_eq!(head.message().unwrap(), "Add task #1");
        assert_eq!(head.parent_count(), 1);
        assert_eq!(head.author().name().unwrap(), "Test User");
    }
}
