use std::fs;
use std::path::{Path, PathBuf};

use crate::config::Config;
use crate::error::{Error, IoResultExt, Result};

/// name of the metadata directory inside a working tree
pub const TWIG_DIR: &str = ".twig";

/// a twig repository: a working tree plus its `.twig` metadata directory
pub struct Repo {
    worktree: PathBuf,
    git_dir: PathBuf,
    config: Config,
}

impl Repo {
    /// initialize a new repository in the given working tree
    pub fn init(worktree: &Path) -> Result<Self> {
        let git_dir = worktree.join(TWIG_DIR);
        let head = git_dir.join("HEAD");
        if head.exists() {
            return Err(Error::RepositoryExists(git_dir));
        }

        // create directory structure
        fs::create_dir_all(git_dir.join("objects")).with_path(&git_dir)?;
        fs::create_dir_all(git_dir.join("refs/heads")).with_path(&git_dir)?;
        fs::create_dir_all(git_dir.join("refs/tags")).with_path(&git_dir)?;
        fs::create_dir_all(git_dir.join("tmp")).with_path(&git_dir)?;

        // HEAD exists but is empty until the first commit
        fs::write(&head, b"").with_path(&head)?;

        let config = Config::default();
        config.save(&git_dir.join("config.toml"))?;

        tracing::debug!(path = %git_dir.display(), "initialized repository");

        Ok(Self {
            worktree: worktree.to_path_buf(),
            git_dir,
            config,
        })
    }

    /// open an existing repository
    pub fn open(worktree: &Path) -> Result<Self> {
        let git_dir = worktree.join(TWIG_DIR);
        if !git_dir.join("HEAD").is_file() {
            return Err(Error::RepositoryNotInitialized(worktree.to_path_buf()));
        }

        let config = Config::load_or_default(&git_dir.join("config.toml"))?;

        Ok(Self {
            worktree: worktree.to_path_buf(),
            git_dir,
            config,
        })
    }

    /// working tree root
    pub fn worktree(&self) -> &Path {
        &self.worktree
    }

    /// metadata directory (`<worktree>/.twig`)
    pub fn git_dir(&self) -> &Path {
        &self.git_dir
    }

    /// repository configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// mutable access to configuration
    pub fn config_mut(&mut self) -> &mut Config {
        &mut self.config
    }

    /// save configuration changes
    pub fn save_config(&self) -> Result<()> {
        self.config.save(&self.config_path())
    }

    /// path to config.toml
    pub fn config_path(&self) -> PathBuf {
        self.git_dir.join("config.toml")
    }

    /// path to HEAD
    pub fn head_path(&self) -> PathBuf {
        self.git_dir.join("HEAD")
    }

    /// path to objects directory
    pub fn objects_path(&self) -> PathBuf {
        self.git_dir.join("objects")
    }

    /// path to refs directory
    pub fn refs_path(&self) -> PathBuf {
        self.git_dir.join("refs")
    }

    /// path to tmp directory (for atomic writes)
    pub fn tmp_path(&self) -> PathBuf {
        self.git_dir.join("tmp")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_repo_init() {
        let dir = tempdir().unwrap();
        let repo = Repo::init(dir.path()).unwrap();

        let git_dir = dir.path().join(TWIG_DIR);
        assert!(git_dir.join("objects").is_dir());
        assert!(git_dir.join("refs/heads").is_dir());
        assert!(git_dir.join("refs/tags").is_dir());
        assert!(git_dir.join("tmp").is_dir());
        assert!(git_dir.join("config.toml").is_file());

        // HEAD present but empty
        assert_eq!(fs::read_to_string(git_dir.join("HEAD")).unwrap(), "");
        assert_eq!(repo.git_dir(), git_dir);
    }

    #[test]
    fn test_repo_init_already_exists() {
        let dir = tempdir().unwrap();

        Repo::init(dir.path()).unwrap();
        let result = Repo::init(dir.path());

        assert!(matches!(result, Err(Error::RepositoryExists(_))));
    }

    #[test]
    fn test_repo_open() {
        let dir = tempdir().unwrap();

        Repo::init(dir.path()).unwrap();
        let repo = Repo::open(dir.path()).unwrap();

        assert_eq!(repo.worktree(), dir.path());
    }

    #[test]
    fn test_repo_open_not_initialized() {
        let dir = tempdir().unwrap();

        let result = Repo::open(dir.path());
        assert!(matches!(result, Err(Error::RepositoryNotInitialized(_))));
    }

    #[test]
    fn test_repo_open_without_config() {
        let dir = tempdir().unwrap();
        Repo::init(dir.path()).unwrap();
        fs::remove_file(dir.path().join(".twig/config.toml")).unwrap();

        let repo = Repo::open(dir.path()).unwrap();
        assert_eq!(repo.config(), &Config::default());
    }

    #[test]
    fn test_repo_paths() {
        let dir = tempdir().unwrap();
        let repo = Repo::init(dir.path()).unwrap();
        let git_dir = dir.path().join(".twig");

        assert_eq!(repo.objects_path(), git_dir.join("objects"));
        assert_eq!(repo.refs_path(), git_dir.join("refs"));
        assert_eq!(repo.head_path(), git_dir.join("HEAD"));
        assert_eq!(repo.tmp_path(), git_dir.join("tmp"));
    }

    #[test]
    fn test_config_modification() {
        let dir = tempdir().unwrap();
        let mut repo = Repo::init(dir.path()).unwrap();

        repo.config_mut().core.compression_level = 7;
        repo.config_mut().ignore.patterns.push("*.log".to_string());
        repo.save_config().unwrap();

        // reopen and verify
        let repo2 = Repo::open(dir.path()).unwrap();
        assert_eq!(repo2.config().core.compression_level, 7);
        assert_eq!(repo2.config().ignore.patterns, vec!["*.log".to_string()]);
    }
}
