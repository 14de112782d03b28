use std::path::Path;

use glob::Pattern;

use crate::config::IgnoreConfig;
use crate::error::{Error, Result};

/// decides which working-tree entries a snapshot skips
pub trait Exclude {
    fn is_excluded(&self, path: &Path) -> bool;
}

impl<F> Exclude for F
where
    F: Fn(&Path) -> bool,
{
    fn is_excluded(&self, path: &Path) -> bool {
        self(path)
    }
}

/// fixed entry names plus glob patterns, both matched against the final path component
#[derive(Clone, Debug, Default)]
pub struct IgnoreRules {
    names: Vec<String>,
    patterns: Vec<Pattern>,
}

impl IgnoreRules {
    /// rules that exclude nothing
    pub fn none() -> Self {
        Self::default()
    }

    /// compile the `[ignore]` section of the repository config
    pub fn from_config(config: &IgnoreConfig) -> Result<Self> {
        let patterns = config
            .patterns
            .iter()
            .map(|p| {
                Pattern::new(p).map_err(|e| Error::InvalidPattern {
                    pattern: p.clone(),
                    message: e.to_string(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            names: config.names.clone(),
            patterns,
        })
    }
}

impl Exclude for IgnoreRules {
    fn is_excluded(&self, path: &Path) -> bool {
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            return false;
        };
        self.names.iter().any(|n| n == name) || self.patterns.iter().any(|p| p.matches(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_rules() {
        let rules = IgnoreRules::from_config(&IgnoreConfig::default()).unwrap();

        assert!(rules.is_excluded(Path::new("/work/.twig")));
        assert!(rules.is_excluded(Path::new("/work/sub/.git")));
        assert!(!rules.is_excluded(Path::new("/work/src")));
        // names match whole components only
        assert!(!rules.is_excluded(Path::new("/work/.twigrc")));
    }

    #[test]
    fn test_glob_patterns() {
        let config = IgnoreConfig {
            names: vec![],
            patterns: vec!["*.swp".to_string(), "build-*".to_string()],
        };
        let rules = IgnoreRules::from_config(&config).unwrap();

        assert!(rules.is_excluded(Path::new("dir/file.swp")));
        assert!(rules.is_excluded(Path::new("build-debug")));
        assert!(!rules.is_excluded(Path::new("file.rs")));
    }

    #[test]
    fn test_invalid_pattern() {
        let config = IgnoreConfig {
            names: vec![],
            patterns: vec!["[unclosed".to_string()],
        };
        assert!(matches!(
            IgnoreRules::from_config(&config),
            Err(Error::InvalidPattern { .. })
        ));
    }

    #[test]
    fn test_none_excludes_nothing() {
        assert!(!IgnoreRules::none().is_excluded(Path::new(".git")));
    }

    #[test]
    fn test_closure_predicate() {
        let only_tmp = |p: &Path| p.extension().is_some_and(|e| e == "tmp");
        assert!(only_tmp.is_excluded(Path::new("a.tmp")));
        assert!(!only_tmp.is_excluded(Path::new("a.txt")));
    }
}
