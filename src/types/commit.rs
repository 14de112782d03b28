use crate::error::{Error, Result};
use crate::hash::Oid;

/// a commit object pointing to a tree and an optional parent
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Commit {
    /// root tree oid
    pub tree: Oid,
    /// parent commit (none for a root commit)
    pub parent: Option<Oid>,
    /// commit message
    pub message: String,
}

impl Commit {
    pub fn new(tree: Oid, parent: Option<Oid>, message: impl Into<String>) -> Self {
        Self {
            tree,
            parent,
            message: message.into(),
        }
    }

    /// is this an initial commit (no parent)
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }

    /// serialize as `tree <oid>\n[parent <oid>\n]\n<message>`
    pub fn encode(&self) -> Vec<u8> {
        let mut text = format!("tree {}\n", self.tree);
        if let Some(parent) = &self.parent {
            text.push_str(&format!("parent {}\n", parent));
        }
        text.push('\n');
        text.push_str(&self.message);
        text.into_bytes()
    }

    /// parse a commit payload
    ///
    /// headers end at the first blank line; unknown header keys are ignored.
    pub fn decode(payload: &[u8]) -> Result<Self> {
        let text = std::str::from_utf8(payload)
            .map_err(|_| Error::CorruptObject("commit is not utf-8".to_string()))?;

        let (headers, message) = match text.split_once("\n\n") {
            Some((headers, message)) => (headers, message),
            None => (text.trim_end_matches('\n'), ""),
        };

        let mut tree = None;
        let mut parent = None;
        for line in headers.lines() {
            let Some((key, value)) = line.split_once(' ') else {
                continue;
            };
            match key {
                "tree" => tree = Some(Oid::from_hex(value)?),
                "parent" => parent = Some(Oid::from_hex(value)?),
                _ => {}
            }
        }

        let tree = tree.ok_or_else(|| Error::CorruptObject("commit without tree".to_string()))?;

        Ok(Self {
            tree,
            parent,
            message: message.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn oid(c: char) -> Oid {
        Oid::from_hex(&c.to_string().repeat(40)).unwrap()
    }

    #[test]
    fn test_commit_root_encoding() {
        let c = Commit::new(oid('a'), None, "first");
        let text = String::from_utf8(c.encode()).unwrap();
        assert_eq!(text, format!("tree {}\n\nfirst", "a".repeat(40)));
        assert!(c.is_root());
    }

    #[test]
    fn test_commit_with_parent_encoding() {
        let c = Commit::new(oid('a'), Some(oid('b')), "second");
        let text = String::from_utf8(c.encode()).unwrap();
        assert_eq!(
            text,
            format!("tree {}\nparent {}\n\nsecond", "a".repeat(40), "b".repeat(40))
        );
    }

    #[test]
    fn test_commit_decode() {
        let c = Commit::new(oid('1'), Some(oid('2')), "multi\n\nline message\n");
        let parsed = Commit::decode(&c.encode()).unwrap();
        assert_eq!(parsed, c);
    }

    #[test]
    fn test_commit_decode_ignores_unknown_headers() {
        let payload = format!(
            "tree {}\nauthor someone <x@y>\nparent {}\n\nmsg",
            "1".repeat(40),
            "2".repeat(40)
        );
        let parsed = Commit::decode(payload.as_bytes()).unwrap();
        assert_eq!(parsed.tree, oid('1'));
        assert_eq!(parsed.parent, Some(oid('2')));
        assert_eq!(parsed.message, "msg");
    }

    #[test]
    fn test_commit_decode_no_body() {
        let payload = format!("tree {}\n", "3".repeat(40));
        let parsed = Commit::decode(payload.as_bytes()).unwrap();
        assert_eq!(parsed.tree, oid('3'));
        assert_eq!(parsed.message, "");
    }

    #[test]
    fn test_commit_decode_empty_message() {
        let c = Commit::new(oid('4'), None, "");
        assert_eq!(Commit::decode(&c.encode()).unwrap(), c);
    }

    #[test]
    fn test_commit_decode_missing_tree() {
        let payload = format!("parent {}\n\nmsg", "1".repeat(40));
        assert!(matches!(
            Commit::decode(payload.as_bytes()),
            Err(Error::CorruptObject(_))
        ));
    }

    #[test]
    fn test_commit_decode_bad_oid() {
        assert!(matches!(
            Commit::decode(b"tree nothex\n\nmsg"),
            Err(Error::InvalidOid(_))
        ));
    }
}
