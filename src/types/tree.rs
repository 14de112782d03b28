use std::fmt;

use crate::error::{Error, Result};
use crate::hash::{ObjectKind, Oid, OID_LEN};

/// file mode recorded for a tree entry
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mode {
    Directory,
    Regular,
    Executable,
    Symlink,
}

impl Mode {
    /// text form used in the tree payload
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Directory => "40000",
            Mode::Regular => "100644",
            Mode::Executable => "100755",
            Mode::Symlink => "120000",
        }
    }

    /// parse the text form used in the tree payload
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "40000" => Some(Mode::Directory),
            "100644" => Some(Mode::Regular),
            "100755" => Some(Mode::Executable),
            "120000" => Some(Mode::Symlink),
            _ => None,
        }
    }

    /// object kind an entry with this mode points at
    pub fn object_kind(&self) -> ObjectKind {
        match self {
            Mode::Directory => ObjectKind::Tree,
            _ => ObjectKind::Blob,
        }
    }

    /// unix permission bits to apply when materializing a regular file
    pub fn permissions(&self) -> Option<u32> {
        match self {
            Mode::Regular => Some(0o644),
            Mode::Executable => Some(0o755),
            _ => None,
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// a single entry in a tree
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TreeEntry {
    pub name: String,
    pub oid: Oid,
    pub mode: Mode,
    pub kind: ObjectKind,
}

impl TreeEntry {
    /// create an entry; the object kind follows from the mode
    pub fn new(name: impl Into<String>, oid: Oid, mode: Mode) -> Self {
        Self {
            name: name.into(),
            oid,
            mode,
            kind: mode.object_kind(),
        }
    }

    pub fn is_directory(&self) -> bool {
        self.mode == Mode::Directory
    }
}

/// a directory snapshot - entries sorted by name
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Tree {
    entries: Vec<TreeEntry>,
}

impl Tree {
    /// create a new tree, validating and sorting entries
    pub fn new(mut entries: Vec<TreeEntry>) -> Result<Self> {
        for entry in &entries {
            validate_entry_name(&entry.name)?;
        }

        // sort by name (byte-wise); the encoded bytes depend on this order
        entries.sort_by(|a, b| a.name.as_bytes().cmp(b.name.as_bytes()));

        for window in entries.windows(2) {
            if window[0].name == window[1].name {
                return Err(Error::DuplicateEntryName(window[0].name.clone()));
            }
        }

        Ok(Self { entries })
    }

    /// create an empty tree
    pub fn empty() -> Self {
        Self { entries: vec![] }
    }

    /// decode a full tree payload
    ///
    /// entries must be strictly increasing by name bytes, as `Tree::new` writes them.
    pub fn decode(payload: &[u8]) -> Result<Self> {
        let entries = decode_tree(payload).collect::<Result<Vec<_>>>()?;

        for window in entries.windows(2) {
            if window[0].name.as_bytes() >= window[1].name.as_bytes() {
                return Err(Error::CorruptObject(format!(
                    "tree entries out of order or duplicated at {:?}",
                    window[1].name
                )));
            }
        }

        Ok(Self { entries })
    }

    /// serialize to the tree payload format
    pub fn encode(&self) -> Vec<u8> {
        encode_tree(&self.entries)
    }

    pub fn entries(&self) -> &[TreeEntry] {
        &self.entries
    }

    pub fn into_entries(self) -> Vec<TreeEntry> {
        self.entries
    }

    /// look up entry by name
    pub fn get(&self, name: &str) -> Option<&TreeEntry> {
        self.entries
            .binary_search_by(|e| e.name.as_bytes().cmp(name.as_bytes()))
            .ok()
            .map(|i| &self.entries[i])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// validate an entry name
fn validate_entry_name(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(Error::InvalidEntryName("empty name".to_string()));
    }
    if name.contains('/') {
        return Err(Error::InvalidEntryName(format!(
            "name contains '/': {}",
            name
        )));
    }
    if name.contains('\0') {
        return Err(Error::InvalidEntryName(format!(
            "name contains null byte: {}",
            name
        )));
    }
    if name == "." || name == ".." {
        return Err(Error::InvalidEntryName(format!("reserved name: {}", name)));
    }
    Ok(())
}

/// serialize entries as `mode SP name NUL <20 raw digest bytes>` each
///
/// entries must already be sorted by name; they are written in the given order.
pub fn encode_tree(entries: &[TreeEntry]) -> Vec<u8> {
    let mut out = Vec::new();
    for entry in entries {
        out.extend_from_slice(entry.mode.as_str().as_bytes());
        out.push(b' ');
        out.extend_from_slice(entry.name.as_bytes());
        out.push(0);
        out.extend_from_slice(entry.oid.as_bytes());
    }
    out
}

/// iterate the entries of a tree payload in stored order
pub fn decode_tree(payload: &[u8]) -> TreeIter<'_> {
    TreeIter { buf: payload }
}

/// lazy decoder over a tree payload
///
/// stops after the first error.
pub struct TreeIter<'a> {
    buf: &'a [u8],
}

impl TreeIter<'_> {
    fn next_entry(&mut self) -> Result<TreeEntry> {
        let nul = self
            .buf
            .iter()
            .position(|&b| b == 0)
            .ok_or_else(|| Error::CorruptObject("tree entry missing NUL".to_string()))?;
        let (head, rest) = self.buf.split_at(nul);
        let rest = &rest[1..];

        let head = std::str::from_utf8(head)
            .map_err(|_| Error::CorruptObject("tree entry is not utf-8".to_string()))?;
        let (mode_text, name) = head
            .split_once(' ')
            .ok_or_else(|| Error::CorruptObject(format!("tree entry without mode: {}", head)))?;
        let mode = Mode::parse(mode_text)
            .ok_or_else(|| Error::CorruptObject(format!("unknown tree mode: {}", mode_text)))?;
        // a stored name must never escape its directory on checkout
        validate_entry_name(name)
            .map_err(|_| Error::CorruptObject(format!("bad tree entry name: {:?}", name)))?;

        if rest.len() < OID_LEN {
            return Err(Error::CorruptObject(format!(
                "truncated digest for tree entry {}",
                name
            )));
        }
        let (digest, rest) = rest.split_at(OID_LEN);
        let oid = Oid::from_slice(digest)?;

        self.buf = rest;
        Ok(TreeEntry::new(name, oid, mode))
    }
}

impl Iterator for TreeIter<'_> {
    type Item = Result<TreeEntry>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.buf.is_empty() {
            return None;
        }
        let entry = self.next_entry();
        if entry.is_err() {
            self.buf = &[];
        }
        Some(entry)
    }
}
