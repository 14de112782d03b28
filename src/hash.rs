use std::fmt;
use std::str::FromStr;

use sha1::{Digest, Sha1};

use crate::Error;

/// length of a raw SHA-1 digest
pub const OID_LEN: usize = 20;

/// length of an oid in hex form
pub const OID_HEX_LEN: usize = OID_LEN * 2;

/// SHA-1 object id used for content addressing
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Oid([u8; OID_LEN]);

impl Oid {
    /// zero oid (useful as sentinel)
    pub const ZERO: Oid = Oid([0u8; OID_LEN]);

    /// create from raw bytes
    pub fn from_bytes(bytes: [u8; OID_LEN]) -> Self {
        Self(bytes)
    }

    /// create from a raw digest slice, which must be exactly 20 bytes
    pub fn from_slice(bytes: &[u8]) -> crate::Result<Self> {
        let arr: [u8; OID_LEN] = bytes
            .try_into()
            .map_err(|_| Error::InvalidOid(hex::encode(bytes)))?;
        Ok(Self(arr))
    }

    /// parse from hex string
    pub fn from_hex(s: &str) -> crate::Result<Self> {
        let bytes = hex::decode(s).map_err(|_| Error::InvalidOid(s.to_string()))?;
        if bytes.len() != OID_LEN {
            return Err(Error::InvalidOid(s.to_string()));
        }
        let mut arr = [0u8; OID_LEN];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }

    /// get raw bytes
    pub fn as_bytes(&self) -> &[u8; OID_LEN] {
        &self.0
    }

    /// convert to hex string
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// abbreviated hex form for display
    pub fn short(&self) -> String {
        self.to_hex()[..10].to_string()
    }

    /// split into path components for object store
    /// returns (first 2 hex chars, remaining 38 hex chars)
    pub fn to_path_components(&self) -> (String, String) {
        let hex = self.to_hex();
        (hex[..2].to_string(), hex[2..].to_string())
    }
}

impl fmt::Display for Oid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl fmt::Debug for Oid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Oid({})", self.short())
    }
}

impl FromStr for Oid {
    type Err = Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        Self::from_hex(s)
    }
}

/// true if `s` is exactly 40 hexadecimal characters
pub fn is_oid_hex(s: &str) -> bool {
    s.len() == OID_HEX_LEN && s.chars().all(|c| c.is_ascii_hexdigit())
}

/// type tag stored in every object header
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Blob,
    Tree,
    Commit,
}

impl ObjectKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectKind::Blob => "blob",
            ObjectKind::Tree => "tree",
            ObjectKind::Commit => "commit",
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ObjectKind {
    type Err = Error;

    fn from_str(s: &str) -> crate::Result<Self> {
        match s {
            "blob" => Ok(ObjectKind::Blob),
            "tree" => Ok(ObjectKind::Tree),
            "commit" => Ok(ObjectKind::Commit),
            other => Err(Error::InvalidObjectType(other.to_string())),
        }
    }
}

/// canonical object header: `"<kind> <len>\0"`
pub fn object_header(kind: ObjectKind, len: usize) -> Vec<u8> {
    format!("{} {}\0", kind, len).into_bytes()
}

/// compute the object id over header and payload
///
/// the same (kind, payload) pair always yields the same oid.
pub fn compute_object_hash(kind: ObjectKind, payload: &[u8]) -> Oid {
    let mut hasher = Sha1::new();
    hasher.update(object_header(kind, payload.len()));
    hasher.update(payload);
    Oid(hasher.finalize().into())
}
