use std::{fmt, io, path::PathBuf};

use thiserror::Error;

/// Which half of the keypair an error refers to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyHalf {
    Private,
    Public,
}

impl fmt::Display for KeyHalf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeyHalf::Private => f.write_str("private"),
            KeyHalf::Public => f.write_str("public"),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IoOp {
    Write,
    Read,
    Remove,
}

impl fmt::Display for IoOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IoOp::Write => f.write_str("write"),
            IoOp::Read => f.write_str("read"),
            IoOp::Remove => f.write_str("remove"),
        }
    }
}

/// Pipeline stage an error was raised in. Ordered by execution.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Stage {
    Configure,
    Generate,
    Encode,
    Store,
    Verify,
    Cleanup,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Stage::Configure => "configure",
            Stage::Generate => "generate",
            Stage::Encode => "encode",
            Stage::Store => "store",
            Stage::Verify => "verify",
            Stage::Cleanup => "cleanup",
        };
        f.write_str(name)
    }
}

#[derive(Error, Debug)]
pub enum KeyGenError {
    #[error("configure: {0}")]
    InvalidConfig(String),

    #[error("generate: secure random source unavailable")]
    RandomSourceUnavailable(#[source] rand::Error),

    #[error("generate: no valid P-384 scalar after {attempts} attempts")]
    CurveParameter { attempts: usize },

    #[error("encode: unable to encode {half} key: {reason}")]
    Encoding { half: KeyHalf, reason: String },

    #[error("{op} {half} key file {}: {source}", .path.display())]
    Io {
        op: IoOp,
        half: KeyHalf,
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("read {half} key file {}: file not found", .path.display())]
    FileNotFound { half: KeyHalf, path: PathBuf },

    #[error("decode: malformed armor in {half} key: {reason}")]
    MalformedArmor { half: KeyHalf, reason: String },

    #[error("decode: malformed {half} key structure: {reason}")]
    MalformedStructure { half: KeyHalf, reason: String },

    #[error("decode: expected a P-384 public key, found {found}")]
    WrongKeyType { found: String },

    #[error("verify: stored {half} key does not match the generated one")]
    Mismatch { half: KeyHalf },

    #[error("cleanup failed after `{cause}`: {cleanup}; key files may be left in an inconsistent state")]
    CleanupFailed {
        cause: Box<KeyGenError>,
        #[source]
        cleanup: Box<KeyGenError>,
    },
}

impl KeyGenError {
    pub fn stage(&self) -> Stage {
        match self {
            KeyGenError::InvalidConfig(_) => Stage::Configure,
            KeyGenError::RandomSourceUnavailable(_) | KeyGenError::CurveParameter { .. } => {
                Stage::Generate
            }
            KeyGenError::Encoding { .. } => Stage::Encode,
            KeyGenError::Io { op: IoOp::Write, .. } => Stage::Store,
            KeyGenError::Io { op: IoOp::Remove, .. } | KeyGenError::CleanupFailed { .. } => {
                Stage::Cleanup
            }
            KeyGenError::Io { op: IoOp::Read, .. }
            | KeyGenError::FileNotFound { .. }
            | KeyGenError::MalformedArmor { .. }
            | KeyGenError::MalformedStructure { .. }
            | KeyGenError::WrongKeyType { .. }
            | KeyGenError::Mismatch { .. } => Stage::Verify,
        }
    }
}

pub type Result<T> = std::result::Result<T, KeyGenError>;
