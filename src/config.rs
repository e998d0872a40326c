use std::path::PathBuf;

use crate::error::{KeyGenError, Result};

pub const DEFAULT_PRIVATE_KEY_PATH: &str = "private.pem";
pub const DEFAULT_PUBLIC_KEY_PATH: &str = "public.pem";
pub const DEFAULT_MODE: u32 = 0o600;

/// Where and how the keypair is written. Built once per run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub private_key_path: PathBuf,
    pub public_key_path: PathBuf,
    /// Permission bits for both files, applied on Unix only.
    pub mode: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self::new(DEFAULT_PRIVATE_KEY_PATH, DEFAULT_PUBLIC_KEY_PATH)
    }
}

impl Config {
    pub fn new(private_key_path: impl Into<PathBuf>, public_key_path: impl Into<PathBuf>) -> Self {
        Self {
            private_key_path: private_key_path.into(),
            public_key_path: public_key_path.into(),
            mode: DEFAULT_MODE,
        }
    }

    pub fn with_mode(mut self, mode: u32) -> Self {
        self.mode = mode;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.private_key_path.as_os_str().is_empty() || self.public_key_path.as_os_str().is_empty() {
            return Err(KeyGenError::InvalidConfig("key file paths must not be empty".into()));
        }
        if self.private_key_path == self.public_key_path {
            return Err(KeyGenError::InvalidConfig(format!(
                "private and public key paths are both {}",
                self.private_key_path.display()
            )));
        }
        check_mode(self.mode).map_err(KeyGenError::InvalidConfig)
    }
}

fn check_mode(mode: u32) -> std::result::Result<(), String> {
    if mode > 0o7777 {
        return Err(format!("mode {:o} is out of range", mode));
    }
    if mode & 0o600 != 0o600 {
        return Err(format!("mode {:o} must keep the files owner readable and writable", mode));
    }
    Ok(())
}

/// Parses an octal permission string such as `600` or `0o640`.
pub fn parse_mode(s: &str) -> std::result::Result<u32, String> {
    let digits = s.trim_start_matches("0o");
    let mode = u32::from_str_radix(digits, 8).map_err(|e| format!("invalid octal mode {:?}: {}", s, e))?;
    check_mode(mode)?;
    Ok(mode)
}
