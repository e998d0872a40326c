use std::{fmt, path::PathBuf};

use crate::{
    codec,
    config::Config,
    error::{KeyGenError, Result},
    generator,
    keypair::KeyPair,
    store::KeyStore,
    verify,
};

/// Successful states of a run, in order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum State {
    Start,
    Generated,
    Encoded,
    Stored,
    Verified,
}

/// Result of a successful run.
#[derive(Debug)]
pub struct Outcome {
    pub keys: KeyPair,
    pub private_key_path: PathBuf,
    pub public_key_path: PathBuf,
    pub state: State,
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:?}, {:?} were written and verified",
            self.private_key_path.display().to_string(),
            self.public_key_path.display().to_string()
        )
    }
}

/// Generate, encode, store and verify a keypair.
///
/// Failures before anything is written return immediately. From the
/// store step on, any failure removes both key files before returning;
/// if that removal fails too the result is [`KeyGenError::CleanupFailed`].
pub fn run(config: &Config) -> Result<Outcome> {
    config.validate()?;
    let mut state = State::Start;

    let keys = generator::generate()?;
    advance(&mut state, State::Generated);

    let encoded = codec::encode(&keys)?;
    advance(&mut state, State::Encoded);

    let store = KeyStore::new(config);
    for path in store.existing() {
        log::warn!("{} exists and will be overwritten", path.display());
    }

    with_cleanup(&store, || {
        store.write(&encoded)?;
        advance(&mut state, State::Stored);
        verify::verify(&keys, &store)?;
        advance(&mut state, State::Verified);
        Ok(())
    })?;

    Ok(Outcome {
        keys,
        private_key_path: config.private_key_path.clone(),
        public_key_path: config.public_key_path.clone(),
        state,
    })
}

/// Runs `f`; if it fails, removes the key files before returning the error.
pub fn with_cleanup<T, F>(store: &KeyStore, f: F) -> Result<T>
where
    F: FnOnce() -> Result<T>,
{
    let cause = match f() {
        Ok(v) => return Ok(v),
        Err(e) => e,
    };

    log::warn!("{}, cleaning up", cause);
    match store.remove() {
        Ok(()) => Err(cause),
        Err(cleanup) => Err(KeyGenError::CleanupFailed {
            cause: Box::new(cause),
            cleanup: Box::new(cleanup),
        }),
    }
}

fn advance(state: &mut State, next: State) {
    debug_assert!(next > *state);
    log::debug!("{:?} -> {:?}", state, next);
    *state = next;
}
