use crate::{
    codec,
    error::{KeyGenError, Result},
    keypair::KeyPair,
    store::KeyStore,
};

/// Reads the stored files back and checks they decode to `original`.
pub fn verify(original: &KeyPair, store: &KeyStore) -> Result<()> {
    let (private, public) = store.read()?;
    let decoded = codec::decode(&private, &public)?;

    original
        .compare(&decoded)
        .map_err(|half| KeyGenError::Mismatch { half })?;

    log::debug!("Stored keypair matches the generated one");
    Ok(())
}
