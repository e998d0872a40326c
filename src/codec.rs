//! PEM encoding of keypairs.
//!
//! The private half is a SEC1 `ECPrivateKey` (RFC 5915) armored as
//! `EC PRIVATE KEY`; the public half is a `SubjectPublicKeyInfo`
//! (RFC 5480) armored as `PUBLIC KEY`. Both are what `openssl ec` and
//! `openssl pkey -pubin` read and write.

use elliptic_curve::{
    pkcs8::{DecodePublicKey, EncodePublicKey, LineEnding, ObjectIdentifier, SubjectPublicKeyInfo},
    zeroize::Zeroizing,
};

use crate::{
    error::{KeyGenError, KeyHalf, Result},
    keypair::KeyPair,
};

pub const PRIVATE_KEY_LABEL: &str = "EC PRIVATE KEY";
pub const PUBLIC_KEY_LABEL: &str = "PUBLIC KEY";
/// PKCS#1 public key armor, only ever produced for RSA.
pub const RSA_PUBLIC_KEY_LABEL: &str = "RSA PUBLIC KEY";

const ID_EC_PUBLIC_KEY: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.2.840.10045.2.1");
const SECP384R1: ObjectIdentifier = ObjectIdentifier::new_unwrap("1.3.132.0.34");

/// Both halves of a keypair in their armored form.
pub struct EncodedKeys {
    pub private: Zeroizing<String>,
    pub public: String,
}

/// Result of the algorithm-agnostic public key decode.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AnyPublicKey {
    P384(p384::PublicKey),
    /// Some other algorithm, named by its OID, or by armor label when
    /// there is no SPKI to read one from. `curve` is set for EC keys.
    Foreign {
        algorithm: String,
        curve: Option<ObjectIdentifier>,
    },
}

impl AnyPublicKey {
    pub fn algorithm(&self) -> String {
        match self {
            AnyPublicKey::P384(_) => format!("EC {}", SECP384R1),
            AnyPublicKey::Foreign { algorithm, curve: Some(curve) } => format!("{} (curve {})", algorithm, curve),
            AnyPublicKey::Foreign { algorithm, curve: None } => algorithm.clone(),
        }
    }
}

pub fn encode(keys: &KeyPair) -> Result<EncodedKeys> {
    let private = keys
        .secret_key()
        .to_pem(LineEnding::LF)
        .map_err(|e| KeyGenError::Encoding { half: KeyHalf::Private, reason: e.to_string() })?;

    let public = keys
        .public_key()
        .to_public_key_pem(LineEnding::LF)
        .map_err(|e| KeyGenError::Encoding { half: KeyHalf::Public, reason: e.to_string() })?;

    log::debug!("Encoded keypair, private = {} bytes, public = {} bytes", private.len(), public.len());
    Ok(EncodedKeys { private, public })
}

pub fn decode(private: &[u8], public: &[u8]) -> Result<KeyPair> {
    let secret = decode_private(private)?;
    let public = match decode_public_any(public)? {
        AnyPublicKey::P384(key) => key,
        other => return Err(KeyGenError::WrongKeyType { found: other.algorithm() }),
    };
    Ok(KeyPair::from_parts(secret, public))
}

pub fn decode_private(pem: &[u8]) -> Result<p384::SecretKey> {
    let (label, der) = unarmor(KeyHalf::Private, pem)?;
    if label != PRIVATE_KEY_LABEL {
        return Err(KeyGenError::MalformedArmor {
            half: KeyHalf::Private,
            reason: format!("expected label {:?}, found {:?}", PRIVATE_KEY_LABEL, label),
        });
    }

    let der = Zeroizing::new(der);
    p384::SecretKey::from_sec1_der(&der)
        .map_err(|e| KeyGenError::MalformedStructure { half: KeyHalf::Private, reason: e.to_string() })
}

/// Decodes a public key PEM without committing to an algorithm.
pub fn decode_public_any(pem: &[u8]) -> Result<AnyPublicKey> {
    let (label, der) = unarmor(KeyHalf::Public, pem)?;
    match label.as_str() {
        PUBLIC_KEY_LABEL => classify_spki(&der),
        RSA_PUBLIC_KEY_LABEL => Ok(AnyPublicKey::Foreign { algorithm: label, curve: None }),
        _ => Err(KeyGenError::MalformedArmor {
            half: KeyHalf::Public,
            reason: format!("expected label {:?}, found {:?}", PUBLIC_KEY_LABEL, label),
        }),
    }
}

fn classify_spki(der: &[u8]) -> Result<AnyPublicKey> {
    let malformed = |e: &dyn std::fmt::Display| KeyGenError::MalformedStructure {
        half: KeyHalf::Public,
        reason: e.to_string(),
    };

    let spki = SubjectPublicKeyInfo::try_from(der).map_err(|e| malformed(&e))?;
    let algorithm = spki.algorithm.oid;
    if algorithm != ID_EC_PUBLIC_KEY {
        return Ok(AnyPublicKey::Foreign { algorithm: algorithm.to_string(), curve: None });
    }

    let curve = spki.algorithm.parameters_oid().map_err(|e| malformed(&e))?;
    if curve != SECP384R1 {
        return Ok(AnyPublicKey::Foreign { algorithm: "EC".into(), curve: Some(curve) });
    }

    p384::PublicKey::from_public_key_der(der)
        .map(AnyPublicKey::P384)
        .map_err(|e| malformed(&e))
}

fn unarmor(half: KeyHalf, pem: &[u8]) -> Result<(String, Vec<u8>)> {
    let (label, der) = pem_rfc7468::decode_vec(pem)
        .map_err(|e| KeyGenError::MalformedArmor { half, reason: e.to_string() })?;
    Ok((label.to_owned(), der))
}
