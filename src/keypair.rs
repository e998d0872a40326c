use std::fmt;

use elliptic_curve::{sec1::ToEncodedPoint, subtle::ConstantTimeEq};

use crate::error::KeyHalf;

/// Dotted OID of the NIST P-384 named curve (secp384r1).
pub const P384_CURVE_OID: &str = "1.3.132.0.34";

/// A P-384 keypair.
///
/// Built either from a secret scalar (the public point is always derived
/// from it) or by decoding stored key files, where each half comes from
/// its own file and is checked against the generated pair afterwards.
#[derive(Clone)]
pub struct KeyPair {
    secret: p384::SecretKey,
    public: p384::PublicKey,
}

impl KeyPair {
    pub fn from_secret(secret: p384::SecretKey) -> Self {
        let public = secret.public_key();
        Self { secret, public }
    }

    pub(crate) fn from_parts(secret: p384::SecretKey, public: p384::PublicKey) -> Self {
        Self { secret, public }
    }

    pub fn secret_key(&self) -> &p384::SecretKey {
        &self.secret
    }

    pub fn public_key(&self) -> &p384::PublicKey {
        &self.public
    }

    pub fn curve_oid(&self) -> &'static str {
        P384_CURVE_OID
    }

    /// Field-by-field comparison: curve, secret scalar, then the affine
    /// coordinates of the public point. Reports the first half that differs.
    pub fn compare(&self, other: &KeyPair) -> Result<(), KeyHalf> {
        if self.curve_oid() != other.curve_oid() {
            return Err(KeyHalf::Private);
        }

        let lhs = self.secret.to_be_bytes();
        let rhs = other.secret.to_be_bytes();
        if !bool::from(lhs.as_slice().ct_eq(rhs.as_slice())) {
            return Err(KeyHalf::Private);
        }

        let lhs = self.public.to_encoded_point(false);
        let rhs = other.public.to_encoded_point(false);
        if lhs.x() != rhs.x() || lhs.y() != rhs.y() {
            return Err(KeyHalf::Public);
        }

        Ok(())
    }
}

impl PartialEq for KeyPair {
    fn eq(&self, other: &Self) -> bool {
        self.compare(other).is_ok()
    }
}

impl Eq for KeyPair {}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let point = self.public.to_encoded_point(true);
        f.debug_struct("KeyPair")
            .field("curve", &P384_CURVE_OID)
            .field("public", &point)
            .finish_non_exhaustive()
    }
}
