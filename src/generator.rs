use elliptic_curve::zeroize::Zeroizing;
use rand::{rngs::OsRng, CryptoRng, RngCore};

use crate::{
    error::{KeyGenError, Result},
    keypair::KeyPair,
};

/// Size of a P-384 scalar in bytes.
pub const SCALAR_SIZE: usize = 48;

/// Zero and values >= the group order are redrawn, at most this many times.
pub const MAX_ATTEMPTS: usize = 16;

/// Generates a fresh keypair from the operating system's CSPRNG.
pub fn generate() -> Result<KeyPair> {
    generate_with(&mut OsRng)
}

pub fn generate_with<R: RngCore + CryptoRng>(rng: &mut R) -> Result<KeyPair> {
    let mut buf = Zeroizing::new([0u8; SCALAR_SIZE]);

    for attempt in 1..=MAX_ATTEMPTS {
        rng.try_fill_bytes(buf.as_mut_slice())
            .map_err(KeyGenError::RandomSourceUnavailable)?;

        match p384::SecretKey::from_be_bytes(buf.as_slice()) {
            Ok(secret) => {
                log::debug!("Generated P-384 secret scalar on attempt {}", attempt);
                return Ok(KeyPair::from_secret(secret));
            }
            Err(_) => log::debug!("Rejected out-of-range scalar on attempt {}", attempt),
        }
    }

    Err(KeyGenError::CurveParameter { attempts: MAX_ATTEMPTS })
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Broken;

    impl RngCore for Broken {
        fn next_u32(&mut self) -> u32 {
            unimplemented!()
        }

        fn next_u64(&mut self) -> u64 {
            unimplemented!()
        }

        fn fill_bytes(&mut self, _: &mut [u8]) {
            unimplemented!()
        }

        fn try_fill_bytes(&mut self, _: &mut [u8]) -> std::result::Result<(), rand::Error> {
            Err(rand::Error::new(std::io::Error::new(std::io::ErrorKind::Other, "no entropy")))
        }
    }

    impl CryptoRng for Broken {}

    /// Fills every buffer with the same byte.
    struct Constant(u8);

    impl RngCore for Constant {
        fn next_u32(&mut self) -> u32 {
            u32::from_ne_bytes([self.0; 4])
        }

        fn next_u64(&mut self) -> u64 {
            u64::from_ne_bytes([self.0; 8])
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            dest.fill(self.0);
        }

        fn try_fill_bytes(&mut self, dest: &mut [u8]) -> std::result::Result<(), rand::Error> {
            self.fill_bytes(dest);
            Ok(())
        }
    }

    impl CryptoRng for Constant {}

    #[test]
    fn successive_keys_differ() {
        let a = generate().unwrap();
        let b = generate().unwrap();
        assert_ne!(a, b);
        assert_ne!(a.public_key(), b.public_key());
    }

    #[test]
    fn random_source_failure() {
        let err = generate_with(&mut Broken).unwrap_err();
        assert!(matches!(err, KeyGenError::RandomSourceUnavailable(_)));
    }

    #[test]
    fn zero_and_overflowing_scalars_are_rejected() {
        let err = generate_with(&mut Constant(0x00)).unwrap_err();
        assert!(matches!(err, KeyGenError::CurveParameter { attempts: MAX_ATTEMPTS }));

        let err = generate_with(&mut Constant(0xff)).unwrap_err();
        assert!(matches!(err, KeyGenError::CurveParameter { .. }));
    }

    #[test]
    fn deterministic_source_gives_deterministic_key() {
        let a = generate_with(&mut Constant(0x11)).unwrap();
        let b = generate_with(&mut Constant(0x11)).unwrap();
        assert_eq!(a, b);
    }
}
