pub mod codec;
pub mod config;
pub mod error;
pub mod generator;
pub mod keypair;
pub mod pipeline;
pub mod store;
pub mod verify;

pub use codec::{AnyPublicKey, EncodedKeys};
pub use config::Config;
pub use error::{KeyGenError, KeyHalf, Result, Stage};
pub use keypair::KeyPair;
pub use pipeline::{run, Outcome, State};
pub use store::KeyStore;
