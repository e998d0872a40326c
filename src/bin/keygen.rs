use std::path::PathBuf;

use p384_keygen::{config::parse_mode, Config};
use structopt::StructOpt;

/// Generate a NIST P-384 keypair as PEM files and verify them on disk.
///
/// Running several instances against the same paths at once is not supported.
#[derive(StructOpt)]
struct Args {
    /// Output path for the private key: WILL BE OVERWRITTEN!
    #[structopt(short, long = "private", default_value = "private.pem")]
    private: PathBuf,

    /// Output path for the public key: WILL BE OVERWRITTEN!
    #[structopt(short = "P", long = "public", default_value = "public.pem")]
    public: PathBuf,

    /// Octal permission bits for both files (Unix only)
    #[structopt(short, long, default_value = "600", parse(try_from_str = parse_mode))]
    mode: u32,
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        Config::new(args.private, args.public).with_mode(args.mode)
    }
}

#[paw::main]
fn main(args: Args) -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config = Config::from(args);
    let outcome = p384_keygen::run(&config).map_err(|e| {
        log::error!("Aborted during {} stage", e.stage());
        e
    })?;

    log::info!("Keypair verified, public key {:?}", outcome.keys);
    println!("{}", outcome);
    Ok(())
}
