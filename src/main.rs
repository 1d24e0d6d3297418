//! ecpair CLI
//!
//! Usage:
//!   ecpair generate -n 3                      # Three mainnet keypairs
//!   ecpair generate -N testnet --uncompressed # Testnet, uncompressed point
//!   ecpair inspect <WIF> -N testnet -N bitcoin
//!   ecpair sign <WIF> <DIGEST_HEX>
//!   ecpair verify <PUBKEY_HEX> <DIGEST_HEX> <SIG_HEX>

use std::process;

use anyhow::Context;
use clap::Parser;
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use ecpair::config::{self, Command};
use ecpair::{Config, Keypair, KeypairOptions, NetworkSelector};

fn main() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ecpair=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = Config::parse();
    debug!("ecpair v{}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = config.validate() {
        eprintln!("Configuration error: {}", e);
        process::exit(1);
    }

    if let Err(e) = run(config.command) {
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }
}

fn run(command: Command) -> anyhow::Result<()> {
    match command {
        Command::Generate {
            network,
            uncompressed,
            count,
        } => {
            let options = KeypairOptions::default()
                .compressed(!uncompressed)
                .network(config::resolve_network(&network)?);

            for index in 1..=count {
                let keypair = Keypair::make_random(options.clone())?;
                println!("=== Keypair #{} ===", index);
                print_keypair(&keypair)?;
                println!();
            }
        }
        Command::Inspect { wif, networks } => {
            let keypair = import_wif(&wif, &networks)?;
            print_keypair(&keypair)?;
        }
        Command::PublicKey {
            private_key,
            network,
            uncompressed,
        } => {
            let private_key = config::decode_hex("private key", &private_key)?;
            let options = KeypairOptions::default()
                .compressed(!uncompressed)
                .network(config::resolve_network(&network)?);
            let keypair = Keypair::from_private_key(&private_key, options)?;
            print_keypair(&keypair)?;
        }
        Command::Sign {
            wif,
            digest,
            networks,
        } => {
            let keypair = import_wif(&wif, &networks)?;
            let signature = keypair.sign(&config::parse_digest(&digest)?)?;
            println!("{}", hex::encode(signature));
        }
        Command::Verify {
            public_key,
            digest,
            signature,
        } => {
            let public_key = config::decode_hex("public key", &public_key)?;
            let keypair = Keypair::from_public_key(&public_key, KeypairOptions::default())
                .context("Could not load public key")?;
            let digest = config::parse_digest(&digest)?;
            let signature = config::decode_hex("signature", &signature)?;

            if keypair.verify(&digest, &signature)? {
                println!("Signature valid");
            } else {
                println!("Signature INVALID");
                process::exit(2);
            }
        }
    }

    Ok(())
}

fn import_wif(wif: &str, networks: &[String]) -> anyhow::Result<Keypair> {
    let candidates = config::resolve_networks(networks)?;
    let selector = match candidates.as_slice() {
        [] => NetworkSelector::Default,
        [single] => NetworkSelector::Single(single),
        many => NetworkSelector::Candidates(many),
    };
    Keypair::from_wif(wif, selector).context("Could not import WIF")
}

fn print_keypair(keypair: &Keypair) -> anyhow::Result<()> {
    println!("Network:     {}", keypair.network());
    println!("Compressed:  {}", keypair.compressed());
    println!("Public Key:  {}", keypair.public_key_hex());
    if let Some(private_key) = keypair.private_key_hex() {
        println!("Private Key: {}", private_key);
        println!("WIF:         {}", keypair.to_wif()?);
    }
    Ok(())
}
