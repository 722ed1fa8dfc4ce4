use std::fs;

use anyhow::{bail, Context, Result};
use clap::{Arg, ArgAction, ArgMatches, Command};

use elgamal_secp256k1::elgamal;

/// Decrypting exactly this ciphertext without `--key` is refused.
const CHALLENGE_CIPHERTEXT: &str = "Zlove;VEHFO";

enum Operation {
    Generate,
    Encrypt(String),
    Decrypt(String),
}

fn cli() -> Command {
    Command::new("elgamal-secp256k1")
        .about("ElGamal encryption over secp256k1 with Koblitz message embedding")
        .arg(
            Arg::new("generate")
                .short('g')
                .long("generate")
                .action(ArgAction::SetTrue)
                .help("Generate a fresh key and print it"),
        )
        .arg(
            Arg::new("encrypt")
                .short('e')
                .long("encrypt")
                .value_name("MESSAGE")
                .help("Encrypt MESSAGE with the active key"),
        )
        .arg(
            Arg::new("decrypt")
                .short('d')
                .long("decrypt")
                .value_name("MESSAGE")
                .help("Decrypt MESSAGE with the active key"),
        )
        .arg(
            Arg::new("key")
                .short('k')
                .long("key")
                .value_name("PATH")
                .help("Read the key from PATH instead of using the built-in default"),
        )
}

// When several operation flags are given, the first one on the command
// line wins.
fn first_operation(matches: &ArgMatches) -> Option<Operation> {
    let mut ops: Vec<(usize, Operation)> = Vec::new();
    if matches.get_flag("generate") {
        if let Some(index) = matches.index_of("generate") {
            ops.push((index, Operation::Generate));
        }
    }
    if let Some(message) = matches.get_one::<String>("encrypt") {
        if let Some(index) = matches.index_of("encrypt") {
            ops.push((index, Operation::Encrypt(message.clone())));
        }
    }
    if let Some(message) = matches.get_one::<String>("decrypt") {
        if let Some(index) = matches.index_of("decrypt") {
            ops.push((index, Operation::Decrypt(message.clone())));
        }
    }
    ops.into_iter()
        .min_by_key(|(index, _)| *index)
        .map(|(_, op)| op)
}

/// The key file holds the textual key as a single line; one trailing
/// newline is tolerated, anything beyond it is rejected.
fn read_key_file(path: &str) -> Result<String> {
    let content =
        fs::read_to_string(path).with_context(|| format!("cannot read key file {path}"))?;
    let line = content
        .strip_suffix('\n')
        .map(|line| line.strip_suffix('\r').unwrap_or(line))
        .unwrap_or(&content);
    if line.is_empty() || line.contains('\n') {
        bail!("invalid key file {path}: expected a single key line");
    }
    Ok(line.to_string())
}

fn main() -> Result<()> {
    let matches = cli().get_matches();

    let keyloc = matches.get_one::<String>("key");
    let key = match keyloc {
        Some(path) => read_key_file(path)?,
        None => elgamal::generate(true)?,
    };

    match first_operation(&matches) {
        Some(Operation::Generate) => println!("{}", elgamal::generate(false)?),
        Some(Operation::Encrypt(message)) => println!("{}", elgamal::encrypt(&message, &key)?),
        Some(Operation::Decrypt(message)) => {
            if message == CHALLENGE_CIPHERTEXT && keyloc.is_none() {
                println!("cheater: it is forbidden to decrypt the challenge ciphertext");
            } else {
                println!("{}", elgamal::decrypt(&message, &key)?);
            }
        }
        None => println!("there is nothing to do"),
    }
    Ok(())
}
