use std::error::Error;
use std::process;
use std::time::Instant;

use clap::{ArgGroup, Parser, ValueEnum};
use classical_ciphers::hill::{self, KeyMatrix};
use classical_ciphers::{utils, Cipher, HillCipher};
use log::debug;

/// Command-line arguments for the Hill cipher program.
#[derive(Parser, Debug)]
#[command(version, about = "Hill cipher with a 2x2 key matrix and a known-plaintext key search")]
#[command(group(ArgGroup::new("input").required(true).args(["text", "file"])))]
struct Cli {
    /// Encryption key matrix
    #[arg(short, long, help = "Encryption key matrix, e.g. \"[[3,3],[2,5]]\"")]
    key: String,

    /// Message given directly on the command line
    #[arg(short, long, help = "Message text")]
    text: Option<String>,

    /// Path to the input file containing the message
    #[arg(short, long, help = "Path to the input file")]
    file: Option<String>,

    /// Path to the output file; stdout if omitted
    #[arg(short, long, help = "Path to the output file")]
    output: Option<String>,

    /// Mode of operation
    #[arg(short, long, value_enum, default_value_t = OperationMode::Attack)]
    mode: OperationMode,

    /// Split the key search across all cores
    #[arg(short, long, help = "Use the parallel key search in attack mode")]
    parallel: bool,
}

/// Enum representing the mode of operation for the cipher.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum OperationMode {
    /// Encrypt the message with the key
    Encrypt,
    /// Decrypt the message with the inverse of the key
    Decrypt,
    /// Encrypt the message, then recover the key from the plaintext/ciphertext pair
    Attack,
}

/// Main entry point for the Hill cipher program.
fn main() {
    env_logger::init();
    let cli: Cli = Cli::parse();

    let result = match run(&cli) {
        Ok(result) => result,
        Err(err) => {
            eprintln!("ERROR: {err}");
            process::exit(2);
        }
    };

    match &cli.output {
        Some(path) => {
            if let Err(err) = std::fs::write(path, &result) {
                eprintln!("ERROR: Failed to write output file: {err}");
                process::exit(2);
            }
            println!("Operation completed successfully! Output saved to: {path}");
        }
        None => println!("{result}"),
    }
}

fn run(cli: &Cli) -> Result<String, Box<dyn Error>> {
    let matrix: KeyMatrix = cli.key.parse()?;
    let cipher = HillCipher::from_matrix(matrix)?;

    let content = match (&cli.text, &cli.file) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) => std::fs::read_to_string(path)?,
        (None, None) => return Err("either --text or --file is required".into()),
    };
    // Removes white space and lowercases, so the message can be encrypted
    let message = utils::normalize(&content);
    debug!("Normalized message has {} letters", message.len());

    match cli.mode {
        OperationMode::Encrypt => Ok(cipher.encrypt(&message)?),
        OperationMode::Decrypt => Ok(cipher.decrypt(&message)?),
        OperationMode::Attack => attack(&cipher, &message, cli.parallel),
    }
}

/// Simulates a known-plaintext attack and reports how long the key search took.
fn attack(cipher: &HillCipher, message: &str, parallel: bool) -> Result<String, Box<dyn Error>> {
    let ciphertext = cipher.encrypt(message)?;
    let plaintext = utils::extend_text(message, hill::BLOCK_SIZE);

    let start = Instant::now();
    let found = if parallel {
        hill::par_brute_force(&ciphertext, &plaintext)?
    } else {
        hill::brute_force(&ciphertext, &plaintext)?
    };
    let elapsed = start.elapsed();

    let mut report = format!(
        "Ciphertext: {ciphertext}\nTime to brute force the decryption key:\n{} seconds\n",
        elapsed.as_secs_f64()
    );
    match found {
        Some(key) => {
            report.push_str(&format!("Found Decryption Key:\n{}\n", key.matrix()));
            report.push_str(&format!("Found Encryption Key:\n{}", key.inverse().matrix()));
        }
        None => report.push_str("Unable to find the decryption key"),
    }
    Ok(report)
}
