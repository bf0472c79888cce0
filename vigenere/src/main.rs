use std::error::Error;
use std::process;
use std::time::Instant;

use clap::{ArgGroup, Parser, ValueEnum};
use classical_ciphers::vigenere::{self, Keyword};
use classical_ciphers::{utils, Cipher, VigenereCipher};
use log::debug;

/// Command-line arguments for the Vigenère cipher program.
#[derive(Parser, Debug)]
#[command(version, about = "Vigenère cipher with Kasiski/IC analysis and known-plaintext key recovery")]
#[command(group(ArgGroup::new("input").required(true).args(["text", "file"])))]
struct Cli {
    /// Message given directly on the command line
    #[arg(short, long, help = "Message text")]
    text: Option<String>,

    /// Path to the input file containing text to encrypt/decrypt
    #[arg(short, long, help = "Path to the input file")]
    file: Option<String>,

    /// Keyword for the Vigenère cipher
    #[arg(short, long, help = "Keyword for the cipher (not needed to analyze)")]
    key: Option<String>,

    /// Path to the output file where result will be saved
    #[arg(short, long, help = "Path to the output file")]
    output: Option<String>,

    /// Mode of operation
    #[arg(short, long, value_enum, default_value_t = OperationMode::Attack)]
    mode: OperationMode,
}

/// Enum representing the mode of operation for the cipher.
#[derive(Clone, Copy, Debug, ValueEnum)]
enum OperationMode {
    /// Encrypt mode
    Encrypt,
    /// Decrypt mode
    Decrypt,
    /// Encrypt, then recover the keyword from the plaintext/ciphertext pair
    Attack,
    /// Print the statistics used to estimate the keyword length
    Analyze,
}

/// Main entry point for the Vigenère cipher program.
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

    // Write result to output file, or print it
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
    let content = match (&cli.text, &cli.file) {
        (Some(text), _) => text.clone(),
        (None, Some(path)) => std::fs::read_to_string(path)?,
        (None, None) => return Err("either --text or --file is required".into()),
    };

    let message = utils::normalize(&content);
    debug!("Normalized message has {} letters", message.len());

    match cli.mode {
        OperationMode::Encrypt => {
            let cipher = keyed_cipher(cli)?;
            println!("Encrypting with key: {}", cipher.keyword());
            Ok(cipher.encrypt(&message)?)
        }
        OperationMode::Decrypt => {
            let cipher = keyed_cipher(cli)?;
            println!("Decrypting with key: {}", cipher.keyword());
            Ok(cipher.decrypt(&message)?)
        }
        OperationMode::Attack => attack(&keyed_cipher(cli)?, &message),
        OperationMode::Analyze => Ok(analyze(&content)),
    }
}

fn keyed_cipher(cli: &Cli) -> Result<VigenereCipher, Box<dyn Error>> {
    let keyword = cli.key.as_deref().ok_or("a keyword is required for this mode")?;
    Ok(VigenereCipher::new(Keyword::new(&utils::normalize(keyword))?))
}

/// Simulates a known-plaintext attack and reports how long the key recovery took.
fn attack(cipher: &VigenereCipher, message: &str) -> Result<String, Box<dyn Error>> {
    let ciphertext = cipher.encrypt(message)?;

    let start = Instant::now();
    let recovered = vigenere::recover_key(&ciphertext, message)?;
    let elapsed = start.elapsed();

    let mut report = format!(
        "Ciphertext: {ciphertext}\nTime to brute force the keyword:\n{} seconds\n",
        elapsed.as_secs_f64()
    );
    match recovered {
        Some(key) => {
            let status = if key.is_complete() { "complete" } else { "partial, unverified" };
            report.push_str(&format!("Found Keyword ({status}, length {}):\n", key.key_length()));
            report.push_str(&format!("{}\nRepeating unit: {}", key.key(), key.period()));
        }
        None => report.push_str("Unable to find keyword"),
    }
    Ok(report)
}

/// Reports IC, the estimated key length and the Kasiski candidates of a ciphertext.
fn analyze(content: &str) -> String {
    let letters = utils::letters_only(content);
    let ic = vigenere::index_of_coincidence(&letters);

    let estimate = match vigenere::estimated_key_length(letters.len(), ic) {
        Some(length) => length.to_string(),
        None => "none".to_string(),
    };
    let kasiski = match vigenere::kasiski_examination(&letters) {
        Some(lengths) => format!("{:?}", lengths.into_iter().collect::<Vec<_>>()),
        None => "none".to_string(),
    };

    format!(
        "Letters: {}\nIndex of coincidence: {:.4}\nEstimated key length: {}\nKasiski candidates: {}",
        letters.len(),
        ic,
        estimate,
        kasiski
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_analyze_report() {
        let report = analyze("ABCD xyz uvw abcd");
        assert!(report.contains("Letters: 14"));
        assert!(report.contains("Kasiski candidates: [10]"));
    }

    #[test]
    fn test_attack_report() {
        let cipher = VigenereCipher::new(Keyword::new("lemon").unwrap());
        let report = attack(&cipher, "attackatdawn").unwrap();
        assert!(report.starts_with("Ciphertext: lxfopvefrnhr\n"));
        assert!(report.ends_with("Unable to find keyword"));
    }
}
