//! Private key file loading
//!
//! The key file holds one hex private key per line. Lines are trimmed and
//! blank lines ignored. A line that does not parse is skipped with a warning
//! naming its line number; the key itself never reaches the log.

use super::SecureWallet;
use crate::{Error, Result};
use secrecy::SecretString;
use std::path::Path;

/// Read the non-empty, trimmed lines of a key file
pub fn read_keys(path: &Path) -> Result<Vec<(usize, SecretString)>> {
    let content = std::fs::read_to_string(path).map_err(|source| Error::KeyFile {
        path: path.to_path_buf(),
        source,
    })?;

    Ok(content
        .lines()
        .enumerate()
        .map(|(idx, line)| (idx + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
        .map(|(line_no, line)| (line_no, SecretString::from(line.to_string())))
        .collect())
}

/// Load every usable wallet from a key file, in file order
pub fn load_wallets(path: &Path) -> Result<Vec<SecureWallet>> {
    let mut wallets = Vec::new();

    for (line_no, key) in read_keys(path)? {
        match SecureWallet::from_secret(&key) {
            Ok(wallet) => wallets.push(wallet),
            Err(e) => {
                tracing::warn!(line = line_no, error = %e, "Skipping unparseable private key");
            }
        }
    }

    if wallets.is_empty() {
        return Err(Error::Wallet(format!(
            "No usable private keys in {}",
            path.display()
        )));
    }

    tracing::info!(
        count = wallets.len(),
        file = %path.display(),
        "Loaded wallets"
    );
    Ok(wallets)
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;
    use std::io::Write;

    const KEY_A: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
    const KEY_B: &str = "59c6995e998f97a5a0044966f0945389dc9e86dae88c7a8412f4603b6b78690d";

    fn key_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_trims_and_skips_blank_lines() {
        let file = key_file(&format!("  {}  \n\n\t\n{}\n", KEY_A, KEY_B));

        let keys = read_keys(file.path()).unwrap();
        assert_eq!(keys.len(), 2);
        assert_eq!(keys[0].0, 1);
        assert_eq!(keys[0].1.expose_secret(), KEY_A);
        assert_eq!(keys[1].0, 4);
        assert_eq!(keys[1].1.expose_secret(), KEY_B);
    }

    #[test]
    fn test_load_wallets_keeps_file_order() {
        let file = key_file(&format!("{}\n{}\n", KEY_B, KEY_A));

        let wallets = load_wallets(file.path()).unwrap();
        let expected_first = SecureWallet::from_hex(KEY_B).unwrap().address();
        let expected_second = SecureWallet::from_hex(KEY_A).unwrap().address();
        assert_eq!(wallets[0].address(), expected_first);
        assert_eq!(wallets[1].address(), expected_second);
    }

    #[test]
    fn test_skips_bad_lines() {
        let file = key_file(&format!("not-a-key\n{}\n", KEY_A));

        let wallets = load_wallets(file.path()).unwrap();
        assert_eq!(wallets.len(), 1);
    }

    #[test]
    fn test_missing_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_wallets(&dir.path().join("private_keys.txt")).unwrap_err();
        assert!(matches!(err, Error::KeyFile { .. }));
    }

    #[test]
    fn test_empty_file_is_error() {
        let file = key_file("\n   \n");
        let err = load_wallets(file.path()).unwrap_err();
        assert!(matches!(err, Error::Wallet(_)));
    }
}
