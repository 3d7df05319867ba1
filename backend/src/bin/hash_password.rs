//! Print a `users.yml` entry for a username and password.
//!
//! The password is read from the first line of standard input so it never
//! appears in the process arguments or shell history.
#![cfg_attr(not(any(test, doctest)), deny(clippy::unwrap_used))]
#![cfg_attr(not(any(test, doctest)), deny(clippy::expect_used))]

use std::collections::BTreeMap;
use std::io::{self, BufRead, Write};

use clap::Parser;
use cms::domain::hash_password;
use zeroize::Zeroizing;

/// `hash-password` command arguments.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "hash-password",
    about = "Hash a password and print the matching user registry entry",
    version
)]
struct CliArgs {
    /// Username the entry is keyed by.
    username: String,
}

fn main() -> io::Result<()> {
    let args = CliArgs::try_parse().map_err(io::Error::other)?;
    let password = read_password(io::stdin().lock())?;
    let hash = hash_password(&password).map_err(io::Error::other)?;
    let line = registry_entry(&args.username, hash)?;
    io::stdout().write_all(line.as_bytes())
}

/// Read the password from the first line of `reader`, without its line ending.
fn read_password(mut reader: impl BufRead) -> io::Result<Zeroizing<String>> {
    let mut line = Zeroizing::new(String::new());
    reader.read_line(&mut line)?;
    let trimmed = line.trim_end_matches(['\n', '\r']).len();
    line.truncate(trimmed);
    if line.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "expected a password on standard input",
        ));
    }
    Ok(line)
}

/// Render a single `username: hash` mapping as YAML.
fn registry_entry(username: &str, hash: String) -> io::Result<String> {
    let entry = BTreeMap::from([(username.to_owned(), hash)]);
    serde_yaml::to_string(&entry).map_err(io::Error::other)
}
