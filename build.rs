//! Build script for the bands-to-see service.
//!
//! Copies `.env.example` from the crate root into the local data directory
//! (`bandstosee/.env.example`), next to where `config::load_env` looks for
//! the real `.env`. A missing template only produces a cargo warning.
//!
//! Destination:
//! - Linux: `~/.local/share/bandstosee/.env.example`
//! - macOS: `~/Library/Application Support/bandstosee/.env.example`
//! - Windows: `%LOCALAPPDATA%/bandstosee/.env.example`

use std::{env, fs, path::PathBuf};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("cargo:rerun-if-changed=.env.example");

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);
    let env_example_path = manifest_dir.join(".env.example");

    let mut out_dir = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    out_dir.push("bandstosee");

    if !env_example_path.is_file() {
        println!(
            "cargo:warning=.env.example not found at {}",
            env_example_path.display()
        );
        return Ok(());
    }

    // Read-only or sandboxed build environments cannot write there.
    if let Err(e) = fs::create_dir_all(&out_dir)
        .and_then(|_| fs::copy(&env_example_path, out_dir.join(".env.example")))
    {
        println!(
            "cargo:warning=could not copy .env.example to {}: {}",
            out_dir.display(),
            e
        );
    }

    Ok(())
}
