//! Build script for radiosync.
//!
//! Copies the configuration templates (`.env.example` and
//! `credentials.example.json`) into the user's local data directory so they
//! sit next to where the application looks for the real files:
//! - Linux: `~/.local/share/radiosync/`
//! - macOS: `~/Library/Application Support/radiosync/`
//! - Windows: `%LOCALAPPDATA%/radiosync/`
//!
//! A missing template only produces a cargo warning. Failing to create the
//! directory or write a file fails the build.

use std::{env, fs, path::PathBuf};

const TEMPLATES: [&str; 2] = [".env.example", "credentials.example.json"];

fn main() -> Result<(), Box<dyn std::error::Error>> {
    for template in TEMPLATES {
        println!("cargo:rerun-if-changed={}", template);
    }

    let manifest_dir = PathBuf::from(env::var("CARGO_MANIFEST_DIR")?);

    let mut out_dir = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    out_dir.push("radiosync");
    fs::create_dir_all(&out_dir)?;

    for template in TEMPLATES {
        let source = manifest_dir.join(template);
        if source.is_file() {
            let contents = fs::read_to_string(&source)?;
            fs::write(out_dir.join(template), contents)?;
        } else {
            println!("cargo:warning={} not found at {}", template, source.display());
        }
    }

    Ok(())
}
