use std::{env, fs, path::PathBuf};

use serde::Deserialize;

/// The part of Cargo.toml this script reads
#[derive(Deserialize)]
struct Manifest {
    package: PackageSection,
}

#[derive(Deserialize)]
struct PackageSection {
    metadata: Option<MetadataSection>,
}

#[derive(Deserialize)]
struct MetadataSection {
    mytasks: Option<Release>,
}

#[derive(Deserialize)]
struct Release {
    codename: String,
}

fn main() {
    let manifest_path = PathBuf::from(env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR not set"))
        .join("Cargo.toml");
    println!("cargo:rerun-if-changed={}", manifest_path.display());

    let text = fs::read_to_string(&manifest_path).expect("cannot read Cargo.toml");
    let manifest: Manifest = toml::from_str(&text).expect("cannot parse Cargo.toml");

    let codename = manifest
        .package
        .metadata
        .and_then(|m| m.mytasks)
        .map(|r| r.codename)
        .unwrap_or_else(|| "unnamed".to_string());

    println!("cargo:rustc-env=CODENAME={codename}");
}
