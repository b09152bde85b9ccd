//! Bakes build-time settings into `$OUT_DIR/env.rs`.
//!
//! Values come from the process environment, then a `.env` file, then the
//! defaults below. `Config` parses them at startup.

use std::{env, fs, path::Path};

const SETTINGS: &[(&str, &str)] = &[
    ("QUIRE_RECENT_POSTS", "3"),
    ("QUIRE_UNDO_DEPTH", "100"),
    ("QUIRE_APP_TITLE", "WYSIWYG Blog Editor"),
];

fn main() {
    // A missing .env is fine.
    let _ = dotenvy::dotenv();
    println!("cargo:rerun-if-changed=.env");

    let mut out = String::new();
    for (key, default) in SETTINGS {
        println!("cargo:rerun-if-env-changed={key}");
        let value = env::var(key).unwrap_or_else(|_| (*default).to_string());
        out.push_str(&format!("pub const {key}: &str = {value:?};\n"));
    }

    let out_dir = env::var("OUT_DIR").expect("cargo sets OUT_DIR for build scripts");
    fs::write(Path::new(&out_dir).join("env.rs"), out).expect("failed to write env.rs");
}
