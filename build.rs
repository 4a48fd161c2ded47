use std::env;
use std::fs;
use std::path::Path;

fn main() {
    // Load variables from .env when present
    let env_file = Path::new(".env");

    if env_file.exists() {
        println!("cargo:rerun-if-changed=.env");

        if let Ok(contents) = fs::read_to_string(env_file) {
            for line in contents.lines() {
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }

                // KEY=VALUE
                if let Some((key, value)) = line.split_once('=') {
                    let key = key.trim();
                    let value = value.trim().trim_matches('"');

                    // Real environment wins over the file
                    if env::var(key).is_err() {
                        println!("cargo:rustc-env={}={}", key, value);
                    }
                }
            }
        }
    } else {
        println!("cargo:warning=No .env file found, using built-in API defaults. Copy .env.example to .env to point at another backend.");
    }

    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed=.env.example");
    for key in [
        "API_BASE_URL_DEVELOPMENT",
        "API_BASE_URL_PRODUCTION",
        "ENVIRONMENT",
        "NETWORK_TIMEOUT_SECONDS",
        "ENABLE_LOGGING",
    ] {
        println!("cargo:rerun-if-env-changed={}", key);
    }
}
