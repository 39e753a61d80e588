// Bakes the dashboard settings into the wasm binary (read back with option_env!).
// Only API_URL, APP_ENV and LOG_LEVEL are forwarded; the shell beats .env.

use std::collections::HashMap;
use std::env;
use std::fs;

const FORWARDED: [&str; 3] = ["API_URL", "APP_ENV", "LOG_LEVEL"];
const DOTENV: &str = ".env";

fn dotenv_values(contents: &str) -> HashMap<&str, &str> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.starts_with('#'))
        .filter_map(|line| line.strip_prefix("export ").unwrap_or(line).split_once('='))
        .map(|(key, value)| (key.trim(), value.trim().trim_matches(|c| c == '"' || c == '\'')))
        .filter(|(key, _)| FORWARDED.contains(key))
        .collect()
}

fn main() {
    println!("cargo:rerun-if-changed=build.rs");
    println!("cargo:rerun-if-changed={}", DOTENV);

    let contents = fs::read_to_string(DOTENV).unwrap_or_default();
    let from_file = dotenv_values(&contents);

    for key in FORWARDED {
        println!("cargo:rerun-if-env-changed={}", key);
        if env::var_os(key).is_some() {
            continue;
        }
        match from_file.get(key) {
            Some(value) if !value.is_empty() => println!("cargo:rustc-env={}={}", key, value),
            _ if key == "API_URL" => {
                println!("cargo:warning=API_URL not set, using the built-in default")
            }
            _ => {}
        }
    }
}
