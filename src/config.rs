//! Runtime Configuration
//!
//! Each setting is resolved from a command-line flag, then an environment variable,
//! then a built-in default.

use anyhow::{Context, Result, bail};
use std::net::SocketAddr;
use std::path::PathBuf;

pub const DEFAULT_BIND: &str = "127.0.0.1:5000";
pub const DEFAULT_DATA_DIR: &str = "data";
pub const ENV_BIND: &str = "ROSTER_BIND";
pub const ENV_DATA_DIR: &str = "ROSTER_DATA_DIR";

#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub bind_addr: SocketAddr,
    pub data_dir: PathBuf,
}

/// Result of parsing the command line.
#[derive(Debug, Clone, PartialEq)]
pub enum Invocation {
    Run(Config),
    Help,
}

impl Config {
    /// Reads flags from `std::env::args` and variables from the process environment.
    pub fn from_env() -> Result<Invocation> {
        let args: Vec<String> = std::env::args().skip(1).collect();
        Self::resolve(&args, |key| std::env::var(key).ok())
    }

    pub fn resolve<F>(args: &[String], env: F) -> Result<Invocation>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut bind: Option<String> = None;
        let mut data_dir: Option<String> = None;

        let mut i = 0;
        while i < args.len() {
            match args[i].as_str() {
                "--bind" => {
                    bind = Some(flag_value(args, i)?);
                    i += 2;
                }
                "--data-dir" => {
                    data_dir = Some(flag_value(args, i)?);
                    i += 2;
                }
                "-h" | "--help" => return Ok(Invocation::Help),
                other => bail!("Unknown argument: {}", other),
            }
        }

        let bind = bind
            .or_else(|| env(ENV_BIND))
            .unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind_addr: SocketAddr = bind
            .parse()
            .with_context(|| format!("Invalid bind address: {}", bind))?;

        let data_dir = data_dir
            .or_else(|| env(ENV_DATA_DIR))
            .unwrap_or_else(|| DEFAULT_DATA_DIR.to_string());

        Ok(Invocation::Run(Config {
            bind_addr,
            data_dir: PathBuf::from(data_dir),
        }))
    }
}

fn flag_value(args: &[String], i: usize) -> Result<String> {
    args.get(i + 1)
        .filter(|v| !v.starts_with("--"))
        .cloned()
        .with_context(|| format!("{} requires a value", args[i]))
}

pub fn usage(program: &str) -> String {
    format!(
        "Usage: {program} [--bind <addr:port>] [--data-dir <path>]\n\
         \n\
         Environment: {ENV_BIND} (default {DEFAULT_BIND}), {ENV_DATA_DIR} (default {DEFAULT_DATA_DIR})\n\
         Example: {program} --bind 0.0.0.0:8080 --data-dir /var/lib/roster"
    )
}
