//! # CLI - INI Profile Shell
//!
//! A REPL-style command-line interface over one profile file. Reads commands
//! from stdin, runs them against the open [`Profile`], and prints results to
//! stdout. Works interactively or scripted (pipe commands via stdin). Logs go
//! to stderr.
//!
//! ## Commands
//!
//! ```text
//! GET s k            Value of k in the first section named s ("(nil)" if absent)
//! GETN n s k         Value of k in the n-th (0-based) section named s
//! SET s k v...       Insert or update k in s
//! SETN n s k v...    Insert or update k in the n-th section named s
//! RM s               Remove every section named s
//! RMN n s            Remove only the n-th section named s
//! COUNT s            Number of sections named s
//! SECTIONS           List section headers in file order
//! DUMP               Print the document as it would be written
//! FLUSH              Write pending changes to disk
//! EXIT / QUIT        Flush and shut down
//! ```
//!
//! ## Configuration
//!
//! See the `config` crate: `INI_PROFILE_PATH`, `INI_CREATE`,
//! `INI_GET_CAPACITY`, `INI_LOG`.
//!
//! ## Example
//!
//! ```text
//! $ INI_PROFILE_PATH=boot.ini cargo run -p cli
//! profile ready (path=boot.ini, encoding=Wide, sections=0)
//! > SET Boot timeout 5
//! OK
//! > GET boot TIMEOUT
//! 5
//! > EXIT
//! bye
//! ```

mod commands;

use anyhow::{Context, Result};
use commands::{execute, parse, Flow, HELP};
use config::ShellConfig;
use profile::Profile;
use std::io::{self, BufRead, Write};
use tracing::info;
use tracing_subscriber::EnvFilter;

fn init_tracing(filter: &str) {
    let env_filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .with_writer(io::stderr)
        .try_init();
}

/// Opens the configured profile, creating it first when allowed.
fn open_profile(cfg: &ShellConfig) -> Result<Profile> {
    let path = &cfg.profile_path;
    let exists = path
        .try_exists()
        .with_context(|| format!("checking {}", path.display()))?;

    if !exists && cfg.create_if_missing {
        info!(path = %path.display(), "creating new profile");
        return Profile::create(path).with_context(|| format!("creating {}", path.display()));
    }
    Profile::open(path).with_context(|| format!("opening {}", path.display()))
}

fn main() -> Result<()> {
    let cfg = ShellConfig::from_env();
    init_tracing(&cfg.log_filter);

    let mut profile = open_profile(&cfg)?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    writeln!(
        out,
        "profile ready (path={}, encoding={:?}, sections={})",
        profile.path().display(),
        profile.encoding(),
        profile.sections().count()
    )?;
    writeln!(out, "{}", HELP)?;
    write!(out, "> ")?;
    out.flush()?;

    let stdin = io::stdin();

    for line in stdin.lock().lines() {
        let line = line?;
        match parse(&line) {
            Ok(Some(cmd)) => {
                if execute(&mut profile, cmd, cfg.get_capacity, &mut out)? == Flow::Exit {
                    break;
                }
            }
            Ok(None) => {}
            Err(e) => writeln!(out, "ERR {:#}", e)?,
        }

        write!(out, "> ")?;
        out.flush()?;
    }

    profile.close().context("flushing profile on exit")?;
    Ok(())
}
