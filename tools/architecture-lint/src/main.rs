//! CLI entry point for the console's architecture lint.
//!
//! Pass a backend directory to lint it; otherwise the `backend/` crate under
//! the enclosing workspace root is linted.

use std::env;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

fn main() -> ExitCode {
    let Some(backend_dir) = backend_dir() else {
        let _ = writeln!(
            io::stderr().lock(),
            "unable to locate the workspace root (no Cargo.toml declaring [workspace])"
        );
        return ExitCode::FAILURE;
    };
    match architecture_lint::lint_backend_sources(&backend_dir) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            let _ = writeln!(io::stderr().lock(), "{err}");
            ExitCode::FAILURE
        }
    }
}

fn backend_dir() -> Option<PathBuf> {
    if let Some(explicit) = env::args_os().nth(1) {
        return Some(PathBuf::from(explicit));
    }
    [
        env::var_os("CARGO_WORKSPACE_DIR").map(PathBuf::from),
        env::current_dir().ok(),
        Some(PathBuf::from(env!("CARGO_MANIFEST_DIR"))),
    ]
    .into_iter()
    .flatten()
    .find_map(|start| find_workspace_root(&start))
    .map(|root| root.join("backend"))
}

fn find_workspace_root(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .find(|dir| declares_workspace(&dir.join("Cargo.toml")))
        .map(Path::to_path_buf)
}

fn declares_workspace(manifest: &Path) -> bool {
    fs::read_to_string(manifest).is_ok_and(|contents| contents.contains("[workspace]"))
}
