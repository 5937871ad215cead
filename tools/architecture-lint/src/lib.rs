//! Layer-boundary lint for the console backend.
//!
//! The backend keeps its hexagon at the module level: `domain` with its
//! ports, `inbound` HTTP adapters, `outbound` record-store adapters, and the
//! request `middleware`. Every `use` tree and path expression in those
//! directories is checked against the layer's rule:
//!
//! | layer        | must not reach                                   |
//! |--------------|--------------------------------------------------|
//! | `domain`     | adapters, middleware, settings, web/HTTP crates  |
//! | `inbound`    | `outbound`, the hosted-backend HTTP client       |
//! | `outbound`   | `inbound`, `middleware`, the web framework       |
//! | `middleware` | `outbound`, the hosted-backend HTTP client       |
//!
//! Run it with `cargo run -p architecture-lint` from the workspace root.

use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use syn::visit::Visit;

/// Library name of the linted crate, as seen from its binaries and tests.
const CRATE_NAME: &str = "gensys_console";

const WEB_FRAMEWORK: &[&str] = &[
    "actix",
    "actix_http",
    "actix_service",
    "actix_session",
    "actix_web",
];

/// A single boundary violation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    /// File path relative to `backend/src`.
    pub file: PathBuf,
    /// Rule that was broken.
    pub message: String,
    /// First offending path, joined with `::`.
    pub import: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} (via `{}`)",
            self.file.display(),
            self.message,
            self.import
        )
    }
}

/// Failure modes returned by the lint.
#[derive(Debug)]
pub enum ArchitectureLintError {
    /// Filesystem traversal or reading failed.
    Io(io::Error),
    /// A source file sits outside every linted layer.
    UnknownLayer { file: PathBuf },
    /// Rust source parsing failed.
    Parse { file: PathBuf, message: String },
    /// One or more boundary violations were found.
    Violations(Vec<Violation>),
}

impl fmt::Display for ArchitectureLintError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Io(err) => write!(f, "I/O error while linting architecture: {err}"),
            Self::UnknownLayer { file } => {
                write!(f, "{} does not belong to a linted layer", file.display())
            }
            Self::Parse { file, message } => {
                write!(f, "failed to parse {}: {message}", file.display())
            }
            Self::Violations(violations) => {
                writeln!(f, "{} architecture boundary violation(s):", violations.len())?;
                violations
                    .iter()
                    .try_for_each(|violation| writeln!(f, "- {violation}"))
            }
        }
    }
}

impl std::error::Error for ArchitectureLintError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Io(err) => Some(err),
            _ => None,
        }
    }
}

impl From<io::Error> for ArchitectureLintError {
    fn from(value: io::Error) -> Self {
        Self::Io(value)
    }
}

/// A Rust source file to be linted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LintSource {
    /// Path relative to `backend/src`.
    pub file: PathBuf,
    pub contents: String,
}

/// Lint the backend crate rooted at `backend_dir` (the directory holding
/// its `Cargo.toml`).
pub fn lint_backend_sources(backend_dir: &Path) -> Result<(), ArchitectureLintError> {
    let src_dir = backend_dir.join("src");
    let mut sources = Vec::new();
    for layer in Layer::ALL {
        let dir = src_dir.join(layer.dir());
        if dir.is_dir() {
            gather_sources(&src_dir, &dir, &mut sources)?;
        }
    }
    lint_sources(&sources)
}

/// Lint in-memory sources. All violations are collected before returning.
pub fn lint_sources(sources: &[LintSource]) -> Result<(), ArchitectureLintError> {
    let mut violations = Vec::new();
    for source in sources {
        let layer = Layer::of(&source.file).ok_or_else(|| ArchitectureLintError::UnknownLayer {
            file: source.file.clone(),
        })?;
        let parsed =
            syn::parse_file(&source.contents).map_err(|err| ArchitectureLintError::Parse {
                file: source.file.clone(),
                message: err.to_string(),
            })?;
        violations.extend(layer.check(&source.file, &parsed));
    }
    if violations.is_empty() {
        Ok(())
    } else {
        Err(ArchitectureLintError::Violations(violations))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Layer {
    Domain,
    Inbound,
    Outbound,
    Middleware,
}

impl Layer {
    const ALL: [Self; 4] = [Self::Domain, Self::Inbound, Self::Outbound, Self::Middleware];

    const fn dir(self) -> &'static str {
        match self {
            Self::Domain => "domain",
            Self::Inbound => "inbound",
            Self::Outbound => "outbound",
            Self::Middleware => "middleware",
        }
    }

    fn of(relative_path: &Path) -> Option<Self> {
        let first = relative_path.components().next()?.as_os_str().to_str()?;
        Self::ALL.into_iter().find(|layer| layer.dir() == first)
    }

    const fn forbidden_modules(self) -> &'static [&'static str] {
        match self {
            Self::Domain => &["inbound", "middleware", "outbound", "server", "settings"],
            Self::Inbound | Self::Middleware => &["outbound"],
            Self::Outbound => &["inbound", "middleware"],
        }
    }

    fn forbidden_crates(self) -> Vec<&'static str> {
        match self {
            Self::Domain => {
                let mut crates = WEB_FRAMEWORK.to_vec();
                crates.extend(["ortho_config", "reqwest", "utoipa", "utoipa_swagger_ui"]);
                crates
            }
            Self::Inbound | Self::Middleware => vec!["reqwest"],
            Self::Outbound => {
                let mut crates = WEB_FRAMEWORK.to_vec();
                crates.push("utoipa");
                crates
            }
        }
    }

    fn check(self, file: &Path, parsed: &syn::File) -> Vec<Violation> {
        let mut collector = PathCollector::default();
        collector.visit_file(parsed);

        let modules = self.forbidden_modules();
        let crates = self.forbidden_crates();
        let mut found: BTreeMap<String, String> = BTreeMap::new();
        for path in &collector.paths {
            let message = match classify(path) {
                Some(Target::Module(root)) if modules.iter().any(|m| *m == root) => {
                    format!("{} module must not depend on crate::{root}", self.dir())
                }
                Some(Target::Crate(root)) if crates.iter().any(|c| *c == root) => format!(
                    "{} module must not depend on external crate `{root}`",
                    self.dir()
                ),
                _ => continue,
            };
            found.entry(message).or_insert_with(|| path.join("::"));
        }

        found
            .into_iter()
            .map(|(message, import)| Violation {
                file: file.to_path_buf(),
                message,
                import,
            })
            .collect()
    }
}

/// What the first meaningful segment of a path refers to.
enum Target<'a> {
    Module(&'a str),
    Crate(&'a str),
}

fn classify(segments: &[String]) -> Option<Target<'_>> {
    let first = segments.first()?.as_str();
    if Layer::ALL.iter().any(|layer| layer.dir() == first) {
        return Some(Target::Module(first));
    }
    match first {
        "crate" | "self" | "super" => segments
            .iter()
            .map(String::as_str)
            .find(|segment| !matches!(*segment, "crate" | "self" | "super"))
            .map(Target::Module),
        CRATE_NAME => segments
            .get(1)
            .map(|segment| Target::Module(segment.as_str())),
        other => Some(Target::Crate(other)),
    }
}

#[derive(Default)]
struct PathCollector {
    paths: Vec<Vec<String>>,
}

impl PathCollector {
    fn flatten_use(&mut self, tree: &syn::UseTree, prefix: &mut Vec<String>) {
        match tree {
            syn::UseTree::Path(path) => {
                prefix.push(path.ident.to_string());
                self.flatten_use(&path.tree, prefix);
                prefix.pop();
            }
            syn::UseTree::Name(syn::UseName { ident })
            | syn::UseTree::Rename(syn::UseRename { ident, .. }) => {
                self.push_with(prefix, ident.to_string());
            }
            syn::UseTree::Glob(_) => self.push_with(prefix, "*".to_owned()),
            syn::UseTree::Group(group) => {
                for item in &group.items {
                    self.flatten_use(item, prefix);
                }
            }
        }
    }

    fn push_with(&mut self, prefix: &[String], last: String) {
        let mut segments = prefix.to_vec();
        segments.push(last);
        self.paths.push(segments);
    }
}

impl<'ast> Visit<'ast> for PathCollector {
    fn visit_path(&mut self, node: &'ast syn::Path) {
        let segments: Vec<String> = node
            .segments
            .iter()
            .map(|segment| segment.ident.to_string())
            .collect();
        if !segments.is_empty() {
            self.paths.push(segments);
        }
        syn::visit::visit_path(self, node);
    }

    fn visit_item_use(&mut self, node: &'ast syn::ItemUse) {
        self.flatten_use(&node.tree, &mut Vec::new());
    }
}

fn gather_sources(
    src_root: &Path,
    dir: &Path,
    sources: &mut Vec<LintSource>,
) -> Result<(), ArchitectureLintError> {
    let mut entries = fs::read_dir(dir)?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<Vec<_>, _>>()?;
    entries.sort();
    for path in entries {
        if path.is_dir() {
            gather_sources(src_root, &path, sources)?;
        } else if path.extension().is_some_and(|ext| ext == "rs") {
            let file = path
                .strip_prefix(src_root)
                .map(Path::to_path_buf)
                .map_err(|err| ArchitectureLintError::Parse {
                    file: path.clone(),
                    message: err.to_string(),
                })?;
            let contents = fs::read_to_string(&path)?;
            sources.push(LintSource { file, contents });
        }
    }
    Ok(())
}
