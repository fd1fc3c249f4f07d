//! Build-script helpers for `include_range`.
use std::{
    env,
    ffi::OsString,
    fs,
    io::BufWriter,
    panic::Location,
    path::{Path, PathBuf},
};

use crate::{
    diagnostic::Diagnostic,
    generate::{Settings, generate},
    request::EmbedRequest,
    strategy::Strategy,
};

/// Directory below `OUT_DIR` that holds the generated units.
///
/// Must match the directory the `include_range!` macro looks in.
pub const UNIT_DIR: &str = "include_range";

/// Environment variable overriding the maximum embed size for a build.
pub const MAX_SIZE_VAR: &str = "INCLUDE_RANGE_MAX_SIZE";

//
// ==================== PUBLIC BUILDER API ====================
//

/// A builder for the embed generation run.
///
/// This provides a clean, high-level API for use in `build.rs` scripts.
///
/// # Example
/// ```ignore
/// // in build.rs
/// use include_range::{Config, EmbedRequest};
///
/// Config::new()
///     .root("assets")
///     .embed(EmbedRequest::new("font.ttf").length(12).member("HEADER").modifiers("pub"))
///     .build()
///     .expect("Failed to generate embeds");
/// ```
#[derive(Debug, Default)]
pub struct Config {
    root: Option<PathBuf>,
    max_size: Option<u64>,
    requests: Vec<EmbedRequest>,
}

impl Config {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Directory relative request paths are resolved against.
    ///
    /// A relative root is itself relative to the crate root
    /// (`CARGO_MANIFEST_DIR`), which is also the default.
    #[must_use]
    pub fn root(mut self, root: impl AsRef<Path>) -> Self {
        self.root = Some(root.as_ref().to_path_buf());
        self
    }

    /// Sets the maximum embed size for requests without their own override.
    ///
    /// The `INCLUDE_RANGE_MAX_SIZE` environment variable takes precedence. If
    /// neither is set, 1 MiB is used.
    #[must_use]
    pub const fn max_size(mut self, max_size: u64) -> Self {
        self.max_size = Some(max_size);
        self
    }

    /// Adds a request to the run.
    #[must_use]
    pub fn embed(mut self, request: EmbedRequest) -> Self {
        self.requests.push(request);
        self
    }

    /// Runs the generation with the specified configuration.
    ///
    /// Each successful request is written to
    /// `$OUT_DIR/include_range/<name>.rs`, ready for
    /// [`include_range!`](`crate::include_range`). A failed request is reported
    /// as a `cargo:warning` and in the returned [`Report`]; it does not fail the
    /// build, but the unit it would have produced does not exist.
    ///
    /// # Errors
    /// Returns an [`Error`] if the build environment is incomplete or invalid,
    /// or if writing the generated units fails.
    pub fn build(self) -> Result<Report> {
        let env = BuildEnv {
            manifest_dir: var_path("CARGO_MANIFEST_DIR")?,
            out_dir: var_path("OUT_DIR")?,
            max_size: env::var_os(MAX_SIZE_VAR),
        };
        println!("cargo:rerun-if-env-changed={MAX_SIZE_VAR}");
        self.run(&env)
    }

    fn run(self, env: &BuildEnv) -> Result<Report> {
        let max_size = match &env.max_size {
            Some(value) => Some(parse_max_size(value)?),
            None => self.max_size,
        };
        let root = self
            .root
            .map_or_else(|| env.manifest_dir.clone(), |root| env.manifest_dir.join(root));

        let requests: Vec<EmbedRequest> = self
            .requests
            .into_iter()
            .map(|request| request.resolved_against(&root))
            .collect();
        for request in &requests {
            println!("cargo:rerun-if-changed={}", request.path().display());
        }

        // Units from an earlier run must not outlive a request that now fails.
        let unit_dir = env.out_dir.join(UNIT_DIR);
        if unit_dir.exists() {
            fs::remove_dir_all(&unit_dir)?;
        }
        fs::create_dir_all(&unit_dir)?;

        let mut report = Report::default();
        for outcome in generate(&requests, &Settings { max_size }) {
            match outcome.result {
                Ok(unit) => {
                    let path = unit_dir.join(unit.file_name());
                    unit.text.write_to(BufWriter::new(fs::File::create(&path)?))?;
                    report.units.push(GeneratedUnit {
                        name: unit.name,
                        path,
                        source: unit.source,
                        strategy: unit.strategy,
                    });
                }
                Err(diagnostic) => {
                    println!("cargo:warning={}", diagnostic.at(outcome.location));
                    report.diagnostics.push(Failure {
                        location: outcome.location,
                        diagnostic,
                    });
                }
            }
        }
        Ok(report)
    }
}

/// Build-script inputs provided by Cargo.
#[derive(Debug)]
struct BuildEnv {
    manifest_dir: PathBuf,
    out_dir: PathBuf,
    max_size: Option<OsString>,
}

fn var_path(name: &'static str) -> Result<PathBuf> {
    env::var_os(name).map(PathBuf::from).ok_or(Error::Var(name))
}

fn parse_max_size(value: &OsString) -> Result<u64> {
    value
        .to_str()
        .and_then(|text| text.trim().parse().ok())
        .ok_or_else(|| Error::InvalidMaxSize(value.to_string_lossy().into_owned()))
}

/// Summary of a generation run.
#[derive(Debug, Default)]
pub struct Report {
    pub units: Vec<GeneratedUnit>,
    pub diagnostics: Vec<Failure>,
}

/// A unit written to disk.
#[derive(Debug, Clone)]
pub struct GeneratedUnit {
    /// The name to pass to `include_range!`.
    pub name: String,
    pub path: PathBuf,
    pub source: PathBuf,
    pub strategy: Strategy,
}

/// A request that produced no unit.
#[derive(Debug, Clone)]
pub struct Failure {
    pub location: &'static Location<'static>,
    pub diagnostic: Diagnostic,
}

/// A specialized `Result` type for build script operations.
pub type Result<T> = std::result::Result<T, Error>;

/// An error that stops the whole generation run.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error")]
    Io(#[from] std::io::Error),
    #[error("Environment variable '{0}' not set by Cargo")]
    Var(&'static str),
    #[error("Invalid value '{0}' for {MAX_SIZE_VAR}: expected a byte count")]
    InvalidMaxSize(String),
}
