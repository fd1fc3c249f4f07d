//! One generation run over a list of requests.
use std::{panic::Location, path::PathBuf};

use crate::{
    chunked::ChunkedText,
    diagnostic::Diagnostic,
    naming::NameRegistry,
    request::EmbedRequest,
    strategy::{self, Encoded, Strategy},
    validate,
};

/// Run-wide settings.
#[derive(Debug, Clone, Copy, Default)]
pub struct Settings {
    /// Maximum embed size for requests without their own override. `None`
    /// means [`DEFAULT_MAX_SIZE`](crate::DEFAULT_MAX_SIZE).
    pub max_size: Option<u64>,
}

/// A generated output unit.
#[derive(Debug, Clone)]
pub struct Unit {
    /// Unique name within the run; the unit is written to `<name>.rs`.
    pub name: String,
    /// The file the bytes were read from.
    pub source: PathBuf,
    pub strategy: Strategy,
    pub text: ChunkedText,
}

impl Unit {
    #[must_use]
    pub fn file_name(&self) -> String {
        format!("{}.rs", self.name)
    }
}

/// What became of one request.
#[derive(Debug)]
pub struct Outcome {
    pub location: &'static Location<'static>,
    pub result: Result<Unit, Diagnostic>,
}

/// Encodes every request and names the resulting units.
///
/// Requests are checked structurally as a list, then encoded independently of
/// each other, then named in one pass in list order. The returned outcomes are
/// in the same order as `requests`.
#[must_use]
pub fn generate(requests: &[EmbedRequest], settings: &Settings) -> Vec<Outcome> {
    let encoded: Vec<Result<Encoded, Diagnostic>> = requests
        .iter()
        .zip(validate::check_all(requests))
        .map(|(request, checked)| {
            let result = checked.and_then(|()| strategy::encode(request, settings.max_size));
            if let Err(diagnostic) = &result {
                let stage = if diagnostic.is_structural() {
                    "declaration"
                } else {
                    "source"
                };
                log::debug!(
                    "{}: {stage} rejected: {diagnostic}",
                    request.path().display()
                );
            }
            result
        })
        .collect();

    let mut names = NameRegistry::new();
    requests
        .iter()
        .zip(encoded)
        .map(|(request, result)| Outcome {
            location: request.location(),
            result: result.map(|encoded| Unit {
                name: names.assign(request.path()),
                source: request.path().to_path_buf(),
                strategy: encoded.strategy,
                text: encoded.text,
            }),
        })
        .collect()
}
