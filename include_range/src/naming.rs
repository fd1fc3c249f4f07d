//! Output unit names.
use std::{collections::HashSet, path::Path};

/// Hands out unique unit names for one generation run.
///
/// The first unit built from `data.bin` is called `data`. Later ones get a
/// suffix from a single counter shared by every base name: `data_0`,
/// `other_1`, `data_2`, ... Names depend only on the order in which
/// [`assign`](Self::assign) is called.
#[derive(Debug, Default)]
pub struct NameRegistry {
    taken: HashSet<String>,
    counter: usize,
}

impl NameRegistry {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a name for a unit built from `path` that no earlier call has
    /// returned.
    pub fn assign(&mut self, path: &Path) -> String {
        let base = base_name(path);
        if self.taken.insert(base.clone()) {
            return base;
        }
        loop {
            let candidate = format!("{base}_{}", self.counter);
            self.counter += 1;
            if self.taken.insert(candidate.clone()) {
                return candidate;
            }
        }
    }
}

/// The file name without its last extension, made acceptable to
/// `include_range!`: no leading dots and no path separators.
fn base_name(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|stem| stem.to_string_lossy().replace(['/', '\\'], "_"))
        .unwrap_or_default();
    match stem.trim_start_matches('.') {
        "" => "embed".to_owned(),
        name => name.to_owned(),
    }
}
