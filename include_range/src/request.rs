//! Embed requests.
use std::{
    panic::Location,
    path::{Path, PathBuf},
};

use crate::unit::{ItemKind, OutputShape, Scope, ScopeKind};

/// A request to embed a byte range of a file as a constant.
///
/// Created with [`EmbedRequest::new`], which records the caller's source
/// location; every diagnostic for the request is reported against it.
///
/// # Example
/// ```
/// use include_range::{EmbedRequest, ScopeKind};
///
/// let header = EmbedRequest::new("assets/font.ttf")
///     .length(12)
///     .namespace("fonts")
///     .scope("Font", ScopeKind::Impl)
///     .member("HEADER")
///     .modifiers("pub");
/// assert_eq!(header.path().to_str(), Some("assets/font.ttf"));
/// ```
#[derive(Debug, Clone)]
pub struct EmbedRequest {
    pub(crate) path: PathBuf,
    pub(crate) offset: u64,
    pub(crate) length: Option<u64>,
    pub(crate) max_size: Option<u64>,
    pub(crate) utf8_literal: bool,
    pub(crate) shape: OutputShape,
    pub(crate) location: &'static Location<'static>,
}

impl EmbedRequest {
    /// Starts a request for `path`, from offset 0 to the end of the file.
    #[track_caller]
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            offset: 0,
            length: None,
            max_size: None,
            utf8_literal: true,
            shape: OutputShape::default(),
            location: Location::caller(),
        }
    }

    /// First byte to embed.
    #[must_use]
    pub const fn offset(mut self, offset: u64) -> Self {
        self.offset = offset;
        self
    }

    /// Number of bytes to embed. Without it, the range runs to the end of the
    /// file.
    #[must_use]
    pub const fn length(mut self, length: u64) -> Self {
        self.length = Some(length);
        self
    }

    /// Overrides the maximum embed size for this request only.
    #[must_use]
    pub const fn max_size(mut self, max_size: u64) -> Self {
        self.max_size = Some(max_size);
        self
    }

    /// Whether the data may be emitted as a string literal when it is valid
    /// UTF-8. Defaults to `true`; with `false` a numeric list is always used.
    #[must_use]
    pub const fn utf8_literal(mut self, allowed: bool) -> Self {
        self.utf8_literal = allowed;
        self
    }

    /// Module path (`a::b`) the generated member is nested in.
    #[must_use]
    pub fn namespace(mut self, namespace: &str) -> Self {
        self.shape.namespace = Some(namespace.to_owned());
        self
    }

    /// Adds an enclosing scope. Scopes are given innermost first.
    #[must_use]
    pub fn scope(mut self, name: &str, kind: ScopeKind) -> Self {
        self.shape.scopes.push(Scope {
            name: name.to_owned(),
            kind,
        });
        self
    }

    /// Name of the generated constant. Required.
    #[must_use]
    pub fn member(mut self, name: &str) -> Self {
        self.shape.member = Some(name.to_owned());
        self
    }

    /// Visibility of the generated constant, e.g. `pub` or `pub(crate)`.
    #[must_use]
    pub fn modifiers(mut self, modifiers: &str) -> Self {
        self.shape.modifiers = modifiers.to_owned();
        self
    }

    /// Declare the member as a `const` (default) or a `static`.
    #[must_use]
    pub const fn item(mut self, item: ItemKind) -> Self {
        self.shape.item = item;
        self
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Where the request was declared.
    #[must_use]
    pub const fn location(&self) -> &'static Location<'static> {
        self.location
    }

    /// Makes a relative path relative to `root`.
    #[must_use]
    pub fn resolved_against(mut self, root: &Path) -> Self {
        if self.path.is_relative() && !self.path.as_os_str().is_empty() {
            self.path = root.join(&self.path);
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn records_declaration_site() {
        let line = line!() + 1;
        let request = EmbedRequest::new("a.bin");
        assert_eq!(request.location().line(), line);
        assert_eq!(request.location().file(), file!());
    }

    #[test]
    fn relative_paths_join_root() {
        let root = Path::new("/project");
        let request = EmbedRequest::new("blobs/a.bin").resolved_against(root);
        assert_eq!(request.path(), Path::new("/project/blobs/a.bin"));

        let absolute = EmbedRequest::new("/elsewhere/b.bin").resolved_against(root);
        assert_eq!(absolute.path(), Path::new("/elsewhere/b.bin"));

        let empty = EmbedRequest::new("").resolved_against(root);
        assert_eq!(empty.path(), Path::new(""));
    }

    #[test]
    fn defaults() {
        let request = EmbedRequest::new("a.bin");
        assert_eq!(request.offset, 0);
        assert_eq!(request.length, None);
        assert_eq!(request.max_size, None);
        assert!(request.utf8_literal);
        assert_eq!(request.shape, OutputShape::default());
    }

    #[test]
    fn range_setters() {
        let request = EmbedRequest::new("a.bin").offset(3).length(7).max_size(9);
        assert_eq!(request.offset, 3);
        assert_eq!(request.length, Some(7));
        assert_eq!(request.max_size, Some(9));
    }
}
