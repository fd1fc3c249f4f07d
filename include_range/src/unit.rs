//! The Rust source wrapped around an embedded literal.
/// How an enclosing scope is reproduced in the generated unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScopeKind {
    /// `pub mod name { ... }`
    Module,
    /// `impl Name { ... }`; the member becomes an associated constant.
    ///
    /// An impl block cannot contain modules, so this kind is only valid as the
    /// innermost scope.
    Impl,
}

/// One enclosing scope of the generated member.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Scope {
    pub name: String,
    pub kind: ScopeKind,
}

/// The item the literal is bound to.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum ItemKind {
    #[default]
    Const,
    Static,
}

impl ItemKind {
    const fn keyword(self) -> &'static str {
        match self {
            Self::Const => "const",
            Self::Static => "static",
        }
    }
}

/// Where and how the embedded member is declared.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputShape {
    /// `::`-separated module path the unit is nested in.
    pub namespace: Option<String>,
    /// Enclosing scopes, innermost first.
    pub scopes: Vec<Scope>,
    pub member: Option<String>,
    /// Visibility of the member, e.g. `pub(crate)`.
    pub modifiers: String,
    pub item: ItemKind,
}

/// Text before and after the literal expression.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Frame {
    pub(crate) head: String,
    pub(crate) tail: String,
}

impl OutputShape {
    /// Namespace segments, outermost first.
    pub(crate) fn namespace_segments(&self) -> impl Iterator<Item = &str> {
        self.namespace
            .as_deref()
            .into_iter()
            .flat_map(|namespace| namespace.split("::"))
            .map(str::trim)
    }

    /// Renders the declaration around the literal for a unit built from
    /// `source_name`.
    pub(crate) fn frame(&self, source_name: &str) -> Frame {
        let openers: Vec<String> = self
            .namespace_segments()
            .map(|segment| format!("pub mod {segment} {{\n"))
            .chain(self.scopes.iter().rev().map(|scope| match scope.kind {
                ScopeKind::Module => format!("pub mod {} {{\n", scope.name.trim()),
                ScopeKind::Impl => format!("impl {} {{\n", scope.name.trim()),
            }))
            .collect();
        let visibility = match self.modifiers.trim() {
            "" => String::new(),
            modifiers => format!("{modifiers} "),
        };

        // The file name ends up in a line comment, so it must stay on one line.
        let head = format!(
            "// @generated by include_range from `{}`. Do not edit.\n{}{visibility}{} {}: &'static [u8] = ",
            source_name.escape_debug(),
            openers.concat(),
            self.item.keyword(),
            self.member.as_deref().unwrap_or_default().trim(),
        );
        let tail = format!(";\n{}", "}\n".repeat(openers.len()));

        Frame { head, tail }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_member() {
        let shape = OutputShape {
            member: Some("DATA".into()),
            ..OutputShape::default()
        };
        let frame = shape.frame("data.bin");
        assert_eq!(
            frame.head,
            "// @generated by include_range from `data.bin`. Do not edit.\n\
             const DATA: &'static [u8] = "
        );
        assert_eq!(frame.tail, ";\n");
    }

    #[test]
    fn nested_member() {
        let shape = OutputShape {
            namespace: Some("assets :: fonts".into()),
            scopes: vec![
                Scope {
                    name: "Glyphs".into(),
                    kind: ScopeKind::Impl,
                },
                Scope {
                    name: "latin".into(),
                    kind: ScopeKind::Module,
                },
            ],
            member: Some("TABLE".into()),
            modifiers: "pub(crate)".into(),
            item: ItemKind::Const,
        };
        let frame = shape.frame("glyphs.bin");
        assert_eq!(
            frame.head,
            "// @generated by include_range from `glyphs.bin`. Do not edit.\n\
             pub mod assets {\n\
             pub mod fonts {\n\
             pub mod latin {\n\
             impl Glyphs {\n\
             pub(crate) const TABLE: &'static [u8] = "
        );
        assert_eq!(frame.tail, ";\n}\n}\n}\n}\n");
    }

    #[test]
    fn source_name_stays_inside_the_comment() {
        let shape = OutputShape {
            member: Some("DATA".into()),
            ..OutputShape::default()
        };
        let frame = shape.frame("a\npub b`\u{202E}.txt");
        let mut lines = frame.head.lines();
        assert_eq!(
            lines.next(),
            Some("// @generated by include_range from `a\\npub b`\\u{202e}.txt`. Do not edit.")
        );
        assert_eq!(lines.next(), Some("const DATA: &'static [u8] = "));
        assert_eq!(lines.next(), None);
    }
}
