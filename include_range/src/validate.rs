//! Structural checks that run before any file is touched.
use std::collections::HashMap;

use syn::{Ident, Visibility};

use crate::{
    diagnostic::Diagnostic,
    request::EmbedRequest,
    unit::{ItemKind, ScopeKind},
};

fn is_ident(text: &str) -> bool {
    syn::parse_str::<Ident>(text.trim()).is_ok()
}

/// Checks one request in isolation.
fn check(request: &EmbedRequest) -> Result<(), Diagnostic> {
    let shape = &request.shape;

    if request.path.as_os_str().is_empty() {
        return Err(Diagnostic::InvalidArgumentValue {
            name: "path",
            reason: "path is empty".into(),
        });
    }
    let Some(member) = shape.member.as_deref() else {
        return Err(Diagnostic::MissingArgument("member"));
    };

    if !shape.namespace_segments().all(is_ident) {
        return Err(Diagnostic::MalformedDeclaration(format!(
            "`{}` is not a module path",
            shape.namespace.as_deref().unwrap_or_default()
        )));
    }
    if let Some(scope) = shape.scopes.iter().find(|scope| !is_ident(&scope.name)) {
        return Err(Diagnostic::MalformedDeclaration(format!(
            "scope name `{}` is not an identifier",
            scope.name
        )));
    }

    if !is_ident(member) {
        return Err(Diagnostic::InvalidTargetSignature(format!(
            "member name `{member}` is not an identifier"
        )));
    }
    if syn::parse_str::<Visibility>(&shape.modifiers).is_err() {
        return Err(Diagnostic::InvalidTargetSignature(format!(
            "`{}` is not a visibility",
            shape.modifiers
        )));
    }
    if let Some(scope) = shape
        .scopes
        .iter()
        .skip(1)
        .find(|scope| scope.kind == ScopeKind::Impl)
    {
        return Err(Diagnostic::InvalidTargetSignature(format!(
            "impl scope `{}` must be the innermost scope",
            scope.name
        )));
    }
    if shape.item == ItemKind::Static
        && shape.scopes.first().is_some_and(|scope| scope.kind == ScopeKind::Impl)
    {
        return Err(Diagnostic::InvalidTargetSignature(format!(
            "`{member}` cannot be a static inside an impl block"
        )));
    }

    Ok(())
}

/// Runs the structural checks for every request, in order.
///
/// A request whose target was already claimed by an earlier one is reported as
/// a duplicate; the first declaration stays valid.
pub(crate) fn check_all(requests: &[EmbedRequest]) -> Vec<Result<(), Diagnostic>> {
    let mut targets: HashMap<String, usize> = HashMap::new();
    requests
        .iter()
        .enumerate()
        .map(|(index, request)| {
            check(request)?;
            let target = target_path(request);
            let first = *targets.entry(target.clone()).or_insert(index);
            if first == index {
                Ok(())
            } else {
                Err(Diagnostic::DuplicateDeclaration(target))
            }
        })
        .collect()
}

/// The fully qualified path of the generated member, e.g. `a::b::Font::HEADER`.
fn target_path(request: &EmbedRequest) -> String {
    let shape = &request.shape;
    shape
        .namespace_segments()
        .chain(shape.scopes.iter().rev().map(|scope| scope.name.trim()))
        .chain(shape.member.as_deref().map(str::trim))
        .collect::<Vec<_>>()
        .join("::")
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    fn valid() -> EmbedRequest {
        EmbedRequest::new("a.bin").member("DATA")
    }

    #[test]
    fn accepts_well_formed_requests() {
        let requests = [
            valid(),
            valid().member("OTHER").modifiers("pub(crate)"),
            valid()
                .namespace("assets::fonts")
                .scope("Font", ScopeKind::Impl)
                .scope("latin", ScopeKind::Module)
                .modifiers("pub"),
            valid().member("r#type").item(ItemKind::Static).namespace("raw"),
        ];
        assert!(check_all(&requests).iter().all(Result::is_ok));
    }

    #[test]
    fn missing_member() {
        assert_eq!(
            check(&EmbedRequest::new("a.bin")),
            Err(Diagnostic::MissingArgument("member"))
        );
    }

    #[test]
    fn empty_path() {
        assert!(matches!(
            check(&EmbedRequest::new("").member("X")),
            Err(Diagnostic::InvalidArgumentValue { name: "path", .. })
        ));
    }

    #[rstest]
    #[case(valid().namespace("a::"))]
    #[case(valid().namespace("a::fn"))]
    #[case(valid().namespace("a-b"))]
    #[case(valid().scope("not an ident", ScopeKind::Module))]
    fn malformed(#[case] request: EmbedRequest) {
        assert!(matches!(
            check(&request),
            Err(Diagnostic::MalformedDeclaration(_))
        ));
    }

    #[rstest]
    #[case(valid().member("1abc"))]
    #[case(valid().member("match"))]
    #[case(valid().modifiers("public"))]
    #[case(valid().modifiers("pub pub"))]
    #[case(valid().scope("m", ScopeKind::Module).scope("T", ScopeKind::Impl))]
    #[case(valid().scope("T", ScopeKind::Impl).item(ItemKind::Static))]
    fn invalid_signature(#[case] request: EmbedRequest) {
        assert!(matches!(
            check(&request),
            Err(Diagnostic::InvalidTargetSignature(_))
        ));
    }

    #[test]
    fn duplicates_after_the_first() {
        let requests = [
            valid().namespace("a"),
            EmbedRequest::new("b.bin").member("DATA").namespace("a"),
            valid().namespace("b"),
            valid().namespace("a"),
        ];
        let results = check_all(&requests);
        assert!(results[0].is_ok());
        assert_eq!(
            results[1],
            Err(Diagnostic::DuplicateDeclaration("a::DATA".into()))
        );
        assert!(results[2].is_ok());
        assert!(results[3].is_err());
    }

    #[test]
    fn invalid_request_does_not_claim_its_target() {
        let requests = [valid().modifiers("nope"), valid()];
        let results = check_all(&requests);
        assert!(results[0].is_err());
        assert!(results[1].is_ok());
    }
}
