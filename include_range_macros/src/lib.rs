//! Procedural macro implementation for the `include_range` crate. Do not use directly.
use std::{
    env, fs,
    path::{Path, PathBuf},
};

use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;
use syn::{LitStr, parse_macro_input};

/// Directory below `OUT_DIR` the build script writes units to.
const UNIT_DIR: &str = "include_range";

/// Includes a unit generated by the `include_range` build script.
///
/// This macro takes a single string literal naming the unit. A unit is named
/// after the file it was read from, without the extension or leading dots
/// (`"font"` for `assets/font.ttf`, `"env"` for `.env`); when several requests
/// read files with the same name, later units get a numeric suffix
/// (`"font_0"`). The build script's report lists every name.
///
/// It expands, in item position, to the generated declaration: the requested
/// modules or `impl` block wrapping a `const` or `static` of type
/// `&'static [u8]`.
///
/// # Build Dependencies
///
/// This macro requires a `build.rs` script for the consuming crate, which must
/// use `include_range::Config` to generate the units.
///
/// # Errors
///
/// This macro will cause a compilation failure if:
/// - The build script has not been run.
/// - The build script did not produce a unit with this name, for instance
///   because the request was out of bounds. The build script prints the reason
///   as a warning.
#[proc_macro]
pub fn include_range(input: TokenStream) -> TokenStream {
    let lit_str = parse_macro_input!(input as LitStr);

    env::var("OUT_DIR").map_or_else(
        |_| {
            syn::Error::new(
                lit_str.span(),
                "include_range: build script has not run. This is expected during analysis (e.g., by rust-analyzer).",
            )
            .to_compile_error()
            .into()
        },
        |out_dir| get_tokens(&lit_str, &PathBuf::from(out_dir).join(UNIT_DIR)).into(),
    )
}

fn get_tokens(lit_str: &LitStr, unit_dir: &Path) -> TokenStream2 {
    let name = lit_str.value();
    if name.is_empty() || name.contains(['/', '\\']) || name.starts_with('.') {
        let msg = format!("include_range: '{name}' is not a unit name");
        return syn::Error::new(lit_str.span(), msg).to_compile_error();
    }

    let path = unit_dir.join(format!("{name}.rs"));
    if !path.is_file() {
        let available = available_units(unit_dir);
        let msg = if available.is_empty() {
            format!(
                "include_range: no unit named '{name}'; the build script generated no units"
            )
        } else {
            format!(
                "include_range: no unit named '{name}'; available units: {}",
                available.join(", ")
            )
        };
        return syn::Error::new(lit_str.span(), msg).to_compile_error();
    }

    let Some(path_str) = path.to_str() else {
        let msg = format!(
            "include_range: unit path '{}' is not valid UTF-8",
            path.display()
        );
        return syn::Error::new(lit_str.span(), msg).to_compile_error();
    };

    quote! {
        include!(#path_str);
    }
}

/// Names of the units in `unit_dir`, sorted.
fn available_units(unit_dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(unit_dir)
        .into_iter()
        .flatten()
        .filter_map(Result::ok)
        .filter_map(|entry| {
            let path = entry.path();
            let is_unit = path.extension().is_some_and(|ext| ext == "rs");
            is_unit
                .then(|| path.file_stem().map(|stem| stem.to_string_lossy().into_owned()))
                .flatten()
        })
        .collect();
    names.sort();
    names
}
