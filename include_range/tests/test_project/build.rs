use std::{env, fs, path::PathBuf};

use include_range::{Config, EmbedRequest, ScopeKind};

/// Same pattern as `pattern()` in `src/bin/main.rs`.
fn pattern() -> Vec<u8> {
    (0..300_000u32).map(|i| (i.wrapping_mul(31) >> 3) as u8).collect()
}

fn main() {
    // Binary fixtures are written at build time rather than checked in.
    let out_dir = PathBuf::from(env::var("OUT_DIR").expect("OUT_DIR not set"));
    let pattern_path = out_dir.join("pattern.bin");
    fs::write(&pattern_path, pattern()).expect("Failed to write pattern fixture");
    let table_path = out_dir.join("table.bin");
    fs::write(&table_path, (0..=255u8).collect::<Vec<_>>()).expect("Failed to write table fixture");

    let report = Config::new()
        .root("blobs")
        .embed(
            EmbedRequest::new("greeting.txt")
                .member("GREETING")
                .modifiers("pub"),
        )
        .embed(
            EmbedRequest::new(&table_path)
                .offset(250)
                .namespace("assets::tables")
                .member("TAIL")
                .modifiers("pub"),
        )
        .embed(
            EmbedRequest::new(&table_path)
                .scope("Tables", ScopeKind::Impl)
                .member("ALL")
                .modifiers("pub(crate)"),
        )
        .embed(
            EmbedRequest::new(&pattern_path)
                .offset(1)
                .length(200_000)
                .namespace("large")
                .member("PATTERN")
                .modifiers("pub"),
        )
        .embed(
            EmbedRequest::new("greeting.txt")
                .offset(1000)
                .member("UNUSED"),
        )
        .build()
        .expect("Failed to generate embeds");

    // The last request is out of bounds on purpose.
    assert_eq!(report.units.len(), 4);
    assert_eq!(report.diagnostics.len(), 1);
}
