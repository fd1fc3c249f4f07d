use include_range::include_range;

include_range!("greeting");
include_range!("table");
include_range!("table_0");
include_range!("pattern");

struct Tables;

/// Same pattern as `pattern()` in `build.rs`.
fn pattern() -> Vec<u8> {
    (0..300_000u32).map(|i| (i.wrapping_mul(31) >> 3) as u8).collect()
}

fn main() {
    let original_greeting = "Contents of greeting.txt\n\"quoted\"\tand tabbed é\n";

    let s = std::str::from_utf8(GREETING).expect("data is not valid UTF-8");
    print!("{s}");
    assert_eq!(s, original_greeting);

    assert_eq!(assets::tables::TAIL, &[250, 251, 252, 253, 254, 255]);
    assert_eq!(Tables::ALL, (0..=255u8).collect::<Vec<_>>().as_slice());
    assert_eq!(large::PATTERN, &pattern()[1..200_001]);

    println!("Embedded data matches original.");
}
