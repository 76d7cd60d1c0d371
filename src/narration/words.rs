//! Spoken number words.

/// Amharic units, index 0 unused.
const AMHARIC_UNITS: [&str; 10] = [
    "", "አንድ", "ሁለት", "ሶስት", "አራት", "አምስት", "ስድስት", "ሰባት", "ስምንት", "ዘጠኝ",
];

/// Amharic tens from 10 to 70, index 0 unused.
const AMHARIC_TENS: [&str; 8] = ["", "አስር", "ሃያ", "ሰላሳ", "አርባ", "ሃምሳ", "ስልሳ", "ሰባ"];

/// Prefix for 11..=19.
const AMHARIC_TEENS: &str = "አስራ";

/// Amharic words for `1..=79`, `None` outside that range.
#[must_use]
pub fn amharic(value: u8) -> Option<String> {
    let (tens, units) = ((value / 10) as usize, (value % 10) as usize);
    match (tens, units) {
        (0, 0) => None,
        (0, u) => Some(AMHARIC_UNITS[u].to_string()),
        (t, 0) if t < AMHARIC_TENS.len() => Some(AMHARIC_TENS[t].to_string()),
        (1, u) => Some(format!("{} {}", AMHARIC_TEENS, AMHARIC_UNITS[u])),
        (t, u) if t < AMHARIC_TENS.len() => Some(format!("{} {}", AMHARIC_TENS[t], AMHARIC_UNITS[u])),
        _ => None,
    }
}
