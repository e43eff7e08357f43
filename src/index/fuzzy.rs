//! Partial-ratio fuzzy scoring
//!
//! Scores how well the shorter string matches the best-aligned window of
//! the longer one, on a 0–100 scale.

/// Default minimum score for a fuzzy keyword match
pub const DEFAULT_FUZZY_THRESHOLD: u8 = 70;

/// Partial similarity ratio between two strings (0–100)
///
/// Every window of the longer string with the length of the shorter one is
/// compared with `strsim::normalized_levenshtein`, and the best window wins.
/// A verbatim substring therefore scores 100. Either string empty scores 0.
/// Lengths are counted in chars, not bytes.
///
/// # Examples
///
/// ```
/// use sessdex::index::fuzzy::partial_ratio;
///
/// assert_eq!(partial_ratio("shift", "weekly shift calendar"), 100);
/// assert!(partial_ratio("shfit", "weekly shift calendar") >= 60);
/// assert_eq!(partial_ratio("", "anything"), 0);
/// ```
pub fn partial_ratio(a: &str, b: &str) -> u8 {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    if a_chars.is_empty() || b_chars.is_empty() {
        return 0;
    }

    let (short, long) = if a_chars.len() <= b_chars.len() {
        (a_chars, b_chars)
    } else {
        (b_chars, a_chars)
    };
    let needle: String = short.iter().collect();

    let mut best = 0.0f64;
    for window in long.windows(short.len()) {
        let candidate: String = window.iter().collect();
        let score = strsim::normalized_levenshtein(&needle, &candidate);
        if score > best {
            best = score;
            if best >= 1.0 {
                break;
            }
        }
    }

    (best * 100.0).round().clamp(0.0, 100.0) as u8
}

/// Returns true if `partial_ratio(keyword, text)` reaches `threshold`
pub fn fuzzy_matches(keyword: &str, text: &str, threshold: u8) -> bool {
    partial_ratio(keyword, text) >= threshold
}
