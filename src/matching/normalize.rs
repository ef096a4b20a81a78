//! Title normalization applied before similarity scoring.

/// Lowercases, maps punctuation to spaces, collapses whitespace and drops a
/// leading "the" so that "The Matrix" and "matrix, the" compare equal.
pub fn normalize_title(title: &str) -> String {
    let mapped: String = title
        .to_lowercase()
        .replace('&', " and ")
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { ' ' })
        .collect();

    let mut words: Vec<&str> = mapped.split_whitespace().collect();
    if words.len() > 1 && words[0] == "the" {
        words.remove(0);
    }
    // trailing article from library sort titles ("Matrix, The")
    if words.len() > 1 && words[words.len() - 1] == "the" {
        words.pop();
    }
    words.join(" ")
}
