//! String transformation utilities for name normalization

/// Split an identifier-ish string into words.
///
/// Non-alphanumeric characters separate words; inside a run of alphanumerics a new
/// word starts at a lower-to-upper transition (`userName`), at a letter following
/// a digit (`v2users` -> `v2`, `users`), and at the last capital of an acronym followed by a lowercase
/// letter (`XMLHttp` -> `XML`, `Http`).
pub fn split_words(s: &str) -> Vec<String> {
    let chars: Vec<char> = s.chars().collect();
    let mut words = Vec::new();
    let mut current = String::new();

    for (i, &ch) in chars.iter().enumerate() {
        if !ch.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }

        if !current.is_empty() {
            let prev = chars[i - 1];
            let next_is_lower = chars.get(i + 1).is_some_and(|c| c.is_lowercase());
            let split = if ch.is_uppercase() {
                prev.is_lowercase() || prev.is_numeric() || (prev.is_uppercase() && next_is_lower)
            } else {
                ch.is_alphabetic() && prev.is_numeric()
            };
            if split {
                words.push(std::mem::take(&mut current));
            }
        }
        current.push(ch);
    }

    if !current.is_empty() {
        words.push(current);
    }
    words
}

/// Convert a string to lowerCamelCase
pub fn to_camel_case(s: &str) -> String {
    split_words(s)
        .iter()
        .enumerate()
        .map(|(i, word)| {
            let lower = word.to_lowercase();
            if i == 0 {
                return lower;
            }
            let mut chars = lower.chars();
            match chars.next() {
                None => String::new(),
                Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
            }
        })
        .collect()
}

/// Remove carriage returns and line feeds from free text
pub fn strip_line_breaks(s: &str) -> String {
    s.replace(['\r', '\n'], "")
}
