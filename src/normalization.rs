use serde::{Deserialize, Deserializer};

/// Normalizes user-entered text by stripping surrounding whitespace and
/// composing it into Unicode Normalization Form C.
///
/// ```
/// use profile_core::normalization::normalize_text;
/// assert_eq!(normalize_text(" Cafe\u{301} "), "Café");
/// ```
pub fn normalize_text(text: impl AsRef<str>) -> String {
    use unicode_normalization::UnicodeNormalization;

    text.as_ref().trim().nfc().collect()
}

/// Deserializes a `String` after running it through `normalize_text`.
/// `null` is read as the empty string.
pub fn deserialize<'de, D>(deserializer: D) -> Result<String, D::Error>
where D: Deserializer<'de> {
    let s: Option<String> = Deserialize::deserialize(deserializer)?;
    Ok(s.map(normalize_text).unwrap_or_default())
}

/// Deserializes a list of `String`s, normalizing each and dropping the
/// ones left empty or already seen. First occurrences keep their order.
pub fn deserialize_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where D: Deserializer<'de> {
    let v: Option<Vec<String>> = Deserialize::deserialize(deserializer)?;

    let mut list: Vec<String> = Vec::new();
    for s in v.unwrap_or_default().into_iter().map(normalize_text) {
        if !s.is_empty() && !list.contains(&s) {
            list.push(s);
        }
    }

    Ok(list)
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;
    use unicode_normalization::is_nfc;

    use super::normalize_text;

    fn count_whitespace(s: impl AsRef<str>) -> usize {
        s.as_ref().chars().filter(|c| c.is_whitespace()).count()
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 2000, ..ProptestConfig::default()
        })]

        #[test]
        fn normalization_works(string in "(\\S.*\\S|\\S+)", space_before in "\\s*", space_after in "\\s*") {
            let normalized = normalize_text(format!("{}{}{}", space_before, string, space_after));

            prop_assert!(is_nfc(&normalized), "{:?} (normalized form of {:?}) is in NFC", normalized, string);

            prop_assert!(!normalized.starts_with(char::is_whitespace) && !normalized.ends_with(char::is_whitespace), "{:?} (normalized form of {:?}) has no leading or trailing whitespace", normalized, string);

            let trimmed = normalized.trim();

            prop_assert_eq!(count_whitespace(&normalized), count_whitespace(&trimmed), "{:?} (normalized form of {:?}) preserves inner whitespace", normalized, string);
        }
    }
}
