//! URL slugs for blog posts.

use std::sync::LazyLock;

use regex::Regex;

static SEPARATORS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-z0-9]+").expect("static regex"));

/// Lowercase ASCII slug: letters and digits kept, everything else collapsed
/// into single hyphens with none at either end.
///
/// ```
/// use kinfolk_core::slug::slugify;
///
/// assert_eq!(slugify("Reuni Akbar 2024!"), "reuni-akbar-2024");
/// ```
pub fn slugify(title: &str) -> String {
    let lowered = title.to_lowercase();
    SEPARATORS
        .replace_all(&lowered, "-")
        .trim_matches('-')
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_title() {
        assert_eq!(slugify("Hello World"), "hello-world");
    }

    #[test]
    fn punctuation_is_collapsed() {
        assert_eq!(slugify("  Sejarah -- Keluarga: Bagian 2 "), "sejarah-keluarga-bagian-2");
    }

    #[test]
    fn non_ascii_letters_are_dropped() {
        assert_eq!(slugify("Café Ümlaut"), "caf-mlaut");
    }

    #[test]
    fn empty_title() {
        assert_eq!(slugify("!!!"), "");
    }
}
