//! URL slug derivation for portfolio case studies.

/// Derive a URL-safe slug from a title.
///
/// Lowercases, maps runs of non-alphanumeric characters to a single `-`,
/// and trims leading/trailing separators. Returns an empty string when the
/// title has no usable characters; callers must treat that as "no slug".
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut pending_sep = false;

    for ch in title.chars() {
        if ch.is_ascii_alphanumeric() {
            if pending_sep && !slug.is_empty() {
                slug.push('-');
            }
            pending_sep = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            pending_sep = true;
        }
    }

    slug
}

#[cfg(test)]
mod tests {
    use super::slugify;

    #[test]
    fn test_basic_title() {
        assert_eq!(slugify("Fintech Dashboard Redesign"), "fintech-dashboard-redesign");
    }

    #[test]
    fn test_punctuation_collapses() {
        assert_eq!(slugify("ACME, Inc. -- Phase 2!"), "acme-inc-phase-2");
    }

    #[test]
    fn test_unicode_and_empty() {
        assert_eq!(slugify("Étude ★"), "tude");
        assert_eq!(slugify("***"), "");
    }
}
