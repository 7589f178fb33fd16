//! Slug generation - titles to URL-safe identifiers.

/// Derive a URL-safe slug from a post title.
///
/// Lower-cases ASCII letters, collapses every run of non-alphanumeric
/// characters into a single hyphen, and trims leading/trailing hyphens.
/// Deterministic and idempotent; any title containing at least one ASCII
/// alphanumeric character produces a non-empty slug. Empty or
/// whitespace-only titles are rejected by field validation upstream,
/// never here.
pub fn slugify(title: &str) -> String {
    let mut slug = String::with_capacity(title.len());
    let mut gap = false;

    for ch in title.chars() {
        if ch.is_ascii_alphanumeric() {
            if gap && !slug.is_empty() {
                slug.push('-');
            }
            gap = false;
            slug.push(ch.to_ascii_lowercase());
        } else {
            gap = true;
        }
    }

    slug
}
