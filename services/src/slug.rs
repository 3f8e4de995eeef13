//! URL slugs for product pages.

use sea_orm::{DbErr, SqlErr};

/// Slug used when a name contains no ASCII letters or digits at all.
const FALLBACK_SLUG: &str = "product";

/// Lowercases `name` and collapses every run of non-alphanumerics into one hyphen.
///
/// The result never starts or ends with a hyphen and is never empty.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut pending_hyphen = false;

    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_hyphen && !slug.is_empty() {
                slug.push('-');
            }
            pending_hyphen = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_hyphen = true;
        }
    }

    if slug.is_empty() {
        FALLBACK_SLUG.to_string()
    } else {
        slug
    }
}

/// `base` for the first attempt, `base-1`, `base-2`, ... after that.
pub fn slug_candidate(base: &str, attempt: u32) -> String {
    if attempt == 0 {
        base.to_string()
    } else {
        format!("{base}-{attempt}")
    }
}

/// Whether a write failed on the `products.slug` unique index.
pub fn is_slug_conflict(err: &DbErr) -> bool {
    matches!(
        err.sql_err(),
        Some(SqlErr::UniqueConstraintViolation(msg)) if msg.contains("slug")
    )
}
