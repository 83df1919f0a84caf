// src/domain/slug.rs

/// Cut `slug` to at most `max_chars` characters without leaving a trailing hyphen.
pub fn clip_slug(slug: &str, max_chars: usize) -> &str {
    let end = slug
        .char_indices()
        .nth(max_chars)
        .map_or(slug.len(), |(idx, _)| idx);
    slug[..end].trim_end_matches('-')
}
