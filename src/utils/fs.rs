//! File system display utilities

use std::path::MAIN_SEPARATOR;

/// Shortens long paths for display, keeping the last two components
pub fn shorten_path(path: &str, max_length: usize) -> String {
    if path.chars().count() <= max_length {
        return path.to_string();
    }

    let components: Vec<&str> = path
        .split(['/', MAIN_SEPARATOR])
        .filter(|s| !s.is_empty())
        .collect();
    if components.len() <= 2 {
        // Too few components to shorten meaningfully
        return path.to_string();
    }

    format!(
        ".../{}/{}",
        components[components.len() - 2],
        components[components.len() - 1]
    )
}
