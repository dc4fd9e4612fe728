/// Pick the locale to display from the user agent's preference list.
///
/// A preference matches an available locale either exactly
/// (case-insensitive, `_` and `-` equivalent) or by its primary subtag
/// (`es-ES` matches `es`). The first preference with a match wins; with no
/// match the default is used.
pub fn negotiate_locale(preferred: &[String], available: &[String], default: &str) -> String {
    for tag in preferred {
        let tag = normalize(tag);
        if tag.is_empty() {
            continue;
        }
        if let Some(hit) = available.iter().find(|a| normalize(a) == tag) {
            return hit.clone();
        }
        let primary = tag.split('-').next().unwrap_or_default();
        if let Some(hit) = available.iter().find(|a| normalize(a) == primary) {
            return hit.clone();
        }
    }
    default.to_string()
}

fn normalize(tag: &str) -> String {
    // Accept-Language entries may carry a quality suffix (`en;q=0.8`).
    tag.split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .replace('_', "-")
        .to_lowercase()
}
