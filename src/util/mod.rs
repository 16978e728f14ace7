/// Date part of a server timestamp (`2024-05-01T10:00:00` -> `2024-05-01`).
///
/// Unparseable values are shown as-is rather than hidden.
pub(crate) fn display_date(timestamp: Option<&str>) -> String {
    let Some(ts) = timestamp.map(str::trim).filter(|s| !s.is_empty()) else {
        return "—".to_string();
    };

    match ts.split_once(['T', ' ']) {
        Some((date, _)) if looks_like_date(date) => date.to_string(),
        None if looks_like_date(ts) => ts.to_string(),
        _ => ts.to_string(),
    }
}

fn looks_like_date(s: &str) -> bool {
    let parts: Vec<&str> = s.split('-').collect();
    parts.len() == 3
        && parts[0].len() == 4
        && parts
            .iter()
            .all(|p| !p.is_empty() && p.chars().all(|c| c.is_ascii_digit()))
}
