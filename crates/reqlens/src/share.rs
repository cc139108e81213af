//! Shareable links for a set of input panels
//!
//! Panels are stored as `?0=<input>&1=<input>...`.

use std::cmp::Ordering;
use url::form_urlencoded;

/// Serialize panel inputs into a query string, keyed by panel index
pub fn share_query<S: AsRef<str>>(panels: &[S]) -> String {
    let mut serializer = form_urlencoded::Serializer::for_suffix(String::from("?"), 1);
    for (idx, panel) in panels.iter().enumerate() {
        serializer.append_pair(&idx.to_string(), panel.as_ref());
    }
    serializer.finish()
}

/// Restore panel inputs from a query string
///
/// Entries are ordered by key, numeric keys first in numeric order. There
/// is always at least one panel.
pub fn restore_panels(query: &str) -> Vec<String> {
    let query = query.strip_prefix('?').unwrap_or(query);

    let mut entries: Vec<(String, String)> = form_urlencoded::parse(query.as_bytes())
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect();
    entries.sort_by(|(a, _), (b, _)| panel_order(a, b));

    let mut panels: Vec<String> = entries.into_iter().map(|(_, value)| value).collect();
    if panels.is_empty() {
        panels.push(String::new());
    }
    panels
}

fn panel_order(a: &str, b: &str) -> Ordering {
    match (a.parse::<usize>(), b.parse::<usize>()) {
        (Ok(a), Ok(b)) => a.cmp(&b),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_share_query() {
        assert_eq!(share_query::<&str>(&[]), "?");
        assert_eq!(share_query(&["a"]), "?0=a");
        assert_eq!(
            share_query(&["curl 'https://x' -d '{}'", "{\"a\":1}"]),
            "?0=curl+%27https%3A%2F%2Fx%27+-d+%27%7B%7D%27&1=%7B%22a%22%3A1%7D"
        );
    }

    #[test]
    fn test_restore_panels_roundtrip() {
        let panels = vec![
            "curl 'https://x' --data-raw '{\"a\":1}'".to_string(),
            "{\"params\":\"query=a&page=0\"}".to_string(),
        ];
        assert_eq!(restore_panels(&share_query(&panels)), panels);
    }

    #[test]
    fn test_restore_panels_orders_numerically() {
        let query: String = (0..12)
            .rev()
            .map(|i| format!("{}=p{}", i, i))
            .collect::<Vec<_>>()
            .join("&");
        let panels = restore_panels(&query);
        assert_eq!(panels.len(), 12);
        assert_eq!(panels[0], "p0");
        assert_eq!(panels[2], "p2");
        assert_eq!(panels[10], "p10");
    }

    #[test]
    fn test_restore_panels_non_numeric_keys_last() {
        assert_eq!(restore_panels("?b=2&a=1&0=zero"), vec!["zero", "1", "2"]);
    }

    #[test]
    fn test_restore_panels_empty() {
        assert_eq!(restore_panels(""), vec![String::new()]);
        assert_eq!(restore_panels("?"), vec![String::new()]);
    }
}
