use std::collections::{BTreeMap, HashMap};

/// Merge provider headers with per-call headers.
///
/// Keys compare case-insensitively and per-call values win. JSON content
/// negotiation headers are filled in when absent.
pub fn combine_headers(
    base: &[(String, String)],
    extra: &HashMap<String, String>,
) -> Vec<(String, String)> {
    let mut hdrs: BTreeMap<String, String> = BTreeMap::new();
    for (k, v) in base {
        hdrs.insert(k.to_ascii_lowercase(), v.clone());
    }
    for (k, v) in extra {
        hdrs.insert(k.to_ascii_lowercase(), v.clone());
    }
    hdrs.entry("content-type".into())
        .or_insert_with(|| "application/json".into());
    hdrs.entry("accept".into())
        .or_insert_with(|| "application/json".into());
    hdrs.into_iter()
        .map(|(k, v)| (canonicalize_header(&k), v))
        .collect()
}

/// `x-request-id` -> `X-Request-Id`
pub fn canonicalize_header(lc: &str) -> String {
    lc.split('-')
        .map(|part| {
            let mut chars = part.chars();
            match chars.next() {
                None => String::new(),
                Some(f) => f.to_ascii_uppercase().to_string() + &chars.as_str().to_ascii_lowercase(),
            }
        })
        .collect::<Vec<_>>()
        .join("-")
}

/// Lower-case response header names into a lookup map.
pub fn response_headers_map(pairs: Vec<(String, String)>) -> Option<HashMap<String, String>> {
    if pairs.is_empty() {
        return None;
    }
    Some(
        pairs
            .into_iter()
            .map(|(k, v)| (k.to_ascii_lowercase(), v))
            .collect(),
    )
}
