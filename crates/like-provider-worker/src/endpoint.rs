// Endpoint URL resolution
//
// `GET <endpoint>?url=<id>&title=<title>` reads the count,
// `POST` to the same URL adds one like. The URL is resolved once per
// widget.

use url::Url;

/// Resolve a configured endpoint into the per-widget request URL
///
/// Endpoints without an `http(s)://` scheme are resolved against `origin`.
/// `url` is always set to the identity; `title` only when non-empty, so an
/// existing `title` survives an empty one. Setting a parameter replaces
/// its first occurrence in place and drops any repeats; parameters that
/// are not yet present are appended.
///
/// Returns `None` when the endpoint is empty or cannot be resolved.
pub fn build_endpoint(endpoint: &str, identity: &str, title: &str, origin: &str) -> Option<Url> {
    let endpoint = endpoint.trim();
    if endpoint.is_empty() {
        return None;
    }

    let mut url = if has_http_scheme(endpoint) {
        Url::parse(endpoint).ok()?
    } else {
        Url::parse(origin).ok()?.join(endpoint).ok()?
    };

    let mut pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
    set_param(&mut pairs, "url", identity);
    if !title.is_empty() {
        set_param(&mut pairs, "title", title);
    }

    url.query_pairs_mut().clear().extend_pairs(pairs);

    Some(url)
}

fn set_param(pairs: &mut Vec<(String, String)>, key: &str, value: &str) {
    match pairs.iter().position(|(k, _)| k == key) {
        Some(first) => {
            pairs[first].1 = value.to_string();
            let mut index = 0;
            pairs.retain(|(k, _)| {
                let keep = k != key || index == first;
                index += 1;
                keep
            });
        }
        None => pairs.push((key.to_string(), value.to_string())),
    }
}

fn has_http_scheme(endpoint: &str) -> bool {
    let lower = endpoint.get(..8).unwrap_or(endpoint).to_ascii_lowercase();
    lower.starts_with("http://") || lower.starts_with("https://")
}
