use reqwest::header::HeaderMap;

pub(crate) fn next_page_from_link_header(headers: &HeaderMap) -> Option<u32> {
    let link = headers.get("link")?.to_str().ok()?;
    for part in link.split(',') {
        let part = part.trim();
        if !part.contains("rel=\"next\"") {
            continue;
        }
        let start = part.find('<')? + 1;
        let end = part.find('>')?;
        let url = part.get(start..end)?;
        let query = url.split_once('?').map(|(_, query)| query).unwrap_or("");
        for pair in query.split('&') {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            if key == "page"
                && let Ok(page) = value.parse::<u32>()
            {
                return Some(page);
            }
        }
    }
    None
}
