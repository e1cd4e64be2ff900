use url::Url;

const YOUTUBE_HOSTS: &[&str] = &["youtube.com", "youtube-nocookie.com"];
const PATH_PREFIXES: &[&str] = &["shorts", "embed", "live", "v"];

/// Pull the video id out of a watch URL.
///
/// Accepts `youtu.be/<id>`, `youtube.com/watch?v=<id>` (with or without
/// `www.`/`m.`/`music.`), and the `/shorts/`, `/embed/`, `/live/` and `/v/`
/// path forms. Input that does not look like a URL is taken to be an id
/// already. Returns `None` for a URL that carries no id.
pub fn extract_video_id(input: &str) -> Option<String> {
    let input = input.trim();
    if input.is_empty() {
        return None;
    }
    if !input.contains('/') && !input.contains('?') {
        return Some(input.to_string());
    }

    let url = if input.starts_with("http://") || input.starts_with("https://") {
        Url::parse(input).ok()?
    } else {
        Url::parse(&format!("https://{input}")).ok()?
    };

    let host = url.host_str()?;
    let host = host
        .strip_prefix("www.")
        .or_else(|| host.strip_prefix("m."))
        .or_else(|| host.strip_prefix("music."))
        .unwrap_or(host);

    let mut segments = url.path_segments()?.filter(|s| !s.is_empty());

    let id = if host == "youtu.be" {
        segments.next()?.to_string()
    } else if YOUTUBE_HOSTS.contains(&host) {
        match segments.next()? {
            "watch" => url
                .query_pairs()
                .find(|(key, _)| key == "v")
                .map(|(_, value)| value.into_owned())?,
            prefix if PATH_PREFIXES.contains(&prefix) => segments.next()?.to_string(),
            _ => return None,
        }
    } else {
        return None;
    };

    if id.is_empty() { None } else { Some(id) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_watch_urls() {
        assert_eq!(
            extract_video_id("https://www.youtube.com/watch?v=duAeRtYeC0E").as_deref(),
            Some("duAeRtYeC0E")
        );
        assert_eq!(
            extract_video_id("https://youtube.com/watch?feature=share&v=pZfZRybbCTA").as_deref(),
            Some("pZfZRybbCTA")
        );
        assert_eq!(
            extract_video_id("https://m.youtube.com/watch?v=Dvx_L3_2Bkc&t=30s").as_deref(),
            Some("Dvx_L3_2Bkc")
        );
        assert_eq!(
            extract_video_id("www.youtube.com/watch?v=t9qGo-6I-SA").as_deref(),
            Some("t9qGo-6I-SA")
        );
    }

    #[test]
    fn test_short_and_path_forms() {
        assert_eq!(
            extract_video_id("https://youtu.be/SUUaR2cpAOI").as_deref(),
            Some("SUUaR2cpAOI")
        );
        assert_eq!(
            extract_video_id("https://youtu.be/SUUaR2cpAOI?si=abc").as_deref(),
            Some("SUUaR2cpAOI")
        );
        assert_eq!(
            extract_video_id("https://www.youtube.com/shorts/zlmdubztPLU").as_deref(),
            Some("zlmdubztPLU")
        );
        assert_eq!(
            extract_video_id("https://www.youtube-nocookie.com/embed/S8DQTx1bRzs").as_deref(),
            Some("S8DQTx1bRzs")
        );
    }

    #[test]
    fn test_bare_id_passes_through() {
        assert_eq!(extract_video_id("  D2Y8EfwXyho ").as_deref(), Some("D2Y8EfwXyho"));
    }

    #[test]
    fn test_urls_without_id() {
        assert_eq!(extract_video_id(""), None);
        assert_eq!(extract_video_id("https://www.youtube.com/watch"), None);
        assert_eq!(extract_video_id("https://www.youtube.com/channel/UC123"), None);
        assert_eq!(extract_video_id("https://vimeo.com/12345"), None);
        assert_eq!(extract_video_id("https://youtu.be/"), None);
    }
}
