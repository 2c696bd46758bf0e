use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Url;

use crate::domain::model::{AUDIO_EXTENSION, Track};

// 双引号 / 单引号 / 无引号三种 href 写法
static ANCHOR_HREF: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r#"(?is)<a\b[^>]*?\bhref\s*=\s*(?:"([^"]*)"|'([^']*)'|([^\s"'>]+))"#)
        .expect("anchor href regex")
});

/// 规范化目录路径：去掉首尾空白和 `/`，为空时返回 None
pub fn normalize_folder(folder: &str) -> Option<String> {
    let f = folder.trim().trim_matches('/');
    if f.is_empty() {
        None
    } else {
        Some(f.to_owned())
    }
}

/// `<base>/<folder>/<track>`，track 保持链接里的转义形式
pub fn resource_url(base_url: &str, folder: &str, track: &Track) -> String {
    format!("{}/{}/{}", base_url.trim_end_matches('/'), folder, track.id())
}

/// 从目录列表 HTML 中提取曲目
///
/// 链接先相对 `listing_url` 解析，只保留路径以音频后缀结尾且位于该目录下的项，
/// 曲目标识为目录前缀之后的部分。顺序与列表中出现的顺序一致。
pub fn parse_listing(html: &str, listing_url: &Url) -> Vec<Track> {
    let prefix = listing_url.path();
    ANCHOR_HREF
        .captures_iter(html)
        .filter_map(|caps| {
            let href = caps
                .get(1)
                .or_else(|| caps.get(2))
                .or_else(|| caps.get(3))?
                .as_str();
            let href = href.trim().replace("&amp;", "&");
            let resolved = match listing_url.join(&href) {
                Ok(u) => u,
                Err(e) => {
                    tracing::debug!(href = %href, err = %e, "忽略无法解析的链接");
                    return None;
                }
            };
            let path = resolved.path();
            if !path.ends_with(AUDIO_EXTENSION) {
                return None;
            }
            match path.strip_prefix(prefix) {
                Some(id) if !id.is_empty() => Some(Track::new(id)),
                _ => {
                    tracing::debug!(href = %href, prefix, "链接不在当前目录下，跳过");
                    None
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing_url() -> Url {
        Url::parse("http://127.0.0.1:5500/songs/Pop/").expect("url")
    }

    fn ids(tracks: &[Track]) -> Vec<&str> {
        tracks.iter().map(Track::id).collect()
    }

    #[test]
    fn keeps_mp3_anchors_in_listing_order() {
        let html = r#"
            <ul>
              <li><a href="/songs/">../</a></li>
              <li><a href="/songs/Pop/B%20-%20Song2.mp3">B - Song2.mp3</a></li>
              <li><a href="/songs/Pop/cover.jpg">cover.jpg</a></li>
              <li><a href="/songs/Pop/A%20-%20Song1.mp3">A - Song1.mp3</a></li>
            </ul>"#;
        let tracks = parse_listing(html, &listing_url());
        assert_eq!(ids(&tracks), vec!["B%20-%20Song2.mp3", "A%20-%20Song1.mp3"]);
    }

    #[test]
    fn resolves_relative_and_quoted_variants() {
        let html = concat!(
            r#"<a href="A%20-%20Song1.mp3">a</a>"#,
            r#"<A HREF='B%20-%20Song2.mp3'>b</A>"#,
            r#"<a class=x href=C.mp3>c</a>"#,
            r#"<a href="http://127.0.0.1:5500/songs/Pop/D.mp3">d</a>"#,
        );
        let tracks = parse_listing(html, &listing_url());
        assert_eq!(
            ids(&tracks),
            vec!["A%20-%20Song1.mp3", "B%20-%20Song2.mp3", "C.mp3", "D.mp3"]
        );
    }

    #[test]
    fn ignores_query_and_fragment() {
        let html = r#"<a href="A.mp3?download=1">a</a><a href="B.mp3#t=10">b</a><a href="?C=M;O=A">sort</a>"#;
        let tracks = parse_listing(html, &listing_url());
        assert_eq!(ids(&tracks), vec!["A.mp3", "B.mp3"]);
    }

    #[test]
    fn skips_links_outside_folder() {
        let html = r#"<a href="/songs/Rock/X.mp3">x</a><a href="Y.mp3">y</a>"#;
        let tracks = parse_listing(html, &listing_url());
        assert_eq!(ids(&tracks), vec!["Y.mp3"]);
    }

    #[test]
    fn no_matching_anchors_is_empty() {
        let html = r#"<a href="readme.txt">readme</a><a href="song.MP3.bak">bak</a>"#;
        assert!(parse_listing(html, &listing_url()).is_empty());
        assert!(parse_listing("", &listing_url()).is_empty());
    }

    #[test]
    fn normalize_strips_slashes() {
        assert_eq!(normalize_folder("/songs/Pop/").as_deref(), Some("songs/Pop"));
        assert_eq!(normalize_folder("songs/Pop").as_deref(), Some("songs/Pop"));
        assert_eq!(normalize_folder(" / "), None);
        assert_eq!(normalize_folder(""), None);
    }

    #[test]
    fn resource_url_joins_base_folder_and_track() {
        let t = Track::new("A%20-%20Song1.mp3");
        assert_eq!(
            resource_url("http://127.0.0.1:5500/", "songs/Pop", &t),
            "http://127.0.0.1:5500/songs/Pop/A%20-%20Song1.mp3"
        );
    }
}
