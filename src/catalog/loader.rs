use super::listing::{normalize_folder, resource_url};
use crate::core::infra::{RequestKey, RequestTracker};
use crate::domain::model::{PlaylistEntry, Track};
use crate::error::{CatalogError, FetchError};

/// 一次目录加载的凭据，响应回来时凭 req_id 判断是否过期
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    pub req_id: u64,
    pub folder: String,
}

#[derive(Debug)]
pub enum LoadOutcome {
    /// 曲目列表已整体替换
    Replaced { count: usize },
    /// 已有更新的加载在进行，本次响应被丢弃
    Stale,
    /// 请求失败，曲目列表保持不变
    Failed(FetchError),
}

/// 当前目录与曲目列表
///
/// 只有最新一次 `begin_load` 的结果会被应用；每次应用都是整体替换，不合并。
#[derive(Debug)]
pub struct Catalog {
    base_url: String,
    folder: Option<String>,
    tracks: Vec<Track>,
    tracker: RequestTracker<RequestKey>,
}

impl Catalog {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            folder: None,
            tracks: Vec::new(),
            tracker: RequestTracker::new(),
        }
    }

    pub fn folder(&self) -> Option<&str> {
        self.folder.as_deref()
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Track> {
        self.tracks.get(index)
    }

    pub fn position_of(&self, track: &Track) -> Option<usize> {
        self.tracks.iter().position(|t| t == track)
    }

    pub fn is_loading(&self) -> bool {
        self.tracker.is_pending(&RequestKey::FolderListing)
    }

    /// 当前目录下某首曲目的完整地址
    pub fn track_url(&self, index: usize) -> Option<String> {
        let folder = self.folder.as_deref()?;
        let track = self.tracks.get(index)?;
        Some(resource_url(&self.base_url, folder, track))
    }

    pub fn playlist_entries(&self) -> Vec<PlaylistEntry> {
        self.tracks
            .iter()
            .enumerate()
            .map(|(index, t)| PlaylistEntry {
                index,
                label: t.playlist_label(),
            })
            .collect()
    }

    /// 开始加载目录：规范化路径并分配 req_id，之前未返回的加载随之作废。
    pub fn begin_load(&mut self, folder: &str) -> Result<LoadTicket, CatalogError> {
        let folder = normalize_folder(folder).ok_or(CatalogError::EmptyFolder)?;
        let req_id = self.tracker.issue(RequestKey::FolderListing);
        tracing::info!(req_id, folder = %folder, "开始加载目录");
        Ok(LoadTicket { req_id, folder })
    }

    /// 应用一次加载结果
    pub fn finish_load(
        &mut self,
        req_id: u64,
        folder: String,
        result: Result<Vec<Track>, FetchError>,
    ) -> LoadOutcome {
        if !self.tracker.accept(&RequestKey::FolderListing, req_id) {
            tracing::debug!(req_id, folder = %folder, "丢弃过期的目录列表响应");
            return LoadOutcome::Stale;
        }
        match result {
            Ok(tracks) => {
                let count = tracks.len();
                tracing::info!(req_id, folder = %folder, count, "目录加载完成");
                self.tracks = tracks;
                self.folder = Some(folder);
                LoadOutcome::Replaced { count }
            }
            Err(e) => {
                tracing::warn!(req_id, folder = %folder, err = %e, "目录加载失败，保留原列表");
                LoadOutcome::Failed(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tracks(names: &[&str]) -> Vec<Track> {
        names.iter().map(|n| Track::new(*n)).collect()
    }

    fn loaded(names: &[&str]) -> Catalog {
        let mut c = Catalog::new("http://127.0.0.1:5500");
        let t = c.begin_load("songs/Pop").expect("begin");
        c.finish_load(t.req_id, t.folder, Ok(tracks(names)));
        c
    }

    #[test]
    fn load_replaces_list_and_folder() {
        let c = loaded(&["A - Song1.mp3", "B - Song2.mp3"]);
        assert_eq!(c.folder(), Some("songs/Pop"));
        assert_eq!(c.tracks(), tracks(&["A - Song1.mp3", "B - Song2.mp3"]).as_slice());
        assert!(!c.is_loading());
    }

    #[test]
    fn second_load_replaces_instead_of_merging() {
        let mut c = loaded(&["A.mp3", "B.mp3"]);
        let t = c.begin_load("/songs/Rock/").expect("begin");
        assert_eq!(t.folder, "songs/Rock");
        let outcome = c.finish_load(t.req_id, t.folder, Ok(tracks(&["C.mp3"])));
        assert!(matches!(outcome, LoadOutcome::Replaced { count: 1 }));
        assert_eq!(c.tracks(), tracks(&["C.mp3"]).as_slice());
        assert_eq!(c.folder(), Some("songs/Rock"));
    }

    #[test]
    fn empty_folder_is_rejected_without_request() {
        let mut c = Catalog::new("http://127.0.0.1:5500");
        assert!(matches!(c.begin_load(" / "), Err(CatalogError::EmptyFolder)));
        assert!(!c.is_loading());
    }

    #[test]
    fn failed_load_keeps_previous_list() {
        let mut c = loaded(&["A.mp3"]);
        let t = c.begin_load("songs/Jazz").expect("begin");
        let outcome = c.finish_load(
            t.req_id,
            t.folder,
            Err(FetchError::BadUrl("boom".to_owned())),
        );
        assert!(matches!(outcome, LoadOutcome::Failed(_)));
        assert_eq!(c.tracks(), tracks(&["A.mp3"]).as_slice());
        assert_eq!(c.folder(), Some("songs/Pop"));
    }

    #[test]
    fn first_load_failure_leaves_empty_list() {
        let mut c = Catalog::new("http://127.0.0.1:5500");
        let t = c.begin_load("songs/Pop").expect("begin");
        c.finish_load(t.req_id, t.folder, Err(FetchError::BadUrl("x".to_owned())));
        assert!(c.is_empty());
        assert_eq!(c.folder(), None);
    }

    #[test]
    fn stale_response_is_ignored() {
        let mut c = Catalog::new("http://127.0.0.1:5500");
        let slow = c.begin_load("songs/Pop").expect("begin");
        let fast = c.begin_load("songs/Rock").expect("begin");

        let outcome = c.finish_load(fast.req_id, fast.folder, Ok(tracks(&["R.mp3"])));
        assert!(matches!(outcome, LoadOutcome::Replaced { count: 1 }));

        // 慢请求后返回，不能覆盖新列表
        let outcome = c.finish_load(slow.req_id, slow.folder, Ok(tracks(&["P1.mp3", "P2.mp3"])));
        assert!(matches!(outcome, LoadOutcome::Stale));
        assert_eq!(c.tracks(), tracks(&["R.mp3"]).as_slice());
        assert_eq!(c.folder(), Some("songs/Rock"));
    }

    #[test]
    fn empty_listing_is_not_an_error() {
        let mut c = loaded(&["A.mp3"]);
        let t = c.begin_load("songs/Empty").expect("begin");
        let outcome = c.finish_load(t.req_id, t.folder, Ok(Vec::new()));
        assert!(matches!(outcome, LoadOutcome::Replaced { count: 0 }));
        assert!(c.is_empty());
    }

    #[test]
    fn track_url_uses_current_folder() {
        let c = loaded(&["A%20-%20Song1.mp3"]);
        assert_eq!(
            c.track_url(0).as_deref(),
            Some("http://127.0.0.1:5500/songs/Pop/A%20-%20Song1.mp3")
        );
        assert_eq!(c.track_url(1), None);
    }

    #[test]
    fn playlist_entries_carry_positions() {
        let c = loaded(&["A - Song1.mp3", "B - Song2.mp3"]);
        let entries = c.playlist_entries();
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[1].index, 1);
        assert_eq!(entries[1].label.title, "B");
        assert_eq!(entries[1].label.artist, "Song2");
    }
}
