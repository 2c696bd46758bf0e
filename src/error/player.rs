//! 播放控制相关错误

/// 播放控制错误类型
///
/// 两种错误都不会让 UI 崩溃：core 记录日志后保持上一个有效状态。
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlayerError {
    /// 选中的位置超出当前列表
    #[error("无效的曲目位置: {index}（共 {len} 首）")]
    InvalidTrack { index: usize, len: usize },

    /// 当前没有已加载的曲目
    #[error("当前没有已加载的曲目")]
    NoActiveTrack,
}
