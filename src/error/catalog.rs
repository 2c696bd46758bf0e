//! 目录列表加载相关错误

use reqwest::StatusCode;

/// 目录列表请求失败
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    /// 网络请求错误
    #[error("请求目录列表失败: {0}")]
    Request(#[from] reqwest::Error),

    /// 服务端返回非成功状态码
    #[error("目录列表返回 HTTP {status}: {url}")]
    Status { url: String, status: StatusCode },

    /// 无法拼出合法的 URL
    #[error("目录 URL 无效: {0}")]
    BadUrl(String),
}

/// 目录加载错误
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// 目录路径为空
    #[error("目录路径为空")]
    EmptyFolder,

    /// 请求失败
    #[error(transparent)]
    Fetch(#[from] FetchError),
}
