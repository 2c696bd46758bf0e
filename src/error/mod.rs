//! 统一错误处理模块
//!
//! 各模块的结构化错误类型都在这里定义，core 在操作边界统一捕获并记录。

mod app;
mod audio;
mod catalog;
mod player;

pub use app::AppError;
pub use audio::AudioError;
pub use catalog::{CatalogError, FetchError};
pub use player::PlayerError;
