use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "dirplay",
    version,
    about = "HTTP 目录列表音乐播放器（Rust + ratatui）"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// 覆盖曲库地址（默认取 settings.json 的 base_url）
    #[arg(long, env = "DIRPLAY_BASE_URL")]
    pub base_url: Option<String>,

    /// 覆盖启动时加载的目录
    #[arg(long)]
    pub folder: Option<String>,

    /// 覆盖数据目录（默认走系统 data_local_dir）
    #[arg(long, env = "DIRPLAY_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// 覆盖日志目录（默认 `{data_dir}/logs`）
    #[arg(long, env = "DIRPLAY_LOG_DIR")]
    pub log_dir: Option<PathBuf>,

    /// 覆盖日志过滤（等价于设置 RUST_LOG）
    #[arg(long, env = "RUST_LOG")]
    pub log_filter: Option<String>,

    /// 不打开音频设备，只走播放流程
    #[arg(long, env = "DIRPLAY_NO_AUDIO")]
    pub no_audio: bool,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// 运行 TUI（默认）
    Tui,

    /// 无交互快速自测：打印一个目录解析出的曲目
    List { folder: String },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_list_subcommand() {
        let cli = Cli::try_parse_from([
            "dirplay",
            "--base-url",
            "http://music.lan",
            "list",
            "songs/Rock",
        ])
        .expect("parse");
        assert_eq!(cli.base_url.as_deref(), Some("http://music.lan"));
        assert!(matches!(cli.command, Some(Command::List { folder }) if folder == "songs/Rock"));
    }

    #[test]
    fn defaults_to_no_subcommand() {
        let cli = Cli::try_parse_from(["dirplay", "--folder", "/songs/Jazz/"]).expect("parse");
        assert!(cli.command.is_none());
        assert_eq!(cli.folder.as_deref(), Some("/songs/Jazz/"));
    }
}
