use clap::Parser;
use dirplay::app::AppSnapshot;
use dirplay::audio_worker::AudioBackend;
use dirplay::catalog::{ListingClient, normalize_folder};
use dirplay::error::{AppError, CatalogError};
use dirplay::settings::{default_data_dir, load_settings};
use dirplay::ui::{Cli, Command, run_tui};
use dirplay::{core, logging};

#[tokio::main]
async fn main() -> Result<(), AppError> {
    let cli = Cli::parse();

    let data_dir = cli.data_dir.clone().unwrap_or_else(default_data_dir);
    let audio_backend = if cli.no_audio {
        AudioBackend::Null
    } else {
        AudioBackend::Real
    };

    let _log_guard = logging::init(
        &data_dir,
        logging::LogConfig {
            dir: cli.log_dir.clone(),
            filter: cli.log_filter.clone(),
        },
    );
    tracing::info!(data_dir = %data_dir.display(), "dirplay 启动");

    let mut settings = load_settings(&data_dir);
    if let Some(v) = cli.base_url.clone() {
        settings.base_url = v;
    }
    if let Some(v) = cli.folder.clone() {
        settings.start_folder = v;
    }

    match cli.command.unwrap_or(Command::Tui) {
        Command::Tui => {
            let initial = AppSnapshot::initial(settings.folders.clone());
            let (tx, rx) = core::spawn_app_actor(settings, data_dir, audio_backend)?;
            run_tui(initial, tx, rx).await?;
            Ok(())
        }
        Command::List { folder } => {
            tracing::info!(folder = %folder, "启动模式: List");
            let folder = normalize_folder(&folder).ok_or(CatalogError::EmptyFolder)?;
            let client = ListingClient::new(&settings.listing_config()).map_err(CatalogError::from)?;
            let tracks = client
                .fetch_listing(&folder)
                .await
                .map_err(CatalogError::from)?;
            println!("{} 共 {} 首:", folder, tracks.len());
            for (i, track) in tracks.iter().enumerate() {
                let label = track.playlist_label();
                println!("{:>3}. {} | {}", i + 1, label.title, label.artist);
            }
            Ok(())
        }
    }
}
