use tokio::sync::mpsc;

use super::ListingClient;
use crate::domain::model::Track;
use crate::error::FetchError;

#[derive(Debug)]
pub enum ListingCommand {
    FetchFolder { req_id: u64, folder: String },
}

#[derive(Debug)]
pub enum ListingEvent {
    Folder {
        req_id: u64,
        folder: String,
        result: Result<Vec<Track>, FetchError>,
    },
}

/// 每个请求单独起任务，慢请求不会挡住后发的请求；
/// 过期响应由 core 的 RequestTracker 丢弃。
pub fn spawn_listing_actor(
    client: ListingClient,
) -> (mpsc::Sender<ListingCommand>, mpsc::Receiver<ListingEvent>) {
    let (tx_cmd, mut rx_cmd) = mpsc::channel::<ListingCommand>(16);
    let (tx_evt, rx_evt) = mpsc::channel::<ListingEvent>(16);

    tokio::spawn(async move {
        tracing::info!(base_url = client.base_url(), "ListingActor 已启动");
        while let Some(cmd) = rx_cmd.recv().await {
            match cmd {
                ListingCommand::FetchFolder { req_id, folder } => {
                    let client = client.clone();
                    let tx_evt = tx_evt.clone();
                    tokio::spawn(async move {
                        let result = client.fetch_listing(&folder).await;
                        if let Err(e) = &result {
                            tracing::warn!(req_id, folder = %folder, err = %e, "目录列表请求失败");
                        }
                        let _ = tx_evt
                            .send(ListingEvent::Folder {
                                req_id,
                                folder,
                                result,
                            })
                            .await;
                    });
                }
            }
        }
        tracing::debug!("ListingActor 退出");
    });

    (tx_cmd, rx_evt)
}
