use log::debug;
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::actions::{Request, Response};
use crate::api::PlaylistClient;

/// Run playlist requests in the background. Each request gets its own task so a
/// slow one never holds up a newer submit; superseded ones still run to completion.
pub fn spawn_worker(
    client: PlaylistClient,
    mut req_rx: mpsc::Receiver<Request>,
    resp_tx: mpsc::Sender<Response>,
) -> JoinHandle<()> {
    let client = Arc::new(client);

    tokio::spawn(async move {
        while let Some(request) = req_rx.recv().await {
            match request {
                Request::GeneratePlaylist { generation, query } => {
                    let client = Arc::clone(&client);
                    let resp_tx = resp_tx.clone();
                    tokio::spawn(async move {
                        let result = client.generate_playlist(&query).await;
                        if resp_tx
                            .send(Response::PlaylistGenerated { generation, result })
                            .await
                            .is_err()
                        {
                            debug!("Controller gone, dropping response #{}", generation);
                        }
                    });
                }
            }
        }
        debug!("Request channel closed, worker exiting");
    })
}
