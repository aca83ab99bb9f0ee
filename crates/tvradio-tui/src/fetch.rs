//! Station page loader. Runs off the input loop and reports back through
//! the app channel, the way a network-backed directory would.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{debug, warn};

use tvradio_core::catalog::{Catalog, StationFilter};

use crate::action::Action;
use crate::app::AppMessage;

#[derive(Debug, Clone, PartialEq)]
pub struct PageRequest {
    pub generation: u64,
    pub filter: StationFilter,
    pub page: usize,
    pub page_size: usize,
}

pub fn spawn_page_fetch(
    catalog: Arc<Catalog>,
    request: PageRequest,
    latency: Duration,
    tx: mpsc::Sender<AppMessage>,
) {
    tokio::spawn(async move {
        tokio::time::sleep(latency).await;
        let page = catalog.page(&request.filter, request.page, request.page_size);
        debug!(
            "[fetch] page {} → {} stations (more: {})",
            page.page,
            page.stations.len(),
            page.has_more
        );
        let msg = AppMessage::Action(Action::PageLoaded {
            generation: request.generation,
            page,
        });
        if tx.send(msg).await.is_err() {
            warn!("[fetch] app closed before page {} arrived", request.page);
        }
    });
}
