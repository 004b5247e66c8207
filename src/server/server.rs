use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::Value;
use thiserror::Error;
use tokio::{net::TcpListener, signal};
use tracing::{error, info};

use crate::protocol::{ConfirmationReceipt, ConfirmationRequest};
use crate::server::state::GuestStore;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Confirmation has no entries")]
    EmptyConfirmation,
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let status = match self {
            ServerError::EmptyConfirmation => StatusCode::BAD_REQUEST,
        };

        (status, self.to_string()).into_response()
    }
}

pub fn router(store: Arc<GuestStore>) -> Router {
    Router::new()
        .route("/guests", get(guests_handler))
        .route("/confirm", post(confirm_handler))
        .with_state(store)
}

async fn guests_handler(State(store): State<Arc<GuestStore>>) -> Json<Vec<Value>> {
    Json(store.snapshot().await)
}

async fn confirm_handler(
    State(store): State<Arc<GuestStore>>,
    Json(request): Json<ConfirmationRequest>,
) -> Result<Json<ConfirmationReceipt>, ServerError> {
    if request.info.is_empty() {
        return Err(ServerError::EmptyConfirmation);
    }

    let updated = store.apply(&request).await;
    info!("Recorded {updated} of {} confirmation entries", request.info.len());

    Ok(Json(ConfirmationReceipt { updated }))
}

/// Serves the stand-in backend on `listener` until Ctrl+C or SIGTERM.
pub async fn serve(listener: TcpListener, store: Arc<GuestStore>) -> std::io::Result<()> {
    if let Ok(address) = listener.local_addr() {
        info!("Guest server running on {address}");
    }

    axum::serve(listener, router(store))
        .with_graceful_shutdown(shutdown_signal())
        .await
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                error!("Failed to install Ctrl+C handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!("Failed to install signal handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
