pub mod handlers;

pub use handlers::*;

use crate::service::ReceiptProcessor;
use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

/// 构建路由
pub fn router(processor: Arc<ReceiptProcessor>) -> Router {
    Router::new()
        .route("/receipts/process", post(process_receipt))
        .route("/receipts/:id/points", get(get_points))
        .with_state(processor)
}
