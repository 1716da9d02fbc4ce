use crate::error::ApiError;
use crate::models::Receipt;
use crate::service::ReceiptProcessor;
use axum::{
    body::Bytes,
    extract::{Json, Path, State},
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// 处理小票响应体
#[derive(Debug, Serialize, Deserialize)]
pub struct ProcessResponse {
    pub id: String,
}

/// 积分查询响应体
#[derive(Debug, Serialize, Deserialize)]
pub struct PointsResponse {
    pub points: u64,
}

/// 处理小票：计算积分并返回新ID
///
/// 直接读取原始请求体，不校验 Content-Type。
pub async fn process_receipt(
    State(processor): State<Arc<ReceiptProcessor>>,
    body: Bytes,
) -> Result<Json<ProcessResponse>, ApiError> {
    let receipt: Receipt = serde_json::from_slice(&body).map_err(|e| {
        tracing::warn!("Rejected receipt payload: {}", e);
        ApiError::InvalidPayload(e.to_string())
    })?;

    let id = processor.process(&receipt).map_err(|e| {
        tracing::warn!("Receipt from {:?} not scored: {}", receipt.retailer, e);
        e
    })?;

    Ok(Json(ProcessResponse { id }))
}

/// 按ID查询积分
pub async fn get_points(
    State(processor): State<Arc<ReceiptProcessor>>,
    Path(id): Path<String>,
) -> Result<Json<PointsResponse>, ApiError> {
    let points = processor.points(&id).map_err(|e| {
        tracing::info!("Points lookup miss: {}", id);
        ApiError::from(e)
    })?;

    Ok(Json(PointsResponse { points }))
}
