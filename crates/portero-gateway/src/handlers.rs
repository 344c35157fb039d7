// SPDX-FileCopyrightText: 2026 Portero Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the dashboard REST API.
//!
//! All handlers operate on the shared [`OrderStore`], so the chat path and
//! the dashboard see one serialized view of the collection. Guest and
//! manager notifications reuse the same templates as the chat path; their
//! delivery failures are logged, never surfaced as HTTP errors.

use std::str::FromStr;
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use tracing::warn;

use portero_core::messages::{is_channel_address, new_order_summary, status_update_text};
use portero_core::types::{Order, OrderStatus};
use portero_core::{MessageChannel, PorteroError};
use portero_store::{OrderDraft, OrderStore};

/// Shared state for the gateway request handlers.
#[derive(Clone)]
pub struct GatewayState {
    /// The order collection shared with the conversation engine.
    pub orders: Arc<OrderStore>,
    /// Channel for guest/manager notifications; `None` runs headless.
    pub notifier: Option<Arc<dyn MessageChannel>>,
    /// Manager address for new-order notifications.
    pub manager_address: String,
}

impl GatewayState {
    /// Sends a notification, logging failure instead of propagating it.
    async fn notify(&self, address: &str, text: &str) {
        if let Some(ref channel) = self.notifier {
            if let Err(e) = channel.send_text(address, text).await {
                warn!(error = %e, address = %address, "dashboard notification failed");
            }
        }
    }
}

/// JSON error body returned by every failing handler.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Error half of a handler result: a status code plus a JSON body.
pub type ApiError = (StatusCode, Json<ErrorResponse>);

fn bad_request(message: impl Into<String>) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: message.into(),
        }),
    )
}

fn map_store_error(err: PorteroError) -> ApiError {
    match err {
        PorteroError::OrderNotFound { .. } => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "Order not found.".to_string(),
            }),
        ),
        other => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: other.to_string(),
            }),
        ),
    }
}

/// Request body for POST /api/orders.
#[derive(Debug, Deserialize)]
pub struct CreateOrderRequest {
    pub room: String,
    pub items: Vec<String>,
    /// Guest channel address, when the dashboard knows one.
    #[serde(default, alias = "guestNumber")]
    pub guest_address: Option<String>,
}

/// Response body for POST /api/orders.
#[derive(Debug, Serialize)]
pub struct CreateOrderResponse {
    pub success: bool,
    pub order: Order,
}

/// Response body for mutations without a payload.
#[derive(Debug, Serialize)]
pub struct AckResponse {
    pub success: bool,
    pub message: String,
}

/// Request body for POST /api/orders/{id}/status.
#[derive(Debug, Deserialize)]
pub struct StatusUpdateRequest {
    pub status: String,
}

/// POST /api/orders -- create an order from the dashboard.
pub async fn create_order(
    State(state): State<GatewayState>,
    Json(body): Json<CreateOrderRequest>,
) -> Result<(StatusCode, Json<CreateOrderResponse>), ApiError> {
    let room = body.room.trim().to_string();
    if room.is_empty() {
        return Err(bad_request("Room is required and must be a non-empty string."));
    }

    let items: Vec<String> = body
        .items
        .iter()
        .map(|i| i.trim().to_string())
        .filter(|i| !i.is_empty())
        .collect();
    if items.is_empty() {
        return Err(bad_request("Items must be a non-empty array."));
    }

    let guest_address = body
        .guest_address
        .map(|g| g.trim().to_string())
        .filter(|g| !g.is_empty());

    let order = state
        .orders
        .append(OrderDraft {
            room,
            items,
            guest_address,
        })
        .await
        .map_err(map_store_error)?;

    state
        .notify(&state.manager_address, &new_order_summary(&order))
        .await;

    Ok((StatusCode::CREATED, Json(CreateOrderResponse { success: true, order })))
}

/// GET /api/orders -- list the full collection.
pub async fn list_orders(
    State(state): State<GatewayState>,
) -> Result<Json<Vec<Order>>, ApiError> {
    let orders = state.orders.list().await.map_err(map_store_error)?;
    Ok(Json(orders))
}

/// POST /api/orders/{id}/status -- transition an order's status.
pub async fn update_status(
    State(state): State<GatewayState>,
    Path(id): Path<i64>,
    Json(body): Json<StatusUpdateRequest>,
) -> Result<Json<AckResponse>, ApiError> {
    let status = OrderStatus::from_str(&body.status)
        .map_err(|_| bad_request("Invalid status value."))?;

    let order = state
        .orders
        .update_status(id, status)
        .await
        .map_err(map_store_error)?;

    if is_channel_address(order.guest_address.as_deref())
        && let (Some(address), Some(text)) =
            (order.guest_address.as_deref(), status_update_text(status, id))
    {
        state.notify(address, &text).await;
    }

    Ok(Json(AckResponse {
        success: true,
        message: format!("Order {id} marked as {status}."),
    }))
}

/// DELETE /api/orders/{id} -- delete one order.
pub async fn delete_order(
    State(state): State<GatewayState>,
    Path(id): Path<i64>,
) -> Result<Json<AckResponse>, ApiError> {
    state.orders.delete(id).await.map_err(map_store_error)?;
    Ok(Json(AckResponse {
        success: true,
        message: format!("Order {id} deleted."),
    }))
}

/// DELETE /api/orders/done -- purge every Done order.
pub async fn purge_done(
    State(state): State<GatewayState>,
) -> Result<Json<AckResponse>, ApiError> {
    let removed = state.orders.purge_done().await.map_err(map_store_error)?;
    Ok(Json(AckResponse {
        success: true,
        message: format!("Removed {removed} done orders."),
    }))
}

/// Query parameters for DELETE /api/orders.
#[derive(Debug, Deserialize)]
pub struct PurgeQuery {
    pub status: Option<String>,
}

/// DELETE /api/orders?status=<status> -- bulk purge by status.
pub async fn purge_by_status(
    State(state): State<GatewayState>,
    Query(query): Query<PurgeQuery>,
) -> Result<Json<AckResponse>, ApiError> {
    let Some(token) = query.status else {
        return Err(bad_request("A status query parameter is required."));
    };
    let status =
        OrderStatus::from_str(&token).map_err(|_| bad_request("Invalid status value."))?;

    let removed = state
        .orders
        .purge_status(status)
        .await
        .map_err(map_store_error)?;
    Ok(Json(AckResponse {
        success: true,
        message: format!("Removed {removed} {status} orders."),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use portero_store::JsonFileRepository;
    use portero_test_utils::MockChannel;
    use tempfile::TempDir;

    const MANAGER: &str = "manager@c.us";
    const GUEST: &str = "guest-1@c.us";

    struct Fixture {
        state: GatewayState,
        channel: Arc<MockChannel>,
        _dir: TempDir,
    }

    fn fixture() -> Fixture {
        let dir = tempfile::tempdir().unwrap();
        let orders = Arc::new(OrderStore::new(Arc::new(JsonFileRepository::new(
            dir.path().join("orders.json"),
        ))));
        let channel = Arc::new(MockChannel::new());
        let state = GatewayState {
            orders,
            notifier: Some(channel.clone()),
            manager_address: MANAGER.to_string(),
        };
        Fixture {
            state,
            channel,
            _dir: dir,
        }
    }

    fn create_body(room: &str, items: &[&str]) -> CreateOrderRequest {
        CreateOrderRequest {
            room: room.to_string(),
            items: items.iter().map(|s| s.to_string()).collect(),
            guest_address: Some(GUEST.to_string()),
        }
    }

    #[tokio::test]
    async fn create_order_persists_and_notifies_manager() {
        let f = fixture();
        let (status, Json(resp)) = create_order(
            State(f.state.clone()),
            Json(create_body("512", &["Club Sandwich x1 - ₹450"])),
        )
        .await
        .unwrap();

        assert_eq!(status, StatusCode::CREATED);
        assert!(resp.success);
        assert_eq!(resp.order.room, "512");
        assert_eq!(resp.order.status, OrderStatus::Pending);

        let listed = f.state.orders.list().await.unwrap();
        assert_eq!(listed, vec![resp.order]);

        let notified = f.channel.texts_to(MANAGER).await;
        assert!(notified[0].contains("NEW ORDER"));
        assert!(notified[0].contains("Club Sandwich x1 - ₹450"));
    }

    #[tokio::test]
    async fn create_order_validates_room_and_items() {
        let f = fixture();

        let err = create_order(State(f.state.clone()), Json(create_body("  ", &["x"])))
            .await
            .unwrap_err();
        assert_eq!(err.0, StatusCode::BAD_REQUEST);

        let err = create_order(State(f.state.clone()), Json(create_body("512", &[])))
            .await
            .unwrap_err();
        assert_eq!(err.0, StatusCode::BAD_REQUEST);

        // Whitespace-only items collapse to an empty list.
        let err = create_order(State(f.state.clone()), Json(create_body("512", &["  "])))
            .await
            .unwrap_err();
        assert_eq!(err.0, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn update_status_transitions_and_notifies_guest() {
        let f = fixture();
        let (_, Json(created)) = create_order(
            State(f.state.clone()),
            Json(create_body("512", &["Club Sandwich x1 - ₹450"])),
        )
        .await
        .unwrap();
        f.channel.clear_sent().await;

        let Json(ack) = update_status(
            State(f.state.clone()),
            Path(created.order.id),
            Json(StatusUpdateRequest {
                status: "Rejected".to_string(),
            }),
        )
        .await
        .unwrap();
        assert!(ack.success);

        let listed = f.state.orders.list().await.unwrap();
        assert_eq!(listed[0].status, OrderStatus::Rejected);

        let guest_texts = f.channel.texts_to(GUEST).await;
        assert!(guest_texts[0].contains("rejected"));
    }

    #[tokio::test]
    async fn update_status_rejects_unknown_token() {
        let f = fixture();
        let err = update_status(
            State(f.state.clone()),
            Path(1),
            Json(StatusUpdateRequest {
                status: "Vanished".to_string(),
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.0, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn update_status_unknown_id_is_404() {
        let f = fixture();
        let err = update_status(
            State(f.state.clone()),
            Path(999),
            Json(StatusUpdateRequest {
                status: "Done".to_string(),
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.0, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn non_channel_guest_address_skips_notification() {
        let f = fixture();
        let (_, Json(created)) = create_order(
            State(f.state.clone()),
            Json(CreateOrderRequest {
                room: "512".to_string(),
                items: vec!["Club Sandwich x1 - ₹450".to_string()],
                guest_address: Some("walk-in guest".to_string()),
            }),
        )
        .await
        .unwrap();
        f.channel.clear_sent().await;

        update_status(
            State(f.state.clone()),
            Path(created.order.id),
            Json(StatusUpdateRequest {
                status: "Confirmed".to_string(),
            }),
        )
        .await
        .unwrap();

        assert!(f.channel.sent_texts().await.is_empty());
    }

    #[tokio::test]
    async fn delete_and_purge_work_through_handlers() {
        let f = fixture();
        let (_, Json(first)) = create_order(
            State(f.state.clone()),
            Json(create_body("101", &["Club Sandwich x1 - ₹450"])),
        )
        .await
        .unwrap();
        let (_, Json(second)) = create_order(
            State(f.state.clone()),
            Json(create_body("102", &["Chicken Burger x1 - ₹550"])),
        )
        .await
        .unwrap();

        // Delete the first outright.
        delete_order(State(f.state.clone()), Path(first.order.id))
            .await
            .unwrap();
        let err = delete_order(State(f.state.clone()), Path(first.order.id))
            .await
            .unwrap_err();
        assert_eq!(err.0, StatusCode::NOT_FOUND);

        // Mark the second Done, then purge.
        update_status(
            State(f.state.clone()),
            Path(second.order.id),
            Json(StatusUpdateRequest {
                status: "Done".to_string(),
            }),
        )
        .await
        .unwrap();
        let Json(ack) = purge_done(State(f.state.clone())).await.unwrap();
        assert!(ack.message.contains("Removed 1"));

        let Json(listed) = list_orders(State(f.state.clone())).await.unwrap();
        assert!(listed.is_empty());
    }

    #[tokio::test]
    async fn purge_by_status_requires_a_valid_status() {
        let f = fixture();
        let err = purge_by_status(
            State(f.state.clone()),
            Query(PurgeQuery { status: None }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.0, StatusCode::BAD_REQUEST);

        let err = purge_by_status(
            State(f.state.clone()),
            Query(PurgeQuery {
                status: Some("Gone".to_string()),
            }),
        )
        .await
        .unwrap_err();
        assert_eq!(err.0, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn purge_by_status_removes_matching_orders() {
        let f = fixture();
        let (_, Json(created)) = create_order(
            State(f.state.clone()),
            Json(create_body("512", &["Club Sandwich x1 - ₹450"])),
        )
        .await
        .unwrap();
        update_status(
            State(f.state.clone()),
            Path(created.order.id),
            Json(StatusUpdateRequest {
                status: "Done".to_string(),
            }),
        )
        .await
        .unwrap();

        let Json(ack) = purge_by_status(
            State(f.state.clone()),
            Query(PurgeQuery {
                status: Some("Done".to_string()),
            }),
        )
        .await
        .unwrap();
        assert!(ack.message.contains("Removed 1"));
        assert!(f.state.orders.list().await.unwrap().is_empty());
    }

    #[test]
    fn create_request_accepts_legacy_guest_number_key() {
        let json = r#"{"room": "512", "items": ["x"], "guestNumber": "guest-1@c.us"}"#;
        let req: CreateOrderRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.guest_address.as_deref(), Some("guest-1@c.us"));
    }

    #[test]
    fn error_response_serializes() {
        let resp = ErrorResponse {
            error: "something went wrong".to_string(),
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("something went wrong"));
    }
}
