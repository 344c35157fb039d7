// SPDX-FileCopyrightText: 2026 Portero Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Notification templates shared by the chat command path and the dashboard.
//!
//! Both paths persist a status change first and then notify, so the wording
//! lives in one place rather than drifting between the two.

use crate::types::{Order, OrderStatus};

/// Renders the manager notification for a newly placed order.
pub fn new_order_summary(order: &Order) -> String {
    format!(
        "📢 NEW ORDER\n#{}\n🏨 Room: {}\n🍽 Items:\n{}",
        order.id,
        order.room,
        order.items.join("\n")
    )
}

/// Renders the guest-facing message for a status change, if the status has
/// guest-visible wording.
///
/// `Pending` has none: it is the initial state and the guest already received
/// the placement confirmation.
pub fn status_update_text(status: OrderStatus, id: i64) -> Option<String> {
    match status {
        OrderStatus::Pending => None,
        OrderStatus::Confirmed => Some(format!(
            "✅ Your order #{id} has been confirmed and is now being prepared. Please wait."
        )),
        OrderStatus::Done => Some(format!(
            "✅ Your order #{id} has been completed. Thank you for staying with us!"
        )),
        OrderStatus::Rejected => Some(format!(
            "❌ Your order #{id} was rejected by the manager. Please contact reception for help."
        )),
    }
}

/// Whether an order's guest address looks like a routable channel identifier.
///
/// Dashboard-created orders may carry no address or a free-text note in the
/// field; those silently skip guest notification.
pub fn is_channel_address(address: Option<&str>) -> bool {
    match address {
        Some(addr) => addr.contains('@') && !addr.trim().is_empty(),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order() -> Order {
        Order {
            id: 42,
            room: "512".to_string(),
            items: vec![
                "Pancakes with Maple Syrup x2 - ₹900".to_string(),
                "Club Sandwich x1 - ₹450".to_string(),
            ],
            guest_address: Some("guest-1@c.us".to_string()),
            status: OrderStatus::Pending,
            created_at: "2026-01-01T12:00:00Z".to_string(),
        }
    }

    #[test]
    fn new_order_summary_lists_every_item() {
        let text = new_order_summary(&order());
        assert!(text.contains("#42"));
        assert!(text.contains("Room: 512"));
        assert!(text.contains("Pancakes with Maple Syrup x2 - ₹900"));
        assert!(text.contains("Club Sandwich x1 - ₹450"));
    }

    #[test]
    fn each_status_has_distinct_wording() {
        let confirmed = status_update_text(OrderStatus::Confirmed, 1).unwrap();
        let done = status_update_text(OrderStatus::Done, 1).unwrap();
        let rejected = status_update_text(OrderStatus::Rejected, 1).unwrap();

        assert!(confirmed.contains("confirmed"));
        assert!(done.contains("completed"));
        assert!(rejected.contains("rejected"));
        assert_ne!(confirmed, done);
        assert_ne!(done, rejected);
    }

    #[test]
    fn pending_has_no_guest_notification() {
        assert!(status_update_text(OrderStatus::Pending, 1).is_none());
    }

    #[test]
    fn channel_address_detection() {
        assert!(is_channel_address(Some("guest-1@c.us")));
        assert!(!is_channel_address(Some("walk-in guest")));
        assert!(!is_channel_address(None));
    }
}
