//! Status enums for domain entities.
//!
//! Stored as lowercase text in PostgreSQL; repositories convert via
//! `Display`/`FromStr` rather than database enum types.

use serde::{Deserialize, Serialize};

/// Order lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    #[default]
    Pending,
    Paid,
    Fulfilled,
    Cancelled,
}

impl OrderStatus {
    /// All statuses, in lifecycle order. Used for stats breakdowns.
    pub const ALL: [Self; 4] = [Self::Pending, Self::Paid, Self::Fulfilled, Self::Cancelled];
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Paid => write!(f, "paid"),
            Self::Fulfilled => write!(f, "fulfilled"),
            Self::Cancelled => write!(f, "cancelled"),
        }
    }
}

impl std::str::FromStr for OrderStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "paid" => Ok(Self::Paid),
            "fulfilled" => Ok(Self::Fulfilled),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(format!("invalid order status: {s}")),
        }
    }
}

/// Sales channel an order came in through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OrderChannel {
    /// Rang up at the counter.
    #[default]
    Pos,
    /// Placed through the store website.
    Online,
}

impl std::fmt::Display for OrderChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pos => write!(f, "pos"),
            Self::Online => write!(f, "online"),
        }
    }
}

impl std::str::FromStr for OrderChannel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pos" => Ok(Self::Pos),
            "online" => Ok(Self::Online),
            _ => Err(format!("invalid order channel: {s}")),
        }
    }
}

/// Account role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum UserRole {
    /// A business owner account. The default for every signup.
    #[default]
    Seller,
    /// Internal support role.
    Admin,
}

impl std::fmt::Display for UserRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Seller => write!(f, "seller"),
            Self::Admin => write!(f, "admin"),
        }
    }
}

impl std::str::FromStr for UserRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "seller" => Ok(Self::Seller),
            "admin" => Ok(Self::Admin),
            _ => Err(format!("invalid user role: {s}")),
        }
    }
}

/// Notification category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// A product dropped to or below its low-stock threshold.
    LowStock,
    /// An order was created or changed status.
    Order,
    /// Product announcements and account notices.
    System,
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::LowStock => write!(f, "low_stock"),
            Self::Order => write!(f, "order"),
            Self::System => write!(f, "system"),
        }
    }
}

impl std::str::FromStr for NotificationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "low_stock" => Ok(Self::LowStock),
            "order" => Ok(Self::Order),
            "system" => Ok(Self::System),
            _ => Err(format!("invalid notification kind: {s}")),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_order_status_roundtrip() {
        for status in OrderStatus::ALL {
            let s = status.to_string();
            assert_eq!(OrderStatus::from_str(&s).unwrap(), status);
        }
        assert!(OrderStatus::from_str("shipped").is_err());
    }

    #[test]
    fn test_order_status_serde_snake_case() {
        let json = serde_json::to_string(&OrderStatus::Fulfilled).unwrap();
        assert_eq!(json, "\"fulfilled\"");
    }

    #[test]
    fn test_channel_roundtrip() {
        assert_eq!(OrderChannel::from_str("pos").unwrap(), OrderChannel::Pos);
        assert_eq!(
            OrderChannel::from_str("online").unwrap(),
            OrderChannel::Online
        );
        assert!(OrderChannel::from_str("phone").is_err());
    }

    #[test]
    fn test_notification_kind_roundtrip() {
        for kind in [
            NotificationKind::LowStock,
            NotificationKind::Order,
            NotificationKind::System,
        ] {
            let s = kind.to_string();
            assert_eq!(NotificationKind::from_str(&s).unwrap(), kind);
        }
    }

    #[test]
    fn test_role_default_is_seller() {
        assert_eq!(UserRole::default(), UserRole::Seller);
        assert_eq!(UserRole::Seller.to_string(), "seller");
    }
}
