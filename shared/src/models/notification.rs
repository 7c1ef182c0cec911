//! In-app notifications
//!
//! The list lives in memory for the length of a session: read flags are
//! flipped in place, nothing is deleted and nothing is persisted.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Notification category
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    Advisory,
    Price,
    Disease,
}

/// A dashboard notification; title and description are catalog keys
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: String,
    pub title: String,
    pub description: String,
    pub timestamp: DateTime<Utc>,
    pub is_read: bool,
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
}

fn seeded_at(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
    NaiveDate::from_ymd_opt(year, month, day)
        .and_then(|date| date.and_hms_opt(hour, minute, 0))
        .map(|naive| naive.and_utc())
        .unwrap_or_default()
}

/// Notifications every session starts with
pub fn default_notifications() -> Vec<Notification> {
    vec![
        Notification {
            id: "1".to_string(),
            title: "weather.advisory".to_string(),
            description: "weather.advisoryText".to_string(),
            timestamp: seeded_at(2024, 7, 23, 9, 30),
            is_read: false,
            notification_type: NotificationType::Advisory,
        },
        Notification {
            id: "2".to_string(),
            title: "notifications.priceAlert.title".to_string(),
            description: "notifications.priceAlert.description".to_string(),
            timestamp: seeded_at(2024, 7, 23, 8, 0),
            is_read: false,
            notification_type: NotificationType::Price,
        },
        Notification {
            id: "3".to_string(),
            title: "notifications.diseaseDetected.title".to_string(),
            description: "notifications.diseaseDetected.description".to_string(),
            timestamp: seeded_at(2024, 7, 22, 10, 0),
            is_read: true,
            notification_type: NotificationType::Disease,
        },
    ]
}

/// Ordered notification list; display order is list order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NotificationCenter {
    notifications: Vec<Notification>,
}

impl NotificationCenter {
    pub fn new(notifications: Vec<Notification>) -> Self {
        Self { notifications }
    }

    /// Center seeded with [`default_notifications`]
    pub fn with_defaults() -> Self {
        Self::new(default_notifications())
    }

    pub fn notifications(&self) -> &[Notification] {
        &self.notifications
    }

    pub fn len(&self) -> usize {
        self.notifications.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notifications.is_empty()
    }

    pub fn unread_count(&self) -> usize {
        self.notifications.iter().filter(|n| !n.is_read).count()
    }

    /// Mark one notification read; returns false when the id is unknown
    pub fn mark_read(&mut self, id: &str) -> bool {
        match self.notifications.iter_mut().find(|n| n.id == id) {
            Some(notification) => {
                notification.is_read = true;
                true
            }
            None => false,
        }
    }

    pub fn mark_all_read(&mut self) {
        for notification in &mut self.notifications {
            notification.is_read = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let center = NotificationCenter::with_defaults();
        assert_eq!(center.len(), 3);
        assert_eq!(center.unread_count(), 2);
        assert_eq!(center.notifications()[0].id, "1");
    }

    #[test]
    fn test_mark_read_changes_exactly_one() {
        let mut center = NotificationCenter::with_defaults();
        let before = center.clone();

        assert!(center.mark_read("2"));

        let changed: Vec<_> = before
            .notifications()
            .iter()
            .zip(center.notifications())
            .filter(|(a, b)| a != b)
            .collect();
        assert_eq!(changed.len(), 1);
        assert_eq!(changed[0].1.id, "2");
        assert!(changed[0].1.is_read);
    }

    #[test]
    fn test_mark_read_unknown_id() {
        let mut center = NotificationCenter::with_defaults();
        assert!(!center.mark_read("42"));
        assert_eq!(center, NotificationCenter::with_defaults());
    }

    #[test]
    fn test_mark_all_read() {
        let mut center = NotificationCenter::with_defaults();
        center.mark_all_read();
        assert_eq!(center.len(), 3);
        assert!(center.notifications().iter().all(|n| n.is_read));
        assert_eq!(center.unread_count(), 0);
    }

    #[test]
    fn test_wire_format() {
        let value = serde_json::to_value(&default_notifications()[1]).unwrap();
        assert_eq!(value["type"], "price");
        assert_eq!(value["isRead"], false);
        assert_eq!(value["timestamp"], "2024-07-23T08:00:00Z");
    }
}
