//! HTTP handlers for the notification list

use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::Serialize;
use shared::i18n::LocaleContext;
use shared::{NotificationCenter, NotificationType};

use super::{AppQuery, LangQuery};
use crate::error::AppResult;
use crate::AppState;

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationView {
    pub id: String,
    pub title: String,
    pub description: String,
    pub timestamp: DateTime<Utc>,
    /// "5 minutes ago" style label
    pub time_ago: String,
    pub is_read: bool,
    #[serde(rename = "type")]
    pub notification_type: NotificationType,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationListView {
    pub unread_count: usize,
    pub notifications: Vec<NotificationView>,
}

/// Seed notifications, localized. Read state is kept by the client.
pub async fn list_notifications(
    State(state): State<AppState>,
    AppQuery(query): AppQuery<LangQuery>,
) -> AppResult<Json<NotificationListView>> {
    let ctx = LocaleContext::with_language(query.language()?);
    let center = NotificationCenter::with_defaults();
    let now = Utc::now();

    let notifications = center
        .notifications()
        .iter()
        .map(|n| NotificationView {
            id: n.id.clone(),
            title: state.catalogs.t(&ctx, &n.title),
            description: state.catalogs.t(&ctx, &n.description),
            timestamp: n.timestamp,
            time_ago: state.catalogs.relative_time(&ctx, n.timestamp, now),
            is_read: n.is_read,
            notification_type: n.notification_type,
        })
        .collect();

    Ok(Json(NotificationListView {
        unread_count: center.unread_count(),
        notifications,
    }))
}
