use axum::{
    routing::{get, patch, post, put},
    Router,
};

use crate::server::{
    controller::{
        channel::{
            add_allowed_role, add_allowed_user, check_channel_access, create_channel,
            delete_channel, get_channel, get_channel_messages, get_channels, get_pinned_messages,
            remove_allowed_role, remove_allowed_user, update_channel, update_channel_settings,
        },
        event::{
            create_event, delete_event, get_event, get_upcoming_events, join_event, leave_event,
            update_event, update_event_status,
        },
        message::{
            add_reaction, delete_message, get_message, pin_message, remove_reaction,
            search_messages, unpin_message, update_message,
        },
        role::{
            add_role_permission, create_role, delete_role, get_role, get_roles,
            remove_role_permission, update_role,
        },
        stats::get_stats,
        user::{
            activate_user, assign_user_role, check_user_permission, deactivate_user, get_me,
            get_user_events, get_user_roles, remove_user_role,
        },
    },
    state::AppState,
};

/// Builds the dashboard API router. Every route authenticates through `AuthGuard`.
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/api/roles", get(get_roles).post(create_role))
        .route(
            "/api/roles/{id}",
            get(get_role).patch(update_role).delete(delete_role),
        )
        .route(
            "/api/roles/{id}/permissions/{permission}",
            post(add_role_permission).delete(remove_role_permission),
        )
        .route("/api/users/me", get(get_me))
        .route("/api/users/{id}/roles", get(get_user_roles))
        .route(
            "/api/users/{id}/roles/{role_id}",
            post(assign_user_role).delete(remove_user_role),
        )
        .route(
            "/api/users/{id}/permissions/{permission}",
            get(check_user_permission),
        )
        .route("/api/users/{id}/events", get(get_user_events))
        .route("/api/users/{id}/deactivate", post(deactivate_user))
        .route("/api/users/{id}/activate", post(activate_user))
        .route("/api/channels", get(get_channels).post(create_channel))
        .route(
            "/api/channels/{id}",
            get(get_channel).patch(update_channel).delete(delete_channel),
        )
        .route(
            "/api/channels/{id}/settings",
            patch(update_channel_settings),
        )
        .route(
            "/api/channels/{id}/allowed-roles/{role_id}",
            post(add_allowed_role).delete(remove_allowed_role),
        )
        .route(
            "/api/channels/{id}/allowed-users/{user_id}",
            post(add_allowed_user).delete(remove_allowed_user),
        )
        .route("/api/channels/{id}/access", get(check_channel_access))
        .route("/api/channels/{id}/messages", get(get_channel_messages))
        .route("/api/channels/{id}/pins", get(get_pinned_messages))
        .route("/api/events", post(create_event))
        .route("/api/events/upcoming", get(get_upcoming_events))
        .route(
            "/api/events/{id}",
            get(get_event).patch(update_event).delete(delete_event),
        )
        .route("/api/events/{id}/status", put(update_event_status))
        .route(
            "/api/events/{id}/participants",
            post(join_event).delete(leave_event),
        )
        .route("/api/messages/search", get(search_messages))
        .route(
            "/api/messages/{id}",
            get(get_message).patch(update_message).delete(delete_message),
        )
        .route(
            "/api/messages/{id}/reactions/{emoji}",
            post(add_reaction).delete(remove_reaction),
        )
        .route(
            "/api/messages/{id}/pin",
            put(pin_message).delete(unpin_message),
        )
        .route("/api/stats", get(get_stats))
}
