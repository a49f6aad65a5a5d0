mod cors;

use axum::Router;
use axum::routing::{get, patch, post, put};
use opsdesk_core::AppError;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::handlers::records::{
    AccessRights, Managers, Positions, Promotions, Resource, Tags, Tickets, Transactions,
    WithdrawalRules,
};
use crate::state::AppState;

pub fn build_router(app_state: AppState, frontend_url: &str) -> Result<Router, AppError> {
    let ticket_routes = Router::new()
        .route(
            "/api/tickets/summary",
            get(handlers::tickets::ticket_summary_handler),
        )
        .route(
            "/api/tickets/{id}/status",
            patch(handlers::tickets::update_ticket_status_handler),
        )
        .route(
            "/api/tickets/{id}/messages",
            get(handlers::tickets::list_ticket_messages_handler)
                .post(handlers::tickets::post_ticket_message_handler),
        )
        .route(
            "/api/tickets/{id}/read",
            post(handlers::tickets::mark_ticket_read_handler),
        )
        .route(
            "/api/tickets/{id}/tags",
            put(handlers::tickets::assign_ticket_tags_handler),
        );

    let position_routes = Router::new().route(
        "/api/positions/{id}/close",
        post(handlers::positions::close_position_handler),
    );

    let mut router = Router::new()
        .route("/health", get(handlers::health::health_handler))
        .merge(ticket_routes)
        .merge(position_routes);
    router = resource_routes::<AccessRights>(router);
    router = resource_routes::<Managers>(router);
    router = resource_routes::<Tags>(router);
    router = resource_routes::<Tickets>(router);
    router = resource_routes::<Transactions>(router);
    router = resource_routes::<Positions>(router);
    router = resource_routes::<WithdrawalRules>(router);
    router = resource_routes::<Promotions>(router);

    Ok(router
        .layer(TraceLayer::new_for_http())
        .layer(cors::build_cors_layer(frontend_url)?)
        .with_state(app_state))
}

/// Registers the table, form and column endpoints of one resource.
fn resource_routes<R: Resource>(router: Router<AppState>) -> Router<AppState> {
    let table = R::table();

    router
        .route(
            &format!("/api/{table}"),
            get(handlers::records::list_records_handler::<R>)
                .post(handlers::records::create_record_handler::<R>),
        )
        .route(
            &format!("/api/{table}/columns"),
            get(handlers::columns::list_columns_handler::<R>)
                .delete(handlers::columns::reset_columns_handler::<R>),
        )
        .route(
            &format!("/api/{table}/columns/{{column}}"),
            put(handlers::columns::set_column_visibility_handler::<R>),
        )
        .route(
            &format!("/api/{table}/{{id}}"),
            get(handlers::records::get_record_handler::<R>)
                .put(handlers::records::update_record_handler::<R>)
                .merge(R::delete_route()),
        )
        .route(
            &format!("/api/{table}/{{id}}/form"),
            get(handlers::records::edit_form_handler::<R>),
        )
}

#[cfg(test)]
mod tests {
    use opsdesk_core::AppError;

    use crate::handlers::test_support::seeded_state;

    use super::build_router;

    #[test]
    fn router_builds_for_a_valid_frontend_origin() {
        assert!(build_router(seeded_state(), "http://localhost:3000").is_ok());
    }

    #[test]
    fn malformed_frontend_origin_is_rejected() {
        let error = build_router(seeded_state(), "http://bad\norigin")
            .err()
            .unwrap_or_else(|| unreachable!());

        assert!(matches!(error, AppError::Internal(_)));
    }
}
