//src/main.rs

use axum::{routing::get, Router};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod models;
mod services;

use crate::config::{AppState, Settings};
use crate::docs::ApiDoc;

#[tokio::main]
async fn main() {
    // RUST_LOG controla o nível; sem ele, `info`.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .compact()
        .init();

    // Se a configuração falhar, a aplicação não deve iniciar.
    let settings = Settings::from_env().expect("Falha ao ler a configuração do ambiente.");

    let app_state = AppState::new(&settings)
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    let app = Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api", api_routes())
        .layer(TraceLayer::new_for_http())
        .with_state(app_state);

    let listener = TcpListener::bind(&settings.bind_addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", settings.bind_addr);
    axum::serve(listener, app)
        .await
        .expect("Erro no servidor Axum");
}

fn api_routes() -> Router<AppState> {
    use crate::handlers::{bookings, catalog, guests, reviews};

    let hotel_routes = Router::new()
        .route("/", get(catalog::list_hotels).post(catalog::create_hotel))
        .route(
            "/{id}",
            get(catalog::get_hotel)
                .put(catalog::update_hotel)
                .delete(catalog::delete_hotel),
        );

    let room_type_routes = Router::new()
        .route("/", get(catalog::list_room_types).post(catalog::create_room_type))
        .route(
            "/{id}",
            get(catalog::get_room_type)
                .put(catalog::update_room_type)
                .delete(catalog::delete_room_type),
        );

    let room_routes = Router::new()
        .route("/", get(catalog::list_rooms).post(catalog::create_room))
        .route(
            "/{id}",
            get(catalog::get_room)
                .put(catalog::update_room)
                .delete(catalog::delete_room),
        );

    let guest_routes = Router::new()
        .route("/", get(guests::list_guests).post(guests::create_guest))
        .route(
            "/{id}",
            get(guests::get_guest)
                .put(guests::update_guest)
                .delete(guests::delete_guest),
        );

    // Rotas estáticas têm prioridade sobre `/{id}` no roteador.
    let booking_routes = Router::new()
        .route("/", get(bookings::list_bookings).post(bookings::create_booking))
        .route("/search", get(bookings::search_bookings))
        .route("/search/guest", get(bookings::bookings_for_guest))
        .route("/hotel", get(bookings::bookings_for_hotel))
        .route("/reports/occupancy", get(bookings::occupancy_report))
        .route(
            "/{id}",
            get(bookings::get_booking)
                .put(bookings::update_booking)
                .delete(bookings::delete_booking),
        );

    let review_routes = Router::new()
        .route("/", get(reviews::list_reviews).post(reviews::create_review))
        .route(
            "/{id}",
            get(reviews::get_review)
                .put(reviews::update_review)
                .delete(reviews::delete_review),
        );

    Router::new()
        .nest("/hotels", hotel_routes)
        .nest("/room-types", room_type_routes)
        .nest("/rooms", room_routes)
        .nest("/guests", guest_routes)
        .nest("/bookings", booking_routes)
        .nest("/reviews", review_routes)
}
