pub mod application;
pub mod config;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod infrastructure;

#[cfg(test)]
pub(crate) mod test_support;

use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpServer};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use application::now_playing::NowPlayingService;
use application::record_service::RecordService;
use application::sale_service::SaleService;
use application::showtime_board::ShowtimeBoard;
use domain::pricing::PriceTable;
use handlers::openapi::ApiDoc;
use handlers::{
    BoardHandle, MovieService, NowPlayingHandle, RoomService, SaleHandle, SnackComboService,
};
use infrastructure::{RestStore, TmdbCatalog};

pub use config::Config;

/// Services shared by every worker. Each view keeps its own snapshot, so the
/// same instances must be handed to all workers.
#[derive(Clone)]
pub struct AppState {
    movies: web::Data<MovieService>,
    rooms: web::Data<RoomService>,
    snack_combos: web::Data<SnackComboService>,
    board: web::Data<BoardHandle>,
    sales: web::Data<SaleHandle>,
    now_playing: web::Data<NowPlayingHandle>,
}

impl AppState {
    pub fn new(store: RestStore, catalog: Option<TmdbCatalog>, prices: PriceTable) -> Self {
        let store = Arc::new(store);
        Self {
            movies: web::Data::new(RecordService::new(store.clone())),
            rooms: web::Data::new(RecordService::new(store.clone())),
            snack_combos: web::Data::new(RecordService::new(store.clone())),
            board: web::Data::new(ShowtimeBoard::new(store.clone())),
            sales: web::Data::new(SaleService::new(store.clone(), prices)),
            now_playing: web::Data::new(NowPlayingService::new(catalog, store)),
        }
    }

    /// Builds the collaborator clients described by `config`.
    pub fn from_config(config: &Config) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder().build()?;
        let store = RestStore::new(http.clone(), config.store_url.clone());
        let catalog = config.tmdb.as_ref().map(|tmdb| {
            TmdbCatalog::new(
                http.clone(),
                tmdb.base_url.clone(),
                tmdb.api_key.clone(),
                tmdb.language.clone(),
            )
        });
        Ok(Self::new(
            store,
            catalog,
            PriceTable::new(config.full_price.clone()),
        ))
    }

    /// Registers the shared services and every console route.
    pub fn configure(&self, cfg: &mut web::ServiceConfig) {
        cfg.app_data(self.movies.clone())
            .app_data(self.rooms.clone())
            .app_data(self.snack_combos.clone())
            .app_data(self.board.clone())
            .app_data(self.sales.clone())
            .app_data(self.now_playing.clone())
            .route("/health", web::get().to(handlers::health::health))
            .configure(handlers::movies::configure)
            .configure(handlers::rooms::configure)
            .configure(handlers::showtimes::configure)
            .configure(handlers::snack_combos::configure)
            .configure(handlers::now_playing::configure);
    }
}

/// Build and return an actix-web `Server` bound to the configured address.
///
/// The caller is responsible for `.await`-ing (or `tokio::spawn`-ing) the
/// returned server.
pub fn build_server(config: &Config) -> std::io::Result<actix_web::dev::Server> {
    let state = AppState::from_config(config).map_err(std::io::Error::other)?;
    if config.tmdb.is_none() {
        log::warn!("TMDB_API_KEY is not set; now-playing routes will answer 503");
    }
    let openapi = ApiDoc::openapi();

    Ok(HttpServer::new(move || {
        let state = state.clone();
        App::new()
            .wrap(Logger::default())
            .configure(move |cfg| state.configure(cfg))
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", openapi.clone()),
            )
    })
    .bind((config.host.clone(), config.port))?
    .run())
}
