use actix_web::{web, HttpResponse};

use crate::application::record_service::BatchDeleteReport;
use crate::domain::models::{Movie, RecordId};
use crate::domain::validation::MovieForm;
use crate::errors::AppError;

use super::records::{self, BatchDeleteRequest, RecordList};
use super::MovieService;

/// GET /movies
///
/// Reloads the movie list from the store. When the reload fails the last
/// list is returned unchanged.
#[utoipa::path(
    get,
    path = "/movies",
    responses(
        (status = 200, description = "Current movie list", body = RecordList<Movie>),
    ),
    tag = "movies"
)]
pub async fn list_movies(service: web::Data<MovieService>) -> HttpResponse {
    records::list(service.get_ref()).await
}

#[utoipa::path(
    post,
    path = "/movies",
    request_body = MovieForm,
    responses(
        (status = 201, description = "Movie created", body = Movie),
        (status = 422, description = "Some fields are not valid"),
        (status = 502, description = "Upstream request failed"),
    ),
    tag = "movies"
)]
pub async fn create_movie(
    service: web::Data<MovieService>,
    body: web::Json<MovieForm>,
) -> Result<HttpResponse, AppError> {
    records::create(service.get_ref(), body.into_inner()).await
}

#[utoipa::path(
    put,
    path = "/movies/{id}",
    params(("id" = String, Path, description = "Movie id")),
    request_body = MovieForm,
    responses(
        (status = 200, description = "Movie updated", body = Movie),
        (status = 422, description = "Some fields are not valid"),
        (status = 502, description = "Upstream request failed"),
    ),
    tag = "movies"
)]
pub async fn update_movie(
    service: web::Data<MovieService>,
    path: web::Path<String>,
    body: web::Json<MovieForm>,
) -> Result<HttpResponse, AppError> {
    records::update(service.get_ref(), RecordId::new(path.into_inner()), body.into_inner()).await
}

#[utoipa::path(
    delete,
    path = "/movies/{id}",
    params(("id" = String, Path, description = "Movie id")),
    responses(
        (status = 204, description = "Movie deleted"),
        (status = 502, description = "Upstream request failed"),
    ),
    tag = "movies"
)]
pub async fn delete_movie(
    service: web::Data<MovieService>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    records::delete(service.get_ref(), RecordId::new(path.into_inner())).await
}

/// POST /movies/batch-delete
///
/// Issues one delete per id concurrently, then reloads the list once.
#[utoipa::path(
    post,
    path = "/movies/batch-delete",
    request_body = BatchDeleteRequest,
    responses(
        (status = 200, description = "Per-id outcome", body = BatchDeleteReport),
    ),
    tag = "movies"
)]
pub async fn batch_delete_movies(
    service: web::Data<MovieService>,
    body: web::Json<BatchDeleteRequest>,
) -> HttpResponse {
    records::batch_delete(service.get_ref(), body.into_inner()).await
}

#[utoipa::path(
    delete,
    path = "/movies",
    responses(
        (status = 200, description = "Per-id outcome", body = BatchDeleteReport),
    ),
    tag = "movies"
)]
pub async fn delete_all_movies(service: web::Data<MovieService>) -> HttpResponse {
    records::delete_all(service.get_ref()).await
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/movies")
            .route("", web::get().to(list_movies))
            .route("", web::post().to(create_movie))
            .route("", web::delete().to(delete_all_movies))
            .route("/batch-delete", web::post().to(batch_delete_movies))
            .route("/{id}", web::put().to(update_movie))
            .route("/{id}", web::delete().to(delete_movie)),
    );
}
