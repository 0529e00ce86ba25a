use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Cinema Console API",
        version = "0.1.0",
        description = "Back office for a single cinema: catalog records, showtimes, ticket sales and the now-playing import."
    ),
    tags(
        (name = "health", description = "Health check"),
        (name = "movies", description = "Movie records"),
        (name = "rooms", description = "Room records"),
        (name = "showtimes", description = "Showtime records and the joined board"),
        (name = "snack-combos", description = "Snack combo records"),
        (name = "sales", description = "Ticket sale with optional snack combos"),
        (name = "now-playing", description = "Third-party now-playing listing and import")
    ),
    paths(
        super::health::health,
        super::movies::list_movies,
        super::movies::create_movie,
        super::movies::update_movie,
        super::movies::delete_movie,
        super::movies::batch_delete_movies,
        super::movies::delete_all_movies,
        super::rooms::list_rooms,
        super::rooms::create_room,
        super::rooms::update_room,
        super::rooms::delete_room,
        super::rooms::batch_delete_rooms,
        super::rooms::delete_all_rooms,
        super::showtimes::list_showtimes,
        super::showtimes::create_showtime,
        super::showtimes::update_showtime,
        super::showtimes::delete_showtime,
        super::showtimes::batch_delete_showtimes,
        super::snack_combos::list_snack_combos,
        super::snack_combos::create_snack_combo,
        super::snack_combos::update_snack_combo,
        super::snack_combos::delete_snack_combo,
        super::snack_combos::batch_delete_snack_combos,
        super::snack_combos::delete_all_snack_combos,
        super::sales::sale_context,
        super::sales::quote_sale,
        super::sales::confirm_sale,
        super::now_playing::list_now_playing,
        super::now_playing::import_now_playing,
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn document_lists_the_sale_routes() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/showtimes/{id}/sale"));
        assert!(doc.paths.paths.contains_key("/showtimes/{id}/sale/quote"));
        assert!(doc.paths.paths.contains_key("/now-playing/import"));
    }
}
