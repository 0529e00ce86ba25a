pub mod rest_store;
pub mod tmdb;

pub use rest_store::RestStore;
pub use tmdb::TmdbCatalog;
