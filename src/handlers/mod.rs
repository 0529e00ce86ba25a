pub mod health;
pub mod movies;
pub mod now_playing;
pub mod openapi;
pub mod records;
pub mod rooms;
pub mod sales;
pub mod showtimes;
pub mod snack_combos;

use crate::application::now_playing::NowPlayingService;
use crate::application::record_service::RecordService;
use crate::application::sale_service::SaleService;
use crate::application::showtime_board::ShowtimeBoard;
use crate::domain::models::{Movie, Room, SnackCombo};
use crate::infrastructure::{RestStore, TmdbCatalog};

pub type MovieService = RecordService<Movie, RestStore>;
pub type RoomService = RecordService<Room, RestStore>;
pub type SnackComboService = RecordService<SnackCombo, RestStore>;
pub type BoardHandle = ShowtimeBoard<RestStore>;
pub type SaleHandle = SaleService<RestStore>;
pub type NowPlayingHandle = NowPlayingService<TmdbCatalog, RestStore>;
