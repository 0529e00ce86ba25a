pub mod now_playing;
pub mod record_service;
pub mod sale_service;
pub mod showtime_board;
pub mod view_state;
