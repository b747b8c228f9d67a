pub mod favorites;
pub mod oauth;
pub mod spotify;

pub use favorites::FavoritesService;
pub use oauth::SpotifyOAuth;
pub use spotify::SpotifyClient;
