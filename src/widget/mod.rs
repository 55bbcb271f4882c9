pub mod debouncer;
pub mod geolocation;
pub mod headless_map;
pub mod map_view;
pub mod popup;
pub mod presenter;
pub mod search_widget;
pub mod session_token;
pub mod suggestions;
