use std::sync::Arc;

use crate::widget::{headless_map::HeadlessMap, search_widget::SearchWidget};

#[derive(Clone)]
pub struct AppState {
    pub widget: Arc<SearchWidget>,
    pub map: Arc<HeadlessMap>,
    pub auth_key: Option<String>,
}
