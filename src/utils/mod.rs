pub mod app_error;
pub mod html;
pub mod validated_query;
