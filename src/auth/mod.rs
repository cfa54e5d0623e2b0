use crate::state::AppState;
use axum::Router;

mod dto;
pub mod extractors;
pub mod handlers;
pub mod jwt;
pub mod password;

pub use dto::PublicAccount;

pub fn router() -> Router<AppState> {
    Router::new().merge(handlers::auth_routes())
}
