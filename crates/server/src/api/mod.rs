pub mod acquire;
pub mod filter;
pub mod handlers;
pub mod history;
pub mod middleware;
pub mod routes;
pub mod search;

pub use routes::create_router;
