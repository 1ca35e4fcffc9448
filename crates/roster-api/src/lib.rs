pub mod error;
pub mod prs;
pub mod routes;
pub mod state;
pub mod stats;
pub mod teams;
pub mod users;
mod validate;
