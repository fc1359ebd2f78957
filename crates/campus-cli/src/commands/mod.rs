pub mod auth;
pub mod output;
pub mod profile;
pub mod routes;
