// Library for tests to access modules

pub mod catalog;
pub mod config;
pub mod error;
pub mod models;
pub mod registry;
pub mod retrieve;
pub mod routes;
pub mod sqlite_repo;
pub mod store;
pub mod version;
