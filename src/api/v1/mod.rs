//! API Version 1 endpoints

pub mod channels;
pub mod entities;
pub mod routes;
pub mod services;
pub mod videos;
