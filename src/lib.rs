#![doc = "The `quadro` library crate."]
#![doc = ""]
#![doc = "A JWT-authenticated task board API. Users sign up and sign in; each user"]
#![doc = "manages their own tasks, which move between PENDENTE, EM_ANDAMENTO and"]
#![doc = "CONCLUIDA. The binary (`main.rs`) wires these modules into an actix-web server."]

pub mod auth;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod store;
pub mod tasks;
pub mod validation;

pub use crate::error::AppError;
