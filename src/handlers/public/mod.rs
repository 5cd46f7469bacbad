// handlers/public/mod.rs - Handlers reachable without a session
//
// Route class: PUBLIC (login, register) or OPEN (logout). The gate sends
// visitors that already hold a valid session away from the PUBLIC pages.

pub mod auth;

pub use auth::*;
