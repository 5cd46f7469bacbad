// handlers/elevated/mod.rs - Administrator handlers
//
// Route class: ADMIN_ONLY for the section indexes and `/users`. Every handler
// also takes an `AdminPrincipal`, which is what guards `DELETE /users/:id`
// since that path is only PROTECTED at the gate.

pub mod sections;
pub mod users;

pub use sections::{bookings_get, customers_get, flights_get};
pub use users::{user_delete, users_list};
