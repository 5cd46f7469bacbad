// handlers/protected/mod.rs - Handlers that need a session
//
// Route class: PROTECTED (`/users/:id`, `/bookings/:id`) or OPEN with a
// handler-level check (`/me`). Each handler takes a `Principal`, so a request
// that somehow bypassed the gate still gets a 401, and per-record ownership
// is checked here rather than at the gate.

pub mod bookings;
pub mod users;
pub mod whoami;

pub use bookings::customer_bookings_get;
pub use users::user_get;
pub use whoami::whoami_get;
