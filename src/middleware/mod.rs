pub mod auth;
pub mod gate;
pub mod response;

pub use auth::{AdminPrincipal, MaybePrincipal, Principal};
pub use gate::{access_gate, CurrentSession};
pub use response::{ApiResponse, ApiResult};
