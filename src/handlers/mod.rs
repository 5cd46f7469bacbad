// handlers/mod.rs - Handlers grouped by the access they require
//
// public    → no session (login, register, logout)
// protected → any session, record ownership checked per handler
// elevated  → ADMIN session
//
// The access gate enforces the route classes before these run; the
// extractors each handler takes enforce them a second time.

pub mod elevated;
pub mod pages;
pub mod protected;
pub mod public;
