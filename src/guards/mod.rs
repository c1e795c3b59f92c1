pub mod auth_guard;

pub use auth_guard::AuthGuard;
