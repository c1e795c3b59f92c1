pub mod reactivity;
pub mod session_store;

pub use reactivity::{Observers, ReactiveState, Subscription};
pub use session_store::SessionStore;
