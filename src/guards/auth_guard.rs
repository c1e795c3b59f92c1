// ============================================================================
// AUTH GUARD - Acceso a rutas protegidas solo con sesión activa
// ============================================================================

use crate::router::{Navigator, Route};
use crate::stores::SessionStore;

/// Guard de sesión para rutas protegidas.
///
/// Sin estado propio: cada evaluación solo lee `SessionStore`, así que es
/// idempotente y puede evaluarse para varias navegaciones a la vez.
#[derive(Clone)]
pub struct AuthGuard {
    session: SessionStore,
}

impl AuthGuard {
    pub fn new(session: SessionStore) -> Self {
        Self { session }
    }

    /// `true` permite entrar; `false` deniega tras redirigir una vez a login
    pub fn can_activate(&self, target: &Route, navigator: &dyn Navigator) -> bool {
        if self.session.is_logged_in() {
            return true;
        }

        log::warn!("🚫 Acceso denegado a {}: usuario no logueado", target);
        navigator.navigate(Route::Login);
        false
    }
}
