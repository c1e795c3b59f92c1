// ============================================================================
// TASKS - Ejecución de futuros locales (UI single-thread)
// ============================================================================
// En wasm32 se delega en `spawn_local` y `gloo_timers`. En nativo (tests,
// herramientas) las tareas se encolan en un `LocalPool` por hilo que se
// drena con `run_pending()`.
// ============================================================================

use std::future::Future;

#[cfg(target_arch = "wasm32")]
pub fn spawn<F>(future: F)
where
    F: Future<Output = ()> + 'static,
{
    wasm_bindgen_futures::spawn_local(future);
}

/// Ejecuta `f` tras `ms` milisegundos
#[cfg(target_arch = "wasm32")]
pub fn after<F>(ms: u32, f: F)
where
    F: FnOnce() + 'static,
{
    gloo_timers::callback::Timeout::new(ms, f).forget();
}

#[cfg(not(target_arch = "wasm32"))]
mod pool {
    use futures::executor::{LocalPool, LocalSpawner};
    use futures::task::LocalSpawnExt;
    use std::cell::RefCell;
    use std::future::Future;

    thread_local! {
        static POOL: RefCell<LocalPool> = RefCell::new(LocalPool::new());
        // El spawner se guarda aparte para poder encolar tareas desde
        // dentro de otra tarea mientras el pool está prestado.
        static SPAWNER: LocalSpawner = POOL.with(|p| p.borrow().spawner());
    }

    pub fn spawn<F>(future: F)
    where
        F: Future<Output = ()> + 'static,
    {
        SPAWNER.with(|spawner| {
            if let Err(e) = spawner.spawn_local(future) {
                log::error!("❌ No se pudo encolar la tarea: {}", e);
            }
        });
    }

    pub fn run_pending() {
        SPAWNER.with(|_| ());
        POOL.with(|p| p.borrow_mut().run_until_stalled());
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use pool::{run_pending, spawn};

/// Sin temporizadores fuera del navegador: `f` se ejecuta en el siguiente
/// `run_pending()`.
#[cfg(not(target_arch = "wasm32"))]
pub fn after<F>(_ms: u32, f: F)
where
    F: FnOnce() + 'static,
{
    spawn(async move { f() });
}
