#![cfg(target_arch = "wasm32")]

use portal_resultados::models::{Rol, Sesion};
use portal_resultados::stores::SessionStore;
use portal_resultados::utils::{StorageService, SESSION_KEY};
use wasm_bindgen_test::*;

wasm_bindgen_test_configure!(run_in_browser);

#[wasm_bindgen_test]
fn local_storage_guarda_y_borra() {
    let storage = StorageService::browser();
    assert!(storage.clear());
    assert!(storage.set("clave", &vec![1, 2, 3]));
    assert_eq!(storage.get::<Vec<i32>>("clave"), Some(vec![1, 2, 3]));
    assert!(storage.remove("clave"));
    assert!(!storage.has("clave"));
}

#[wasm_bindgen_test]
fn sesion_sobrevive_a_una_nueva_instancia() {
    let storage = StorageService::browser();
    storage.clear();

    let store = SessionStore::new(storage.clone());
    store.login(Sesion::nueva("Luis", "Soto", "luis@lab.cl", Rol::Admin));
    assert!(storage.has(SESSION_KEY));

    let recargada = SessionStore::new(StorageService::browser());
    assert!(recargada.is_admin());
    assert_eq!(recargada.get_current().map(|s| s.usuario), Some("Luis Soto".to_string()));

    recargada.logout();
    assert!(!storage.has(SESSION_KEY));
}
