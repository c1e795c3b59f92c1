// ============================================================================
// DETALLE RESULTADO VIEWMODEL - Alta y edición de un resultado
// ============================================================================

use chrono::{SecondsFormat, Utc};
use std::cell::Cell;
use std::rc::Rc;

use crate::models::{EstadoResultado, Id, Resultado};
use crate::router::{Navigator, Route, Router};
use crate::services::ResultadoApi;
use crate::stores::{ReactiveState, Subscription};
use crate::utils::validators::is_blank;

/// Campos editables del formulario (texto tal como lo escribe el usuario)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResultadoForm {
    pub id_examen: String,
    pub tipo_analisis: String,
    pub laboratorio: String,
    pub valores_resultado: String,
    pub observaciones: String,
    pub fecha_resultado: String,
    pub estado: Option<EstadoResultado>,
}

impl ResultadoForm {
    pub fn desde(resultado: &Resultado) -> Self {
        Self {
            id_examen: resultado.id_examen.clone(),
            tipo_analisis: resultado.tipo_analisis.clone(),
            laboratorio: resultado.laboratorio.clone(),
            valores_resultado: resultado.valores_resultado.clone(),
            observaciones: resultado.observaciones.clone().unwrap_or_default(),
            fecha_resultado: resultado.fecha_resultado.clone(),
            estado: Some(resultado.estado),
        }
    }

    /// Nombres (JSON) de los campos obligatorios vacíos
    pub fn campos_invalidos(&self) -> Vec<&'static str> {
        let requeridos = [
            ("idExamen", &self.id_examen),
            ("tipoAnalisis", &self.tipo_analisis),
            ("laboratorio", &self.laboratorio),
            ("valoresResultado", &self.valores_resultado),
            ("fechaResultado", &self.fecha_resultado),
        ];
        let mut invalidos: Vec<&'static str> = requeridos
            .iter()
            .filter(|(_, valor)| is_blank(valor))
            .map(|(campo, _)| *campo)
            .collect();
        if self.estado.is_none() {
            invalidos.push("estado");
        }
        invalidos
    }

    pub fn a_resultado(&self, id: Option<Id>) -> Option<Resultado> {
        let estado = self.estado?;
        if !self.campos_invalidos().is_empty() {
            return None;
        }
        let observaciones = self.observaciones.trim();
        Some(Resultado {
            id_resultado: id,
            id_examen: self.id_examen.trim().to_string(),
            tipo_analisis: self.tipo_analisis.trim().to_string(),
            laboratorio: self.laboratorio.trim().to_string(),
            valores_resultado: self.valores_resultado.trim().to_string(),
            observaciones: (!observaciones.is_empty()).then(|| observaciones.to_string()),
            fecha_resultado: self.fecha_resultado.trim().to_string(),
            estado,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DetalleResultadoState {
    pub form: ResultadoForm,
    pub editing_id: Option<Id>,
    pub mensaje: String,
    pub error: String,
    pub cargando: bool,
    pub tocado: bool,
}

impl Default for DetalleResultadoState {
    fn default() -> Self {
        Self {
            form: ResultadoForm::default(),
            editing_id: None,
            mensaje: String::new(),
            error: String::new(),
            cargando: true,
            tocado: false,
        }
    }
}

impl DetalleResultadoState {
    pub fn is_edit(&self) -> bool {
        self.editing_id.is_some()
    }
}

/// Fecha actual en ISO-8601 con milisegundos y `Z`
pub fn ahora_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// ViewModel de `/detalle-resultado[/:id]`
pub struct DetalleResultadoViewModel<A: ResultadoApi> {
    api: A,
    router: Router,
    state: Rc<ReactiveState<DetalleResultadoState>>,
    destruido: Cell<bool>,
}

impl<A: ResultadoApi> DetalleResultadoViewModel<A> {
    pub fn new(api: A, router: Router) -> Self {
        Self {
            api,
            router,
            state: Rc::new(ReactiveState::default()),
            destruido: Cell::new(false),
        }
    }

    /// Desmontaje: las respuestas que lleguen después ya no tocan estado ni navegan
    pub fn destruir(&self) {
        self.destruido.set(true);
    }

    pub fn esta_destruido(&self) -> bool {
        self.destruido.get()
    }

    /// Con id: carga el registro para editarlo. Sin id: alta con fecha de hoy.
    pub async fn iniciar(&self, id: Option<Id>) {
        let Some(id) = id else {
            self.state.update(|s| {
                s.editing_id = None;
                s.form.fecha_resultado = ahora_iso();
                s.cargando = false;
            });
            return;
        };

        self.state.update(|s| {
            s.editing_id = Some(id);
            s.cargando = true;
        });
        let respuesta = self.api.obtener_por_id(id).await;
        if self.destruido.get() {
            return;
        }
        match respuesta {
            Ok(resultado) => self.state.update(|s| {
                s.form = ResultadoForm::desde(&resultado);
                s.cargando = false;
            }),
            Err(e) => {
                log::error!("❌ Error cargando resultado {}: {}", id, e);
                self.state.update(|s| {
                    s.error = "No se pudo cargar el resultado.".to_string();
                    s.cargando = false;
                });
            }
        }
    }

    pub fn editar_form(&self, edit: impl FnOnce(&mut ResultadoForm)) {
        self.state.update(|s| edit(&mut s.form));
    }

    pub async fn guardar(&self) {
        let (form, editing_id) = self.state.with(|s| (s.form.clone(), s.editing_id));
        let Some(datos) = form.a_resultado(editing_id) else {
            self.state.update(|s| s.tocado = true);
            return;
        };
        self.state.update(|s| s.error.clear());

        let respuesta = match editing_id {
            Some(id) => self.api.actualizar(id, &datos).await,
            None => self.api.crear(&datos).await,
        };
        if self.destruido.get() {
            log::debug!("ℹ️ Respuesta de guardado ignorada: pantalla destruida");
            return;
        }

        match (respuesta, editing_id) {
            (Ok(_), Some(_)) => self.terminar("Resultado actualizado."),
            (Ok(_), None) => self.terminar("Resultado creado."),
            (Err(e), Some(id)) => {
                log::error!("❌ Error actualizando resultado {}: {}", id, e);
                self.state.update(|s| s.error = "Error al actualizar.".to_string());
            }
            (Err(e), None) => {
                log::error!("❌ Error creando resultado: {}", e);
                self.state.update(|s| s.error = "Error al crear.".to_string());
            }
        }
    }

    fn terminar(&self, mensaje: &str) {
        log::info!("✅ {}", mensaje);
        self.state.update(|s| s.mensaje = mensaje.to_string());
        self.router.navigate(Route::ListaResultado);
    }

    pub fn cancelar(&self) {
        self.router.navigate(Route::ListaResultado);
    }

    pub fn state(&self) -> DetalleResultadoState {
        self.state.get()
    }

    pub fn on_change<F: Fn() + 'static>(&self, callback: F) -> Subscription {
        self.state.subscribe(callback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Rol;
    use crate::services::ApiError;
    use crate::testing::{entorno, resultado, MockResultadoApi};
    use futures::executor::block_on;

    fn vm() -> (DetalleResultadoViewModel<Rc<MockResultadoApi>>, Rc<MockResultadoApi>, Router) {
        let (_, router) = entorno(Some(Rol::User));
        let api = MockResultadoApi::con(vec![]);
        (DetalleResultadoViewModel::new(api.clone(), router.clone()), api, router)
    }

    fn completar(form: &mut ResultadoForm) {
        form.id_examen = "EX-10".into();
        form.tipo_analisis = "Perfil lipídico".into();
        form.laboratorio = "Central".into();
        form.valores_resultado = "LDL 100".into();
        form.estado = Some(EstadoResultado::Pendiente);
    }

    #[test]
    fn test_alta_parte_con_fecha_de_hoy() {
        let (vm, api, _) = vm();
        block_on(vm.iniciar(None));
        let s = vm.state();
        assert!(!s.cargando);
        assert!(!s.is_edit());
        assert!(chrono::DateTime::parse_from_rfc3339(&s.form.fecha_resultado).is_ok());
        assert!(s.form.fecha_resultado.ends_with('Z'));
        assert!(api.llamadas().is_empty());
    }

    #[test]
    fn test_edicion_carga_el_registro() {
        let (vm, api, _) = vm();
        *api.por_id.borrow_mut() = Ok(resultado(4, EstadoResultado::Entregado));
        block_on(vm.iniciar(Some(4)));
        let s = vm.state();
        assert!(s.is_edit());
        assert_eq!(s.form.id_examen, "EX-4");
        assert_eq!(s.form.estado, Some(EstadoResultado::Entregado));
        assert!(!s.cargando);
    }

    #[test]
    fn test_edicion_con_error_de_carga() {
        let (vm, _, _) = vm();
        block_on(vm.iniciar(Some(4)));
        assert_eq!(vm.state().error, "No se pudo cargar el resultado.");
        assert!(!vm.state().cargando);
    }

    #[test]
    fn test_guardar_invalido_marca_campos() {
        let (vm, api, router) = vm();
        block_on(vm.iniciar(None));
        block_on(vm.guardar());
        let s = vm.state();
        assert!(s.tocado);
        assert_eq!(
            s.form.campos_invalidos(),
            vec!["idExamen", "tipoAnalisis", "laboratorio", "valoresResultado", "estado"]
        );
        assert!(api.llamadas().is_empty());
        assert_eq!(router.current(), None);
    }

    #[test]
    fn test_crear_y_volver_a_la_lista() {
        let (vm, api, router) = vm();
        block_on(vm.iniciar(None));
        vm.editar_form(completar);
        vm.editar_form(|f| f.observaciones = "  ".into());
        block_on(vm.guardar());

        assert_eq!(api.llamadas(), vec!["crear"]);
        let enviado = api.enviados.borrow()[0].clone();
        assert_eq!(enviado.id_resultado, None);
        assert_eq!(enviado.observaciones, None);
        assert_eq!(vm.state().mensaje, "Resultado creado.");
        assert_eq!(router.current(), Some(Route::ListaResultado));
    }

    #[test]
    fn test_actualizar_usa_el_id_en_edicion() {
        let (vm, api, router) = vm();
        *api.por_id.borrow_mut() = Ok(resultado(4, EstadoResultado::Validado));
        block_on(vm.iniciar(Some(4)));
        vm.editar_form(|f| f.valores_resultado = "Hb 15".into());
        block_on(vm.guardar());

        assert_eq!(api.llamadas(), vec!["obtener_por_id:4", "actualizar:4"]);
        assert_eq!(api.enviados.borrow()[0].id_resultado, Some(4));
        assert_eq!(vm.state().mensaje, "Resultado actualizado.");
        assert_eq!(router.current(), Some(Route::ListaResultado));
    }

    #[test]
    fn test_error_al_crear_se_queda_en_el_formulario() {
        let (vm, api, router) = vm();
        *api.guardar.borrow_mut() = Err(ApiError::from_response(500, ""));
        block_on(vm.iniciar(None));
        vm.editar_form(completar);
        block_on(vm.guardar());

        assert_eq!(vm.state().error, "Error al crear.");
        assert_eq!(router.current(), None);
    }

    #[test]
    fn test_guardado_tardio_tras_destruir_no_navega() {
        let (vm, api, router) = vm();
        let vm = Rc::new(vm);
        block_on(vm.iniciar(None));
        vm.editar_form(completar);

        let liberar = api.gate.close();
        let pendiente = vm.clone();
        crate::utils::tasks::spawn(async move { pendiente.guardar().await });
        crate::utils::tasks::run_pending();
        assert_eq!(api.llamadas(), vec!["crear"]);

        vm.destruir();
        let _ = liberar.send(());
        crate::utils::tasks::run_pending();

        assert!(vm.state().mensaje.is_empty());
        assert_eq!(router.current(), None);
    }

    #[test]
    fn test_cancelar_vuelve_a_la_lista() {
        let (vm, _, router) = vm();
        vm.cancelar();
        assert_eq!(router.current(), Some(Route::ListaResultado));
    }
}
