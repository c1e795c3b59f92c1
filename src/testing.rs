//! Dobles de prueba compartidos por los tests de view models

use futures::channel::oneshot;
use std::cell::RefCell;
use std::rc::Rc;

use crate::models::{
    EstadoResultado, EstadoUsuario, Id, LoginCredentials, LoginResponse, NuevoUsuario, Resultado,
    Rol, Sesion, Usuario, VerificacionCorreo,
};
use crate::router::Router;
use crate::services::{ApiError, AuthApi, ResultadoApi};
use crate::stores::SessionStore;
use crate::utils::{MemoryStorage, StorageService};

pub fn resultado(id: Id, estado: EstadoResultado) -> Resultado {
    Resultado {
        id_resultado: Some(id),
        id_examen: format!("EX-{}", id),
        tipo_analisis: "Hemograma".into(),
        laboratorio: "Central".into(),
        valores_resultado: "Hb 14 g/dl".into(),
        observaciones: None,
        fecha_resultado: "2024-05-01T10:00:00.000Z".into(),
        estado,
    }
}

pub fn usuario(id: Id, rol: Rol) -> Usuario {
    Usuario {
        id_usuario: Some(id),
        nombre: "Ana".into(),
        apellido: "Ruiz".into(),
        correo: format!("u{}@lab.cl", id),
        password: None,
        rol,
        estado: EstadoUsuario::Activo,
    }
}

/// Sesión + router con el usuario ya logueado (o no)
pub fn entorno(rol: Option<Rol>) -> (SessionStore, Router) {
    let session = SessionStore::new(StorageService::memory(MemoryStorage::new()));
    if let Some(rol) = rol {
        session.login(Sesion::nueva("Ana", "Ruiz", "ana@lab.cl", rol));
    }
    let router = Router::new(session.clone());
    (session, router)
}

/// Compuerta para retener una respuesta hasta que el test la libere
#[derive(Default)]
pub struct Gate {
    receiver: RefCell<Option<oneshot::Receiver<()>>>,
}

impl Gate {
    pub fn close(&self) -> oneshot::Sender<()> {
        let (tx, rx) = oneshot::channel();
        *self.receiver.borrow_mut() = Some(rx);
        tx
    }

    async fn pass(&self) {
        let receiver = self.receiver.borrow_mut().take();
        if let Some(rx) = receiver {
            let _ = rx.await;
        }
    }
}

pub struct MockResultadoApi {
    pub resultados: RefCell<Result<Vec<Resultado>, ApiError>>,
    pub por_id: RefCell<Result<Resultado, ApiError>>,
    pub guardar: RefCell<Result<(), ApiError>>,
    pub eliminar: RefCell<Result<(), ApiError>>,
    pub llamadas: RefCell<Vec<String>>,
    pub enviados: RefCell<Vec<Resultado>>,
    pub gate: Gate,
}

impl MockResultadoApi {
    pub fn con(resultados: Vec<Resultado>) -> Rc<Self> {
        Rc::new(Self {
            resultados: RefCell::new(Ok(resultados)),
            por_id: RefCell::new(Err(ApiError::from_response(404, ""))),
            guardar: RefCell::new(Ok(())),
            eliminar: RefCell::new(Ok(())),
            llamadas: RefCell::new(Vec::new()),
            enviados: RefCell::new(Vec::new()),
            gate: Gate::default(),
        })
    }

    pub fn llamadas(&self) -> Vec<String> {
        self.llamadas.borrow().clone()
    }

    fn registrar(&self, llamada: String) {
        self.llamadas.borrow_mut().push(llamada);
    }
}

impl ResultadoApi for Rc<MockResultadoApi> {
    async fn obtener_resultados(&self) -> Result<Vec<Resultado>, ApiError> {
        self.registrar("obtener_resultados".into());
        self.gate.pass().await;
        self.resultados.borrow().clone()
    }

    async fn obtener_por_id(&self, id: Id) -> Result<Resultado, ApiError> {
        self.registrar(format!("obtener_por_id:{}", id));
        self.gate.pass().await;
        self.por_id.borrow().clone()
    }

    async fn crear(&self, resultado: &Resultado) -> Result<Resultado, ApiError> {
        self.registrar("crear".into());
        self.enviados.borrow_mut().push(resultado.clone());
        self.gate.pass().await;
        self.guardar.borrow().clone()?;
        let mut creado = resultado.clone();
        creado.id_resultado = Some(99);
        Ok(creado)
    }

    async fn actualizar(&self, id: Id, resultado: &Resultado) -> Result<Resultado, ApiError> {
        self.registrar(format!("actualizar:{}", id));
        self.enviados.borrow_mut().push(resultado.clone());
        self.gate.pass().await;
        self.guardar.borrow().clone()?;
        Ok(resultado.clone())
    }

    async fn eliminar_resultado(&self, id: Id) -> Result<(), ApiError> {
        self.registrar(format!("eliminar_resultado:{}", id));
        self.gate.pass().await;
        self.eliminar.borrow().clone()
    }
}

pub struct MockAuthApi {
    pub login: RefCell<Result<LoginResponse, ApiError>>,
    pub existe: RefCell<Result<bool, ApiError>>,
    pub registrar: RefCell<Result<(), ApiError>>,
    pub usuario: RefCell<Result<Usuario, ApiError>>,
    pub actualizar: RefCell<Result<(), ApiError>>,
    pub usuarios: RefCell<Result<Vec<Usuario>, ApiError>>,
    pub llamadas: RefCell<Vec<String>>,
    pub registrados: RefCell<Vec<NuevoUsuario>>,
    pub actualizados: RefCell<Vec<Usuario>>,
}

impl MockAuthApi {
    pub fn new() -> Rc<Self> {
        Rc::new(Self {
            login: RefCell::new(Ok(LoginResponse {
                nombre: "Ana".into(),
                apellido: "Ruiz".into(),
                correo: "ana@lab.cl".into(),
                rol: Rol::User,
            })),
            existe: RefCell::new(Ok(false)),
            registrar: RefCell::new(Ok(())),
            usuario: RefCell::new(Ok(usuario(1, Rol::User))),
            actualizar: RefCell::new(Ok(())),
            usuarios: RefCell::new(Ok(Vec::new())),
            llamadas: RefCell::new(Vec::new()),
            registrados: RefCell::new(Vec::new()),
            actualizados: RefCell::new(Vec::new()),
        })
    }

    pub fn llamadas(&self) -> Vec<String> {
        self.llamadas.borrow().clone()
    }
}

impl AuthApi for Rc<MockAuthApi> {
    async fn login(&self, credentials: &LoginCredentials) -> Result<LoginResponse, ApiError> {
        self.llamadas.borrow_mut().push(format!("login:{}", credentials.correo));
        self.login.borrow().clone()
    }

    async fn verificar_correo(&self, correo: &str) -> Result<VerificacionCorreo, ApiError> {
        self.llamadas.borrow_mut().push(format!("verificar_correo:{}", correo));
        let existe = self.existe.borrow().clone()?;
        Ok(VerificacionCorreo { existe })
    }

    async fn registrar_usuario(&self, nuevo: &NuevoUsuario) -> Result<Usuario, ApiError> {
        self.llamadas.borrow_mut().push("registrar_usuario".into());
        self.registrados.borrow_mut().push(nuevo.clone());
        self.registrar.borrow().clone()?;
        Ok(Usuario {
            id_usuario: Some(50),
            nombre: nuevo.nombre.clone(),
            apellido: nuevo.apellido.clone(),
            correo: nuevo.correo.clone(),
            password: None,
            rol: nuevo.rol,
            estado: nuevo.estado,
        })
    }

    async fn obtener_usuario(&self, id: Id) -> Result<Usuario, ApiError> {
        self.llamadas.borrow_mut().push(format!("obtener_usuario:{}", id));
        self.usuario.borrow().clone()
    }

    async fn actualizar_usuario(&self, id: Id, usuario: &Usuario) -> Result<Usuario, ApiError> {
        self.llamadas.borrow_mut().push(format!("actualizar_usuario:{}", id));
        self.actualizados.borrow_mut().push(usuario.clone());
        self.actualizar.borrow().clone()?;
        Ok(usuario.clone())
    }

    async fn listar_usuarios(&self) -> Result<Vec<Usuario>, ApiError> {
        self.llamadas.borrow_mut().push("listar_usuarios".into());
        self.usuarios.borrow().clone()
    }
}
