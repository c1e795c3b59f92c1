pub mod ids;
pub mod sesion;
pub mod resultado;
pub mod usuario;

pub use ids::Id;
pub use sesion::{Rol, Sesion};
pub use resultado::{EstadoResultado, Resultado};
pub use usuario::{
    EstadoUsuario, LoginCredentials, LoginResponse, NuevoUsuario, Usuario, VerificacionCorreo,
};
