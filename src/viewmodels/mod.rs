pub mod admin_viewmodel;
pub mod detalle_resultado_viewmodel;
pub mod header_viewmodel;
pub mod lista_resultados_viewmodel;
pub mod login_viewmodel;
pub mod registro_viewmodel;

pub use admin_viewmodel::AdminViewModel;
pub use detalle_resultado_viewmodel::DetalleResultadoViewModel;
pub use header_viewmodel::HeaderViewModel;
pub use lista_resultados_viewmodel::ListaResultadosViewModel;
pub use login_viewmodel::LoginViewModel;
pub use registro_viewmodel::RegistroViewModel;
