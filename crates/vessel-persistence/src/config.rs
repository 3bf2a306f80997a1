//! Carga de configuración de persistencia desde variables de entorno.
//! Convención `VESSELFLOW_*`; todos los valores tienen default utilizable.

use std::env;
use std::path::PathBuf;
use once_cell::sync::Lazy;
use dotenvy::dotenv;

// Carga perezosa del archivo .env una sola vez.
static DOTENV_LOADED: Lazy<()> = Lazy::new(|| {
    let _ = dotenv(); // ignora error si no existe .env
});

#[derive(Debug, Clone)]
pub struct PersistenceConfig {
    /// Identificador de usuario que entra al nombre de cada archivo.
    pub user_id: String,
    /// Raíz de datos bajo la que viven las carpetas por target.
    pub data_dir: PathBuf,
    /// Política de recarga: con `true`, un artifact persistido por una
    /// versión de stage distinta a la actual no se abre (queda ausente para
    /// que el runner lo recompute). Apagada por defecto: lo guardado en
    /// disco se confía tal cual.
    pub reload_on_version_mismatch: bool,
}

impl PersistenceConfig {
    pub fn from_env() -> Self {
        // asegura que .env se haya cargado
        Lazy::force(&DOTENV_LOADED);
        let user_id = env::var("VESSELFLOW_USER").unwrap_or_else(|_| "operator".to_string());
        let data_dir = env::var("VESSELFLOW_DATA_DIR").map(PathBuf::from).unwrap_or_else(|_| PathBuf::from("."));
        let reload_on_version_mismatch = env::var("VESSELFLOW_RELOAD_ON_VERSION_MISMATCH")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(false);
        Self { user_id,
               data_dir,
               reload_on_version_mismatch }
    }

    /// Configuración explícita (tests y binario de validación).
    pub fn with_user(user_id: &str) -> Self {
        Self { user_id: user_id.to_string(),
               data_dir: PathBuf::from("."),
               reload_on_version_mismatch: false }
    }
}

/// Forzar carga temprana de .env desde aplicaciones externas si se desea.
pub fn init_dotenv() {
    Lazy::force(&DOTENV_LOADED);
}
