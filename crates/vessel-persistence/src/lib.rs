//! vessel-persistence
//!
//! Serialización y rehidratación del prefijo de artifacts de un target
//! hacia/desde una carpeta estable. La escritura delega en las ataduras
//! `save`/`open` por stage del motor de cómputo; este crate sólo gobierna
//! la semántica de prefijo encadenado, el esquema de nombres
//! `{user}_{yyyyMMdd}_{sufijo}.{ext}` y el manifiesto que permite reanudar
//! en otra sesión.
//!
//! Módulos:
//! - `manager`: `save`/`load`/`load_from_folder`/`delete_target`.
//! - `manifest`: descripción persistida del target (id, sitio, archivos,
//!   versiones de stage).
//! - `config`: carga de configuración desde .env / variables de entorno.

pub mod config;
pub mod error;
pub mod manager;
pub mod manifest;

pub use config::{init_dotenv, PersistenceConfig};
pub use error::PersistenceError;
pub use manager::{delete_target, load, load_from_folder, save, LoadReport, SaveReport};
pub use manifest::{read_manifest, ManifestStage, TargetManifest};
