//! Constantes del core del pipeline.
//!
//! Este módulo agrupa valores estáticos que participan en el registro de
//! auditoría y en la política de recarga por versión. Cambiar la versión de
//! un stage invalida (si la política está activa) los artifacts persistidos
//! por versiones anteriores de ese algoritmo.

/// Versión lógica del pipeline. Entra en los manifiestos persistidos para
/// poder detectar incompatibilidades entre sesiones.
pub const PIPELINE_VERSION: &str = "V1.0";

/// Cantidad fija de stages de la cadena de derivación por target.
pub const STAGE_COUNT: usize = 17;
