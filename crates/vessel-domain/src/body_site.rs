use serde::{Deserialize, Serialize};

use crate::DomainError;
use std::fmt;

/// Territorio anatómico de un target vascular.
///
/// El sitio condiciona el etiquetado de segmentos en las particiones
/// (p. ej. CCA/ICA/ECA para carótida) pero no altera la mecánica del
/// pipeline: la cadena de stages es idéntica para todos los sitios.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BodySite {
    Carotid,
    Coronary,
    Aorta,
    Femoral,
    Intracranial,
}

impl BodySite {
    /// Etiquetas canónicas de segmento para las particiones de este sitio.
    pub fn segment_labels(&self) -> &'static [&'static str] {
        match self {
            BodySite::Carotid => &["CCA", "ICA", "ECA", "BIF"],
            BodySite::Coronary => &["LM", "LAD", "LCX", "RCA"],
            BodySite::Aorta => &["ASC", "ARCH", "DESC", "ABD"],
            BodySite::Femoral => &["CFA", "SFA", "PFA"],
            BodySite::Intracranial => &["MCA", "ACA", "PCA", "BA"],
        }
    }

    pub fn parse(code: &str) -> Result<Self, DomainError> {
        match code.to_ascii_lowercase().as_str() {
            "carotid" => Ok(BodySite::Carotid),
            "coronary" => Ok(BodySite::Coronary),
            "aorta" => Ok(BodySite::Aorta),
            "femoral" => Ok(BodySite::Femoral),
            "intracranial" => Ok(BodySite::Intracranial),
            other => Err(DomainError::ValidationError(format!("unknown body site: {other}"))),
        }
    }
}

impl fmt::Display for BodySite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            BodySite::Carotid => "carotid",
            BodySite::Coronary => "coronary",
            BodySite::Aorta => "aorta",
            BodySite::Femoral => "femoral",
            BodySite::Intracranial => "intracranial",
        };
        write!(f, "{name}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_roundtrip() {
        for site in [BodySite::Carotid, BodySite::Coronary, BodySite::Aorta, BodySite::Femoral, BodySite::Intracranial] {
            assert_eq!(BodySite::parse(&site.to_string()).unwrap(), site);
        }
        assert!(BodySite::parse("renal").is_err());
    }

    #[test]
    fn carotid_has_bifurcation_label() {
        assert!(BodySite::Carotid.segment_labels().contains(&"BIF"));
    }
}
