//! Registros estructurados de lecturas por segmento.
//!
//! Un `ReadingsRecord` es el payload del artifact de los stages de lecturas
//! (globales y de lesión). El pipeline lo trata como opaco; aquí sólo se
//! define la forma estable que viaja a JSON.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{BodySite, DomainError};

/// Medición de un segmento de vaso individual.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmentReading {
    pub segment: String,
    pub lumen_area_mm2: f64,
    pub wall_area_mm2: f64,
    pub max_wall_thickness_mm: f64,
    /// Índice de pared normalizado: wall / (wall + lumen).
    pub normalized_wall_index: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadingsRecord {
    pub site: BodySite,
    pub segments: Vec<SegmentReading>,
    pub generated_at: DateTime<Utc>,
}

impl ReadingsRecord {
    pub fn new(site: BodySite, segments: Vec<SegmentReading>) -> Result<Self, DomainError> {
        let labels = site.segment_labels();
        for s in &segments {
            if !labels.contains(&s.segment.as_str()) {
                return Err(DomainError::ValidationError(format!("segment {} not valid for site {}", s.segment, site)));
            }
        }
        Ok(Self { site,
                  segments,
                  generated_at: Utc::now() })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_segment_from_other_site() {
        let reading = SegmentReading { segment: "LAD".to_string(),
                                       lumen_area_mm2: 12.0,
                                       wall_area_mm2: 8.0,
                                       max_wall_thickness_mm: 1.4,
                                       normalized_wall_index: 0.4 };
        assert!(ReadingsRecord::new(BodySite::Carotid, vec![reading]).is_err());
    }
}
