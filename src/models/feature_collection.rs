use {
    crate::domain::ProbabilityZone,
    chrono::{DateTime, Utc},
    serde::{Deserialize, Serialize},
    std::cmp::Ordering,
};

/// Export wrapper: zones sorted highest-probability first so renderers
/// draw the hottest band last-on-top, plus collection-level metadata.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeatureCollection {
    #[serde(rename = "type")]
    pub collection_type: String,
    pub features: Vec<ProbabilityZone>,
    pub properties: CollectionMetadata,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionMetadata {
    pub total_zones: usize,
    pub max_probability: f64,
    pub generated_at: DateTime<Utc>,
    pub coordinate_system: String,
}

impl FeatureCollection {
    pub fn from_zones(mut zones: Vec<ProbabilityZone>) -> Self {
        zones.sort_by(|a, b| {
            b.properties
                .probability
                .partial_cmp(&a.properties.probability)
                .unwrap_or(Ordering::Equal)
        });
        let max_probability = zones
            .first()
            .map(|zone| zone.properties.probability)
            .unwrap_or(0.0);
        Self {
            collection_type: "FeatureCollection".to_string(),
            properties: CollectionMetadata {
                total_zones: zones.len(),
                max_probability,
                generated_at: Utc::now(),
                coordinate_system: "WGS84".to_string(),
            },
            features: zones,
        }
    }
}

/// Accepted prior-zone input shapes: a full FeatureCollection or a bare
/// array of features.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum ZoneDocument {
    Collection { features: Vec<ProbabilityZone> },
    Features(Vec<ProbabilityZone>),
}

impl ZoneDocument {
    pub fn into_zones(self) -> Vec<ProbabilityZone> {
        match self {
            ZoneDocument::Collection { features } => features,
            ZoneDocument::Features(features) => features,
        }
    }
}
