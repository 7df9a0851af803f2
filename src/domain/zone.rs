use {
    crate::domain::EvidenceKind,
    crate::utils::ring_centroid,
    serde::{Deserialize, Serialize},
};

/// GeoJSON-shaped polygon geometry: `coordinates` holds rings of
/// [lon, lat] vertices, exterior ring first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneGeometry {
    #[serde(rename = "type")]
    pub geometry_type: String,
    pub coordinates: Vec<Vec<[f64; 2]>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneProperties {
    #[serde(default = "default_probability")]
    pub probability: f64,
    #[serde(default)]
    pub updated_with_evidence: bool,
    #[serde(default)]
    pub evidence_type: Option<EvidenceKind>,
    #[serde(default)]
    pub confidence: Option<f64>,
    /// Set only on zones produced by the simplified rectangular fallback.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
}

fn default_probability() -> f64 {
    0.5
}

impl Default for ZoneProperties {
    fn default() -> Self {
        Self {
            probability: default_probability(),
            updated_with_evidence: false,
            evidence_type: None,
            confidence: None,
            method: None,
        }
    }
}

/// One confidence-band zone. Zones in a collection are contour bands;
/// they are not required to be disjoint or to tile the plane.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbabilityZone {
    #[serde(rename = "type", default = "feature_tag")]
    pub feature_type: String,
    pub geometry: ZoneGeometry,
    #[serde(default)]
    pub properties: ZoneProperties,
}

fn feature_tag() -> String {
    "Feature".to_string()
}

impl ProbabilityZone {
    /// Zone from an exterior ring of [lon, lat] vertices.
    pub fn polygon(ring: Vec<[f64; 2]>, properties: ZoneProperties) -> Self {
        Self {
            feature_type: feature_tag(),
            geometry: ZoneGeometry {
                geometry_type: "Polygon".to_string(),
                coordinates: vec![ring],
            },
            properties,
        }
    }

    /// Axis-aligned closed rectangle centered on [lon, lat].
    pub fn rectangle(center: [f64; 2], half_width: f64, properties: ZoneProperties) -> Self {
        let [lon, lat] = center;
        let ring = vec![
            [lon - half_width, lat - half_width],
            [lon + half_width, lat - half_width],
            [lon + half_width, lat + half_width],
            [lon - half_width, lat + half_width],
            [lon - half_width, lat - half_width],
        ];
        Self::polygon(ring, properties)
    }

    #[inline]
    pub fn is_polygon(&self) -> bool {
        self.geometry.geometry_type == "Polygon"
    }

    /// Exterior ring, when this zone is a non-empty polygon.
    pub fn exterior_ring(&self) -> Option<&[[f64; 2]]> {
        if !self.is_polygon() {
            return None;
        }
        self.geometry
            .coordinates
            .first()
            .map(|ring| ring.as_slice())
            .filter(|ring| !ring.is_empty())
    }

    /// Centroid of the exterior ring.
    pub fn centroid(&self) -> Option<[f64; 2]> {
        self.exterior_ring().and_then(ring_centroid)
    }
}
