use {
    chrono::{DateTime, Utc},
    serde::{Deserialize, Serialize},
    strum_macros::{Display, EnumIter},
};

/// Closed set of field report kinds. Adding a kind is a compile-time
/// extension: every kernel match over this enum must name the new variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumIter)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum EvidenceKind {
    /// Physical wreckage recovered or photographed. High trust, tight kernel.
    Debris,
    /// ELT/ULB or radio detection. Could be reflected or scattered.
    Signal,
    /// Human observation. Broad positional uncertainty.
    Sighting,
    /// An area searched with no findings. Suppresses instead of attracting.
    Negative,
}

/// One field report. `confidence` is the reporter's own certainty,
/// `reliability` is how much the source is trusted overall; both default
/// to 0.5 when the wire payload omits them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evidence {
    pub lat: f64,
    pub lon: f64,
    #[serde(rename = "type")]
    pub kind: EvidenceKind,
    #[serde(default = "default_half")]
    pub confidence: f64,
    #[serde(default = "default_half")]
    pub reliability: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

fn default_half() -> f64 {
    0.5
}

impl Evidence {
    pub fn new(lat: f64, lon: f64, kind: EvidenceKind) -> Self {
        Self {
            lat,
            lon,
            kind,
            confidence: default_half(),
            reliability: default_half(),
            timestamp: None,
        }
    }

    /// Report location as [lon, lat], the vertex order zones use.
    #[inline]
    pub fn location(&self) -> [f64; 2] {
        [self.lon, self.lat]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_round_trips_lowercase() {
        let json = serde_json::to_string(&EvidenceKind::Debris).unwrap();
        assert_eq!(json, "\"debris\"");
        let kind: EvidenceKind = serde_json::from_str("\"negative\"").unwrap();
        assert_eq!(kind, EvidenceKind::Negative);
    }

    #[test]
    fn unknown_kind_is_a_parse_error() {
        let raw = r#"{"lat": 1.0, "lon": 2.0, "type": "rumour"}"#;
        assert!(serde_json::from_str::<Evidence>(raw).is_err());
    }

    #[test]
    fn confidence_and_reliability_default_to_half() {
        let raw = r#"{"lat": 1.0, "lon": 2.0, "type": "signal"}"#;
        let ev: Evidence = serde_json::from_str(raw).unwrap();
        assert_eq!(ev.confidence, 0.5);
        assert_eq!(ev.reliability, 0.5);
        assert!(ev.timestamp.is_none());
    }

    #[test]
    fn timestamp_parses_rfc3339() {
        let raw = r#"{"lat": 1.0, "lon": 2.0, "type": "debris", "timestamp": "2026-03-09T06:30:00Z"}"#;
        let ev: Evidence = serde_json::from_str(raw).unwrap();
        assert!(ev.timestamp.is_some());
    }

    #[test]
    fn display_is_lowercase() {
        assert_eq!(EvidenceKind::Sighting.to_string(), "sighting");
    }
}
