//! Event envelope and the typed event catalog.
//!
//! The wire unit is one JSON object per WebSocket text message, shape
//! `{ "type": string, "status"?: object }`. The server treats payloads as
//! opaque ([`Envelope`]); the overlay decodes them into the closed
//! [`GameEvent`] catalog and ignores anything it cannot decode.

use serde::{Deserialize, Serialize};

/// Wire unit as the server sees it: discriminator plus opaque payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Envelope {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<serde_json::Value>,
}

impl Envelope {
    pub fn new(kind: impl Into<String>, status: Option<serde_json::Value>) -> Self {
        Self {
            kind: kind.into(),
            status,
        }
    }

    /// Greeting unicast to every freshly registered connection.
    pub fn hello(version: &str) -> Self {
        Self::new("hello", Some(serde_json::json!({ "version": version })))
    }
}

/// Typed event catalog as the overlay sees it. One variant per wire `type`;
/// the signal events carry no payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", content = "status")]
pub enum GameEvent {
    #[serde(rename = "hello")]
    Hello(HelloStatus),
    #[serde(rename = "sceneEvent")]
    Scene(SceneStatus),
    #[serde(rename = "TNHPhaseEvent")]
    Phase(PhaseStatus),
    #[serde(rename = "TNHHoldPhaseEvent")]
    HoldPhase(HoldPhaseStatus),
    #[serde(rename = "TNHScoreEvent")]
    Score(ScoreStatus),
    #[serde(rename = "TNHLostStealthBonus")]
    LostStealthBonus,
    #[serde(rename = "TNHLostNoHitBonus")]
    LostNoHitBonus,
    #[serde(rename = "playerDamage")]
    Damage(HealthStatus),
    #[serde(rename = "playerHeal")]
    Heal(HealthStatus),
    #[serde(rename = "playerKill")]
    Kill,
    #[serde(rename = "playerBuff")]
    Buff(BuffStatus),
    #[serde(rename = "ammoEvent")]
    Ammo(AmmoStatus),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HelloStatus {
    pub version: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SceneStatus {
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhaseStatus {
    /// `Take`, `Hold`, `Complete` or `Dead`.
    pub phase: String,
    pub level: i32,
    pub count: i32,
    #[serde(default)]
    pub seed: i64,
    #[serde(default)]
    pub hold: i32,
    #[serde(default)]
    pub supply: Vec<i32>,
    #[serde(default)]
    pub hold_name: Option<String>,
    #[serde(default)]
    pub supply_names: Option<Vec<String>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HoldPhaseStatus {
    /// `Analyzing`, `Hacking`, or a completion state.
    pub phase: String,
    pub level: i32,
    pub count: i32,
    #[serde(default)]
    pub encryption: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreStatus {
    /// Score event subtype, e.g. `HoldKill` or `HoldDecisecondsRemaining`.
    #[serde(rename = "type")]
    pub kind: String,
    pub value: i64,
    pub mult: i64,
    pub score: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthStatus {
    pub amount: f64,
    pub health: f64,
    pub max_health: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuffStatus {
    /// Buff kind, e.g. `QuadDamage` or `Regen`.
    #[serde(rename = "type")]
    pub kind: String,
    pub duration: BuffDuration,
    #[serde(default)]
    pub inverted: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AmmoStatus {
    pub weapon: String,
    #[serde(default)]
    pub hand: Option<i32>,
    pub round_type: String,
    pub round_class: String,
    pub current: u32,
    pub spent: u32,
    pub capacity: u32,
}

/// Buff duration on the wire: either an explicit number of seconds (an
/// override, which always wins) or one of the named duration classes.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BuffDuration {
    Seconds(f32),
    Class(DurationClass),
}

/// Named duration buckets with fixed second values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DurationClass {
    Full,
    Short,
    VeryShort,
    Blip,
    SuperLong,
}

impl DurationClass {
    pub fn seconds(self) -> f32 {
        match self {
            DurationClass::Full => 30.0,
            DurationClass::Short => 20.0,
            DurationClass::VeryShort => 10.0,
            DurationClass::Blip => 2.0,
            DurationClass::SuperLong => 40.0,
        }
    }
}

impl BuffDuration {
    pub fn seconds(self) -> f32 {
        match self {
            BuffDuration::Seconds(s) => s,
            BuffDuration::Class(c) => c.seconds(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hello_envelope_shape() {
        let text = serde_json::to_string(&Envelope::hello("0.1.0")).unwrap();
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["type"], "hello");
        assert_eq!(value["status"]["version"], "0.1.0");
    }

    #[test]
    fn signal_envelope_omits_status() {
        let text = serde_json::to_string(&Envelope::new("playerKill", None)).unwrap();
        assert_eq!(text, r#"{"type":"playerKill"}"#);
    }

    #[test]
    fn decodes_score_event() {
        let text = r#"{"type":"TNHScoreEvent","status":{"type":"HoldKill","value":1000,"mult":9,"score":9000}}"#;
        match serde_json::from_str::<GameEvent>(text).unwrap() {
            GameEvent::Score(s) => {
                assert_eq!(s.kind, "HoldKill");
                assert_eq!(s.value, 1000);
                assert_eq!(s.mult, 9);
                assert_eq!(s.score, 9000);
            }
            other => panic!("decoded wrong variant: {other:?}"),
        }
    }

    #[test]
    fn decodes_signal_event_without_status() {
        let event = serde_json::from_str::<GameEvent>(r#"{"type":"playerKill"}"#).unwrap();
        assert!(matches!(event, GameEvent::Kill));
    }

    #[test]
    fn decodes_ammo_event_fields() {
        let text = r#"{"type":"ammoEvent","status":{"weapon":"M1911","hand":1,"roundType":"a45_ACP","roundClass":"FMJ","current":7,"spent":0,"capacity":8}}"#;
        match serde_json::from_str::<GameEvent>(text).unwrap() {
            GameEvent::Ammo(a) => {
                assert_eq!(a.weapon, "M1911");
                assert_eq!(a.round_type, "a45_ACP");
                assert_eq!(a.capacity, 8);
            }
            other => panic!("decoded wrong variant: {other:?}"),
        }
    }

    #[test]
    fn unknown_type_is_an_error() {
        assert!(serde_json::from_str::<GameEvent>(r#"{"type":"mystery"}"#).is_err());
    }

    #[test]
    fn missing_required_field_is_an_error() {
        // A health event without maxHealth cannot drive the health bar.
        let text = r#"{"type":"playerDamage","status":{"amount":10,"health":50}}"#;
        assert!(serde_json::from_str::<GameEvent>(text).is_err());
    }

    #[test]
    fn buff_duration_accepts_class_or_override() {
        let class: BuffDuration = serde_json::from_str(r#""Short""#).unwrap();
        assert_eq!(class.seconds(), 20.0);
        let explicit: BuffDuration = serde_json::from_str("12.5").unwrap();
        assert_eq!(explicit.seconds(), 12.5);
    }

    #[test]
    fn duration_classes_resolve_to_fixed_table() {
        let expected = [
            (DurationClass::Blip, 2.0),
            (DurationClass::VeryShort, 10.0),
            (DurationClass::Short, 20.0),
            (DurationClass::Full, 30.0),
            (DurationClass::SuperLong, 40.0),
        ];
        for (class, seconds) in expected {
            assert_eq!(class.seconds(), seconds);
        }
    }

    #[test]
    fn phase_event_optional_fields_default() {
        let text = r#"{"type":"TNHPhaseEvent","status":{"phase":"Take","level":0,"count":5,"seed":123,"hold":2,"supply":[1,3]}}"#;
        match serde_json::from_str::<GameEvent>(text).unwrap() {
            GameEvent::Phase(p) => {
                assert_eq!(p.hold_name, None);
                assert_eq!(p.supply, vec![1, 3]);
            }
            other => panic!("decoded wrong variant: {other:?}"),
        }
    }
}
