use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};

/// Value kind a UCI option accepts.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ParamKind {
    Text,
    Int,
    Bool,
}

impl ParamKind {
    pub fn name(self) -> &'static str {
        match self {
            ParamKind::Text => "string",
            ParamKind::Int => "integer",
            ParamKind::Bool => "boolean",
        }
    }
}

/// A runtime value for a UCI option. Booleans render lowercase on the wire,
/// which is what `setoption` expects.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Text(String),
    Int(i64),
    Bool(bool),
}

impl ParamValue {
    pub fn kind(&self) -> ParamKind {
        match self {
            ParamValue::Text(_) => ParamKind::Text,
            ParamValue::Int(_) => ParamKind::Int,
            ParamValue::Bool(_) => ParamKind::Bool,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            ParamValue::Int(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ParamValue::Bool(v) => Some(*v),
            _ => None,
        }
    }
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Text(s) => write!(f, "{}", s),
            ParamValue::Int(v) => write!(f, "{}", v),
            ParamValue::Bool(b) => write!(f, "{}", b),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::Text(s.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(s: String) -> Self {
        ParamValue::Text(s)
    }
}

impl From<i64> for ParamValue {
    fn from(v: i64) -> Self {
        ParamValue::Int(v)
    }
}

impl From<bool> for ParamValue {
    fn from(b: bool) -> Self {
        ParamValue::Bool(b)
    }
}

/// Type and bounds restriction for one engine option.
#[derive(Clone, Copy, Debug)]
pub struct ParamSpec {
    pub name: &'static str,
    pub kind: ParamKind,
    pub min: Option<i64>,
    pub max: Option<i64>,
}

// Stockfish caps Hash at 2048 MB on 32-bit builds and 33554432 MB otherwise.
#[cfg(any(target_pointer_width = "16", target_pointer_width = "32"))]
const HASH_MAX: i64 = 1 << 11;
#[cfg(not(any(target_pointer_width = "16", target_pointer_width = "32")))]
const HASH_MAX: i64 = 1 << 25;

/// Restrictions mirror the engine's own option table.
pub const PARAM_SPECS: &[ParamSpec] = &[
    ParamSpec { name: "Debug Log File", kind: ParamKind::Text, min: None, max: None },
    ParamSpec { name: "Threads", kind: ParamKind::Int, min: Some(1), max: Some(1024) },
    ParamSpec { name: "Hash", kind: ParamKind::Int, min: Some(1), max: Some(HASH_MAX) },
    ParamSpec { name: "Ponder", kind: ParamKind::Bool, min: None, max: None },
    ParamSpec { name: "MultiPV", kind: ParamKind::Int, min: Some(1), max: Some(500) },
    ParamSpec { name: "Skill Level", kind: ParamKind::Int, min: Some(0), max: Some(20) },
    ParamSpec { name: "Move Overhead", kind: ParamKind::Int, min: Some(0), max: Some(5000) },
    ParamSpec { name: "Slow Mover", kind: ParamKind::Int, min: Some(10), max: Some(1000) },
    ParamSpec { name: "UCI_Chess960", kind: ParamKind::Bool, min: None, max: None },
    ParamSpec { name: "UCI_LimitStrength", kind: ParamKind::Bool, min: None, max: None },
    ParamSpec { name: "UCI_Elo", kind: ParamKind::Int, min: Some(1320), max: Some(3190) },
    ParamSpec { name: "Contempt", kind: ParamKind::Int, min: Some(-100), max: Some(100) },
    ParamSpec { name: "Min Split Depth", kind: ParamKind::Int, min: Some(0), max: Some(12) },
    ParamSpec { name: "Minimum Thinking Time", kind: ParamKind::Int, min: Some(0), max: Some(5000) },
    ParamSpec { name: "UCI_ShowWDL", kind: ParamKind::Bool, min: None, max: None },
];

pub fn spec_for(name: &str) -> Option<&'static ParamSpec> {
    PARAM_SPECS.iter().find(|s| s.name == name)
}

/// Checks a candidate value against the registry: the name must be known,
/// the kind must match exactly (booleans and integers never coerce), and
/// bounded integers must fall inside their inclusive range.
pub fn validate(name: &str, value: &ParamValue) -> Result<()> {
    let spec = spec_for(name).ok_or_else(|| EngineError::UnknownParameter(name.to_string()))?;
    if value.kind() != spec.kind {
        return Err(EngineError::TypeMismatch {
            name: name.to_string(),
            expected: spec.kind.name(),
            got: value.kind().name(),
        });
    }
    if let ParamValue::Int(v) = value {
        let min = spec.min.unwrap_or(i64::MIN);
        let max = spec.max.unwrap_or(i64::MAX);
        if *v < min || *v > max {
            return Err(EngineError::OutOfRange {
                name: name.to_string(),
                value: *v,
                min,
                max,
            });
        }
    }
    Ok(())
}

/// Engine defaults applied at session construction. `UCI_ShowWDL` is
/// deliberately absent: it is only switched on when the build supports it,
/// and never recorded in the session's parameter map.
pub fn default_parameters() -> Vec<(&'static str, ParamValue)> {
    vec![
        ("Debug Log File", ParamValue::Text(String::new())),
        ("Contempt", ParamValue::Int(0)),
        ("Min Split Depth", ParamValue::Int(0)),
        ("Threads", ParamValue::Int(1)),
        ("Ponder", ParamValue::Bool(false)),
        ("Hash", ParamValue::Int(16)),
        ("MultiPV", ParamValue::Int(1)),
        ("Skill Level", ParamValue::Int(20)),
        ("Move Overhead", ParamValue::Int(10)),
        ("Minimum Thinking Time", ParamValue::Int(20)),
        ("Slow Mover", ParamValue::Int(100)),
        ("UCI_Chess960", ParamValue::Bool(false)),
        ("UCI_LimitStrength", ParamValue::Bool(false)),
        ("UCI_Elo", ParamValue::Int(1350)),
    ]
}
