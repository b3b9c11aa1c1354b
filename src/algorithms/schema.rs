//! Statically declared, typed algorithm settings.
//!
//! Every algorithm publishes an ordered list of [`SettingSpec`]s describing the knobs it
//! exposes (start vertex, early-exit flag, ...). Front ends read this list to build
//! their editors and then go through [`GraphAlgorithm::get_setting`] and
//! [`GraphAlgorithm::set_setting`] with [`SettingValue`]s; nothing is discovered
//! through introspection at runtime.
//!
//! [`GraphAlgorithm::get_setting`]: crate::algorithms::GraphAlgorithm::get_setting
//! [`GraphAlgorithm::set_setting`]: crate::algorithms::GraphAlgorithm::set_setting

use std::fmt;

use serde::Serialize;
use strum::{Display, IntoStaticStr};

use crate::{graph::VertexId, Error, Result};

/// The value type a setting accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, IntoStaticStr, Serialize)]
#[strum(serialize_all = "kebab-case")]
#[serde(rename_all = "kebab-case")]
pub enum SettingKind {
    /// A vertex id
    Vertex,
    /// A vertex id or nothing
    OptionalVertex,
    /// A flag
    Bool,
    /// A signed integer
    Integer,
}

/// Declaration of one algorithm setting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SettingSpec {
    /// Name used with `get_setting` / `set_setting`
    pub name: &'static str,
    /// Accepted value type
    pub kind: SettingKind,
    /// One-line description for editors and `--help` style listings
    pub description: &'static str,
}

impl SettingSpec {
    /// A required vertex setting.
    #[must_use]
    pub const fn vertex(name: &'static str, description: &'static str) -> Self {
        SettingSpec {
            name,
            kind: SettingKind::Vertex,
            description,
        }
    }

    /// An optional vertex setting.
    #[must_use]
    pub const fn optional_vertex(name: &'static str, description: &'static str) -> Self {
        SettingSpec {
            name,
            kind: SettingKind::OptionalVertex,
            description,
        }
    }

    /// A boolean setting.
    #[must_use]
    pub const fn flag(name: &'static str, description: &'static str) -> Self {
        SettingSpec {
            name,
            kind: SettingKind::Bool,
            description,
        }
    }

    /// An integer setting.
    #[must_use]
    pub const fn integer(name: &'static str, description: &'static str) -> Self {
        SettingSpec {
            name,
            kind: SettingKind::Integer,
            description,
        }
    }
}

/// The start vertex setting shared by most algorithms.
pub const START: SettingSpec = SettingSpec::vertex("start", "Vertex the algorithm starts from");

/// The optional end vertex setting of the single-source shortest path algorithms.
pub const END: SettingSpec = SettingSpec::optional_vertex(
    "end",
    "Target vertex; without one the whole shortest-path tree is reported",
);

/// A typed setting value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum SettingValue {
    /// A vertex id
    Vertex(VertexId),
    /// A vertex id or nothing
    OptionalVertex(Option<VertexId>),
    /// A flag
    Bool(bool),
    /// A signed integer
    Integer(i64),
}

impl SettingValue {
    /// Parses `text` as a value of `spec`'s kind.
    ///
    /// Optional vertices accept `none` (or an empty string) for "no vertex".
    ///
    /// # Errors
    ///
    /// Returns [`Error::SettingType`] if `text` is not a valid value of that kind.
    pub fn parse(spec: &SettingSpec, text: &str) -> Result<Self> {
        let text = text.trim();
        let mismatch = || Error::SettingType {
            name: spec.name,
            expected: spec.kind.into(),
        };

        match spec.kind {
            SettingKind::Vertex => text
                .parse::<usize>()
                .map(|index| SettingValue::Vertex(VertexId::new(index)))
                .map_err(|_| mismatch()),
            SettingKind::OptionalVertex => {
                if text.is_empty() || text.eq_ignore_ascii_case("none") {
                    Ok(SettingValue::OptionalVertex(None))
                } else {
                    text.parse::<usize>()
                        .map(|index| SettingValue::OptionalVertex(Some(VertexId::new(index))))
                        .map_err(|_| mismatch())
                }
            }
            SettingKind::Bool => text
                .parse::<bool>()
                .map(SettingValue::Bool)
                .map_err(|_| mismatch()),
            SettingKind::Integer => text
                .parse::<i64>()
                .map(SettingValue::Integer)
                .map_err(|_| mismatch()),
        }
    }

    /// Extracts a vertex for `spec`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SettingType`] for any other kind of value.
    pub fn into_vertex(self, spec: &SettingSpec) -> Result<VertexId> {
        match self {
            SettingValue::Vertex(vertex) | SettingValue::OptionalVertex(Some(vertex)) => Ok(vertex),
            _ => Err(Error::SettingType {
                name: spec.name,
                expected: SettingKind::Vertex.into(),
            }),
        }
    }

    /// Extracts an optional vertex for `spec`; a plain vertex is accepted as `Some`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SettingType`] for any other kind of value.
    pub fn into_optional_vertex(self, spec: &SettingSpec) -> Result<Option<VertexId>> {
        match self {
            SettingValue::Vertex(vertex) => Ok(Some(vertex)),
            SettingValue::OptionalVertex(vertex) => Ok(vertex),
            _ => Err(Error::SettingType {
                name: spec.name,
                expected: SettingKind::OptionalVertex.into(),
            }),
        }
    }

    /// Extracts a flag for `spec`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SettingType`] for any other kind of value.
    pub fn into_bool(self, spec: &SettingSpec) -> Result<bool> {
        match self {
            SettingValue::Bool(flag) => Ok(flag),
            _ => Err(Error::SettingType {
                name: spec.name,
                expected: SettingKind::Bool.into(),
            }),
        }
    }

    /// Extracts an integer for `spec`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::SettingType`] for any other kind of value.
    pub fn into_integer(self, spec: &SettingSpec) -> Result<i64> {
        match self {
            SettingValue::Integer(value) => Ok(value),
            _ => Err(Error::SettingType {
                name: spec.name,
                expected: SettingKind::Integer.into(),
            }),
        }
    }
}

impl fmt::Display for SettingValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SettingValue::Vertex(vertex) | SettingValue::OptionalVertex(Some(vertex)) => {
                write!(f, "{vertex}")
            }
            SettingValue::OptionalVertex(None) => write!(f, "none"),
            SettingValue::Bool(flag) => write!(f, "{flag}"),
            SettingValue::Integer(value) => write!(f, "{value}"),
        }
    }
}

/// Looks up `name` in an algorithm's schema.
///
/// # Errors
///
/// Returns [`Error::UnknownSetting`] if the schema has no such entry.
pub fn find_setting(schema: &'static [SettingSpec], name: &str) -> Result<&'static SettingSpec> {
    schema
        .iter()
        .find(|spec| spec.name == name)
        .ok_or_else(|| Error::UnknownSetting(name.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EARLY_EXIT: SettingSpec = SettingSpec::flag("early_exit", "Stop after a quiet pass");
    const LIMIT: SettingSpec = SettingSpec::integer("limit", "Upper bound");
    const SCHEMA: &[SettingSpec] = &[START, END, EARLY_EXIT];

    #[test]
    fn test_parse_each_kind() {
        assert_eq!(
            SettingValue::parse(&START, " 4 ").unwrap(),
            SettingValue::Vertex(VertexId::new(4))
        );
        assert_eq!(
            SettingValue::parse(&END, "none").unwrap(),
            SettingValue::OptionalVertex(None)
        );
        assert_eq!(
            SettingValue::parse(&END, "2").unwrap(),
            SettingValue::OptionalVertex(Some(VertexId::new(2)))
        );
        assert_eq!(
            SettingValue::parse(&EARLY_EXIT, "true").unwrap(),
            SettingValue::Bool(true)
        );
        assert_eq!(
            SettingValue::parse(&LIMIT, "-3").unwrap(),
            SettingValue::Integer(-3)
        );
    }

    #[test]
    fn test_parse_rejects_wrong_kind() {
        let err = SettingValue::parse(&START, "yes").unwrap_err();
        assert!(matches!(
            err,
            Error::SettingType {
                name: "start",
                expected: "vertex"
            }
        ));
    }

    #[test]
    fn test_conversions() {
        let vertex = SettingValue::Vertex(VertexId::new(1));
        assert_eq!(vertex.into_vertex(&START).unwrap(), VertexId::new(1));
        assert_eq!(
            vertex.into_optional_vertex(&END).unwrap(),
            Some(VertexId::new(1))
        );
        assert!(vertex.into_bool(&EARLY_EXIT).is_err());
        assert!(SettingValue::Bool(true).into_integer(&LIMIT).is_err());
    }

    #[test]
    fn test_find_setting() {
        assert_eq!(find_setting(SCHEMA, "end").unwrap().kind, SettingKind::OptionalVertex);
        assert!(matches!(
            find_setting(SCHEMA, "nope"),
            Err(Error::UnknownSetting(name)) if name == "nope"
        ));
    }

    #[test]
    fn test_display() {
        assert_eq!(SettingValue::OptionalVertex(None).to_string(), "none");
        assert_eq!(SettingValue::Vertex(VertexId::new(3)).to_string(), "3");
    }
}
