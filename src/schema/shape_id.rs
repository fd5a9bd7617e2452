use std::fmt;
use std::str::FromStr;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::SchemaError;

static SHAPE_ID: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^([A-Za-z_][A-Za-z0-9_]*(?:\.[A-Za-z_][A-Za-z0-9_]*)*)#([A-Za-z_][A-Za-z0-9_]*)(?:\$([A-Za-z_][A-Za-z0-9_]*))?$")
        .expect("shape id pattern is valid")
});

/// `namespace#Name` or `namespace#Name$member`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ShapeId {
    namespace: String,
    name: String,
    member: Option<String>,
}

impl ShapeId {
    pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
        Self { namespace: namespace.into(), name: name.into(), member: None }
    }

    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn member(&self) -> Option<&str> {
        self.member.as_deref()
    }

    /// Relative names (`Foo`) resolve against `namespace`.
    pub fn parse_relative(text: &str, namespace: &str) -> Result<Self, SchemaError> {
        if text.contains('#') {
            text.parse()
        } else {
            format!("{namespace}#{text}").parse()
        }
    }
}

impl FromStr for ShapeId {
    type Err = SchemaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let caps = SHAPE_ID
            .captures(s)
            .ok_or_else(|| SchemaError::InvalidShapeId(s.to_string()))?;
        Ok(Self {
            namespace: caps[1].to_string(),
            name: caps[2].to_string(),
            member: caps.get(3).map(|m| m.as_str().to_string()),
        })
    }
}

impl fmt::Display for ShapeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.namespace, self.name)?;
        if let Some(member) = &self.member {
            write!(f, "${member}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_and_displays_absolute_ids() {
        let id: ShapeId = "com.example.weather#Forecast".parse().unwrap();
        assert_eq!(id.namespace(), "com.example.weather");
        assert_eq!(id.name(), "Forecast");
        assert_eq!(id.member(), None);
        assert_eq!(id.to_string(), "com.example.weather#Forecast");

        let member: ShapeId = "example#Point$x".parse().unwrap();
        assert_eq!(member.member(), Some("x"));
        assert_eq!(member.to_string(), "example#Point$x");
    }

    #[test]
    fn rejects_malformed_ids() {
        for bad in ["Forecast", "#Forecast", "example#", "ex ample#Foo", "example#Foo$"] {
            assert!(bad.parse::<ShapeId>().is_err(), "{bad} should not parse");
        }
    }

    #[test]
    fn relative_names_take_the_given_namespace() {
        let id = ShapeId::parse_relative("Forecast", "example").unwrap();
        assert_eq!(id, ShapeId::new("example", "Forecast"));
        let abs = ShapeId::parse_relative("smithy.api#String", "example").unwrap();
        assert_eq!(abs.namespace(), "smithy.api");
    }
}
