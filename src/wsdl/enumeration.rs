use std::fmt;

use super::error::GeneratorError;

/// A value accepted by an enumeration. Values arrive from schema documents
/// as text; under an `integer` restriction they are coerced to numbers when
/// added.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum EnumValue {
    Text(String),
    Int(i64),
}

impl fmt::Display for EnumValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Int(int) => write!(f, "{int}"),
        }
    }
}

/// A simple type restricted to a finite set of literal values.
#[derive(Clone, Debug)]
pub struct EnumType {
    name: String,
    restriction: String,
    values: Vec<EnumValue>,
    default: Option<EnumValue>,
}

impl EnumType {
    pub fn new(name: impl Into<String>, restriction: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            restriction: restriction.into(),
            values: Vec::new(),
            default: None,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// The declared restriction kind, e.g. `string` or `integer`.
    pub fn restriction(&self) -> &str {
        &self.restriction
    }

    /// Adds a value, type-checking textual and integer restrictions. Under
    /// `integer`, textual input is coerced to a number first. Any other
    /// restriction kind only requires the value to be present. The first
    /// accepted value additionally becomes the default.
    pub fn add_value(&mut self, value: Option<EnumValue>) -> Result<(), GeneratorError> {
        let invalid = |value: &Option<EnumValue>| GeneratorError::InvalidValue {
            value: value.as_ref().map(EnumValue::to_string).unwrap_or_default(),
            restriction: self.restriction.clone(),
        };

        let accepted = match self.restriction.as_str() {
            "string" => match value {
                Some(EnumValue::Text(text)) => EnumValue::Text(text),
                other => return Err(invalid(&other)),
            },
            "integer" => match value {
                Some(EnumValue::Text(text)) => {
                    let int = text
                        .trim()
                        .parse::<i64>()
                        .map_err(|_| invalid(&Some(EnumValue::Text(text.clone()))))?;
                    EnumValue::Int(int)
                }
                Some(EnumValue::Int(int)) => EnumValue::Int(int),
                None => return Err(invalid(&None)),
            },
            _ => match value {
                Some(value) => value,
                None => return Err(invalid(&None)),
            },
        };

        if self.default.is_none() {
            self.default = Some(accepted.clone());
        }
        self.values.push(accepted);
        Ok(())
    }

    pub fn values(&self) -> &[EnumValue] {
        &self.values
    }

    /// The first value that was successfully added, if any.
    pub fn default_value(&self) -> Option<&EnumValue> {
        self.default.as_ref()
    }

    /// A comma separated list of all accepted values.
    pub fn valid_values(&self) -> String {
        self.values
            .iter()
            .map(EnumValue::to_string)
            .collect::<Vec<_>>()
            .join(", ")
    }
}
