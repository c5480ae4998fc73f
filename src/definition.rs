//! Compact textual definitions for atlases and image groups, like
//! `props@1024x512:2` or `furniture@256`.

use std::{fmt, num::ParseFloatError, str::FromStr};

use serde::{de::Error as _, Deserialize, Deserializer, Serialize, Serializer};
use thiserror::Error;

/// The name, canvas size, and margin of one atlas.
///
/// Written as `name@WIDTHxHEIGHT` with an optional `:MARGIN` suffix.
#[derive(Debug, Clone, PartialEq)]
pub struct AtlasDefinition {
    pub name: String,
    pub size: (f64, f64),
    pub margin: f64,
}

impl FromStr for AtlasDefinition {
    type Err = DefinitionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (name, params) = split_name(value)?;

        let mut sections = params.split(':');
        let dimensions = sections.next().unwrap_or_default();
        let margin = sections.next();

        if sections.next().is_some() {
            return Err(DefinitionError::TooManySections {
                definition: value.to_owned(),
            });
        }

        let size = parse_size(dimensions)?;
        if size.0 <= 0.0 || size.1 <= 0.0 {
            return Err(DefinitionError::EmptyCanvas {
                definition: value.to_owned(),
            });
        }

        let margin = match margin {
            Some(margin) => parse_number(margin)?,
            None => 0.0,
        };
        if margin < 0.0 {
            return Err(DefinitionError::NegativeMargin {
                definition: value.to_owned(),
            });
        }

        Ok(Self {
            name: name.to_owned(),
            size,
            margin,
        })
    }
}

impl fmt::Display for AtlasDefinition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}@{}x{}", self.name, self.size.0, self.size.1)?;

        if self.margin != 0.0 {
            write!(f, ":{}", self.margin)?;
        }

        Ok(())
    }
}

/// A named group of images, optionally limited to a maximum edge length.
///
/// Written as `name` or `name@MAX`.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupRef {
    pub name: String,
    pub max_size: Option<f64>,
}

impl GroupRef {
    /// The size an image in this group should occupy in the atlas.
    pub fn constrain(&self, size: (f64, f64)) -> (f64, f64) {
        match self.max_size {
            Some(max_size) => constrain_size(size, max_size),
            None => size,
        }
    }
}

impl FromStr for GroupRef {
    type Err = DefinitionError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        if !value.contains('@') {
            if value.is_empty() {
                return Err(DefinitionError::EmptyName {
                    definition: value.to_owned(),
                });
            }

            return Ok(Self {
                name: value.to_owned(),
                max_size: None,
            });
        }

        let (name, max_size) = split_name(value)?;
        let max_size = parse_number(max_size)?;

        if max_size <= 0.0 {
            return Err(DefinitionError::EmptyCanvas {
                definition: value.to_owned(),
            });
        }

        Ok(Self {
            name: name.to_owned(),
            max_size: Some(max_size),
        })
    }
}

impl fmt::Display for GroupRef {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.max_size {
            Some(max_size) => write!(f, "{}@{}", self.name, max_size),
            None => write!(f, "{}", self.name),
        }
    }
}

/// Scales `size` down uniformly so that neither edge exceeds `max_size`.
/// Sizes that already fit are returned unchanged.
pub fn constrain_size(size: (f64, f64), max_size: f64) -> (f64, f64) {
    let (width, height) = size;

    if width > max_size || height > max_size {
        let scale = (max_size / width).min(max_size / height);
        (width * scale, height * scale)
    } else {
        size
    }
}

/// Parses a `WIDTHxHEIGHT` pair, like `1024x512`.
pub fn parse_size(value: &str) -> Result<(f64, f64), DefinitionError> {
    let mut parts = value.split('x');

    match (parts.next(), parts.next(), parts.next()) {
        (Some(width), Some(height), None) => Ok((parse_number(width)?, parse_number(height)?)),
        _ => Err(DefinitionError::BadSize {
            value: value.to_owned(),
        }),
    }
}

fn split_name(value: &str) -> Result<(&str, &str), DefinitionError> {
    let mut parts = value.splitn(2, '@');
    let name = parts.next().unwrap_or_default();

    let params = parts.next().ok_or_else(|| DefinitionError::MissingAt {
        definition: value.to_owned(),
    })?;

    if name.is_empty() {
        return Err(DefinitionError::EmptyName {
            definition: value.to_owned(),
        });
    }

    Ok((name, params))
}

fn parse_number(value: &str) -> Result<f64, DefinitionError> {
    let number: f64 = value
        .trim()
        .parse()
        .map_err(|source| DefinitionError::BadNumber {
            value: value.to_owned(),
            source,
        })?;

    if number.is_finite() {
        Ok(number)
    } else {
        Err(DefinitionError::NotFinite {
            value: value.to_owned(),
        })
    }
}

macro_rules! string_serde {
    ($ty:ty) => {
        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.collect_str(self)
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let value = String::deserialize(deserializer)?;

                value.parse().map_err(D::Error::custom)
            }
        }
    };
}

string_serde!(AtlasDefinition);
string_serde!(GroupRef);

#[derive(Debug, Error)]
pub enum DefinitionError {
    #[error("expected NAME@... in definition '{definition}'")]
    MissingAt { definition: String },

    #[error("definition '{definition}' has an empty name")]
    EmptyName { definition: String },

    #[error("definition '{definition}' has more sections than NAME@WIDTHxHEIGHT:MARGIN")]
    TooManySections { definition: String },

    #[error("expected a size like 1024x512, got '{value}'")]
    BadSize { value: String },

    #[error("'{value}' is not a number: {source}")]
    BadNumber {
        value: String,
        source: ParseFloatError,
    },

    #[error("'{value}' is not a finite number")]
    NotFinite { value: String },

    #[error("sizes in definition '{definition}' must be greater than zero")]
    EmptyCanvas { definition: String },

    #[error("margin in definition '{definition}' must not be negative")]
    NegativeMargin { definition: String },
}
