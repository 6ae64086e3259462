// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Represents a task category.
///
/// Categories are fixed domain constants; a task must carry exactly one.
/// The string forms are the display labels used across the API surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    /// UI/UX Design
    #[serde(rename = "UI/UX Design")]
    UiUxDesign,
    /// App Design
    #[serde(rename = "App Design")]
    AppDesign,
    /// Web Development
    #[serde(rename = "Web Development")]
    WebDevelopment,
    /// Mobile Development
    #[serde(rename = "Mobile Development")]
    MobileDevelopment,
    /// Graphics Design
    #[serde(rename = "Graphics Design")]
    GraphicsDesign,
}

impl Category {
    /// All categories, in display order.
    pub const ALL: [Self; 5] = [
        Self::UiUxDesign,
        Self::AppDesign,
        Self::WebDevelopment,
        Self::MobileDevelopment,
        Self::GraphicsDesign,
    ];

    /// Returns the display string for this category.
    ///
    /// This is used for persistence and API serialization.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::UiUxDesign => "UI/UX Design",
            Self::AppDesign => "App Design",
            Self::WebDevelopment => "Web Development",
            Self::MobileDevelopment => "Mobile Development",
            Self::GraphicsDesign => "Graphics Design",
        }
    }

    /// Parses a category from its display string.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidCategory` if the string is not one of
    /// the fixed categories.
    pub fn parse(s: &str) -> Result<Self, DomainError> {
        match s {
            "UI/UX Design" => Ok(Self::UiUxDesign),
            "App Design" => Ok(Self::AppDesign),
            "Web Development" => Ok(Self::WebDevelopment),
            "Mobile Development" => Ok(Self::MobileDevelopment),
            "Graphics Design" => Ok(Self::GraphicsDesign),
            _ => Err(DomainError::InvalidCategory(s.to_string())),
        }
    }
}

impl FromStr for Category {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
