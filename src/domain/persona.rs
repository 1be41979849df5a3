// SPDX-FileCopyrightText: 2026 Sephyi <me@sephy.io>
//
// SPDX-License-Identifier: GPL-3.0-only

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Behavioral archetype that decides when a commit appears to happen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum Persona {
    /// Next Saturday, 10:00–17:59.
    WeekendWarrior,
    /// 23:00–03:59.
    NightOwl,
    /// Commit now, no manipulation.
    #[default]
    Standard,
}

impl Persona {
    pub const ALL: [Persona; 3] = [Self::WeekendWarrior, Self::NightOwl, Self::Standard];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::WeekendWarrior => "weekend_warrior",
            Self::NightOwl => "night_owl",
            Self::Standard => "standard",
        }
    }
}

impl fmt::Display for Persona {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Persona {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace('-', "_");
        match normalized.as_str() {
            "weekend_warrior" => Ok(Self::WeekendWarrior),
            "night_owl" => Ok(Self::NightOwl),
            "standard" => Ok(Self::Standard),
            _ => Err(Error::InvalidPersona(s.to_string())),
        }
    }
}

impl TryFrom<String> for Persona {
    type Error = Error;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}
