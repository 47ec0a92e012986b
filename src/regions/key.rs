// src/regions/key.rs

use super::table::TableError;
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};

pub const HOKKAIDO: &str = "北海道";
pub const HOKKAIDO_PARTS: [&str; 4] = ["道南", "道央", "道北", "道東"];

/// A prefecture, optionally narrowed to one Hokkaido sub-region.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct RegionKey {
    prefecture: String,
    hokkaido_part: Option<String>,
}

impl RegionKey {
    pub fn prefecture(name: impl Into<String>) -> Self {
        Self {
            prefecture: name.into(),
            hokkaido_part: None,
        }
    }

    pub fn hokkaido(part: impl Into<String>) -> Self {
        Self {
            prefecture: HOKKAIDO.to_string(),
            hokkaido_part: Some(part.into()),
        }
    }

    /// Builds a key from loose input. The part is only kept for Hokkaido and
    /// only when it is non-empty.
    pub fn new(prefecture: impl Into<String>, hokkaido_part: Option<&str>) -> Self {
        let prefecture = prefecture.into();
        let hokkaido_part = hokkaido_part
            .filter(|part| prefecture == HOKKAIDO && !part.is_empty())
            .map(str::to_string);
        Self {
            prefecture,
            hokkaido_part,
        }
    }

    pub fn prefecture_name(&self) -> &str {
        &self.prefecture
    }

    pub fn hokkaido_part(&self) -> Option<&str> {
        self.hokkaido_part.as_deref()
    }

    /// Key used by lookup tables: `"北海道|道央"` or the bare prefecture name.
    pub fn table_key(&self) -> String {
        match &self.hokkaido_part {
            Some(part) => format!("{}|{}", self.prefecture, part),
            None => self.prefecture.clone(),
        }
    }

    /// Label for display, e.g. `北海道（道央）`
    pub fn label(&self) -> String {
        match &self.hokkaido_part {
            Some(part) => format!("{}（{}）", self.prefecture, part),
            None => self.prefecture.clone(),
        }
    }
}

impl fmt::Display for RegionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.table_key())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Species {
    #[serde(rename = "熊")]
    Bear,
    #[serde(rename = "鹿")]
    Deer,
    #[serde(rename = "猪")]
    Boar,
}

impl Species {
    pub const ALL: [Species; 3] = [Species::Bear, Species::Deer, Species::Boar];

    /// Japanese name, as used in keys and tables
    pub fn as_str(self) -> &'static str {
        match self {
            Species::Bear => "熊",
            Species::Deer => "鹿",
            Species::Boar => "猪",
        }
    }
}

impl FromStr for Species {
    type Err = TableError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "熊" | "bear" => Ok(Species::Bear),
            "鹿" | "deer" => Ok(Species::Deer),
            "猪" | "boar" => Ok(Species::Boar),
            other => Err(TableError::UnknownSpecies(other.to_string())),
        }
    }
}

impl fmt::Display for Species {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TimeOfDay {
    #[default]
    Morning,
    Afternoon,
}

impl TimeOfDay {
    /// `午前`, `AM`, `am` and `morning` are morning; everything else is
    /// afternoon.
    pub fn normalize(value: &str) -> Self {
        match value {
            "午前" | "AM" | "am" | "morning" => TimeOfDay::Morning,
            _ => TimeOfDay::Afternoon,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            TimeOfDay::Morning => "午前",
            TimeOfDay::Afternoon => "午後",
        }
    }
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
