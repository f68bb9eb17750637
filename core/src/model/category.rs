use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Work,
    Study,
    Household,
    Health,
    Finance,
    Wellness,
    School,
}

impl Default for Category {
    fn default() -> Self {
        Category::Work
    }
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Work,
        Category::Study,
        Category::Household,
        Category::Health,
        Category::Finance,
        Category::Wellness,
        Category::School,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Category::Work => "Work",
            Category::Study => "Study",
            Category::Household => "Household",
            Category::Health => "Health",
            Category::Finance => "Finance",
            Category::Wellness => "Wellness",
            Category::School => "School",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Category::Work => "💼",
            Category::Study => "📚",
            Category::Household => "🏠",
            Category::Health => "💪",
            Category::Finance => "💰",
            Category::Wellness => "🧘",
            Category::School => "🎒",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// Accepts the English names and the Portuguese ones stored by older clients.
impl FromStr for Category {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "work" | "trabalho" => Ok(Category::Work),
            "study" | "studies" | "estudos" => Ok(Category::Study),
            "household" | "home" | "casa" => Ok(Category::Household),
            "health" | "saude" | "saúde" => Ok(Category::Health),
            "finance" | "finances" | "financas" | "finanças" => Ok(Category::Finance),
            "wellness" | "bem-estar" => Ok(Category::Wellness),
            "school" | "escola" => Ok(Category::School),
            other => Err(anyhow!("Unknown category: '{}'", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_category_names() {
        assert_eq!("study".parse::<Category>().unwrap(), Category::Study);
        assert_eq!("Estudos".parse::<Category>().unwrap(), Category::Study);
        assert_eq!("bem-estar".parse::<Category>().unwrap(), Category::Wellness);
        assert_eq!(" finanças ".parse::<Category>().unwrap(), Category::Finance);
        assert!("gardening".parse::<Category>().is_err());
    }

    #[test]
    fn test_default_is_work() {
        assert_eq!(Category::default(), Category::Work);
    }

    #[test]
    fn test_serde_uses_snake_case() {
        let json = serde_json::to_string(&Category::Household).unwrap();
        assert_eq!(json, "\"household\"");
    }
}
