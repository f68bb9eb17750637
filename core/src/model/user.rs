use std::fmt;
use std::str::FromStr;

use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{StateError, StateResult};
use crate::model::category::Category;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Avatar {
    Cute,
    Serious,
    Funny,
    Military,
    Anime,
}

impl Default for Avatar {
    fn default() -> Self {
        Avatar::Cute
    }
}

impl Avatar {
    pub fn name(&self) -> &'static str {
        match self {
            Avatar::Cute => "Motivating Bunny",
            Avatar::Serious => "Determined Lion",
            Avatar::Funny => "Productive Clown",
            Avatar::Military => "Sergeant Action",
            Avatar::Anime => "Motivational Hero",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Avatar::Cute => "🐰",
            Avatar::Serious => "🦁",
            Avatar::Funny => "🤪",
            Avatar::Military => "🎖️",
            Avatar::Anime => "⚡",
        }
    }

    pub fn phrases(&self) -> &'static [&'static str] {
        match self {
            Avatar::Cute => &[
                "You can do it! 🌟",
                "One step at a time! 🐾",
                "I'm proud of you! 💖",
            ],
            Avatar::Serious => &[
                "Full focus. Let's go.",
                "Discipline is freedom.",
                "Every step counts.",
            ],
            Avatar::Funny => &[
                "Time to procrastinate... NOT! 😂",
                "Less streaming, more doing! 🎬",
                "You're amazing! (Literally)",
            ],
            Avatar::Military => &[
                "EXECUTE! Now!",
                "No excuses, soldier!",
                "Mission accomplished! Next!",
            ],
            Avatar::Anime => &[
                "Believe in your power! ✨",
                "The sky is your limit! 🌸",
                "Never give up! 💪",
            ],
        }
    }

    /// Picks a phrase deterministically; callers pass something that varies,
    /// like the minute of the day.
    pub fn phrase(&self, seed: usize) -> &'static str {
        let phrases = self.phrases();
        phrases[seed % phrases.len()]
    }
}

impl fmt::Display for Avatar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.emoji(), self.name())
    }
}

impl FromStr for Avatar {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "cute" | "fofo" => Ok(Avatar::Cute),
            "serious" | "serio" | "sério" => Ok(Avatar::Serious),
            "funny" | "engracado" | "engraçado" => Ok(Avatar::Funny),
            "military" | "militar" => Ok(Avatar::Military),
            "anime" => Ok(Avatar::Anime),
            other => Err(anyhow!("Unknown avatar: '{}'", other)),
        }
    }
}

/// What the ranker reads from the user.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct UserPreferences {
    /// Most-preferred first.
    pub preferred_categories: Vec<Category>,
    /// Accepted for display; the ranker does not trim by it.
    pub available_minutes_per_day: u32,
}

impl UserPreferences {
    pub fn new(preferred_categories: Vec<Category>, available_minutes_per_day: u32) -> Self {
        Self {
            preferred_categories,
            available_minutes_per_day,
        }
    }

    pub fn position_of(&self, category: Category) -> Option<usize> {
        self.preferred_categories.iter().position(|c| *c == category)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct OnboardingData {
    pub preferred_categories: Vec<Category>,
    pub available_minutes_per_day: u32,
    pub procrastination_level: u8,
    pub avatar: Avatar,
}

impl OnboardingData {
    pub fn validate(&self) -> StateResult<()> {
        if self.preferred_categories.is_empty() {
            return Err(StateError::InvalidOnboarding("pick at least one category".to_string()));
        }
        for (i, category) in self.preferred_categories.iter().enumerate() {
            if self.preferred_categories[..i].contains(category) {
                return Err(StateError::InvalidOnboarding(format!(
                    "category {} listed twice",
                    category
                )));
            }
        }
        if self.available_minutes_per_day == 0 {
            return Err(StateError::InvalidOnboarding(
                "available time must be positive".to_string(),
            ));
        }
        if !(1..=10).contains(&self.procrastination_level) {
            return Err(StateError::InvalidOnboarding(format!(
                "procrastination level must be 1-10, got {}",
                self.procrastination_level
            )));
        }
        Ok(())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct UserProfile {
    pub id: Uuid,
    pub name: String,
    pub avatar: Avatar,
    pub procrastination_level: u8,
    pub preferences: UserPreferences,
    pub created_at: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data() -> OnboardingData {
        OnboardingData {
            preferred_categories: vec![Category::Study, Category::Finance],
            available_minutes_per_day: 30,
            procrastination_level: 7,
            avatar: Avatar::Serious,
        }
    }

    #[test]
    fn test_valid_onboarding() {
        assert!(data().validate().is_ok());
    }

    #[test]
    fn test_onboarding_rejects_bad_input() {
        let mut d = data();
        d.preferred_categories.clear();
        assert!(d.validate().is_err());

        let mut d = data();
        d.preferred_categories.push(Category::Study);
        assert!(d.validate().is_err());

        let mut d = data();
        d.available_minutes_per_day = 0;
        assert!(d.validate().is_err());

        let mut d = data();
        d.procrastination_level = 11;
        assert!(d.validate().is_err());
    }

    #[test]
    fn test_phrase_wraps() {
        let avatar = Avatar::Military;
        assert_eq!(avatar.phrase(0), avatar.phrase(3));
        assert_eq!("fofo".parse::<Avatar>().unwrap(), Avatar::Cute);
    }
}
