use anyhow::Result;
use regex::Regex;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::model::category::Category;
use crate::model::task::Priority;

pub const DEFAULT_DURATION_MINUTES: u32 = 15;
pub const SHORT_DURATION_MINUTES: u32 = 10;
pub const LONG_DURATION_MINUTES: u32 = 30;

// Evaluated top to bottom, first match wins. Several groups overlap
// ("review", "class"), so the order is part of the behaviour.
const CATEGORY_GROUPS: [(Category, &str); 7] = [
    // study
    (
        Category::Study,
        r"\b(?:estud\w*|aprend\w*|curso\w*|ler|leitura|revis\w*|stud\w*|learn\w*|course\w*|read\w*|review\w*)\b",
    ),
    // household
    (
        Category::Household,
        r"\b(?:limp\w*|arrum\w*|organizar casa|lavar|lava|louça|roupas?|cozinh\w*|compras|varr\w*|faxina|clean\w*|laundry|dish\w*|cook\w*|grocer\w*|tidy|vacuum\w*)\b",
    ),
    // health
    (
        Category::Health,
        r"\b(?:exerc[ií]cios?|academia|sa[uú]de|m[eé]dic\w*|consulta|trein\w*|caminh\w*|correr|corrida|exercis\w*|workout\w*|gym|doctor\w*|dentist\w*|run|running|walk\w*)\b",
    ),
    // finance
    (
        Category::Finance,
        r"\b(?:dinheiro|pag\w*|contas?|boletos?|faturas?|banco|impostos?|or[cç]amento|pay\w*|bills?|bank\w*|budget\w*|tax|taxes|invoices?|rent)\b",
    ),
    // wellness
    (
        Category::Wellness,
        r"\b(?:medit\w*|relax\w*|descans\w*|respir\w*|yoga|dormir|sono|along\w*|rest|sleep\w*|breath\w*|stretch\w*|journal\w*)\b",
    ),
    // school
    (
        Category::School,
        r"\b(?:escola\w*|provas?|li[cç][aã]o|dever de casa|faculdade|tcc|trabalho escolar|homework|exams?|school\w*|assignments?|essays?|class|quiz)\b",
    ),
    // communication, filed under work
    (
        Category::Work,
        r"\b(?:e-?mails?|ligar|liga[cç][aã]o|mensage\w*|respond\w*|reuni[aã]o|whatsapp|call\w*|reply|messages?|meetings?|text)\b",
    ),
];

const URGENT: &str = r"\b(?:urgent\w*|hoje|agora|imediat\w*|asap|today|tonight|now|immediately)\b";
const IMPORTANT: &str =
    r"\b(?:important\w*|prioridade|priorit\w*|essencia\w*|essential|crucial|must)\b";
const DEFERRAL: &str =
    r"\b(?:depois|quando der|quando poss[ií]vel|mais tarde|sem pressa|later|when possible|someday|eventually)\b";
const BREVITY: &str = r"\b(?:r[aá]pid\w*|breve|curt\w*|quick\w*|short|brief\w*)\b";
const COMPLETENESS: &str =
    r"\b(?:complet\w*|inteir\w*|tudo|todo|toda|full|entire\w*|whole|thorough\w*)\b";

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub category: Category,
    pub priority: Priority,
    pub estimated_duration_minutes: u32,
}

/// Keyword based classifier for single task strings.
pub struct Classifier {
    category_rules: Vec<(Category, Regex)>,
    urgent: Regex,
    important: Regex,
    deferral: Regex,
    brevity: Regex,
    completeness: Regex,
}

impl Classifier {
    pub fn new() -> Result<Self> {
        let category_rules = CATEGORY_GROUPS
            .iter()
            .map(|(category, pattern)| -> Result<(Category, Regex)> {
                Ok((*category, Regex::new(pattern)?))
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self {
            category_rules,
            urgent: Regex::new(URGENT)?,
            important: Regex::new(IMPORTANT)?,
            deferral: Regex::new(DEFERRAL)?,
            brevity: Regex::new(BREVITY)?,
            completeness: Regex::new(COMPLETENESS)?,
        })
    }

    pub fn classify(&self, text: &str) -> Classification {
        let text = text.to_lowercase();

        let category = self.detect_category(&text);
        let priority = self.detect_priority(&text);
        let estimated_duration_minutes = self.estimate_duration(&text, category);

        debug!(
            "classified {:?} as {:?}/{:?}/{}m",
            text, category, priority, estimated_duration_minutes
        );

        Classification {
            category,
            priority,
            estimated_duration_minutes,
        }
    }

    pub fn detect_category(&self, text: &str) -> Category {
        self.category_rules
            .iter()
            .find(|(_, pattern)| pattern.is_match(text))
            .map(|(category, _)| *category)
            .unwrap_or_default()
    }

    pub fn detect_priority(&self, text: &str) -> Priority {
        if self.urgent.is_match(text) {
            Priority::Urgent
        } else if self.important.is_match(text) {
            Priority::High
        } else if self.deferral.is_match(text) {
            Priority::Low
        } else {
            Priority::Medium
        }
    }

    fn estimate_duration(&self, text: &str, category: Category) -> u32 {
        let mut minutes = DEFAULT_DURATION_MINUTES;

        if self.brevity.is_match(text) {
            minutes = SHORT_DURATION_MINUTES;
        } else if self.completeness.is_match(text) {
            minutes = LONG_DURATION_MINUTES;
        }

        category_duration(category).unwrap_or(minutes)
    }
}

/// Fixed durations that win over the brevity/completeness hints.
pub fn category_duration(category: Category) -> Option<u32> {
    match category {
        Category::Study => Some(25),
        Category::Household => Some(20),
        Category::Health => Some(15),
        Category::Finance => Some(10),
        Category::Work | Category::Wellness | Category::School => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn classifier() -> Classifier {
        Classifier::new().unwrap()
    }

    #[test]
    fn test_study_task() {
        let c = classifier().classify("estudar matemática");
        assert_eq!(c.category, Category::Study);
        assert_eq!(c.priority, Priority::Medium);
        assert_eq!(c.estimated_duration_minutes, 25);
    }

    #[test]
    fn test_urgent_bill() {
        let c = classifier().classify("pagar conta urgente");
        assert_eq!(c.category, Category::Finance);
        assert_eq!(c.priority, Priority::Urgent);
        assert_eq!(c.estimated_duration_minutes, 10);
    }

    #[test]
    fn test_unknown_text_uses_defaults() {
        let c = classifier().classify("xyzzy plugh");
        assert_eq!(c.category, Category::Work);
        assert_eq!(c.priority, Priority::Medium);
        assert_eq!(c.estimated_duration_minutes, DEFAULT_DURATION_MINUTES);
    }

    #[test]
    fn test_group_order_breaks_ties() {
        // matches both study ("estudar") and school ("prova")
        let c = classifier().classify("Estudar para a prova");
        assert_eq!(c.category, Category::Study);

        // matches household ("clean") and finance ("pay")
        let c = classifier().classify("clean the garage and pay the plumber");
        assert_eq!(c.category, Category::Household);

        // school without a study keyword
        let c = classifier().classify("finish the homework");
        assert_eq!(c.category, Category::School);
    }

    #[test]
    fn test_communication_is_work() {
        let c = classifier().classify("responder e-mail do chefe");
        assert_eq!(c.category, Category::Work);
        assert_eq!(c.estimated_duration_minutes, DEFAULT_DURATION_MINUTES);
    }

    #[test]
    fn test_priority_precedence() {
        let c = classifier();
        assert_eq!(c.detect_priority("importante fazer hoje"), Priority::Urgent);
        assert_eq!(c.detect_priority("important, but later"), Priority::High);
        assert_eq!(c.detect_priority("organize photos later"), Priority::Low);
        assert_eq!(c.detect_priority("fazer quando der"), Priority::Low);
        assert_eq!(c.detect_priority("fix the shelf"), Priority::Medium);
    }

    #[test]
    fn test_duration_hints() {
        let c = classifier();
        assert_eq!(c.classify("quick look at the report").estimated_duration_minutes, 10);
        assert_eq!(c.classify("write the full report").estimated_duration_minutes, 30);
        // brevity checked before completeness
        assert_eq!(c.classify("quick full check").estimated_duration_minutes, 10);
        assert_eq!(c.classify("meditar um pouco").estimated_duration_minutes, 15);
    }

    #[test]
    fn test_category_duration_overrides_hints() {
        let c = classifier();
        assert_eq!(c.classify("quick study session").estimated_duration_minutes, 25);
        assert_eq!(c.classify("limpar a casa toda").estimated_duration_minutes, 20);
        assert_eq!(c.classify("complete workout").estimated_duration_minutes, 15);
        assert_eq!(c.classify("pay every bill in full").estimated_duration_minutes, 10);
    }

    #[test]
    fn test_classification_is_idempotent() {
        let c = classifier();
        for text in ["estudar matemática", "pagar conta urgente", "walk the dog later", "???"] {
            assert_eq!(c.classify(text), c.classify(text));
        }
    }

    #[test]
    fn test_durations_in_classifier_range() {
        let c = classifier();
        for text in ["a b c", "quick", "full", "study", "clean", "gym", "rent", "yoga", "exam"] {
            let minutes = c.classify(text).estimated_duration_minutes;
            assert!((1..=30).contains(&minutes), "{} -> {}", text, minutes);
        }
    }
}
