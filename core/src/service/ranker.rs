use std::cmp::Reverse;

use tracing::debug;

use crate::model::category::Category;
use crate::model::task::{ClassifiedTask, Priority};
use crate::model::user::UserPreferences;

// Weights
const WEIGHT_URGENT: i32 = 100;
const WEIGHT_HIGH: i32 = 75;
const WEIGHT_MEDIUM: i32 = 50;
const WEIGHT_LOW: i32 = 25;

const WEIGHT_TOP_CATEGORY: i32 = 100;
const CATEGORY_STEP: i32 = 15;
const WEIGHT_OTHER_CATEGORY: i32 = 30;

const SHORT_TASK_MAX_MINUTES: u32 = 10;
const SHORT_TASK_BONUS: i32 = 20;

pub fn priority_weight(priority: Priority) -> i32 {
    match priority {
        Priority::Urgent => WEIGHT_URGENT,
        Priority::High => WEIGHT_HIGH,
        Priority::Medium => WEIGHT_MEDIUM,
        Priority::Low => WEIGHT_LOW,
    }
}

/// 100 for the favourite category, 15 less for each step down the list.
/// Long preference lists push the tail below zero.
pub fn category_weight(category: Category, prefs: &UserPreferences) -> i32 {
    match prefs.position_of(category) {
        Some(i) => WEIGHT_TOP_CATEGORY - CATEGORY_STEP * i as i32,
        None => WEIGHT_OTHER_CATEGORY,
    }
}

pub fn calculate_score(task: &ClassifiedTask, prefs: &UserPreferences) -> i32 {
    let mut score = priority_weight(task.priority);
    score += category_weight(task.category, prefs);
    if task.estimated_duration_minutes <= SHORT_TASK_MAX_MINUTES {
        score += SHORT_TASK_BONUS;
    }
    score
}

/// Highest score first. Equal scores keep their input order, and `order`
/// is rewritten to 1..=N. The daily time budget is not used to trim.
pub fn rank_tasks(mut tasks: Vec<ClassifiedTask>, prefs: &UserPreferences) -> Vec<ClassifiedTask> {
    // sort_by_cached_key is stable
    tasks.sort_by_cached_key(|t| Reverse(calculate_score(t, prefs)));

    for (i, task) in tasks.iter_mut().enumerate() {
        task.order = i + 1;
    }

    debug!("ranked {} tasks", tasks.len());
    tasks
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn task(n: u128, category: Category, priority: Priority, minutes: u32) -> ClassifiedTask {
        ClassifiedTask {
            id: Uuid::from_u128(n),
            description: format!("task {}", n),
            category,
            priority,
            estimated_duration_minutes: minutes,
            order: 0,
        }
    }

    fn prefs(categories: Vec<Category>) -> UserPreferences {
        UserPreferences::new(categories, 30)
    }

    #[test]
    fn test_category_weight() {
        let p = prefs(vec![Category::Study, Category::Finance]);
        assert_eq!(category_weight(Category::Study, &p), 100);
        assert_eq!(category_weight(Category::Finance, &p), 85);
        assert_eq!(category_weight(Category::Health, &p), 30);
    }

    #[test]
    fn test_category_weight_goes_negative() {
        let p = prefs(Category::ALL.to_vec());
        // position 6 -> 100 - 90
        assert_eq!(category_weight(Category::School, &p), 10);

        // position 7 -> 100 - 105
        let mut padded = vec![Category::Work; 7];
        padded.push(Category::Health);
        assert_eq!(category_weight(Category::Health, &prefs(padded)), -5);
    }

    #[test]
    fn test_score_components() {
        let p = prefs(vec![Category::Finance]);
        let t = task(1, Category::Finance, Priority::Urgent, 10);
        assert_eq!(calculate_score(&t, &p), 100 + 100 + 20);

        let t = task(2, Category::Health, Priority::Low, 11);
        assert_eq!(calculate_score(&t, &p), 25 + 30);
    }

    #[test]
    fn test_rank_orders_by_score() {
        let p = prefs(vec![Category::Study]);
        let tasks = vec![
            task(1, Category::Work, Priority::Low, 15),     // 55
            task(2, Category::Study, Priority::Medium, 25), // 150
            task(3, Category::Finance, Priority::Urgent, 10), // 150
            task(4, Category::Health, Priority::High, 15),  // 105
        ];

        let ranked = rank_tasks(tasks, &p);
        let ids: Vec<u128> = ranked.iter().map(|t| t.id.as_u128()).collect();
        assert_eq!(ids, vec![2, 3, 4, 1]);
        let orders: Vec<usize> = ranked.iter().map(|t| t.order).collect();
        assert_eq!(orders, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_ties_keep_input_order() {
        let p = prefs(vec![Category::Study]);
        let a = task(10, Category::Study, Priority::Medium, 25); // 150
        let b = task(20, Category::Study, Priority::Medium, 30); // 150

        let ranked = rank_tasks(vec![a.clone(), b.clone()], &p);
        assert_eq!(ranked[0].id, a.id);
        assert_eq!(ranked[1].id, b.id);

        let ranked = rank_tasks(vec![b.clone(), a.clone()], &p);
        assert_eq!(ranked[0].id, b.id);
        assert_eq!(ranked[1].id, a.id);
    }

    #[test]
    fn test_rank_is_complete_permutation() {
        let p = prefs(vec![Category::Household, Category::Wellness]);
        let priorities = [Priority::Low, Priority::Medium, Priority::High, Priority::Urgent];
        let tasks: Vec<ClassifiedTask> = (0..25u128)
            .map(|n| {
                let category = Category::ALL[(n % 7) as usize];
                let priority = priorities[(n % 4) as usize];
                let mut t = task(n, category, priority, 5 + (n as u32 % 20));
                t.order = 99;
                t
            })
            .collect();

        let ranked = rank_tasks(tasks, &p);
        assert_eq!(ranked.len(), 25);

        let mut orders: Vec<usize> = ranked.iter().map(|t| t.order).collect();
        orders.sort_unstable();
        assert_eq!(orders, (1..=25).collect::<Vec<_>>());

        let mut ids: Vec<u128> = ranked.iter().map(|t| t.id.as_u128()).collect();
        ids.sort_unstable();
        assert_eq!(ids, (0..25).collect::<Vec<_>>());

        let scores: Vec<i32> = ranked.iter().map(|t| calculate_score(t, &p)).collect();
        assert!(scores.windows(2).all(|w| w[0] >= w[1]));
    }

    #[test]
    fn test_available_minutes_do_not_trim() {
        let mut p = prefs(vec![]);
        p.available_minutes_per_day = 5;
        let tasks = vec![
            task(1, Category::Work, Priority::Medium, 30),
            task(2, Category::Work, Priority::Medium, 30),
        ];
        assert_eq!(rank_tasks(tasks, &p).len(), 2);
    }

    #[test]
    fn test_rank_empty() {
        assert!(rank_tasks(Vec::new(), &prefs(vec![])).is_empty());
    }
}
