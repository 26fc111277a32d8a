use crate::domain::models::Amount;

const MAJOR_PURCHASE_THRESHOLD: f64 = 1000.0;
const SMALL_EXPENSE_THRESHOLD: f64 = 10.0;

/// One entry of the ordered keyword table. Earlier rules win.
#[derive(Debug, Clone)]
pub struct CategoryRule {
    pub category: &'static str,
    pub keywords: &'static [&'static str],
}

/// Maps a free-text expense title (plus its amount) to a category label.
///
/// The rule table is immutable and injected at construction; matching is a
/// case-insensitive substring scan in table order. Titles that match no
/// keyword fall through to an amount-based rule.
#[derive(Debug, Clone)]
pub struct Categorizer {
    rules: Vec<CategoryRule>,
}

impl Categorizer {
    pub fn new(rules: Vec<CategoryRule>) -> Self {
        Self { rules }
    }

    pub fn with_default_rules() -> Self {
        Self::new(default_rules())
    }

    pub fn categorize(&self, title: &str, amount: Amount) -> String {
        let title = title.to_lowercase();

        for rule in &self.rules {
            if rule.keywords.iter().any(|kw| title.contains(kw)) {
                return rule.category.to_string();
            }
        }

        if amount.inner() > MAJOR_PURCHASE_THRESHOLD {
            return "Major Purchase".to_string();
        }
        if amount.inner() < SMALL_EXPENSE_THRESHOLD {
            return "Small Expense".to_string();
        }

        "Miscellaneous".to_string()
    }
}

/// The stock keyword table. "Miscellaneous" carries no keywords and is only
/// reachable through the amount fallback.
pub fn default_rules() -> Vec<CategoryRule> {
    vec![
        CategoryRule {
            category: "Transportation",
            keywords: &[
                "uber", "lyft", "taxi", "bus", "train", "metro", "gas", "parking",
            ],
        },
        CategoryRule {
            category: "Food & Dining",
            keywords: &[
                "restaurant", "cafe", "food", "dining", "coffee", "lunch", "dinner",
            ],
        },
        CategoryRule {
            category: "Groceries",
            keywords: &["grocery", "supermarket", "market", "walmart", "target", "costco"],
        },
        CategoryRule {
            category: "Entertainment",
            keywords: &[
                "netflix", "spotify", "movie", "cinema", "concert", "game", "streaming",
            ],
        },
        CategoryRule {
            category: "Shopping",
            keywords: &["amazon", "store", "shop", "mall", "clothing", "electronics"],
        },
        CategoryRule {
            category: "Bills & Utilities",
            keywords: &["electric", "water", "internet", "phone", "cable", "utility"],
        },
        CategoryRule {
            category: "Healthcare",
            keywords: &["pharmacy", "doctor", "hospital", "medical", "insurance"],
        },
        CategoryRule {
            category: "Travel",
            keywords: &["hotel", "flight", "airbnb", "vacation", "travel"],
        },
        CategoryRule {
            category: "Education",
            keywords: &["school", "university", "course", "book", "education"],
        },
        CategoryRule {
            category: "Personal Care",
            keywords: &["salon", "spa", "gym", "fitness", "beauty"],
        },
        CategoryRule {
            category: "Miscellaneous",
            keywords: &[],
        },
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn categorizer() -> Categorizer {
        Categorizer::with_default_rules()
    }

    #[test]
    fn test_keyword_match_transportation() {
        assert_eq!(
            categorizer().categorize("Uber ride", Amount::new(15.0)),
            "Transportation"
        );
    }

    #[test]
    fn test_keyword_match_entertainment() {
        assert_eq!(
            categorizer().categorize("Spotify Premium", Amount::new(10.0)),
            "Entertainment"
        );
    }

    #[test]
    fn test_empty_title_major_purchase() {
        assert_eq!(
            categorizer().categorize("", Amount::new(1500.0)),
            "Major Purchase"
        );
    }

    #[test]
    fn test_empty_title_small_expense() {
        assert_eq!(categorizer().categorize("", Amount::new(5.0)), "Small Expense");
    }

    #[test]
    fn test_empty_title_miscellaneous() {
        assert_eq!(categorizer().categorize("", Amount::new(50.0)), "Miscellaneous");
    }

    #[test]
    fn test_keyword_precedence_food_before_groceries() {
        // "dinner" (Food & Dining) and "walmart" (Groceries) both match;
        // Food & Dining is ordered first in the table.
        assert_eq!(
            categorizer().categorize("dinner at walmart", Amount::new(40.0)),
            "Food & Dining"
        );
    }

    #[test]
    fn test_keyword_precedence_transportation_first() {
        // "gas" (Transportation) beats "store" (Shopping).
        assert_eq!(
            categorizer().categorize("gas station store", Amount::new(30.0)),
            "Transportation"
        );
    }

    #[test]
    fn test_case_insensitive_match() {
        assert_eq!(
            categorizer().categorize("NETFLIX subscription", Amount::new(12.0)),
            "Entertainment"
        );
    }

    #[test]
    fn test_keyword_beats_amount_fallback() {
        // A matching keyword wins regardless of amount.
        assert_eq!(
            categorizer().categorize("flight to tokyo", Amount::new(2500.0)),
            "Travel"
        );
    }

    #[test]
    fn test_idempotent() {
        let c = categorizer();
        let first = c.categorize("coffee with friends", Amount::new(8.5));
        let second = c.categorize("coffee with friends", Amount::new(8.5));
        assert_eq!(first, second);
    }

    #[test]
    fn test_miscellaneous_unreachable_via_keywords() {
        let misc = default_rules()
            .into_iter()
            .find(|r| r.category == "Miscellaneous")
            .unwrap();
        assert!(misc.keywords.is_empty());
    }

    #[test]
    fn test_threshold_boundaries() {
        // Exactly 1000 is not "major", exactly 10 is not "small".
        assert_eq!(categorizer().categorize("", Amount::new(1000.0)), "Miscellaneous");
        assert_eq!(categorizer().categorize("", Amount::new(10.0)), "Miscellaneous");
    }

    #[test]
    fn test_custom_rules_injection() {
        let c = Categorizer::new(vec![CategoryRule {
            category: "Pets",
            keywords: &["vet", "kibble"],
        }]);
        assert_eq!(c.categorize("vet visit", Amount::new(90.0)), "Pets");
        assert_eq!(c.categorize("uber ride", Amount::new(90.0)), "Miscellaneous");
    }
}
