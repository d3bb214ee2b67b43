use std::fmt;

use serde::{Deserialize, Serialize};

/// Fixed set of spending categories shared by expenses and recurring
/// templates. The set is closed; `Other` is the only member that accepts a
/// free-text label override.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum ExpenseCategory {
    Rent,
    Subscription,
    Grocery,
    Medical,
    Necessity,
    Entertainment,
    Dining,
    Travel,
    NonNecessityGoods,
    Other,
}

impl ExpenseCategory {
    pub const ALL: [ExpenseCategory; 10] = [
        ExpenseCategory::Rent,
        ExpenseCategory::Subscription,
        ExpenseCategory::Grocery,
        ExpenseCategory::Medical,
        ExpenseCategory::Necessity,
        ExpenseCategory::Entertainment,
        ExpenseCategory::Dining,
        ExpenseCategory::Travel,
        ExpenseCategory::NonNecessityGoods,
        ExpenseCategory::Other,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            ExpenseCategory::Rent => "Rent",
            ExpenseCategory::Subscription => "Subscription",
            ExpenseCategory::Grocery => "Grocery",
            ExpenseCategory::Medical => "Medical",
            ExpenseCategory::Necessity => "Necessity",
            ExpenseCategory::Entertainment => "Entertainment",
            ExpenseCategory::Dining => "Dining",
            ExpenseCategory::Travel => "Travel",
            ExpenseCategory::NonNecessityGoods => "Non-necessity Goods",
            ExpenseCategory::Other => "Other",
        }
    }

    /// Label shown for this category. A custom label only takes effect on
    /// `Other`; every other member ignores it.
    pub fn display_name<'a>(&self, custom_label: Option<&'a str>) -> &'a str {
        match (self, custom_label) {
            (ExpenseCategory::Other, Some(label)) if !label.trim().is_empty() => label,
            _ => self.label(),
        }
    }

    /// Parses user input leniently: case-insensitive, ignoring spaces and
    /// hyphens, so `"non-necessity goods"` and `"NonNecessityGoods"` both
    /// resolve.
    pub fn parse(input: &str) -> Option<ExpenseCategory> {
        let wanted = normalize(input);
        ExpenseCategory::ALL
            .into_iter()
            .find(|category| normalize(category.label()) == wanted)
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_lists_every_category_once() {
        assert_eq!(ExpenseCategory::ALL.len(), 10);
        for category in ExpenseCategory::ALL {
            assert_eq!(
                ExpenseCategory::ALL
                    .iter()
                    .filter(|c| **c == category)
                    .count(),
                1
            );
        }
    }

    #[test]
    fn custom_label_applies_only_to_other() {
        assert_eq!(
            ExpenseCategory::Other.display_name(Some("Pet supplies")),
            "Pet supplies"
        );
        assert_eq!(ExpenseCategory::Rent.display_name(Some("Pet supplies")), "Rent");
        assert_eq!(ExpenseCategory::Other.display_name(Some("   ")), "Other");
        assert_eq!(ExpenseCategory::Other.display_name(None), "Other");
    }

    #[test]
    fn parse_is_lenient() {
        assert_eq!(ExpenseCategory::parse("dining"), Some(ExpenseCategory::Dining));
        assert_eq!(
            ExpenseCategory::parse("Non-necessity goods"),
            Some(ExpenseCategory::NonNecessityGoods)
        );
        assert_eq!(
            ExpenseCategory::parse("nonnecessitygoods"),
            Some(ExpenseCategory::NonNecessityGoods)
        );
        assert_eq!(ExpenseCategory::parse("groceries"), None);
    }
}
