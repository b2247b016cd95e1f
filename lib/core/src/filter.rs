// Record filters used by the catalog store
use crate::DeviceRecord;

/// Label the host shows for "no brand filter".
pub const ALL_BRANDS: &str = "All Brands";

pub trait Filter {
    fn matches(&self, record: &DeviceRecord) -> bool;
}

#[derive(Debug, Clone, PartialEq)]
pub enum FilterCondition {
    /// Matches every record
    Any,
    BrandEquals(String),
    /// Needle is stored lowercased
    NameContains(String),
    And(Vec<FilterCondition>),
}

impl FilterCondition {
    /// Brand filter from a selection label; [`ALL_BRANDS`] means unconstrained.
    pub fn brand(selection: &str) -> Self {
        if selection == ALL_BRANDS {
            FilterCondition::Any
        } else {
            FilterCondition::BrandEquals(selection.to_string())
        }
    }

    /// Case-insensitive model-name substring filter; an empty needle matches everything.
    pub fn name_contains(needle: &str) -> Self {
        if needle.is_empty() {
            FilterCondition::Any
        } else {
            FilterCondition::NameContains(needle.to_lowercase())
        }
    }

    pub fn and(self, other: FilterCondition) -> Self {
        match (self, other) {
            (FilterCondition::Any, c) | (c, FilterCondition::Any) => c,
            (FilterCondition::And(mut conditions), c) => {
                conditions.push(c);
                FilterCondition::And(conditions)
            }
            (a, b) => FilterCondition::And(vec![a, b]),
        }
    }

    fn matches_condition(condition: &FilterCondition, record: &DeviceRecord) -> bool {
        match condition {
            FilterCondition::Any => true,
            FilterCondition::BrandEquals(brand) => record.brand == *brand,
            FilterCondition::NameContains(needle) => record
                .model
                .as_deref()
                .map(|model| model.to_lowercase().contains(needle.as_str()))
                .unwrap_or(false),
            FilterCondition::And(conditions) => {
                conditions.iter().all(|c| Self::matches_condition(c, record))
            }
        }
    }
}

impl Filter for FilterCondition {
    fn matches(&self, record: &DeviceRecord) -> bool {
        Self::matches_condition(self, record)
    }
}
