//! Regional / branch / cluster view filters.

use serde::{Deserialize, Serialize};

/// Wildcard option present in every filter list.
pub const ALL: &str = "All";

pub const REGIONAL_OPTIONS: &[&str] = &[ALL, "Area 1", "Area 2", "Area 3", "Area 4", "Area 5"];
pub const BRANCH_OPTIONS: &[&str] = &[ALL, "Jakarta", "Surabaya", "Bandung", "Semarang", "Yogyakarta"];
pub const CLUSTER_OPTIONS: &[&str] = &[ALL, "Central", "North", "South", "East", "West"];

/// Share of the unfiltered dataset attributed to the n-th concrete option.
const OPTION_SHARES: [f64; 5] = [0.26, 0.22, 0.20, 0.18, 0.14];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FilterField {
    Regional,
    Branch,
    Cluster,
}

impl FilterField {
    pub const ALL_FIELDS: [FilterField; 3] =
        [FilterField::Regional, FilterField::Branch, FilterField::Cluster];

    pub fn options(self) -> &'static [&'static str] {
        match self {
            FilterField::Regional => REGIONAL_OPTIONS,
            FilterField::Branch => BRANCH_OPTIONS,
            FilterField::Cluster => CLUSTER_OPTIONS,
        }
    }

    /// DOM id of the select element.
    pub fn id(self) -> &'static str {
        match self {
            FilterField::Regional => "regional",
            FilterField::Branch => "branch",
            FilterField::Cluster => "cluster",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FilterState {
    pub regional: String,
    pub branch: String,
    pub cluster: String,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            regional: ALL.to_string(),
            branch: ALL.to_string(),
            cluster: ALL.to_string(),
        }
    }
}

impl FilterState {
    pub fn get(&self, field: FilterField) -> &str {
        match field {
            FilterField::Regional => &self.regional,
            FilterField::Branch => &self.branch,
            FilterField::Cluster => &self.cluster,
        }
    }

    /// Copy of `self` with one field replaced. Unknown options fall back to `All`.
    pub fn with(&self, field: FilterField, value: &str) -> Self {
        let value = if field.options().contains(&value) {
            value.to_string()
        } else {
            ALL.to_string()
        };
        let mut next = self.clone();
        match field {
            FilterField::Regional => next.regional = value,
            FilterField::Branch => next.branch = value,
            FilterField::Cluster => next.cluster = value,
        }
        next
    }

    pub fn is_unfiltered(&self) -> bool {
        FilterField::ALL_FIELDS
            .iter()
            .all(|field| self.get(*field) == ALL)
    }

    /// Fraction of the national dataset covered by this selection.
    pub fn coverage(&self) -> f64 {
        FilterField::ALL_FIELDS
            .iter()
            .map(|field| option_share(*field, self.get(*field)))
            .product()
    }
}

fn option_share(field: FilterField, value: &str) -> f64 {
    field
        .options()
        .iter()
        .skip(1)
        .position(|option| *option == value)
        .and_then(|idx| OPTION_SHARES.get(idx).copied())
        .unwrap_or(1.0)
}
