//! Filter dimensions, their option catalog, and the current selection.
//!
//! Every dimension holds exactly one value (radio semantics). `all` is the
//! "no restriction" value and is never sent upstream.

use serde::{Deserialize, Serialize};

/// Value meaning "no restriction" for a dimension.
pub const FILTER_ALL: &str = "all";

pub const DEFAULT_ASSET: &str = FILTER_ALL;
pub const DEFAULT_PRICE: &str = FILTER_ALL;
pub const DEFAULT_SORT: &str = "popular";
pub const DEFAULT_VIEW: &str = "individual";

/// A filter dimension the user can select a value for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterDimension {
    Asset,
    Price,
    Sort,
    /// Presentation only, never sent upstream.
    View,
    Category,
    Style,
}

impl FilterDimension {
    pub fn as_str(self) -> &'static str {
        match self {
            FilterDimension::Asset => "asset",
            FilterDimension::Price => "price",
            FilterDimension::Sort => "sort",
            FilterDimension::View => "view",
            FilterDimension::Category => "category",
            FilterDimension::Style => "style",
        }
    }
}

impl std::str::FromStr for FilterDimension {
    type Err = crate::error::CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "asset" => Ok(FilterDimension::Asset),
            "price" => Ok(FilterDimension::Price),
            "sort" => Ok(FilterDimension::Sort),
            "view" => Ok(FilterDimension::View),
            "category" => Ok(FilterDimension::Category),
            "style" => Ok(FilterDimension::Style),
            other => Err(crate::error::CoreError::Validation(format!(
                "unknown filter dimension '{other}'"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Option catalog
// ---------------------------------------------------------------------------

/// A selectable value with its display label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FilterOption {
    pub label: &'static str,
    pub value: &'static str,
}

/// A group of options for one dimension, in display order.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct FilterGroup {
    pub label: &'static str,
    pub dimension: FilterDimension,
    pub options: &'static [FilterOption],
}

const fn opt(label: &'static str, value: &'static str) -> FilterOption {
    FilterOption { label, value }
}

/// Options shown in the filter sidebar. `category` and `style` are
/// free-form and have no fixed catalog.
pub const FILTER_GROUPS: &[FilterGroup] = &[
    FilterGroup {
        label: "Asset",
        dimension: FilterDimension::Asset,
        options: &[
            opt("All asset", "all"),
            opt("3D Illustrations", "3d"),
            opt("Lottie Animations", "lottie"),
            opt("Illustrations", "illustration"),
            opt("Icons", "icon"),
        ],
    },
    FilterGroup {
        label: "Price",
        dimension: FilterDimension::Price,
        options: &[opt("Free", "free"), opt("Premium", "premium"), opt("All", "all")],
    },
    FilterGroup {
        label: "Sort by",
        dimension: FilterDimension::Sort,
        options: &[
            opt("Popular", "popular"),
            opt("Latest", "latest"),
            opt("Featured", "featured"),
            opt("Relevant", "relevant"),
        ],
    },
    FilterGroup {
        label: "View",
        dimension: FilterDimension::View,
        options: &[opt("Pack", "pack"), opt("Individual", "individual")],
    },
];

/// Look up the option group for a dimension.
pub fn filter_group(dimension: FilterDimension) -> Option<&'static FilterGroup> {
    FILTER_GROUPS.iter().find(|g| g.dimension == dimension)
}

/// Whether `value` is in the catalog for `dimension`. Free-form dimensions
/// accept anything.
pub fn is_known_value(dimension: FilterDimension, value: &str) -> bool {
    match filter_group(dimension) {
        Some(group) => group.options.iter().any(|o| o.value == value),
        None => true,
    }
}

/// Navigation labels that act as shortcuts for the asset filter.
pub const CATEGORY_SHORTCUTS: &[(&str, &str)] = &[
    ("All Assets", "all"),
    ("3D Illustrations", "3d"),
    ("Lottie Animations", "lottie"),
    ("Illustrations", "illustration"),
    ("Icons", "icon"),
];

/// Map a navigation label to an asset filter value; unknown labels map to `all`.
pub fn asset_value_for_category(label: &str) -> &'static str {
    CATEGORY_SHORTCUTS
        .iter()
        .find(|(name, _)| *name == label)
        .map(|(_, value)| *value)
        .unwrap_or(FILTER_ALL)
}

// ---------------------------------------------------------------------------
// Selection
// ---------------------------------------------------------------------------

/// The single selected value per dimension.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedFilters {
    pub asset: String,
    pub price: String,
    pub sort: String,
    pub view: String,
    pub category: Option<String>,
    pub style: Option<String>,
}

impl Default for SelectedFilters {
    fn default() -> Self {
        Self {
            asset: DEFAULT_ASSET.to_string(),
            price: DEFAULT_PRICE.to_string(),
            sort: DEFAULT_SORT.to_string(),
            view: DEFAULT_VIEW.to_string(),
            category: None,
            style: None,
        }
    }
}

impl SelectedFilters {
    /// Overwrite exactly one dimension.
    pub fn set(&mut self, dimension: FilterDimension, value: impl Into<String>) {
        let value = value.into();
        match dimension {
            FilterDimension::Asset => self.asset = value,
            FilterDimension::Price => self.price = value,
            FilterDimension::Sort => self.sort = value,
            FilterDimension::View => self.view = value,
            FilterDimension::Category => self.category = restricting(&value).map(str::to_string),
            FilterDimension::Style => self.style = restricting(&value).map(str::to_string),
        }
    }

    pub fn get(&self, dimension: FilterDimension) -> Option<&str> {
        match dimension {
            FilterDimension::Asset => Some(&self.asset),
            FilterDimension::Price => Some(&self.price),
            FilterDimension::Sort => Some(&self.sort),
            FilterDimension::View => Some(&self.view),
            FilterDimension::Category => self.category.as_deref(),
            FilterDimension::Style => self.style.as_deref(),
        }
    }
}

/// `None` for values that do not restrict the search (empty or `all`).
pub fn restricting(value: &str) -> Option<&str> {
    let value = value.trim();
    if value.is_empty() || value == FILTER_ALL {
        None
    } else {
        Some(value)
    }
}
