use serde::{Deserialize, Serialize};
use std::fmt;

/// Receipt category. The set is closed; `Other` is the fallback and is
/// never absent from a processed record.
///
/// Declaration order matters: the classifier breaks scoring ties in
/// favor of the earlier variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Restaurant,
    Parking,
    Gas,
    Grocery,
    Retail,
    Transportation,
    Entertainment,
    Healthcare,
    Utilities,
    Other,
}

impl Category {
    /// All categories in tie-break order.
    pub const ALL: [Category; 10] = [
        Category::Restaurant,
        Category::Parking,
        Category::Gas,
        Category::Grocery,
        Category::Retail,
        Category::Transportation,
        Category::Entertainment,
        Category::Healthcare,
        Category::Utilities,
        Category::Other,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Restaurant => "Restaurant",
            Category::Parking => "Parking",
            Category::Gas => "Gas",
            Category::Grocery => "Grocery",
            Category::Retail => "Retail",
            Category::Transportation => "Transportation",
            Category::Entertainment => "Entertainment",
            Category::Healthcare => "Healthcare",
            Category::Utilities => "Utilities",
            Category::Other => "Other",
        }
    }
}

impl Default for Category {
    fn default() -> Self {
        Category::Other
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("Unknown category: '{s}'"))
    }
}
