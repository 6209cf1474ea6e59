use crate::Result;
use anyhow::bail;
use serde::Serialize;

/// The key that stands for "no category selected yet". It is never a valid record category.
pub const UNSELECTED_CATEGORY: &str = "category";

/// One entry of the fixed category list.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct Category {
    key: &'static str,
    name: &'static str,
    color: &'static str,
    icon: &'static str,
}

impl Category {
    pub const fn new(
        key: &'static str,
        name: &'static str,
        color: &'static str,
        icon: &'static str,
    ) -> Self {
        Self {
            key,
            name,
            color,
            icon,
        }
    }

    pub fn key(&self) -> &'static str {
        self.key
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn color(&self) -> &'static str {
        self.color
    }

    pub fn icon(&self) -> &'static str {
        self.icon
    }
}

/// The categories a transaction can be filed under, in display order.
pub const CATEGORIES: &[Category] = &[
    Category::new("purchases", "Compras", "#5636D3", "shopping-bag"),
    Category::new("food", "Alimentação", "#FF872C", "coffee"),
    Category::new("salary", "Salário", "#12A454", "dollar-sign"),
    Category::new("car", "Carro", "#E83F5B", "crosshair"),
    Category::new("leisure", "Lazer", "#26195C", "heart"),
    Category::new("studies", "Estudos", "#9C001A", "book"),
];

/// Looks up a category in `CATEGORIES` by its key.
pub fn find_category(key: &str) -> Option<&'static Category> {
    CATEGORIES.iter().find(|c| c.key == key)
}

/// Returns the category for `key`, or an error explaining why the key cannot be used.
pub fn require_category(key: &str) -> Result<&'static Category> {
    let key = key.trim();
    if key.is_empty() || key == UNSELECTED_CATEGORY {
        bail!("Select a category");
    }
    match find_category(key) {
        Some(category) => Ok(category),
        None => {
            let known: Vec<&str> = CATEGORIES.iter().map(Category::key).collect();
            bail!(
                "Unknown category '{key}', expected one of: {}",
                known.join(", ")
            )
        }
    }
}
