// ============================================================================
// DineFlow Core - Menu Item Entity
// File: crates/dineflow-core/src/domain/menu_item.rs
// ============================================================================

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use dineflow_shared::constants::DEFAULT_SECTION_NAME;

use crate::inputs::{CreateMenuItemInput, UpdateMenuItemInput};

/// Menu item read model. Prices are integer minor currency units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuItem {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub menu: Option<String>,
    pub section: Option<String>,
    pub name: String,
    pub description: Option<String>,
    pub price_cents: i64,
    pub currency: String,
    pub tags: Vec<String>,
    pub is_available: bool,
    pub version: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MenuItem {
    pub fn from_input(input: CreateMenuItemInput) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            tenant_id: input.tenant_id,
            menu: input.menu,
            section: input.section,
            name: input.name,
            description: input.description,
            price_cents: input.price_cents,
            currency: input.currency,
            tags: input.tags,
            is_available: input.is_available,
            version: 1,
            created_at: now,
            updated_at: now,
        }
    }

    /// Applies the supplied fields and bumps the version.
    pub fn apply(&mut self, changes: UpdateMenuItemInput) {
        if let Some(name) = changes.name {
            self.name = name;
        }
        if let Some(description) = changes.description {
            self.description = Some(description);
        }
        if let Some(price_cents) = changes.price_cents {
            self.price_cents = price_cents;
        }
        if let Some(currency) = changes.currency {
            self.currency = currency;
        }
        if let Some(tags) = changes.tags {
            self.tags = tags;
        }
        if let Some(is_available) = changes.is_available {
            self.is_available = is_available;
        }
        self.version += 1;
        self.updated_at = Utc::now();
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t.eq_ignore_ascii_case(tag))
    }

    pub fn section_name(&self) -> &str {
        self.section.as_deref().unwrap_or(DEFAULT_SECTION_NAME)
    }
}

/// Items sharing a section, in menu order.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MenuSection {
    pub name: String,
    pub items: Vec<MenuItem>,
}

impl MenuSection {
    /// Groups items by section, keeping first-appearance order of sections.
    pub fn group(items: Vec<MenuItem>) -> Vec<MenuSection> {
        let mut sections: Vec<MenuSection> = Vec::new();
        for item in items {
            match sections.iter_mut().find(|s| s.name == item.section_name()) {
                Some(section) => section.items.push(item),
                None => sections.push(MenuSection {
                    name: item.section_name().to_string(),
                    items: vec![item],
                }),
            }
        }
        sections
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(name: &str, section: Option<&str>) -> MenuItem {
        let now = Utc::now();
        MenuItem {
            id: Uuid::new_v4(),
            tenant_id: Uuid::new_v4(),
            menu: None,
            section: section.map(str::to_string),
            name: name.to_string(),
            description: None,
            price_cents: 1000,
            currency: "SEK".to_string(),
            tags: vec!["Vegan".to_string()],
            is_available: true,
            version: 1,
            created_at: now,
            updated_at: now,
        }
    }

    #[test]
    fn test_group_keeps_first_appearance_order() {
        let sections = MenuSection::group(vec![
            item("Soup", Some("Starters")),
            item("Pizza", Some("Mains")),
            item("Bread", None),
            item("Salad", Some("Starters")),
        ]);

        let names: Vec<&str> = sections.iter().map(|s| s.name.as_str()).collect();
        assert_eq!(names, vec!["Starters", "Mains", DEFAULT_SECTION_NAME]);
        assert_eq!(sections[0].items.len(), 2);
        assert_eq!(sections[0].items[1].name, "Salad");
    }

    #[test]
    fn test_has_tag_ignores_case() {
        assert!(item("Tofu", None).has_tag("vegan"));
        assert!(!item("Tofu", None).has_tag("popular"));
    }
}
