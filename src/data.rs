use std::fmt;

use derive_builder::Builder;
use serde::{Deserialize, Serialize};

/// Sections of the menu, in the order they are displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Starter,
    Main,
    Dessert,
    Drink,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Starter,
        Category::Main,
        Category::Dessert,
        Category::Drink,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Starter => "starter",
            Self::Main => "main",
            Self::Dessert => "dessert",
            Self::Drink => "drink",
        }
    }

    /// Accepts the canonical names as well as the labels used by the kitchen's data feed.
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "starter" | "entrée" | "entree" => Some(Self::Starter),
            "main" | "plat principal" => Some(Self::Main),
            "dessert" => Some(Self::Dessert),
            "drink" | "boisson" => Some(Self::Drink),
            _ => None,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Category as carried by a dish record. Records coming from the outside may
/// name a category we don't know about; those are kept so they can be
/// serialized back, but never land in a menu section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryTag {
    Known(Category),
    Unknown(String),
}

impl CategoryTag {
    pub fn known(&self) -> Option<Category> {
        match self {
            Self::Known(category) => Some(*category),
            Self::Unknown(_) => None,
        }
    }
}

impl From<Category> for CategoryTag {
    fn from(category: Category) -> Self {
        Self::Known(category)
    }
}

impl From<String> for CategoryTag {
    fn from(raw: String) -> Self {
        match Category::parse(&raw) {
            Some(category) => Self::Known(category),
            None => Self::Unknown(raw),
        }
    }
}

impl From<&str> for CategoryTag {
    fn from(raw: &str) -> Self {
        Self::from(raw.to_string())
    }
}

impl From<CategoryTag> for String {
    fn from(tag: CategoryTag) -> Self {
        match tag {
            CategoryTag::Known(category) => category.as_str().to_string(),
            CategoryTag::Unknown(raw) => raw,
        }
    }
}

impl Serialize for CategoryTag {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Known(category) => serializer.serialize_str(category.as_str()),
            Self::Unknown(raw) => serializer.serialize_str(raw),
        }
    }
}

impl<'de> Deserialize<'de> for CategoryTag {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(Self::from)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DishId {
    Int(i64),
    Str(String),
}

impl fmt::Display for DishId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(id) => write!(f, "{id}"),
            Self::Str(id) => f.write_str(id),
        }
    }
}

impl From<i64> for DishId {
    fn from(id: i64) -> Self {
        Self::Int(id)
    }
}

impl From<&str> for DishId {
    fn from(id: &str) -> Self {
        Self::Str(id.to_string())
    }
}

impl From<String> for DishId {
    fn from(id: String) -> Self {
        Self::Str(id)
    }
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DishError {
    #[error("dish {id} has an empty name")]
    EmptyName { id: DishId },
    #[error("dish {id} has an invalid price {price}")]
    InvalidPrice { id: DishId, price: f64 },
}

/// A menu item. Field aliases accept records from the kitchen's French feed.
#[derive(Debug, Clone, PartialEq, Builder, Serialize, Deserialize)]
#[builder(setter(into))]
pub struct Dish {
    pub id: DishId,
    #[serde(alias = "nom")]
    pub name: String,
    #[builder(default)]
    #[serde(default)]
    pub description: String,
    #[serde(alias = "prix")]
    pub price: f64,
    #[serde(alias = "categorie")]
    pub category: CategoryTag,
    #[builder(default = "true")]
    #[serde(alias = "disponible")]
    pub available: bool,
    /// empty means the dish has no picture
    #[builder(default)]
    #[serde(default, rename = "imageUrl")]
    pub image_url: String,
}

impl Dish {
    pub fn category(&self) -> Option<Category> {
        self.category.known()
    }

    pub fn has_image(&self) -> bool {
        !self.image_url.is_empty()
    }

    pub fn validate(&self) -> Result<(), DishError> {
        if self.name.trim().is_empty() {
            return Err(DishError::EmptyName {
                id: self.id.clone(),
            });
        }
        if !self.price.is_finite() || self.price < 0.0 {
            return Err(DishError::InvalidPrice {
                id: self.id.clone(),
                price: self.price,
            });
        }
        Ok(())
    }
}
