use serde::{Deserialize, Serialize};

/// Clothing category. Declaration order is the output order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Outerwear,
    Tops,
    Bottoms,
    Footwear,
    Accessories,
}

impl Category {
    pub const ORDERED: [Category; 5] = [
        Category::Outerwear,
        Category::Tops,
        Category::Bottoms,
        Category::Footwear,
        Category::Accessories,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Outerwear => "outerwear",
            Category::Tops => "tops",
            Category::Bottoms => "bottoms",
            Category::Footwear => "footwear",
            Category::Accessories => "accessories",
        }
    }
}

/// One recommended item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutfitRecommendation {
    pub id: String,
    pub category: Category,
    pub item: String,
    pub icon: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// How the wearer experiences temperature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureSensitivity {
    /// Feels colder than the reading
    Cold,
    #[default]
    Normal,
    /// Feels warmer than the reading
    Warm,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Style {
    #[default]
    Casual,
    Business,
    Sporty,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    pub temperature_sensitivity: TemperatureSensitivity,
    pub style: Style,
    #[serde(default)]
    pub favorite_colors: Vec<String>,
}
