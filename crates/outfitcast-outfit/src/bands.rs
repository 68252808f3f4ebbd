//! Temperature bands and the baseline wardrobe for each of them.

use serde::{Deserialize, Serialize};

use crate::types::{Category, Style};

/// Six ordered, half-open ranges of effective temperature (°C).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TemperatureBand {
    /// below 5
    VeryCold,
    /// [5, 15)
    Cold,
    /// [15, 20)
    Cool,
    /// [20, 25)
    Comfortable,
    /// [25, 30)
    Warm,
    /// 30 and above
    Hot,
}

impl TemperatureBand {
    /// Band for an effective temperature. Lower bounds are inclusive.
    ///
    /// NaN has no ordering and lands in `VeryCold`.
    pub fn classify(effective: f64) -> Self {
        if effective >= 30.0 {
            Self::Hot
        } else if effective >= 25.0 {
            Self::Warm
        } else if effective >= 20.0 {
            Self::Comfortable
        } else if effective >= 15.0 {
            Self::Cool
        } else if effective >= 5.0 {
            Self::Cold
        } else {
            Self::VeryCold
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::VeryCold => "VERY_COLD",
            Self::Cold => "COLD",
            Self::Cool => "COOL",
            Self::Comfortable => "COMFORTABLE",
            Self::Warm => "WARM",
            Self::Hot => "HOT",
        }
    }

    /// Short slug used in recommendation ids.
    pub fn slug(&self) -> &'static str {
        match self {
            Self::VeryCold => "very-cold",
            Self::Cold => "cold",
            Self::Cool => "cool",
            Self::Comfortable => "comfortable",
            Self::Warm => "warm",
            Self::Hot => "hot",
        }
    }

    pub fn baseline(&self) -> &'static [BaselineSlot] {
        match self {
            Self::VeryCold => VERY_COLD,
            Self::Cold => COLD,
            Self::Cool => COOL,
            Self::Comfortable => COMFORTABLE,
            Self::Warm => WARM,
            Self::Hot => HOT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Garment {
    pub label: &'static str,
    pub icon: &'static str,
}

/// One category of a band's baseline, with an equally valid item per style.
#[derive(Debug, Clone, Copy)]
pub struct BaselineSlot {
    pub category: Category,
    pub casual: Garment,
    pub business: Garment,
    pub sporty: Garment,
}

impl BaselineSlot {
    pub fn for_style(&self, style: Style) -> &Garment {
        match style {
            Style::Casual => &self.casual,
            Style::Business => &self.business,
            Style::Sporty => &self.sporty,
        }
    }
}

const COAT: &str = "🧥";
const SWEATER: &str = "👚";
const SHIRT: &str = "👔";
const TSHIRT: &str = "👕";
const TROUSERS: &str = "👖";
const SHORTS: &str = "🩳";
const SNEAKERS: &str = "👟";
const BOOTS: &str = "🥾";
const SHOES: &str = "👞";
const SANDALS: &str = "👡";
const SUNGLASSES: &str = "🕶️";
const HAT: &str = "👒";
const CAP: &str = "🧢";
const SCARF: &str = "🧣";
const GLOVES: &str = "🧤";

const fn g(label: &'static str, icon: &'static str) -> Garment {
    Garment { label, icon }
}

const fn slot(category: Category, casual: Garment, business: Garment, sporty: Garment) -> BaselineSlot {
    BaselineSlot {
        category,
        casual,
        business,
        sporty,
    }
}

static VERY_COLD: &[BaselineSlot] = &[
    slot(Category::Outerwear, g("Down coat", COAT), g("Wool overcoat", COAT), g("Insulated parka", COAT)),
    slot(Category::Tops, g("Heavy sweater", SWEATER), g("Turtleneck sweater", SWEATER), g("Fleece pullover", SWEATER)),
    slot(Category::Bottoms, g("Lined trousers", TROUSERS), g("Wool slacks", TROUSERS), g("Thermal tights", TROUSERS)),
    slot(Category::Footwear, g("Winter boots", BOOTS), g("Leather boots", BOOTS), g("Insulated trainers", SNEAKERS)),
    slot(Category::Accessories, g("Scarf", SCARF), g("Cashmere scarf", SCARF), g("Gloves", GLOVES)),
];

static COLD: &[BaselineSlot] = &[
    slot(Category::Outerwear, g("Jacket", COAT), g("Trench coat", COAT), g("Softshell jacket", COAT)),
    slot(Category::Tops, g("Sweater", SWEATER), g("Shirt with V-neck sweater", SHIRT), g("Long-sleeve base layer", TSHIRT)),
    slot(Category::Bottoms, g("Long pants", TROUSERS), g("Wool slacks", TROUSERS), g("Track pants", TROUSERS)),
    slot(Category::Footwear, g("Sneakers", SNEAKERS), g("Leather shoes", SHOES), g("Running shoes", SNEAKERS)),
];

static COOL: &[BaselineSlot] = &[
    slot(Category::Outerwear, g("Cardigan", COAT), g("Light blazer", COAT), g("Track jacket", COAT)),
    slot(Category::Tops, g("Long-sleeve shirt", SHIRT), g("Dress shirt", SHIRT), g("Long-sleeve tee", TSHIRT)),
    slot(Category::Bottoms, g("Chinos", TROUSERS), g("Slacks", TROUSERS), g("Joggers", TROUSERS)),
];

static COMFORTABLE: &[BaselineSlot] = &[
    slot(Category::Tops, g("Short-sleeve shirt", TSHIRT), g("Polo shirt", SHIRT), g("Performance tee", TSHIRT)),
    slot(Category::Bottoms, g("Jeans", TROUSERS), g("Chinos", TROUSERS), g("Training shorts", SHORTS)),
    slot(Category::Footwear, g("Sneakers", SNEAKERS), g("Loafers", SHOES), g("Running shoes", SNEAKERS)),
];

static WARM: &[BaselineSlot] = &[
    slot(Category::Tops, g("T-shirt", TSHIRT), g("Linen shirt", SHIRT), g("Tank top", TSHIRT)),
    slot(Category::Bottoms, g("Shorts", SHORTS), g("Linen trousers", TROUSERS), g("Running shorts", SHORTS)),
    slot(Category::Accessories, g("Sunglasses", SUNGLASSES), g("Sunglasses", SUNGLASSES), g("Cap", CAP)),
];

static HOT: &[BaselineSlot] = &[
    slot(Category::Tops, g("T-shirt", TSHIRT), g("Short-sleeve linen shirt", SHIRT), g("Tank top", TSHIRT)),
    slot(Category::Bottoms, g("Shorts", SHORTS), g("Lightweight slacks", TROUSERS), g("Running shorts", SHORTS)),
    slot(Category::Footwear, g("Sandals", SANDALS), g("Loafers", SHOES), g("Running shoes", SNEAKERS)),
    slot(Category::Accessories, g("Hat", HAT), g("Sunglasses", SUNGLASSES), g("Cap", CAP)),
];

#[cfg(test)]
mod tests {
    use super::*;

    const ALL: [TemperatureBand; 6] = [
        TemperatureBand::VeryCold,
        TemperatureBand::Cold,
        TemperatureBand::Cool,
        TemperatureBand::Comfortable,
        TemperatureBand::Warm,
        TemperatureBand::Hot,
    ];

    #[test]
    fn test_boundaries_are_half_open() {
        assert_eq!(TemperatureBand::classify(4.99), TemperatureBand::VeryCold);
        assert_eq!(TemperatureBand::classify(5.0), TemperatureBand::Cold);
        assert_eq!(TemperatureBand::classify(14.99), TemperatureBand::Cold);
        assert_eq!(TemperatureBand::classify(15.0), TemperatureBand::Cool);
        assert_eq!(TemperatureBand::classify(19.99), TemperatureBand::Cool);
        assert_eq!(TemperatureBand::classify(20.0), TemperatureBand::Comfortable);
        assert_eq!(TemperatureBand::classify(24.99), TemperatureBand::Comfortable);
        assert_eq!(TemperatureBand::classify(25.0), TemperatureBand::Warm);
        assert_eq!(TemperatureBand::classify(29.99), TemperatureBand::Warm);
        assert_eq!(TemperatureBand::classify(30.0), TemperatureBand::Hot);
    }

    #[test]
    fn test_extremes_are_classified() {
        assert_eq!(TemperatureBand::classify(f64::NEG_INFINITY), TemperatureBand::VeryCold);
        assert_eq!(TemperatureBand::classify(-40.0), TemperatureBand::VeryCold);
        assert_eq!(TemperatureBand::classify(55.0), TemperatureBand::Hot);
        assert_eq!(TemperatureBand::classify(f64::INFINITY), TemperatureBand::Hot);
    }

    #[test]
    fn test_bands_are_ordered_coldest_first() {
        let mut sorted = ALL.to_vec();
        sorted.sort();
        assert_eq!(sorted, ALL.to_vec());
    }

    #[test]
    fn test_baselines_are_category_ordered_and_unique() {
        for band in ALL {
            let categories: Vec<Category> = band.baseline().iter().map(|s| s.category).collect();
            let mut expected = categories.clone();
            expected.sort();
            expected.dedup();
            assert_eq!(categories, expected, "{} baseline out of order", band.name());
            assert!(!categories.is_empty());
        }
    }

    #[test]
    fn test_style_selects_item() {
        let tops = &TemperatureBand::Cold.baseline()[1];
        assert_eq!(tops.category, Category::Tops);
        assert_eq!(tops.for_style(Style::Casual).label, "Sweater");
        assert_eq!(tops.for_style(Style::Business).label, "Shirt with V-neck sweater");
        assert_eq!(tops.for_style(Style::Sporty).label, "Long-sleeve base layer");
    }
}
