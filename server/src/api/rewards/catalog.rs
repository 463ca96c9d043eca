//! Static reward catalog. Authored here and updated by redeploying; there
//! is no runtime mutation.

use serde::Serialize;
use std::sync::LazyLock;
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Reward {
    pub id: i32,
    pub title: String,
    pub description: String,
    /// Green credits required to redeem.
    pub credits: i32,
    pub category: String,
    /// Emoji shown on the reward card.
    pub image: String,
    /// Perk label ("20% OFF", "Free Shipping", ...).
    pub discount: String,
}

fn reward(
    id: i32,
    title: &str,
    description: &str,
    credits: i32,
    category: &str,
    image: &str,
    discount: &str,
) -> Reward {
    Reward {
        id,
        title: title.to_string(),
        description: description.to_string(),
        credits,
        category: category.to_string(),
        image: image.to_string(),
        discount: discount.to_string(),
    }
}

static CATALOG: LazyLock<Vec<Reward>> = LazyLock::new(|| {
    vec![
        reward(
            1,
            "Eco Water Bottle",
            "Premium stainless steel water bottle",
            50,
            "products",
            "🍃",
            "20% OFF",
        ),
        reward(
            2,
            "Organic Coffee Beans",
            "Fair trade organic coffee - 1kg",
            75,
            "food",
            "☕",
            "15% OFF",
        ),
        reward(
            3,
            "Solar Power Bank",
            "Portable solar charger for devices",
            120,
            "tech",
            "🔋",
            "25% OFF",
        ),
        reward(
            4,
            "Bamboo Toothbrush Set",
            "Set of 4 biodegradable toothbrushes",
            30,
            "personal",
            "🦷",
            "30% OFF",
        ),
        reward(
            5,
            "Tree Planting Certificate",
            "Plant a tree in your name",
            100,
            "impact",
            "🌳",
            "Direct Impact",
        ),
        reward(
            6,
            "Eco-Friendly Tote Bag",
            "Reusable canvas tote bag",
            40,
            "accessories",
            "👜",
            "Free Shipping",
        ),
    ]
});

pub fn catalog() -> &'static [Reward] {
    &CATALOG
}

pub fn find(reward_id: i32) -> Option<&'static Reward> {
    CATALOG.iter().find(|r| r.id == reward_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_find_known_reward() {
        let reward = find(1).expect("reward 1 should exist");
        assert_eq!(reward.title, "Eco Water Bottle");
        assert_eq!(reward.credits, 50);
    }

    #[test]
    fn test_find_unknown_reward() {
        assert!(find(0).is_none());
        assert!(find(999).is_none());
    }

    #[test]
    fn test_catalog_ids_are_unique() {
        let ids: HashSet<i32> = catalog().iter().map(|r| r.id).collect();
        assert_eq!(ids.len(), catalog().len());
    }

    #[test]
    fn test_catalog_costs_are_positive() {
        assert!(catalog().iter().all(|r| r.credits > 0));
    }
}
