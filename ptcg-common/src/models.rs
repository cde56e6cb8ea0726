//! Catalog input models and output artifact models
//!
//! Input types mirror the upstream catalog's camelCase JSON (both the
//! remote API and the cloned mirror use the same shape). Every field other
//! than a set's `id` and `name` is optional upstream and defaults here.
//!
//! Output types serialize with snake_case keys and make up the artifact.

use serde::{Deserialize, Deserializer, Serialize};

/// Supertype of cards that take part in aggregation
pub const POKEMON_SUPERTYPE: &str = "Pokémon";

/// Rarity assumed when a card carries none
pub const DEFAULT_RARITY: &str = "Common";

/// Treat an explicit JSON `null` the same as a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ============================================================================
// Input: catalog records
// ============================================================================

/// Logo and symbol artwork of a set
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SetImages {
    #[serde(deserialize_with = "null_as_default")]
    pub logo: String,
    #[serde(deserialize_with = "null_as_default")]
    pub symbol: String,
}

/// One set as listed by the catalog
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SetDescriptor {
    pub id: String,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub series: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub release_date: String,
    /// Printed card total
    #[serde(default, rename = "total", deserialize_with = "null_as_default")]
    pub total_cards: u32,
    #[serde(default, deserialize_with = "null_as_default")]
    pub images: SetImages,
}

impl SetDescriptor {
    pub fn logo_url(&self) -> &str {
        &self.images.logo
    }

    pub fn symbol_url(&self) -> &str {
        &self.images.symbol
    }
}

/// Artwork URLs of a single card
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct CardImages {
    #[serde(deserialize_with = "null_as_default")]
    pub small: String,
    #[serde(deserialize_with = "null_as_default")]
    pub large: String,
}

/// One card as supplied by the catalog
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawCard {
    #[serde(deserialize_with = "null_as_default")]
    pub supertype: String,
    #[serde(deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(deserialize_with = "null_as_default")]
    pub number: String,
    pub rarity: Option<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub types: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub subtypes: Vec<String>,
    #[serde(deserialize_with = "null_as_default")]
    pub images: CardImages,
    /// National dex numbers of every creature depicted on the card
    #[serde(deserialize_with = "null_as_default")]
    pub national_pokedex_numbers: Vec<u32>,
}

impl RawCard {
    /// Whether this card belongs to the creature supertype
    pub fn is_pokemon(&self) -> bool {
        self.supertype == POKEMON_SUPERTYPE
    }

    /// Rarity label with the default applied to missing or blank values
    pub fn rarity_or_default(&self) -> &str {
        match self.rarity.as_deref() {
            Some(rarity) if !rarity.trim().is_empty() => rarity,
            _ => DEFAULT_RARITY,
        }
    }
}

// ============================================================================
// Output: artifact records
// ============================================================================

/// Retained projection of one member card
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CardSummary {
    pub card_name: String,
    pub number: String,
    pub rarity: String,
    pub types: Vec<String>,
    pub image_small: String,
    pub subtypes: Vec<String>,
    pub dex_numbers: Vec<u32>,
}

impl From<&RawCard> for CardSummary {
    fn from(card: &RawCard) -> Self {
        Self {
            card_name: card.name.clone(),
            number: card.number.clone(),
            rarity: card.rarity_or_default().to_string(),
            types: card.types.clone(),
            image_small: card.images.small.clone(),
            subtypes: card.subtypes.clone(),
            dex_numbers: card.national_pokedex_numbers.clone(),
        }
    }
}

/// One distinct creature within a set
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CreatureEntry {
    pub name: String,
    /// Present only when the entry was keyed by dex number
    pub dex_number: Option<u32>,
    /// Sorted, deduplicated union of member cards' dex numbers
    pub dex_numbers: Vec<u32>,
    /// Most frequent rarity among member cards
    pub rarity: String,
    pub card_count: usize,
    pub cards: Vec<CardSummary>,
}

/// Aggregated output for one set
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SetRecord {
    pub id: String,
    pub name: String,
    pub series: String,
    pub release_date: String,
    pub total_cards: u32,
    pub logo: String,
    pub symbol: String,
    pub pokemon: Vec<CreatureEntry>,
}

impl SetRecord {
    /// Build the record for `set` carrying the given creature entries
    pub fn new(set: &SetDescriptor, pokemon: Vec<CreatureEntry>) -> Self {
        Self {
            id: set.id.clone(),
            name: set.name.clone(),
            series: set.series.clone(),
            release_date: set.release_date.clone(),
            total_cards: set.total_cards,
            logo: set.logo_url().to_string(),
            symbol: set.symbol_url().to_string(),
            pokemon,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_descriptor_from_catalog_json() {
        let json = r#"{
            "id": "sv1",
            "name": "Scarlet & Violet",
            "series": "Scarlet & Violet",
            "printedTotal": 198,
            "total": 258,
            "releaseDate": "2023/03/31",
            "images": {
                "symbol": "https://images.example/sv1/symbol.png",
                "logo": "https://images.example/sv1/logo.png"
            }
        }"#;

        let set: SetDescriptor = serde_json::from_str(json).unwrap();
        assert_eq!(set.id, "sv1");
        assert_eq!(set.total_cards, 258);
        assert_eq!(set.release_date, "2023/03/31");
        assert_eq!(set.logo_url(), "https://images.example/sv1/logo.png");
        assert_eq!(set.symbol_url(), "https://images.example/sv1/symbol.png");
    }

    #[test]
    fn test_set_descriptor_missing_optional_fields() {
        let set: SetDescriptor = serde_json::from_str(r#"{"id": "x1", "name": "X"}"#).unwrap();
        assert_eq!(set.series, "");
        assert_eq!(set.total_cards, 0);
        assert_eq!(set.logo_url(), "");
    }

    #[test]
    fn test_raw_card_tolerates_missing_and_null_fields() {
        let json = r#"{
            "supertype": "Pokémon",
            "name": "Sprigatito",
            "subtypes": null,
            "images": {"small": "https://images.example/sv1/13.png"}
        }"#;

        let card: RawCard = serde_json::from_str(json).unwrap();
        assert!(card.is_pokemon());
        assert!(card.subtypes.is_empty());
        assert!(card.national_pokedex_numbers.is_empty());
        assert_eq!(card.rarity, None);
        assert_eq!(card.rarity_or_default(), "Common");
        assert_eq!(card.images.small, "https://images.example/sv1/13.png");
    }

    #[test]
    fn test_blank_rarity_defaults_to_common() {
        let card = RawCard {
            rarity: Some("  ".to_string()),
            ..Default::default()
        };
        assert_eq!(card.rarity_or_default(), DEFAULT_RARITY);
    }

    #[test]
    fn test_card_summary_projection() {
        let card = RawCard {
            supertype: POKEMON_SUPERTYPE.to_string(),
            name: "Charizard ex".to_string(),
            number: "125".to_string(),
            rarity: Some("Double Rare".to_string()),
            types: vec!["Darkness".to_string()],
            subtypes: vec!["Stage 2".to_string(), "ex".to_string()],
            images: CardImages {
                small: "small.png".to_string(),
                large: "large.png".to_string(),
            },
            national_pokedex_numbers: vec![6],
        };

        let summary = CardSummary::from(&card);
        assert_eq!(summary.card_name, "Charizard ex");
        assert_eq!(summary.rarity, "Double Rare");
        assert_eq!(summary.image_small, "small.png");
        assert_eq!(summary.dex_numbers, vec![6]);
    }

    #[test]
    fn test_creature_entry_serializes_null_dex_number() {
        let entry = CreatureEntry {
            name: "unown".to_string(),
            dex_number: None,
            dex_numbers: vec![],
            rarity: "Common".to_string(),
            card_count: 0,
            cards: vec![],
        };

        let value = serde_json::to_value(&entry).unwrap();
        assert!(value.get("dex_number").unwrap().is_null());
        assert_eq!(value["card_count"], 0);
    }
}
