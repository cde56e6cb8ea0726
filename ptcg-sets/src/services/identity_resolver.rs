//! Identity Resolver
//!
//! Decides which creature a card depicts so that cards can be grouped.
//!
//! # Resolution
//! 1. A card carrying national dex numbers is keyed by the first one. This
//!    is authoritative: distinct creatures with similar names never merge.
//! 2. Otherwise the display name is normalized (lowercased, trimmed, card
//!    variant and naming-convention tokens removed) and used as the key.
//! 3. A name that normalizes to nothing yields no key and the card is
//!    left out of aggregation.
//!
//! Name normalization is lossy on purpose: differently spelled variants
//! that normalize identically are the same creature.

use ptcg_common::models::RawCard;
use std::fmt;

/// Card-variant markers stripped during normalization
pub const VARIANT_SUFFIXES: &[&str] = &["ex", "gx", "v", "vmax", "vstar", "vunion"];

/// Naming-convention tokens stripped during normalization
pub const NAMING_MARKERS: &[&str] = &[
    "team", "rockets", "rocket", "dark", "light", "shining", "radiant",
];

/// Grouping key identifying one creature within a set
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IdentityKey {
    /// National dex number (preferred)
    Dex(u32),
    /// Normalized display name (fallback)
    Name(String),
}

impl IdentityKey {
    /// Dex number component, if this is a dex key
    pub fn dex_number(&self) -> Option<u32> {
        match self {
            IdentityKey::Dex(n) => Some(*n),
            IdentityKey::Name(_) => None,
        }
    }
}

impl fmt::Display for IdentityKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IdentityKey::Dex(n) => write!(f, "dex_{}", n),
            IdentityKey::Name(name) => f.write_str(name),
        }
    }
}

fn is_stripped_token(token: &str) -> bool {
    VARIANT_SUFFIXES.contains(&token) || NAMING_MARKERS.contains(&token)
}

/// Normalize a card display name for grouping
///
/// Returns `None` when nothing is left after stripping.
///
/// ```
/// use ptcg_sets::services::identity_resolver::normalize_name;
///
/// assert_eq!(normalize_name("Dark Charizard ex"), Some("charizard".to_string()));
/// assert_eq!(normalize_name("Team Rocket's Mewtwo"), Some("rocket's mewtwo".to_string()));
/// assert_eq!(normalize_name("EX"), None);
/// ```
pub fn normalize_name(name: &str) -> Option<String> {
    let lowered = name.trim().to_lowercase();

    let kept: Vec<&str> = lowered
        .split_whitespace()
        .filter(|token| !is_stripped_token(token))
        .collect();

    if kept.is_empty() {
        None
    } else {
        Some(kept.join(" "))
    }
}

/// Compute the identity key of a card
pub fn resolve(card: &RawCard) -> Option<IdentityKey> {
    if let Some(&dex) = card.national_pokedex_numbers.first() {
        return Some(IdentityKey::Dex(dex));
    }

    normalize_name(&card.name).map(IdentityKey::Name)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn card(name: &str, dex: &[u32]) -> RawCard {
        RawCard {
            supertype: "Pokémon".to_string(),
            name: name.to_string(),
            national_pokedex_numbers: dex.to_vec(),
            ..Default::default()
        }
    }

    #[test]
    fn test_dex_number_wins_over_name() {
        assert_eq!(resolve(&card("Pikachu VMAX", &[25])), Some(IdentityKey::Dex(25)));
        assert_eq!(resolve(&card("Pikachu", &[25])), Some(IdentityKey::Dex(25)));
    }

    #[test]
    fn test_first_dex_number_is_key() {
        assert_eq!(
            resolve(&card("Reshiram & Charizard GX", &[643, 6])),
            Some(IdentityKey::Dex(643))
        );
    }

    #[test]
    fn test_dex_key_ignores_unresolvable_name() {
        assert_eq!(resolve(&card("EX", &[150])), Some(IdentityKey::Dex(150)));
    }

    #[test]
    fn test_name_fallback() {
        assert_eq!(
            resolve(&card("  Shining Gyarados  ", &[])),
            Some(IdentityKey::Name("gyarados".to_string()))
        );
    }

    #[test]
    fn test_unresolvable_name_yields_none() {
        assert_eq!(resolve(&card("EX", &[])), None);
        assert_eq!(resolve(&card("Team Rocket", &[])), None);
        assert_eq!(resolve(&card("", &[])), None);
    }

    #[test]
    fn test_tokens_removed_anywhere() {
        assert_eq!(normalize_name("dark Charizard ex"), normalize_name("charizard"));
        assert_eq!(normalize_name("Mew ex Radiant"), Some("mew".to_string()));
        assert_eq!(normalize_name("Zacian V-UNION"), Some("zacian v-union".to_string()));
    }

    #[test]
    fn test_whitespace_collapsed() {
        assert_eq!(normalize_name("Mr.   Mime\tex"), Some("mr. mime".to_string()));
    }

    #[test]
    fn test_normalize_is_idempotent() {
        for name in [
            "Dark Charizard ex",
            "Radiant Greninja",
            "Team Rocket's Mewtwo ex",
            "Pikachu VMAX",
            "Flabébé",
            "Lycanroc GX",
        ] {
            let once = normalize_name(name).unwrap();
            assert_eq!(normalize_name(&once), Some(once.clone()), "not idempotent: {}", name);
        }
    }

    #[test]
    fn test_key_display() {
        assert_eq!(IdentityKey::Dex(1).to_string(), "dex_1");
        assert_eq!(IdentityKey::Name("unown".to_string()).to_string(), "unown");
        assert_eq!(IdentityKey::Dex(7).dex_number(), Some(7));
        assert_eq!(IdentityKey::Name("x".to_string()).dex_number(), None);
    }
}
