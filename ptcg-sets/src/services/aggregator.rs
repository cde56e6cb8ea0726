//! Aggregator
//!
//! Groups one set's cards into creature entries and assembles the set's
//! output record.
//!
//! # Grouping
//! - Only creature cards take part; everything else is discarded first
//! - Each card is keyed by [`identity_resolver::resolve`]; unresolvable
//!   cards are dropped silently
//! - Entries come out in first-seen order of their keys
//!
//! # Per-entry summary
//! - `rarity` is the most frequent member rarity (missing → "Common").
//!   On a tie the rarity that was seen first among the members wins.
//! - `dex_numbers` is the sorted union of every member's dex numbers

use super::identity_resolver::{self, normalize_name, IdentityKey};
use ptcg_common::models::{CardSummary, CreatureEntry, RawCard, SetDescriptor, SetRecord};
use std::collections::{BTreeSet, HashMap};
use tracing::trace;

/// Cards sharing one identity key, in encounter order
struct Group<'a> {
    key: IdentityKey,
    members: Vec<&'a RawCard>,
}

/// Aggregate the cards of one set into creature entries
pub fn aggregate(cards: &[RawCard]) -> Vec<CreatureEntry> {
    let mut groups: Vec<Group<'_>> = Vec::new();
    let mut index: HashMap<IdentityKey, usize> = HashMap::new();

    for card in cards.iter().filter(|c| c.is_pokemon()) {
        let Some(key) = identity_resolver::resolve(card) else {
            trace!(name = %card.name, number = %card.number, "Unresolvable card name, dropped");
            continue;
        };

        match index.get(&key) {
            Some(&i) => groups[i].members.push(card),
            None => {
                index.insert(key.clone(), groups.len());
                groups.push(Group {
                    key,
                    members: vec![card],
                });
            }
        }
    }

    groups.into_iter().map(build_entry).collect()
}

/// Aggregate `cards` and wrap the entries in the record for `set`
pub fn build_set_record(set: &SetDescriptor, cards: &[RawCard]) -> SetRecord {
    SetRecord::new(set, aggregate(cards))
}

fn build_entry(group: Group<'_>) -> CreatureEntry {
    let Group { key, members } = group;

    // Groups are never created empty
    let first = members[0];
    let name = normalize_name(&first.name).unwrap_or_else(|| match &key {
        IdentityKey::Name(name) => name.clone(),
        IdentityKey::Dex(_) => first.name.clone(),
    });

    let dex_numbers: BTreeSet<u32> = members
        .iter()
        .flat_map(|c| c.national_pokedex_numbers.iter().copied())
        .collect();

    let rarity = most_common_rarity(&members);
    let cards: Vec<CardSummary> = members.iter().map(|c| CardSummary::from(*c)).collect();

    CreatureEntry {
        name,
        dex_number: key.dex_number(),
        dex_numbers: dex_numbers.into_iter().collect(),
        rarity,
        card_count: cards.len(),
        cards,
    }
}

/// Statistical mode of the members' rarities, first-seen wins ties
fn most_common_rarity(members: &[&RawCard]) -> String {
    let mut counts: Vec<(&str, usize)> = Vec::new();

    for card in members {
        let rarity = card.rarity_or_default();
        match counts.iter_mut().find(|(r, _)| *r == rarity) {
            Some((_, count)) => *count += 1,
            None => counts.push((rarity, 1)),
        }
    }

    let mut best: Option<(&str, usize)> = None;
    for (rarity, count) in counts {
        if best.map_or(true, |(_, best_count)| count > best_count) {
            best = Some((rarity, count));
        }
    }

    best.map(|(rarity, _)| rarity)
        .unwrap_or(ptcg_common::models::DEFAULT_RARITY)
        .to_string()
}
