//! Local pipeline tests
//!
//! Build a miniature catalog mirror on disk and run the local pipeline
//! over it end to end.

use ptcg_common::{artifact, Error};
use ptcg_sets::services::SeriesFilter;
use ptcg_sets::workflow::{run_local_from_dir, LocalLayout, Problem, RunSummary};
use ptcg_sets::SetsError;
use std::fs;
use tempfile::TempDir;

/// Helper: Create a catalog mirror
///
/// ```text
/// data/
/// ├── sets/en.json       base1, base2, sv1 (series Base, Base, Scarlet & Violet)
/// └── cards/en/
///     ├── base1.json
///     └── sv1.json       (base2 has no card file)
/// ```
fn create_mirror() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path().join("data");

    fs::create_dir_all(root.join("sets")).unwrap();
    fs::create_dir_all(root.join("cards/en")).unwrap();

    fs::write(
        root.join("sets/en.json"),
        r#"[
            {"id": "base1", "name": "Base", "series": "Base", "releaseDate": "1999/01/09", "total": 102,
             "images": {"symbol": "https://images.example/base1/symbol.png", "logo": "https://images.example/base1/logo.png"}},
            {"id": "base2", "name": "Jungle", "series": "Base", "releaseDate": "1999/06/16", "total": 64},
            {"id": "sv1", "name": "Scarlet & Violet", "series": "Scarlet & Violet", "releaseDate": "2023/03/31", "total": 258}
        ]"#,
    )
    .unwrap();

    fs::write(
        root.join("cards/en/base1.json"),
        r#"[
            {"supertype": "Pokémon", "name": "Alakazam", "number": "1", "rarity": "Rare Holo",
             "types": ["Psychic"], "subtypes": ["Stage 2"], "nationalPokedexNumbers": [65],
             "images": {"small": "https://images.example/base1/1.png"}},
            {"supertype": "Pokémon", "name": "Bulbasaur", "number": "44", "rarity": "Common",
             "nationalPokedexNumbers": [1]},
            {"supertype": "Trainer", "name": "Potion", "number": "94", "rarity": "Common"},
            {"supertype": "Energy", "name": "Psychic Energy", "number": "101"}
        ]"#,
    )
    .unwrap();

    fs::write(
        root.join("cards/en/sv1.json"),
        r#"[
            {"supertype": "Pokémon", "name": "Spidops ex", "number": "19", "rarity": "Double Rare",
             "nationalPokedexNumbers": [918]},
            {"supertype": "Pokémon", "name": "Spidops ex", "number": "207", "rarity": "Ultra Rare",
             "nationalPokedexNumbers": [918]},
            {"supertype": "Pokémon", "name": "Spidops ex", "number": "237", "rarity": "Double Rare",
             "nationalPokedexNumbers": [918]}
        ]"#,
    )
    .unwrap();

    temp_dir
}

#[test]
fn test_builds_artifact_and_reports_skipped() {
    let mirror = create_mirror();
    let layout = LocalLayout::new(mirror.path().join("data"));
    let output = mirror.path().join("sets-data.json");

    let outcome = run_local_from_dir(&layout, &SeriesFilter::All, &output).unwrap();

    let ids: Vec<_> = outcome.sets.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, vec!["base1", "sv1"]);
    assert_eq!(outcome.problems.len(), 1);
    assert_eq!(outcome.problems[0].id, "base2");
    assert_eq!(outcome.problems[0].problem, Problem::Skipped);

    let written = artifact::read(&output).unwrap();
    assert_eq!(written, outcome.sets);

    let base = &written[0];
    assert_eq!(base.release_date, "1999/01/09");
    assert_eq!(base.total_cards, 102);
    assert_eq!(base.logo, "https://images.example/base1/logo.png");
    assert_eq!(base.pokemon.len(), 2);
    assert_eq!(base.pokemon[0].name, "alakazam");
    assert_eq!(base.pokemon[0].cards[0].image_small, "https://images.example/base1/1.png");
    assert_eq!(base.pokemon[0].cards[0].types, vec!["Psychic"]);

    let spidops = &written[1].pokemon[0];
    assert_eq!(spidops.name, "spidops");
    assert_eq!(spidops.card_count, 3);
    assert_eq!(spidops.rarity, "Double Rare");

    let summary = RunSummary::from_outcome(&outcome);
    assert_eq!(summary.sets_processed, 2);
    assert_eq!(summary.total_pokemon, 3);
    assert_eq!(summary.skipped.len(), 1);
}

#[test]
fn test_series_filter_case_insensitive() {
    let mirror = create_mirror();
    let layout = LocalLayout::new(mirror.path().join("data"));
    let output = mirror.path().join("sets-data.json");

    let outcome =
        run_local_from_dir(&layout, &SeriesFilter::from_names(["SCARLET & VIOLET"]), &output)
            .unwrap();

    assert_eq!(outcome.sets.len(), 1);
    assert_eq!(outcome.sets[0].id, "sv1");
    assert!(outcome.problems.is_empty());
}

#[test]
fn test_rebuild_overwrites_previous_artifact() {
    let mirror = create_mirror();
    let layout = LocalLayout::new(mirror.path().join("data"));
    let output = mirror.path().join("sets-data.json");

    run_local_from_dir(&layout, &SeriesFilter::All, &output).unwrap();
    run_local_from_dir(&layout, &SeriesFilter::from_names(["base"]), &output).unwrap();

    let ids: Vec<_> = artifact::read(&output).unwrap().into_iter().map(|s| s.id).collect();
    assert_eq!(ids, vec!["base1"]);
}

#[test]
fn test_malformed_card_file_fails_only_that_set() {
    let mirror = create_mirror();
    let root = mirror.path().join("data");
    fs::write(root.join("cards/en/base2.json"), "[{\"supertype\": ").unwrap();

    let outcome = run_local_from_dir(
        &LocalLayout::new(&root),
        &SeriesFilter::All,
        &mirror.path().join("out.json"),
    )
    .unwrap();

    assert_eq!(outcome.sets.len(), 2);
    assert_eq!(outcome.problems.len(), 1);
    assert!(matches!(outcome.problems[0].problem, Problem::Failed { .. }));
}

#[test]
fn test_missing_data_dir_is_fatal() {
    let dir = TempDir::new().unwrap();
    let output = dir.path().join("sets-data.json");

    let err = run_local_from_dir(
        &LocalLayout::new(dir.path().join("absent")),
        &SeriesFilter::All,
        &output,
    )
    .unwrap_err();

    assert!(matches!(err, SetsError::Common(Error::NotFound(_))));
    assert!(!output.exists());
}

#[test]
fn test_missing_sets_file_is_fatal() {
    let dir = TempDir::new().unwrap();
    fs::create_dir_all(dir.path().join("data")).unwrap();

    let err = run_local_from_dir(
        &LocalLayout::new(dir.path().join("data")),
        &SeriesFilter::All,
        &dir.path().join("sets-data.json"),
    )
    .unwrap_err();

    assert!(err.to_string().contains("Sets file not found"));
}
