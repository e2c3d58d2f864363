use lifegacha_core::{
    AppState, Gacha, PullError, PullOutcome, Rarity, RarityRate, CHARACTER_CATALOG,
    DUPLICATE_BONUS, PULL_COST,
};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;

fn state_with_currency(currency: u64) -> AppState {
    let mut state = AppState::default();
    state.player.currency = currency;
    state
}

fn legendary_only() -> Gacha {
    Gacha::new(
        CHARACTER_CATALOG.to_vec(),
        vec![RarityRate {
            rarity: Rarity::Legendary,
            weight: 100,
        }],
    )
    .unwrap()
}

#[test]
fn pull_without_enough_currency_is_rejected() {
    let gacha = Gacha::standard().unwrap();
    let mut state = state_with_currency(50);
    let snapshot = state.clone();
    let mut rng = StdRng::seed_from_u64(7);

    let err = gacha.pull(&mut state, &mut rng).unwrap_err();
    assert_eq!(
        err,
        PullError::InsufficientCurrency {
            currency: 50,
            cost: PULL_COST,
        }
    );
    assert_eq!(err.to_string(), "Not enough Gems. Complete more tasks!");
    assert_eq!(state, snapshot);
}

#[test]
fn duplicate_pull_refunds_bonus_and_keeps_collection() {
    let gacha = Gacha::standard().unwrap();
    let mut state = state_with_currency(100);
    state.owned_characters = CHARACTER_CATALOG.iter().map(|c| c.id.to_string()).collect();
    state.main_character_id = Some("c1".to_string());
    let owned_before = state.owned_characters.clone();
    let mut rng = StdRng::seed_from_u64(11);

    let result = gacha.pull(&mut state, &mut rng).unwrap();
    assert_eq!(result.outcome, PullOutcome::Duplicate);
    assert_eq!(state.player.currency, 100 - PULL_COST + DUPLICATE_BONUS);
    assert_eq!(state.player.currency, 20);
    assert_eq!(state.owned_characters, owned_before);
    assert_eq!(result.message(), "Duplicate! You received 20 bonus Gems.");
}

#[test]
fn first_new_character_becomes_main() {
    let gacha = Gacha::standard().unwrap();
    let mut state = state_with_currency(100);
    let mut rng = StdRng::seed_from_u64(5);

    let result = gacha.pull(&mut state, &mut rng).unwrap();
    assert_eq!(result.outcome, PullOutcome::New);
    assert_eq!(state.player.currency, 0);
    assert_eq!(state.owned_characters, vec![result.character.id.to_string()]);
    assert_eq!(state.main_character_id.as_deref(), Some(result.character.id));
    assert_eq!(
        result.message(),
        format!("New character: {}!", result.character.name)
    );
}

#[test]
fn new_character_does_not_replace_existing_main() {
    let gacha = legendary_only();
    let mut state = state_with_currency(100);
    state.owned_characters = vec!["c1".to_string()];
    state.main_character_id = Some("c1".to_string());
    let mut rng = StdRng::seed_from_u64(1);

    let result = gacha.pull(&mut state, &mut rng).unwrap();
    assert_eq!(result.character.id, "c8");
    assert_eq!(result.outcome, PullOutcome::New);
    assert_eq!(state.owned_characters, vec!["c1".to_string(), "c8".to_string()]);
    assert_eq!(state.main_character_id.as_deref(), Some("c1"));
}

#[test]
fn drawn_character_matches_resolved_rarity() {
    let gacha = legendary_only();
    let mut rng = StdRng::seed_from_u64(99);
    for _ in 0..20 {
        let mut state = state_with_currency(PULL_COST);
        let result = gacha.pull(&mut state, &mut rng).unwrap();
        assert_eq!(result.character.rarity, Rarity::Legendary);
    }
}

#[test]
fn repeated_pulls_never_duplicate_collection_entries() {
    let gacha = Gacha::standard().unwrap();
    let mut state = state_with_currency(100 * PULL_COST);
    let mut rng = StdRng::seed_from_u64(2024);

    let mut new_count = 0;
    for _ in 0..100 {
        if gacha.pull(&mut state, &mut rng).unwrap().outcome == PullOutcome::New {
            new_count += 1;
        }
    }

    let unique: HashSet<_> = state.owned_characters.iter().collect();
    assert_eq!(unique.len(), state.owned_characters.len());
    assert_eq!(state.owned_characters.len(), new_count);
    let duplicates = 100 - new_count as u64;
    assert_eq!(state.player.currency, duplicates * DUPLICATE_BONUS);
    assert!(state
        .main_character_id
        .as_ref()
        .is_some_and(|id| state.owned_characters.contains(id)));
}
