//! Plain-text views of the game state.

use lifegacha_core::{
    main_character, owned_characters, AppState, Character, Gacha, PlayerState, PullResult, Task,
};

const PROGRESS_BAR_WIDTH: usize = 20;

pub fn state(state: &AppState, catalog: &[Character]) -> String {
    let mut out = player(&state.player);
    out.push('\n');
    out.push_str(&tasks(&state.tasks));
    out.push('\n');
    out.push_str(&collection(state, catalog));
    out
}

pub fn player(player: &PlayerState) -> String {
    let filled = usize::from(player.progress_percent()) * PROGRESS_BAR_WIDTH / 100;
    format!(
        "Level {}  [{}{}] {} / {} XP  Gems: {}\n",
        player.level,
        "#".repeat(filled),
        "-".repeat(PROGRESS_BAR_WIDTH - filled),
        player.current_xp,
        player.xp_to_next_level,
        player.currency
    )
}

pub fn tasks(tasks: &[Task]) -> String {
    if tasks.is_empty() {
        return "No tasks yet. Add one to start earning!\n".to_string();
    }

    let mut out = String::new();
    for task in tasks {
        let mark = if task.completed { "x" } else { " " };
        let description = if task.description.is_empty() {
            "No description"
        } else {
            task.description.as_str()
        };
        out.push_str(&format!(
            "[{mark}] {}  ({})\n    {description}\n    Reward: +{} XP / +{} Gems\n",
            task.title, task.id, task.reward_xp, task.reward_currency
        ));
    }
    out
}

pub fn collection(state: &AppState, catalog: &[Character]) -> String {
    let mut out = String::new();
    match main_character(state, catalog) {
        Some(main) => out.push_str(&format!(
            "Main: {} ({}, Element: {})\n",
            main.name, main.rarity, main.element
        )),
        None => out.push_str("Main: No main character yet\n"),
    }

    let owned = owned_characters(state, catalog);
    if owned.is_empty() {
        out.push_str("Pull characters to fill your collection!\n");
        return out;
    }
    for character in owned {
        out.push_str(&format!(
            "  {:<4} {:<8} {:<10} Element: {}\n",
            character.id, character.name, character.rarity, character.element
        ));
    }
    out
}

pub fn pull_result(result: &PullResult) -> String {
    let character = &result.character;
    let status = if result.is_duplicate() {
        "Already owned"
    } else {
        "Added to collection!"
    };
    format!(
        "[{}] {}\nElement: {}\n{}\n{}\n{}\n",
        character.rarity,
        character.name,
        character.element,
        character.description,
        status,
        result.message()
    )
}

pub fn catalog(gacha: &Gacha) -> String {
    let mut out = String::from("Rates:");
    for rate in gacha.rates() {
        out.push_str(&format!(" {} {}%", rate.rarity, rate.weight));
    }
    out.push('\n');
    for character in gacha.catalog() {
        out.push_str(&format!(
            "  {:<4} {:<8} {:<10} {:<7} {}\n",
            character.id,
            character.name,
            character.rarity,
            character.element,
            character.description
        ));
    }
    out
}
