use lifegacha_core::{complete_task, AppState, RewardPreset, Task};
use proptest::prelude::*;

fn task_with_xp(xp: u64) -> Task {
    let mut task = Task::new("grind", "", RewardPreset::Small);
    task.reward_xp = xp;
    task
}

proptest! {
    #[test]
    fn completion_keeps_xp_below_threshold(rewards in prop::collection::vec(0u64..20_000, 1..30)) {
        let mut state = AppState::default();
        state.tasks = rewards.iter().map(|xp| task_with_xp(*xp)).collect();
        let ids: Vec<String> = state.tasks.iter().map(|task| task.id.clone()).collect();

        let mut total_xp = 0u64;
        for id in &ids {
            let level_before = state.player.level;
            let report = complete_task(&mut state, id).expect("open task completes");
            total_xp += report.reward_xp;

            prop_assert!(state.player.current_xp < state.player.xp_to_next_level);
            prop_assert_eq!(state.player.xp_to_next_level, 100 * u64::from(state.player.level));
            prop_assert_eq!(report.level_ups.from_level, level_before);
            prop_assert_eq!(report.level_ups.to_level, state.player.level);
        }

        // Total XP earned equals the XP spent on levels plus what is left over.
        let spent: u64 = (1..state.player.level).map(|level| 100 * u64::from(level)).sum();
        prop_assert_eq!(spent + state.player.current_xp, total_xp);
    }

    #[test]
    fn completing_twice_is_a_noop(xp in 0u64..1_000) {
        let mut state = AppState::default();
        state.tasks.push(task_with_xp(xp));
        let id = state.tasks[0].id.clone();

        complete_task(&mut state, &id).expect("first completion");
        let snapshot = state.clone();
        prop_assert!(complete_task(&mut state, &id).is_none());
        prop_assert_eq!(state, snapshot);
    }
}
