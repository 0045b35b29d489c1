//! Form upgrades paid for with score

use super::form::Form;
use super::state::GameState;

/// Which upgrade intent was pressed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpgradeIntent {
    /// Next form; from TV Man the richest affordable branch
    Primary,
    /// From TV Man only: straight to Large Speakerman
    Alternate,
}

/// Outcome of an upgrade request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Upgrade {
    Applied { from: Form, to: Form, cost: u32 },
    /// A target exists but score falls short of the cheapest one
    Insufficient { needed: u32 },
    /// Nothing to evolve into with this intent
    Unavailable,
}

/// Candidate targets for `intent` from `form`, in preference order
fn candidates(form: Form, intent: UpgradeIntent) -> Vec<(Form, u32)> {
    let successors = form.successors().iter().copied();
    match intent {
        UpgradeIntent::Primary => successors.collect(),
        UpgradeIntent::Alternate if form == Form::TvMan => {
            successors.filter(|(to, _)| *to == Form::LargeSpeakerman).collect()
        }
        UpgradeIntent::Alternate => Vec::new(),
    }
}

/// Evolve the player if the current form allows it and score covers the cost
pub fn try_upgrade(state: &mut GameState, intent: UpgradeIntent) -> Upgrade {
    let from = state.player.form;
    let options = candidates(from, intent);

    let Some(&(to, cost)) = options.iter().find(|(_, cost)| state.score >= *cost) else {
        return match options.iter().map(|(_, cost)| *cost).min() {
            Some(needed) => Upgrade::Insufficient { needed },
            None => Upgrade::Unavailable,
        };
    };

    state.score -= cost;
    state.player.evolve(to);
    log::info!(
        "Upgraded {} -> {} for {} (score now {})",
        from.label(),
        to.label(),
        cost,
        state.score
    );
    Upgrade::Applied { from, to, cost }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::form::{LARGE_CAMERAMAN_COST, LARGE_SPEAKERMAN_COST, SPEAKERMAN_COST};

    fn playing_state() -> GameState {
        let mut state = GameState::new(3);
        state.reset();
        state
    }

    #[test]
    fn test_upgrade_at_exact_cost() {
        let mut state = playing_state();
        state.score = SPEAKERMAN_COST;
        state.player.health = 2;
        let result = try_upgrade(&mut state, UpgradeIntent::Primary);
        assert_eq!(
            result,
            Upgrade::Applied {
                from: Form::Cameraman,
                to: Form::Speakerman,
                cost: 12
            }
        );
        assert_eq!(state.score, 0);
        assert_eq!(state.player.form, Form::Speakerman);
        assert_eq!(state.player.health, 6);
    }

    #[test]
    fn test_upgrade_one_short_is_rejected() {
        let mut state = playing_state();
        state.score = SPEAKERMAN_COST - 1;
        let result = try_upgrade(&mut state, UpgradeIntent::Primary);
        assert_eq!(result, Upgrade::Insufficient { needed: 12 });
        assert_eq!(state.score, 11);
        assert_eq!(state.player.form, Form::Cameraman);
    }

    #[test]
    fn test_one_step_per_intent() {
        let mut state = playing_state();
        state.score = 100;
        try_upgrade(&mut state, UpgradeIntent::Primary);
        assert_eq!(state.player.form, Form::Speakerman);
        assert_eq!(state.score, 88);
    }

    #[test]
    fn test_tv_man_prefers_large_speakerman() {
        let mut state = playing_state();
        state.player.form = Form::TvMan;
        state.score = 40;
        let result = try_upgrade(&mut state, UpgradeIntent::Primary);
        assert!(matches!(result, Upgrade::Applied { to: Form::LargeSpeakerman, .. }));
        assert_eq!(state.score, 40 - LARGE_SPEAKERMAN_COST);
    }

    #[test]
    fn test_tv_man_falls_back_to_large_cameraman() {
        let mut state = playing_state();
        state.player.form = Form::TvMan;
        state.score = 30;
        let result = try_upgrade(&mut state, UpgradeIntent::Primary);
        assert!(matches!(result, Upgrade::Applied { to: Form::LargeCameraman, .. }));
        assert_eq!(state.score, 30 - LARGE_CAMERAMAN_COST);
        assert_eq!(state.player.health, 9);
    }

    #[test]
    fn test_alternate_only_takes_speaker_branch() {
        let mut state = playing_state();
        state.player.form = Form::TvMan;
        state.score = 30;
        assert_eq!(
            try_upgrade(&mut state, UpgradeIntent::Alternate),
            Upgrade::Insufficient { needed: 35 }
        );
        assert_eq!(state.score, 30);
        state.score = 35;
        assert!(matches!(
            try_upgrade(&mut state, UpgradeIntent::Alternate),
            Upgrade::Applied { to: Form::LargeSpeakerman, .. }
        ));
    }

    #[test]
    fn test_alternate_unavailable_before_tv_man() {
        let mut state = playing_state();
        state.score = 100;
        assert_eq!(try_upgrade(&mut state, UpgradeIntent::Alternate), Upgrade::Unavailable);
        assert_eq!(state.score, 100);
    }

    #[test]
    fn test_branches_are_exclusive() {
        let mut state = playing_state();
        state.player.form = Form::TvMan;
        state.score = 25;
        try_upgrade(&mut state, UpgradeIntent::Primary);
        assert_eq!(state.player.form, Form::LargeCameraman);
        state.score = 500;
        assert_eq!(try_upgrade(&mut state, UpgradeIntent::Primary), Upgrade::Unavailable);
        assert_eq!(try_upgrade(&mut state, UpgradeIntent::Alternate), Upgrade::Unavailable);
        assert_eq!(state.player.form, Form::LargeCameraman);
        assert_eq!(state.score, 500);
    }
}
