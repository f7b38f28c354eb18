//! User resource commands and the hard-mode energy gate.

use garden_core::{
    CommandOutcome, Difficulty, LogMessage, RejectReason, ResourceCommand, ResourceId,
    SimulationState,
};
use tracing::debug;

/// Flat energy price of any non-energy command in hard mode.
pub const ENERGY_COST: f64 = 2.0;

/// Apply `cmd` atomically: either every mutation happens or none does.
pub fn apply_command(state: &mut SimulationState, cmd: ResourceCommand) -> CommandOutcome {
    if !state.is_playing() {
        debug!(resource = %cmd.resource, phase = %state.game_phase, "command ignored outside play");
        return CommandOutcome::Rejected {
            reason: RejectReason::NotPlaying,
        };
    }
    if !cmd.amount.is_finite() {
        debug!(resource = %cmd.resource, "command with non-finite amount rejected");
        return CommandOutcome::Rejected {
            reason: RejectReason::NonFiniteAmount,
        };
    }
    if state.difficulty == Difficulty::Hard && cmd.resource != ResourceId::Energy {
        if state.resource(ResourceId::Energy) < ENERGY_COST {
            state.log(LogMessage::InsufficientEnergy);
            debug!(resource = %cmd.resource, "command rejected: insufficient energy");
            return CommandOutcome::Rejected {
                reason: RejectReason::InsufficientEnergy,
            };
        }
        state.resources.adjust(ResourceId::Energy, -ENERGY_COST);
    }
    let value = state.resources.adjust(cmd.resource, cmd.delta());
    CommandOutcome::Applied {
        resource: cmd.resource,
        value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use garden_core::GamePhase;
    use proptest::prelude::*;

    fn playing(difficulty: Difficulty) -> SimulationState {
        let mut s = SimulationState::new(difficulty);
        s.game_phase = GamePhase::Playing;
        s
    }

    #[test]
    fn hard_mode_charges_two_energy_per_command() {
        let mut s = playing(Difficulty::Hard);
        for _ in 0..10 {
            let out = apply_command(&mut s, ResourceCommand::increase(ResourceId::Water, 5.0));
            assert!(out.is_applied());
        }
        assert_eq!(s.resource(ResourceId::Energy), 80.0);
        assert_eq!(s.resource(ResourceId::Water), 100.0);
    }

    #[test]
    fn energy_commands_are_free() {
        let mut s = playing(Difficulty::Hard);
        s.resources.set(ResourceId::Energy, 1.0);
        let out = apply_command(&mut s, ResourceCommand::increase(ResourceId::Energy, 10.0));
        assert_eq!(
            out,
            CommandOutcome::Applied {
                resource: ResourceId::Energy,
                value: 11.0
            }
        );
    }

    #[test]
    fn low_energy_rejects_and_logs_once() {
        let mut s = playing(Difficulty::Hard);
        s.resources.set(ResourceId::Energy, 1.5);
        let before = s.resources.clone();
        let out = apply_command(&mut s, ResourceCommand::decrease(ResourceId::Light, 5.0));
        assert_eq!(
            out,
            CommandOutcome::Rejected {
                reason: RejectReason::InsufficientEnergy
            }
        );
        assert_eq!(s.resources, before);
        assert_eq!(s.event_log.len(), 1);
        assert_eq!(
            s.event_log.latest().unwrap().message,
            LogMessage::InsufficientEnergy
        );
    }

    #[test]
    fn easy_mode_is_free_and_clamps() {
        let mut s = playing(Difficulty::Easy);
        apply_command(&mut s, ResourceCommand::increase(ResourceId::Temperature, 50.0));
        assert_eq!(s.resource(ResourceId::Temperature), 30.0);
        assert_eq!(s.resource(ResourceId::Energy), 100.0);
    }

    #[test]
    fn paused_commands_do_nothing() {
        let mut s = playing(Difficulty::Hard);
        s.game_phase = GamePhase::Paused;
        let before = s.clone();
        let out = apply_command(&mut s, ResourceCommand::increase(ResourceId::Water, 5.0));
        assert_eq!(
            out,
            CommandOutcome::Rejected {
                reason: RejectReason::NotPlaying
            }
        );
        assert_eq!(s, before);
    }

    #[test]
    fn nan_amount_rejected() {
        let mut s = playing(Difficulty::Easy);
        let out = apply_command(&mut s, ResourceCommand::increase(ResourceId::Water, f64::NAN));
        assert!(!out.is_applied());
        assert_eq!(s.resource(ResourceId::Water), 50.0);
    }

    proptest! {
        #[test]
        fn commands_keep_values_in_range(idx in 0usize..ResourceId::COUNT,
                                         amount in -1_000.0f64..1_000.0,
                                         up in any::<bool>(),
                                         hard in any::<bool>()) {
            let id = ResourceId::ALL[idx];
            let mut s = playing(if hard { Difficulty::Hard } else { Difficulty::Easy });
            let cmd = if up { ResourceCommand::increase(id, amount) } else { ResourceCommand::decrease(id, amount) };
            apply_command(&mut s, cmd);
            for (rid, v) in s.resources.iter() {
                prop_assert!(rid.valid_range().contains(v));
            }
        }
    }
}
