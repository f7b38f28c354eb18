#![deny(warnings)]

//! ECS runtime for the simulation.
//!
//! The state lives in a `bevy_ecs` world as a resource; one tick runs a
//! chained schedule of systems, each delegating to a rule in `garden-rules`.
//! [`GardenEngine`] wraps the world with the phase machine and the command
//! interface a front end talks to. [`clock`] drives it in real time.

pub mod clock;

pub use clock::{spawn_clock, ClockCommand, ClockError, ClockHandle};

use bevy_ecs::prelude::*;
use bevy_ecs::schedule::Schedule;
use garden_core::{
    validate_config, CommandOutcome, Difficulty, GamePhase, ResourceCommand, ResourceId,
    SimConfig, SimulationState, ValidationError,
};
use garden_rules as rules;
pub use garden_rules::{FailureReason, OutcomeReport};
use rand_chacha::ChaCha8Rng;
use thiserror::Error;
use tracing::info;

/// The simulation aggregate as an ECS resource.
#[derive(Resource, Debug, Clone)]
pub struct Garden(pub SimulationState);

#[derive(Resource, Debug, Clone)]
pub struct Settings(pub SimConfig);

/// RNG dedicated to event draws.
#[derive(Resource)]
pub struct EventRng(pub ChaCha8Rng);

/// A front end asked for a phase change the machine does not allow.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("cannot change phase from {from} to {to}")]
pub struct TransitionError {
    pub from: GamePhase,
    pub to: GamePhase,
}

fn clock_system(mut garden: ResMut<Garden>, settings: Res<Settings>) {
    rules::advance_clock(&mut garden.0, &settings.0);
}

fn drift_system(mut garden: ResMut<Garden>) {
    rules::apply_drift(&mut garden.0);
}

fn event_system(mut garden: ResMut<Garden>, settings: Res<Settings>, mut rng: ResMut<EventRng>) {
    rules::advance_event(&mut garden.0, &settings.0, &mut rng.0);
}

fn health_system(mut garden: ResMut<Garden>) {
    rules::evaluate_health(&mut garden.0);
}

fn growth_system(mut garden: ResMut<Garden>) {
    rules::advance_growth(&mut garden.0);
}

fn judge_system(mut garden: ResMut<Garden>, settings: Res<Settings>) {
    rules::judge(&mut garden.0, &settings.0);
}

/// World holding a fresh menu-state session.
pub fn init_world(config: SimConfig, difficulty: Difficulty) -> World {
    let mut world = World::new();
    world.insert_resource(EventRng(rules::seeded_rng(config.rng_seed)));
    world.insert_resource(Settings(config));
    world.insert_resource(Garden(SimulationState::new(difficulty)));
    world
}

/// One fixed step, in the same order as [`garden_rules::step`].
pub fn tick_schedule() -> Schedule {
    let mut schedule = Schedule::default();
    schedule.add_systems(
        (
            clock_system,
            drift_system,
            event_system,
            health_system,
            growth_system,
            judge_system,
        )
            .chain(),
    );
    schedule
}

/// Owns the simulation and exposes the operations a front end may call.
pub struct GardenEngine {
    world: World,
    schedule: Schedule,
}

impl GardenEngine {
    pub fn new(config: SimConfig) -> Result<Self, ValidationError> {
        validate_config(&config)?;
        Ok(Self {
            world: init_world(config, Difficulty::default()),
            schedule: tick_schedule(),
        })
    }

    pub fn config(&self) -> &SimConfig {
        &self.world.resource::<Settings>().0
    }

    pub fn state(&self) -> &SimulationState {
        &self.world.resource::<Garden>().0
    }

    fn state_mut(&mut self) -> &mut SimulationState {
        &mut self.world.resource_mut::<Garden>().into_inner().0
    }

    /// Owned copy for rendering.
    pub fn snapshot(&self) -> SimulationState {
        self.state().clone()
    }

    pub fn phase(&self) -> GamePhase {
        self.state().game_phase
    }

    pub fn difficulty(&self) -> Difficulty {
        self.state().difficulty
    }

    fn check(&self, to: GamePhase) -> Result<GamePhase, TransitionError> {
        let from = self.phase();
        if from.can_request(to) {
            Ok(from)
        } else {
            Err(TransitionError { from, to })
        }
    }

    /// Menu -> Tutorial with a fresh state for `difficulty`.
    pub fn start_game(&mut self, difficulty: Difficulty) -> Result<(), TransitionError> {
        self.check(GamePhase::Tutorial)?;
        let state = self.state_mut();
        *state = SimulationState::new(difficulty);
        state.game_phase = GamePhase::Tutorial;
        info!(%difficulty, "game started");
        Ok(())
    }

    /// Back to initial values, keeping phase and difficulty.
    pub fn reset_game(&mut self) {
        self.state_mut().reset();
        info!("state reset");
    }

    pub fn start_playing(&mut self) -> Result<(), TransitionError> {
        self.set_phase(GamePhase::Playing)
    }

    /// Request a phase change. Leaving Won or Lost for Playing starts a new
    /// mission on a fresh state.
    pub fn set_phase(&mut self, to: GamePhase) -> Result<(), TransitionError> {
        let from = self.check(to)?;
        let state = self.state_mut();
        if from.is_terminal() && to == GamePhase::Playing {
            state.reset();
        }
        state.game_phase = to;
        info!(%from, %to, "phase changed");
        Ok(())
    }

    pub fn apply(&mut self, cmd: ResourceCommand) -> CommandOutcome {
        rules::apply_command(self.state_mut(), cmd)
    }

    pub fn increase_resource(&mut self, resource: ResourceId, amount: f64) -> CommandOutcome {
        self.apply(ResourceCommand::increase(resource, amount))
    }

    pub fn decrease_resource(&mut self, resource: ResourceId, amount: f64) -> CommandOutcome {
        self.apply(ResourceCommand::decrease(resource, amount))
    }

    /// Run one fixed step if the game is being played. Returns whether a
    /// step ran.
    pub fn tick(&mut self) -> bool {
        if !self.state().is_playing() {
            return false;
        }
        self.schedule.run(&mut self.world);
        true
    }

    /// Run up to `ticks` steps, stopping early when play stops.
    pub fn run_ticks(&mut self, ticks: u64) -> u64 {
        let mut ran = 0;
        while ran < ticks && self.tick() {
            ran += 1;
        }
        ran
    }

    /// End-screen report once the mission is over.
    pub fn outcome(&self) -> Option<OutcomeReport> {
        rules::report(self.state(), self.config())
    }
}
