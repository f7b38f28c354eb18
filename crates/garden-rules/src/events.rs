//! Random disruptive events: spawning, per-tick effect and expiry.

use garden_core::{ActiveEvent, EventKind, LogMessage, SimConfig, SimulationState};
use rand::Rng;
use tracing::info;

/// Tolerance for float accumulation when counting `time_left` down.
pub const EXPIRY_EPSILON: f64 = 1e-9;

/// What happened to the event slot during a tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EventChange {
    Activated(EventKind),
    Applied(EventKind),
    Resolved(EventKind),
}

/// Advance the event slot by one tick.
///
/// With an event active, its per-tick change is applied and its timer counts
/// down; at zero it resolves and the slot empties without a new draw this
/// tick. With the slot empty, a new event is drawn with the difficulty's
/// chance; it starts acting on the next tick.
pub fn advance_event<R: Rng + ?Sized>(
    state: &mut SimulationState,
    cfg: &SimConfig,
    rng: &mut R,
) -> Option<EventChange> {
    if let Some(ev) = state.active_event.as_mut() {
        let kind = ev.kind;
        state.resources.adjust(ev.effect, ev.magnitude_per_tick);
        ev.time_left -= cfg.tick_seconds();
        if ev.time_left > EXPIRY_EPSILON {
            return Some(EventChange::Applied(kind));
        }
        state.active_event = None;
        state.log(LogMessage::EventResolved { event: kind });
        info!(event = kind.id(), t = state.elapsed_time, "event resolved");
        return Some(EventChange::Resolved(kind));
    }

    let chance = cfg.event_chance(state.difficulty);
    if rng.gen::<f64>() >= chance {
        return None;
    }
    let pool = EventKind::pool(state.difficulty);
    let kind = pool[rng.gen_range(0..pool.len())];
    state.active_event = Some(ActiveEvent::activate(kind));
    state.log(LogMessage::EventDetected { event: kind });
    info!(event = kind.id(), effect = %kind.def().effect, t = state.elapsed_time, "event detected");
    Some(EventChange::Activated(kind))
}
