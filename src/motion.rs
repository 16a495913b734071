//! Transform-driver seam between the sort steppers and the animation layer.
//!
//! A swap animates both participants at once. Each animation hands its
//! [`MotionTicket`] back when it lands; the swap is committed only after
//! both tickets of the same [`SwapJoin`] have come back.

use crate::simulation::{CellId, Position};

/// Which participant of a swap an animation belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum JoinSlot {
    First,
    Second,
}

/// Completion token for one animation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct MotionTicket {
    /// Sort run that requested the animation.
    pub run_id: u64,
    /// Per-run swap sequence number.
    pub swap: u64,
    pub slot: JoinSlot,
}

/// Request to move one cell from `from` to `to` over `duration_secs`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct MotionRequest {
    pub cell: CellId,
    pub from: Position,
    pub to: Position,
    pub duration_secs: f32,
    pub ticket: MotionTicket,
}

/// Animation capability provided by the host.
///
/// Implementations must eventually report every accepted request's ticket
/// back to the scheduler (`CycleScheduler::complete_motion`).
pub trait TransformDriver {
    fn animate(&mut self, request: MotionRequest);
}

/// Two-slot rendezvous for the pair of animations of one swap.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SwapJoin {
    pub a: usize,
    pub b: usize,
    pub run_id: u64,
    pub swap: u64,
    first_done: bool,
    second_done: bool,
}

impl SwapJoin {
    pub fn new(a: usize, b: usize, run_id: u64, swap: u64) -> Self {
        Self {
            a,
            b,
            run_id,
            swap,
            first_done: false,
            second_done: false,
        }
    }

    pub fn ticket(&self, slot: JoinSlot) -> MotionTicket {
        MotionTicket {
            run_id: self.run_id,
            swap: self.swap,
            slot,
        }
    }

    /// True when `ticket` was issued for this join.
    pub fn owns(&self, ticket: &MotionTicket) -> bool {
        ticket.run_id == self.run_id && ticket.swap == self.swap
    }

    /// Mark one participant as landed. Repeated marks are harmless.
    pub fn mark(&mut self, slot: JoinSlot) {
        match slot {
            JoinSlot::First => self.first_done = true,
            JoinSlot::Second => self.second_done = true,
        }
    }

    pub fn both_done(&self) -> bool {
        self.first_done && self.second_done
    }
}

#[derive(Clone, Copy, Debug)]
struct Tween {
    request: MotionRequest,
    started_ms: f64,
}

impl Tween {
    fn progress(&self, now_ms: f64) -> f32 {
        let duration_ms = self.request.duration_secs as f64 * 1000.0;
        if duration_ms <= 0.0 {
            return 1.0;
        }
        ((now_ms - self.started_ms) / duration_ms).clamp(0.0, 1.0) as f32
    }
}

/// Linear tween driver used by the window host.
///
/// Requests are stamped with the time of the most recent
/// [`advance`](Tweener::advance) call.
#[derive(Debug, Default)]
pub struct Tweener {
    active: Vec<Tween>,
    now_ms: f64,
}

impl Tweener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_idle(&self) -> bool {
        self.active.is_empty()
    }

    /// Move the clock to `now_ms` and return the tickets of every tween
    /// that has landed, in request order.
    pub fn advance(&mut self, now_ms: f64) -> Vec<MotionTicket> {
        self.now_ms = now_ms;
        let mut landed = Vec::new();
        self.active.retain(|tween| {
            if tween.progress(now_ms) >= 1.0 {
                landed.push(tween.request.ticket);
                false
            } else {
                true
            }
        });
        landed
    }

    /// Current display position of `cell`, if it is animating.
    pub fn position_of(&self, cell: CellId) -> Option<Position> {
        self.active
            .iter()
            .find(|tween| tween.request.cell == cell)
            .map(|tween| {
                let t = tween.progress(self.now_ms);
                tween.request.from.lerp(tween.request.to, t)
            })
    }

    /// Drop every pending tween without reporting it.
    pub fn cancel_all(&mut self) {
        self.active.clear();
    }
}

impl TransformDriver for Tweener {
    fn animate(&mut self, request: MotionRequest) {
        self.active.push(Tween {
            request,
            started_ms: self.now_ms,
        });
    }
}
