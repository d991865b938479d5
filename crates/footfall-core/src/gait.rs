//! Gait timing: runtime-tunable parameters and the per-character clock.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::math::clamp_finite;
use crate::GaitGroups;

/// Stride duration at the reference speed with a 1.0 stride multiplier, in seconds.
pub const BASE_STRIDE_DURATION: f32 = 0.5;
/// Speeds below this are treated as standing still.
pub const SPEED_FLOOR: f32 = 0.1;
pub const MIN_STRIDE_DURATION: f32 = 0.1;
pub const MAX_STRIDE_DURATION: f32 = 2.0;
pub const MIN_MULTIPLIER: f32 = 0.1;
pub const MAX_MULTIPLIER: f32 = 3.0;
pub const MIN_BALANCE_SMOOTHING: f32 = 1.0e-3;
/// Tick length the balance smoothing factor is calibrated against (60 Hz).
pub const REFERENCE_TICK_SECONDS: f32 = 1.0 / 60.0;

/// How [`GaitParameters::balance_smoothing`] is applied over time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum BalanceSmoothing {
    /// Exponential decay scaled by elapsed time. The factor is the fraction blended per
    /// [`REFERENCE_TICK_SECONDS`], so at 60 Hz both modes agree.
    #[default]
    TimeScaled,
    /// The factor is blended once per tick whatever the tick length.
    PerTick,
}

/// Per-character gait tuning.
///
/// Fields are public for ergonomic construction; the controller always stores the
/// [`sanitized`](GaitParameters::sanitized) form, so out-of-range values never reach the tick loop.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GaitParameters {
    /// Move speed (units/s) at which strides last `BASE_STRIDE_DURATION * stride_length_multiplier`.
    pub reference_speed: f32,
    pub stride_length_multiplier: f32,
    pub lift_height_multiplier: f32,
    /// Nominal swing lift and obstacle-climb ceiling, in world units.
    pub step_height: f32,
    /// Pelvis settle factor in `(0, 1]`.
    pub balance_smoothing: f32,
    pub smoothing_mode: BalanceSmoothing,
}

impl Default for GaitParameters {
    fn default() -> Self {
        Self {
            reference_speed: 150.0,
            stride_length_multiplier: 0.5,
            lift_height_multiplier: 1.0,
            step_height: 15.0,
            balance_smoothing: 0.1,
            smoothing_mode: BalanceSmoothing::TimeScaled,
        }
    }
}

impl GaitParameters {
    /// Clamp every field into its valid range. Non-finite values fall back to the defaults.
    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        Self {
            reference_speed: clamp_finite(
                self.reference_speed,
                SPEED_FLOOR,
                f32::MAX,
                defaults.reference_speed,
            ),
            stride_length_multiplier: clamp_finite(
                self.stride_length_multiplier,
                MIN_MULTIPLIER,
                MAX_MULTIPLIER,
                defaults.stride_length_multiplier,
            ),
            lift_height_multiplier: clamp_finite(
                self.lift_height_multiplier,
                MIN_MULTIPLIER,
                MAX_MULTIPLIER,
                defaults.lift_height_multiplier,
            ),
            step_height: clamp_finite(self.step_height, 0.0, f32::MAX, defaults.step_height),
            balance_smoothing: clamp_finite(
                self.balance_smoothing,
                MIN_BALANCE_SMOOTHING,
                1.0,
                defaults.balance_smoothing,
            ),
            smoothing_mode: self.smoothing_mode,
        }
    }

    /// Stride duration for the current speed: inversely proportional to speed, clamped to
    /// `[MIN_STRIDE_DURATION, MAX_STRIDE_DURATION]`.
    pub fn stride_duration(&self, speed: f32) -> f32 {
        let speed = if speed.is_finite() {
            speed.max(SPEED_FLOOR)
        } else {
            SPEED_FLOOR
        };
        let duration = BASE_STRIDE_DURATION
            * (self.reference_speed / speed)
            * self.stride_length_multiplier;
        clamp_finite(
            duration,
            MIN_STRIDE_DURATION,
            MAX_STRIDE_DURATION,
            MAX_STRIDE_DURATION,
        )
    }

    /// Horizontal drift between hip anchor and planted foot that triggers a new step.
    pub fn step_threshold(&self, stride_duration: f32) -> f32 {
        self.reference_speed * stride_duration * 0.1
    }

    /// Swing apex before any obstacle clearance is added.
    pub fn nominal_lift(&self) -> f32 {
        self.step_height * self.lift_height_multiplier
    }

    /// Time constant `tau` (seconds) of the time-scaled pelvis smoothing.
    ///
    /// A factor of 1.0 snaps immediately and reports `0.0`.
    pub fn balance_time_constant(&self) -> f32 {
        let f = self.balance_smoothing;
        if f >= 1.0 {
            return 0.0;
        }
        -REFERENCE_TICK_SECONDS / (1.0 - f).ln()
    }

    /// Fraction of the remaining pelvis error to remove over a tick of `dt` seconds.
    pub fn balance_blend(&self, dt: f32) -> f32 {
        let f = self.balance_smoothing;
        match self.smoothing_mode {
            BalanceSmoothing::PerTick => f,
            BalanceSmoothing::TimeScaled => {
                if f >= 1.0 {
                    return 1.0;
                }
                if dt <= 0.0 {
                    return 0.0;
                }
                1.0 - (1.0 - f).powf(dt / REFERENCE_TICK_SECONDS)
            }
        }
    }
}

/// Elapsed time and gait-group scheduling for one character.
///
/// Each leg receives a phase offset from its gait group (`group / group_count`), which staggers
/// the nominal gait cycle and fixes the order in which groups get priority to step.
#[derive(Debug, Clone)]
pub struct GaitClock {
    elapsed: f64,
    tick: u64,
    phase_offsets: Vec<f32>,
    group_count: usize,
    next_group: usize,
}

impl GaitClock {
    pub fn new(groups: &GaitGroups) -> Self {
        let group_count = groups.len().max(1);
        let phase_offsets = (0..groups.leg_count())
            .map(|leg| groups.group_of(leg) as f32 / group_count as f32)
            .collect();
        Self {
            elapsed: 0.0,
            tick: 0,
            phase_offsets,
            group_count,
            next_group: 0,
        }
    }

    pub fn advance(&mut self, dt_seconds: f32) {
        self.elapsed += f64::from(dt_seconds.max(0.0));
        self.tick += 1;
    }

    /// Total simulated time in seconds.
    pub fn elapsed(&self) -> f64 {
        self.elapsed
    }

    /// Number of ticks advanced so far.
    pub fn tick(&self) -> u64 {
        self.tick
    }

    pub fn phase_offset(&self, leg: usize) -> f32 {
        self.phase_offsets.get(leg).copied().unwrap_or(0.0)
    }

    /// Raw swing progress. Values `>= 1.0` mean the swing is over.
    pub fn swing_phase(time_since_lift: f32, stride_duration: f32) -> f32 {
        time_since_lift.max(0.0) / stride_duration.max(MIN_STRIDE_DURATION)
    }

    /// Nominal position of `leg` within the full gait cycle, in `[0, 1)`.
    ///
    /// One cycle gives every group one stride, so its length is `stride_duration * groups`. This
    /// is reporting only (animation blending, debug overlays): when a group actually lifts is
    /// decided by drift and [`group_priority`](GaitClock::group_priority), never by this value.
    pub fn cycle_phase(&self, leg: usize, stride_duration: f32) -> f32 {
        let cycle = f64::from(stride_duration.max(MIN_STRIDE_DURATION)) * self.group_count as f64;
        let phase = (self.elapsed / cycle + f64::from(self.phase_offset(leg))).fract() as f32;
        // Guard against `fract` rounding up to exactly 1.0 in f32.
        if phase >= 1.0 {
            0.0
        } else {
            phase
        }
    }

    /// Group with first claim on a step this tick. Groups are offered in ascending order from
    /// here, which is ascending phase offset, so lifts follow the nominal cycle.
    pub fn next_group(&self) -> usize {
        self.next_group
    }

    /// Group indices in the order they should be offered a step this tick.
    pub fn group_priority(&self) -> impl Iterator<Item = usize> {
        let (start, count) = (self.next_group, self.group_count);
        (0..count).map(move |i| (start + i) % count)
    }

    /// Record that `group` lifted; the following group gets priority next.
    pub fn group_lifted(&mut self, group: usize) {
        self.next_group = (group + 1) % self.group_count;
    }
}
