//! Predictive foot placement: when a planted foot should step, and where it should land.

use footfall_terrain::TerrainQuery;
use tracing::{debug, trace};

use crate::gait::SPEED_FLOOR;
use crate::math::{horizontal_distance, Vec3};
use crate::{
    FootEvent, FootEventKind, GaitClock, GaitGroups, GaitParameters, Leg, Placement,
    TerrainAdapter,
};

/// Inputs shared by every leg during one planning pass.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StepContext {
    pub tick: u64,
    pub position: Vec3,
    pub velocity: Vec3,
    pub stride_duration: f32,
}

impl StepContext {
    pub fn speed(&self) -> f32 {
        self.velocity.length()
    }
}

/// Decides which gait groups lift this tick and commits each lifted leg's landing target.
///
/// A group is a candidate when the character is moving, every one of its legs is planted, and at
/// least one of them has drifted further than [`GaitParameters::step_threshold`] from its hip
/// anchor. Candidates are offered in [`GaitClock::group_priority`] order while fewer than
/// [`GaitGroups::max_airborne`] groups are in the air. A group lifts only if every member's
/// landing point resolves; otherwise nothing changes and the next candidate is tried.
#[derive(Debug, Clone)]
pub struct FootPlacementPredictor {
    resolved: Vec<Option<Placement>>,
}

impl FootPlacementPredictor {
    pub fn new(leg_count: usize) -> Self {
        Self {
            resolved: vec![None; leg_count],
        }
    }

    /// Half-stride look-ahead from the hip anchor.
    pub fn predict_landing(hip_anchor: Vec3, velocity: Vec3, stride_duration: f32) -> Vec3 {
        hip_anchor + velocity * (stride_duration * 0.5)
    }

    /// Whether a planted leg has drifted far enough from its hip anchor to step.
    pub fn needs_step(leg: &Leg, character_position: Vec3, threshold: f32) -> bool {
        leg.foot.planted
            && horizontal_distance(leg.hip_anchor(character_position), leg.foot.position)
                > threshold
    }

    /// Run one planning pass. Returns how many groups lifted.
    #[allow(clippy::too_many_arguments)]
    pub fn plan<T: TerrainQuery>(
        &mut self,
        ctx: &StepContext,
        gait: &GaitParameters,
        legs: &mut [Leg],
        groups: &GaitGroups,
        clock: &mut GaitClock,
        terrain: &TerrainAdapter<T>,
        events: &mut Vec<FootEvent>,
    ) -> usize {
        if ctx.speed() <= SPEED_FLOOR {
            return 0;
        }
        if self.resolved.len() != legs.len() {
            self.resolved.resize(legs.len(), None);
        }

        let capacity = groups.max_airborne();
        let mut airborne = groups
            .iter()
            .filter(|members| Self::group_swinging(&*legs, members))
            .count();
        let threshold = gait.step_threshold(ctx.stride_duration);
        let mut lifted = 0;

        for group in clock.group_priority() {
            if airborne >= capacity {
                break;
            }
            let members = groups.members(group);
            if Self::group_swinging(legs, members) {
                continue;
            }
            let displaced = members
                .iter()
                .any(|&i| Self::needs_step(&legs[i], ctx.position, threshold));
            if !displaced || !self.resolve_group(ctx, legs, members, terrain) {
                continue;
            }

            for &i in members {
                let Some(placement) = self.resolved[i].take() else {
                    continue;
                };
                legs[i].foot.lift(placement.position, placement.normal);
                trace!(leg = i, target = ?placement.position, "foot lifted");
                events.push(FootEvent {
                    tick: ctx.tick,
                    leg: i,
                    kind: FootEventKind::Lifted,
                    position: legs[i].foot.position,
                });
            }
            clock.group_lifted(group);
            debug!(group, tick = ctx.tick, "gait group lifted");
            airborne += 1;
            lifted += 1;
        }
        lifted
    }

    fn group_swinging(legs: &[Leg], members: &[usize]) -> bool {
        members.iter().any(|&i| legs[i].foot.is_swinging())
    }

    fn resolve_group<T: TerrainQuery>(
        &mut self,
        ctx: &StepContext,
        legs: &[Leg],
        members: &[usize],
        terrain: &TerrainAdapter<T>,
    ) -> bool {
        for &i in members {
            let landing = Self::predict_landing(
                legs[i].hip_anchor(ctx.position),
                ctx.velocity,
                ctx.stride_duration,
            );
            match terrain.resolve_plant_position(landing) {
                Some(placement) => self.resolved[i] = Some(placement),
                None => {
                    debug!(leg = i, ?landing, "no walkable landing; leg stays planted");
                    for &j in members {
                        self.resolved[j] = None;
                    }
                    return false;
                }
            }
        }
        true
    }
}
