//! Legs, foot state and the leg-layout configuration they are built from.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::math::Vec3;
use crate::LayoutError;

/// Live state of one foot.
///
/// A foot is either planted or mid-swing, never both:
/// - `target` only changes on the tick a planted foot lifts.
/// - `swing_offset` is zero and `phase` is `0.0` while planted.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FootState {
    /// Current world position, including swing lift.
    pub position: Vec3,
    /// Committed landing point of the current (or last) step.
    pub target: Vec3,
    /// `position` as it was at the end of the previous tick.
    pub previous_position: Vec3,
    /// Where the current swing started (the previous plant position).
    pub lift_origin: Vec3,
    /// Vertical lift applied on top of the straight-line swing path.
    pub swing_offset: Vec3,
    /// Surface normal under the foot (or under the landing point while swinging).
    pub normal: Vec3,
    /// Swing progress in `[0, 1)`.
    pub phase: f32,
    pub planted: bool,
    pub time_since_lift: f32,
}

impl FootState {
    pub fn at_rest(position: Vec3, normal: Vec3) -> Self {
        Self {
            position,
            target: position,
            previous_position: position,
            lift_origin: position,
            swing_offset: Vec3::ZERO,
            normal,
            phase: 0.0,
            planted: true,
            time_since_lift: 0.0,
        }
    }

    pub fn is_planted(&self) -> bool {
        self.planted
    }

    pub fn is_swinging(&self) -> bool {
        !self.planted
    }

    /// Start a swing toward `target`.
    pub(crate) fn lift(&mut self, target: Vec3, normal: Vec3) {
        self.lift_origin = self.position;
        self.target = target;
        self.normal = normal;
        self.swing_offset = Vec3::ZERO;
        self.phase = 0.0;
        self.time_since_lift = 0.0;
        self.planted = false;
    }

    /// End the swing exactly on the target.
    pub(crate) fn plant(&mut self) {
        self.position = self.target;
        self.lift_origin = self.target;
        self.swing_offset = Vec3::ZERO;
        self.phase = 0.0;
        self.time_since_lift = 0.0;
        self.planted = true;
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Leg {
    /// Fixed offset of the hip from the character position.
    pub hip_offset: Vec3,
    /// Index of the gait group this leg steps with.
    pub group: usize,
    pub foot: FootState,
}

impl Leg {
    pub fn new(hip_offset: Vec3, group: usize, foot: FootState) -> Self {
        Self {
            hip_offset,
            group,
            foot,
        }
    }

    /// World-space point the foot is placed relative to.
    pub fn hip_anchor(&self, character_position: Vec3) -> Vec3 {
        character_position + self.hip_offset
    }
}

/// Ordered hip offsets defining leg count and topology.
///
/// `gait_groups` optionally overrides the default synchronization partition (see
/// [`GaitGroups::default_for`]).
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct LegLayout {
    pub hip_offsets: Vec<Vec3>,
    #[cfg_attr(
        feature = "serde",
        serde(default, skip_serializing_if = "Option::is_none")
    )]
    pub gait_groups: Option<Vec<Vec<usize>>>,
}

impl LegLayout {
    pub fn new(hip_offsets: Vec<Vec3>) -> Self {
        Self {
            hip_offsets,
            gait_groups: None,
        }
    }

    pub fn with_groups(mut self, groups: Vec<Vec<usize>>) -> Self {
        self.gait_groups = Some(groups);
        self
    }

    pub fn leg_count(&self) -> usize {
        self.hip_offsets.len()
    }

    /// Check hip offsets and resolve the gait-group partition.
    pub fn resolve(&self) -> Result<GaitGroups, LayoutError> {
        if self.hip_offsets.is_empty() {
            return Err(LayoutError::Empty);
        }
        if let Some(leg) = self.hip_offsets.iter().position(|o| !o.is_finite()) {
            return Err(LayoutError::NonFiniteHipOffset { leg });
        }
        match &self.gait_groups {
            Some(groups) => GaitGroups::new(groups.clone(), self.leg_count()),
            None => Ok(GaitGroups::default_for(self.leg_count())),
        }
    }
}

/// Partition of leg indices into groups that lift and plant together.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GaitGroups {
    groups: Vec<Vec<usize>>,
    leg_group: Vec<usize>,
}

impl GaitGroups {
    /// Validate that `groups` covers `0..leg_count` with each leg exactly once.
    pub fn new(groups: Vec<Vec<usize>>, leg_count: usize) -> Result<Self, LayoutError> {
        let mut leg_group = vec![usize::MAX; leg_count];
        for (group, members) in groups.iter().enumerate() {
            if members.is_empty() {
                return Err(LayoutError::EmptyGroup { group });
            }
            for &leg in members {
                let Some(slot) = leg_group.get_mut(leg) else {
                    return Err(LayoutError::LegOutOfRange {
                        group,
                        leg,
                        count: leg_count,
                    });
                };
                if *slot != usize::MAX {
                    return Err(LayoutError::LegInMultipleGroups { leg });
                }
                *slot = group;
            }
        }
        if let Some(leg) = leg_group.iter().position(|&g| g == usize::MAX) {
            return Err(LayoutError::LegWithoutGroup { leg });
        }
        Ok(Self { groups, leg_group })
    }

    /// Default partition for a leg count: two alternating groups, with leg `i` in group
    /// `(i + i / 2) % 2`.
    ///
    /// Legs are expected in left/right pairs from front to back, so neighbours along a side and
    /// across the body land in opposite groups:
    /// - 2 legs: `{0}` / `{1}`.
    /// - 4 legs: diagonal trot `{0, 3}` / `{1, 2}`.
    /// - 6 legs: alternating tripod `{0, 3, 4}` / `{1, 2, 5}`.
    /// - 8 legs: `{0, 3, 4, 7}` / `{1, 2, 5, 6}`.
    ///
    /// A single leg gets a single group.
    pub fn default_for(leg_count: usize) -> Self {
        let group_count = leg_count.min(2);
        let mut groups = vec![Vec::new(); group_count];
        let mut leg_group = vec![0; leg_count];
        for (leg, slot) in leg_group.iter_mut().enumerate() {
            let group = (leg + leg / 2) % group_count.max(1);
            groups[group].push(leg);
            *slot = group;
        }
        Self { groups, leg_group }
    }

    /// How many groups may be mid-swing at once: half of them, at least one.
    ///
    /// The other half always stays down as support, and two-group gaits strictly alternate.
    pub fn max_airborne(&self) -> usize {
        (self.groups.len() / 2).max(1)
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn leg_count(&self) -> usize {
        self.leg_group.len()
    }

    pub fn members(&self, group: usize) -> &[usize] {
        self.groups.get(group).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn group_of(&self, leg: usize) -> usize {
        self.leg_group.get(leg).copied().unwrap_or(0)
    }

    pub fn iter(&self) -> impl Iterator<Item = &[usize]> {
        self.groups.iter().map(Vec::as_slice)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_groups_for_hexapod_are_tripods() {
        let groups = GaitGroups::default_for(6);
        assert_eq!(groups.members(0), &[0, 3, 4]);
        assert_eq!(groups.members(1), &[1, 2, 5]);
        assert_eq!(groups.group_of(4), 0);
        assert_eq!(groups.group_of(2), 1);
    }

    #[test]
    fn default_groups_alternate_for_any_leg_count() {
        let groups = GaitGroups::default_for(8);
        assert_eq!(groups.members(0), &[0, 3, 4, 7]);
        assert_eq!(groups.members(1), &[1, 2, 5, 6]);

        let groups = GaitGroups::default_for(3);
        assert_eq!(groups.members(0), &[0]);
        assert_eq!(groups.members(1), &[1, 2]);

        let groups = GaitGroups::default_for(1);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups.members(0), &[0]);
    }

    #[test]
    fn half_the_groups_may_swing_at_once() {
        assert_eq!(GaitGroups::default_for(6).max_airborne(), 1);
        let singles = GaitGroups::new((0..8).map(|leg| vec![leg]).collect(), 8).unwrap();
        assert_eq!(singles.max_airborne(), 4);
        let three = GaitGroups::new(vec![vec![0], vec![1], vec![2]], 3).unwrap();
        assert_eq!(three.max_airborne(), 1);
    }

    #[test]
    fn explicit_groups_must_partition_legs() {
        assert_eq!(
            GaitGroups::new(vec![vec![0, 1], vec![1]], 2),
            Err(LayoutError::LegInMultipleGroups { leg: 1 })
        );
        assert_eq!(
            GaitGroups::new(vec![vec![0]], 2),
            Err(LayoutError::LegWithoutGroup { leg: 1 })
        );
        assert_eq!(
            GaitGroups::new(vec![vec![0, 7], vec![1]], 2),
            Err(LayoutError::LegOutOfRange {
                group: 0,
                leg: 7,
                count: 2
            })
        );
        assert_eq!(
            GaitGroups::new(vec![vec![0, 1], vec![]], 2),
            Err(LayoutError::EmptyGroup { group: 1 })
        );
    }

    #[test]
    fn layout_rejects_empty_and_non_finite_offsets() {
        assert_eq!(LegLayout::default().resolve(), Err(LayoutError::Empty));
        let layout = LegLayout::new(vec![Vec3::ZERO, Vec3::new(f32::NAN, 0.0, 0.0)]);
        assert_eq!(
            layout.resolve(),
            Err(LayoutError::NonFiniteHipOffset { leg: 1 })
        );
    }
}
