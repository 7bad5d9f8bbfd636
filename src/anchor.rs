//! Gravity-assisted support-joint selection.
//!
//! Picks the joint most likely bearing the body's weight in a static pose:
//! the lowest visible joint among ankles, knees, hips and neck (in that
//! priority order), with ties at the same vertical level broken by horizontal
//! distance to an approximate center of mass. Assumes an upright camera, so
//! image-down is gravity-down.

use std::cmp::Ordering;

use crate::pose::Pose;
use crate::skeleton::Joint;
use crate::types::Point;

/// Joints within this many pixels of the lowest candidate count as being at
/// the same vertical level.
pub const DEFAULT_VERTICAL_TOLERANCE: f32 = 5.0;

/// Conceptual mass budget: torso 0.5, each leg 0.2, arms 0.1.
const TORSO_MASS: f32 = 0.5;
const LEG_MASS: f32 = 0.2;
/// Denominator of the weighted average. The arm share is never sampled into
/// the sum and the denominator is not rebalanced; the historical heuristic
/// divides by 0.8 and the anchor choice is calibrated against that.
const TOTAL_MASS: f32 = 0.8;

/// Candidate support groups in priority order: feet, then knees, then hips,
/// then neck (headstands).
const SUPPORT_GROUPS: [&[Joint]; 4] = [
    &[Joint::RAnkle, Joint::LAnkle],
    &[Joint::RKnee, Joint::LKnee],
    &[Joint::RHip, Joint::LHip],
    &[Joint::Neck],
];

/// Approximate the body's center of mass from the visible joints.
///
/// Torso center is the mean of whichever of neck, shoulders and mid-hip are
/// present. Leg centers fall back to the hip alone, then to the torso
/// center, as joints go missing. With no torso joints at all the mean of
/// every present joint is used; an entirely empty pose yields the origin.
fn center_of_mass(pose: &Pose) -> Point {
    let midhip = match (pose.joint(Joint::RHip), pose.joint(Joint::LHip)) {
        (Some(r), Some(l)) => Some(r.midpoint(&l)),
        _ => None,
    };

    let mut torso_points: Vec<Point> = [Joint::Neck, Joint::RShoulder, Joint::LShoulder]
        .iter()
        .filter_map(|&j| pose.joint(j))
        .collect();
    if let Some(m) = midhip {
        torso_points.push(m);
    }

    if torso_points.is_empty() {
        let present: Vec<Point> = pose.present_joints().map(|(_, p)| p).collect();
        return Point::centroid(&present);
    }

    let torso_center = Point::centroid(&torso_points);

    let leg_center = |hip: Joint, ankle: Joint| match (pose.joint(hip), pose.joint(ankle)) {
        (Some(h), Some(a)) => h.midpoint(&a),
        (Some(h), None) => h,
        _ => torso_center,
    };
    let right_leg = leg_center(Joint::RHip, Joint::RAnkle);
    let left_leg = leg_center(Joint::LHip, Joint::LAnkle);

    (torso_center * TORSO_MASS + right_leg * LEG_MASS + left_leg * LEG_MASS) * (1.0 / TOTAL_MASS)
}

/// Select the main support joint with the default vertical tolerance.
pub fn select_support(pose: &Pose) -> Option<Joint> {
    select_support_with(pose, DEFAULT_VERTICAL_TOLERANCE)
}

/// Select the main support joint.
///
/// Walks the candidate groups in priority order and, within the first group
/// that has any present joint, keeps the joints within `vertical_tolerance`
/// of the lowest one; among those the joint horizontally closest to the
/// center of mass wins. Returns `None` only when no candidate joint is
/// present at all.
pub fn select_support_with(pose: &Pose, vertical_tolerance: f32) -> Option<Joint> {
    let com = center_of_mass(pose);

    for group in SUPPORT_GROUPS {
        let mut present: Vec<(Joint, Point)> = group
            .iter()
            .filter_map(|&j| pose.joint(j).map(|p| (j, p)))
            .collect();
        if present.is_empty() {
            continue;
        }

        // Lowest in the image first; the sort is stable, so equal heights
        // keep the right-before-left group order.
        present.sort_by(|a, b| b.1.y.partial_cmp(&a.1.y).unwrap_or(Ordering::Equal));
        let lowest_y = present[0].1.y;

        let chosen = present
            .iter()
            .filter(|(_, p)| (p.y - lowest_y).abs() <= vertical_tolerance)
            .min_by(|a, b| {
                let da = (a.1.x - com.x).abs();
                let db = (b.1.x - com.x).abs();
                da.partial_cmp(&db).unwrap_or(Ordering::Equal)
            })
            .map(|(j, _)| *j);

        return chosen;
    }

    None
}
