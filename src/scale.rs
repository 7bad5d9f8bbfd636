//! The retargeting transform: rescales a pose to the proportions of a
//! target age and gender.
//!
//! The skeleton is regrown outward from the support joint: a breadth-first
//! traversal of the adjacency graph keeps each edge's direction and rescales
//! its length by the segment's ratio adjustment and the overall height
//! ratio. Secondary landmark clusters (face sub-regions, hands, feet) are
//! then re-aligned around their scaled reference joints, and every produced
//! coordinate is clamped to the canvas.

use std::collections::VecDeque;

use crate::anchor;
use crate::error::{Error, Result};
use crate::pose::Pose;
use crate::profile::{self, Gender, Proportions};
use crate::skeleton::{edge_segment, Joint, Segment};
use crate::types::Point;

/// Oldest accepted age, for both targets and declared inputs.
pub const MAX_AGE: u32 = 120;

/// Edges shorter than this have no usable direction.
const MIN_EDGE_LENGTH: f32 = 1e-6;

/// Which adjustment factor a face sub-region uses.
#[derive(Debug, Clone, Copy)]
enum FactorKey {
    Eye,
    Mouth,
    Jaw,
    Nose,
    FaceContour,
}

impl FactorKey {
    fn value(self, adjusted: &Proportions) -> f32 {
        match self {
            FactorKey::Eye => adjusted.eye,
            FactorKey::Mouth => adjusted.mouth,
            FactorKey::Jaw => adjusted.jaw,
            FactorKey::Nose => adjusted.nose,
            FactorKey::FaceContour => adjusted.face_contour,
        }
    }
}

/// Alignment base of a face sub-region: a skeleton joint, or the computed
/// mouth centroid reprojected through the nose displacement.
#[derive(Debug, Clone, Copy)]
enum RegionBase {
    Joint(Joint),
    MouthCentroid,
}

/// One independently scaled facial sub-region (COCO-70 indexing).
struct FaceRegion {
    name: &'static str,
    /// Half-open index spans into the face landmark list.
    spans: &'static [(usize, usize)],
    base: RegionBase,
    factor: FactorKey,
}

const FACE_REGIONS: [FaceRegion; 8] = [
    FaceRegion {
        name: "face_contour",
        spans: &[(0, 6), (11, 17)],
        base: RegionBase::Joint(Joint::Nose),
        factor: FactorKey::FaceContour,
    },
    FaceRegion {
        name: "jaw",
        spans: &[(6, 11)],
        base: RegionBase::Joint(Joint::Nose),
        factor: FactorKey::Jaw,
    },
    FaceRegion {
        name: "right_eyebrow",
        spans: &[(17, 22)],
        base: RegionBase::Joint(Joint::REye),
        factor: FactorKey::Eye,
    },
    FaceRegion {
        name: "left_eyebrow",
        spans: &[(22, 27)],
        base: RegionBase::Joint(Joint::LEye),
        factor: FactorKey::Eye,
    },
    FaceRegion {
        name: "nose",
        spans: &[(27, 36)],
        base: RegionBase::Joint(Joint::Nose),
        factor: FactorKey::Nose,
    },
    FaceRegion {
        name: "right_eye",
        spans: &[(36, 42)],
        base: RegionBase::Joint(Joint::REye),
        factor: FactorKey::Eye,
    },
    FaceRegion {
        name: "left_eye",
        spans: &[(42, 48)],
        base: RegionBase::Joint(Joint::LEye),
        factor: FactorKey::Eye,
    },
    FaceRegion {
        name: "mouth",
        spans: &[(48, 71)],
        base: RegionBase::MouthCentroid,
        factor: FactorKey::Mouth,
    },
];

/// Landmarks averaged into the mouth centroid.
const MOUTH_CENTROID_SPAN: (usize, usize) = (48, 68);

impl Pose {
    /// Retarget this pose to the proportions of `target_age` and
    /// `target_gender`, keeping the support joint fixed.
    ///
    /// The input profile comes from the declared age/gender when set,
    /// otherwise from estimation; failing both is an error. Target and
    /// declared ages must be in 0..=120; ages past the tabulated range use
    /// the adult tables.
    pub fn retarget(&self, target_age: u32, target_gender: Gender) -> Result<Pose> {
        scale_pose(self, target_age, target_gender)
    }
}

/// See [`Pose::retarget`].
pub fn scale_pose(pose: &Pose, target_age: u32, target_gender: Gender) -> Result<Pose> {
    if target_age > MAX_AGE {
        return Err(Error::AgeOutOfRange(target_age));
    }

    let input_age = pose
        .input_age
        .or_else(|| pose.guess_age())
        .ok_or(Error::UnresolvedProfile)?;
    let input_gender = pose
        .input_gender
        .or_else(|| pose.guess_gender())
        .ok_or(Error::UnresolvedProfile)?;
    if input_age > MAX_AGE {
        return Err(Error::AgeOutOfRange(input_age));
    }

    let input = profile::profile(input_age, input_gender);
    let target = profile::profile(target_age, target_gender);

    let adjusted = target.proportions.relative_to(&input.proportions);
    let height_ratio = if input.height_cm > 0.0 {
        target.height_cm / input.height_cm
    } else {
        1.0
    };

    let support = anchor::select_support(pose).ok_or(Error::NoSupportJoint)?;
    log::debug!(
        "retargeting ({input_age}, {input_gender}) -> ({target_age}, {target_gender}), \
         height ratio {height_ratio:.3}, support joint {support}"
    );

    let scaled = propagate_from(pose, support, &adjusted, height_ratio);

    let face = scale_face(&pose.face, &adjusted, height_ratio, &scaled, pose);

    let hand_factor = adjusted.hand * height_ratio;
    let foot_factor = adjusted.foot * height_ratio;
    let left_hand = align_cluster(
        "left hand",
        &pose.left_hand,
        hand_factor,
        scaled[Joint::LWrist as usize],
        pose.joint(Joint::LWrist),
    );
    let right_hand = align_cluster(
        "right hand",
        &pose.right_hand,
        hand_factor,
        scaled[Joint::RWrist as usize],
        pose.joint(Joint::RWrist),
    );
    let left_foot = align_cluster(
        "left foot",
        &pose.left_foot,
        foot_factor,
        scaled[Joint::LAnkle as usize],
        pose.joint(Joint::LAnkle),
    );
    let right_foot = align_cluster(
        "right foot",
        &pose.right_foot,
        foot_factor,
        scaled[Joint::RAnkle as usize],
        pose.joint(Joint::RAnkle),
    );

    // Clamp everything to the canvas rectangle, per axis.
    let (max_x, max_y) = (pose.canvas_width as f32, pose.canvas_height as f32);
    let clamp_slot = |p: Option<Point>| p.map(|p| p.clamp_to(max_x, max_y));
    let clamp_cluster =
        |points: Vec<Option<Point>>| points.into_iter().map(clamp_slot).collect::<Vec<_>>();

    let mut body = [None; Joint::COUNT];
    for (i, slot) in scaled.iter().enumerate() {
        body[i] = clamp_slot(*slot);
    }

    Ok(Pose {
        body,
        face: clamp_cluster(face),
        left_hand: clamp_cluster(left_hand),
        right_hand: clamp_cluster(right_hand),
        left_foot: clamp_cluster(left_foot),
        right_foot: clamp_cluster(right_foot),
        canvas_width: pose.canvas_width,
        canvas_height: pose.canvas_height,
        // The output declares the target profile, so re-scaling it treats
        // these proportions as ground truth.
        input_age: Some(target_age),
        input_gender: Some(target_gender),
    })
}

/// The ratio adjustment applied to a skeleton edge.
fn edge_scale(a: Joint, b: Joint, adjusted: &Proportions) -> f32 {
    match edge_segment(a, b) {
        Segment::Head => adjusted.head,
        Segment::Torso => adjusted.torso,
        Segment::Arm => adjusted.arm,
        Segment::Leg => adjusted.leg,
    }
}

/// Grow the rescaled skeleton outward from the support joint.
///
/// Breadth-first over the adjacency graph: each present, unvisited neighbor
/// is placed along the original edge direction at the rescaled length from
/// the current joint's already-scaled position. The support joint itself
/// keeps its original coordinates. Joints unreachable through present edges
/// stay absent in the result.
fn propagate_from(
    pose: &Pose,
    support: Joint,
    adjusted: &Proportions,
    height_ratio: f32,
) -> [Option<Point>; Joint::COUNT] {
    let mut scaled: [Option<Point>; Joint::COUNT] = [None; Joint::COUNT];
    let mut visited = [false; Joint::COUNT];
    let mut queue = VecDeque::new();

    scaled[support as usize] = pose.joint(support);
    visited[support as usize] = true;
    queue.push_back(support);

    while let Some(current) = queue.pop_front() {
        let (Some(current_orig), Some(current_scaled)) =
            (pose.joint(current), scaled[current as usize])
        else {
            continue;
        };

        for &neighbor in current.neighbors() {
            if visited[neighbor as usize] {
                continue;
            }
            let Some(neighbor_orig) = pose.joint(neighbor) else {
                continue;
            };

            let vector = neighbor_orig - current_orig;
            let length = vector.norm();
            if length <= MIN_EDGE_LENGTH {
                // A degenerate edge has no direction; the joint may still
                // be reached through another present edge.
                continue;
            }

            let direction = vector * (1.0 / length);
            let new_length = length * edge_scale(current, neighbor, adjusted) * height_ratio;
            scaled[neighbor as usize] = Some(current_scaled + direction * new_length);
            visited[neighbor as usize] = true;
            queue.push_back(neighbor);
        }
    }

    scaled
}

/// Uniformly rescale a hand or foot cluster around its reference joint.
/// A cluster missing either reference is returned unchanged.
fn align_cluster(
    label: &str,
    points: &[Option<Point>],
    factor: f32,
    scaled_base: Option<Point>,
    original_base: Option<Point>,
) -> Vec<Option<Point>> {
    let (Some(scaled_base), Some(original_base)) = (scaled_base, original_base) else {
        if points.iter().any(|p| p.is_some()) {
            log::warn!("skipping {label} alignment: reference joint missing");
        }
        return points.to_vec();
    };

    points
        .iter()
        .map(|slot| slot.map(|p| scaled_base + (p - original_base) * factor))
        .collect()
}

/// Rescale the facial landmarks, one sub-region at a time.
///
/// Every sub-region moves each landmark by its own factor around its own
/// base: nose-anchored regions follow the scaled nose, eye-anchored regions
/// the scaled eyes, and the mouth follows its original centroid reprojected
/// through the nose displacement. A region whose base cannot be resolved is
/// left as-is.
fn scale_face(
    face: &[Option<Point>],
    adjusted: &Proportions,
    height_ratio: f32,
    scaled: &[Option<Point>; Joint::COUNT],
    pose: &Pose,
) -> Vec<Option<Point>> {
    let mut out = face.to_vec();
    if out.iter().all(|p| p.is_none()) {
        if !out.is_empty() {
            log::warn!("no face points to scale");
        }
        return out;
    }

    let mouth_centroid = {
        let (start, end) = MOUTH_CENTROID_SPAN;
        let points: Vec<Point> = face[start.min(face.len())..end.min(face.len())]
            .iter()
            .flatten()
            .copied()
            .collect();
        if points.is_empty() {
            None
        } else {
            Some(Point::centroid(&points))
        }
    };

    // The scaled mouth base rides the nose displacement: centroid offset
    // from the original nose, stretched by the height ratio, from the
    // scaled nose.
    let scaled_mouth_base = match (
        mouth_centroid,
        scaled[Joint::Nose as usize],
        pose.joint(Joint::Nose),
    ) {
        (Some(centroid), Some(scaled_nose), Some(orig_nose)) => {
            Some(scaled_nose + (centroid - orig_nose) * height_ratio)
        }
        _ => None,
    };

    for region in &FACE_REGIONS {
        let (scaled_base, original_base) = match region.base {
            RegionBase::Joint(j) => (scaled[j as usize], pose.joint(j)),
            RegionBase::MouthCentroid => (scaled_mouth_base, mouth_centroid),
        };
        let (Some(scaled_base), Some(original_base)) = (scaled_base, original_base) else {
            log::warn!("face region {} missing its base; left unscaled", region.name);
            continue;
        };

        let factor = region.factor.value(adjusted) * height_ratio;
        for &(start, end) in region.spans {
            let len = out.len();
            for slot in out[start.min(len)..end.min(len)].iter_mut() {
                if let Some(p) = *slot {
                    *slot = Some(scaled_base + (p - original_base) * factor);
                }
            }
        }
    }

    out
}
