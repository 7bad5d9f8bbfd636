//! The canonical 18-joint skeleton: joint enumeration, adjacency, and
//! anatomical segment classification.
//!
//! Joints follow the OpenPose COCO-18 ordering, so `Joint as usize` is the
//! index of the joint in a decoded keypoint array.

use serde::{Deserialize, Serialize};

/// One of the 18 canonical COCO-18 body keypoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(usize)]
pub enum Joint {
    Nose = 0,
    Neck = 1,
    RShoulder = 2,
    RElbow = 3,
    RWrist = 4,
    LShoulder = 5,
    LElbow = 6,
    LWrist = 7,
    RHip = 8,
    RKnee = 9,
    RAnkle = 10,
    LHip = 11,
    LKnee = 12,
    LAnkle = 13,
    REye = 14,
    LEye = 15,
    REar = 16,
    LEar = 17,
}

impl Joint {
    pub const COUNT: usize = 18;

    /// All joints in COCO-18 order.
    pub const ALL: [Joint; Joint::COUNT] = [
        Joint::Nose,
        Joint::Neck,
        Joint::RShoulder,
        Joint::RElbow,
        Joint::RWrist,
        Joint::LShoulder,
        Joint::LElbow,
        Joint::LWrist,
        Joint::RHip,
        Joint::RKnee,
        Joint::RAnkle,
        Joint::LHip,
        Joint::LKnee,
        Joint::LAnkle,
        Joint::REye,
        Joint::LEye,
        Joint::REar,
        Joint::LEar,
    ];

    pub fn from_index(index: usize) -> Option<Self> {
        Joint::ALL.get(index).copied()
    }

    pub fn name(&self) -> &'static str {
        match self {
            Joint::Nose => "Nose",
            Joint::Neck => "Neck",
            Joint::RShoulder => "RShoulder",
            Joint::RElbow => "RElbow",
            Joint::RWrist => "RWrist",
            Joint::LShoulder => "LShoulder",
            Joint::LElbow => "LElbow",
            Joint::LWrist => "LWrist",
            Joint::RHip => "RHip",
            Joint::RKnee => "RKnee",
            Joint::RAnkle => "RAnkle",
            Joint::LHip => "LHip",
            Joint::LKnee => "LKnee",
            Joint::LAnkle => "LAnkle",
            Joint::REye => "REye",
            Joint::LEye => "LEye",
            Joint::REar => "REar",
            Joint::LEar => "LEar",
        }
    }

    /// Joints directly connected to this one in the skeleton graph.
    /// The relation is symmetric: `b in a.neighbors()` iff `a in b.neighbors()`.
    pub fn neighbors(&self) -> &'static [Joint] {
        use Joint::*;
        match self {
            Neck => &[Nose, RShoulder, LShoulder, RHip, LHip],
            RShoulder => &[RElbow, Neck],
            RElbow => &[RWrist, RShoulder],
            RWrist => &[RElbow],
            LShoulder => &[LElbow, Neck],
            LElbow => &[LWrist, LShoulder],
            LWrist => &[LElbow],
            RHip => &[RKnee, Neck],
            RKnee => &[RAnkle, RHip],
            RAnkle => &[RKnee],
            LHip => &[LKnee, Neck],
            LKnee => &[LAnkle, LHip],
            LAnkle => &[LKnee],
            Nose => &[Neck, REye, LEye],
            REye => &[Nose, REar],
            LEye => &[Nose, LEar],
            REar => &[REye],
            LEar => &[LEye],
        }
    }
}

impl std::fmt::Display for Joint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Anatomical segment a skeleton edge belongs to, which decides the
/// proportion ratio applied when the edge is rescaled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Segment {
    Head,
    Torso,
    Arm,
    Leg,
}

/// Classify the edge between two joints. The lookup is symmetric; pairs
/// outside the known edge table fall back to `Head`.
pub fn edge_segment(a: Joint, b: Joint) -> Segment {
    use Joint::*;
    match (a, b) {
        (Neck, Nose) | (Nose, Neck) => Segment::Head,

        (Neck, RShoulder) | (RShoulder, Neck) => Segment::Torso,
        (Neck, LShoulder) | (LShoulder, Neck) => Segment::Torso,
        (Neck, RHip) | (RHip, Neck) => Segment::Torso,
        (Neck, LHip) | (LHip, Neck) => Segment::Torso,

        (RShoulder, RElbow) | (RElbow, RShoulder) => Segment::Arm,
        (RElbow, RWrist) | (RWrist, RElbow) => Segment::Arm,
        (LShoulder, LElbow) | (LElbow, LShoulder) => Segment::Arm,
        (LElbow, LWrist) | (LWrist, LElbow) => Segment::Arm,

        (RHip, RKnee) | (RKnee, RHip) => Segment::Leg,
        (RKnee, RAnkle) | (RAnkle, RKnee) => Segment::Leg,
        (LHip, LKnee) | (LKnee, LHip) => Segment::Leg,
        (LKnee, LAnkle) | (LAnkle, LKnee) => Segment::Leg,

        (Nose, REye) | (REye, Nose) => Segment::Head,
        (Nose, LEye) | (LEye, Nose) => Segment::Head,
        (REye, REar) | (REar, REye) => Segment::Head,
        (LEye, LEar) | (LEar, LEye) => Segment::Head,

        _ => Segment::Head,
    }
}
