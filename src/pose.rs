//! The pose aggregate: skeleton joints, secondary landmark clusters, canvas
//! bounds, and the optionally declared body profile.

use crate::profile::Gender;
use crate::skeleton::Joint;
use crate::types::Point;

/// A single detected person: up to 18 skeleton joints plus face, hand and
/// foot landmark clusters, all in pixel coordinates on a shared canvas.
///
/// Every joint and landmark slot is independently present or absent. A pose
/// is built once and treated as immutable afterwards; retargeting produces a
/// new `Pose` value.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Pose {
    /// Skeleton joints, indexed by `Joint as usize`.
    pub body: [Option<Point>; Joint::COUNT],
    /// Facial landmarks (COCO-70 indexing).
    pub face: Vec<Option<Point>>,
    pub left_hand: Vec<Option<Point>>,
    pub right_hand: Vec<Option<Point>>,
    pub left_foot: Vec<Option<Point>>,
    pub right_foot: Vec<Option<Point>>,
    /// Valid coordinate rectangle: x in [0, canvas_width], y in [0, canvas_height].
    pub canvas_width: u32,
    pub canvas_height: u32,
    /// Declared age, if known. Skips age estimation when set.
    pub input_age: Option<u32>,
    /// Declared gender, if known. Skips gender estimation when set.
    pub input_gender: Option<Gender>,
}

impl Pose {
    /// An empty pose on the given canvas.
    pub fn new(canvas_width: u32, canvas_height: u32) -> Self {
        Self {
            canvas_width,
            canvas_height,
            ..Self::default()
        }
    }

    /// Builder-style joint placement, for constructing poses by hand.
    pub fn with_joint(mut self, joint: Joint, point: Point) -> Self {
        self.body[joint as usize] = Some(point);
        self
    }

    /// Builder-style declaration of the input profile.
    pub fn with_declared(mut self, age: u32, gender: Gender) -> Self {
        self.input_age = Some(age);
        self.input_gender = Some(gender);
        self
    }

    /// Position of a joint, if present.
    pub fn joint(&self, joint: Joint) -> Option<Point> {
        self.body[joint as usize]
    }

    /// Iterate over present joints in canonical order.
    pub fn present_joints(&self) -> impl Iterator<Item = (Joint, Point)> + '_ {
        Joint::ALL
            .iter()
            .filter_map(|&j| self.body[j as usize].map(|p| (j, p)))
    }

    /// Number of present skeleton joints.
    pub fn num_present(&self) -> usize {
        self.body.iter().filter(|p| p.is_some()).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_pose() {
        let pose = Pose::new(640, 480);
        assert_eq!(pose.num_present(), 0);
        assert_eq!(pose.joint(Joint::Neck), None);
        assert_eq!(pose.canvas_width, 640);
    }

    #[test]
    fn joint_placement() {
        let pose = Pose::new(100, 100)
            .with_joint(Joint::Neck, Point::new(50.0, 20.0))
            .with_joint(Joint::Nose, Point::new(50.0, 10.0));

        assert_eq!(pose.num_present(), 2);
        assert_eq!(pose.joint(Joint::Neck), Some(Point::new(50.0, 20.0)));
        assert_eq!(pose.joint(Joint::RHip), None);

        let present: Vec<Joint> = pose.present_joints().map(|(j, _)| j).collect();
        assert_eq!(present, vec![Joint::Nose, Joint::Neck]);
    }

    #[test]
    fn declared_profile() {
        let pose = Pose::new(100, 100).with_declared(20, Gender::Female);
        assert_eq!(pose.input_age, Some(20));
        assert_eq!(pose.input_gender, Some(Gender::Female));
    }
}
