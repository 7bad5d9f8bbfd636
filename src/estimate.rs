//! Body profile estimation: guessing gender, age and height from limb
//! proportions when the pose does not declare them.

use crate::pose::Pose;
use crate::profile::{self, Gender};
use crate::skeleton::Joint;

/// Leg-to-torso ratio above which a skeleton is classified as male.
const MALE_LEG_TO_TORSO: f32 = 1.5;

impl Pose {
    /// Guess the gender from limb proportions.
    ///
    /// Returns the declared gender when set. Otherwise compares right-leg
    /// length against torso length: males typically have longer legs
    /// relative to the torso. Returns `None` when the required joints
    /// (Neck, RHip, RKnee, RAnkle) are missing or the torso has zero length.
    pub fn guess_gender(&self) -> Option<Gender> {
        if let Some(gender) = self.input_gender {
            return Some(gender);
        }

        let neck = self.joint(Joint::Neck)?;
        let rhip = self.joint(Joint::RHip)?;
        let rknee = self.joint(Joint::RKnee)?;
        let rankle = self.joint(Joint::RAnkle)?;

        let torso_length = neck.distance(&rhip);
        let leg_length = rhip.distance(&rknee) + rknee.distance(&rankle);

        if torso_length > 0.0 {
            let ratio = leg_length / torso_length;
            Some(if ratio > MALE_LEG_TO_TORSO {
                Gender::Male
            } else {
                Gender::Female
            })
        } else {
            None
        }
    }

    /// Estimate the age in years from the torso-to-head ratio.
    ///
    /// Measures head length (Neck–Nose) and torso length (mean of Neck–RHip
    /// and Neck–LHip), then scans the anthropometric table for the age in
    /// 0..=20 whose reference torso/head ratio is closest. Ties resolve to
    /// the smaller age. Returns `None` when the required joints are missing.
    pub fn guess_age(&self) -> Option<u32> {
        let (neck, nose) = match (self.joint(Joint::Neck), self.joint(Joint::Nose)) {
            (Some(neck), Some(nose)) => (neck, nose),
            _ => {
                log::warn!("head length cannot be measured: Neck or Nose missing");
                return None;
            }
        };
        let (rhip, lhip) = match (self.joint(Joint::RHip), self.joint(Joint::LHip)) {
            (Some(rhip), Some(lhip)) => (rhip, lhip),
            _ => {
                log::warn!("torso length cannot be measured: Neck or hips missing");
                return None;
            }
        };

        let head_length = neck.distance(&nose);
        let torso_length = (neck.distance(&rhip) + neck.distance(&lhip)) / 2.0;
        let torso_to_head = torso_length / head_length;

        // Reference gender for the ratio table; the skeletal ratios are
        // gender-independent, so the default only affects facial factors.
        let reference_gender = self.guess_gender().unwrap_or(Gender::Female);

        let mut best_age = None;
        let mut best_diff = f32::INFINITY;
        for age in 0..=20 {
            let p = profile::proportions(age, reference_gender);
            let diff = (torso_to_head - p.torso / p.head).abs();
            if diff < best_diff {
                best_diff = diff;
                best_age = Some(age);
            }
        }

        log::debug!(
            "estimated age {:?} (torso-to-head ratio {:.3})",
            best_age,
            torso_to_head
        );
        best_age
    }

    /// Estimate the height in centimeters via estimated age and gender.
    ///
    /// Gender falls back to female when it cannot be guessed; a failed age
    /// estimate fails the whole height estimate.
    pub fn estimate_height(&self) -> Option<f32> {
        let age = match self.guess_age() {
            Some(age) => age,
            None => {
                log::warn!("height estimation failed: age could not be estimated");
                return None;
            }
        };
        let gender = self.guess_gender().unwrap_or(Gender::Female);
        let height = profile::height_cm(age, gender);
        log::debug!("estimated height for age {age} and gender {gender}: {height} cm");
        Some(height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Point;

    /// Neck at origin, right leg laid out vertically below the hip.
    fn leg_pose(torso: f32, thigh: f32, shin: f32) -> Pose {
        Pose::new(1000, 1000)
            .with_joint(Joint::Neck, Point::new(500.0, 0.0))
            .with_joint(Joint::RHip, Point::new(500.0, torso))
            .with_joint(Joint::RKnee, Point::new(500.0, torso + thigh))
            .with_joint(Joint::RAnkle, Point::new(500.0, torso + thigh + shin))
    }

    #[test]
    fn long_legs_read_as_male() {
        // torso 100, legs 160 -> ratio 1.6
        let pose = leg_pose(100.0, 80.0, 80.0);
        assert_eq!(pose.guess_gender(), Some(Gender::Male));
    }

    #[test]
    fn short_legs_read_as_female() {
        // torso 100, legs 140 -> ratio 1.4
        let pose = leg_pose(100.0, 70.0, 70.0);
        assert_eq!(pose.guess_gender(), Some(Gender::Female));
    }

    #[test]
    fn declared_gender_short_circuits() {
        let pose = leg_pose(100.0, 80.0, 80.0).with_declared(20, Gender::Female);
        assert_eq!(pose.guess_gender(), Some(Gender::Female));
    }

    #[test]
    fn gender_unknown_without_leg_joints() {
        let pose = Pose::new(1000, 1000).with_joint(Joint::Neck, Point::new(500.0, 0.0));
        assert_eq!(pose.guess_gender(), None);
    }

    #[test]
    fn gender_unknown_for_degenerate_torso() {
        // Neck and hip coincide: zero torso length.
        let pose = Pose::new(1000, 1000)
            .with_joint(Joint::Neck, Point::new(500.0, 100.0))
            .with_joint(Joint::RHip, Point::new(500.0, 100.0))
            .with_joint(Joint::RKnee, Point::new(500.0, 200.0))
            .with_joint(Joint::RAnkle, Point::new(500.0, 300.0));
        assert_eq!(pose.guess_gender(), None);
    }

    /// Head length 100, both neck-to-hip distances equal to `torso`.
    fn head_torso_pose(torso: f32) -> Pose {
        Pose::new(2000, 2000)
            .with_joint(Joint::Nose, Point::new(500.0, 100.0))
            .with_joint(Joint::Neck, Point::new(500.0, 200.0))
            .with_joint(Joint::RHip, Point::new(500.0, 200.0 + torso))
            .with_joint(Joint::LHip, Point::new(500.0, 200.0 + torso))
    }

    #[test]
    fn infant_ratio_maps_to_age_zero() {
        // torso/head = 1.2 matches the 0-5 bracket; ties resolve to the
        // smallest age.
        let pose = head_torso_pose(120.0);
        assert_eq!(pose.guess_age(), Some(0));
    }

    #[test]
    fn adult_ratio_maps_to_age_twenty() {
        // torso/head = 2.4 = 0.36 / 0.15
        let pose = head_torso_pose(240.0);
        assert_eq!(pose.guess_age(), Some(20));
    }

    #[test]
    fn teen_ratio_prefers_first_matching_age() {
        // 2.1 is nearest the 14-19 plateau (0.36 / 0.17); the scan keeps
        // the first age of the plateau.
        let pose = head_torso_pose(210.0);
        assert_eq!(pose.guess_age(), Some(14));
    }

    #[test]
    fn age_unknown_without_head() {
        let pose = Pose::new(1000, 1000)
            .with_joint(Joint::Neck, Point::new(500.0, 200.0))
            .with_joint(Joint::RHip, Point::new(500.0, 400.0))
            .with_joint(Joint::LHip, Point::new(500.0, 400.0));
        assert_eq!(pose.guess_age(), None);
    }

    #[test]
    fn height_defaults_to_female_table() {
        // No leg joints, so gender is unguessable and the female table is
        // used; ratio 1.2 estimates age 0 -> 74 cm.
        let pose = head_torso_pose(120.0);
        assert_eq!(pose.estimate_height(), Some(74.0));
    }

    #[test]
    fn height_unknown_when_age_fails() {
        let pose = Pose::new(1000, 1000);
        assert_eq!(pose.estimate_height(), None);
    }
}
