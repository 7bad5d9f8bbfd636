//! # pose-retarget
//!
//! Retargeting of detected 2D human poses to the body proportions of a
//! different age and gender.
//!
//! Given an OpenPose-style COCO-18 skeleton (plus optional face, hand and
//! foot landmark clusters), this crate:
//! - **Support detection**: picks the joint bearing the body's weight with a
//!   gravity heuristic (lowest candidate joint, ties broken by an
//!   approximate center of mass).
//! - **Profile estimation**: guesses gender from leg-to-torso proportions
//!   and age from the torso-to-head ratio when they are not declared.
//! - **Retargeting**: regrows the skeleton outward from the support joint,
//!   rescaling every edge by the target/input ratio of its anatomical
//!   segment and the overall height ratio, then re-aligns the face, hand
//!   and foot clusters around their scaled reference joints.
//!
//! The support joint is a fixed point of the transform, the skeleton's
//! topology is preserved, and every output coordinate is clamped to the
//! canvas.
//!
//! ## Quick Start
//!
//! ```rust
//! use pose_retarget::{Gender, Joint, Point, Pose};
//!
//! // Poses usually come from the OpenPose JSON codec (`openpose::Document`);
//! // here we place a minimal skeleton by hand.
//! let adult = Pose::new(1000, 1000)
//!     .with_joint(Joint::Nose, Point::new(500.0, 100.0))
//!     .with_joint(Joint::Neck, Point::new(500.0, 200.0))
//!     .with_joint(Joint::RHip, Point::new(470.0, 500.0))
//!     .with_joint(Joint::LHip, Point::new(530.0, 500.0))
//!     .with_declared(20, Gender::Female);
//!
//! // Retarget to the proportions of a six-year-old girl.
//! let child = adult.retarget(6, Gender::Female).unwrap();
//!
//! // The supporting hip stayed put; the head shrank towards it.
//! assert!(child.joint(Joint::Nose).is_some());
//! assert_eq!(child.input_age, Some(6));
//! ```
//!
//! Estimation is available on its own:
//!
//! ```rust
//! use pose_retarget::Pose;
//!
//! let pose = Pose::new(1000, 1000);
//! assert_eq!(pose.guess_age(), None); // too few joints to measure
//! ```

pub mod anchor;
mod error;
mod estimate;
pub mod openpose;
pub mod profile;
mod pose;
mod scale;
mod skeleton;
mod types;

pub use anchor::{select_support, select_support_with, DEFAULT_VERTICAL_TOLERANCE};
pub use error::{Error, Result};
pub use openpose::Document;
pub use pose::Pose;
pub use profile::{Gender, Profile, Proportions};
pub use scale::{scale_pose, MAX_AGE};
pub use skeleton::{edge_segment, Joint, Segment};
pub use types::Point;
