//! End-to-end properties of the retargeting transform.

use pose_retarget::{select_support, Document, Error, Gender, Joint, Point, Pose};

/// A complete standing adult skeleton with face, hand and foot clusters.
fn full_pose(canvas: u32) -> Pose {
    let mut pose = Pose::new(canvas, canvas)
        .with_joint(Joint::Nose, Point::new(500.0, 100.0))
        .with_joint(Joint::REye, Point::new(485.0, 90.0))
        .with_joint(Joint::LEye, Point::new(515.0, 90.0))
        .with_joint(Joint::REar, Point::new(465.0, 95.0))
        .with_joint(Joint::LEar, Point::new(535.0, 95.0))
        .with_joint(Joint::Neck, Point::new(500.0, 200.0))
        .with_joint(Joint::RShoulder, Point::new(440.0, 210.0))
        .with_joint(Joint::LShoulder, Point::new(560.0, 210.0))
        .with_joint(Joint::RElbow, Point::new(420.0, 350.0))
        .with_joint(Joint::LElbow, Point::new(580.0, 350.0))
        .with_joint(Joint::RWrist, Point::new(410.0, 480.0))
        .with_joint(Joint::LWrist, Point::new(590.0, 480.0))
        .with_joint(Joint::RHip, Point::new(465.0, 500.0))
        .with_joint(Joint::LHip, Point::new(535.0, 500.0))
        .with_joint(Joint::RKnee, Point::new(460.0, 700.0))
        .with_joint(Joint::LKnee, Point::new(540.0, 700.0))
        .with_joint(Joint::RAnkle, Point::new(455.0, 900.0))
        .with_joint(Joint::LAnkle, Point::new(545.0, 900.0))
        .with_declared(20, Gender::Female);

    // Sparse face: a bit of contour, one landmark per eye, nose tip, mouth.
    let mut face = vec![None; 70];
    face[0] = Some(Point::new(460.0, 100.0));
    face[8] = Some(Point::new(500.0, 140.0));
    face[36] = Some(Point::new(483.0, 92.0));
    face[42] = Some(Point::new(513.0, 92.0));
    face[30] = Some(Point::new(500.0, 105.0));
    face[48] = Some(Point::new(490.0, 120.0));
    face[54] = Some(Point::new(510.0, 120.0));
    pose.face = face;

    pose.right_hand = vec![Some(Point::new(408.0, 492.0)), Some(Point::new(404.0, 500.0))];
    pose.left_hand = vec![Some(Point::new(592.0, 492.0))];
    pose.right_foot = vec![Some(Point::new(450.0, 915.0))];
    pose.left_foot = vec![Some(Point::new(550.0, 915.0))];
    pose
}

fn assert_in_canvas(pose: &Pose) {
    let (w, h) = (pose.canvas_width as f32, pose.canvas_height as f32);
    for (joint, p) in pose.present_joints() {
        assert!(
            p.x >= 0.0 && p.x <= w && p.y >= 0.0 && p.y <= h,
            "{joint} out of canvas: {p:?}"
        );
    }
    for cluster in [
        &pose.face,
        &pose.left_hand,
        &pose.right_hand,
        &pose.left_foot,
        &pose.right_foot,
    ] {
        for p in cluster.iter().flatten() {
            assert!(
                p.x >= 0.0 && p.x <= w && p.y >= 0.0 && p.y <= h,
                "landmark out of canvas: {p:?}"
            );
        }
    }
}

#[test]
fn anchor_is_invariant_across_targets() {
    let pose = full_pose(2000);
    let support = select_support(&pose).expect("standing pose has a support joint");
    let original = pose.joint(support).unwrap();

    for (age, gender) in [(0, Gender::Male), (8, Gender::Female), (16, Gender::Male)] {
        let scaled = pose.retarget(age, gender).unwrap();
        let kept = scaled.joint(support).unwrap();
        assert!(
            (kept.x - original.x).abs() < 1e-4 && (kept.y - original.y).abs() < 1e-4,
            "support {support} moved for target ({age}, {gender})"
        );
    }
}

#[test]
fn self_scale_is_idempotent() {
    let pose = full_pose(2000);
    let scaled = pose.retarget(20, Gender::Female).unwrap();

    for (joint, original) in pose.present_joints() {
        let got = scaled.joint(joint).expect("joint lost in self-scale");
        assert!(
            (got.x - original.x).abs() < 1e-2 && (got.y - original.y).abs() < 1e-2,
            "{joint}: {original:?} became {got:?}"
        );
    }
    for (slot, original) in scaled.face.iter().zip(pose.face.iter()) {
        if let (Some(got), Some(orig)) = (slot, original) {
            assert!((got.x - orig.x).abs() < 1e-1 && (got.y - orig.y).abs() < 1e-1);
        }
    }
}

#[test]
fn all_outputs_stay_inside_the_canvas() {
    // A canvas barely containing the skeleton forces clamping when limbs
    // grow during retargeting.
    let pose = full_pose(1000);
    for age in [0, 4, 10, 20, 60] {
        let scaled = pose.retarget(age, Gender::Male).unwrap();
        assert_in_canvas(&scaled);
    }

    // Growing a declared child up to adult proportions pushes limbs past
    // the canvas edge; clamping must catch every coordinate.
    let mut child = full_pose(1000);
    child.input_age = Some(4);
    let grown = child.retarget(20, Gender::Male).unwrap();
    assert_in_canvas(&grown);
}

#[test]
fn unreachable_joints_are_omitted() {
    // Removing the right eye orphans the right ear from the skeleton.
    let mut pose = full_pose(2000);
    pose.body[Joint::REye as usize] = None;

    let scaled = pose.retarget(8, Gender::Female).unwrap();
    assert_eq!(scaled.joint(Joint::REar), None, "orphaned ear must be omitted");
    assert!(scaled.joint(Joint::LEar).is_some(), "connected ear survives");
}

#[test]
fn face_regions_scale_around_their_bases() {
    let pose = full_pose(2000);
    let scaled = pose.retarget(4, Gender::Female).unwrap();

    // A toddler's eyes are proportionally larger: the eye landmark's offset
    // from the scaled eye joint grows by eye_factor * height_ratio > the
    // contour's shrink factor. Just check both moved and stayed present.
    assert!(scaled.face[36].is_some());
    assert!(scaled.face[0].is_some());
    assert_ne!(scaled.face[36], pose.face[36]);
    assert_ne!(scaled.face[0], pose.face[0]);
}

#[test]
fn missing_target_gender_string_is_rejected() {
    assert!(matches!(
        "unknown".parse::<Gender>(),
        Err(Error::InvalidGender(_))
    ));
}

#[test]
fn out_of_range_target_age_is_rejected() {
    let pose = full_pose(2000);
    assert!(matches!(
        pose.retarget(150, Gender::Female),
        Err(Error::AgeOutOfRange(150))
    ));
}

#[test]
fn estimation_feeds_scaling_when_nothing_is_declared() {
    let mut pose = full_pose(2000);
    pose.input_age = None;
    pose.input_gender = None;

    // Leg-to-torso and torso-to-head ratios are measurable, so the input
    // profile resolves by estimation alone.
    let scaled = pose.retarget(10, Gender::Male).unwrap();
    assert_eq!(scaled.input_age, Some(10));
    assert_eq!(scaled.input_gender, Some(Gender::Male));
}

#[test]
fn document_round_trip_scaling() {
    let mut doc = Document {
        people: vec![full_pose(2000)],
        canvas_width: 2000,
        canvas_height: 2000,
    };
    doc.scale_pose(0, 8, Gender::Female).unwrap();

    let text = doc.to_json().unwrap();
    let reloaded = Document::from_json(&text).unwrap();
    assert_eq!(reloaded.people.len(), 1);

    let pose = &reloaded.people[0];
    assert!(pose.joint(Joint::Neck).is_some());
    assert_in_canvas(pose);

    // Out-of-range index is ignored, not an error.
    doc.scale_pose(99, 8, Gender::Female).unwrap();
}
