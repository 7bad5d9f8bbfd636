//! OpenPose JSON exchange format.
//!
//! Decodes and encodes the COCO-18 "people" document: flat
//! `[x, y, confidence]` triples per keypoint for the body and for each
//! secondary cluster, plus the canvas dimensions. A keypoint decodes as
//! present only when its confidence is positive; encoding writes present
//! points with confidence 1.0 and absent slots as zero triples.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::pose::Pose;
use crate::profile::Gender;
use crate::skeleton::Joint;
use crate::types::Point;

/// One person's wire record: flat keypoint triples.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct PersonRecord {
    #[serde(default)]
    pose_keypoints_2d: Vec<f32>,
    #[serde(default)]
    face_keypoints_2d: Vec<f32>,
    #[serde(default)]
    hand_left_keypoints_2d: Vec<f32>,
    #[serde(default)]
    hand_right_keypoints_2d: Vec<f32>,
    #[serde(default)]
    foot_left_keypoints_2d: Vec<f32>,
    #[serde(default)]
    foot_right_keypoints_2d: Vec<f32>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct DocumentRecord {
    people: Vec<PersonRecord>,
    #[serde(default)]
    canvas_width: u32,
    #[serde(default)]
    canvas_height: u32,
}

/// A decoded OpenPose document: any number of poses on a shared canvas.
#[derive(Debug, Clone, Default)]
pub struct Document {
    pub people: Vec<Pose>,
    pub canvas_width: u32,
    pub canvas_height: u32,
}

impl Document {
    /// Parse a document from JSON text. A top-level array is unwrapped to
    /// its first element (OpenPose writes single-element arrays).
    pub fn from_json(text: &str) -> Result<Self> {
        let mut value: serde_json::Value = serde_json::from_str(text)?;
        if let serde_json::Value::Array(items) = value {
            value = items
                .into_iter()
                .next()
                .ok_or_else(|| Error::Format("empty top-level array".into()))?;
        }
        if value.get("people").is_none() {
            return Err(Error::Format("missing \"people\" key".into()));
        }

        let record: DocumentRecord = serde_json::from_value(value)?;
        let people = record
            .people
            .iter()
            .map(|p| decode_person(p, record.canvas_width, record.canvas_height))
            .collect();

        Ok(Self {
            people,
            canvas_width: record.canvas_width,
            canvas_height: record.canvas_height,
        })
    }

    /// Serialize to JSON text, wrapped in a single-element array.
    pub fn to_json(&self) -> Result<String> {
        let record = DocumentRecord {
            people: self.people.iter().map(encode_person).collect(),
            canvas_width: self.canvas_width,
            canvas_height: self.canvas_height,
        };
        Ok(serde_json::to_string_pretty(&[record])?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let text = fs::read_to_string(path)?;
        Self::from_json(&text)
    }

    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Append another document's people; the canvas grows to cover both.
    pub fn merge(&mut self, other: Document) {
        self.people.extend(other.people);
        self.canvas_width = self.canvas_width.max(other.canvas_width);
        self.canvas_height = self.canvas_height.max(other.canvas_height);
    }

    pub fn pose(&self, index: usize) -> Option<&Pose> {
        self.people.get(index)
    }

    pub fn add_pose(&mut self, pose: Pose) {
        self.people.push(pose);
    }

    pub fn remove_pose(&mut self, index: usize) {
        if index < self.people.len() {
            self.people.remove(index);
        }
    }

    /// Keep only the pose at `index`, dropping all others.
    pub fn keep_pose(&mut self, index: usize) {
        if index < self.people.len() {
            self.people = vec![self.people[index].clone()];
        }
    }

    /// Retarget the pose at `index` in place. Out-of-range indices are
    /// ignored.
    pub fn scale_pose(
        &mut self,
        index: usize,
        target_age: u32,
        target_gender: Gender,
    ) -> Result<()> {
        if let Some(pose) = self.people.get(index) {
            self.people[index] = pose.retarget(target_age, target_gender)?;
        }
        Ok(())
    }

    pub fn guess_age(&self, index: usize) -> Option<u32> {
        self.people.get(index).and_then(|p| p.guess_age())
    }

    pub fn guess_gender(&self, index: usize) -> Option<Gender> {
        self.people.get(index).and_then(|p| p.guess_gender())
    }
}

/// Split a flat triple list into presence-aware landmark slots.
fn triples_to_points(flat: &[f32]) -> Vec<Option<Point>> {
    flat.chunks_exact(3)
        .map(|t| {
            if t[2] > 0.0 {
                Some(Point::new(t[0], t[1]))
            } else {
                None
            }
        })
        .collect()
}

/// Flatten landmark slots back into triples; absent slots become zeros.
fn points_to_triples(points: &[Option<Point>]) -> Vec<f32> {
    let mut flat = Vec::with_capacity(points.len() * 3);
    for slot in points {
        match slot {
            Some(p) => flat.extend_from_slice(&[p.x, p.y, 1.0]),
            None => flat.extend_from_slice(&[0.0, 0.0, 0.0]),
        }
    }
    flat
}

fn decode_person(record: &PersonRecord, canvas_width: u32, canvas_height: u32) -> Pose {
    let mut pose = Pose::new(canvas_width, canvas_height);
    for (i, triple) in record.pose_keypoints_2d.chunks_exact(3).enumerate() {
        let Some(joint) = Joint::from_index(i) else {
            break;
        };
        if triple[2] > 0.0 {
            pose.body[joint as usize] = Some(Point::new(triple[0], triple[1]));
        }
    }
    pose.face = triples_to_points(&record.face_keypoints_2d);
    pose.left_hand = triples_to_points(&record.hand_left_keypoints_2d);
    pose.right_hand = triples_to_points(&record.hand_right_keypoints_2d);
    pose.left_foot = triples_to_points(&record.foot_left_keypoints_2d);
    pose.right_foot = triples_to_points(&record.foot_right_keypoints_2d);
    pose
}

fn encode_person(pose: &Pose) -> PersonRecord {
    PersonRecord {
        pose_keypoints_2d: points_to_triples(&pose.body),
        face_keypoints_2d: points_to_triples(&pose.face),
        hand_left_keypoints_2d: points_to_triples(&pose.left_hand),
        hand_right_keypoints_2d: points_to_triples(&pose.right_hand),
        foot_left_keypoints_2d: points_to_triples(&pose.left_foot),
        foot_right_keypoints_2d: points_to_triples(&pose.right_foot),
    }
}
