//! Static anthropometric data: body-proportion ratios and average heights
//! indexed by age and gender.
//!
//! Ratios come from an adult baseline plus one age-bracket override, then
//! fixed gender multipliers on the facial factors. The tables cover ages
//! 0..=20; older ages use the adult values.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// Binary gender as used by the anthropometric tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    Male,
    Female,
}

impl FromStr for Gender {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "male" => Ok(Gender::Male),
            "female" => Ok(Gender::Female),
            other => Err(Error::InvalidGender(other.to_string())),
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Gender::Male => "male",
            Gender::Female => "female",
        })
    }
}

/// Body and facial proportion ratios for one age/gender combination.
///
/// `head`..`leg` are fractions of total body height; the remaining fields
/// are unitless factors relative to the adult baseline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Proportions {
    pub head: f32,
    pub torso: f32,
    pub arm: f32,
    pub leg: f32,
    pub hand: f32,
    pub foot: f32,
    pub eye: f32,
    pub mouth: f32,
    pub jaw: f32,
    pub nose: f32,
    pub face_contour: f32,
}

impl Proportions {
    /// Per-field quotient `self / input`: the adjustment factors that turn a
    /// body with `input` proportions into one with `self` proportions.
    pub fn relative_to(&self, input: &Proportions) -> Proportions {
        Proportions {
            head: self.head / input.head,
            torso: self.torso / input.torso,
            arm: self.arm / input.arm,
            leg: self.leg / input.leg,
            hand: self.hand / input.hand,
            foot: self.foot / input.foot,
            eye: self.eye / input.eye,
            mouth: self.mouth / input.mouth,
            jaw: self.jaw / input.jaw,
            nose: self.nose / input.nose,
            face_contour: self.face_contour / input.face_contour,
        }
    }
}

/// Adult reference proportions.
const ADULT: Proportions = Proportions {
    head: 0.15,
    torso: 0.36,
    arm: 0.20,
    leg: 0.30,
    hand: 1.0,
    foot: 1.0,
    eye: 1.0,
    mouth: 1.0,
    jaw: 1.0,
    nose: 1.0,
    face_contour: 1.0,
};

struct AgeBracket {
    min: u32,
    max: u32,
    proportions: Proportions,
}

/// Overrides of the adult baseline, one bracket per growth phase.
/// Ages above the last bracket keep the adult values.
const AGE_BRACKETS: [AgeBracket; 6] = [
    AgeBracket {
        min: 0,
        max: 5,
        proportions: Proportions {
            head: 0.25,
            torso: 0.30,
            arm: 0.15,
            leg: 0.30,
            hand: 0.8,
            foot: 0.8,
            eye: 1.5,
            mouth: 1.2,
            jaw: 1.3,
            nose: 0.8,
            face_contour: 1.4,
        },
    },
    AgeBracket {
        min: 6,
        max: 7,
        proportions: Proportions {
            head: 0.23,
            torso: 0.32,
            arm: 0.17,
            leg: 0.29,
            hand: 0.85,
            foot: 0.85,
            eye: 1.4,
            mouth: 1.1,
            jaw: 1.2,
            nose: 0.85,
            face_contour: 1.3,
        },
    },
    AgeBracket {
        min: 8,
        max: 10,
        proportions: Proportions {
            head: 0.21,
            torso: 0.34,
            arm: 0.18,
            leg: 0.28,
            hand: 0.9,
            foot: 0.9,
            eye: 1.3,
            mouth: 1.1,
            jaw: 1.15,
            nose: 0.9,
            face_contour: 1.2,
        },
    },
    AgeBracket {
        min: 11,
        max: 13,
        proportions: Proportions {
            head: 0.19,
            torso: 0.35,
            arm: 0.19,
            leg: 0.27,
            hand: 1.0,
            foot: 1.0,
            eye: 1.2,
            mouth: 1.1,
            jaw: 1.05,
            nose: 1.0,
            face_contour: 1.1,
        },
    },
    AgeBracket {
        min: 14,
        max: 16,
        proportions: Proportions {
            head: 0.17,
            torso: 0.36,
            arm: 0.19,
            leg: 0.28,
            hand: 1.05,
            foot: 1.05,
            eye: 1.1,
            mouth: 1.1,
            jaw: 1.0,
            nose: 1.0,
            face_contour: 1.05,
        },
    },
    AgeBracket {
        min: 17,
        max: 19,
        proportions: Proportions {
            head: 0.17,
            torso: 0.36,
            arm: 0.20,
            leg: 0.29,
            hand: 1.1,
            foot: 1.1,
            eye: 1.0,
            mouth: 1.0,
            jaw: 1.0,
            nose: 1.0,
            face_contour: 1.05,
        },
    },
];

/// Average heights in centimeters for ages 1..=20.
/// Age 0 uses the age-1 value; ages above 20 use the adult (age-20) value.
const HEIGHT_MALE: [f32; 20] = [
    75.0, 87.0, 96.0, 102.0, 108.0, 115.0, 120.0, 125.0, 130.0, 137.0, 143.0, 149.0, 156.0, 163.0,
    169.0, 173.0, 175.0, 176.0, 176.0, 176.0,
];
const HEIGHT_FEMALE: [f32; 20] = [
    74.0, 85.0, 95.0, 100.0, 106.0, 113.0, 118.0, 123.0, 129.0, 135.0, 141.0, 148.0, 155.0, 160.0,
    163.0, 164.0, 164.0, 165.0, 165.0, 165.0,
];

/// Proportion ratios for the given age and gender.
pub fn proportions(age: u32, gender: Gender) -> Proportions {
    let mut p = ADULT;
    for bracket in &AGE_BRACKETS {
        if age >= bracket.min && age <= bracket.max {
            p = bracket.proportions;
            break;
        }
    }
    if gender == Gender::Female {
        p.jaw *= 0.95;
        p.mouth *= 1.1;
        p.face_contour *= 1.05;
    }
    p
}

/// Average height in centimeters for the given age and gender.
pub fn height_cm(age: u32, gender: Gender) -> f32 {
    let table = match gender {
        Gender::Male => &HEIGHT_MALE,
        Gender::Female => &HEIGHT_FEMALE,
    };
    let index = age.clamp(1, 20) as usize - 1;
    table[index]
}

/// A full anthropometric profile: proportion ratios plus absolute height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Profile {
    pub proportions: Proportions,
    pub height_cm: f32,
}

/// Look up the profile for the given age and gender.
pub fn profile(age: u32, gender: Gender) -> Profile {
    Profile {
        proportions: proportions(age, gender),
        height_cm: height_cm(age, gender),
    }
}
