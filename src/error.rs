use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("invalid gender {0:?}: expected \"male\" or \"female\"")]
    InvalidGender(String),

    #[error("age {0} is out of range: expected 0..=120")]
    AgeOutOfRange(u32),

    #[error("input profile unresolved: age/gender neither declared nor estimable from the pose")]
    UnresolvedProfile,

    #[error("no support joint: none of ankles, knees, hips or neck is present")]
    NoSupportJoint,

    #[error("invalid document: {0}")]
    Format(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
