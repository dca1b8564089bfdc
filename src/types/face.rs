//! Face landmarker output, as consumed by the scorer

use serde::{Deserialize, Serialize};

/// One blendshape category of one face
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Blendshape {
    /// Position in the landmarker's category list
    #[serde(default)]
    pub index: Option<usize>,
    /// Category name, e.g. `eyeLookDownLeft`
    #[serde(default)]
    pub category_name: Option<String>,
    pub score: f64,
}

impl Blendshape {
    pub fn new(index: usize, category_name: &str, score: f64) -> Self {
        Self {
            index: Some(index),
            category_name: Some(category_name.to_string()),
            score,
        }
    }
}

/// Blendshapes of one detected face
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FaceBlendshapes {
    #[serde(default)]
    pub blendshapes: Vec<Blendshape>,
}

/// Everything the landmarker found in one video frame
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FaceFrame {
    #[serde(default)]
    pub faces: Vec<FaceBlendshapes>,
}

impl FaceFrame {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn single(blendshapes: Vec<Blendshape>) -> Self {
        Self {
            faces: vec![FaceBlendshapes { blendshapes }],
        }
    }
}
