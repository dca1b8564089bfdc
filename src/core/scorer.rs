//! Looking-down score from face landmarker blendshapes

use crate::types::{Blendshape, FaceBlendshapes, FaceFrame};
use crate::{EYE_LOOK_DOWN_LEFT, EYE_LOOK_DOWN_RIGHT};

/// Per-frame face scoring, one score in [0, 1] per usable face
pub trait FaceScorer {
    fn score(&self, frame: &FaceFrame) -> Vec<f64>;
}

/// Mean of the two `eyeLookDown*` blendshapes
#[derive(Debug, Clone, Default)]
pub struct BlendshapeScorer;

impl BlendshapeScorer {
    pub fn new() -> Self {
        Self
    }

    /// Score one face, None if either eye category is missing
    pub fn score_face(&self, face: &FaceBlendshapes) -> Option<f64> {
        let left = find(&face.blendshapes, EYE_LOOK_DOWN_LEFT)?;
        let right = find(&face.blendshapes, EYE_LOOK_DOWN_RIGHT)?;
        Some((left + right) / 2.0)
    }
}

impl FaceScorer for BlendshapeScorer {
    fn score(&self, frame: &FaceFrame) -> Vec<f64> {
        frame
            .faces
            .iter()
            .filter_map(|face| self.score_face(face))
            .collect()
    }
}

/// Name match wins; falls back to the landmarker's fixed category index
fn find(blendshapes: &[Blendshape], (index, name): (usize, &str)) -> Option<f64> {
    blendshapes
        .iter()
        .find(|b| b.category_name.as_deref() == Some(name))
        .or_else(|| blendshapes.iter().find(|b| b.category_name.is_none() && b.index == Some(index)))
        .map(|b| b.score)
}

/// Single-subject policy: the first face, or absent
pub fn select_subject(scores: &[f64]) -> Option<f64> {
    scores.first().copied()
}
