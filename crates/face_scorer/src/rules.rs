//! Additive rule sets, one per capture mode.
//!
//! Every real-time gate is at least as strict as its still-photo counterpart
//! and every real-time weight is no larger, so a real-time score never exceeds
//! the still-photo score for the same attributes.

use contracts::{CaptureMode, Emotion, FaceAttributes};
use tracing::trace;

/// `confidence * weight` when the emotion's confidence exceeds `gate`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EmotionRule {
    pub emotion: Emotion,
    pub gate: f32,
    pub weight: f32,
}

/// Still-photo facial-redness proxy
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RednessRule {
    /// Points per nose / cheek landmark
    pub per_landmark: f32,
    /// Confidence gate for Surprised / Confused flushing cues
    pub emotion_gate: f32,
    pub emotion_weight: f32,
    pub brightness_gate: f32,
    pub brightness_points: f32,
    pub cap: f32,
}

/// Fixed rule constants for one capture mode
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RuleSet {
    pub eyes_closed_gate: f32,
    pub eyes_closed_points: f32,
    pub eyes_ambiguous_gate: f32,
    pub eyes_ambiguous_points: f32,
    pub mouth_open_gate: f32,
    pub mouth_open_points: f32,
    pub emotions: [EmotionRule; 4],
    pub roll_limit: f32,
    pub roll_points: f32,
    pub pitch_limit: f32,
    pub pitch_points: f32,
    pub yaw_limit: f32,
    pub yaw_points: f32,
    /// Weight on the mean confidence when two or more emotion rules fired
    pub negative_combo_weight: Option<f32>,
    pub redness: Option<RednessRule>,
    pub multiplier: f32,
}

/// Continuous feed: stricter gates, dampened total
pub const REAL_TIME: RuleSet = RuleSet {
    eyes_closed_gate: 70.0,
    eyes_closed_points: 30.0,
    eyes_ambiguous_gate: 40.0,
    eyes_ambiguous_points: 15.0,
    mouth_open_gate: 75.0,
    mouth_open_points: 20.0,
    emotions: [
        EmotionRule {
            emotion: Emotion::Confused,
            gate: 70.0,
            weight: 0.25,
        },
        EmotionRule {
            emotion: Emotion::Surprised,
            gate: 70.0,
            weight: 0.2,
        },
        EmotionRule {
            emotion: Emotion::Disgusted,
            gate: 70.0,
            weight: 0.2,
        },
        EmotionRule {
            emotion: Emotion::Sad,
            gate: 70.0,
            weight: 0.2,
        },
    ],
    roll_limit: 15.0,
    roll_points: 15.0,
    pitch_limit: 20.0,
    pitch_points: 10.0,
    yaw_limit: 25.0,
    yaw_points: 10.0,
    negative_combo_weight: Some(0.1),
    redness: None,
    multiplier: 0.33,
};

/// Single deliberate photo: looser gates, amplified total
pub const STILL_PHOTO: RuleSet = RuleSet {
    eyes_closed_gate: 60.0,
    eyes_closed_points: 40.0,
    eyes_ambiguous_gate: 70.0,
    eyes_ambiguous_points: 20.0,
    mouth_open_gate: 70.0,
    mouth_open_points: 25.0,
    emotions: [
        EmotionRule {
            emotion: Emotion::Confused,
            gate: 50.0,
            weight: 0.4,
        },
        EmotionRule {
            emotion: Emotion::Surprised,
            gate: 60.0,
            weight: 0.3,
        },
        EmotionRule {
            emotion: Emotion::Disgusted,
            gate: 55.0,
            weight: 0.35,
        },
        EmotionRule {
            emotion: Emotion::Sad,
            gate: 60.0,
            weight: 0.25,
        },
    ],
    roll_limit: 15.0,
    roll_points: 20.0,
    pitch_limit: 20.0,
    pitch_points: 15.0,
    yaw_limit: 25.0,
    yaw_points: 15.0,
    negative_combo_weight: None,
    redness: Some(RednessRule {
        per_landmark: 5.0,
        emotion_gate: 70.0,
        emotion_weight: 0.2,
        brightness_gate: 80.0,
        brightness_points: 10.0,
        cap: 30.0,
    }),
    multiplier: 2.0,
};

impl RuleSet {
    pub fn for_mode(mode: CaptureMode) -> &'static RuleSet {
        match mode {
            CaptureMode::RealTime => &REAL_TIME,
            CaptureMode::StillPhoto => &STILL_PHOTO,
        }
    }

    /// Additive total before the mode multiplier
    pub fn raw_total(&self, attrs: &FaceAttributes) -> f32 {
        let eyes = self.eyes_points(attrs);
        let mouth = self.mouth_points(attrs);
        let emotions = self.emotion_points(attrs);
        let pose = self.pose_points(attrs);
        let redness = self.redness_points(attrs);

        trace!(eyes, mouth, emotions, pose, redness, "face rules evaluated");
        eyes + mouth + emotions + pose + redness
    }

    /// Final score: `clamp(round(raw * multiplier), 0, 100)`
    pub fn score(&self, attrs: &FaceAttributes) -> i32 {
        let amplified = (self.raw_total(attrs) * self.multiplier).round();
        amplified.clamp(0.0, 100.0) as i32
    }

    fn eyes_points(&self, attrs: &FaceAttributes) -> f32 {
        let Some(eyes) = attrs.eyes_open else {
            return 0.0;
        };
        if !eyes.value && eyes.confidence > self.eyes_closed_gate {
            self.eyes_closed_points
        } else if eyes.confidence < self.eyes_ambiguous_gate {
            self.eyes_ambiguous_points
        } else {
            0.0
        }
    }

    fn mouth_points(&self, attrs: &FaceAttributes) -> f32 {
        match attrs.mouth_open {
            Some(mouth) if mouth.value && mouth.confidence > self.mouth_open_gate => {
                self.mouth_open_points
            }
            _ => 0.0,
        }
    }

    fn emotion_points(&self, attrs: &FaceAttributes) -> f32 {
        let fired: Vec<(f32, f32)> = self
            .emotions
            .iter()
            .map(|rule| (attrs.emotion(rule.emotion), rule.weight, rule.gate))
            .filter(|&(confidence, _, gate)| confidence > gate)
            .map(|(confidence, weight, _)| (confidence, weight))
            .collect();

        let weighted: f32 = fired.iter().map(|(c, w)| c * w).sum();

        let combo = match self.negative_combo_weight {
            Some(weight) if fired.len() >= 2 => {
                let mean = fired.iter().map(|(c, _)| c).sum::<f32>() / fired.len() as f32;
                mean * weight
            }
            _ => 0.0,
        };

        weighted + combo
    }

    fn pose_points(&self, attrs: &FaceAttributes) -> f32 {
        let Some(pose) = attrs.pose else {
            return 0.0;
        };
        let mut points = 0.0;
        if pose.roll.abs() > self.roll_limit {
            points += self.roll_points;
        }
        if pose.pitch.abs() > self.pitch_limit {
            points += self.pitch_points;
        }
        if pose.yaw.abs() > self.yaw_limit {
            points += self.yaw_points;
        }
        points
    }

    fn redness_points(&self, attrs: &FaceAttributes) -> f32 {
        let Some(rule) = self.redness else {
            return 0.0;
        };

        let landmarks = attrs
            .landmarks
            .iter()
            .filter(|l| l.is_redness_region())
            .count() as f32
            * rule.per_landmark;

        let flushing: f32 = [Emotion::Surprised, Emotion::Confused]
            .into_iter()
            .map(|e| attrs.emotion(e))
            .filter(|&c| c > rule.emotion_gate)
            .map(|c| c * rule.emotion_weight)
            .sum();

        let brightness = match attrs.quality {
            Some(q) if q.brightness > rule.brightness_gate => rule.brightness_points,
            _ => 0.0,
        };

        (landmarks + flushing + brightness).min(rule.cap)
    }
}
