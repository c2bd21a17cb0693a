//! Fixed guidance per level.

use contracts::IntoxicationLevel;

/// Three recommendations for `level`, each carrying `floor(composite)`
pub fn recommendations(level: IntoxicationLevel, composite: f32) -> Vec<String> {
    let score = composite.floor() as i32;
    match level {
        IntoxicationLevel::Normal => vec![
            format!("Score {score}: you appear to be in good condition."),
            format!("Score {score}: if you keep drinking, drink water in between."),
            format!("Score {score}: use public transport or a designated driver to get home."),
        ],
        IntoxicationLevel::Slightly => vec![
            format!("Score {score}: mild signs of intoxication, take care."),
            format!("Score {score}: take a break and drink some water."),
            format!("Score {score}: do not drive."),
        ],
        IntoxicationLevel::Moderate => vec![
            format!("Score {score}: moderate intoxication, this is risky."),
            format!("Score {score}: stop drinking now."),
            format!("Score {score}: rest somewhere safe with a companion."),
        ],
        IntoxicationLevel::Heavy => vec![
            format!("Score {score}: heavy intoxication, this is dangerous."),
            format!("Score {score}: seek medical help if you feel unwell."),
            format!("Score {score}: do not stay alone."),
        ],
    }
}
