//! Tunable layout constants.

/// Tuning knobs for layout classification and decoration.
///
/// The defaults reproduce observed behavior on real LLM output; tests pin
/// individual fields to force a deterministic path.
#[derive(Debug, Clone)]
pub struct LayoutOptions {
    /// Probability that a default-layout slide attempts image decoration.
    pub image_probability: f64,

    /// Given decoration, probability of a foreground picture layout rather
    /// than a full-bleed background image.
    pub foreground_probability: f64,

    /// Fraction of step items allowed to lack the ">> " marker before the
    /// slide stops counting as a process. LLMs routinely drop the marker on
    /// one item out of several.
    pub step_marker_slack: f64,

    /// Minimum number of steps for a process layout.
    pub min_steps: usize,

    /// Maximum number of steps for a process layout.
    pub max_steps: usize,

    /// Fraction of bullet items that must carry an "[[icon]]" marker for
    /// the icon-grid layout. 1.0 means every item.
    pub icon_coverage: f64,

    /// Icon image height and width, in inches.
    pub icon_size_in: f64,

    /// Colored backdrop square behind each icon, in inches.
    pub icon_bg_size_in: f64,

    /// How many photo candidates to choose between.
    pub max_photo_candidates: usize,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            image_probability: 1.0 / 3.0,
            foreground_probability: 0.8,
            step_marker_slack: 0.25,
            min_steps: 3,
            max_steps: 6,
            icon_coverage: 1.0,
            icon_size_in: 0.8,
            icon_bg_size_in: 1.0,
            max_photo_candidates: 3,
        }
    }
}
