//! Mapping from provider condition labels to the animation played behind
//! the current conditions.

/// Animation bundled with the app.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnimationAsset {
    Sunny,
    Cloudy,
    Rain,
    Storm,
}

impl AnimationAsset {
    /// Base name of the bundled animation file.
    pub fn asset_name(&self) -> &'static str {
        match self {
            AnimationAsset::Sunny => "sunny",
            AnimationAsset::Cloudy => "cloudy",
            AnimationAsset::Rain => "rain",
            AnimationAsset::Storm => "storm",
        }
    }
}

/// Pick the animation for a provider condition label.
///
/// Matching is case-insensitive. An absent label, and any label outside the
/// table (including labels the provider may add in the future), falls back
/// to `Sunny` so the screen always has something to play.
pub fn pick_animation(condition: Option<&str>) -> AnimationAsset {
    let Some(condition) = condition else {
        return AnimationAsset::Sunny;
    };

    match condition.to_lowercase().as_str() {
        "clouds" | "mist" | "smoke" | "haze" | "dust" | "fog" => AnimationAsset::Cloudy,
        "rain" | "drizzle" | "shower rain" => AnimationAsset::Rain,
        "thunderstorm" => AnimationAsset::Storm,
        "clear" => AnimationAsset::Sunny,
        _ => AnimationAsset::Sunny,
    }
}
