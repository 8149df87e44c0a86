//! Archetypal player profiles and the catalogs sessions draw from.

use rand::Rng;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::SimError;

/// Game speed ladder, slowest first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SpeedPref {
    Slow,
    Normal,
    Fast,
    Turbo,
}

impl SpeedPref {
    pub const LADDER: [Self; 4] = [Self::Slow, Self::Normal, Self::Fast, Self::Turbo];

    /// Score multiplier awarded for correct answers at this speed.
    #[must_use]
    pub const fn multiplier(self) -> f64 {
        match self {
            Self::Slow => 0.6,
            Self::Normal => 1.0,
            Self::Fast => 1.4,
            Self::Turbo => 1.8,
        }
    }

    #[must_use]
    pub const fn slower(self) -> Option<Self> {
        match self {
            Self::Slow => None,
            Self::Normal => Some(Self::Slow),
            Self::Fast => Some(Self::Normal),
            Self::Turbo => Some(Self::Fast),
        }
    }

    #[must_use]
    pub const fn faster(self) -> Option<Self> {
        match self {
            Self::Slow => Some(Self::Normal),
            Self::Normal => Some(Self::Fast),
            Self::Fast => Some(Self::Turbo),
            Self::Turbo => None,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Slow => "slow",
            Self::Normal => "normal",
            Self::Fast => "fast",
            Self::Turbo => "turbo",
        }
    }
}

impl fmt::Display for SpeedPref {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScreenSize {
    Small,
    Medium,
    Large,
}

impl ScreenSize {
    #[must_use]
    pub const fn is_small(self) -> bool {
        matches!(self, Self::Small)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Device {
    #[serde(rename = "iPhone")]
    IPhone,
    #[serde(rename = "iPad")]
    IPad,
    Android,
    AndroidTab,
}

impl Device {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::IPhone => "iPhone",
            Self::IPad => "iPad",
            Self::Android => "Android",
            Self::AndroidTab => "AndroidTab",
        }
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    Portrait,
    Landscape,
}

impl Orientation {
    #[must_use]
    pub const fn flipped(self) -> Self {
        match self {
            Self::Portrait => Self::Landscape,
            Self::Landscape => Self::Portrait,
        }
    }

    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Portrait => "portrait",
            Self::Landscape => "landscape",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DesktopArchetype {
    Beginner,
    Casual,
    Gamer,
    Expert,
}

impl DesktopArchetype {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Casual => "casual",
            Self::Gamer => "gamer",
            Self::Expert => "expert",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MobileArchetype {
    PhonePortrait,
    PhoneLandscape,
    TabletPortrait,
    TabletLandscape,
    AndroidPhone,
    AndroidTablet,
}

impl MobileArchetype {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::PhonePortrait => "phone_portrait",
            Self::PhoneLandscape => "phone_landscape",
            Self::TabletPortrait => "tablet_portrait",
            Self::TabletLandscape => "tablet_landscape",
            Self::AndroidPhone => "android_phone",
            Self::AndroidTablet => "android_tablet",
        }
    }

    /// Orientation the player holds the device in when a session starts.
    #[must_use]
    pub const fn starting_orientation(self) -> Orientation {
        match self {
            Self::PhoneLandscape | Self::TabletLandscape => Orientation::Landscape,
            _ => Orientation::Portrait,
        }
    }
}

/// Common surface shared by desktop and mobile profiles.
pub trait Profile {
    /// Archetype tag used in logs and reports.
    fn label(&self) -> &'static str;

    /// Reject values that would make the player model meaningless.
    ///
    /// # Errors
    ///
    /// Returns an error when a trait lies outside its documented range.
    fn validate(&self) -> Result<(), SimError>;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesktopProfile {
    #[serde(rename = "type")]
    pub kind: DesktopArchetype,
    pub skill: f64,
    pub patience: u32,
    pub speed_pref: SpeedPref,
}

impl Profile for DesktopProfile {
    fn label(&self) -> &'static str {
        self.kind.label()
    }

    fn validate(&self) -> Result<(), SimError> {
        ensure_unit(self.label(), "skill", self.skill)?;
        ensure_patience(self.label(), self.patience)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MobileProfile {
    #[serde(rename = "type")]
    pub kind: MobileArchetype,
    pub device: Device,
    pub skill: f64,
    pub patience: u32,
    pub touch_accuracy: f64,
    pub screen_size: ScreenSize,
}

impl Profile for MobileProfile {
    fn label(&self) -> &'static str {
        self.kind.label()
    }

    fn validate(&self) -> Result<(), SimError> {
        ensure_unit(self.label(), "skill", self.skill)?;
        ensure_unit(self.label(), "touch_accuracy", self.touch_accuracy)?;
        ensure_patience(self.label(), self.patience)
    }
}

fn ensure_unit(profile: &str, field: &'static str, value: f64) -> Result<(), SimError> {
    if (0.0..=1.0).contains(&value) {
        Ok(())
    } else {
        Err(SimError::ProfileRange {
            profile: profile.to_string(),
            field,
            min: 0.0,
            max: 1.0,
            value,
        })
    }
}

fn ensure_patience(profile: &str, patience: u32) -> Result<(), SimError> {
    if patience == 0 {
        return Err(SimError::ZeroPatience {
            profile: profile.to_string(),
        });
    }
    Ok(())
}

/// Validated, non-empty list of profiles. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProfileCatalog<P>(Vec<P>);

impl<P: Profile> ProfileCatalog<P> {
    /// Build a catalog, validating every entry.
    ///
    /// # Errors
    ///
    /// Returns an error if the list is empty or any profile is out of range.
    pub fn new(profiles: Vec<P>) -> Result<Self, SimError> {
        if profiles.is_empty() {
            return Err(SimError::EmptyCatalog);
        }
        for profile in &profiles {
            profile.validate()?;
        }
        Ok(Self(profiles))
    }

    /// Load a catalog from a JSON array of profiles.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON cannot be parsed or fails validation.
    pub fn from_json(json: &str) -> Result<Self, SimError>
    where
        P: DeserializeOwned,
    {
        let profiles: Vec<P> = serde_json::from_str(json)?;
        Self::new(profiles)
    }

    /// Draw a profile uniformly at random. A single-entry catalog consumes
    /// no randomness.
    pub fn pick<R: Rng + ?Sized>(&self, rng: &mut R) -> &P {
        match self.0.as_slice() {
            [only] => only,
            profiles => &profiles[rng.gen_range(0..profiles.len())],
        }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, P> {
        self.0.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a, P> IntoIterator for &'a ProfileCatalog<P> {
    type Item = &'a P;
    type IntoIter = std::slice::Iter<'a, P>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Built-in desktop archetypes.
#[must_use]
pub fn desktop_profiles() -> Vec<DesktopProfile> {
    let profile = |kind, skill, patience, speed_pref| DesktopProfile {
        kind,
        skill,
        patience,
        speed_pref,
    };
    vec![
        profile(DesktopArchetype::Beginner, 0.3, 5, SpeedPref::Slow),
        profile(DesktopArchetype::Casual, 0.6, 8, SpeedPref::Normal),
        profile(DesktopArchetype::Gamer, 0.8, 12, SpeedPref::Fast),
        profile(DesktopArchetype::Expert, 0.95, 15, SpeedPref::Turbo),
    ]
}

/// Built-in mobile archetypes.
#[must_use]
pub fn mobile_profiles() -> Vec<MobileProfile> {
    let profile = |kind, device, skill, patience, touch_accuracy, screen_size| MobileProfile {
        kind,
        device,
        skill,
        patience,
        touch_accuracy,
        screen_size,
    };
    vec![
        profile(MobileArchetype::PhonePortrait, Device::IPhone, 0.5, 6, 0.8, ScreenSize::Small),
        profile(MobileArchetype::PhoneLandscape, Device::IPhone, 0.6, 7, 0.9, ScreenSize::Small),
        profile(MobileArchetype::TabletPortrait, Device::IPad, 0.7, 9, 0.95, ScreenSize::Large),
        profile(MobileArchetype::TabletLandscape, Device::IPad, 0.8, 10, 0.95, ScreenSize::Large),
        profile(MobileArchetype::AndroidPhone, Device::Android, 0.55, 6, 0.75, ScreenSize::Medium),
        profile(MobileArchetype::AndroidTablet, Device::AndroidTab, 0.75, 8, 0.9, ScreenSize::Large),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;

    #[test]
    fn builtin_catalogs_validate() {
        assert_eq!(ProfileCatalog::new(desktop_profiles()).unwrap().len(), 4);
        assert_eq!(ProfileCatalog::new(mobile_profiles()).unwrap().len(), 6);
    }

    #[test]
    fn empty_catalog_is_rejected() {
        let err = ProfileCatalog::<DesktopProfile>::new(Vec::new()).unwrap_err();
        assert!(matches!(err, SimError::EmptyCatalog));
    }

    #[test]
    fn out_of_range_profiles_are_rejected() {
        let mut profiles = desktop_profiles();
        profiles[0].skill = 1.4;
        let err = ProfileCatalog::new(profiles).unwrap_err();
        assert!(matches!(err, SimError::ProfileRange { field: "skill", .. }));

        let mut mobile = mobile_profiles();
        mobile[2].patience = 0;
        let err = ProfileCatalog::new(mobile).unwrap_err();
        assert!(matches!(err, SimError::ZeroPatience { .. }));
    }

    #[test]
    fn catalog_parses_json() {
        let json = r#"[
            { "type": "gamer", "skill": 0.7, "patience": 11, "speed_pref": "fast" }
        ]"#;
        let catalog = ProfileCatalog::<DesktopProfile>::from_json(json).unwrap();
        let gamer = catalog.iter().next().unwrap();
        assert_eq!(gamer.kind, DesktopArchetype::Gamer);
        assert_eq!(gamer.speed_pref, SpeedPref::Fast);

        let mobile = r#"[
            { "type": "phone_landscape", "device": "iPhone", "skill": 0.6,
              "patience": 7, "touch_accuracy": 0.9, "screen_size": "small" }
        ]"#;
        let catalog = ProfileCatalog::<MobileProfile>::from_json(mobile).unwrap();
        assert_eq!(catalog.iter().next().unwrap().device, Device::IPhone);
    }

    #[test]
    fn malformed_json_reports_parse_error() {
        let err = ProfileCatalog::<DesktopProfile>::from_json("{").unwrap_err();
        assert!(matches!(err, SimError::CatalogParse(_)));
    }

    #[test]
    fn speed_ladder_steps_are_bounded() {
        assert_eq!(SpeedPref::Slow.slower(), None);
        assert_eq!(SpeedPref::Turbo.faster(), None);
        assert_eq!(SpeedPref::Fast.slower(), Some(SpeedPref::Normal));
        assert!(SpeedPref::LADDER.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn landscape_archetypes_start_in_landscape() {
        assert_eq!(
            MobileArchetype::TabletLandscape.starting_orientation(),
            Orientation::Landscape
        );
        assert_eq!(
            MobileArchetype::AndroidPhone.starting_orientation(),
            Orientation::Portrait
        );
    }

    #[test]
    fn pick_uses_injected_source() {
        let catalog = ProfileCatalog::new(desktop_profiles()).unwrap();
        let mut rng = StepRng::new(0, 0);
        assert_eq!(catalog.pick(&mut rng).kind, DesktopArchetype::Beginner);
    }

    #[test]
    fn single_profile_catalog_skips_the_draw() {
        let gamer: Vec<DesktopProfile> = desktop_profiles()
            .into_iter()
            .filter(|p| p.kind == DesktopArchetype::Gamer)
            .collect();
        let catalog = ProfileCatalog::new(gamer).unwrap();
        // A saturated source would stall rejection sampling.
        let mut rng = StepRng::new(u64::MAX, 0);
        assert_eq!(catalog.pick(&mut rng).kind, DesktopArchetype::Gamer);
    }
}
