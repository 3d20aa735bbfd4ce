//! Contextual damage modifiers supplied by the caller.
//!
//! The core never queries a clock, a weather service, or a karma ledger. The
//! caller resolves those into the enumerations below and passes them in through
//! [`ResolutionContext`] (world conditions) and the combatant's [`Alignment`].
//! Each enumeration maps to a multiplier for a given spell [`Element`].

use crate::combat::Element;

/// Day of the week. Each day empowers one element.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum DayOfWeek {
    #[default]
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl DayOfWeek {
    const BOOST: f64 = 1.1;

    /// Element empowered on this day.
    pub const fn element(self) -> Element {
        match self {
            DayOfWeek::Monday => Element::Dark,
            DayOfWeek::Tuesday => Element::Fire,
            DayOfWeek::Wednesday => Element::Water,
            DayOfWeek::Thursday => Element::Wind,
            DayOfWeek::Friday => Element::Earth,
            DayOfWeek::Saturday => Element::Lightning,
            DayOfWeek::Sunday => Element::Light,
        }
    }

    pub fn boost(self, element: Element) -> f64 {
        if element != Element::Neutral && self.element() == element {
            Self::BOOST
        } else {
            1.0
        }
    }
}

/// Period of the day.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum TimeOfDay {
    Dawn,
    #[default]
    Day,
    Dusk,
    Night,
}

impl TimeOfDay {
    pub fn boost(self, element: Element) -> f64 {
        match (self, element) {
            (TimeOfDay::Day, Element::Light) | (TimeOfDay::Night, Element::Dark) => 1.15,
            (TimeOfDay::Dawn, Element::Light) | (TimeOfDay::Dusk, Element::Dark) => 1.05,
            (TimeOfDay::Day, Element::Dark) | (TimeOfDay::Night, Element::Light) => 0.9,
            _ => 1.0,
        }
    }
}

/// Current weather.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Weather {
    #[default]
    Clear,
    Rain,
    Storm,
    Snow,
    Heatwave,
    Fog,
}

impl Weather {
    pub fn boost(self, element: Element) -> f64 {
        match (self, element) {
            (Weather::Rain, Element::Water) => 1.2,
            (Weather::Rain, Element::Fire) => 0.8,
            (Weather::Storm, Element::Lightning) => 1.25,
            (Weather::Storm, Element::Wind) => 1.1,
            (Weather::Snow, Element::Ice) => 1.2,
            (Weather::Snow, Element::Fire) => 0.9,
            (Weather::Heatwave, Element::Fire) => 1.2,
            (Weather::Heatwave, Element::Ice) => 0.8,
            (Weather::Fog, Element::Dark) => 1.1,
            (Weather::Fog, Element::Light) => 0.9,
            _ => 1.0,
        }
    }
}

/// Moral alignment of a combatant, derived from karma by the caller.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum Alignment {
    Good,
    #[default]
    Neutral,
    Evil,
}

impl Alignment {
    /// Karma at or above this value counts as good.
    pub const GOOD_THRESHOLD: i32 = 100;
    /// Karma at or below this value counts as evil.
    pub const EVIL_THRESHOLD: i32 = -100;

    pub fn from_karma(karma: i32) -> Self {
        if karma >= Self::GOOD_THRESHOLD {
            Alignment::Good
        } else if karma <= Self::EVIL_THRESHOLD {
            Alignment::Evil
        } else {
            Alignment::Neutral
        }
    }

    pub fn boost(self, element: Element) -> f64 {
        match (self, element) {
            (Alignment::Good, Element::Light) | (Alignment::Evil, Element::Dark) => 1.1,
            (Alignment::Good, Element::Dark) | (Alignment::Evil, Element::Light) => 0.9,
            _ => 1.0,
        }
    }
}

/// World conditions at resolution time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ResolutionContext {
    pub day: DayOfWeek,
    pub time_of_day: TimeOfDay,
    pub weather: Weather,
}

impl ResolutionContext {
    pub fn new(day: DayOfWeek, time_of_day: TimeOfDay, weather: Weather) -> Self {
        Self {
            day,
            time_of_day,
            weather,
        }
    }

    /// Product of the day, time-of-day, weather and alignment boosts for `element`.
    pub fn magic_multiplier(&self, element: Element, alignment: Alignment) -> f64 {
        self.day.boost(element)
            * self.time_of_day.boost(element)
            * self.weather.boost(element)
            * alignment.boost(element)
    }
}
