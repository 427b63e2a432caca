//! Enumerated survey categories and their presentation lookup tables.
//!
//! Charts never branch on raw label strings: a label is parsed once into one
//! of these enums and colours, glyphs and captions come from the variant.

use super::ordering::{self, CanonicalOrdering, AGREEMENT_LEVELS, LONELINESS_LEVELS};

/// Fill used for categories that are not part of the active selection.
pub const INACTIVE_FILL: &str = "#404040";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Loneliness {
    AlwaysOrOften,
    Sometimes,
    RarelyOrNever,
}

impl Loneliness {
    pub const ALL: [Loneliness; 3] = [
        Loneliness::AlwaysOrOften,
        Loneliness::Sometimes,
        Loneliness::RarelyOrNever,
    ];

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|level| level.label() == label)
    }

    /// Survey wording, as it appears in the dataset.
    pub fn label(self) -> &'static str {
        match self {
            Loneliness::AlwaysOrOften => LONELINESS_LEVELS[0],
            Loneliness::Sometimes => LONELINESS_LEVELS[1],
            Loneliness::RarelyOrNever => LONELINESS_LEVELS[2],
        }
    }

    pub fn short_label(self) -> &'static str {
        match self {
            Loneliness::AlwaysOrOften => "Always or often lonely",
            Loneliness::Sometimes => "Sometimes lonely",
            Loneliness::RarelyOrNever => "Rarely or never lonely",
        }
    }

    pub fn color(self) -> &'static str {
        match self {
            Loneliness::AlwaysOrOften => "#409AF0",
            Loneliness::Sometimes => "#D4E8FE",
            Loneliness::RarelyOrNever => "#FFC200",
        }
    }

    pub fn heart(self) -> &'static str {
        match self {
            Loneliness::AlwaysOrOften => "💙",
            Loneliness::Sometimes => "🤍",
            Loneliness::RarelyOrNever => "💛",
        }
    }

    /// CSS modifier for the tooltip accent colour.
    pub fn tone(self) -> &'static str {
        match self {
            Loneliness::AlwaysOrOften => "dark-blue",
            Loneliness::Sometimes => "blue",
            Loneliness::RarelyOrNever => "orange",
        }
    }

    pub fn mood(self) -> Mood {
        match self {
            Loneliness::AlwaysOrOften => Mood::Lonely,
            Loneliness::Sometimes => Mood::Average,
            Loneliness::RarelyOrNever => Mood::Happy,
        }
    }
}

/// Face glyph drawn on top of bars and scatter points.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mood {
    Happy,
    Average,
    Lonely,
}

impl Mood {
    /// Threshold scale over an isolation percentage: below 51 is happy,
    /// below 71 average, anything above lonely.
    pub fn for_share(percent: f64) -> Self {
        if percent < 51.0 {
            Mood::Happy
        } else if percent < 71.0 {
            Mood::Average
        } else {
            Mood::Lonely
        }
    }

    pub fn glyph(self) -> &'static str {
        match self {
            Mood::Happy => "😊",
            Mood::Average => "😐",
            Mood::Lonely => "😔",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum AgreementLevel {
    StronglyDisagree,
    Disagree,
    SlightlyDisagree,
    SlightlyAgree,
    Agree,
    StronglyAgree,
}

impl AgreementLevel {
    pub const ALL: [AgreementLevel; 6] = [
        AgreementLevel::StronglyDisagree,
        AgreementLevel::Disagree,
        AgreementLevel::SlightlyDisagree,
        AgreementLevel::SlightlyAgree,
        AgreementLevel::Agree,
        AgreementLevel::StronglyAgree,
    ];

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|level| level.label() == label)
    }

    pub fn label(self) -> &'static str {
        AGREEMENT_LEVELS[self as usize]
    }

    /// Palette slot of the distress scale, driven by theme variables.
    pub fn color(self) -> &'static str {
        match self {
            AgreementLevel::StronglyDisagree => "var(--pointFirst)",
            AgreementLevel::Disagree => "var(--pointSecond)",
            AgreementLevel::SlightlyDisagree => "var(--pointThird)",
            AgreementLevel::SlightlyAgree => "var(--pointFourth)",
            AgreementLevel::Agree => "var(--pointFifth)",
            AgreementLevel::StronglyAgree => "var(--pointSixth)",
        }
    }

    /// How agreeing with "I feel distressed over loneliness" reads in prose.
    pub fn loneliness_caption(self) -> &'static str {
        match self {
            AgreementLevel::StronglyDisagree => "Not lonely at all",
            AgreementLevel::Disagree => "A little lonely",
            AgreementLevel::SlightlyDisagree => "Somewhat lonely",
            AgreementLevel::SlightlyAgree => "Lonely",
            AgreementLevel::Agree => "Very lonely",
            AgreementLevel::StronglyAgree => "Extremely lonely",
        }
    }
}

/// Caption for a sankey node: agreement answers are rephrased, every other
/// attribute is shown verbatim.
pub fn sankey_caption(attribute: &str) -> &str {
    AgreementLevel::from_label(attribute)
        .map(AgreementLevel::loneliness_caption)
        .unwrap_or(attribute)
}

/// The sociological factor panels of the bidirectional page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FactorKind {
    Gender,
    Education,
    Urbanization,
    Immigration,
    Work,
}

impl FactorKind {
    pub const ALL: [FactorKind; 5] = [
        FactorKind::Gender,
        FactorKind::Education,
        FactorKind::Urbanization,
        FactorKind::Immigration,
        FactorKind::Work,
    ];

    /// Value of the `category` column for this factor.
    pub fn category(self) -> &'static str {
        match self {
            FactorKind::Gender => "gender",
            FactorKind::Education => "education",
            FactorKind::Urbanization => "urbanization",
            FactorKind::Immigration => "immigration",
            FactorKind::Work => "work",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            FactorKind::Gender => "Gender",
            FactorKind::Education => "Education",
            FactorKind::Urbanization => "Urbanization",
            FactorKind::Immigration => "Immigration",
            FactorKind::Work => "Work",
        }
    }

    pub fn ordering(self) -> CanonicalOrdering {
        match self {
            FactorKind::Gender => ordering::gender(),
            FactorKind::Education => ordering::education(),
            FactorKind::Urbanization => ordering::urbanization(),
            FactorKind::Immigration => ordering::immigration(),
            FactorKind::Work => ordering::work(),
        }
    }

    /// Panel height as a share of the factor column, in sevenths.
    pub fn height_share(self) -> f64 {
        match self {
            FactorKind::Education => 3.2 / 7.0,
            FactorKind::Work => 2.4 / 7.0,
            _ => 2.0 / 7.0,
        }
    }
}

/// Short axis label for a factor value. Unknown values fall back to the
/// value itself.
pub fn factor_tick_label(value: &str) -> &str {
    match value {
        "Men" => "Male",
        "Women" => "Female",
        "Bachelor's degree or higher" => "University",
        "College, CEGEP or other non-university certificate or diploma" => "College",
        "Apprenticeship or trades certificate or diploma" => "Trades",
        "Secondary (high) school diploma or equivalency certificate" => "High school",
        "No certificate, diploma or degree" => "No certificate",
        "Rural areas" => "Rural",
        "Urban areas" => "Urban",
        "Working at a paid job or business" => "Working",
        other => other,
    }
}
