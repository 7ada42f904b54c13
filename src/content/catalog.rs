use crate::{Error, Result};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

const CRISIS_LEVELS: [(&str, &str); 6] = [
    ("Basic Emergency", "basic_emer1.png"),
    ("Health Crisis", "health_crisis1.png"),
    ("Job Loss", "job_loss1.jpg"),
    ("Financial Debt", "fin_debt1.jpg"),
    ("Family Emergency", "family_emer1.png"),
    ("Natural Disaster", "natural_disas1.png"),
];

/// Emergency theme for a simulated scenario, 1 through 6.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CrisisLevel(u8);

impl CrisisLevel {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = CRISIS_LEVELS.len() as u8;

    pub fn new(level: i64) -> Option<Self> {
        u8::try_from(level)
            .ok()
            .filter(|l| (Self::MIN..=Self::MAX).contains(l))
            .map(Self)
    }

    pub fn all() -> impl Iterator<Item = CrisisLevel> {
        (Self::MIN..=Self::MAX).map(Self)
    }

    pub fn label(self) -> &'static str {
        CRISIS_LEVELS[usize::from(self.0 - 1)].0
    }

    pub fn image_file(self) -> &'static str {
        CRISIS_LEVELS[usize::from(self.0 - 1)].1
    }
}

impl FromStr for CrisisLevel {
    type Err = Error;

    /// Digits only: signs and surrounding whitespace are rejected.
    fn from_str(s: &str) -> Result<Self> {
        Some(s)
            .filter(|s| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit()))
            .and_then(|s| s.parse::<u8>().ok())
            .and_then(|l| Self::new(i64::from(l)))
            .ok_or_else(|| Error::invalid_input(format!("Invalid crisis level: {:?}", s)))
    }
}

impl fmt::Display for CrisisLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.0, self.label())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CurriculumLevel {
    Beginner,
    Intermediate,
    Advanced,
}

/// Title and one-line summary of a lesson the client can ask to generate.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LessonStub {
    pub title: &'static str,
    pub description: &'static str,
}

const fn stub(title: &'static str, description: &'static str) -> LessonStub {
    LessonStub { title, description }
}

const BEGINNER: [LessonStub; 5] = [
    stub(
        "Understanding Emergencies",
        "Learn what counts as an emergency and how to stay calm when one happens.",
    ),
    stub(
        "Building an Emergency Fund",
        "Start saving small amounts regularly so you are ready for unexpected costs.",
    ),
    stub(
        "Basic First Aid",
        "Simple first aid steps for cuts, burns and fevers at home or at work.",
    ),
    stub(
        "Keeping Important Documents Safe",
        "Protect identity papers, bank records and land documents from loss or damage.",
    ),
    stub(
        "Emergency Contacts",
        "Build a list of people and services you can call for help in a crisis.",
    ),
];

const INTERMEDIATE: [LessonStub; 5] = [
    stub(
        "Managing a Health Crisis",
        "Plan for medical costs and find public health schemes you can rely on.",
    ),
    stub(
        "Coping With Job Loss",
        "Steps to protect your income and find new work after losing a job.",
    ),
    stub(
        "Budgeting Under Pressure",
        "Separate needs from wants and stretch your money when income drops.",
    ),
    stub(
        "Understanding Loans and Debt",
        "Compare lenders, interest rates and repayment plans before you borrow.",
    ),
    stub(
        "Insurance Basics",
        "How health, crop and life insurance can protect your family and business.",
    ),
];

const ADVANCED: [LessonStub; 5] = [
    stub(
        "Disaster Preparedness Planning",
        "Prepare your home and business for floods, droughts and storms.",
    ),
    stub(
        "Recovering From Financial Debt",
        "Negotiate with lenders and build a realistic plan to become debt free.",
    ),
    stub(
        "Diversifying Your Income",
        "Add new income sources so one setback does not stop your earnings.",
    ),
    stub(
        "Community Support Networks",
        "Use self-help groups and cooperatives to share risk and resources.",
    ),
    stub(
        "Long-Term Resilience",
        "Set goals, track savings and review your crisis plan every year.",
    ),
];

impl CurriculumLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Advanced => "advanced",
        }
    }

    pub fn lessons(self) -> &'static [LessonStub] {
        match self {
            Self::Beginner => &BEGINNER,
            Self::Intermediate => &INTERMEDIATE,
            Self::Advanced => &ADVANCED,
        }
    }
}

impl FromStr for CurriculumLevel {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "beginner" => Ok(Self::Beginner),
            "intermediate" => Ok(Self::Intermediate),
            "advanced" => Ok(Self::Advanced),
            _ => Err(Error::invalid_input(format!("Invalid curriculum level: {}", s))),
        }
    }
}

impl fmt::Display for CurriculumLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    #[rstest]
    #[case(1, "Basic Emergency", "basic_emer1.png")]
    #[case(2, "Health Crisis", "health_crisis1.png")]
    #[case(3, "Job Loss", "job_loss1.jpg")]
    #[case(4, "Financial Debt", "fin_debt1.jpg")]
    #[case(5, "Family Emergency", "family_emer1.png")]
    #[case(6, "Natural Disaster", "natural_disas1.png")]
    fn test_crisis_level_table(#[case] n: i64, #[case] label: &str, #[case] image: &str) {
        let level = CrisisLevel::new(n).unwrap();
        assert_eq!(level.label(), label);
        assert_eq!(level.image_file(), image);
        assert_eq!(n.to_string().parse::<CrisisLevel>().unwrap(), level);
    }

    #[rstest]
    #[case(0)]
    #[case(7)]
    #[case(-1)]
    #[case(256 + 1)]
    fn test_crisis_level_out_of_range(#[case] n: i64) {
        assert_eq!(CrisisLevel::new(n), None);
    }

    #[test]
    fn test_crisis_level_from_str() {
        assert_eq!("3".parse::<CrisisLevel>().unwrap().label(), "Job Loss");
        assert!("abc".parse::<CrisisLevel>().is_err());
        assert!("9".parse::<CrisisLevel>().is_err());
        assert_eq!(CrisisLevel::all().count(), 6);
    }

    #[rstest]
    #[case("+3")]
    #[case(" 3")]
    #[case("3 ")]
    #[case("")]
    #[case("-0")]
    #[case("300")]
    fn test_crisis_level_from_str_is_strict(#[case] raw: &str) {
        let err = raw.parse::<CrisisLevel>().unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)), "{err}");
    }

    #[test]
    fn test_curriculum_levels_have_five_lessons() {
        for level in [
            CurriculumLevel::Beginner,
            CurriculumLevel::Intermediate,
            CurriculumLevel::Advanced,
        ] {
            let lessons = level.lessons();
            assert_eq!(lessons.len(), 5, "{level}");
            assert!(
                lessons
                    .iter()
                    .all(|l| !l.title.is_empty() && !l.description.is_empty())
            );
        }
    }

    #[test]
    fn test_curriculum_level_parse() {
        assert_eq!(
            "Intermediate".parse::<CurriculumLevel>().unwrap(),
            CurriculumLevel::Intermediate
        );
        assert_eq!(CurriculumLevel::Advanced.to_string(), "advanced");
        assert!("expert".parse::<CurriculumLevel>().is_err());
    }
}
