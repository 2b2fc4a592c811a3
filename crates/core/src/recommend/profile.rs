use crate::domain::answers::{
    CapitalBracket, EsgPreference, ExperienceLevel, ManagementPreference, UserAnswers,
};

/// Largest holding count a user at this experience level is shown.
pub fn max_components(experience: ExperienceLevel) -> usize {
    match experience {
        ExperienceLevel::Beginner => 1,
        ExperienceLevel::Basic => 3,
        ExperienceLevel::Intermediate => 6,
        ExperienceLevel::Expert => 10,
    }
}

/// Hard limits and soft preferences about how many instruments to hold.
///
/// `single_only` excludes multi-holding portfolios outright; the other flags
/// only move scores.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HoldingProfile {
    pub max_components: usize,
    pub single_only: bool,
    pub esg_required: bool,
    pub prefers_low_touch: bool,
    pub capital_favors_single: bool,
    pub capital_favors_multi: bool,
}

impl HoldingProfile {
    pub fn from_answers(answers: &UserAnswers) -> Self {
        let no_management = answers.management == ManagementPreference::Zero;
        let small_capital = answers.capital == CapitalBracket::Under5k;
        let seasoned = matches!(
            answers.experience,
            ExperienceLevel::Intermediate | ExperienceLevel::Expert
        );

        Self {
            max_components: max_components(answers.experience),
            single_only: no_management && small_capital && !seasoned,
            esg_required: answers.esg == EsgPreference::Required,
            prefers_low_touch: matches!(
                answers.management,
                ManagementPreference::Zero | ManagementPreference::Minimal
            ),
            capital_favors_single: matches!(
                answers.capital,
                CapitalBracket::Under5k | CapitalBracket::From5kTo20k
            ),
            capital_favors_multi: answers.capital == CapitalBracket::Over100k,
        }
    }
}
