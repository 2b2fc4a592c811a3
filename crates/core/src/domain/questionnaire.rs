use crate::domain::answers::{
    AgeBracket, CapitalBracket, EsgPreference, ExperienceLevel, HorizonBracket, IncomeStability,
    InvestmentGoal, ManagementPreference, RiskTolerance, WealthShare,
};
use serde::Serialize;

#[derive(Debug, Clone, Serialize)]
pub struct Question {
    /// Field name in `UserAnswers`.
    pub field: &'static str,
    pub text: &'static str,
    pub choices: Vec<Choice>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Choice {
    pub key: &'static str,
    pub label: &'static str,
}

macro_rules! question {
    ($field:literal, $ty:ty) => {
        Question {
            field: $field,
            text: <$ty>::QUESTION,
            choices: <$ty>::ALL
                .iter()
                .map(|c| Choice {
                    key: c.key(),
                    label: c.label(),
                })
                .collect(),
        }
    };
}

/// Wizard questions in display order.
pub fn questions() -> Vec<Question> {
    vec![
        question!("age", AgeBracket),
        question!("capital", CapitalBracket),
        question!("horizon", HorizonBracket),
        question!("goal", InvestmentGoal),
        question!("wealth_share", WealthShare),
        question!("experience", ExperienceLevel),
        question!("risk_tolerance", RiskTolerance),
        question!("income_stability", IncomeStability),
        question!("esg", EsgPreference),
        question!("management", ManagementPreference),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::answers::UserAnswers;
    use serde_json::{Map, Value};

    #[test]
    fn first_choices_form_valid_answers() {
        let mut obj = Map::new();
        for q in questions() {
            assert!(!q.choices.is_empty(), "question {} has no choices", q.field);
            obj.insert(q.field.to_string(), Value::from(q.choices[0].key));
        }
        let answers: UserAnswers = serde_json::from_value(Value::Object(obj)).unwrap();
        assert_eq!(answers.age, AgeBracket::Under30);
        assert_eq!(answers.management, ManagementPreference::Zero);
    }

    #[test]
    fn covers_every_answer_field() {
        assert_eq!(questions().len(), 10);
    }
}
