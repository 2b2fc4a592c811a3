//! Questionnaire answers.
//!
//! Every question is a closed enumeration. The serde name of each variant is
//! its stable key; `label()` is the display copy shown in the wizard.

use serde::{Deserialize, Serialize};

macro_rules! choices {
    (
        $(#[$meta:meta])*
        pub enum $name:ident ($question:literal) {
            $( $variant:ident = $key:literal => $label:literal, )+
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        pub enum $name {
            $( #[serde(rename = $key)] $variant, )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];
            pub const QUESTION: &'static str = $question;

            pub fn key(self) -> &'static str {
                match self {
                    $( $name::$variant => $key, )+
                }
            }

            pub fn label(self) -> &'static str {
                match self {
                    $( $name::$variant => $label, )+
                }
            }
        }
    };
}

choices! {
    pub enum AgeBracket ("Quanti anni hai?") {
        Under30 = "under_30" => "Meno di 30 anni",
        From30To45 = "30_45" => "30-45 anni",
        From45To60 = "45_60" => "45-60 anni",
        Over60 = "over_60" => "Oltre 60 anni",
    }
}

choices! {
    pub enum CapitalBracket ("Quanto capitale vuoi investire?") {
        Under5k = "under_5k" => "Meno di 5.000 €",
        From5kTo20k = "5k_20k" => "5.000 - 20.000 €",
        From20kTo100k = "20k_100k" => "20.000 - 100.000 €",
        Over100k = "over_100k" => "Oltre 100.000 €",
    }
}

choices! {
    pub enum HorizonBracket ("Per quanto tempo puoi lasciare investito il capitale?") {
        UpTo3Years = "up_to_3y" => "Meno di 3 anni",
        From3To5Years = "3_5y" => "3-5 anni",
        From5To10Years = "5_10y" => "5-10 anni",
        From10To20Years = "10_20y" => "10-20 anni",
        Over20Years = "over_20y" => "Oltre 20 anni",
    }
}

choices! {
    pub enum InvestmentGoal ("Qual è il tuo obiettivo principale?") {
        CapitalPreservation = "capital_preservation" => "Proteggere il capitale",
        Income = "income" => "Ottenere una rendita regolare",
        BalancedGrowth = "balanced_growth" => "Crescita bilanciata",
        WealthGrowth = "wealth_growth" => "Far crescere il patrimonio",
    }
}

choices! {
    /// Share of total wealth the investment represents.
    pub enum WealthShare ("Che percentuale del tuo patrimonio rappresenta questo investimento?") {
        Under10 = "under_10" => "Meno del 10%",
        From10To25 = "10_25" => "10-25%",
        From25To50 = "25_50" => "25-50%",
        Over50 = "over_50" => "Oltre il 50%",
    }
}

choices! {
    pub enum ExperienceLevel ("Che esperienza hai con gli investimenti?") {
        Beginner = "beginner" => "Principiante - Non ho mai investito",
        Basic = "basic" => "Base - Conosco i concetti fondamentali",
        Intermediate = "intermediate" => "Intermedio - Investo da qualche anno",
        Expert = "expert" => "Esperto - Gestisco portafogli complessi",
    }
}

choices! {
    /// Reaction to a 20% drawdown, from least to most tolerant.
    pub enum RiskTolerance ("Se il tuo investimento perdesse il 20% in un mese, cosa faresti?") {
        PanicSeller = "panic_seller" => "😰 Venderei immediatamente - Non sopporto le perdite",
        VeryWorried = "very_worried" => "😟 Sarei molto preoccupato - Probabilmente venderei",
        WorriedButHold = "worried_but_hold" => "😐 Sarei preoccupato ma manterrei - Capisco la volatilità",
        Opportunity = "opportunity" => "😊 Lo vedrei come opportunità - Comprerei di più se possibile",
        Calm = "calm" => "🚀 Sono tranquillo - È normale, compro ancora",
    }
}

choices! {
    pub enum IncomeStability ("Quanto è stabile il tuo reddito?") {
        VeryStable = "very_stable" => "Molto stabile",
        Stable = "stable" => "Stabile",
        Variable = "variable" => "Variabile",
        Precarious = "precarious" => "Precario o assente",
    }
}

choices! {
    pub enum EsgPreference ("Quanto è importante per te l'investimento sostenibile (ESG)?") {
        Required = "required" => "Fondamentale - Solo ESG",
        Preferred = "preferred" => "Preferibile, ma non obbligatorio",
        Indifferent = "indifferent" => "Indifferente",
    }
}

choices! {
    /// Time the user is willing to spend managing the portfolio.
    pub enum ManagementPreference ("Quanto tempo vuoi dedicare alla gestione?") {
        Zero = "zero" => "Nessuno - Compro e dimentico",
        Minimal = "minimal" => "Minimo - Un controllo all'anno",
        Moderate = "moderate" => "Moderato - Qualche ribilanciamento",
        High = "high" => "Alto - Mi piace gestire attivamente",
    }
}

/// One complete set of questionnaire answers.
///
/// Every field is mandatory; an incomplete or unknown answer fails to
/// deserialize and never reaches the recommender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UserAnswers {
    pub age: AgeBracket,
    pub capital: CapitalBracket,
    pub horizon: HorizonBracket,
    pub goal: InvestmentGoal,
    pub wealth_share: WealthShare,
    pub experience: ExperienceLevel,
    pub risk_tolerance: RiskTolerance,
    pub income_stability: IncomeStability,
    pub esg: EsgPreference,
    pub management: ManagementPreference,
}
