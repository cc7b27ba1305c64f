//! Detailed topology: 14 questions, with a separate evidence question and
//! attribution question for each pathway.

use super::{ask, classify, DecisionTree, Edge, Rule, Topology};
use crate::answers::AnswerSet;
use crate::registry::{Question, QuestionId, QuestionRegistry, ALL_OPTIONS, YES_NO};
use crate::types::{Answer, Classification, Position};
use std::sync::LazyLock;

use Answer::{Doubt, No, NotEnoughInformation as Nei, Yes};
use Classification::*;
use QuestionId::*;

/// Attribution questions in cascade order: metastasis, tumour, paraneoplastic.
pub const ATTRIBUTIONS: [QuestionId; 3] = [MetastasisLc, TumourLc, ParaneoplasticLc];

const OTHER_COD_NO_DOUBT: &[Answer] = &[Yes, No, Nei];

static TREE: LazyLock<DetailedTree> = LazyLock::new(DetailedTree::new);

pub(super) fn tree() -> &'static dyn DecisionTree {
    &*TREE
}

pub struct DetailedTree {
    registry: QuestionRegistry,
}

impl DetailedTree {
    fn new() -> Self {
        Self {
            registry: QuestionRegistry::new([
                Question::new(InterventionDeath, "1. Death as a result of an intervention?", YES_NO),
                Question::new(InterventionForLc, "Was the intervention for lung cancer?", ALL_OPTIONS),
                Question::new(
                    MetastasisEvidence,
                    "2. Evidence for progressive, recurrent or new metastasis present?",
                    YES_NO,
                ),
                Question::new(MetastasisLc, "Was the metastasis lung cancer?", ALL_OPTIONS),
                Question::new(
                    TumourEvidence,
                    "3. Evidence for progressive, recurrent or second primary tumour present?",
                    YES_NO,
                ),
                Question::new(TumourLc, "Was the tumour lung cancer?", ALL_OPTIONS),
                Question::new(
                    ParaneoplasticEvidence,
                    "4. Evidence for paraneoplastic syndrome present?",
                    YES_NO,
                ),
                Question::new(
                    ParaneoplasticLc,
                    "Paraneoplastic syndrome result of lung cancer?",
                    ALL_OPTIONS,
                ),
                Question::new(
                    ClearCauseOtherThanLc,
                    "5. Clear cause of death present, other than lung cancer?",
                    YES_NO,
                ),
                Question::new(WasThisCod, "Was this the cause of death?", ALL_OPTIONS),
                Question::new(OtherCodPresent3, "Other clear CoD present?", OTHER_COD_NO_DOUBT),
                Question::new(OtherCodPresent4, "Other clear CoD present?", ALL_OPTIONS),
                Question::new(
                    OtherCodDirectResultOfLc,
                    "Other CoD direct result of lung cancer?",
                    ALL_OPTIONS,
                ),
                Question::new(LcContributingFactor, "Lung cancer contributing factor?", ALL_OPTIONS),
            ]),
        }
    }
}

impl DecisionTree for DetailedTree {
    fn topology(&self) -> Topology {
        Topology::Detailed
    }

    fn registry(&self) -> &QuestionRegistry {
        &self.registry
    }

    fn edge(&self, question: QuestionId, answer: Answer) -> Option<Edge> {
        let edge = match (question, answer) {
            (InterventionDeath, Yes) => Edge::Ask(InterventionForLc),
            (InterventionDeath, No) => Edge::Ask(MetastasisEvidence),

            (InterventionForLc, Yes) => Edge::Classify(DefinitelyLcDeath),
            (InterventionForLc, No) => Edge::Ask(LcContributingFactor),
            (InterventionForLc, Doubt | Nei) => Edge::Classify(PossibleLcDeath),

            // Evidence cascade: metastasis, then tumour, then paraneoplastic.
            (MetastasisEvidence, Yes) => Edge::Ask(MetastasisLc),
            (MetastasisEvidence, No) => Edge::Ask(TumourEvidence),
            (TumourEvidence, Yes) => Edge::Ask(TumourLc),
            (TumourEvidence, No) => Edge::Ask(ParaneoplasticEvidence),
            (ParaneoplasticEvidence, Yes) => Edge::Ask(ParaneoplasticLc),
            (ParaneoplasticEvidence, No) => Edge::Ask(ClearCauseOtherThanLc),

            (MetastasisLc | TumourLc | ParaneoplasticLc, Yes | No | Doubt | Nei) => {
                Edge::Ask(WasThisCod)
            }

            (ClearCauseOtherThanLc, Yes) => Edge::Ask(OtherCodDirectResultOfLc),
            (ClearCauseOtherThanLc, No) => Edge::Classify(UnlikelyLcDeath),

            (WasThisCod, Yes) => Edge::Resolve(Rule::CauseConfirmed),
            (WasThisCod, No | Doubt | Nei) => Edge::Resolve(Rule::CauseUnconfirmed),

            (OtherCodPresent3, Yes) => Edge::Ask(OtherCodDirectResultOfLc),
            (OtherCodPresent3, No | Nei) => Edge::Resolve(Rule::NoOtherCause),

            (OtherCodPresent4, Yes) => Edge::Ask(OtherCodDirectResultOfLc),
            (OtherCodPresent4, No | Doubt | Nei) => Edge::Classify(PossibleLcDeath),

            (OtherCodDirectResultOfLc, Yes) => Edge::Classify(DefinitelyLcDeath),
            (OtherCodDirectResultOfLc, No | Doubt | Nei) => Edge::Ask(LcContributingFactor),

            (LcContributingFactor, Yes) => Edge::Classify(IntercurrentCodLcContributory),
            // Doubt and insufficient information are not distinguished from "no" here.
            (LcContributingFactor, No | Doubt | Nei) => Edge::Classify(DefinitelyNoLcDeath),

            _ => return None,
        };
        Some(edge)
    }

    fn resolve(&self, rule: Rule, answers: &AnswerSet) -> Position {
        let evidence = answers.attributions(&ATTRIBUTIONS);
        match rule {
            Rule::CauseConfirmed => match evidence.dominant() {
                Yes => classify(DefinitelyLcDeath),
                No => ask(LcContributingFactor),
                _ => classify(PossibleLcDeath),
            },
            // Routed on an explicit "no", not merely on the absence of "yes".
            Rule::CauseUnconfirmed => {
                if evidence.any(No) {
                    ask(OtherCodPresent3)
                } else {
                    ask(OtherCodPresent4)
                }
            }
            Rule::NoOtherCause => match evidence.dominant() {
                Yes => classify(ProbableLcDeath),
                No => classify(UnlikelyLcDeath),
                _ => classify(PossibleLcDeath),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn answers_with(entries: &[(QuestionId, Answer)]) -> AnswerSet {
        let mut answers = AnswerSet::new(tree().registry());
        for (id, answer) in entries {
            answers.set(*id, *answer).unwrap();
        }
        answers
    }

    #[test]
    fn test_cause_confirmed_by_attribution() {
        let t = tree();
        let cases = [
            (Yes, Position::AtClassification(DefinitelyLcDeath)),
            (No, Position::AtQuestion(LcContributingFactor)),
            (Doubt, Position::AtClassification(PossibleLcDeath)),
            (Nei, Position::AtClassification(PossibleLcDeath)),
        ];
        for (attribution, expected) in cases {
            let answers = answers_with(&[(TumourLc, attribution), (WasThisCod, Yes)]);
            assert_eq!(
                t.transition(WasThisCod, Yes, &answers).unwrap(),
                expected,
                "tumourLC = {}",
                attribution
            );
        }
    }

    #[test]
    fn test_cause_unconfirmed_routes_on_explicit_no() {
        let t = tree();
        let answers = answers_with(&[(ParaneoplasticLc, No), (WasThisCod, Doubt)]);
        assert_eq!(
            t.transition(WasThisCod, Doubt, &answers).unwrap(),
            Position::AtQuestion(OtherCodPresent3)
        );

        let answers = answers_with(&[(ParaneoplasticLc, Nei), (WasThisCod, No)]);
        assert_eq!(
            t.transition(WasThisCod, No, &answers).unwrap(),
            Position::AtQuestion(OtherCodPresent4)
        );
    }

    #[test]
    fn test_no_other_cause_outcomes() {
        let t = tree();
        let answers = answers_with(&[(MetastasisLc, No), (OtherCodPresent3, No)]);
        assert_eq!(
            t.transition(OtherCodPresent3, No, &answers).unwrap(),
            Position::AtClassification(UnlikelyLcDeath)
        );
        // Not-enough-information follows the same path as "no".
        let answers = answers_with(&[(MetastasisLc, No), (OtherCodPresent3, Nei)]);
        assert_eq!(
            t.transition(OtherCodPresent3, Nei, &answers).unwrap(),
            Position::AtClassification(UnlikelyLcDeath)
        );
    }

    #[test]
    fn test_other_cod_present3_rejects_doubt() {
        let t = tree();
        let answers = answers_with(&[(MetastasisLc, No)]);
        assert!(t.transition(OtherCodPresent3, Doubt, &answers).is_err());
    }

    #[test]
    fn test_lc_contributing_factor_collapses_uncertainty() {
        let t = tree();
        let answers = answers_with(&[]);
        for answer in [No, Doubt, Nei] {
            assert_eq!(
                t.transition(LcContributingFactor, answer, &answers).unwrap(),
                Position::AtClassification(DefinitelyNoLcDeath)
            );
        }
    }
}
