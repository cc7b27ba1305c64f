//! Collapsed topology: 10 questions. Each evidence question already asks
//! whether the finding is lung cancer, and insufficient information can end
//! the traversal at its own terminal.

use super::{classify, DecisionTree, Edge, Rule, Topology};
use crate::answers::AnswerSet;
use crate::registry::{Question, QuestionId, QuestionRegistry, ALL_OPTIONS, YES_NO};
use crate::types::{Answer, Classification, Position};
use std::sync::LazyLock;

use Answer::{Doubt, No, NotEnoughInformation as Nei, Yes};
use Classification::*;
use QuestionId::*;

/// Merged evidence questions in cascade order.
pub const ATTRIBUTIONS: [QuestionId; 3] = [MetastasisLc, TumourLc, ParaneoplasticLc];

static TREE: LazyLock<CollapsedTree> = LazyLock::new(CollapsedTree::new);

pub(super) fn tree() -> &'static dyn DecisionTree {
    &*TREE
}

pub struct CollapsedTree {
    registry: QuestionRegistry,
}

impl CollapsedTree {
    fn new() -> Self {
        Self {
            registry: QuestionRegistry::new([
                Question::new(InterventionDeath, "1. Death as a result of an intervention?", YES_NO),
                Question::new(InterventionForLc, "Was the intervention for lung cancer?", ALL_OPTIONS),
                Question::new(
                    MetastasisLc,
                    "2. Evidence for progressive, recurrent or new metastasis of lung cancer present?",
                    ALL_OPTIONS,
                ),
                Question::new(
                    TumourLc,
                    "3. Evidence for progressive, recurrent or second primary lung cancer present?",
                    ALL_OPTIONS,
                ),
                Question::new(
                    ParaneoplasticLc,
                    "4. Evidence for a paraneoplastic syndrome of lung cancer present?",
                    ALL_OPTIONS,
                ),
                Question::new(
                    ClearCauseOtherThanLc,
                    "5. Clear cause of death present, other than lung cancer?",
                    YES_NO,
                ),
                Question::new(WasThisCod, "Was this the cause of death?", ALL_OPTIONS),
                Question::new(OtherCodPresent, "Other clear CoD present?", ALL_OPTIONS),
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

impl DecisionTree for CollapsedTree {
    fn topology(&self) -> Topology {
        Topology::Collapsed
    }

    fn registry(&self) -> &QuestionRegistry {
        &self.registry
    }

    fn edge(&self, question: QuestionId, answer: Answer) -> Option<Edge> {
        let edge = match (question, answer) {
            (InterventionDeath, Yes) => Edge::Ask(InterventionForLc),
            (InterventionDeath, No) => Edge::Ask(MetastasisLc),

            (InterventionForLc, Yes) => Edge::Classify(DefinitelyLcDeath),
            (InterventionForLc, No) => Edge::Ask(LcContributingFactor),
            (InterventionForLc, Doubt) => Edge::Classify(PossibleLcDeath),
            (InterventionForLc, Nei) => Edge::Classify(NotEnoughInformation),

            // A finding that is (possibly) lung cancer stops the cascade;
            // "no" and "not enough information" move on to the next pathway.
            (MetastasisLc | TumourLc | ParaneoplasticLc, Yes | Doubt) => Edge::Ask(WasThisCod),
            (MetastasisLc, No | Nei) => Edge::Ask(TumourLc),
            (TumourLc, No | Nei) => Edge::Ask(ParaneoplasticLc),
            (ParaneoplasticLc, No | Nei) => Edge::Ask(ClearCauseOtherThanLc),

            (ClearCauseOtherThanLc, Yes) => Edge::Ask(OtherCodDirectResultOfLc),
            (ClearCauseOtherThanLc, No) => Edge::Classify(UnlikelyLcDeath),

            (WasThisCod, Yes) => Edge::Resolve(Rule::CauseConfirmed),
            (WasThisCod, No | Doubt | Nei) => Edge::Ask(OtherCodPresent),

            (OtherCodPresent, Yes) => Edge::Ask(OtherCodDirectResultOfLc),
            (OtherCodPresent, No) => Edge::Resolve(Rule::NoOtherCause),
            (OtherCodPresent, Doubt) => Edge::Classify(PossibleLcDeath),
            (OtherCodPresent, Nei) => Edge::Classify(NotEnoughInformation),

            (OtherCodDirectResultOfLc, Yes) => Edge::Classify(DefinitelyLcDeath),
            (OtherCodDirectResultOfLc, No | Doubt) => Edge::Ask(LcContributingFactor),
            (OtherCodDirectResultOfLc, Nei) => Edge::Classify(NotEnoughInformation),

            (LcContributingFactor, Yes) => Edge::Classify(IntercurrentCodLcContributory),
            (LcContributingFactor, No | Doubt) => Edge::Classify(DefinitelyNoLcDeath),
            (LcContributingFactor, Nei) => Edge::Classify(NotEnoughInformation),

            _ => return None,
        };
        Some(edge)
    }

    fn resolve(&self, rule: Rule, answers: &AnswerSet) -> Position {
        let evidence = answers.attributions(&ATTRIBUTIONS);
        match rule {
            Rule::CauseConfirmed => match evidence.dominant() {
                Yes => classify(DefinitelyLcDeath),
                _ => classify(PossibleLcDeath),
            },
            // Not produced by the collapsed edge table.
            Rule::CauseUnconfirmed => Position::AtQuestion(OtherCodPresent),
            Rule::NoOtherCause => match evidence.dominant() {
                Yes => classify(ProbableLcDeath),
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
    fn test_other_cod_doubt_terminates_immediately() {
        let t = tree();
        let answers = answers_with(&[(MetastasisLc, Yes), (WasThisCod, No)]);
        assert_eq!(
            t.transition(OtherCodPresent, Doubt, &answers).unwrap(),
            Position::AtClassification(PossibleLcDeath)
        );
    }

    #[test]
    fn test_not_enough_information_terminal() {
        let t = tree();
        let answers = answers_with(&[]);
        for question in [InterventionForLc, OtherCodPresent, OtherCodDirectResultOfLc, LcContributingFactor] {
            assert_eq!(
                t.transition(question, Nei, &answers).unwrap(),
                Position::AtClassification(NotEnoughInformation),
                "{}",
                question
            );
        }
    }

    #[test]
    fn test_yes_evidence_dominates_earlier_insufficient_information() {
        let t = tree();
        let answers = answers_with(&[(MetastasisLc, Nei), (TumourLc, Yes), (WasThisCod, Yes)]);
        assert_eq!(
            t.transition(WasThisCod, Yes, &answers).unwrap(),
            Position::AtClassification(DefinitelyLcDeath)
        );
    }

    #[test]
    fn test_no_other_cause_with_doubtful_evidence() {
        let t = tree();
        let answers = answers_with(&[(MetastasisLc, Doubt), (WasThisCod, No), (OtherCodPresent, No)]);
        assert_eq!(
            t.transition(OtherCodPresent, No, &answers).unwrap(),
            Position::AtClassification(PossibleLcDeath)
        );
        let answers = answers_with(&[(MetastasisLc, Yes), (WasThisCod, No), (OtherCodPresent, No)]);
        assert_eq!(
            t.transition(OtherCodPresent, No, &answers).unwrap(),
            Position::AtClassification(ProbableLcDeath)
        );
    }

    #[test]
    fn test_detailed_only_questions_are_absent() {
        let registry = tree().registry();
        for id in [MetastasisEvidence, TumourEvidence, ParaneoplasticEvidence, OtherCodPresent3, OtherCodPresent4] {
            assert!(!registry.contains(id), "{}", id);
        }
    }
}
