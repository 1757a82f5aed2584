//! Wizard step machine — the five fixed stages every registration passes
//! through.

use serde::{Deserialize, Serialize};

/// The stages of a registration flow.
///
/// Progresses linearly: Details → Parties → Documents → Review → Payment.
/// Forward movement requires the current step to validate; backward movement
/// is always allowed; skipping is never allowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    Details,
    Parties,
    Documents,
    Review,
    Payment,
}

impl WizardStep {
    /// 1-based step number shown in the progress bar.
    pub fn number(&self) -> u8 {
        match self {
            Self::Details => 1,
            Self::Parties => 2,
            Self::Documents => 3,
            Self::Review => 4,
            Self::Payment => 5,
        }
    }

    /// The next step in the linear progression, if any.
    pub fn next(&self) -> Option<WizardStep> {
        match self {
            Self::Details => Some(Self::Parties),
            Self::Parties => Some(Self::Documents),
            Self::Documents => Some(Self::Review),
            Self::Review => Some(Self::Payment),
            Self::Payment => None,
        }
    }

    /// The previous step, if any.
    pub fn prev(&self) -> Option<WizardStep> {
        match self {
            Self::Details => None,
            Self::Parties => Some(Self::Details),
            Self::Documents => Some(Self::Parties),
            Self::Review => Some(Self::Documents),
            Self::Payment => Some(Self::Review),
        }
    }

    /// Whether this is the final (Payment) step.
    pub fn is_final(&self) -> bool {
        matches!(self, Self::Payment)
    }
}

impl Default for WizardStep {
    fn default() -> Self {
        Self::Details
    }
}

impl std::fmt::Display for WizardStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Details => "details",
            Self::Parties => "parties",
            Self::Documents => "documents",
            Self::Review => "review",
            Self::Payment => "payment",
        };
        write!(f, "{s}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_walks_all_steps() {
        use WizardStep::*;
        let expected = [Parties, Documents, Review, Payment];
        let mut current = Details;
        for step in expected {
            let next = current.next().unwrap();
            assert_eq!(next, step);
            current = next;
        }
        assert!(current.next().is_none());
    }

    #[test]
    fn prev_is_inverse_of_next() {
        use WizardStep::*;
        for step in [Details, Parties, Documents, Review] {
            assert_eq!(step.next().unwrap().prev(), Some(step));
        }
        assert!(Details.prev().is_none());
    }

    #[test]
    fn numbering_is_one_to_five() {
        use WizardStep::*;
        let numbers: Vec<u8> = [Details, Parties, Documents, Review, Payment]
            .iter()
            .map(|s| s.number())
            .collect();
        assert_eq!(numbers, vec![1, 2, 3, 4, 5]);
        assert!(Payment.is_final());
        assert!(!Review.is_final());
    }
}
