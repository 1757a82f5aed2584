//! Form data for the four registration services.
//!
//! One variant per service type rather than a single shape-shifting record:
//! validation and payload assembly dispatch on the tag. Numeric fields hold
//! the raw user input as entered; format checks run at step validation,
//! never per keystroke.

use serde::{Deserialize, Serialize};

use crate::error::WizardError;

/// The registration services the platform offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ServiceType {
    Llp,
    PrivateLimited,
    Proprietorship,
    PublicLimited,
}

impl ServiceType {
    /// Prefix for client-generated submission ids.
    pub fn submission_prefix(&self) -> &'static str {
        match self {
            Self::Llp => "LLP",
            Self::PrivateLimited => "PVT",
            Self::Proprietorship => "SP",
            Self::PublicLimited => "PLC",
        }
    }

    /// How this service names its parties in field keys and upload
    /// categories.
    pub fn party_label(&self) -> &'static str {
        match self {
            Self::Llp => "partner",
            Self::PrivateLimited | Self::PublicLimited => "director",
            Self::Proprietorship => "proprietor",
        }
    }

    /// Path segment of the service's submission endpoint.
    pub fn endpoint_path(&self) -> &'static str {
        match self {
            Self::Llp => "llp",
            Self::PrivateLimited => "private-limited",
            Self::Proprietorship => "proprietorship",
            Self::PublicLimited => "public-limited",
        }
    }

    /// Minimum number of parties this service requires.
    pub fn min_parties(&self) -> usize {
        match self {
            Self::Llp | Self::PrivateLimited => 2,
            Self::Proprietorship => 1,
            Self::PublicLimited => 3,
        }
    }

    /// Maximum number of parties, where the service caps it.
    pub fn max_parties(&self) -> Option<usize> {
        match self {
            Self::PrivateLimited => Some(5),
            Self::Proprietorship => Some(1),
            Self::Llp | Self::PublicLimited => None,
        }
    }
}

impl std::fmt::Display for ServiceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Llp => "LLP",
            Self::PrivateLimited => "Private Limited",
            Self::Proprietorship => "Proprietorship",
            Self::PublicLimited => "Public Limited",
        };
        write!(f, "{s}")
    }
}

/// Service plan chosen at the Payment step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Plan {
    Basic,
    Standard,
    Premium,
}

impl Plan {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Basic => "BASIC",
            Self::Standard => "STANDARD",
            Self::Premium => "PREMIUM",
        }
    }
}

/// Registered-office address.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub line1: String,
    pub city: String,
    pub state: String,
    pub pincode: String,
}

/// Identity fields shared by every party.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonDetails {
    pub full_name: String,
    /// YYYY-MM-DD, as entered.
    pub date_of_birth: String,
    pub pan: String,
    pub aadhaar: String,
    pub email: String,
    pub phone: String,
}

/// An LLP partner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Partner {
    #[serde(flatten)]
    pub person: PersonDetails,
    pub is_designated: bool,
    /// Percentage share, as entered. All partners must sum to 100.
    pub profit_sharing_ratio: String,
    pub capital_contribution: String,
}

impl Partner {
    /// A blank slot with the LLP defaults: designated, even two-way split.
    pub fn blank() -> Self {
        Self {
            person: PersonDetails::default(),
            is_designated: true,
            profit_sharing_ratio: "50".to_string(),
            capital_contribution: String::new(),
        }
    }
}

/// A company director (Private or Public Limited).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Director {
    #[serde(flatten)]
    pub person: PersonDetails,
    /// Director Identification Number, if already allotted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub din: Option<String>,
}

/// The sole proprietor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Proprietor {
    #[serde(flatten)]
    pub person: PersonDetails,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LlpForm {
    pub proposed_name: String,
    pub business_activity: String,
    pub registered_office: Address,
    pub total_contribution: String,
    pub partners: Vec<Partner>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PvtLtdForm {
    pub proposed_name: String,
    pub business_activity: String,
    pub registered_office: Address,
    pub authorized_capital: String,
    pub paid_up_capital: String,
    pub directors: Vec<Director>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProprietorshipForm {
    pub trade_name: String,
    pub business_activity: String,
    pub registered_office: Address,
    pub proprietor: Proprietor,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlcForm {
    pub proposed_name: String,
    pub business_activity: String,
    pub registered_office: Address,
    pub authorized_capital: String,
    pub directors: Vec<Director>,
}

/// The full form-data tree, tagged by service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "service_type", rename_all = "snake_case")]
pub enum RegistrationForm {
    Llp(LlpForm),
    PrivateLimited(PvtLtdForm),
    Proprietorship(ProprietorshipForm),
    PublicLimited(PlcForm),
}

impl RegistrationForm {
    /// A fresh form with the service's pre-seeded blank party slots.
    pub fn seeded(service: ServiceType) -> Self {
        match service {
            ServiceType::Llp => Self::Llp(LlpForm {
                partners: vec![Partner::blank(), Partner::blank()],
                ..LlpForm::default()
            }),
            ServiceType::PrivateLimited => Self::PrivateLimited(PvtLtdForm {
                directors: vec![Director::default(), Director::default()],
                ..PvtLtdForm::default()
            }),
            ServiceType::Proprietorship => Self::Proprietorship(ProprietorshipForm::default()),
            ServiceType::PublicLimited => Self::PublicLimited(PlcForm {
                directors: vec![
                    Director::default(),
                    Director::default(),
                    Director::default(),
                ],
                ..PlcForm::default()
            }),
        }
    }

    pub fn service(&self) -> ServiceType {
        match self {
            Self::Llp(_) => ServiceType::Llp,
            Self::PrivateLimited(_) => ServiceType::PrivateLimited,
            Self::Proprietorship(_) => ServiceType::Proprietorship,
            Self::PublicLimited(_) => ServiceType::PublicLimited,
        }
    }

    /// Number of party records currently on the form.
    pub fn party_count(&self) -> usize {
        match self {
            Self::Llp(f) => f.partners.len(),
            Self::PrivateLimited(f) => f.directors.len(),
            Self::Proprietorship(_) => 1,
            Self::PublicLimited(f) => f.directors.len(),
        }
    }

    /// Append a blank party slot. Refuses when the service caps the count.
    pub fn add_party(&mut self) -> Result<(), WizardError> {
        let service = self.service();
        if let Some(max) = service.max_parties() {
            if self.party_count() >= max {
                return Err(WizardError::PartyLimitReached {
                    label: service.party_label().to_string(),
                    maximum: max,
                });
            }
        }
        match self {
            Self::Llp(f) => f.partners.push(Partner::blank()),
            Self::PrivateLimited(f) => f.directors.push(Director::default()),
            Self::PublicLimited(f) => f.directors.push(Director::default()),
            // Unreachable in practice: the cap above is 1.
            Self::Proprietorship(_) => {}
        }
        Ok(())
    }

    /// Remove the party at `index`. Refuses (state untouched) when the
    /// service's minimum would be violated or the index is out of range.
    pub fn remove_party(&mut self, index: usize) -> Result<(), WizardError> {
        let service = self.service();
        let count = self.party_count();
        if index >= count {
            return Err(WizardError::IndexOutOfRange {
                label: service.party_label().to_string(),
                index,
                len: count,
            });
        }
        if count <= service.min_parties() {
            return Err(WizardError::BelowMinimumParties {
                label: service.party_label().to_string(),
                minimum: service.min_parties(),
            });
        }
        match self {
            Self::Llp(f) => {
                f.partners.remove(index);
            }
            Self::PrivateLimited(f) => {
                f.directors.remove(index);
            }
            Self::PublicLimited(f) => {
                f.directors.remove(index);
            }
            Self::Proprietorship(_) => {}
        }
        Ok(())
    }

    pub fn as_llp(&self) -> Option<&LlpForm> {
        match self {
            Self::Llp(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_llp_mut(&mut self) -> Option<&mut LlpForm> {
        match self {
            Self::Llp(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_private_limited(&self) -> Option<&PvtLtdForm> {
        match self {
            Self::PrivateLimited(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_private_limited_mut(&mut self) -> Option<&mut PvtLtdForm> {
        match self {
            Self::PrivateLimited(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_proprietorship(&self) -> Option<&ProprietorshipForm> {
        match self {
            Self::Proprietorship(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_proprietorship_mut(&mut self) -> Option<&mut ProprietorshipForm> {
        match self {
            Self::Proprietorship(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_public_limited(&self) -> Option<&PlcForm> {
        match self {
            Self::PublicLimited(f) => Some(f),
            _ => None,
        }
    }

    pub fn as_public_limited_mut(&mut self) -> Option<&mut PlcForm> {
        match self {
            Self::PublicLimited(f) => Some(f),
            _ => None,
        }
    }
}
