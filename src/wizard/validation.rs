//! Per-step, per-service validation.
//!
//! Runs only at step transitions. Field errors are keyed by field name,
//! scoped with the party index for repeated sections (`partner_1_pan`);
//! cross-field checks (ratio sum, designated-partner count, party count) use
//! generic keys the UI renders as banners. The one exception: a duplicate
//! PAN is keyed to the second occurrence's PAN field so it highlights the
//! party that re-entered it.

use std::collections::{BTreeMap, HashSet};
use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use super::documents::{DocumentSlot, DocumentStore, slot_key};
use super::form::{Director, Partner, PersonDetails, Plan, RegistrationForm, ServiceType};
use super::step::WizardStep;

static PAN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z]{5}[0-9]{4}[A-Z]$").unwrap());
static AADHAAR_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]{12}$").unwrap());
static PHONE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[6-9][0-9]{9}$").unwrap());
static PINCODE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]{6}$").unwrap());
static DIN_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^[0-9]{8}$").unwrap());
static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap());

/// Allowed drift when checking that profit-sharing ratios sum to 100.
const RATIO_TOLERANCE: Decimal = dec!(0.1);

/// Outcome of validating one step.
#[derive(Debug, Clone)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: BTreeMap<String, String>,
}

impl ValidationReport {
    fn from_errors(errors: BTreeMap<String, String>) -> Self {
        Self {
            is_valid: errors.is_empty(),
            errors,
        }
    }
}

/// Validate one step of the wizard against the current form state.
pub fn validate_step(
    form: &RegistrationForm,
    step: WizardStep,
    documents: &DocumentStore,
    plan: Option<Plan>,
) -> ValidationReport {
    let mut errors = BTreeMap::new();
    match step {
        WizardStep::Details => validate_details(form, &mut errors),
        WizardStep::Parties => validate_parties(form, &mut errors),
        WizardStep::Documents => validate_documents(form, documents, &mut errors),
        WizardStep::Review => {}
        WizardStep::Payment => {
            if plan.is_none() {
                errors.insert("plan".to_string(), "Select a plan to continue".to_string());
            }
        }
    }
    ValidationReport::from_errors(errors)
}

fn validate_details(form: &RegistrationForm, errors: &mut BTreeMap<String, String>) {
    match form {
        RegistrationForm::Llp(f) => {
            require(errors, "proposed_name", &f.proposed_name, "Proposed LLP name");
            require(errors, "business_activity", &f.business_activity, "Business activity");
            check_address(errors, &f.registered_office);
            check_amount(errors, "total_contribution", &f.total_contribution, "Total contribution");
        }
        RegistrationForm::PrivateLimited(f) => {
            require(errors, "proposed_name", &f.proposed_name, "Proposed company name");
            require(errors, "business_activity", &f.business_activity, "Business activity");
            check_address(errors, &f.registered_office);
            check_amount(errors, "authorized_capital", &f.authorized_capital, "Authorized capital");
            check_amount(errors, "paid_up_capital", &f.paid_up_capital, "Paid-up capital");
        }
        RegistrationForm::Proprietorship(f) => {
            require(errors, "trade_name", &f.trade_name, "Trade name");
            require(errors, "business_activity", &f.business_activity, "Business activity");
            check_address(errors, &f.registered_office);
        }
        RegistrationForm::PublicLimited(f) => {
            require(errors, "proposed_name", &f.proposed_name, "Proposed company name");
            let name = f.proposed_name.trim();
            if !name.is_empty() {
                if name.contains("Private Limited") {
                    errors.insert(
                        "proposed_name".to_string(),
                        "A public company name cannot contain \"Private Limited\"".to_string(),
                    );
                } else if !name.contains("Limited") {
                    errors.insert(
                        "proposed_name".to_string(),
                        "A public company name must contain \"Limited\"".to_string(),
                    );
                }
            }
            require(errors, "business_activity", &f.business_activity, "Business activity");
            check_address(errors, &f.registered_office);
            check_amount(errors, "authorized_capital", &f.authorized_capital, "Authorized capital");
        }
    }
}

fn validate_parties(form: &RegistrationForm, errors: &mut BTreeMap<String, String>) {
    match form {
        RegistrationForm::Llp(f) => validate_partners(&f.partners, errors),
        RegistrationForm::PrivateLimited(f) => {
            validate_directors(&f.directors, ServiceType::PrivateLimited, errors);
        }
        RegistrationForm::Proprietorship(f) => {
            check_person(errors, "proprietor", &f.proprietor.person);
        }
        RegistrationForm::PublicLimited(f) => {
            validate_directors(&f.directors, ServiceType::PublicLimited, errors);
        }
    }
}

fn validate_partners(partners: &[Partner], errors: &mut BTreeMap<String, String>) {
    for (idx, partner) in partners.iter().enumerate() {
        let prefix = format!("partner_{idx}");
        check_person(errors, &prefix, &partner.person);
        check_amount(
            errors,
            &format!("{prefix}_profit_sharing_ratio"),
            &partner.profit_sharing_ratio,
            "Profit-sharing ratio",
        );
    }

    if partners.len() < 2 {
        errors.insert(
            "partners".to_string(),
            "An LLP needs at least 2 partners".to_string(),
        );
    }

    let designated = partners.iter().filter(|p| p.is_designated).count();
    if designated < 2 {
        errors.insert(
            "designated_partners".to_string(),
            "At least 2 partners must be designated partners".to_string(),
        );
    }

    check_ratio_sum(partners, errors);
    check_duplicate_pans(
        partners.iter().map(|p| p.person.pan.as_str()),
        "partner",
        errors,
    );
}

/// Ratios must sum to 100 within tolerance. Skipped while any ratio is
/// missing or non-numeric — those already carry their own field errors.
fn check_ratio_sum(partners: &[Partner], errors: &mut BTreeMap<String, String>) {
    let mut sum = Decimal::ZERO;
    for partner in partners {
        match partner.profit_sharing_ratio.trim().parse::<Decimal>() {
            Ok(ratio) => sum += ratio,
            Err(_) => return,
        }
    }
    if (sum - dec!(100)).abs() > RATIO_TOLERANCE {
        errors.insert(
            "profit_sharing_ratio".to_string(),
            format!("Profit-sharing ratios must add up to 100% (currently {sum}%)"),
        );
    }
}

fn validate_directors(
    directors: &[Director],
    service: ServiceType,
    errors: &mut BTreeMap<String, String>,
) {
    for (idx, director) in directors.iter().enumerate() {
        let prefix = format!("director_{idx}");
        check_person(errors, &prefix, &director.person);
        if let Some(din) = &director.din {
            if !din.trim().is_empty() && !DIN_RE.is_match(din.trim()) {
                errors.insert(
                    format!("{prefix}_din"),
                    "DIN must be an 8-digit number".to_string(),
                );
            }
        }
    }

    let count = directors.len();
    match service {
        ServiceType::PrivateLimited => {
            if count < 2 {
                errors.insert(
                    "directors".to_string(),
                    "A private limited company needs at least 2 directors".to_string(),
                );
            } else if count > 5 {
                errors.insert(
                    "directors".to_string(),
                    "A private limited company can have at most 5 directors".to_string(),
                );
            }
        }
        ServiceType::PublicLimited => {
            if count < 3 {
                errors.insert(
                    "directors".to_string(),
                    "A public limited company needs at least 3 directors".to_string(),
                );
            }
        }
        _ => {}
    }

    check_duplicate_pans(
        directors.iter().map(|d| d.person.pan.as_str()),
        "director",
        errors,
    );
}

/// Flags a repeated PAN on the field of its second (and later) occurrences.
fn check_duplicate_pans<'a>(
    pans: impl Iterator<Item = &'a str>,
    label: &str,
    errors: &mut BTreeMap<String, String>,
) {
    let mut seen = HashSet::new();
    for (idx, pan) in pans.enumerate() {
        let normalized = pan.trim().to_uppercase();
        if normalized.is_empty() {
            continue;
        }
        if !seen.insert(normalized) {
            errors.insert(
                format!("{label}_{idx}_pan"),
                format!("This PAN is already used by another {label}"),
            );
        }
    }
}

fn validate_documents(
    form: &RegistrationForm,
    documents: &DocumentStore,
    errors: &mut BTreeMap<String, String>,
) {
    let service = form.service();
    let label = service.party_label();

    let indexed = !matches!(form, RegistrationForm::Proprietorship(_));
    for idx in 0..form.party_count() {
        let party_index = indexed.then_some(idx);
        for slot in DocumentSlot::PARTY_SLOTS {
            let key = slot_key(slot, party_index);
            if !documents.has(&key) {
                let owner = match party_index {
                    Some(i) => format!("{label} {}", i + 1),
                    None => label.to_string(),
                };
                errors.insert(key, format!("Upload the {} for {owner}", slot_name(slot)));
            }
        }
    }
}

fn slot_name(slot: DocumentSlot) -> &'static str {
    match slot {
        DocumentSlot::Pan => "PAN card",
        DocumentSlot::Aadhaar => "Aadhaar card",
        DocumentSlot::Photo => "photograph",
        DocumentSlot::AddressProof => "address proof",
        DocumentSlot::CompanyAddressProof => "registered-office address proof",
    }
}

// ── Field-level helpers ─────────────────────────────────────────────────

fn require(errors: &mut BTreeMap<String, String>, key: &str, value: &str, label: &str) {
    if value.trim().is_empty() {
        errors.insert(key.to_string(), format!("{label} is required"));
    }
}

fn check_amount(errors: &mut BTreeMap<String, String>, key: &str, value: &str, label: &str) {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.insert(key.to_string(), format!("{label} is required"));
    } else if trimmed.parse::<Decimal>().is_err() {
        errors.insert(key.to_string(), format!("{label} must be a number"));
    }
}

fn check_address(errors: &mut BTreeMap<String, String>, address: &super::form::Address) {
    require(errors, "office_line1", &address.line1, "Office address");
    require(errors, "office_city", &address.city, "City");
    require(errors, "office_state", &address.state, "State");
    let pincode = address.pincode.trim();
    if pincode.is_empty() {
        errors.insert("office_pincode".to_string(), "PIN code is required".to_string());
    } else if !PINCODE_RE.is_match(pincode) {
        errors.insert(
            "office_pincode".to_string(),
            "PIN code must be 6 digits".to_string(),
        );
    }
}

fn check_person(errors: &mut BTreeMap<String, String>, prefix: &str, person: &PersonDetails) {
    require(errors, &format!("{prefix}_full_name"), &person.full_name, "Full name");

    let dob = person.date_of_birth.trim();
    if dob.is_empty() {
        errors.insert(
            format!("{prefix}_date_of_birth"),
            "Date of birth is required".to_string(),
        );
    } else if NaiveDate::parse_from_str(dob, "%Y-%m-%d").is_err() {
        errors.insert(
            format!("{prefix}_date_of_birth"),
            "Enter the date of birth as YYYY-MM-DD".to_string(),
        );
    }

    let pan = person.pan.trim();
    if pan.is_empty() {
        errors.insert(format!("{prefix}_pan"), "PAN is required".to_string());
    } else if !PAN_RE.is_match(&pan.to_uppercase()) {
        errors.insert(
            format!("{prefix}_pan"),
            "PAN must look like ABCDE1234F".to_string(),
        );
    }

    let aadhaar = person.aadhaar.trim();
    if aadhaar.is_empty() {
        errors.insert(format!("{prefix}_aadhaar"), "Aadhaar is required".to_string());
    } else if !AADHAAR_RE.is_match(aadhaar) {
        errors.insert(
            format!("{prefix}_aadhaar"),
            "Aadhaar must be 12 digits".to_string(),
        );
    }

    let email = person.email.trim();
    if email.is_empty() {
        errors.insert(format!("{prefix}_email"), "Email is required".to_string());
    } else if !EMAIL_RE.is_match(email) {
        errors.insert(
            format!("{prefix}_email"),
            "Enter a valid email address".to_string(),
        );
    }

    let phone = person.phone.trim();
    if phone.is_empty() {
        errors.insert(format!("{prefix}_phone"), "Phone number is required".to_string());
    } else if !PHONE_RE.is_match(phone) {
        errors.insert(
            format!("{prefix}_phone"),
            "Enter a 10-digit mobile number".to_string(),
        );
    }
}
