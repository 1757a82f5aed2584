//! The wizard controller — one instance per open registration form.

use std::collections::BTreeMap;

use chrono::Utc;
use serde_json::{Value, json};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::api::{
    DocumentRef, FileUpload, RegistryApi, SUBMISSION_STATUS, SubmissionPayload, SubmissionReceipt,
};
use crate::context::CurrentUser;
use crate::error::{ApiError, Error, Result, WizardError};

use super::documents::{DocumentSlot, DocumentStore, UploadedFileRecord, slot_key, upload_category};
use super::form::{Plan, RegistrationForm, ServiceType};
use super::step::WizardStep;
use super::validation::{ValidationReport, validate_step};

/// Holds everything one registration flow needs: the form tree, the step
/// machine, the error map, the upload slots, and the submission guards.
/// Forms never share state; a finished (successful) controller is terminal
/// and a fresh instance is required to file again.
pub struct WizardController {
    id: Uuid,
    form: RegistrationForm,
    current_step: WizardStep,
    errors: BTreeMap<String, String>,
    documents: DocumentStore,
    selected_plan: Option<Plan>,
    is_submitting: bool,
    is_success: bool,
    server_submission_id: Option<String>,
}

impl WizardController {
    pub fn new(service: ServiceType) -> Self {
        Self {
            id: Uuid::new_v4(),
            form: RegistrationForm::seeded(service),
            current_step: WizardStep::default(),
            errors: BTreeMap::new(),
            documents: DocumentStore::new(),
            selected_plan: None,
            is_submitting: false,
            is_success: false,
            server_submission_id: None,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn service(&self) -> ServiceType {
        self.form.service()
    }

    pub fn form(&self) -> &RegistrationForm {
        &self.form
    }

    pub fn current_step(&self) -> WizardStep {
        self.current_step
    }

    pub fn errors(&self) -> &BTreeMap<String, String> {
        &self.errors
    }

    pub fn documents(&self) -> &DocumentStore {
        &self.documents
    }

    pub fn selected_plan(&self) -> Option<Plan> {
        self.selected_plan
    }

    pub fn is_submitting(&self) -> bool {
        self.is_submitting
    }

    pub fn is_success(&self) -> bool {
        self.is_success
    }

    /// Submission id returned by the server after a successful submit.
    pub fn server_submission_id(&self) -> Option<&str> {
        self.server_submission_id.as_deref()
    }

    /// Apply a field mutation and clear any recorded error under `key`.
    /// No validation runs here — only at step transitions.
    pub fn update_field(&mut self, key: &str, mutate: impl FnOnce(&mut RegistrationForm)) {
        mutate(&mut self.form);
        self.errors.remove(key);
    }

    pub fn set_plan(&mut self, plan: Plan) {
        self.selected_plan = Some(plan);
        self.errors.remove("plan");
    }

    /// Append a blank party slot. Refusals leave state untouched.
    pub fn add_party(&mut self) -> Result<()> {
        self.form.add_party().map_err(Error::from)
    }

    /// Remove the party at `index`, along with its recorded field errors.
    /// Refuses below the service minimum.
    pub fn remove_party(&mut self, index: usize) -> Result<()> {
        self.form.remove_party(index)?;
        let prefix = format!("{}_{index}_", self.service().party_label());
        self.errors.retain(|key, _| !key.starts_with(&prefix));
        Ok(())
    }

    /// Validate a step against the current state without storing anything.
    pub fn validate_step(&self, step: WizardStep) -> ValidationReport {
        validate_step(&self.form, step, &self.documents, self.selected_plan)
    }

    /// Validate the current step and advance on success. Returns whether the
    /// wizard moved; on failure the error map is stored and the step stays.
    pub fn next(&mut self) -> bool {
        if self.is_success {
            return false;
        }
        let report = self.validate_step(self.current_step);
        if !report.is_valid {
            debug!(
                step = %self.current_step,
                errors = report.errors.len(),
                "step validation failed"
            );
            self.errors = report.errors;
            return false;
        }
        self.errors.clear();
        match self.current_step.next() {
            Some(next) => {
                debug!(from = %self.current_step, to = %next, "wizard advanced");
                self.current_step = next;
                true
            }
            None => false,
        }
    }

    /// Go back one step. Never validates; floored at Details.
    pub fn back(&mut self) -> bool {
        if self.is_success {
            return false;
        }
        match self.current_step.prev() {
            Some(prev) => {
                self.current_step = prev;
                true
            }
            None => false,
        }
    }

    /// Upload a document into a slot. On success the record overwrites any
    /// prior upload under the same key; on failure the prior state is kept
    /// and the error is returned for the UI to surface. No retry.
    pub async fn upload_document(
        &mut self,
        api: &dyn RegistryApi,
        file: FileUpload,
        slot: DocumentSlot,
        party_index: Option<usize>,
    ) -> Result<()> {
        if self.is_success {
            return Err(WizardError::AlreadySubmitted.into());
        }

        let key = slot_key(slot, party_index);
        let category = upload_category(self.service(), slot, party_index);
        let display_name = file.file_name.clone();
        let is_image = file.is_image();

        self.documents.begin_upload(&key);
        match api.upload_file(file, &category).await {
            Ok(uploaded) => {
                let record = UploadedFileRecord {
                    slot_key: key.clone(),
                    display_name,
                    preview_url: is_image.then(|| uploaded.file_url.clone()),
                    remote_url: uploaded.file_url,
                    remote_id: uploaded.id,
                    uploaded_at: Utc::now(),
                };
                self.documents.complete(&key, record);
                self.errors.remove(&key);
                Ok(())
            }
            Err(e) => {
                warn!(slot = %key, error = %e, "document upload failed");
                self.documents.fail(&key, e.to_string());
                Err(e.into())
            }
        }
    }

    /// Submit the completed registration. Only valid from the Payment step
    /// with a plan selected; re-entrant calls are refused while a submission
    /// is in flight. On failure the wizard stays on Payment with the guard
    /// reset; on success the controller is terminal.
    pub async fn submit(
        &mut self,
        api: &dyn RegistryApi,
        user: &CurrentUser,
    ) -> Result<SubmissionReceipt> {
        if self.is_success {
            return Err(WizardError::AlreadySubmitted.into());
        }
        if self.is_submitting {
            return Err(WizardError::SubmissionInProgress.into());
        }
        if !self.current_step.is_final() {
            return Err(WizardError::NotOnPaymentStep.into());
        }
        if self.selected_plan.is_none() {
            return Err(WizardError::NoPlanSelected.into());
        }

        let payload = self.build_payload(user)?;
        let submission_id = payload.submission_id.clone();
        info!(
            service = %self.service(),
            %submission_id,
            "submitting registration"
        );

        self.is_submitting = true;
        let result = api.submit_registration(self.service(), payload).await;
        self.is_submitting = false;

        match result {
            Ok(receipt) => {
                self.is_success = true;
                self.server_submission_id = Some(receipt.submission_id.clone());
                Ok(receipt)
            }
            Err(e) => {
                warn!(%submission_id, error = %e, "submission failed");
                Err(e.into())
            }
        }
    }

    /// Assemble the final payload: client-generated id, the serialized form
    /// with each party's four standard document URLs attached, and the flat
    /// documents list.
    fn build_payload(&self, user: &CurrentUser) -> std::result::Result<SubmissionPayload, ApiError> {
        let plan = self
            .selected_plan
            .map(|p| p.as_str().to_string())
            .unwrap_or_default();
        let submission_id = format!(
            "{}-{}",
            self.service().submission_prefix(),
            Utc::now().timestamp_millis()
        );

        let mut form_data = serde_json::to_value(&self.form)?;
        self.attach_party_documents(&mut form_data);

        let documents = self
            .documents
            .records()
            .into_iter()
            .map(|r| DocumentRef {
                id: r.remote_id.clone(),
                filename: r.display_name.clone(),
                file_url: r.remote_url.clone(),
            })
            .collect();

        Ok(SubmissionPayload {
            submission_id,
            plan,
            user_email: user.email.clone(),
            form_data,
            documents,
            status: SUBMISSION_STATUS.to_string(),
        })
    }

    /// Attach a `documents` object to every serialized party: slot name →
    /// uploaded URL (or null), looked up by the constructed slot key.
    fn attach_party_documents(&self, form_data: &mut Value) {
        match &self.form {
            RegistrationForm::Proprietorship(_) => {
                if let Some(p) = form_data.get_mut("proprietor") {
                    p["documents"] = self.party_documents_json(None);
                }
            }
            RegistrationForm::Llp(_) => {
                self.attach_indexed(form_data, "partners");
            }
            RegistrationForm::PrivateLimited(_) | RegistrationForm::PublicLimited(_) => {
                self.attach_indexed(form_data, "directors");
            }
        }
    }

    fn attach_indexed(&self, form_data: &mut Value, field: &str) {
        if let Some(parties) = form_data.get_mut(field).and_then(Value::as_array_mut) {
            for (idx, party) in parties.iter_mut().enumerate() {
                party["documents"] = self.party_documents_json(Some(idx));
            }
        }
    }

    fn party_documents_json(&self, party_index: Option<usize>) -> Value {
        let mut map = serde_json::Map::new();
        for slot in DocumentSlot::PARTY_SLOTS {
            let key = slot_key(slot, party_index);
            let url = self
                .documents
                .record(&key)
                .map(|r| json!(r.remote_url))
                .unwrap_or(Value::Null);
            map.insert(slot.key().to_string(), url);
        }
        Value::Object(map)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_stays_put_and_records_errors_when_invalid() {
        let mut wizard = WizardController::new(ServiceType::Llp);
        assert!(!wizard.next());
        assert_eq!(wizard.current_step(), WizardStep::Details);
        assert!(!wizard.errors().is_empty());
    }

    #[test]
    fn next_advances_after_fields_are_filled() {
        let mut wizard = WizardController::new(ServiceType::Proprietorship);
        assert!(!wizard.next());
        assert_eq!(wizard.current_step(), WizardStep::Details);

        wizard.update_field("trade_name", |form| {
            if let Some(f) = form.as_proprietorship_mut() {
                f.trade_name = "Verma Traders".to_string();
                f.business_activity = "Retail".to_string();
                f.registered_office.line1 = "12 Bazaar St".to_string();
                f.registered_office.city = "Pune".to_string();
                f.registered_office.state = "Maharashtra".to_string();
                f.registered_office.pincode = "411001".to_string();
            }
        });
        assert!(wizard.next());
        assert_eq!(wizard.current_step(), WizardStep::Parties);
        assert!(wizard.errors().is_empty());
    }

    #[test]
    fn update_field_clears_only_that_error() {
        let mut wizard = WizardController::new(ServiceType::Llp);
        wizard.next();
        assert!(wizard.errors().contains_key("proposed_name"));
        assert!(wizard.errors().contains_key("business_activity"));

        wizard.update_field("proposed_name", |form| {
            if let Some(f) = form.as_llp_mut() {
                f.proposed_name = "Acme Services LLP".to_string();
            }
        });
        assert!(!wizard.errors().contains_key("proposed_name"));
        assert!(wizard.errors().contains_key("business_activity"));
    }

    #[test]
    fn back_is_always_allowed_and_floored() {
        let mut wizard = WizardController::new(ServiceType::Llp);
        assert!(!wizard.back());
        assert_eq!(wizard.current_step(), WizardStep::Details);
    }

    #[test]
    fn remove_party_refusal_keeps_state() {
        let mut wizard = WizardController::new(ServiceType::Llp);
        let err = wizard.remove_party(1).unwrap_err();
        assert!(matches!(
            err,
            Error::Wizard(WizardError::BelowMinimumParties { minimum: 2, .. })
        ));
        assert_eq!(wizard.form().party_count(), 2);
    }

    #[test]
    fn remove_party_drops_its_scoped_errors() {
        let mut wizard = WizardController::new(ServiceType::PublicLimited);
        wizard.add_party().unwrap(); // 4 directors
        wizard
            .errors
            .insert("director_3_pan".to_string(), "PAN is required".to_string());
        wizard
            .errors
            .insert("proposed_name".to_string(), "required".to_string());

        wizard.remove_party(3).unwrap();
        assert!(!wizard.errors().contains_key("director_3_pan"));
        assert!(wizard.errors().contains_key("proposed_name"));
    }

    #[test]
    fn set_plan_clears_plan_error() {
        let mut wizard = WizardController::new(ServiceType::Llp);
        wizard
            .errors
            .insert("plan".to_string(), "Select a plan to continue".to_string());
        wizard.set_plan(Plan::Premium);
        assert!(wizard.errors().is_empty());
        assert_eq!(wizard.selected_plan(), Some(Plan::Premium));
    }
}
