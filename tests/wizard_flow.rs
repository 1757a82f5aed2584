//! Integration tests for the registration wizard.
//!
//! Drives a full LLP flow — details, partners, document uploads, review,
//! payment, submission — against a stub backend, and exercises the failure
//! paths (rejected upload, rejected submission, re-submission).

use std::sync::Mutex;

use async_trait::async_trait;

use bizreg::api::{
    FileUpload, RegistryApi, SUBMISSION_STATUS, SubmissionPayload, SubmissionReceipt, UploadedFile,
};
use bizreg::context::{CurrentUser, KycStatus};
use bizreg::error::{ApiError, Error, WizardError};
use bizreg::wizard::{
    DocumentSlot, Plan, RegistrationForm, ServiceType, SlotState, WizardController, WizardStep,
};

/// Stub backend: uploads succeed with deterministic URLs, submissions are
/// recorded for inspection. Either can be switched to fail.
struct StubApi {
    fail_uploads: bool,
    fail_submissions: bool,
    uploads: Mutex<Vec<String>>,
    submissions: Mutex<Vec<SubmissionPayload>>,
}

impl StubApi {
    fn new() -> Self {
        Self {
            fail_uploads: false,
            fail_submissions: false,
            uploads: Mutex::new(Vec::new()),
            submissions: Mutex::new(Vec::new()),
        }
    }

    fn failing_uploads() -> Self {
        Self {
            fail_uploads: true,
            ..Self::new()
        }
    }

    fn failing_submissions() -> Self {
        Self {
            fail_submissions: true,
            ..Self::new()
        }
    }
}

#[async_trait]
impl RegistryApi for StubApi {
    async fn upload_file(
        &self,
        file: FileUpload,
        category: &str,
    ) -> Result<UploadedFile, ApiError> {
        if self.fail_uploads {
            return Err(ApiError::Rejected {
                status: 500,
                message: "storage unavailable".to_string(),
            });
        }
        self.uploads.lock().unwrap().push(category.to_string());
        Ok(UploadedFile {
            original_name: file.file_name.clone(),
            file_url: format!("https://cdn.example.in/{category}/{}", file.file_name),
            id: format!("file-{}", self.uploads.lock().unwrap().len()),
        })
    }

    async fn submit_registration(
        &self,
        _service: ServiceType,
        payload: SubmissionPayload,
    ) -> Result<SubmissionReceipt, ApiError> {
        if self.fail_submissions {
            return Err(ApiError::Rejected {
                status: 422,
                message: "duplicate application".to_string(),
            });
        }
        let submission_id = payload.submission_id.clone();
        self.submissions.lock().unwrap().push(payload);
        Ok(SubmissionReceipt {
            submission_id,
            message: Some("received".to_string()),
        })
    }
}

fn user() -> CurrentUser {
    CurrentUser {
        id: "u-42".to_string(),
        email: "asha@example.in".to_string(),
        full_name: "Asha Verma".to_string(),
        kyc_status: KycStatus::Approved,
    }
}

fn fill_llp_details(wizard: &mut WizardController) {
    wizard.update_field("proposed_name", |form| {
        if let Some(f) = form.as_llp_mut() {
            f.proposed_name = "Acme Services LLP".to_string();
            f.business_activity = "Consulting".to_string();
            f.registered_office.line1 = "14 MG Road".to_string();
            f.registered_office.city = "Bengaluru".to_string();
            f.registered_office.state = "Karnataka".to_string();
            f.registered_office.pincode = "560001".to_string();
            f.total_contribution = "100000".to_string();
        }
    });
}

fn fill_llp_partners(wizard: &mut WizardController) {
    wizard.update_field("partners", |form| {
        if let Some(f) = form.as_llp_mut() {
            for (i, partner) in f.partners.iter_mut().enumerate() {
                let n = i as u32 + 1;
                partner.person.full_name = format!("Partner {n}");
                partner.person.date_of_birth = "1988-06-02".to_string();
                partner.person.pan = format!("ABCDE{n:04}F");
                partner.person.aadhaar = format!("98765432{n:04}");
                partner.person.email = format!("partner{n}@example.in");
                partner.person.phone = format!("98765{n:05}");
                partner.capital_contribution = "50000".to_string();
            }
        }
    });
}

async fn upload_all_partner_docs(wizard: &mut WizardController, api: &StubApi) {
    for idx in 0..wizard.form().party_count() {
        for slot in DocumentSlot::PARTY_SLOTS {
            let content_type = if slot == DocumentSlot::Photo {
                "image/jpeg"
            } else {
                "application/pdf"
            };
            let file = FileUpload::new(
                format!("{}_{idx}.bin", match slot {
                    DocumentSlot::Pan => "pan",
                    DocumentSlot::Aadhaar => "aadhaar",
                    DocumentSlot::Photo => "photo",
                    _ => "address",
                }),
                content_type,
                vec![0u8; 16],
            );
            wizard
                .upload_document(api, file, slot, Some(idx))
                .await
                .unwrap();
        }
    }
}

#[tokio::test]
async fn full_llp_flow_submits_expected_payload() {
    let api = StubApi::new();
    let mut wizard = WizardController::new(ServiceType::Llp);

    fill_llp_details(&mut wizard);
    assert!(wizard.next());
    fill_llp_partners(&mut wizard);
    assert!(wizard.next());
    assert_eq!(wizard.current_step(), WizardStep::Documents);

    upload_all_partner_docs(&mut wizard, &api).await;
    assert!(wizard.next()); // -> Review
    assert!(wizard.next()); // -> Payment
    assert_eq!(wizard.current_step(), WizardStep::Payment);

    wizard.set_plan(Plan::Standard);
    let receipt = wizard.submit(&api, &user()).await.unwrap();

    assert!(wizard.is_success());
    assert_eq!(wizard.server_submission_id(), Some(receipt.submission_id.as_str()));

    let submissions = api.submissions.lock().unwrap();
    let payload = &submissions[0];
    assert!(payload.submission_id.starts_with("LLP-"));
    assert_eq!(payload.status, SUBMISSION_STATUS);
    assert_eq!(payload.plan, "STANDARD");
    assert_eq!(payload.user_email, "asha@example.in");
    assert_eq!(payload.documents.len(), 8);

    // Round-trip: each partner's document URLs are exactly the recorded
    // upload URLs for the corresponding slot keys.
    let partners = payload.form_data["partners"].as_array().unwrap();
    assert_eq!(partners.len(), 2);
    for (idx, partner) in partners.iter().enumerate() {
        for slot in DocumentSlot::PARTY_SLOTS {
            let key = bizreg::wizard::slot_key(slot, Some(idx));
            let expected = wizard.documents().record(&key).unwrap().remote_url.clone();
            assert_eq!(
                partner["documents"][slot.key()].as_str(),
                Some(expected.as_str())
            );
        }
    }

    // Uploads were categorized per partner.
    let uploads = api.uploads.lock().unwrap();
    assert!(uploads.iter().any(|c| c == "partner_0_docs"));
    assert!(uploads.iter().any(|c| c == "partner_1_docs"));
}

#[tokio::test]
async fn step_skipping_is_never_possible() {
    let mut wizard = WizardController::new(ServiceType::Llp);
    // Repeated next() without valid data never leaves Details.
    for _ in 0..5 {
        wizard.next();
    }
    assert_eq!(wizard.current_step(), WizardStep::Details);
}

#[tokio::test]
async fn failed_upload_leaves_slot_without_record() {
    let api = StubApi::failing_uploads();
    let mut wizard = WizardController::new(ServiceType::Llp);

    let file = FileUpload::new("pan.pdf", "application/pdf", vec![1, 2, 3]);
    let err = wizard
        .upload_document(&api, file, DocumentSlot::Pan, Some(0))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Api(ApiError::Rejected { status: 500, .. })));

    assert!(wizard.documents().record("pan_0").is_none());
    assert!(matches!(
        wizard.documents().state("pan_0"),
        SlotState::Failed(_)
    ));
}

#[tokio::test]
async fn reupload_overwrites_previous_record() {
    let api = StubApi::new();
    let mut wizard = WizardController::new(ServiceType::Llp);

    let first = FileUpload::new("old.pdf", "application/pdf", vec![1]);
    wizard
        .upload_document(&api, first, DocumentSlot::Pan, Some(0))
        .await
        .unwrap();
    let second = FileUpload::new("new.pdf", "application/pdf", vec![2]);
    wizard
        .upload_document(&api, second, DocumentSlot::Pan, Some(0))
        .await
        .unwrap();

    let record = wizard.documents().record("pan_0").unwrap();
    assert_eq!(record.display_name, "new.pdf");
    assert!(record.remote_url.ends_with("new.pdf"));
}

#[tokio::test]
async fn image_uploads_get_a_preview_url() {
    let api = StubApi::new();
    let mut wizard = WizardController::new(ServiceType::Proprietorship);

    let photo = FileUpload::new("face.jpg", "image/jpeg", vec![0xff]);
    wizard
        .upload_document(&api, photo, DocumentSlot::Photo, None)
        .await
        .unwrap();
    let record = wizard.documents().record("photo").unwrap();
    assert!(record.preview_url.is_some());

    let pdf = FileUpload::new("pan.pdf", "application/pdf", vec![0x25]);
    wizard
        .upload_document(&api, pdf, DocumentSlot::Pan, None)
        .await
        .unwrap();
    assert!(wizard.documents().record("pan").unwrap().preview_url.is_none());
}

#[tokio::test]
async fn failed_submission_stays_on_payment_and_resets_guard() {
    let api = StubApi::failing_submissions();
    let mut wizard = WizardController::new(ServiceType::Llp);

    fill_llp_details(&mut wizard);
    wizard.next();
    fill_llp_partners(&mut wizard);
    wizard.next();
    upload_all_partner_docs(&mut wizard, &StubApi::new()).await;
    wizard.next();
    wizard.next();
    wizard.set_plan(Plan::Basic);

    let err = wizard.submit(&api, &user()).await.unwrap_err();
    assert!(matches!(err, Error::Api(ApiError::Rejected { status: 422, .. })));
    assert_eq!(wizard.current_step(), WizardStep::Payment);
    assert!(!wizard.is_submitting());
    assert!(!wizard.is_success());
    assert!(wizard.server_submission_id().is_none());
}

#[tokio::test]
async fn submit_requires_payment_step_and_plan() {
    let api = StubApi::new();
    let mut wizard = WizardController::new(ServiceType::Llp);

    let err = wizard.submit(&api, &user()).await.unwrap_err();
    assert!(matches!(
        err,
        Error::Wizard(WizardError::NotOnPaymentStep)
    ));
}

#[tokio::test]
async fn successful_wizard_is_terminal() {
    let api = StubApi::new();
    let mut wizard = WizardController::new(ServiceType::Llp);

    fill_llp_details(&mut wizard);
    wizard.next();
    fill_llp_partners(&mut wizard);
    wizard.next();
    upload_all_partner_docs(&mut wizard, &api).await;
    wizard.next();
    wizard.next();
    wizard.set_plan(Plan::Premium);
    wizard.submit(&api, &user()).await.unwrap();

    // A second submission, further navigation, and further uploads are all
    // refused; a fresh instance is required to file again.
    let err = wizard.submit(&api, &user()).await.unwrap_err();
    assert!(matches!(err, Error::Wizard(WizardError::AlreadySubmitted)));
    assert!(!wizard.next());
    assert!(!wizard.back());
    let file = FileUpload::new("late.pdf", "application/pdf", vec![9]);
    let err = wizard
        .upload_document(&api, file, DocumentSlot::Pan, Some(0))
        .await
        .unwrap_err();
    assert!(matches!(err, Error::Wizard(WizardError::AlreadySubmitted)));
}

#[tokio::test]
async fn proprietorship_documents_use_unsuffixed_keys() {
    let api = StubApi::new();
    let mut wizard = WizardController::new(ServiceType::Proprietorship);

    for slot in DocumentSlot::PARTY_SLOTS {
        let file = FileUpload::new("doc.pdf", "application/pdf", vec![7]);
        wizard
            .upload_document(&api, file, slot, None)
            .await
            .unwrap();
    }

    let report = wizard.validate_step(WizardStep::Documents);
    assert!(report.is_valid, "errors: {:?}", report.errors);

    let uploads = api.uploads.lock().unwrap();
    assert!(uploads.iter().all(|c| c == "proprietor_docs"));
}

#[tokio::test]
async fn seeded_form_matches_service() {
    let wizard = WizardController::new(ServiceType::PublicLimited);
    assert!(matches!(
        wizard.form(),
        RegistrationForm::PublicLimited(_)
    ));
    assert_eq!(wizard.form().party_count(), 3);
    assert_eq!(wizard.current_step(), WizardStep::Details);
}
