//! End-to-end walks through a small multi-page form:
//! - row packing of a page
//! - page gating with the multiselect "other" rule
//! - upload gating and the review step
//! - jumping back from review to edit a section

use std::sync::Arc;

use forms::{
    FieldDescriptor, FieldKind, FieldValue, FormSchema, FormSession, LayoutMode, SignatureData,
    Transition, UploadedFile, INCOMPLETE_PAGE_MESSAGE,
};
use pretty_assertions::assert_eq;

fn schema() -> Arc<FormSchema> {
    let fields = vec![
        FieldDescriptor::new("firstName", "First Name", FieldKind::Text)
            .span(6)
            .required(),
        FieldDescriptor::new("lastName", "Last Name", FieldKind::Text)
            .span(6)
            .required(),
        FieldDescriptor::new("address", "Address", FieldKind::Text).required(),
        FieldDescriptor::new("eWallet", "eWallet", FieldKind::Multiselect)
            .id("eWallets")
            .options([("gcash", "GCash"), ("maya", "Maya"), ("other", "Other")])
            .on_page(2)
            .required(),
        FieldDescriptor::new("idType", "ID Type", FieldKind::Select)
            .options([("passport", "Passport")])
            .span(8)
            .on_page(3)
            .required(),
        FieldDescriptor::new("idDocument", "ID Upload", FieldKind::Document)
            .accept(["image/jpeg", "image/png", "application/pdf"])
            .max_size(5 * 1024 * 1024)
            .span(4)
            .on_page(3)
            .required(),
        FieldDescriptor::new("eSignature", "Electronic Signature", FieldKind::Signature)
            .on_page(4)
            .required(),
    ];
    Arc::new(FormSchema::new("Flow", fields))
}

fn row_keys(session: &FormSession) -> Vec<Vec<String>> {
    session
        .current_page_rows()
        .iter()
        .map(|row| row.fields().iter().map(|f| f.key.clone()).collect())
        .collect()
}

#[test]
fn first_page_packs_half_half_then_full() {
    let session = FormSession::new(schema());
    assert_eq!(session.total_pages(), 4);
    assert_eq!(
        row_keys(&session),
        vec![
            vec!["firstName".to_string(), "lastName".to_string()],
            vec!["address".to_string()],
        ]
    );
    assert_eq!(
        session.current_page_rows()[0].layout_mode(),
        LayoutMode::Columns
    );
}

#[test]
fn other_selection_gates_the_page_until_specified() {
    let mut session = FormSession::new(schema());
    session.set_value("firstName", "Ana");
    session.set_value("lastName", "Cruz");
    session.set_value("address", "1 Rizal St");
    assert!(session.next_page().moved());

    session.set_value("eWallet", FieldValue::list(["other"]));
    session.set_value("eWalletOther", "");
    assert!(!session.is_current_page_valid());
    assert_eq!(session.next_page(), Transition::Blocked);
    assert_eq!(session.error_message(), Some(INCOMPLETE_PAGE_MESSAGE));
    assert_eq!(session.current_page(), 2);

    session.set_value("eWalletOther", "custom");
    assert!(session.is_current_page_valid());
    assert_eq!(session.next_page(), Transition::Moved { from: 2, to: 3 });
    assert_eq!(session.error_message(), None);
}

#[test]
fn upload_row_uses_grid_and_gates_on_file() {
    let mut session = FormSession::new(schema());
    session.set_bypass_validation(true);
    session.next_page();
    session.next_page();
    session.set_bypass_validation(false);
    assert_eq!(session.current_page(), 3);

    let rows = session.current_page_rows();
    assert_eq!(rows.len(), 1);
    assert!(rows[0].uses_grid());
    drop(rows);

    session.set_value("idType", "passport");
    assert!(!session.is_current_page_valid());

    let rejected = session.attach_document(
        "idDocument",
        UploadedFile::new("id.gif", "image/gif", vec![0; 16]),
    );
    assert!(rejected.is_err());
    assert!(!session.is_current_page_valid());

    session
        .attach_document("idDocument", UploadedFile::new("id.png", "image/png", vec![0; 16]))
        .expect("png is accepted");
    assert!(session.is_current_page_valid());
    assert_eq!(session.document_metadata()["idDocument"][0].size, 16);
}

#[test]
fn complete_walk_reaches_review_and_edits_back() {
    let mut session = FormSession::new(schema());
    session.set_value("firstName", "Ana");
    session.set_value("lastName", "Cruz");
    session.set_value("address", "1 Rizal St");
    session.next_page();
    session.set_value("eWallet", FieldValue::list(["gcash", "maya"]));
    session.next_page();
    session.set_value("idType", "passport");
    session
        .attach_document("idDocument", UploadedFile::new("id.pdf", "application/pdf", vec![1]))
        .expect("pdf is accepted");
    session.next_page();

    assert_eq!(session.next_page(), Transition::Blocked);
    session.set_value(
        "eSignature",
        SignatureData {
            signature_image: Some("data:image/png;base64,AAAA".into()),
            typed_name: "Ana Cruz".into(),
            consent_given: true,
        },
    );
    assert_eq!(session.next_page(), Transition::Moved { from: 4, to: 5 });
    assert!(session.is_review());
    assert!(session.validate_form().is_ok());

    let review = session.review(|page| format!("Page {page}"));
    assert_eq!(review.len(), 4);
    assert_eq!(review[1].entries[0].value, "GCash, Maya");
    assert_eq!(review[2].entries[0].value, "Passport");

    assert!(session.edit_section(2).moved());
    assert_eq!(session.current_page(), 2);
    assert_eq!(session.previous_page(), Transition::Moved { from: 2, to: 1 });
}

#[test]
fn whole_form_message_names_first_incomplete_field() {
    let mut session = FormSession::new(schema());
    session.set_value("firstName", "Ana");
    let issue = session.validate_form().unwrap_err();
    assert_eq!(issue.to_string(), "Please fill in Last Name");
    assert_eq!(session.error_message(), Some("Please fill in Last Name"));
}
