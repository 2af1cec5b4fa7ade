//! Sample values for command tests.

use forms::{FieldDescriptor, FieldKind, FieldValue, FormData, FormSchema, SignatureData};

pub fn signed() -> FieldValue {
    FieldValue::Signature(SignatureData {
        signature_image: Some("data:image/png;base64,AAAA".into()),
        typed_name: "Ana Reyes".into(),
        consent_given: true,
    })
}

/// A value for every non-upload field that satisfies its kind.
pub fn complete_data(schema: &FormSchema) -> FormData {
    let mut data = FormData::new();
    for field in schema.fields().iter().filter(|f| !f.kind.is_upload()) {
        data.set(field.key.clone(), sample_value(field));
    }
    data
}

fn sample_value(field: &FieldDescriptor) -> FieldValue {
    match &field.kind {
        FieldKind::Signature => signed(),
        FieldKind::Multiselect => FieldValue::list([field.options[0].value.clone()]),
        FieldKind::Select => FieldValue::text(field.options[0].value.clone()),
        FieldKind::Checkbox => FieldValue::Bool(true),
        FieldKind::Email => FieldValue::text("ana@example.com"),
        FieldKind::Tel => FieldValue::text("09171234567"),
        FieldKind::Number => FieldValue::text("12"),
        FieldKind::Date => FieldValue::text("1990-01-01"),
        _ => FieldValue::text("Sample"),
    }
}
