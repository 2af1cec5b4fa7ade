use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use forms::{DocumentMetadata, FormData, FormSession};
use serde::{Deserialize, Serialize};

use crate::onboarding::FormVariant;

/// Final onboarding payload. Documents travel as metadata; the files
/// themselves go through the upload endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnboardingSubmission {
    pub form_type: FormVariant,
    pub form_data: FormData,
    pub documents: BTreeMap<String, Vec<DocumentMetadata>>,
    pub submitted_at: DateTime<Utc>,
}

impl OnboardingSubmission {
    pub fn from_session(form_type: FormVariant, session: &FormSession) -> Self {
        Self {
            form_type,
            form_data: session.data().clone(),
            documents: session.document_metadata(),
            submitted_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use forms::UploadedFile;

    #[test]
    fn carries_metadata_not_bytes() {
        let mut session = FormSession::new(Arc::new(FormVariant::Agent.schema()));
        session.set_value("firstName", "Ana");
        session
            .attach_document("idDocument", UploadedFile::new("id.png", "image/png", vec![7; 10]))
            .expect("attach");

        let submission = OnboardingSubmission::from_session(FormVariant::Agent, &session);
        let json = serde_json::to_value(&submission).expect("serialize");
        assert_eq!(json["formType"], "agent");
        assert_eq!(json["formData"]["firstName"], "Ana");
        assert_eq!(json["documents"]["idDocument"][0]["size"], 10);
        assert_eq!(json["documents"]["idDocument"][0]["type"], "image/png");
    }
}
