//! Onboarding form variants.
//!
//! Every variant is the shared base list (pages 1-3), a variant-specific
//! extension (page 4) and the trailing e-signature (page 5), concatenated in
//! that order.

use forms::{FieldDescriptor, FieldKind, FormSchema};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString, IntoStaticStr};

const MAX_ID_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;

/// Titles of the shared pages, indexed by `page - 1`.
const BASE_SECTION_TITLES: [&str; 3] = [
    "Personal Information",
    "Contact Information",
    "Address Information",
];

pub const SIGNATURE_PAGE: u32 = 5;
const SIGNATURE_TITLE: &str = "E-Signature";

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum FormVariant {
    Agent,
    Borrower,
    Lender,
    Supervisor,
    Partner,
    Admin,
}

impl FormVariant {
    /// Lowercase tag used in storage keys and submissions.
    pub fn tag(self) -> &'static str {
        self.into()
    }

    pub fn title(self) -> String {
        let name = match self {
            FormVariant::Agent => "Agent",
            FormVariant::Borrower => "Borrower",
            FormVariant::Lender => "Lender",
            FormVariant::Supervisor => "Supervisor",
            FormVariant::Partner => "Partner",
            FormVariant::Admin => "Admin",
        };
        format!("{name} Onboarding")
    }

    /// Page 4 fields for this variant.
    pub fn extension_fields(self) -> Vec<FieldDescriptor> {
        match self {
            FormVariant::Agent => agent_fields(),
            FormVariant::Borrower => borrower_fields(),
            FormVariant::Lender => lender_fields(),
            FormVariant::Supervisor => supervisor_fields(),
            FormVariant::Partner => vec![license_field("partnerLicenseNumber", "Partner")],
            FormVariant::Admin => vec![license_field("adminLicenseNumber", "Admin")],
        }
    }

    pub fn schema(self) -> FormSchema {
        FormSchema::builder(self.title())
            .extend(base_fields())
            .extend(self.extension_fields())
            .push(signature_field())
            .build()
    }

    fn extension_title(self) -> &'static str {
        match self {
            FormVariant::Agent => "Identification & Documents",
            FormVariant::Borrower => "Loan Information",
            FormVariant::Lender => "Business Information",
            FormVariant::Supervisor => "Supervisor Information",
            FormVariant::Partner => "Partner Information",
            FormVariant::Admin => "Admin Information",
        }
    }

    /// Review/section heading for `page`, `Page N` when unmapped.
    pub fn section_title(self, page: u32) -> String {
        match page {
            1..=3 => BASE_SECTION_TITLES[(page - 1) as usize].to_string(),
            4 => self.extension_title().to_string(),
            SIGNATURE_PAGE => SIGNATURE_TITLE.to_string(),
            _ => format!("Page {page}"),
        }
    }
}

/// Personal, contact and address fields shared by every variant.
pub fn base_fields() -> Vec<FieldDescriptor> {
    vec![
        FieldDescriptor::new("firstName", "First Name", FieldKind::Text)
            .span(4)
            .placeholder("Enter your first name")
            .required(),
        FieldDescriptor::new("middleName", "Middle Name(s)", FieldKind::Text)
            .span(8)
            .placeholder("Enter your middle name(s)"),
        FieldDescriptor::new("lastName", "Last Name", FieldKind::Text)
            .placeholder("Enter your last name")
            .required(),
        FieldDescriptor::new("prefix", "Prefix", FieldKind::Select)
            .span(4)
            .placeholder("Select your prefix")
            .options([
                ("mr", "Mr."),
                ("mrs", "Mrs."),
                ("ms", "Ms."),
                ("dr", "Dr."),
                ("prof", "Prof."),
                ("eng", "Eng."),
                ("attys", "Attys."),
            ]),
        FieldDescriptor::new("birthDate", "Birth Date", FieldKind::Date)
            .span(4)
            .placeholder("Enter your birth date")
            .required(),
        FieldDescriptor::new("suffix", "Suffix", FieldKind::Select)
            .span(4)
            .placeholder("Select your suffix")
            .options([
                ("jr", "Jr."),
                ("sr", "Sr."),
                ("ii", "II"),
                ("iii", "III"),
                ("iv", "IV"),
                ("v", "V"),
            ]),
        // contact
        FieldDescriptor::new("email", "Email", FieldKind::Email)
            .placeholder("Enter your email")
            .on_page(2)
            .required(),
        FieldDescriptor::new("phoneNumber", "Phone Number", FieldKind::Tel)
            .span(6)
            .placeholder("Enter your phone number")
            .on_page(2)
            .required(),
        FieldDescriptor::new("viberNumber", "Viber Number", FieldKind::Tel)
            .span(6)
            .placeholder("Enter your Viber number")
            .on_page(2),
        FieldDescriptor::new("gender", "Gender", FieldKind::Select)
            .span(6)
            .placeholder("Select your gender")
            .options([("male", "Male"), ("female", "Female"), ("other", "Other")])
            .on_page(2)
            .required(),
        FieldDescriptor::new("maritalStatus", "Marital Status", FieldKind::Select)
            .span(6)
            .placeholder("Select your marital status")
            .options([
                ("single", "Single"),
                ("married", "Married"),
                ("separated", "Separated"),
                ("divorced", "Annulled"),
                ("widowed", "Widowed"),
            ])
            .on_page(2)
            .required(),
        // address
        FieldDescriptor::new("address", "Street Address", FieldKind::Text)
            .placeholder("Enter your address")
            .on_page(3)
            .required(),
        FieldDescriptor::new("city", "City/Municipality", FieldKind::Text)
            .span(4)
            .placeholder("Enter your city")
            .on_page(3)
            .required(),
        FieldDescriptor::new("province", "Province", FieldKind::Text)
            .span(4)
            .placeholder("Enter your province")
            .on_page(3)
            .required(),
        FieldDescriptor::new("barangay", "Barangay", FieldKind::Text)
            .span(4)
            .placeholder("Enter your barangay")
            .on_page(3)
            .required(),
        FieldDescriptor::new("eWallet", "eWallet", FieldKind::Multiselect)
            .id("eWallets")
            .placeholder("What eWallets do you have?")
            .options([
                ("gcash", "GCash"),
                ("maya-individual", "Maya Individual"),
                ("maya-business", "Maya Business"),
                ("starpay", "Starpay"),
                ("grab", "Grab"),
                ("shopeepay", "ShopeePay"),
                ("gotyme", "GoTyme"),
                ("other", "Other"),
                ("none", "None"),
            ])
            .on_page(3)
            .required(),
    ]
}

/// The trailing signature every variant ends with.
pub fn signature_field() -> FieldDescriptor {
    FieldDescriptor::new("eSignature", "Electronic Signature", FieldKind::Signature)
        .on_page(SIGNATURE_PAGE)
        .required()
}

fn agent_fields() -> Vec<FieldDescriptor> {
    vec![
        FieldDescriptor::new("idType", "ID Type", FieldKind::Select)
            .span(8)
            .placeholder("Select your ID type")
            .options([
                ("drivers-license", "Driver's License"),
                ("passport", "Passport"),
                ("sss", "Social Security System (SSS) Card"),
                ("philhealth", "PhilHealth Card"),
                ("philsys", "PhilSys Card"),
                ("pagibig", "Pag-IBIG Card"),
                ("other", "Other"),
            ])
            .on_page(4)
            .required(),
        FieldDescriptor::new("idDocument", "ID Upload", FieldKind::Document)
            .span(4)
            .describe("Upload a valid government-issued ID (Driver's License, Passport, etc.)")
            .accept(["image/jpeg", "image/png", "application/pdf"])
            .max_size(MAX_ID_UPLOAD_BYTES)
            .on_page(4)
            .required(),
    ]
}

fn borrower_fields() -> Vec<FieldDescriptor> {
    vec![
        FieldDescriptor::new("loanAmount", "Desired Loan Amount", FieldKind::Number)
            .placeholder("Enter desired loan amount")
            .on_page(4)
            .required(),
        FieldDescriptor::new("purpose", "Loan Purpose", FieldKind::Text)
            .placeholder("Describe the purpose of the loan")
            .on_page(4)
            .required(),
    ]
}

fn lender_fields() -> Vec<FieldDescriptor> {
    vec![
        FieldDescriptor::new("institutionName", "Institution Name", FieldKind::Text)
            .placeholder("Enter your institution name")
            .on_page(4)
            .required(),
        FieldDescriptor::new("maxLoanAmount", "Maximum Loan Amount", FieldKind::Number)
            .placeholder("Enter maximum loan amount")
            .on_page(4)
            .required(),
    ]
}

fn supervisor_fields() -> Vec<FieldDescriptor> {
    vec![
        license_field("supervisorLicenseNumber", "Supervisor"),
        FieldDescriptor::new("supervisorRole", "Supervisor Role", FieldKind::Text)
            .placeholder("Enter your supervisor role")
            .on_page(4)
            .required(),
    ]
}

fn license_field(key: &str, role: &str) -> FieldDescriptor {
    FieldDescriptor::new(key, format!("{role} License Number"), FieldKind::Text)
        .placeholder(format!("Enter your {} license number", role.to_lowercase()))
        .on_page(4)
        .required()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn tags_round_trip_through_strum_and_serde() {
        assert_eq!(FormVariant::Agent.tag(), "agent");
        assert_eq!(FormVariant::from_str("borrower"), Ok(FormVariant::Borrower));
        assert!(FormVariant::from_str("pirate").is_err());
        assert_eq!(
            serde_json::to_string(&FormVariant::Supervisor).expect("serialize"),
            "\"supervisor\""
        );
    }

    #[test]
    fn section_titles_fall_back_to_page_number() {
        assert_eq!(FormVariant::Agent.section_title(1), "Personal Information");
        assert_eq!(FormVariant::Agent.section_title(4), "Identification & Documents");
        assert_eq!(FormVariant::Borrower.section_title(4), "Loan Information");
        assert_eq!(FormVariant::Lender.section_title(5), "E-Signature");
        assert_eq!(FormVariant::Admin.section_title(9), "Page 9");
        assert_eq!(FormVariant::Admin.section_title(0), "Page 0");
    }

    #[test]
    fn agent_page_four_packs_into_one_grid_row() {
        let schema = FormVariant::Agent.schema();
        let rows = schema.page_rows(4);
        assert_eq!(rows.len(), 1);
        assert!(rows[0].uses_grid());
    }

    #[test]
    fn first_page_rows() {
        let schema = FormVariant::Borrower.schema();
        let packed = schema.page_rows(1);
        let rows: Vec<Vec<&str>> = packed
            .iter()
            .map(|r| r.fields().iter().map(|f| f.key.as_str()).collect())
            .collect();
        assert_eq!(
            rows,
            vec![
                vec!["firstName", "middleName"],
                vec!["lastName"],
                vec!["prefix", "birthDate", "suffix"],
            ]
        );
    }
}
