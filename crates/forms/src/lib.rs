//! Dynamic form engine.
//!
//! A form is a flat, ordered list of [`FieldDescriptor`]s. Everything else is
//! derived from it:
//! - [`pagination`] groups the list into numbered pages
//! - [`layout`] packs one page into visual rows on a 12 column grid
//! - [`state`] holds the entered values and their per-type defaults
//! - [`validation`] decides whether a page (or the whole form) is complete
//! - [`navigation`] moves a page cursor, gated by page validity
//! - [`session`] ties the pieces together for one form being filled in
//!
//! ```ignore
//! use forms::{FieldDescriptor, FieldKind, FormSchema, FormSession};
//!
//! let schema = FormSchema::new("Signup", vec![
//!     FieldDescriptor::new("email", "Email", FieldKind::Email).required(),
//!     FieldDescriptor::new("phone", "Phone", FieldKind::Tel).span(6).on_page(2),
//! ]);
//! let mut session = FormSession::new(schema.into());
//! session.set_value("email", "someone@example.com");
//! session.next_page();
//! ```

pub mod documents;
pub mod errors;
pub mod field;
pub mod layout;
pub mod navigation;
pub mod pagination;
pub mod review;
pub mod schema;
pub mod session;
pub mod state;
pub mod validation;

pub use documents::{DocumentMetadata, DocumentStore, UploadedFile};
pub use errors::FormError;
pub use field::{FieldDescriptor, FieldKind, FieldOption, OTHER_OPTION};
pub use layout::{pack_rows, LayoutMode, Row, ROW_BUDGET};
pub use navigation::{Effect, Navigator, Transition, INCOMPLETE_PAGE_MESSAGE};
pub use pagination::PageIndex;
pub use review::{ReviewEntry, ReviewSection};
pub use schema::FormSchema;
pub use session::FormSession;
pub use state::{FieldValue, FormData, SignatureData};
pub use validation::{is_page_valid, validate_all, validate_pattern, ValidationIssue};
