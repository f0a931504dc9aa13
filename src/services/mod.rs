pub mod field_extractor;
pub mod member_record;
pub mod result_writer;
pub mod session_classifier;
pub mod society_extractor;

#[cfg(test)]
pub(crate) mod test_pages;

pub use field_extractor::{extract_field, FieldDescriptor, PageIndex, Resolver, RESOLVER_CHAIN};
pub use member_record::{extract_member_record, MEMBER_FIELDS};
pub use result_writer::{ResultWriter, ValidationReport};
pub use session_classifier::{ExpiryReason, SessionClassifier, SessionVerdict};
pub use society_extractor::extract_society_memberships;
