pub(crate) mod error;
pub(crate) mod names;
pub(crate) mod namespace;

pub use error::ConsoleError;
pub use names::{extract_names, is_identifier_char, skip_call_arguments};
pub use namespace::{Candidate, Member, MemberKind, Namespace};
