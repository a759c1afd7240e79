pub mod registry;
pub mod types;

pub use registry::{builtin_suite, SuiteFile, SuiteRegistry};
pub use types::{validate_case, validate_file_name, Expectation, TestCase};
