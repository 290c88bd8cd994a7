pub mod demo;
pub mod executor;
pub mod playground;
pub mod request_builder;

pub use executor::{ExecutorConfig, Execution, RequestExecutor, ResponseBody};
pub use playground::{Playground, SendOutcome};
pub use request_builder::{build_request, BuiltRequest, FieldValues};
