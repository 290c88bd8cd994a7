pub mod endpoint;
pub mod log;

pub use endpoint::{
    get_endpoint, list_endpoints, preview_request, send_request, EndpointListResponse,
    FieldsRequest, SendResponse, SendState,
};
pub use log::{clear_logs, get_log, list_logs, LogListResponse, LogQueryParams};
