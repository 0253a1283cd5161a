pub mod orderedheaders;
pub mod request;
pub mod requestbody;
pub mod response;
pub mod responsebody;
pub mod retry;
pub mod streamfactory;
pub mod transaction;

// Re-exports for convenience
pub use orderedheaders::OrderedHeaders;
pub use request::HttpRequest;
pub use requestbody::RequestBody;
pub use response::{HttpResponse, StatusClass};
pub use responsebody::ResponseBody;
pub use transaction::{HttpNetworkTransaction, TransactionError};
