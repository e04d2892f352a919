pub mod rest;
pub mod traits;

pub use rest::RestPlaybooksClient;
pub use traits::{ClientError, ClientResult, PlaybooksClient};
