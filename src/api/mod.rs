pub mod dashboard;
pub mod document_request;
pub mod leave_request;
pub mod staff;
