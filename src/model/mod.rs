pub mod document_request;
pub mod leave_request;
pub mod role;
pub mod staff;
