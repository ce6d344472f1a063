use crate::api::dashboard::DashboardStats;
use crate::api::document_request::{CreateDocumentRequest, DocumentFilter, DocumentListResponse};
use crate::api::leave_request::{
    AnnualLeaveSummary, CreateLeave, DecisionNote, LeaveFilter, LeaveListResponse,
};
use crate::api::staff::{CreateStaff, StaffListResponse};
use crate::eligibility::Eligibility;
use crate::model::document_request::{DocumentRequest, DocumentType};
use crate::model::leave_request::{LeaveRequest, LeaveStatus, TravelType};
use crate::model::staff::{Staff, StaffRole};
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi, openapi};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Awqaf Leave Management API",
        version = "1.0.0",
        description = r#"
## Leave Management for Religious-Affairs Staff

This API powers the leave administration of religious-duty staff (khateebs,
imams and muezzins assigned to mosques).

### Key Features
- **Staff Registry**
  - Register, update, list and look up staff by national ID
- **Leave Management**
  - Submit requests, evaluate them against the annual allowance,
    approve/reject with admin notes, view history and annual summaries
- **Official Documents**
  - Log issued work certificates, leave notices and resumption memos
- **Dashboard**
  - Request counters and recent submissions

### Security
Endpoints outside `/auth` are protected using **JWT Bearer authentication**.
Approval, rejection and deletion are restricted to **Admin** accounts.

### Response Format
- JSON-based RESTful responses
- Pagination supported for list endpoints

---
Built with **Rust**, **Actix Web**, **SQLx**, and **Utoipa**.
"#,
    ),
    paths(
        crate::api::leave_request::leave_list,
        crate::api::leave_request::get_leave,
        crate::api::leave_request::create_leave,
        crate::api::leave_request::approve_leave,
        crate::api::leave_request::reject_leave,
        crate::api::leave_request::delete_leave,
        crate::api::leave_request::leave_summary,

        crate::api::staff::create_staff,
        crate::api::staff::get_staff,
        crate::api::staff::list_staff,
        crate::api::staff::update_staff,
        crate::api::staff::delete_staff,

        crate::api::document_request::create_document_request,
        crate::api::document_request::list_document_requests,

        crate::api::dashboard::get_dashboard
    ),
    components(
        schemas(
            LeaveFilter,
            LeaveRequest,
            LeaveListResponse,
            CreateLeave,
            DecisionNote,
            AnnualLeaveSummary,
            Eligibility,
            LeaveStatus,
            TravelType,
            CreateStaff,
            Staff,
            StaffRole,
            StaffListResponse,
            CreateDocumentRequest,
            DocumentRequest,
            DocumentType,
            DocumentFilter,
            DocumentListResponse,
            DashboardStats
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Leave", description = "Leave request APIs"),
        (name = "Staff", description = "Staff registry APIs"),
        (name = "Document", description = "Official document APIs"),
        (name = "Dashboard", description = "Statistics APIs"),
    )
)]
pub struct ApiDoc;

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}
