pub mod auth_service;
pub mod exam_api;
pub mod exam_service;
pub mod result_service;
pub mod subject_service;

pub use auth_service::AuthService;
pub use exam_api::ExamApi;
pub use exam_service::ExamService;
pub use result_service::{ResultService, ResultSummary};
pub use subject_service::SubjectService;
