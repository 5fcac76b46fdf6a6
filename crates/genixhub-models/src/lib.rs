//! # Genix Hub Models
//!
//! Domain models and DTOs for the Genix Hub API.
//!
//! - [`schools`]: school entity, registration/login DTOs, response shapes
//! - [`students`]: student entity, registration/login DTOs, response shapes
//! - [`auth`]: refresh token request and token responses
//! - [`validation`]: field validators shared by the DTOs
//! - [`states`]: the Indian states and union territories a school may be in

pub mod auth;
pub mod schools;
pub mod states;
pub mod students;
pub mod validation;

pub use auth::{RefreshTokenRequest, TokensData};
pub use schools::{
    LoginSchoolDto, NewSchool, RegisterSchoolDto, School, SchoolAuthData, SchoolBrief,
    SchoolListData, SchoolProfile, SchoolSummary,
};
pub use students::{
    LoginStudentDto, NewStudent, RegisterStudentDto, Student, StudentLoginData,
    StudentLoginProfile, StudentProfile, StudentRegisterData,
};
