//! Data models for parish backend entities.
//!
//! This module contains the wire types exchanged with the backend:
//!
//! - `HolyItem`, `HolyItemOrder`: Inventory and orders
//! - `MassIntention`: Mass intention requests and their approval/payment state
//! - `Certificate`, `CertificateType`: Sacramental certificate requests
//! - `AltarSchedule`: Altar-service rosters
//! - `Notification`, `MonthlyPdf`: Announcements and newsletters
//! - `UserProfile`, `ParishProfile`: Account and parish membership data

pub mod certificate;
pub mod holy_item;
pub mod mass_intention;
pub mod newsletter;
pub mod person;
pub mod schedule;
pub mod status;

pub use certificate::{Certificate, CertificateRequest, CertificateType};
pub use holy_item::{HolyItem, HolyItemOrder, NewHolyItem, OrderRequest};
pub use mass_intention::{MassIntention, NewMassIntention};
pub use newsletter::{MonthlyPdf, Notification};
pub use person::{Birthday, EditUser, ParishProfile, ParishProfileInput, UserProfile, SUPERADMIN_ROLE};
pub use schedule::{AltarSchedule, AltarScheduleInput};
pub use status::RequestStatus;
