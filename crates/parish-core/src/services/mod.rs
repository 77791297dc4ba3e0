//! Feature-level services, one per area of the parish backend.
//!
//! Each service is a thin borrow of the [`Gateway`] and builds one
//! [`RequestContext`](crate::api::RequestContext) per call. None of them
//! deal with credentials; the gateway attaches and purges those.

pub mod certificates;
pub mod general;
pub mod holy_items;
pub mod mass_intentions;
pub mod profile;

pub use certificates::CertificateService;
pub use general::GeneralService;
pub use holy_items::HolyItemService;
pub use mass_intentions::MassIntentionService;
pub use profile::UserProfileService;

use crate::api::Gateway;
use crate::auth::AuthService;

impl Gateway {
    pub fn auth(&self) -> AuthService<'_> {
        AuthService::new(self)
    }

    pub fn holy_items(&self) -> HolyItemService<'_> {
        HolyItemService::new(self)
    }

    pub fn mass_intentions(&self) -> MassIntentionService<'_> {
        MassIntentionService::new(self)
    }

    pub fn certificates(&self) -> CertificateService<'_> {
        CertificateService::new(self)
    }

    pub fn general(&self) -> GeneralService<'_> {
        GeneralService::new(self)
    }

    pub fn profile(&self) -> UserProfileService<'_> {
        UserProfileService::new(self)
    }
}
