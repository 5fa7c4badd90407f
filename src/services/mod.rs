pub mod identity_service;
pub use identity_service::{IdentityError, IdentityService, RegisterInput};

pub mod identity_service_impl;
pub use identity_service_impl::SeaOrmIdentityService;

pub mod opportunity_service;
pub use opportunity_service::{
    CreateOpportunityInput, EditOpportunityInput, OpportunityError, OpportunityService,
};

pub mod opportunity_service_impl;
pub use opportunity_service_impl::SeaOrmOpportunityService;
