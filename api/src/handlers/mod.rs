//! HTTP handlers
//!
//! Thin axum handlers translating HTTP to service calls.

pub mod auth;
pub mod contracts;
pub mod due_diligence;
pub mod onboarding;
pub mod projects;
pub mod quotations;
pub mod reviews;

pub use auth::{login, logout, me, signup};
pub use contracts::{
    complete_contract, create_contract, get_contract, list_my_contracts, pay_milestone,
    sign_contract, terminate_contract,
};
pub use due_diligence::{get_due_diligence, run_due_diligence};
pub use onboarding::{
    client_status, complete_client, complete_provider, provider_status, start_client,
    start_provider, submit_client_step, submit_provider_step,
};
pub use projects::{
    cancel_project, create_project, get_project, list_my_projects, list_open_projects,
};
pub use quotations::{
    accept_quotation, list_my_quotations, list_project_quotations, reject_quotation,
    submit_quotation, withdraw_quotation,
};
pub use reviews::{
    create_review, get_rating_card, get_review_analytics, list_eligible_contracts,
    list_my_reviews, list_user_reviews, vote_on_review,
};
