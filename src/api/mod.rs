use std::sync::Arc;

pub mod plans;
pub mod profile;
pub mod alerts;
pub mod jobs;

use crate::alert_checker::AlertChecker;
use crate::mailer::Mailer;
use crate::services::{ PlanSearchService, ProfileService, TrackingService };

#[derive(Clone)]
pub struct AppState {
    pub search_service: Arc<PlanSearchService>,
    pub profile_service: Arc<ProfileService>,
    pub tracking_service: Arc<TrackingService>,
    pub alert_checker: Arc<AlertChecker>,
    pub mailer: Arc<Mailer>,
    pub bug_report_email: String,
}

impl AppState {
    pub fn new(
        search_service: Arc<PlanSearchService>,
        profile_service: Arc<ProfileService>,
        tracking_service: Arc<TrackingService>,
        alert_checker: Arc<AlertChecker>,
        mailer: Arc<Mailer>,
        bug_report_email: String
    ) -> Self {
        Self {
            search_service,
            profile_service,
            tracking_service,
            alert_checker,
            mailer,
            bug_report_email,
        }
    }
}
