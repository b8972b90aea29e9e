//! Scraping pipeline
//!
//! Raw portal HTML goes through table extraction ([`dom`]), table
//! selection ([`locate`]), record normalization ([`normalize`]) and
//! metric computation ([`metrics`]); [`pages`] wires those stages up per
//! portal page and [`ScrapeEngine`] drives all three pages into one
//! [`AttendanceReport`].

pub mod dom;
pub mod locate;
pub mod metrics;
pub mod normalize;
pub mod pages;

use crate::client::{PortalClient, Resource};
use crate::error::{Result, SamvidhaError};
use crate::models::AttendanceReport;
use crate::scrape::locate::{KeywordLocator, TableLocator};
use crate::scrape::pages::{parse_attendance_page, parse_biometric_page, parse_register_page};

/// Fetches the three portal pages and assembles a full report.
pub struct ScrapeEngine {
    client: PortalClient,
    locator: Box<dyn TableLocator + Send + Sync>,
}

impl ScrapeEngine {
    /// Engine with the default keyword locator
    pub fn new(client: PortalClient) -> Self {
        Self::with_locator(client, Box::new(KeywordLocator))
    }

    pub fn with_locator(
        client: PortalClient,
        locator: Box<dyn TableLocator + Send + Sync>,
    ) -> Self {
        Self { client, locator }
    }

    /// Fetch all pages concurrently and build the report.
    ///
    /// Biometric and register fetches degrade to `None`/empty on failure.
    /// An empty student info block is the one fatal case: the portal
    /// serves a data-less attendance page to sessions whose login did not
    /// actually authenticate.
    pub async fn run(&self) -> Result<AttendanceReport> {
        let (attendance_html, biometric_html, register_html) = tokio::join!(
            self.client.fetch(Resource::Attendance),
            self.client.fetch(Resource::Biometric),
            self.client.fetch(Resource::Register),
        );

        let attendance =
            parse_attendance_page(&attendance_html.unwrap_or_default(), self.locator.as_ref());
        let biometric = match biometric_html {
            Ok(html) => parse_biometric_page(&html, self.locator.as_ref()),
            Err(_) => None,
        };
        let register = match register_html {
            Ok(html) => parse_register_page(&html, self.locator.as_ref()),
            Err(_) => Vec::new(),
        };

        if attendance.student_info.is_empty() {
            return Err(SamvidhaError::InvalidCredentials);
        }

        Ok(AttendanceReport {
            student_info: attendance.student_info,
            course_attendance: attendance.course_attendance,
            overall_average: attendance.overall_average,
            biometric,
            register,
        })
    }
}
