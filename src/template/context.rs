// ABOUTME: Render context binding a report and an optional exception
// ABOUTME: Supplies report and exception values for the built-in tokens

use crate::report::{GeneralInfo, Report, SerializableException};

use super::tokens;

#[derive(Debug, Clone, Copy)]
pub struct RenderContext<'a> {
    report: &'a Report,
    exception: Option<&'a SerializableException>,
}

impl<'a> RenderContext<'a> {
    pub fn new(report: &'a Report, exception: Option<&'a SerializableException>) -> Self {
        Self { report, exception }
    }

    /// Bind the report together with the exception it carries, if any.
    pub fn from_report(report: &'a Report) -> Self {
        Self::new(report, report.exception())
    }

    pub fn report(&self) -> &'a Report {
        self.report
    }

    pub fn general_info(&self) -> &'a GeneralInfo {
        self.report.general_info()
    }

    pub fn exception(&self) -> Option<&'a SerializableException> {
        self.exception
    }

    /// Values of the report-derived built-in tokens.
    pub fn report_values(&self) -> Vec<(&'static str, Option<String>)> {
        let info = self.general_info();
        vec![
            (tokens::APP_NAME, info.host_application.clone()),
            (tokens::APP_VERSION, info.host_application_version.clone()),
            (tokens::CLR_VERSION, info.runtime_version.clone()),
            (tokens::NBUG_VERSION, info.library_version.clone()),
            (tokens::EXCEPTION_DATE, info.date_time.clone()),
            (
                tokens::SUBMISSION_USER_COMMENT,
                info.user_description.clone(),
            ),
        ]
    }

    /// Values of the exception-derived built-in tokens; empty when no exception is bound.
    pub fn exception_values(&self) -> Vec<(&'static str, Option<String>)> {
        let Some(exception) = self.exception else {
            return Vec::new();
        };

        vec![
            (tokens::EXCEPTION_SOURCE, exception.source.clone()),
            (tokens::EXCEPTION_TYPE, exception.type_name.clone()),
            (tokens::EXCEPTION_MESSAGE, exception.message.clone()),
            (tokens::EXCEPTION_TARGET, exception.target_site.clone()),
            (tokens::EXCEPTION_STACKTRACE, exception.stack_trace.clone()),
            (
                tokens::EXCEPTION_EXTENDED_INFORMATION,
                exception.extended_information_text(),
            ),
        ]
    }
}
