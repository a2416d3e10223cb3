use mutaguide::core::models::prediction::Prediction;
use mutaguide::engine::prediction::{JobHandle, JobStatus, PredictionTransport, TransportError};
use regex::Regex;
use std::sync::OnceLock;
use std::time::Duration;
use tracing::debug;

/// Submission endpoint of the SABLE secondary-structure and solvent
/// accessibility prediction server.
pub const DEFAULT_SABLE_URL: &str = "http://sable.cchmc.org/cgi-bin/sable_server_July2003.cgi";

/// Literal marker SABLE's status page shows while a job is still queued.
const QUEUE_MARKER: &str = "Your request is in the queue with the following status";

const HTTP_TIMEOUT: Duration = Duration::from_secs(60);

/// Transport for the SABLE batch predictor.
///
/// SABLE is a third-party web service: submission returns a status page URL,
/// the status page eventually redirects to a POLYVIEW results page, and the
/// predictions are carried in hidden form fields there. All of that markup
/// handling stays here; the engine only ever sees the three typed operations
/// of [`PredictionTransport`].
#[derive(Debug)]
pub struct SableTransport {
    client: reqwest::blocking::Client,
    submit_url: String,
}

impl SableTransport {
    pub fn new(submit_url: impl Into<String>) -> Result<Self, TransportError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(HTTP_TIMEOUT)
            .build()
            .map_err(|e| TransportError::with_source("Failed to build HTTP client", e))?;
        Ok(Self {
            client,
            submit_url: submit_url.into(),
        })
    }

    fn get_text(&self, url: &str) -> Result<String, TransportError> {
        self.client
            .get(url)
            .send()
            .and_then(|r| r.error_for_status())
            .and_then(|r| r.text())
            .map_err(|e| TransportError::with_source(format!("Request to '{}' failed", url), e))
    }
}

impl PredictionTransport for SableTransport {
    fn submit(&self, sequence: &str) -> Result<JobHandle, TransportError> {
        let params = [
            ("seqName", "solvent_accessibility_pred"),
            ("txtSeq", sequence),
            ("SA", "SA"),
            ("SS", "SS"),
            ("version", "sable2"),
        ];

        let text = self
            .client
            .post(&self.submit_url)
            .form(&params)
            .send()
            .and_then(|r| r.error_for_status())
            .and_then(|r| r.text())
            .map_err(|e| TransportError::with_source("Submission to SABLE failed", e))?;

        let status_url = extract_status_url(&text)?;
        debug!(status_url, "SABLE job submitted.");
        Ok(JobHandle::new(status_url))
    }

    fn check_status(&self, job: &JobHandle) -> Result<JobStatus, TransportError> {
        let text = self.get_text(job.id())?;
        if text.contains(QUEUE_MARKER) {
            Ok(JobStatus::Queued)
        } else {
            Ok(JobStatus::Completed)
        }
    }

    fn fetch_result(&self, job: &JobHandle) -> Result<Prediction, TransportError> {
        let status_page = self.get_text(job.id())?;
        let results_url = extract_results_url(&status_page)?;
        debug!(results_url, "Following POLYVIEW results redirect.");

        let results_page = self.get_text(&results_url)?;
        let structure_codes = extract_hidden_field(&results_page, "ssSeq")?;
        let accessibility_field = extract_hidden_field(&results_page, "seaSeq")?;
        let accessibility = parse_accessibility(&accessibility_field)?;

        Ok(Prediction::from_codes(&structure_codes, accessibility))
    }
}

/// The status-page link SABLE's submission reply points at.
fn extract_status_url(html: &str) -> Result<String, TransportError> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r#"<a href="([^"]+)""#).expect("valid pattern"));
    re.captures(html)
        .map(|c| c[1].to_string())
        .ok_or_else(|| TransportError::new("No status URL in SABLE submission reply"))
}

/// The POLYVIEW results link embedded in the completed status page's
/// meta-refresh tag.
fn extract_results_url(html: &str) -> Result<String, TransportError> {
    static RE: OnceLock<Regex> = OnceLock::new();
    let re = RE.get_or_init(|| Regex::new(r#";URL=([^"]+)""#).expect("valid pattern"));
    re.captures(html)
        .map(|c| c[1].to_string())
        .ok_or_else(|| TransportError::new("No results URL in SABLE status page"))
}

fn extract_hidden_field(html: &str, name: &str) -> Result<String, TransportError> {
    let pattern = format!(
        r#"<input type="hidden" name="{}" value="([^"]*)""#,
        regex::escape(name)
    );
    let re = Regex::new(&pattern)
        .map_err(|e| TransportError::with_source("Invalid field pattern", e))?;
    re.captures(html).map(|c| c[1].to_string()).ok_or_else(|| {
        TransportError::new(format!("No hidden field '{}' in POLYVIEW results page", name))
    })
}

/// POLYVIEW encodes relative solvent accessibility as one digit per residue.
fn parse_accessibility(field: &str) -> Result<Vec<f64>, TransportError> {
    field
        .chars()
        .map(|c| {
            c.to_digit(10).map(f64::from).ok_or_else(|| {
                TransportError::new(format!(
                    "Unexpected accessibility character '{}' in POLYVIEW results",
                    c
                ))
            })
        })
        .collect()
}
