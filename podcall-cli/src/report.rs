//! Error reporting
//!
//! Renders a failed command as a red error line followed by whatever
//! details and remediation hints fit the failure.

use colored::*;
use podcall_client::{ClientError, RequestFailure};

/// Print an error and its hints to stderr
pub fn print_error(err: &anyhow::Error) {
    eprintln!("{} {}", "ERROR:".red().bold(), err.to_string().red());

    let Some(client_err) = err.downcast_ref::<ClientError>() else {
        return;
    };

    if let Some(cause) = cause_line(err, client_err) {
        eprintln!("{}", cause);
    }
    for line in details(client_err) {
        eprintln!("{}", line);
    }

    let hints = hints(client_err);
    if !hints.is_empty() {
        eprintln!("\n{}", "Troubleshooting:".bold());
        for (i, hint) in hints.iter().enumerate() {
            eprintln!("{}. {}", i + 1, hint);
        }
    }
}

/// The client error's own message when context hides it from the headline
fn cause_line(err: &anyhow::Error, client_err: &ClientError) -> Option<String> {
    let cause = client_err.to_string();
    (err.to_string() != cause).then(|| format!("Cause: {}", cause))
}

/// Diagnostic lines carried by the error itself
fn details(err: &ClientError) -> Vec<String> {
    match err {
        ClientError::Submission(failure) | ClientError::StatusQuery { source: failure, .. } => {
            failure_details(failure)
        }
        ClientError::JobFailed { payload, .. } => vec![format!(
            "Details: {}",
            serde_json::to_string_pretty(payload).unwrap_or_else(|_| payload.to_string())
        )],
        ClientError::Timeout { elapsed, .. } => {
            vec![format!("Waited {:.1}s without a final status", elapsed.as_secs_f64())]
        }
        ClientError::Configuration(_) | ClientError::MalformedResponse(_) => Vec::new(),
    }
}

fn failure_details(failure: &RequestFailure) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(status) = failure.status_code() {
        lines.push(format!("Status Code: {}", status));
    }
    if let Some(body) = failure.body() {
        lines.push(format!("Error Details: {}", body.to_pretty()));
    }
    lines
}

fn hints(err: &ClientError) -> Vec<&'static str> {
    const CREDENTIALS: &str = "Check that your API key and endpoint ID are correct";
    const DEPLOYED: &str = "Make sure your endpoint is deployed and active";
    const CONNECTIVITY: &str = "Verify you have an active internet connection";

    match err {
        ClientError::Configuration(_) => vec![
            "Set PODCALL_API_KEY and PODCALL_ENDPOINT_ID, or pass --api-key/--endpoint-id",
            "Find your endpoint ID in your serverless endpoint dashboard",
        ],
        _ if err.is_client_error() => vec![CREDENTIALS, DEPLOYED],
        _ if err.is_server_error() => vec![DEPLOYED, "Retry once the endpoint is healthy"],
        ClientError::Submission(_) | ClientError::StatusQuery { .. } => {
            vec![CREDENTIALS, DEPLOYED, CONNECTIVITY]
        }
        ClientError::Timeout { .. } => vec![
            "Increase the wait time with --wait",
            "Cold starts can take a while; check worker status in the endpoint dashboard",
        ],
        ClientError::JobFailed { .. } => vec!["Check the worker logs of your endpoint"],
        ClientError::MalformedResponse(_) => vec![DEPLOYED],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;

    #[test]
    fn test_submission_details_include_status_and_body() {
        let err = ClientError::Submission(RequestFailure::api(401, r#"{"error":"Unauthorized"}"#));
        let lines = details(&err);

        assert_eq!(lines[0], "Status Code: 401");
        assert!(lines[1].contains("\"error\": \"Unauthorized\""));
        assert_eq!(hints(&err)[0], "Check that your API key and endpoint ID are correct");
    }

    #[test]
    fn test_job_failure_details_show_payload() {
        let err = ClientError::JobFailed {
            job_id: Some("abc".to_string()),
            payload: json!({ "status": "FAILED", "error": "oom" }),
        };
        assert!(details(&err)[0].contains("\"error\": \"oom\""));
    }

    #[test]
    fn test_timeout_suggests_longer_wait() {
        let err = ClientError::Timeout {
            job_id: "abc".to_string(),
            elapsed: Duration::from_secs(60),
            max_wait: Duration::from_secs(60),
        };
        assert!(hints(&err)[0].contains("--wait"));
    }

    #[test]
    fn test_config_error_downcasts_through_anyhow() {
        let err: anyhow::Error = ClientError::Configuration("API key is not set".to_string()).into();
        assert!(matches!(
            err.downcast_ref::<ClientError>(),
            Some(ClientError::Configuration(_))
        ));
        assert_eq!(
            cause_line(&err, err.downcast_ref::<ClientError>().unwrap()),
            None
        );
    }

    #[test]
    fn test_context_keeps_client_error_visible() {
        let err = anyhow::Error::from(ClientError::Submission(RequestFailure::api(401, "")))
            .context("Failed to get a response from the endpoint");

        let client_err = err.downcast_ref::<ClientError>().unwrap();
        assert_eq!(err.to_string(), "Failed to get a response from the endpoint");
        assert_eq!(
            cause_line(&err, client_err).as_deref(),
            Some("Cause: Failed to submit job: API error (status 401): <empty body>")
        );
        assert_eq!(details(client_err)[0], "Status Code: 401");
    }
}
