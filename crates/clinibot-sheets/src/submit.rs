use std::time::Duration;

use serde::Deserialize;
use tracing::{info, warn};

use clinibot_core::models::registration::RegistrationRecord;

use crate::error::SheetsError;
use crate::payload::SheetRow;

pub const WEBHOOK_TIMEOUT: Duration = Duration::from_secs(10);

/// Acknowledgement the webhook sends when the row was written.
pub const SUCCESS_MARKER: &str = "success";

#[derive(Debug, Deserialize)]
struct WebhookReply {
    result: String,
}

/// Whether a 200 body acknowledges the write.
///
/// JSON replies must carry `"result": "success"`. Anything else must be
/// exactly the marker once trimmed. Both comparisons ignore case.
pub fn is_acknowledged(body: &str) -> bool {
    match serde_json::from_str::<WebhookReply>(body) {
        Ok(reply) => reply.result.trim().eq_ignore_ascii_case(SUCCESS_MARKER),
        Err(_) => body.trim().eq_ignore_ascii_case(SUCCESS_MARKER),
    }
}

/// Validate `record` and POST it to the spreadsheet webhook as JSON.
///
/// Nothing is sent when validation fails. The call succeeds only on HTTP 200
/// with a body that passes [`is_acknowledged`]. There is no retry; the
/// caller resubmits.
pub async fn submit_registration(
    client: &reqwest::Client,
    record: &RegistrationRecord,
    webhook_url: &str,
) -> Result<(), SheetsError> {
    record.validate()?;

    let row = SheetRow::from(record);

    let response = client
        .post(webhook_url)
        .timeout(WEBHOOK_TIMEOUT)
        .json(&row)
        .send()
        .await?;

    let status = response.status().as_u16();
    let body = response.text().await?;

    if status == 200 && is_acknowledged(&body) {
        info!(statut = %row.statut, "registration recorded");
        return Ok(());
    }

    warn!(status, "webhook did not confirm registration");
    Err(SheetsError::Rejected { status, body })
}
