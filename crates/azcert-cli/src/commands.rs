//! Command dispatch.
//!
//! Every command returns the text to print so it can be tested against the
//! mock transport.

use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use azcert_core::api::{ServiceClient, Transport};
use azcert_core::models::{
    CertificateDraft, CertificateRecord, UploadFile, parse_certificate_id, placeholder_serial,
};
use chrono::Utc;
use serde::Serialize;

use crate::cli::{Command, SearchArgs};
use crate::output::{render_detail, render_groups};

const EMPTY_QUERY: &str = "Please enter a search value";

/// Run one command and return its output.
pub async fn execute<T: Transport>(
    client: &ServiceClient<T>,
    command: Command,
    json: bool,
) -> Result<String> {
    match command {
        Command::List => {
            let records = client.get_all().await?;
            records_output(records, json)
        }
        Command::Search(SearchArgs { name, serial }) => {
            let records = match (name, serial) {
                (Some(name), _) => client.search_by_name(name.trim()).await,
                (None, Some(serial)) => client.search_by_serial(serial.trim()).await,
                (None, None) => bail!(EMPTY_QUERY),
            };
            records_output(records, json)
        }
        Command::Verify { query, mode } => {
            let records = client
                .verify(&query, mode)
                .await
                .ok_or_else(|| anyhow!(EMPTY_QUERY))?;
            records_output(records, json)
        }
        Command::Get { id } => {
            let record = client.get_by_id(parse_id(&id)?).await?;
            record_output(&record, json)
        }
        Command::Create(fields) => {
            let record = client.create(fields.into_new_draft()).await?;
            tracing::debug!(id = record.id, "certificate created");
            record_output(&record, json)
        }
        Command::Update { id, fields } => {
            // The API replaces the whole record; unset flags keep stored values
            let id = parse_id(&id)?;
            let current = client.get_by_id(id).await?;
            let record = client
                .update(id, fields.apply_to(CertificateDraft::from(&current)))
                .await?;
            record_output(&record, json)
        }
        Command::Delete { id } => {
            let id = parse_id(&id)?;
            client.delete(id).await?;
            Ok(format!("Deleted CERT-{id}"))
        }
        Command::Upload { file } => {
            let upload = read_upload(&file)?;
            let report = client.upload_excel(upload).await?;
            if json {
                to_json(&report.to_value())
            } else {
                Ok(report.message())
            }
        }
        Command::Email(args) => {
            let reply = client.send_email(&args.into()).await?;
            if json {
                to_json(&reply)
            } else {
                Ok("Message sent".to_string())
            }
        }
        Command::NewSerial => Ok(placeholder_serial()),
    }
}

fn parse_id(input: &str) -> Result<i64> {
    parse_certificate_id(input).with_context(|| format!("invalid certificate id: {input}"))
}

fn read_upload(path: &Path) -> Result<UploadFile> {
    let bytes = std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "upload.xlsx".to_string());
    Ok(UploadFile::new(name, bytes))
}

fn records_output(records: Vec<CertificateRecord>, json: bool) -> Result<String> {
    if json {
        to_json(&records)
    } else {
        Ok(render_groups(records, Utc::now()))
    }
}

fn record_output(record: &CertificateRecord, json: bool) -> Result<String> {
    if json {
        to_json(record)
    } else {
        Ok(render_detail(record, Utc::now()))
    }
}

fn to_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    serde_json::to_string_pretty(value).context("failed to encode JSON")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::{CertificateArgs, EmailArgs};
    use azcert_core::api::{HttpMethod, MockTransport};
    use azcert_core::config::ClientConfig;
    use azcert_core::search::SearchMode;
    use serde_json::json;

    fn client() -> ServiceClient<MockTransport> {
        ServiceClient::with_config(ClientConfig::new("https://api.test"), MockTransport::new())
    }

    #[tokio::test]
    async fn test_list_json() {
        let client = client();
        client
            .transport()
            .respond_json(200, &json!([{ "srId": 4, "name": "Rami", "s_N": "AZ-4" }]));

        let out = execute(&client, Command::List, true).await.unwrap();
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value[0]["srId"], 4);
        assert_eq!(value[0]["s_N"], "AZ-4");
    }

    #[tokio::test]
    async fn test_get_accepts_display_id() {
        let client = client();
        client
            .transport()
            .respond_json(200, &json!({ "srId": 12, "name": "Dina" }));

        let out = execute(&client, Command::Get { id: "CERT-12".into() }, false)
            .await
            .unwrap();
        assert!(out.contains("Dina"));
        assert_eq!(
            client.transport().last_request().unwrap().query_value("id"),
            Some("12")
        );
    }

    #[tokio::test]
    async fn test_get_rejects_bad_id() {
        let client = client();
        let err = execute(&client, Command::Get { id: "abc".into() }, false)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("invalid certificate id"));
        assert_eq!(client.transport().request_count(), 0);
    }

    #[tokio::test]
    async fn test_api_error_message_surfaces() {
        let client = client();
        client.transport().respond(404, "");

        let err = execute(&client, Command::Delete { id: "8".into() }, false)
            .await
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Certificate not found. It may have already been deleted."
        );
    }

    #[tokio::test]
    async fn test_create_fills_placeholder_serial() {
        let client = client();
        client.transport().respond(200, "");

        let fields = CertificateArgs {
            name: Some("Adel".into()),
            method: Some("4".into()),
            ..Default::default()
        };
        execute(&client, Command::Create(fields), false).await.unwrap();

        let request = client.transport().last_request().unwrap();
        assert_eq!(request.method, HttpMethod::Post);
        let body = request.json_body().unwrap();
        assert!(body["s_N"].as_str().unwrap().starts_with("CERT-"));
        assert_eq!(body["method"], 4);
    }

    #[tokio::test]
    async fn test_update_keeps_fields_not_given() {
        let client = client();
        client.transport().respond_json(
            200,
            &json!({
                "srId": 9,
                "name": "Hany Old",
                "s_N": "AZ-9",
                "method": 3,
                "type": 2,
                "startDate": "2024-01-15T00:00:00.000Z",
                "endDate": "2026-01-15T00:00:00.000Z",
                "country": "Egypt",
                "state": "Giza",
                "streetAddress": "12 Nile St"
            }),
        );
        client.transport().respond(200, "");

        let fields = CertificateArgs {
            name: Some("Hany".into()),
            ..Default::default()
        };
        execute(&client, Command::Update { id: "9".into(), fields }, false)
            .await
            .unwrap();

        let requests = client.transport().requests();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].query_value("id"), Some("9"));

        let update = &requests[1];
        assert_eq!(update.method, HttpMethod::Put);
        assert_eq!(
            update.json_body().unwrap(),
            json!({
                "srId": 9,
                "name": "Hany",
                "s_N": "AZ-9",
                "method": 3,
                "type": 2,
                "startDate": "2024-01-15T00:00:00.000Z",
                "endDate": "2026-01-15T00:00:00.000Z",
                "country": "Egypt",
                "state": "Giza",
                "streetAddress": "12 Nile St"
            })
        );
    }

    #[tokio::test]
    async fn test_update_of_missing_record_sends_nothing() {
        let client = client();
        client.transport().respond(404, "");

        let fields = CertificateArgs {
            name: Some("Hany".into()),
            ..Default::default()
        };
        let err = execute(&client, Command::Update { id: "9".into(), fields }, false)
            .await
            .unwrap_err();
        assert!(err.to_string().contains("not found"), "{err}");
        assert_eq!(client.transport().request_count(), 1);
    }

    #[tokio::test]
    async fn test_verify_blank_query() {
        let client = client();
        let err = execute(
            &client,
            Command::Verify { query: "  ".into(), mode: SearchMode::All },
            false,
        )
        .await
        .unwrap_err();
        assert_eq!(err.to_string(), EMPTY_QUERY);
    }

    #[tokio::test]
    async fn test_search_with_no_hits() {
        let client = client();
        client.transport().respond(404, "");

        let args = SearchArgs { name: Some("ghost".into()), serial: None };
        let out = execute(&client, Command::Search(args), false).await.unwrap();
        assert_eq!(out, "No certificates found");
    }

    #[tokio::test]
    async fn test_email() {
        let client = client();
        client.transport().respond(200, "");

        let args = EmailArgs {
            name: "Mai".into(),
            email: "mai@example.com".into(),
            subject: "Hi".into(),
            message: "Hello".into(),
        };
        let out = execute(&client, Command::Email(args), true).await.unwrap();
        assert_eq!(
            serde_json::from_str::<serde_json::Value>(&out).unwrap(),
            json!({ "success": true })
        );
    }
}
