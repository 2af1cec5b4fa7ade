use std::sync::Arc;

use api_client::multipart::{Form, Part};
use api_client::{ApiBody, ApiClient};
use catalog::{FormVariant, OnboardingSubmission};
use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use form_storage::FormStorage;
use forms::FormSession;
use tracing::info;

use super::{attach_all, Services};
use crate::target::{require_variant, FormTarget};

pub const UPLOAD_ENDPOINT: &str = "/api/uploads";

pub async fn run(
    target: &FormTarget,
    attachments: &[String],
    endpoint: Option<String>,
    keep: bool,
    services: &Services,
) -> Result<()> {
    let body = submit(target, attachments, endpoint.as_deref(), keep, services).await?;
    match body {
        ApiBody::Json(value) => println!("{}", serde_json::to_string_pretty(&value)?),
        ApiBody::Text(text) if text.is_empty() => println!("submitted {target}"),
        ApiBody::Text(text) => println!("{text}"),
    }
    Ok(())
}

/// Restore, validate, upload and post one onboarding form. The snapshot is
/// only removed once the server accepted the payload.
pub async fn submit(
    target: &FormTarget,
    attachments: &[String],
    endpoint: Option<&str>,
    keep: bool,
    services: &Services,
) -> Result<ApiBody> {
    let variant = require_variant(target)?;
    let session = prepare(&services.storage, variant, attachments)?;
    let body = send(&services.api, variant, &session, endpoint).await?;
    if !keep {
        services.storage.delete(variant.tag())?;
    }
    Ok(body)
}

/// The saved form with `attachments` added, refused unless complete.
pub fn prepare(
    storage: &FormStorage,
    variant: FormVariant,
    attachments: &[String],
) -> Result<FormSession> {
    let snapshot = storage
        .load(variant.tag())?
        .ok_or_else(|| eyre!("no saved progress for {variant}"))?;
    let mut session = FormSession::new(Arc::new(variant.schema()));
    let page = snapshot.resume_page();
    session.restore(snapshot.form_data, page);
    attach_all(&mut session, attachments)?;
    session
        .validate_form()
        .wrap_err_with(|| format!("{variant} form is incomplete"))?;
    Ok(session)
}

async fn send(
    api: &ApiClient,
    variant: FormVariant,
    session: &FormSession,
    endpoint: Option<&str>,
) -> Result<ApiBody> {
    for field in session.schema().fields().iter().filter(|f| f.kind.is_upload()) {
        for file in session.documents().files(&field.id) {
            let part = Part::bytes(file.bytes.clone())
                .file_name(file.name.clone())
                .mime_str(&file.content_type)?;
            let form = Form::new()
                .text("formType", variant.tag())
                .text("fieldId", field.id.clone())
                .part("file", part);
            api.upload(UPLOAD_ENDPOINT, form)
                .await
                .wrap_err_with(|| format!("uploading {}", file.name))?;
            info!(field = %field.id, file = %file.name, "document uploaded");
        }
    }

    let submission = OnboardingSubmission::from_session(variant, session);
    let endpoint = endpoint
        .map(str::to_string)
        .unwrap_or_else(|| format!("/api/onboarding/{}", variant.tag()));
    let body = api
        .post(&endpoint, &submission)
        .await
        .wrap_err_with(|| format!("submitting {variant}"))?;
    info!(form = %variant, %endpoint, "form submitted");
    Ok(body)
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use super::*;
    use crate::commands::fixtures::complete_data;
    use crate::commands::saved::import;
    use form_storage::MemoryStore;
    use pretty_assertions::assert_eq;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};

    /// Answer every request with `{"ok":true}`, recording request lines.
    async fn recording_server() -> (String, Arc<Mutex<Vec<String>>>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
        let addr = listener.local_addr().expect("local addr");
        let seen = Arc::new(Mutex::new(Vec::new()));
        let log = Arc::clone(&seen);
        tokio::spawn(async move {
            while let Ok((mut socket, _)) = listener.accept().await {
                let line = read_request_line(&mut socket).await;
                log.lock().expect("lock").push(line);
                let body = r#"{"ok":true}"#;
                let response = format!(
                    "HTTP/1.1 200 OK\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                    body.len()
                );
                socket.write_all(response.as_bytes()).await.expect("write");
                socket.shutdown().await.ok();
            }
        });
        (format!("http://{addr}"), seen)
    }

    async fn read_request_line(socket: &mut TcpStream) -> String {
        let mut buf = Vec::new();
        let mut chunk = [0u8; 4096];
        loop {
            let n = socket.read(&mut chunk).await.expect("read");
            if n == 0 {
                break;
            }
            buf.extend_from_slice(&chunk[..n]);
            let text = String::from_utf8_lossy(&buf).to_string();
            let Some(end) = text.find("\r\n\r\n") else {
                continue;
            };
            let head = text[..end].to_ascii_lowercase();
            if head.contains("transfer-encoding: chunked") {
                if text[end..].contains("\r\n0\r\n\r\n") {
                    break;
                }
                continue;
            }
            let length = head
                .lines()
                .find_map(|line| line.strip_prefix("content-length:"))
                .and_then(|value| value.trim().parse::<usize>().ok())
                .unwrap_or(0);
            if buf.len() >= end + 4 + length {
                break;
            }
        }
        String::from_utf8_lossy(&buf)
            .lines()
            .next()
            .unwrap_or_default()
            .to_string()
    }

    fn services(base_url: String) -> Services {
        Services {
            storage: FormStorage::new(Arc::new(MemoryStore::new())),
            api: ApiClient::new(base_url),
        }
    }

    #[tokio::test]
    async fn uploads_then_posts_then_forgets_progress() {
        let (base, seen) = recording_server().await;
        let services = services(base);
        let target = FormTarget::Onboarding(FormVariant::Agent);
        let schema = target.schema().expect("schema");
        import(&services.storage, &target, complete_data(&schema), 5).expect("import");

        let dir = tempfile::tempdir().expect("tempdir");
        let id = dir.path().join("id.png");
        std::fs::write(&id, [0u8; 32]).expect("write");
        let attachments = vec![format!("idDocument={}", id.display())];

        let body = submit(&target, &attachments, None, false, &services)
            .await
            .expect("submit");
        assert_eq!(body, ApiBody::Json(serde_json::json!({ "ok": true })));
        assert_eq!(
            *seen.lock().expect("lock"),
            vec![
                "POST /api/uploads HTTP/1.1".to_string(),
                "POST /api/onboarding/agent HTTP/1.1".to_string(),
            ]
        );
        assert!(!services.storage.exists("agent").expect("exists"));
    }

    #[tokio::test]
    async fn missing_upload_blocks_before_any_request() {
        let (base, seen) = recording_server().await;
        let services = services(base);
        let target = FormTarget::Onboarding(FormVariant::Agent);
        let schema = target.schema().expect("schema");
        import(&services.storage, &target, complete_data(&schema), 5).expect("import");

        let err = submit(&target, &[], None, false, &services)
            .await
            .unwrap_err();
        assert!(format!("{err:#}").contains("Please upload ID Upload"), "{err:#}");
        assert!(seen.lock().expect("lock").is_empty());
        assert!(services.storage.exists("agent").expect("exists"));
    }

    #[tokio::test]
    async fn monitoring_is_not_submitted_here() {
        let services = services("http://127.0.0.1:9".to_string());
        assert!(submit(&FormTarget::Monitoring, &[], None, true, &services)
            .await
            .is_err());
    }
}
