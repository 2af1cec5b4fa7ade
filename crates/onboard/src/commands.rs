pub mod check;
pub mod layout;
pub mod saved;
pub mod submit;

#[cfg(test)]
pub(crate) mod fixtures;

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use api_client::ApiClient;
use app::AppContext;
use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use form_storage::{FileStore, FormStorage};
use forms::{FormData, FormSession, UploadedFile};
use tracing::debug;

use crate::cli::Cmd;

/// Long-lived services every command may need.
pub struct Services {
    pub storage: FormStorage,
    pub api: ApiClient,
}

impl Services {
    pub fn from_context(ctx: &AppContext) -> Result<Self> {
        let dir = ctx.saved_forms_dir();
        let store = FileStore::open(&dir)
            .wrap_err_with(|| format!("opening saved forms at {}", dir.display()))?;
        let config = ctx.config();
        let storage = FormStorage::new(Arc::new(store)).with_prefix(config.storage.key_prefix.clone());
        let api = ApiClient::new(config.api.base_url.clone()).with_timeout(config.api.timeout());
        debug!(saved_forms = %dir.display(), api = %config.api.base_url, "services ready");
        Ok(Self { storage, api })
    }
}

pub async fn run(cmd: Cmd, services: &Services) -> Result<()> {
    match cmd {
        Cmd::Layout { form, page } => {
            let schema = form.schema()?;
            print!("{}", layout::render(&form, &schema, page)?);
        }
        Cmd::Titles { form } => {
            let schema = form.schema()?;
            for page in schema.review_pages() {
                println!("{page}\t{}", form.section_title(&schema, page));
            }
        }
        Cmd::Check {
            form,
            data,
            attachments,
        } => {
            let report = check::run(&form, &data, &attachments)?;
            print!("{}", report.render());
            if let Some(issue) = report.issue {
                return Err(eyre!("form incomplete: {issue}"));
            }
        }
        Cmd::Saved { action } => saved::run(action, services)?,
        Cmd::Submit {
            form,
            attachments,
            endpoint,
            keep,
        } => submit::run(&form, &attachments, endpoint, keep, services).await?,
    }
    Ok(())
}

/// Read a JSON object of entered values.
pub fn read_form_data(path: &Path) -> Result<FormData> {
    let json = fs::read_to_string(path).wrap_err_with(|| format!("reading {}", path.display()))?;
    serde_json::from_str(&json).wrap_err_with(|| format!("parsing form data {}", path.display()))
}

/// Parse `fieldId=path` and read the file into memory.
pub fn read_attachment(arg: &str) -> Result<(String, UploadedFile)> {
    let (field_id, path) = arg
        .split_once('=')
        .ok_or_else(|| eyre!("attachment `{arg}` is not FIELD=PATH"))?;
    let path = PathBuf::from(path);
    let bytes = fs::read(&path).wrap_err_with(|| format!("reading {}", path.display()))?;
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| field_id.to_string());
    let content_type = content_type_for(&path);
    Ok((field_id.to_string(), UploadedFile::new(name, content_type, bytes)))
}

/// Attach every `FIELD=PATH` to the session, failing on the first rejection.
pub fn attach_all(session: &mut FormSession, attachments: &[String]) -> Result<()> {
    for arg in attachments {
        let (field_id, file) = read_attachment(arg)?;
        let name = file.name.clone();
        session
            .attach_document(&field_id, file)
            .wrap_err_with(|| format!("attaching {name} to {field_id}"))?;
    }
    Ok(())
}

fn content_type_for(path: &Path) -> &'static str {
    let extension = path
        .extension()
        .map(|ext| ext.to_string_lossy().to_ascii_lowercase())
        .unwrap_or_default();
    match extension.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "heic" => "image/heic",
        "pdf" => "application/pdf",
        "txt" => "text/plain",
        _ => "application/octet-stream",
    }
}
