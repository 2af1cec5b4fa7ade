use std::fmt::Write;
use std::sync::Arc;

use catalog::FormVariant;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use form_storage::{FormStorage, SavedForm};
use forms::{FormData, FormSession};
use strum::IntoEnumIterator;
use tracing::info;

use super::{read_form_data, Services};
use crate::cli::SavedAction;
use crate::target::{FormTarget, MONITORING_TAG};

pub fn run(action: SavedAction, services: &Services) -> Result<()> {
    let storage = &services.storage;
    match action {
        SavedAction::List => print!("{}", list(storage)?),
        SavedAction::Show { form } => print!("{}", show(storage, &form)?),
        SavedAction::Import { form, data, page } => {
            let saved = import(storage, &form, read_form_data(&data)?, page)?;
            println!(
                "saved {} on page {} ({} values)",
                saved.form_type,
                saved.resume_page(),
                saved.form_data.len()
            );
        }
        SavedAction::Touch { form } => {
            if !storage.touch(&form.tag())? {
                return Err(eyre!("no saved progress for {form}"));
            }
            println!("touched {form}");
        }
        SavedAction::Delete { form } => {
            storage.delete(&form.tag())?;
            println!("deleted {form}");
        }
    }
    Ok(())
}

/// One line per readable snapshot of the built-in forms.
pub fn list(storage: &FormStorage) -> Result<String> {
    let tags = FormVariant::iter()
        .map(FormVariant::tag)
        .chain(std::iter::once(MONITORING_TAG));
    let saved = storage.all_saved(tags)?;

    let mut out = String::new();
    if saved.is_empty() {
        writeln!(out, "no saved forms")?;
    }
    for snapshot in saved {
        writeln!(
            out,
            "{:<12} page {}  {} values  saved {}  modified {}",
            snapshot.form_type,
            snapshot.resume_page(),
            snapshot.form_data.len(),
            snapshot.saved_at.format("%Y-%m-%d %H:%M"),
            snapshot.last_modified.format("%Y-%m-%d %H:%M"),
        )?;
    }
    Ok(out)
}

/// Snapshot metadata followed by the review summary it restores to.
pub fn show(storage: &FormStorage, target: &FormTarget) -> Result<String> {
    let snapshot = storage
        .load(&target.tag())?
        .ok_or_else(|| eyre!("no saved progress for {target}"))?;
    let schema = Arc::new(target.schema()?);
    let mut session = FormSession::new(Arc::clone(&schema));
    session.restore(snapshot.form_data.clone(), snapshot.resume_page());

    let mut out = String::new();
    writeln!(
        out,
        "{} resumes on page {} of {}",
        snapshot.form_type,
        session.current_page(),
        session.total_pages()
    )?;
    for (field_id, files) in &snapshot.document_metadata {
        for file in files {
            writeln!(
                out,
                "  upload {field_id}: {} ({} bytes, {}) must be attached again",
                file.name, file.size, file.content_type
            )?;
        }
    }
    for section in session.review(|page| target.section_title(&schema, page)) {
        writeln!(out, "\n{}. {}", section.page, section.title)?;
        for entry in section.entries {
            writeln!(out, "  {:<28} {}", entry.label, entry.value)?;
        }
    }
    Ok(out)
}

/// Save entered values as if the form had been filled in up to `page`.
pub fn import(
    storage: &FormStorage,
    target: &FormTarget,
    data: FormData,
    page: u32,
) -> Result<SavedForm> {
    let mut session = FormSession::new(Arc::new(target.schema()?));
    session.restore(data, page);
    let saved = storage.save(
        &target.tag(),
        session.data(),
        session.documents(),
        session.current_page(),
    )?;
    info!(form = %target, page = saved.resume_page(), "progress imported");
    Ok(saved)
}
