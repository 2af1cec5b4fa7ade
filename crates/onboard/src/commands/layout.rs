use std::fmt::Write;

use color_eyre::eyre::eyre;
use color_eyre::Result;
use forms::layout::input_height_style;
use forms::{FieldDescriptor, FormSchema, LayoutMode, Row};

use crate::target::FormTarget;

/// Text rendering of the paged, packed layout of `schema`.
pub fn render(target: &FormTarget, schema: &FormSchema, only_page: Option<u32>) -> Result<String> {
    let total = schema.total_pages();
    let pages: Vec<u32> = match only_page {
        Some(page) if (1..=total).contains(&page) => vec![page],
        Some(page) => return Err(eyre!("page {page} is outside 1..={total}")),
        None => schema.review_pages(),
    };

    let mut out = String::new();
    writeln!(
        out,
        "{}: {} fields on {total} page(s), review on page {}",
        heading(target, schema),
        schema.field_count(),
        schema.review_page()
    )?;
    for page in pages {
        writeln!(out, "\nPage {page}: {}", target.section_title(schema, page))?;
        for (index, row) in schema.page_rows(page).iter().enumerate() {
            write_row(&mut out, index + 1, row)?;
        }
    }
    Ok(out)
}

fn heading(target: &FormTarget, schema: &FormSchema) -> String {
    if schema.title.is_empty() {
        target.to_string()
    } else {
        schema.title.clone()
    }
}

fn write_row(out: &mut String, number: usize, row: &Row<'_>) -> std::fmt::Result {
    let mode = match row.layout_mode() {
        LayoutMode::Columns => "columns",
        LayoutMode::Grid => "grid",
    };
    writeln!(
        out,
        "  row {number} [{}] span {}/{} {mode}",
        row.row_class(),
        row.span(),
        forms::ROW_BUDGET
    )?;
    for field in row.fields() {
        writeln!(out, "    {}", describe(row, field))?;
    }
    Ok(())
}

fn describe(row: &Row<'_>, field: &FieldDescriptor) -> String {
    let mut parts = vec![format!("{} ({})", field.key, field.kind)];
    if field.required {
        parts.push("required".to_string());
    }
    let class = row.column_class(field);
    if !class.is_empty() {
        parts.push(class);
    }
    let style = row.field_grid_style(field);
    if !style.is_empty() {
        parts.push(style);
    }
    if let Some(height) = input_height_style(field) {
        parts.push(height);
    }
    parts.join("  ")
}
