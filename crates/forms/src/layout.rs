//! Row packing on a 12 column grid.
//!
//! `pack_rows` walks a page's fields once, left to right, and closes a row as
//! soon as it is full or the next field no longer fits. Fields are never
//! reordered or split; one wider than the whole budget gets a row of its own.
//!
//! Each `Row` then decides how it is laid out. Rows with several fields switch
//! to the flexible grid mode when any member is tall (`row_span > 1`), an
//! upload, or a text area. The class and style helpers below all read that one
//! predicate, so column classes and per-field sizing cannot disagree.

use crate::field::{FieldDescriptor, FieldKind};

/// Width of one row in grid columns.
pub const ROW_BUDGET: u32 = 12;

const GRID_ROW_STYLE: &str =
    "display: grid; grid-template-columns: 1fr; grid-auto-rows: min-content; gap: 0.75rem; align-items: start;";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutMode {
    /// Fixed column classes (`col-md-N`).
    Columns,
    /// Flexible CSS grid placement.
    Grid,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Row<'a> {
    fields: Vec<&'a FieldDescriptor>,
}

impl<'a> Row<'a> {
    pub fn fields(&self) -> &[&'a FieldDescriptor] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Sum of the members' column spans.
    pub fn span(&self) -> u32 {
        self.fields.iter().map(|f| f.column_span()).sum()
    }

    pub fn layout_mode(&self) -> LayoutMode {
        if self.fields.len() <= 1 {
            return LayoutMode::Columns;
        }
        let needs_grid = self.fields.iter().any(|f| {
            f.row_span() > 1 || matches!(f.kind, FieldKind::Document | FieldKind::Textarea)
        });
        if needs_grid {
            LayoutMode::Grid
        } else {
            LayoutMode::Columns
        }
    }

    pub fn uses_grid(&self) -> bool {
        self.layout_mode() == LayoutMode::Grid
    }

    pub fn row_class(&self) -> &'static str {
        match self.layout_mode() {
            LayoutMode::Grid => "form-row-grid",
            LayoutMode::Columns => "row g-3",
        }
    }

    pub fn row_style(&self) -> &'static str {
        match self.layout_mode() {
            LayoutMode::Grid => GRID_ROW_STYLE,
            LayoutMode::Columns => "",
        }
    }

    /// Column class for a member; empty in grid mode (placement comes from style).
    pub fn column_class(&self, field: &FieldDescriptor) -> String {
        match self.layout_mode() {
            LayoutMode::Columns => format!("col-12 col-md-{}", field.column_span()),
            LayoutMode::Grid => String::new(),
        }
    }

    /// Inline grid placement for a member; empty in column mode.
    pub fn field_grid_style(&self, field: &FieldDescriptor) -> String {
        if !self.uses_grid() {
            return String::new();
        }
        let mut styles = Vec::with_capacity(2);
        let row_span = field.row_span();
        if row_span > 1 {
            styles.push(format!("grid-row: span {row_span}"));
        }
        styles.push(format!("--column-span: {}", field.column_span()));
        styles.join("; ")
    }
}

/// Height override for tall single-line inputs (text areas size themselves).
pub fn input_height_style(field: &FieldDescriptor) -> Option<String> {
    let rows = field.row_span();
    if rows > 1 && field.kind != FieldKind::Textarea {
        let height = f64::from(rows) * 2.5;
        Some(format!("height: {height}rem; resize: vertical;"))
    } else {
        None
    }
}

/// Greedily pack fields into rows of at most `ROW_BUDGET` columns.
pub fn pack_rows<'a, I>(fields: I) -> Vec<Row<'a>>
where
    I: IntoIterator<Item = &'a FieldDescriptor>,
{
    let mut rows = Vec::new();
    let mut open: Vec<&'a FieldDescriptor> = Vec::new();
    let mut used = 0;

    for field in fields {
        let span = field.column_span();
        if used + span > ROW_BUDGET && !open.is_empty() {
            rows.push(Row {
                fields: std::mem::take(&mut open),
            });
            used = 0;
        }

        open.push(field);
        used += span;

        if used >= ROW_BUDGET {
            rows.push(Row {
                fields: std::mem::take(&mut open),
            });
            used = 0;
        }
    }

    if !open.is_empty() {
        rows.push(Row { fields: open });
    }
    rows
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(key: &str, span: u32) -> FieldDescriptor {
        FieldDescriptor::new(key, key, FieldKind::Text).span(span)
    }

    fn keys(rows: &[Row<'_>]) -> Vec<Vec<String>> {
        rows.iter()
            .map(|r| r.fields().iter().map(|f| f.key.clone()).collect())
            .collect()
    }

    #[test]
    fn half_half_full() {
        let fields = vec![text("f1", 6), text("f2", 6), text("f3", 12)];
        let rows = pack_rows(&fields);
        assert_eq!(keys(&rows), vec![vec!["f1", "f2"], vec!["f3"]]);
    }

    #[test]
    fn missing_span_takes_full_width() {
        let fields = vec![
            FieldDescriptor::new("a", "a", FieldKind::Text),
            FieldDescriptor::new("b", "b", FieldKind::Text),
        ];
        assert_eq!(keys(&pack_rows(&fields)), vec![vec!["a"], vec!["b"]]);
    }

    #[test]
    fn overflow_starts_a_new_row_without_reordering() {
        // 4 + 8 fills, then 12, then 4 + 4 + 4, then 8 + (6 does not fit) 6
        let fields = vec![
            text("a", 4),
            text("b", 8),
            text("c", 12),
            text("d", 4),
            text("e", 4),
            text("f", 4),
            text("g", 8),
            text("h", 6),
        ];
        let rows = pack_rows(&fields);
        assert_eq!(
            keys(&rows),
            vec![
                vec!["a", "b"],
                vec!["c"],
                vec!["d", "e", "f"],
                vec!["g"],
                vec!["h"],
            ]
        );
    }

    #[test]
    fn oversize_field_sits_alone() {
        let fields = vec![text("a", 4), text("wide", 14), text("b", 4)];
        let rows = pack_rows(&fields);
        assert_eq!(keys(&rows), vec![vec!["a"], vec!["wide"], vec!["b"]]);
        assert_eq!(rows[1].span(), 14);
    }

    #[test]
    fn rows_respect_budget_and_preserve_order() {
        let spans = [3, 5, 7, 12, 1, 1, 11, 6, 6, 9, 4, 2, 12, 8];
        let fields: Vec<_> = spans
            .iter()
            .enumerate()
            .map(|(i, s)| text(&format!("f{i}"), *s))
            .collect();
        let rows = pack_rows(&fields);

        for row in &rows {
            assert!(!row.is_empty());
            assert!(row.span() <= ROW_BUDGET || row.len() == 1);
        }
        let flattened: Vec<_> = rows
            .iter()
            .flat_map(|r| r.fields().iter().map(|f| f.key.clone()))
            .collect();
        let expected: Vec<_> = fields.iter().map(|f| f.key.clone()).collect();
        assert_eq!(flattened, expected);
    }

    #[test]
    fn empty_page_has_no_rows() {
        let fields: Vec<FieldDescriptor> = Vec::new();
        assert!(pack_rows(&fields).is_empty());
    }

    #[test]
    fn single_field_rows_never_use_grid() {
        let fields = vec![FieldDescriptor::new("notes", "Notes", FieldKind::Textarea).rows(4)];
        let rows = pack_rows(&fields);
        assert_eq!(rows[0].layout_mode(), LayoutMode::Columns);
        assert_eq!(rows[0].column_class(&fields[0]), "col-12 col-md-12");
    }

    #[test]
    fn document_in_shared_row_switches_to_grid() {
        let fields = vec![
            FieldDescriptor::new("idType", "ID Type", FieldKind::Select).span(8),
            FieldDescriptor::new("idDocument", "ID Upload", FieldKind::Document).span(4),
        ];
        let rows = pack_rows(&fields);
        assert_eq!(rows.len(), 1);
        let row = &rows[0];
        assert!(row.uses_grid());
        assert_eq!(row.row_class(), "form-row-grid");
        assert_eq!(row.column_class(&fields[0]), "");
        assert_eq!(row.field_grid_style(&fields[0]), "--column-span: 8");
    }

    #[test]
    fn tall_member_gets_grid_row_span() {
        let fields = vec![text("a", 6).rows(3), text("b", 6)];
        let rows = pack_rows(&fields);
        let row = &rows[0];
        assert!(row.uses_grid());
        assert_eq!(
            row.field_grid_style(&fields[0]),
            "grid-row: span 3; --column-span: 6"
        );
    }

    #[test]
    fn plain_shared_row_uses_columns() {
        let fields = vec![text("a", 6), text("b", 6)];
        let rows = pack_rows(&fields);
        let row = &rows[0];
        assert_eq!(row.layout_mode(), LayoutMode::Columns);
        assert_eq!(row.row_class(), "row g-3");
        assert_eq!(row.row_style(), "");
        assert_eq!(row.column_class(&fields[1]), "col-12 col-md-6");
        assert_eq!(row.field_grid_style(&fields[1]), "");
    }

    #[test]
    fn input_height_only_for_tall_non_textarea() {
        assert_eq!(
            input_height_style(&text("a", 6).rows(2)).as_deref(),
            Some("height: 5rem; resize: vertical;")
        );
        assert_eq!(input_height_style(&text("a", 6)), None);
        let area = FieldDescriptor::new("n", "n", FieldKind::Textarea).rows(3);
        assert_eq!(input_height_style(&area), None);
    }
}
