//! Page partition of a field list.
//!
//! `PageIndex` records, per page number, the positions of the fields that
//! belong to it. Positions keep schema order, so the row packer and the
//! validator always agree on what "the fields of page N" are.

use std::collections::BTreeMap;

use crate::field::FieldDescriptor;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageIndex {
    pages: BTreeMap<u32, Vec<usize>>,
}

impl PageIndex {
    pub fn build(fields: &[FieldDescriptor]) -> Self {
        let mut pages: BTreeMap<u32, Vec<usize>> = BTreeMap::new();
        for (pos, field) in fields.iter().enumerate() {
            pages.entry(field.page_number()).or_default().push(pos);
        }
        Self { pages }
    }

    /// Highest page number that holds a field, or 1 for an empty schema.
    pub fn total_pages(&self) -> u32 {
        self.pages.keys().next_back().copied().unwrap_or(1)
    }

    /// Page numbers that hold at least one field, ascending.
    pub fn page_numbers(&self) -> impl Iterator<Item = u32> + '_ {
        self.pages.keys().copied()
    }

    /// Schema positions of the fields on `page` (empty for gaps).
    pub fn positions(&self, page: u32) -> &[usize] {
        self.pages.get(&page).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn field_count(&self) -> usize {
        self.pages.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::FieldKind;

    fn field(key: &str, page: Option<u32>) -> FieldDescriptor {
        let f = FieldDescriptor::new(key, key, FieldKind::Text);
        match page {
            Some(p) => f.on_page(p),
            None => f,
        }
    }

    #[test]
    fn empty_schema_has_one_page() {
        let index = PageIndex::build(&[]);
        assert_eq!(index.total_pages(), 1);
        assert!(index.is_empty());
        assert_eq!(index.positions(1), &[] as &[usize]);
    }

    #[test]
    fn groups_by_page_in_schema_order() {
        let fields = vec![
            field("a", Some(2)),
            field("b", None),
            field("c", Some(2)),
            field("d", Some(1)),
        ];
        let index = PageIndex::build(&fields);
        assert_eq!(index.positions(1), &[1, 3]);
        assert_eq!(index.positions(2), &[0, 2]);
        assert_eq!(index.total_pages(), 2);
        assert_eq!(index.field_count(), fields.len());
    }

    #[test]
    fn total_pages_is_max_page_even_with_gaps() {
        let fields = vec![field("a", Some(1)), field("b", Some(4))];
        let index = PageIndex::build(&fields);
        assert_eq!(index.total_pages(), 4);
        assert_eq!(index.page_numbers().collect::<Vec<_>>(), vec![1, 4]);
        assert!(index.positions(3).is_empty());
    }

    #[test]
    fn rebuild_is_stable() {
        let fields = vec![field("a", Some(3)), field("b", Some(1)), field("c", Some(3))];
        assert_eq!(PageIndex::build(&fields), PageIndex::build(&fields));
    }
}
