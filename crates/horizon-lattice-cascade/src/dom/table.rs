//! Column membership of table cells.
//!
//! A cell's column range starts after the `colspan`s of the cells before
//! it in its row. Cells spanning down from earlier rows (`rowspan`) are not
//! taken into account. Column elements are the `col` and `colgroup`
//! elements that are children of the cell's table; a `colgroup` without
//! `col` children covers `span` columns itself.

use std::ops::Range;

use super::NodeRef;
use crate::element::Element;

/// Upper bound HTML places on `span` and `colspan`.
const MAX_SPAN: usize = 1000;

/// The column elements whose range overlaps the cell's range.
///
/// Non-cells and cells outside a table belong to no column.
pub(super) fn columns_of<'a>(cell: &NodeRef<'a>) -> Vec<NodeRef<'a>> {
    if !is_cell(cell) {
        return vec![];
    }
    let Some(table) = enclosing_table(cell) else {
        return vec![];
    };

    let cells = cell_range(cell);
    column_ranges(&table)
        .into_iter()
        .filter(|(_, range)| range.start < cells.end && cells.start < range.end)
        .map(|(column, _)| column)
        .collect()
}

fn is_cell(element: &NodeRef<'_>) -> bool {
    element.is_named("td") || element.is_named("th")
}

fn enclosing_table<'a>(cell: &NodeRef<'a>) -> Option<NodeRef<'a>> {
    let mut current = cell.parent_element();
    while let Some(element) = current {
        if element.is_named("table") {
            return Some(element);
        }
        current = element.parent_element();
    }
    None
}

fn span(element: &NodeRef<'_>, attribute: &str) -> usize {
    element
        .attribute(None, attribute)
        .and_then(|value| value.trim().parse::<usize>().ok())
        .filter(|&span| span > 0)
        .map_or(1, |span| span.min(MAX_SPAN))
}

fn cell_range(cell: &NodeRef<'_>) -> Range<usize> {
    let mut start = 0;
    let mut sibling = cell.prev_sibling_element();
    while let Some(previous) = sibling {
        if is_cell(&previous) {
            start += span(&previous, "colspan");
        }
        sibling = previous.prev_sibling_element();
    }
    start..start + span(cell, "colspan")
}

/// Column elements of a table with the column range each covers, in document order.
fn column_ranges<'a>(table: &NodeRef<'a>) -> Vec<(NodeRef<'a>, Range<usize>)> {
    let mut ranges = vec![];
    let mut next = 0;

    for child in table.children() {
        if child.is_named("col") {
            let width = span(&child, "span");
            ranges.push((child, next..next + width));
            next += width;
        } else if child.is_named("colgroup") {
            let group_start = next;
            let position = ranges.len();
            let mut has_cols = false;

            for col in child.children().filter(|c| c.is_named("col")) {
                let width = span(&col, "span");
                ranges.push((col, next..next + width));
                next += width;
                has_cols = true;
            }
            if !has_cols {
                next += span(&child, "span");
            }
            ranges.insert(position, (child, group_start..next));
        }
    }

    ranges
}
