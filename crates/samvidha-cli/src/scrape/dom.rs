//! HTML table extraction
//!
//! Reduces a portal page to plain text tables so the rest of the pipeline
//! never touches the DOM. Cell text is trimmed with internal whitespace
//! collapsed to single spaces, matching how the portal's multi-line cells
//! should read.

use scraper::{ElementRef, Html, Selector};

/// A table reduced to rows of cell text. `th` and `td` both count as cells.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Table {
    pub rows: Vec<Vec<String>>,
}

impl Table {
    /// First row, if the table has any
    pub fn first_row(&self) -> Option<&[String]> {
        self.rows.first().map(Vec::as_slice)
    }
}

/// Extract every table from a page, in document order
pub fn extract_tables(html: &str) -> Vec<Table> {
    let document = Html::parse_document(html);
    let table_selector = Selector::parse("table").unwrap();
    let row_selector = Selector::parse("tr").unwrap();
    let cell_selector = Selector::parse("th, td").unwrap();

    document
        .select(&table_selector)
        .map(|table| {
            let rows = table
                .select(&row_selector)
                .map(|row| row.select(&cell_selector).map(cell_text).collect())
                .collect();
            Table { rows }
        })
        .collect()
}

fn cell_text(cell: ElementRef<'_>) -> String {
    normalize_ws(&cell.text().collect::<Vec<_>>().join(" "))
}

fn normalize_ws(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_tables_in_document_order() {
        let html = r#"
            <html><body>
                <table><tr><td>first</td></tr></table>
                <div><table><tr><td>second</td><td>table</td></tr></table></div>
            </body></html>
        "#;

        let tables = extract_tables(html);
        assert_eq!(tables.len(), 2);
        assert_eq!(tables[0].rows, vec![vec!["first".to_string()]]);
        assert_eq!(
            tables[1].rows,
            vec![vec!["second".to_string(), "table".to_string()]]
        );
    }

    #[test]
    fn test_th_and_td_both_count_as_cells() {
        let html = "<table><tr><th>Subject</th><td>Data Structures</td></tr></table>";

        let tables = extract_tables(html);
        assert_eq!(
            tables[0].rows,
            vec![vec!["Subject".to_string(), "Data Structures".to_string()]]
        );
    }

    #[test]
    fn test_cell_text_collapses_whitespace() {
        let html = "<table><tr><td>  Data\n      Structures\t Lab </td></tr></table>";

        let tables = extract_tables(html);
        assert_eq!(tables[0].rows[0][0], "Data Structures Lab");
    }

    #[test]
    fn test_cell_text_joins_nested_elements() {
        let html = "<table><tr><td><b>90</b>.<span>00</span></td></tr></table>";

        let tables = extract_tables(html);
        assert_eq!(tables[0].rows[0][0], "90 . 00");
    }

    #[test]
    fn test_no_tables_on_plain_page() {
        let tables = extract_tables("<html><body><p>Session expired</p></body></html>");
        assert!(tables.is_empty());
    }

    #[test]
    fn test_zero_row_table() {
        let tables = extract_tables("<table></table>");
        assert_eq!(tables.len(), 1);
        assert!(tables[0].rows.is_empty());
        assert!(tables[0].first_row().is_none());
    }
}
