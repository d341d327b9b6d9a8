//! CBN circulars listing parser.
//!
//! The listing at `https://www.cbn.gov.ng/Documents/circulars.html` is a single
//! table whose first row is a header. Each data row has the date in the first
//! cell and the title, wrapped in a link to the document, in the second.

use crate::models::ListingRow;
use once_cell::sync::Lazy;
use scraper::{ElementRef, Html, Selector};
use tracing::{debug, instrument};

static TABLE: Lazy<Selector> = Lazy::new(|| Selector::parse("table").expect("static selector"));
static ROW: Lazy<Selector> = Lazy::new(|| Selector::parse("tr").expect("static selector"));
static CELL: Lazy<Selector> = Lazy::new(|| Selector::parse("td").expect("static selector"));
static ANCHOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a").expect("static selector"));

/// Extract the data rows of the first table in `html`.
///
/// Returns `None` when the document has no table at all. The first row is
/// treated as the header and skipped; rows with fewer than two cells are
/// dropped.
#[instrument(level = "debug", skip_all, fields(bytes = html.len()))]
pub fn parse_listing(html: &str) -> Option<Vec<ListingRow>> {
    let document = Html::parse_document(html);
    let table = document.select(&TABLE).next()?;

    let rows: Vec<ListingRow> = table
        .select(&ROW)
        .skip(1)
        .filter_map(parse_row)
        .collect();

    debug!(count = rows.len(), "Parsed listing rows");
    Some(rows)
}

fn parse_row(tr: ElementRef<'_>) -> Option<ListingRow> {
    let mut cells = tr.select(&CELL);
    let date_cell = cells.next()?;
    let title_cell = cells.next()?;

    let href = title_cell
        .select(&ANCHOR)
        .next()
        .and_then(|a| a.value().attr("href"))
        .map(str::trim)
        .filter(|h| !h.is_empty())
        .map(str::to_string);

    Some(ListingRow {
        date: cell_text(date_cell),
        title: cell_text(title_cell),
        href,
    })
}

fn cell_text(cell: ElementRef<'_>) -> String {
    cell.text().collect::<String>().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = r#"<!doctype html>
<html><body>
<table>
  <tr><th>Date</th><th>Title</th></tr>
  <tr><td> 12/03/2024 </td><td><a href="/Out/2024/CCD/Cash.pdf"> Cash Withdrawal Limits </a></td></tr>
  <tr><td>01/02/2024</td><td>
      <a href="/Out/2024/FPRD/Notice.PDF">Notice to Banks</a></td><td>extra</td></tr>
  <tr><td>only one cell</td></tr>
  <tr><td>05/01/2024</td><td>Unlinked Circular</td></tr>
  <tr><td>04/01/2024</td><td><a>Anchor without href</a></td></tr>
  <tr><td>03/01/2024</td><td><a href="  ">Blank href</a></td></tr>
</table>
<table><tr><td>ignored</td><td>second table</td></tr></table>
</body></html>"#;

    #[test]
    fn test_parse_listing_rows() {
        let rows = parse_listing(LISTING).unwrap();
        assert_eq!(rows.len(), 5);

        assert_eq!(rows[0].date, "12/03/2024");
        assert_eq!(rows[0].title, "Cash Withdrawal Limits");
        assert_eq!(rows[0].href.as_deref(), Some("/Out/2024/CCD/Cash.pdf"));

        assert_eq!(rows[1].title, "Notice to Banks");
        assert_eq!(rows[1].href.as_deref(), Some("/Out/2024/FPRD/Notice.PDF"));
    }

    #[test]
    fn test_rows_without_links_have_no_href() {
        let rows = parse_listing(LISTING).unwrap();
        assert_eq!(rows[2].title, "Unlinked Circular");
        assert_eq!(rows[2].href, None);
        assert_eq!(rows[3].href, None);
        assert_eq!(rows[4].href, None);
    }

    #[test]
    fn test_no_table() {
        assert_eq!(parse_listing("<html><body><p>Maintenance</p></body></html>"), None);
    }

    #[test]
    fn test_header_only_table() {
        let rows = parse_listing("<table><tr><th>Date</th><th>Title</th></tr></table>").unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn test_header_row_is_skipped_even_with_td_cells() {
        let html = "<table>\
            <tr><td>Date</td><td>Title</td></tr>\
            <tr><td>d</td><td><a href=\"/a.pdf\">t</a></td></tr>\
            </table>";
        let rows = parse_listing(html).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].date, "d");
    }
}
