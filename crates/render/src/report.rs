//! HTML documents for map reports.
//!
//! A report is a title page followed by the table split into pages. Each page
//! is a `<section>`; the builtin `report.css` breaks pages between sections.

use crate::file_url;
use mapdef_extract::models::Category;
use mapdef_library::ReportTable;
use mapdef_library::table::Row;
use std::fmt::Write;
use std::path::PathBuf;
use url::Url;

pub const HEADER_COLOUR: &str = "#C8C8C8";

/// Background of the first cell of each row.
pub fn category_colour(category: Category) -> &'static str {
    match category {
        Category::Vector => "#FFFFDA",
        Category::Raster => "#C8E3C8",
        Category::Terrain => "#FFC8C8",
    }
}

pub struct ReportDocument<'a> {
    name: &'a str,
    table: &'a ReportTable,
    rows_per_page: usize,
    logo: Option<Url>,
}
impl<'a> ReportDocument<'a> {
    /// `name` is the database display name shown on every page.
    pub fn new(name: &'a str, table: &'a ReportTable, rows_per_page: usize) -> Self {
        Self { name, table, rows_per_page, logo: None }
    }

    /// A letterhead for the title page. Missing files are skipped with a
    /// warning rather than leaving a broken image in the report.
    pub fn with_logo(mut self, logo: impl Into<Option<PathBuf>>) -> Self {
        self.logo = logo.into().and_then(|path| {
            if !path.is_file() {
                tracing::warn!(path = %path.display(), "Logo not found; title page will have no letterhead");
                return None;
            }
            file_url(&path)
                .inspect_err(|err| tracing::warn!(path = %path.display(), error = ?err, "Logo not usable"))
                .ok()
        });
        self
    }

    pub fn to_html(&self) -> String {
        let mut html = String::new();
        // Writing to a String is infallible.
        let _ = self.write_html(&mut html);
        html
    }

    fn write_html(&self, html: &mut String) -> std::fmt::Result {
        let name = escape(self.name);
        let kind = self.table.kind();
        writeln!(html, "<!DOCTYPE html>")?;
        writeln!(html, "<html lang=\"en\">")?;
        writeln!(html, "<head>")?;
        writeln!(html, "<meta charset=\"utf-8\">")?;
        writeln!(html, "<title>{kind}: {name}</title>")?;
        writeln!(html, "</head>")?;
        writeln!(html, "<body>")?;
        writeln!(html, "<section class=\"title-page\">")?;
        if let Some(logo) = &self.logo {
            writeln!(html, "<img class=\"logo\" src=\"{}\" alt=\"\">", escape(logo.as_str()))?;
        }
        writeln!(html, "<h1>Map Overview for: {name}</h1>")?;
        writeln!(html, "</section>")?;
        let pages = self.table.page_count(self.rows_per_page);
        for (index, rows) in self.table.pages(self.rows_per_page).enumerate() {
            writeln!(html, "<section class=\"table-page\">")?;
            writeln!(html, "<h2>{name} - Table {} of {pages}</h2>", index + 1)?;
            self.write_table(html, rows)?;
            writeln!(html, "</section>")?;
        }
        writeln!(html, "</body>")?;
        writeln!(html, "</html>")
    }

    fn write_table(&self, html: &mut String, rows: &[Row]) -> std::fmt::Result {
        let kind = self.table.kind().to_string().to_lowercase();
        writeln!(html, "<table class=\"report {kind}\">")?;
        write!(html, "<thead><tr>")?;
        for header in self.table.headers() {
            write!(html, "<th style=\"background:{HEADER_COLOUR}\">{}</th>", escape(header))?;
        }
        writeln!(html, "</tr></thead>")?;
        writeln!(html, "<tbody>")?;
        for row in rows {
            write!(html, "<tr class=\"{}\">", row.category)?;
            for (column, cell) in row.cells.iter().enumerate() {
                if column == 0 {
                    write!(html, "<td style=\"background:{}\">{}</td>", category_colour(row.category), escape(cell))?;
                } else {
                    write!(html, "<td>{}</td>", escape(cell))?;
                }
            }
            writeln!(html, "</tr>")?;
        }
        writeln!(html, "</tbody>")?;
        writeln!(html, "</table>")
    }
}

fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            c => escaped.push(c),
        }
    }
    escaped
}
