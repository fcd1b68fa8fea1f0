//! Rectangular report tables built from [`MapRecord`]s.

use derive_more::Display;
use mapdef_extract::PLACEHOLDER;
use mapdef_extract::models::{Category, Coordinate, Field, MapRecord};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
pub enum TableKind {
    /// Every map, every field.
    Extended,
    /// Deduplicated and facility-filtered, descriptive fields only.
    Overview,
}
impl TableKind {
    pub fn columns(&self) -> &'static [Column] {
        match self {
            TableKind::Extended => &[
                Column::Type,
                Column::Name,
                Column::Group,
                Column::Priority,
                Column::Category,
                Column::Publication,
                Column::LevelOfDetail,
                Column::LabelIndex,
                Column::XMin,
                Column::XMax,
                Column::YMin,
                Column::YMax,
            ],
            TableKind::Overview => &[
                Column::Type,
                Column::Name,
                Column::Group,
                Column::Priority,
                Column::Category,
                Column::Publication,
            ],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Column {
    Type,
    Name,
    Group,
    Priority,
    Category,
    Publication,
    LevelOfDetail,
    LabelIndex,
    XMin,
    XMax,
    YMin,
    YMax,
}
impl Column {
    /// The extended report is wider, so some headers are abbreviated there.
    pub fn header(&self, kind: TableKind) -> &'static str {
        match (self, kind) {
            (Column::Type, _) => "TYPE",
            (Column::Name, _) => "NAME",
            (Column::Group, _) => "GROUP",
            (Column::Priority, TableKind::Extended) => "PRIO.",
            (Column::Priority, TableKind::Overview) => "PRIORITY",
            (Column::Category, TableKind::Extended) => "CATEG.",
            (Column::Category, TableKind::Overview) => "CATEGORY",
            (Column::Publication, TableKind::Extended) => "PUBLIC.",
            (Column::Publication, TableKind::Overview) => "PUBLICATION",
            (Column::LevelOfDetail, _) => "LOD",
            (Column::LabelIndex, _) => "SQL",
            (Column::XMin, _) => "XMIN",
            (Column::XMax, _) => "XMAX",
            (Column::YMin, _) => "YMIN",
            (Column::YMax, _) => "YMAX",
        }
    }

    pub fn cell(&self, record: &MapRecord) -> String {
        match self {
            Column::Type => record.map_type.as_str().to_string(),
            Column::Name => record.name.as_str().to_string(),
            Column::Group => record.group.as_str().to_string(),
            Column::Priority => record.priority.to_string(),
            Column::Category => record.category_code.as_str().to_string(),
            Column::Publication => record.publication_code.as_str().to_string(),
            Column::LevelOfDetail => record.level_of_detail_count.to_string(),
            Column::LabelIndex => record.has_label_index.to_string(),
            Column::XMin => axis(&record.bounding_box_min, |c| c.x),
            Column::XMax => axis(&record.bounding_box_max, |c| c.x),
            Column::YMin => axis(&record.bounding_box_min, |c| c.y),
            Column::YMax => axis(&record.bounding_box_max, |c| c.y),
        }
    }
}

fn axis(corner: &Field<Coordinate>, component: impl Fn(&Coordinate) -> f64) -> String {
    corner.value().map(|c| format_coordinate(component(c))).unwrap_or_else(|| PLACEHOLDER.to_string())
}

/// Whole numbers keep one decimal (`12.0`), everything else the shortest
/// representation that round-trips.
fn format_coordinate(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 { format!("{value:.1}") } else { value.to_string() }
}

/// One table row; the category drives row colouring.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Row {
    pub category: Category,
    pub cells: Vec<String>,
}

/// An immutable snapshot of records as a table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportTable {
    kind: TableKind,
    rows: Vec<Row>,
}
impl ReportTable {
    /// One row per record, in the order given, with the columns of `kind`.
    ///
    /// Cells are rendered once, here. Missing descriptor fields become `--`
    /// and coordinates keep at least one decimal; the label index reads `yes`,
    /// `no` or `?`. Each row remembers its record's category so renderers
    /// can colour it without looking at the cells.
    ///
    /// ```
    /// # use mapdef_library::{ReportTable, TableKind};
    /// # use mapdef_extract::models::{Category, MapRecord};
    /// let table = ReportTable::new(TableKind::Overview, [MapRecord::empty(Category::Terrain, "srtm")]);
    /// assert_eq!(table.headers().len(), 6);
    /// assert_eq!(table.rows()[0].cells, ["--"; 6]);
    /// ```
    pub fn new<R: AsRef<MapRecord>>(kind: TableKind, records: impl IntoIterator<Item = R>) -> Self {
        let columns = kind.columns();
        let rows = records
            .into_iter()
            .map(|record| {
                let record = record.as_ref();
                Row {
                    category: record.category,
                    cells: columns.iter().map(|column| column.cell(record)).collect(),
                }
            })
            .collect();
        Self { kind, rows }
    }

    /// All records, as scanned.
    pub fn extended<R: AsRef<MapRecord>>(records: impl IntoIterator<Item = R>) -> Self {
        Self::new(TableKind::Extended, records)
    }

    /// Expects records already passed through [`aggregate::overview`](crate::aggregate::overview).
    pub fn overview<R: AsRef<MapRecord>>(records: impl IntoIterator<Item = R>) -> Self {
        Self::new(TableKind::Overview, records)
    }

    pub fn kind(&self) -> TableKind {
        self.kind
    }

    pub fn headers(&self) -> Vec<&'static str> {
        self.kind.columns().iter().map(|column| column.header(self.kind)).collect()
    }

    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Splits the rows into pages of at most `rows_per_page` rows. An empty
    /// table has no pages.
    pub fn pages(&self, rows_per_page: usize) -> impl ExactSizeIterator<Item = &[Row]> {
        self.rows.chunks(rows_per_page.max(1))
    }

    pub fn page_count(&self, rows_per_page: usize) -> usize {
        self.rows.len().div_ceil(rows_per_page.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mapdef_extract::models::LabelIndex;
    use rstest::rstest;

    fn record(category: Category, name: &str) -> MapRecord {
        let mut record = MapRecord::empty(category, name);
        record.name = Field::Value(name.to_string());
        record
    }

    #[test]
    fn extended_row() {
        let mut full = record(Category::Vector, "de_vfr");
        full.map_type = Field::Value("vector".to_string());
        full.group = Field::Value("VFR".to_string());
        full.priority = Field::Value(10);
        full.category_code = Field::Value("aero".to_string());
        full.publication_code = Field::Value("2401".to_string());
        full.bounding_box_min = Field::Value(Coordinate::new(5.0, 47.27));
        full.bounding_box_max = Field::Value(Coordinate::new(15.04, 55.1));
        let full = full.with_level_of_detail_count(4).with_label_index(LabelIndex::Yes);

        let table = ReportTable::extended([&full]);
        assert_eq!(
            table.headers(),
            ["TYPE", "NAME", "GROUP", "PRIO.", "CATEG.", "PUBLIC.", "LOD", "SQL", "XMIN", "XMAX", "YMIN", "YMAX"]
        );
        assert_eq!(
            table.rows()[0].cells,
            ["vector", "de_vfr", "VFR", "10", "aero", "2401", "4", "yes", "5.0", "15.04", "47.27", "55.1"]
        );
    }

    #[test]
    fn overview_row_uses_placeholders() {
        let table = ReportTable::overview([record(Category::Raster, "chart")]);
        assert_eq!(table.headers(), ["TYPE", "NAME", "GROUP", "PRIORITY", "CATEGORY", "PUBLICATION"]);
        assert_eq!(table.rows()[0].cells, ["--", "chart", "--", "--", "--", "--"]);
        assert_eq!(table.rows()[0].category, Category::Raster);
    }

    #[test]
    fn missing_corners() {
        let table = ReportTable::extended([record(Category::Terrain, "srtm")]);
        assert!(table.rows()[0].cells[8..].iter().all(|c| c == PLACEHOLDER));
        assert_eq!(table.rows()[0].cells[7], "?");
    }

    #[rstest]
    #[case(0, 0)]
    #[case(1, 1)]
    #[case(20, 1)]
    #[case(21, 2)]
    #[case(40, 2)]
    #[case(41, 3)]
    fn test_pages(#[case] rows: usize, #[case] pages: usize) {
        let records: Vec<_> = (0..rows).map(|i| record(Category::Vector, &format!("map{i}"))).collect();
        let table = ReportTable::overview(&records);
        assert_eq!(table.page_count(20), pages);
        let chunks: Vec<_> = table.pages(20).collect();
        assert_eq!(chunks.len(), pages);
        assert!(chunks.iter().all(|chunk| !chunk.is_empty() && chunk.len() <= 20));
        assert_eq!(chunks.iter().map(|c| c.len()).sum::<usize>(), rows);
    }

    #[rstest]
    #[case(12.0, "12.0")]
    #[case(-0.5, "-0.5")]
    #[case(10.12, "10.12")]
    #[case(180.0, "180.0")]
    fn test_format_coordinate(#[case] value: f64, #[case] expected: &str) {
        assert_eq!(format_coordinate(value), expected);
    }
}
