//! Turns scanned records into the deduplicated overview.

mod collapse;
mod facility;

pub use self::collapse::collapse;
pub use self::facility::ExclusionList;
use mapdef_extract::models::MapRecord;
use tracing::instrument;

/// Records for the overview: numbered variants collapsed first, then facility
/// maps removed. The input is left untouched for the extended report.
///
/// The order matters. Collapsing renames the head of a run to its shared stem
/// (`chart_FAC_1`, `chart_FAC_2` become `chart_FAC`), and exclusion then looks
/// at that stem, so a run is kept or dropped as a whole. Survivors keep their
/// scan order.
///
/// ```
/// # use mapdef_library::aggregate::{ExclusionList, overview};
/// # use mapdef_extract::models::{Category, Field, MapRecord};
/// let records: Vec<_> = ["alps_1", "alps_2", "EDDF_JEPP_1", "EDDF_JEPP_2"]
///     .into_iter()
///     .map(|name| MapRecord { name: Field::Value(name.to_string()), ..MapRecord::empty(Category::Raster, name) })
///     .collect();
/// let exclusions: ExclusionList = "JEPP".parse().unwrap();
/// let names: Vec<_> = overview(&records, &exclusions).iter().map(|r| r.name.as_str().to_string()).collect();
/// assert_eq!(names, ["alps"]);
/// ```
#[instrument(level = "debug", skip_all, fields(records = records.len()))]
pub fn overview(records: &[MapRecord], exclusions: &ExclusionList) -> Vec<MapRecord> {
    let mut records = records.to_vec();
    let collapsed = collapse(&mut records);
    let excluded = exclusions.exclude(&mut records);
    tracing::debug!(collapsed, excluded, remaining = records.len(), "Aggregated overview");
    records
}
