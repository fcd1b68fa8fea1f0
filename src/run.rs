//! One complete run: scan a database and write its reports.

use crate::error::{ErrorKind, Result};
use exn::ResultExt;
use mapdef_config::Config;
use mapdef_extract::models::Category;
use mapdef_library::csv;
use mapdef_library::error::ErrorKind as LibraryErrorKind;
use mapdef_library::{
    ExclusionList, FileNameGenerator, Layout, ReportTable, ScanOptions, ScanReport, TableKind, aggregate, scan,
    timestamp,
};
use mapdef_render::error::ErrorKind as RenderErrorKind;
use mapdef_render::{ReportDocument, Renderer, StyleConfig};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::Duration;
use time::OffsetDateTime;
use tracing::instrument;

pub const NO_DATA_MESSAGE: &str = "There are no raster, vector or terrain data in the db folder.";

#[derive(Debug, PartialEq, Eq)]
pub enum Outcome {
    /// Nothing to report; no files were written.
    NoData,
    Written(Vec<PathBuf>),
}

/// Scans `input` and writes the reports into `output`, narrating progress on
/// `console`.
#[instrument(skip(config, console))]
pub fn run(config: &Config, input: &Path, output: &Path, console: &mut impl Write) -> Result<Outcome> {
    let layout = Layout::detect(input);
    let name = config.version_info().display_name(input);
    say(console, format_args!("\n{name}\n"));

    let report = scan_database(config, &layout)?;
    say(console, format_args!("{}\n", dataset_summary(&report)));
    let noteworthy: Vec<_> = report.noteworthy().collect();
    if !noteworthy.is_empty() {
        say(console, format_args!("Skipped {} folder(s):", noteworthy.len()));
        for diagnostic in noteworthy {
            say(console, format_args!("  {diagnostic}"));
        }
        say(console, format_args!(""));
    }
    if report.is_empty() {
        say(console, format_args!("{NO_DATA_MESSAGE}"));
        return Ok(Outcome::NoData);
    }

    let exclusions = ExclusionList::load(&config.exclusion_list)
        .or_raise(|| ErrorKind::ExclusionList(config.exclusion_list.clone()))?;
    let extended = ReportTable::extended(&report.records);
    let overview = ReportTable::overview(aggregate::overview(&report.records, &exclusions));

    let names = OutputNames::new(config, &name)?;
    let mut written = Vec::new();
    // The CSV needs no browser, so it is written even when printing fails.
    let path = output.join(names.file(TableKind::Overview, "csv")?);
    csv::export(&overview, &path).map_err(|err| {
        let kind = match &*err {
            LibraryErrorKind::OutputLocked(path) => ErrorKind::OutputLocked(path.clone()),
            _ => ErrorKind::Export,
        };
        err.raise(kind)
    })?;
    written.push(path);

    let renderer = renderer(config)?;
    for table in [&extended, &overview] {
        let path = output.join(names.file(table.kind(), "pdf")?);
        let html = ReportDocument::new(&name, table, config.report.rows_per_page)
            .with_logo(config.logo.clone())
            .to_html();
        renderer.render_slice_to(html.as_bytes(), &path).map_err(|err| {
            let kind = match &*err {
                RenderErrorKind::OutputLocked(path) => ErrorKind::OutputLocked(path.clone()),
                _ => ErrorKind::Render,
            };
            err.raise(kind)
        })?;
        written.push(path);
    }

    say(console, format_args!("Two PDF files were created under {}\n", output.display()));
    say(console, format_args!("Do not forget to remove the EN7 Drive with safely remove!!!\n"));
    Ok(Outcome::Written(written))
}

/// Prints with the configured browser, or the first one found.
fn renderer(config: &Config) -> Result<Renderer> {
    let styles = StyleConfig::from_names(&config.report.styles).or_raise(|| ErrorKind::Render)?;
    let renderer = match &config.report.chrome {
        Some(executable) => Renderer::with_executable(styles, executable),
        None => Renderer::new(styles),
    };
    Ok(renderer.or_raise(|| ErrorKind::Render)?.with_timeout(Duration::from_secs(config.report.chrome_timeout_secs)))
}

fn scan_database(config: &Config, layout: &Layout) -> Result<ScanReport> {
    let options = ScanOptions { parse: config.parse_options(), strict: config.parse.strict };
    scan(layout, options).map_err(|err| {
        let kind = match &*err {
            LibraryErrorKind::MalformedDescriptor(path) => ErrorKind::MalformedDescriptor(path.clone()),
            _ => ErrorKind::Scan,
        };
        err.raise(kind)
    })
}

/// Raster is listed first, as it always has been.
fn dataset_summary(report: &ScanReport) -> String {
    format!(
        "Number of datasets: {} raster, {} vector, {} terrain.",
        report.candidates(Category::Raster),
        report.candidates(Category::Vector),
        report.candidates(Category::Terrain),
    )
}

/// Console output is best effort; a closed stdout must not fail the run.
fn say(console: &mut impl Write, message: std::fmt::Arguments<'_>) {
    let _ = writeln!(console, "{message}");
}

/// File names for one run, all sharing the run's timestamp.
struct OutputNames<'a> {
    generator: FileNameGenerator,
    name: &'a str,
    timestamp: String,
}
impl<'a> OutputNames<'a> {
    fn new(config: &Config, name: &'a str) -> Result<Self> {
        let generator: FileNameGenerator = config.report.file_name.parse::<FileNameGenerator>().or_raise(|| ErrorKind::Naming)?;
        let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
        let timestamp = timestamp(now, &config.report.timestamp_format).or_raise(|| ErrorKind::Naming)?;
        Ok(Self { generator, name, timestamp })
    }

    fn file(&self, kind: TableKind, ext: &str) -> Result<String> {
        self.generator.generate_with_ext(kind, self.name, &self.timestamp, ext).or_raise(|| ErrorKind::Naming)
    }
}
