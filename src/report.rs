//! Report composition entry points.
//!
//! Each entry point assembles one complete document from an in-memory record
//! list and a set of inclusion flags, then serializes it into an owned byte
//! buffer.  Calls share no state: a [`ReportGenerator`] holds only immutable
//! configuration, so concurrent renders need no coordination.
//!
//! Any failure during assembly or serialization is returned to the caller;
//! a failed call never produces a byte stream.

use std::io::Cursor;
use std::slice;

use chrono::{Local, NaiveDate};
use genpdf::elements::{Break, Paragraph};
use genpdf::style::{Color, Style};
use genpdf::{Alignment, Element};
use log::debug;

use crate::builder::DocumentBuilder;
use crate::chart::{self, PieChart, DEFAULT_CHART_HEIGHT, DEFAULT_CHART_WIDTH};
use crate::elements::{scaled_image_from_bytes, Divider};
use crate::error::ReportError;
use crate::model::{Product, Task, User, Warehouse};
use crate::table::{format_date, record_table};

const TITLE_FONT_SIZE: u8 = 20;
const DATE_FONT_SIZE: u8 = 12;
const PAGE_MARGIN_MM: i32 = 10;
const FOOTER_HEIGHT_MM: f64 = 10.0;
const CHART_WIDTH_MM: f64 = 120.0;

/// Visual treatment applied to every report produced by a generator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReportStyle {
    /// Default paper size, standard margins, no page furniture.
    #[default]
    Plain,
    /// Explicit A4 paper with a page-number footer.
    Formatted,
}

/// Inclusion flags for the task report.  All sections are off by default.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TaskReportOptions {
    users: bool,
    products: bool,
    warehouses: bool,
    pie_chart: bool,
}

impl TaskReportOptions {
    /// Creates options with every section disabled.
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggles the nested user table per task.
    pub fn include_users(mut self, include: bool) -> Self {
        self.users = include;
        self
    }

    /// Toggles the nested product table per task.
    pub fn include_products(mut self, include: bool) -> Self {
        self.products = include;
        self
    }

    /// Toggles the nested storage-slot table per task.
    pub fn include_warehouses(mut self, include: bool) -> Self {
        self.warehouses = include;
        self
    }

    /// Toggles the state-distribution pie chart after the task sections.
    pub fn include_pie_chart(mut self, include: bool) -> Self {
        self.pie_chart = include;
        self
    }
}

/// A finished report owning its serialized bytes.
pub struct Report {
    bytes: Vec<u8>,
}

impl Report {
    /// Returns the serialized document.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Consumes the report and returns the serialized document.
    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    /// Consumes the report and returns a seekable reader over the bytes.
    pub fn into_reader(self) -> Cursor<Vec<u8>> {
        Cursor::new(self.bytes)
    }
}

/// Top-level factory for the four report kinds.
#[derive(Debug, Default)]
pub struct ReportGenerator {
    style: ReportStyle,
    generation_date: Option<NaiveDate>,
}

impl ReportGenerator {
    /// Creates a generator with the plain style and today's generation date.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the report style and returns the updated generator.
    pub fn with_style(mut self, style: ReportStyle) -> Self {
        self.style = style;
        self
    }

    /// Pins the generation date instead of using the current date.
    pub fn with_generation_date(mut self, date: impl Into<Option<NaiveDate>>) -> Self {
        self.generation_date = date.into();
        self
    }

    /// Renders the user report.
    ///
    /// When `include_task_notes` is set, a one-line `Tasks for {name}
    /// {lastname}:` note is emitted per user while the rows are added.  The
    /// notes are informational text only and precede the table block, which
    /// matches the layout of the reports this component replaces.
    pub fn user_report(
        &self,
        users: &[User],
        include_task_notes: bool,
    ) -> Result<Report, ReportError> {
        debug!("assembling user report for {} users", users.len());
        let mut document = self.document("User Report")?;
        self.front_matter(&mut document, "User Report");

        let table = record_table(users)?;
        if include_task_notes {
            for user in users {
                document.push(Paragraph::new(format!(
                    "Tasks for {} {}:",
                    user.name(),
                    user.lastname()
                )));
            }
        }
        document.push(table);

        finish(document)
    }

    /// Renders the warehouse report, one row per storage slot.
    pub fn warehouse_report(&self, slots: &[Warehouse]) -> Result<Report, ReportError> {
        debug!("assembling warehouse report for {} slots", slots.len());
        let mut document = self.document("Warehouse Report")?;
        self.front_matter(&mut document, "Warehouse Report");
        document.push(record_table(slots)?);
        finish(document)
    }

    /// Renders the product report, one row per product.
    pub fn product_report(&self, products: &[Product]) -> Result<Report, ReportError> {
        debug!("assembling product report for {} products", products.len());
        let mut document = self.document("Product In Warehouse Report")?;
        self.front_matter(&mut document, "Product In Warehouse Report");
        document.push(record_table(products)?);
        finish(document)
    }

    /// Renders the task report.
    ///
    /// Tasks appear in input order, each as a summary table followed by the
    /// flag-gated nested sections and a spacer.  When the pie chart is
    /// requested it is appended after all tasks, with its legend rendered as
    /// document text.
    pub fn task_report(
        &self,
        tasks: &[Task],
        options: &TaskReportOptions,
    ) -> Result<Report, ReportError> {
        debug!(
            "assembling task report for {} tasks (options: {:?})",
            tasks.len(),
            options
        );
        let mut document = self.document("Task Report")?;
        self.front_matter(&mut document, "Task Report");

        for task in tasks {
            document.push(record_table(slice::from_ref(task))?);

            if options.users {
                push_nested_section(&mut document, "Users:", record_table(task.users())?);
            }
            if options.products {
                push_nested_section(&mut document, "Products:", record_table(task.products())?);
            }
            if options.warehouses {
                push_nested_section(&mut document, "Warehouses:", record_table(task.warehouses())?);
            }

            document.push(Break::new(1));
        }

        if options.pie_chart {
            document.push(Divider::new());
            push_state_chart(&mut document, tasks)?;
        }

        finish(document)
    }

    fn generation_date(&self) -> NaiveDate {
        self.generation_date
            .unwrap_or_else(|| Local::now().date_naive())
    }

    fn document(&self, title: &str) -> Result<genpdf::Document, ReportError> {
        let mut builder = DocumentBuilder::new().with_margins(PAGE_MARGIN_MM);

        if self.style == ReportStyle::Formatted {
            builder = builder
                .with_paper_size(genpdf::PaperSize::A4)
                .with_footer(FOOTER_HEIGHT_MM, |page| {
                    Paragraph::new(format!("Page {page}")).aligned(Alignment::Right)
                });
        }

        let mut document = builder.build()?;
        document.set_title(title);
        Ok(document)
    }

    fn front_matter(&self, document: &mut genpdf::Document, title: &str) {
        let mut title_style = Style::new();
        title_style.set_bold();
        title_style.set_font_size(TITLE_FONT_SIZE);
        document.push(Paragraph::new(title).styled(title_style));

        let mut date_style = Style::new();
        date_style.set_font_size(DATE_FONT_SIZE);
        document.push(
            Paragraph::new(format!("Date: {}", format_date(self.generation_date())))
                .styled(date_style),
        );

        document.push(Divider::new());
    }
}

fn bold_style() -> Style {
    let mut style = Style::new();
    style.set_bold();
    style
}

fn push_nested_section(
    document: &mut genpdf::Document,
    heading: &str,
    table: genpdf::elements::TableLayout,
) {
    document.push(Divider::new());
    document.push(Paragraph::new(heading).styled(bold_style()));
    document.push(table);
}

fn push_state_chart(
    document: &mut genpdf::Document,
    tasks: &[Task],
) -> Result<(), ReportError> {
    let distribution = chart::state_distribution(tasks);
    let pie = PieChart::from_distribution("Task State Distribution", &distribution);

    debug!("embedding state chart with {} slices", pie.slices().len());
    let png = pie.render_png(DEFAULT_CHART_WIDTH, DEFAULT_CHART_HEIGHT)?;
    let mut image = scaled_image_from_bytes(&png, CHART_WIDTH_MM)?;
    image.set_alignment(Alignment::Center);

    document.push(
        Paragraph::new(pie.title())
            .aligned(Alignment::Center)
            .styled(bold_style()),
    );
    document.push(image);

    let total: u64 = pie.slices().iter().map(|slice| slice.count()).sum();
    for (index, slice) in pie.slices().iter().enumerate() {
        let [r, g, b] = PieChart::slice_color(index);
        let mut swatch_style = bold_style();
        swatch_style.set_color(Color::Rgb(r, g, b));

        let share = if total == 0 {
            0.0
        } else {
            slice.count() as f64 * 100.0 / total as f64
        };

        let mut legend = Paragraph::default();
        legend.push_styled("\u{25a0} ", swatch_style);
        legend.push(format!("{}: {} ({:.0}%)", slice.label(), slice.count(), share));
        document.push(legend.aligned(Alignment::Center));
    }

    Ok(())
}

fn finish(document: genpdf::Document) -> Result<Report, ReportError> {
    let mut bytes = Vec::new();
    document.render(&mut bytes)?;
    Ok(Report { bytes })
}

#[cfg(test)]
mod tests {
    use super::{ReportStyle, TaskReportOptions};

    #[test]
    fn options_default_to_everything_off() {
        let options = TaskReportOptions::new();
        assert!(!options.users);
        assert!(!options.products);
        assert!(!options.warehouses);
        assert!(!options.pie_chart);
    }

    #[test]
    fn options_toggle_independently() {
        let options = TaskReportOptions::new()
            .include_users(true)
            .include_pie_chart(true);
        assert!(options.users);
        assert!(!options.products);
        assert!(!options.warehouses);
        assert!(options.pie_chart);
    }

    #[test]
    fn default_style_is_plain() {
        assert_eq!(ReportStyle::default(), ReportStyle::Plain);
    }
}
