//! Tabular rendering of record lists.
//!
//! Each record type exposes a fixed column schema through the [`Tabular`]
//! trait; [`record_table`] turns a homogeneous list into one `genpdf` table
//! with a shaded, bold header row and borderless data rows.  The same schema
//! is used wherever a type is rendered, whether as a top-level section or as
//! a nested sub-table inside the task report.

use chrono::NaiveDate;
use genpdf::elements::{Paragraph, TableLayout};
use genpdf::style::Style;
use genpdf::Element;

use crate::elements::ShadedRowDecorator;
use crate::error::ReportError;
use crate::model::{Product, Task, User, Warehouse};

/// Date pattern shared by table cells and the report date line.
pub const DATE_FORMAT: &str = "%d %B, %Y";

/// Formats a date as `dd MMMM, yyyy` with English month names.
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

fn require<'a>(
    value: Option<&'a str>,
    record: &'static str,
    field: &'static str,
) -> Result<&'a str, ReportError> {
    value.ok_or(ReportError::MissingField { record, field })
}

fn require_date(
    value: Option<NaiveDate>,
    record: &'static str,
    field: &'static str,
) -> Result<String, ReportError> {
    value
        .map(format_date)
        .ok_or(ReportError::MissingField { record, field })
}

/// A record type that renders as one row of a fixed-schema table.
pub trait Tabular {
    /// Record name used when reporting missing fields.
    const LABEL: &'static str;

    /// Column labels, in rendering order.
    fn headers() -> &'static [&'static str];

    /// Relative column widths, one weight per header.
    fn weights() -> &'static [usize];

    /// Stringifies the record into one cell per column.
    ///
    /// Fails with [`ReportError::MissingField`] if a required field is unset.
    fn cells(&self) -> Result<Vec<String>, ReportError>;
}

impl Tabular for User {
    const LABEL: &'static str = "User";

    fn headers() -> &'static [&'static str] {
        &["Username", "Name", "Lastname", "National ID", "Email", "Phone"]
    }

    fn weights() -> &'static [usize] {
        &[2, 2, 2, 2, 2, 2]
    }

    fn cells(&self) -> Result<Vec<String>, ReportError> {
        Ok(vec![
            self.username().to_owned(),
            self.name().to_owned(),
            self.lastname().to_owned(),
            require(self.national_id(), Self::LABEL, "national id")?.to_owned(),
            require(self.email(), Self::LABEL, "email")?.to_owned(),
            require(self.phone(), Self::LABEL, "phone")?.to_owned(),
        ])
    }
}

impl Tabular for Product {
    const LABEL: &'static str = "Product";

    fn headers() -> &'static [&'static str] {
        &["Name", "Code", "Width", "Height", "Length", "Weight"]
    }

    fn weights() -> &'static [usize] {
        &[3, 3, 2, 2, 2, 2]
    }

    fn cells(&self) -> Result<Vec<String>, ReportError> {
        Ok(vec![
            self.name().to_owned(),
            self.code().to_owned(),
            self.width().to_string(),
            self.height().to_string(),
            self.length().to_string(),
            self.weight().to_string(),
        ])
    }
}

impl Tabular for Warehouse {
    const LABEL: &'static str = "Warehouse";

    fn headers() -> &'static [&'static str] {
        &[
            "Building",
            "Zone",
            "Space ID",
            "Space Height",
            "Space Width",
            "Space Length",
            "Product ID",
        ]
    }

    fn weights() -> &'static [usize] {
        &[3, 2, 2, 2, 2, 2, 2]
    }

    fn cells(&self) -> Result<Vec<String>, ReportError> {
        // An empty slot is valid; it renders an empty product cell.
        let product_id = self
            .product_id()
            .map(|id| id.to_string())
            .unwrap_or_default();
        Ok(vec![
            self.building().to_owned(),
            self.zone().to_owned(),
            self.space_id().to_string(),
            self.space_height().to_string(),
            self.space_width().to_string(),
            self.space_length().to_string(),
            product_id,
        ])
    }
}

impl Tabular for Task {
    const LABEL: &'static str = "Task";

    fn headers() -> &'static [&'static str] {
        &[
            "Task ID",
            "Name",
            "Description",
            "State",
            "Priority",
            "Creation Date",
            "Start Date",
            "End Date",
        ]
    }

    fn weights() -> &'static [usize] {
        &[2, 2, 3, 1, 1, 3, 3, 3]
    }

    fn cells(&self) -> Result<Vec<String>, ReportError> {
        Ok(vec![
            self.id().to_string(),
            self.name().to_owned(),
            self.description().to_owned(),
            self.state().to_string(),
            self.priority().to_string(),
            require_date(self.creation_date(), Self::LABEL, "creation date")?,
            require_date(self.start_date(), Self::LABEL, "start date")?,
            require_date(self.end_date(), Self::LABEL, "end date")?,
        ])
    }
}

/// Stringifies a record list into table rows, one `Vec<String>` per record.
///
/// Exposed separately from [`record_table`] so the row shape can be asserted
/// without rendering a document.
pub fn body_rows<R: Tabular>(records: &[R]) -> Result<Vec<Vec<String>>, ReportError> {
    records.iter().map(Tabular::cells).collect()
}

/// Builds the table for a homogeneous record list.
///
/// The table always carries the header row; an empty list yields a
/// header-only table.
pub fn record_table<R: Tabular>(records: &[R]) -> Result<TableLayout, ReportError> {
    let mut table = TableLayout::new(R::weights().to_vec());
    table.set_cell_decorator(ShadedRowDecorator::new());

    let mut header_style = Style::new();
    header_style.set_bold();

    let mut header = table.row();
    for label in R::headers() {
        header.push_element(Paragraph::new(*label).styled(header_style));
    }
    header.push()?;

    for cells in body_rows(records)? {
        let mut row = table.row();
        for cell in cells {
            row.push_element(Paragraph::new(cell));
        }
        row.push()?;
    }

    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::{body_rows, format_date, Tabular};
    use crate::error::ReportError;
    use crate::model::{Product, Task, User, Warehouse};
    use chrono::NaiveDate;

    fn complete_user() -> User {
        User::new("jdoe", "Jane", "Doe")
            .with_national_id(Some("85010112345".to_string()))
            .with_email(Some("jane@example.com".to_string()))
            .with_phone(Some("555-0100".to_string()))
    }

    fn dated_task() -> Task {
        let date = NaiveDate::from_ymd_opt(2024, 4, 5).unwrap();
        Task::new(7, "Restock", "Refill zone 3", 1, 2)
            .with_creation_date(date)
            .with_start_date(date)
            .with_end_date(date.succ_opt().unwrap())
    }

    #[test]
    fn schemas_pair_headers_with_weights() {
        assert_eq!(User::headers().len(), User::weights().len());
        assert_eq!(Product::headers().len(), Product::weights().len());
        assert_eq!(Warehouse::headers().len(), Warehouse::weights().len());
        assert_eq!(Task::headers().len(), Task::weights().len());
    }

    #[test]
    fn user_rows_match_header_width() {
        let rows = body_rows(&[complete_user(), complete_user()]).unwrap();
        assert_eq!(rows.len(), 2);
        for row in &rows {
            assert_eq!(row.len(), User::headers().len());
        }
    }

    #[test]
    fn empty_list_yields_no_body_rows() {
        let rows = body_rows::<Warehouse>(&[]).unwrap();
        assert!(rows.is_empty());
    }

    #[test]
    fn missing_phone_surfaces_as_missing_field() {
        let user = complete_user().with_phone(None);
        let err = body_rows(&[user]).unwrap_err();
        assert!(matches!(
            err,
            ReportError::MissingField {
                record: "User",
                field: "phone",
            }
        ));
    }

    #[test]
    fn product_values_follow_header_order() {
        let product = Product::new("Crate", "CR-9", 1.5, 2.0, 3.0, 4.25);
        let rows = body_rows(&[product]).unwrap();
        assert_eq!(rows[0], ["Crate", "CR-9", "1.5", "2", "3", "4.25"]);
    }

    #[test]
    fn empty_slot_renders_empty_product_cell() {
        let slot = Warehouse::new("B1", "Z3", 7, 10, 20, 30);
        let rows = body_rows(&[slot]).unwrap();
        assert_eq!(rows[0].last().map(String::as_str), Some(""));

        let occupied = Warehouse::new("B1", "Z3", 7, 10, 20, 30).with_product_id(42);
        let rows = body_rows(&[occupied]).unwrap();
        assert_eq!(rows[0].last().map(String::as_str), Some("42"));
    }

    #[test]
    fn task_dates_use_report_pattern() {
        let rows = body_rows(&[dated_task()]).unwrap();
        assert_eq!(rows[0][5], "05 April, 2024");
        assert_eq!(rows[0][7], "06 April, 2024");
    }

    #[test]
    fn unset_start_date_is_an_error() {
        let task = dated_task().with_start_date(None);
        let err = body_rows(&[task]).unwrap_err();
        assert!(matches!(
            err,
            ReportError::MissingField {
                record: "Task",
                field: "start date",
            }
        ));
    }

    #[test]
    fn date_format_is_english_and_zero_padded() {
        let date = NaiveDate::from_ymd_opt(2023, 12, 1).unwrap();
        assert_eq!(format_date(date), "01 December, 2023");
    }
}
