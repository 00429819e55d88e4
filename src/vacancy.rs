//! Normalized vacancy records and the parser turning raw delimited rows into them.

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Row has {actual} fields but the header has {expected}")]
    FieldCountMismatch { expected: usize, actual: usize },
    #[error("Field '{column}' is empty")]
    EmptyField { column: String },
    #[error("Salary column '{column}' holds '{value}', which is not a non-negative number")]
    InvalidSalary { column: &'static str, value: String },
    #[error("Publication time '{value}' does not start with a four-digit year")]
    InvalidPublishedAt { value: String },
    #[error("A column named '{name}' could not be found in the header")]
    MissingColumn { name: &'static str },
    #[error("The column '{name}' appears more than once in the header")]
    DuplicateColumn { name: &'static str },
}

impl Error {
    /// Return `true` if the row was rejected for its shape alone, before any field was interpreted.
    pub fn is_malformed_row(&self) -> bool {
        matches!(
            self,
            Error::FieldCountMismatch { .. } | Error::EmptyField { .. }
        )
    }
}

/// A single job vacancy, immutable once parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct Vacancy {
    pub name: String,
    pub salary_from: f64,
    pub salary_to: f64,
    /// A currency code like `RUR` or `USD`, checked only when the salary gets normalized.
    pub currency: String,
    pub location_name: String,
    pub published_year: u16,
    average_salary: f64,
}

impl Vacancy {
    pub fn new(
        name: impl Into<String>,
        salary_from: f64,
        salary_to: f64,
        currency: impl Into<String>,
        location_name: impl Into<String>,
        published_year: u16,
    ) -> Self {
        Vacancy {
            name: name.into(),
            salary_from,
            salary_to,
            currency: currency.into(),
            location_name: location_name.into(),
            published_year,
            average_salary: (salary_from + salary_to) / 2.0,
        }
    }

    /// The mean of the salary range, in the vacancy's own currency.
    pub fn average_salary(&self) -> f64 {
        self.average_salary
    }
}

/// Positions of the columns a [`Vacancy`] is built from, resolved once from the header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Columns {
    pub count: usize,
    pub name: usize,
    pub salary_from: usize,
    pub salary_to: usize,
    pub salary_currency: usize,
    pub area_name: usize,
    pub published_at: usize,
}

impl Columns {
    pub fn from_header<'a>(header: impl IntoIterator<Item = &'a str>) -> Result<Self, Error> {
        let header: Vec<&str> = header
            .into_iter()
            .map(|column| column.trim_start_matches('\u{feff}'))
            .collect();
        let idx = |name: &'static str| {
            let mut positions = header
                .iter()
                .enumerate()
                .filter(|(_, column)| **column == name)
                .map(|(pos, _)| pos);
            match (positions.next(), positions.next()) {
                (Some(pos), None) => Ok(pos),
                (Some(_), Some(_)) => Err(Error::DuplicateColumn { name }),
                (None, _) => Err(Error::MissingColumn { name }),
            }
        };
        Ok(Columns {
            count: header.len(),
            name: idx("name")?,
            salary_from: idx("salary_from")?,
            salary_to: idx("salary_to")?,
            salary_currency: idx("salary_currency")?,
            area_name: idx("area_name")?,
            published_at: idx("published_at")?,
        })
    }
}

/// Turn one raw row into a [`Vacancy`], using `header` for column names in error messages.
///
/// Rows with a field count different from the header, or with any empty field, are rejected as malformed.
/// All values are passed through [`crate::sanitize_field()`] before they are interpreted.
pub fn parse_row<'a>(
    columns: &Columns,
    header: &[&str],
    row: impl IntoIterator<Item = &'a str>,
) -> Result<Vacancy, Error> {
    let row: Vec<&str> = row.into_iter().collect();
    if row.len() != columns.count {
        return Err(Error::FieldCountMismatch {
            expected: columns.count,
            actual: row.len(),
        });
    }
    if let Some(pos) = row.iter().position(|value| value.is_empty()) {
        return Err(Error::EmptyField {
            column: header
                .get(pos)
                .map_or_else(|| pos.to_string(), |name| name.to_string()),
        });
    }

    let row: Vec<String> = row.into_iter().map(crate::sanitize_field).collect();
    let published_at = &row[columns.published_at];
    let published_year = published_at
        .get(..4)
        .filter(|year| year.bytes().all(|b| b.is_ascii_digit()))
        .and_then(|year| year.parse::<u16>().ok())
        .ok_or_else(|| Error::InvalidPublishedAt {
            value: published_at.clone(),
        })?;

    Ok(Vacancy::new(
        row[columns.name].as_str(),
        salary(&row[columns.salary_from], "salary_from")?,
        salary(&row[columns.salary_to], "salary_to")?,
        row[columns.salary_currency].as_str(),
        row[columns.area_name].as_str(),
        published_year,
    ))
}

fn salary(value: &str, column: &'static str) -> Result<f64, Error> {
    value
        .parse::<f64>()
        .ok()
        .filter(|salary| salary.is_finite() && *salary >= 0.0)
        .ok_or_else(|| Error::InvalidSalary {
            column,
            value: value.to_owned(),
        })
}
