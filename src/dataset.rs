use crate::Vacancy;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("The input did not contain a header line")]
    NoHeader,
    #[error("Cannot use '{0}' as delimiter")]
    InvalidDelimiter(char),
    #[error(transparent)]
    Csv(#[from] csv::Error),
    #[error(transparent)]
    Header(#[from] crate::vacancy::Error),
}

/// What was read from a vacancy export.
#[derive(Debug, Clone, Default)]
pub struct Outcome {
    /// All rows that could be turned into a vacancy, in input order.
    pub vacancies: Vec<Vacancy>,
    /// The amount of rows dropped for having the wrong field count or empty fields.
    pub malformed_rows: usize,
    /// The amount of well-formed rows dropped as their salary or publication time couldn't be parsed.
    pub invalid_rows: usize,
}

#[derive(Clone, Debug)]
pub struct Options {
    pub delimiter: char,
}

impl Default for Options {
    fn default() -> Self {
        Options { delimiter: ',' }
    }
}

pub(crate) mod function {
    use crate::dataset::{Error, Options, Outcome};
    use crate::vacancy::{parse_row, Columns};

    /// Read all vacancies from `csv_data`, which must start with a header line.
    ///
    /// Rows that don't parse are skipped and counted, only a missing or unusable header fails the read.
    pub fn read_vacancies(
        csv_data: impl std::io::Read,
        Options { delimiter }: Options,
    ) -> Result<Outcome, Error> {
        let delimiter = delimiter
            .try_into()
            .map_err(|_| Error::InvalidDelimiter(delimiter))?;
        let mut csv = csv::ReaderBuilder::new()
            .delimiter(delimiter)
            .has_headers(true)
            .flexible(true)
            .from_reader(csv_data);

        let headers = csv.headers()?.clone();
        if headers.is_empty() {
            return Err(Error::NoHeader);
        }
        let header: Vec<&str> = headers.iter().collect();
        let columns = Columns::from_header(header.iter().copied())?;

        let mut out = Outcome::default();
        for record in csv.records() {
            let record = record?;
            let line = record.position().map(|pos| pos.line()).unwrap_or_default();
            match parse_row(&columns, &header, record.iter()) {
                Ok(vacancy) => out.vacancies.push(vacancy),
                Err(err) if err.is_malformed_row() => {
                    tracing::debug!(line, %err, "dropping malformed row");
                    out.malformed_rows += 1;
                }
                Err(err) => {
                    tracing::debug!(line, %err, "dropping row with unparseable values");
                    out.invalid_rows += 1;
                }
            }
        }

        tracing::info!(
            vacancies = out.vacancies.len(),
            malformed = out.malformed_rows,
            invalid = out.invalid_rows,
            "read vacancy export"
        );
        Ok(out)
    }
}
