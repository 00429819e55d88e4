use crate::aggregate::GroupAccumulator;
use std::collections::BTreeMap;
use std::fmt;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Currency(#[from] crate::currency::Error),
    #[error(transparent)]
    Reconcile(#[from] crate::reconcile::Error),
}

/// What to do with a vacancy whose currency isn't in the conversion table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UnknownCurrency {
    /// Leave the vacancy out of all statistics.
    #[default]
    Skip,
    /// Fail the whole analysis.
    Abort,
}

#[derive(Clone, Debug, Default)]
pub struct Options {
    /// The part of a vacancy name that selects it into the profession series, matched case-sensitively.
    pub profession: String,
    pub geo: crate::geo::Options,
    pub unknown_currency: UnknownCurrency,
}

/// The six named series produced from one vacancy export.
///
/// Year series share the same contiguous years, location series are ordered by descending value.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Report {
    pub profession: String,
    pub salary_by_year: BTreeMap<u16, u64>,
    pub count_by_year: BTreeMap<u16, u64>,
    pub profession_salary_by_year: BTreeMap<u16, u64>,
    pub profession_count_by_year: BTreeMap<u16, u64>,
    pub salary_by_location: Vec<(String, u64)>,
    pub share_by_location: Vec<(String, f64)>,
}

impl Report {
    /// Package already reconciled year groups and a location ranking, without further computation.
    pub fn assemble(
        profession: impl Into<String>,
        overall: &[GroupAccumulator<u16>],
        filtered: &[GroupAccumulator<u16>],
        ranking: crate::geo::Ranking,
    ) -> Self {
        let salaries = |groups: &[GroupAccumulator<u16>]| -> BTreeMap<u16, u64> {
            groups
                .iter()
                .map(|group| (*group.key(), group.mean_salary()))
                .collect()
        };
        let counts = |groups: &[GroupAccumulator<u16>]| -> BTreeMap<u16, u64> {
            groups
                .iter()
                .map(|group| (*group.key(), group.vacancy_count()))
                .collect()
        };
        Report {
            profession: profession.into(),
            salary_by_year: salaries(overall),
            count_by_year: counts(overall),
            profession_salary_by_year: salaries(filtered),
            profession_count_by_year: counts(filtered),
            salary_by_location: ranking.salary_by_location,
            share_by_location: ranking.share_by_location,
        }
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn map<K: fmt::Display, V: fmt::Display>(
            f: &mut fmt::Formatter<'_>,
            label: &str,
            entries: impl IntoIterator<Item = (K, V)>,
        ) -> fmt::Result {
            write!(f, "{label}: {{")?;
            for (idx, (key, value)) in entries.into_iter().enumerate() {
                if idx != 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{key}: {value}")?;
            }
            writeln!(f, "}}")
        }
        let profession = &self.profession;
        map(f, "Salary by year", &self.salary_by_year)?;
        map(f, "Vacancies by year", &self.count_by_year)?;
        map(
            f,
            &format!("Salary by year for '{profession}'"),
            &self.profession_salary_by_year,
        )?;
        map(
            f,
            &format!("Vacancies by year for '{profession}'"),
            &self.profession_count_by_year,
        )?;
        map(
            f,
            "Salary by location (descending)",
            self.salary_by_location.iter().map(|(k, v)| (k, v)),
        )?;
        map(
            f,
            "Vacancy share by location (descending)",
            self.share_by_location.iter().map(|(k, v)| (k, v)),
        )
    }
}

/// Return all vacancies whose name contains `profession`.
pub fn filter_profession(vacancies: &[crate::Vacancy], profession: &str) -> Vec<crate::Vacancy> {
    vacancies
        .iter()
        .filter(|vacancy| vacancy.name.contains(profession))
        .cloned()
        .collect()
}

pub(crate) mod function {
    use crate::aggregate::{ByLocation, ByYear};
    use crate::report::{filter_profession, Error, Options, Report, UnknownCurrency};
    use crate::{aggregate, currency, fill_gaps, rank_locations, reconcile, CurrencyRates, Vacancy};

    /// Compute all statistics of `vacancies` and gather them into a [`Report`].
    ///
    /// Without any usable vacancy the report is empty.
    pub fn analyze(
        vacancies: &[Vacancy],
        rates: &CurrencyRates,
        Options {
            profession,
            geo,
            unknown_currency,
        }: Options,
    ) -> Result<Report, Error> {
        let mut usable = Vec::with_capacity(vacancies.len());
        for vacancy in vacancies {
            match rates.normalize(vacancy.average_salary(), &vacancy.currency) {
                Ok(_) => usable.push(vacancy.clone()),
                Err(currency::Error::UnknownCurrency { code }) => match unknown_currency {
                    UnknownCurrency::Skip => {
                        tracing::warn!(
                            currency = %code,
                            name = %vacancy.name,
                            "skipping vacancy with unknown currency"
                        );
                    }
                    UnknownCurrency::Abort => {
                        return Err(currency::Error::UnknownCurrency { code }.into())
                    }
                },
                Err(err) => {
                    tracing::warn!(%err, name = %vacancy.name, "skipping vacancy with unusable salary");
                }
            }
        }
        if usable.is_empty() {
            tracing::warn!("no usable vacancies, the report is empty");
            return Ok(Report {
                profession,
                ..Default::default()
            });
        }

        let by_profession = filter_profession(&usable, &profession);
        let overall = fill_gaps(aggregate::<ByYear>(&usable, rates)?)?;
        let filtered = reconcile(aggregate::<ByYear>(&by_profession, rates)?, &overall)?;
        let locations = aggregate::<ByLocation>(&usable, rates)?;
        let total_count: u64 = locations.iter().map(|group| group.vacancy_count()).sum();
        let ranking = rank_locations(&locations, total_count, geo);

        tracing::info!(
            vacancies = usable.len(),
            profession_vacancies = by_profession.len(),
            years = overall.len(),
            locations = locations.len(),
            "aggregated vacancies"
        );
        Ok(Report::assemble(profession, &overall, &filtered, ranking))
    }
}
