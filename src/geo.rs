#[derive(Clone, Debug)]
pub struct Options {
    /// Locations holding a smaller share of all vacancies than this are left out.
    pub min_share: f64,
    /// The maximum amount of locations to keep after filtering.
    pub top_n: usize,
}

impl Default for Options {
    fn default() -> Self {
        Options {
            min_share: 0.01,
            top_n: 10,
        }
    }
}

/// The locations with the most vacancies, each ordered by descending value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ranking {
    /// Mean salary per location in the reference currency.
    pub salary_by_location: Vec<(String, u64)>,
    /// Share of all vacancies per location, rounded to four decimal places like `{:.4}` formatting does.
    pub share_by_location: Vec<(String, f64)>,
}

pub(crate) mod function {
    use crate::aggregate::GroupAccumulator;
    use crate::geo::{Options, Ranking};

    /// Rank `locations` by mean salary and by share of `total_count`, keeping only the `top_n` locations with at
    /// least `min_share` of all vacancies.
    ///
    /// Filtering happens before truncation, and ties keep the order in which locations were first seen.
    pub fn rank_locations(
        locations: &[GroupAccumulator<String>],
        total_count: u64,
        Options { min_share, top_n }: Options,
    ) -> Ranking {
        let share_of = |group: &GroupAccumulator<String>| {
            if total_count == 0 {
                0.0
            } else {
                group.vacancy_count() as f64 / total_count as f64
            }
        };

        let mut shares: Vec<(String, f64)> = locations
            .iter()
            .map(|group| (group.key().clone(), share_of(group)))
            .filter(|(_, share)| *share >= min_share)
            .collect();
        shares.sort_by(|a, b| b.1.total_cmp(&a.1));
        shares.truncate(top_n);

        let mut salaries: Vec<(String, u64)> = locations
            .iter()
            .filter(|group| share_of(group) >= min_share)
            .map(|group| (group.key().clone(), group.mean_salary()))
            .collect();
        salaries.sort_by(|a, b| b.1.cmp(&a.1));
        salaries.truncate(top_n);

        Ranking {
            salary_by_location: salaries,
            share_by_location: shares
                .into_iter()
                .map(|(location, share)| (location, round_share(share)))
                .collect(),
        }
    }

    /// Round to four decimals from the exact binary value, with ties going to the even digit.
    fn round_share(share: f64) -> f64 {
        format!("{share:.4}").parse().unwrap_or(share)
    }
}
