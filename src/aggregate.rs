use crate::Vacancy;
use std::hash::Hash;

/// The running salary sum and vacancy count of all vacancies sharing the same `key`.
///
/// It can only grow while an aggregation pass owns it and is read-only once handed out.
/// The sum is a `u128`, which holds any number of `u64` salaries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupAccumulator<K> {
    key: K,
    salary_sum: u128,
    vacancy_count: u64,
}

impl<K> GroupAccumulator<K> {
    pub(crate) fn new(key: K, salary: u64) -> Self {
        GroupAccumulator {
            key,
            salary_sum: u128::from(salary),
            vacancy_count: 1,
        }
    }

    /// A group that no vacancy contributed to.
    pub(crate) fn empty(key: K) -> Self {
        GroupAccumulator {
            key,
            salary_sum: 0,
            vacancy_count: 0,
        }
    }

    pub(crate) fn accumulate(&mut self, salary: u64) {
        self.salary_sum += u128::from(salary);
        self.vacancy_count += 1;
    }

    pub fn key(&self) -> &K {
        &self.key
    }

    /// The sum of all salaries in the reference currency.
    pub fn salary_sum(&self) -> u128 {
        self.salary_sum
    }

    pub fn vacancy_count(&self) -> u64 {
        self.vacancy_count
    }

    /// The mean salary in whole units of the reference currency, or 0 for a group without vacancies.
    pub fn mean_salary(&self) -> u64 {
        self.salary_sum
            .checked_div(u128::from(self.vacancy_count))
            .and_then(|mean| u64::try_from(mean).ok())
            .unwrap_or(0)
    }
}

/// An attribute of a [`Vacancy`] to partition vacancies by.
pub trait Dimension {
    type Key: Eq + Hash + Clone;

    fn key_of(vacancy: &Vacancy) -> Self::Key;
}

/// Group by the year a vacancy was published in.
pub struct ByYear;

impl Dimension for ByYear {
    type Key = u16;

    fn key_of(vacancy: &Vacancy) -> u16 {
        vacancy.published_year
    }
}

/// Group by the name of the location a vacancy is offered in.
pub struct ByLocation;

impl Dimension for ByLocation {
    type Key = String;

    fn key_of(vacancy: &Vacancy) -> String {
        vacancy.location_name.clone()
    }
}

pub(crate) mod function {
    use crate::aggregate::{Dimension, GroupAccumulator};
    use crate::{currency, CurrencyRates, Vacancy};
    use std::collections::HashMap;

    /// Group `vacancies` by dimension `D` in a single pass, summing their salaries converted with `rates`.
    ///
    /// Groups are returned in the order their key was first seen.
    pub fn aggregate<D: Dimension>(
        vacancies: &[Vacancy],
        rates: &CurrencyRates,
    ) -> Result<Vec<GroupAccumulator<D::Key>>, currency::Error> {
        let mut groups = Vec::<GroupAccumulator<D::Key>>::new();
        let mut index_by_key = HashMap::<D::Key, usize>::new();
        for vacancy in vacancies {
            let salary = rates.normalize(vacancy.average_salary(), &vacancy.currency)?;
            let key = D::key_of(vacancy);
            match index_by_key.get(&key) {
                Some(&idx) => groups[idx].accumulate(salary),
                None => {
                    index_by_key.insert(key.clone(), groups.len());
                    groups.push(GroupAccumulator::new(key, salary));
                }
            }
        }
        Ok(groups)
    }
}
