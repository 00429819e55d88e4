//! Alignment of year series onto a shared, gap-free year axis.

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("The reference series has no years to align with")]
    EmptyReference,
    #[error("Year {year} lies outside of the years spanned by the reference series")]
    YearOutsideReference { year: u16 },
}

pub(crate) mod function {
    use crate::aggregate::GroupAccumulator;
    use crate::reconcile::Error;
    use std::collections::BTreeMap;

    /// Return `filtered` with one group for every year from the first to the last year of `reference`, in chronological order.
    ///
    /// Years without a group in `filtered` get an empty one with zero salary and count.
    pub fn reconcile(
        filtered: Vec<GroupAccumulator<u16>>,
        reference: &[GroupAccumulator<u16>],
    ) -> Result<Vec<GroupAccumulator<u16>>, Error> {
        let first = reference
            .iter()
            .map(|group| *group.key())
            .min()
            .ok_or(Error::EmptyReference)?;
        let last = reference
            .iter()
            .map(|group| *group.key())
            .max()
            .ok_or(Error::EmptyReference)?;

        let mut by_year = BTreeMap::new();
        for group in filtered {
            let year = *group.key();
            if !(first..=last).contains(&year) {
                return Err(Error::YearOutsideReference { year });
            }
            by_year.insert(year, group);
        }
        for year in first..=last {
            by_year
                .entry(year)
                .or_insert_with(|| GroupAccumulator::empty(year));
        }
        Ok(by_year.into_values().collect())
    }

    /// Sort `series` by year and fill every gap between its first and last year with an empty group.
    pub fn fill_gaps(
        series: Vec<GroupAccumulator<u16>>,
    ) -> Result<Vec<GroupAccumulator<u16>>, Error> {
        let reference = series.clone();
        reconcile(series, &reference)
    }
}
