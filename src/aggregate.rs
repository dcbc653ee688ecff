use crate::types::{Kpis, Record};

/// Sum the four counts over `records`. Order does not matter; sums clamp at
/// `i64::MAX` instead of overflowing.
pub fn aggregate<'a, I>(records: I) -> Kpis
where
    I: IntoIterator<Item = &'a Record>,
{
    records.into_iter().fold(Kpis::default(), |mut acc, r| {
        acc.identity_validation_sum = acc.identity_validation_sum.saturating_add(r.identity_validation);
        acc.debtor_analysis_sum = acc.debtor_analysis_sum.saturating_add(r.debtor_analysis);
        acc.co_debtor_analysis_sum = acc.co_debtor_analysis_sum.saturating_add(r.co_debtor_analysis);
        acc.total_sum = acc.total_sum.saturating_add(r.total);
        acc.row_count += 1;
        acc
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::util::coerce_count;
    use proptest::prelude::*;

    #[test]
    fn empty_input_is_all_zero() {
        assert_eq!(aggregate(&[] as &[Record]), Kpis::default());
    }

    #[test]
    fn sums_each_metric() {
        let mut a = Record::sample("S1", "A", "C1", 10);
        a.identity_validation = 4;
        a.debtor_analysis = 5;
        a.co_debtor_analysis = 1;
        let mut b = Record::sample("S1", "B", "C2", 30);
        b.identity_validation = 20;
        b.debtor_analysis = 7;
        b.co_debtor_analysis = 3;

        let k = aggregate([&a, &b]);
        assert_eq!(
            k,
            Kpis {
                identity_validation_sum: 24,
                debtor_analysis_sum: 12,
                co_debtor_analysis_sum: 4,
                total_sum: 40,
                row_count: 2,
            }
        );
    }

    #[test]
    fn non_numeric_cell_contributes_zero() {
        let mut bad = Record::sample("S1", "A", "C1", coerce_count(None));
        bad.identity_validation = coerce_count(Some("pendiente"));
        let good = Record::sample("S1", "B", "C2", 8);
        let k = aggregate([&bad, &good]);
        assert_eq!(k.total_sum, 8);
        assert_eq!(k.identity_validation_sum, 0);
        assert_eq!(k.row_count, 2);
    }

    #[test]
    fn huge_counts_clamp_instead_of_overflowing() {
        let mut a = Record::sample("S1", "A", "C1", coerce_count(Some("9000000000000000000")));
        a.debtor_analysis = i64::MAX;
        let mut b = Record::sample("S1", "B", "C2", coerce_count(Some("9000000000000000000")));
        b.debtor_analysis = 1;
        let k = aggregate([&a, &b]);
        assert_eq!(k.total_sum, i64::MAX);
        assert_eq!(k.debtor_analysis_sum, i64::MAX);
        assert_eq!(k.row_count, 2);
    }

    #[test]
    fn stored_total_is_summed_as_is() {
        // Total disagrees with its parts on purpose.
        let mut r = Record::sample("S1", "A", "C1", 100);
        r.identity_validation = 1;
        assert_eq!(aggregate([&r]).total_sum, 100);
    }

    fn counts_and_permutation() -> impl Strategy<Value = (Vec<i64>, Vec<i64>)> {
        proptest::collection::vec(0i64..10_000, 0..40)
            .prop_flat_map(|v| (Just(v.clone()), Just(v).prop_shuffle()))
    }

    fn build(totals: &[i64]) -> Vec<Record> {
        totals
            .iter()
            .map(|t| {
                let mut r = Record::sample("S1", "A", "C1", *t);
                r.debtor_analysis = t / 3;
                r
            })
            .collect()
    }

    proptest! {
        #[test]
        fn permutation_does_not_change_sums((original, shuffled) in counts_and_permutation()) {
            prop_assert_eq!(aggregate(&build(&original)), aggregate(&build(&shuffled)));
        }
    }
}
