// Unit tests for the two-way installment split

use proptest::prelude::*;
use splitpay::installments::models::Dispatch;
use splitpay::installments::InstallmentCalculator;

#[test]
fn test_even_total_splits_evenly() {
    assert_eq!(InstallmentCalculator::amount_per_installment(1000).unwrap(), 500);
    assert_eq!(InstallmentCalculator::dropped_remainder(1000), 0);
}

#[test]
fn test_odd_total_drops_one_cent() {
    assert_eq!(InstallmentCalculator::amount_per_installment(999).unwrap(), 499);
    assert_eq!(InstallmentCalculator::dropped_remainder(999), 1);
}

#[test]
fn test_one_cent_yields_zero_installments() {
    assert_eq!(InstallmentCalculator::amount_per_installment(1).unwrap(), 0);
}

#[test]
fn test_non_positive_totals_are_rejected() {
    for total in [0, -1, -1000] {
        let err = InstallmentCalculator::validate_total(total).unwrap_err();
        assert_eq!(err.client_message(), "Amount must be at least $0.01");
    }
}

#[test]
fn test_schedules_for_default_plan() {
    let schedules = InstallmentCalculator::calculate_schedules(1000, 45).unwrap();
    assert_eq!(schedules.len(), 2);

    assert_eq!(schedules[0].installment_number, 1);
    assert_eq!(schedules[0].amount, 500);
    assert_eq!(schedules[0].days_until_due, 0);
    assert_eq!(schedules[0].dispatch, Dispatch::SendNow);

    assert_eq!(schedules[1].installment_number, 2);
    assert_eq!(schedules[1].amount, 500);
    assert_eq!(schedules[1].days_until_due, 45);
    assert_eq!(schedules[1].dispatch, Dispatch::Deferred);
}

#[test]
fn test_schedules_reject_invalid_total() {
    assert!(InstallmentCalculator::calculate_schedules(0, 45).is_err());
}

proptest! {
    #[test]
    fn prop_split_is_floor_half(total in 1i64..10_000_000_000) {
        let per = InstallmentCalculator::amount_per_installment(total).unwrap();
        prop_assert_eq!(per, total / 2);
        prop_assert_eq!(per * 2 + InstallmentCalculator::dropped_remainder(total), total);
        prop_assert!(InstallmentCalculator::dropped_remainder(total) <= 1);
    }

    #[test]
    fn prop_schedules_share_one_amount(total in 1i64..10_000_000, days in 0u32..365) {
        let schedules = InstallmentCalculator::calculate_schedules(total, days).unwrap();
        prop_assert_eq!(schedules[0].amount, schedules[1].amount);
        prop_assert_eq!(schedules[1].days_until_due, days);
    }
}
