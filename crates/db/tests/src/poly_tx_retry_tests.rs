use relayer_db_types::{
    traits::PolyTxRetryDatabase,
    types::{FeeStatus, PolyTxRetry},
    DbError,
};

use crate::arb::tx_hash;

const CHAIN: u64 = 2;

pub fn test_put_get_and_delete(db: &impl PolyTxRetryDatabase) {
    let hash = tx_hash(1);
    assert_eq!(db.get_poly_tx_retry(&hash, CHAIN).unwrap(), None);

    db.put_poly_tx_retry(PolyTxRetry::new(hash.clone(), CHAIN, vec![1, 2]))
        .unwrap();
    let stored = db.get_poly_tx_retry(&hash, CHAIN).unwrap().unwrap();
    assert_eq!(stored.payload, vec![1, 2]);
    assert_eq!(stored.check_fee_count, 0);
    assert_eq!(stored.fee_status, FeeStatus::Unchecked);

    db.del_poly_tx_retry(&hash, CHAIN).unwrap();
    assert_eq!(db.get_poly_tx_retry(&hash, CHAIN).unwrap(), None);

    // deleting again is fine
    db.del_poly_tx_retry(&hash, CHAIN).unwrap();
}

pub fn test_get_all(db: &impl PolyTxRetryDatabase) {
    assert!(db.get_all_poly_tx_retry().unwrap().is_empty());

    for n in 1..=3 {
        db.put_poly_tx_retry(PolyTxRetry::new(tx_hash(n), CHAIN, vec![]))
            .unwrap();
    }
    let all = db.get_all_poly_tx_retry().unwrap();
    assert_eq!(all.len(), 3);
    assert!(all.iter().all(|retry| retry.from_chain_id == CHAIN));
}

pub fn test_check_fee_count_compare_and_set(db: &impl PolyTxRetryDatabase) {
    let hash = tx_hash(1);
    db.put_poly_tx_retry(PolyTxRetry::new(hash.clone(), CHAIN, vec![]))
        .unwrap();

    assert_eq!(
        db.increase_poly_tx_retry_check_fee_count(&hash, CHAIN, 0)
            .unwrap(),
        1
    );
    assert_eq!(
        db.increase_poly_tx_retry_check_fee_count(&hash, CHAIN, 0),
        Err(DbError::CheckFeeCountMismatch {
            expected: 0,
            actual: 1,
        })
    );
    assert_eq!(
        db.increase_poly_tx_retry_check_fee_count(&hash, CHAIN, 1)
            .unwrap(),
        2
    );
    assert_eq!(
        db.get_poly_tx_retry(&hash, CHAIN)
            .unwrap()
            .unwrap()
            .check_fee_count,
        2
    );
}

pub fn test_check_fee_count_saturated(db: &impl PolyTxRetryDatabase) {
    let hash = tx_hash(1);
    let retry = PolyTxRetry {
        check_fee_count: u32::MAX,
        ..PolyTxRetry::new(hash.clone(), CHAIN, vec![])
    };
    db.put_poly_tx_retry(retry).unwrap();

    let err = db
        .increase_poly_tx_retry_check_fee_count(&hash, CHAIN, u32::MAX)
        .unwrap_err();
    assert!(matches!(err, DbError::Other(_)));
    assert_eq!(
        db.get_poly_tx_retry(&hash, CHAIN)
            .unwrap()
            .unwrap()
            .check_fee_count,
        u32::MAX
    );
}

pub fn test_fee_status(db: &impl PolyTxRetryDatabase) {
    let hash = tx_hash(1);
    db.put_poly_tx_retry(PolyTxRetry::new(hash.clone(), CHAIN, vec![]))
        .unwrap();

    db.set_poly_tx_retry_fee_status(&hash, CHAIN, FeeStatus::Paid)
        .unwrap();
    assert_eq!(
        db.get_poly_tx_retry(&hash, CHAIN).unwrap().unwrap().fee_status,
        FeeStatus::Paid
    );
}

pub fn test_updates_on_missing_record(db: &impl PolyTxRetryDatabase) {
    let hash = tx_hash(4);
    assert_eq!(
        db.set_poly_tx_retry_fee_status(&hash, CHAIN, FeeStatus::NotPaid),
        Err(DbError::missing_entry(hash.clone(), CHAIN))
    );
    assert_eq!(
        db.increase_poly_tx_retry_check_fee_count(&hash, CHAIN, 0),
        Err(DbError::missing_entry(hash, CHAIN))
    );
}

#[macro_export]
macro_rules! poly_tx_retry_db_tests {
    ($setup_expr:expr) => {
        #[test]
        fn test_put_get_and_delete() {
            let db = $setup_expr;
            $crate::poly_tx_retry_tests::test_put_get_and_delete(&db);
        }

        #[test]
        fn test_get_all() {
            let db = $setup_expr;
            $crate::poly_tx_retry_tests::test_get_all(&db);
        }

        #[test]
        fn test_check_fee_count_compare_and_set() {
            let db = $setup_expr;
            $crate::poly_tx_retry_tests::test_check_fee_count_compare_and_set(&db);
        }

        #[test]
        fn test_check_fee_count_saturated() {
            let db = $setup_expr;
            $crate::poly_tx_retry_tests::test_check_fee_count_saturated(&db);
        }

        #[test]
        fn test_fee_status() {
            let db = $setup_expr;
            $crate::poly_tx_retry_tests::test_fee_status(&db);
        }

        #[test]
        fn test_updates_on_missing_record() {
            let db = $setup_expr;
            $crate::poly_tx_retry_tests::test_updates_on_missing_record(&db);
        }
    };
}
