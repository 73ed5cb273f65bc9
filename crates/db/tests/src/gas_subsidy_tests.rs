use relayer_db_types::{
    traits::{GasSubsidyDatabase, PolyTxDatabase},
    types::{GasSubsidy, GasSubsidyStatus, PolyTx, PolyTxStatus},
    DbError,
};

use crate::arb::tx_hash;

const CHAIN: u64 = 318;
const RECEIVER: &str = "0x8c109349c6bd91411d6bc962e080c4a3";

fn not_sent(n: u32) -> GasSubsidy {
    GasSubsidy::new_not_sent(tx_hash(n), CHAIN, RECEIVER, 1_000 + n as u64)
}

pub fn test_put_and_get(db: &(impl PolyTxDatabase + GasSubsidyDatabase)) {
    let seq = db.put_gas_subsidy(not_sent(1)).unwrap();
    let stored = db.get_gas_subsidy(&tx_hash(1), CHAIN).unwrap().unwrap();

    assert_eq!(stored.seq, seq);
    assert_eq!(stored.status, GasSubsidyStatus::NotSent);
    assert_eq!(stored.subsidy_amount, 1_001);
    assert_eq!(db.get_gas_subsidy(&tx_hash(2), CHAIN).unwrap(), None);
}

pub fn test_put_overwrite_keeps_seq(db: &(impl PolyTxDatabase + GasSubsidyDatabase)) {
    let seq = db.put_gas_subsidy(not_sent(1)).unwrap();
    db.put_gas_subsidy(not_sent(2)).unwrap();

    let mut updated = not_sent(1);
    updated.subsidy_amount = 5;
    updated.status = GasSubsidyStatus::Failed;
    assert_eq!(db.put_gas_subsidy(updated).unwrap(), seq);

    let stored = db.get_gas_subsidy(&tx_hash(1), CHAIN).unwrap().unwrap();
    assert_eq!(stored.subsidy_amount, 5);

    // the status index moved along with the record
    let first = db.get_first_not_sent_gas_subsidy().unwrap().unwrap();
    assert_eq!(first.tx_hash, tx_hash(2));
    let failed = db.get_first_failed_gas_subsidy().unwrap().unwrap();
    assert_eq!(failed.tx_hash, tx_hash(1));
}

pub fn test_first_in_state(db: &(impl PolyTxDatabase + GasSubsidyDatabase)) {
    assert_eq!(db.get_first_not_sent_gas_subsidy().unwrap(), None);
    assert_eq!(db.get_first_timed_out_gas_subsidy().unwrap(), None);

    for n in 1..=3 {
        db.put_gas_subsidy(not_sent(n)).unwrap();
    }
    assert_eq!(
        db.get_first_not_sent_gas_subsidy().unwrap().unwrap().tx_hash,
        tx_hash(1)
    );

    db.set_gas_subsidy_starcoin_tx_info(
        &tx_hash(3),
        CHAIN,
        GasSubsidyStatus::NotSent,
        &[0xaa; 32],
        &[0x01; 16],
        7,
    )
    .unwrap();
    db.set_gas_subsidy_status(
        &tx_hash(3),
        CHAIN,
        GasSubsidyStatus::Processing,
        GasSubsidyStatus::TimedOut,
    )
    .unwrap();
    assert_eq!(
        db.get_first_timed_out_gas_subsidy().unwrap().unwrap().tx_hash,
        tx_hash(3)
    );
}

pub fn test_starcoin_tx_info_and_processed(db: &(impl PolyTxDatabase + GasSubsidyDatabase)) {
    let hash = tx_hash(1);
    db.put_gas_subsidy(not_sent(1)).unwrap();

    // must move from the expected status
    let err = db
        .set_gas_subsidy_starcoin_tx_info(&hash, CHAIN, GasSubsidyStatus::Failed, &[1], &[2], 3)
        .unwrap_err();
    assert!(matches!(err, DbError::StatusMismatch { .. }));

    db.set_gas_subsidy_starcoin_tx_info(&hash, CHAIN, GasSubsidyStatus::NotSent, &[1], &[2], 3)
        .unwrap();
    let stored = db.get_gas_subsidy(&hash, CHAIN).unwrap().unwrap();
    assert_eq!(stored.status, GasSubsidyStatus::Processing);
    assert_eq!(stored.starcoin_tx_hash, vec![1]);
    assert_eq!(stored.sender_address, vec![2]);
    assert_eq!(stored.sender_seq_num, 3);

    db.set_gas_subsidy_status_processed(&hash, CHAIN, GasSubsidyStatus::Processing)
        .unwrap();
    assert_eq!(
        db.get_gas_subsidy(&hash, CHAIN).unwrap().unwrap().status,
        GasSubsidyStatus::Processed
    );

    let err = db
        .set_gas_subsidy_status(
            &hash,
            CHAIN,
            GasSubsidyStatus::Processed,
            GasSubsidyStatus::NotSent,
        )
        .unwrap_err();
    assert!(matches!(err, DbError::InvalidStatusTransition { .. }));

    assert!(matches!(
        db.set_gas_subsidy_status_processed(&tx_hash(9), CHAIN, GasSubsidyStatus::Processing),
        Err(DbError::MissingEntry { .. })
    ));
}

pub fn test_count_by_to_address(db: &(impl PolyTxDatabase + GasSubsidyDatabase)) {
    assert_eq!(db.get_gas_subsidy_count_by_to_address(RECEIVER).unwrap(), 0);

    for n in 1..=3 {
        db.put_gas_subsidy(not_sent(n)).unwrap();
    }
    db.put_gas_subsidy(GasSubsidy::new_not_sent(tx_hash(4), CHAIN, "0x01", 1))
        .unwrap();

    assert_eq!(db.get_gas_subsidy_count_by_to_address(RECEIVER).unwrap(), 3);
    assert_eq!(db.get_gas_subsidy_count_by_to_address("0x01").unwrap(), 1);
}

pub fn test_poly_txs_without_subsidy(db: &(impl PolyTxDatabase + GasSubsidyDatabase)) {
    for n in 1..=4 {
        db.put_poly_tx(PolyTx::new_pending(tx_hash(n), CHAIN, vec![]))
            .unwrap();
    }
    db.put_poly_tx(PolyTx::new_pending(tx_hash(5), CHAIN + 1, vec![]))
        .unwrap();

    // 1, 2 and 5 are processed, 3 and 4 stay pending
    for (n, chain) in [(1, CHAIN), (2, CHAIN), (5, CHAIN + 1)] {
        db.set_poly_tx_status_processing(&tx_hash(n), chain, PolyTxStatus::Pending)
            .unwrap();
        db.set_poly_tx_status_processed(&tx_hash(n), chain, PolyTxStatus::Processing, "0x00")
            .unwrap();
    }
    db.put_gas_subsidy(not_sent(2)).unwrap();

    let hashes: Vec<_> = db
        .get_poly_tx_list_not_have_gas_subsidy(CHAIN, 0)
        .unwrap()
        .into_iter()
        .map(|tx| tx.tx_hash)
        .collect();
    assert_eq!(hashes, vec![tx_hash(1)]);

    assert!(db
        .get_poly_tx_list_not_have_gas_subsidy(CHAIN, u64::MAX)
        .unwrap()
        .is_empty());
}

#[macro_export]
macro_rules! gas_subsidy_db_tests {
    ($setup_expr:expr) => {
        #[test]
        fn test_put_and_get() {
            let db = $setup_expr;
            $crate::gas_subsidy_tests::test_put_and_get(&db);
        }

        #[test]
        fn test_put_overwrite_keeps_seq() {
            let db = $setup_expr;
            $crate::gas_subsidy_tests::test_put_overwrite_keeps_seq(&db);
        }

        #[test]
        fn test_first_in_state() {
            let db = $setup_expr;
            $crate::gas_subsidy_tests::test_first_in_state(&db);
        }

        #[test]
        fn test_starcoin_tx_info_and_processed() {
            let db = $setup_expr;
            $crate::gas_subsidy_tests::test_starcoin_tx_info_and_processed(&db);
        }

        #[test]
        fn test_count_by_to_address() {
            let db = $setup_expr;
            $crate::gas_subsidy_tests::test_count_by_to_address(&db);
        }

        #[test]
        fn test_poly_txs_without_subsidy() {
            let db = $setup_expr;
            $crate::gas_subsidy_tests::test_poly_txs_without_subsidy(&db);
        }
    };
}
