use relayer_db_types::{
    event::ChainEvent,
    traits::CheckTxDatabase,
    types::{BytesAndEvent, MAX_LISTING_ENTRIES},
    DbError,
};

use crate::arb::{tx_hash, ArbitraryGenerator};

pub fn test_put_and_list(db: &impl CheckTxDatabase<ChainEvent>) {
    let mut arb = ArbitraryGenerator::new();
    let event = arb.event(100);

    db.put_check_tx("aa11", vec![1, 2, 3], &event).unwrap();

    let page = db.get_all_check_txs().unwrap();
    assert!(page.is_complete());
    assert_eq!(page.entries.len(), 1);
    assert_eq!(
        page.entries["aa11"],
        BytesAndEvent::new(vec![1, 2, 3], event)
    );
}

pub fn test_put_overwrites(db: &impl CheckTxDatabase<ChainEvent>) {
    let mut arb = ArbitraryGenerator::new();
    let first = arb.event(1);
    let second = arb.event(2);

    db.put_check_tx("aa11", vec![1], &first).unwrap();
    db.put_check_tx("aa11", vec![2], &second).unwrap();

    let page = db.get_all_check_txs().unwrap();
    assert_eq!(page.entries.len(), 1);
    assert_eq!(page.entries["aa11"], BytesAndEvent::new(vec![2], second));
}

pub fn test_uppercase_hash_is_same_key(db: &impl CheckTxDatabase<ChainEvent>) {
    let event = ChainEvent::default();
    db.put_check_tx("AB", vec![1], &event).unwrap();
    db.put_check_tx("ab", vec![2], &event).unwrap();

    let page = db.get_all_check_txs().unwrap();
    assert_eq!(page.entries.keys().collect::<Vec<_>>(), vec!["ab"]);
}

pub fn test_invalid_hex_is_rejected(db: &impl CheckTxDatabase<ChainEvent>) {
    let event = ChainEvent::default();

    let res = db.put_check_tx("zz", vec![1], &event);
    assert!(
        matches!(res, Err(DbError::InvalidTxHash(..))),
        "expected InvalidTxHash, got {res:?}"
    );
    assert!(matches!(
        db.del_check_tx("xyz"),
        Err(DbError::InvalidTxHash(..))
    ));

    // nothing was written
    assert!(db.get_all_check_txs().unwrap().entries.is_empty());
}

pub fn test_delete(db: &impl CheckTxDatabase<ChainEvent>) {
    let event = ChainEvent::default();
    db.put_check_tx("aa11", vec![1], &event).unwrap();
    db.put_check_tx("aa22", vec![2], &event).unwrap();

    db.del_check_tx("aa11").unwrap();
    // absent entries delete without error
    db.del_check_tx("aa11").unwrap();
    db.del_check_tx("ffff").unwrap();

    let page = db.get_all_check_txs().unwrap();
    assert_eq!(page.entries.keys().collect::<Vec<_>>(), vec!["aa22"]);
}

pub fn test_empty_listing(db: &impl CheckTxDatabase<ChainEvent>) {
    let page = db.get_all_check_txs().unwrap();
    assert!(page.entries.is_empty());
    assert!(page.is_complete());
}

pub fn test_listing_is_capped_with_continuation(db: &impl CheckTxDatabase<ChainEvent>) {
    let event = ChainEvent::default();
    let total = MAX_LISTING_ENTRIES as u32 + 5;
    for n in 0..total {
        db.put_check_tx(&tx_hash(n), n.to_le_bytes().to_vec(), &event)
            .unwrap();
    }

    let first = db.get_all_check_txs().unwrap();
    assert_eq!(first.entries.len(), MAX_LISTING_ENTRIES);
    let next = first.next.clone().expect("listing should be cut");
    assert_eq!(next, tx_hash(MAX_LISTING_ENTRIES as u32));
    assert!(!first.entries.contains_key(&next));

    let rest = db.get_check_txs_from(&next).unwrap();
    assert!(rest.is_complete());
    assert_eq!(rest.entries.len(), 5);
    assert_eq!(
        rest.entries[&tx_hash(total - 1)].bytes,
        (total - 1).to_le_bytes().to_vec()
    );
}

pub fn test_full_listing_is_complete(db: &impl CheckTxDatabase<ChainEvent>) {
    let event = ChainEvent::default();
    for n in 0..MAX_LISTING_ENTRIES as u32 {
        db.put_check_tx(&tx_hash(n), vec![], &event).unwrap();
    }

    let page = db.get_all_check_txs().unwrap();
    assert_eq!(page.entries.len(), MAX_LISTING_ENTRIES);
    assert_eq!(page.next, None);
    assert!(page.is_complete());
}

#[macro_export]
macro_rules! check_tx_db_tests {
    ($setup_expr:expr) => {
        #[test]
        fn test_put_and_list() {
            let db = $setup_expr;
            $crate::check_tx_tests::test_put_and_list(&db);
        }

        #[test]
        fn test_put_overwrites() {
            let db = $setup_expr;
            $crate::check_tx_tests::test_put_overwrites(&db);
        }

        #[test]
        fn test_uppercase_hash_is_same_key() {
            let db = $setup_expr;
            $crate::check_tx_tests::test_uppercase_hash_is_same_key(&db);
        }

        #[test]
        fn test_invalid_hex_is_rejected() {
            let db = $setup_expr;
            $crate::check_tx_tests::test_invalid_hex_is_rejected(&db);
        }

        #[test]
        fn test_delete() {
            let db = $setup_expr;
            $crate::check_tx_tests::test_delete(&db);
        }

        #[test]
        fn test_empty_listing() {
            let db = $setup_expr;
            $crate::check_tx_tests::test_empty_listing(&db);
        }

        #[test]
        fn test_listing_is_capped_with_continuation() {
            let db = $setup_expr;
            $crate::check_tx_tests::test_listing_is_capped_with_continuation(&db);
        }

        #[test]
        fn test_full_listing_is_complete() {
            let db = $setup_expr;
            $crate::check_tx_tests::test_full_listing_is_complete(&db);
        }
    };
}
