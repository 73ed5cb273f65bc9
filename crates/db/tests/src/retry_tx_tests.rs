use relayer_db_types::{event::ChainEvent, traits::RetryTxDatabase, types::MAX_LISTING_ENTRIES};

use crate::arb::ArbitraryGenerator;

pub fn test_put_and_list_aligned(db: &impl RetryTxDatabase<ChainEvent>) {
    let mut arb = ArbitraryGenerator::new();
    let e1 = arb.event(1);
    let e2 = arb.event(2);

    db.put_retry_tx(b"k2", &e2).unwrap();
    db.put_retry_tx(b"k1", &e1).unwrap();

    let page = db.get_all_retry_txs().unwrap();
    assert!(page.is_complete());
    assert_eq!(page.keys, vec![b"k1".to_vec(), b"k2".to_vec()]);
    assert_eq!(page.events, vec![e1, e2]);
}

pub fn test_put_overwrites(db: &impl RetryTxDatabase<ChainEvent>) {
    let mut arb = ArbitraryGenerator::new();
    let e1 = arb.event(1);
    let e2 = arb.event(2);

    db.put_retry_tx(b"k", &e1).unwrap();
    db.put_retry_tx(b"k", &e2).unwrap();

    let page = db.get_all_retry_txs().unwrap();
    assert_eq!(page.len(), 1);
    assert_eq!(page.events, vec![e2]);
}

pub fn test_delete(db: &impl RetryTxDatabase<ChainEvent>) {
    let event = ChainEvent::default();
    db.put_retry_tx(&[0, 1], &event).unwrap();

    db.del_retry_tx(&[0, 1]).unwrap();
    db.del_retry_tx(&[0, 1]).unwrap();
    db.del_retry_tx(b"never-stored").unwrap();

    assert!(db.get_all_retry_txs().unwrap().is_empty());
}

pub fn test_empty_key(db: &impl RetryTxDatabase<ChainEvent>) {
    let event = ChainEvent {
        block_number: 3,
        ..Default::default()
    };
    db.put_retry_tx(&[], &event).unwrap();

    let page = db.get_all_retry_txs().unwrap();
    assert_eq!(page.keys, vec![Vec::<u8>::new()]);
    assert_eq!(page.events, vec![event]);
}

pub fn test_listing_is_capped_with_continuation(db: &impl RetryTxDatabase<ChainEvent>) {
    let event = ChainEvent::default();
    let total = MAX_LISTING_ENTRIES as u32 + 1;
    for n in 0..total {
        db.put_retry_tx(&n.to_be_bytes(), &event).unwrap();
    }

    let first = db.get_all_retry_txs().unwrap();
    assert_eq!(first.len(), MAX_LISTING_ENTRIES);
    assert_eq!(first.keys.len(), first.events.len());
    let next = first.next.clone().expect("listing should be cut");
    assert_eq!(next, (MAX_LISTING_ENTRIES as u32).to_be_bytes().to_vec());

    let rest = db.get_retry_txs_from(&next).unwrap();
    assert!(rest.is_complete());
    assert_eq!(rest.keys, vec![next]);
}

pub fn test_full_listing_is_complete(db: &impl RetryTxDatabase<ChainEvent>) {
    let event = ChainEvent::default();
    for n in 0..MAX_LISTING_ENTRIES as u32 {
        db.put_retry_tx(&n.to_be_bytes(), &event).unwrap();
    }

    let page = db.get_all_retry_txs().unwrap();
    assert_eq!(page.len(), MAX_LISTING_ENTRIES);
    assert_eq!(page.next, None);
    assert!(page.is_complete());
}

#[macro_export]
macro_rules! retry_tx_db_tests {
    ($setup_expr:expr) => {
        #[test]
        fn test_put_and_list_aligned() {
            let db = $setup_expr;
            $crate::retry_tx_tests::test_put_and_list_aligned(&db);
        }

        #[test]
        fn test_put_overwrites() {
            let db = $setup_expr;
            $crate::retry_tx_tests::test_put_overwrites(&db);
        }

        #[test]
        fn test_delete() {
            let db = $setup_expr;
            $crate::retry_tx_tests::test_delete(&db);
        }

        #[test]
        fn test_empty_key() {
            let db = $setup_expr;
            $crate::retry_tx_tests::test_empty_key(&db);
        }

        #[test]
        fn test_listing_is_capped_with_continuation() {
            let db = $setup_expr;
            $crate::retry_tx_tests::test_listing_is_capped_with_continuation(&db);
        }

        #[test]
        fn test_full_listing_is_complete() {
            let db = $setup_expr;
            $crate::retry_tx_tests::test_full_listing_is_complete(&db);
        }
    };
}
