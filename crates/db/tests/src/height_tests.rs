use relayer_db_types::traits::HeightDatabase;

pub fn test_height_defaults_to_zero(db: &impl HeightDatabase) {
    assert_eq!(db.get_height().unwrap(), 0);
}

pub fn test_height_overwrites(db: &impl HeightDatabase) {
    db.update_height(10).unwrap();
    db.update_height(7).unwrap();
    assert_eq!(db.get_height().unwrap(), 7);

    db.update_height(u32::MAX).unwrap();
    assert_eq!(db.get_height().unwrap(), u32::MAX);
}

#[macro_export]
macro_rules! height_db_tests {
    ($setup_expr:expr) => {
        #[test]
        fn test_height_defaults_to_zero() {
            let db = $setup_expr;
            $crate::height_tests::test_height_defaults_to_zero(&db);
        }

        #[test]
        fn test_height_overwrites() {
            let db = $setup_expr;
            $crate::height_tests::test_height_overwrites(&db);
        }
    };
}
