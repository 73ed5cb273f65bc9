use relayer_db_types::{traits::HeightDatabase, DbResult};
use tracing::{debug, instrument};

use super::schemas::{HeightSchema, POLY_HEIGHT_KEY};
use crate::{define_sled_database, instrumentation::components};

define_sled_database!(
    pub struct HeightDBSled {
        height_tree: HeightSchema,
    }
);

impl HeightDatabase for HeightDBSled {
    #[instrument(skip(self), fields(component = components::DB_HEIGHT))]
    fn update_height(&self, height: u32) -> DbResult<()> {
        let key = POLY_HEIGHT_KEY.to_vec();

        let _guard = self.lock.write();
        self.config.with_retry((&self.height_tree,), |(ht,)| {
            ht.insert(&key, &height)?;
            Ok(())
        })?;
        debug!("updated height");
        Ok(())
    }

    fn get_height(&self) -> DbResult<u32> {
        let _guard = self.lock.read();
        Ok(self
            .height_tree
            .get(&POLY_HEIGHT_KEY.to_vec())?
            .unwrap_or_default())
    }
}
