use mockall::mock;

use super::{PriceReader, PriceWriter, RepositoryResult};
use crate::domain::price::{Price, PriceSearchCriteria};

mock! {
    pub PriceReader {}

    impl PriceReader for PriceReader {
        fn list_prices_at(&self, criteria: &PriceSearchCriteria) -> RepositoryResult<Vec<Price>>;
        fn get_price_by_list_id(&self, price_list: i64) -> RepositoryResult<Option<Price>>;
    }
}

mock! {
    pub PriceWriter {}

    impl PriceWriter for PriceWriter {
        fn create_prices(&self, prices: &[Price]) -> RepositoryResult<usize>;
        fn delete_price(&self, price_list: i64) -> RepositoryResult<()>;
    }
}
