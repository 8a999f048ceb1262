use diesel::prelude::*;

use crate::domain::price::{Price as DomainPrice, PriceSearchCriteria};
use crate::models::price::{NewPrice as DbNewPrice, Price as DbPrice};
use crate::repository::{DieselRepository, PriceReader, PriceWriter, RepositoryError, RepositoryResult};

impl PriceReader for DieselRepository {
    fn list_prices_at(&self, criteria: &PriceSearchCriteria) -> RepositoryResult<Vec<DomainPrice>> {
        use crate::schema::prices;

        let mut conn = self.conn()?;
        let rows = prices::table
            .filter(prices::brand_id.eq(criteria.brand_id))
            .filter(prices::product_id.eq(criteria.product_id))
            .filter(prices::start_date.le(criteria.query_date))
            .filter(prices::end_date.ge(criteria.query_date))
            .load::<DbPrice>(&mut conn)?;

        rows.into_iter().map(DomainPrice::try_from).collect()
    }

    fn get_price_by_list_id(&self, price_list: i64) -> RepositoryResult<Option<DomainPrice>> {
        use crate::schema::prices;

        let mut conn = self.conn()?;
        let row = prices::table
            .filter(prices::price_list.eq(price_list))
            .first::<DbPrice>(&mut conn)
            .optional()?;

        row.map(DomainPrice::try_from).transpose()
    }
}

impl PriceWriter for DieselRepository {
    fn create_prices(&self, new_prices: &[DomainPrice]) -> RepositoryResult<usize> {
        use crate::schema::prices;

        let mut conn = self.conn()?;
        conn.transaction(|conn| {
            let db_rows: Vec<DbNewPrice> = new_prices.iter().map(DbNewPrice::from).collect();

            diesel::insert_into(prices::table)
                .values(&db_rows)
                .execute(conn)
        })
        .map_err(Into::into)
    }

    fn delete_price(&self, price_list: i64) -> RepositoryResult<()> {
        use crate::schema::prices;

        let mut conn = self.conn()?;
        let deleted = diesel::delete(prices::table.filter(prices::price_list.eq(price_list)))
            .execute(&mut conn)?;
        if deleted == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }
}
