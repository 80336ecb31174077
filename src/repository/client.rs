//! Diesel implementation of the client repository traits.

use std::num::TryFromIntError;

use diesel::prelude::*;
use diesel::sqlite::Sqlite;

use crate::domain::client::Client;
use crate::domain::types::ClientId;
use crate::models::client::{
    Client as DbClient, NewClient as DbNewClient, UpdateClient as DbUpdateClient,
};
use crate::pagination::{Direction, Page, PageRequest, Sort, SortField};
use crate::repository::errors::{RepositoryError, RepositoryResult};
use crate::repository::{ClientReader, ClientWriter, DieselRepository};
use crate::schema::clients;

type BoxedClientQuery = clients::BoxedQuery<'static, Sqlite>;

/// Orders by the requested column, falling back to `id` so pages are stable.
fn apply_sort(query: BoxedClientQuery, sort: Option<Sort>) -> BoxedClientQuery {
    let Some(Sort { field, direction }) = sort else {
        return query.order(clients::id.asc());
    };

    let query = match (field, direction) {
        (SortField::Id, Direction::Asc) => return query.order(clients::id.asc()),
        (SortField::Id, Direction::Desc) => return query.order(clients::id.desc()),
        (SortField::Name, Direction::Asc) => query.order(clients::name.asc()),
        (SortField::Name, Direction::Desc) => query.order(clients::name.desc()),
        (SortField::Cpf, Direction::Asc) => query.order(clients::cpf.asc()),
        (SortField::Cpf, Direction::Desc) => query.order(clients::cpf.desc()),
        (SortField::Income, Direction::Asc) => query.order(clients::income.asc()),
        (SortField::Income, Direction::Desc) => query.order(clients::income.desc()),
        (SortField::BirthDate, Direction::Asc) => query.order(clients::birth_date.asc()),
        (SortField::BirthDate, Direction::Desc) => query.order(clients::birth_date.desc()),
        (SortField::Children, Direction::Asc) => query.order(clients::children.asc()),
        (SortField::Children, Direction::Desc) => query.order(clients::children.desc()),
    };

    query.then_order_by(clients::id.asc())
}

/// `OFFSET` and `LIMIT` of the request as SQLite integers.
fn sql_window(request: &PageRequest) -> RepositoryResult<(i64, i64)> {
    let out_of_range = |_: TryFromIntError| {
        RepositoryError::ValidationError(format!(
            "page {} of size {} is out of range",
            request.page(),
            request.size()
        ))
    };
    let offset = i64::try_from(request.offset()).map_err(out_of_range)?;
    let limit = i64::try_from(request.size()).map_err(out_of_range)?;
    Ok((offset, limit))
}

fn into_domain(rows: Vec<DbClient>) -> RepositoryResult<Vec<Client>> {
    rows.into_iter()
        .map(|row| Client::try_from(row).map_err(RepositoryError::from))
        .collect()
}

impl DieselRepository {
    /// Counts and loads one window of the rows selected by `filtered`.
    fn load_client_page<F>(&self, request: &PageRequest, filtered: F) -> RepositoryResult<Page<Client>>
    where
        F: Fn() -> BoxedClientQuery,
    {
        let (offset, limit) = sql_window(request)?;
        let mut conn = self.conn()?;

        let total = filtered().count().get_result::<i64>(&mut conn)?;
        let total = usize::try_from(total)
            .map_err(|_| RepositoryError::Unexpected(format!("negative row count {total}")))?;

        let rows = apply_sort(filtered(), request.sort())
            .offset(offset)
            .limit(limit)
            .load::<DbClient>(&mut conn)?;

        Ok(Page::new(into_domain(rows)?, *request, total))
    }
}

impl ClientReader for DieselRepository {
    fn find_client_by_id(&self, id: ClientId) -> RepositoryResult<Option<Client>> {
        let mut conn = self.conn()?;

        let client = clients::table
            .find(id.get())
            .first::<DbClient>(&mut conn)
            .optional()?
            .map(Client::try_from)
            .transpose()?;

        Ok(client)
    }

    fn get_client(&self, id: ClientId) -> RepositoryResult<Client> {
        let mut conn = self.conn()?;

        let client = clients::table
            .find(id.get())
            .first::<DbClient>(&mut conn)?;

        Ok(Client::try_from(client)?)
    }

    fn find_all_clients(&self, request: &PageRequest) -> RepositoryResult<Page<Client>> {
        self.load_client_page(request, || clients::table.into_boxed())
    }

    fn find_clients_by_income(
        &self,
        income: f64,
        request: &PageRequest,
    ) -> RepositoryResult<Page<Client>> {
        self.load_client_page(request, || {
            clients::table
                .filter(clients::income.eq(income))
                .into_boxed()
        })
    }

    fn find_clients_by_income_greater_than(
        &self,
        income: f64,
        request: &PageRequest,
    ) -> RepositoryResult<Page<Client>> {
        self.load_client_page(request, || {
            clients::table
                .filter(clients::income.gt(income))
                .into_boxed()
        })
    }

    fn find_clients_by_cpf_like(
        &self,
        pattern: &str,
        request: &PageRequest,
    ) -> RepositoryResult<Page<Client>> {
        let pattern = pattern.to_string();
        self.load_client_page(request, move || {
            clients::table
                .filter(clients::cpf.like(pattern.clone()))
                .into_boxed()
        })
    }
}

impl ClientWriter for DieselRepository {
    fn save_client(&self, client: &Client) -> RepositoryResult<Client> {
        let mut conn = self.conn()?;

        let saved = conn.transaction::<DbClient, RepositoryError, _>(|conn| {
            if let Some(id) = client.id {
                let exists = clients::table
                    .find(id.get())
                    .select(clients::id)
                    .first::<i64>(conn)
                    .optional()?
                    .is_some();

                if exists {
                    let changes: DbUpdateClient = client.into();
                    let updated = diesel::update(clients::table.find(id.get()))
                        .set(&changes)
                        .get_result::<DbClient>(conn)?;
                    return Ok(updated);
                }
            }

            let new_client: DbNewClient = client.into();
            let inserted = diesel::insert_into(clients::table)
                .values(&new_client)
                .get_result::<DbClient>(conn)?;
            Ok(inserted)
        })?;

        Ok(Client::try_from(saved)?)
    }

    fn delete_client_by_id(&self, id: ClientId) -> RepositoryResult<()> {
        let mut conn = self.conn()?;

        let deleted = diesel::delete(clients::table.find(id.get())).execute(&mut conn)?;
        if deleted == 0 {
            return Err(RepositoryError::EmptyResult);
        }

        Ok(())
    }
}
