use crate::db::{DbConnection, DbPool, get_connection};
use crate::domain::client::Client;
use crate::domain::types::ClientId;
use crate::pagination::{Page, PageRequest};
use crate::repository::errors::RepositoryResult;

pub mod client;
pub mod errors;
#[cfg(any(test, feature = "test-mocks"))]
pub mod mock;

/// Diesel-backed implementation of every repository trait.
#[derive(Clone)]
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    fn conn(&self) -> RepositoryResult<DbConnection> {
        Ok(get_connection(&self.pool)?)
    }
}

/// Read access to stored clients.
///
/// Paged queries return a [`Page`] answering exactly the given
/// [`PageRequest`]; implementations apply its ordering and window.
pub trait ClientReader {
    /// Returns `Ok(None)` when no client has the given id.
    fn find_client_by_id(&self, id: ClientId) -> RepositoryResult<Option<Client>>;
    /// Like [`ClientReader::find_client_by_id`] but reports absence as
    /// [`errors::RepositoryError::EmptyResult`].
    fn get_client(&self, id: ClientId) -> RepositoryResult<Client>;
    fn find_all_clients(&self, request: &PageRequest) -> RepositoryResult<Page<Client>>;
    fn find_clients_by_income(
        &self,
        income: f64,
        request: &PageRequest,
    ) -> RepositoryResult<Page<Client>>;
    fn find_clients_by_income_greater_than(
        &self,
        income: f64,
        request: &PageRequest,
    ) -> RepositoryResult<Page<Client>>;
    /// `pattern` uses SQL `LIKE` wildcards (`%`, `_`).
    fn find_clients_by_cpf_like(
        &self,
        pattern: &str,
        request: &PageRequest,
    ) -> RepositoryResult<Page<Client>>;
}

pub trait ClientWriter {
    /// Inserts the client, or overwrites the stored row when its id exists.
    fn save_client(&self, client: &Client) -> RepositoryResult<Client>;
    /// Fails with [`errors::RepositoryError::EmptyResult`] when nothing was deleted.
    fn delete_client_by_id(&self, id: ClientId) -> RepositoryResult<()>;
}
