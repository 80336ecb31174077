//! Mock repository implementations for isolating services in tests.

use mockall::mock;

use crate::domain::client::Client;
use crate::domain::types::ClientId;
use crate::pagination::{Page, PageRequest};
use crate::repository::errors::RepositoryResult;
use crate::repository::{ClientReader, ClientWriter};

mock! {
    pub Repository {}

    impl ClientReader for Repository {
        fn find_client_by_id(&self, id: ClientId) -> RepositoryResult<Option<Client>>;
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
        fn find_clients_by_cpf_like(
            &self,
            pattern: &str,
            request: &PageRequest,
        ) -> RepositoryResult<Page<Client>>;
    }

    impl ClientWriter for Repository {
        fn save_client(&self, client: &Client) -> RepositoryResult<Client>;
        fn delete_client_by_id(&self, id: ClientId) -> RepositoryResult<()>;
    }
}
