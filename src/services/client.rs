//! Client use cases: thin adapters over the repository that map entities to
//! [`ClientDto`] and normalize "empty result" signals into
//! [`ServiceError::NotFound`].

use crate::domain::types::ClientId;
use crate::dto::client::ClientDto;
use crate::pagination::{Page, PageRequest};
use crate::repository::{ClientReader, ClientWriter};
use crate::services::{ServiceError, ServiceResult};

/// Logs a failed operation before it is handed back to the caller.
fn logged(action: &'static str) -> impl FnOnce(ServiceError) -> ServiceError {
    move |err| {
        match &err {
            ServiceError::NotFound(msg) => log::warn!("Failed to {action}: {msg}"),
            _ => log::error!("Failed to {action}: {err}"),
        }
        err
    }
}

/// Deletes the client with the given identifier.
pub fn delete_client<R>(repo: &R, id: ClientId) -> ServiceResult<()>
where
    R: ClientWriter + ?Sized,
{
    repo.delete_client_by_id(id)
        .map_err(ServiceError::for_client(id))
        .map_err(logged("delete client"))
}

/// Returns the client with the given identifier.
pub fn find_client_by_id<R>(repo: &R, id: ClientId) -> ServiceResult<ClientDto>
where
    R: ClientReader + ?Sized,
{
    let client = repo
        .find_client_by_id(id)
        .map_err(ServiceError::for_client(id))
        .and_then(|client| client.ok_or_else(|| ServiceError::client_not_found(id)))
        .map_err(logged("find client"))?;

    Ok(client.into())
}

/// Returns one page of all clients.
pub fn find_all_clients_paged<R>(repo: &R, request: &PageRequest) -> ServiceResult<Page<ClientDto>>
where
    R: ClientReader + ?Sized,
{
    let page = repo
        .find_all_clients(request)
        .map_err(ServiceError::from)
        .map_err(logged("list clients"))?;

    Ok(page.map(ClientDto::from))
}

/// Returns one page of clients whose income equals `income`.
pub fn find_clients_by_income<R>(
    repo: &R,
    request: &PageRequest,
    income: f64,
) -> ServiceResult<Page<ClientDto>>
where
    R: ClientReader + ?Sized,
{
    let page = repo
        .find_clients_by_income(income, request)
        .map_err(ServiceError::from)
        .map_err(logged("list clients by income"))?;

    Ok(page.map(ClientDto::from))
}

/// Returns one page of clients earning strictly more than `income`.
pub fn find_clients_by_income_greater_than<R>(
    repo: &R,
    request: &PageRequest,
    income: f64,
) -> ServiceResult<Page<ClientDto>>
where
    R: ClientReader + ?Sized,
{
    let page = repo
        .find_clients_by_income_greater_than(income, request)
        .map_err(ServiceError::from)
        .map_err(logged("list clients by minimum income"))?;

    Ok(page.map(ClientDto::from))
}

/// Returns one page of clients whose CPF matches the `LIKE` pattern.
pub fn find_clients_by_cpf_like<R>(
    repo: &R,
    request: &PageRequest,
    pattern: &str,
) -> ServiceResult<Page<ClientDto>>
where
    R: ClientReader + ?Sized,
{
    let page = repo
        .find_clients_by_cpf_like(pattern, request)
        .map_err(ServiceError::from)
        .map_err(logged("list clients by cpf"))?;

    Ok(page.map(ClientDto::from))
}

/// Overwrites the stored client `id` with the values of `dto`.
///
/// Nothing is saved when the client does not exist.
pub fn update_client<R>(repo: &R, id: ClientId, dto: &ClientDto) -> ServiceResult<ClientDto>
where
    R: ClientReader + ClientWriter + ?Sized,
{
    let mut client = repo
        .get_client(id)
        .map_err(ServiceError::for_client(id))
        .map_err(logged("update client"))?;

    dto.copy_onto(&mut client);

    let saved = repo
        .save_client(&client)
        .map_err(ServiceError::for_client(id))
        .map_err(logged("update client"))?;

    Ok(saved.into())
}

/// Persists a new client and returns it with its storage-assigned fields.
pub fn insert_client<R>(repo: &R, dto: &ClientDto) -> ServiceResult<ClientDto>
where
    R: ClientWriter + ?Sized,
{
    let saved = repo
        .save_client(&dto.to_entity())
        .map_err(ServiceError::from)
        .map_err(logged("insert client"))?;

    Ok(saved.into())
}
