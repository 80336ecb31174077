use actix_web::http::header;
use actix_web::{HttpRequest, HttpResponse, Responder, delete, get, post, put, web};
use validator::Validate;

use crate::domain::types::ClientId;
use crate::dto::client::ClientDto;
use crate::forms::FormError;
use crate::forms::client::{CpfQuery, IncomeQuery, PageQuery};
use crate::repository::DieselRepository;
use crate::routes::{form_error_response, service_error_response};
use crate::services::client as client_service;

fn parse_client_id(raw: &str, req: &HttpRequest) -> Result<ClientId, HttpResponse> {
    raw.parse::<ClientId>()
        .map_err(|_| form_error_response(&FormError::InvalidClientId, req))
}

#[get("/clients")]
pub async fn list_clients(
    req: HttpRequest,
    paging: web::Query<PageQuery>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let request = match paging.to_page_request() {
        Ok(request) => request,
        Err(err) => return form_error_response(&err, &req),
    };

    match client_service::find_all_clients_paged(repo.get_ref(), &request) {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(err) => service_error_response(&err, &req),
    }
}

#[get("/clients/income")]
pub async fn clients_by_income(
    req: HttpRequest,
    paging: web::Query<PageQuery>,
    filter: web::Query<IncomeQuery>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let request = match filter
        .validate()
        .map_err(FormError::from)
        .and_then(|_| paging.to_page_request())
    {
        Ok(request) => request,
        Err(err) => return form_error_response(&err, &req),
    };

    match client_service::find_clients_by_income(repo.get_ref(), &request, filter.income) {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(err) => service_error_response(&err, &req),
    }
}

#[get("/clients/incomeGreaterThan")]
pub async fn clients_by_income_greater_than(
    req: HttpRequest,
    paging: web::Query<PageQuery>,
    filter: web::Query<IncomeQuery>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let request = match filter
        .validate()
        .map_err(FormError::from)
        .and_then(|_| paging.to_page_request())
    {
        Ok(request) => request,
        Err(err) => return form_error_response(&err, &req),
    };

    match client_service::find_clients_by_income_greater_than(
        repo.get_ref(),
        &request,
        filter.income,
    ) {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(err) => service_error_response(&err, &req),
    }
}

#[get("/clients/cpf")]
pub async fn clients_by_cpf(
    req: HttpRequest,
    paging: web::Query<PageQuery>,
    filter: web::Query<CpfQuery>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let (request, pattern) = match paging
        .to_page_request()
        .and_then(|request| Ok((request, filter.to_pattern()?)))
    {
        Ok(parts) => parts,
        Err(err) => return form_error_response(&err, &req),
    };

    match client_service::find_clients_by_cpf_like(repo.get_ref(), &request, &pattern) {
        Ok(page) => HttpResponse::Ok().json(page),
        Err(err) => service_error_response(&err, &req),
    }
}

#[get("/clients/{id}")]
pub async fn show_client(
    req: HttpRequest,
    id: web::Path<String>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let id = match parse_client_id(&id, &req) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match client_service::find_client_by_id(repo.get_ref(), id) {
        Ok(client) => HttpResponse::Ok().json(client),
        Err(err) => service_error_response(&err, &req),
    }
}

#[post("/clients")]
pub async fn create_client(
    req: HttpRequest,
    repo: web::Data<DieselRepository>,
    web::Json(dto): web::Json<ClientDto>,
) -> impl Responder {
    if let Err(err) = dto.validate() {
        return form_error_response(&FormError::from(err), &req);
    }
    // Created clients always get a storage-assigned id.
    let dto = ClientDto { id: None, ..dto };

    match client_service::insert_client(repo.get_ref(), &dto) {
        Ok(client) => {
            let mut response = HttpResponse::Created();
            if let Some(id) = client.id {
                response.insert_header((header::LOCATION, format!("{}/{id}", req.path())));
            }
            log::info!("Created client {:?}", client.id);
            response.json(client)
        }
        Err(err) => service_error_response(&err, &req),
    }
}

#[put("/clients/{id}")]
pub async fn update_client(
    req: HttpRequest,
    id: web::Path<String>,
    repo: web::Data<DieselRepository>,
    web::Json(dto): web::Json<ClientDto>,
) -> impl Responder {
    let id = match parse_client_id(&id, &req) {
        Ok(id) => id,
        Err(response) => return response,
    };
    if let Err(err) = dto.validate() {
        return form_error_response(&FormError::from(err), &req);
    }

    match client_service::update_client(repo.get_ref(), id, &dto) {
        Ok(client) => HttpResponse::Ok().json(client),
        Err(err) => service_error_response(&err, &req),
    }
}

#[delete("/clients/{id}")]
pub async fn delete_client(
    req: HttpRequest,
    id: web::Path<String>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let id = match parse_client_id(&id, &req) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match client_service::delete_client(repo.get_ref(), id) {
        Ok(()) => {
            log::info!("Deleted client {id}");
            HttpResponse::NoContent().finish()
        }
        Err(err) => service_error_response(&err, &req),
    }
}
