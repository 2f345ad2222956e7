use crate::app::database_service::SearchTerm;
use crate::domain::filters::{FilterParams, Filters};
use crate::domain::model::ListableModel;
use crate::domain::validator::Validator;
use crate::transport::http::error::ApiError;
use axum::extract::rejection::PathRejection;
use axum::extract::Path;
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use std::collections::HashMap;

/// A validated list request: the filters plus one search term per searchable column.
pub struct ListRequest<'a> {
    pub filters: Filters,
    pub search: Vec<SearchTerm<'a>>,
}

/// Validates the pagination, sort and search parameters of a list request
/// against `T`'s listing. Unknown parameters are ignored.
pub fn parse_list_request<T: ListableModel>(
    params: &HashMap<String, String>,
) -> Result<ListRequest<'_>, ApiError> {
    let listing = T::LISTING;
    let raw = FilterParams {
        page: params.get("page").map(String::as_str),
        page_size: params.get("page_size").map(String::as_str),
        sort: params.get("sort").map(String::as_str),
    };

    let mut v = Validator::new();
    let filters = Filters::validate(&mut v, raw, listing.sort_safelist, listing.default_sort);
    let filters = match filters {
        Some(filters) if v.is_empty() => filters,
        _ => return Err(ApiError::FailedValidation(v.into_errors())),
    };

    let search = listing
        .search_fields
        .iter()
        .map(|field| {
            let term = params.get(field.param).map(String::as_str).unwrap_or("");
            (field.column, term)
        })
        .collect();

    Ok(ListRequest { filters, search })
}

/// Ids below one can never match a row.
pub fn read_id(id: Result<Path<i64>, PathRejection>) -> Result<i64, ApiError> {
    let Path(id) = id?;
    if id < 1 {
        return Err(ApiError::NotFound);
    }
    Ok(id)
}

pub fn read_id_pair(
    ids: Result<Path<(i64, i64)>, PathRejection>,
) -> Result<(i64, i64), ApiError> {
    let Path((parent, child)) = ids?;
    if parent < 1 || child < 1 {
        return Err(ApiError::NotFound);
    }
    Ok((parent, child))
}

/// Turns accumulated field errors into a 422.
pub fn ensure_valid(v: Validator) -> Result<(), ApiError> {
    if v.is_empty() {
        Ok(())
    } else {
        Err(ApiError::FailedValidation(v.into_errors()))
    }
}

/// `201 Created` with a `Location` header pointing at the new resource.
pub fn created(location: String, body: impl IntoResponse) -> Response {
    let mut response = (StatusCode::CREATED, body).into_response();
    if let Ok(value) = HeaderValue::from_str(&location) {
        response.headers_mut().insert(header::LOCATION, value);
    }
    response
}

pub async fn not_found_handler() -> ApiError {
    ApiError::NotFound
}

/// Rewrites axum's empty 405 into the JSON error shape, keeping its `Allow` header.
pub async fn method_not_allowed_json(response: Response) -> Response {
    if response.status() != StatusCode::METHOD_NOT_ALLOWED {
        return response;
    }
    let allow = response.headers().get(header::ALLOW).cloned();
    let mut rewritten = ApiError::MethodNotAllowed.into_response();
    if let Some(allow) = allow {
        rewritten.headers_mut().insert(header::ALLOW, allow);
    }
    rewritten
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::model::{Comment, Product};

    fn params(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn defaults_apply_when_nothing_is_given() {
        let p = params(&[]);
        let req = parse_list_request::<Product>(&p).unwrap();
        assert_eq!(req.filters.page(), 1);
        assert_eq!(req.filters.page_size(), 10);
        assert_eq!(req.filters.sort(), "product_id");
        assert_eq!(req.search, vec![("name", ""), ("category", "")]);
    }

    #[test]
    fn search_terms_follow_the_listing() {
        let p = params(&[("content", "hello"), ("name", "ignored")]);
        let req = parse_list_request::<Comment>(&p).unwrap();
        assert_eq!(req.search, vec![("content", "hello"), ("author", "")]);
    }

    #[test]
    fn every_failing_rule_is_reported() {
        let p = params(&[("page", "0"), ("page_size", "1000"), ("sort", "price")]);
        match parse_list_request::<Product>(&p) {
            Err(ApiError::FailedValidation(errors)) => {
                assert_eq!(errors["page"], "must be a positive integer");
                assert_eq!(errors["page_size"], "must be a maximum of 100");
                assert_eq!(errors["sort"], "invalid sort value");
            }
            other => panic!("expected validation failure, got {:?}", other.err()),
        }
    }

    #[test]
    fn product_sort_accepts_only_id_and_name() {
        for sort in ["product_id", "name", "-product_id", "-name"] {
            let p = params(&[("sort", sort)]);
            assert!(parse_list_request::<Product>(&p).is_ok(), "sort={sort}");
        }
        for sort in ["category", "-category", "average_rating", "-average_rating"] {
            let p = params(&[("sort", sort)]);
            match parse_list_request::<Product>(&p) {
                Err(ApiError::FailedValidation(errors)) => {
                    assert_eq!(errors["sort"], "invalid sort value", "sort={sort}");
                }
                other => panic!("sort={sort} accepted: {:?}", other.err()),
            }
        }
    }

    #[test]
    fn ensure_valid_passes_clean_validator() {
        assert!(ensure_valid(Validator::new()).is_ok());

        let mut v = Validator::new();
        v.add_error("name", "must be provided");
        assert!(matches!(ensure_valid(v), Err(ApiError::FailedValidation(_))));
    }
}
