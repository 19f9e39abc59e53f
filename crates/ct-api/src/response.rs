//! Success envelope

use axum::{
    response::{IntoResponse, Response},
    Json,
};
use ct_core::pagination::{Page, Paging};
use serde::Serialize;

/// `{"data": ..., "paging": ...}`; `paging` only on paged results
#[derive(Debug, Serialize)]
pub struct DataResponse<T: Serialize> {
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub paging: Option<Paging>,
}

impl<T: Serialize> DataResponse<T> {
    pub fn new(data: T) -> Self {
        Self { data, paging: None }
    }
}

impl<T: Serialize> DataResponse<Vec<T>> {
    pub fn paged<R>(page: Page<R>, f: impl FnMut(R) -> T) -> Self {
        let page = page.map(f);
        Self {
            data: page.items,
            paging: Some(page.paging),
        }
    }
}

/// `{"data": "OK"}`
pub fn ok() -> DataResponse<&'static str> {
    DataResponse::new("OK")
}

impl<T: Serialize> IntoResponse for DataResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}
