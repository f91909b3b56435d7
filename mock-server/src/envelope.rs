//! Uniform response shapes: success envelopes and `detail` error bodies.

use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;
use serde_json::{json, Value};

/// Every handler answers with a status code and a JSON body.
pub type Reply = (StatusCode, Json<Value>);

pub type ApiResult = Result<Reply, Reply>;

pub fn ok(data: impl Serialize, message: Option<&str>) -> Reply {
    envelope(StatusCode::OK, data, message)
}

pub fn created(data: impl Serialize, message: Option<&str>) -> Reply {
    envelope(StatusCode::CREATED, data, message)
}

/// Success envelope with a null `data` field, used by delete endpoints.
pub fn deleted(message: &str) -> Reply {
    envelope(StatusCode::OK, Value::Null, Some(message))
}

pub fn fail(status: StatusCode, detail: &str) -> Reply {
    (status, Json(json!({ "detail": detail })))
}

fn envelope(status: StatusCode, data: impl Serialize, message: Option<&str>) -> Reply {
    (
        status,
        Json(json!({
            "status": "success",
            "data": data,
            "message": message,
        })),
    )
}

/// Slice `items` into one page and wrap it in the list shape the API uses.
pub fn paginate<T: Serialize>(items: &[T], page: u32, size: u32) -> Value {
    let total = items.len() as u64;
    let size = size.max(1);
    let pages = total.div_ceil(size as u64) as u32;
    let start = (page.max(1) - 1) as usize * size as usize;
    let page_items: Vec<&T> = items.iter().skip(start).take(size as usize).collect();
    json!({
        "items": page_items,
        "total": total,
        "page": page.max(1),
        "size": size,
        "pages": pages,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paginate_slices_and_counts() {
        let items: Vec<i64> = (1..=25).collect();
        let value = paginate(&items, 2, 10);
        assert_eq!(value["total"], 25);
        assert_eq!(value["pages"], 3);
        assert_eq!(value["items"].as_array().unwrap().len(), 10);
        assert_eq!(value["items"][0], 11);
    }

    #[test]
    fn paginate_empty_has_zero_pages() {
        let items: Vec<i64> = Vec::new();
        let value = paginate(&items, 1, 10);
        assert_eq!(value["total"], 0);
        assert_eq!(value["pages"], 0);
        assert!(value["items"].as_array().unwrap().is_empty());
    }

    #[test]
    fn fail_produces_detail_body() {
        let (status, Json(body)) = fail(StatusCode::NOT_FOUND, "Account not found");
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "Account not found");
    }
}
