//! Verify build/parse methods against JSON test vectors stored in `test-vectors/`.
//!
//! `requests.json` pins the exact request each operation produces and the
//! parsed result of a simulated success. `errors.json` pins the message chosen
//! for non-2xx responses. Bodies are compared as parsed JSON, so field order
//! does not matter.

use docpath_client::{
    ApiError, CreateDocumentManualRequest, CreateDocumentRequest, DocumentClient, DocumentPath,
    HttpMethod, HttpRequest, HttpResponse,
};
use pretty_assertions::assert_eq;
use uuid::Uuid;

const BASE_URL: &str = "http://localhost:3000";

fn client() -> DocumentClient {
    DocumentClient::new(BASE_URL)
}

fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "PUT" => HttpMethod::Put,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

fn simulated(value: &serde_json::Value) -> HttpResponse {
    HttpResponse {
        status: value["status"].as_u64().unwrap() as u16,
        body: value["body"].as_str().unwrap().to_string(),
    }
}

fn assert_request(name: &str, req: &HttpRequest, expected: &serde_json::Value) {
    assert_eq!(req.method, parse_method(expected["method"].as_str().unwrap()), "{name}: method");
    assert_eq!(
        req.path,
        format!("{BASE_URL}{}", expected["path"].as_str().unwrap()),
        "{name}: path"
    );

    let expected_headers: Vec<(String, String)> = expected["headers"]
        .as_array()
        .unwrap()
        .iter()
        .map(|h| {
            let pair = h.as_array().unwrap();
            (pair[0].as_str().unwrap().to_string(), pair[1].as_str().unwrap().to_string())
        })
        .collect();
    assert_eq!(req.headers, expected_headers, "{name}: headers");

    let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
    assert_eq!(body, expected["body"], "{name}: body");
}

// ---------------------------------------------------------------------------
// Requests
// ---------------------------------------------------------------------------

#[test]
fn request_test_vectors() {
    let raw = include_str!("../../test-vectors/requests.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let response = simulated(&case["simulated_response"]);

        let doc = match case["operation"].as_str().unwrap() {
            "create_auto" => {
                let input: CreateDocumentRequest =
                    serde_json::from_value(case["input"].clone()).unwrap();
                let req = c.build_create_document_auto(&input).unwrap();
                assert_request(name, &req, &case["expected_request"]);
                c.parse_create_document_auto(response).unwrap()
            }
            "create_manual" => {
                let input: CreateDocumentManualRequest =
                    serde_json::from_value(case["input"].clone()).unwrap();
                let req = c.build_create_document_manual(&input).unwrap();
                assert_request(name, &req, &case["expected_request"]);
                c.parse_create_document_manual(response).unwrap()
            }
            other => panic!("{name}: unknown operation {other}"),
        };

        let expected: DocumentPath =
            serde_json::from_value(case["expected_result"].clone()).unwrap();
        assert_eq!(doc, expected, "{name}: parsed result");
    }
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

fn parse_error(c: &DocumentClient, operation: &str, response: HttpResponse) -> ApiError {
    match operation {
        "create_auto" => c.parse_create_document_auto(response).map(drop),
        "create_manual" => c.parse_create_document_manual(response).map(drop),
        "get_by_id" => c.parse_get_document_by_id(response).map(drop),
        "get_by_number" => c.parse_get_document_by_number(response).map(drop),
        "update_path" => c.parse_update_document_path(response).map(drop),
        "delete" => c.parse_delete_document(response).map(drop),
        "search" => c.parse_search_documents(response).map(drop),
        "list_all" => c.parse_get_all_documents(response).map(drop),
        "departments" => c.parse_list_departments(response).map(drop),
        "document_types" => c.parse_list_document_types(response).map(drop),
        other => panic!("unknown operation {other}"),
    }
    .unwrap_err()
}

#[test]
fn error_test_vectors() {
    let raw = include_str!("../../test-vectors/errors.json");
    let vectors: serde_json::Value = serde_json::from_str(raw).unwrap();

    let c = client();
    for case in vectors["cases"].as_array().unwrap() {
        let name = case["name"].as_str().unwrap();
        let status = case["status"].as_u64().unwrap() as u16;
        let response = HttpResponse {
            status,
            body: case["body"].as_str().unwrap().to_string(),
        };

        let err = parse_error(&c, case["operation"].as_str().unwrap(), response);
        assert_eq!(
            err,
            ApiError::Status {
                status,
                message: case["expected_message"].as_str().unwrap().to_string(),
            },
            "{name}"
        );
    }
}

// ---------------------------------------------------------------------------
// Paths without bodies
// ---------------------------------------------------------------------------

#[test]
fn bodiless_request_paths() {
    let c = client();
    let id: Uuid = "6f1c2f8e-8a4b-4b7e-9b59-0c8f6c2d9a10".parse().unwrap();
    let cases = [
        (c.build_get_document_by_id(id), HttpMethod::Get, format!("/api/documents/{id}")),
        (
            c.build_get_document_by_number("A/B"),
            HttpMethod::Get,
            "/api/documents/number/A%2FB".to_string(),
        ),
        (c.build_delete_document(id), HttpMethod::Delete, format!("/api/documents/{id}")),
        (
            c.build_search_documents("りん議"),
            HttpMethod::Get,
            "/api/documents/search?q=%E3%82%8A%E3%82%93%E8%AD%B0".to_string(),
        ),
        (c.build_get_all_documents(), HttpMethod::Get, "/api/documents".to_string()),
        (c.build_list_departments(), HttpMethod::Get, "/api/departments".to_string()),
        (c.build_list_document_types(), HttpMethod::Get, "/api/document-types".to_string()),
    ];

    for (req, method, path) in cases {
        assert_eq!(req.method, method, "{path}");
        assert_eq!(req.path, format!("{BASE_URL}{path}"));
        assert!(req.body.is_none(), "{path}: body should be None");
    }
}
