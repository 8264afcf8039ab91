//! Stateless HTTP request builder and response parser for the blog API.
//!
//! `BlogClient` holds only a `base_url`. Each endpoint is split into a
//! `build_*` method that produces an `HttpRequest` and a `parse_*` method that
//! consumes an `HttpResponse`; the caller does the round-trip in between.

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{CreatePost, Post};

/// Synchronous, stateless client for the blog API.
#[derive(Debug, Clone)]
pub struct BlogClient {
    base_url: String,
}

impl BlogClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn build_list_posts(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            path: format!("{}/posts", self.base_url),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn build_create_post(&self, input: &CreatePost) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(input).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            path: format!("{}/posts", self.base_url),
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }

    pub fn parse_list_posts(&self, response: HttpResponse) -> Result<Vec<Post>, ApiError> {
        check_status(&response, 200)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
    }

    pub fn parse_create_post(&self, response: HttpResponse) -> Result<Post, ApiError> {
        check_status(&response, 201)?;
        serde_json::from_str(&response.body).map_err(|e| ApiError::DeserializationError(e.to_string()))
    }
}

/// Map unexpected status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    if response.status == expected {
        return Ok(());
    }
    if response.status == 400 {
        return Err(ApiError::BadRequest {
            body: response.body.clone(),
        });
    }
    Err(ApiError::HttpError {
        status: response.status,
        body: response.body.clone(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AuthorName;

    fn client() -> BlogClient {
        BlogClient::new("http://localhost:3000")
    }

    fn response(status: u16, body: &str) -> HttpResponse {
        HttpResponse {
            status,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    const POST_JSON: &str = r#"{"id":"00000000-0000-0000-0000-000000000001","author":"Jane Doe","title":"Hello","content":"World","created":"2024-05-01T12:00:00Z"}"#;

    #[test]
    fn build_list_posts_produces_correct_request() {
        let req = client().build_list_posts();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:3000/posts");
        assert!(req.body.is_none());
        assert!(req.headers.is_empty());
    }

    #[test]
    fn build_create_post_produces_correct_request() {
        let input = CreatePost {
            author: AuthorName {
                first_name: "Jane".to_string(),
                last_name: "Doe".to_string(),
            },
            title: "Hello".to_string(),
            content: "World".to_string(),
        };
        let req = client().build_create_post(&input).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:3000/posts");
        assert_eq!(
            req.headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["author"]["firstName"], "Jane");
        assert_eq!(body["author"]["lastName"], "Doe");
        assert_eq!(body["title"], "Hello");
        assert_eq!(body["content"], "World");
    }

    #[test]
    fn parse_list_posts_success() {
        let posts = client()
            .parse_list_posts(response(200, &format!("[{POST_JSON}]")))
            .unwrap();
        assert_eq!(posts.len(), 1);
        assert_eq!(posts[0].author, "Jane Doe");
        assert_eq!(posts[0].created.to_rfc3339(), "2024-05-01T12:00:00+00:00");
    }

    #[test]
    fn parse_list_posts_rejects_wrapped_envelope() {
        let err = client()
            .parse_list_posts(response(200, &format!(r#"{{"blogposts":[{POST_JSON}]}}"#)))
            .unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
    }

    #[test]
    fn parse_create_post_success() {
        let post = client().parse_create_post(response(201, POST_JSON)).unwrap();
        assert_eq!(post.title, "Hello");
        assert_eq!(post.content, "World");
    }

    #[test]
    fn parse_create_post_bad_request() {
        let err = client()
            .parse_create_post(response(400, r#"{"error":"`title` must not be empty"}"#))
            .unwrap_err();
        assert!(matches!(err, ApiError::BadRequest { ref body } if body.contains("title")));
    }

    #[test]
    fn parse_create_post_wrong_status() {
        let err = client()
            .parse_create_post(response(503, r#"{"error":"Store unavailable"}"#))
            .unwrap_err();
        assert!(matches!(err, ApiError::HttpError { status: 503, .. }));
    }

    #[test]
    fn parse_create_post_expects_201_not_200() {
        let err = client().parse_create_post(response(200, POST_JSON)).unwrap_err();
        assert!(matches!(err, ApiError::HttpError { status: 200, .. }));
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = BlogClient::new("http://localhost:3000/");
        let req = client.build_list_posts();
        assert_eq!(req.path, "http://localhost:3000/posts");
    }

    #[test]
    fn parse_list_posts_bad_json() {
        let err = client().parse_list_posts(response(200, "not json")).unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
    }
}
