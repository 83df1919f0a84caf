// tests/support/builders.rs
use axum::body::Body;
use axum::http::{Method, Request, header};

/// Request builder for the routes under test.
pub struct RequestBuilder {
    method: Method,
    uri: String,
    token: Option<String>,
    xhr: bool,
    cookie: Option<String>,
    form: Vec<(String, String)>,
    json: Option<serde_json::Value>,
}

impl RequestBuilder {
    pub fn new(method: Method, uri: impl Into<String>) -> Self {
        Self {
            method,
            uri: uri.into(),
            token: None,
            xhr: false,
            cookie: None,
            form: Vec::new(),
            json: None,
        }
    }

    pub fn get(uri: impl Into<String>) -> Self {
        Self::new(Method::GET, uri)
    }

    pub fn post(uri: impl Into<String>) -> Self {
        Self::new(Method::POST, uri)
    }

    pub fn delete(uri: impl Into<String>) -> Self {
        Self::new(Method::DELETE, uri)
    }

    pub fn token(mut self, token: &str) -> Self {
        self.token = Some(token.to_string());
        self
    }

    /// Marks the request as a script call (`X-Requested-With: XMLHttpRequest`).
    pub fn xhr(mut self) -> Self {
        self.xhr = true;
        self
    }

    pub fn cookie(mut self, pair: impl Into<String>) -> Self {
        self.cookie = Some(pair.into());
        self
    }

    pub fn field(mut self, name: &str, value: impl ToString) -> Self {
        self.form.push((name.to_string(), value.to_string()));
        self
    }

    pub fn json(mut self, body: serde_json::Value) -> Self {
        self.json = Some(body);
        self
    }

    pub fn build(self) -> Request<Body> {
        let mut builder = Request::builder().method(self.method).uri(self.uri);
        if let Some(token) = &self.token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        if self.xhr {
            builder = builder.header("x-requested-with", "XMLHttpRequest");
        }
        if let Some(cookie) = &self.cookie {
            builder = builder.header(header::COOKIE, cookie);
        }

        let body = if let Some(json) = self.json {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        } else if !self.form.is_empty() {
            builder = builder.header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
            Body::from(serde_urlencoded::to_string(&self.form).expect("encode form"))
        } else {
            Body::empty()
        };

        builder.body(body).expect("build request")
    }
}
