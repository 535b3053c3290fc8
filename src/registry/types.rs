//! Endpoint definition types.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use strum::{Display, EnumString};

/// HTTP method of a registered endpoint.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, Default,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE", ascii_case_insensitive)]
pub enum HttpMethod {
    /// GET.
    #[default]
    Get,
    /// POST.
    Post,
    /// DELETE.
    Delete,
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

/// How a parameter is edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, Default)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "kebab-case")]
pub enum InputKind {
    /// One-line text input.
    #[default]
    SingleLine,
    /// Multi-line text area.
    MultiLine,
}

/// One query parameter of an endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParameterSpec {
    /// Query-string key.
    pub name: String,
    /// Hint shown in the empty field.
    pub placeholder: String,
    /// Whether the send is refused while this field is empty.
    pub required: bool,
    /// Editor kind.
    #[serde(default)]
    pub input: InputKind,
}

impl ParameterSpec {
    /// A required single-line parameter.
    pub fn required(name: impl Into<String>, placeholder: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            placeholder: placeholder.into(),
            required: true,
            input: InputKind::SingleLine,
        }
    }

    /// An optional single-line parameter.
    pub fn optional(name: impl Into<String>, placeholder: impl Into<String>) -> Self {
        Self {
            required: false,
            ..Self::required(name, placeholder)
        }
    }

    /// Edit this parameter in a multi-line field.
    pub fn multi_line(mut self) -> Self {
        self.input = InputKind::MultiLine;
        self
    }

    /// Form label, `name*:` for required parameters.
    pub fn label(&self) -> String {
        format!("{}{}:", self.name, if self.required { "*" } else { "" })
    }
}

/// Static description of one callable API operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EndpointDefinition {
    /// Unique registry key (e.g., "wishlist-add").
    pub key: String,
    /// HTTP method.
    pub method: HttpMethod,
    /// Path appended to the base address (e.g., "/api/games/search").
    pub path: String,
    /// Parameters in display order.
    #[serde(default)]
    pub params: Vec<ParameterSpec>,
    /// Whether a JSON body is edited and sent.
    #[serde(default)]
    pub has_body: bool,
    /// Body the editor is pre-filled with.
    #[serde(default)]
    pub body_example: Option<Value>,
}

impl EndpointDefinition {
    /// A definition without parameters or body.
    pub fn new(key: impl Into<String>, method: HttpMethod, path: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            method,
            path: path.into(),
            params: Vec::new(),
            has_body: false,
            body_example: None,
        }
    }

    /// Append a parameter.
    pub fn param(mut self, spec: ParameterSpec) -> Self {
        self.params.push(spec);
        self
    }

    /// Expect a JSON body, optionally with an example.
    pub fn with_body(mut self, example: Option<Value>) -> Self {
        self.has_body = true;
        self.body_example = example;
        self
    }

    /// Look up a parameter by name.
    pub fn find_param(&self, name: &str) -> Option<&ParameterSpec> {
        self.params.iter().find(|p| p.name == name)
    }

    /// Initial body editor text: the pretty-printed example, or `{}`.
    pub fn initial_body_text(&self) -> String {
        let example = self
            .body_example
            .clone()
            .unwrap_or_else(|| Value::Object(Default::default()));
        serde_json::to_string_pretty(&example).unwrap_or_else(|_| "{}".to_string())
    }
}
