//! Parameter form generated from an endpoint definition.

use url::Url;

use crate::registry::{EndpointDefinition, HttpMethod, InputKind};
use crate::transport::endpoint_url;

/// One editable parameter field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    /// Parameter name, also the query key.
    pub name: String,
    /// Label text, `name*:` when required.
    pub label: String,
    /// Hint shown while empty.
    pub placeholder: String,
    /// Whether the send is refused while empty.
    pub required: bool,
    /// Editor kind.
    pub input: InputKind,
    /// Current value.
    pub value: String,
}

/// Form for the selected endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedForm {
    /// Key of the endpoint this form was generated from.
    pub endpoint_key: String,
    /// Method badge.
    pub method: HttpMethod,
    /// Request URL without query string.
    pub url: Url,
    /// Fields in declared parameter order.
    pub fields: Vec<FormField>,
    /// Body editor text, present only when the endpoint takes a body.
    pub body: Option<String>,
}

impl RenderedForm {
    /// Generate a fresh form with empty values.
    pub fn for_endpoint(endpoint: &EndpointDefinition, base: &Url) -> Self {
        let fields = endpoint
            .params
            .iter()
            .map(|param| FormField {
                name: param.name.clone(),
                label: param.label(),
                placeholder: param.placeholder.clone(),
                required: param.required,
                input: param.input,
                value: String::new(),
            })
            .collect();

        Self {
            endpoint_key: endpoint.key.clone(),
            method: endpoint.method,
            url: endpoint_url(base, &endpoint.path),
            fields,
            body: endpoint.has_body.then(|| endpoint.initial_body_text()),
        }
    }

    /// Whether the parameter section is shown.
    pub fn params_visible(&self) -> bool {
        !self.fields.is_empty()
    }

    /// Whether the body section is shown.
    pub fn body_visible(&self) -> bool {
        self.body.is_some()
    }

    /// Field by parameter name.
    pub fn field(&self, name: &str) -> Option<&FormField> {
        self.fields.iter().find(|f| f.name == name)
    }

    /// Mutable field by parameter name.
    pub fn field_mut(&mut self, name: &str) -> Option<&mut FormField> {
        self.fields.iter_mut().find(|f| f.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::EndpointRegistry;
    use pretty_assertions::assert_eq;

    fn base() -> Url {
        Url::parse("http://localhost:8000").unwrap()
    }

    #[test]
    fn review_form_has_title_then_multiline_review() {
        let def = EndpointRegistry::builtin().get("review").unwrap();
        let form = RenderedForm::for_endpoint(def, &base());

        assert_eq!(form.method, HttpMethod::Post);
        assert_eq!(form.url.as_str(), "http://localhost:8000/api/games/review");
        assert_eq!(
            form.fields,
            vec![
                FormField {
                    name: "title".to_string(),
                    label: "title*:".to_string(),
                    placeholder: "Game title".to_string(),
                    required: true,
                    input: InputKind::SingleLine,
                    value: String::new(),
                },
                FormField {
                    name: "review".to_string(),
                    label: "review*:".to_string(),
                    placeholder: "Write your review here...".to_string(),
                    required: true,
                    input: InputKind::MultiLine,
                    value: String::new(),
                },
            ]
        );
        assert!(!form.body_visible());
    }

    #[test]
    fn parameterless_endpoint_hides_params() {
        let def = EndpointRegistry::builtin().get("games").unwrap();
        let form = RenderedForm::for_endpoint(def, &base());
        assert!(!form.params_visible());
        assert_eq!(form.body, None);
    }

    #[test]
    fn body_endpoint_prefills_example() {
        let def = EndpointRegistry::builtin().get("game-create").unwrap();
        let form = RenderedForm::for_endpoint(def, &base());
        let body = form.body.unwrap();
        assert!(body.starts_with("{\n  \"title\": \"Stardew Valley\""));
    }
}
