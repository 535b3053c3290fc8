//! Built-in endpoint catalogue for the game API.

use serde_json::json;

use super::types::{EndpointDefinition, HttpMethod, ParameterSpec};

/// All endpoints the console offers, in display order.
///
/// The first entry is the default selection.
pub fn builtin_endpoints() -> Vec<EndpointDefinition> {
    use HttpMethod::{Delete, Get, Post};

    vec![
        EndpointDefinition::new("games", Get, "/api/games"),
        EndpointDefinition::new("new-releases", Get, "/api/games/new-releases"),
        EndpointDefinition::new("highest-rated", Get, "/api/games/highest-rated"),
        EndpointDefinition::new("discounts", Get, "/api/games/discounts"),
        EndpointDefinition::new("search", Get, "/api/games/search")
            .param(ParameterSpec::required("title", "e.g., Minecraft")),
        EndpointDefinition::new("genre", Get, "/api/games/genre")
            .param(ParameterSpec::required("genre", "e.g., RPG, FPS, Horror")),
        // Review text goes in the query string like every other parameter.
        EndpointDefinition::new("review", Post, "/api/games/review")
            .param(ParameterSpec::required("title", "Game title"))
            .param(ParameterSpec::required("review", "Write your review here...").multi_line()),
        EndpointDefinition::new("wishlist", Get, "/api/games/wishlist"),
        EndpointDefinition::new("wishlist-add", Post, "/api/games/wishlist")
            .param(ParameterSpec::required("title", "Game title")),
        EndpointDefinition::new("wishlist-remove", Delete, "/api/games/wishlist")
            .param(ParameterSpec::required("title", "Game title")),
        EndpointDefinition::new("game-create", Post, "/api/games").with_body(Some(json!({
            "title": "Stardew Valley",
            "genres": ["Simulation", "RPG"],
            "price": "$15",
            "rating": 4.9,
            "release_date": "2016-02-26"
        }))),
        // The backend deletes by title first, then by id.
        EndpointDefinition::new("game-delete", Delete, "/api/games")
            .param(ParameterSpec::optional("title", "Game title"))
            .param(ParameterSpec::optional("id", "Game id")),
        EndpointDefinition::new("health", Get, "/api/health"),
        EndpointDefinition::new("logs", Get, "/__logs"),
        EndpointDefinition::new("reload", Post, "/__reload"),
    ]
}

/// Key of the health endpoint polled for connectivity.
pub const HEALTH_ENDPOINT_KEY: &str = "health";

/// Key of the request log endpoint used by export.
pub const LOGS_ENDPOINT_KEY: &str = "logs";

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn keys_are_unique() {
        let endpoints = builtin_endpoints();
        let keys: HashSet<_> = endpoints.iter().map(|e| e.key.as_str()).collect();
        assert_eq!(keys.len(), endpoints.len());
    }

    #[test]
    fn games_is_first() {
        assert_eq!(builtin_endpoints()[0].key, "games");
    }

    #[test]
    fn write_endpoints_use_query_parameters() {
        let endpoints = builtin_endpoints();
        for key in ["review", "wishlist-add", "wishlist-remove"] {
            let def = endpoints.iter().find(|e| e.key == key).unwrap();
            assert!(!def.has_body, "{key} should not expect a body");
            assert!(def.find_param("title").unwrap().required);
        }
    }

    #[test]
    fn special_endpoints_exist() {
        let endpoints = builtin_endpoints();
        assert!(endpoints.iter().any(|e| e.key == HEALTH_ENDPOINT_KEY && e.path == "/api/health"));
        assert!(endpoints.iter().any(|e| e.key == LOGS_ENDPOINT_KEY && e.path == "/__logs"));
    }
}
