mod list;
pub mod search;

use axum::{routing::get, Router};
use serde::{de, Deserialize, Deserializer, Serialize};

/// A recipe as served by the upstream source. Lives for a single request.
#[derive(Serialize, Clone, Debug, Default, PartialEq)]
pub struct Recipe {
    pub id: i64,
    #[serde(rename = "nombre")]
    pub name: String,
    #[serde(rename = "ingredientes")]
    pub ingredients: String,
    #[serde(rename = "instrucciones")]
    pub instructions: String,
}

impl Recipe {
    pub fn text_fields(&self) -> [&str; 3] {
        [
            self.name.as_str(),
            self.ingredients.as_str(),
            self.instructions.as_str(),
        ]
    }
}

// Field names match ignoring ASCII case; missing or null fields take their defaults.
impl<'de> Deserialize<'de> for Recipe {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let fields = serde_json::Map::<String, serde_json::Value>::deserialize(deserializer)?;
        let mut recipe = Recipe::default();

        for (key, value) in fields {
            let slot = match key.to_ascii_lowercase().as_str() {
                "id" => {
                    recipe.id = match value {
                        serde_json::Value::Null => 0,
                        serde_json::Value::Number(n) => n.as_i64().ok_or_else(|| {
                            <D::Error as de::Error>::custom(format!("id is not an integer: {n}"))
                        })?,
                        other => {
                            return Err(de::Error::custom(format!(
                                "id is not an integer: {other}"
                            )))
                        }
                    };
                    continue;
                }
                "nombre" => &mut recipe.name,
                "ingredientes" => &mut recipe.ingredients,
                "instrucciones" => &mut recipe.instructions,
                _ => continue,
            };

            *slot = match value {
                serde_json::Value::Null => String::new(),
                serde_json::Value::String(s) => s,
                other => {
                    return Err(de::Error::custom(format!(
                        "{key} is not a string: {other}"
                    )))
                }
            };
        }

        Ok(recipe)
    }
}

pub fn router(state: crate::AppState) -> Router {
    Router::new()
        .route("/recetas", get(list::list_recipes))
        .route("/buscar/{term}", get(search::search_recipes))
        .with_state(state)
}
