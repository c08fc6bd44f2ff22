use crate::models::admin_model::{ModelSchema, Panel, Widget};
use crate::services::index_service::INDEX_ROUTES;
use crate::services::search_service::POST_SEARCH_FIELDS;

pub struct AdminSchemaService;

impl AdminSchemaService {
    pub fn schemas() -> Vec<ModelSchema> {
        vec![
            Self::post_index(),
            Self::post(),
            Self::category(),
            Self::image(),
        ]
    }

    pub fn schema(model: &str) -> Option<ModelSchema> {
        Self::schemas().into_iter().find(|s| s.model == model)
    }

    fn post_index() -> ModelSchema {
        ModelSchema {
            model: "post_index",
            verbose_name: "post index",
            verbose_name_plural: "post indexes",
            kind: "page",
            panels: vec![
                Panel::full("title", Widget::Text),
                Panel::full("intro", Widget::RichText),
            ],
            search_fields: vec!["title"],
            routes: INDEX_ROUTES.names(),
        }
    }

    fn post() -> ModelSchema {
        ModelSchema {
            model: "post",
            verbose_name: "post",
            verbose_name_plural: "posts",
            kind: "page",
            panels: vec![
                Panel::full("title", Widget::Text),
                Panel::MultiField {
                    heading: "Blog information",
                    children: vec![
                        Panel::field("date", Widget::Date),
                        Panel::field("tags", Widget::Tags),
                        Panel::field("categories", Widget::CheckboxSelectMultiple),
                    ],
                },
                Panel::field("intro", Widget::Text),
                Panel::full("body", Widget::RichText),
                Panel::Inline {
                    relation: "gallery",
                    label: "Gallery images",
                    panels: vec![Panel::image("image"), Panel::field("caption", Widget::Text)],
                },
            ],
            search_fields: POST_SEARCH_FIELDS.to_vec(),
            routes: vec![],
        }
    }

    fn category() -> ModelSchema {
        ModelSchema {
            model: "category",
            verbose_name: "category",
            verbose_name_plural: "categories",
            kind: "snippet",
            panels: vec![Panel::field("name", Widget::Text), Panel::image("icon")],
            search_fields: vec![],
            routes: vec![],
        }
    }

    fn image() -> ModelSchema {
        ModelSchema {
            model: "image",
            verbose_name: "image",
            verbose_name_plural: "images",
            kind: "snippet",
            panels: vec![
                Panel::field("title", Widget::Text),
                Panel::field("url", Widget::Text),
                Panel::field("alt_text", Widget::TextArea),
            ],
            search_fields: vec![],
            routes: vec![],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_uses_plural_label_categories() {
        let schema = AdminSchemaService::schema("category").unwrap();
        assert_eq!(schema.verbose_name_plural, "categories");
        assert_eq!(schema.kind, "snippet");
    }

    #[test]
    fn post_schema_groups_blog_information_and_flags_search_fields() {
        let schema = AdminSchemaService::schema("post").unwrap();
        assert!(schema.search_fields.contains(&"intro"));
        assert!(schema.search_fields.contains(&"body"));

        let group = schema.panels.iter().find_map(|p| match p {
            Panel::MultiField { heading, children } => Some((*heading, children.len())),
            _ => None,
        });
        assert_eq!(group, Some(("Blog information", 3)));
    }

    #[test]
    fn index_schema_lists_its_routes_and_unknown_models_are_none() {
        let schema = AdminSchemaService::schema("post_index").unwrap();
        assert_eq!(schema.routes, vec!["post_by_tag", "post_by_tag"]);
        assert!(AdminSchemaService::schema("article").is_none());
    }

    #[test]
    fn panels_serialize_with_a_type_tag() {
        let json = serde_json::to_value(Panel::image("icon")).unwrap();
        assert_eq!(json["type"], "field");
        assert_eq!(json["widget"], "image_chooser");
        assert!(json.get("classname").is_none());
    }
}
