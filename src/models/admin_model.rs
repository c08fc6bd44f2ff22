use serde::Serialize;

/// Form widget an admin tool should render for a field.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Widget {
    Text,
    TextArea,
    RichText,
    Date,
    Tags,
    CheckboxSelectMultiple,
    ImageChooser,
}

/// Declarative edit-form layout, consumed by an external admin tool.
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Panel {
    Field {
        field: &'static str,
        widget: Widget,
        #[serde(skip_serializing_if = "Option::is_none")]
        classname: Option<&'static str>,
    },
    MultiField {
        heading: &'static str,
        children: Vec<Panel>,
    },
    Inline {
        relation: &'static str,
        label: &'static str,
        panels: Vec<Panel>,
    },
}

impl Panel {
    pub fn field(field: &'static str, widget: Widget) -> Self {
        Panel::Field { field, widget, classname: None }
    }

    pub fn full(field: &'static str, widget: Widget) -> Self {
        Panel::Field { field, widget, classname: Some("full") }
    }

    pub fn image(field: &'static str) -> Self {
        Panel::field(field, Widget::ImageChooser)
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct ModelSchema {
    pub model: &'static str,
    pub verbose_name: &'static str,
    pub verbose_name_plural: &'static str,
    /// Pages live in the tree, snippets are standalone reusable records.
    pub kind: &'static str,
    pub panels: Vec<Panel>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub search_fields: Vec<&'static str>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub routes: Vec<&'static str>,
}
