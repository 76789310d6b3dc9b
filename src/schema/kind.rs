use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum SchemaKind {
    #[serde(rename = "null")]
    Null,
    #[serde(rename = "boolean")]
    Boolean,
    #[serde(rename = "integer")]
    Integer,
    #[serde(rename = "number")]
    Number,
    #[serde(rename = "string")]
    String,
    /// 只接受列出的字符串字面量
    #[serde(rename = "enum")]
    Enum { values: Vec<String> },
    #[serde(rename = "array")]
    Array {
        items: Box<Schema>,
        #[serde(default, skip_serializing_if = "is_zero")]
        min_items: usize,
    },
    #[serde(rename = "object")]
    Object {
        properties: BTreeMap<String, Schema>,
        #[serde(default, skip_serializing_if = "Vec::is_empty")]
        required: Vec<String>,
        #[serde(default = "Schema::allow_additional")]
        additional: bool,
    },
    /// 任意字符串键，值统一符合 `values`
    #[serde(rename = "map")]
    Map { values: Box<Schema> },
    #[serde(rename = "any")]
    Any,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Schema {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(flatten)]
    pub kind: SchemaKind,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub nullable: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Schema {
    pub fn new(kind: SchemaKind) -> Self {
        Self {
            name: None,
            kind,
            nullable: false,
            description: None,
        }
    }

    pub fn string() -> Self {
        Self::new(SchemaKind::String)
    }

    pub fn number() -> Self {
        Self::new(SchemaKind::Number)
    }

    pub fn integer() -> Self {
        Self::new(SchemaKind::Integer)
    }

    pub fn boolean() -> Self {
        Self::new(SchemaKind::Boolean)
    }

    pub fn any() -> Self {
        Self::new(SchemaKind::Any)
    }

    pub fn enumeration<I, S>(values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(SchemaKind::Enum {
            values: values.into_iter().map(Into::into).collect(),
        })
    }

    pub fn array(items: Schema) -> Self {
        Self::new(SchemaKind::Array {
            items: Box::new(items),
            min_items: 0,
        })
    }

    pub fn non_empty_array(items: Schema) -> Self {
        Self::new(SchemaKind::Array {
            items: Box::new(items),
            min_items: 1,
        })
    }

    pub fn map(values: Schema) -> Self {
        Self::new(SchemaKind::Map {
            values: Box::new(values),
        })
    }

    /// 对象 schema；`properties` 中的每一项按 `(名称, schema, 是否必需)` 给出
    pub fn object<I>(properties: I) -> Self
    where
        I: IntoIterator<Item = (&'static str, Schema, bool)>,
    {
        let mut map = BTreeMap::new();
        let mut required = Vec::new();
        for (name, schema, is_required) in properties {
            if is_required {
                required.push(name.to_string());
            }
            map.insert(name.to_string(), schema);
        }
        Self::new(SchemaKind::Object {
            properties: map,
            required,
            additional: true,
        })
    }

    /// 禁止未声明的属性
    pub fn closed(mut self) -> Self {
        if let SchemaKind::Object { additional, .. } = &mut self.kind {
            *additional = false;
        }
        self
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    fn allow_additional() -> bool {
        true
    }
}

fn is_zero(value: &usize) -> bool {
    *value == 0
}
