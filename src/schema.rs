use serde_json::{json, Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    StringArray,
}

#[derive(Debug, Clone, Copy)]
pub struct SchemaField {
    pub name: &'static str,
    pub kind: FieldKind,
    pub description: &'static str,
}

/// Declared output contract for `generateContent`. Every field is required.
#[derive(Debug, Clone, Copy)]
pub struct ResponseSchema {
    pub fields: &'static [SchemaField],
}

pub const RESPONSE_SCHEMA: ResponseSchema = ResponseSchema {
    fields: &[
        SchemaField {
            name: "productDescription",
            kind: FieldKind::String,
            description: "وصف تسويقي رئيسي للمنتج.",
        },
        SchemaField {
            name: "socialMediaPost",
            kind: FieldKind::String,
            description: "منشور جذاب لمواقع التواصل الاجتماعي مع رموز تعبيرية.",
        },
        SchemaField {
            name: "adHeadline",
            kind: FieldKind::String,
            description: "عنوان إعلاني قصير لا يزيد عن 7 كلمات.",
        },
        SchemaField {
            name: "uniqueSellingPoints",
            kind: FieldKind::StringArray,
            description: "قائمة من 3 نقاط بيع فريدة ومختصرة.",
        },
        SchemaField {
            name: "hashtags",
            kind: FieldKind::StringArray,
            description: "قائمة من 5 إلى 10 هاشتاغات ذكية.",
        },
    ],
};

impl ResponseSchema {
    pub fn required(&self) -> Vec<&'static str> {
        self.fields.iter().map(|f| f.name).collect()
    }

    /// Gemini REST `responseSchema` object.
    pub fn to_json(&self) -> Value {
        let mut properties = Map::new();
        for field in self.fields {
            let property = match field.kind {
                FieldKind::String => json!({
                    "type": "STRING",
                    "description": field.description,
                }),
                FieldKind::StringArray => json!({
                    "type": "ARRAY",
                    "description": field.description,
                    "items": { "type": "STRING" },
                }),
            };
            properties.insert(field.name.to_string(), property);
        }
        json!({
            "type": "OBJECT",
            "properties": properties,
            "required": self.required(),
        })
    }
}
