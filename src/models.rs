use serde::{Serialize, Deserialize};
use serde_with::{serde_as, DefaultOnNull};

#[serde_as]
#[derive(Debug, Serialize, Deserialize, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProductDetails {
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub product_name: String,
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub category: String,
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub price: String, // free text, e.g. "350 ريال سعودي"
    #[serde(default)]
    #[serde_as(deserialize_as = "DefaultOnNull")]
    pub notes: String,
}

impl ProductDetails {
    /// Both required fields carry something other than whitespace.
    pub fn has_required_fields(&self) -> bool {
        !self.product_name.trim().is_empty() && !self.category.trim().is_empty()
    }
}

/// Structured copy returned by the model. Headline length, USP count and hashtag
/// count are prompt instructions only and are not checked here.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct MarketingContent {
    pub product_description: String,
    pub social_media_post: String,
    pub ad_headline: String,
    pub unique_selling_points: Vec<String>,
    pub hashtags: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn optional_fields_default_when_missing_or_null() {
        let details: ProductDetails = serde_json::from_str(
            r#"{"productName":"ساعة ذكية","category":"إلكترونيات","price":null}"#,
        ).unwrap();
        assert_eq!(details.price, "");
        assert_eq!(details.notes, "");
    }

    #[test]
    fn absent_or_null_required_fields_read_as_empty() {
        let details: ProductDetails = serde_json::from_str(r#"{"productName":null,"category":"c"}"#).unwrap();
        assert_eq!(details.product_name, "");
        assert!(!details.has_required_fields());

        let details: ProductDetails = serde_json::from_str(r#"{"category":"c"}"#).unwrap();
        assert_eq!(details.product_name, "");
        assert!(!details.has_required_fields());
    }

    #[test]
    fn whitespace_only_required_field_is_missing() {
        let details = ProductDetails {
            product_name: "   ".into(),
            category: "أزياء".into(),
            ..Default::default()
        };
        assert!(!details.has_required_fields());
    }

    #[test]
    fn content_requires_every_field() {
        let err = serde_json::from_str::<MarketingContent>(
            r#"{"productDescription":"a","socialMediaPost":"b","adHeadline":"c","uniqueSellingPoints":[]}"#,
        );
        assert!(err.is_err());
    }
}
