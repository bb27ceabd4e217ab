use serde::Serialize;

use crate::models::MarketingContent;

pub const COPY_ALL_SEPARATOR: &str = "\n\n----------\n\n";

/// One copyable card on the page, or the aggregate of all of them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Block {
    ProductDescription,
    SocialMediaPost,
    AdHeadline,
    UniqueSellingPoints,
    Hashtags,
    All,
}

impl Block {
    /// Field blocks in display order.
    pub const FIELDS: [Block; 5] = [
        Block::ProductDescription,
        Block::SocialMediaPost,
        Block::AdHeadline,
        Block::UniqueSellingPoints,
        Block::Hashtags,
    ];

    pub fn key(self) -> &'static str {
        match self {
            Block::ProductDescription => "productDescription",
            Block::SocialMediaPost => "socialMediaPost",
            Block::AdHeadline => "adHeadline",
            Block::UniqueSellingPoints => "uniqueSellingPoints",
            Block::Hashtags => "hashtags",
            Block::All => "all",
        }
    }

    pub fn from_key(key: &str) -> Option<Block> {
        Block::FIELDS.into_iter().chain([Block::All]).find(|b| b.key() == key)
    }

    pub fn title(self) -> &'static str {
        match self {
            Block::ProductDescription => "الوصف التسويقي",
            Block::SocialMediaPost => "منشور للسوشيال ميديا",
            Block::AdHeadline => "عنوان إعلاني",
            Block::UniqueSellingPoints => "نقاط البيع الفريدة",
            Block::Hashtags => "هاشتاغات",
            Block::All => "نسخ الكل",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "camelCase")]
pub enum BlockBody<'a> {
    /// Wrapped paragraph.
    Text(&'a str),
    /// Bulleted list.
    List(&'a [String]),
}

impl BlockBody<'_> {
    /// Clipboard form: lists are one item per line.
    pub fn plain_text(&self) -> String {
        match self {
            BlockBody::Text(text) => text.to_string(),
            BlockBody::List(items) => items.join("\n"),
        }
    }
}

pub fn body(content: &MarketingContent, block: Block) -> Option<BlockBody<'_>> {
    match block {
        Block::ProductDescription => Some(BlockBody::Text(&content.product_description)),
        Block::SocialMediaPost => Some(BlockBody::Text(&content.social_media_post)),
        Block::AdHeadline => Some(BlockBody::Text(&content.ad_headline)),
        Block::UniqueSellingPoints => Some(BlockBody::List(&content.unique_selling_points)),
        Block::Hashtags => Some(BlockBody::List(&content.hashtags)),
        Block::All => None,
    }
}

/// Every field under its title, separated by a fixed rule line.
pub fn copy_all(content: &MarketingContent) -> String {
    Block::FIELDS
        .iter()
        .filter_map(|&block| body(content, block).map(|b| format!("{}:\n{}", block.title(), b.plain_text())))
        .collect::<Vec<_>>()
        .join(COPY_ALL_SEPARATOR)
}

/// Text placed on the clipboard for `block`.
pub fn copy_text(content: &MarketingContent, block: Block) -> String {
    match body(content, block) {
        Some(b) => b.plain_text(),
        None => copy_all(content),
    }
}
