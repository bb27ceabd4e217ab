use crate::models::ProductDetails;

/// Fixed instruction block: the five outputs, the tone rules and the JSON-only rule.
pub const SYSTEM_PROMPT: &str = "
أنت مساعد تسويق ذكي متخصص في كتابة المحتوى للمتاجر الإلكترونية باللغة العربية.
مهمتك هي توليد محتوى جذّاب واحترافي لأي منتج، بصوت العلامة التجارية، وبأسلوب إبداعي مقنع.

المطلوب منك توليده:
1.  **وصف تسويقي رئيسي (Product Description):** نص قصير ومؤثر يصف المنتج بطريقة تجعل القارئ يرغب في شرائه فوراً.
2.  **منشور لمواقع التواصل الاجتماعي (Social Media Post):** صيغة جذّابة مع رموز تعبيرية (emojis) تناسب النشر على Instagram وFacebook.
3.  **عنوان إعلاني قصير (Ad Headline):** لا يزيد عن 7 كلمات ويشدّ الانتباه.
4.  **نقاط البيع الفريدة (USP):** 3 نقاط مختصرة توضّح مميزات المنتج أو ما يميّزه عن المنافسين.
5.  **هاشتاغات ذكية (Hashtags):** قائمة من 5 إلى 10 هاشتاغات مرتبطة بالمنتج والفئة.

قواعد الأسلوب:
-   استخدم لغة قريبة من الزبون، ودافئة، دون مبالغة أو غموض.
-   لا تذكر أسماء منافسين.
-   اجعل الجمل قصيرة ومباشرة، ولا تكرر نفس الفكرة بألفاظ مختلفة.
-   أضف القليل من الطابع الإنساني والمرح عندما يناسب الفئة.
-   يجب أن يكون الناتج بصيغة JSON حصراً بناءً على المخطط المحدد.
";

const DATA_HEADER: &str = "البيانات:";
const NAME_LABEL: &str = "اسم المنتج";
const CATEGORY_LABEL: &str = "الفئة";
const PRICE_LABEL: &str = "السعر التقريبي";
const NOTES_LABEL: &str = "ملاحظات";
const CLOSING_DIRECTIVE: &str = "المطلوب: قم بتوليد المحتوى التسويقي بناءً على البيانات والقواعد المحددة.";

/// Where the fixed instruction block travels in the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InstructionMode {
    /// Sent through the API's `systemInstruction` field.
    #[default]
    SystemInstruction,
    /// Concatenated ahead of the data block in the prompt body.
    Inline,
}

/// Data block for one product. Empty optional fields produce no line at all.
pub fn build_user_prompt(details: &ProductDetails) -> String {
    let mut prompt = format!("{DATA_HEADER}\n");
    prompt.push_str(&format!("- {NAME_LABEL}: {}\n", details.product_name));
    prompt.push_str(&format!("- {CATEGORY_LABEL}: {}\n", details.category));
    if !details.price.is_empty() {
        prompt.push_str(&format!("- {PRICE_LABEL}: {}\n", details.price));
    }
    if !details.notes.is_empty() {
        prompt.push_str(&format!("- {NOTES_LABEL}: {}\n", details.notes));
    }
    prompt.push('\n');
    prompt.push_str(CLOSING_DIRECTIVE);
    prompt
}

/// Instruction block followed by the data block, as a single prompt string.
pub fn assemble_prompt(details: &ProductDetails) -> String {
    format!("{}\n{}", SYSTEM_PROMPT.trim(), build_user_prompt(details))
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptParts {
    pub system_instruction: Option<&'static str>,
    pub contents: String,
}

impl PromptParts {
    pub fn for_product(details: &ProductDetails, mode: InstructionMode) -> Self {
        match mode {
            InstructionMode::SystemInstruction => Self {
                system_instruction: Some(SYSTEM_PROMPT.trim()),
                contents: build_user_prompt(details),
            },
            InstructionMode::Inline => Self {
                system_instruction: None,
                contents: assemble_prompt(details),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn smart_watch() -> ProductDetails {
        ProductDetails {
            product_name: "ساعة ذكية".into(),
            category: "إلكترونيات".into(),
            price: String::new(),
            notes: String::new(),
        }
    }

    #[test]
    fn required_fields_only() {
        let prompt = build_user_prompt(&smart_watch());
        assert!(prompt.contains("اسم المنتج: ساعة ذكية"));
        assert!(prompt.contains("الفئة: إلكترونيات"));
        assert!(!prompt.contains("السعر"));
        assert!(!prompt.contains("ملاحظات"));
        assert!(prompt.ends_with(CLOSING_DIRECTIVE));
    }

    #[test]
    fn optional_fields_become_labeled_lines() {
        let details = ProductDetails {
            price: "350 ريال سعودي".into(),
            notes: "مقاومة للماء".into(),
            ..smart_watch()
        };
        let expected = "البيانات:\n\
            - اسم المنتج: ساعة ذكية\n\
            - الفئة: إلكترونيات\n\
            - السعر التقريبي: 350 ريال سعودي\n\
            - ملاحظات: مقاومة للماء\n\
            \n\
            المطلوب: قم بتوليد المحتوى التسويقي بناءً على البيانات والقواعد المحددة.";
        assert_eq!(build_user_prompt(&details), expected);
    }

    #[test]
    fn assembled_prompt_leads_with_instructions() {
        let prompt = assemble_prompt(&smart_watch());
        assert!(prompt.starts_with("أنت مساعد تسويق ذكي"));
        assert!(prompt.contains("بصيغة JSON حصراً"));
        assert!(prompt.ends_with(&build_user_prompt(&smart_watch())));
    }

    #[test]
    fn instruction_mode_selects_transport() {
        let split = PromptParts::for_product(&smart_watch(), InstructionMode::SystemInstruction);
        assert_eq!(split.system_instruction, Some(SYSTEM_PROMPT.trim()));
        assert_eq!(split.contents, build_user_prompt(&smart_watch()));

        let inline = PromptParts::for_product(&smart_watch(), InstructionMode::Inline);
        assert_eq!(inline.system_instruction, None);
        assert_eq!(inline.contents, assemble_prompt(&smart_watch()));
    }
}
