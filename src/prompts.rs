//! Prompt templates for marketing copy and companion product images.
//!
//! Everything here is pure: the same request always renders the same prompt.

use crate::models::{AspectRatio, ContentType, MarketingRequest};

pub const MARKETING_COPY: &str = include_str!("../data/prompts/marketing_copy.txt");
pub const PRODUCT_IMAGE: &str = include_str!("../data/prompts/product_image.txt");
pub const IMAGE_HINTS: &str = include_str!("../data/prompts/image_hints.txt");

/// Replace `{{key}}` placeholders in a template string.
///
/// Substitution is single-pass, so placeholder syntax inside a value is left
/// untouched. Unknown keys are kept verbatim.
pub fn render(template: &str, vars: &[(&str, &str)]) -> String {
    let mut result = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(start) = rest.find("{{") {
        result.push_str(&rest[..start]);
        let after_open = &rest[start + 2..];

        let Some(end) = after_open.find("}}") else {
            result.push_str(&rest[start..]);
            rest = "";
            break;
        };

        let key = &after_open[..end];
        match vars.iter().find(|(name, _)| *name == key) {
            Some((_, value)) => result.push_str(value),
            None => {
                result.push_str("{{");
                result.push_str(key);
                result.push_str("}}");
            }
        }
        rest = &after_open[end + 2..];
    }

    result.push_str(rest);
    result
}

/// Closing instruction appended to the copy prompt for each content type.
pub fn copy_instruction(content_type: ContentType) -> &'static str {
    match content_type {
        ContentType::ProductDescription => {
            "Focus on benefits, unique selling points, and a clear call to action if applicable."
        }
        ContentType::AdHeadline => {
            "Make it short, attention-grabbing, impactful, and suitable for a digital ad banner."
        }
        ContentType::SocialMediaPost => {
            "Keep it concise, engaging, and include 2-3 relevant hashtags and emojis."
        }
        ContentType::EmailSubjectLine => {
            "Make it concise, intriguing, and designed to maximize email open rates. Suggest 3 variations."
        }
    }
}

/// Visual direction appended to the image prompt for each content type.
pub fn visual_style(content_type: ContentType) -> &'static str {
    match content_type {
        ContentType::ProductDescription => {
            "Show the product in a clean, well-lit studio setting, highlighting its key features."
        }
        ContentType::AdHeadline => {
            "Create a dynamic and eye-catching visual that evokes curiosity and impact."
        }
        ContentType::SocialMediaPost => {
            "Make it vibrant and shareable, suitable for a social media feed. Focus on a lifestyle context."
        }
        ContentType::EmailSubjectLine => {
            "Generate a conceptual or abstract image that subtly hints at the product's benefits or purpose."
        }
    }
}

pub fn build_marketing_prompt(request: &MarketingRequest) -> String {
    render(
        MARKETING_COPY,
        &[
            ("content_type", request.content_type.label()),
            ("product_name", &request.product_name),
            ("product_description", &request.product_description),
            ("target_audience", &request.target_audience),
            ("tone", request.tone.label()),
            ("instruction", copy_instruction(request.content_type)),
        ],
    )
    .trim_end()
    .to_string()
}

pub fn build_image_prompt(request: &MarketingRequest) -> String {
    render(
        PRODUCT_IMAGE,
        &[
            ("product_name", &request.product_name),
            ("product_description", &request.product_description),
            ("target_audience", &request.target_audience),
            ("tone", request.tone.label()),
            ("visual_style", visual_style(request.content_type)),
        ],
    )
    .trim_end()
    .to_string()
}

/// Decorates an image prompt for models that only take count and aspect
/// ratio as natural-language hints.
pub fn with_image_hints(prompt: &str, count: u8, aspect_ratio: AspectRatio) -> String {
    let mut hinted = render(IMAGE_HINTS.trim_end(), &[("prompt", prompt)]);

    if aspect_ratio != AspectRatio::Square {
        hinted.push_str(&format!(
            " The image should have a {} aspect ratio.",
            aspect_ratio
        ));
    }
    if count > 1 {
        hinted.push_str(&format!(" Generate {} variations of this image.", count));
    }
    hinted
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Tone;
    use pretty_assertions::assert_eq;

    fn glowup(content_type: ContentType) -> MarketingRequest {
        MarketingRequest {
            content_type,
            product_name: "GlowUp Serum".to_string(),
            product_description: "brightens skin".to_string(),
            target_audience: "women 25-45".to_string(),
            tone: Tone::Excited,
        }
    }

    #[test]
    fn test_render_single_var() {
        assert_eq!(
            render("Hello {{name}}!", &[("name", "world")]),
            "Hello world!"
        );
    }

    #[test]
    fn test_render_multiple_vars() {
        assert_eq!(
            render("{{a}} and {{b}}", &[("a", "cats"), ("b", "dogs")]),
            "cats and dogs"
        );
    }

    #[test]
    fn test_render_does_not_rescan_values() {
        assert_eq!(
            render("{{a}} / {{b}}", &[("a", "{{b}}"), ("b", "dogs")]),
            "{{b}} / dogs"
        );
    }

    #[test]
    fn test_render_keeps_unknown_and_unterminated_placeholders() {
        assert_eq!(render("{{missing}} x", &[]), "{{missing}} x");
        assert_eq!(render("tail {{open", &[("open", "no")]), "tail {{open");
    }

    #[test]
    fn test_templates_have_placeholders() {
        for key in [
            "{{content_type}}",
            "{{product_name}}",
            "{{product_description}}",
            "{{target_audience}}",
            "{{tone}}",
            "{{instruction}}",
        ] {
            assert!(MARKETING_COPY.contains(key), "copy template lacks {}", key);
        }
        assert!(PRODUCT_IMAGE.contains("{{visual_style}}"));
        assert!(IMAGE_HINTS.contains("{{prompt}}"));
    }

    #[test]
    fn test_marketing_prompt_is_deterministic() {
        for content_type in ContentType::ALL {
            let request = glowup(content_type);
            assert_eq!(
                build_marketing_prompt(&request),
                build_marketing_prompt(&request)
            );
            assert_eq!(build_image_prompt(&request), build_image_prompt(&request));
        }
    }

    #[test]
    fn test_marketing_prompt_contains_instruction_exactly_once() {
        for content_type in ContentType::ALL {
            let prompt = build_marketing_prompt(&glowup(content_type));
            assert_eq!(prompt.matches(copy_instruction(content_type)).count(), 1);

            for other in ContentType::ALL.into_iter().filter(|c| *c != content_type) {
                assert!(!prompt.contains(copy_instruction(other)));
            }
        }
    }

    #[test]
    fn test_marketing_prompt_layout() {
        let prompt = build_marketing_prompt(&glowup(ContentType::SocialMediaPost));

        assert!(prompt.starts_with(
            "You are an expert copywriter. Generate a Social Media Post for the following product:"
        ));
        assert!(prompt.contains("Product Name: GlowUp Serum\n"));
        assert!(prompt.contains("Desired Tone: Excited\n"));
        assert!(prompt.ends_with("\n\nGenerated Content:"));
    }

    #[test]
    fn test_ad_headline_scenario() {
        let prompt = build_marketing_prompt(&glowup(ContentType::AdHeadline));

        for value in ["GlowUp Serum", "brightens skin", "women 25-45", "Excited"] {
            assert!(prompt.contains(value), "prompt lacks {}", value);
        }
        assert!(prompt.to_lowercase().contains("short, attention-grabbing"));
    }

    #[test]
    fn test_image_prompt_contains_fields_verbatim() {
        let request = MarketingRequest {
            content_type: ContentType::EmailSubjectLine,
            product_name: "Café {{tone}} Blend".to_string(),
            product_description: "single-origin, notes of cocoa & cherry".to_string(),
            target_audience: "home baristas".to_string(),
            tone: Tone::Luxurious,
        };
        let prompt = build_image_prompt(&request);

        assert!(prompt.contains("A photorealistic image of Café {{tone}} Blend."));
        assert!(prompt.contains("single-origin, notes of cocoa & cherry"));
        assert!(prompt.contains("home baristas"));
        assert!(prompt.contains("Luxurious"));
        assert!(prompt.contains(visual_style(ContentType::EmailSubjectLine)));
        assert!(prompt.ends_with("studio lighting, detailed, vibrant colors."));
    }

    #[test]
    fn test_image_hints_default_options_add_nothing() {
        assert_eq!(
            with_image_hints("a serum bottle", 1, AspectRatio::Square),
            "Please generate a photorealistic image based on this description: a serum bottle"
        );
    }

    #[test]
    fn test_image_hints_include_ratio_and_count() {
        let hinted = with_image_hints("a serum bottle", 2, AspectRatio::Widescreen);
        assert!(hinted.ends_with(
            "a serum bottle The image should have a 16:9 aspect ratio. Generate 2 variations of this image."
        ));
    }

    #[test]
    fn test_image_hints_keep_prompt_verbatim() {
        assert_eq!(
            with_image_hints("a serum bottle  \n", 1, AspectRatio::Square),
            "Please generate a photorealistic image based on this description: a serum bottle  \n"
        );
    }
}
