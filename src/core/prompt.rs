use crate::core::{Category, ProficiencyLevel};

fn audience(level: &ProficiencyLevel) -> &'static str {
    match level.as_str().to_ascii_uppercase().as_str() {
        "A1" | "A2" => {
            "The learner is a beginner. Use short sentences and very common words, and explain meaning in the simplest possible English."
        }
        "B1" | "B2" => {
            "The learner is an intermediate speaker who can handle everyday conversation and wants to sound more natural at work and in daily life."
        }
        "C1" | "C2" => {
            "The learner is an advanced non-native speaker aiming for native-like fluency and high-stakes exams (e.g. IELTS Band 9). Avoid beginner explanations."
        }
        _ => "Pitch the explanation at the learner's stated level.",
    }
}

fn focus(category: Category) -> &'static str {
    match category {
        Category::Phrase => {
            "Teach one natural phrase or expression that a well-educated native speaker uses regularly."
        }
        Category::Collocation => {
            "Teach one strong collocation: a word combination native speakers use together, where a learner would likely pick the wrong partner word."
        }
        Category::Usage => {
            "Teach one subtle usage point: a grammar pattern, preposition choice or word form that learners commonly get wrong."
        }
        Category::RegisterAndTone => {
            "Teach one item through the lens of register and tone: when it sounds formal, neutral or casual, and what to say instead in the other registers."
        }
        Category::PrecisionAndNuance => {
            "Teach one pair or small set of near-synonyms and the precise difference in meaning or nuance between them."
        }
        Category::ContrastAndRefinement => {
            "Contrast and refine: take items of the kind taught earlier this week (phrases, collocations, usage points, register, nuance) and sharpen the learner's control of them. Do not introduce any new item; reuse only earlier-week material."
        }
        Category::AppliedUsage => {
            "Applied usage: pick exactly one item of the kind taught earlier this week and show it working in a realistic professional or everyday situation. Do not introduce any new item."
        }
    }
}

/// Renders the full instruction prompt for one recipient. Pure: the same
/// level and category always produce the same text.
pub fn build_prompt(level: &ProficiencyLevel, category: Category) -> String {
    let mut prompt = String::new();

    prompt.push_str("Role & goal\n");
    prompt.push_str(
        "You are an expert English instructor for adult learners. Generate one short daily English lesson suitable for a quick email that can be read in under one minute.\n\n",
    );

    prompt.push_str("Audience\n");
    prompt.push_str(&format!("CEFR level: {}. {}\n\n", level, audience(level)));

    prompt.push_str(&format!("Lesson category: {}\n", category));
    prompt.push_str(focus(category));
    prompt.push_str("\n\n");

    prompt.push_str("Lesson constraints\n");
    prompt.push_str("- Focus on one item only.\n");
    prompt.push_str("- Prioritize natural spoken and written English, not textbook language.\n");
    prompt.push_str("- Avoid rare or obscure expressions.\n");
    prompt.push_str("- Avoid slang unless it is widely used and neutral in tone.\n\n");

    prompt.push_str("Required structure (strict)\n");
    prompt.push_str("Produce the lesson using exactly this format, one field per line:\n");
    prompt.push_str(&format!(
        "Today's {}: <item> /<IPA phonetic transcription>/\n",
        category.label().to_lowercase()
    ));
    prompt.push_str("Meaning: <one-sentence meaning>\n");
    prompt.push_str("Example: <one natural example sentence>\n");
    prompt.push_str("Common mistake: ❌ <typical incorrect sentence> ✅ <corrected sentence>\n");
    prompt.push_str("Natural tip: <one practical usage tip>\n\n");

    prompt.push_str("Style rules\n");
    prompt.push_str("- Concise and confident.\n");
    prompt.push_str("- No emojis and no markdown symbols other than ❌ and ✅.\n");
    prompt.push_str("- No meta commentary, greetings or sign-offs.\n");
    prompt.push_str("- Plain text only.\n\n");

    prompt.push_str("Quality bar\n");
    prompt.push_str(
        "Every example sentence must sound like something a well-educated native speaker would actually say in professional or daily life.",
    );

    prompt
}
